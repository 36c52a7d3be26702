//! 驱动分组存储
//!
//! 驱动分组与组内驱动的落盘 CRUD、排序调整，删除时向事件总线发布
//! 以便规则集侧剔除引用。组内驱动 id 在全部分组范围内查重。

use crate::entity::{self, HasId};
use crate::error::{Result, StoreError};
use crate::events::DeleteEventBus;
use crate::store::{DocumentStore, read_typed, write_typed};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// 驱动类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverType {
    Network,
    Display,
    Miscellaneous,
}

/// 单个驱动
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub driver_type: DriverType,
    pub path: String,
    #[serde(default)]
    pub flags: Vec<String>,
    /// 数据格式沿用 minExeTime / allowRtCodes 字段名
    #[serde(rename = "minExeTime", default)]
    pub min_exe_time: f32,
    #[serde(rename = "allowRtCodes", default)]
    pub allow_rt_codes: Vec<i32>,
    #[serde(default)]
    pub incompatibles: Vec<String>,
}

/// 驱动分组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverGroup {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub driver_type: DriverType,
    #[serde(default)]
    pub drivers: Vec<Driver>,
}

impl HasId for DriverGroup {
    const ENTITY: &'static str = "driver_group";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// 驱动分组存储
pub struct DriverGroupStorage {
    store: Box<dyn DocumentStore>,
    bus: Arc<DeleteEventBus>,
    data: Vec<DriverGroup>,
    loaded: bool,
}

impl DriverGroupStorage {
    pub fn new(store: Box<dyn DocumentStore>, bus: Arc<DeleteEventBus>) -> Self {
        Self {
            store,
            bus,
            data: Vec::new(),
            loaded: false,
        }
    }

    pub fn all(&mut self) -> Result<Vec<DriverGroup>> {
        self.ensure_loaded()?;
        Ok(self.data.clone())
    }

    pub fn get(&mut self, id: &str) -> Result<DriverGroup> {
        self.ensure_loaded()?;
        entity::get(id, &self.data)
    }

    pub fn add(&mut self, mut group: DriverGroup) -> Result<String> {
        self.ensure_loaded()?;
        group.id.clear();
        self.assign_driver_ids(&mut group);

        let id = entity::create(group, &mut self.data);
        self.persist()?;
        info!("驱动分组已创建: {}", id);
        Ok(id)
    }

    pub fn update(&mut self, mut group: DriverGroup) -> Result<()> {
        self.ensure_loaded()?;
        // 编辑时新增的驱动没有 id，这里补齐
        self.assign_driver_ids(&mut group);
        entity::update(group, &mut self.data)?;
        self.persist()
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.ensure_loaded()?;
        entity::delete(id, &mut self.data)?;
        self.persist()?;

        info!("驱动分组已删除: {}", id);
        self.bus.publish(DriverGroup::ENTITY, &[id.to_string()])
    }

    /// 查找某驱动所在的分组 id
    pub fn group_of(&mut self, driver_id: &str) -> Result<String> {
        self.ensure_loaded()?;
        self.find_group_of(driver_id)
            .map(|id| id.to_string())
            .ok_or_else(|| StoreError::NotFound {
                entity: "driver",
                id: driver_id.to_string(),
            })
    }

    /// 把分组移动到目标序号之后；index 为 -1 表示移到最前
    ///
    /// 目标位置与现位置相同为无操作；越界返回错误且不改动数据。
    pub fn move_behind(&mut self, id: &str, index: isize) -> Result<Vec<DriverGroup>> {
        self.ensure_loaded()?;
        let src = entity::index_of(id, &self.data)? as isize;
        let len = self.data.len() as isize;

        if index < -1 || index >= len - 1 {
            return Err(StoreError::IndexOutOfBound(index));
        }

        if len == 1 || src - index == 1 {
            return Ok(self.data.clone());
        }

        let target = (index + 1) as usize;
        let src = src as usize;
        if src < target {
            for i in src..target {
                self.data.swap(i, i + 1);
            }
        } else {
            for i in ((target + 1)..=src).rev() {
                self.data.swap(i - 1, i);
            }
        }

        self.persist()?;
        Ok(self.data.clone())
    }

    fn find_group_of(&self, driver_id: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|g| g.drivers.iter().any(|d| d.id == driver_id))
            .map(|g| g.id.as_str())
    }

    /// 为缺 id 的驱动分配在全部分组内唯一的 id
    fn assign_driver_ids(&self, group: &mut DriverGroup) {
        let mut rng = rand::rng();
        for idx in 0..group.drivers.len() {
            if !group.drivers[idx].id.is_empty() {
                continue;
            }

            loop {
                let id = format!("{:08x}", rng.random::<u32>());
                let taken = group.drivers.iter().any(|d| d.id == id)
                    || self.find_group_of(&id).is_some();
                if !taken {
                    group.drivers[idx].id = id;
                    break;
                }
            }
        }
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        if self.loaded && !self.store.modified() {
            return Ok(());
        }

        if !self.store.exist() {
            self.data = Vec::new();
            self.persist()?;
        } else {
            self.data = read_typed(self.store.as_ref())?.unwrap_or_default();
        }
        self.loaded = true;
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        write_typed(self.store.as_mut(), &self.data)
    }
}
