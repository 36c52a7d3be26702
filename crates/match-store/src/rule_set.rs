//! 规则集存储
//!
//! 规则集的落盘 CRUD，并通过删除事件总线保持对驱动分组的引用一致。

use crate::driver::DriverGroup;
use crate::entity::{self, HasId};
use crate::error::Result;
use crate::events::DeleteEventBus;
use crate::store::{DocumentStore, read_typed, write_typed};
use match_engine::RuleSet;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

impl HasId for RuleSet {
    const ENTITY: &'static str = "rule_set";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// 规则集存储
pub struct RuleSetStorage {
    store: Box<dyn DocumentStore>,
    data: Vec<RuleSet>,
    loaded: bool,
}

impl RuleSetStorage {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self {
            store,
            data: Vec::new(),
            loaded: false,
        }
    }

    /// 订阅驱动分组删除事件：从所有规则集中剔除被删分组的引用
    pub fn subscribe_driver_group_deletes(
        storage: Arc<Mutex<RuleSetStorage>>,
        bus: &DeleteEventBus,
    ) {
        bus.subscribe(DriverGroup::ENTITY, move |ids| {
            storage.lock().unlink_driver_groups(ids)
        });
    }

    pub fn all(&mut self) -> Result<Vec<RuleSet>> {
        self.ensure_loaded()?;
        Ok(self.data.clone())
    }

    pub fn get(&mut self, id: &str) -> Result<RuleSet> {
        self.ensure_loaded()?;
        entity::get(id, &self.data)
    }

    pub fn add(&mut self, set: RuleSet) -> Result<String> {
        self.ensure_loaded()?;
        let id = entity::create(set, &mut self.data);
        self.persist()?;
        info!("规则集已创建: {}", id);
        Ok(id)
    }

    pub fn update(&mut self, set: RuleSet) -> Result<RuleSet> {
        self.ensure_loaded()?;
        entity::update(set.clone(), &mut self.data)?;
        self.persist()?;
        Ok(set)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        self.ensure_loaded()?;
        entity::delete(id, &mut self.data)?;
        self.persist()
    }

    /// 从所有规则集中剔除给定驱动分组 id 并落盘
    pub fn unlink_driver_groups(&mut self, ids: &[String]) -> Result<()> {
        self.ensure_loaded()?;
        for set in &mut self.data {
            set.driver_group_ids.retain(|gid| !ids.contains(gid));
        }
        self.persist()
    }

    /// 首次访问或文档被外部修改时重新装载；文档缺失时落盘空集合
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
