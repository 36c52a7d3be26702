//! 应用设置存储
//!
//! 单文档设置：文档缺失时返回并落盘默认值。

use crate::error::Result;
use crate::store::{DocumentStore, read_typed, write_typed};
use serde::{Deserialize, Serialize};

/// 安装成功后的动作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessAction {
    #[default]
    Nothing,
    Reboot,
    Shutdown,
}

/// 应用设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSetting {
    pub create_partition: bool,
    pub set_password: bool,
    pub password: String,
    pub parallel_install: bool,
    pub success_action: SuccessAction,
    pub success_action_delay: u32,
    pub filter_miniport_nic: bool,
    pub filter_microsoft_nic: bool,
    pub language: String,
    pub driver_download_url: String,
    pub auto_check_update: bool,
    pub hide_not_found: bool,
}

impl Default for AppSetting {
    fn default() -> Self {
        Self {
            create_partition: false,
            set_password: false,
            password: String::new(),
            parallel_install: true,
            success_action: SuccessAction::Nothing,
            success_action_delay: 5,
            filter_miniport_nic: true,
            filter_microsoft_nic: true,
            language: "en".to_string(),
            driver_download_url: String::new(),
            auto_check_update: true,
            hide_not_found: false,
        }
    }
}

/// 应用设置存储
pub struct AppSettingStorage {
    store: Box<dyn DocumentStore>,
}

impl AppSettingStorage {
    pub fn new(store: Box<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// 读取设置；文档缺失时落盘并返回默认值
    pub fn all(&mut self) -> Result<AppSetting> {
        if !self.store.exist() {
            let setting = AppSetting::default();
            write_typed(self.store.as_mut(), &setting)?;
            return Ok(setting);
        }

        Ok(read_typed(self.store.as_ref())?.unwrap_or_default())
    }

    pub fn update(&mut self, setting: AppSetting) -> Result<AppSetting> {
        write_typed(self.store.as_mut(), &setting)?;
        Ok(setting)
    }
}
