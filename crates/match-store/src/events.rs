//! 删除事件总线
//!
//! 实体删除时通知订阅方，用于维护跨存储的引用一致性（如驱动分组
//! 删除后从规则集中剔除其 id）。

use crate::error::Result;
use parking_lot::RwLock;
use std::collections::HashMap;

type Handler = Box<dyn Fn(&[String]) -> Result<()> + Send + Sync>;

/// 删除事件总线
#[derive(Default)]
pub struct DeleteEventBus {
    subscribers: RwLock<HashMap<String, Vec<Handler>>>,
}

impl DeleteEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅某一实体的删除事件
    pub fn subscribe(
        &self,
        entity: &str,
        handler: impl Fn(&[String]) -> Result<()> + Send + Sync + 'static,
    ) {
        self.subscribers
            .write()
            .entry(entity.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// 依订阅顺序执行处理器，首个错误即中止
    pub fn publish(&self, entity: &str, ids: &[String]) -> Result<()> {
        let subscribers = self.subscribers.read();
        if let Some(handlers) = subscribers.get(entity) {
            for handler in handlers {
                handler(ids)?;
            }
        }
        Ok(())
    }
}
