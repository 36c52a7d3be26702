//! 文档存储
//!
//! 单 JSON 文档的读写抽象：文件实现带 mtime 变更检测，内存实现用于
//! 测试与无持久化场景。

use crate::error::Result;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

/// 单文档存储
pub trait DocumentStore: Send {
    /// 读取整个文档；文档不存在时返回 None，不报错
    fn read(&self) -> Result<Option<Value>>;

    /// 整体覆写文档
    fn write(&mut self, doc: &Value) -> Result<()>;

    fn exist(&self) -> bool;

    /// 上次写入之后文档是否被外部修改
    fn modified(&self) -> bool;
}

/// 按类型读取文档
pub fn read_typed<T: DeserializeOwned>(store: &dyn DocumentStore) -> Result<Option<T>> {
    match store.read()? {
        Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
        None => Ok(None),
    }
}

/// 按类型覆写文档
pub fn write_typed<T: Serialize>(store: &mut dyn DocumentStore, v: &T) -> Result<()> {
    store.write(&serde_json::to_value(v)?)
}

/// JSON 文件存储
pub struct JsonFileStore {
    path: PathBuf,
    /// 最近一次写入时的文件 mtime
    last_write: Mutex<Option<SystemTime>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_write: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn read(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn write(&mut self, doc: &Value) -> Result<()> {
        let bytes = serde_json::to_vec(doc)?;
        fs::write(&self.path, bytes)?;

        *self.last_write.lock() = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok();
        Ok(())
    }

    fn exist(&self) -> bool {
        self.path.exists()
    }

    fn modified(&self) -> bool {
        // 从未写入过，视为已变更，促使调用方重读
        let Some(last) = *self.last_write.lock() else {
            return true;
        };

        match fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime > last,
            Err(_) => false,
        }
    }
}

/// 内存存储
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self) -> Result<Option<Value>> {
        Ok(self.data.read().clone())
    }

    fn write(&mut self, doc: &Value) -> Result<()> {
        *self.data.write() = Some(doc.clone());
        Ok(())
    }

    fn exist(&self) -> bool {
        self.data.read().is_some()
    }

    fn modified(&self) -> bool {
        false
    }
}
