//! 存储错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("记录未找到: {entity} id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("目标序号越界: {0}")]
    IndexOutOfBound(isize),
}

pub type Result<T> = std::result::Result<T, StoreError>;
