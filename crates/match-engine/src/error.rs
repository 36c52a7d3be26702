//! 规则引擎错误类型
//!
//! 仅供规则编辑侧的校验路径使用；生产评估路径是全函数，不产生错误。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("未识别的操作符")]
    UnknownOperator,

    #[error("无效的正则表达式 '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type Result<T> = std::result::Result<T, RuleError>;
