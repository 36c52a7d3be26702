//! 匹配操作符定义

use serde::{Deserialize, Serialize};
use std::fmt;

/// 字符串匹配操作符
///
/// 封闭枚举加显式 `Unknown` 兜底：未识别的操作符字符串反序列化为
/// `Unknown`，评估时恒为不命中，不报错。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOperator {
    // 子串包含
    Contain,
    NotContain,

    // 全等比较
    Equal,
    NotEqual,

    // 正则匹配
    Regex,

    /// 未识别的操作符（恒不命中）
    #[serde(other)]
    Unknown,
}

impl fmt::Display for MatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Contain => "contain",
            Self::NotContain => "not_contain",
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::Regex => "regex",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
