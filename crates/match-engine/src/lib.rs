//! 驱动匹配规则引擎
//!
//! 提供基于规则的字符串分类能力，支持：
//! - JSON 规则定义和解析
//! - 大小写归一化与五种匹配操作符
//! - 正则模式预编译
//! - 硬件描述清单的规则集匹配

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod models;
pub mod operators;

pub use compiler::{CompiledMatchRule, RuleCompiler};
pub use error::{Result, RuleError};
pub use evaluator::RuleEvaluator;
pub use matcher::{MatchReport, MatchedRuleSet, ProfileMatcher};
pub use models::{HardwareProfile, HardwareRule, MatchRule, RuleSet, RuleSource};
pub use operators::MatchOperator;
