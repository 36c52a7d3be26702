//! 规则编译器
//!
//! 把 [`MatchRule`] 预编译成可复用的匹配器：大小写归一化与正则编译
//! 只做一次，适合对同一条规则评估大量候选串的场景。编译后的语义与
//! [`crate::RuleEvaluator`] 的逐次评估完全一致。

use crate::error::{Result, RuleError};
use crate::models::MatchRule;
use crate::operators::MatchOperator;
use regex::{Regex, RegexBuilder};

/// 编译后的单个取值
#[derive(Debug, Clone)]
enum CompiledValue {
    /// 字面量（已按规则的大小写敏感性归一化）
    Literal(String),
    /// 正则模式；编译失败的槽位为 None，评估时恒不命中
    Pattern(Option<Regex>),
}

/// 编译后的匹配规则
#[derive(Debug, Clone)]
pub struct CompiledMatchRule {
    operator: MatchOperator,
    is_case_sensitive: bool,
    should_hit_all: bool,
    values: Vec<CompiledValue>,
}

impl CompiledMatchRule {
    /// 对一个候选串做命中判定
    pub fn matches(&self, input: &str) -> bool {
        let lowered;
        let input_cmp: &str = if self.is_case_sensitive {
            input
        } else {
            lowered = input.to_lowercase();
            &lowered
        };

        let hit = |value: &CompiledValue| match (self.operator, value) {
            (MatchOperator::Contain, CompiledValue::Literal(v)) => input_cmp.contains(v.as_str()),
            (MatchOperator::NotContain, CompiledValue::Literal(v)) => {
                !input_cmp.contains(v.as_str())
            }
            (MatchOperator::Equal, CompiledValue::Literal(v)) => input_cmp == v.as_str(),
            (MatchOperator::NotEqual, CompiledValue::Literal(v)) => input_cmp != v.as_str(),
            // 正则作用在原始输入上，大小写由编译期标志承担
            (MatchOperator::Regex, CompiledValue::Pattern(Some(re))) => re.is_match(input),
            _ => false,
        };

        if self.should_hit_all {
            self.values.iter().all(hit)
        } else {
            self.values.iter().any(hit)
        }
    }
}

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译规则
    ///
    /// 编译不会失败：非法模式降级为恒不命中的槽位，与逐次评估路径
    /// 的宽容语义保持一致。
    pub fn compile(rule: &MatchRule) -> CompiledMatchRule {
        let values = rule
            .values
            .iter()
            .map(|v| match rule.operator {
                MatchOperator::Regex => {
                    CompiledValue::Pattern(Self::build_regex(v, !rule.is_case_sensitive).ok())
                }
                _ if rule.is_case_sensitive => CompiledValue::Literal(v.clone()),
                _ => CompiledValue::Literal(v.to_lowercase()),
            })
            .collect();

        CompiledMatchRule {
            operator: rule.operator,
            is_case_sensitive: rule.is_case_sensitive,
            should_hit_all: rule.should_hit_all,
            values,
        }
    }

    /// 校验规则
    ///
    /// 供规则编辑侧提示用：报告未识别操作符与非法模式。生产评估
    /// 不走这里，坏规则在评估时只会静默不命中。
    pub fn validate(rule: &MatchRule) -> Result<()> {
        if rule.operator == MatchOperator::Unknown {
            return Err(RuleError::UnknownOperator);
        }

        if rule.operator == MatchOperator::Regex {
            for v in &rule.values {
                Self::build_regex(v, !rule.is_case_sensitive).map_err(|e| {
                    RuleError::InvalidPattern {
                        pattern: v.clone(),
                        reason: e.to_string(),
                    }
                })?;
            }
        }

        Ok(())
    }

    fn build_regex(pattern: &str, case_insensitive: bool) -> std::result::Result<Regex, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::RuleEvaluator;

    fn rule(operator: MatchOperator, values: &[&str]) -> MatchRule {
        MatchRule::new(operator, values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn test_compiled_agrees_with_evaluator() {
        let rules = [
            rule(MatchOperator::Contain, &[".exe", ".msi"]),
            rule(MatchOperator::NotContain, &["tmp", "cache"]).hit_all(),
            rule(MatchOperator::Equal, &["readme.txt"]).case_sensitive(),
            rule(MatchOperator::NotEqual, &["a", "b"]).hit_all(),
            rule(MatchOperator::Regex, &[r"^img_\d+\.png$", "(unclosed"]),
            rule(MatchOperator::Contain, &[]),
            rule(MatchOperator::Contain, &[]).hit_all(),
        ];
        let inputs = ["Setup.EXE", "IMG_0423.png", "build/cache/x", "readme.txt", "", "a"];

        for r in &rules {
            let compiled = RuleCompiler::compile(r);
            for input in inputs {
                assert_eq!(
                    compiled.matches(input),
                    RuleEvaluator::evaluate(r, input),
                    "rule {:?} on {:?}",
                    r,
                    input
                );
            }
        }
    }

    #[test]
    fn test_invalid_pattern_slot_never_matches() {
        let compiled = RuleCompiler::compile(&rule(MatchOperator::Regex, &["(unclosed"]));
        assert!(!compiled.matches("anything"));

        let all = RuleCompiler::compile(&rule(MatchOperator::Regex, &["(unclosed"]).hit_all());
        assert!(!all.matches("anything"));
    }

    #[test]
    fn test_validate_reports_invalid_pattern() {
        let err = RuleCompiler::validate(&rule(MatchOperator::Regex, &["(unclosed"])).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));

        assert!(RuleCompiler::validate(&rule(MatchOperator::Regex, &[r"^\d+$"])).is_ok());
    }

    #[test]
    fn test_validate_reports_unknown_operator() {
        let r: MatchRule = serde_json::from_str(r#"{"type": "gte", "values": []}"#).unwrap();
        assert!(matches!(
            RuleCompiler::validate(&r),
            Err(RuleError::UnknownOperator)
        ));
    }

    #[test]
    fn test_compiled_regex_is_case_insensitive_by_default() {
        let compiled = RuleCompiler::compile(&rule(MatchOperator::Regex, &["^setup"]));
        assert!(compiled.matches("SETUP.exe"));

        let sensitive =
            RuleCompiler::compile(&rule(MatchOperator::Regex, &["^setup"]).case_sensitive());
        assert!(!sensitive.matches("SETUP.exe"));
    }
}
