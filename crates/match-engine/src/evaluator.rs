//! 规则评估器
//!
//! 对单个输入字符串评估一条匹配规则。评估是纯函数：无状态、无 I/O，
//! 对任意输入都返回布尔值——非法正则、未识别操作符一律按不命中处理，
//! 绝不向调用方抛错。

use crate::models::MatchRule;
use crate::operators::MatchOperator;
use regex::RegexBuilder;

/// 规则评估器
pub struct RuleEvaluator;

impl RuleEvaluator {
    /// 评估规则
    ///
    /// # Arguments
    /// * `rule` - 匹配规则
    /// * `input` - 候选字符串（文件名、进程名、硬件描述等）
    pub fn evaluate(rule: &MatchRule, input: &str) -> bool {
        // 大小写归一化只做一次，input 与 values 必须同步处理
        let lowered_input;
        let lowered_values;
        let (input_cmp, values_cmp): (&str, &[String]) = if rule.is_case_sensitive {
            (input, &rule.values)
        } else {
            lowered_input = input.to_lowercase();
            lowered_values = rule
                .values
                .iter()
                .map(|v| v.to_lowercase())
                .collect::<Vec<_>>();
            (&lowered_input, &lowered_values)
        };

        let hit = |idx: usize| match rule.operator {
            MatchOperator::Contain => input_cmp.contains(values_cmp[idx].as_str()),
            MatchOperator::NotContain => !input_cmp.contains(values_cmp[idx].as_str()),
            MatchOperator::Equal => input_cmp == values_cmp[idx],
            MatchOperator::NotEqual => input_cmp != values_cmp[idx],
            // 正则不做字符串级小写化（会破坏 \D 等元字符），
            // 改用编译期忽略大小写标志，作用在原始输入上
            MatchOperator::Regex => {
                Self::regex_hit(&rule.values[idx], input, !rule.is_case_sensitive)
            }
            MatchOperator::Unknown => false,
        };

        // 空 values 的不对称语义：AND 聚合空真，OR 聚合空假
        if rule.should_hit_all {
            (0..rule.values.len()).all(hit)
        } else {
            (0..rule.values.len()).any(hit)
        }
    }

    /// 正则命中判定，模式编译失败按不命中处理
    fn regex_hit(pattern: &str, input: &str, case_insensitive: bool) -> bool {
        match RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
        {
            Ok(re) => re.is_match(input),
            Err(_) => false,
        }
    }
}
