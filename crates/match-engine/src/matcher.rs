//! 硬件画像匹配
//!
//! 将规则集应用到一台机器的硬件描述清单上，选出适用的驱动分组。
//! 规则集内的规则按 AND 聚合；单条规则只要其来源类别下任一描述串
//! 命中即算命中。

use crate::compiler::{CompiledMatchRule, RuleCompiler};
use crate::models::{HardwareProfile, RuleSet, RuleSource};
use serde::Serialize;
use tracing::debug;

/// 编译后的规则集
struct CompiledRuleSet {
    id: String,
    name: String,
    rules: Vec<(RuleSource, CompiledMatchRule)>,
    driver_group_ids: Vec<String>,
}

/// 命中的规则集摘要
#[derive(Debug, Clone, Serialize)]
pub struct MatchedRuleSet {
    pub id: String,
    pub name: String,
}

/// 匹配结果
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    /// 命中的规则集
    pub matched_rule_sets: Vec<MatchedRuleSet>,
    /// 命中规则集关联的驱动分组 id（去重、保序）
    pub driver_group_ids: Vec<String>,
}

/// 画像匹配器
///
/// 持有预编译的规则集，可对多份硬件画像反复匹配。
pub struct ProfileMatcher {
    rule_sets: Vec<CompiledRuleSet>,
}

impl ProfileMatcher {
    pub fn new(rule_sets: &[RuleSet]) -> Self {
        let rule_sets = rule_sets
            .iter()
            .map(|set| CompiledRuleSet {
                id: set.id.clone(),
                name: set.name.clone(),
                rules: set
                    .rules
                    .iter()
                    .map(|r| (r.source, RuleCompiler::compile(&r.rule)))
                    .collect(),
                driver_group_ids: set.driver_group_ids.clone(),
            })
            .collect();

        Self { rule_sets }
    }

    /// 匹配一份硬件画像
    pub fn match_profile(&self, profile: &HardwareProfile) -> MatchReport {
        let mut matched_rule_sets = Vec::new();
        let mut driver_group_ids: Vec<String> = Vec::new();

        for set in &self.rule_sets {
            if !Self::set_matches(set, profile) {
                continue;
            }

            debug!("规则集命中: {} ({})", set.name, set.id);
            matched_rule_sets.push(MatchedRuleSet {
                id: set.id.clone(),
                name: set.name.clone(),
            });

            for gid in &set.driver_group_ids {
                if !driver_group_ids.contains(gid) {
                    driver_group_ids.push(gid.clone());
                }
            }
        }

        MatchReport {
            matched_rule_sets,
            driver_group_ids,
        }
    }

    /// 规则集命中判定：规则集非空，且所有规则命中
    fn set_matches(set: &CompiledRuleSet, profile: &HardwareProfile) -> bool {
        !set.rules.is_empty()
            && set.rules.iter().all(|(source, rule)| {
                profile
                    .strings_for(*source)
                    .iter()
                    .any(|s| rule.matches(s))
            })
    }
}
