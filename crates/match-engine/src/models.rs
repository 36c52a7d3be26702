//! 匹配领域模型

use crate::operators::MatchOperator;
use serde::{Deserialize, Serialize};

/// 规则来源（硬件类别）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    Cpu,
    Motherboard,
    Gpu,
    Memory,
    Nic,
    Storage,
}

/// 匹配规则
///
/// 对单个输入字符串的一次判定配置：操作符、取值序列、大小写敏感性
/// 与聚合策略。评估方不持有、不修改规则，见 [`crate::RuleEvaluator`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRule {
    /// 操作符（数据格式沿用 `type` 字段名）
    #[serde(rename = "type")]
    pub operator: MatchOperator,
    #[serde(default)]
    pub is_case_sensitive: bool,
    /// 聚合策略：true 要求全部取值命中（AND），false 任一命中即可（OR）
    #[serde(default)]
    pub should_hit_all: bool,
    #[serde(default)]
    pub values: Vec<String>,
}

impl MatchRule {
    pub fn new(operator: MatchOperator, values: Vec<String>) -> Self {
        Self {
            operator,
            is_case_sensitive: false,
            should_hit_all: false,
            values,
        }
    }

    pub fn case_sensitive(mut self) -> Self {
        self.is_case_sensitive = true;
        self
    }

    pub fn hit_all(mut self) -> Self {
        self.should_hit_all = true;
        self
    }
}

/// 绑定到硬件类别的一条规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareRule {
    pub source: RuleSource,
    #[serde(flatten)]
    pub rule: MatchRule,
}

impl HardwareRule {
    pub fn new(source: RuleSource, rule: MatchRule) -> Self {
        Self { source, rule }
    }
}

/// 规则集：一组规则与其关联的驱动分组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub rules: Vec<HardwareRule>,
    #[serde(default)]
    pub driver_group_ids: Vec<String>,
}

/// 硬件描述清单
///
/// 按来源分类的描述字符串，由系统信息侧枚举产生（枚举本身不在本 crate
/// 职责内），这里只作为匹配输入。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    #[serde(default)]
    pub cpu: Vec<String>,
    #[serde(default)]
    pub motherboard: Vec<String>,
    #[serde(default)]
    pub gpu: Vec<String>,
    #[serde(default)]
    pub memory: Vec<String>,
    #[serde(default)]
    pub nic: Vec<String>,
    #[serde(default)]
    pub storage: Vec<String>,
}

impl HardwareProfile {
    /// 取某一来源类别下的全部描述串
    pub fn strings_for(&self, source: RuleSource) -> &[String] {
        match source {
            RuleSource::Cpu => &self.cpu,
            RuleSource::Motherboard => &self.motherboard,
            RuleSource::Gpu => &self.gpu,
            RuleSource::Memory => &self.memory,
            RuleSource::Nic => &self.nic,
            RuleSource::Storage => &self.storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_set_deserialization() {
        let json = r#"
        {
            "id": "a1b2c3d4",
            "name": "Intel 平台",
            "rules": [
                {
                    "source": "cpu",
                    "type": "contain",
                    "is_case_sensitive": false,
                    "values": ["intel"]
                },
                {
                    "source": "nic",
                    "type": "regex",
                    "is_case_sensitive": false,
                    "should_hit_all": false,
                    "values": ["(?i)realtek|intel"]
                }
            ],
            "driver_group_ids": ["0011aabb"]
        }
        "#;

        let set: RuleSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.id, "a1b2c3d4");
        assert_eq!(set.rules.len(), 2);
        assert_eq!(set.rules[0].source, RuleSource::Cpu);
        assert_eq!(set.rules[0].rule.operator, MatchOperator::Contain);
        assert!(!set.rules[0].rule.should_hit_all);
        assert_eq!(set.rules[1].rule.values, vec!["(?i)realtek|intel"]);
        assert_eq!(set.driver_group_ids, vec!["0011aabb"]);
    }

    #[test]
    fn test_rule_serialization_round_trip() {
        let rule = HardwareRule::new(
            RuleSource::Gpu,
            MatchRule::new(
                MatchOperator::NotContain,
                vec!["microsoft basic".to_string()],
            )
            .hit_all(),
        );

        let json = serde_json::to_string(&rule).unwrap();
        let parsed: HardwareRule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn test_operator_uses_type_field_on_wire() {
        let rule = MatchRule::new(MatchOperator::Equal, vec!["readme.txt".to_string()]);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["type"], "equal");
    }

    #[test]
    fn test_profile_strings_for() {
        let profile = HardwareProfile {
            cpu: vec!["Intel(R) Core(TM) i7-14700K".to_string()],
            nic: vec!["Realtek PCIe GbE Family Controller".to_string()],
            ..Default::default()
        };

        assert_eq!(profile.strings_for(RuleSource::Cpu).len(), 1);
        assert!(profile.strings_for(RuleSource::Gpu).is_empty());
    }
}
