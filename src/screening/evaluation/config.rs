use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::custom::{CustomRule, CustomRuleError};

/// Complete rule configuration for one evaluation pass.
///
/// Supplied wholesale to the engine on every call; the engine keeps no
/// configuration state between calls. `medium_risk_threshold` is expected
/// to be <= `high_risk_threshold`; that invariant is the caller's to uphold
/// and is deliberately not clamped here. Classification checks the high
/// band first, so an inverted pair makes the medium band unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    pub bubblegum_tax: ThresholdRule,
    pub audit_recency: AuditRecencyRule,
    pub sales_tax_percent: ThresholdRule,
    pub missing_salary: ToggleRule,
    pub missing_revenue: ToggleRule,
    pub data_consistency: ToggleRule,
    #[serde(default)]
    pub custom_rules: Vec<CustomRule>,
    pub high_risk_threshold: u32,
    pub medium_risk_threshold: u32,
}

/// Built-in rule gated on a numeric floor (currency amount or percentage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRule {
    pub enabled: bool,
    pub threshold: Decimal,
    pub risk_score: u8,
}

/// Built-in rule flagging companies whose last audit is older than the
/// configured number of years (or that were never audited at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecencyRule {
    pub enabled: bool,
    pub years: u32,
    pub risk_score: u8,
}

/// Built-in rule with no threshold, only an enable flag and a weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRule {
    pub enabled: bool,
    pub risk_score: u8,
}

/// Contract violations in a rule configuration. These indicate a caller
/// bug, not a data condition: the engine refuses to evaluate rather than
/// producing partial results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleConfigError {
    #[error("{rule}: threshold must be non-negative, found {found}")]
    NegativeThreshold { rule: &'static str, found: Decimal },
    #[error("{rule}: percentage threshold must be within 0..=100, found {found}")]
    PercentOutOfRange { rule: &'static str, found: Decimal },
    #[error("{rule}: risk score must be within 0..=100, found {found}")]
    RiskScoreOutOfRange { rule: &'static str, found: u8 },
    #[error("{name}: risk level threshold must be within 0..=200, found {found}")]
    RiskThresholdOutOfRange { name: &'static str, found: u32 },
    #[error("invalid custom rule: {0}")]
    InvalidCustomRule(#[from] CustomRuleError),
}

const MAX_RULE_WEIGHT: u8 = 100;
const MAX_RISK_THRESHOLD: u32 = 200;

impl RuleConfig {
    /// Fail-fast shape check run once before any company is evaluated.
    pub fn validate(&self) -> Result<(), RuleConfigError> {
        if self.bubblegum_tax.threshold < Decimal::ZERO {
            return Err(RuleConfigError::NegativeThreshold {
                rule: "bubblegumTax",
                found: self.bubblegum_tax.threshold,
            });
        }

        let percent = self.sales_tax_percent.threshold;
        if percent < Decimal::ZERO || percent > Decimal::from(100) {
            return Err(RuleConfigError::PercentOutOfRange {
                rule: "salesTaxPercent",
                found: percent,
            });
        }

        let weights: [(&'static str, u8); 6] = [
            ("bubblegumTax", self.bubblegum_tax.risk_score),
            ("auditRecency", self.audit_recency.risk_score),
            ("salesTaxPercent", self.sales_tax_percent.risk_score),
            ("missingSalary", self.missing_salary.risk_score),
            ("missingRevenue", self.missing_revenue.risk_score),
            ("dataConsistency", self.data_consistency.risk_score),
        ];
        for (rule, weight) in weights {
            if weight > MAX_RULE_WEIGHT {
                return Err(RuleConfigError::RiskScoreOutOfRange {
                    rule,
                    found: weight,
                });
            }
        }

        for (name, found) in [
            ("highRiskThreshold", self.high_risk_threshold),
            ("mediumRiskThreshold", self.medium_risk_threshold),
        ] {
            if found > MAX_RISK_THRESHOLD {
                return Err(RuleConfigError::RiskThresholdOutOfRange { name, found });
            }
        }

        for rule in &self.custom_rules {
            rule.validate()?;
            if rule.risk_score > MAX_RULE_WEIGHT {
                return Err(RuleConfigError::RiskScoreOutOfRange {
                    rule: "custom rule",
                    found: rule.risk_score,
                });
            }
        }

        Ok(())
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            bubblegum_tax: ThresholdRule {
                enabled: true,
                threshold: Decimal::from(50_000),
                risk_score: 25,
            },
            audit_recency: AuditRecencyRule {
                enabled: true,
                years: 3,
                risk_score: 20,
            },
            sales_tax_percent: ThresholdRule {
                enabled: true,
                threshold: Decimal::from(8),
                risk_score: 15,
            },
            missing_salary: ToggleRule {
                enabled: true,
                risk_score: 10,
            },
            missing_revenue: ToggleRule {
                enabled: true,
                risk_score: 10,
            },
            data_consistency: ToggleRule {
                enabled: true,
                risk_score: 10,
            },
            custom_rules: Vec::new(),
            high_risk_threshold: 50,
            medium_risk_threshold: 25,
        }
    }
}
