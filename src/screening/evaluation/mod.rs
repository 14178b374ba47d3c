mod builtin;
pub mod config;
pub mod custom;

pub use config::{AuditRecencyRule, RuleConfig, RuleConfigError, ThresholdRule, ToggleRule};
pub use custom::{CustomRule, CustomRuleError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AuditRecord, CompanyRecord, Flag, RiskLevel};

/// Stateless engine applying one rule configuration to company records.
///
/// Construction fails fast on a malformed configuration; evaluation is a
/// pure function of `(company, audit, as_of)` and is safe to run
/// concurrently across companies.
pub struct ScreeningEngine {
    config: RuleConfig,
}

impl ScreeningEngine {
    pub fn new(config: RuleConfig) -> Result<Self, RuleConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Evaluate every enabled rule for one company. Built-in flags come
    /// first, custom flags after, each contributing its configured weight.
    pub fn evaluate(
        &self,
        company: &CompanyRecord,
        audit: Option<&AuditRecord>,
        as_of: NaiveDate,
    ) -> EvaluationResult {
        let mut flags = builtin::evaluate_builtin_rules(company, audit, &self.config, as_of);
        flags.extend(custom::evaluate_custom_rules(&self.config.custom_rules, company));

        let risk_score = flags.iter().map(|flag| u32::from(flag.risk_score)).sum();
        let risk_level = classify(risk_score, &self.config);

        EvaluationResult {
            flags,
            risk_score,
            risk_level,
        }
    }
}

/// Outcome of one evaluation pass over a single company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub flags: Vec<Flag>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

fn classify(risk_score: u32, config: &RuleConfig) -> RiskLevel {
    if risk_score >= config.high_risk_threshold {
        RiskLevel::High
    } else if risk_score >= config.medium_risk_threshold {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
