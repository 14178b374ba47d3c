//! Rule evaluation and risk scoring for audit-target screening.

pub mod batch;
pub mod domain;
pub(crate) mod evaluation;
pub mod fields;
pub mod predicate;

#[cfg(test)]
mod tests;

pub use batch::screen_dataset;
pub use domain::{
    AuditRecord, CompanyRecord, ExplanationInput, Flag, FlagKind, FlaggedCompany, RiskLevel,
};
pub use evaluation::{
    AuditRecencyRule, CustomRule, CustomRuleError, EvaluationResult, RuleConfig, RuleConfigError,
    ScreeningEngine, ThresholdRule, ToggleRule,
};
pub use fields::{CompanyField, FieldKind, FieldValue, UnknownFieldError};
pub use predicate::ComparisonOp;
