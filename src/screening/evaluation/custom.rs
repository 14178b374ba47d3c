use serde::{Deserialize, Serialize};

use crate::screening::domain::{CompanyRecord, Flag, FlagKind};
use crate::screening::fields::{parse_amount, CompanyField, FieldKind, FieldValue, UnknownFieldError};
use crate::screening::predicate::{self, ComparisonOp};

/// User-authored predicate over one company field.
///
/// Custom rules share the engine's operator vocabulary and are validated at
/// authoring time; evaluation assumes a rule that passed [`CustomRule::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRule {
    pub name: String,
    pub field: CompanyField,
    pub operator: ComparisonOp,
    #[serde(default)]
    pub value: Option<String>,
    pub risk_score: u8,
    pub enabled: bool,
}

/// Field-attributed authoring errors. A rule that fails validation is never
/// persisted or evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomRuleError {
    #[error("rule name must not be empty")]
    EmptyName,
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
    #[error("rule '{name}': operator '{operator}' cannot be applied to {field} field '{label}'")]
    IncompatibleOperator {
        name: String,
        operator: &'static str,
        field: &'static str,
        label: &'static str,
    },
    #[error("rule '{name}': operator '{operator}' requires a comparison value")]
    MissingValue {
        name: String,
        operator: &'static str,
    },
    #[error("rule '{name}': comparison value '{value}' is not a number")]
    NonNumericValue { name: String, value: String },
}

impl CustomRule {
    /// Author a rule from the raw strings a rule-builder UI submits. The
    /// field name is checked against the known vocabulary here.
    pub fn from_parts(
        name: &str,
        field: &str,
        operator: ComparisonOp,
        value: Option<String>,
        risk_score: u8,
    ) -> Result<Self, CustomRuleError> {
        let rule = Self {
            name: name.trim().to_string(),
            field: field.parse::<CompanyField>()?,
            operator,
            value,
            risk_score,
            enabled: true,
        };
        rule.validate()?;
        Ok(rule)
    }

    pub fn validate(&self) -> Result<(), CustomRuleError> {
        if self.name.trim().is_empty() {
            return Err(CustomRuleError::EmptyName);
        }

        let kind = self.field.kind();
        if !self.operator.accepts(kind) {
            return Err(CustomRuleError::IncompatibleOperator {
                name: self.name.clone(),
                operator: self.operator.label(),
                field: match kind {
                    FieldKind::Text => "text",
                    FieldKind::Numeric => "numeric",
                },
                label: self.field.label(),
            });
        }

        if self.operator.requires_value() {
            let value = self
                .value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CustomRuleError::MissingValue {
                    name: self.name.clone(),
                    operator: self.operator.label(),
                })?;

            if kind == FieldKind::Numeric && parse_amount(value).is_none() {
                return Err(CustomRuleError::NonNumericValue {
                    name: self.name.clone(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Evaluate against a company; `Some(flag)` when the predicate holds.
    pub(crate) fn evaluate(&self, company: &CompanyRecord) -> Option<Flag> {
        let resolved = self.field.resolve(company);
        let comparison = self.comparison_value();

        if !predicate::evaluate(&resolved, self.operator, comparison.as_ref()) {
            return None;
        }

        Some(Flag {
            kind: FlagKind::Custom {
                name: self.name.clone(),
            },
            reason: self.reason(),
            risk_score: self.risk_score,
        })
    }

    /// Resolve the comparison value the same way the target field resolves:
    /// numeric fields compare against a parsed decimal, text against text.
    fn comparison_value(&self) -> Option<FieldValue> {
        let raw = self.value.as_deref()?;
        Some(match self.field.kind() {
            FieldKind::Numeric => parse_amount(raw)
                .map(FieldValue::Number)
                .unwrap_or(FieldValue::Missing),
            FieldKind::Text => FieldValue::Text(raw.to_string()),
        })
    }

    fn reason(&self) -> String {
        match self.value.as_deref().filter(|_| self.operator.requires_value()) {
            Some(value) => format!(
                "{}: {} {} {}",
                self.name,
                self.field.label(),
                self.operator.label(),
                value
            ),
            None => format!("{}: {} {}", self.name, self.field.label(), self.operator.label()),
        }
    }
}

/// Run the enabled custom rules in list order, collecting triggered flags.
pub(crate) fn evaluate_custom_rules(rules: &[CustomRule], company: &CompanyRecord) -> Vec<Flag> {
    rules
        .iter()
        .filter(|rule| rule.enabled)
        .filter_map(|rule| rule.evaluate(company))
        .collect()
}
