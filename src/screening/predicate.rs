use serde::{Deserialize, Serialize};

use super::fields::{FieldKind, FieldValue};

/// Operator vocabulary shared by built-in threshold checks and custom rules.
///
/// Wire names match the tokens the rule-authoring UI submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "not_contains")]
    NotContains,
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "not_empty")]
    NotEmpty,
}

impl ComparisonOp {
    /// Compatibility table checked once at rule-authoring time.
    pub const fn accepts(self, kind: FieldKind) -> bool {
        match self {
            ComparisonOp::GreaterThan
            | ComparisonOp::LessThan
            | ComparisonOp::GreaterOrEqual
            | ComparisonOp::LessOrEqual => matches!(kind, FieldKind::Numeric),
            ComparisonOp::Contains | ComparisonOp::NotContains => matches!(kind, FieldKind::Text),
            ComparisonOp::Equal
            | ComparisonOp::NotEqual
            | ComparisonOp::Empty
            | ComparisonOp::NotEmpty => true,
        }
    }

    /// Whether a comparison value must accompany the operator.
    pub const fn requires_value(self) -> bool {
        !matches!(self, ComparisonOp::Empty | ComparisonOp::NotEmpty)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ComparisonOp::GreaterThan => "greater than",
            ComparisonOp::LessThan => "less than",
            ComparisonOp::GreaterOrEqual => "greater than or equal to",
            ComparisonOp::LessOrEqual => "less than or equal to",
            ComparisonOp::Equal => "equal to",
            ComparisonOp::NotEqual => "not equal to",
            ComparisonOp::Contains => "contains",
            ComparisonOp::NotContains => "does not contain",
            ComparisonOp::Empty => "is empty",
            ComparisonOp::NotEmpty => "is not empty",
        }
    }
}

/// Evaluate one condition against a resolved field value.
///
/// Pure function of its inputs. A missing numeric value never satisfies an
/// ordering comparison; the emptiness operators ignore any supplied
/// comparison value.
pub fn evaluate(value: &FieldValue, op: ComparisonOp, comparison: Option<&FieldValue>) -> bool {
    match op {
        ComparisonOp::GreaterThan => ordered(value, comparison, |a, b| a > b),
        ComparisonOp::LessThan => ordered(value, comparison, |a, b| a < b),
        ComparisonOp::GreaterOrEqual => ordered(value, comparison, |a, b| a >= b),
        ComparisonOp::LessOrEqual => ordered(value, comparison, |a, b| a <= b),
        ComparisonOp::Equal => equal(value, comparison),
        ComparisonOp::NotEqual => !equal(value, comparison),
        ComparisonOp::Contains => contains(value, comparison),
        ComparisonOp::NotContains => !contains(value, comparison),
        ComparisonOp::Empty => value.is_missing(),
        ComparisonOp::NotEmpty => !value.is_missing(),
    }
}

fn ordered(
    value: &FieldValue,
    comparison: Option<&FieldValue>,
    cmp: fn(&rust_decimal::Decimal, &rust_decimal::Decimal) -> bool,
) -> bool {
    match (value, comparison) {
        (FieldValue::Number(actual), Some(FieldValue::Number(expected))) => cmp(actual, expected),
        _ => false,
    }
}

fn equal(value: &FieldValue, comparison: Option<&FieldValue>) -> bool {
    match (value, comparison) {
        // Decimal equality is numeric-tolerant: 1500000 == 1500000.00.
        (FieldValue::Number(actual), Some(FieldValue::Number(expected))) => actual == expected,
        (FieldValue::Text(actual), Some(FieldValue::Text(expected))) => {
            actual.trim() == expected.trim()
        }
        _ => false,
    }
}

fn contains(value: &FieldValue, comparison: Option<&FieldValue>) -> bool {
    match (value, comparison) {
        (FieldValue::Text(haystack), Some(FieldValue::Text(needle))) => haystack.contains(needle),
        _ => false,
    }
}
