use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::CompanyRecord;

/// Closed vocabulary of company attributes a rule may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanyField {
    CorpName,
    TaxableIncome,
    Salary,
    Revenue,
    AmountTaxable,
    BubblegumTax,
    ConfectionarySalesTaxPercent,
}

/// Type tag used by the operator compatibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Numeric,
}

impl CompanyField {
    pub const fn kind(self) -> FieldKind {
        match self {
            CompanyField::CorpName => FieldKind::Text,
            _ => FieldKind::Numeric,
        }
    }

    /// Business-facing label used in flag reasons and reports.
    pub const fn label(self) -> &'static str {
        match self {
            CompanyField::CorpName => "Company Name",
            CompanyField::TaxableIncome => "Taxable Income",
            CompanyField::Salary => "Total Payroll",
            CompanyField::Revenue => "Total Revenue",
            CompanyField::AmountTaxable => "Amount Taxable",
            CompanyField::BubblegumTax => "Bubblegum Tax",
            CompanyField::ConfectionarySalesTaxPercent => "Sales Tax Rate",
        }
    }

    /// Wire name as it appears in uploaded datasets.
    pub const fn name(self) -> &'static str {
        match self {
            CompanyField::CorpName => "corpName",
            CompanyField::TaxableIncome => "taxableIncome",
            CompanyField::Salary => "salary",
            CompanyField::Revenue => "revenue",
            CompanyField::AmountTaxable => "amountTaxable",
            CompanyField::BubblegumTax => "bubblegumTax",
            CompanyField::ConfectionarySalesTaxPercent => "confectionarySalesTaxPercent",
        }
    }

    /// Resolve this field against a company record. Never fails: numeric
    /// fields that are absent or unparseable resolve to [`FieldValue::Missing`].
    pub fn resolve(self, company: &CompanyRecord) -> FieldValue {
        match self {
            CompanyField::CorpName => FieldValue::Text(company.corp_name.clone()),
            CompanyField::TaxableIncome => numeric_value(company.taxable_income.as_deref()),
            CompanyField::Salary => numeric_value(company.salary.as_deref()),
            CompanyField::Revenue => numeric_value(company.revenue.as_deref()),
            CompanyField::AmountTaxable => numeric_value(company.amount_taxable.as_deref()),
            CompanyField::BubblegumTax => numeric_value(company.bubblegum_tax.as_deref()),
            CompanyField::ConfectionarySalesTaxPercent => {
                numeric_value(company.confectionary_sales_tax_percent.as_deref())
            }
        }
    }
}

impl fmt::Display for CompanyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a rule is authored against a field outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown company field '{0}'")]
pub struct UnknownFieldError(pub String);

impl FromStr for CompanyField {
    type Err = UnknownFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "corpName" => Ok(CompanyField::CorpName),
            "taxableIncome" => Ok(CompanyField::TaxableIncome),
            "salary" => Ok(CompanyField::Salary),
            "revenue" => Ok(CompanyField::Revenue),
            "amountTaxable" => Ok(CompanyField::AmountTaxable),
            "bubblegumTax" => Ok(CompanyField::BubblegumTax),
            "confectionarySalesTaxPercent" => Ok(CompanyField::ConfectionarySalesTaxPercent),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Resolved value of a company field. `Missing` is distinct from zero and
/// from the empty string in the `empty`/`not_empty` semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Missing,
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }
}

fn numeric_value(raw: Option<&str>) -> FieldValue {
    match raw.and_then(parse_amount) {
        Some(number) => FieldValue::Number(number),
        None => FieldValue::Missing,
    }
}

/// Parse decimal-precision text, tolerating currency formatting
/// (`$1,234.50`) and trailing percent signs.
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}
