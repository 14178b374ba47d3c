use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::evaluation::RuleConfig;

/// One reporting-period submission for a corporation.
///
/// Financial figures are carried as the decimal-precision text the upload
/// layer received; parsing happens lazily in the field accessor so a bad
/// value degrades to "missing" instead of poisoning the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub corp_id: u64,
    pub corp_name: String,
    pub period_start_date: NaiveDate,
    pub period_end_date: NaiveDate,
    pub taxable_income: Option<String>,
    pub salary: Option<String>,
    pub revenue: Option<String>,
    pub amount_taxable: Option<String>,
    pub bubblegum_tax: Option<String>,
    pub confectionary_sales_tax_percent: Option<String>,
}

/// Most recent audit on file for a corporation. A company with no matching
/// record is treated as never audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub corp_id: u64,
    pub audit_date: NaiveDate,
}

/// Identity of the rule behind a triggered flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    HighBubblegumTax,
    StaleAudit,
    HighSalesTaxPercent,
    MissingSalary,
    MissingRevenue,
    DataInconsistency,
    Custom { name: String },
}

impl FlagKind {
    pub fn label(&self) -> &str {
        match self {
            FlagKind::HighBubblegumTax => "High Bubblegum Tax",
            FlagKind::StaleAudit => "Audit Overdue",
            FlagKind::HighSalesTaxPercent => "High Sales Tax Rate",
            FlagKind::MissingSalary => "Missing Payroll Data",
            FlagKind::MissingRevenue => "Missing Revenue Data",
            FlagKind::DataInconsistency => "Inconsistent Filing",
            FlagKind::Custom { name } => name,
        }
    }
}

/// One triggered-rule outcome. Flags are regenerated fresh on every
/// evaluation pass and carry the weight they contributed to the score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub kind: FlagKind,
    pub reason: String,
    pub risk_score: u8,
}

/// Categorical bucket derived from the aggregate risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::High => "high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
        }
    }
}

/// Engine output for one company that triggered at least one rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedCompany {
    pub company: CompanyRecord,
    pub audit: Option<AuditRecord>,
    pub flags: Vec<Flag>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
}

impl FlaggedCompany {
    /// Payload handed to the external explanation generator: everything it
    /// needs to narrate the result without re-running any rule.
    pub fn explanation_input<'a>(&'a self, config: &'a RuleConfig) -> ExplanationInput<'a> {
        ExplanationInput {
            company: &self.company,
            audit: self.audit.as_ref(),
            flags: &self.flags,
            risk_score: self.risk_score,
            risk_level: self.risk_level,
            rule_config: config,
        }
    }
}

/// Structured summary consumed by the (external) text-generation service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationInput<'a> {
    pub company: &'a CompanyRecord,
    pub audit: Option<&'a AuditRecord>,
    pub flags: &'a [Flag],
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub rule_config: &'a RuleConfig,
}
