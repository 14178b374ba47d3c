use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::config::RuleConfig;
use crate::screening::domain::{AuditRecord, CompanyRecord, Flag, FlagKind};
use crate::screening::fields::{CompanyField, FieldValue};

/// Run the enabled built-in rules in their fixed display order.
///
/// Order affects only the flag list; scores are summed downstream so it has
/// no bearing on classification.
pub(crate) fn evaluate_builtin_rules(
    company: &CompanyRecord,
    audit: Option<&AuditRecord>,
    config: &RuleConfig,
    as_of: NaiveDate,
) -> Vec<Flag> {
    let mut flags = Vec::new();

    let salary = CompanyField::Salary.resolve(company);
    let revenue = CompanyField::Revenue.resolve(company);

    if config.bubblegum_tax.enabled {
        if let FieldValue::Number(value) = CompanyField::BubblegumTax.resolve(company) {
            if value > config.bubblegum_tax.threshold {
                flags.push(Flag {
                    kind: FlagKind::HighBubblegumTax,
                    reason: over_threshold_reason(value, config.bubblegum_tax.threshold),
                    risk_score: config.bubblegum_tax.risk_score,
                });
            }
        }
    }

    if config.audit_recency.enabled {
        if let Some(reason) = audit_recency_reason(audit, config.audit_recency.years, as_of) {
            flags.push(Flag {
                kind: FlagKind::StaleAudit,
                reason,
                risk_score: config.audit_recency.risk_score,
            });
        }
    }

    if config.sales_tax_percent.enabled {
        if let FieldValue::Number(rate) =
            CompanyField::ConfectionarySalesTaxPercent.resolve(company)
        {
            let threshold = config.sales_tax_percent.threshold;
            if rate > threshold {
                flags.push(Flag {
                    kind: FlagKind::HighSalesTaxPercent,
                    reason: format!(
                        "Sales tax rate of {rate}% exceeds the {threshold}% threshold"
                    ),
                    risk_score: config.sales_tax_percent.risk_score,
                });
            }
        }
    }

    if config.missing_salary.enabled && salary.is_missing() {
        flags.push(Flag {
            kind: FlagKind::MissingSalary,
            reason: "No salary reported for the period".to_string(),
            risk_score: config.missing_salary.risk_score,
        });
    }

    if config.missing_revenue.enabled && revenue.is_missing() {
        flags.push(Flag {
            kind: FlagKind::MissingRevenue,
            reason: "No revenue reported for the period".to_string(),
            risk_score: config.missing_revenue.risk_score,
        });
    }

    if config.data_consistency.enabled {
        let salary_present = !salary.is_missing();
        let revenue_present = !revenue.is_missing();
        if salary_present != revenue_present {
            let reason = if salary_present {
                "Salary provided but Revenue is missing"
            } else {
                "Revenue provided but Salary is missing"
            };
            flags.push(Flag {
                kind: FlagKind::DataInconsistency,
                reason: reason.to_string(),
                risk_score: config.data_consistency.risk_score,
            });
        }
    }

    flags
}

fn over_threshold_reason(value: Decimal, threshold: Decimal) -> String {
    // Threshold zero means any positive tax triggers; there is no meaningful
    // percentage to report in that case.
    match ((value - threshold) * Decimal::from(100)).checked_div(threshold) {
        Some(excess) => format!(
            "Bubblegum tax of {value} is {}% above the {threshold} threshold",
            excess.round()
        ),
        None => format!("Bubblegum tax of {value} is above the {threshold} threshold"),
    }
}

fn audit_recency_reason(
    audit: Option<&AuditRecord>,
    years: u32,
    as_of: NaiveDate,
) -> Option<String> {
    let record = match audit {
        Some(record) => record,
        None => return Some("Never been audited".to_string()),
    };

    let cutoff = as_of.checked_sub_months(Months::new(years.saturating_mul(12)))?;
    if record.audit_date >= cutoff {
        return None;
    }

    let days = (as_of - record.audit_date).num_days();
    let years_ago = (days as f64 / 365.25).floor() as i64;
    Some(format!("Last audited {years_ago} years ago"))
}
