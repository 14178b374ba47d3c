use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::screening::domain::{AuditRecord, CompanyRecord};
use crate::screening::evaluation::{
    AuditRecencyRule, CustomRule, RuleConfig, ScreeningEngine, ThresholdRule, ToggleRule,
};
use crate::screening::fields::CompanyField;
use crate::screening::predicate::ComparisonOp;

/// Fixed evaluation date so audit-recency tests are reproducible.
pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn company(corp_id: u64, corp_name: &str) -> CompanyRecord {
    CompanyRecord {
        corp_id,
        corp_name: corp_name.to_string(),
        period_start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        period_end_date: NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
        taxable_income: None,
        salary: None,
        revenue: None,
        amount_taxable: None,
        bubblegum_tax: None,
        confectionary_sales_tax_percent: None,
    }
}

pub(super) fn audit(corp_id: u64, year: i32, month: u32, day: u32) -> AuditRecord {
    AuditRecord {
        corp_id,
        audit_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
    }
}

/// Configuration with every built-in rule switched off. Tests enable the
/// rule under scrutiny so unrelated missing-data flags stay out of the way.
pub(super) fn quiet_config() -> RuleConfig {
    RuleConfig {
        bubblegum_tax: ThresholdRule {
            enabled: false,
            threshold: Decimal::from(50_000),
            risk_score: 25,
        },
        audit_recency: AuditRecencyRule {
            enabled: false,
            years: 3,
            risk_score: 20,
        },
        sales_tax_percent: ThresholdRule {
            enabled: false,
            threshold: Decimal::from(8),
            risk_score: 15,
        },
        missing_salary: ToggleRule {
            enabled: false,
            risk_score: 10,
        },
        missing_revenue: ToggleRule {
            enabled: false,
            risk_score: 10,
        },
        data_consistency: ToggleRule {
            enabled: false,
            risk_score: 10,
        },
        custom_rules: Vec::new(),
        high_risk_threshold: 50,
        medium_risk_threshold: 25,
    }
}

pub(super) fn engine_with(config: RuleConfig) -> ScreeningEngine {
    ScreeningEngine::new(config).expect("valid rule configuration")
}

pub(super) fn large_revenue_rule() -> CustomRule {
    CustomRule {
        name: "Large revenue".to_string(),
        field: CompanyField::Revenue,
        operator: ComparisonOp::GreaterThan,
        value: Some("1000000".to_string()),
        risk_score: 15,
        enabled: true,
    }
}

/// Custom rule that fires whenever revenue is reported; handy for building
/// exact aggregate scores in classification tests.
pub(super) fn weight_rule(name: &str, risk_score: u8) -> CustomRule {
    CustomRule {
        name: name.to_string(),
        field: CompanyField::Revenue,
        operator: ComparisonOp::NotEmpty,
        value: None,
        risk_score,
        enabled: true,
    }
}
