use super::common::{as_of, company, engine_with, large_revenue_rule, quiet_config, weight_rule};
use crate::screening::domain::{FlagKind, RiskLevel};
use crate::screening::evaluation::{RuleConfigError, ScreeningEngine};

#[test]
fn builtin_flags_precede_custom_flags() {
    let mut config = quiet_config();
    config.bubblegum_tax.enabled = true;
    config.custom_rules.push(large_revenue_rule());

    let mut record = company(1, "Sweet Tooth Ltd");
    record.bubblegum_tax = Some("60000".to_string());
    record.revenue = Some("1500000".to_string());

    let result = engine_with(config).evaluate(&record, None, as_of());

    assert_eq!(result.flags.len(), 2);
    assert_eq!(result.flags[0].kind, FlagKind::HighBubblegumTax);
    assert!(matches!(result.flags[1].kind, FlagKind::Custom { .. }));
}

#[test]
fn risk_score_is_the_sum_of_flag_weights() {
    let mut config = quiet_config();
    config.bubblegum_tax.enabled = true;
    config.audit_recency.enabled = true;
    config.custom_rules.push(large_revenue_rule());

    let mut record = company(1, "Sweet Tooth Ltd");
    record.bubblegum_tax = Some("60000".to_string());
    record.revenue = Some("1500000".to_string());

    let result = engine_with(config).evaluate(&record, None, as_of());

    let weight_sum: u32 = result
        .flags
        .iter()
        .map(|flag| u32::from(flag.risk_score))
        .sum();
    assert_eq!(result.risk_score, weight_sum);
    assert_eq!(result.risk_score, 25 + 20 + 15);
}

#[test]
fn risk_level_classification_boundaries() {
    // high at 50, medium at 25
    let cases: [(&[u8], RiskLevel); 4] = [
        (&[24], RiskLevel::Low),
        (&[25], RiskLevel::Medium),
        (&[24, 25], RiskLevel::Medium),
        (&[25, 25], RiskLevel::High),
    ];

    for (weights, expected) in cases {
        let mut config = quiet_config();
        for (index, weight) in weights.iter().enumerate() {
            config
                .custom_rules
                .push(weight_rule(&format!("rule {index}"), *weight));
        }

        let mut record = company(1, "Sweet Tooth Ltd");
        record.revenue = Some("1".to_string());

        let result = engine_with(config).evaluate(&record, None, as_of());
        let total: u32 = weights.iter().map(|w| u32::from(*w)).sum();

        assert_eq!(result.risk_score, total);
        assert_eq!(
            result.risk_level, expected,
            "score {total} should classify as {expected:?}"
        );
    }
}

#[test]
fn repeated_evaluation_is_identical() {
    let mut config = quiet_config();
    config.bubblegum_tax.enabled = true;
    config.audit_recency.enabled = true;
    config.custom_rules.push(large_revenue_rule());
    let engine = engine_with(config);

    let mut record = company(1, "Sweet Tooth Ltd");
    record.bubblegum_tax = Some("60000".to_string());
    record.revenue = Some("1500000".to_string());

    let first = engine.evaluate(&record, None, as_of());
    let second = engine.evaluate(&record, None, as_of());

    assert_eq!(first, second);
}

#[test]
fn out_of_range_rule_weight_is_rejected_up_front() {
    let mut config = quiet_config();
    config.bubblegum_tax.risk_score = 120;

    match ScreeningEngine::new(config) {
        Err(RuleConfigError::RiskScoreOutOfRange { rule, found }) => {
            assert_eq!(rule, "bubblegumTax");
            assert_eq!(found, 120);
        }
        other => panic!("expected risk score rejection, got {:?}", other.err()),
    }
}

#[test]
fn out_of_range_percentage_threshold_is_rejected() {
    let mut config = quiet_config();
    config.sales_tax_percent.threshold = rust_decimal::Decimal::from(150);

    assert!(matches!(
        ScreeningEngine::new(config),
        Err(RuleConfigError::PercentOutOfRange { .. })
    ));
}

#[test]
fn invalid_custom_rule_poisons_the_whole_configuration() {
    let mut config = quiet_config();
    let mut rule = large_revenue_rule();
    rule.value = None;
    config.custom_rules.push(rule);

    assert!(matches!(
        ScreeningEngine::new(config),
        Err(RuleConfigError::InvalidCustomRule(_))
    ));
}

#[test]
fn risk_threshold_above_bound_is_rejected() {
    let mut config = quiet_config();
    config.high_risk_threshold = 250;

    assert!(matches!(
        ScreeningEngine::new(config),
        Err(RuleConfigError::RiskThresholdOutOfRange { .. })
    ));
}
