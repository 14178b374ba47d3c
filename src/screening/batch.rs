use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::domain::{AuditRecord, CompanyRecord, FlaggedCompany};
use super::evaluation::{RuleConfig, RuleConfigError, ScreeningEngine};

/// Evaluate the whole dataset and rank the flagged companies.
///
/// Companies with zero triggered rules are excluded entirely; the remainder
/// is sorted by descending risk score with input order preserved on ties.
/// At most one audit record is considered per `corpId`; duplicates are a
/// data-quality condition resolved by keeping the first occurrence.
pub fn screen_dataset(
    companies: &[CompanyRecord],
    audits: &[AuditRecord],
    config: &RuleConfig,
    as_of: NaiveDate,
) -> Result<Vec<FlaggedCompany>, RuleConfigError> {
    let engine = ScreeningEngine::new(config.clone())?;

    let mut audit_index: BTreeMap<u64, &AuditRecord> = BTreeMap::new();
    for audit in audits {
        if audit_index.contains_key(&audit.corp_id) {
            warn!(corp_id = audit.corp_id, "duplicate audit record ignored");
            continue;
        }
        audit_index.insert(audit.corp_id, audit);
    }

    let mut flagged = Vec::new();
    for company in companies {
        let audit = audit_index.get(&company.corp_id).copied();
        let result = engine.evaluate(company, audit, as_of);
        if result.flags.is_empty() {
            continue;
        }

        flagged.push(FlaggedCompany {
            company: company.clone(),
            audit: audit.copied(),
            flags: result.flags,
            risk_score: result.risk_score,
            risk_level: result.risk_level,
        });
    }

    // Vec::sort_by is stable, so equal scores keep dataset order.
    flagged.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));

    debug!(
        companies = companies.len(),
        flagged = flagged.len(),
        "batch screening complete"
    );

    Ok(flagged)
}
