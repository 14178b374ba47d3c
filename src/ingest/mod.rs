//! Dataset loading for the CLI. The engine itself never touches files; the
//! upload service owns parsing in production and this module stands in for
//! it when screening from the command line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::screening::{AuditRecord, CompanyRecord, RuleConfig};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported dataset format for {path} (expected .csv or .json)")]
    UnsupportedFormat { path: String },
}

pub fn load_companies(path: &Path) -> Result<Vec<CompanyRecord>, DatasetError> {
    match extension(path) {
        Some("csv") => parse_csv(open(path)?, path),
        Some("json") => parse_json(open(path)?, path),
        _ => Err(DatasetError::UnsupportedFormat {
            path: display(path),
        }),
    }
}

pub fn load_audits(path: &Path) -> Result<Vec<AuditRecord>, DatasetError> {
    match extension(path) {
        Some("csv") => parse_csv(open(path)?, path),
        Some("json") => parse_json(open(path)?, path),
        _ => Err(DatasetError::UnsupportedFormat {
            path: display(path),
        }),
    }
}

/// Rule configurations travel as JSON only; missing required thresholds
/// surface here as a parse error before any company is evaluated.
pub fn load_rule_config(path: &Path) -> Result<RuleConfig, DatasetError> {
    parse_json(open(path)?, path)
}

fn parse_csv<R: Read, T: serde::de::DeserializeOwned>(
    reader: R,
    path: &Path,
) -> Result<Vec<T>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<T>() {
        records.push(row.map_err(|source| DatasetError::Csv {
            path: display(path),
            source,
        })?);
    }
    Ok(records)
}

fn parse_json<R: Read, T: serde::de::DeserializeOwned>(
    reader: R,
    path: &Path,
) -> Result<T, DatasetError> {
    serde_json::from_reader(reader).map_err(|source| DatasetError::Json {
        path: display(path),
        source,
    })
}

fn open(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        path: display(path),
        source,
    })
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn fake_path(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[test]
    fn csv_companies_parse_with_blank_financials() {
        let data = "corpId,corpName,periodStartDate,periodEndDate,taxableIncome,salary,revenue,amountTaxable,bubblegumTax,confectionarySalesTaxPercent\n\
                    101,Sweet Tooth Ltd,2025-01-01,2025-12-31,120000,,1500000,90000,60000,9.5\n";

        let companies: Vec<CompanyRecord> =
            parse_csv(Cursor::new(data), &fake_path("companies.csv")).expect("csv parses");

        assert_eq!(companies.len(), 1);
        let company = &companies[0];
        assert_eq!(company.corp_id, 101);
        assert_eq!(company.corp_name, "Sweet Tooth Ltd");
        assert_eq!(company.salary, None);
        assert_eq!(company.revenue.as_deref(), Some("1500000"));
    }

    #[test]
    fn csv_audits_parse_dates() {
        let data = "corpId,auditDate\n101,2021-06-15\n";
        let audits: Vec<AuditRecord> =
            parse_csv(Cursor::new(data), &fake_path("audits.csv")).expect("csv parses");

        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].corp_id, 101);
        assert_eq!(audits[0].audit_date.to_string(), "2021-06-15");
    }

    #[test]
    fn json_rule_config_missing_threshold_is_rejected() {
        let incomplete = r#"{ "bubblegumTax": { "enabled": true, "threshold": "50000", "riskScore": 25 } }"#;
        let result: Result<RuleConfig, _> =
            parse_json(Cursor::new(incomplete), &fake_path("rules.json"));

        assert!(matches!(result, Err(DatasetError::Json { .. })));
    }
}
