use super::super::profile::{PageProfile, PageSubmission};
use super::ProfileImportError;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;

const BENEFIT_SEPARATOR: char = '|';

pub(crate) fn parse_submissions<R: Read>(
    reader: R,
) -> Result<Vec<PageSubmission>, ProfileImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut submissions = Vec::new();

    for (index, record) in csv_reader.deserialize::<AuditRow>().enumerate() {
        let row = record?;
        // Header is line 1.
        submissions.push(row.into_submission(index + 2)?);
    }

    Ok(submissions)
}

#[derive(Debug, Default, Deserialize)]
struct AuditRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    current_price: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    original_price: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_warranty_badge: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_trust_badges: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    image_count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_video: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    benefits: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_reviews: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_urgency: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_action_oriented_cta: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cta_count: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_spec_table: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    has_faq: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    mobile_optimized: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    load_time_seconds: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    content: Option<String>,
}

impl AuditRow {
    fn into_submission(self, line: usize) -> Result<PageSubmission, ProfileImportError> {
        let cell = CellReader { line };
        let profile = PageProfile {
            url: self.url,
            title: self.title,
            current_price: cell.amount("current_price", self.current_price)?,
            original_price: cell.amount("original_price", self.original_price)?,
            has_warranty_badge: cell.flag("has_warranty_badge", self.has_warranty_badge)?,
            has_trust_badges: cell.flag("has_trust_badges", self.has_trust_badges)?,
            image_count: cell.number("image_count", self.image_count)?,
            has_video: cell.flag("has_video", self.has_video)?,
            benefits: self.benefits.map(|raw| split_benefits(&raw)),
            has_reviews: cell.flag("has_reviews", self.has_reviews)?,
            has_urgency: cell.flag("has_urgency", self.has_urgency)?,
            has_action_oriented_cta: cell
                .flag("has_action_oriented_cta", self.has_action_oriented_cta)?,
            cta_count: cell.number("cta_count", self.cta_count)?,
            has_spec_table: cell.flag("has_spec_table", self.has_spec_table)?,
            has_faq: cell.flag("has_faq", self.has_faq)?,
            mobile_optimized: cell.flag("mobile_optimized", self.mobile_optimized)?,
            load_time_seconds: cell.amount("load_time_seconds", self.load_time_seconds)?,
        };

        Ok(PageSubmission {
            profile,
            content: self.content,
        })
    }
}

struct CellReader {
    line: usize,
}

impl CellReader {
    fn flag(
        &self,
        column: &'static str,
        raw: Option<String>,
    ) -> Result<Option<bool>, ProfileImportError> {
        raw.map(|value| {
            parse_flag(&value).ok_or_else(|| self.invalid(column, value))
        })
        .transpose()
    }

    fn number<T: FromStr>(
        &self,
        column: &'static str,
        raw: Option<String>,
    ) -> Result<Option<T>, ProfileImportError> {
        raw.map(|value| {
            clean_number(&value)
                .parse::<T>()
                .map_err(|_| self.invalid(column, value))
        })
        .transpose()
    }

    /// Prices and durations: finite and not negative.
    fn amount(
        &self,
        column: &'static str,
        raw: Option<String>,
    ) -> Result<Option<f64>, ProfileImportError> {
        raw.map(|value| {
            clean_number(&value)
                .parse::<f64>()
                .ok()
                .filter(|amount| amount.is_finite() && *amount >= 0.0)
                .ok_or_else(|| self.invalid(column, value))
        })
        .transpose()
    }

    fn invalid(&self, column: &'static str, value: String) -> ProfileImportError {
        ProfileImportError::InvalidValue {
            line: self.line,
            column,
            value,
        }
    }
}

fn clean_number(value: &str) -> String {
    value.trim().trim_start_matches('$').replace(',', "")
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn split_benefits(raw: &str) -> Vec<String> {
    raw.split(BENEFIT_SEPARATOR)
        .map(str::trim)
        .filter(|benefit| !benefit.is_empty())
        .map(str::to_string)
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        for raw in ["true", "YES", "y", "1"] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["false", "No", "n", "0"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn split_benefits_drops_blank_entries() {
        assert_eq!(
            split_benefits("Fast shipping | |Free returns|"),
            vec!["Fast shipping".to_string(), "Free returns".to_string()]
        );
    }

    #[test]
    fn number_cells_tolerate_currency_formatting() {
        let cell = CellReader { line: 2 };
        let price: Option<f64> = cell
            .number("current_price", Some("$1,249.50".to_string()))
            .expect("price parses");
        assert_eq!(price, Some(1249.5));
    }

    #[test]
    fn amount_cells_reject_non_finite_values() {
        let cell = CellReader { line: 3 };
        for raw in ["NaN", "inf", "-inf"] {
            let err = cell
                .amount("load_time_seconds", Some(raw.to_string()))
                .expect_err("non-finite rejected");
            assert!(
                matches!(err, ProfileImportError::InvalidValue { column: "load_time_seconds", .. }),
                "{raw}"
            );
        }
    }

    #[test]
    fn amount_cells_reject_negative_values() {
        let cell = CellReader { line: 4 };
        let err = cell
            .amount("current_price", Some("-12.50".to_string()))
            .expect_err("negative rejected");
        match err {
            ProfileImportError::InvalidValue { line, column, value } => {
                assert_eq!(line, 4);
                assert_eq!(column, "current_price");
                assert_eq!(value, "-12.50");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            cell.amount("load_time_seconds", Some("0".to_string()))
                .expect("zero accepted"),
            Some(0.0)
        );
    }

    #[test]
    fn invalid_cells_report_line_and_column() {
        let cell = CellReader { line: 7 };
        let err = cell
            .flag("has_faq", Some("sometimes".to_string()))
            .expect_err("flag rejected");
        match err {
            ProfileImportError::InvalidValue { line, column, value } => {
                assert_eq!(line, 7);
                assert_eq!(column, "has_faq");
                assert_eq!(value, "sometimes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
