//! # Query Parameter Parser
//!
//! Maps HTTP-style `key=value` parameters onto a query descriptor, e.g.
//! `status=completed&sort=amount&dir=asc&q=plumb`.

use std::collections::{BTreeMap, HashMap};

use super::descriptor::QueryDescriptor;
use super::errors::{QueryResult, ValidationError};
use super::raw::RawDescriptor;

/// Parse query parameters from a HashMap.
///
/// Keys are visited in sorted order so the first reported error is stable.
pub fn parse_params(params: &HashMap<String, String>) -> QueryResult<QueryDescriptor> {
    let ordered: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();

    let mut raw = RawDescriptor::default();
    let mut min_amount = None;
    let mut max_amount = None;

    for (key, value) in ordered {
        match key {
            "status" => raw.status_filter = Some(value.to_string()),
            "category" | "method" => raw.category_filter = Some(value.to_string()),
            "provider" => raw.provider_filter = Some(value.to_string()),
            "type" => raw.type_filter = Some(value.to_string()),
            "paymentStatus" => raw.payment_status_filter = Some(value.to_string()),
            "dateRange" => raw.date_range = Some(value.to_string()),
            "minAmount" => min_amount = Some(parse_number(key, value)?),
            "maxAmount" => max_amount = Some(parse_number(key, value)?),
            "minRating" => raw.min_rating = Some(parse_integer(key, value)?),
            "q" | "search" => raw.search_term = Some(value.to_string()),
            "sort" => raw.sort_key = Some(value.to_string()),
            "dir" | "order" => raw.sort_direction = Some(value.to_string()),
            "hasReview" => raw.has_review = parse_flag(key, value)?,
            "isRecurring" => raw.is_recurring = parse_flag(key, value)?,
            "isEmergency" => raw.is_emergency = parse_flag(key, value)?,
            "hasDiscount" => raw.has_discount = parse_flag(key, value)?,
            other => return Err(ValidationError::unknown_parameter(other)),
        }
    }

    if min_amount.is_some() || max_amount.is_some() {
        // Missing upper bound stays open, matching a max of 0
        raw.amount_range = Some([min_amount.unwrap_or(0.0), max_amount.unwrap_or(0.0)]);
    }

    raw.validate()
}

/// Parse `key=value` pairs given as separate strings (CLI `--param`)
pub fn parse_pairs<S: AsRef<str>>(pairs: &[S]) -> QueryResult<QueryDescriptor> {
    let mut params = HashMap::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| ValidationError::invalid_value(pair, ""))?;
        params.insert(key.trim().to_string(), value.trim().to_string());
    }
    parse_params(&params)
}

fn parse_number(field: &str, value: &str) -> QueryResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| ValidationError::invalid_value(field, value))
}

fn parse_integer(field: &str, value: &str) -> QueryResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_value(field, value))
}

fn parse_flag(field: &str, value: &str) -> QueryResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(ValidationError::invalid_value(field, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DateWindow, SortDirection, SortKey, ValidationErrorCode};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_common_params() {
        let d = parse_params(&params(&[
            ("status", "pending"),
            ("category", "plumbing"),
            ("sort", "urgency"),
            ("dir", "asc"),
            ("q", "Leak"),
            ("dateRange", "week"),
        ]))
        .unwrap();

        assert_eq!(d.status.map(|s| s.as_str()), Some("pending"));
        assert_eq!(d.category.as_deref(), Some("plumbing"));
        assert_eq!(d.sort.key, SortKey::Urgency);
        assert_eq!(d.sort.direction, SortDirection::Asc);
        assert_eq!(d.search_term.as_deref(), Some("leak"));
        assert_eq!(d.date_range, DateWindow::Week);
    }

    #[test]
    fn test_amount_bounds() {
        let d = parse_params(&params(&[("minAmount", "100")])).unwrap();
        let range = d.amount_range.unwrap();
        assert_eq!(range.min(), 100.0);
        assert!(!range.is_upper_bounded());

        let d = parse_params(&params(&[("minAmount", "10"), ("maxAmount", "20")])).unwrap();
        assert!(d.amount_range.unwrap().is_upper_bounded());

        let err = parse_params(&params(&[("maxAmount", "lots")])).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::InvalidValue);
        assert_eq!(err.field(), "maxAmount");
    }

    #[test]
    fn test_flags() {
        let d = parse_params(&params(&[("isEmergency", "true"), ("hasReview", "0")])).unwrap();
        assert!(d.flags.is_emergency);
        assert!(!d.flags.has_review);

        let err = parse_params(&params(&[("hasDiscount", "maybe")])).unwrap_err();
        assert_eq!(err.field(), "hasDiscount");
    }

    #[test]
    fn test_unknown_parameter_rejected() {
        let err = parse_params(&params(&[("limit", "10")])).unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::UnknownParameter);
        assert_eq!(err.field(), "limit");
    }

    #[test]
    fn test_first_error_is_stable() {
        let p = params(&[("sort", "nope"), ("dir", "sideways")]);
        for _ in 0..10 {
            assert_eq!(parse_params(&p).unwrap_err().field(), "sortKey");
        }
    }

    #[test]
    fn test_parse_pairs() {
        let d = parse_pairs(&["status=failed", "sort = amount"]).unwrap();
        assert_eq!(d.status.map(|s| s.as_str()), Some("failed"));
        assert_eq!(d.sort.key, SortKey::Amount);
        assert!(parse_pairs(&["novalue"]).is_err());
    }
}
