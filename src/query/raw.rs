//! Wire form of the query descriptor
//!
//! `RawDescriptor` is what callers send (JSON body, CLI stdin). It carries
//! plain strings; `validate` resolves them against the fixed enumerations.

use serde::{Deserialize, Serialize};

use crate::model::PaymentStatus;

use super::descriptor::{
    AmountRange, BookingFlags, QueryDescriptor, SortDirection, SortKey, SortSpec, StatusFilter,
    TypeFilter,
};
use super::errors::{QueryResult, ValidationError};
use super::window::DateWindow;

/// Value that disables a string filter
pub const ALL: &str = "all";

/// Unvalidated descriptor as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
    #[serde(default)]
    pub has_review: bool,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub has_discount: bool,
}

impl RawDescriptor {
    /// Resolves every field, failing on the first unrecognized value
    pub fn validate(&self) -> QueryResult<QueryDescriptor> {
        let mut descriptor = QueryDescriptor::new();

        if let Some(value) = active(&self.status_filter) {
            descriptor.status = Some(StatusFilter::parse("statusFilter", value)?);
        }

        descriptor.category = active(&self.category_filter).map(str::to_string);
        descriptor.provider = active(&self.provider_filter).map(str::to_string);

        if let Some(value) = active(&self.type_filter) {
            descriptor.transaction_type = Some(TypeFilter::parse("typeFilter", value)?);
        }

        if let Some(value) = active(&self.payment_status_filter) {
            let status = value.parse::<PaymentStatus>().map_err(|_| {
                ValidationError::unknown_payment_status("paymentStatusFilter", value)
            })?;
            descriptor.payment_status = Some(status);
        }

        if let Some(value) = active(&self.date_range) {
            descriptor.date_range = DateWindow::parse("dateRange", value)?;
        }

        if let Some([min, max]) = self.amount_range {
            descriptor.amount_range = Some(AmountRange::new(min, max)?);
        }

        if let Some(rating) = self.min_rating {
            let rating = u8::try_from(rating)
                .ok()
                .filter(|r| *r <= 5)
                .ok_or_else(|| ValidationError::invalid_rating("minRating", rating))?;
            descriptor = descriptor.with_min_rating(rating)?;
        }

        if let Some(term) = self.search_term.as_deref() {
            descriptor = descriptor.with_search(term);
        }

        let key = match self.sort_key.as_deref() {
            Some(value) => SortKey::parse("sortKey", value)?,
            None => SortKey::default(),
        };
        let direction = match self.sort_direction.as_deref() {
            Some(value) => SortDirection::parse("sortDirection", value)?,
            None => SortDirection::default(),
        };
        descriptor.sort = SortSpec { key, direction };

        descriptor.flags = BookingFlags {
            has_review: self.has_review,
            is_recurring: self.is_recurring,
            is_emergency: self.is_emergency,
            has_discount: self.has_discount,
        };

        Ok(descriptor)
    }
}

impl TryFrom<RawDescriptor> for QueryDescriptor {
    type Error = ValidationError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

/// Treats empty strings and the `all` sentinel as unset
fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ValidationErrorCode;
    use serde_json::json;

    #[test]
    fn test_empty_raw_is_unrestricted() {
        let descriptor = RawDescriptor::default().validate().unwrap();
        assert_eq!(descriptor, QueryDescriptor::new());
    }

    #[test]
    fn test_all_sentinel() {
        let raw = RawDescriptor {
            status_filter: Some("all".into()),
            category_filter: Some("all".into()),
            type_filter: Some("all".into()),
            date_range: Some("all".into()),
            ..Default::default()
        };
        let descriptor = raw.validate().unwrap();
        assert_eq!(descriptor.active_criteria(), 0);
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let raw = RawDescriptor {
            status_filter: Some(String::new()),
            type_filter: Some(String::new()),
            date_range: Some(String::new()),
            ..Default::default()
        };
        let descriptor = raw.validate().unwrap();
        assert_eq!(descriptor.status, None);
        assert_eq!(descriptor.transaction_type, None);
        assert_eq!(descriptor.date_range, DateWindow::All);
    }

    #[test]
    fn test_full_descriptor_from_json() {
        let raw: RawDescriptor = serde_json::from_value(json!({
            "statusFilter": "completed",
            "categoryFilter": "UPI",
            "typeFilter": "refunds",
            "dateRange": "this-month",
            "amountRange": [0, 5000],
            "minRating": 0,
            "searchTerm": "Refund",
            "sortKey": "amount",
            "sortDirection": "asc"
        }))
        .unwrap();

        let d = raw.validate().unwrap();
        assert_eq!(d.status.map(|s| s.as_str()), Some("completed"));
        assert_eq!(d.category.as_deref(), Some("UPI"));
        assert_eq!(d.transaction_type, Some(TypeFilter::Refunds));
        assert_eq!(d.date_range, DateWindow::Month);
        assert_eq!(d.min_rating, None);
        assert_eq!(d.search_term.as_deref(), Some("refund"));
        assert_eq!(d.sort, SortSpec::asc(SortKey::Amount));
    }

    #[test]
    fn test_unknown_sort_key_names_field() {
        let raw = RawDescriptor {
            sort_key: Some("popularity".into()),
            ..Default::default()
        };
        let err = raw.validate().unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::UnknownSortKey);
        assert_eq!(err.field(), "sortKey");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let raw = RawDescriptor {
            status_filter: Some("shipped".into()),
            ..Default::default()
        };
        let err = raw.validate().unwrap_err();
        assert_eq!(err.code(), ValidationErrorCode::UnknownStatus);
        assert_eq!(err.field(), "statusFilter");
    }

    #[test]
    fn test_rating_out_of_range() {
        for bad in [-1, 6, 300] {
            let raw = RawDescriptor {
                min_rating: Some(bad),
                ..Default::default()
            };
            let err = raw.validate().unwrap_err();
            assert_eq!(err.code(), ValidationErrorCode::InvalidRating);
        }
    }

    #[test]
    fn test_unknown_json_field_rejected() {
        let result: Result<RawDescriptor, _> =
            serde_json::from_value(json!({ "sortBy": "date" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_payment_status() {
        let raw = RawDescriptor {
            payment_status_filter: Some("settled".into()),
            ..Default::default()
        };
        assert_eq!(
            raw.validate().unwrap_err().code(),
            ValidationErrorCode::UnknownPaymentStatus
        );
    }
}
