//! Boundary validation helpers for inbound payloads.
//!
//! Quantities are rejected here when missing, negative, or out of range so
//! the ledger only ever sees non-negative values.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

pub(crate) fn parse_uuid(value: Option<&str>, field: &'static str) -> Result<Uuid, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    Uuid::parse_str(raw).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}

pub(crate) fn parse_quantity(value: Option<i64>, field: &'static str) -> Result<u32, Error> {
    let raw = value.ok_or_else(|| missing_field_error(field))?;
    if raw < 0 {
        return Err(
            Error::invalid_request(format!("{field} must not be negative")).with_details(json!({
                "field": field,
                "value": raw,
                "code": "negative_quantity",
            })),
        );
    }
    u32::try_from(raw).map_err(|_| {
        Error::invalid_request(format!("{field} is out of range")).with_details(json!({
            "field": field,
            "value": raw,
            "code": "quantity_out_of_range",
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None, "missing_field")]
    #[case(Some(-1), "negative_quantity")]
    #[case(Some(i64::from(u32::MAX) + 1), "quantity_out_of_range")]
    fn invalid_quantities_are_rejected_with_details(
        #[case] value: Option<i64>,
        #[case] expected_code: &str,
    ) {
        let err = parse_quantity(value, "quantidade").expect_err("invalid input");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().and_then(|v| v.as_object()).expect("details");
        assert_eq!(
            details.get("code").and_then(|v| v.as_str()),
            Some(expected_code)
        );
        assert_eq!(
            details.get("field").and_then(|v| v.as_str()),
            Some("quantidade")
        );
    }

    #[rstest]
    #[case(Some(0), 0)]
    #[case(Some(42), 42)]
    #[case(Some(i64::from(u32::MAX)), u32::MAX)]
    fn valid_quantities_pass_through(#[case] value: Option<i64>, #[case] expected: u32) {
        assert_eq!(
            parse_quantity(value, "necessidade").expect("valid"),
            expected
        );
    }

    #[rstest]
    fn uuid_fields_are_validated() {
        assert!(parse_uuid(Some("not-a-uuid"), "material_id").is_err());
        assert!(parse_uuid(None, "material_id").is_err());
        let id = Uuid::new_v4();
        assert_eq!(
            parse_uuid(Some(&id.to_string()), "material_id").expect("valid"),
            id
        );
    }
}
