//! Field-level checks that gate every write before the store is touched.
//!
//! Payloads are taken as raw JSON so that presence, type and range can be
//! reported uniformly. An integer field accepts either a JSON integer or a
//! string holding one (`"12"`). A field counts as absent when it is missing,
//! `null`, `false` or an empty string; numeric zero is present, so a signup
//! at hour `0` is accepted while an age of `0` still fails the range check.

use crate::error::ValidationError;
use crate::structs::{CamperChanges, NewCamper, NewSignup};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

/// Inclusive bounds for a camper's age.
pub const AGE_RANGE: RangeInclusive<i64> = 8..=18;
/// Inclusive bounds for a signup's hour of day.
pub const TIME_RANGE: RangeInclusive<i64> = 0..=23;

/// Fields a camper update may set. Anything else in the payload is rejected.
const UPDATABLE_CAMPER_FIELDS: [&str; 2] = ["name", "age"];

/// Checks a camper creation payload: `name` and `age` are both required.
pub fn validate_new_camper(payload: &Value) -> Result<NewCamper, ValidationError> {
    let fields = as_object(payload)?;
    let mut reasons = Vec::new();

    let name = required(fields, "name", &mut reasons).and_then(|v| text(v, "name", &mut reasons));
    let age = required(fields, "age", &mut reasons)
        .and_then(|v| integer_in(v, "age", &AGE_RANGE, &mut reasons));

    match (name, age) {
        (Some(name), Some(age)) if reasons.is_empty() => Ok(NewCamper { name, age }),
        _ => Err(ValidationError::new(reasons)),
    }
}

/// Checks a partial camper update against the allow-list.
///
/// Each supplied field is validated on its own; at least one must be given.
pub fn validate_camper_changes(payload: &Value) -> Result<CamperChanges, ValidationError> {
    let fields = as_object(payload)?;
    let mut reasons = Vec::new();
    let mut changes = CamperChanges::default();

    for (key, value) in fields {
        match key.as_str() {
            "name" => match present(value) {
                Some(v) => changes.name = text(v, "name", &mut reasons),
                None => reasons.push("name must not be empty".to_string()),
            },
            "age" => match present(value) {
                Some(v) => changes.age = integer_in(v, "age", &AGE_RANGE, &mut reasons),
                None => reasons.push("age must not be empty".to_string()),
            },
            other => reasons.push(format!(
                "{other} is not updatable (allowed: {})",
                UPDATABLE_CAMPER_FIELDS.join(", ")
            )),
        }
    }

    if reasons.is_empty() && changes.is_empty() {
        reasons.push("no updatable fields supplied".to_string());
    }
    if reasons.is_empty() {
        Ok(changes)
    } else {
        Err(ValidationError::new(reasons))
    }
}

/// Checks a signup creation payload.
///
/// Only presence and the hour range are checked here. Whether the referenced
/// camper and activity exist is the store's concern.
pub fn validate_new_signup(payload: &Value) -> Result<NewSignup, ValidationError> {
    let fields = as_object(payload)?;
    let mut reasons = Vec::new();

    let camper_id = required(fields, "camper_id", &mut reasons)
        .and_then(|v| integer(v, "camper_id", &mut reasons));
    let activity_id = required(fields, "activity_id", &mut reasons)
        .and_then(|v| integer(v, "activity_id", &mut reasons));
    let time = required(fields, "time", &mut reasons)
        .and_then(|v| integer_in(v, "time", &TIME_RANGE, &mut reasons));

    match (camper_id, activity_id, time) {
        (Some(camper_id), Some(activity_id), Some(time)) if reasons.is_empty() => Ok(NewSignup {
            camper_id,
            activity_id,
            time,
        }),
        _ => Err(ValidationError::new(reasons)),
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload
        .as_object()
        .ok_or_else(|| ValidationError::single("payload must be a JSON object"))
}

/// Presence test for a payload field. Unlike plain truthiness, numeric zero
/// is present: hour `0` is a valid signup time.
fn present(value: &Value) -> Option<&Value> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
    reasons: &mut Vec<String>,
) -> Option<&'a Value> {
    let value = fields.get(key).and_then(present);
    if value.is_none() {
        reasons.push(format!("{key} is required"));
    }
    value
}

fn text(value: &Value, key: &str, reasons: &mut Vec<String>) -> Option<String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        Some(_) => {
            reasons.push(format!("{key} must not be blank"));
            None
        }
        None => {
            reasons.push(format!("{key} must be a string"));
            None
        }
    }
}

fn integer(value: &Value, key: &str, reasons: &mut Vec<String>) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        reasons.push(format!("{key} must be an integer"));
    }
    parsed
}

fn integer_in(
    value: &Value,
    key: &str,
    range: &RangeInclusive<i64>,
    reasons: &mut Vec<String>,
) -> Option<i64> {
    let n = integer(value, key, reasons)?;
    if range.contains(&n) {
        Some(n)
    } else {
        reasons.push(format!(
            "{key} must be between {} and {}, got {n}",
            range.start(),
            range.end()
        ));
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_camper_within_age_bounds() {
        for age in [8, 12, 18] {
            let camper = validate_new_camper(&json!({ "name": "Alex", "age": age })).unwrap();
            assert_eq!(camper, NewCamper { name: "Alex".into(), age });
        }
    }

    #[test]
    fn accepts_age_given_as_numeric_string() {
        let camper = validate_new_camper(&json!({ "name": "Sam", "age": "14" })).unwrap();
        assert_eq!(camper.age, 14);
    }

    #[test]
    fn rejects_camper_outside_age_bounds() {
        for age in [0, 5, 7, 19, 100, -3] {
            let err = validate_new_camper(&json!({ "name": "Alex", "age": age })).unwrap_err();
            assert_eq!(err.messages(), vec!["validation errors".to_string()]);
        }
    }

    #[test]
    fn rejects_camper_missing_fields() {
        let payloads = [
            json!({ "age": 12 }),
            json!({ "name": "Alex" }),
            json!({ "name": "", "age": 12 }),
            json!({ "name": "Alex", "age": null }),
            json!({}),
        ];
        for payload in payloads {
            assert!(validate_new_camper(&payload).is_err(), "{payload} should fail");
        }
    }

    #[test]
    fn reports_every_failing_field() {
        let err = validate_new_camper(&json!({ "name": "   ", "age": "old" })).unwrap_err();
        assert_eq!(err.reasons().len(), 2);
    }

    #[test]
    fn rejects_non_object_payload() {
        assert!(validate_new_camper(&json!(["Alex", 12])).is_err());
        assert!(validate_new_signup(&json!("hello")).is_err());
    }

    #[test]
    fn camper_changes_accept_any_allowed_subset() {
        let only_name = validate_camper_changes(&json!({ "name": "Jo" })).unwrap();
        assert_eq!(only_name, CamperChanges { name: Some("Jo".into()), age: None });

        let only_age = validate_camper_changes(&json!({ "age": 9 })).unwrap();
        assert_eq!(only_age, CamperChanges { name: None, age: Some(9) });

        let both = validate_camper_changes(&json!({ "name": "Jo", "age": 17 })).unwrap();
        assert_eq!(both, CamperChanges { name: Some("Jo".into()), age: Some(17) });
    }

    #[test]
    fn camper_changes_reject_fields_outside_allow_list() {
        let err = validate_camper_changes(&json!({ "name": "Jo", "id": 42 })).unwrap_err();
        assert!(err.reasons()[0].contains("id is not updatable"));
    }

    #[test]
    fn camper_changes_validate_each_supplied_field() {
        assert!(validate_camper_changes(&json!({ "age": 30 })).is_err());
        assert!(validate_camper_changes(&json!({ "name": "" })).is_err());
        assert!(validate_camper_changes(&json!({ "name": null })).is_err());
        assert!(validate_camper_changes(&json!({})).is_err());
    }

    #[test]
    fn accepts_signup_at_every_hour() {
        for time in TIME_RANGE {
            let signup = validate_new_signup(
                &json!({ "camper_id": 1, "activity_id": 2, "time": time }),
            )
            .unwrap();
            assert_eq!(signup, NewSignup { camper_id: 1, activity_id: 2, time });
        }
    }

    #[test]
    fn rejects_signup_outside_hour_bounds() {
        for time in [-1, 24, 25] {
            let payload = json!({ "camper_id": 1, "activity_id": 1, "time": time });
            assert!(validate_new_signup(&payload).is_err());
        }
    }

    #[test]
    fn rejects_signup_missing_references() {
        assert!(validate_new_signup(&json!({ "activity_id": 1, "time": 9 })).is_err());
        assert!(validate_new_signup(&json!({ "camper_id": 1, "time": 9 })).is_err());
        assert!(validate_new_signup(&json!({ "camper_id": 1, "activity_id": 1 })).is_err());
        let bad_camper = json!({ "camper_id": "x", "activity_id": 1, "time": 9 });
        assert!(validate_new_signup(&bad_camper).is_err());
    }
}
