//! Request validation for workshop create/update payloads.
//!
//! [`validate_workshop`] is pure: it inspects a raw [`WorkshopInput`] and
//! either returns a fully typed [`ValidatedWorkshop`] or every field
//! violation it found. Nothing reaches the repository without passing here.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::workshop::{derive_state, Shift, WorkshopState, MAX_CAPACITY, MAX_TEXT_LEN, MIN_CAPACITY};

/// Accepted `HH:MM` time format.
pub const TIME_FORMAT: &str = "%H:%M";

/// Accepted `YYYY-MM-DD` date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Rule names
// ---------------------------------------------------------------------------

pub const RULE_REQUIRED: &str = "required";
pub const RULE_MAX: &str = "max";
pub const RULE_MIN: &str = "min";
pub const RULE_IN: &str = "in";
pub const RULE_INTEGER: &str = "integer";
pub const RULE_DATE_FORMAT: &str = "date_format";
pub const RULE_DATE: &str = "date";
pub const RULE_AFTER: &str = "after";
pub const RULE_AFTER_OR_EQUAL: &str = "after_or_equal";
pub const RULE_STRING: &str = "string";
pub const RULE_OBJECT: &str = "object";

/// Field name reported when the payload as a whole is unusable.
pub const BODY_FIELD: &str = "body";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, rule: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            rule: rule.to_string(),
            message: message.to_string(),
        }
    }
}

/// Raw create/update payload as received from a client.
///
/// Every field is optional here so that missing values surface as
/// `required` violations. There is no `state` field: availability is always
/// derived.
#[derive(Debug, Clone, Default)]
pub struct WorkshopInput {
    pub name: Option<String>,
    pub shift: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub site: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Kept as raw JSON so a non-integer becomes an `integer` violation.
    pub capacity: Option<serde_json::Value>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub syllabus: Option<String>,
}

/// A workshop payload that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWorkshop {
    pub name: String,
    pub shift: Shift,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub site: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity: i32,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub syllabus: Option<String>,
}

impl ValidatedWorkshop {
    /// Availability state this payload will be persisted with.
    pub fn state(&self) -> WorkshopState {
        derive_state(self.capacity)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a raw workshop payload.
///
/// All violations are collected; ordering rules (`end_time` after
/// `start_time`, `end_date` on or after `start_date`) are only checked when
/// both sides parsed.
pub fn validate_workshop(input: &WorkshopInput) -> Result<ValidatedWorkshop, Vec<FieldViolation>> {
    let mut errors = Vec::new();

    let name = required_text(
        &mut errors,
        "name",
        input.name.as_deref(),
        "El nombre del taller es obligatorio.",
        "El nombre del taller no puede superar los 255 caracteres.",
    );

    let shift = match non_blank(input.shift.as_deref()) {
        None => {
            errors.push(FieldViolation::new("shift", RULE_REQUIRED, "El turno es obligatorio."));
            None
        }
        Some(raw) => match raw.parse::<Shift>() {
            Ok(shift) => Some(shift),
            Err(_) => {
                errors.push(FieldViolation::new(
                    "shift",
                    RULE_IN,
                    "El turno debe ser mañana o tarde.",
                ));
                None
            }
        },
    };

    let start_time = required_time(
        &mut errors,
        "start_time",
        input.start_time.as_deref(),
        "La hora de inicio es obligatoria.",
        "La hora de inicio debe tener formato HH:MM.",
    );
    let end_time = required_time(
        &mut errors,
        "end_time",
        input.end_time.as_deref(),
        "La hora de fin es obligatoria.",
        "La hora de fin debe tener formato HH:MM.",
    );
    if let (Some(start), Some(end)) = (start_time, end_time) {
        if end <= start {
            errors.push(FieldViolation::new(
                "end_time",
                RULE_AFTER,
                "La hora de fin debe ser después de la hora de inicio.",
            ));
        }
    }

    let site = required_text(
        &mut errors,
        "site",
        input.site.as_deref(),
        "La sede es obligatoria.",
        "La sede no puede superar los 255 caracteres.",
    );

    let start_date = required_date(
        &mut errors,
        "start_date",
        input.start_date.as_deref(),
        "La fecha de inicio es obligatoria.",
        "La fecha de inicio no es una fecha válida.",
    );
    let end_date = required_date(
        &mut errors,
        "end_date",
        input.end_date.as_deref(),
        "La fecha de fin es obligatoria.",
        "La fecha de fin no es una fecha válida.",
    );
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            errors.push(FieldViolation::new(
                "end_date",
                RULE_AFTER_OR_EQUAL,
                "La fecha de fin no puede ser anterior a la fecha de inicio.",
            ));
        }
    }

    let capacity = validate_capacity(&mut errors, input.capacity.as_ref());

    if !errors.is_empty() {
        return Err(errors);
    }

    // Every required field is `Some` once `errors` is empty.
    match (name, shift, start_time, end_time, site, start_date, end_date, capacity) {
        (
            Some(name),
            Some(shift),
            Some(start_time),
            Some(end_time),
            Some(site),
            Some(start_date),
            Some(end_date),
            Some(capacity),
        ) => Ok(ValidatedWorkshop {
            name,
            shift,
            start_time,
            end_time,
            site,
            start_date,
            end_date,
            capacity,
            description: optional_text(input.description.as_deref()),
            requirements: optional_text(input.requirements.as_deref()),
            syllabus: optional_text(input.syllabus.as_deref()),
        }),
        _ => Err(errors),
    }
}

/// Validate a payload straight from a JSON request body.
///
/// Text fields holding a non-string value are reported as `string`
/// violations alongside whatever [`validate_workshop`] finds in the rest of
/// the payload; a body that is not an object yields a single `object`
/// violation. Unknown keys (including `state`) are ignored.
pub fn validate_payload(body: &serde_json::Value) -> Result<ValidatedWorkshop, Vec<FieldViolation>> {
    let Some(object) = body.as_object() else {
        return Err(vec![FieldViolation::new(
            BODY_FIELD,
            RULE_OBJECT,
            "El cuerpo de la solicitud debe ser un objeto JSON.",
        )]);
    };

    let mut type_errors = Vec::new();
    let mut text = |field: &str| match object.get(field) {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(_) => {
            type_errors.push(FieldViolation::new(
                field,
                RULE_STRING,
                &format!("El campo {field} debe ser una cadena de texto."),
            ));
            None
        }
    };

    let input = WorkshopInput {
        name: text("name"),
        shift: text("shift"),
        start_time: text("start_time"),
        end_time: text("end_time"),
        site: text("site"),
        start_date: text("start_date"),
        end_date: text("end_date"),
        capacity: object.get("capacity").cloned(),
        description: text("description"),
        requirements: text("requirements"),
        syllabus: text("syllabus"),
    };

    match validate_workshop(&input) {
        Ok(validated) if type_errors.is_empty() => Ok(validated),
        Ok(_) => Err(type_errors),
        Err(violations) => {
            // A mistyped field was blanked above; drop its `required` echo.
            let rest: Vec<FieldViolation> = violations
                .into_iter()
                .filter(|v| !type_errors.iter().any(|t| t.field == v.field))
                .collect();
            type_errors.extend(rest);
            Err(type_errors)
        }
    }
}

/// Treat empty and whitespace-only strings as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

fn required_text(
    errors: &mut Vec<FieldViolation>,
    field: &str,
    value: Option<&str>,
    required_msg: &str,
    max_msg: &str,
) -> Option<String> {
    let Some(value) = non_blank(value) else {
        errors.push(FieldViolation::new(field, RULE_REQUIRED, required_msg));
        return None;
    };
    if value.chars().count() > MAX_TEXT_LEN {
        errors.push(FieldViolation::new(field, RULE_MAX, max_msg));
        return None;
    }
    Some(value.to_string())
}

fn required_time(
    errors: &mut Vec<FieldViolation>,
    field: &str,
    value: Option<&str>,
    required_msg: &str,
    format_msg: &str,
) -> Option<NaiveTime> {
    let Some(value) = non_blank(value) else {
        errors.push(FieldViolation::new(field, RULE_REQUIRED, required_msg));
        return None;
    };
    match parse_hh_mm(value) {
        Some(time) => Some(time),
        None => {
            errors.push(FieldViolation::new(field, RULE_DATE_FORMAT, format_msg));
            None
        }
    }
}

fn required_date(
    errors: &mut Vec<FieldViolation>,
    field: &str,
    value: Option<&str>,
    required_msg: &str,
    format_msg: &str,
) -> Option<NaiveDate> {
    let Some(value) = non_blank(value) else {
        errors.push(FieldViolation::new(field, RULE_REQUIRED, required_msg));
        return None;
    };
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldViolation::new(field, RULE_DATE, format_msg));
            None
        }
    }
}

/// Strict `HH:MM`: exactly two digits, a colon, two digits.
fn parse_hh_mm(value: &str) -> Option<NaiveTime> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

fn validate_capacity(
    errors: &mut Vec<FieldViolation>,
    value: Option<&serde_json::Value>,
) -> Option<i32> {
    let parsed = match value {
        None | Some(serde_json::Value::Null) => {
            errors.push(FieldViolation::new(
                "capacity",
                RULE_REQUIRED,
                "La capacidad de alumnos es obligatoria.",
            ));
            return None;
        }
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
            errors.push(FieldViolation::new(
                "capacity",
                RULE_REQUIRED,
                "La capacidad de alumnos es obligatoria.",
            ));
            return None;
        }
        Some(serde_json::Value::Number(n)) => n.as_i64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    let Some(capacity) = parsed else {
        errors.push(FieldViolation::new(
            "capacity",
            RULE_INTEGER,
            "La capacidad debe ser un número entero.",
        ));
        return None;
    };

    if capacity < MIN_CAPACITY {
        errors.push(FieldViolation::new(
            "capacity",
            RULE_MIN,
            "La capacidad debe ser al menos 1.",
        ));
        return None;
    }
    if capacity > MAX_CAPACITY {
        errors.push(FieldViolation::new(
            "capacity",
            RULE_MAX,
            "La capacidad máxima permitida es 50 alumnos.",
        ));
        return None;
    }

    i32::try_from(capacity).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> WorkshopInput {
        WorkshopInput {
            name: Some("Taller de Robótica Inicial".into()),
            shift: Some("morning".into()),
            start_time: Some("08:00".into()),
            end_time: Some("10:00".into()),
            site: Some("Campus Central".into()),
            start_date: Some("2025-01-15".into()),
            end_date: Some("2025-02-15".into()),
            capacity: Some(json!(25)),
            description: Some("Introducción a la robótica educativa.".into()),
            requirements: None,
            syllabus: Some("   ".into()),
        }
    }

    fn rules_for<'a>(errors: &'a [FieldViolation], field: &str) -> Vec<&'a str> {
        errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.rule.as_str())
            .collect()
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "name": "Taller de Robótica Inicial",
            "shift": "mañana",
            "start_time": "08:00",
            "end_time": "10:00",
            "site": "Campus Central",
            "start_date": "2025-01-15",
            "end_date": "2025-02-15",
            "capacity": "25",
            "state": "full",
        })
    }

    #[test]
    fn payload_with_valid_body_passes() {
        let validated = validate_payload(&valid_body()).unwrap();
        assert_eq!(validated.shift, Shift::Morning);
        assert_eq!(validated.capacity, 25);
        assert_eq!(validated.state(), WorkshopState::Available);
    }

    #[test]
    fn payload_reports_mistyped_text_field_once() {
        let mut body = valid_body();
        body["name"] = json!(123);
        body["site"] = json!(["Campus"]);

        let errors = validate_payload(&body).unwrap_err();
        assert_eq!(rules_for(&errors, "name"), vec![RULE_STRING]);
        assert_eq!(rules_for(&errors, "site"), vec![RULE_STRING]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn payload_type_errors_combine_with_rule_errors() {
        let mut body = valid_body();
        body["name"] = json!(true);
        body["capacity"] = json!(80);

        let errors = validate_payload(&body).unwrap_err();
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].rule, RULE_STRING);
        assert_eq!(rules_for(&errors, "capacity"), vec![RULE_MAX]);
    }

    #[test]
    fn payload_must_be_an_object() {
        for body in [json!([1, 2]), json!("taller"), json!(null)] {
            let errors = validate_payload(&body).unwrap_err();
            assert_eq!(errors.len(), 1, "{body}");
            assert_eq!(errors[0].field, BODY_FIELD);
            assert_eq!(errors[0].rule, RULE_OBJECT);
        }
    }

    #[test]
    fn valid_input_passes() {
        let validated = validate_workshop(&valid_input()).unwrap();
        assert_eq!(validated.shift, Shift::Morning);
        assert_eq!(validated.capacity, 25);
        assert_eq!(validated.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(validated.state(), WorkshopState::Available);
        assert_eq!(validated.syllabus, None, "blank optional text is dropped");
    }

    #[test]
    fn empty_input_reports_every_required_field() {
        let errors = validate_workshop(&WorkshopInput::default()).unwrap_err();
        for field in [
            "name",
            "shift",
            "start_time",
            "end_time",
            "site",
            "start_date",
            "end_date",
            "capacity",
        ] {
            assert_eq!(rules_for(&errors, field), vec![RULE_REQUIRED], "{field}");
        }
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn name_longer_than_255_chars_fails() {
        let mut input = valid_input();
        input.name = Some("ñ".repeat(256));
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "name"), vec![RULE_MAX]);

        input.name = Some("ñ".repeat(255));
        assert!(validate_workshop(&input).is_ok());
    }

    #[test]
    fn unknown_shift_fails_with_in_rule() {
        let mut input = valid_input();
        input.shift = Some("noche".into());
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "shift"), vec![RULE_IN]);
    }

    #[test]
    fn spanish_shift_alias_is_accepted() {
        let mut input = valid_input();
        input.shift = Some("tarde".into());
        assert_eq!(validate_workshop(&input).unwrap().shift, Shift::Afternoon);
    }

    #[test]
    fn time_must_be_hh_mm() {
        for bad in ["8:00", "08:00:00", "24:00", "08-00", "ab:cd"] {
            let mut input = valid_input();
            input.start_time = Some(bad.into());
            let errors = validate_workshop(&input).unwrap_err();
            assert_eq!(rules_for(&errors, "start_time"), vec![RULE_DATE_FORMAT], "{bad}");
        }
    }

    #[test]
    fn end_time_must_be_strictly_after_start_time() {
        let mut input = valid_input();
        input.end_time = Some("08:00".into());
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "end_time"), vec![RULE_AFTER]);

        input.end_time = Some("07:59".into());
        assert!(validate_workshop(&input).is_err());

        input.end_time = Some("08:01".into());
        assert!(validate_workshop(&input).is_ok());
    }

    #[test]
    fn end_date_may_equal_start_date() {
        let mut input = valid_input();
        input.end_date = input.start_date.clone();
        assert!(validate_workshop(&input).is_ok());

        input.end_date = Some("2025-01-14".into());
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "end_date"), vec![RULE_AFTER_OR_EQUAL]);
    }

    #[test]
    fn invalid_date_fails_with_date_rule() {
        let mut input = valid_input();
        input.start_date = Some("2025-02-30".into());
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "start_date"), vec![RULE_DATE]);
        assert!(rules_for(&errors, "end_date").is_empty());
    }

    #[test]
    fn capacity_bounds_are_inclusive() {
        let mut input = valid_input();
        input.capacity = Some(json!(1));
        assert!(validate_workshop(&input).is_ok());
        input.capacity = Some(json!(50));
        assert_eq!(validate_workshop(&input).unwrap().state(), WorkshopState::Full);

        input.capacity = Some(json!(0));
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "capacity"), vec![RULE_MIN]);

        input.capacity = Some(json!(51));
        let errors = validate_workshop(&input).unwrap_err();
        assert_eq!(rules_for(&errors, "capacity"), vec![RULE_MAX]);
    }

    #[test]
    fn capacity_must_be_an_integer() {
        for bad in [json!(12.5), json!("doce"), json!(true), json!([1])] {
            let mut input = valid_input();
            input.capacity = Some(bad.clone());
            let errors = validate_workshop(&input).unwrap_err();
            assert_eq!(rules_for(&errors, "capacity"), vec![RULE_INTEGER], "{bad}");
        }
    }

    #[test]
    fn numeric_string_capacity_is_accepted() {
        let mut input = valid_input();
        input.capacity = Some(json!("30"));
        assert_eq!(validate_workshop(&input).unwrap().capacity, 30);
    }
}
