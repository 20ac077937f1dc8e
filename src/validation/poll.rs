use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde_json::Value;

use super::FieldErrors;

/// A poll definition that passed validation but has not been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PollDraft {
    pub question: String,
    pub select_min: i64,
    pub select_max: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub options: Vec<String>,
}

/// Validates an untrusted poll definition. Every per-field check runs,
/// so the caller gets every violation in one pass; cross-field checks
/// only consider fields that individually passed, and never overwrite a
/// more specific message already set on a field.
pub fn validate_poll(body: &Value, now: DateTime<Utc>) -> Result<PollDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let question = match body.get("question").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => {
            errors.set("question", "The question must be a valid string");
            None
        }
    };

    let select_min = match body.get("select_min").map(Value::as_i64) {
        Some(Some(n)) if n >= 0 => Some(n),
        Some(Some(_)) => {
            errors.set(
                "select_min",
                "The minimum number of selections cannot be negative",
            );
            None
        }
        _ => {
            errors.set(
                "select_min",
                "The minimum number of selections must be an integer",
            );
            None
        }
    };

    let select_max = match body.get("select_max").map(Value::as_i64) {
        Some(Some(n)) if n >= 1 => Some(n),
        Some(Some(_)) => {
            errors.set(
                "select_max",
                "The maximum number of selections must be greater than 0",
            );
            None
        }
        _ => {
            errors.set(
                "select_max",
                "The maximum number of selections must be an integer",
            );
            None
        }
    };

    let start_time = match body.get("start_time").and_then(Value::as_str) {
        Some(raw) => match parse_timestamp(raw) {
            Some(time) => Some(time),
            None => {
                errors.set("start_time", "The start time must be ISO 8601 formatted");
                None
            }
        },
        None => {
            errors.set("start_time", "The start time must be ISO 8601 formatted");
            None
        }
    };

    let end_time = match body.get("end_time").and_then(Value::as_str) {
        Some(raw) => match parse_timestamp(raw) {
            Some(time) => Some(time),
            None => {
                errors.set("end_time", "The end time must be ISO 8601 formatted");
                None
            }
        },
        None => {
            errors.set("end_time", "The end time must be ISO 8601 formatted");
            None
        }
    };

    let options = validate_options(body, &mut errors);

    // Whole-second resolution avoids sub-second flakiness right at the
    // poll boundaries.
    let now = now.with_nanosecond(0).unwrap_or(now);

    if let Some(start) = start_time {
        if now > start {
            errors.set("start_time", "The poll cannot start in the past");
        }
    }

    if let Some(end) = end_time {
        if now > end {
            errors.set("end_time", "The poll cannot end in the past");
        }
    }

    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start >= end {
            errors.set_if_absent("start_time", "The poll must start before it ends");
            errors.set_if_absent("end_time", "The poll cannot end before it starts");
        }
    }

    if let (Some(min), Some(max)) = (select_min, select_max) {
        if min > max {
            errors.set(
                "select_min",
                "The minimum number of selections cannot be greater than the maximum",
            );
            errors.set(
                "select_max",
                "The maximum number of selections cannot be less than the minimum",
            );
        }
    }

    match (question, select_min, select_max, start_time, end_time, options) {
        (Some(question), Some(select_min), Some(select_max), Some(start_time), Some(end_time), Some(options))
            if errors.is_empty() =>
        {
            Ok(PollDraft {
                question,
                select_min,
                select_max,
                start_time,
                end_time,
                options,
            })
        }
        _ => Err(errors),
    }
}

fn validate_options(body: &Value, errors: &mut FieldErrors) -> Option<Vec<String>> {
    let items = match body.get("options") {
        Some(Value::Array(items)) => items,
        _ => {
            errors.set("options", "Options must be provided in a list");
            return None;
        }
    };

    let mut texts = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(text) => texts.push(text.trim().to_string()),
            None => {
                errors.set("options", "The options must be a list of valid strings");
                return None;
            }
        }
    }

    if texts.len() < 2 {
        errors.set("options", "There must be at least 2 options");
        return None;
    }

    for (index, text) in texts.iter().enumerate() {
        if texts[..index].contains(text) {
            errors.set("options", "The options must be unique");
            return None;
        }
    }

    Some(texts)
}

/// Normalizes every inbound timestamp to UTC. Values carrying an offset
/// are converted; offset-less values are interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn valid_body(now: DateTime<Utc>) -> Value {
        json!({
            "question": "Is this a question?",
            "select_min": 1,
            "select_max": 1,
            "start_time": (now + Duration::seconds(1)).to_rfc3339(),
            "end_time": (now + Duration::days(1)).to_rfc3339(),
            "options": ["Yes", "No", "Abstain"],
        })
    }

    #[test]
    fn accepts_a_valid_poll_and_echoes_its_fields() {
        let now = Utc::now().with_nanosecond(0).unwrap();
        let body = valid_body(now);

        let draft = validate_poll(&body, now).expect("poll should validate");
        assert_eq!(draft.question, "Is this a question?");
        assert_eq!(draft.select_min, 1);
        assert_eq!(draft.select_max, 1);
        assert_eq!(draft.start_time, now + Duration::seconds(1));
        assert_eq!(draft.end_time, now + Duration::days(1));
        assert_eq!(draft.options, vec!["Yes", "No", "Abstain"]);
    }

    #[test]
    fn reports_every_missing_field_at_once() {
        let errors = validate_poll(&json!({}), Utc::now()).unwrap_err();
        for field in [
            "question",
            "select_min",
            "select_max",
            "start_time",
            "end_time",
            "options",
        ] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
    }

    #[test]
    fn inverted_selection_bounds_mark_both_fields() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["select_min"] = json!(2);
        body["select_max"] = json!(1);

        let errors = validate_poll(&body, now).unwrap_err();
        assert!(errors.contains("select_min"));
        assert!(errors.contains("select_max"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn independent_violations_are_all_reported() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["select_min"] = json!(2);
        body["select_max"] = json!(1);
        body["options"] = json!(["Yes", "Yes"]);

        let errors = validate_poll(&body, now).unwrap_err();
        assert!(errors.contains("select_min"));
        assert!(errors.contains("select_max"));
        assert_eq!(errors.get("options"), Some("The options must be unique"));
    }

    #[test]
    fn rejects_non_integer_selection_bounds() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["select_min"] = json!("one");

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("select_min"),
            Some("The minimum number of selections must be an integer")
        );
    }

    #[test]
    fn rejects_negative_select_min() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["select_min"] = json!(-1);

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("select_min"),
            Some("The minimum number of selections cannot be negative")
        );
    }

    #[test]
    fn rejects_times_in_the_past() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["start_time"] = json!((now - Duration::hours(2)).to_rfc3339());
        body["end_time"] = json!((now - Duration::hours(1)).to_rfc3339());

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("start_time"),
            Some("The poll cannot start in the past")
        );
        assert_eq!(
            errors.get("end_time"),
            Some("The poll cannot end in the past")
        );
    }

    #[test]
    fn ordering_violation_marks_both_times_without_overwriting() {
        let now = Utc::now();
        let mut body = valid_body(now);
        // End in the past and before start: the past-check message on
        // end_time must survive the ordering check.
        body["start_time"] = json!((now + Duration::hours(1)).to_rfc3339());
        body["end_time"] = json!((now - Duration::hours(1)).to_rfc3339());

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("start_time"),
            Some("The poll must start before it ends")
        );
        assert_eq!(
            errors.get("end_time"),
            Some("The poll cannot end in the past")
        );
    }

    #[test]
    fn rejects_unparsable_timestamps() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["start_time"] = json!("next tuesday");

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("start_time"),
            Some("The start time must be ISO 8601 formatted")
        );
    }

    #[test]
    fn offsetless_timestamps_are_taken_as_utc() {
        let parsed = parse_timestamp("2030-06-01T12:00:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2030-06-01T12:00:00+00:00");
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let parsed = parse_timestamp("2030-06-01T12:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2030-06-01T10:00:00+00:00");
    }

    #[test]
    fn rejects_too_few_options() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["options"] = json!(["Yes"]);

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("options"),
            Some("There must be at least 2 options")
        );
    }

    #[test]
    fn rejects_options_that_are_not_a_list() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["options"] = json!("Yes, No");

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("options"),
            Some("Options must be provided in a list")
        );
    }

    #[test]
    fn rejects_non_string_option_entries() {
        let now = Utc::now();
        let mut body = valid_body(now);
        body["options"] = json!(["Yes", 2, "No"]);

        let errors = validate_poll(&body, now).unwrap_err();
        assert_eq!(
            errors.get("options"),
            Some("The options must be a list of valid strings")
        );
    }
}
