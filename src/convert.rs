//! Format Converter
//!
//! Maps records between the local field convention (camelCase, as used by
//! forms and the typed models) and the remote one (snake_case for
//! multi-word fields). Unknown kinds keep their field names untouched.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::models::{EntityKind, Record};

const ID: &str = "id";
const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

/// Timestamp fields, renamed for every known kind
const TIMESTAMPS: [(&str, &str); 2] = [(CREATED_AT, "created_at"), (UPDATED_AT, "updated_at")];

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// (local, remote) names of kind-specific fields that differ
fn renamed_fields(kind: EntityKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EntityKind::Metric => &[("current", "current_value")],
        EntityKind::Rock | EntityKind::Todo => &[("dueDate", "due_date")],
        EntityKind::Person => &[("getIt", "get_it"), ("wantIt", "want_it")],
        _ => &[],
    }
}

/// Free-text fields that default to an empty string
fn text_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Metric => &["name", "goal", "current", "owner"],
        EntityKind::Rock => &["title", "description", "owner", "dueDate"],
        EntityKind::Issue => &["title", "description"],
        EntityKind::Person => &["name", "role", "seat"],
        EntityKind::Todo => &["task", "owner", "dueDate"],
        EntityKind::Meeting => &["title", "date"],
        EntityKind::CoreValue => &["value", "description"],
    }
}

/// Optional text fields: coerced when present, never defaulted
fn optional_text_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Issue => &["assignee"],
        EntityKind::Person => &["department"],
        EntityKind::Todo => &["notes"],
        EntityKind::Meeting => &["facilitator", "notes"],
        _ => &[],
    }
}

fn flag_fields(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Person => &["getIt", "wantIt", "capacity"],
        EntityKind::Todo => &["completed"],
        _ => &[],
    }
}

fn enum_defaults(kind: EntityKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EntityKind::Metric => &[("status", "unknown")],
        EntityKind::Issue => &[("priority", "medium")],
        _ => &[],
    }
}

/// Convert a local record into the remote convention.
///
/// Always assigns an id when absent, keeps an existing `createdAt` and
/// refreshes `updatedAt`.
pub fn to_remote(kind: &str, local: &Record) -> Record {
    let mut out = local.clone();
    let now = Value::String(timestamp_now());

    let id = out
        .get(ID)
        .and_then(scalar_text)
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_id);
    out.insert(ID.to_string(), Value::String(id));
    if is_missing(out.get(CREATED_AT)) {
        out.insert(CREATED_AT.to_string(), now.clone());
    }
    out.insert(UPDATED_AT.to_string(), now);

    let Some(kind) = EntityKind::parse(kind) else {
        return out;
    };

    if kind == EntityKind::Metric {
        let alias = out.remove("currentValue");
        if is_missing(out.get("current")) {
            let current = alias
                .filter(|v| !is_missing(Some(v)))
                .unwrap_or_else(|| Value::String(String::new()));
            out.insert("current".to_string(), current);
        }
    }
    for field in flag_fields(kind) {
        let flag = out.get(*field).map(truthy).unwrap_or(false);
        out.insert(field.to_string(), Value::Bool(flag));
    }
    if kind == EntityKind::Rock {
        let progress = coerce_progress(out.get("progress"));
        out.insert("progress".to_string(), progress);
    }
    coerce_text(&mut out, text_fields(kind));
    coerce_text(&mut out, optional_text_fields(kind));

    for (local_name, remote_name) in renamed_fields(kind).iter().chain(TIMESTAMPS.iter()) {
        if let Some(value) = out.remove(*local_name) {
            out.insert(remote_name.to_string(), value);
        }
    }
    out
}

/// Convert a remote record into the local convention.
///
/// Accepts either spelling of renamed fields (remote wins when both are
/// present) and fills every required field with its default.
pub fn from_remote(kind: &str, remote: &Record) -> Record {
    let Some(kind) = EntityKind::parse(kind) else {
        return remote.clone();
    };
    let mut out = remote.clone();

    for (local_name, remote_name) in renamed_fields(kind).iter().chain(TIMESTAMPS.iter()) {
        if let Some(value) = out.remove(*remote_name) {
            if !value.is_null() || !out.contains_key(*local_name) {
                out.insert(local_name.to_string(), value);
            }
        }
    }
    if kind == EntityKind::Metric {
        if let Some(alias) = out.remove("currentValue") {
            if is_missing(out.get("current")) {
                out.insert("current".to_string(), alias);
            }
        }
    }

    let id = out.get(ID).and_then(scalar_text).unwrap_or_default();
    out.insert(ID.to_string(), Value::String(id));

    let mut required: Vec<&str> = text_fields(kind).to_vec();
    if kind != EntityKind::CoreValue {
        required.extend([CREATED_AT, UPDATED_AT]);
    }
    for field in required {
        let text = out.get(field).and_then(scalar_text).unwrap_or_default();
        out.insert(field.to_string(), Value::String(text));
    }
    coerce_text(&mut out, optional_text_fields(kind));

    for (field, default) in enum_defaults(kind) {
        let text = match out.get(*field) {
            Some(value) if !is_missing(Some(value)) => scalar_text(value),
            _ => None,
        };
        let text = text.unwrap_or_else(|| default.to_string());
        out.insert(field.to_string(), Value::String(text));
    }
    for field in flag_fields(kind) {
        let flag = out.get(*field).map(truthy).unwrap_or(false);
        out.insert(field.to_string(), Value::Bool(flag));
    }
    if kind == EntityKind::Rock {
        let progress = coerce_progress(out.get("progress"));
        out.insert("progress".to_string(), progress);
    }
    out
}

/// Millisecond-timestamp id, strictly increasing within the process
pub fn generate_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_ID.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next.to_string(),
            Err(actual) => last = actual,
        }
    }
}

/// Current time as RFC 3339 with millisecond precision
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Empty string, null, or absent
pub(crate) fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_text(record: &mut Record, fields: &[&str]) {
    for field in fields {
        if let Some(value @ (Value::Number(_) | Value::Bool(_))) = record.get(*field) {
            let text = scalar_text(value).unwrap_or_default();
            record.insert(field.to_string(), Value::String(text));
        }
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => s == "true" || s == "1",
        _ => false,
    }
}

fn coerce_progress(value: Option<&Value>) -> Value {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    let clamped = if raw.is_nan() { 0.0 } else { raw.round().clamp(0.0, 100.0) };
    Value::from(clamped as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn samples() -> Vec<(&'static str, Record)> {
        vec![
            (
                "metric",
                record(json!({
                    "id": "m1", "name": "NPS", "goal": "50", "current": "42",
                    "status": "behind", "owner": "Bob", "createdAt": "2024-01-01T00:00:00.000Z"
                })),
            ),
            (
                "rock",
                record(json!({
                    "id": "r1", "title": "Launch", "description": "v2", "owner": "Ann",
                    "dueDate": "2024-03-31", "progress": 40, "createdAt": "2024-01-02T00:00:00.000Z"
                })),
            ),
            (
                "issue",
                record(json!({
                    "id": "i1", "title": "Churn", "description": "", "priority": "high",
                    "assignee": "Bob", "createdAt": "2024-01-03T00:00:00.000Z"
                })),
            ),
            (
                "person",
                record(json!({
                    "id": "p1", "name": "Ann", "role": "Ops", "seat": "Operations",
                    "department": "Delivery", "getIt": true, "wantIt": false, "capacity": true,
                    "createdAt": "2024-01-04T00:00:00.000Z"
                })),
            ),
            (
                "todo",
                record(json!({
                    "id": "t1", "task": "Call", "owner": "Bob", "dueDate": "2024-01-10",
                    "notes": "before noon", "completed": true, "createdAt": "2024-01-05T00:00:00.000Z"
                })),
            ),
            (
                "meeting",
                record(json!({
                    "id": "mt1", "title": "L10", "date": "2024-01-08T09:00", "facilitator": "Ann",
                    "createdAt": "2024-01-06T00:00:00.000Z"
                })),
            ),
            (
                "coreValue",
                record(json!({"id": "cv1", "value": "Grit", "description": "Finish"})),
            ),
        ]
    }

    #[test]
    fn test_round_trip_preserves_fields_for_every_kind() {
        for (kind, local) in samples() {
            let back = from_remote(kind, &to_remote(kind, &local));
            for (field, value) in &local {
                assert_eq!(back.get(field), Some(value), "{kind}.{field}");
            }
        }
    }

    #[test]
    fn test_to_remote_uses_snake_case_names() {
        let (_, rock) = samples().remove(1);
        let remote = to_remote("rock", &rock);
        assert_eq!(remote.get("due_date"), Some(&json!("2024-03-31")));
        assert!(remote.get("dueDate").is_none());
        assert!(remote.contains_key("created_at"));
        assert!(remote.contains_key("updated_at"));

        let (_, person) = samples().remove(3);
        let remote = to_remote("person", &person);
        assert_eq!(remote.get("get_it"), Some(&json!(true)));
        assert_eq!(remote.get("want_it"), Some(&json!(false)));
        assert_eq!(remote.get("capacity"), Some(&json!(true)));
    }

    #[test]
    fn test_to_remote_stamps_id_and_timestamps() {
        let remote = to_remote("metric", &record(json!({"name": "NPS"})));
        let id = remote.get("id").and_then(Value::as_str).unwrap();
        assert!(!id.is_empty());
        let created = remote.get("created_at").and_then(Value::as_str).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(created).is_ok());
        assert_eq!(remote.get("current_value"), Some(&json!("")));

        let kept = to_remote(
            "metric",
            &record(json!({"id": "m9", "createdAt": "2020-01-01T00:00:00.000Z", "updatedAt": "2020-01-01T00:00:00.000Z"})),
        );
        assert_eq!(kept.get("id"), Some(&json!("m9")));
        assert_eq!(kept.get("created_at"), Some(&json!("2020-01-01T00:00:00.000Z")));
        assert_ne!(kept.get("updated_at"), Some(&json!("2020-01-01T00:00:00.000Z")));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert!(b.parse::<i64>().unwrap() > a.parse::<i64>().unwrap());
    }

    #[test]
    fn test_unknown_kind_passes_through() {
        let remote = record(json!({"some_field": 1, "nested": {"a": true}}));
        assert_eq!(from_remote("widget", &remote), remote);

        let stamped = to_remote("widget", &record(json!({"due_date": "x", "id": "w1"})));
        assert_eq!(stamped.get("due_date"), Some(&json!("x")));
        assert_eq!(stamped.get("id"), Some(&json!("w1")));
        assert!(stamped.contains_key("createdAt"));
    }

    #[test]
    fn test_from_remote_fills_defaults() {
        let person = from_remote("person", &record(json!({"id": 7, "name": "Ann"})));
        assert_eq!(person.get("id"), Some(&json!("7")));
        assert_eq!(person.get("role"), Some(&json!("")));
        assert_eq!(person.get("getIt"), Some(&json!(false)));
        assert_eq!(person.get("wantIt"), Some(&json!(false)));
        assert_eq!(person.get("capacity"), Some(&json!(false)));

        let metric = from_remote("metric", &record(json!({"id": "m1", "goal": 50})));
        assert_eq!(metric.get("goal"), Some(&json!("50")));
        assert_eq!(metric.get("status"), Some(&json!("unknown")));
        assert_eq!(metric.get("current"), Some(&json!("")));

        let issue = from_remote("issue", &record(json!({"id": "i1", "title": "X"})));
        assert_eq!(issue.get("priority"), Some(&json!("medium")));
        assert!(issue.get("assignee").is_none());
    }

    #[test]
    fn test_from_remote_accepts_both_spellings() {
        let camel = from_remote("todo", &record(json!({"id": "t", "dueDate": "2024-02-01"})));
        assert_eq!(camel.get("dueDate"), Some(&json!("2024-02-01")));

        let snake = from_remote(
            "todo",
            &record(json!({"id": "t", "due_date": "2024-02-02", "dueDate": "2024-02-01"})),
        );
        assert_eq!(snake.get("dueDate"), Some(&json!("2024-02-02")));

        let alias = from_remote("metric", &record(json!({"id": "m", "currentValue": "12"})));
        assert_eq!(alias.get("current"), Some(&json!("12")));
    }

    #[test]
    fn test_enum_fields_are_always_strings() {
        let issue = from_remote("issue", &record(json!({"id": "i", "priority": 1})));
        assert_eq!(issue.get("priority"), Some(&json!("1")));
        let issue = from_remote("issue", &record(json!({"id": "i", "priority": ["high"]})));
        assert_eq!(issue.get("priority"), Some(&json!("medium")));
        let metric = from_remote("metric", &record(json!({"id": "m", "status": null})));
        assert_eq!(metric.get("status"), Some(&json!("unknown")));
        let metric = from_remote("metric", &record(json!({"id": "m", "status": "behind"})));
        assert_eq!(metric.get("status"), Some(&json!("behind")));
    }

    #[test]
    fn test_progress_is_clamped_integer() {
        let rock = from_remote("rock", &record(json!({"id": "r", "progress": "40"})));
        assert_eq!(rock.get("progress"), Some(&json!(40)));
        let rock = from_remote("rock", &record(json!({"id": "r", "progress": 180})));
        assert_eq!(rock.get("progress"), Some(&json!(100)));
        let rock = from_remote("rock", &record(json!({"id": "r"})));
        assert_eq!(rock.get("progress"), Some(&json!(0)));
    }
}
