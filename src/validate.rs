//! Form Validation
//!
//! Per-kind required-field checks. Holds no state; callers surface the
//! returned field errors next to the form.

use std::collections::BTreeMap;

use crate::convert::is_missing;
use crate::models::{EntityKind, Record};

/// Field name -> user-facing message
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub errors: FieldErrors,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Required fields and their messages for a kind
pub fn required_fields(kind: EntityKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        EntityKind::Metric => &[
            ("name", "Metric name is required"),
            ("goal", "Goal is required"),
            ("owner", "Owner is required"),
        ],
        EntityKind::Rock => &[
            ("title", "Rock title is required"),
            ("owner", "Owner is required"),
            ("dueDate", "Due date is required"),
        ],
        EntityKind::Issue => &[
            ("title", "Issue title is required"),
            ("priority", "Priority is required"),
        ],
        EntityKind::Person => &[
            ("name", "Name is required"),
            ("role", "Role is required"),
            ("seat", "Seat is required"),
        ],
        EntityKind::Todo => &[
            ("task", "Task is required"),
            ("owner", "Owner is required"),
            ("dueDate", "Due date is required"),
        ],
        EntityKind::Meeting => &[
            ("title", "Meeting title is required"),
            ("date", "Date is required"),
        ],
        EntityKind::CoreValue => &[
            ("value", "Core value is required"),
            ("description", "Description is required"),
        ],
    }
}

/// Check `data` against the kind's required fields. Unknown kinds always pass.
pub fn validate(kind: &str, data: &Record) -> Validation {
    let Some(kind) = EntityKind::parse(kind) else {
        return Validation::default();
    };
    let errors = required_fields(kind)
        .iter()
        .filter(|(field, _)| is_missing(data.get(*field)))
        .map(|(field, message)| (field.to_string(), message.to_string()))
        .collect();
    Validation { errors }
}
