//! Field-constraint tables and the generic validator.
//!
//! Each insertable record is described by a static [`Schema`]: a list of
//! fields and the primitive shape each must have. [`validate`] checks an
//! untyped JSON body against a schema and returns the normalized object
//! (unknown keys dropped). Only shape is checked here; business rules such
//! as "at least one service" belong to the caller.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{NewContactMessage, NewWaitlistEntry};

/// Primitive shape expected for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Required, non-blank string
    Text,
    /// String, `null`, or absent
    OptionalText,
    /// Required array of strings (may be empty)
    TextList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Insertable shape of one entity type
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub entity: &'static str,
    pub fields: &'static [FieldSpec],
}

pub const WAITLIST_ENTRY_SCHEMA: Schema = Schema {
    entity: "waitlist entry",
    fields: &[
        field("firstName", FieldKind::Text),
        field("lastName", FieldKind::Text),
        field("email", FieldKind::Text),
        field("phone", FieldKind::OptionalText),
        field("services", FieldKind::TextList),
        field("preferredContact", FieldKind::Text),
        field("budgetRange", FieldKind::Text),
        field("additionalDetails", FieldKind::OptionalText),
    ],
};

pub const CONTACT_MESSAGE_SCHEMA: Schema = Schema {
    entity: "contact message",
    fields: &[
        field("name", FieldKind::Text),
        field("email", FieldKind::Text),
        field("subject", FieldKind::OptionalText),
        field("message", FieldKind::Text),
    ],
};

/// A single violation, keyed by field path (`services[1]` for list items)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: String,
    pub reason: String,
}

/// Input did not match the expected shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn describe(issues: &[FieldIssue]) -> String {
    if issues.is_empty() {
        return "Invalid data".to_string();
    }
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Error with a single violation
    pub fn single(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.into(),
                reason: reason.into(),
            }],
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// True if any violation names `field`
    pub fn mentions(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

/// JSON type name used in error reasons
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_field(spec: &FieldSpec, value: Option<&Value>, issues: &mut Vec<FieldIssue>) {
    let mut push = |field: String, reason: String| issues.push(FieldIssue { field, reason });

    match (spec.kind, value) {
        (FieldKind::OptionalText, None | Some(Value::Null)) => {}
        (FieldKind::OptionalText, Some(Value::String(_))) => {}
        (FieldKind::Text | FieldKind::TextList, None) => {
            push(spec.name.to_string(), "Required".to_string());
        }
        (FieldKind::Text, Some(Value::String(s))) => {
            if s.trim().is_empty() {
                push(spec.name.to_string(), "Must not be empty".to_string());
            }
        }
        (FieldKind::TextList, Some(Value::Array(items))) => {
            for (idx, item) in items.iter().enumerate() {
                if !item.is_string() {
                    push(
                        format!("{}[{}]", spec.name, idx),
                        format!("Expected string, received {}", type_name(item)),
                    );
                }
            }
        }
        (FieldKind::TextList, Some(other)) => {
            push(
                spec.name.to_string(),
                format!("Expected array, received {}", type_name(other)),
            );
        }
        (FieldKind::Text | FieldKind::OptionalText, Some(other)) => {
            push(
                spec.name.to_string(),
                format!("Expected string, received {}", type_name(other)),
            );
        }
    }
}

/// Check `input` against `schema`.
///
/// All violations are collected before failing. On success the returned
/// object holds only the schema's fields; absent optional fields are left
/// out and caller-supplied `id` / `createdAt` are dropped with the other
/// unknown keys.
pub fn validate(schema: &Schema, input: &Value) -> Result<Map<String, Value>, ValidationError> {
    let Value::Object(object) = input else {
        return Err(ValidationError::single(
            schema.entity,
            format!("Expected object, received {}", type_name(input)),
        ));
    };

    let mut issues = Vec::new();
    let mut normalized = Map::new();

    for spec in schema.fields {
        let value = object.get(spec.name);
        check_field(spec, value, &mut issues);

        if let Some(value) = value {
            normalized.insert(spec.name.to_string(), value.clone());
        }
    }

    if issues.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationError { issues })
    }
}

fn parse<T: DeserializeOwned>(schema: &Schema, input: &Value) -> Result<T, ValidationError> {
    let normalized = validate(schema, input)?;
    serde_json::from_value(Value::Object(normalized))
        .map_err(|e| ValidationError::single(schema.entity, e.to_string()))
}

/// Validate and convert a waitlist signup body
pub fn parse_waitlist_entry(input: &Value) -> Result<NewWaitlistEntry, ValidationError> {
    parse(&WAITLIST_ENTRY_SCHEMA, input)
}

/// Validate and convert a contact form body
pub fn parse_contact_message(input: &Value) -> Result<NewContactMessage, ValidationError> {
    parse(&CONTACT_MESSAGE_SCHEMA, input)
}
