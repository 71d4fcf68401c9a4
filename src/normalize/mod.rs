pub mod fields;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::EntityKind;
use fields::{extract_fields, FieldSpec, Fields};

/// Why a raw JSON value did not become a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("value is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("required field `{0}` is blank")]
    EmptyField(&'static str),

    #[error("field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// A content record that can be parsed out of loosely-typed JSON
pub trait Record: Sized + Clone + Serialize + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Field table driving extraction
    const FIELDS: &'static [FieldSpec];

    /// Builds the record from fields already accepted by the table
    fn from_fields(fields: Fields) -> Result<Self, Rejection>;

    /// Canonical unique key (lowercase slug or uppercase country code)
    fn key(&self) -> &str;

    /// Display name used for sorting, breadcrumbs and item lists
    fn display_name(&self) -> &str;
}

/// Parses one JSON value into `T`, reporting why when it cannot.
pub fn try_normalize<T: Record>(value: &Value) -> Result<T, Rejection> {
    let object = value.as_object().ok_or(Rejection::NotAnObject)?;
    let fields = extract_fields(object, T::FIELDS)?;
    T::from_fields(fields)
}

/// Parses one JSON value into `T`; `None` for anything that is not a valid record.
pub fn normalize<T: Record>(value: &Value) -> Option<T> {
    try_normalize(value).ok()
}
