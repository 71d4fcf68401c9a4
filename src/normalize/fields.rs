use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use super::Rejection;
use crate::domain::FaqEntry;

/// Canonical case for keys that are compared case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Slugs
    Lower,
    /// Country codes
    Upper,
}

impl KeyCase {
    pub fn apply(self, raw: &str) -> String {
        let trimmed = raw.trim();
        match self {
            KeyCase::Lower => trimmed.to_lowercase(),
            KeyCase::Upper => trimmed.to_uppercase(),
        }
    }
}

/// Shape a field must have to be accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Trimmed, non-empty string
    Text,
    /// Trimmed, non-empty string folded to a canonical case
    Key(KeyCase),
    /// Finite number inside an inclusive range
    Number { min: f64, max: f64 },
    /// Array of strings; non-strings and blanks are dropped
    TextList,
    /// Like `TextList`, folded to a canonical case and deduplicated
    KeyList(KeyCase),
    /// Array of question/answer objects, `{question, answer}` or `{q, a}`
    FaqList,
    /// JSON object, kept opaque
    Object,
    /// JSON object or array, kept opaque
    Structured,
}

impl FieldKind {
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Key(_) => "string",
            FieldKind::Number { .. } => "finite number in range",
            FieldKind::TextList | FieldKind::KeyList(_) | FieldKind::FaqList => "array",
            FieldKind::Object => "object",
            FieldKind::Structured => "object or array",
        }
    }
}

/// One row of an entity's field table
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Alternative source keys, tried in order after `name`
    pub aliases: &'static [&'static str],
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            aliases: &[],
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        FieldSpec {
            name,
            aliases: &[],
            kind,
            required: false,
        }
    }

    pub const fn aliases(self, aliases: &'static [&'static str]) -> Self {
        FieldSpec {
            name: self.name,
            aliases,
            kind: self.kind,
            required: self.required,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
    Faq(Vec<FaqEntry>),
    Json(Value),
}

/// Accepted field values, keyed by the canonical field name
#[derive(Debug, Default)]
pub struct Fields {
    values: HashMap<&'static str, FieldValue>,
}

impl Fields {
    pub fn text(&mut self, name: &str) -> Option<String> {
        match self.values.remove(name) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn required_text(&mut self, name: &'static str) -> Result<String, Rejection> {
        self.text(name).ok_or(Rejection::MissingField(name))
    }

    pub fn number(&mut self, name: &str) -> Option<f64> {
        match self.values.remove(name) {
            Some(FieldValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// Missing or non-array list fields read as empty
    pub fn list(&mut self, name: &str) -> Vec<String> {
        match self.values.remove(name) {
            Some(FieldValue::List(items)) => items,
            _ => Vec::new(),
        }
    }

    pub fn faq(&mut self, name: &str) -> Vec<FaqEntry> {
        match self.values.remove(name) {
            Some(FieldValue::Faq(entries)) => entries,
            _ => Vec::new(),
        }
    }

    pub fn json(&mut self, name: &str) -> Option<Value> {
        match self.values.remove(name) {
            Some(FieldValue::Json(value)) => Some(value),
            _ => None,
        }
    }
}

/// Reads every field in `specs` out of `object`.
///
/// Optional fields that are absent or of the wrong shape are left out. The first
/// required field that cannot be read rejects the whole record.
pub fn extract_fields(
    object: &Map<String, Value>,
    specs: &[FieldSpec],
) -> Result<Fields, Rejection> {
    let mut fields = Fields::default();
    for spec in specs {
        match read_field(object, spec) {
            Some(value) => {
                fields.values.insert(spec.name, value);
            }
            None if spec.required => return Err(explain_missing(object, spec)),
            None => {}
        }
    }
    Ok(fields)
}

fn read_field(object: &Map<String, Value>, spec: &FieldSpec) -> Option<FieldValue> {
    spec.candidates()
        .filter_map(|key| object.get(key))
        .find_map(|raw| coerce(raw, spec.kind))
}

fn explain_missing(object: &Map<String, Value>, spec: &FieldSpec) -> Rejection {
    let present = spec
        .candidates()
        .filter_map(|key| object.get(key))
        .find(|raw| !raw.is_null());

    match present {
        None => Rejection::MissingField(spec.name),
        Some(Value::String(_)) if matches!(spec.kind, FieldKind::Text | FieldKind::Key(_)) => {
            Rejection::EmptyField(spec.name)
        }
        Some(_) => Rejection::WrongType {
            field: spec.name,
            expected: spec.kind.expected(),
        },
    }
}

fn coerce(raw: &Value, kind: FieldKind) -> Option<FieldValue> {
    match kind {
        FieldKind::Text => non_empty_str(raw).map(|s| FieldValue::Text(s.to_string())),
        FieldKind::Key(case) => non_empty_str(raw).map(|s| FieldValue::Text(case.apply(s))),
        FieldKind::Number { min, max } => raw
            .as_f64()
            .filter(|n| n.is_finite() && (min..=max).contains(n))
            // folds -0.0 into 0.0
            .map(|n| FieldValue::Number(n + 0.0)),
        FieldKind::TextList => raw.as_array().map(|items| {
            FieldValue::List(items.iter().filter_map(non_empty_str).map(str::to_string).collect())
        }),
        FieldKind::KeyList(case) => raw
            .as_array()
            .map(|items| FieldValue::List(key_list(items, case))),
        FieldKind::FaqList => raw
            .as_array()
            .map(|items| FieldValue::Faq(items.iter().filter_map(faq_entry).collect())),
        FieldKind::Object => raw.is_object().then(|| FieldValue::Json(raw.clone())),
        FieldKind::Structured => {
            (raw.is_object() || raw.is_array()).then(|| FieldValue::Json(raw.clone()))
        }
    }
}

/// Trimmed string content, `None` for non-strings and blanks
pub fn non_empty_str(raw: &Value) -> Option<&str> {
    raw.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// First key in `keys` holding a non-blank string
pub fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(non_empty_str)
        .map(str::to_string)
}

fn key_list(items: &[Value], case: KeyCase) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(non_empty_str)
        .map(|s| case.apply(s))
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

fn faq_entry(raw: &Value) -> Option<FaqEntry> {
    let object = raw.as_object()?;
    let question = first_text(object, &["question", "q"])?;
    let answer = first_text(object, &["answer", "a"])?;
    Some(FaqEntry { question, answer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SPECS: &[FieldSpec] = &[
        FieldSpec::required("code", FieldKind::Key(KeyCase::Upper)).aliases(&["iso2"]),
        FieldSpec::optional("score", FieldKind::Number { min: 0.0, max: 5.0 }),
        FieldSpec::optional("tags", FieldKind::TextList),
        FieldSpec::optional("codes", FieldKind::KeyList(KeyCase::Upper)),
        FieldSpec::optional("faq", FieldKind::FaqList),
        FieldSpec::optional("meta", FieldKind::Object),
    ];

    fn extract(value: Value) -> Result<Fields, Rejection> {
        extract_fields(value.as_object().unwrap(), SPECS)
    }

    #[test]
    fn test_required_field_missing_rejects() {
        let result = extract(json!({ "score": 3 }));
        assert_eq!(result.unwrap_err(), Rejection::MissingField("code"));
    }

    #[test]
    fn test_required_field_wrong_type_rejects() {
        let result = extract(json!({ "code": 42 }));
        assert_eq!(
            result.unwrap_err(),
            Rejection::WrongType { field: "code", expected: "string" }
        );
    }

    #[test]
    fn test_required_field_blank_rejects() {
        let result = extract(json!({ "code": "   " }));
        assert_eq!(result.unwrap_err(), Rejection::EmptyField("code"));
    }

    #[test]
    fn test_alias_used_when_primary_has_wrong_type() {
        let mut fields = extract(json!({ "code": null, "iso2": "de" })).unwrap();
        assert_eq!(fields.text("code").as_deref(), Some("DE"));
    }

    #[test]
    fn test_optional_number_out_of_range_is_omitted() {
        let mut fields = extract(json!({ "code": "DE", "score": 7.5 })).unwrap();
        assert_eq!(fields.number("score"), None);

        let mut fields = extract(json!({ "code": "DE", "score": "4.5" })).unwrap();
        assert_eq!(fields.number("score"), None);

        let mut fields = extract(json!({ "code": "DE", "score": 4 })).unwrap();
        assert_eq!(fields.number("score"), Some(4.0));
    }

    #[test]
    fn test_lists_filter_non_strings_and_blanks() {
        let mut fields = extract(json!({
            "code": "DE",
            "tags": ["fast", 3, null, "  ", " live "],
            "codes": ["au", "AU", 7, " ca "]
        }))
        .unwrap();

        assert_eq!(fields.list("tags"), vec!["fast", "live"]);
        assert_eq!(fields.list("codes"), vec!["AU", "CA"]);
    }

    #[test]
    fn test_non_array_list_reads_empty() {
        let mut fields = extract(json!({ "code": "DE", "tags": "fast" })).unwrap();
        assert!(fields.list("tags").is_empty());
    }

    #[test]
    fn test_faq_accepts_shorthand_and_drops_incomplete() {
        let mut fields = extract(json!({
            "code": "DE",
            "faq": [
                { "question": "Is it legal?", "answer": "Yes." },
                { "q": "Payout speed?", "a": "24h" },
                { "question": "No answer" },
                "not an object"
            ]
        }))
        .unwrap();

        let faq = fields.faq("faq");
        assert_eq!(faq.len(), 2);
        assert_eq!(faq[1].question, "Payout speed?");
        assert_eq!(faq[1].answer, "24h");
    }

    #[test]
    fn test_object_kind_ignores_scalars() {
        let mut fields = extract(json!({ "code": "DE", "meta": "x" })).unwrap();
        assert_eq!(fields.json("meta"), None);

        let mut fields = extract(json!({ "code": "DE", "meta": { "a": 1 } })).unwrap();
        assert_eq!(fields.json("meta"), Some(json!({ "a": 1 })));
    }
}
