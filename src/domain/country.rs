use serde::Serialize;

use super::EntityKind;
use crate::normalize::fields::{FieldKind, FieldSpec, Fields, KeyCase};
use crate::normalize::{Record, Rejection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO-2 code, uppercase
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

const COUNTRY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("code", FieldKind::Key(KeyCase::Upper)).aliases(&["iso2", "countryCode"]),
    FieldSpec::required("name", FieldKind::Text).aliases(&["title"]),
    FieldSpec::optional("description", FieldKind::Text),
];

impl Record for Country {
    const KIND: EntityKind = EntityKind::Country;
    const FIELDS: &'static [FieldSpec] = COUNTRY_FIELDS;

    fn from_fields(mut fields: Fields) -> Result<Self, Rejection> {
        Ok(Country {
            code: fields.required_text("code")?,
            name: fields.required_text("name")?,
            description: fields.text("description"),
        })
    }

    fn key(&self) -> &str {
        &self.code
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Country {
    /// Regional-indicator flag for two-letter codes, `None` otherwise
    pub fn flag_emoji(&self) -> Option<String> {
        const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

        let code = self.code.as_bytes();
        if code.len() != 2 || !code.iter().all(u8::is_ascii_uppercase) {
            return None;
        }
        code.iter()
            .map(|b| char::from_u32(REGIONAL_INDICATOR_A + u32::from(b - b'A')))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, try_normalize};
    use serde_json::json;

    #[test]
    fn test_country_accepts_alternate_keys() {
        let country: Country = normalize(&json!({ "iso2": "au", "title": "Australia" })).unwrap();
        assert_eq!(country.code, "AU");
        assert_eq!(country.name, "Australia");
        assert_eq!(country.description, None);
    }

    #[test]
    fn test_country_without_name_is_rejected() {
        assert_eq!(
            try_normalize::<Country>(&json!({ "code": "AU", "name": 12 })).unwrap_err(),
            Rejection::WrongType { field: "name", expected: "string" }
        );
    }

    #[test]
    fn test_flag_emoji() {
        let country: Country = normalize(&json!({ "code": "au", "name": "Australia" })).unwrap();
        assert_eq!(country.flag_emoji().as_deref(), Some("🇦🇺"));

        let odd: Country = normalize(&json!({ "code": "EU-1", "name": "Elsewhere" })).unwrap();
        assert_eq!(odd.flag_emoji(), None);
    }

    #[test]
    fn test_normalized_country_is_a_fixed_point() {
        let country: Country = normalize(&json!({
            "countryCode": "nz",
            "name": "New Zealand",
            "description": "Kiwi"
        }))
        .unwrap();
        let again: Country = normalize(&serde_json::to_value(&country).unwrap()).unwrap();
        assert_eq!(again, country);
    }
}
