use serde::Serialize;
use serde_json::{Map, Value};

use super::{EntityKind, FaqEntry};
use crate::constants::MAX_RATING;
use crate::normalize::fields::{first_text, non_empty_str, FieldKind, FieldSpec, Fields, KeyCase};
use crate::normalize::{Record, Rejection};

/// A reviewed casino
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Casino {
    /// Stable identifier; the slug when the source has none
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_deposit: Option<f64>,
    /// ISO-2 codes where the casino accepts players
    pub countries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub faq: Vec<FaqEntry>,

    // Extended review blocks, kept opaque
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonuses: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_links: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
}

/// Images attached to a casino review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og: Option<String>,
    pub screenshots: Vec<Screenshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screenshot {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl Assets {
    /// Reads an `assets` object; `None` when nothing usable is inside.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let screenshots = object
            .get("screenshots")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Screenshot::from_value).collect())
            .unwrap_or_default();

        let assets = Assets {
            logo: first_text(object, &["logo"]),
            hero: first_text(object, &["hero", "heroImage"]),
            og: first_text(object, &["og", "ogImage"]),
            screenshots,
        };
        (!assets.is_empty()).then_some(assets)
    }

    pub fn is_empty(&self) -> bool {
        self.logo.is_none()
            && self.hero.is_none()
            && self.og.is_none()
            && self.screenshots.is_empty()
    }
}

impl Screenshot {
    /// Accepts a bare URL string or `{src|url, alt?}`
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(src) = non_empty_str(value) {
            return Some(Screenshot {
                src: src.to_string(),
                alt: None,
            });
        }
        let object: &Map<String, Value> = value.as_object()?;
        Some(Screenshot {
            src: first_text(object, &["src", "url"])?,
            alt: first_text(object, &["alt"]),
        })
    }
}

const CASINO_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("slug", FieldKind::Key(KeyCase::Lower)),
    FieldSpec::required("name", FieldKind::Text),
    FieldSpec::optional("id", FieldKind::Text),
    FieldSpec::optional("rating", FieldKind::Number { min: 0.0, max: MAX_RATING }),
    FieldSpec::optional("minDeposit", FieldKind::Number { min: 0.0, max: f64::MAX }),
    FieldSpec::optional("countries", FieldKind::KeyList(KeyCase::Upper))
        .aliases(&["countryCodes"]),
    FieldSpec::optional("description", FieldKind::Text),
    FieldSpec::optional("pros", FieldKind::TextList),
    FieldSpec::optional("cons", FieldKind::TextList),
    FieldSpec::optional("faq", FieldKind::FaqList),
    FieldSpec::optional("overview", FieldKind::Object),
    FieldSpec::optional("payments", FieldKind::Object),
    FieldSpec::optional("bonuses", FieldKind::Object),
    FieldSpec::optional("mobile", FieldKind::Object),
    FieldSpec::optional("safety", FieldKind::Object),
    FieldSpec::optional("content", FieldKind::Structured),
    FieldSpec::optional("internalLinks", FieldKind::Structured),
    FieldSpec::optional("assets", FieldKind::Object),
];

impl Record for Casino {
    const KIND: EntityKind = EntityKind::Casino;
    const FIELDS: &'static [FieldSpec] = CASINO_FIELDS;

    fn from_fields(mut fields: Fields) -> Result<Self, Rejection> {
        let slug = fields.required_text("slug")?;
        let name = fields.required_text("name")?;
        Ok(Casino {
            id: fields.text("id").unwrap_or_else(|| slug.clone()),
            rating: fields.number("rating"),
            min_deposit: fields.number("minDeposit"),
            countries: fields.list("countries"),
            description: fields.text("description"),
            pros: fields.list("pros"),
            cons: fields.list("cons"),
            faq: fields.faq("faq"),
            overview: fields.json("overview"),
            payments: fields.json("payments"),
            bonuses: fields.json("bonuses"),
            mobile: fields.json("mobile"),
            safety: fields.json("safety"),
            content: fields.json("content"),
            internal_links: fields.json("internalLinks"),
            assets: fields.json("assets").as_ref().and_then(Assets::from_value),
            slug,
            name,
        })
    }

    fn key(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Casino {
    /// Whether `code` is among the casino's countries, compared case-insensitively
    pub fn is_available_in(&self, code: &str) -> bool {
        let code = EntityKind::Country.canonical_key(code);
        self.countries.iter().any(|c| *c == code)
    }

    /// Extended block by its source field name (`payments`, `internalLinks`, ...)
    pub fn block(&self, name: &str) -> Option<&Value> {
        match name {
            "overview" => self.overview.as_ref(),
            "payments" => self.payments.as_ref(),
            "bonuses" => self.bonuses.as_ref(),
            "mobile" => self.mobile.as_ref(),
            "safety" => self.safety.as_ref(),
            "content" => self.content.as_ref(),
            "internalLinks" => self.internal_links.as_ref(),
            _ => None,
        }
    }

    /// Strings under `block.field`, e.g. `payments.methods`; empty on any shape mismatch
    pub fn block_strings(&self, block: &str, field: &str) -> Vec<String> {
        self.block(block)
            .and_then(|value| value.get(field))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(non_empty_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Rating with one decimal, only for positive ratings
    pub fn display_rating(&self) -> Option<String> {
        self.rating.filter(|r| *r > 0.0).map(|r| format!("{:.1}", r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, try_normalize};
    use serde_json::json;

    #[test]
    fn test_minimal_casino_has_no_optional_fields() {
        let casino: Casino =
            normalize(&json!({ "slug": "royal-spin", "name": "Royal Spin" })).unwrap();

        assert_eq!(casino.slug, "royal-spin");
        assert_eq!(casino.name, "Royal Spin");
        assert_eq!(casino.id, "royal-spin");
        assert_eq!(casino.rating, None);
        assert_eq!(casino.min_deposit, None);
        assert_eq!(casino.description, None);
        assert!(casino.countries.is_empty());
        assert!(casino.faq.is_empty());
        assert_eq!(casino.assets, None);
    }

    #[test]
    fn test_casino_requires_slug_and_name() {
        assert_eq!(
            try_normalize::<Casino>(&json!({ "name": "No Slug" })).unwrap_err(),
            Rejection::MissingField("slug")
        );
        assert_eq!(
            try_normalize::<Casino>(&json!({ "slug": "no-name" })).unwrap_err(),
            Rejection::MissingField("name")
        );
        assert_eq!(try_normalize::<Casino>(&json!(null)).unwrap_err(), Rejection::NotAnObject);
        assert_eq!(try_normalize::<Casino>(&json!(["slug"])).unwrap_err(), Rejection::NotAnObject);
    }

    #[test]
    fn test_casino_canonicalizes_keys() {
        let casino: Casino = normalize(&json!({
            "slug": " Royal-Spin ",
            "name": "Royal Spin",
            "countryCodes": ["au", "ca", "AU"]
        }))
        .unwrap();

        assert_eq!(casino.slug, "royal-spin");
        assert_eq!(casino.countries, vec!["AU", "CA"]);
        assert!(casino.is_available_in("ca"));
        assert!(!casino.is_available_in("US"));
    }

    #[test]
    fn test_casino_rating_outside_scale_is_omitted() {
        let casino: Casino = normalize(&json!({ "slug": "a", "name": "A", "rating": 9 })).unwrap();
        assert_eq!(casino.rating, None);
        assert_eq!(casino.display_rating(), None);

        let casino: Casino =
            normalize(&json!({ "slug": "a", "name": "A", "rating": 4.75 })).unwrap();
        assert_eq!(casino.display_rating().as_deref(), Some("4.8"));
    }

    #[test]
    fn test_assets_screenshots_validated_per_element() {
        let casino: Casino = normalize(&json!({
            "slug": "a",
            "name": "A",
            "assets": {
                "logo": "/img/a/logo.png",
                "screenshots": [
                    "/img/a/1.png",
                    { "src": "/img/a/2.png", "alt": "Lobby" },
                    { "alt": "missing src" },
                    12
                ]
            }
        }))
        .unwrap();

        let assets = casino.assets.unwrap();
        assert_eq!(assets.logo.as_deref(), Some("/img/a/logo.png"));
        assert_eq!(assets.screenshots.len(), 2);
        assert_eq!(assets.screenshots[1].alt.as_deref(), Some("Lobby"));
    }

    #[test]
    fn test_empty_assets_block_is_dropped() {
        let casino: Casino =
            normalize(&json!({ "slug": "a", "name": "A", "assets": { "screenshots": [] } }))
                .unwrap();
        assert_eq!(casino.assets, None);
    }

    #[test]
    fn test_block_strings_is_defensive() {
        let casino: Casino = normalize(&json!({
            "slug": "a",
            "name": "A",
            "payments": { "methods": ["Visa", 5, "Skrill"], "withdrawal": "24h" },
            "mobile": "not an object"
        }))
        .unwrap();

        assert_eq!(casino.block_strings("payments", "methods"), vec!["Visa", "Skrill"]);
        assert!(casino.block_strings("payments", "withdrawal").is_empty());
        assert!(casino.block_strings("mobile", "apps").is_empty());
        assert_eq!(casino.mobile, None);
    }

    #[test]
    fn test_normalized_casino_is_a_fixed_point() {
        let casino: Casino = normalize(&json!({
            "id": "c-1",
            "slug": "Royal-Spin",
            "name": " Royal Spin ",
            "rating": 4.5,
            "minDeposit": 10,
            "countries": ["au", 3, "nz"],
            "description": "Fast payouts",
            "pros": ["Crypto"],
            "cons": [],
            "faq": [{ "q": "Licensed?", "a": "Yes" }],
            "payments": { "methods": ["Visa"] },
            "internalLinks": [{ "href": "/guides/x" }],
            "assets": { "hero": "/h.png", "screenshots": [{ "src": "/1.png" }] }
        }))
        .unwrap();

        let again: Casino = normalize(&serde_json::to_value(&casino).unwrap()).unwrap();
        assert_eq!(again, casino);
    }
}
