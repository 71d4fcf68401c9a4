use serde::Serialize;

use super::{EntityKind, FaqEntry};
use crate::normalize::fields::{FieldKind, FieldSpec, Fields, KeyCase};
use crate::normalize::{Record, Rejection};

/// An editorial guide, cross-linked to casinos and countries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Casino slugs, lowercase
    pub related_casinos: Vec<String>,
    /// Country codes, uppercase
    pub related_countries: Vec<String>,
    pub faq: Vec<FaqEntry>,
}

const GUIDE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("slug", FieldKind::Key(KeyCase::Lower)),
    FieldSpec::optional("title", FieldKind::Text),
    FieldSpec::optional("description", FieldKind::Text),
    FieldSpec::optional("content", FieldKind::Text),
    FieldSpec::optional("relatedCasinos", FieldKind::KeyList(KeyCase::Lower)),
    FieldSpec::optional("relatedCountries", FieldKind::KeyList(KeyCase::Upper)),
    FieldSpec::optional("faq", FieldKind::FaqList),
];

impl Record for Guide {
    const KIND: EntityKind = EntityKind::Guide;
    const FIELDS: &'static [FieldSpec] = GUIDE_FIELDS;

    fn from_fields(mut fields: Fields) -> Result<Self, Rejection> {
        let slug = fields.required_text("slug")?;
        Ok(Guide {
            title: fields.text("title").unwrap_or_else(|| slug.clone()),
            slug,
            description: fields.text("description"),
            content: fields.text("content"),
            related_casinos: fields.list("relatedCasinos"),
            related_countries: fields.list("relatedCountries"),
            faq: fields.faq("faq"),
        })
    }

    fn key(&self) -> &str {
        &self.slug
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}

impl Guide {
    pub fn mentions_casino(&self, slug: &str) -> bool {
        let slug = EntityKind::Casino.canonical_key(slug);
        self.related_casinos.iter().any(|s| *s == slug)
    }

    pub fn mentions_country(&self, code: &str) -> bool {
        let code = EntityKind::Country.canonical_key(code);
        self.related_countries.iter().any(|c| *c == code)
    }
}
