//! JSON-LD structured data, page metadata and Open Graph image URLs derived
//! from content records.

use serde::Serialize;
use serde_json::{json, Value};
use url::form_urlencoded;

use crate::domain::{Casino, Country, EntityKind, FaqEntry, Guide};
use crate::normalize::Record;
use crate::site::{self, SiteConfig};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// `BreadcrumbList` for a trail of `(name, path)` pairs, Home implied first
pub fn breadcrumb_list(site: &SiteConfig, trail: &[(&str, &str)]) -> Value {
    let items: Vec<Value> = std::iter::once(("Home", ""))
        .chain(trail.iter().copied())
        .enumerate()
        .map(|(index, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": name,
                "item": site.absolute_url(path),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// Breadcrumbs for a collection index page (`/casinos`, ...)
pub fn collection_breadcrumbs(site: &SiteConfig, kind: EntityKind) -> Value {
    let path = format!("/{}", kind.collection_name());
    breadcrumb_list(site, &[(collection_title(kind), path.as_str())])
}

/// Home, collection index, then the record itself
pub fn record_breadcrumbs<T: Record>(site: &SiteConfig, record: &T, path: &str) -> Value {
    let index = format!("/{}", T::KIND.collection_name());
    breadcrumb_list(
        site,
        &[
            (collection_title(T::KIND), index.as_str()),
            (record.display_name(), path),
        ],
    )
}

pub fn casino_breadcrumbs(site: &SiteConfig, casino: &Casino) -> Value {
    record_breadcrumbs(site, casino, &site::casino_path(casino))
}

pub fn country_breadcrumbs(site: &SiteConfig, country: &Country) -> Value {
    record_breadcrumbs(site, country, &site::country_path(country))
}

pub fn guide_breadcrumbs(site: &SiteConfig, guide: &Guide) -> Value {
    record_breadcrumbs(site, guide, &site::guide_path(guide))
}

/// `ItemList` of `(name, path)` pairs in display order
pub fn item_list(site: &SiteConfig, items: &[(&str, String)]) -> Value {
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(index, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": index + 1,
                "name": name,
                "url": site.absolute_url(path),
            })
        })
        .collect();

    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "ItemList",
        "itemListElement": elements,
    })
}

/// `ItemList` of records in the order given, linked through `path`
pub fn record_item_list<T: Record>(
    site: &SiteConfig,
    records: &[T],
    path: impl Fn(&T) -> String,
) -> Value {
    let items: Vec<(&str, String)> = records
        .iter()
        .map(|record| (record.display_name(), path(record)))
        .collect();
    item_list(site, &items)
}

pub fn casino_item_list(site: &SiteConfig, casinos: &[Casino]) -> Value {
    record_item_list(site, casinos, site::casino_path)
}

pub fn country_item_list(site: &SiteConfig, countries: &[Country]) -> Value {
    record_item_list(site, countries, site::country_path)
}

pub fn guide_item_list(site: &SiteConfig, guides: &[Guide]) -> Value {
    record_item_list(site, guides, site::guide_path)
}

/// `FAQPage`; `None` for an empty FAQ so pages can skip the script tag
pub fn faq_page(faq: &[FaqEntry]) -> Option<Value> {
    if faq.is_empty() {
        return None;
    }
    let questions: Vec<Value> = faq
        .iter()
        .map(|entry| {
            json!({
                "@type": "Question",
                "name": entry.question,
                "acceptedAnswer": { "@type": "Answer", "text": entry.answer },
            })
        })
        .collect();

    Some(json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "FAQPage",
        "mainEntity": questions,
    }))
}

/// Extra line drawn on an OG card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OgBadge {
    Rating(String),
    Flag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OgImage {
    pub kind: EntityKind,
    pub title: String,
    pub subtitle: String,
    pub badge: Option<OgBadge>,
}

impl OgImage {
    /// Relative `/og?...` URL understood by the image renderer
    pub fn path(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("type", &self.kind.to_string())
            .append_pair("title", &self.title)
            .append_pair("subtitle", &self.subtitle);
        match &self.badge {
            Some(OgBadge::Rating(rating)) => {
                query.append_pair("rating", rating);
            }
            Some(OgBadge::Flag(flag)) => {
                query.append_pair("flag", flag);
            }
            None => {}
        }
        format!("/og?{}", query.finish())
    }
}

/// Title, description, canonical path and OG card of a detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_image: String,
}

impl PageMeta {
    fn new(title: String, description: String, canonical: String, og: OgImage) -> Self {
        PageMeta {
            title,
            description,
            canonical,
            og_image: og.path(),
        }
    }
}

pub fn casino_meta(casino: &Casino) -> PageMeta {
    let title = format!("{} Review", casino.name);
    let description = casino.description.clone().unwrap_or_else(|| {
        format!(
            "Read our review of {}: bonuses, features, and key details.",
            casino.name
        )
    });
    let og = OgImage {
        kind: EntityKind::Casino,
        title: title.clone(),
        subtitle: "Bonuses • Payments • Features".to_string(),
        badge: casino.display_rating().map(OgBadge::Rating),
    };
    PageMeta::new(title, description, site::casino_path(casino), og)
}

pub fn country_meta(country: &Country) -> PageMeta {
    let title = format!("Best Online Casinos in {}", country.name);
    let description = country.description.clone().unwrap_or_else(|| {
        format!(
            "Top online casinos available in {}. Compare options, ratings, and guides.",
            country.name
        )
    });
    let og = OgImage {
        kind: EntityKind::Country,
        title: title.clone(),
        subtitle: format!("Country code: {}", country.code),
        badge: country.flag_emoji().map(OgBadge::Flag),
    };
    PageMeta::new(title, description, site::country_path(country), og)
}

pub fn guide_meta(guide: &Guide) -> PageMeta {
    let title = guide.title.clone();
    let description = guide.description.clone().unwrap_or_else(|| {
        format!(
            "Read our guide: {}. Practical tips, steps, and internal links.",
            title
        )
    });
    let og = OgImage {
        kind: EntityKind::Guide,
        title: title.clone(),
        subtitle: "Step-by-step casino guide".to_string(),
        badge: None,
    };
    PageMeta::new(title, description, site::guide_path(guide), og)
}

fn collection_title(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Casino => "Casinos",
        EntityKind::Country => "Countries",
        EntityKind::Guide => "Guides",
    }
}
