//! Point lookups and relation filters over loaded collections.
//!
//! Every comparison goes through the collection's canonical key case, so
//! `"us"`, `"US"` and `" Us "` all address the same country.

pub mod links;
pub mod sort;

pub use links::{validate_links, DanglingLinks, LinkReport};
pub use sort::{sort_by_display_name, sort_casinos, sort_countries, sort_guides};

use crate::domain::{Casino, Country, Guide};
use crate::normalize::Record;

/// Exact, case-insensitive match on the record key
pub fn find_by_key<'a, T: Record>(records: &'a [T], key: &str) -> Option<&'a T> {
    let key = T::KIND.canonical_key(key);
    if key.is_empty() {
        return None;
    }
    records.iter().find(|record| record.key() == key)
}

pub fn find_casino<'a>(casinos: &'a [Casino], slug: &str) -> Option<&'a Casino> {
    find_by_key(casinos, slug)
}

pub fn find_country<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    find_by_key(countries, code)
}

pub fn find_guide<'a>(guides: &'a [Guide], slug: &str) -> Option<&'a Guide> {
    find_by_key(guides, slug)
}

/// Casinos whose `countries` list contains `code`
pub fn casinos_in_country<'a>(casinos: &'a [Casino], code: &str) -> Vec<&'a Casino> {
    casinos.iter().filter(|c| c.is_available_in(code)).collect()
}

/// Countries a casino lists that exist in the collection, in collection order
pub fn countries_for_casino<'a>(countries: &'a [Country], casino: &Casino) -> Vec<&'a Country> {
    countries
        .iter()
        .filter(|country| casino.countries.contains(&country.code))
        .collect()
}

pub fn guides_for_casino<'a>(guides: &'a [Guide], slug: &str) -> Vec<&'a Guide> {
    guides.iter().filter(|g| g.mentions_casino(slug)).collect()
}

pub fn guides_for_country<'a>(guides: &'a [Guide], code: &str) -> Vec<&'a Guide> {
    guides.iter().filter(|g| g.mentions_country(code)).collect()
}

/// Casinos a guide links to that exist, in the guide's order
pub fn casinos_for_guide<'a>(casinos: &'a [Casino], guide: &Guide) -> Vec<&'a Casino> {
    guide
        .related_casinos
        .iter()
        .filter_map(|slug| find_casino(casinos, slug))
        .collect()
}

/// Countries a guide links to that exist, in the guide's order
pub fn countries_for_guide<'a>(countries: &'a [Country], guide: &Guide) -> Vec<&'a Country> {
    guide
        .related_countries
        .iter()
        .filter_map(|code| find_country(countries, code))
        .collect()
}
