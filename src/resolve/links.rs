use serde::Serialize;
use std::fmt;

use super::{find_casino, find_country};
use crate::domain::{Casino, Country, EntityKind, Guide};

/// References from one record that do not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingLinks {
    pub kind: EntityKind,
    pub key: String,
    pub missing_casinos: Vec<String>,
    pub missing_countries: Vec<String>,
}

impl DanglingLinks {
    fn is_empty(&self) -> bool {
        self.missing_casinos.is_empty() && self.missing_countries.is_empty()
    }
}

/// Every unresolved cross-reference in the content set. Diagnostic only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub guides: Vec<DanglingLinks>,
    pub casinos: Vec<DanglingLinks>,
}

impl LinkReport {
    pub fn is_clean(&self) -> bool {
        self.guides.is_empty() && self.casinos.is_empty()
    }

    pub fn dangling_count(&self) -> usize {
        self.guides
            .iter()
            .chain(&self.casinos)
            .map(|d| d.missing_casinos.len() + d.missing_countries.len())
            .sum()
    }
}

impl fmt::Display for LinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return f.write_str("all links resolve");
        }
        for entry in self.guides.iter().chain(&self.casinos) {
            write!(f, "{} {}:", entry.kind, entry.key)?;
            if !entry.missing_casinos.is_empty() {
                write!(f, " casinos [{}]", entry.missing_casinos.join(", "))?;
            }
            if !entry.missing_countries.is_empty() {
                write!(f, " countries [{}]", entry.missing_countries.join(", "))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Cross-checks guide and casino references against the live collections
pub fn validate_links(casinos: &[Casino], countries: &[Country], guides: &[Guide]) -> LinkReport {
    let missing_countries = |codes: &[String]| -> Vec<String> {
        codes
            .iter()
            .filter(|code| find_country(countries, code).is_none())
            .cloned()
            .collect()
    };

    let guides = guides
        .iter()
        .map(|guide| DanglingLinks {
            kind: EntityKind::Guide,
            key: guide.slug.clone(),
            missing_casinos: guide
                .related_casinos
                .iter()
                .filter(|slug| find_casino(casinos, slug).is_none())
                .cloned()
                .collect(),
            missing_countries: missing_countries(guide.related_countries.as_slice()),
        })
        .filter(|d| !d.is_empty())
        .collect();

    let casinos = casinos
        .iter()
        .map(|casino| DanglingLinks {
            kind: EntityKind::Casino,
            key: casino.slug.clone(),
            missing_casinos: Vec::new(),
            missing_countries: missing_countries(casino.countries.as_slice()),
        })
        .filter(|d| !d.is_empty())
        .collect();

    LinkReport { guides, casinos }
}
