// Typed content records produced by the normalizers
pub mod casino;
pub mod country;
pub mod guide;

pub use casino::{Assets, Casino, Screenshot};
pub use country::Country;
pub use guide::Guide;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants;
use crate::normalize::fields::KeyCase;

/// The three content collections of the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Casino,
    Country,
    Guide,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Casino, EntityKind::Country, EntityKind::Guide];

    /// Collection name, used as file stem, directory name and URL segment
    pub fn collection_name(self) -> &'static str {
        match self {
            EntityKind::Casino => constants::CASINOS,
            EntityKind::Country => constants::COUNTRIES,
            EntityKind::Guide => constants::GUIDES,
        }
    }

    /// Canonical case of this collection's key (slug or country code)
    pub fn key_case(self) -> KeyCase {
        match self {
            EntityKind::Country => KeyCase::Upper,
            EntityKind::Casino | EntityKind::Guide => KeyCase::Lower,
        }
    }

    pub fn canonical_key(self, raw: &str) -> String {
        self.key_case().apply(raw)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Casino => "casino",
            EntityKind::Country => "country",
            EntityKind::Guide => "guide",
        };
        f.write_str(label)
    }
}

/// One question/answer pair shown in FAQ sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}
