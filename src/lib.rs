pub mod catalog;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod resolve;
pub mod seo;
pub mod site;
pub mod storage;

pub use catalog::Catalog;
pub use domain::{Casino, Country, EntityKind, FaqEntry, Guide};
pub use error::{ContentError, Result};
pub use normalize::{normalize, try_normalize, Record};
