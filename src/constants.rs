/// Collection names shared by the storage layouts, the CLI and the sitemap
/// These double as the aggregate file stem (`casinos.json`) and the per-record
/// directory name (`casinos/`)
pub const CASINOS: &str = "casinos";
pub const COUNTRIES: &str = "countries";
pub const GUIDES: &str = "guides";

pub const JSON_EXTENSION: &str = "json";

// Site defaults, used when neither config.toml nor the environment provides them
pub const DEFAULT_SITE_URL: &str = "https://ggoldstar.com";
pub const DEFAULT_SITE_NAME: &str = "Gold Star";
pub const DEFAULT_SITE_DESCRIPTION: &str = "Gold Star — casino reviews, countries, and guides.";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

// Environment overrides
pub const SITE_URL_ENV: &str = "SITE_URL";
pub const DATA_DIR_ENV: &str = "CONTENT_DATA_DIR";

/// Upper bound of the editorial rating scale
pub const MAX_RATING: f64 = 5.0;

/// Get all collection names in sitemap order
pub fn get_collections() -> Vec<&'static str> {
    vec![CASINOS, COUNTRIES, GUIDES]
}
