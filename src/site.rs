use chrono::{DateTime, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{self, DEFAULT_SITE_DESCRIPTION, DEFAULT_SITE_NAME, DEFAULT_SITE_URL};
use crate::domain::{Casino, Country, Guide};

static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://").expect("absolute URL pattern is valid")
});

/// Public identity of the site
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub url: String,
    pub name: String,
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            name: DEFAULT_SITE_NAME.to_string(),
            description: DEFAULT_SITE_DESCRIPTION.to_string(),
        }
    }
}

impl SiteConfig {
    /// Site URL without trailing slashes
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// Absolute URL for `path`; already-absolute URLs are returned unchanged
    pub fn absolute_url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url().to_string();
        }
        if ABSOLUTE_URL.is_match(path) {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        }
    }
}

pub fn casino_path(casino: &Casino) -> String {
    format!("/{}/{}", constants::CASINOS, casino.slug)
}

pub fn country_path(country: &Country) -> String {
    format!("/{}/{}", constants::COUNTRIES, country.code)
}

pub fn guide_path(guide: &Guide) -> String {
    format!("/{}/{}", constants::GUIDES, guide.slug)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
}

/// Static routes first, then every casino, country and guide page
pub fn build_sitemap(
    site: &SiteConfig,
    casinos: &[Casino],
    countries: &[Country],
    guides: &[Guide],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let static_routes = std::iter::once("/".to_string()).chain(
        constants::get_collections()
            .into_iter()
            .map(|collection| format!("/{}", collection)),
    );

    static_routes
        .chain(casinos.iter().map(casino_path))
        .chain(countries.iter().map(country_path))
        .chain(guides.iter().map(guide_path))
        .map(|path| SitemapEntry {
            url: site.absolute_url(&path),
            last_modified: now,
        })
        .collect()
}

pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Allow-all robots policy pointing at the sitemap
pub fn render_robots(site: &SiteConfig) -> String {
    format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}\n",
        site.absolute_url("/sitemap.xml")
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use chrono::TimeZone;
    use serde_json::json;

    fn site() -> SiteConfig {
        SiteConfig {
            url: "https://example.com/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_absolute_url() {
        let site = site();
        assert_eq!(site.absolute_url(""), "https://example.com");
        assert_eq!(site.absolute_url("/casinos"), "https://example.com/casinos");
        assert_eq!(site.absolute_url("guides/x"), "https://example.com/guides/x");
        assert_eq!(
            site.absolute_url("HTTPS://cdn.example.com/a.png"),
            "HTTPS://cdn.example.com/a.png"
        );
    }

    #[test]
    fn test_sitemap_lists_static_routes_then_records() {
        let casinos: Vec<Casino> =
            vec![normalize(&json!({ "slug": "royal-spin", "name": "Royal Spin" })).unwrap()];
        let countries: Vec<Country> =
            vec![normalize(&json!({ "code": "au", "name": "Australia" })).unwrap()];
        let guides: Vec<Guide> =
            vec![normalize(&json!({ "slug": "payouts", "title": "Payouts" })).unwrap()];
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        let entries = build_sitemap(&site(), &casinos, &countries, &guides, now);
        let urls: Vec<&str> = entries.iter().map(|e| e.url.as_str()).collect();

        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.com/casinos",
                "https://example.com/countries",
                "https://example.com/guides",
                "https://example.com/casinos/royal-spin",
                "https://example.com/countries/AU",
                "https://example.com/guides/payouts",
            ]
        );
        assert!(entries.iter().all(|e| e.last_modified == now));
    }

    #[test]
    fn test_sitemap_xml_escapes_urls() {
        let entries = vec![SitemapEntry {
            url: "https://example.com/?a=1&b=2".to_string(),
            last_modified: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }];
        let xml = render_sitemap_xml(&entries);
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2026-01-02T03:04:05Z</lastmod>"));
    }

    #[test]
    fn test_robots_points_at_sitemap() {
        let robots = render_robots(&site());
        assert!(robots.starts_with("User-agent: *\nAllow: /\n"));
        assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml\n"));
    }
}
