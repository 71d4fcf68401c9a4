use std::sync::Arc;
use tracing::{debug, warn};

use crate::diagnostics::LoadReport;
use crate::domain::{Casino, Country, Guide};
use crate::error::Result;
use crate::loader::{load_collection, Loaded};
use crate::normalize::Record;
use crate::resolve::{self, LinkReport};
use crate::storage::ContentSource;

/// Query surface over an injected content source.
///
/// Holds no records: every call reads and normalizes the source again, so
/// concurrent callers never share collection state.
#[derive(Clone)]
pub struct Catalog {
    source: Arc<dyn ContentSource>,
}

impl Catalog {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// Loads one collection together with its diagnostics
    pub async fn load<T: Record>(&self) -> Result<Loaded<T>> {
        load_collection::<T>(self.source.as_ref()).await
    }

    /// All valid records of `T`, in source order
    pub async fn list<T: Record>(&self) -> Result<Vec<T>> {
        Ok(self.load::<T>().await?.into_records())
    }

    /// Record of `T` by slug or code, case-insensitive
    pub async fn get<T: Record>(&self, key: &str) -> Result<Option<T>> {
        let records = self.list::<T>().await?;
        let found = resolve::find_by_key(&records, key).cloned();
        if found.is_none() {
            debug!("No {} found for key '{}'", T::KIND, key);
        }
        Ok(found)
    }

    pub async fn casinos(&self) -> Result<Vec<Casino>> {
        let mut casinos = self.list::<Casino>().await?;
        resolve::sort_casinos(&mut casinos);
        Ok(casinos)
    }

    pub async fn countries(&self) -> Result<Vec<Country>> {
        let mut countries = self.list::<Country>().await?;
        resolve::sort_countries(&mut countries);
        Ok(countries)
    }

    pub async fn guides(&self) -> Result<Vec<Guide>> {
        let mut guides = self.list::<Guide>().await?;
        resolve::sort_guides(&mut guides);
        Ok(guides)
    }

    pub async fn casino_by_slug(&self, slug: &str) -> Result<Option<Casino>> {
        self.get::<Casino>(slug).await
    }

    pub async fn country_by_code(&self, code: &str) -> Result<Option<Country>> {
        self.get::<Country>(code).await
    }

    pub async fn guide_by_slug(&self, slug: &str) -> Result<Option<Guide>> {
        self.get::<Guide>(slug).await
    }

    /// Casinos available in a country, best rated first
    pub async fn casinos_in_country(&self, code: &str) -> Result<Vec<Casino>> {
        let casinos = self.casinos().await?;
        Ok(resolve::casinos_in_country(&casinos, code)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Countries a casino is available in that exist in the country collection
    pub async fn countries_for_casino(&self, slug: &str) -> Result<Vec<Country>> {
        let Some(casino) = self.casino_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        let countries = self.countries().await?;
        Ok(resolve::countries_for_casino(&countries, &casino)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn guides_for_casino(&self, slug: &str) -> Result<Vec<Guide>> {
        let guides = self.guides().await?;
        Ok(resolve::guides_for_casino(&guides, slug)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn guides_for_country(&self, code: &str) -> Result<Vec<Guide>> {
        let guides = self.guides().await?;
        Ok(resolve::guides_for_country(&guides, code)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn casinos_for_guide(&self, slug: &str) -> Result<Vec<Casino>> {
        let Some(guide) = self.guide_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        let casinos = self.list::<Casino>().await?;
        Ok(resolve::casinos_for_guide(&casinos, &guide)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn countries_for_guide(&self, slug: &str) -> Result<Vec<Country>> {
        let Some(guide) = self.guide_by_slug(slug).await? else {
            return Ok(Vec::new());
        };
        let countries = self.list::<Country>().await?;
        Ok(resolve::countries_for_guide(&countries, &guide)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Unresolved references across all three collections
    pub async fn validate_links(&self) -> Result<LinkReport> {
        let (casinos, countries, guides) = tokio::try_join!(
            self.list::<Casino>(),
            self.list::<Country>(),
            self.list::<Guide>(),
        )?;
        let report = resolve::validate_links(&casinos, &countries, &guides);
        if !report.is_clean() {
            warn!("{} dangling content links", report.dangling_count());
        }
        Ok(report)
    }

    /// Load diagnostics for every collection, casinos first
    pub async fn reports(&self) -> Result<Vec<LoadReport>> {
        let (casinos, countries, guides) = tokio::try_join!(
            self.load::<Casino>(),
            self.load::<Country>(),
            self.load::<Guide>(),
        )?;
        Ok(vec![casinos.report, countries.report, guides.report])
    }
}
