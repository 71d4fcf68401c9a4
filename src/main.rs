use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

use goldstar_content::config::Config;
use goldstar_content::constants::DEFAULT_CONFIG_PATH;
use goldstar_content::storage::{self, Layout};
use goldstar_content::{logging, seo, site, Casino, Catalog, Country, EntityKind, Guide};

#[derive(Parser)]
#[command(name = "goldstar")]
#[command(about = "Gold Star casino directory content tools")]
#[command(version)]
struct Cli {
    /// Path to config.toml
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Content root, overrides the config file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Content layout, overrides the config file
    #[arg(long, global = true, value_enum)]
    layout: Option<LayoutArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a collection sorted for display
    List {
        #[arg(value_enum)]
        collection: Collection,
        /// Print the index page ItemList and BreadcrumbList instead of a table
        #[arg(long)]
        json_ld: bool,
    },
    /// Show one record with its relations and page metadata
    Show {
        #[arg(value_enum)]
        collection: Collection,
        /// Slug or country code, case-insensitive
        key: String,
    },
    /// Report references that do not resolve; fails when any exist
    ValidateLinks,
    /// Print load diagnostics for every collection
    Report,
    /// Print sitemap.xml
    Sitemap,
    /// Print robots.txt
    Robots,
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Casinos,
    Countries,
    Guides,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Aggregate,
    Directory,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Aggregate => Layout::Aggregate,
            LayoutArg::Directory => Layout::Directory,
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn list(catalog: &Catalog, collection: Collection) -> Result<()> {
    match collection {
        Collection::Casinos => {
            for casino in catalog.casinos().await? {
                let rating = casino.display_rating().unwrap_or_else(|| "-".to_string());
                println!("{:<32} ⭐ {:<4} {}", casino.slug, rating, casino.name);
            }
        }
        Collection::Countries => {
            for country in catalog.countries().await? {
                let flag = country.flag_emoji().unwrap_or_default();
                println!("{:<4} {:<3} {}", country.code, flag, country.name);
            }
        }
        Collection::Guides => {
            for guide in catalog.guides().await? {
                println!("{:<32} {}", guide.slug, guide.title);
            }
        }
    }
    Ok(())
}

async fn list_json_ld(catalog: &Catalog, config: &Config, collection: Collection) -> Result<()> {
    let site = &config.site;
    let (kind, item_list) = match collection {
        Collection::Casinos => (
            EntityKind::Casino,
            seo::casino_item_list(site, &catalog.casinos().await?),
        ),
        Collection::Countries => (
            EntityKind::Country,
            seo::country_item_list(site, &catalog.countries().await?),
        ),
        Collection::Guides => (
            EntityKind::Guide,
            seo::guide_item_list(site, &catalog.guides().await?),
        ),
    };
    print_json(&json!({
        "breadcrumbs": seo::collection_breadcrumbs(site, kind),
        "itemList": item_list,
    }))
}

async fn show(catalog: &Catalog, config: &Config, collection: Collection, key: &str) -> Result<()> {
    let site = &config.site;
    match collection {
        Collection::Casinos => {
            let Some(casino) = catalog.casino_by_slug(key).await? else {
                bail!("casino '{}' not found", key);
            };
            let countries: Vec<Country> = catalog.countries_for_casino(&casino.slug).await?;
            let guides: Vec<Guide> = catalog.guides_for_casino(&casino.slug).await?;
            print_json(&json!({
                "casino": casino,
                "countries": countries,
                "guides": guides,
                "meta": seo::casino_meta(&casino),
                "breadcrumbs": seo::casino_breadcrumbs(site, &casino),
                "faq": seo::faq_page(&casino.faq),
            }))
        }
        Collection::Countries => {
            let Some(country) = catalog.country_by_code(key).await? else {
                bail!("country '{}' not found", key);
            };
            let casinos: Vec<Casino> = catalog.casinos_in_country(&country.code).await?;
            let guides: Vec<Guide> = catalog.guides_for_country(&country.code).await?;
            print_json(&json!({
                "country": country,
                "casinos": casinos,
                "guides": guides,
                "meta": seo::country_meta(&country),
                "breadcrumbs": seo::country_breadcrumbs(site, &country),
            }))
        }
        Collection::Guides => {
            let Some(guide) = catalog.guide_by_slug(key).await? else {
                bail!("guide '{}' not found", key);
            };
            let casinos: Vec<Casino> = catalog.casinos_for_guide(&guide.slug).await?;
            let countries: Vec<Country> = catalog.countries_for_guide(&guide.slug).await?;
            print_json(&json!({
                "guide": guide,
                "casinos": casinos,
                "countries": countries,
                "meta": seo::guide_meta(&guide),
                "breadcrumbs": seo::guide_breadcrumbs(site, &guide),
                "faq": seo::faq_page(&guide.faq),
            }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::load_from(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.content.data_dir = dir;
    }
    if let Some(layout) = cli.layout {
        config.content.layout = layout.into();
    }

    let catalog = Catalog::new(storage::open_source(
        config.content.layout,
        &config.content.data_dir,
    ));
    info!(
        layout = %config.content.layout,
        "Opening content from {}",
        catalog.source().describe()
    );

    match cli.command {
        Commands::List {
            collection,
            json_ld: true,
        } => list_json_ld(&catalog, &config, collection).await?,
        Commands::List { collection, .. } => list(&catalog, collection).await?,
        Commands::Show { collection, key } => show(&catalog, &config, collection, &key).await?,
        Commands::ValidateLinks => {
            let report = catalog.validate_links().await?;
            println!("{}", report);
            if !report.is_clean() {
                bail!("{} dangling content links", report.dangling_count());
            }
        }
        Commands::Report => {
            for report in catalog.reports().await? {
                if !report.is_clean() {
                    warn!("{} {} records dropped", report.dropped_count(), report.kind);
                }
                println!("{}", report);
            }
        }
        Commands::Sitemap => {
            let (casinos, countries, guides) =
                tokio::try_join!(catalog.casinos(), catalog.countries(), catalog.guides())?;
            let entries =
                site::build_sitemap(&config.site, &casinos, &countries, &guides, Utc::now());
            print!("{}", site::render_sitemap_xml(&entries));
        }
        Commands::Robots => print!("{}", site::render_robots(&config.site)),
    }
    Ok(())
}
