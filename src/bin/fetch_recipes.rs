//! Command-line front end: fetch recipes, filter them and print them by cuisine.
//!
//! ```bash
//! cargo run --features app --bin fetch-recipes -- --search tart --scope name
//! ```

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use fetch_recipes::{
    recompute, suggestions, Endpoint, PreviewRecipeService, RecipeProvider, RecipeService,
    SearchScope, ServiceConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fetch-recipes")]
#[command(about = "Fetch recipes and list them grouped by cuisine", long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(short, long)]
    config: Option<Utf8PathBuf>,

    /// Override the recipe host
    #[arg(long)]
    base_url: Option<String>,

    /// Which endpoint to request
    #[arg(short, long, value_enum, default_value_t = EndpointArg::Recipes)]
    endpoint: EndpointArg,

    /// Only show recipes matching this text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Fields the search text is matched against
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    scope: ScopeArg,

    /// Serve canned recipes instead of calling the host
    #[arg(long)]
    preview: bool,

    /// Print the filtered recipes as JSON
    #[arg(long)]
    json: bool,

    /// Print search suggestions instead of recipes
    #[arg(long)]
    suggest: bool,

    /// Log requests and decoding details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EndpointArg {
    Recipes,
    Malformed,
    Empty,
}

impl From<EndpointArg> for Endpoint {
    fn from(arg: EndpointArg) -> Self {
        match arg {
            EndpointArg::Recipes => Endpoint::Recipes,
            EndpointArg::Malformed => Endpoint::MalformedData,
            EndpointArg::Empty => Endpoint::EmptyData,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    All,
    Name,
    Cuisine,
}

impl From<ScopeArg> for SearchScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::All => SearchScope::All,
            ScopeArg::Name => SearchScope::Name,
            ScopeArg::Cuisine => SearchScope::Cuisine,
        }
    }
}

fn load_config(cli: &Cli) -> Result<ServiceConfig> {
    let config = match &cli.config {
        Some(path) => ServiceConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => ServiceConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "fetch_recipes=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let provider: Box<dyn RecipeProvider> = if cli.preview {
        Box::new(PreviewRecipeService::new())
    } else {
        let service = RecipeService::new(load_config(&cli)?)?;
        tracing::info!("Using recipe host {}", service.base_url());
        Box::new(service)
    };

    let recipes = provider
        .fetch_recipes(cli.endpoint.into())
        .await
        .context("Failed to fetch recipes")?;

    if cli.suggest {
        for suggestion in suggestions(&recipes, &cli.search) {
            println!("{suggestion}");
        }
        return Ok(());
    }

    let sections = recompute(&recipes, &cli.search, cli.scope.into());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sections.filtered)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!("No recipes match {:?}", cli.search);
        return Ok(());
    }

    for (cuisine, recipes) in sections.iter() {
        println!("{cuisine}");
        for recipe in recipes {
            println!("  {}", recipe.name());
            for link in recipe.links() {
                println!("    {}: {}", link.kind.title(), link.url);
            }
        }
    }

    Ok(())
}
