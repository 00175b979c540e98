use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use user_search::commands;
use user_search::logging::init_tracing;
use user_search::{AppConfig, Dependencies};
use user_search_shared::{Page, UserUpdate};

#[derive(Parser)]
#[command(name = "user-search")]
#[command(about = "Index and query user documents in OpenSearch", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// OpenSearch URL (overrides OPENSEARCH_URL)
    #[arg(long, global = true)]
    opensearch_url: Option<String>,

    /// Collection name (overrides SEARCH_COLLECTION)
    #[arg(long, global = true)]
    collection: Option<String>,

    /// Maximum in-flight index requests (overrides LOADER_MAX_CONCURRENCY)
    #[arg(long, global = true)]
    max_concurrency: Option<usize>,
}

/// Pagination flags shared by the search commands.
#[derive(clap::Args)]
struct PageArgs {
    /// Number of hits to skip
    #[arg(long)]
    offset: Option<u64>,

    /// Maximum number of hits to return
    #[arg(long)]
    limit: Option<u64>,
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Page {
            offset: args.offset,
            limit: args.limit,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate synthetic users and load them into the collection
    Seed {
        /// Number of users to generate
        #[arg(long, default_value = "1000")]
        count: u64,
    },
    /// Full-text search on descriptions
    SearchDescription {
        #[arg(long)]
        text: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Prefix search on names
    SearchName {
        #[arg(long)]
        prefix: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Exact-term search on descriptions
    SearchTerms {
        /// Comma separated values
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Update fields of an existing user
    Update {
        #[arg(long)]
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a user
    Delete {
        #[arg(long)]
        id: u64,
    },
    /// Report whether the collection exists
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.opensearch_url {
        config.opensearch_url = url;
    }
    if let Some(collection) = cli.collection {
        config.collection = collection;
    }
    if let Some(max_concurrency) = cli.max_concurrency {
        config.max_concurrency = Some(max_concurrency);
    }

    init_tracing(config.log_format);

    let deps = Dependencies::new(&config).await.map_err(|e| {
        error!(error = %e, "Failed to initialize dependencies");
        e
    })?;

    match cli.command {
        Commands::Seed { count } => {
            info!(count = count, "Seeding collection");
            commands::seed(&deps, count).await?;
        }
        Commands::SearchDescription { text, page } => {
            commands::search_description(&deps, &text, page.into()).await?;
        }
        Commands::SearchName { prefix, page } => {
            commands::search_name(&deps, &prefix, page.into()).await?;
        }
        Commands::SearchTerms { values, page } => {
            commands::search_terms(&deps, &values, page.into()).await?;
        }
        Commands::Update {
            id,
            name,
            age,
            address,
            description,
        } => {
            let changes = UserUpdate {
                name,
                age,
                address,
                description,
            };
            commands::update(&deps, id, changes).await?;
        }
        Commands::Delete { id } => {
            commands::delete(&deps, id).await?;
        }
        Commands::Check => {
            let exists = commands::check(&deps).await?;
            println!(
                "Collection '{}' {}",
                deps.collection(),
                if exists { "exists" } else { "does not exist" }
            );
        }
    }

    Ok(())
}
