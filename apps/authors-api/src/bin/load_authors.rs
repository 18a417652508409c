//! Bulk loader: reads authors from a CSV file and inserts them with
//! embeddings generated row by row.
//!
//! ```text
//! load-authors --file data/sample_authors.csv
//! load-authors --file data/sample_authors.csv --force   # truncate first
//! ```

use clap::Parser;
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_authors::{
    AuthorRegistry, CreateAuthor, EmbeddingProvider, OpenAiProvider, PgVectorStore, VectorStore,
};
use migration::Migrator;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "load-authors", about = "Load authors from CSV with generated embeddings")]
struct Args {
    /// CSV file with name,email,bio,expertise columns
    #[arg(long, default_value = "data/sample_authors.csv")]
    file: PathBuf,

    /// Remove existing authors before loading
    #[arg(long)]
    force: bool,
}

#[derive(Debug, Deserialize)]
struct AuthorRow {
    name: String,
    email: String,
    bio: String,
    expertise: String,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let args = Args::parse();

    let mut reader = csv::Reader::from_path(&args.file)
        .map_err(|e| eyre::eyre!("Failed to open {}: {}", args.file.display(), e))?;
    let rows: Vec<AuthorRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(|e| eyre::eyre!("Failed to parse CSV: {}", e))?;

    info!("Loaded {} authors from {}", rows.len(), args.file.display());

    let db_config = <database::postgres::PostgresConfig as core_config::FromEnv>::from_env()?;
    let db = database::postgres::connect_from_config_with_retry(db_config, None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<Migrator>(&db, "load_authors")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let provider = Arc::new(
        OpenAiProvider::from_env().map_err(|e| eyre::eyre!("Provider configuration: {}", e))?,
    );

    let store = Arc::new(PgVectorStore::new(db.clone(), provider.dimension()));

    let existing = store
        .count()
        .await
        .map_err(|e| eyre::eyre!("Count failed: {}", e))?;

    if existing > 0 {
        if args.force {
            warn!("Removing {} existing authors", existing);
            store
                .truncate()
                .await
                .map_err(|e| eyre::eyre!("Truncate failed: {}", e))?;
        } else {
            info!(
                "Store already contains {} authors; use --force to reload",
                existing
            );
            return Ok(());
        }
    }

    let summary_max_tokens = 256;
    let registry = AuthorRegistry::new(
        store,
        provider.clone(),
        provider,
        summary_max_tokens,
    );

    let total = rows.len();
    let mut loaded = 0usize;
    let mut failed = 0usize;

    for (idx, row) in rows.into_iter().enumerate() {
        let input = CreateAuthor {
            name: row.name,
            email: row.email,
            bio: row.bio,
            expertise: row.expertise,
        };
        let name = input.name.clone();

        match registry.create(input).await {
            Ok(author) => {
                loaded += 1;
                info!("[{}/{}] Loaded {} (id {})", idx + 1, total, name, author.id);
            }
            Err(e) => {
                failed += 1;
                error!("[{}/{}] Failed to load {}: {}", idx + 1, total, name, e);
            }
        }
    }

    info!("Done: {} loaded, {} failed", loaded, failed);

    db.close()
        .await
        .map_err(|e| eyre::eyre!("Error closing PostgreSQL: {}", e))?;

    Ok(())
}
