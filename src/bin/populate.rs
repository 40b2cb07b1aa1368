//! Termcomplete - index population entry point
//!
//! Finds all dictionary entries between two concept-code bounds in the
//! eligible semantic types, cleans and dedupes their display terms, and
//! uploads weighted completion documents to the search index.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use termcomplete::clients::{RelationalSource, SearchIndexClient};
use termcomplete::populate;
use termcomplete::Config;

#[derive(Debug, Parser)]
#[command(name = "term-populate", about = "Populate the autocomplete index")]
struct Args {
    /// Lower concept-code bound as bare digits (120000 means C0120000)
    #[arg(long)]
    from: u64,

    /// Upper concept-code bound as bare digits
    #[arg(long)]
    to: u64,

    /// Override the target index name from the configuration
    #[arg(long)]
    index: Option<String>,

    /// Drop and recreate the index before uploading
    #[arg(long, default_value_t = false)]
    recreate: bool,
}

#[tokio::main]
async fn main() -> termcomplete::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.from > args.to {
        return Err(termcomplete::Error::invalid_input(
            "--from must not exceed --to",
        ));
    }

    let config = Config::from_env()?;
    let index_name = args.index.unwrap_or_else(|| config.index_name.clone());

    let source = RelationalSource::connect(config.require_relational_url()?).await?;
    let index = SearchIndexClient::new(config.index_url.as_str(), index_name);

    if args.recreate {
        tracing::info!(index = index.index(), "recreating index");
        index.delete_index().await?;
    }
    index.ensure_index().await?;

    let summary = populate::run(&source, &index, &config.score_weights, args.from, args.to).await?;

    tracing::info!(
        started = %summary.started_at.format("%Y-%m-%d %H:%M:%S"),
        finished = %summary.finished_at.format("%Y-%m-%d %H:%M:%S"),
        concepts = summary.concepts,
        skipped = summary.skipped_concepts,
        documents = summary.documents,
        "population finished"
    );

    Ok(())
}
