//! Catalog Clone - command line front end for catalog-core.
//!
//! Copies the selected catalog kinds from a source account into a target
//! account and reports per-kind counters.

mod args;

use anyhow::Result;
use args::Args;
use catalog_core::{CatalogCloner, CloneSummary};
use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn log_summary(summary: &CloneSummary) {
    for stats in &summary.types {
        info!(
            "{}: {} retrieved, {} cloned, {} merged ({} already in target)",
            stats.object_type.plural_label(),
            stats.retrieved,
            stats.cloned,
            stats.merged,
            stats.target_indexed
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    let options = args.clone_options()?;
    if options.is_empty() {
        anyhow::bail!("Nothing to clone: pass --all, a per-kind switch, or --options");
    }

    info!("Starting catalog clone against {}", args.effective_base_url());

    let cloner = CatalogCloner::builder()
        .base_url(args.effective_base_url())
        .source_access_token(args.source_token.as_str())
        .target_access_token(args.target_token.as_str())
        .build()?;

    match cloner.clone_account_data(&options).await {
        Ok(summary) => {
            log_summary(&summary);
            if args.json {
                // Intentional stdout so the summary can be piped
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }
        Err(aborted) => {
            error!("Clone stopped before finishing; counters so far:");
            log_summary(&aborted.summary);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&aborted.summary)?);
            }
            Err(aborted.into())
        }
    }
}
