//! Command line arguments and their translation into clone options.

use anyhow::{Context, Result};
use catalog_core::config::{AppConfig, NetworkConfig};
use catalog_core::{CloneOptions, DiscountOptions, ItemOptions};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-clone")]
#[command(about = "Clone catalog data from one merchant account into another")]
pub struct Args {
    /// Access token of the account to copy from
    #[arg(long, env = AppConfig::SOURCE_TOKEN_ENV, hide_env_values = true)]
    pub source_token: String,

    /// Access token of the account to copy into
    #[arg(long, env = AppConfig::TARGET_TOKEN_ENV, hide_env_values = true)]
    pub target_token: String,

    /// API base URL for both accounts
    #[arg(long, default_value = NetworkConfig::API_BASE)]
    pub base_url: String,

    /// Use the sandbox API (overrides --base-url)
    #[arg(long)]
    pub sandbox: bool,

    /// Clone every supported kind
    #[arg(long)]
    pub all: bool,

    /// Clone discounts
    #[arg(long)]
    pub discounts: bool,

    /// Make cloned discounts available at all locations
    #[arg(long)]
    pub discounts_all_locations: bool,

    /// Clone modifier lists
    #[arg(long)]
    pub modifier_lists: bool,

    /// Clone taxes
    #[arg(long)]
    pub taxes: bool,

    /// Clone items and categories
    #[arg(long)]
    pub items: bool,

    /// Make cloned items available at all locations
    #[arg(long)]
    pub items_all_locations: bool,

    /// Keep tax references on cloned items (requires --taxes)
    #[arg(long)]
    pub include_applied_taxes: bool,

    /// Keep modifier list references on cloned items (requires --modifier-lists)
    #[arg(long)]
    pub include_applied_modifier_lists: bool,

    /// JSON file with clone options (overrides the per-kind switches)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Base URL after applying `--sandbox`.
    pub fn effective_base_url(&self) -> &str {
        if self.sandbox {
            NetworkConfig::SANDBOX_API_BASE
        } else {
            &self.base_url
        }
    }

    /// Options from `--options` if given, otherwise from the switches.
    pub fn clone_options(&self) -> Result<CloneOptions> {
        if let Some(path) = &self.options {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read options file {}", path.display()))?;
            return CloneOptions::from_json(&json)
                .with_context(|| format!("Invalid options file {}", path.display()));
        }

        let options = if self.all {
            CloneOptions::all()
        } else {
            CloneOptions {
                discounts: self.discounts.then(|| DiscountOptions {
                    present_at_all_locations: self.discounts_all_locations,
                }),
                modifier_lists: self.modifier_lists,
                taxes: self.taxes,
                items: self.items.then(|| ItemOptions {
                    present_at_all_locations: self.items_all_locations,
                    include_applied_taxes: self.include_applied_taxes,
                    include_applied_modifier_lists: self.include_applied_modifier_lists,
                }),
            }
        };
        options.validate()?;
        Ok(options)
    }
}
