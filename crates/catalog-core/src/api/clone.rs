//! Whole-account clone runs.

use super::plan::{clone_plan, CloneStep};
use super::summary::{CloneAborted, CloneSummary};
use crate::cloning::{
    CategoryStrategy, CloneStrategy, DiscountStrategy, ItemStrategy, ModifierListStrategy,
    SourceToTargetMap, TaxStrategy, TypeCloneStats, TypeCloner,
};
use crate::config::CloneOptions;
use crate::error::{CatalogError, Result};
use crate::CatalogCloner;
use tracing::{error, info};

/// Maps built so far in a run, read by the kinds that reference them.
#[derive(Debug, Default)]
struct ReferenceMaps {
    modifier_lists: Option<SourceToTargetMap>,
    taxes: Option<SourceToTargetMap>,
    categories: Option<SourceToTargetMap>,
}

impl CatalogCloner {
    /// Clone the selected kinds from the source account into the target
    /// account.
    ///
    /// Kinds run one after another in a fixed order. The first error stops
    /// the run; objects already written stay in the target account and the
    /// returned [`CloneAborted`] carries the counters gathered so far.
    pub async fn clone_account_data(
        &self,
        options: &CloneOptions,
    ) -> std::result::Result<CloneSummary, CloneAborted> {
        let mut summary = CloneSummary::default();
        match self.run(options, &mut summary).await {
            Ok(()) => {
                info!(
                    "Catalog clone finished: {} cloned, {} merged",
                    summary.total_cloned(),
                    summary.total_merged()
                );
                Ok(summary)
            }
            Err(error) => {
                if error.is_transport() {
                    error!("Catalog clone aborted on a transport failure: {}", error);
                } else {
                    error!("Catalog clone aborted: {}", error);
                }
                Err(CloneAborted { error, summary })
            }
        }
    }

    async fn run(&self, options: &CloneOptions, summary: &mut CloneSummary) -> Result<()> {
        options.validate()?;
        let steps = clone_plan(options);
        if steps.is_empty() {
            info!("Nothing selected to clone");
            return Ok(());
        }

        let cloner = TypeCloner::new(self.source().as_ref(), self.target().as_ref());
        let mut maps = ReferenceMaps::default();

        for step in steps {
            match step {
                CloneStep::Discounts(discounts) => {
                    run_step(&cloner, &DiscountStrategy::new(discounts), summary).await?;
                }
                CloneStep::ModifierLists => {
                    maps.modifier_lists =
                        Some(run_step(&cloner, &ModifierListStrategy, summary).await?);
                }
                CloneStep::Taxes => {
                    maps.taxes = Some(run_step(&cloner, &TaxStrategy, summary).await?);
                }
                CloneStep::Categories => {
                    maps.categories = Some(run_step(&cloner, &CategoryStrategy, summary).await?);
                }
                CloneStep::Items(items) => {
                    let categories = maps.categories.as_ref().ok_or_else(|| {
                        CatalogError::Other("Items cloned before categories".to_string())
                    })?;
                    let strategy = ItemStrategy::new(
                        items,
                        categories,
                        maps.taxes.as_ref(),
                        maps.modifier_lists.as_ref(),
                    )?;
                    run_step(&cloner, &strategy, summary).await?;
                }
            }
        }
        Ok(())
    }
}

/// Clone one kind, recording its counters whether or not it succeeds.
async fn run_step(
    cloner: &TypeCloner<'_>,
    strategy: &dyn CloneStrategy,
    summary: &mut CloneSummary,
) -> Result<SourceToTargetMap> {
    let mut stats = TypeCloneStats::new(strategy.object_type());
    let result = cloner.clone_type(strategy, &mut stats).await;
    summary.types.push(stats);
    result
}
