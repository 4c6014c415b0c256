//! The fixed order in which kinds are cloned.
//!
//! Referenced kinds always run before the kinds that refer to them, so every
//! reference map an item needs is complete before items start.

use crate::config::{CloneOptions, DiscountOptions, ItemOptions};
use crate::models::CatalogObjectType;

/// One kind to clone in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneStep {
    Discounts(DiscountOptions),
    ModifierLists,
    Taxes,
    Categories,
    Items(ItemOptions),
}

impl CloneStep {
    pub fn object_type(&self) -> CatalogObjectType {
        match self {
            CloneStep::Discounts(_) => CatalogObjectType::Discount,
            CloneStep::ModifierLists => CatalogObjectType::ModifierList,
            CloneStep::Taxes => CatalogObjectType::Tax,
            CloneStep::Categories => CatalogObjectType::Category,
            CloneStep::Items(_) => CatalogObjectType::Item,
        }
    }
}

/// Steps selected by `options`, in execution order.
///
/// Discounts, modifier lists, taxes, categories, items. Categories are only
/// cloned as part of an item clone.
pub fn clone_plan(options: &CloneOptions) -> Vec<CloneStep> {
    let mut steps = Vec::new();
    if let Some(discounts) = options.discounts {
        steps.push(CloneStep::Discounts(discounts));
    }
    if options.modifier_lists {
        steps.push(CloneStep::ModifierLists);
    }
    if options.taxes {
        steps.push(CloneStep::Taxes);
    }
    if let Some(items) = options.items {
        steps.push(CloneStep::Categories);
        steps.push(CloneStep::Items(items));
    }
    steps
}
