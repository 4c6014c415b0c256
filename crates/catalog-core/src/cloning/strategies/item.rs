use super::{expect_payload, CloneStrategy};
use crate::cloning::fingerprint::{variation_fingerprint, Fingerprint, FingerprintBuilder};
use crate::cloning::sanitize::{strip_metadata, strip_nested_metadata, SanitizedObject};
use crate::cloning::source_map::SourceToTargetMap;
use crate::config::ItemOptions;
use crate::error::{CatalogError, Result};
use crate::models::{CatalogItem, CatalogItemModifierListInfo, CatalogObject, CatalogObjectData, CatalogObjectType};
use std::collections::HashSet;

/// Items match on `name:::category_id`, with the source category translated
/// to its target id first. Only regular items take part. Category, tax and
/// modifier-list references that have no target counterpart are errors.
///
/// A matched item absorbs source variations it does not already carry
/// (compared on `name:::price`).
#[derive(Debug, Clone, Copy)]
pub struct ItemStrategy<'a> {
    options: ItemOptions,
    categories: &'a SourceToTargetMap,
    taxes: Option<&'a SourceToTargetMap>,
    modifier_lists: Option<&'a SourceToTargetMap>,
}

impl<'a> ItemStrategy<'a> {
    /// Fails when a reference kind the options ask to keep has no map.
    pub fn new(
        options: ItemOptions,
        categories: &'a SourceToTargetMap,
        taxes: Option<&'a SourceToTargetMap>,
        modifier_lists: Option<&'a SourceToTargetMap>,
    ) -> Result<Self> {
        if options.include_applied_taxes && taxes.is_none() {
            return Err(CatalogError::Config {
                message: "including applied taxes requires cloned taxes".to_string(),
            });
        }
        if options.include_applied_modifier_lists && modifier_lists.is_none() {
            return Err(CatalogError::Config {
                message: "including applied modifier lists requires cloned modifier lists"
                    .to_string(),
            });
        }
        Ok(Self {
            options,
            categories,
            taxes,
            modifier_lists,
        })
    }

    fn target_category_id(&self, source_id: Option<&str>) -> Result<Option<String>> {
        source_id
            .map(|id| {
                self.categories
                    .require_target_id("category", id)
                    .map(str::to_string)
            })
            .transpose()
    }

    fn target_tax_ids(&self, source_ids: &[String]) -> Result<Vec<String>> {
        let Some(taxes) = self.taxes.filter(|_| self.options.include_applied_taxes) else {
            return Ok(Vec::new());
        };
        source_ids
            .iter()
            .map(|id| taxes.require_target_id("tax", id).map(str::to_string))
            .collect()
    }

    fn target_modifier_list_info(
        &self,
        source: &[CatalogItemModifierListInfo],
    ) -> Result<Vec<CatalogItemModifierListInfo>> {
        let Some(lists) = self
            .modifier_lists
            .filter(|_| self.options.include_applied_modifier_lists)
        else {
            return Ok(Vec::new());
        };
        source
            .iter()
            .map(|info| {
                let target_id = lists.require_target_id("modifier list", &info.modifier_list_id)?;
                Ok(CatalogItemModifierListInfo {
                    modifier_list_id: target_id.to_string(),
                    ..info.clone()
                })
            })
            .collect()
    }
}

/// Variation copy owned by `parent` in the target account, without
/// per-location price overrides.
fn nested_variation(parent: &CatalogObject, variation: &CatalogObject) -> CatalogObject {
    let mut nested = strip_nested_metadata(parent, variation);
    if let Some(data) = nested.item_variation_data_mut() {
        data.item_id = Some(parent.id.clone());
        data.location_overrides.clear();
    }
    nested
}

impl CloneStrategy for ItemStrategy<'_> {
    fn object_type(&self) -> CatalogObjectType {
        CatalogObjectType::Item
    }

    fn present_at_all_locations_by_default(&self) -> bool {
        self.options.present_at_all_locations
    }

    fn is_eligible(&self, object: &CatalogObject) -> bool {
        object.item_data().is_some_and(CatalogItem::is_regular)
    }

    fn fingerprint(&self, object: &CatalogObject, from_source: bool) -> Result<Fingerprint> {
        let data = expect_payload(object.item_data(), CatalogObjectType::Item, object)?;
        let category_id = if from_source {
            self.target_category_id(data.category_id.as_deref())?
        } else {
            data.category_id.clone()
        };
        Ok(FingerprintBuilder::new()
            .field(data.name.as_deref())
            .field(category_id.as_deref())
            .finish())
    }

    fn sanitize(&self, object: &CatalogObject) -> Result<SanitizedObject> {
        let source = expect_payload(object.item_data(), CatalogObjectType::Item, object)?;
        let mut sanitized = strip_metadata(object, self.present_at_all_locations_by_default());

        let mut item = CatalogItem {
            category_id: self.target_category_id(source.category_id.as_deref())?,
            tax_ids: self.target_tax_ids(&source.tax_ids)?,
            modifier_list_info: self.target_modifier_list_info(&source.modifier_list_info)?,
            variations: Vec::new(),
            ..source.clone()
        };
        item.variations = source
            .variations
            .iter()
            .map(|v| nested_variation(&sanitized.object, v))
            .collect();

        sanitized.object.data = CatalogObjectData::Item { item_data: item };
        Ok(sanitized)
    }

    fn merge(
        &self,
        source: &CatalogObject,
        target: &CatalogObject,
    ) -> Result<Option<CatalogObject>> {
        let source_item = expect_payload(source.item_data(), CatalogObjectType::Item, source)?;
        let target_item = expect_payload(target.item_data(), CatalogObjectType::Item, target)?;

        let mut known: HashSet<Fingerprint> =
            target_item.variations.iter().map(variation_fingerprint).collect();
        let appended: Vec<CatalogObject> = source_item
            .variations
            .iter()
            .filter(|v| known.insert(variation_fingerprint(v)))
            .map(|v| nested_variation(target, v))
            .collect();

        if appended.is_empty() {
            return Ok(None);
        }

        let mut merged = target.clone();
        if let Some(item) = merged.item_data_mut() {
            item.variations.extend(appended);
        }
        Ok(Some(merged))
    }
}
