//! The per-kind clone loop shared by every strategy.

use super::fingerprint::Fingerprint;
use super::index::{build_target_index, TargetIndex};
use super::reconcile::{reconcile, returned_by_id, PendingInsert};
use super::source_map::SourceToTargetMap;
use super::strategies::CloneStrategy;
use crate::error::Result;
use crate::models::{CatalogObject, CatalogObjectType};
use crate::network::CatalogApi;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Counters for one kind.
///
/// `cloned` and `merged` count objects as they are queued, so after a failed
/// upsert they include that page's writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCloneStats {
    pub object_type: CatalogObjectType,
    /// Eligible target objects indexed before cloning.
    pub target_indexed: usize,
    /// Source objects listed, eligible or not.
    pub retrieved: usize,
    /// New objects created in the target account.
    pub cloned: usize,
    /// Existing target objects that absorbed nested children.
    pub merged: usize,
}

impl TypeCloneStats {
    pub fn new(object_type: CatalogObjectType) -> Self {
        Self {
            object_type,
            target_indexed: 0,
            retrieved: 0,
            cloned: 0,
            merged: 0,
        }
    }
}

/// A source object whose final target object is only known once the page's
/// upsert returns.
#[derive(Debug)]
struct DeferredMatch {
    source_id: String,
    target_id: String,
    /// Last confirmed state of the target, used if the upsert does not
    /// return it.
    confirmed: CatalogObject,
}

/// What one source page turns into.
#[derive(Debug, Default)]
struct PagePlan {
    upserts: Vec<CatalogObject>,
    pending: Vec<PendingInsert>,
    /// Matches that added children to their target.
    merged: Vec<DeferredMatch>,
    /// Matches against a target already merged on this page that added
    /// nothing further.
    unchanged: Vec<DeferredMatch>,
    /// Position in `upserts` of each merged target, by target id.
    merged_slots: HashMap<String, usize>,
}

/// Clones one kind of catalog object from a source account to a target
/// account.
pub struct TypeCloner<'a> {
    source: &'a dyn CatalogApi,
    target: &'a dyn CatalogApi,
}

impl<'a> TypeCloner<'a> {
    pub fn new(source: &'a dyn CatalogApi, target: &'a dyn CatalogApi) -> Self {
        Self { source, target }
    }

    /// Run the full clone for the strategy's kind.
    ///
    /// The returned map holds, for every eligible source object, the target
    /// object it now corresponds to: a freshly created one, an existing match,
    /// or an existing match that absorbed new children. Counters in `stats`
    /// are updated page by page, so they stay meaningful on error.
    pub async fn clone_type(
        &self,
        strategy: &dyn CloneStrategy,
        stats: &mut TypeCloneStats,
    ) -> Result<SourceToTargetMap> {
        let kind = strategy.object_type();
        info!("Cloning {}", kind.plural_label());

        let index = build_target_index(self.target, strategy).await?;
        stats.target_indexed = index.retrieved();

        let mut output = SourceToTargetMap::new(kind);
        // Latest known state of target objects merged during this run. Kept
        // apart from the index so that later merges build on earlier ones.
        let mut merged_state: HashMap<String, CatalogObject> = HashMap::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .source
                .list_catalog(kind, cursor.as_deref())
                .await?
                .into_result()?;

            if page.objects.is_empty() && cursor.is_none() && page.next_cursor().is_none() {
                info!("No {} found in {} account", kind.plural_label(), self.source.label());
                return Ok(output);
            }
            stats.retrieved += page.objects.len();

            let plan = plan_page(strategy, &index, &merged_state, &page.objects, &mut output)?;
            stats.cloned += plan.pending.len();
            stats.merged += plan.merged.len();
            if !plan.is_empty() {
                self.upsert(plan, &mut output, &mut merged_state).await?;
            }

            info!(
                "  Retrieved {} {} from {} account, cloned {}, merged {}",
                stats.retrieved,
                kind.plural_label(),
                self.source.label(),
                stats.cloned,
                stats.merged
            );

            match page.next_cursor() {
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
        }

        Ok(output)
    }

    /// Send one page's writes and fold the server's answer into `output`.
    async fn upsert(
        &self,
        plan: PagePlan,
        output: &mut SourceToTargetMap,
        merged_state: &mut HashMap<String, CatalogObject>,
    ) -> Result<()> {
        let idempotency_key = Uuid::new_v4().to_string();
        debug!(
            "Upserting {} objects into {} account (key {})",
            plan.upserts.len(),
            self.target.label(),
            idempotency_key
        );

        let response = self
            .target
            .batch_upsert(&idempotency_key, plan.upserts)
            .await?
            .into_result()?;

        for (source_id, created) in reconcile(&response, &plan.pending)? {
            output.insert(source_id, created);
        }

        let returned = returned_by_id(&response);
        for deferred in plan.merged.into_iter().chain(plan.unchanged) {
            match returned.get(deferred.target_id.as_str()) {
                Some(updated) => {
                    output.insert(deferred.source_id, (*updated).clone());
                    merged_state.insert(deferred.target_id, (*updated).clone());
                }
                None => {
                    debug!(
                        "Upsert did not return merged object {}, keeping its last known state",
                        deferred.target_id
                    );
                    output.insert(deferred.source_id, deferred.confirmed);
                }
            }
        }
        Ok(())
    }
}

/// Decide, for each eligible object on a source page, whether it is new,
/// already present, or present but missing nested children.
fn plan_page(
    strategy: &dyn CloneStrategy,
    index: &TargetIndex,
    merged_state: &HashMap<String, CatalogObject>,
    objects: &[CatalogObject],
    output: &mut SourceToTargetMap,
) -> Result<PagePlan> {
    let mut plan = PagePlan::default();

    for object in objects.iter().filter(|o| strategy.is_eligible(o)) {
        let fingerprint: Fingerprint = strategy.fingerprint(object, true)?;

        let Some(indexed) = index.get(&fingerprint) else {
            let sanitized = strategy.sanitize(object)?;
            plan.pending
                .push(PendingInsert::new(object.id.clone(), sanitized.correlation_id));
            plan.upserts.push(sanitized.object);
            continue;
        };

        // Merge against whatever is newest: this page's queued copy, then
        // an earlier page's result, then the index.
        let confirmed = merged_state.get(&indexed.id).unwrap_or(indexed);
        let slot = plan.merged_slots.get(&indexed.id).copied();
        let current = match slot {
            Some(i) => &plan.upserts[i],
            None => confirmed,
        };

        let deferred = DeferredMatch {
            source_id: object.id.clone(),
            target_id: indexed.id.clone(),
            confirmed: confirmed.clone(),
        };
        match (strategy.merge(object, current)?, slot) {
            (Some(merged), Some(i)) => {
                debug!("Merging {} {} into {}", strategy.object_type(), object.id, merged.id);
                plan.upserts[i] = merged;
                plan.merged.push(deferred);
            }
            (Some(merged), None) => {
                debug!("Merging {} {} into {}", strategy.object_type(), object.id, merged.id);
                plan.merged_slots.insert(indexed.id.clone(), plan.upserts.len());
                plan.upserts.push(merged);
                plan.merged.push(deferred);
            }
            (None, Some(_)) => plan.unchanged.push(deferred),
            (None, None) => {
                output.insert(object.id.clone(), current.clone());
            }
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloning::strategies::{CategoryStrategy, ItemStrategy};
    use crate::config::ItemOptions;
    use crate::models::{
        BatchUpsertCatalogObjectsResponse, CatalogCategory, CatalogItem, CatalogItemVariation,
        ListCatalogResponse, Money, ProductType,
    };
    use async_trait::async_trait;

    fn item(id: &str, name: &str, variations: &[(&str, &str)]) -> CatalogObject {
        CatalogObject::item(
            id,
            CatalogItem {
                name: Some(name.into()),
                variations: variations
                    .iter()
                    .map(|(vid, vname)| {
                        CatalogObject::item_variation(
                            *vid,
                            CatalogItemVariation::priced(*vname, Some(Money::new(100, "USD"))),
                        )
                    })
                    .collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_plan_splits_new_and_existing() {
        let index = TargetIndex::from_objects(
            &CategoryStrategy,
            vec![CatalogObject::category("T1", CatalogCategory::named("Drinks"))],
        )
        .unwrap();
        let mut output = SourceToTargetMap::new(CatalogObjectType::Category);
        let source = vec![
            CatalogObject::category("S1", CatalogCategory::named("Drinks")),
            CatalogObject::category("S2", CatalogCategory::named("Food")),
        ];

        let plan = plan_page(&CategoryStrategy, &index, &HashMap::new(), &source, &mut output).unwrap();

        assert_eq!(plan.upserts.len(), 1);
        assert_eq!(plan.pending.len(), 1);
        assert_eq!(plan.pending[0].source_id, "S2");
        assert_eq!(plan.pending[0].correlation_id, plan.upserts[0].id);
        assert!(plan.merged.is_empty());
        assert_eq!(output.target_id("S1"), Some("T1"));
        assert_eq!(output.target_id("S2"), None);
    }

    #[test]
    fn test_plan_merges_twice_into_one_upsert() {
        let categories = SourceToTargetMap::new(CatalogObjectType::Category);
        let strategy = ItemStrategy::new(ItemOptions::default(), &categories, None, None).unwrap();
        let index = TargetIndex::from_objects(
            &strategy,
            vec![item("T1", "Latte", &[("TV1", "Small")])],
        )
        .unwrap();
        let mut output = SourceToTargetMap::new(CatalogObjectType::Item);
        let source = vec![
            item("S1", "Latte", &[("SV1", "Medium")]),
            item("S2", "Latte", &[("SV2", "Large")]),
        ];

        let plan = plan_page(&strategy, &index, &HashMap::new(), &source, &mut output).unwrap();

        assert_eq!(plan.upserts.len(), 1);
        assert_eq!(plan.merged.len(), 2);
        assert!(plan.merged.iter().all(|m| m.target_id == "T1"));
        let variations = &plan.upserts[0].item_data().unwrap().variations;
        assert_eq!(variations.len(), 3);
        // Resolved only once the upsert returns.
        assert!(output.is_empty());
    }

    #[test]
    fn test_plan_repeat_match_waits_for_upsert() {
        let categories = SourceToTargetMap::new(CatalogObjectType::Category);
        let strategy = ItemStrategy::new(ItemOptions::default(), &categories, None, None).unwrap();
        let index = TargetIndex::from_objects(
            &strategy,
            vec![item("T1", "Latte", &[("TV1", "Small")])],
        )
        .unwrap();
        let mut output = SourceToTargetMap::new(CatalogObjectType::Item);
        let source = vec![
            item("S1", "Latte", &[("SV1", "Large")]),
            item("S2", "Latte", &[("SV2", "Large")]),
        ];

        let plan = plan_page(&strategy, &index, &HashMap::new(), &source, &mut output).unwrap();
        assert_eq!(plan.merged.len(), 1);
        assert_eq!(plan.unchanged.len(), 1);
        assert_eq!(plan.unchanged[0].source_id, "S2");
        assert_eq!(plan.unchanged[0].confirmed.id, "T1");
        assert!(output.get("S2").is_none());
    }

    #[test]
    fn test_only_regular_items_are_indexed_and_planned() {
        let categories = SourceToTargetMap::new(CatalogObjectType::Category);
        let strategy = ItemStrategy::new(ItemOptions::default(), &categories, None, None).unwrap();
        let typed = |id: &str, name: &str, product_type: Option<ProductType>| {
            let mut object = item(id, name, &[]);
            if let Some(data) = object.item_data_mut() {
                data.product_type = product_type;
            }
            object
        };

        let index = TargetIndex::from_objects(
            &strategy,
            vec![
                typed("T1", "Latte", Some(ProductType::Regular)),
                typed("T2", "Tea", None),
                typed("T3", "Gift", Some(ProductType::GiftCard)),
                typed("T4", "Massage", Some(ProductType::AppointmentsService)),
            ],
        )
        .unwrap();
        assert_eq!(index.retrieved(), 2);

        let mut output = SourceToTargetMap::new(CatalogObjectType::Item);
        let source = vec![
            typed("S1", "Latte", Some(ProductType::Regular)),
            typed("S2", "Chai", None),
            typed("S3", "Gift", Some(ProductType::GiftCard)),
            typed("S4", "Haircut", Some(ProductType::AppointmentsService)),
        ];
        let plan = plan_page(&strategy, &index, &HashMap::new(), &source, &mut output).unwrap();

        assert_eq!(plan.pending.len(), 1);
        assert_eq!(plan.pending[0].source_id, "S2");
        assert_eq!(plan.upserts.len(), 1);
        assert_eq!(output.target_id("S1"), Some("T1"));
        assert_eq!(output.len(), 1);
    }

    /// Lists a fixed set of objects and answers every upsert with an empty
    /// response.
    struct SilentAccount {
        objects: Vec<CatalogObject>,
    }

    #[async_trait]
    impl CatalogApi for SilentAccount {
        fn label(&self) -> &str {
            "silent"
        }

        async fn list_catalog(
            &self,
            _kind: CatalogObjectType,
            _cursor: Option<&str>,
        ) -> Result<ListCatalogResponse> {
            Ok(ListCatalogResponse::page(self.objects.clone(), None))
        }

        async fn batch_upsert(
            &self,
            _idempotency_key: &str,
            _objects: Vec<CatalogObject>,
        ) -> Result<BatchUpsertCatalogObjectsResponse> {
            Ok(BatchUpsertCatalogObjectsResponse::default())
        }
    }

    #[tokio::test]
    async fn test_merged_target_missing_from_response_keeps_confirmed_state() {
        let categories = SourceToTargetMap::new(CatalogObjectType::Category);
        let strategy = ItemStrategy::new(ItemOptions::default(), &categories, None, None).unwrap();
        let source = SilentAccount {
            objects: vec![item("S1", "Latte", &[("SV1", "Large")])],
        };
        let target = SilentAccount {
            objects: vec![item("T1", "Latte", &[("TV1", "Small")])],
        };

        let mut stats = TypeCloneStats::new(CatalogObjectType::Item);
        let map = TypeCloner::new(&source, &target)
            .clone_type(&strategy, &mut stats)
            .await
            .unwrap();

        assert_eq!(stats.merged, 1);
        let mapped = map.get("S1").unwrap();
        assert_eq!(mapped.id, "T1");
        let variations = &mapped.item_data().unwrap().variations;
        assert_eq!(variations.len(), 1);
        assert!(!variations[0].has_client_id());
    }

    #[test]
    fn test_plan_uses_merged_state_over_index() {
        let categories = SourceToTargetMap::new(CatalogObjectType::Category);
        let strategy = ItemStrategy::new(ItemOptions::default(), &categories, None, None).unwrap();
        let index = TargetIndex::from_objects(
            &strategy,
            vec![item("T1", "Latte", &[("TV1", "Small")])],
        )
        .unwrap();
        let mut merged_state = HashMap::new();
        merged_state.insert(
            "T1".to_string(),
            item("T1", "Latte", &[("TV1", "Small"), ("TV2", "Large")]),
        );
        let mut output = SourceToTargetMap::new(CatalogObjectType::Item);
        let source = vec![item("S1", "Latte", &[("SV1", "Large")])];

        let plan = plan_page(&strategy, &index, &merged_state, &source, &mut output).unwrap();
        assert!(plan.is_empty());
        assert_eq!(
            output.get("S1").unwrap().item_data().unwrap().variations.len(),
            2
        );
    }
}
