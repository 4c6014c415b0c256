//! Shared fixtures for the clone integration tests.
//!
//! [`FakeCatalog`] is an in-memory account: it pages listings, assigns
//! server ids on upsert and returns id mappings the way the real API does.

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_core::models::{
    ApiErrorDetail, BatchUpsertCatalogObjectsResponse, CatalogCategory, CatalogDiscount,
    CatalogIdMapping, CatalogItem, CatalogItemVariation, CatalogModifier, CatalogModifierList,
    CatalogObject, CatalogObjectData, CatalogObjectType, CatalogTax, DiscountType,
    ListCatalogResponse, Money, TaxInclusionType,
};
use catalog_core::{CatalogApi, CatalogError, Result};
use std::sync::Mutex;

#[derive(Debug, Default)]
struct FakeState {
    objects: Vec<CatalogObject>,
    next_id: u64,
    list_calls: Vec<(CatalogObjectType, Option<String>)>,
    upsert_calls: Vec<(String, Vec<CatalogObject>)>,
    /// Drop the last id mapping from this upsert call (0-based).
    omit_mapping_on_call: Option<usize>,
    list_errors: Vec<ApiErrorDetail>,
}

pub struct FakeCatalog {
    label: String,
    page_size: usize,
    state: Mutex<FakeState>,
}

impl FakeCatalog {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            page_size: 100,
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_objects(self, objects: Vec<CatalogObject>) -> Self {
        self.state.lock().unwrap().objects.extend(objects);
        self
    }

    pub fn omit_mapping_on_call(self, call: usize) -> Self {
        self.state.lock().unwrap().omit_mapping_on_call = Some(call);
        self
    }

    pub fn with_list_errors(self, errors: Vec<ApiErrorDetail>) -> Self {
        self.state.lock().unwrap().list_errors = errors;
        self
    }

    /// Stored top-level objects of one kind.
    pub fn objects_of(&self, kind: CatalogObjectType) -> Vec<CatalogObject> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .filter(|o| o.object_type() == Some(kind))
            .cloned()
            .collect()
    }

    pub fn list_calls(&self, kind: CatalogObjectType) -> usize {
        self.state
            .lock()
            .unwrap()
            .list_calls
            .iter()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    pub fn upsert_calls(&self) -> Vec<Vec<CatalogObject>> {
        self.state
            .lock()
            .unwrap()
            .upsert_calls
            .iter()
            .map(|(_, objects)| objects.clone())
            .collect()
    }

    pub fn idempotency_keys(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .upsert_calls
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl FakeState {
    fn assign_id(&mut self, label: &str, client_id: &str, mappings: &mut Vec<CatalogIdMapping>) -> String {
        self.next_id += 1;
        let id = format!("{}-{}", label.to_uppercase(), self.next_id);
        mappings.push(CatalogIdMapping::new(client_id, id.clone()));
        id
    }

    /// Give server ids to an object and any client-id children.
    fn store(&mut self, label: &str, mut object: CatalogObject, mappings: &mut Vec<CatalogIdMapping>) -> CatalogObject {
        if object.has_client_id() {
            let client_id = object.id.clone();
            object.id = self.assign_id(label, &client_id, mappings);
            object.version = Some(1);
        } else {
            object.version = Some(object.version.unwrap_or(0) + 1);
        }
        let parent_id = object.id.clone();

        match &mut object.data {
            CatalogObjectData::Item { item_data } => {
                for variation in &mut item_data.variations {
                    if variation.has_client_id() {
                        let client_id = variation.id.clone();
                        variation.id = self.assign_id(label, &client_id, mappings);
                    }
                    if let Some(data) = variation.item_variation_data_mut() {
                        data.item_id = Some(parent_id.clone());
                    }
                }
            }
            CatalogObjectData::ModifierList { modifier_list_data } => {
                for modifier in &mut modifier_list_data.modifiers {
                    if modifier.has_client_id() {
                        let client_id = modifier.id.clone();
                        modifier.id = self.assign_id(label, &client_id, mappings);
                    }
                    if let Some(data) = modifier.modifier_data_mut() {
                        data.modifier_list_id = Some(parent_id.clone());
                    }
                }
            }
            _ => {}
        }

        match self.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => *existing = object.clone(),
            None => self.objects.push(object.clone()),
        }
        object
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    fn label(&self) -> &str {
        &self.label
    }

    async fn list_catalog(
        &self,
        kind: CatalogObjectType,
        cursor: Option<&str>,
    ) -> Result<ListCatalogResponse> {
        let mut state = self.state.lock().unwrap();
        state.list_calls.push((kind, cursor.map(str::to_string)));
        if !state.list_errors.is_empty() {
            return Ok(ListCatalogResponse {
                errors: state.list_errors.clone(),
                ..Default::default()
            });
        }

        let offset: usize = match cursor {
            Some(c) => c
                .parse()
                .map_err(|_| CatalogError::Other(format!("bad cursor {}", c)))?,
            None => 0,
        };
        let matching: Vec<CatalogObject> = state
            .objects
            .iter()
            .filter(|o| o.object_type() == Some(kind))
            .cloned()
            .collect();
        let page: Vec<CatalogObject> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let next = offset + self.page_size;
        let cursor = (next < matching.len()).then(|| next.to_string());
        Ok(ListCatalogResponse::page(page, cursor.as_deref()))
    }

    async fn batch_upsert(
        &self,
        idempotency_key: &str,
        objects: Vec<CatalogObject>,
    ) -> Result<BatchUpsertCatalogObjectsResponse> {
        let mut state = self.state.lock().unwrap();
        let call = state.upsert_calls.len();
        state
            .upsert_calls
            .push((idempotency_key.to_string(), objects.clone()));

        let mut mappings = Vec::new();
        let stored: Vec<CatalogObject> = objects
            .into_iter()
            .map(|o| state.store(&self.label, o, &mut mappings))
            .collect();

        if state.omit_mapping_on_call == Some(call) {
            mappings.pop();
        }

        Ok(BatchUpsertCatalogObjectsResponse {
            objects: stored,
            id_mappings: mappings,
            errors: Vec::new(),
        })
    }
}

// Object builders

pub fn money(amount: i64) -> Option<Money> {
    Some(Money::new(amount, "USD"))
}

pub fn category(id: &str, name: &str) -> CatalogObject {
    CatalogObject::category(id, CatalogCategory::named(name))
}

pub fn percentage_discount(id: &str, name: &str, percentage: &str) -> CatalogObject {
    CatalogObject::discount(
        id,
        CatalogDiscount {
            name: Some(name.into()),
            discount_type: Some(DiscountType::FixedPercentage),
            percentage: Some(percentage.into()),
            ..Default::default()
        },
    )
}

pub fn amount_discount(id: &str, name: &str, amount: i64) -> CatalogObject {
    CatalogObject::discount(
        id,
        CatalogDiscount {
            name: Some(name.into()),
            discount_type: Some(DiscountType::FixedAmount),
            amount_money: money(amount),
            ..Default::default()
        },
    )
}

pub fn tax(id: &str, name: &str, percentage: &str) -> CatalogObject {
    CatalogObject::tax(
        id,
        CatalogTax {
            name: Some(name.into()),
            percentage: Some(percentage.into()),
            inclusion_type: Some(TaxInclusionType::Additive),
            ..Default::default()
        },
    )
}

pub fn variation(id: &str, name: &str, price: i64) -> CatalogObject {
    CatalogObject::item_variation(id, CatalogItemVariation::priced(name, money(price)))
}

pub fn item(id: &str, name: &str, category_id: Option<&str>, variations: Vec<CatalogObject>) -> CatalogObject {
    CatalogObject::item(
        id,
        CatalogItem {
            name: Some(name.into()),
            category_id: category_id.map(Into::into),
            variations,
            ..Default::default()
        },
    )
}

pub fn modifier(id: &str, name: &str, price: i64) -> CatalogObject {
    CatalogObject::modifier(id, CatalogModifier::priced(name, money(price)))
}

pub fn modifier_list(id: &str, name: &str, modifiers: Vec<CatalogObject>) -> CatalogObject {
    CatalogObject::modifier_list(
        id,
        CatalogModifierList {
            name: Some(name.into()),
            modifiers,
            ..Default::default()
        },
    )
}

pub fn variation_names(item: &CatalogObject) -> Vec<String> {
    item.item_data()
        .map(|data| {
            data.variations
                .iter()
                .filter_map(|v| v.item_variation_data().and_then(|d| d.name.clone()))
                .collect()
        })
        .unwrap_or_default()
}
