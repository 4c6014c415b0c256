//! Catalog object types.
//!
//! These map onto the catalog REST API's JSON: every object carries a
//! `"type"` tag and a matching `<kind>_data` payload next to the common
//! identity and location fields.
//!
//! Fields the engine does not model are kept in each struct's `extra` map
//! and written back unchanged, so an object read from an account and upserted
//! again loses nothing.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Kinds of catalog object the clone engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogObjectType {
    Category,
    Discount,
    Tax,
    ModifierList,
    Modifier,
    Item,
    ItemVariation,
}

impl CatalogObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogObjectType::Category => "CATEGORY",
            CatalogObjectType::Discount => "DISCOUNT",
            CatalogObjectType::Tax => "TAX",
            CatalogObjectType::ModifierList => "MODIFIER_LIST",
            CatalogObjectType::Modifier => "MODIFIER",
            CatalogObjectType::Item => "ITEM",
            CatalogObjectType::ItemVariation => "ITEM_VARIATION",
        }
    }

    /// Parse the wire `type` tag of a kind the engine understands.
    pub fn from_wire(tag: &str) -> Option<Self> {
        Some(match tag {
            "CATEGORY" => CatalogObjectType::Category,
            "DISCOUNT" => CatalogObjectType::Discount,
            "TAX" => CatalogObjectType::Tax,
            "MODIFIER_LIST" => CatalogObjectType::ModifierList,
            "MODIFIER" => CatalogObjectType::Modifier,
            "ITEM" => CatalogObjectType::Item,
            "ITEM_VARIATION" => CatalogObjectType::ItemVariation,
            _ => return None,
        })
    }

    /// Name of the field holding this kind's payload.
    pub fn payload_key(&self) -> &'static str {
        match self {
            CatalogObjectType::Category => "category_data",
            CatalogObjectType::Discount => "discount_data",
            CatalogObjectType::Tax => "tax_data",
            CatalogObjectType::ModifierList => "modifier_list_data",
            CatalogObjectType::Modifier => "modifier_data",
            CatalogObjectType::Item => "item_data",
            CatalogObjectType::ItemVariation => "item_variation_data",
        }
    }

    /// Human readable plural used in log lines.
    pub fn plural_label(&self) -> &'static str {
        match self {
            CatalogObjectType::Category => "categories",
            CatalogObjectType::Discount => "discounts",
            CatalogObjectType::Tax => "taxes",
            CatalogObjectType::ModifierList => "modifier lists",
            CatalogObjectType::Modifier => "modifiers",
            CatalogObjectType::Item => "items",
            CatalogObjectType::ItemVariation => "item variations",
        }
    }
}

impl std::fmt::Display for CatalogObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An amount of money in the smallest denomination of the currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Money {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
        }
    }
}

/// Legacy (v1) identifier attached to an object in its home account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogV1Id {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_v1_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
}

/// Where an object is available. Either everywhere (minus the absent list)
/// or only at the present list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationPresence {
    pub present_at_all_locations: Option<bool>,
    pub present_at_location_ids: Vec<String>,
    pub absent_at_location_ids: Vec<String>,
}

/// A catalog object from either account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawCatalogObject")]
pub struct CatalogObject {
    pub id: String,
    pub data: CatalogObjectData,
    pub version: Option<i64>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub present_at_all_locations: Option<bool>,
    pub present_at_location_ids: Vec<String>,
    pub absent_at_location_ids: Vec<String>,
    pub catalog_v1_ids: Vec<CatalogV1Id>,
    /// Top-level fields not modelled above. For kinds the engine does not
    /// clone this also holds the `type` tag and the payload.
    pub extra: Map<String, Value>,
}

/// Kind-specific payload, selected by the object's `type` field.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogObjectData {
    Category { category_data: CatalogCategory },
    Discount { discount_data: CatalogDiscount },
    Tax { tax_data: CatalogTax },
    ModifierList { modifier_list_data: CatalogModifierList },
    Modifier { modifier_data: CatalogModifier },
    Item { item_data: CatalogItem },
    ItemVariation { item_variation_data: CatalogItemVariation },
    /// Any kind the engine does not clone (images, options, ...).
    Other,
}

impl CatalogObjectData {
    pub fn object_type(&self) -> Option<CatalogObjectType> {
        match self {
            CatalogObjectData::Category { .. } => Some(CatalogObjectType::Category),
            CatalogObjectData::Discount { .. } => Some(CatalogObjectType::Discount),
            CatalogObjectData::Tax { .. } => Some(CatalogObjectType::Tax),
            CatalogObjectData::ModifierList { .. } => Some(CatalogObjectType::ModifierList),
            CatalogObjectData::Modifier { .. } => Some(CatalogObjectType::Modifier),
            CatalogObjectData::Item { .. } => Some(CatalogObjectType::Item),
            CatalogObjectData::ItemVariation { .. } => Some(CatalogObjectType::ItemVariation),
            CatalogObjectData::Other => None,
        }
    }

    fn from_payload(kind: CatalogObjectType, payload: Value) -> serde_json::Result<Self> {
        // A missing or null payload reads as an empty one.
        let payload = match payload {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(match kind {
            CatalogObjectType::Category => CatalogObjectData::Category {
                category_data: serde_json::from_value(payload)?,
            },
            CatalogObjectType::Discount => CatalogObjectData::Discount {
                discount_data: serde_json::from_value(payload)?,
            },
            CatalogObjectType::Tax => CatalogObjectData::Tax {
                tax_data: serde_json::from_value(payload)?,
            },
            CatalogObjectType::ModifierList => CatalogObjectData::ModifierList {
                modifier_list_data: serde_json::from_value(payload)?,
            },
            CatalogObjectType::Modifier => CatalogObjectData::Modifier {
                modifier_data: serde_json::from_value(payload)?,
            },
            CatalogObjectType::Item => CatalogObjectData::Item {
                item_data: serde_json::from_value(payload)?,
            },
            CatalogObjectType::ItemVariation => CatalogObjectData::ItemVariation {
                item_variation_data: serde_json::from_value(payload)?,
            },
        })
    }
}

/// Wire shape of a catalog object before its payload is decoded.
#[derive(Deserialize)]
struct RawCatalogObject {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    id: String,
    #[serde(default)]
    version: Option<i64>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    is_deleted: bool,
    #[serde(default)]
    present_at_all_locations: Option<bool>,
    #[serde(default)]
    present_at_location_ids: Vec<String>,
    #[serde(default)]
    absent_at_location_ids: Vec<String>,
    #[serde(default)]
    catalog_v1_ids: Vec<CatalogV1Id>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<RawCatalogObject> for CatalogObject {
    type Error = serde_json::Error;

    fn try_from(raw: RawCatalogObject) -> serde_json::Result<Self> {
        let mut extra = raw.rest;
        let kind = raw.kind.as_deref().and_then(CatalogObjectType::from_wire);
        let data = match kind {
            Some(kind) => {
                let payload = extra.remove(kind.payload_key()).unwrap_or(Value::Null);
                CatalogObjectData::from_payload(kind, payload)?
            }
            None => {
                if let Some(tag) = raw.kind {
                    extra.insert("type".to_string(), Value::String(tag));
                }
                CatalogObjectData::Other
            }
        };

        Ok(Self {
            id: raw.id,
            data,
            version: raw.version,
            updated_at: raw.updated_at,
            is_deleted: raw.is_deleted,
            present_at_all_locations: raw.present_at_all_locations,
            present_at_location_ids: raw.present_at_location_ids,
            absent_at_location_ids: raw.absent_at_location_ids,
            catalog_v1_ids: raw.catalog_v1_ids,
            extra,
        })
    }
}

impl Serialize for CatalogObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(kind) = self.object_type() {
            map.serialize_entry("type", kind.as_str())?;
        }
        map.serialize_entry("id", &self.id)?;
        match &self.data {
            CatalogObjectData::Category { category_data } => {
                map.serialize_entry("category_data", category_data)?
            }
            CatalogObjectData::Discount { discount_data } => {
                map.serialize_entry("discount_data", discount_data)?
            }
            CatalogObjectData::Tax { tax_data } => map.serialize_entry("tax_data", tax_data)?,
            CatalogObjectData::ModifierList { modifier_list_data } => {
                map.serialize_entry("modifier_list_data", modifier_list_data)?
            }
            CatalogObjectData::Modifier { modifier_data } => {
                map.serialize_entry("modifier_data", modifier_data)?
            }
            CatalogObjectData::Item { item_data } => map.serialize_entry("item_data", item_data)?,
            CatalogObjectData::ItemVariation { item_variation_data } => {
                map.serialize_entry("item_variation_data", item_variation_data)?
            }
            CatalogObjectData::Other => {}
        }
        if let Some(version) = self.version {
            map.serialize_entry("version", &version)?;
        }
        if let Some(updated_at) = &self.updated_at {
            map.serialize_entry("updated_at", updated_at)?;
        }
        if self.is_deleted {
            map.serialize_entry("is_deleted", &true)?;
        }
        if let Some(all) = self.present_at_all_locations {
            map.serialize_entry("present_at_all_locations", &all)?;
        }
        if !self.present_at_location_ids.is_empty() {
            map.serialize_entry("present_at_location_ids", &self.present_at_location_ids)?;
        }
        if !self.absent_at_location_ids.is_empty() {
            map.serialize_entry("absent_at_location_ids", &self.absent_at_location_ids)?;
        }
        if !self.catalog_v1_ids.is_empty() {
            map.serialize_entry("catalog_v1_ids", &self.catalog_v1_ids)?;
        }
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl CatalogObject {
    /// Create an object with only an id and a payload.
    pub fn new(id: impl Into<String>, data: CatalogObjectData) -> Self {
        Self {
            id: id.into(),
            data,
            version: None,
            updated_at: None,
            is_deleted: false,
            present_at_all_locations: None,
            present_at_location_ids: Vec::new(),
            absent_at_location_ids: Vec::new(),
            catalog_v1_ids: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn category(id: impl Into<String>, category_data: CatalogCategory) -> Self {
        Self::new(id, CatalogObjectData::Category { category_data })
    }

    pub fn discount(id: impl Into<String>, discount_data: CatalogDiscount) -> Self {
        Self::new(id, CatalogObjectData::Discount { discount_data })
    }

    pub fn tax(id: impl Into<String>, tax_data: CatalogTax) -> Self {
        Self::new(id, CatalogObjectData::Tax { tax_data })
    }

    pub fn modifier_list(id: impl Into<String>, modifier_list_data: CatalogModifierList) -> Self {
        Self::new(id, CatalogObjectData::ModifierList { modifier_list_data })
    }

    pub fn modifier(id: impl Into<String>, modifier_data: CatalogModifier) -> Self {
        Self::new(id, CatalogObjectData::Modifier { modifier_data })
    }

    pub fn item(id: impl Into<String>, item_data: CatalogItem) -> Self {
        Self::new(id, CatalogObjectData::Item { item_data })
    }

    pub fn item_variation(
        id: impl Into<String>,
        item_variation_data: CatalogItemVariation,
    ) -> Self {
        Self::new(id, CatalogObjectData::ItemVariation { item_variation_data })
    }

    pub fn object_type(&self) -> Option<CatalogObjectType> {
        self.data.object_type()
    }

    /// True when the id was generated on the client and not yet assigned by
    /// the server.
    pub fn has_client_id(&self) -> bool {
        self.id.starts_with(crate::config::CloneConfig::CLIENT_ID_PREFIX)
    }

    pub fn location_presence(&self) -> LocationPresence {
        LocationPresence {
            present_at_all_locations: self.present_at_all_locations,
            present_at_location_ids: self.present_at_location_ids.clone(),
            absent_at_location_ids: self.absent_at_location_ids.clone(),
        }
    }

    pub fn set_location_presence(&mut self, presence: LocationPresence) {
        self.present_at_all_locations = presence.present_at_all_locations;
        self.present_at_location_ids = presence.present_at_location_ids;
        self.absent_at_location_ids = presence.absent_at_location_ids;
    }

    pub fn category_data(&self) -> Option<&CatalogCategory> {
        match &self.data {
            CatalogObjectData::Category { category_data } => Some(category_data),
            _ => None,
        }
    }

    pub fn discount_data(&self) -> Option<&CatalogDiscount> {
        match &self.data {
            CatalogObjectData::Discount { discount_data } => Some(discount_data),
            _ => None,
        }
    }

    pub fn tax_data(&self) -> Option<&CatalogTax> {
        match &self.data {
            CatalogObjectData::Tax { tax_data } => Some(tax_data),
            _ => None,
        }
    }

    pub fn modifier_list_data(&self) -> Option<&CatalogModifierList> {
        match &self.data {
            CatalogObjectData::ModifierList { modifier_list_data } => Some(modifier_list_data),
            _ => None,
        }
    }

    pub fn modifier_list_data_mut(&mut self) -> Option<&mut CatalogModifierList> {
        match &mut self.data {
            CatalogObjectData::ModifierList { modifier_list_data } => Some(modifier_list_data),
            _ => None,
        }
    }

    pub fn modifier_data(&self) -> Option<&CatalogModifier> {
        match &self.data {
            CatalogObjectData::Modifier { modifier_data } => Some(modifier_data),
            _ => None,
        }
    }

    pub fn modifier_data_mut(&mut self) -> Option<&mut CatalogModifier> {
        match &mut self.data {
            CatalogObjectData::Modifier { modifier_data } => Some(modifier_data),
            _ => None,
        }
    }

    pub fn item_data(&self) -> Option<&CatalogItem> {
        match &self.data {
            CatalogObjectData::Item { item_data } => Some(item_data),
            _ => None,
        }
    }

    pub fn item_data_mut(&mut self) -> Option<&mut CatalogItem> {
        match &mut self.data {
            CatalogObjectData::Item { item_data } => Some(item_data),
            _ => None,
        }
    }

    pub fn item_variation_data(&self) -> Option<&CatalogItemVariation> {
        match &self.data {
            CatalogObjectData::ItemVariation { item_variation_data } => Some(item_variation_data),
            _ => None,
        }
    }

    pub fn item_variation_data_mut(&mut self) -> Option<&mut CatalogItemVariation> {
        match &mut self.data {
            CatalogObjectData::ItemVariation { item_variation_data } => Some(item_variation_data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogCategory {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    FixedPercentage,
    FixedAmount,
    VariablePercentage,
    VariableAmount,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::FixedPercentage => "FIXED_PERCENTAGE",
            DiscountType::FixedAmount => "FIXED_AMOUNT",
            DiscountType::VariablePercentage => "VARIABLE_PERCENTAGE",
            DiscountType::VariableAmount => "VARIABLE_AMOUNT",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDiscount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<DiscountType>,
    /// Decimal string, e.g. `"7.25"` for 7.25%.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxInclusionType {
    Additive,
    Inclusive,
}

impl TaxInclusionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxInclusionType::Additive => "ADDITIVE",
            TaxInclusionType::Inclusive => "INCLUSIVE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTax {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculation_phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion_type: Option<TaxInclusionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to_custom_amounts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sub-classification of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Regular,
    GiftCard,
    AppointmentsService,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemModifierListInfo {
    pub modifier_list_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected_modifiers: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected_modifiers: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItemModifierListInfo {
    pub fn new(modifier_list_id: impl Into<String>) -> Self {
        Self {
            modifier_list_id: modifier_list_id.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tax_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifier_list_info: Vec<CatalogItemModifierListInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<CatalogObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItem {
    /// Regular items, and items that predate product types, take part in
    /// cloning. Gift cards and appointment services never do.
    pub fn is_regular(&self) -> bool {
        matches!(self.product_type, None | Some(ProductType::Regular))
    }
}

/// Per-location price override on a variation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemVariationLocationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_inventory: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemVariation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub location_overrides: Vec<ItemVariationLocationOverrides>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogItemVariation {
    pub fn priced(name: impl Into<String>, price_money: Option<Money>) -> Self {
        Self {
            name: Some(name.into()),
            price_money,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogModifierList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<CatalogObject>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogModifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_money: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier_list_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogModifier {
    pub fn priced(name: impl Into<String>, price_money: Option<Money>) -> Self {
        Self {
            name: Some(name.into()),
            price_money,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_item_with_variations() {
        let value = json!({
            "type": "ITEM",
            "id": "ITEM1",
            "version": 1700000000000i64,
            "updated_at": "2024-01-01T00:00:00Z",
            "present_at_all_locations": true,
            "catalog_v1_ids": [{"catalog_v1_id": "v1", "location_id": "L1"}],
            "item_data": {
                "name": "Coffee",
                "category_id": "CAT1",
                "product_type": "REGULAR",
                "variations": [{
                    "type": "ITEM_VARIATION",
                    "id": "VAR1",
                    "item_variation_data": {
                        "item_id": "ITEM1",
                        "name": "Small",
                        "price_money": {"amount": 100, "currency": "USD"}
                    }
                }]
            }
        });

        let object: CatalogObject = serde_json::from_value(value).unwrap();
        assert_eq!(object.object_type(), Some(CatalogObjectType::Item));
        assert_eq!(object.version, Some(1700000000000));
        assert_eq!(object.catalog_v1_ids.len(), 1);

        let item = object.item_data().unwrap();
        assert_eq!(item.name.as_deref(), Some("Coffee"));
        assert!(item.is_regular());
        let variation = item.variations[0].item_variation_data().unwrap();
        assert_eq!(variation.price_money, Some(Money::new(100, "USD")));
    }

    #[test]
    fn test_unknown_type_deserializes_as_other() {
        let object: CatalogObject = serde_json::from_value(json!({
            "type": "IMAGE",
            "id": "IMG1",
            "image_data": {"url": "https://example.com/a.png"}
        }))
        .unwrap();
        assert_eq!(object.data, CatalogObjectData::Other);
        assert_eq!(object.object_type(), None);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let value = json!({
            "type": "ITEM",
            "id": "ITEM1",
            "version": 3,
            "custom_attribute_values": {"k": {"string_value": "v"}},
            "item_data": {
                "name": "Coffee",
                "abbreviation": "Cf",
                "image_ids": ["IMG1"],
                "modifier_list_info": [{"modifier_list_id": "ML1", "ordinal": 2}],
                "variations": [{
                    "type": "ITEM_VARIATION",
                    "id": "VAR1",
                    "item_variation_data": {
                        "item_id": "ITEM1",
                        "name": "Small",
                        "track_inventory": true,
                        "sellable": true
                    }
                }]
            }
        });

        let object: CatalogObject = serde_json::from_value(value.clone()).unwrap();
        let item = object.item_data().unwrap();
        assert_eq!(item.extra.get("abbreviation"), Some(&json!("Cf")));
        assert_eq!(
            item.variations[0].item_variation_data().unwrap().extra.get("sellable"),
            Some(&json!(true))
        );
        assert!(object.extra.contains_key("custom_attribute_values"));

        assert_eq!(serde_json::to_value(&object).unwrap(), value);
    }

    #[test]
    fn test_unknown_kind_round_trips() {
        let value = json!({
            "type": "IMAGE",
            "id": "IMG1",
            "image_data": {"url": "https://example.com/a.png"}
        });
        let object: CatalogObject = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(serde_json::to_value(&object).unwrap(), value);
    }

    #[test]
    fn test_null_payload_reads_as_empty() {
        let object: CatalogObject =
            serde_json::from_value(json!({"type": "CATEGORY", "id": "C1", "category_data": null}))
                .unwrap();
        assert_eq!(object.category_data(), Some(&CatalogCategory::default()));
    }

    #[test]
    fn test_serialize_skips_cleared_metadata() {
        let object = CatalogObject::category("#abc", CatalogCategory::named("Drinks"));
        let value = serde_json::to_value(&object).unwrap();
        assert_eq!(
            value,
            json!({"type": "CATEGORY", "id": "#abc", "category_data": {"name": "Drinks"}})
        );
        assert!(object.has_client_id());
    }

    #[test]
    fn test_product_type_regular_filter() {
        let mut item = CatalogItem::default();
        assert!(item.is_regular());
        item.product_type = Some(ProductType::Regular);
        assert!(item.is_regular());
        item.product_type = Some(ProductType::GiftCard);
        assert!(!item.is_regular());
        item.product_type = Some(ProductType::AppointmentsService);
        assert!(!item.is_regular());
    }
}
