//! Equivalence keys for catalog objects.
//!
//! Two objects of the same kind are considered "the same" across accounts
//! when their fingerprints are equal. A fingerprint is built from payload
//! fields only, in a fixed order, never from ids or versions.

use crate::config::CloneConfig;
use crate::models::{CatalogObject, Money};

/// Comparison key for one catalog object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Joins fields with [`CloneConfig::FINGERPRINT_DELIMITER`].
///
/// Absent values encode as [`CloneConfig::NULL_FIELD`]. Money encodes as its
/// integer minor-unit amount. Delimiter collisions inside field values are
/// not escaped.
#[derive(Debug, Default)]
pub struct FingerprintBuilder {
    fields: Vec<String>,
}

impl FingerprintBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, value: Option<&str>) -> Self {
        self.fields
            .push(value.unwrap_or(CloneConfig::NULL_FIELD).to_string());
        self
    }

    pub fn money(mut self, money: Option<&Money>) -> Self {
        let encoded = match money.and_then(|m| m.amount) {
            Some(amount) => amount.to_string(),
            None => CloneConfig::NULL_FIELD.to_string(),
        };
        self.fields.push(encoded);
        self
    }

    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.fields.join(CloneConfig::FINGERPRINT_DELIMITER))
    }
}

/// `name:::price` of an item variation.
pub fn variation_fingerprint(variation: &CatalogObject) -> Fingerprint {
    let data = variation.item_variation_data();
    FingerprintBuilder::new()
        .field(data.and_then(|d| d.name.as_deref()))
        .money(data.and_then(|d| d.price_money.as_ref()))
        .finish()
}

/// `name:::price` of a modifier.
pub fn modifier_fingerprint(modifier: &CatalogObject) -> Fingerprint {
    let data = modifier.modifier_data();
    FingerprintBuilder::new()
        .field(data.and_then(|d| d.name.as_deref()))
        .money(data.and_then(|d| d.price_money.as_ref()))
        .finish()
}
