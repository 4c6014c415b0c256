use super::{expect_payload, CloneStrategy};
use crate::cloning::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::config::DiscountOptions;
use crate::error::Result;
use crate::models::{CatalogObject, CatalogObjectType};

/// Discounts match on `name:::type:::percentage:::amount`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountStrategy {
    present_at_all_locations: bool,
}

impl DiscountStrategy {
    pub fn new(options: DiscountOptions) -> Self {
        Self {
            present_at_all_locations: options.present_at_all_locations,
        }
    }
}

impl CloneStrategy for DiscountStrategy {
    fn object_type(&self) -> CatalogObjectType {
        CatalogObjectType::Discount
    }

    fn present_at_all_locations_by_default(&self) -> bool {
        self.present_at_all_locations
    }

    fn fingerprint(&self, object: &CatalogObject, _from_source: bool) -> Result<Fingerprint> {
        let data = expect_payload(object.discount_data(), CatalogObjectType::Discount, object)?;
        Ok(FingerprintBuilder::new()
            .field(data.name.as_deref())
            .field(data.discount_type.map(|t| t.as_str()))
            .field(data.percentage.as_deref())
            .money(data.amount_money.as_ref())
            .finish())
    }
}
