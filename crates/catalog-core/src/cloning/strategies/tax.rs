use super::{expect_payload, CloneStrategy};
use crate::cloning::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::error::Result;
use crate::models::{CatalogObject, CatalogObjectType};

/// Taxes match on `name:::percentage:::inclusion_type`. Location presence is
/// carried over as listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxStrategy;

impl CloneStrategy for TaxStrategy {
    fn object_type(&self) -> CatalogObjectType {
        CatalogObjectType::Tax
    }

    fn present_at_all_locations_by_default(&self) -> bool {
        false
    }

    fn fingerprint(&self, object: &CatalogObject, _from_source: bool) -> Result<Fingerprint> {
        let data = expect_payload(object.tax_data(), CatalogObjectType::Tax, object)?;
        Ok(FingerprintBuilder::new()
            .field(data.name.as_deref())
            .field(data.percentage.as_deref())
            .field(data.inclusion_type.map(|t| t.as_str()))
            .finish())
    }
}
