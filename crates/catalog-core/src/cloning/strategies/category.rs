use super::{expect_payload, CloneStrategy};
use crate::cloning::fingerprint::{Fingerprint, FingerprintBuilder};
use crate::error::Result;
use crate::models::{CatalogObject, CatalogObjectType};

/// Categories match by name and are always present at all locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryStrategy;

impl CloneStrategy for CategoryStrategy {
    fn object_type(&self) -> CatalogObjectType {
        CatalogObjectType::Category
    }

    fn present_at_all_locations_by_default(&self) -> bool {
        true
    }

    fn fingerprint(&self, object: &CatalogObject, _from_source: bool) -> Result<Fingerprint> {
        let data = expect_payload(object.category_data(), CatalogObjectType::Category, object)?;
        Ok(FingerprintBuilder::new().field(data.name.as_deref()).finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogCategory;

    #[test]
    fn test_fingerprint_is_name() {
        let strategy = CategoryStrategy;
        let named = CatalogObject::category("C1", CatalogCategory::named("Drinks"));
        assert_eq!(strategy.fingerprint(&named, true).unwrap().as_str(), "Drinks");

        let unnamed = CatalogObject::category("C2", CatalogCategory::default());
        assert_eq!(strategy.fingerprint(&unnamed, false).unwrap().as_str(), "null");
    }

    #[test]
    fn test_sanitize_forces_all_locations() {
        let mut source = CatalogObject::category("C1", CatalogCategory::named("Drinks"));
        source.present_at_all_locations = Some(false);
        let sanitized = CategoryStrategy.sanitize(&source).unwrap();
        assert_eq!(sanitized.object.present_at_all_locations, Some(true));
        assert!(CategoryStrategy.merge(&source, &source).unwrap().is_none());
    }
}
