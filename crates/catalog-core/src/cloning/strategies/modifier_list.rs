use super::{expect_payload, CloneStrategy};
use crate::cloning::fingerprint::{modifier_fingerprint, Fingerprint, FingerprintBuilder};
use crate::cloning::sanitize::{strip_metadata, strip_nested_metadata, SanitizedObject};
use crate::error::Result;
use crate::models::{CatalogObject, CatalogObjectType};
use std::collections::HashSet;

/// Modifier lists match by name. A matched list absorbs source modifiers it
/// does not already carry (compared on `name:::price`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierListStrategy;

/// Modifier copy owned by `parent` in the target account.
fn nested_modifier(parent: &CatalogObject, modifier: &CatalogObject) -> CatalogObject {
    let mut nested = strip_nested_metadata(parent, modifier);
    if let Some(data) = nested.modifier_data_mut() {
        data.modifier_list_id = Some(parent.id.clone());
    }
    nested
}

impl CloneStrategy for ModifierListStrategy {
    fn object_type(&self) -> CatalogObjectType {
        CatalogObjectType::ModifierList
    }

    fn present_at_all_locations_by_default(&self) -> bool {
        true
    }

    fn fingerprint(&self, object: &CatalogObject, _from_source: bool) -> Result<Fingerprint> {
        let data = expect_payload(
            object.modifier_list_data(),
            CatalogObjectType::ModifierList,
            object,
        )?;
        Ok(FingerprintBuilder::new().field(data.name.as_deref()).finish())
    }

    fn sanitize(&self, object: &CatalogObject) -> Result<SanitizedObject> {
        let data = expect_payload(
            object.modifier_list_data(),
            CatalogObjectType::ModifierList,
            object,
        )?;
        let mut sanitized = strip_metadata(object, self.present_at_all_locations_by_default());
        let modifiers: Vec<CatalogObject> = data
            .modifiers
            .iter()
            .map(|m| nested_modifier(&sanitized.object, m))
            .collect();
        if let Some(list) = sanitized.object.modifier_list_data_mut() {
            list.modifiers = modifiers;
        }
        Ok(sanitized)
    }

    fn merge(
        &self,
        source: &CatalogObject,
        target: &CatalogObject,
    ) -> Result<Option<CatalogObject>> {
        let source_list = expect_payload(
            source.modifier_list_data(),
            CatalogObjectType::ModifierList,
            source,
        )?;
        let target_list = expect_payload(
            target.modifier_list_data(),
            CatalogObjectType::ModifierList,
            target,
        )?;

        let mut known: HashSet<Fingerprint> =
            target_list.modifiers.iter().map(modifier_fingerprint).collect();
        let appended: Vec<CatalogObject> = source_list
            .modifiers
            .iter()
            .filter(|m| known.insert(modifier_fingerprint(m)))
            .map(|m| nested_modifier(target, m))
            .collect();

        if appended.is_empty() {
            return Ok(None);
        }

        let mut merged = target.clone();
        if let Some(list) = merged.modifier_list_data_mut() {
            list.modifiers.extend(appended);
        }
        Ok(Some(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogModifier, CatalogModifierList, Money};

    fn list(id: &str, name: &str, modifiers: &[(&str, &str, i64)]) -> CatalogObject {
        CatalogObject::modifier_list(
            id,
            CatalogModifierList {
                name: Some(name.into()),
                modifiers: modifiers
                    .iter()
                    .map(|(mid, mname, price)| {
                        CatalogObject::modifier(
                            *mid,
                            CatalogModifier::priced(*mname, Some(Money::new(*price, "USD"))),
                        )
                    })
                    .collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_sanitize_reparents_modifiers() {
        let source = list("ML1", "Milk", &[("M1", "Oat", 50), ("M2", "Soy", 50)]);
        let sanitized = ModifierListStrategy.sanitize(&source).unwrap();
        let parent = &sanitized.object;

        assert!(parent.has_client_id());
        assert_eq!(parent.present_at_all_locations, Some(true));
        let modifiers = &parent.modifier_list_data().unwrap().modifiers;
        assert_eq!(modifiers.len(), 2);
        for modifier in modifiers {
            assert!(modifier.has_client_id());
            assert_ne!(modifier.id, parent.id);
            assert_eq!(
                modifier.modifier_data().unwrap().modifier_list_id.as_deref(),
                Some(parent.id.as_str())
            );
            assert_eq!(modifier.present_at_all_locations, Some(true));
        }
    }

    #[test]
    fn test_merge_appends_missing_modifiers() {
        let source = list("ML1", "Milk", &[("M1", "Oat", 50), ("M2", "Soy", 75)]);
        let mut target = list("ML9", "Milk", &[("M9", "Oat", 50)]);
        target.version = Some(7);

        let merged = ModifierListStrategy.merge(&source, &target).unwrap().unwrap();
        assert_eq!(merged.id, "ML9");
        assert_eq!(merged.version, Some(7));
        let modifiers = &merged.modifier_list_data().unwrap().modifiers;
        assert_eq!(modifiers.len(), 2);
        assert_eq!(modifiers[0].id, "M9");
        assert_eq!(
            modifiers[1].modifier_data().unwrap().name.as_deref(),
            Some("Soy")
        );
        assert_eq!(
            modifiers[1].modifier_data().unwrap().modifier_list_id.as_deref(),
            Some("ML9")
        );

        // The indexed target is untouched.
        assert_eq!(target.modifier_list_data().unwrap().modifiers.len(), 1);
    }

    #[test]
    fn test_merge_nothing_new() {
        let source = list("ML1", "Milk", &[("M1", "Oat", 50)]);
        let target = list("ML9", "Milk", &[("M9", "Oat", 50)]);
        assert!(ModifierListStrategy.merge(&source, &target).unwrap().is_none());
    }

    #[test]
    fn test_merge_keeps_unmodelled_target_fields() {
        let target: CatalogObject = serde_json::from_value(serde_json::json!({
            "type": "MODIFIER_LIST",
            "id": "ML9",
            "modifier_list_data": {
                "name": "Milk",
                "internal_name": "milk-options",
                "modifiers": [{
                    "type": "MODIFIER",
                    "id": "M9",
                    "modifier_data": {
                        "name": "Oat",
                        "price_money": {"amount": 50, "currency": "USD"},
                        "on_by_default": true
                    }
                }]
            }
        }))
        .unwrap();
        let source = list("ML1", "Milk", &[("M1", "Soy", 75)]);

        let merged = ModifierListStrategy.merge(&source, &target).unwrap().unwrap();
        let sent = serde_json::to_value(&merged).unwrap();

        assert_eq!(sent["modifier_list_data"]["internal_name"], "milk-options");
        let existing = &sent["modifier_list_data"]["modifiers"][0];
        assert_eq!(existing["id"], "M9");
        assert_eq!(existing["modifier_data"]["on_by_default"], true);
    }
}
