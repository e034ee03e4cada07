//! The header and identity chain shared by every first-class metadata element:
//! `PropertyBase` → `ElementControlHeader` → `ElementHeader` → `ElementBase`
//! → `Referenceable`.
//!
//! Each level embeds its parent by value (`#[serde(flatten)]`), so the JSON
//! form is a single flat object and `PartialEq` covers every level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bean::{current_version, extends, impl_bean, CURRENT_PROPERTIES_VERSION};
use crate::classification::ElementClassification;
use crate::enums::{ElementOriginCategory, ElementStatus};
use crate::timestamp::Timestamp;

/// Open map of properties that a repository subtype defines but the bean does
/// not model explicitly.
pub type ExtendedProperties = BTreeMap<String, serde_json::Value>;

/// Free-form string properties supplied by the element's owner.
pub type AdditionalProperties = BTreeMap<String, String>;

/// Root of every bean: carries the header version used for compatibility
/// checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct PropertyBase {
    #[serde(default = "current_version")]
    pub header_version: i64,
}

impl Default for PropertyBase {
    fn default() -> Self {
        Self {
            header_version: CURRENT_PROPERTIES_VERSION,
        }
    }
}

/// Describes the repository type backing an element instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementType {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(rename = "typeId", default, skip_serializing_if = "Option::is_none")]
    pub type_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Super types from the immediate parent up to the root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub super_type_names: Vec<String>,

    #[serde(default)]
    pub type_version: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_description: Option<String>,
}

impl ElementType {
    /// Creates a type descriptor with just a name.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Default::default()
        }
    }

    /// Returns `true` if this type is, or inherits from, `type_name`.
    pub fn is_type_of(&self, type_name: &str) -> bool {
        self.type_name.as_deref() == Some(type_name)
            || self.super_type_names.iter().any(|t| t == type_name)
    }
}

/// Where the element's home copy lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementOrigin {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_server: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_category: Option<ElementOriginCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_metadata_collection_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_metadata_collection_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// Who created and maintains an element, and when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementVersions {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintained_by: Vec<String>,

    /// Serialised as epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<Timestamp>,

    #[serde(default)]
    pub version: i64,
}

/// Type, status and provenance common to elements and classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementControlHeader {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ElementStatus>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<ElementType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<ElementOrigin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions: Option<ElementVersions>,
}

impl ElementControlHeader {
    /// Returns the type name, if a type descriptor is present.
    pub fn type_name(&self) -> Option<&str> {
        self.element_type.as_ref()?.type_name.as_deref()
    }
}

/// Identity of a first-class element plus its attached classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementHeader {
    #[serde(flatten, with = "ElementControlHeader")]
    pub control: ElementControlHeader,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Ordered; each classification belongs to this element only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classifications: Vec<ElementClassification>,
}

impl ElementHeader {
    /// Finds an attached classification by name.
    pub fn classification(&self, name: &str) -> Option<&ElementClassification> {
        self.classifications
            .iter()
            .find(|c| c.classification_name.as_deref() == Some(name))
    }

    /// Returns `true` if a classification with this name is attached.
    pub fn is_classified_as(&self, name: &str) -> bool {
        self.classification(name).is_some()
    }
}

/// Element header plus the open extended-properties map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementBase {
    #[serde(flatten, with = "ElementHeader")]
    pub header: ElementHeader,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extended_properties: ExtendedProperties,
}

/// An element with a unique, human-assigned qualified name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Referenceable {
    #[serde(flatten, with = "ElementBase")]
    pub base: ElementBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualified_name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub additional_properties: AdditionalProperties,
}

impl Referenceable {
    /// Creates a referenceable with the given qualified name.
    pub fn with_qualified_name(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: Some(qualified_name.into()),
            ..Default::default()
        }
    }
}

extends!(ElementType => PropertyBase, base);
extends!(ElementOrigin => PropertyBase, base);
extends!(ElementVersions => PropertyBase, base);
extends!(ElementControlHeader => PropertyBase, base);
extends!(ElementHeader => ElementControlHeader, control);
extends!(ElementBase => ElementHeader, header);
extends!(Referenceable => ElementBase, base);

impl_bean!(
    PropertyBase,
    ElementType,
    ElementOrigin,
    ElementVersions,
    ElementControlHeader,
    ElementHeader,
    ElementBase,
    Referenceable,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::Bean;
    use crate::enums::ClassificationOrigin;
    use pretty_assertions::assert_eq;

    fn sample_referenceable() -> Referenceable {
        let mut r = Referenceable::with_qualified_name("Database:sales");
        r.guid = Some("5b4c1e2a".into());
        r.url = Some("https://example.com/5b4c1e2a".into());
        r.status = Some(ElementStatus::Active);
        r.element_type = Some(ElementType {
            type_name: Some("Database".into()),
            super_type_names: vec!["DataStore".into(), "Asset".into(), "Referenceable".into()],
            type_version: 3,
            ..Default::default()
        });
        r.versions = Some(ElementVersions {
            created_by: Some("erin".into()),
            maintained_by: vec!["erin".into(), "peter".into()],
            create_time: Timestamp::from_millis(1_700_000_000_000),
            version: 4,
            ..Default::default()
        });
        r.classifications.push(ElementClassification::named("Confidentiality"));
        r.extended_properties
            .insert("deployedImplementationType".into(), serde_json::json!("PostgreSQL"));
        r.additional_properties.insert("owner".into(), "sales".into());
        r
    }

    #[test]
    fn default_carries_current_header_version() {
        let r = Referenceable::default();
        assert_eq!(r.header_version(), CURRENT_PROPERTIES_VERSION);
        assert!(r.guid.is_none());
        assert!(r.classifications.is_empty());
    }

    #[test]
    fn copy_from_template_is_equal_and_independent() {
        let template = sample_referenceable();
        let mut copy = Referenceable::from_template(Some(&template));
        assert_eq!(copy, template);

        copy.classifications.clear();
        copy.additional_properties.insert("extra".into(), "x".into());
        if let Some(versions) = copy.versions.as_mut() {
            versions.maintained_by.push("zach".into());
        }

        assert_eq!(template.classifications.len(), 1);
        assert!(!template.additional_properties.contains_key("extra"));
        assert_eq!(template.versions.as_ref().unwrap().maintained_by.len(), 2);
        assert_ne!(copy, template);
    }

    #[test]
    fn copy_from_missing_template_is_default() {
        assert_eq!(Referenceable::from_template(None), Referenceable::default());
    }

    #[test]
    fn json_is_flat_and_omits_unset_fields() {
        let mut r = Referenceable::with_qualified_name("Glossary:finance");
        r.guid = Some("g1".into());
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "class": "Referenceable",
                "headerVersion": 1,
                "guid": "g1",
                "qualifiedName": "Glossary:finance"
            })
        );
    }

    #[test]
    fn json_roundtrip_preserves_every_level() {
        let r = sample_referenceable();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains(r#""type":{"#));
        assert!(json.contains(r#""createTime":1700000000000"#));
        let back: Referenceable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn sub_millisecond_times_survive_roundtrip() {
        let at = chrono::DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        let mut r = Referenceable::default();
        r.versions = Some(ElementVersions {
            create_time: Some(at.into()),
            update_time: Some(Timestamp::now()),
            ..Default::default()
        });

        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains(r#""createTime":1700000000123"#));
        let back: Referenceable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let json = r#"{
            "headerVersion": 1,
            "qualifiedName": "Topic:orders",
            "someFutureProperty": {"nested": true},
            "anotherOne": 42
        }"#;
        let r: Referenceable = serde_json::from_str(json).unwrap();
        assert_eq!(r.qualified_name.as_deref(), Some("Topic:orders"));
    }

    #[test]
    fn missing_header_version_defaults_to_current() {
        let r: Referenceable = serde_json::from_str(r#"{"guid":"x"}"#).unwrap();
        assert_eq!(r.header_version, CURRENT_PROPERTIES_VERSION);
    }

    #[test]
    fn classification_lookup() {
        let mut header = ElementHeader::default();
        let mut c = ElementClassification::named("Memento");
        c.classification_origin = Some(ClassificationOrigin::Propagated);
        header.classifications.push(c);

        assert!(header.is_classified_as("Memento"));
        assert!(!header.is_classified_as("Anchors"));
        assert_eq!(
            header.classification("Memento").unwrap().classification_origin,
            Some(ClassificationOrigin::Propagated)
        );
    }

    #[test]
    fn element_type_inheritance_check() {
        let t = ElementType {
            type_name: Some("CSVFile".into()),
            super_type_names: vec!["DataFile".into(), "Asset".into()],
            ..Default::default()
        };
        assert!(t.is_type_of("CSVFile"));
        assert!(t.is_type_of("Asset"));
        assert!(!t.is_type_of("Process"));
        assert_eq!(ElementType::named("Asset").type_name.as_deref(), Some("Asset"));
    }
}
