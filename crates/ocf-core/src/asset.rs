//! Assets and the governed-referenceable layer beneath them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::any::AnyReferenceable;
use crate::bean::{extends, impl_bean};
use crate::element::{AdditionalProperties, ElementType, PropertyBase, Referenceable};

/// A referenceable element carrying ownership, zoning and origin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct GovernedReferenceable {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    /// Governance zones the element is a member of.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_membership: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_property_name: Option<String>,

    #[serde(rename = "originOrganizationGUID", default, skip_serializing_if = "Option::is_none")]
    pub origin_organization_guid: Option<String>,

    #[serde(rename = "originBusinessCapabilityGUID", default, skip_serializing_if = "Option::is_none")]
    pub origin_business_capability_guid: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub other_origin_values: AdditionalProperties,
}

impl GovernedReferenceable {
    /// Returns `true` if the element belongs to `zone`.
    pub fn in_zone(&self, zone: &str) -> bool {
        self.zone_membership.iter().any(|z| z == zone)
    }
}

/// A valuable resource: a data store, API, process or similar.
///
/// `name` and `description` are the legacy fields; `resource_name`,
/// `display_name`, `resource_description` and `display_description`
/// replace them. Both generations are public and serialized as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Asset {
    #[serde(flatten, with = "GovernedReferenceable")]
    pub governed: GovernedReferenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_implementation_type: Option<String>,
}

impl Asset {
    /// The display name, or the resource name when no display name is set.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.resource_name.as_deref())
    }

    /// Legacy name: display name, then resource name, then the stored name.
    #[deprecated(note = "use `display_name()` or the `resource_name` field")]
    pub fn name(&self) -> Option<&str> {
        self.display_name
            .as_deref()
            .or(self.resource_name.as_deref())
            .or(self.name.as_deref())
    }

    /// Legacy description: display description, then resource description,
    /// then the stored description.
    #[deprecated(note = "use the `display_description` or `resource_description` fields")]
    pub fn description(&self) -> Option<&str> {
        self.display_description
            .as_deref()
            .or(self.resource_description.as_deref())
            .or(self.description.as_deref())
    }
}

/// Builder for constructing an [`Asset`] with a fluent API.
pub struct AssetBuilder {
    asset: Asset,
}

impl AssetBuilder {
    /// Creates a new builder with the given qualified name.
    pub fn new(qualified_name: impl Into<String>) -> Self {
        let mut asset = Asset::default();
        asset.qualified_name = Some(qualified_name.into());
        Self { asset }
    }

    pub fn guid(mut self, guid: impl Into<String>) -> Self {
        self.asset.guid = Some(guid.into());
        self
    }

    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.asset.element_type = Some(ElementType::named(type_name));
        self
    }

    pub fn resource_name(mut self, name: impl Into<String>) -> Self {
        self.asset.resource_name = Some(name.into());
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.asset.display_name = Some(name.into());
        self
    }

    pub fn version_identifier(mut self, version: impl Into<String>) -> Self {
        self.asset.version_identifier = Some(version.into());
        self
    }

    pub fn resource_description(mut self, description: impl Into<String>) -> Self {
        self.asset.resource_description = Some(description.into());
        self
    }

    pub fn display_description(mut self, description: impl Into<String>) -> Self {
        self.asset.display_description = Some(description.into());
        self
    }

    pub fn display_summary(mut self, summary: impl Into<String>) -> Self {
        self.asset.display_summary = Some(summary.into());
        self
    }

    pub fn abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.asset.abbreviation = Some(abbreviation.into());
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.asset.usage = Some(usage.into());
        self
    }

    pub fn deployed_implementation_type(mut self, t: impl Into<String>) -> Self {
        self.asset.deployed_implementation_type = Some(t.into());
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.asset.owner = Some(owner.into());
        self
    }

    pub fn zone(mut self, zone: impl Into<String>) -> Self {
        self.asset.zone_membership.push(zone.into());
        self
    }

    pub fn additional_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.asset.additional_properties.insert(key.into(), value.into());
        self
    }

    /// Consumes the builder and returns the asset.
    pub fn build(self) -> Asset {
        self.asset
    }
}

/// A deployed capability of a software server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SoftwareCapability {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployed_implementation_type: Option<String>,
}

/// An element linked to an asset through a named relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct RelatedAsset {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<ElementType>,

    /// Name of the relationship end the related element sits on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationship_properties: AdditionalProperties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_element: Option<Box<AnyReferenceable>>,
}

impl RelatedAsset {
    /// The related element when it decoded as an asset.
    pub fn related_asset(&self) -> Option<&Asset> {
        match self.related_element.as_deref() {
            Some(AnyReferenceable::Asset(asset)) => Some(asset),
            _ => None,
        }
    }
}

extends!(GovernedReferenceable => Referenceable, referenceable);
extends!(Asset => GovernedReferenceable, governed);
extends!(SoftwareCapability => Referenceable, referenceable);
extends!(RelatedAsset => PropertyBase, base);

impl_bean!(GovernedReferenceable, Asset, SoftwareCapability, RelatedAsset);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::Bean;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_name_falls_back_to_resource_name() {
        let mut a = Asset::default();
        a.resource_name = Some("file1".into());
        assert_eq!(a.display_name(), Some("file1"));

        a.display_name = Some("Customer file".into());
        assert_eq!(a.display_name(), Some("Customer file"));
    }

    #[test]
    #[allow(deprecated)]
    fn legacy_accessors_chain_through_three_fields() {
        let mut a = Asset::default();
        assert_eq!(a.name(), None);

        a.name = Some("legacy".into());
        assert_eq!(a.name(), Some("legacy"));
        a.resource_name = Some("resource".into());
        assert_eq!(a.name(), Some("resource"));
        a.display_name = Some("display".into());
        assert_eq!(a.name(), Some("display"));

        a.description = Some("old".into());
        assert_eq!(a.description(), Some("old"));
        a.resource_description = Some("resource".into());
        assert_eq!(a.description(), Some("resource"));
        a.display_description = Some("display".into());
        assert_eq!(a.description(), Some("display"));
    }

    #[test]
    fn serialization_writes_stored_fields_only() {
        let mut a = Asset::default();
        a.resource_name = Some("file1".into());

        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["resourceName"], "file1");
        assert!(value.get("displayName").is_none());
        assert!(value.get("name").is_none());
    }

    #[test]
    fn builder_populates_inherited_fields() {
        let asset = AssetBuilder::new("Asset:customers.csv")
            .guid("guid-1")
            .type_name("CSVFile")
            .resource_name("customers.csv")
            .owner("erinoverview")
            .zone("quarantine")
            .additional_property("encoding", "UTF-8")
            .build();

        assert_eq!(asset.qualified_name.as_deref(), Some("Asset:customers.csv"));
        assert_eq!(asset.type_name(), Some("CSVFile"));
        assert!(asset.in_zone("quarantine"));
        assert_eq!(asset.additional_properties["encoding"], "UTF-8");

        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["guid"], "guid-1");
        assert_eq!(value["type"]["typeName"], "CSVFile");
        assert_eq!(value["zoneMembership"][0], "quarantine");
    }

    #[test]
    fn template_copy_is_independent() {
        let template = AssetBuilder::new("Asset:a").zone("landing").build();
        let mut copy = Asset::from_template(Some(&template));
        assert_eq!(copy, template);
        assert_eq!(copy.fingerprint(), template.fingerprint());

        copy.zone_membership.push("trash-can".into());
        copy.other_origin_values.insert("dept".into(), "finance".into());
        assert_eq!(template.zone_membership, vec!["landing".to_string()]);
        assert!(template.other_origin_values.is_empty());
        assert_ne!(copy.fingerprint(), template.fingerprint());
    }

    #[test]
    fn null_template_gives_default() {
        assert_eq!(Asset::from_template(None), Asset::default());
        assert_eq!(Asset::from_template(None).header_version(), 1);
    }

    #[test]
    fn roundtrip_keeps_every_generation_of_fields() {
        let mut a = AssetBuilder::new("Asset:b")
            .display_name("B")
            .display_summary("summary")
            .build();
        a.name = Some("b-legacy".into());
        a.description = Some("legacy description".into());
        a.origin_organization_guid = Some("org-1".into());

        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains("\"originOrganizationGUID\":\"org-1\""));
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }
}
