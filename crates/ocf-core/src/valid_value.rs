//! Valid values and reference values.

use serde::{Deserialize, Serialize};

use crate::any::AnyReferenceable;
use crate::bean::{extends, impl_bean, is_false};
use crate::element::{PropertyBase, Referenceable};

/// One permitted value for a data field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ValidValue {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// The value as stored in data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deprecated: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_case_sensitive: bool,
}

impl ValidValue {
    /// Returns `true` if `value` matches the preferred value, honouring
    /// case sensitivity.
    pub fn matches(&self, value: &str) -> bool {
        match self.preferred_value.as_deref() {
            Some(preferred) if self.is_case_sensitive => preferred == value,
            Some(preferred) => preferred.eq_ignore_ascii_case(value),
            None => false,
        }
    }
}

/// A named collection of valid values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ValidValueSet {
    #[serde(flatten, with = "ValidValue")]
    pub valid_value: ValidValue,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<ValidValue>,
}

impl ValidValueSet {
    /// Finds the first non-deprecated member matching `value`.
    pub fn lookup(&self, value: &str) -> Option<&ValidValue> {
        self.members
            .iter()
            .find(|m| !m.is_deprecated && m.matches(value))
    }

    /// Returns `true` if `value` is permitted by this set.
    pub fn permits(&self, value: &str) -> bool {
        self.lookup(value).is_some()
    }
}

/// Links an element to the valid values its data must take.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ValidValueAssignment {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    /// When false the valid values are a recommendation only.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict_requirement: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_values: Option<ValidValueSet>,
}

/// Links an element to a reference value that tags or categorises it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ReferenceValueAssignment {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,

    /// Percentage.
    #[serde(default)]
    pub confidence: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward_property_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_value: Option<ValidValue>,
}

/// A reference value assignment seen from the reference value: the element
/// it is assigned to, plus the assignment's properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ReferenceValueAssignmentItem {
    #[serde(flatten, with = "ReferenceValueAssignment")]
    pub assignment: ReferenceValueAssignment,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_item: Option<Box<AnyReferenceable>>,
}

extends!(ValidValue => Referenceable, referenceable);
extends!(ValidValueSet => ValidValue, valid_value);
extends!(ValidValueAssignment => PropertyBase, base);
extends!(ReferenceValueAssignment => PropertyBase, base);
extends!(ReferenceValueAssignmentItem => ReferenceValueAssignment, assignment);

impl_bean!(
    ValidValue,
    ValidValueSet,
    ValidValueAssignment,
    ReferenceValueAssignment,
    ReferenceValueAssignmentItem,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetBuilder;
    use pretty_assertions::assert_eq;

    fn value(preferred: &str) -> ValidValue {
        ValidValue {
            preferred_value: Some(preferred.into()),
            ..Default::default()
        }
    }

    #[test]
    fn set_lookup_honours_case_and_deprecation() {
        let mut set = ValidValueSet::default();
        set.members.push(value("GB"));
        let mut us = value("US");
        us.is_case_sensitive = true;
        set.members.push(us);
        let mut ussr = value("SU");
        ussr.is_deprecated = true;
        set.members.push(ussr);

        assert!(set.permits("gb"));
        assert!(set.permits("US"));
        assert!(!set.permits("us"));
        assert!(!set.permits("SU"));
    }

    #[test]
    fn assignment_json_shape() {
        let mut set = ValidValueSet::default();
        set.qualified_name = Some("ValidValues:countryCodes".into());
        set.members.push(value("FR"));

        let assignment = ValidValueAssignment {
            strict_requirement: true,
            valid_values: Some(set),
            ..Default::default()
        };

        let v = serde_json::to_value(&assignment).unwrap();
        assert_eq!(v["strictRequirement"], true);
        assert_eq!(v["validValues"]["qualifiedName"], "ValidValues:countryCodes");
        assert_eq!(v["validValues"]["members"][0]["preferredValue"], "FR");
    }

    #[test]
    fn assignment_item_decodes_assigned_asset() {
        let mut item = ReferenceValueAssignmentItem::default();
        item.attribute_name = Some("region".into());
        item.confidence = 80;
        item.assigned_item = Some(Box::new(
            AssetBuilder::new("Asset:sales").resource_name("sales").build().into(),
        ));

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""class":"Asset""#));
        let back: ReferenceValueAssignmentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
        assert!(matches!(
            back.assigned_item.as_deref(),
            Some(AnyReferenceable::Asset(_))
        ));
    }
}
