//! Classifications attached to elements: the generic `ElementClassification`,
//! the four governance classifications, `SecurityTags` and `LatestChange`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean, polymorphic};
use crate::element::{ElementControlHeader, ExtendedProperties};
use crate::enums::{
    ClassificationOrigin, ConfidenceLevel, ConfidentialityLevel, CriticalityLevel,
    GovernanceClassificationStatus, LatestChangeAction, LatestChangeTarget, RetentionBasis,
};
use crate::timestamp::Timestamp;

/// Provenance shared by all classifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementClassificationHeader {
    #[serde(flatten, with = "ElementControlHeader")]
    pub control: ElementControlHeader,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_origin: Option<ClassificationOrigin>,

    /// GUID of the element the classification was propagated from.
    #[serde(
        rename = "classificationOriginGUID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub classification_origin_guid: Option<String>,
}

/// A named classification with an open property bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ElementClassification {
    #[serde(flatten, with = "ElementClassificationHeader")]
    pub header: ElementClassificationHeader,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub classification_properties: ExtendedProperties,
}

impl ElementClassification {
    /// Creates an assigned classification with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        let mut classification = Self {
            classification_name: Some(name.into()),
            ..Default::default()
        };
        classification.classification_origin = Some(ClassificationOrigin::Assigned);
        classification
    }

    /// Returns `true` if the classification was propagated from another element.
    pub fn is_propagated(&self) -> bool {
        self.classification_origin == Some(ClassificationOrigin::Propagated)
    }
}

/// Stewardship fields shared by the governance classifications.
///
/// `confidence` is a percentage; out-of-range values are stored as given and
/// only rejected by [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct GovernanceClassificationBase {
    #[serde(flatten, with = "ElementClassificationHeader")]
    pub header: ElementClassificationHeader,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_status: Option<GovernanceClassificationStatus>,

    #[serde(default)]
    pub confidence: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steward_property_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Ordinal of the level in the classification's value set.
    #[serde(default)]
    pub level_identifier: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ConfidenceGovernanceClassification {
    #[serde(flatten, with = "GovernanceClassificationBase")]
    pub governance: GovernanceClassificationBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<ConfidenceLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ConfidentialityGovernanceClassification {
    #[serde(flatten, with = "GovernanceClassificationBase")]
    pub governance: GovernanceClassificationBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidentiality_level: Option<ConfidentialityLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct CriticalityGovernanceClassification {
    #[serde(flatten, with = "GovernanceClassificationBase")]
    pub governance: GovernanceClassificationBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality_level: Option<CriticalityLevel>,
}

/// How long the classified data must be kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct RetentionGovernanceClassification {
    #[serde(flatten, with = "GovernanceClassificationBase")]
    pub governance: GovernanceClassificationBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_basis: Option<RetentionBasis>,

    /// Element (project, contract, regulation...) that sets the retention period.
    #[serde(rename = "associatedGUID", default, skip_serializing_if = "Option::is_none")]
    pub associated_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_after: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_after: Option<Timestamp>,
}

/// Security labels and access groups used by security enforcement points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SecurityTags {
    #[serde(flatten, with = "ElementClassificationHeader")]
    pub header: ElementClassificationHeader,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_labels: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_properties: ExtendedProperties,

    /// Operation name to the groups allowed to perform it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub access_groups: BTreeMap<String, Vec<String>>,
}

impl SecurityTags {
    /// Returns the groups allowed to perform `operation`.
    pub fn groups_for(&self, operation: &str) -> &[String] {
        self.access_groups
            .get(operation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Summary of the most recent change to an anchor element or its attachments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct LatestChange {
    #[serde(flatten, with = "ElementClassificationHeader")]
    pub header: ElementClassificationHeader,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_target: Option<LatestChangeTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_action: Option<LatestChangeAction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_name: Option<String>,

    #[serde(rename = "attachmentGUID", default, skip_serializing_if = "Option::is_none")]
    pub attachment_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

extends!(ElementClassificationHeader => ElementControlHeader, control);
extends!(ElementClassification => ElementClassificationHeader, header);
extends!(GovernanceClassificationBase => ElementClassificationHeader, header);
extends!(ConfidenceGovernanceClassification => GovernanceClassificationBase, governance);
extends!(ConfidentialityGovernanceClassification => GovernanceClassificationBase, governance);
extends!(CriticalityGovernanceClassification => GovernanceClassificationBase, governance);
extends!(RetentionGovernanceClassification => GovernanceClassificationBase, governance);
extends!(SecurityTags => ElementClassificationHeader, header);
extends!(LatestChange => ElementClassificationHeader, header);

impl_bean!(
    ElementClassificationHeader,
    ElementClassification,
    GovernanceClassificationBase,
    ConfidenceGovernanceClassification,
    ConfidentialityGovernanceClassification,
    CriticalityGovernanceClassification,
    RetentionGovernanceClassification,
    SecurityTags,
    LatestChange,
);

polymorphic! {
    /// Any classification, selected by its `class` discriminator.
    AnyClassification, fallback = Element,
    variants: [
        Element(ElementClassification),
        Governance(GovernanceClassificationBase),
        Confidence(ConfidenceGovernanceClassification),
        Confidentiality(ConfidentialityGovernanceClassification),
        Criticality(CriticalityGovernanceClassification),
        Retention(RetentionGovernanceClassification),
        SecurityTags(SecurityTags),
        LatestChange(LatestChange),
    ]
}

impl AnyClassification {
    /// Governance fields, for the governance classifications.
    pub fn governance(&self) -> Option<&GovernanceClassificationBase> {
        match self {
            Self::Governance(g) => Some(g),
            Self::Confidence(c) => Some(&c.governance),
            Self::Confidentiality(c) => Some(&c.governance),
            Self::Criticality(c) => Some(&c.governance),
            Self::Retention(r) => Some(&r.governance),
            Self::Element(_) | Self::SecurityTags(_) | Self::LatestChange(_) => None,
        }
    }

    /// Provenance header common to every classification.
    pub fn header(&self) -> &ElementClassificationHeader {
        match self {
            Self::Element(c) => &c.header,
            Self::Governance(g) => &g.header,
            Self::Confidence(c) => &c.governance.header,
            Self::Confidentiality(c) => &c.governance.header,
            Self::Criticality(c) => &c.governance.header,
            Self::Retention(r) => &r.governance.header,
            Self::SecurityTags(s) => &s.header,
            Self::LatestChange(l) => &l.header,
        }
    }
}
