//! Governance and provenance beans: certifications, licenses, external
//! references and identifiers, and locations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean};
use crate::element::{AdditionalProperties, Referenceable};
use crate::enums::{KeyPattern, RelatedMediaType, RelatedMediaUsage};
use crate::timestamp::Timestamp;

/// A party to a certification or license: who holds, issues or looks after it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyReference {
    /// Identifier of the element describing the party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
}

/// A certification awarded to an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Certification {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(rename = "certificateGUID", default, skip_serializing_if = "Option::is_none")]
    pub certificate_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examiner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certified_by: Option<PartyReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custodian: Option<PartyReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<PartyReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Certification {
    /// Returns `true` if `at` falls inside the certification's validity
    /// window. Missing bounds are open.
    pub fn is_valid_at(&self, at: impl Into<Timestamp>) -> bool {
        within(self.start, self.end, at.into())
    }
}

/// A license granted for the use of an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct License {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(rename = "licenseGUID", default, skip_serializing_if = "Option::is_none")]
    pub license_guid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensed_by: Option<PartyReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custodian: Option<PartyReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licensee: Option<PartyReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl License {
    /// Returns `true` if `at` falls inside the license's validity window.
    pub fn is_valid_at(&self, at: impl Into<Timestamp>) -> bool {
        within(self.start, self.end, at.into())
    }
}

fn within(start: Option<Timestamp>, end: Option<Timestamp>, at: Timestamp) -> bool {
    start.is_none_or(|s| s <= at) && end.is_none_or(|e| at <= e)
}

/// A link to external material that describes or supports an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ExternalReference {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_abstract: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(rename = "referenceURL", default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: AdditionalProperties,
}

/// An external reference to images, audio, video or documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct RelatedMediaReference {
    #[serde(flatten, with = "ExternalReference")]
    pub reference: ExternalReference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<RelatedMediaType>,

    /// Locally defined media type when `media_type` is `OTHER`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type_other_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_usage: Vec<RelatedMediaUsage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_media_usage: Option<RelatedMediaUsage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_media_usage_other_id: Option<String>,
}

impl RelatedMediaReference {
    /// Returns `true` if the media may be used for `usage`.
    pub fn supports(&self, usage: RelatedMediaUsage) -> bool {
        self.default_media_usage == Some(usage) || self.media_usage.contains(&usage)
    }
}

/// An identifier for the element used by an external system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ExternalIdentifier {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    /// Name of the system that issued the identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_pattern: Option<KeyPattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mapping_properties: AdditionalProperties,
}

/// A physical or logical location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Location {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

extends!(Certification => Referenceable, referenceable);
extends!(License => Referenceable, referenceable);
extends!(ExternalReference => Referenceable, referenceable);
extends!(RelatedMediaReference => ExternalReference, reference);
extends!(ExternalIdentifier => Referenceable, referenceable);
extends!(Location => Referenceable, referenceable);

impl_bean!(
    Certification,
    License,
    ExternalReference,
    RelatedMediaReference,
    ExternalIdentifier,
    Location,
);
