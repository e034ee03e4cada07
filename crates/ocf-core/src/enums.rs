//! Closed value sets used by the property beans.
//!
//! Each enum has:
//! - a stable ordinal, a name and a description per value
//! - Serialize/Deserialize as the upper-case name (e.g. `"ACTIVE"`)
//! - `values()`, `from_ordinal()`, `from_name()`, `FromStr` and `Display`
//!
//! Enums that mirror an open metadata enum type also carry the type's name
//! and GUID so callers can match them against a type registry.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a name does not match any value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {enum_name} value: {value:?}")]
pub struct ParseEnumError {
    pub enum_name: &'static str,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Macro: defines a closed enum of (ordinal, name, description) triples.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, type_name = $type_name:literal, type_guid = $type_guid:literal,
        variants: [
            $( ($variant:ident, $ordinal:literal, $str:literal, $desc:literal) ),+ $(,)?
        ]
    ) => {
        define_enum! {
            $(#[$meta])*
            $name,
            variants: [ $( ($variant, $ordinal, $str, $desc), )+ ]
        }

        impl $name {
            /// Name of the open metadata enum type this value set mirrors.
            pub const ENUM_TYPE_NAME: &'static str = $type_name;

            /// GUID of the open metadata enum type this value set mirrors.
            pub const ENUM_TYPE_GUID: &'static str = $type_guid;

            /// Ordinal of the matching value in the open metadata enum type.
            pub fn open_type_ordinal(&self) -> i32 {
                self.ordinal()
            }

            /// Name of the matching value in the open metadata enum type.
            pub fn open_type_name(&self) -> &'static str {
                self.display_name()
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident,
        variants: [
            $( ($variant:ident, $ordinal:literal, $str:literal, $desc:literal) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
        }

        impl $name {
            const VALUES: &'static [Self] = &[ $( Self::$variant, )+ ];
            const NAMES: &'static [&'static str] = &[ $( $str, )+ ];

            /// Returns every value in ordinal declaration order.
            pub fn values() -> &'static [Self] {
                Self::VALUES
            }

            /// Returns the stable ordinal.
            pub fn ordinal(&self) -> i32 {
                match self {
                    $( Self::$variant => $ordinal, )+
                }
            }

            /// Returns the wire name.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $str, )+
                }
            }

            /// Returns the human-readable description.
            pub fn description(&self) -> &'static str {
                match self {
                    $( Self::$variant => $desc, )+
                }
            }

            /// Returns the display name, i.e. the variant identifier.
            pub fn display_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }

            /// Looks a value up by ordinal.
            pub fn from_ordinal(ordinal: i32) -> Option<Self> {
                Self::VALUES.iter().copied().find(|v| v.ordinal() == ordinal)
            }

            /// Looks a value up by wire name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $str => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| ParseEnumError {
                    enum_name: stringify!($name),
                    value: s.to_owned(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_name(&s)
                    .ok_or_else(|| serde::de::Error::unknown_variant(&s, Self::NAMES))
            }
        }
    };
}

// ===========================================================================
// Element lifecycle
// ===========================================================================

define_enum! {
    /// Coarse lifecycle of a metadata element. Transitions are not enforced.
    ElementStatus,
    variants: [
        (Unknown, 0, "UNKNOWN", "Unknown instance status."),
        (Draft, 1, "DRAFT", "The content is incomplete."),
        (Prepared, 2, "PREPARED", "The content is ready for review."),
        (Proposed, 3, "PROPOSED", "The content is in review."),
        (Approved, 4, "APPROVED", "The content is approved."),
        (Rejected, 5, "REJECTED", "The request or proposal is rejected."),
        (ApprovedConcept, 6, "APPROVED_CONCEPT", "The request or proposal is approved for development."),
        (UnderDevelopment, 7, "UNDER_DEVELOPMENT", "The development of an approved request is underway."),
        (DevelopmentComplete, 8, "DEVELOPMENT_COMPLETE", "The development of an approved request is complete."),
        (ApprovedForDeployment, 9, "APPROVED_FOR_DEPLOYMENT", "The request is approved for deployment."),
        (Standby, 10, "STANDBY", "The instance is deployed in standby mode."),
        (Active, 15, "ACTIVE", "The instance is approved and in use."),
        (Failed, 16, "FAILED", "The instance has failed."),
        (Disabled, 17, "DISABLED", "The instance has been disabled."),
        (Complete, 18, "COMPLETE", "The activity associated with the instance is complete."),
        (Deprecated, 19, "DEPRECATED", "The instance is out of date and should not be used."),
        (Other, 50, "OTHER", "The instance is in a locally defined state."),
        (Deleted, 99, "DELETED", "The instance has been deleted and is no longer in use."),
    ]
}

define_enum! {
    /// Where an element's home copy comes from.
    ElementOriginCategory,
    variants: [
        (Unknown, 0, "UNKNOWN", "Unknown provenance."),
        (LocalCohort, 1, "LOCAL_COHORT", "The element is being maintained within one of the local cohort members."),
        (ExportArchive, 2, "EXPORT_ARCHIVE", "The element was created from an export archive."),
        (ContentPack, 3, "CONTENT_PACK", "The element comes from an open metadata content pack."),
        (DeregisteredRepository, 4, "DEREGISTERED_REPOSITORY", "The element comes from a metadata repository that used to be a member of one of the local cohorts but has since deregistered."),
        (Configuration, 5, "CONFIGURATION", "The element is part of a service's configuration."),
        (ExternalSource, 6, "EXTERNAL_SOURCE", "The element is maintained by an external technology."),
    ]
}

// ===========================================================================
// Classifications
// ===========================================================================

define_enum! {
    /// How a classification came to be attached to an element.
    ClassificationOrigin,
    variants: [
        (Assigned, 0, "ASSIGNED", "The classification is explicitly assigned to the element."),
        (Propagated, 1, "PROPAGATED", "The classification has been propagated from another element."),
    ]
}

define_enum! {
    /// Review state of a governance classification.
    GovernanceClassificationStatus, type_name = "GovernanceClassificationStatus", type_guid = "cc540586-ac7c-41ba-8cc1-4da694a6a8e4",
    variants: [
        (Discovered, 0, "DISCOVERED", "The classification assignment was discovered by an automated process."),
        (Proposed, 1, "PROPOSED", "The classification assignment was proposed by a subject matter expert."),
        (Imported, 2, "IMPORTED", "The classification assignment was imported from another metadata system."),
        (Validated, 3, "VALIDATED", "The classification assignment has been validated and approved by a subject matter expert."),
        (Deprecated, 4, "DEPRECATED", "The classification assignment should no longer be used."),
        (Obsolete, 5, "OBSOLETE", "The classification assignment must no longer be used."),
        (Other, 99, "OTHER", "Another classification assignment status."),
    ]
}

define_enum! {
    /// Confidence that the data behind an element is accurate.
    ConfidenceLevel, type_name = "ConfidenceLevel", type_guid = "ae846797-d88a-4421-ad9a-318bf7c1fe6f",
    variants: [
        (Unclassified, 0, "UNCLASSIFIED", "There is no assessment of the confidence level of this data."),
        (AdHoc, 1, "AD_HOC", "The data comes from an ad hoc process."),
        (Transactional, 2, "TRANSACTIONAL", "The data comes from a transactional system so it may have a narrow scope."),
        (Authoritative, 3, "AUTHORITATIVE", "The data comes from an authoritative source."),
        (Derived, 4, "DERIVED", "The data is derived from other data through an analytical process."),
        (Obsolete, 5, "OBSOLETE", "The data comes from an obsolete source and must no longer be used."),
        (Other, 99, "OTHER", "Another confidence level."),
    ]
}

define_enum! {
    /// How confidential the data behind an element is.
    ConfidentialityLevel, type_name = "ConfidentialityLevel", type_guid = "ecb48ca2-4d29-4de9-99a1-bc4db9816d68",
    variants: [
        (Unclassified, 0, "UNCLASSIFIED", "The data is public information."),
        (Internal, 1, "INTERNAL", "The data should not be exposed outside of this organization."),
        (Confidential, 2, "CONFIDENTIAL", "The data should be protected and only shared with people with a need to see it."),
        (Sensitive, 3, "SENSITIVE", "The data is sensitive and inappropriate use may adversely impact the data subject."),
        (Restricted, 4, "RESTRICTED", "The data is very valuable and must be restricted to a very small number of people."),
        (Other, 99, "OTHER", "Another confidentiality level."),
    ]
}

define_enum! {
    /// How critical the data behind an element is to the organization.
    CriticalityLevel, type_name = "CriticalityLevel", type_guid = "22bcbf49-83e1-4432-b008-e09a8f842a1e",
    variants: [
        (Unclassified, 0, "UNCLASSIFIED", "There is no assessment of the criticality of this data."),
        (Marginal, 1, "MARGINAL", "The data is of minor importance to the organization."),
        (Important, 2, "IMPORTANT", "The data is important to the running of the organization."),
        (Critical, 3, "CRITICAL", "The data is critical to the operation of the organization."),
        (Catastrophic, 4, "CATASTROPHIC", "The loss of the data will be catastrophic to the organization."),
        (Other, 99, "OTHER", "Another criticality level."),
    ]
}

define_enum! {
    /// Why data is being retained.
    RetentionBasis, type_name = "RetentionBasis", type_guid = "de79bf78-ecb0-4fd0-978f-ecc2cb4ff6c7",
    variants: [
        (Unclassified, 0, "UNCLASSIFIED", "There is no assessment of the retention requirements for this data."),
        (Temporary, 1, "TEMPORARY", "This data is temporary."),
        (ProjectLifetime, 2, "PROJECT_LIFETIME", "The data is needed for the lifetime of the referenced project."),
        (TeamLifetime, 3, "TEAM_LIFETIME", "The data is needed for the lifetime of the referenced team."),
        (ContractLifetime, 4, "CONTRACT_LIFETIME", "The data is needed for the lifetime of the referenced contract."),
        (RegulatedLifetime, 5, "REGULATED_LIFETIME", "The retention period for the data is defined by the referenced regulation."),
        (TimeBoxedLifetime, 6, "TIMEBOXED_LIFETIME", "The data is needed for the specified time."),
        (Other, 99, "OTHER", "Another basis for determining the retention requirement."),
    ]
}

define_enum! {
    /// Which aspect of an element the latest change affected.
    LatestChangeTarget,
    variants: [
        (EntityStatus, 0, "ENTITY_STATUS", "The status of the anchor entity has changed."),
        (EntityProperty, 1, "ENTITY_PROPERTY", "A property in the anchor entity has changed."),
        (EntityClassification, 2, "ENTITY_CLASSIFICATION", "A classification attached to the anchor entity has changed."),
        (EntityRelationship, 3, "ENTITY_RELATIONSHIP", "A relationship linking the anchor entity to an attachment has changed."),
        (Attachment, 4, "ATTACHMENT", "A new entity has been attached to the anchor entity."),
        (AttachmentStatus, 5, "ATTACHMENT_STATUS", "The status of an entity attached to the anchor entity has changed."),
        (AttachmentProperty, 6, "ATTACHMENT_PROPERTY", "A property in an entity attached to the anchor entity has changed."),
        (AttachmentClassification, 7, "ATTACHMENT_CLASSIFICATION", "A classification attached to an entity that is, in turn, attached to the anchor entity has changed."),
        (AttachmentRelationship, 8, "ATTACHMENT_RELATIONSHIP", "A relationship linking two attached entities has changed."),
        (Other, 99, "OTHER", "Another type of change."),
    ]
}

define_enum! {
    /// What kind of change was made.
    LatestChangeAction,
    variants: [
        (Created, 0, "CREATED", "The target element has been created."),
        (Updated, 1, "UPDATED", "The properties of the target element have been changed."),
        (Deleted, 2, "DELETED", "The target element has been deleted."),
        (Other, 99, "OTHER", "Another type of action."),
    ]
}

// ===========================================================================
// Feedback and annotations
// ===========================================================================

define_enum! {
    /// The purpose of a comment.
    CommentType, type_name = "CommentType", type_guid = "06d5032e-192a-4f77-ade1-a4b97926e867",
    variants: [
        (StandardComment, 0, "STANDARD_COMMENT", "General comment."),
        (Question, 1, "QUESTION", "A question."),
        (Answer, 2, "ANSWER", "An answer to a previously asked question."),
        (Suggestion, 3, "SUGGESTION", "A suggestion for improvement."),
        (UsageExperience, 4, "USAGE_EXPERIENCE", "An account of an experience."),
        (Requirement, 5, "REQUIREMENT", "A requirement."),
        (Other, 99, "OTHER", "Unknown comment type."),
    ]
}

define_enum! {
    /// Star rating given in a review.
    StarRating, type_name = "StarRating", type_guid = "77fea3ef-6ec1-4223-8408-38567e9d3c93",
    variants: [
        (NotRecommended, 0, "NOT_RECOMMENDED", "This content is not recommended."),
        (OneStar, 1, "ONE_STAR", "One star rating."),
        (TwoStars, 2, "TWO_STARS", "Two star rating."),
        (ThreeStars, 3, "THREE_STARS", "Three star rating."),
        (FourStars, 4, "FOUR_STARS", "Four star rating."),
        (FiveStars, 5, "FIVE_STARS", "Five star rating."),
    ]
}

define_enum! {
    /// Review state of an annotation produced by analysis.
    AnnotationStatus, type_name = "AnnotationStatus", type_guid = "71187df6-ef66-4f88-bc03-cd3c7f925165",
    variants: [
        (New, 0, "NEW", "The annotation is new."),
        (Reviewed, 1, "REVIEWED", "The annotation has been reviewed by a steward."),
        (Approved, 2, "APPROVED", "The annotation has been approved."),
        (Actioned, 3, "ACTIONED", "The request has been actioned."),
        (Invalid, 4, "INVALID", "The annotation is invalid or incorrect."),
        (Ignore, 5, "IGNORE", "The annotation should be ignored."),
        (Other, 98, "OTHER", "Another status."),
        (Unknown, 99, "UNKNOWN", "The status of this annotation is unknown."),
    ]
}

define_enum! {
    /// Kind of media held by a related media reference.
    RelatedMediaType,
    variants: [
        (Image, 0, "IMAGE", "The media is an image."),
        (Audio, 1, "AUDIO", "The media is an audio recording."),
        (Document, 2, "DOCUMENT", "The media is a text document, probably rich text."),
        (Video, 3, "VIDEO", "The media is a video recording."),
        (Other, 99, "OTHER", "The media type is not supported."),
    ]
}

define_enum! {
    /// How a related media reference should be used.
    RelatedMediaUsage,
    variants: [
        (Icon, 0, "ICON", "Provides a small image to represent the asset in tree views and graphs."),
        (Thumbnail, 1, "THUMBNAIL", "Provides a small image about the asset that can be used in lists."),
        (Illustration, 2, "ILLUSTRATION", "Illustrates how the asset works or what it contains."),
        (UsageGuidance, 3, "USAGE_GUIDANCE", "Provides guidance to a person on how to use the asset."),
        (Other, 99, "OTHER", "Another usage."),
    ]
}

// ===========================================================================
// Identifiers
// ===========================================================================

define_enum! {
    /// How an external identifier's keys are managed.
    KeyPattern, type_name = "KeyPattern", type_guid = "8904df8f-1aca-4de8-9abd-1ef2aadba300",
    variants: [
        (LocalKey, 0, "LOCAL_KEY", "Unique key allocated and used within the scope of a single system."),
        (RecycledKey, 1, "RECYCLED_KEY", "Key allocated and used within the scope of a single system that is periodically reused for different records."),
        (NaturalKey, 2, "NATURAL_KEY", "Key derived from an attribute of the entity, such as email address, passport number."),
        (MirrorKey, 3, "MIRROR_KEY", "Key value copied from another system."),
        (AggregateKey, 4, "AGGREGATE_KEY", "Key formed by combining keys from multiple systems."),
        (CallersKey, 5, "CALLERS_KEY", "Key from another system can bey used if system name provided."),
        (StableKey, 6, "STABLE_KEY", "Key value will remain active even if records are merged."),
        (Other, 99, "OTHER", "Another key pattern."),
    ]
}

// ===========================================================================
// Schemas
// ===========================================================================

define_enum! {
    /// Collection semantics of a bounded schema type.
    BoundedSchemaCategory,
    variants: [
        (Set, 0, "SET", "An unordered collection of unique elements."),
        (Array, 1, "ARRAY", "An ordered collection of elements that may repeat."),
        (Other, 99, "OTHER", "Another kind of bounded collection."),
    ]
}

define_enum! {
    /// Broad structural category of a schema attribute's type.
    SchemaAttributeCategory,
    variants: [
        (Unknown, 0, "UNKNOWN", "The category of the attribute is not known."),
        (Primitive, 1, "PRIMITIVE", "The attribute holds a single primitive value."),
        (Enumeration, 2, "ENUMERATION", "The attribute holds one of a list of valid values."),
        (Structure, 3, "STRUCTURE", "The attribute holds a nested structure of attributes."),
        (Collection, 4, "COLLECTION", "The attribute holds a bounded collection of values."),
        (Map, 5, "MAP", "The attribute holds a map from one type to another."),
        (Choice, 6, "CHOICE", "The attribute holds one of several alternative types."),
        (External, 7, "EXTERNAL", "The attribute's type is defined in an external schema."),
        (Other, 99, "OTHER", "Another category of attribute."),
    ]
}
