//! Optional consistency rules for beans.
//!
//! Beans accept any value; these checks run only when a caller (or the
//! codec, when configured) asks for them. Each bean checks its own fields,
//! then its embedded parent, then any nested beans it owns.

use crate::annotation::Annotation;
use crate::asset::{Asset, GovernedReferenceable, RelatedAsset, SoftwareCapability};
use crate::classification::{
    ConfidenceGovernanceClassification, ConfidentialityGovernanceClassification,
    CriticalityGovernanceClassification, ElementClassification, ElementClassificationHeader,
    GovernanceClassificationBase, LatestChange, RetentionGovernanceClassification, SecurityTags,
};
use crate::connection::{ConnectorType, Connection, EmbeddedConnection, Endpoint, VirtualConnection};
use crate::element::{
    ElementBase, ElementControlHeader, ElementHeader, ElementOrigin, ElementType,
    ElementVersions, PropertyBase, Referenceable,
};
use crate::feedback::{Comment, InformalTag, Like, Note, NoteLog, Rating, SearchKeyword};
use crate::governance::{
    Certification, ExternalIdentifier, ExternalReference, License, Location,
    RelatedMediaReference,
};
use crate::schema::{
    DerivedSchemaAttribute, MapSchemaElement, PrimitiveSchemaElement, SchemaAttribute,
    SchemaElement, SchemaImplementationQuery,
};
use crate::schema_type::{
    ApiOperation, ApiSchemaType, BoundedSchemaType, ComplexSchemaType, EnumSchemaType,
    ExternalSchemaType, LiteralSchemaType, MapSchemaType, PrimitiveSchemaType, SchemaType,
    SchemaTypeChoice, SimpleSchemaType, StructSchemaType,
};
use crate::timestamp::Timestamp;
use crate::valid_value::{
    ReferenceValueAssignment, ReferenceValueAssignmentItem, ValidValue, ValidValueAssignment,
    ValidValueSet,
};

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("confidence must be between 0 and 100 (got {0})")]
    ConfidenceOutOfRange(i32),

    #[error("level identifier cannot be negative (got {0})")]
    NegativeLevelIdentifier(i32),

    #[error("qualified name cannot be empty")]
    QualifiedNameRequired,

    #[error("archive date {archive_after} is after delete date {delete_after}")]
    RetentionDatesInverted {
        archive_after: Timestamp,
        delete_after: Timestamp,
    },

    #[error("validity window starts at {start} but ends at {end}")]
    ValidityWindowInverted {
        start: Timestamp,
        end: Timestamp,
    },

    #[error("minimum cardinality {min} exceeds maximum cardinality {max}")]
    CardinalityInverted { min: i32, max: i32 },

    #[error("maximum elements cannot be negative (got {0})")]
    NegativeMaximumElements(i32),

    #[error("position cannot be negative (got {0})")]
    NegativePosition(i32),
}

/// A bean that can check its own consistency.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        (**self).validate()
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), ValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.as_slice().validate()
    }
}

// ---------------------------------------------------------------------------
// Macro: beans with no rules of their own defer to their parent.
// ---------------------------------------------------------------------------
macro_rules! validate_parent {
    ($($ty:ty => $field:ident),+ $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<(), ValidationError> {
                    self.$field.validate()
                }
            }
        )+
    };
}

fn check_confidence(confidence: i32) -> Result<(), ValidationError> {
    if !(0..=100).contains(&confidence) {
        return Err(ValidationError::ConfidenceOutOfRange(confidence));
    }
    Ok(())
}

fn check_window(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ValidationError::ValidityWindowInverted { start, end });
        }
    }
    Ok(())
}

fn check_position(position: i32) -> Result<(), ValidationError> {
    if position < 0 {
        return Err(ValidationError::NegativePosition(position));
    }
    Ok(())
}

// -- header chain -----------------------------------------------------------

impl Validate for PropertyBase {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

validate_parent!(
    ElementType => base,
    ElementOrigin => base,
    ElementVersions => base,
);

impl Validate for ElementControlHeader {
    fn validate(&self) -> Result<(), ValidationError> {
        self.element_type.validate()?;
        self.origin.validate()?;
        self.versions.validate()?;
        self.base.validate()
    }
}

impl Validate for ElementHeader {
    fn validate(&self) -> Result<(), ValidationError> {
        self.classifications.validate()?;
        self.control.validate()
    }
}

validate_parent!(ElementBase => header);

impl Validate for Referenceable {
    fn validate(&self) -> Result<(), ValidationError> {
        if self
            .qualified_name
            .as_deref()
            .is_some_and(|q| q.trim().is_empty())
        {
            return Err(ValidationError::QualifiedNameRequired);
        }
        self.base.validate()
    }
}

// -- classifications --------------------------------------------------------

validate_parent!(
    ElementClassificationHeader => control,
    ElementClassification => header,
    SecurityTags => header,
    LatestChange => header,
);

impl Validate for GovernanceClassificationBase {
    fn validate(&self) -> Result<(), ValidationError> {
        check_confidence(self.confidence)?;
        if self.level_identifier < 0 {
            return Err(ValidationError::NegativeLevelIdentifier(self.level_identifier));
        }
        self.header.validate()
    }
}

validate_parent!(
    ConfidenceGovernanceClassification => governance,
    ConfidentialityGovernanceClassification => governance,
    CriticalityGovernanceClassification => governance,
);

impl Validate for RetentionGovernanceClassification {
    fn validate(&self) -> Result<(), ValidationError> {
        if let (Some(archive_after), Some(delete_after)) = (self.archive_after, self.delete_after) {
            if archive_after > delete_after {
                return Err(ValidationError::RetentionDatesInverted {
                    archive_after,
                    delete_after,
                });
            }
        }
        self.governance.validate()
    }
}

// -- schema -----------------------------------------------------------------

validate_parent!(
    SchemaElement => referenceable,
    PrimitiveSchemaElement => element,
    SchemaType => element,
    StructSchemaType => complex,
    SimpleSchemaType => schema_type,
    PrimitiveSchemaType => simple,
    EnumSchemaType => simple,
    LiteralSchemaType => schema_type,
);

impl Validate for SchemaAttribute {
    fn validate(&self) -> Result<(), ValidationError> {
        check_position(self.element_position)?;
        if self.max_cardinality >= 0 && self.min_cardinality > self.max_cardinality {
            return Err(ValidationError::CardinalityInverted {
                min: self.min_cardinality,
                max: self.max_cardinality,
            });
        }
        self.attribute_type.validate()?;
        self.element.validate()
    }
}

impl Validate for SchemaImplementationQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        self.query_target_element.validate()?;
        self.base.validate()
    }
}

impl Validate for DerivedSchemaAttribute {
    fn validate(&self) -> Result<(), ValidationError> {
        self.queries.validate()?;
        self.attribute.validate()
    }
}

impl Validate for MapSchemaElement {
    fn validate(&self) -> Result<(), ValidationError> {
        self.map_from_element.validate()?;
        self.map_to_element.validate()?;
        self.element.validate()
    }
}

impl Validate for ComplexSchemaType {
    fn validate(&self) -> Result<(), ValidationError> {
        self.schema_attributes.validate()?;
        self.schema_type.validate()
    }
}

impl Validate for BoundedSchemaType {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.maximum_elements < 0 {
            return Err(ValidationError::NegativeMaximumElements(self.maximum_elements));
        }
        self.element_type.validate()?;
        self.schema_type.validate()
    }
}

impl Validate for MapSchemaType {
    fn validate(&self) -> Result<(), ValidationError> {
        self.map_from_element.validate()?;
        self.map_to_element.validate()?;
        self.schema_type.validate()
    }
}

impl Validate for ExternalSchemaType {
    fn validate(&self) -> Result<(), ValidationError> {
        self.linked_schema_type.validate()?;
        self.schema_type.validate()
    }
}

impl Validate for SchemaTypeChoice {
    fn validate(&self) -> Result<(), ValidationError> {
        self.schema_options.validate()?;
        self.schema_type.validate()
    }
}

impl Validate for ApiOperation {
    fn validate(&self) -> Result<(), ValidationError> {
        self.header_schema_type.validate()?;
        self.request_schema_type.validate()?;
        self.response_schema_type.validate()?;
        self.schema_type.validate()
    }
}

impl Validate for ApiSchemaType {
    fn validate(&self) -> Result<(), ValidationError> {
        self.api_operations.validate()?;
        self.schema_type.validate()
    }
}

// -- assets, feedback, annotations ------------------------------------------

validate_parent!(
    GovernedReferenceable => referenceable,
    Asset => governed,
    SoftwareCapability => referenceable,
    Comment => base,
    Rating => base,
    Like => base,
    InformalTag => base,
    Note => referenceable,
    SearchKeyword => base,
);

impl Validate for RelatedAsset {
    fn validate(&self) -> Result<(), ValidationError> {
        self.relationship_type.validate()?;
        self.related_element.validate()?;
        self.base.validate()
    }
}

impl Validate for NoteLog {
    fn validate(&self) -> Result<(), ValidationError> {
        self.notes.validate()?;
        self.referenceable.validate()
    }
}

impl Validate for Annotation {
    fn validate(&self) -> Result<(), ValidationError> {
        check_confidence(self.confidence_level)?;
        self.base.validate()
    }
}

// -- connections ------------------------------------------------------------

validate_parent!(
    ConnectorType => referenceable,
    Endpoint => referenceable,
);

impl Validate for Connection {
    fn validate(&self) -> Result<(), ValidationError> {
        self.connector_type.validate()?;
        self.endpoint.validate()?;
        self.referenceable.validate()
    }
}

impl Validate for EmbeddedConnection {
    fn validate(&self) -> Result<(), ValidationError> {
        check_position(self.position)?;
        self.embedded_connection.validate()?;
        self.base.validate()
    }
}

impl Validate for VirtualConnection {
    fn validate(&self) -> Result<(), ValidationError> {
        self.embedded_connections.validate()?;
        self.connection.validate()
    }
}

// -- governance and valid values ---------------------------------------------

impl Validate for Certification {
    fn validate(&self) -> Result<(), ValidationError> {
        check_window(self.start, self.end)?;
        self.referenceable.validate()
    }
}

impl Validate for License {
    fn validate(&self) -> Result<(), ValidationError> {
        check_window(self.start, self.end)?;
        self.referenceable.validate()
    }
}

validate_parent!(
    ExternalReference => referenceable,
    RelatedMediaReference => reference,
    ExternalIdentifier => referenceable,
    Location => referenceable,
    ValidValue => referenceable,
);

impl Validate for ValidValueSet {
    fn validate(&self) -> Result<(), ValidationError> {
        self.members.validate()?;
        self.valid_value.validate()
    }
}

impl Validate for ValidValueAssignment {
    fn validate(&self) -> Result<(), ValidationError> {
        self.valid_values.validate()?;
        self.base.validate()
    }
}

impl Validate for ReferenceValueAssignment {
    fn validate(&self) -> Result<(), ValidationError> {
        check_confidence(self.confidence)?;
        self.valid_value.validate()?;
        self.base.validate()
    }
}

impl Validate for ReferenceValueAssignmentItem {
    fn validate(&self) -> Result<(), ValidationError> {
        self.assigned_item.validate()?;
        self.assignment.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any::AnyReferenceable;
    use crate::asset::AssetBuilder;
    use crate::classification::AnyClassification;
    use crate::schema_type::AnySchemaType;

    fn ts(millis: i64) -> Timestamp {
        Timestamp::from_millis(millis).unwrap()
    }

    #[test]
    fn default_beans_are_valid() {
        assert!(Asset::default().validate().is_ok());
        assert!(SchemaAttribute::default().validate().is_ok());
        assert!(VirtualConnection::default().validate().is_ok());
        assert!(RetentionGovernanceClassification::default().validate().is_ok());
    }

    #[test]
    fn confidence_range() {
        let mut c = ConfidenceGovernanceClassification::default();
        c.confidence = 150;
        assert_eq!(c.validate(), Err(ValidationError::ConfidenceOutOfRange(150)));
        c.confidence = 100;
        assert!(c.validate().is_ok());
        c.confidence = -1;
        assert_eq!(c.validate(), Err(ValidationError::ConfidenceOutOfRange(-1)));
    }

    #[test]
    fn negative_level_identifier() {
        let mut g = GovernanceClassificationBase::default();
        g.level_identifier = -3;
        assert_eq!(g.validate(), Err(ValidationError::NegativeLevelIdentifier(-3)));
    }

    #[test]
    fn blank_qualified_name_is_rejected() {
        let asset = AssetBuilder::new("   ").build();
        assert_eq!(asset.validate(), Err(ValidationError::QualifiedNameRequired));
        assert!(Referenceable::default().validate().is_ok());
    }

    #[test]
    fn retention_dates_must_be_ordered() {
        let mut r = RetentionGovernanceClassification::default();
        r.archive_after = Some(ts(2_000));
        r.delete_after = Some(ts(1_000));
        assert!(matches!(
            r.validate(),
            Err(ValidationError::RetentionDatesInverted { .. })
        ));
        r.delete_after = Some(ts(2_000));
        assert!(r.validate().is_ok());
    }

    #[test]
    fn certification_window_must_be_ordered() {
        let mut c = Certification::default();
        c.start = Some(ts(5));
        c.end = Some(ts(4));
        assert_eq!(
            c.validate(),
            Err(ValidationError::ValidityWindowInverted {
                start: ts(5),
                end: ts(4)
            })
        );
    }

    #[test]
    fn cardinality_and_position() {
        let mut a = SchemaAttribute::default();
        a.min_cardinality = 2;
        a.max_cardinality = 1;
        assert_eq!(
            a.validate(),
            Err(ValidationError::CardinalityInverted { min: 2, max: 1 })
        );
        a.max_cardinality = -1;
        assert!(a.validate().is_ok());
        a.element_position = -1;
        assert_eq!(a.validate(), Err(ValidationError::NegativePosition(-1)));
    }

    #[test]
    fn nested_schema_errors_surface() {
        let mut bad = BoundedSchemaType::default();
        bad.maximum_elements = -5;

        let mut attribute = SchemaAttribute::default();
        attribute.attribute_type = Some(Box::new(AnySchemaType::from(bad).into()));

        let mut complex = ComplexSchemaType::default();
        complex.push_attribute(attribute);
        assert_eq!(
            complex.validate(),
            Err(ValidationError::NegativeMaximumElements(-5))
        );
    }

    #[test]
    fn attached_classifications_are_checked() {
        let mut asset = Asset::default();
        let mut tagged = ElementClassification::named("Confidentiality");
        tagged.classification_origin_guid = Some("x".into());
        asset.classifications.push(tagged);
        assert!(asset.validate().is_ok());

        let mut retention = RetentionGovernanceClassification::default();
        retention.confidence = 101;
        assert_eq!(
            AnyClassification::from(retention).validate(),
            Err(ValidationError::ConfidenceOutOfRange(101))
        );
    }

    #[test]
    fn related_element_is_checked() {
        let mut related = RelatedAsset::default();
        related.related_element = Some(Box::new(AnyReferenceable::from(
            AssetBuilder::new("").build(),
        )));
        assert_eq!(related.validate(), Err(ValidationError::QualifiedNameRequired));
    }
}
