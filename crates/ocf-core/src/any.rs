//! Families spanning the whole bean set: every referenceable, and every bean.

use crate::annotation::Annotation;
use crate::asset::{Asset, GovernedReferenceable, RelatedAsset, SoftwareCapability};
use crate::bean::polymorphic;
use crate::classification::{AnyClassification, ElementClassificationHeader};
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
use crate::schema::{AnySchemaElement, SchemaImplementationQuery};
use crate::valid_value::{
    ReferenceValueAssignment, ReferenceValueAssignmentItem, ValidValue, ValidValueAssignment,
    ValidValueSet,
};

polymorphic! {
    /// Any element with a qualified name.
    AnyReferenceable, fallback = Referenceable,
    variants: [
        Referenceable(Referenceable),
        Governed(GovernedReferenceable),
        Asset(Asset),
        SoftwareCapability(SoftwareCapability),
        Note(Note),
        NoteLog(NoteLog),
        ConnectorType(ConnectorType),
        Endpoint(Endpoint),
        Connection(Connection),
        VirtualConnection(VirtualConnection),
        Certification(Certification),
        License(License),
        ExternalReference(ExternalReference),
        RelatedMediaReference(RelatedMediaReference),
        ExternalIdentifier(ExternalIdentifier),
        Location(Location),
        ValidValue(ValidValue),
        ValidValueSet(ValidValueSet),
    ],
    delegates: [
        Schema(AnySchemaElement),
    ]
}

impl From<AnySchemaElement> for AnyReferenceable {
    fn from(element: AnySchemaElement) -> Self {
        Self::Schema(element)
    }
}

impl AnyReferenceable {
    /// The referenceable fields, whatever the concrete kind.
    pub fn referenceable(&self) -> &Referenceable {
        match self {
            Self::Referenceable(r) => r,
            Self::Governed(g) => &g.referenceable,
            Self::Asset(a) => &a.governed.referenceable,
            Self::SoftwareCapability(s) => &s.referenceable,
            Self::Note(n) => &n.referenceable,
            Self::NoteLog(n) => &n.referenceable,
            Self::ConnectorType(c) => &c.referenceable,
            Self::Endpoint(e) => &e.referenceable,
            Self::Connection(c) => &c.referenceable,
            Self::VirtualConnection(v) => &v.connection.referenceable,
            Self::Certification(c) => &c.referenceable,
            Self::License(l) => &l.referenceable,
            Self::ExternalReference(r) => &r.referenceable,
            Self::RelatedMediaReference(r) => &r.reference.referenceable,
            Self::ExternalIdentifier(i) => &i.referenceable,
            Self::Location(l) => &l.referenceable,
            Self::ValidValue(v) => &v.referenceable,
            Self::ValidValueSet(s) => &s.valid_value.referenceable,
            Self::Schema(s) => &s.element().referenceable,
        }
    }

    /// Shorthand for the qualified name.
    pub fn qualified_name(&self) -> Option<&str> {
        self.referenceable().qualified_name.as_deref()
    }

    /// Shorthand for the GUID.
    pub fn guid(&self) -> Option<&str> {
        self.referenceable().guid.as_deref()
    }
}

polymorphic! {
    /// Any bean, for top-level documents whose kind is known only from
    /// their `class` property. Documents without a recognised class decode
    /// as a plain referenceable.
    AnyBean, fallback = Referenceable,
    variants: [
        PropertyBase(PropertyBase),
        ElementType(ElementType),
        ElementOrigin(ElementOrigin),
        ElementVersions(ElementVersions),
        ElementControlHeader(ElementControlHeader),
        ElementHeader(ElementHeader),
        ElementBase(ElementBase),
        ClassificationHeader(ElementClassificationHeader),
        Comment(Comment),
        Rating(Rating),
        Like(Like),
        InformalTag(InformalTag),
        SearchKeyword(SearchKeyword),
        Annotation(Annotation),
        RelatedAsset(RelatedAsset),
        EmbeddedConnection(EmbeddedConnection),
        SchemaImplementationQuery(SchemaImplementationQuery),
        ValidValueAssignment(ValidValueAssignment),
        ReferenceValueAssignment(ReferenceValueAssignment),
        ReferenceValueAssignmentItem(ReferenceValueAssignmentItem),
    ],
    delegates: [
        Referenceable(AnyReferenceable),
        Classification(AnyClassification),
    ]
}

impl From<AnyReferenceable> for AnyBean {
    fn from(referenceable: AnyReferenceable) -> Self {
        Self::Referenceable(referenceable)
    }
}

impl From<AnyClassification> for AnyBean {
    fn from(classification: AnyClassification) -> Self {
        Self::Classification(classification)
    }
}

impl AnyBean {
    /// The wrapped referenceable, if this bean is one.
    pub fn as_referenceable(&self) -> Option<&AnyReferenceable> {
        match self {
            Self::Referenceable(r) => Some(r),
            _ => None,
        }
    }

    /// The wrapped classification, if this bean is one.
    pub fn as_classification(&self) -> Option<&AnyClassification> {
        match self {
            Self::Classification(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetBuilder;
    use crate::bean::Bean;
    use crate::classification::ConfidenceGovernanceClassification;
    use crate::schema_type::AnySchemaType;
    use pretty_assertions::assert_eq;

    #[test]
    fn asset_class_in_referenceable_field_decodes_as_asset() {
        let json = r#"{
            "headerVersion": 1,
            "relationshipName": "dataContent",
            "relatedElement": {
                "class": "Asset",
                "guid": "a-1",
                "qualifiedName": "Asset:file1",
                "resourceName": "file1"
            }
        }"#;

        let related: RelatedAsset = serde_json::from_str(json).unwrap();
        let asset = related.related_asset().expect("decoded as asset");
        assert_eq!(asset.display_name(), Some("file1"));
        assert_eq!(asset.guid.as_deref(), Some("a-1"));
    }

    #[test]
    fn plain_referenceable_without_class() {
        let r: AnyReferenceable =
            serde_json::from_str(r#"{"qualifiedName":"Thing:1","guid":"g-1"}"#).unwrap();
        assert_eq!(r.class_name(), Referenceable::CLASS_NAME);
        assert_eq!(r.qualified_name(), Some("Thing:1"));
        assert_eq!(r.guid(), Some("g-1"));
    }

    #[test]
    fn schema_classes_reach_through_delegates() {
        let r: AnyReferenceable = serde_json::from_str(
            r#"{"class":"EnumSchemaType","qualifiedName":"Type:colour","validValueSetGUID":"vv-1"}"#,
        )
        .unwrap();
        match &r {
            AnyReferenceable::Schema(AnySchemaElement::Type(AnySchemaType::Enum(e))) => {
                assert_eq!(e.valid_value_set_guid.as_deref(), Some("vv-1"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(r.qualified_name(), Some("Type:colour"));
        assert_eq!(r.class_name(), "EnumSchemaType");
    }

    #[test]
    fn any_bean_dispatches_every_family() {
        let cases = [
            (r#"{"class":"Comment","commentText":"hi"}"#, "Comment"),
            (r#"{"class":"Asset","resourceName":"x"}"#, "Asset"),
            (r#"{"class":"RetentionGovernanceClassification"}"#, "RetentionGovernanceClassification"),
            (r#"{"class":"APIOperation","path":"/x"}"#, "APIOperation"),
            (r#"{"class":"VirtualConnection"}"#, "VirtualConnection"),
            (r#"{"class":"SomethingNew","qualifiedName":"n"}"#, "Referenceable"),
            (r#"{"qualifiedName":"n"}"#, "Referenceable"),
        ];
        for (json, class) in cases {
            let bean: AnyBean = serde_json::from_str(json).unwrap();
            assert_eq!(bean.class_name(), class, "decoding {json}");
        }
    }

    #[test]
    fn any_bean_roundtrip_and_fingerprint() {
        let asset = AssetBuilder::new("Asset:orders").resource_name("orders").build();
        let bean = AnyBean::from(AnyReferenceable::from(asset.clone()));

        let json = serde_json::to_string(&bean).unwrap();
        assert!(json.starts_with(r#"{"class":"Asset""#));
        let back: AnyBean = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bean);
        assert_eq!(back.fingerprint(), bean.fingerprint());
        assert_eq!(bean.fingerprint(), asset.fingerprint());
    }

    #[test]
    fn equality_is_class_strict() {
        let base = AnyClassification::Governance(Default::default());
        let confidence =
            AnyClassification::Confidence(ConfidenceGovernanceClassification::default());
        assert_ne!(AnyBean::from(base), AnyBean::from(confidence));
    }
}
