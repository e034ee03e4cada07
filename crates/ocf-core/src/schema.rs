//! Schema elements and attributes.

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean, is_false, polymorphic};
use crate::element::{PropertyBase, Referenceable};
use crate::enums::SchemaAttributeCategory;
use crate::schema_type::{AnySchemaType, SchemaType};

/// Root of the schema chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SchemaElement {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deprecated: bool,
}

/// A named field within a complex schema type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SchemaAttribute {
    #[serde(flatten, with = "SchemaElement")]
    pub element: SchemaElement,

    #[serde(default)]
    pub element_position: i32,

    #[serde(default)]
    pub min_cardinality: i32,

    /// `-1` means unbounded.
    #[serde(default)]
    pub max_cardinality: i32,

    #[serde(default, skip_serializing_if = "is_false")]
    pub allows_duplicate_values: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub ordered_values: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value_override: Option<String>,

    #[serde(default)]
    pub minimum_length: i32,

    #[serde(default)]
    pub length: i32,

    #[serde(default)]
    pub significant_digits: i32,

    #[serde(default = "nullable_default")]
    pub is_nullable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_class: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SchemaAttributeCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<Box<AnySchemaElement>>,
}

fn nullable_default() -> bool {
    true
}

impl Default for SchemaAttribute {
    fn default() -> Self {
        Self {
            element: SchemaElement::default(),
            element_position: 0,
            min_cardinality: 0,
            max_cardinality: 0,
            allows_duplicate_values: false,
            ordered_values: false,
            default_value_override: None,
            minimum_length: 0,
            length: 0,
            significant_digits: 0,
            is_nullable: true,
            native_class: None,
            aliases: Vec::new(),
            category: None,
            attribute_type: None,
        }
    }
}

impl SchemaAttribute {
    /// An attribute with the given display name and type.
    pub fn typed(display_name: impl Into<String>, attribute_type: impl Into<AnySchemaElement>) -> Self {
        let mut attribute = Self::default();
        attribute.display_name = Some(display_name.into());
        attribute.attribute_type = Some(Box::new(attribute_type.into()));
        attribute
    }

    /// Returns `true` when the attribute may hold more than one value.
    pub fn is_multi_valued(&self) -> bool {
        self.max_cardinality < 0 || self.max_cardinality > 1
    }
}

/// A query used to compute a derived attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SchemaImplementationQuery {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default)]
    pub query_id: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_target_element: Option<Box<AnySchemaElement>>,
}

/// An attribute whose value is computed from other elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct DerivedSchemaAttribute {
    #[serde(flatten, with = "SchemaAttribute")]
    pub attribute: SchemaAttribute,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<SchemaImplementationQuery>,
}

/// A leaf schema element holding a primitive value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct PrimitiveSchemaElement {
    #[serde(flatten, with = "SchemaElement")]
    pub element: SchemaElement,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A schema element describing a map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct MapSchemaElement {
    #[serde(flatten, with = "SchemaElement")]
    pub element: SchemaElement,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_from_element: Option<Box<AnySchemaElement>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_to_element: Option<Box<AnySchemaElement>>,
}

extends!(SchemaElement => Referenceable, referenceable);
extends!(SchemaAttribute => SchemaElement, element);
extends!(SchemaImplementationQuery => PropertyBase, base);
extends!(DerivedSchemaAttribute => SchemaAttribute, attribute);
extends!(PrimitiveSchemaElement => SchemaElement, element);
extends!(MapSchemaElement => SchemaElement, element);

impl_bean!(
    SchemaElement,
    SchemaAttribute,
    SchemaImplementationQuery,
    DerivedSchemaAttribute,
    PrimitiveSchemaElement,
    MapSchemaElement,
);

polymorphic! {
    /// Any schema element, including every schema type.
    AnySchemaElement, fallback = Element,
    variants: [
        Element(SchemaElement),
        Attribute(SchemaAttribute),
        Derived(DerivedSchemaAttribute),
        Primitive(PrimitiveSchemaElement),
        Map(MapSchemaElement),
    ],
    delegates: [
        Type(AnySchemaType),
    ]
}

impl From<AnySchemaType> for AnySchemaElement {
    fn from(schema_type: AnySchemaType) -> Self {
        Self::Type(schema_type)
    }
}

impl From<SchemaType> for AnySchemaElement {
    fn from(schema_type: SchemaType) -> Self {
        Self::Type(schema_type.into())
    }
}

impl AnySchemaElement {
    /// The schema element fields shared by every variant.
    pub fn element(&self) -> &SchemaElement {
        match self {
            Self::Element(e) => e,
            Self::Attribute(a) => &a.element,
            Self::Derived(d) => &d.attribute.element,
            Self::Primitive(p) => &p.element,
            Self::Map(m) => &m.element,
            Self::Type(t) => &t.schema_type().element,
        }
    }

    /// Mutable access to the shared schema element fields.
    pub fn element_mut(&mut self) -> &mut SchemaElement {
        match self {
            Self::Element(e) => e,
            Self::Attribute(a) => &mut a.element,
            Self::Derived(d) => &mut d.attribute.element,
            Self::Primitive(p) => &mut p.element,
            Self::Map(m) => &mut m.element,
            Self::Type(t) => &mut t.schema_type_mut().element,
        }
    }

    /// The wrapped schema type, if this element is one.
    pub fn as_schema_type(&self) -> Option<&AnySchemaType> {
        match self {
            Self::Type(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::Bean;
    use crate::schema_type::{PrimitiveSchemaType, StructSchemaType};
    use pretty_assertions::assert_eq;

    #[test]
    fn attribute_type_decodes_nested_schema_type() {
        let json = r#"{
            "class": "SchemaAttribute",
            "qualifiedName": "Customer.id",
            "displayName": "id",
            "elementPosition": 0,
            "attributeType": {"class": "PrimitiveSchemaType", "dataType": "long"}
        }"#;

        let element: AnySchemaElement = serde_json::from_str(json).unwrap();
        let AnySchemaElement::Attribute(attribute) = element else {
            panic!("expected schema attribute");
        };
        match attribute.attribute_type.as_deref() {
            Some(AnySchemaElement::Type(AnySchemaType::Primitive(p))) => {
                assert_eq!(p.data_type.as_deref(), Some("long"));
            }
            other => panic!("unexpected attribute type {:?}", other),
        }
    }

    #[test]
    fn schema_type_class_is_written_once() {
        let element = AnySchemaElement::from(AnySchemaType::from(StructSchemaType::default()));
        let json = serde_json::to_string(&element).unwrap();
        assert_eq!(json.matches("\"class\"").count(), 1);
        assert_eq!(element.class_name(), "StructSchemaType");
        assert!(AnySchemaElement::handles("APIOperation"));
        assert!(!AnySchemaElement::handles("Asset"));
    }

    #[test]
    fn nullable_defaults_to_true() {
        let attribute: SchemaAttribute = serde_json::from_str(r#"{"displayName":"x"}"#).unwrap();
        assert!(attribute.is_nullable);
        assert_eq!(attribute, {
            let mut a = SchemaAttribute::default();
            a.display_name = Some("x".into());
            a
        });

        let value = serde_json::to_value(SchemaAttribute::default()).unwrap();
        assert_eq!(value["isNullable"], true);
        assert_eq!(value["maxCardinality"], 0);
    }

    #[test]
    fn template_copy_keeps_aliases_independent() {
        let mut template = SchemaAttribute::typed("name", AnySchemaType::from(PrimitiveSchemaType::default()));
        template.aliases = vec!["fullName".into()];

        let mut copy = SchemaAttribute::from_template(Some(&template));
        assert_eq!(copy, template);

        copy.aliases.push("displayName".into());
        if let Some(t) = copy.attribute_type.as_deref_mut() {
            t.element_mut().description = Some("changed".into());
        }
        assert_eq!(template.aliases, vec!["fullName".to_string()]);
        assert_eq!(
            template.attribute_type.as_deref().unwrap().element().description,
            None
        );
    }

    #[test]
    fn derived_attribute_roundtrip() {
        let mut derived = DerivedSchemaAttribute::default();
        derived.display_name = Some("age".into());
        derived.formula = Some("now() - {0}".into());
        derived.queries.push(SchemaImplementationQuery {
            query_id: 0,
            query: Some("birthDate".into()),
            query_type: Some("attribute".into()),
            ..Default::default()
        });

        let json = serde_json::to_string(&AnySchemaElement::from(derived.clone())).unwrap();
        let back: AnySchemaElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AnySchemaElement::Derived(derived));
    }

    #[test]
    fn multi_valued_attribute() {
        let mut a = SchemaAttribute::default();
        a.max_cardinality = 1;
        assert!(!a.is_multi_valued());
        a.max_cardinality = -1;
        assert!(a.is_multi_valued());
    }

    #[test]
    fn unknown_class_falls_back_to_schema_element() {
        let element: AnySchemaElement =
            serde_json::from_str(r#"{"class":"FutureSchemaThing","displayName":"z"}"#).unwrap();
        assert_eq!(element.class_name(), SchemaElement::CLASS_NAME);
        assert_eq!(element.element().display_name.as_deref(), Some("z"));
    }
}
