//! Schema types: the structural descriptions attached to schema attributes
//! and assets.
//!
//! Every concrete kind lives in [`AnySchemaType`], so copying a nested type
//! without knowing its kind is an ordinary `clone()`.

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean, is_false, polymorphic, saturating_count};
use crate::enums::BoundedSchemaCategory;
use crate::schema::{SchemaAttribute, SchemaElement};

/// Base schema type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SchemaType {
    #[serde(flatten, with = "SchemaElement")]
    pub element: SchemaElement,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_standard: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// A schema type made up of nested attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ComplexSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    /// Number of attributes held by the repository; may exceed the attributes
    /// retrieved into `schema_attributes`.
    #[serde(default)]
    pub attribute_count: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_attributes: Vec<SchemaAttribute>,
}

impl ComplexSchemaType {
    /// Finds a nested attribute by display name.
    pub fn attribute(&self, display_name: &str) -> Option<&SchemaAttribute> {
        self.schema_attributes
            .iter()
            .find(|a| a.display_name.as_deref() == Some(display_name))
    }

    /// Appends an attribute, keeping `attribute_count` in step.
    pub fn push_attribute(&mut self, attribute: SchemaAttribute) {
        self.schema_attributes.push(attribute);
        let count = saturating_count(self.schema_attributes.len());
        self.attribute_count = self.attribute_count.max(count);
    }
}

/// A complex type whose attributes form a record structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct StructSchemaType {
    #[serde(flatten, with = "ComplexSchemaType")]
    pub complex: ComplexSchemaType,
}

/// A set or array of elements of one type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct BoundedSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    /// Zero means unbounded.
    #[serde(default)]
    pub maximum_elements: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounded_schema_category: Option<BoundedSchemaCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<Box<AnySchemaType>>,
}

/// A map from one schema type to another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct MapSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_from_element: Option<Box<AnySchemaType>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_to_element: Option<Box<AnySchemaType>>,
}

/// A schema type holding a single value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SimpleSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A simple type backed by a primitive data type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct PrimitiveSchemaType {
    #[serde(flatten, with = "SimpleSchemaType")]
    pub simple: SimpleSchemaType,
}

/// A simple type restricted to a set of valid values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct EnumSchemaType {
    #[serde(flatten, with = "SimpleSchemaType")]
    pub simple: SimpleSchemaType,

    #[serde(rename = "validValueSetGUID", default, skip_serializing_if = "Option::is_none")]
    pub valid_value_set_guid: Option<String>,
}

/// A schema type with a single fixed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct LiteralSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<String>,
}

/// A reference to a schema type defined elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ExternalSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_schema_type: Option<Box<AnySchemaType>>,
}

/// A choice between alternative schema types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct SchemaTypeChoice {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schema_options: Vec<AnySchemaType>,
}

/// One operation of an API, with the shapes of its header, request and response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ApiOperation {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// HTTP verb or equivalent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_schema_type: Option<Box<AnySchemaType>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_schema_type: Option<Box<AnySchemaType>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema_type: Option<Box<AnySchemaType>>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_deprecated_operation: bool,
}

/// The schema of an API: its operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ApiSchemaType {
    #[serde(flatten, with = "SchemaType")]
    pub schema_type: SchemaType,

    #[serde(default)]
    pub operation_count: i32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_operations: Vec<ApiOperation>,
}

impl ApiSchemaType {
    /// Finds an operation by its path and command.
    pub fn operation(&self, path: &str, command: &str) -> Option<&ApiOperation> {
        self.api_operations.iter().find(|op| {
            op.path.as_deref() == Some(path)
                && op
                    .command
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(command))
        })
    }
}

extends!(SchemaType => SchemaElement, element);
extends!(ComplexSchemaType => SchemaType, schema_type);
extends!(StructSchemaType => ComplexSchemaType, complex);
extends!(BoundedSchemaType => SchemaType, schema_type);
extends!(MapSchemaType => SchemaType, schema_type);
extends!(SimpleSchemaType => SchemaType, schema_type);
extends!(PrimitiveSchemaType => SimpleSchemaType, simple);
extends!(EnumSchemaType => SimpleSchemaType, simple);
extends!(LiteralSchemaType => SchemaType, schema_type);
extends!(ExternalSchemaType => SchemaType, schema_type);
extends!(SchemaTypeChoice => SchemaType, schema_type);
extends!(ApiOperation => SchemaType, schema_type);
extends!(ApiSchemaType => SchemaType, schema_type);

impl_bean!(
    SchemaType,
    ComplexSchemaType,
    StructSchemaType,
    BoundedSchemaType,
    MapSchemaType,
    SimpleSchemaType,
    PrimitiveSchemaType,
    EnumSchemaType,
    LiteralSchemaType,
    ExternalSchemaType,
    SchemaTypeChoice,
    ApiOperation => "APIOperation",
    ApiSchemaType => "APISchemaType",
);

polymorphic! {
    /// Any schema type, selected by its `class` discriminator.
    AnySchemaType, fallback = SchemaType,
    variants: [
        SchemaType(SchemaType),
        Complex(ComplexSchemaType),
        Struct(StructSchemaType),
        Bounded(BoundedSchemaType),
        Map(MapSchemaType),
        Simple(SimpleSchemaType),
        Primitive(PrimitiveSchemaType),
        Enum(EnumSchemaType),
        Literal(LiteralSchemaType),
        External(ExternalSchemaType),
        Choice(SchemaTypeChoice),
        ApiOperation(ApiOperation),
        ApiSchema(ApiSchemaType),
    ]
}

impl AnySchemaType {
    /// The base schema type fields, whatever the concrete kind.
    pub fn schema_type(&self) -> &SchemaType {
        match self {
            Self::SchemaType(t) => t,
            Self::Complex(t) => &t.schema_type,
            Self::Struct(t) => &t.complex.schema_type,
            Self::Bounded(t) => &t.schema_type,
            Self::Map(t) => &t.schema_type,
            Self::Simple(t) => &t.schema_type,
            Self::Primitive(t) => &t.simple.schema_type,
            Self::Enum(t) => &t.simple.schema_type,
            Self::Literal(t) => &t.schema_type,
            Self::External(t) => &t.schema_type,
            Self::Choice(t) => &t.schema_type,
            Self::ApiOperation(t) => &t.schema_type,
            Self::ApiSchema(t) => &t.schema_type,
        }
    }

    /// Mutable access to the base schema type fields.
    pub fn schema_type_mut(&mut self) -> &mut SchemaType {
        match self {
            Self::SchemaType(t) => t,
            Self::Complex(t) => &mut t.schema_type,
            Self::Struct(t) => &mut t.complex.schema_type,
            Self::Bounded(t) => &mut t.schema_type,
            Self::Map(t) => &mut t.schema_type,
            Self::Simple(t) => &mut t.schema_type,
            Self::Primitive(t) => &mut t.simple.schema_type,
            Self::Enum(t) => &mut t.simple.schema_type,
            Self::Literal(t) => &mut t.schema_type,
            Self::External(t) => &mut t.schema_type,
            Self::Choice(t) => &mut t.schema_type,
            Self::ApiOperation(t) => &mut t.schema_type,
            Self::ApiSchema(t) => &mut t.schema_type,
        }
    }

    /// Nested attributes, for the complex kinds.
    pub fn attributes(&self) -> &[SchemaAttribute] {
        match self {
            Self::Complex(t) => &t.schema_attributes,
            Self::Struct(t) => &t.complex.schema_attributes,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::Bean;
    use pretty_assertions::assert_eq;

    fn primitive(data_type: &str) -> AnySchemaType {
        let mut p = PrimitiveSchemaType::default();
        p.data_type = Some(data_type.into());
        p.into()
    }

    #[test]
    fn map_schema_type_roundtrip_keeps_nested_kinds() {
        let mut map = MapSchemaType::default();
        map.qualified_name = Some("Map:customerIndex".into());
        map.map_from_element = Some(Box::new(primitive("string")));
        map.map_to_element = Some(Box::new(StructSchemaType::default().into()));

        let json = serde_json::to_string(&AnySchemaType::from(map.clone())).unwrap();
        let back: AnySchemaType = serde_json::from_str(&json).unwrap();
        match back {
            AnySchemaType::Map(m) => {
                assert_eq!(m, map);
                assert!(matches!(
                    m.map_from_element.as_deref(),
                    Some(AnySchemaType::Primitive(_))
                ));
                assert!(matches!(
                    m.map_to_element.as_deref(),
                    Some(AnySchemaType::Struct(_))
                ));
            }
            other => panic!("expected map schema type, got {:?}", other),
        }
    }

    #[test]
    fn cloning_nested_type_is_independent() {
        let mut bounded = BoundedSchemaType::default();
        bounded.maximum_elements = 10;
        bounded.bounded_schema_category = Some(BoundedSchemaCategory::Array);
        bounded.element_type = Some(Box::new(primitive("int")));

        let mut copy = bounded.clone();
        if let Some(element) = copy.element_type.as_deref_mut() {
            element.schema_type_mut().author = Some("changed".into());
        }

        assert_eq!(
            bounded.element_type.as_deref().unwrap().schema_type().author,
            None
        );
        assert_ne!(copy, bounded);
    }

    #[test]
    fn complex_type_attribute_lookup() {
        let mut complex = ComplexSchemaType::default();
        let mut id = SchemaAttribute::default();
        id.display_name = Some("id".into());
        complex.push_attribute(id);
        let mut name = SchemaAttribute::default();
        name.display_name = Some("name".into());
        complex.push_attribute(name);

        assert_eq!(complex.attribute_count, 2);
        assert!(complex.attribute("name").is_some());
        assert!(complex.attribute("email").is_none());
        assert_eq!(AnySchemaType::from(complex).attributes().len(), 2);
    }

    #[test]
    fn api_schema_uses_upper_case_class_names() {
        let mut op = ApiOperation::default();
        op.path = Some("/customers/{id}".into());
        op.command = Some("GET".into());
        op.response_schema_type = Some(Box::new(StructSchemaType::default().into()));

        let mut api = ApiSchemaType::default();
        api.operation_count = 1;
        api.api_operations.push(op);

        let value = serde_json::to_value(AnySchemaType::from(api.clone())).unwrap();
        assert_eq!(value["class"], "APISchemaType");
        assert_eq!(value["apiOperations"][0]["responseSchemaType"]["class"], "StructSchemaType");
        assert_eq!(ApiOperation::CLASS_NAME, "APIOperation");

        assert!(api.operation("/customers/{id}", "get").is_some());
        assert!(api.operation("/customers/{id}", "DELETE").is_none());
    }

    #[test]
    fn choice_holds_mixed_kinds() {
        let mut literal = LiteralSchemaType::default();
        literal.fixed_value = Some("N/A".into());

        let mut choice = SchemaTypeChoice::default();
        choice.schema_options.push(primitive("date"));
        choice.schema_options.push(literal.into());

        let json = serde_json::to_string(&AnySchemaType::from(choice.clone())).unwrap();
        let back: AnySchemaType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AnySchemaType::Choice(choice));
    }

    #[test]
    fn enum_schema_type_inherits_simple_fields() {
        let mut e = EnumSchemaType::default();
        e.data_type = Some("string".into());
        e.default_value = Some("UNKNOWN".into());
        e.valid_value_set_guid = Some("vv-set-1".into());

        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["dataType"], "string");
        assert_eq!(value["validValueSetGUID"], "vv-set-1");
    }

    #[test]
    fn schema_type_without_class_decodes_as_base() {
        let t: AnySchemaType =
            serde_json::from_str(r#"{"qualifiedName":"T1","versionNumber":"2.0"}"#).unwrap();
        assert_eq!(t.class_name(), "SchemaType");
        assert_eq!(t.schema_type().version_number.as_deref(), Some("2.0"));
    }
}
