//! Connections: everything needed to create and configure a connector to an
//! asset. These beans carry configuration only; nothing here opens a
//! connection.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bean::{extends, impl_bean, polymorphic, saturating_count};
use crate::element::{ExtendedProperties, PropertyBase, Referenceable};

const REDACTED: &str = "<redacted>";

/// Describes the connector implementation a connection selects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct ConnectorType {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_asset_type_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_deployed_implementation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_data_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_provider_class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_framework_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_interface_language: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connector_interfaces: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_technology_source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_technology_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_technology_interfaces: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_technology_versions: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recognized_additional_properties: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recognized_configuration_properties: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recognized_secured_properties: Vec<String>,
}

impl ConnectorType {
    /// Returns `true` if `name` is a configuration property the connector
    /// understands. An empty list means any property is accepted.
    pub fn recognizes_configuration_property(&self, name: &str) -> bool {
        self.recognized_configuration_properties.is_empty()
            || self.recognized_configuration_properties.iter().any(|p| p == name)
    }
}

/// Network address and protocol of the resource a connector reaches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_method: Option<String>,
}

impl Endpoint {
    /// An endpoint with just an address.
    pub fn at(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..Default::default()
        }
    }
}

/// Connector type, endpoint and credentials for one connector instance.
///
/// `Debug` output hides passwords and secured property values.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Connection {
    #[serde(flatten, with = "Referenceable")]
    pub referenceable: Referenceable,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<ConnectorType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_password: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub configuration_properties: ExtendedProperties,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub secured_properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_summary: Option<String>,
}

impl Connection {
    /// Looks up a configuration property.
    pub fn configuration_property(&self, name: &str) -> Option<&serde_json::Value> {
        self.configuration_properties.get(name)
    }

    /// Returns `true` if the connection carries any credential material.
    pub fn has_secrets(&self) -> bool {
        self.encrypted_password.is_some()
            || self.clear_password.is_some()
            || !self.secured_properties.is_empty()
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |secret: &Option<String>| secret.as_ref().map(|_| REDACTED);
        let secured: BTreeMap<&str, &str> = self
            .secured_properties
            .keys()
            .map(|k| (k.as_str(), REDACTED))
            .collect();

        f.debug_struct("Connection")
            .field("referenceable", &self.referenceable)
            .field("display_name", &self.display_name)
            .field("description", &self.description)
            .field("connector_type", &self.connector_type)
            .field("endpoint", &self.endpoint)
            .field("user_id", &self.user_id)
            .field("encrypted_password", &redact(&self.encrypted_password))
            .field("clear_password", &redact(&self.clear_password))
            .field("configuration_properties", &self.configuration_properties)
            .field("secured_properties", &secured)
            .field("asset_summary", &self.asset_summary)
            .finish()
    }
}

/// A connection nested inside a virtual connection, with the arguments the
/// virtual connector passes to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct EmbeddedConnection {
    #[serde(flatten, with = "PropertyBase")]
    pub base: PropertyBase,

    #[serde(default)]
    pub position: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: ExtendedProperties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedded_connection: Option<Box<AnyConnection>>,
}

/// A connection whose connector delegates to embedded connections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct VirtualConnection {
    #[serde(flatten, with = "Connection")]
    pub connection: Connection,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedded_connections: Vec<EmbeddedConnection>,
}

impl VirtualConnection {
    /// Appends a connection at the next position.
    pub fn embed(&mut self, connection: impl Into<AnyConnection>, arguments: ExtendedProperties) {
        let position = saturating_count(self.embedded_connections.len());
        self.embedded_connections.push(EmbeddedConnection {
            position,
            arguments,
            embedded_connection: Some(Box::new(connection.into())),
            ..Default::default()
        });
    }
}

extends!(ConnectorType => Referenceable, referenceable);
extends!(Endpoint => Referenceable, referenceable);
extends!(Connection => Referenceable, referenceable);
extends!(EmbeddedConnection => PropertyBase, base);
extends!(VirtualConnection => Connection, connection);

impl_bean!(ConnectorType, Endpoint, Connection, EmbeddedConnection, VirtualConnection);

polymorphic! {
    /// A plain or virtual connection.
    AnyConnection, fallback = Connection,
    variants: [
        Connection(Connection),
        Virtual(VirtualConnection),
    ]
}

impl AnyConnection {
    /// The connection fields, for either kind.
    pub fn connection(&self) -> &Connection {
        match self {
            Self::Connection(c) => c,
            Self::Virtual(v) => &v.connection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bean::Bean;
    use pretty_assertions::assert_eq;

    fn secured_connection() -> Connection {
        let mut c = Connection::default();
        c.qualified_name = Some("Connection:customers-db".into());
        c.user_id = Some("svc-reader".into());
        c.clear_password = Some("hunter2".into());
        c.secured_properties.insert("apiKey".into(), "abc123".into());
        c.endpoint = Some(Endpoint::at("db.example.com:5432"));
        c
    }

    #[test]
    fn debug_redacts_credentials() {
        let c = secured_connection();
        let out = format!("{:?}", c);
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("abc123"));
        assert!(out.contains("apiKey"));
        assert!(out.contains("svc-reader"));
        assert!(c.has_secrets());

        let virtual_out = format!("{:?}", VirtualConnection::from(c));
        assert!(!virtual_out.contains("hunter2"));
    }

    #[test]
    fn serialization_keeps_credentials() {
        let value = serde_json::to_value(secured_connection()).unwrap();
        assert_eq!(value["clearPassword"], "hunter2");
        assert_eq!(value["securedProperties"]["apiKey"], "abc123");
        assert_eq!(value["endpoint"]["address"], "db.example.com:5432");
        assert_eq!(value["class"], "Connection");
        assert_eq!(value["endpoint"]["class"], "Endpoint");
    }

    #[test]
    fn virtual_connection_roundtrip() {
        let mut v = VirtualConnection::default();
        v.qualified_name = Some("Connection:federated".into());
        let mut args = ExtendedProperties::new();
        args.insert("table".into(), serde_json::json!("customers"));
        v.embed(secured_connection(), args);
        v.embed(VirtualConnection::default(), ExtendedProperties::new());

        let json = serde_json::to_string(&AnyConnection::from(v.clone())).unwrap();
        let back: AnyConnection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AnyConnection::Virtual(v));

        let AnyConnection::Virtual(back) = back else {
            panic!("expected virtual connection");
        };
        assert_eq!(back.embedded_connections[1].position, 1);
        assert!(matches!(
            back.embedded_connections[1].embedded_connection.as_deref(),
            Some(AnyConnection::Virtual(_))
        ));
    }

    #[test]
    fn connector_type_property_recognition() {
        let mut t = ConnectorType::default();
        assert!(t.recognizes_configuration_property("anything"));
        t.recognized_configuration_properties = vec!["fileName".into()];
        assert!(t.recognizes_configuration_property("fileName"));
        assert!(!t.recognizes_configuration_property("delimiter"));
    }

    #[test]
    fn copy_does_not_share_configuration() {
        let mut template = secured_connection();
        template
            .configuration_properties
            .insert("batchSize".into(), serde_json::json!(100));

        let mut copy = Connection::from_template(Some(&template));
        copy.configuration_properties
            .insert("batchSize".into(), serde_json::json!(500));
        copy.secured_properties.clear();

        assert_eq!(
            template.configuration_property("batchSize"),
            Some(&serde_json::json!(100))
        );
        assert_eq!(template.secured_properties.len(), 1);
    }
}
