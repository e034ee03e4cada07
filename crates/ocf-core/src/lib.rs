//! Open metadata property beans.
//!
//! Plain, JSON-serializable records describing assets, schemas,
//! classifications, connections, feedback and governance metadata. Each
//! bean embeds its parent record and derefs to it; families of related
//! beans decode by their `class` discriminator.

pub mod annotation;
pub mod any;
pub mod asset;
pub mod bean;
pub mod classification;
pub mod codec;
pub mod connection;
pub mod element;
pub mod enums;
pub mod feedback;
pub mod fingerprint;
pub mod governance;
pub mod schema;
pub mod schema_type;
pub mod timestamp;
pub mod valid_value;
pub mod validation;
