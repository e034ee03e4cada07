//! Deterministic fingerprints for beans.
//!
//! Produces a SHA-256 hex digest over the bean's JSON form with object keys
//! in sorted order, so equal beans produce equal fingerprints however their
//! maps were built.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Separator byte written after every token.
const SEP: u8 = 0;

/// Computes the fingerprint of any serializable bean or bean family.
pub fn fingerprint<T: Serialize + ?Sized>(bean: &T) -> String {
    let mut h = Sha256::new();
    match serde_json::to_value(bean) {
        Ok(value) => write_value(&mut h, &value),
        Err(e) => {
            // Only non-string map keys fail here; none of the beans have them.
            tracing::warn!(error = %e, "bean did not serialize, fingerprinting the error");
            write_tag(&mut h, b'!');
            write_str(&mut h, &e.to_string());
        }
    }
    format!("{:x}", h.finalize())
}

// -- helper writers --------------------------------------------------------

fn write_value(h: &mut Sha256, value: &Value) {
    match value {
        Value::Null => write_tag(h, b'z'),
        Value::Bool(b) => {
            write_tag(h, b'b');
            write_str(h, if *b { "true" } else { "false" });
        }
        Value::Number(n) => {
            write_tag(h, b'n');
            write_str(h, &n.to_string());
        }
        Value::String(s) => {
            write_tag(h, b's');
            write_str(h, s);
        }
        Value::Array(items) => {
            write_tag(h, b'[');
            for item in items {
                write_value(h, item);
            }
            write_tag(h, b']');
        }
        Value::Object(map) => {
            write_tag(h, b'{');
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                write_str(h, key);
                write_value(h, &map[key.as_str()]);
            }
            write_tag(h, b'}');
        }
    }
}

fn write_tag(h: &mut Sha256, tag: u8) {
    h.update([tag, SEP]);
}

fn write_str(h: &mut Sha256, s: &str) {
    h.update(s.as_bytes());
    h.update([SEP]);
}
