//! Debug dump of decoded values
//!
//! Every codec type projects itself onto a `serde_json::Value`. Records
//! list present fields only, CHOICE values are an object keyed by the
//! active alternative, so the dump shows exactly what was on the wire.

pub use serde_json::{json, Map, Value};

use crate::per::Null;

/// Human readable projection of a PER value
pub trait ToJson {
    fn to_json(&self) -> Value;

    /// Pretty printed dump, field order as declared
    fn to_debug_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_else(|_| String::from("null"))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToJson for Null {
    fn to_json(&self) -> Value {
        Value::Null
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}
