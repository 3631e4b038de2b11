//! Static shape metadata shared by every catalog variant.

use serde::{de::DeserializeOwned, Serialize};

use super::catalog::{Event, CATALOG};

/// Wire-level kind of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    Text,
    /// Ordered sequence of 32-bit integers.
    IntList,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Text => "string",
            FieldKind::IntList => "sequence<int>",
        }
    }
}

/// Rust types allowed as payload fields.
pub trait WireType {
    const KIND: FieldKind;

    /// False for values JSON cannot carry (non-finite floats).
    fn is_representable(&self) -> bool {
        true
    }
}

impl WireType for bool {
    const KIND: FieldKind = FieldKind::Bool;
}

impl WireType for i32 {
    const KIND: FieldKind = FieldKind::Int;
}

impl WireType for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn is_representable(&self) -> bool {
        self.is_finite()
    }
}

impl WireType for String {
    const KIND: FieldKind = FieldKind::Text;
}

impl WireType for Vec<i32> {
    const KIND: FieldKind = FieldKind::IntList;
}

/// One optional payload field: its wire key and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Catalog entry: discriminator, variant name, and payload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDescriptor {
    pub id: u16,
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl EventDescriptor {
    /// True when `key` is one of this variant's wire keys.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.name == key)
    }

    /// Signals carry nothing beyond the discriminator.
    pub fn is_signal(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Implemented by every concrete variant struct.
///
/// The discriminator is an associated constant: it is part of the type, not
/// a value that can drift at runtime.
pub trait EventShape: Serialize + DeserializeOwned + Default + Into<Event> {
    const ID: u16;
    const NAME: &'static str;
    const FIELDS: &'static [FieldDescriptor];

    fn into_event(self) -> Event {
        self.into()
    }
}

/// Find the catalog entry for a discriminator.
pub fn lookup(id: u16) -> Option<&'static EventDescriptor> {
    CATALOG.iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        let d = lookup(61).unwrap();
        assert_eq!(d.name, "ConfigValueLightMeter");
        assert!(d.has_field("min"));
        assert!(!d.has_field("event_id"));
        assert_eq!(d.fields[0].kind, FieldKind::Float);

        assert!(lookup(9).is_none());
        assert!(lookup(76).is_none());
    }

    #[test]
    fn signals_have_no_fields() {
        assert!(lookup(17).unwrap().is_signal());
        assert!(!lookup(15).unwrap().is_signal());
    }
}
