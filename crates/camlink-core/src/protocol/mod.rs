//! Camera-control protocol: the event catalog and its JSON codec.
//!
//! - `catalog`: every variant, its discriminator, and its optional fields.
//! - `shape`: static metadata (`EventShape`, `CATALOG` descriptors).
//! - `codec`: `event_id`-dispatched decode and the matching encode.
//!
//! Decoding is pure and panic-free; malformed input is reported as
//! `CamlinkError`, and unknown discriminators as `Decoded::Unrecognized`.

pub mod catalog;
pub mod codec;
pub mod shape;

pub use catalog::{Event, CATALOG};
pub use codec::{decode, decode_all, decode_slice, encode, Decoded, Decoder, DISCRIMINATOR_KEY};
pub use shape::{lookup, EventDescriptor, EventShape, FieldDescriptor, FieldKind, WireType};
