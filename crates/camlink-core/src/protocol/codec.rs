//! JSON decode/encode for catalog events.
//!
//! Decoding rules:
//! - The payload must be a JSON object carrying an integer `event_id`.
//! - Unknown discriminators are not errors: they decode to
//!   [`Decoded::Unrecognized`] so newer producers can talk to older consumers.
//! - Present fields must match the variant's types exactly (no string to
//!   number coercion). `null` is treated as absent.
//! - Keys that do not belong to the matched variant are ignored unless the
//!   decoder is built with `deny_unknown_fields`.

use serde_json::Value;

use crate::error::{CamlinkError, Result};

use super::catalog::Event;
use super::shape::lookup;

/// Wire key of the discriminator.
pub const DISCRIMINATOR_KEY: &str = "event_id";

/// Outcome of a successful decode.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// A catalog event.
    Event(Event),
    /// Well-formed payload whose `event_id` this build does not know.
    Unrecognized { event_id: i128 },
}

impl Decoded {
    /// The event, dropping unrecognized payloads.
    pub fn into_event(self) -> Option<Event> {
        match self {
            Decoded::Event(ev) => Some(ev),
            Decoded::Unrecognized { .. } => None,
        }
    }

    /// The event, or `UnknownDiscriminator` for callers that cannot skip it.
    pub fn require(self) -> Result<Event> {
        match self {
            Decoded::Event(ev) => Ok(ev),
            Decoded::Unrecognized { event_id } => Err(CamlinkError::UnknownDiscriminator(event_id)),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Decoded::Event(_))
    }
}

/// Configurable decoder. `Decoder::default()` is lenient and unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    max_payload_bytes: Option<usize>,
    deny_unknown_fields: bool,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject payloads longer than `max` bytes before parsing them.
    pub fn max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = Some(max);
        self
    }

    /// Reject keys that are neither `event_id` nor a field of the matched variant.
    pub fn deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }

    pub fn decode(&self, raw: &str) -> Result<Decoded> {
        self.decode_slice(raw.as_bytes())
    }

    pub fn decode_slice(&self, raw: &[u8]) -> Result<Decoded> {
        if let Some(max) = self.max_payload_bytes {
            if raw.len() > max {
                return Err(CamlinkError::PayloadTooLarge { len: raw.len(), max });
            }
        }

        let value: Value = serde_json::from_slice(raw)
            .map_err(|e| CamlinkError::Malformed(format!("invalid json: {e}")))?;
        self.decode_value(value)
    }

    /// Decode an already-parsed JSON value.
    pub fn decode_value(&self, value: Value) -> Result<Decoded> {
        let event_id = discriminator(&value)?;

        let Some(id) = u16::try_from(event_id).ok().filter(|id| lookup(*id).is_some()) else {
            tracing::debug!(event_id = %event_id, "dropping unrecognized event");
            return Ok(Decoded::Unrecognized { event_id });
        };

        if self.deny_unknown_fields {
            check_fields(id, &value)?;
        }

        match Event::from_object(id, value) {
            Some(Ok(ev)) => match ev.unrepresentable_field() {
                None => Ok(Decoded::Event(ev)),
                Some(field) => Err(CamlinkError::TypeMismatch {
                    event: ev.name(),
                    detail: format!("{field}: number out of f32 range"),
                }),
            },
            Some(Err(e)) => Err(CamlinkError::TypeMismatch {
                event: lookup(id).map_or("?", |d| d.name),
                detail: e.to_string(),
            }),
            None => Err(CamlinkError::Internal(format!(
                "event_id {id} listed in catalog but has no decoder"
            ))),
        }
    }
}

fn discriminator(value: &Value) -> Result<i128> {
    let n = value
        .as_object()
        .and_then(|obj| obj.get(DISCRIMINATOR_KEY))
        .and_then(Value::as_number)
        .ok_or(CamlinkError::MissingDiscriminator)?;

    if let Some(i) = n.as_i64() {
        return Ok(i128::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(i128::from(u));
    }
    // Integer literals past the u64/i64 range reach us as f64. Small integral
    // floats such as `29.0` were written as floats and stay rejected.
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && (f >= U64_LIMIT || f < I64_LIMIT) => Ok(f as i128),
        _ => Err(CamlinkError::MissingDiscriminator),
    }
}

const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;
const I64_LIMIT: f64 = -9_223_372_036_854_775_808.0;

fn check_fields(id: u16, value: &Value) -> Result<()> {
    let (Some(desc), Some(obj)) = (lookup(id), value.as_object()) else {
        return Ok(());
    };
    match obj
        .keys()
        .find(|k| k.as_str() != DISCRIMINATOR_KEY && !desc.has_field(k))
    {
        Some(k) => Err(CamlinkError::UnknownField {
            event: desc.name,
            field: k.clone(),
        }),
        None => Ok(()),
    }
}

/// Decode with the default (lenient, unbounded) decoder.
pub fn decode(raw: &str) -> Result<Decoded> {
    Decoder::default().decode(raw)
}

pub fn decode_slice(raw: &[u8]) -> Result<Decoded> {
    Decoder::default().decode_slice(raw)
}

impl Event {
    /// JSON object with `event_id` plus every present field.
    pub fn to_value(&self) -> Result<Value> {
        if let Some(field) = self.unrepresentable_field() {
            return Err(CamlinkError::Encode(format!(
                "{}: {field} is not a finite number",
                self.name()
            )));
        }

        let payload = self
            .payload()
            .map_err(|e| CamlinkError::Encode(format!("{}: {e}", self.name())))?;

        let mut obj = match payload {
            Value::Object(obj) => obj,
            other => {
                return Err(CamlinkError::Encode(format!(
                    "{} serialized to non-object: {other}",
                    self.name()
                )))
            }
        };
        obj.insert(DISCRIMINATOR_KEY.to_owned(), Value::from(self.id()));
        Ok(Value::Object(obj))
    }
}

/// Serialize an event to its compact JSON wire form.
pub fn encode(event: &Event) -> Result<String> {
    let value = event.to_value()?;
    serde_json::to_string(&value).map_err(|e| CamlinkError::Encode(e.to_string()))
}

/// Decode a batch of payloads, keeping only recognized events.
///
/// Stops at the first hard failure.
pub fn decode_all<'a, I>(decoder: &Decoder, raws: I) -> Result<Vec<Event>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    for raw in raws {
        if let Some(ev) = decoder.decode(raw)?.into_event() {
            out.push(ev);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::error::ErrorCode;
    use crate::protocol::catalog::*;

    #[test]
    fn shutter_speed_example() {
        let ev = decode(r#"{"event_id": 29, "shutter_speed": 125}"#)
            .unwrap()
            .require()
            .unwrap();
        assert_eq!(
            ev,
            Event::ConfigSetShutterSpeed(ConfigSetShutterSpeed {
                shutter_speed: Some(125)
            })
        );
    }

    #[test]
    fn signal_variant() {
        let ev = decode(r#"{"event_id": 17}"#).unwrap().into_event().unwrap();
        assert_eq!(ev, Event::CameraConnected(CameraConnected {}));
        assert!(ev.fields().is_empty());
    }

    #[test]
    fn unknown_id_is_not_an_error() {
        let d = decode(r#"{"event_id": 9999}"#).unwrap();
        assert_eq!(d, Decoded::Unrecognized { event_id: 9999 });
        assert!(!d.is_recognized());
        assert_eq!(d.clone().into_event(), None);
        assert_eq!(d.require().unwrap_err().code(), ErrorCode::UnknownDiscriminator);

        assert_eq!(
            decode(r#"{"event_id": -3}"#).unwrap(),
            Decoded::Unrecognized { event_id: -3 }
        );
        assert_eq!(
            decode(r#"{"event_id": 5}"#).unwrap(),
            Decoded::Unrecognized { event_id: 5 }
        );
    }

    #[test]
    fn discriminator_must_be_an_integer() {
        for raw in [
            r#"{"shutter_speed": 125}"#,
            r#"{"event_id": "29"}"#,
            r#"{"event_id": 29.5}"#,
            r#"{"event_id": null}"#,
            r#"[29]"#,
            "29",
        ] {
            let err = decode(raw).unwrap_err();
            assert_eq!(err.code(), ErrorCode::MissingDiscriminator, "raw={raw}");
        }
    }

    #[test]
    fn malformed_json() {
        let err = decode(r#"{"event_id": 29,"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Malformed);
        let err = decode_slice(&[0xff, 0xfe]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Malformed);
    }

    #[test]
    fn wrong_type_is_rejected() {
        let err = decode(r#"{"event_id": 29, "shutter_speed": "125"}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert!(err.to_string().contains("ConfigSetShutterSpeed"));

        let err = decode(r#"{"event_id": 31, "shutter_speed_choices": [1, "2"]}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);

        let err = decode(r#"{"event_id": 43, "battery": 2.5}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
    }

    #[test]
    fn float_overflow_is_a_type_mismatch() {
        let err = decode(r#"{"event_id": 61, "light_meter": 1e39}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert!(err.to_string().contains("light_meter"));

        let err = decode(r#"{"event_id": 61, "min": -1e39}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);

        assert!(decode(r#"{"event_id": 61, "max": 3.0e38}"#)
            .unwrap()
            .is_recognized());
    }

    #[test]
    fn non_finite_floats_do_not_encode() {
        for v in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let ev: Event = ConfigValueLightMeter {
                light_meter: Some(v),
                min: Some(0.0),
                max: None,
            }
            .into();
            let err = encode(&ev).unwrap_err();
            assert_eq!(err.code(), ErrorCode::EncodeFailed);
            assert!(err.to_string().contains("light_meter"));
        }
    }

    #[test]
    fn huge_integer_id_is_unrecognized() {
        let d = decode(r#"{"event_id": 100000000000000000000}"#).unwrap();
        assert!(matches!(d, Decoded::Unrecognized { event_id } if event_id > i128::from(u64::MAX)));

        let d = decode(r#"{"event_id": -100000000000000000000}"#).unwrap();
        assert!(matches!(d, Decoded::Unrecognized { event_id } if event_id < i128::from(i64::MIN)));

        assert_eq!(
            decode(r#"{"event_id": 29.0}"#).unwrap_err().code(),
            ErrorCode::MissingDiscriminator
        );
    }

    #[test]
    fn null_field_is_absent() {
        let ev = decode(r#"{"event_id": 24, "downloaded": null, "file": "x.jpg"}"#)
            .unwrap()
            .require()
            .unwrap();
        assert_eq!(
            ev,
            Event::CameraCaptureDone(CameraCaptureDone {
                downloaded: None,
                file: Some("x.jpg".into())
            })
        );
    }

    #[test]
    fn foreign_fields_are_ignored_by_default() {
        // "iso" belongs to variant 39/40, not 29.
        let ev = decode(r#"{"event_id": 29, "iso": 400, "shutter_speed": 60}"#)
            .unwrap()
            .require()
            .unwrap();
        assert_eq!(
            ev,
            Event::ConfigSetShutterSpeed(ConfigSetShutterSpeed {
                shutter_speed: Some(60)
            })
        );
    }

    #[test]
    fn strict_decoder_rejects_foreign_fields() {
        let strict = Decoder::new().deny_unknown_fields(true);
        let err = strict
            .decode(r#"{"event_id": 29, "iso": 400}"#)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownField);

        assert!(strict
            .decode(r#"{"event_id": 29, "shutter_speed": 60}"#)
            .unwrap()
            .is_recognized());
        // Unknown ids stay silent even in strict mode.
        assert!(!strict
            .decode(r#"{"event_id": 400, "anything": 1}"#)
            .unwrap()
            .is_recognized());
    }

    #[test]
    fn size_limit() {
        let d = Decoder::new().max_payload_bytes(16);
        assert!(d.decode(r#"{"event_id":17}"#).is_ok());
        let err = d
            .decode(r#"{"event_id": 24, "file": "a_long_file_name.jpg"}"#)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadTooLarge);
    }

    #[test]
    fn encode_writes_only_present_fields() {
        let ev: Event = IntervalometerState {
            state: Some("RUNNING".into()),
            intervalms: None,
            num_captures: Some(3),
            total_captures: None,
        }
        .into();
        let v: Value = serde_json::from_str(&encode(&ev).unwrap()).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"event_id": 73, "state": "RUNNING", "num_captures": 3})
        );
    }

    #[test]
    fn decode_all_skips_unrecognized() {
        let evs = decode_all(
            &Decoder::default(),
            [r#"{"event_id": 17}"#, r#"{"event_id": 999}"#, r#"{"event_id": 18}"#],
        )
        .unwrap();
        assert_eq!(evs.iter().map(Event::id).collect::<Vec<_>>(), vec![17, 18]);
    }
}
