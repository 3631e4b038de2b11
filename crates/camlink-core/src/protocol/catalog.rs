//! The closed event catalog.
//!
//! Every variant is declared exactly once in the `event_catalog!` invocation
//! below. The macro emits the payload struct, its `EventShape` impl, the
//! matching `Event` variant, and the `CATALOG` entry, so the discriminator to
//! shape mapping cannot fall out of sync. Reusing a discriminator is a
//! compile error (`unreachable_patterns` is denied in the dispatch matches).
//!
//! Field names double as wire keys. Renaming one is a protocol change.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::shape::{EventDescriptor, EventShape, FieldDescriptor, WireType};

macro_rules! event_catalog {
    (
        $(
            $(#[$meta:meta])*
            $id:literal => $name:ident { $( $field:ident : $ty:ty ),* $(,)? }
        )*
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
            pub struct $name {
                $(
                    #[serde(default, skip_serializing_if = "Option::is_none")]
                    pub $field: Option<$ty>,
                )*
            }

            impl EventShape for $name {
                const ID: u16 = $id;
                const NAME: &'static str = stringify!($name);
                const FIELDS: &'static [FieldDescriptor] = &[
                    $( FieldDescriptor { name: stringify!($field), kind: <$ty as WireType>::KIND }, )*
                ];
            }

            impl $name {
                /// First present field whose value has no JSON form.
                fn unrepresentable_field(&self) -> Option<&'static str> {
                    $(
                        if matches!(&self.$field, Some(v) if !WireType::is_representable(v)) {
                            return Some(stringify!($field));
                        }
                    )*
                    None
                }
            }

            impl From<$name> for Event {
                fn from(v: $name) -> Self {
                    Event::$name(v)
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))?;
                    #[allow(unused_mut)]
                    let mut open = false;
                    $(
                        if let Some(v) = &self.$field {
                            f.write_str(if open { ", " } else { "{" })?;
                            write!(f, "{} = {:?}", stringify!($field), v)?;
                            open = true;
                        }
                    )*
                    if open {
                        f.write_str("}")?;
                    }
                    Ok(())
                }
            }
        )*

        /// A camera-control event: one variant per catalog entry.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Event {
            $( $name($name), )*
        }

        impl Event {
            /// Discriminator carried on the wire as `event_id`.
            pub fn id(&self) -> u16 {
                match self {
                    $( Event::$name(_) => <$name as EventShape>::ID, )*
                }
            }

            /// Stable variant name.
            pub fn name(&self) -> &'static str {
                match self {
                    $( Event::$name(_) => <$name as EventShape>::NAME, )*
                }
            }

            pub fn fields(&self) -> &'static [FieldDescriptor] {
                match self {
                    $( Event::$name(_) => <$name as EventShape>::FIELDS, )*
                }
            }

            /// Build the variant for `id` with every field absent.
            #[deny(unreachable_patterns)]
            pub fn empty(id: u16) -> Option<Event> {
                match id {
                    $( $id => Some(Event::$name($name::default())), )*
                    _ => None,
                }
            }

            /// Deserialize `value` as the shape registered for `id`.
            ///
            /// `None` means the discriminator is not in the catalog.
            #[deny(unreachable_patterns)]
            pub(crate) fn from_object(id: u16, value: Value) -> Option<serde_json::Result<Event>> {
                match id {
                    $( $id => Some(serde_json::from_value::<$name>(value).map(Event::$name)), )*
                    _ => None,
                }
            }

            /// First present field that cannot round-trip through JSON
            /// (an f32 that overflowed to infinity, or NaN).
            pub(crate) fn unrepresentable_field(&self) -> Option<&'static str> {
                match self {
                    $( Event::$name(v) => v.unrepresentable_field(), )*
                }
            }

            /// Present payload fields only, without `event_id`.
            pub(crate) fn payload(&self) -> serde_json::Result<Value> {
                match self {
                    $( Event::$name(v) => serde_json::to_value(v), )*
                }
            }
        }

        impl fmt::Display for Event {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $( Event::$name(v) => v.fmt(f), )*
                }
            }
        }

        /// Every catalog entry, in discriminator order.
        pub const CATALOG: &[EventDescriptor] = &[
            $(
                EventDescriptor {
                    id: $id,
                    name: stringify!($name),
                    fields: <$name as EventShape>::FIELDS,
                },
            )*
        ];
    };
}

event_catalog! {
    /// Connect to the camera.
    10 => CameraCmdConnect {}
    11 => CameraCmdDisconnect {}
    /// Leave the error state and retry the connection.
    12 => CameraCmdRecoverError {}
    13 => CameraCmdCapture {}
    /// Capture request issued by the controller itself.
    14 => CameraCmdCaptureInternal {}
    /// Enable or disable downloading captures to the host.
    15 => CameraCmdDownload { download: bool }
    16 => CameraCmdDownloadInternal {}
    17 => CameraConnected {}
    18 => CameraReady {}
    19 => CameraDisconnected {}
    20 => CameraConnectionError {}
    21 => CameraError {}
    22 => CameraIgnoreError {}
    /// Skip the slow post-capture steps.
    23 => CameraCmdLowLatency { low_latency: bool }
    /// A capture finished; `file` is the camera-side path.
    24 => CameraCaptureDone { downloaded: bool, file: String }
    25 => GetCameraControllerState {}
    /// Controller state machine snapshot.
    26 => CameraControllerState { state: String, camera_connected: bool }

    27 => ConfigGetShutterSpeed {}
    28 => ConfigGetChoicesShutterSpeed {}
    29 => ConfigSetShutterSpeed { shutter_speed: i32 }
    /// Current shutter speed; `bulb` is set when the camera is in bulb mode.
    30 => ConfigValueShutterSpeed { shutter_speed: i32, bulb: bool }
    31 => ConfigChoicesShutterSpeed { shutter_speed_choices: Vec<i32> }

    32 => ConfigGetAperture {}
    33 => ConfigGetChoicesAperture {}
    34 => ConfigSetAperture { aperture: i32 }
    35 => ConfigValueAperture { aperture: i32 }
    36 => ConfigChoicesAperture { aperture_choices: Vec<i32> }

    37 => ConfigGetISO {}
    38 => ConfigGetChoicesISO {}
    39 => ConfigSetISO { iso: i32 }
    40 => ConfigValueISO { iso: i32 }
    41 => ConfigChoicesISO { iso_choices: Vec<i32> }

    42 => ConfigGetBattery {}
    /// Battery level in percent.
    43 => ConfigValueBattery { battery: i32 }
    44 => ConfigGetFocalLength {}
    45 => ConfigValueFocalLength { focal_length: i32 }
    46 => ConfigGetFocusMode {}
    47 => ConfigNextFocusMode {}
    48 => ConfigValueFocusMode { focus_mode: String }

    /// Long exposure noise reduction.
    49 => ConfigGetLongExpNR {}
    50 => ConfigSetLongExpNR { long_exp_nr: bool }
    51 => ConfigValueLongExpNR { long_exp_nr: bool }

    /// Vibration reduction.
    52 => ConfigGetVibRed {}
    53 => ConfigSetVibRed { vr: bool }
    54 => ConfigValueVibRed { vr: bool }

    55 => ConfigGetCaptureTarget {}
    56 => ConfigSetCaptureTarget { target: String }
    57 => ConfigValueCaptureTarget { target: String }
    58 => ConfigGetExposureProgram {}
    59 => ConfigValueExposureProgram { exposure_program: String }
    60 => ConfigGetLightMeter {}
    /// Light meter reading and the bounds of its scale.
    61 => ConfigValueLightMeter { light_meter: f32, min: f32, max: f32 }
    62 => ConfigGetAutoISO {}
    63 => ConfigSetAutoISO { auto_iso: bool }
    64 => ConfigValueAutoISO { auto_iso: bool }
    /// Ask for every `ConfigValue*` event at once.
    65 => ConfigGetAll {}

    66 => GetCurrentMode {}
    67 => ValueCurrentMode { mode: String }
    68 => ModeStopped {}
    69 => ModeStop {}
    /// Switch to intervalometer mode.
    70 => ModeIntervalometer { intervalms: i32, total_captures: i32 }
    71 => IntervalometerStart { intervalms: i32, total_captures: i32 }
    72 => IntervalometerDeadlineExpired {}
    /// Progress report while the intervalometer runs.
    73 => IntervalometerState { state: String, intervalms: i32, num_captures: i32, total_captures: i32 }

    /// Forward internal events to remote clients.
    74 => EnableEventPassThrough {}
    75 => DisableEventPassThrough {}
}
