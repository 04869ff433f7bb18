//! Plays a Linux gamepad as a MIDI instrument.
//!
//! Raw evdev events are resolved against a fixed table of 22 controls, each
//! holding a template for the MIDI event it produces. The engine in
//! [`mapper`] does the translation, [`midi`] puts the result on the wire.

pub mod device;
pub mod mapper;
pub mod mapping;
pub mod midi;

pub use mapper::MidiMapper;
pub use mapping::{EventKind, MappingError, MappingTable, PadControl, Slot};
pub use midi::{MidiSender, OutboundEvent};
