mod sender;

pub use sender::MidiSender;

/// A fully-populated MIDI event, ready for the wire.
///
/// Note releases are expressed as note-on with velocity 0; there is no
/// dedicated note-off variant. Controller values and bend amounts carry the
/// raw engine output, the sender clamps them into wire range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutboundEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    Controller { channel: u8, controller: u8, value: i32 },
    PitchBend { channel: u8, bend: i32 },
    ProgramChange { channel: u8, program: u32 },
}
