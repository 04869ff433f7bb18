use evdev::{AbsoluteAxisCode, KeyCode};
use thiserror::Error;
use tracing::{info, warn};

/// Outbound MIDI message category a slot translates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteOn,
    Controller,
    PitchBend,
    ProgramChange,
}

/// One mapping-table entry: the MIDI event template for a physical control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub kind: EventKind,
    /// Note or controller number. Unused by pitch-bend slots.
    pub parameter: u8,
    /// Zero-based MIDI channel (0-15).
    pub channel: u8,
}

/// Number of physical controls the table covers.
pub const SLOT_COUNT: usize = 22;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("invalid mapping '{spec}', expected 'c|n:<channel>:<number>'")]
    MalformedSpec { spec: String },
    #[error("channel numbers must be between 1 and 16, got {channel}")]
    InvalidChannel { channel: u32 },
}

/// The physical controls recognized on the pad.
///
/// Each control owns a fixed slot index in the mapping table; lookups go
/// through [`PadControl::slot`] so nothing depends on declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadControl {
    // face buttons
    North,
    South,
    East,
    West,
    // d-pad
    DpadUp,
    DpadDown,
    DpadRight,
    DpadLeft,
    // shoulder buttons (digital press)
    R1,
    L1,
    R2,
    L2,
    // stick clicks
    ThumbRight,
    ThumbLeft,
    // stick axes
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
    // trigger pressure axes
    L2Axis,
    R2Axis,
    // meta buttons
    Select,
    Start,
}

impl PadControl {
    /// Stable mapping-table index for this control.
    pub fn slot(self) -> usize {
        match self {
            PadControl::North => 0,
            PadControl::South => 1,
            PadControl::East => 2,
            PadControl::West => 3,
            PadControl::DpadUp => 4,
            PadControl::DpadDown => 5,
            PadControl::DpadRight => 6,
            PadControl::DpadLeft => 7,
            PadControl::R1 => 8,
            PadControl::L1 => 9,
            PadControl::R2 => 10,
            PadControl::L2 => 11,
            PadControl::ThumbRight => 12,
            PadControl::ThumbLeft => 13,
            PadControl::LeftStickX => 14,
            PadControl::LeftStickY => 15,
            PadControl::RightStickX => 16,
            PadControl::RightStickY => 17,
            PadControl::L2Axis => 18,
            PadControl::R2Axis => 19,
            PadControl::Select => 20,
            PadControl::Start => 21,
        }
    }

    /// Resolve an EV_KEY code, or None for keys this mapper ignores.
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::BTN_NORTH => Some(PadControl::North),
            KeyCode::BTN_SOUTH => Some(PadControl::South),
            KeyCode::BTN_EAST => Some(PadControl::East),
            KeyCode::BTN_WEST => Some(PadControl::West),
            KeyCode::BTN_DPAD_UP => Some(PadControl::DpadUp),
            KeyCode::BTN_DPAD_DOWN => Some(PadControl::DpadDown),
            KeyCode::BTN_DPAD_RIGHT => Some(PadControl::DpadRight),
            KeyCode::BTN_DPAD_LEFT => Some(PadControl::DpadLeft),
            KeyCode::BTN_TR => Some(PadControl::R1),
            KeyCode::BTN_TL => Some(PadControl::L1),
            KeyCode::BTN_TR2 => Some(PadControl::R2),
            KeyCode::BTN_TL2 => Some(PadControl::L2),
            KeyCode::BTN_THUMBR => Some(PadControl::ThumbRight),
            KeyCode::BTN_THUMBL => Some(PadControl::ThumbLeft),
            KeyCode::BTN_SELECT => Some(PadControl::Select),
            KeyCode::BTN_START => Some(PadControl::Start),
            _ => None,
        }
    }

    /// Resolve an EV_ABS code, or None for axes this mapper ignores.
    pub fn from_axis(axis: AbsoluteAxisCode) -> Option<Self> {
        match axis {
            AbsoluteAxisCode::ABS_X => Some(PadControl::LeftStickX),
            AbsoluteAxisCode::ABS_Y => Some(PadControl::LeftStickY),
            AbsoluteAxisCode::ABS_RX => Some(PadControl::RightStickX),
            AbsoluteAxisCode::ABS_RY => Some(PadControl::RightStickY),
            AbsoluteAxisCode::ABS_Z => Some(PadControl::L2Axis),
            AbsoluteAxisCode::ABS_RZ => Some(PadControl::R2Axis),
            _ => None,
        }
    }
}

/// The slot-per-control translation table.
///
/// Built from the default layout at startup, optionally patched by user
/// overrides, then handed to the mapper and never written again.
#[derive(Debug, Clone)]
pub struct MappingTable {
    slots: [Slot; SLOT_COUNT],
}

impl Default for MappingTable {
    fn default() -> Self {
        use EventKind::{NoteOn, PitchBend, ProgramChange};
        use PadControl::*;

        let layout: [(PadControl, EventKind, u8); SLOT_COUNT] = [
            // face buttons
            (North, NoteOn, 48),
            (South, NoteOn, 52),
            (East, NoteOn, 55),
            (West, NoteOn, 60),
            // d-pad
            (DpadUp, NoteOn, 64),
            (DpadDown, NoteOn, 67),
            (DpadRight, NoteOn, 72),
            (DpadLeft, NoteOn, 76),
            // shoulder buttons
            (R1, NoteOn, 79),
            (L1, NoteOn, 84),
            (R2, NoteOn, 50),
            (L2, NoteOn, 55),
            // stick clicks
            (ThumbRight, NoteOn, 59),
            (ThumbLeft, NoteOn, 62),
            // stick axes drive whole-channel pitch bend; the number here is
            // just the axis ordinal and never reaches the wire
            (LeftStickX, PitchBend, 0),
            (LeftStickY, PitchBend, 1),
            (RightStickX, PitchBend, 2),
            (RightStickY, PitchBend, 3),
            // trigger pressure axes
            (L2Axis, NoteOn, 77),
            (R2Axis, NoteOn, 81),
            // meta buttons step the program counter
            (Select, ProgramChange, 81),
            (Start, ProgramChange, 81),
        ];

        let mut slots = [Slot { kind: NoteOn, parameter: 0, channel: 0 }; SLOT_COUNT];
        for (control, kind, parameter) in layout {
            slots[control.slot()] = Slot { kind, parameter, channel: 0 };
        }
        Self { slots }
    }
}

impl MappingTable {
    pub fn slot(&self, index: usize) -> Slot {
        self.slots[index]
    }

    /// Replace one slot's template with a user-supplied `kind:channel:number`
    /// spec, where kind is `c` (controller) or `n` (note).
    ///
    /// Channels are 1-based on the command line and stored 0-based. A spec
    /// that fails to parse or validate leaves the slot untouched.
    pub fn apply_override(&mut self, index: usize, spec: &str) -> Result<(), MappingError> {
        self.slots[index] = parse_override(spec)?;
        info!("applied user mapping '{spec}' to slot {index}");
        Ok(())
    }
}

fn parse_override(spec: &str) -> Result<Slot, MappingError> {
    let malformed = || MappingError::MalformedSpec { spec: spec.to_string() };

    let mut fields = spec.split(':');
    let (Some(tag), Some(channel), Some(number), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let kind = match tag {
        "c" => EventKind::Controller,
        "n" => EventKind::NoteOn,
        _ => return Err(malformed()),
    };
    let channel: u32 = channel.parse().map_err(|_| malformed())?;
    let number: u32 = number.parse().map_err(|_| malformed())?;

    if !(1..=16).contains(&channel) {
        return Err(MappingError::InvalidChannel { channel });
    }
    if number > 127 {
        // accepted anyway; the sender masks data bytes on the wire
        warn!("controller and note numbers should be between 0 and 127, got {number}");
    }

    Ok(Slot { kind, parameter: number as u8, channel: (channel - 1) as u8 })
}
