use evdev::{EventSummary, InputEvent};

use crate::mapping::{EventKind, MappingTable, PadControl};
use crate::midi::OutboundEvent;

/// Value an EV_KEY event carries on the press edge.
const KEY_DOWN: i32 = 1;

/// Turns raw input events into MIDI events according to the mapping table.
///
/// The table is fixed at construction. The only state that changes while
/// running is the program counter, which every program-change slot shares.
pub struct MidiMapper {
    table: MappingTable,
    program: u32,
}

impl MidiMapper {
    pub fn new(table: MappingTable) -> Self {
        Self { table, program: 0 }
    }

    /// Translate one input event into at most one MIDI event.
    ///
    /// Events from controls the table doesn't know, and events of other
    /// classes entirely (sync, relative motion, ...), come back as None.
    pub fn translate(&mut self, ev: InputEvent) -> Option<OutboundEvent> {
        let (control, value) = match ev.destructure() {
            EventSummary::Key(_, code, value) => (PadControl::from_key(code)?, value),
            EventSummary::AbsoluteAxis(_, axis, value) => (PadControl::from_axis(axis)?, value),
            _ => return None,
        };

        let slot = self.table.slot(control.slot());
        let event = match slot.kind {
            EventKind::NoteOn => OutboundEvent::NoteOn {
                channel: slot.channel,
                note: slot.parameter,
                velocity: if value == KEY_DOWN { 127 } else { 0 },
            },
            EventKind::Controller => OutboundEvent::Controller {
                channel: slot.channel,
                controller: slot.parameter,
                value,
            },
            EventKind::PitchBend => OutboundEvent::PitchBend {
                channel: slot.channel,
                // raw axis range 0..=255 lands on -8192..=8128
                bend: value * 64 - 8192,
            },
            EventKind::ProgramChange => {
                // releases don't step the counter
                if value != KEY_DOWN {
                    return None;
                }
                self.program += 1;
                OutboundEvent::ProgramChange { channel: slot.channel, program: self.program }
            }
        };
        Some(event)
    }
}
