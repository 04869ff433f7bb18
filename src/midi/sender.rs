use anyhow::{anyhow, Result};
use midir::{MidiOutput, MidiOutputConnection};
use tracing::{debug, info};

use super::OutboundEvent;

const CLIENT_NAME: &str = "Gamepad MIDI Mapper";

/// Owns the connection to a MIDI output port and handles wire encoding.
pub struct MidiSender {
    connection: MidiOutputConnection,
}

impl MidiSender {
    /// Connect to a MIDI output port.
    ///
    /// With an empty hint the first available port is used, otherwise the
    /// first port whose name contains `port_hint`.
    pub fn connect(port_hint: &str) -> Result<Self> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let ports = midi_out.ports();

        let port = if port_hint.is_empty() {
            ports
                .first()
                .ok_or_else(|| anyhow!("no MIDI output ports available"))?
        } else {
            ports
                .iter()
                .find(|port| {
                    midi_out
                        .port_name(port)
                        .map(|name| name.contains(port_hint))
                        .unwrap_or(false)
                })
                .ok_or_else(|| anyhow!("no MIDI output port matching '{port_hint}'"))?
        };

        let port_name = midi_out.port_name(port).unwrap_or_else(|_| "unknown".into());
        let connection = midi_out
            .connect(port, "gamepad-midi")
            .map_err(|e| anyhow!("failed to open MIDI connection: {e}"))?;
        info!("sending MIDI to '{port_name}'");

        Ok(Self { connection })
    }

    /// Names of all MIDI output ports currently available.
    pub fn list_port_names() -> Result<Vec<String>> {
        let midi_out = MidiOutput::new(CLIENT_NAME)?;
        let names = midi_out
            .ports()
            .iter()
            .filter_map(|port| midi_out.port_name(port).ok())
            .collect();
        Ok(names)
    }

    /// Encode one event and push it out the port.
    pub fn send(&mut self, event: &OutboundEvent) -> Result<()> {
        match *event {
            OutboundEvent::NoteOn { note, velocity: 0, .. } => debug!("note off: {note}"),
            OutboundEvent::NoteOn { note, velocity, .. } => {
                debug!("note on: {note} velocity {velocity}")
            }
            OutboundEvent::Controller { controller, value, .. } => {
                debug!("control change: {controller} value {value}")
            }
            OutboundEvent::PitchBend { bend, .. } => debug!("pitch bend: {bend}"),
            OutboundEvent::ProgramChange { program, .. } => debug!("program change: {program}"),
        }
        self.connection.send(&encode(event))?;
        Ok(())
    }
}

/// Standard 2- and 3-byte channel voice messages.
///
/// Status bytes carry the channel in the low nibble. Data bytes are 7-bit,
/// so out-of-range payloads get clamped (values) or masked (numbers) here
/// and nowhere else.
fn encode(event: &OutboundEvent) -> Vec<u8> {
    match *event {
        OutboundEvent::NoteOn { channel, note, velocity } => {
            // velocity 0 doubles as note-off, the status byte stays 0x90
            vec![0x90 | (channel & 0x0F), note & 0x7F, velocity & 0x7F]
        }
        OutboundEvent::Controller { channel, controller, value } => {
            vec![0xB0 | (channel & 0x0F), controller & 0x7F, value.clamp(0, 127) as u8]
        }
        OutboundEvent::PitchBend { channel, bend } => {
            let value = (bend + 8192).clamp(0, 16383) as u16;
            vec![0xE0 | (channel & 0x0F), (value & 0x7F) as u8, (value >> 7) as u8]
        }
        OutboundEvent::ProgramChange { channel, program } => {
            vec![0xC0 | (channel & 0x0F), (program & 0x7F) as u8]
        }
    }
}
