use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gamepad_midi_mapper::device;
use gamepad_midi_mapper::mapper::MidiMapper;
use gamepad_midi_mapper::mapping::{MappingTable, PadControl};
use gamepad_midi_mapper::midi::MidiSender;

/// Play a gamepad as a MIDI instrument.
#[derive(Parser)]
#[command(name = "gamepad-midi-mapper", version, about)]
struct Args {
    /// Event device to use instead of scanning /dev/input
    #[arg(short, long)]
    device: Option<PathBuf>,

    /// Connect to the first MIDI output port whose name contains this
    #[arg(short, long)]
    port: Option<String>,

    /// Remap the face-north button, e.g. 'c:1:64' or 'n:1:36'
    #[arg(short = '1', long, value_name = "KIND:CHANNEL:NUMBER")]
    button_one: Option<String>,

    /// Remap the face-south button
    #[arg(short = '2', long, value_name = "KIND:CHANNEL:NUMBER")]
    button_two: Option<String>,

    /// Remap the face-east button
    #[arg(short = '3', long, value_name = "KIND:CHANNEL:NUMBER")]
    button_three: Option<String>,

    /// Show every translated MIDI event
    #[arg(short, long)]
    verbose: bool,

    /// List available MIDI output ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if args.list_ports {
        for name in MidiSender::list_port_names()? {
            println!("{name}");
        }
        return Ok(());
    }

    // Bad mapping specs must fail before anything is connected or grabbed.
    let mut table = MappingTable::default();
    let overrides = [
        (PadControl::North, &args.button_one),
        (PadControl::South, &args.button_two),
        (PadControl::East, &args.button_three),
    ];
    for (control, spec) in overrides {
        if let Some(spec) = spec {
            table.apply_override(control.slot(), spec)?;
        }
    }

    let mut sender = MidiSender::connect(args.port.as_deref().unwrap_or(""))?;

    let path = match args.device {
        Some(path) => path,
        None => device::find_pad()?,
    };
    let mut pad = device::open_pad(&path)?;

    let mut mapper = MidiMapper::new(table);

    info!("waiting for input events");
    loop {
        for ev in pad.fetch_events()? {
            if let Some(event) = mapper.translate(ev) {
                sender.send(&event)?;
            }
        }
    }
}
