use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use evdev::{Device, EventType, KeyCode};
use tracing::{debug, info};

/// Open an event device and claim it for exclusive use.
///
/// Grabbing keeps the desktop from also acting on the pad while it is
/// driving MIDI. The kernel releases the grab when the process exits.
pub fn open_pad(path: &Path) -> Result<Device> {
    let mut device = Device::open(path)
        .with_context(|| format!("error opening event device {}", path.display()))?;

    if !looks_like_pad(&device) {
        bail!(
            "{} does not report key and absolute-axis events; \
             check /proc/bus/input/devices for the right event device",
            path.display()
        );
    }

    device
        .grab()
        .with_context(|| format!("error grabbing {} for exclusive access", path.display()))?;

    info!("using input device '{}'", device.name().unwrap_or("unknown"));
    Ok(device)
}

/// Scan /dev/input for the first device that looks like a gamepad.
pub fn find_pad() -> Result<PathBuf> {
    for entry in fs::read_dir("/dev/input").context("error reading /dev/input")? {
        let path = entry?.path();
        let Ok(device) = Device::open(&path) else {
            continue;
        };
        if looks_like_pad(&device) && has_pad_buttons(&device) {
            debug!("found gamepad at {}", path.display());
            return Ok(path);
        }
    }
    bail!("no gamepad found under /dev/input, pass one with --device");
}

fn looks_like_pad(device: &Device) -> bool {
    let events = device.supported_events();
    events.contains(EventType::KEY) && events.contains(EventType::ABSOLUTE)
}

fn has_pad_buttons(device: &Device) -> bool {
    device
        .supported_keys()
        .map(|keys| keys.contains(KeyCode::BTN_SOUTH))
        .unwrap_or(false)
}
