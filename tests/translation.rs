use evdev::{AbsoluteAxisCode, EventType, InputEvent, KeyCode};
use gamepad_midi_mapper::{MappingError, MappingTable, MidiMapper, OutboundEvent, PadControl};

fn key(code: KeyCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::KEY.0, code.0, value)
}

fn axis(code: AbsoluteAxisCode, value: i32) -> InputEvent {
    InputEvent::new(EventType::ABSOLUTE.0, code.0, value)
}

#[test]
fn default_layout_plays_a_note_for_every_button() {
    let buttons = [
        (KeyCode::BTN_NORTH, 48),
        (KeyCode::BTN_SOUTH, 52),
        (KeyCode::BTN_EAST, 55),
        (KeyCode::BTN_WEST, 60),
        (KeyCode::BTN_DPAD_UP, 64),
        (KeyCode::BTN_DPAD_DOWN, 67),
        (KeyCode::BTN_DPAD_RIGHT, 72),
        (KeyCode::BTN_DPAD_LEFT, 76),
        (KeyCode::BTN_TR, 79),
        (KeyCode::BTN_TL, 84),
        (KeyCode::BTN_TR2, 50),
        (KeyCode::BTN_TL2, 55),
        (KeyCode::BTN_THUMBR, 59),
        (KeyCode::BTN_THUMBL, 62),
    ];

    let mut mapper = MidiMapper::new(MappingTable::default());
    for (code, note) in buttons {
        let press = mapper.translate(key(code, 1));
        assert_eq!(
            press,
            Some(OutboundEvent::NoteOn { channel: 0, note, velocity: 127 }),
            "press of {code:?}"
        );

        let release = mapper.translate(key(code, 0));
        assert_eq!(
            release,
            Some(OutboundEvent::NoteOn { channel: 0, note, velocity: 0 }),
            "release of {code:?}"
        );
    }

    // trigger pressure axes behave like buttons with notes of their own
    let pressures = [(AbsoluteAxisCode::ABS_Z, 77), (AbsoluteAxisCode::ABS_RZ, 81)];
    for (code, note) in pressures {
        let press = mapper.translate(axis(code, 1));
        assert_eq!(
            press,
            Some(OutboundEvent::NoteOn { channel: 0, note, velocity: 127 }),
            "press of {code:?}"
        );
    }
}

#[test]
fn sticks_bend_pitch_on_all_four_axes() {
    let mut mapper = MidiMapper::new(MappingTable::default());

    for code in [
        AbsoluteAxisCode::ABS_X,
        AbsoluteAxisCode::ABS_Y,
        AbsoluteAxisCode::ABS_RX,
        AbsoluteAxisCode::ABS_RY,
    ] {
        assert_eq!(
            mapper.translate(axis(code, 0)),
            Some(OutboundEvent::PitchBend { channel: 0, bend: -8192 }),
            "{code:?} at rest"
        );
        assert_eq!(
            mapper.translate(axis(code, 255)),
            Some(OutboundEvent::PitchBend { channel: 0, bend: 8128 }),
            "{code:?} at full travel"
        );
    }
}

#[test]
fn meta_buttons_advance_one_shared_program() {
    let mut mapper = MidiMapper::new(MappingTable::default());

    let presses = [KeyCode::BTN_SELECT, KeyCode::BTN_START, KeyCode::BTN_START, KeyCode::BTN_SELECT];
    for (n, code) in presses.into_iter().enumerate() {
        assert_eq!(
            mapper.translate(key(code, 1)),
            Some(OutboundEvent::ProgramChange { channel: 0, program: n as u32 + 1 })
        );
        assert_eq!(mapper.translate(key(code, 0)), None);
    }
}

#[test]
fn remapped_face_buttons_follow_user_specs() {
    let mut table = MappingTable::default();
    table.apply_override(PadControl::North.slot(), "c:1:64").unwrap();
    table.apply_override(PadControl::South.slot(), "n:16:36").unwrap();

    let mut mapper = MidiMapper::new(table);

    assert_eq!(
        mapper.translate(key(KeyCode::BTN_NORTH, 1)),
        Some(OutboundEvent::Controller { channel: 0, controller: 64, value: 1 })
    );
    assert_eq!(
        mapper.translate(key(KeyCode::BTN_NORTH, 0)),
        Some(OutboundEvent::Controller { channel: 0, controller: 64, value: 0 })
    );

    assert_eq!(
        mapper.translate(key(KeyCode::BTN_SOUTH, 1)),
        Some(OutboundEvent::NoteOn { channel: 15, note: 36, velocity: 127 })
    );

    // untouched slots keep the stock layout
    assert_eq!(
        mapper.translate(key(KeyCode::BTN_EAST, 1)),
        Some(OutboundEvent::NoteOn { channel: 0, note: 55, velocity: 127 })
    );
}

#[test]
fn rejected_override_leaves_the_table_playable() {
    let mut table = MappingTable::default();

    let err = table.apply_override(PadControl::North.slot(), "c:17:64").unwrap_err();
    assert_eq!(err, MappingError::InvalidChannel { channel: 17 });

    let mut mapper = MidiMapper::new(table);
    assert_eq!(
        mapper.translate(key(KeyCode::BTN_NORTH, 1)),
        Some(OutboundEvent::NoteOn { channel: 0, note: 48, velocity: 127 })
    );
}

#[test]
fn foreign_input_never_produces_midi() {
    let mut mapper = MidiMapper::new(MappingTable::default());

    let foreign = [
        key(KeyCode::KEY_ENTER, 1),
        key(KeyCode::BTN_MODE, 1),
        axis(AbsoluteAxisCode::ABS_HAT0X, 1),
        InputEvent::new(EventType::SYNCHRONIZATION.0, 0, 0),
        InputEvent::new(EventType::RELATIVE.0, 1, -4),
        InputEvent::new(EventType::MISC.0, 4, 458756),
    ];
    for ev in foreign {
        assert_eq!(mapper.translate(ev), None);
    }
}
