//! Light Builder Tests
//!
//! Token parsing and cross-field validation for "set light" commands.

use netlight::builder::{parse_repeat, parse_sound, LightCommandBuilder};
use netlight::protocol::{Color, LightCommand, Sound, SoundRepeat};
use netlight::ValidationError;

fn base() -> LightCommandBuilder {
    LightCommand::builder().unit("1").color("00ff00")
}

// =============================================================================
// Required Fields
// =============================================================================

#[test]
fn test_minimal_command() {
    let command = base().build().unwrap();

    assert_eq!(command.unit, 1);
    assert_eq!(command.color, Color::rgb(0, 0xFF, 0));
    assert_eq!(command.sound.sound, Sound::None);
    assert_eq!(command.sound.repeat, SoundRepeat::ONCE);
    assert_eq!(command.schedule, None);
    assert_eq!(command.timeout_secs(), 0);
}

#[test]
fn test_unit_is_required() {
    let result = LightCommand::builder().color("ffffff").build();
    assert_eq!(result, Err(ValidationError::MissingField("unit")));
}

#[test]
fn test_color_is_required() {
    let result = LightCommand::builder().unit("0").build();
    assert_eq!(result, Err(ValidationError::MissingField("color")));
}

#[test]
fn test_rejects_bad_unit() {
    assert_eq!(
        LightCommand::builder().unit("two").color("ffffff").build(),
        Err(ValidationError::InvalidUnit("two".to_string()))
    );
    assert!(LightCommand::builder().unit("-1").color("ffffff").build().is_err());
}

#[test]
fn test_rejects_bad_color() {
    assert_eq!(
        LightCommand::builder().unit("0").color("red").build(),
        Err(ValidationError::InvalidColor {
            field: "color",
            value: "red".to_string(),
        })
    );
}

// =============================================================================
// Sound Tokens
// =============================================================================

#[test]
fn test_all_sound_names() {
    let names = ["none", "silence", "up", "down", "short", "long", "chirp", "rise", "siren", "xmas"];
    for (code, name) in names.iter().enumerate() {
        assert_eq!(parse_sound(name, "sound").unwrap().code() as usize, code);
    }
}

#[test]
fn test_unknown_sound_rejected() {
    assert_eq!(
        base().sound("beep").build(),
        Err(ValidationError::UnknownSound {
            field: "sound",
            value: "beep".to_string(),
        })
    );
}

#[test]
fn test_sound_with_repeat() {
    let command = base().sound("rise").sound_repeat("4").build().unwrap();
    assert_eq!(command.sound.sound, Sound::Rise);
    assert_eq!(command.sound.to_wire(), 0x47);
}

#[test]
fn test_continuous_repeat() {
    assert_eq!(parse_repeat("continuous", "sound-repeat"), Ok(SoundRepeat::CONTINUOUS));

    let command = base().sound("xmas").sound_repeat("continuous").build().unwrap();
    assert_eq!(command.sound.to_wire(), 0xF9);
}

#[test]
fn test_minus_one_is_continuous() {
    let repeat = parse_repeat("-1", "sound-repeat").unwrap();
    assert!(repeat.is_continuous());
    assert_eq!(repeat.nibble(), 0x0F);
}

#[test]
fn test_repeat_must_be_integer() {
    assert_eq!(
        base().sound_repeat("forever").build(),
        Err(ValidationError::InvalidRepeat {
            field: "sound-repeat",
            value: "forever".to_string(),
        })
    );
}

#[test]
fn test_repeat_out_of_nibble_range() {
    assert_eq!(
        base().sound_repeat("16").build(),
        Err(ValidationError::RepeatOutOfRange {
            field: "sound-repeat",
            value: 16,
        })
    );
}

// =============================================================================
// Future State Rules
// =============================================================================

#[test]
fn test_scheduled_state() {
    let command = base()
        .timeout("30")
        .future_color("ff0000")
        .future_sound("siren")
        .future_sound_repeat("2")
        .build()
        .unwrap();

    let schedule = command.schedule.unwrap();
    assert_eq!(schedule.timeout_secs.get(), 30);
    assert_eq!(schedule.color, Color::rgb(0xFF, 0, 0));
    assert_eq!(schedule.sound.sound, Sound::Siren);
    assert_eq!(schedule.sound.to_wire(), 0x28);
}

#[test]
fn test_timeout_without_future_color() {
    assert_eq!(
        base().timeout("30").build(),
        Err(ValidationError::FutureColorRequired)
    );
}

#[test]
fn test_future_color_without_timeout() {
    assert_eq!(
        base().future_color("ff0000").build(),
        Err(ValidationError::TimeoutRequired("future-color"))
    );
}

#[test]
fn test_future_sound_without_timeout() {
    assert_eq!(
        base().future_sound("chirp").build(),
        Err(ValidationError::TimeoutRequired("future-sound"))
    );
    assert_eq!(
        base().future_sound_repeat("1").build(),
        Err(ValidationError::TimeoutRequired("future-sound-repeat"))
    );
}

#[test]
fn test_zero_timeout_counts_as_unset() {
    assert_eq!(base().timeout("0").build().unwrap().schedule, None);
    assert_eq!(
        base().timeout("0").future_color("ffffff").build(),
        Err(ValidationError::TimeoutRequired("future-color"))
    );
}

#[test]
fn test_invalid_timeout() {
    assert_eq!(
        base().timeout("soon").build(),
        Err(ValidationError::InvalidTimeout("soon".to_string()))
    );
}

#[test]
fn test_invalid_future_color_names_field() {
    assert_eq!(
        base().timeout("5").future_color("12345").build(),
        Err(ValidationError::InvalidColor {
            field: "future-color",
            value: "12345".to_string(),
        })
    );
}
