//! Light-control parameters
//!
//! Typed values for the "set light" command. The invariant that a scheduled
//! state exists only with a nonzero timeout is carried by `ScheduledState`.

use std::num::NonZeroU32;

use crate::error::ValidationError;

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0);

    /// Create a color from a packed `0xRRGGBB` value
    pub fn new(rgb: u32) -> Result<Self, ValidationError> {
        if rgb > 0x00FF_FFFF {
            return Err(ValidationError::ColorOutOfRange(rgb));
        }
        Ok(Self(rgb))
    }

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Sounds known to the device, by wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Sound {
    #[default]
    None = 0,
    Silence = 1,
    Up = 2,
    Down = 3,
    Short = 4,
    Long = 5,
    Chirp = 6,
    Rise = 7,
    Siren = 8,
    Xmas = 9,
}

impl Sound {
    pub const ALL: [Sound; 10] = [
        Sound::None,
        Sound::Silence,
        Sound::Up,
        Sound::Down,
        Sound::Short,
        Sound::Long,
        Sound::Chirp,
        Sound::Rise,
        Sound::Siren,
        Sound::Xmas,
    ];

    /// Token used on the command line
    pub fn name(self) -> &'static str {
        match self {
            Sound::None => "none",
            Sound::Silence => "silence",
            Sound::Up => "up",
            Sound::Down => "down",
            Sound::Short => "short",
            Sound::Long => "long",
            Sound::Chirp => "chirp",
            Sound::Rise => "rise",
            Sound::Siren => "siren",
            Sound::Xmas => "xmas",
        }
    }

    /// Look up a sound by its exact token
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sound| sound.name() == name)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// How many times a sound repeats; -1 means continuous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoundRepeat(i8);

impl SoundRepeat {
    pub const ONCE: SoundRepeat = SoundRepeat(0);
    pub const CONTINUOUS: SoundRepeat = SoundRepeat(-1);
    pub const MAX: i8 = 15;

    /// Create a repeat count; only values that survive the 4-bit field are allowed
    pub fn new(count: i64, field: &'static str) -> Result<Self, ValidationError> {
        if !(-1..=Self::MAX as i64).contains(&count) {
            return Err(ValidationError::RepeatOutOfRange { field, value: count });
        }
        Ok(Self(count as i8))
    }

    pub fn count(self) -> i8 {
        self.0
    }

    pub fn is_continuous(self) -> bool {
        self.0 == -1
    }

    /// Low four bits of the two's complement count; continuous becomes 0xF
    pub fn nibble(self) -> u8 {
        (self.0 as u8) & 0x0F
    }
}

/// A sound and its repeat count, as packed into one wire byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SoundCue {
    pub sound: Sound,
    pub repeat: SoundRepeat,
}

impl SoundCue {
    pub const SILENT: SoundCue = SoundCue {
        sound: Sound::None,
        repeat: SoundRepeat::ONCE,
    };

    pub fn new(sound: Sound, repeat: SoundRepeat) -> Self {
        Self { sound, repeat }
    }

    /// Sound code in the low nibble, repeat count in the high nibble
    pub fn to_wire(self) -> u8 {
        (self.sound.code() & 0x0F) | (self.repeat.nibble() << 4)
    }
}

/// State a unit switches to once the timeout elapses on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledState {
    pub timeout_secs: NonZeroU32,
    pub color: Color,
    pub sound: SoundCue,
}

/// Parameters of a "set light" command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightCommand {
    /// Zero-based unit index
    pub unit: u8,
    pub color: Color,
    pub sound: SoundCue,
    pub schedule: Option<ScheduledState>,
}

impl LightCommand {
    /// A command that sets a color and nothing else
    pub fn new(unit: u8, color: Color) -> Self {
        Self {
            unit,
            color,
            sound: SoundCue::SILENT,
            schedule: None,
        }
    }

    pub fn with_sound(mut self, sound: SoundCue) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_schedule(mut self, schedule: ScheduledState) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Timeout as written on the wire; zero when nothing is scheduled
    pub fn timeout_secs(&self) -> u32 {
        self.schedule.map_or(0, |s| s.timeout_secs.get())
    }
}
