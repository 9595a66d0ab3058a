//! Light-control command builder

use std::num::NonZeroU32;

use crate::error::ValidationError;
use crate::protocol::{LightCommand, ScheduledState, SoundCue, SoundRepeat, Sound};
use super::parse::{parse_color, parse_repeat, parse_sound, parse_timeout, parse_unit};

/// Collects raw tokens for a "set light" command and validates them together
#[derive(Debug, Default, Clone)]
pub struct LightCommandBuilder {
    unit: Option<String>,
    color: Option<String>,
    sound: Option<String>,
    sound_repeat: Option<String>,
    timeout: Option<String>,
    future_color: Option<String>,
    future_sound: Option<String>,
    future_sound_repeat: Option<String>,
}

impl LightCommand {
    /// Create a new command builder
    pub fn builder() -> LightCommandBuilder {
        LightCommandBuilder::default()
    }
}

impl LightCommandBuilder {
    /// Set the zero-based unit index (required)
    pub fn unit(mut self, token: impl Into<String>) -> Self {
        self.unit = Some(token.into());
        self
    }

    /// Set the `RRGGBB` color (required)
    pub fn color(mut self, token: impl Into<String>) -> Self {
        self.color = Some(token.into());
        self
    }

    /// Set the sound to play now
    pub fn sound(mut self, token: impl Into<String>) -> Self {
        self.sound = Some(token.into());
        self
    }

    /// Set the repeat count, or `continuous`
    pub fn sound_repeat(mut self, token: impl Into<String>) -> Self {
        self.sound_repeat = Some(token.into());
        self
    }

    /// Set the seconds until the future state applies
    pub fn timeout(mut self, token: impl Into<String>) -> Self {
        self.timeout = Some(token.into());
        self
    }

    /// Set the color applied after the timeout
    pub fn future_color(mut self, token: impl Into<String>) -> Self {
        self.future_color = Some(token.into());
        self
    }

    /// Set the sound played after the timeout
    pub fn future_sound(mut self, token: impl Into<String>) -> Self {
        self.future_sound = Some(token.into());
        self
    }

    /// Set the repeat count of the future sound
    pub fn future_sound_repeat(mut self, token: impl Into<String>) -> Self {
        self.future_sound_repeat = Some(token.into());
        self
    }

    /// Validate every token and the cross-field rules
    pub fn build(&self) -> Result<LightCommand, ValidationError> {
        let unit = parse_unit(
            self.unit
                .as_deref()
                .ok_or(ValidationError::MissingField("unit"))?,
        )?;
        let color = parse_color(
            self.color
                .as_deref()
                .ok_or(ValidationError::MissingField("color"))?,
            "color",
        )?;
        let sound = cue(
            self.sound.as_deref(),
            self.sound_repeat.as_deref(),
            "sound",
            "sound-repeat",
        )?;

        let timeout = self.timeout.as_deref().map(parse_timeout).transpose()?.unwrap_or(0);
        let future_color = self
            .future_color
            .as_deref()
            .map(|token| parse_color(token, "future-color"))
            .transpose()?;
        let future_sound = cue(
            self.future_sound.as_deref(),
            self.future_sound_repeat.as_deref(),
            "future-sound",
            "future-sound-repeat",
        )?;

        let schedule = match NonZeroU32::new(timeout) {
            Some(timeout_secs) => {
                let color = future_color.ok_or(ValidationError::FutureColorRequired)?;
                Some(ScheduledState {
                    timeout_secs,
                    color,
                    sound: future_sound,
                })
            }
            None => {
                if let Some(field) = self.first_future_field() {
                    return Err(ValidationError::TimeoutRequired(field));
                }
                None
            }
        };

        Ok(LightCommand {
            unit,
            color,
            sound,
            schedule,
        })
    }

    fn first_future_field(&self) -> Option<&'static str> {
        [
            ("future-color", &self.future_color),
            ("future-sound", &self.future_sound),
            ("future-sound-repeat", &self.future_sound_repeat),
        ]
        .into_iter()
        .find(|(_, token)| token.is_some())
        .map(|(field, _)| field)
    }
}

fn cue(
    sound: Option<&str>,
    repeat: Option<&str>,
    sound_field: &'static str,
    repeat_field: &'static str,
) -> Result<SoundCue, ValidationError> {
    let sound = sound
        .map(|token| parse_sound(token, sound_field))
        .transpose()?
        .unwrap_or(Sound::None);
    let repeat = repeat
        .map(|token| parse_repeat(token, repeat_field))
        .transpose()?
        .unwrap_or(SoundRepeat::ONCE);
    Ok(SoundCue::new(sound, repeat))
}
