use crate::effect::DiracSound;
use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiracError {
    #[error("dirac effect is not initialized")]
    NotInitialized,

    #[error("invalid level {text:?} for band {band}")]
    InvalidLevel { band: usize, text: String },

    #[error("too many bands in preset: {count}")]
    TooManyBands { count: usize },

    #[error(transparent)]
    Effect(#[from] anyhow::Error),
}

/// Splits a preset such as `"4, 2.5, 0,-1"` into per-band levels.
///
/// Trailing empty fields are ignored. Any other empty, non-numeric or non-finite field
/// rejects the whole preset.
pub fn parse_preset(preset: &str) -> Result<Vec<f32>, DiracError> {
    let mut fields: Vec<&str> = preset.split(',').map(str::trim).collect();

    while fields.len() > 1 && fields.last().is_some_and(|it| it.is_empty()) {
        fields.pop();
    }

    fields
        .into_iter()
        .enumerate()
        .map(|(band, text)| {
            text.parse::<f32>()
                .ok()
                .filter(|it| it.is_finite())
                .ok_or_else(|| DiracError::InvalidLevel {
                    band,
                    text: text.into(),
                })
        })
        .collect()
}

fn band_index(band: usize) -> Result<i32, DiracError> {
    i32::try_from(band).map_err(|_| DiracError::TooManyBands { count: band })
}

/// Owns the Dirac effect on behalf of the settings screens.
pub struct DiracSettings<S> {
    sound: Option<S>,
}

impl<S: DiracSound> Default for DiracSettings<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiracSound> DiracSettings<S> {
    pub fn new() -> Self {
        Self { sound: None }
    }

    /// Opens the effect unless it is already held. `open` runs at most once per
    /// successful initialization.
    pub fn initialize<F>(&mut self, open: F) -> Result<&mut S, DiracError>
    where
        F: FnOnce() -> anyhow::Result<S>,
    {
        if self.sound.is_none() {
            self.sound = Some(open()?);
        }

        self.sound.as_mut().ok_or(DiracError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.sound.is_some()
    }

    fn sound(&mut self) -> Result<&mut S, DiracError> {
        self.sound.as_mut().ok_or(DiracError::NotInitialized)
    }

    pub fn set_music(&mut self, enable: bool) -> Result<(), DiracError> {
        debug!("setMusic({enable})");
        self.sound()?.set_music(i32::from(enable))?;
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        let Some(sound) = &self.sound else {
            return false;
        };

        match sound.music() {
            Ok(state) => state == 1,
            Err(err) => {
                warn!("failed to query dirac state: {err:?}");
                false
            }
        }
    }

    /// Applies a comma separated preset, band 0 first. Nothing is forwarded unless the
    /// whole preset parses.
    pub fn set_level(&mut self, preset: &str) -> Result<(), DiracError> {
        debug!("setLevel({preset})");

        let sound = self.sound()?;
        let levels = parse_preset(preset)?;

        // every index below the count fits once the count does
        band_index(levels.len())?;

        for (band, level) in (0..).zip(levels) {
            sound.set_level(band, level)?;
        }

        Ok(())
    }

    pub fn set_headset_type(&mut self, headset_type: i32) -> Result<(), DiracError> {
        debug!("setHeadsetType({headset_type})");
        self.sound()?.set_headset_type(headset_type)?;
        Ok(())
    }
}
