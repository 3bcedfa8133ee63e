//! Forwards the user's Dirac sound settings to the vendor effect.

mod effect;
mod settings;

pub use effect::{DiracEffect, DiracSound, EFFECT_TYPE_DIRACSOUND, EffectParameters};
pub use settings::{DiracError, DiracSettings, parse_preset};
