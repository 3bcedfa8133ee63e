use anyhow::{Result, bail};

/// Effect type of the vendor Dirac sound enhancer.
pub const EFFECT_TYPE_DIRACSOUND: &str = "e069d9e0-8329-11df-9168-0002a5d5c51b";

// the vendor library opens the effect with default priority on the global session
const DIRACSOUND_PRIORITY: i32 = 0;
const DIRACSOUND_SESSION: i32 = 0;

const DIRACSOUND_PARAM_HEADSET_TYPE: i32 = 1;
const DIRACSOUND_PARAM_EQ_LEVEL: i32 = 2;
const DIRACSOUND_PARAM_MUSIC: i32 = 4;

/// The setters exposed by the proprietary sound object.
pub trait DiracSound {
    fn set_music(&mut self, enable: i32) -> Result<()>;
    fn music(&self) -> Result<i32>;
    fn set_level(&mut self, band: i32, level: f32) -> Result<()>;
    fn set_headset_type(&mut self, headset_type: i32) -> Result<()>;
}

/// Raw parameter access on an opened audio effect instance.
///
/// Both calls return the effect's status word, negative on failure.
pub trait EffectParameters {
    fn set_parameter(&mut self, param: &[u8], value: &[u8]) -> Result<i32>;
    fn get_parameter(&self, param: &[u8], value: &mut [u8]) -> Result<i32>;
}

fn encode_words(words: &[i32]) -> Vec<u8> {
    words.iter().flat_map(|it| it.to_le_bytes()).collect()
}

fn check_status(op: &str, status: i32) -> Result<()> {
    if status < 0 {
        bail!("{op} rejected by effect: status {status}");
    }
    Ok(())
}

/// [`DiracSound`] on top of the generic effect parameter interface.
pub struct DiracEffect<B> {
    backend: B,
}

impl<B: EffectParameters> DiracEffect<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Opens the Dirac effect through `open(effect_type, priority, session)`.
    pub fn open<F>(open: F) -> Result<Self>
    where
        F: FnOnce(&str, i32, i32) -> Result<B>,
    {
        let backend = open(EFFECT_TYPE_DIRACSOUND, DIRACSOUND_PRIORITY, DIRACSOUND_SESSION)?;
        Ok(Self::new(backend))
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        &self.backend
    }

    fn set_int(&mut self, param: i32, value: i32) -> Result<()> {
        let status = self
            .backend
            .set_parameter(&encode_words(&[param]), &value.to_le_bytes())?;
        check_status("set_parameter", status)
    }
}

impl<B: EffectParameters> DiracSound for DiracEffect<B> {
    fn set_music(&mut self, enable: i32) -> Result<()> {
        self.set_int(DIRACSOUND_PARAM_MUSIC, enable)
    }

    fn music(&self) -> Result<i32> {
        let mut value = [0u8; 4];
        let status = self
            .backend
            .get_parameter(&encode_words(&[DIRACSOUND_PARAM_MUSIC]), &mut value)?;
        check_status("get_parameter", status)?;
        Ok(i32::from_le_bytes(value))
    }

    fn set_level(&mut self, band: i32, level: f32) -> Result<()> {
        // the library takes levels as text and expects whole numbers as `1.0`
        let status = self.backend.set_parameter(
            &encode_words(&[DIRACSOUND_PARAM_EQ_LEVEL, band]),
            format!("{level:?}").as_bytes(),
        )?;
        check_status("set_parameter", status)
    }

    fn set_headset_type(&mut self, headset_type: i32) -> Result<()> {
        self.set_int(DIRACSOUND_PARAM_HEADSET_TYPE, headset_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeEffect {
        params: HashMap<Vec<u8>, Vec<u8>>,
        status: i32,
    }

    impl EffectParameters for FakeEffect {
        fn set_parameter(&mut self, param: &[u8], value: &[u8]) -> Result<i32> {
            self.params.insert(param.to_vec(), value.to_vec());
            Ok(self.status)
        }

        fn get_parameter(&self, param: &[u8], value: &mut [u8]) -> Result<i32> {
            if let Some(stored) = self.params.get(param) {
                value.copy_from_slice(stored);
            }
            Ok(self.status)
        }
    }

    #[test]
    fn music_round_trips_through_parameter() {
        let mut effect = DiracEffect::new(FakeEffect::default());

        assert_eq!(effect.music().unwrap(), 0);
        effect.set_music(1).unwrap();
        assert_eq!(effect.music().unwrap(), 1);
        assert_eq!(
            effect.backend().params.get([4u8, 0, 0, 0].as_slice()),
            Some(&vec![1, 0, 0, 0])
        );
    }

    #[test]
    fn level_is_keyed_by_band_and_sent_as_text() {
        let mut effect = DiracEffect::new(FakeEffect::default());
        effect.set_level(3, 1.5).unwrap();

        let key = [2u8, 0, 0, 0, 3, 0, 0, 0];
        assert_eq!(
            effect.backend().params.get(key.as_slice()),
            Some(&b"1.5".to_vec())
        );
    }

    #[test]
    fn whole_levels_keep_their_fraction() {
        let mut effect = DiracEffect::new(FakeEffect::default());
        effect.set_level(0, 1.0).unwrap();
        effect.set_level(1, -3.0).unwrap();

        let band0 = [2u8, 0, 0, 0, 0, 0, 0, 0];
        let band1 = [2u8, 0, 0, 0, 1, 0, 0, 0];
        assert_eq!(
            effect.backend().params.get(band0.as_slice()),
            Some(&b"1.0".to_vec())
        );
        assert_eq!(
            effect.backend().params.get(band1.as_slice()),
            Some(&b"-3.0".to_vec())
        );
    }

    #[test]
    fn open_requests_dirac_effect_on_global_session() {
        let mut requested = None;

        let effect = DiracEffect::open(|effect_type, priority, session| {
            requested = Some((effect_type.to_string(), priority, session));
            Ok(FakeEffect::default())
        })
        .unwrap();

        assert_eq!(
            requested,
            Some((EFFECT_TYPE_DIRACSOUND.to_string(), 0, 0))
        );
        assert!(effect.backend().params.is_empty());
    }

    #[test]
    fn open_failure_is_returned() {
        let result = DiracEffect::<FakeEffect>::open(|_, _, _| bail!("effect not found"));
        assert!(result.is_err());
    }

    #[test]
    fn headset_type_is_forwarded() {
        let mut effect = DiracEffect::new(FakeEffect::default());
        effect.set_headset_type(5).unwrap();
        assert_eq!(
            effect.backend().params.get([1u8, 0, 0, 0].as_slice()),
            Some(&vec![5, 0, 0, 0])
        );
    }

    #[test]
    fn negative_status_is_an_error() {
        let mut effect = DiracEffect::new(FakeEffect {
            status: -22,
            ..Default::default()
        });

        assert!(effect.set_music(1).is_err());
        assert!(effect.music().is_err());
    }
}
