//! Web Audio implementation of the effect player.
//!
//! Each symbolic cue maps to a fixed oscillator recipe; the context is
//! created lazily so the first user gesture is what initializes audio.
//! Playback failures never surface: the session just stays silent.

use realm_game::{Effect, EffectPlayer};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AudioContext, HtmlAudioElement};

use crate::dom;

const AMBIENT_ELEMENT_ID: &str = "ambient-sound";
const AMBIENT_VOLUME: f64 = 0.3;
const OSCILLATOR_STOP_AFTER_S: f64 = 0.5;

#[derive(Default)]
pub struct WebAudioEffects {
    context: Option<AudioContext>,
}

impl WebAudioEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn context(&mut self) -> Result<&AudioContext, JsValue> {
        if self.context.is_none() {
            self.context = Some(AudioContext::new()?);
        }
        self.context
            .as_ref()
            .ok_or_else(|| JsValue::from_str("audio context unavailable"))
    }

    fn play_cue(&mut self, effect: Effect) -> Result<(), JsValue> {
        let ctx = self.context()?;
        let now = ctx.current_time();

        let oscillator = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let frequency = oscillator.frequency();
        let level = gain.gain();
        match effect {
            Effect::Click => {
                frequency.set_value_at_time(800.0, now)?;
                frequency.exponential_ramp_to_value_at_time(400.0, now + 0.1)?;
                level.set_value_at_time(0.1, now)?;
                level.exponential_ramp_to_value_at_time(0.01, now + 0.1)?;
            }
            Effect::Transition => {
                frequency.set_value_at_time(600.0, now)?;
                frequency.exponential_ramp_to_value_at_time(200.0, now + 0.3)?;
                level.set_value_at_time(0.05, now)?;
                level.exponential_ramp_to_value_at_time(0.01, now + 0.3)?;
            }
            Effect::Success => {
                // C5, E5, G5 arpeggio
                frequency.set_value_at_time(523.0, now)?;
                frequency.set_value_at_time(659.0, now + 0.1)?;
                frequency.set_value_at_time(784.0, now + 0.2)?;
                level.set_value_at_time(0.1, now)?;
                level.exponential_ramp_to_value_at_time(0.01, now + 0.4)?;
            }
            Effect::Toggle => {
                frequency.set_value_at_time(1_000.0, now)?;
                level.set_value_at_time(0.05, now)?;
                level.exponential_ramp_to_value_at_time(0.01, now + 0.1)?;
            }
        }

        oscillator.start_with_when(now)?;
        oscillator.stop_with_when(now + OSCILLATOR_STOP_AFTER_S)?;
        Ok(())
    }

    fn ambient_element() -> Option<HtmlAudioElement> {
        dom::element_by_id(AMBIENT_ELEMENT_ID)?
            .dyn_into::<HtmlAudioElement>()
            .ok()
    }
}

impl EffectPlayer for WebAudioEffects {
    fn play(&mut self, effect: Effect) {
        if let Err(err) = self.play_cue(effect) {
            log::debug!(
                "effect '{effect}' not played: {}",
                dom::js_error_message(&err)
            );
        }
    }

    fn resume_ambient(&mut self) {
        if let Some(ctx) = self.context.as_ref() {
            let _ = ctx.resume();
        }
        if let Some(audio) = Self::ambient_element() {
            audio.set_volume(AMBIENT_VOLUME);
            if let Err(err) = audio.play() {
                log::debug!(
                    "ambient playback prevented: {}",
                    dom::js_error_message(&err)
                );
            }
        }
    }

    fn pause_ambient(&mut self) {
        if let Some(audio) = Self::ambient_element() {
            let _ = audio.pause();
        }
    }
}
