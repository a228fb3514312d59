//! Audio cues
//!
//! The simulation raises events; the loop driver maps them to cues and hands
//! them to a [`CueDispatcher`]. In the browser that is [`WebAudio`], which
//! synthesizes every tone procedurally with the Web Audio API.

/// Discrete one-shot tones
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Bubble pop: falling sine from `freq`
    Pop { freq: f32 },
    /// Racer collision: falling sawtooth
    Crash,
}

/// Engine drone base frequency (Hz)
pub const ENGINE_BASE_HZ: f32 = 80.0;
/// Engine pitch gained per unit of game speed (Hz)
pub const ENGINE_HZ_PER_SPEED: f32 = 5.0;
/// Nominal engine gain
pub const ENGINE_GAIN: f32 = 0.05;
/// Time constant for engine pitch/gain glides (seconds)
pub const ENGINE_GLIDE: f64 = 0.1;
/// Delay between engine fade-out and oscillator stop (ms)
pub const ENGINE_STOP_DELAY_MS: i32 = 200;

pub const POP_GAIN: f32 = 0.1;
pub const POP_DURATION: f64 = 0.1;
pub const CRASH_GAIN: f32 = 0.3;
pub const CRASH_DURATION: f64 = 0.5;
pub const CRASH_START_HZ: f32 = 100.0;
pub const CRASH_END_HZ: f32 = 10.0;

/// Engine pitch for a game speed
#[inline]
pub fn engine_frequency(speed: f32) -> f32 {
    ENGINE_BASE_HZ + speed * ENGINE_HZ_PER_SPEED
}

/// Sink for audio cues and the continuous engine tone.
///
/// Every method is a no-op until [`CueDispatcher::init`] has run, since
/// browsers only allow audio after a user gesture.
pub trait CueDispatcher {
    /// Create/resume the audio backend
    fn init(&mut self);

    /// Fire a one-shot tone (suppressed while muted)
    fn play(&mut self, cue: Cue);

    /// Start the engine drone, replacing any running one
    fn start_engine(&mut self, speed: f32);

    /// Glide the engine pitch toward the tone for `speed`
    fn retarget_engine(&mut self, speed: f32);

    /// Fade the engine out and stop it shortly after
    fn stop_engine(&mut self);

    /// Mute ramps the engine to silence without stopping it
    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;
}

/// Dispatcher that records cues instead of sounding them (headless and tests)
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub initialized: bool,
    pub muted: bool,
    /// Audible cues, in order
    pub played: Vec<Cue>,
    /// Cues dropped because of mute
    pub suppressed: usize,
    /// Current engine pitch, while the engine runs
    pub engine_hz: Option<f32>,
    pub engine_starts: usize,
}

impl CueDispatcher for RecordingAudio {
    fn init(&mut self) {
        self.initialized = true;
    }

    fn play(&mut self, cue: Cue) {
        if !self.initialized {
            return;
        }
        if self.muted {
            self.suppressed += 1;
        } else {
            self.played.push(cue);
        }
    }

    fn start_engine(&mut self, speed: f32) {
        if self.initialized {
            self.engine_hz = Some(engine_frequency(speed));
            self.engine_starts += 1;
        }
    }

    fn retarget_engine(&mut self, speed: f32) {
        if let Some(hz) = self.engine_hz.as_mut() {
            *hz = engine_frequency(speed);
        }
    }

    fn stop_engine(&mut self) {
        self.engine_hz = None;
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::*;
    use crate::settings::Settings;

    /// Running engine drone
    struct Engine {
        osc: OscillatorNode,
        gain: GainNode,
    }

    /// Web Audio dispatcher
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        engine: Option<Engine>,
        muted: bool,
        sfx_volume: f32,
        engine_volume: f32,
    }

    impl WebAudio {
        /// The AudioContext is created lazily by [`CueDispatcher::init`]
        pub fn new(settings: &Settings) -> Self {
            Self {
                ctx: None,
                engine: None,
                muted: settings.muted,
                sfx_volume: settings.sfx_mix(),
                engine_volume: settings.engine_mix(),
            }
        }

        fn engine_gain(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                ENGINE_GAIN * self.engine_volume
            }
        }

        /// Create an oscillator routed through a gain node to the output
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Pop - quick falling "bloop"
        fn play_pop(ctx: &AudioContext, freq: f32, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(freq * 0.1, t + POP_DURATION)
                .ok();

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(POP_GAIN * vol, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + POP_DURATION)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + POP_DURATION).ok();
        }

        /// Crash - descending boom
        fn play_crash(ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = Self::create_osc(ctx, CRASH_START_HZ, OscillatorType::Sawtooth)
            else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(CRASH_START_HZ, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(CRASH_END_HZ, t + CRASH_DURATION)
                .ok();
            gain.gain().set_value_at_time(CRASH_GAIN * vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + CRASH_DURATION)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + CRASH_DURATION).ok();
        }

        fn halt(engine: &Engine) {
            engine.osc.stop().ok();
            engine.osc.disconnect().ok();
        }
    }

    impl CueDispatcher for WebAudio {
        fn init(&mut self) {
            if self.ctx.is_none() {
                // May fail outside a secure context
                self.ctx = AudioContext::new().ok();
                if self.ctx.is_none() {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    return;
                }
                log::info!("Audio initialized");
            }
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        fn play(&mut self, cue: Cue) {
            if self.muted || self.sfx_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            match cue {
                Cue::Pop { freq } => Self::play_pop(ctx, freq, self.sfx_volume),
                Cue::Crash => Self::play_crash(ctx, self.sfx_volume),
            }
        }

        fn start_engine(&mut self, speed: f32) {
            let Some(ctx) = &self.ctx else { return };

            if let Some(old) = self.engine.take() {
                Self::halt(&old);
            }

            let Some((osc, gain)) =
                Self::create_osc(ctx, engine_frequency(speed), OscillatorType::Sawtooth)
            else {
                return;
            };
            gain.gain().set_value(self.engine_gain());
            osc.start().ok();
            self.engine = Some(Engine { osc, gain });
        }

        fn retarget_engine(&mut self, speed: f32) {
            let (Some(ctx), Some(engine)) = (&self.ctx, &self.engine) else {
                return;
            };
            engine
                .osc
                .frequency()
                .set_target_at_time(engine_frequency(speed), ctx.current_time(), ENGINE_GLIDE)
                .ok();
        }

        fn stop_engine(&mut self) {
            // Taken now so a restart inside the fade window gets a fresh engine
            let Some(engine) = self.engine.take() else {
                return;
            };
            if let Some(ctx) = &self.ctx {
                engine
                    .gain
                    .gain()
                    .set_target_at_time(0.0, ctx.current_time(), ENGINE_GLIDE)
                    .ok();
            }

            let Some(window) = web_sys::window() else {
                Self::halt(&engine);
                return;
            };
            let stop = Closure::once_into_js(move || Self::halt(&engine));
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    stop.unchecked_ref(),
                    ENGINE_STOP_DELAY_MS,
                )
                .is_err()
            {
                log::warn!("Could not schedule engine stop");
            }
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            let target = self.engine_gain();
            if let (Some(ctx), Some(engine)) = (&self.ctx, &self.engine) {
                engine
                    .gain
                    .gain()
                    .set_target_at_time(target, ctx.current_time(), ENGINE_GLIDE)
                    .ok();
            }
        }

        fn is_muted(&self) -> bool {
            self.muted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_frequency() {
        assert_eq!(engine_frequency(0.0), 80.0);
        assert_eq!(engine_frequency(8.0), 120.0);
        assert_eq!(engine_frequency(10.0), 130.0);
    }

    #[test]
    fn test_nothing_sounds_before_init() {
        let mut audio = RecordingAudio::default();
        audio.play(Cue::Crash);
        audio.start_engine(8.0);
        assert!(audio.played.is_empty());
        assert_eq!(audio.engine_hz, None);
    }

    #[test]
    fn test_mute_suppresses_cues_but_keeps_engine() {
        let mut audio = RecordingAudio::default();
        audio.init();
        audio.start_engine(8.0);
        audio.set_muted(true);
        audio.play(Cue::Pop { freq: 400.0 });
        assert!(audio.played.is_empty());
        assert_eq!(audio.suppressed, 1);
        assert_eq!(audio.engine_hz, Some(120.0));

        audio.set_muted(false);
        audio.play(Cue::Crash);
        assert_eq!(audio.played, vec![Cue::Crash]);
    }

    #[test]
    fn test_retarget_only_while_running() {
        let mut audio = RecordingAudio::default();
        audio.init();
        audio.retarget_engine(9.0);
        assert_eq!(audio.engine_hz, None);
        audio.start_engine(8.0);
        audio.retarget_engine(9.0);
        assert_eq!(audio.engine_hz, Some(125.0));
        audio.stop_engine();
        assert_eq!(audio.engine_hz, None);
    }
}
