//! Audio system using Web Audio API
//!
//! Every effect is a short sequence of oscillator tones, no sample files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Flap,
    /// Pipe passed
    Score,
    EggCollect,
    Crash,
    LevelClear,
}

impl SoundEffect {
    /// Effect for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Flap => SoundEffect::Flap,
            GameEvent::Scored { .. } => SoundEffect::Score,
            GameEvent::EggCollected { .. } => SoundEffect::EggCollect,
            GameEvent::Crashed => SoundEffect::Crash,
            GameEvent::Cleared { .. } => SoundEffect::LevelClear,
        }
    }

    fn tones(&self) -> &'static [Tone] {
        match self {
            SoundEffect::Flap => FLAP_TONES,
            SoundEffect::Score => SCORE_TONES,
            SoundEffect::EggCollect => EGG_TONES,
            SoundEffect::Crash => CRASH_TONES,
            SoundEffect::LevelClear => CLEAR_TONES,
        }
    }
}

const FLAP_TONES: &[Tone] = &[Tone::sweep(220.0, 440.0, 0.25, 0.12)];

const SCORE_TONES: &[Tone] = &[
    Tone::note(660.0, 0.2, 0.08, 0.0),
    Tone::note(880.0, 0.2, 0.1, 0.07),
];

/// Rising arpeggio
const EGG_TONES: &[Tone] = &[
    Tone::note(600.0, 0.25, 0.15, 0.0),
    Tone::note(800.0, 0.25, 0.15, 0.08),
    Tone::note(1000.0, 0.25, 0.15, 0.16),
];

const CRASH_TONES: &[Tone] = &[
    Tone::sweep(300.0, 40.0, 0.5, 0.5),
    Tone::note(90.0, 0.4, 0.3, 0.05),
];

const CLEAR_TONES: &[Tone] = &[
    Tone::note(400.0, 0.3, 0.4, 0.0),
    Tone::note(500.0, 0.3, 0.4, 0.1),
    Tone::note(600.0, 0.3, 0.4, 0.2),
    Tone::note(800.0, 0.3, 0.5, 0.3),
];

/// One oscillator burst
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Exponential pitch glide target
    glide_to: Option<f32>,
    gain: f32,
    duration: f64,
    delay: f64,
    sine: bool,
}

impl Tone {
    const fn note(freq: f32, gain: f32, duration: f64, delay: f64) -> Self {
        Self {
            freq,
            glide_to: None,
            gain,
            duration,
            delay,
            sine: false,
        }
    }

    const fn sweep(from: f32, to: f32, gain: f32, duration: f64) -> Self {
        Self {
            freq: from,
            glide_to: Some(to),
            gain,
            duration,
            delay: 0.0,
            sine: true,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 0.8 }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Take volume and mute state from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play the effects for a batch of simulation events
    pub fn play_events(&self, events: &[GameEvent]) {
        for event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        for tone in effect.tones() {
            self.play_tone(ctx, tone);
        }
    }

    fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
        let wave = if tone.sine {
            OscillatorType::Sine
        } else {
            OscillatorType::Triangle
        };
        let Some((osc, gain)) = create_osc(ctx, tone.freq, wave) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;
        let end = t + tone.duration;

        gain.gain().set_value_at_time(self.volume * tone.gain, t).ok();
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
        if let Some(target) = tone.glide_to {
            osc.frequency().set_value_at_time(tone.freq, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(target, end)
                .ok();
        }

        osc.start_with_when(t).ok();
        osc.stop_with_when(end + 0.05).ok();
    }
}

/// Oscillator routed through a gain node to the speakers
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
