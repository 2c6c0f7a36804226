//! Audio system using Web Audio API
//!
//! Procedurally generated cues and a background pad - no external files.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::game::Cue;
use crate::settings::Settings;

/// Pad voices (A2, E3, A3), slightly detuned
const PAD_NOTES: [(f32, f32); 3] = [(110.0, -4.0), (164.81, 3.0), (220.0, 6.0)];
/// Tremolo rate of the pad (Hz)
const PAD_LFO_RATE: f32 = 0.25;
/// Tremolo depth relative to the music gain
const PAD_LFO_DEPTH: f32 = 0.35;
const PAD_LEVEL: f32 = 0.25;

/// Running background music nodes
struct MusicVoice {
    oscillators: Vec<OscillatorNode>,
    lfo: OscillatorNode,
    gain: GainNode,
    lfo_gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_gain: f32,
    music_gain: f32,
    music: Option<MusicVoice>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            music: None,
        }
    }

    /// Resume a context suspended by the autoplay policy
    fn resume(ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended {
            match ctx.resume() {
                Ok(_) => log::debug!("Resuming suspended AudioContext"),
                Err(e) => log::warn!("AudioContext resume failed: {e:?}"),
            }
        }
    }

    /// Pick up new volumes; a running pad is adjusted in place
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_gain = settings.sfx_gain();
        self.music_gain = settings.music_gain();
        if let (Some(ctx), Some(music)) = (&self.ctx, &self.music) {
            let t = ctx.current_time();
            music
                .gain
                .gain()
                .set_target_at_time(self.music_gain * PAD_LEVEL, t, 0.05)
                .ok();
            music
                .lfo_gain
                .gain()
                .set_value(self.music_gain * PAD_LEVEL * PAD_LFO_DEPTH);
        }
    }

    /// Play a one-shot cue; every call gets fresh nodes so overlaps are fine
    pub fn play(&self, cue: Cue) {
        let vol = self.sfx_gain;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);

        match cue {
            Cue::Catch => self.play_catch(ctx, vol),
            Cue::GameOver => self.play_game_over(ctx, vol),
            Cue::Click => self.play_click(ctx, vol),
        }
    }

    /// Start the looping pad; no-op when already playing
    pub fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);

        match Self::build_pad(ctx, self.music_gain) {
            Some(voice) => {
                log::debug!("Music started");
                self.music = Some(voice);
            }
            None => log::warn!("Could not build music nodes"),
        }
    }

    /// Fade out and release the pad; no-op when silent
    pub fn stop_music(&mut self) {
        let (Some(ctx), Some(music)) = (&self.ctx, self.music.take()) else {
            return;
        };
        let t = ctx.current_time();
        music.gain.gain().set_target_at_time(0.0, t, 0.1).ok();
        for osc in music.oscillators.iter().chain(std::iter::once(&music.lfo)) {
            osc.stop_with_when(t + 0.5).ok();
        }
        log::debug!("Music stopped");
    }

    fn build_pad(ctx: &AudioContext, music_gain: f32) -> Option<MusicVoice> {
        let level = music_gain * PAD_LEVEL;
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(level);
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let mut oscillators = Vec::with_capacity(PAD_NOTES.len());
        for (freq, detune) in PAD_NOTES {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(OscillatorType::Triangle);
            osc.frequency().set_value(freq);
            osc.detune().set_value(detune);
            osc.connect_with_audio_node(&gain).ok()?;
            oscillators.push(osc);
        }

        // Tremolo: LFO output added onto the pad gain
        let lfo = ctx.create_oscillator().ok()?;
        lfo.set_type(OscillatorType::Sine);
        lfo.frequency().set_value(PAD_LFO_RATE);
        let lfo_gain = ctx.create_gain().ok()?;
        lfo_gain.gain().set_value(level * PAD_LFO_DEPTH);
        lfo.connect_with_audio_node(&lfo_gain).ok()?;
        lfo_gain.connect_with_audio_param(&gain.gain()).ok()?;

        for osc in oscillators.iter().chain(std::iter::once(&lfo)) {
            osc.start().ok()?;
        }

        Some(MusicVoice {
            oscillators,
            lfo,
            gain,
            lfo_gain,
        })
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Catch - bright rising ping
    fn play_catch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(660.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1320.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Game over - sad descending
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Click - short square tick
    fn play_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.04)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.05).ok();
    }
}
