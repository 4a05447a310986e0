//! Sound effects
//!
//! The simulation only records events; this module turns them into
//! fire-and-forget sounds. In the browser a decoded sample is played when the
//! asset loaded, otherwise a procedural tone stands in. Natively audio is a
//! silent log.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player flapped
    Jump,
    /// Pipe passed
    Score,
    /// Run ended on a collision
    Hit,
}

impl SoundEffect {
    /// Which sound (if any) an event should trigger
    pub fn for_event(event: &GameEvent) -> Option<SoundEffect> {
        match event {
            GameEvent::Jumped => Some(SoundEffect::Jump),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Collided { .. } => Some(SoundEffect::Hit),
            _ => None,
        }
    }

    /// Asset holding the recorded sample for this effect
    pub fn asset(&self) -> crate::assets::AssetId {
        use crate::assets::AssetId;
        match self {
            SoundEffect::Jump => AssetId::JumpSound,
            SoundEffect::Score => AssetId::ScoreSound,
            SoundEffect::Hit => AssetId::HitSound,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use native::AudioManager;

/// Play the sound for every event in order
pub fn play_events(audio: &AudioManager, events: &[GameEvent]) {
    for effect in events.iter().filter_map(SoundEffect::for_event) {
        audio.play(effect);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::SoundEffect;

    /// Audio manager stand-in for native builds
    #[derive(Debug)]
    pub struct AudioManager {
        master_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            Self {
                master_volume: 0.8,
                muted: false,
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        /// Get effective volume
        pub fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.effective_volume() > 0.0 {
                log::trace!("sound: {effect:?}");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use std::collections::HashMap;

    use web_sys::{AudioBuffer, AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        samples: HashMap<SoundEffect, AudioBuffer>,
        master_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                samples: HashMap::new(),
                master_volume: 0.8,
                muted: false,
            }
        }

        pub fn context(&self) -> Option<&AudioContext> {
            self.ctx.as_ref()
        }

        /// Use a decoded sample instead of the procedural tone
        pub fn attach_sample(&mut self, effect: SoundEffect, buffer: AudioBuffer) {
            self.samples.insert(effect, buffer);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        /// Get effective volume
        pub fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            if let Some(buffer) = self.samples.get(&effect) {
                self.play_sample(ctx, buffer, vol);
                return;
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol),
                SoundEffect::Score => self.play_score(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
            }
        }

        fn play_sample(&self, ctx: &AudioContext, buffer: &AudioBuffer, vol: f32) {
            let Ok(source) = ctx.create_buffer_source() else {
                return;
            };
            let Ok(gain) = ctx.create_gain() else { return };

            source.set_buffer(Some(buffer));
            gain.gain().set_value(vol);
            if source.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }
            source.start().ok();
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

        /// Jump - quick upward chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Score - two-note ding
        fn play_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [800.0, 1200.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.2).ok();
                }
            }
        }

        /// Hit - low thud sliding down
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.4)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.45).ok();
        }
    }
}
