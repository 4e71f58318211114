//! Audio system
//!
//! Procedurally generated sound effects on the Web Audio API; no sample files.
//! Native builds have no audio backend and only log what would have played.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball changed direction (wall, paddle or brick)
    Bounce,
    /// Bubble popped or split
    Pop,
    /// Bullet fired
    Shot,
    /// Player took damage
    Hurt,
    /// Level cleared
    Victory,
    /// Player out of health
    Defeat,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Bounce => Some(SoundEffect::Bounce),
            // Brick hits always flip the ball, so `Bounce` already covers them
            GameEvent::BrickDestroyed { .. } => None,
            GameEvent::BubbleHit { .. } => Some(SoundEffect::Pop),
            GameEvent::ShotFired { .. } => Some(SoundEffect::Shot),
            GameEvent::PlayerHurt { .. } => Some(SoundEffect::Hurt),
            GameEvent::Victory => Some(SoundEffect::Victory),
            GameEvent::Defeat => Some(SoundEffect::Defeat),
        }
    }
}

/// Volume after mute and both sliders
fn mix(master: f32, sfx: f32, muted: bool) -> f32 {
    if muted { 0.0 } else { master * sfx }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(not(target_arch = "wasm32"))]
pub use headless::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, mix};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let mut audio = Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                muted: false,
            };
            audio.apply(settings);
            audio
        }

        /// Pick up volume and mute changes
        pub fn apply(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = mix(self.master_volume, self.sfx_volume, self.muted);
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Bounce => self.play_bounce(ctx, vol),
                SoundEffect::Pop => self.play_pop(ctx, vol),
                SoundEffect::Shot => self.play_shot(ctx, vol),
                SoundEffect::Hurt => self.play_hurt(ctx, vol),
                SoundEffect::Victory => self.play_victory(ctx, vol),
                SoundEffect::Defeat => self.play_defeat(ctx, vol),
            }
        }

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

        /// Short square blip
        fn play_bounce(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }

        /// Bubble pop - quick upward chirp
        fn play_pop(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1200.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Laser zap - falling sawtooth
        fn play_shot(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 1400.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(1400.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Low buzz with a thump underneath
        fn play_hurt(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(110.0, t).ok();
                osc.frequency().set_value_at_time(90.0, t + 0.08).ok();
                osc.frequency().set_value_at_time(70.0, t + 0.16).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }

        /// Rising fanfare
        fn play_victory(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.12;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.5).ok();
                }
            }
        }

        /// Sad descending
        fn play_defeat(&self, ctx: &AudioContext, vol: f32) {
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
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use super::{SoundEffect, mix};
    use crate::settings::Settings;

    /// Stand-in used by native builds; counts and logs instead of playing
    #[derive(Debug, Default)]
    pub struct AudioManager {
        volume: f32,
        played: usize,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            let mut audio = Self::default();
            audio.apply(settings);
            audio
        }

        pub fn apply(&mut self, settings: &Settings) {
            self.volume = mix(settings.master_volume, settings.sfx_volume, settings.muted);
        }

        pub fn resume(&self) {}

        pub fn play(&mut self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            self.played += 1;
            log::debug!("Sound: {:?} at {:.2}", effect, self.volume);
        }

        /// Sounds played so far
        pub fn played(&self) -> usize {
            self.played
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sound_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Bounce),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BrickDestroyed { index: 4 }),
            None
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::BubbleHit {
                slot: 1,
                split: true
            }),
            Some(SoundEffect::Pop)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PlayerHurt { health: 2 }),
            Some(SoundEffect::Hurt)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Defeat),
            Some(SoundEffect::Defeat)
        );
    }

    #[test]
    fn test_mix() {
        assert_eq!(mix(0.5, 0.5, false), 0.25);
        assert_eq!(mix(1.0, 1.0, true), 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_muted_manager_plays_nothing() {
        let mut settings = crate::settings::Settings::default();
        settings.muted = true;
        let mut audio = AudioManager::new(&settings);
        audio.play(SoundEffect::Shot);
        assert_eq!(audio.played(), 0);

        settings.muted = false;
        audio.apply(&settings);
        audio.play(SoundEffect::Shot);
        assert_eq!(audio.played(), 1);
    }
}
