//! Audio output via the Web Audio API
//!
//! Every sound is synthesized from oscillators at play time, so there are
//! no asset files to fetch.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Grounded jump
    Jump,
    /// Airborne jump
    DoubleJump,
    /// Touching down
    Land,
    /// Magic wall takes a hit
    WallHit,
    /// Magic wall shatters
    WallBreak,
    /// Stone slams a platform
    StoneImpact,
    /// Player dies
    Death,
    /// Exit reached
    Win,
}

impl SoundEffect {
    /// Which sound, if any, a sim event should trigger.
    ///
    /// `Block` stays silent: it always arrives alongside a `WallCracked`
    /// or `WallShattered` which carries the sound.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Jump { double, .. } => Some(if double {
                SoundEffect::DoubleJump
            } else {
                SoundEffect::Jump
            }),
            GameEvent::Land { .. } => Some(SoundEffect::Land),
            GameEvent::Block { .. } => None,
            GameEvent::WallCracked { .. } => Some(SoundEffect::WallHit),
            GameEvent::WallShattered { .. } => Some(SoundEffect::WallBreak),
            GameEvent::StoneImpact { .. } => Some(SoundEffect::StoneImpact),
            GameEvent::Death { .. } => Some(SoundEffect::Death),
            GameEvent::Win { .. } => Some(SoundEffect::Win),
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
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

    /// Flip the mute switch, returning the new state
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
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

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::DoubleJump => self.play_double_jump(ctx, vol),
            SoundEffect::Land => self.play_land(ctx, vol),
            SoundEffect::WallHit => self.play_wall_hit(ctx, vol),
            SoundEffect::WallBreak => self.play_wall_break(ctx, vol),
            SoundEffect::StoneImpact => self.play_stone_impact(ctx, vol),
            SoundEffect::Death => self.play_death(ctx, vol),
            SoundEffect::Win => self.play_win(ctx, vol),
        }
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

    /// Jump - quick upward sweep
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(250.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(500.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Double jump - same sweep, a fifth higher
    fn play_double_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 375.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(375.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(750.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Landing - soft low thump
    fn play_land(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Wall hit - metallic clang with a bass body
    fn play_wall_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency().set_value_at_time(220.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(160.0, t + 0.1).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Wall shatter - crackling sweep plus sizzle and thump
    fn play_wall_break(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        // Crackling frequency jumps
        if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency().set_value_at_time(3200.0, t + 0.01).ok();
            osc.frequency().set_value_at_time(180.0, t + 0.03).ok();
            osc.frequency().set_value_at_time(2600.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(120.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(2000.0, t + 0.11).ok();
            osc.frequency().set_value_at_time(60.0, t + 0.15).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        // High frequency sizzle
        if let Some((osc, gain)) = self.create_osc(ctx, 5500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.1, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(5500.0, t).ok();
            osc.frequency().set_value_at_time(7500.0, t + 0.03).ok();
            osc.frequency().set_value_at_time(4500.0, t + 0.06).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        // Bass thump
        if let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }
    }

    /// Stone impact - heavy boom with a crack on top
    fn play_stone_impact(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.45, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(90.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(35.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();

        if let Some((osc2, gain2)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) {
            gain2.gain().set_value_at_time(vol * 0.15, t).ok();
            gain2
                .gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc2.start().ok();
            osc2.stop_with_when(t + 0.1).ok();
        }
    }

    /// Death - sad descending steps
    fn play_death(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [300.0, 250.0, 200.0, 120.0].iter().enumerate() {
            let delay = i as f64 * 0.15;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }

    /// Win - rising fanfare
    fn play_win(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [440.0, 550.0, 660.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
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
}
