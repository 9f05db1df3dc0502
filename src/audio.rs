//! Sound effect dispatch
//!
//! The simulation only says *which* sound to play. Waveform synthesis and
//! playback belong to the host, which implements `AudioSink`.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Dot eaten
    Chomp,
    /// Power pellet eaten
    PowerUp,
    /// Frightened ghost caught
    GhostEaten,
    /// Player caught
    Death,
    /// Board cleared
    LevelClear,
}

impl SoundEffect {
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::DotEaten => SoundEffect::Chomp,
            GameEvent::PowerPelletEaten => SoundEffect::PowerUp,
            GameEvent::GhostEaten { .. } => SoundEffect::GhostEaten,
            GameEvent::PlayerDeath => SoundEffect::Death,
            GameEvent::LevelClear => SoundEffect::LevelClear,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Forward one tick's events to a sink, in emission order
pub fn dispatch<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for event in events {
        sink.play(SoundEffect::for_event(event));
    }
}

/// Sink for headless hosts: logs what would have played
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effects played so far (muted ones excluded)
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("sfx: {effect:?}");
    }
}
