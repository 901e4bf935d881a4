use crate::spatial::BlockPos;

/// Combined sound + visual event ids dispatched on interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    WaxApplied,
    WaxRemoved,
    Scraped,
}

/// Short-lived particles the creature can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Heart,
}

/// Sink for sensory events. The real implementation lives in the host
/// engine; the crate ships recording and discarding sinks for harnesses.
pub trait EffectBus {
    fn play_effect(&mut self, effect: EffectKind, pos: BlockPos);
    fn add_particle(&mut self, particle: ParticleKind, pos: [f64; 3], velocity: [f64; 3]);
}

/// Captures every dispatched effect for assertions and summaries.
#[derive(Debug, Default)]
pub struct RecordingEffectBus {
    pub effects: Vec<(EffectKind, BlockPos)>,
    pub particles: Vec<(ParticleKind, [f64; 3], [f64; 3])>,
}

impl EffectBus for RecordingEffectBus {
    fn play_effect(&mut self, effect: EffectKind, pos: BlockPos) {
        self.effects.push((effect, pos));
    }

    fn add_particle(&mut self, particle: ParticleKind, pos: [f64; 3], velocity: [f64; 3]) {
        self.particles.push((particle, pos, velocity));
    }
}

/// Drops everything on the floor.
#[derive(Debug, Default)]
pub struct NullEffectBus;

impl EffectBus for NullEffectBus {
    fn play_effect(&mut self, _effect: EffectKind, _pos: BlockPos) {}

    fn add_particle(&mut self, _particle: ParticleKind, _pos: [f64; 3], _velocity: [f64; 3]) {}
}
