use crate::config::{ConfigError, WorldConfig};
use crate::creature::Creature;
use crate::oxidation::Stage;
use crate::rng::create_rng;
use crate::spatial::{self, CreatureLocation};
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use serde::Serialize;
use std::time::Instant;


/// Per-step wall-clock breakdown, in microseconds.
#[derive(Clone, Debug)]
pub struct StepTimings {
    pub movement_us: u64,
    pub spatial_build_us: u64,
    pub contagion_us: u64,
    pub total_us: u64,
}

/// Probabilistically-thinned ambient tick source.
///
/// Stands in for the host engine's globally-broadcast random tick: each
/// creature draws independently every step, at a rate owned by this
/// scheduler rather than by the creature. A test harness bypasses it by
/// calling `Creature::on_ambient_tick` directly.
#[derive(Clone, Debug)]
pub struct AmbientScheduler {
    chance: f64,
    rng: ChaCha12Rng,
}

impl AmbientScheduler {
    pub fn new(chance: f64, seed: u64) -> Self {
        Self {
            chance,
            rng: create_rng(seed),
        }
    }

    /// One thinning draw: does the next subscriber receive an ambient tick?
    pub fn due(&mut self) -> bool {
        self.rng.random::<f64>() < self.chance
    }
}

/// Aggregate counters for a headless run.
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub steps: usize,
    /// Creatures per stage, indexed by stage level.
    pub stage_counts: [usize; 4],
    pub dormant_count: usize,
    pub waxed_count: usize,
}

/// A flat yard of copper creatures driven by a serial tick loop.
///
/// Every step advances each creature's movement tick, then rebuilds the
/// spatial index and lets the ambient scheduler thin contagion rolls against
/// a point-in-time snapshot of neighbor stages.
pub struct World {
    creatures: Vec<Creature>,
    config: WorldConfig,
    scheduler: AmbientScheduler,
    steps: usize,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut placement_rng = create_rng(config.seed);
        let creatures = (0..config.num_creatures)
            .map(|i| {
                let pos = [
                    placement_rng.random::<f64>() * config.world_size,
                    0.0,
                    placement_rng.random::<f64>() * config.world_size,
                ];
                Creature::new(i as u32, pos, &config)
            })
            .collect();
        let scheduler = AmbientScheduler::new(config.ambient_tick_chance, config.seed ^ 1);
        Ok(Self {
            creatures,
            config,
            scheduler,
            steps: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    /// Advance the whole yard by one simulation step.
    pub fn step(&mut self) -> StepTimings {
        let start = Instant::now();

        for creature in &mut self.creatures {
            creature.on_movement_tick(&self.config);
        }
        let movement_done = Instant::now();

        let tree = spatial::build_index(
            self.creatures
                .iter()
                .map(|c| CreatureLocation {
                    id: c.id(),
                    position: c.position,
                })
                .collect(),
        );
        // Point-in-time stage snapshot: contagion rolls within one step all
        // see the same neighbor stages, regardless of iteration order.
        let stage_snapshot: Vec<Stage> = self.creatures.iter().map(|c| c.stage()).collect();
        let spatial_done = Instant::now();

        for i in 0..self.creatures.len() {
            if !self.scheduler.due() {
                continue;
            }
            let creature = &self.creatures[i];
            let peer_ids = spatial::query_cube(
                &tree,
                creature.position,
                self.config.contagion_radius,
                creature.id(),
            );
            let peer_stages: Vec<Stage> = peer_ids
                .iter()
                .map(|&id| stage_snapshot[id as usize])
                .collect();
            self.creatures[i].on_ambient_tick(&self.config, &peer_stages);
        }
        let end = Instant::now();

        self.steps += 1;
        StepTimings {
            movement_us: (movement_done - start).as_micros() as u64,
            spatial_build_us: (spatial_done - movement_done).as_micros() as u64,
            contagion_us: (end - spatial_done).as_micros() as u64,
            total_us: (end - start).as_micros() as u64,
        }
    }

    /// Run `steps` ticks and report aggregate counters.
    pub fn run(&mut self, steps: usize) -> RunSummary {
        for _ in 0..steps {
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        let mut stage_counts = [0usize; 4];
        let mut dormant_count = 0;
        let mut waxed_count = 0;
        for creature in &self.creatures {
            stage_counts[creature.stage().level() as usize] += 1;
            if !creature.is_ai_enabled() {
                dormant_count += 1;
            }
            if creature.is_waxed() {
                waxed_count += 1;
            }
        }
        RunSummary {
            steps: self.steps,
            stage_counts,
            dormant_count,
            waxed_count,
        }
    }
}
