use crate::config::WorldConfig;
use crate::contagion::{self, NeighborCensus};
use crate::effects::{EffectBus, EffectKind, ParticleKind};
use crate::goals::{GateTransition, GoalGate, GoalSet};
use crate::interaction::{Hand, InteractionOutcome, Item, ItemStack};
use crate::oxidation::{OxidationState, Stage};
use crate::persistence::SavedState;
use crate::rng::derive_creature_rng;
use crate::spatial::BlockPos;
use crate::timers::TimerBank;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use rand_distr::StandardNormal;

/// Copper ingots dropped on death, per stage. Heavier patina, less metal
/// worth recovering.
fn loot_ingot_count(stage: Stage) -> u32 {
    match stage {
        Stage::Unaffected => 3,
        Stage::Exposed => 2,
        Stage::Weathered => 1,
        Stage::Oxidized => 0,
    }
}

/// One simulated copper creature.
///
/// Owns the oxidation state machine, the animation timer bank, the AI goal
/// gate, and a private deterministic RNG stream. Mutated only through the
/// tick callbacks and the interaction protocol; the host engine supplies
/// neighbor snapshots and consumes the installed goal set.
#[derive(Clone, Debug)]
pub struct Creature {
    id: u32,
    pub position: [f64; 3],
    oxidation: OxidationState,
    timers: TimerBank,
    gate: GoalGate,
    block_target: Option<BlockPos>,
    health: f32,
    max_health: f32,
    rng: ChaCha12Rng,
}

impl Creature {
    pub fn new(id: u32, position: [f64; 3], config: &WorldConfig) -> Self {
        Self::with_stage(id, position, Stage::Unaffected, config)
    }

    /// Construct at a specific stage; the gate starts Dormant when the
    /// creature is already fully oxidized.
    pub fn with_stage(id: u32, position: [f64; 3], stage: Stage, config: &WorldConfig) -> Self {
        Self {
            id,
            position,
            oxidation: OxidationState::new(stage, false),
            timers: TimerBank::default(),
            gate: GoalGate::new(stage, config),
            block_target: None,
            health: config.max_health,
            max_health: config.max_health,
            rng: derive_creature_rng(config.seed, id as u64),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.oxidation.stage()
    }

    #[inline]
    pub fn is_waxed(&self) -> bool {
        self.oxidation.is_waxed()
    }

    pub fn set_waxed(&mut self, waxed: bool) {
        self.oxidation.set_waxed(waxed);
    }

    /// Advance one oxidation stage (no-op at the terminal stage).
    pub fn advance_stage(&mut self) {
        self.oxidation.advance();
    }

    /// Reverse one oxidation stage; `false` when already pristine.
    pub fn reverse_stage(&mut self) -> bool {
        self.oxidation.reverse()
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Restore health, clamped at the maximum. Returns whether anything
    /// actually changed.
    pub fn heal(&mut self, amount: f32) -> bool {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health > before
    }

    #[inline]
    pub fn is_ai_enabled(&self) -> bool {
        self.gate.is_active()
    }

    /// The live goal roster, or `None` while dormant.
    pub fn goals(&self) -> Option<&GoalSet> {
        self.gate.goals()
    }

    #[inline]
    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    /// Timer setters are exposed for the external goal framework, which
    /// starts press/spin/wiggle animations.
    pub fn timers_mut(&mut self) -> &mut TimerBank {
        &mut self.timers
    }

    pub fn block_target(&self) -> Option<BlockPos> {
        self.block_target
    }

    pub fn set_block_target(&mut self, target: BlockPos) {
        self.block_target = Some(target);
    }

    pub fn clear_block_target(&mut self) {
        self.block_target = None;
    }

    /// The block coordinate the creature currently occupies.
    pub fn block_pos(&self) -> BlockPos {
        [
            self.position[0].floor() as i32,
            self.position[1].floor() as i32,
            self.position[2].floor() as i32,
        ]
    }

    /// Per-tick movement callback: advance every timer, then re-check the
    /// AI gate against the current stage.
    pub fn on_movement_tick(&mut self, config: &WorldConfig) {
        self.timers.tick();
        self.retune_ai_gate(config);
    }

    /// Edge-triggered gate re-check plus its side effects: dropping into
    /// Dormant clears targets and rests the rod-wiggle timer so an idle
    /// creature is never frozen mid-gesture.
    fn retune_ai_gate(&mut self, config: &WorldConfig) {
        match self.gate.observe(self.oxidation.stage(), config) {
            Some(GateTransition::Deactivated) => {
                self.clear_block_target();
                self.timers.set_rod_wiggle_ticks(0.0);
            }
            Some(GateTransition::Activated) | None => {}
        }
    }

    /// Ambient/random tick callback: one contagion roll against a snapshot
    /// of same-kind neighbor stages.
    ///
    /// Waxed or fully oxidized creatures return before any RNG draw.
    pub fn on_ambient_tick(&mut self, config: &WorldConfig, peer_stages: &[Stage]) {
        if self.oxidation.is_waxed() || self.oxidation.stage().is_terminal() {
            return;
        }
        let census = NeighborCensus::tally(self.oxidation.stage(), peer_stages.iter().copied());
        if contagion::roll_advancement(&census, config.contagion_base_chance, &mut self.rng) {
            self.oxidation.advance();
        }
    }

    /// Energetic environmental strike: full reset to Unaffected unless
    /// waxed. The gate catches the stage change on the next movement tick.
    pub fn on_lightning_strike(&mut self) {
        self.oxidation.strike();
    }

    /// Resolve one player tool use against this creature.
    ///
    /// Main-hand only; the rules run in fixed priority order (debug axe,
    /// unwax, scrape, wax, heal) and each resolves to `Handled` with its
    /// side effects or falls through to `Pass` with none.
    pub fn interact(
        &mut self,
        stack: &mut ItemStack,
        hand: Hand,
        cost_waived: bool,
        config: &WorldConfig,
        effects: &mut dyn EffectBus,
    ) -> InteractionOutcome {
        if hand != Hand::Main {
            return InteractionOutcome::Pass;
        }

        if stack.item.is_debug_axe() {
            self.oxidation.advance();
            self.retune_ai_gate(config);
            return InteractionOutcome::Handled;
        }

        if stack.item.is_axe() {
            if self.oxidation.is_waxed() {
                self.oxidation.set_waxed(false);
                if !cost_waived {
                    stack.damage_by(config.axe_durability_cost);
                }
                effects.play_effect(EffectKind::WaxRemoved, self.block_pos());
                return InteractionOutcome::Handled;
            }
            if self.oxidation.reverse() {
                self.retune_ai_gate(config);
                if !cost_waived {
                    stack.damage_by(config.axe_durability_cost);
                }
                effects.play_effect(EffectKind::Scraped, self.block_pos());
                return InteractionOutcome::Handled;
            }
            return InteractionOutcome::Pass;
        }

        if stack.item == Item::Honeycomb {
            self.oxidation.set_waxed(true);
            if !cost_waived {
                stack.shrink(1);
            }
            effects.play_effect(EffectKind::WaxApplied, self.block_pos());
            return InteractionOutcome::Handled;
        }

        if stack.item == Item::CopperIngot {
            if self.heal(config.heal_amount) {
                if !cost_waived {
                    stack.shrink(1);
                }
                self.produce_heart_burst(effects);
                return InteractionOutcome::Handled;
            }
            return InteractionOutcome::Pass;
        }

        InteractionOutcome::Pass
    }

    /// Five short-lived heart particles with small Gaussian velocity jitter.
    fn produce_heart_burst(&mut self, effects: &mut dyn EffectBus) {
        for _ in 0..5 {
            let pos = [
                self.position[0] + self.rng.random_range(-0.5..0.5),
                self.position[1] + 1.0,
                self.position[2] + self.rng.random_range(-0.5..0.5),
            ];
            let velocity = [
                self.rng.sample::<f64, _>(StandardNormal) * 0.02,
                self.rng.sample::<f64, _>(StandardNormal) * 0.02,
                self.rng.sample::<f64, _>(StandardNormal) * 0.02,
            ];
            effects.add_particle(ParticleKind::Heart, pos, velocity);
        }
    }

    /// Copper recovered when the creature dies, scaled down by patina.
    pub fn loot(&self) -> ItemStack {
        ItemStack::new(Item::CopperIngot, loot_ingot_count(self.oxidation.stage()))
    }

    /// Durable slice of the creature: stage level and wax flag only.
    pub fn save(&self) -> SavedState {
        SavedState {
            oxidation: self.oxidation.stage().level(),
            waxed: self.oxidation.is_waxed(),
        }
    }

    /// Restore the persisted fields, clamping a malformed stage level.
    /// Timers and the gate keep their construction defaults; the gate
    /// reconciles with the restored stage on the next movement tick.
    pub fn restore(&mut self, saved: SavedState) {
        self.oxidation = OxidationState::new(Stage::from_level(saved.oxidation), saved.waxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::RecordingEffectBus;
    use crate::interaction::AxeGrade;

    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    fn creature_at(stage: Stage) -> Creature {
        Creature::with_stage(0, [8.0, 4.0, 8.0], stage, &config())
    }

    #[test]
    fn lightning_resets_stage_unless_waxed() {
        let mut creature = creature_at(Stage::Exposed);
        creature.on_lightning_strike();
        assert_eq!(creature.stage(), Stage::Unaffected);

        let mut waxed = creature_at(Stage::Exposed);
        waxed.set_waxed(true);
        waxed.on_lightning_strike();
        assert_eq!(waxed.stage(), Stage::Exposed);
    }

    #[test]
    fn gate_goes_dormant_one_tick_after_full_oxidation() {
        let cfg = config();
        let mut creature = creature_at(Stage::Weathered);
        creature.timers_mut().set_rod_wiggle_ticks(9.0);
        creature.advance_stage();
        assert!(creature.is_ai_enabled(), "gate lags until the next tick");
        creature.on_movement_tick(&cfg);
        assert!(!creature.is_ai_enabled());
        assert_eq!(creature.timers().rod_wiggle_ticks(), 0.0);
        assert!(creature.goals().is_none());
    }

    #[test]
    fn dormant_transition_clears_the_block_target() {
        let cfg = config();
        let mut creature = creature_at(Stage::Weathered);
        creature.set_block_target([1, 2, 3]);
        creature.advance_stage();
        creature.on_movement_tick(&cfg);
        assert_eq!(creature.block_target(), None);
    }

    #[test]
    fn ambient_tick_is_inert_while_waxed() {
        let cfg = WorldConfig {
            contagion_base_chance: 1.0,
            ..config()
        };
        let mut creature = creature_at(Stage::Exposed);
        creature.set_waxed(true);
        for _ in 0..100 {
            creature.on_ambient_tick(&cfg, &[Stage::Oxidized; 8]);
        }
        assert_eq!(creature.stage(), Stage::Exposed);
    }

    #[test]
    fn ambient_tick_with_certain_chance_advances_one_stage() {
        let cfg = WorldConfig {
            contagion_base_chance: 1.0,
            ..config()
        };
        let mut creature = creature_at(Stage::Unaffected);
        creature.on_ambient_tick(&cfg, &[]);
        assert_eq!(creature.stage(), Stage::Exposed);
    }

    #[test]
    fn off_hand_use_is_always_a_pass() {
        let cfg = config();
        let mut creature = creature_at(Stage::Weathered);
        let mut effects = RecordingEffectBus::default();
        let mut axe = ItemStack::new(Item::Axe(AxeGrade::Iron), 1);
        let outcome = creature.interact(&mut axe, Hand::Off, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Pass);
        assert_eq!(creature.stage(), Stage::Weathered);
        assert_eq!(axe.damage, 0);
        assert!(effects.effects.is_empty());
    }

    #[test]
    fn debug_axe_always_advances_and_rechecks_the_gate() {
        let cfg = config();
        let mut creature = creature_at(Stage::Weathered);
        let mut effects = RecordingEffectBus::default();
        let mut axe = ItemStack::new(Item::Axe(AxeGrade::Diamond), 1);
        let outcome = creature.interact(&mut axe, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Handled);
        assert_eq!(creature.stage(), Stage::Oxidized);
        assert!(!creature.is_ai_enabled(), "gate re-checked immediately");
        assert_eq!(axe.damage, 0, "debug tool charges no durability");
    }

    #[test]
    fn axe_on_waxed_creature_unwaxes_without_touching_the_stage() {
        let cfg = config();
        let mut creature = creature_at(Stage::Exposed);
        creature.set_waxed(true);
        let mut effects = RecordingEffectBus::default();
        let mut axe = ItemStack::new(Item::Axe(AxeGrade::Stone), 1);
        let outcome = creature.interact(&mut axe, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Handled);
        assert!(!creature.is_waxed());
        assert_eq!(creature.stage(), Stage::Exposed);
        assert_eq!(axe.damage, 1);
        assert_eq!(effects.effects, vec![(EffectKind::WaxRemoved, [8, 4, 8])]);
    }

    #[test]
    fn axe_scrape_reverses_stage_and_reactivates_the_gate() {
        let cfg = config();
        let mut creature = creature_at(Stage::Oxidized);
        assert!(!creature.is_ai_enabled());
        let mut effects = RecordingEffectBus::default();
        let mut axe = ItemStack::new(Item::Axe(AxeGrade::Netherite), 1);
        let outcome = creature.interact(&mut axe, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Handled);
        assert_eq!(creature.stage(), Stage::Weathered);
        assert!(creature.is_ai_enabled(), "goals reinstalled on scrape");
        assert_eq!(axe.damage, 1);
        assert_eq!(effects.effects, vec![(EffectKind::Scraped, [8, 4, 8])]);
    }

    #[test]
    fn axe_on_pristine_creature_is_a_free_pass() {
        let cfg = config();
        let mut creature = creature_at(Stage::Unaffected);
        let mut effects = RecordingEffectBus::default();
        let mut axe = ItemStack::new(Item::Axe(AxeGrade::Wood), 1);
        let outcome = creature.interact(&mut axe, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Pass);
        assert_eq!(axe.damage, 0);
        assert!(effects.effects.is_empty());
    }

    #[test]
    fn creative_mode_waives_durability_and_consumption() {
        let cfg = config();
        let mut creature = creature_at(Stage::Exposed);
        let mut effects = RecordingEffectBus::default();
        let mut axe = ItemStack::new(Item::Axe(AxeGrade::Iron), 1);
        creature.interact(&mut axe, Hand::Main, true, &cfg, &mut effects);
        assert_eq!(axe.damage, 0);

        let mut comb = ItemStack::new(Item::Honeycomb, 3);
        creature.interact(&mut comb, Hand::Main, true, &cfg, &mut effects);
        assert!(creature.is_waxed());
        assert_eq!(comb.count, 3);
    }

    #[test]
    fn honeycomb_waxes_and_consumes_one_unit() {
        let cfg = config();
        let mut creature = creature_at(Stage::Weathered);
        let mut effects = RecordingEffectBus::default();
        let mut comb = ItemStack::new(Item::Honeycomb, 2);
        let outcome = creature.interact(&mut comb, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Handled);
        assert!(creature.is_waxed());
        assert_eq!(comb.count, 1);
        assert_eq!(effects.effects, vec![(EffectKind::WaxApplied, [8, 4, 8])]);
    }

    #[test]
    fn ingot_heals_a_wounded_creature_and_bursts_hearts() {
        let cfg = config();
        let mut creature = creature_at(Stage::Unaffected);
        creature.health = 10.0;
        let mut effects = RecordingEffectBus::default();
        let mut ingot = ItemStack::new(Item::CopperIngot, 4);
        let outcome = creature.interact(&mut ingot, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Handled);
        assert_eq!(creature.health(), 15.0);
        assert_eq!(ingot.count, 3);
        assert_eq!(effects.particles.len(), 5);
        for (kind, _, velocity) in &effects.particles {
            assert_eq!(*kind, ParticleKind::Heart);
            for v in velocity {
                assert!(v.abs() < 0.5, "jitter stays small: {v}");
            }
        }
    }

    #[test]
    fn ingot_at_full_health_is_a_pass_and_keeps_the_item() {
        let cfg = config();
        let mut creature = creature_at(Stage::Unaffected);
        let mut effects = RecordingEffectBus::default();
        let mut ingot = ItemStack::new(Item::CopperIngot, 4);
        let outcome = creature.interact(&mut ingot, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Pass);
        assert_eq!(ingot.count, 4);
        assert!(effects.particles.is_empty());
    }

    #[test]
    fn heal_clamps_at_max_health() {
        let mut creature = creature_at(Stage::Unaffected);
        creature.health = creature.max_health() - 1.0;
        assert!(creature.heal(5.0));
        assert_eq!(creature.health(), creature.max_health());
        assert!(!creature.heal(5.0));
    }

    #[test]
    fn unknown_items_pass_through_untouched() {
        let cfg = config();
        let mut creature = creature_at(Stage::Exposed);
        let mut effects = RecordingEffectBus::default();
        let mut stick = ItemStack::new(Item::Other, 1);
        let outcome = creature.interact(&mut stick, Hand::Main, false, &cfg, &mut effects);
        assert_eq!(outcome, InteractionOutcome::Pass);
        assert_eq!(creature.stage(), Stage::Exposed);
    }

    #[test]
    fn loot_scales_inversely_with_patina() {
        let expected = [3, 2, 1, 0];
        for (stage, count) in Stage::ALL.into_iter().zip(expected) {
            assert_eq!(creature_at(stage).loot().count, count);
        }
    }

    #[test]
    fn save_restore_round_trips_independent_of_timers() {
        let cfg = config();
        let mut creature = creature_at(Stage::Weathered);
        creature.set_waxed(true);
        creature.timers_mut().set_button_ticks(7.0);
        let saved = creature.save();

        let mut reloaded = Creature::new(0, [0.0, 0.0, 0.0], &cfg);
        reloaded.restore(saved);
        assert_eq!(reloaded.stage(), Stage::Weathered);
        assert!(reloaded.is_waxed());
        assert_eq!(reloaded.timers().button_ticks(), 0.0, "timers reset to rest");
    }

    #[test]
    fn restore_clamps_a_malformed_stage_level() {
        let cfg = config();
        let mut creature = Creature::new(0, [0.0, 0.0, 0.0], &cfg);
        creature.restore(SavedState {
            oxidation: 12,
            waxed: false,
        });
        assert_eq!(creature.stage(), Stage::Oxidized);
        creature.restore(SavedState {
            oxidation: -3,
            waxed: false,
        });
        assert_eq!(creature.stage(), Stage::Unaffected);
    }

    #[test]
    fn restored_terminal_stage_parks_the_gate_on_the_next_tick() {
        let cfg = config();
        let mut creature = Creature::new(0, [0.0, 0.0, 0.0], &cfg);
        creature.restore(SavedState {
            oxidation: 3,
            waxed: false,
        });
        assert!(creature.is_ai_enabled(), "gate untouched by restore");
        creature.on_movement_tick(&cfg);
        assert!(!creature.is_ai_enabled());
    }
}
