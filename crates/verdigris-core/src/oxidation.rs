use serde::{Deserialize, Serialize};

/// Discrete oxidation stage of a copper creature, ordered from pristine to
/// fully patinated. The ordinal doubles as the persisted integer level and
/// as the index driving contagion comparisons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Unaffected,
    Exposed,
    Weathered,
    Oxidized,
}

impl Stage {
    pub const MIN_LEVEL: i32 = 0;
    pub const MAX_LEVEL: i32 = 3;

    /// All stages in ascending order.
    pub const ALL: [Stage; 4] = [
        Stage::Unaffected,
        Stage::Exposed,
        Stage::Weathered,
        Stage::Oxidized,
    ];

    /// Integer ordinal in [0, 3].
    #[inline]
    pub fn level(self) -> i32 {
        self as i32
    }

    /// Map an integer level to a stage, clamping out-of-range values.
    ///
    /// Persisted data may be malformed; clamping keeps `load` total rather
    /// than fallible.
    pub fn from_level(level: i32) -> Self {
        match level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL) {
            0 => Stage::Unaffected,
            1 => Stage::Exposed,
            2 => Stage::Weathered,
            _ => Stage::Oxidized,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == Stage::Oxidized
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Unaffected => "unaffected",
            Stage::Exposed => "exposed",
            Stage::Weathered => "weathered",
            Stage::Oxidized => "oxidized",
        }
    }
}

/// The aging state machine proper: the stage plus the protective wax flag.
///
/// Waxing suppresses every stage-advancing transition (contagion rolls and
/// lightning resets alike) but never blocks downward transitions from
/// scraping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OxidationState {
    stage: Stage,
    waxed: bool,
}

impl OxidationState {
    pub fn new(stage: Stage, waxed: bool) -> Self {
        Self { stage, waxed }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn is_waxed(&self) -> bool {
        self.waxed
    }

    pub fn set_waxed(&mut self, waxed: bool) {
        self.waxed = waxed;
    }

    /// Advance one stage toward Oxidized. No-op at the terminal stage.
    pub fn advance(&mut self) {
        self.stage = Stage::from_level(self.stage.level() + 1);
    }

    /// Reverse one stage toward Unaffected.
    ///
    /// Returns `true` when a step was actually taken; callers use this to
    /// decide whether to charge a durability cost.
    pub fn reverse(&mut self) -> bool {
        if self.stage == Stage::Unaffected {
            return false;
        }
        self.stage = Stage::from_level(self.stage.level() - 1);
        true
    }

    /// Lightning strike handler: a full reset to Unaffected unless waxed.
    ///
    /// Intentionally the opposite direction of the analogous block aging
    /// system, which advances on a strike.
    pub fn strike(&mut self) {
        if !self.waxed {
            self.stage = Stage::Unaffected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_through_every_stage_and_saturates() {
        let mut state = OxidationState::default();
        assert_eq!(state.stage(), Stage::Unaffected);
        state.advance();
        assert_eq!(state.stage(), Stage::Exposed);
        state.advance();
        assert_eq!(state.stage(), Stage::Weathered);
        state.advance();
        assert_eq!(state.stage(), Stage::Oxidized);
        state.advance();
        assert_eq!(state.stage(), Stage::Oxidized, "max is terminal");
    }

    #[test]
    fn reverse_reports_whether_a_step_was_taken() {
        let mut state = OxidationState::new(Stage::Exposed, false);
        assert!(state.reverse());
        assert_eq!(state.stage(), Stage::Unaffected);
        assert!(!state.reverse());
        assert_eq!(state.stage(), Stage::Unaffected);
    }

    #[test]
    fn reverse_is_not_blocked_by_wax() {
        let mut state = OxidationState::new(Stage::Weathered, true);
        assert!(state.reverse());
        assert_eq!(state.stage(), Stage::Exposed);
    }

    #[test]
    fn from_level_clamps_out_of_range_input() {
        assert_eq!(Stage::from_level(-5), Stage::Unaffected);
        assert_eq!(Stage::from_level(99), Stage::Oxidized);
        for stage in Stage::ALL {
            assert_eq!(Stage::from_level(stage.level()), stage);
        }
    }

    #[test]
    fn lightning_resets_unwaxed_creature_to_unaffected() {
        let mut state = OxidationState::new(Stage::Exposed, false);
        state.strike();
        assert_eq!(state.stage(), Stage::Unaffected);
    }

    #[test]
    fn lightning_is_suppressed_by_wax() {
        let mut state = OxidationState::new(Stage::Exposed, true);
        state.strike();
        assert_eq!(state.stage(), Stage::Exposed);
    }

    #[test]
    fn levels_are_monotonic_ordinals() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0].level() + 1 == pair[1].level());
            assert!(pair[0] < pair[1]);
        }
    }
}
