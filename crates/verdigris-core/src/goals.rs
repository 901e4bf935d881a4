use crate::config::WorldConfig;
use crate::oxidation::Stage;
use serde::{Deserialize, Serialize};

/// Autonomous behaviors understood by the host goal framework.
///
/// These are descriptive: the pathfinding and animation playback behind each
/// kind live in the host engine, which consumes the installed set in
/// priority order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    SwimToSafety,
    EscapeDanger { speed: f64 },
    Wander { speed: f64 },
    PressButton,
    LookAround,
    SpinHead,
    WiggleRod,
    LookAtPlayer { range: f32 },
    LookAtPeer { range: f32 },
}

/// Target-selection behaviors, installed independently of the priority list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetGoalKind {
    SearchForInteractable,
}

/// An owned, ordered goal roster. Lower priority number wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalSet {
    pub goals: Vec<(u8, GoalKind)>,
    pub target_goals: Vec<(u8, TargetGoalKind)>,
}

impl GoalSet {
    /// The full roster installed whenever the creature's AI is enabled.
    pub fn standard(config: &WorldConfig) -> Self {
        let mut priority = 0u8;
        let mut next = || {
            priority += 1;
            priority
        };
        let goals = vec![
            (next(), GoalKind::SwimToSafety),
            (
                next(),
                GoalKind::EscapeDanger {
                    speed: config.escape_danger_speed,
                },
            ),
            (
                next(),
                GoalKind::Wander {
                    speed: config.wander_speed,
                },
            ),
            (next(), GoalKind::PressButton),
            (next(), GoalKind::LookAround),
            (next(), GoalKind::SpinHead),
            (next(), GoalKind::WiggleRod),
            (
                next(),
                GoalKind::LookAtPlayer {
                    range: config.look_at_player_range,
                },
            ),
            (
                next(),
                GoalKind::LookAtPeer {
                    range: config.look_at_peer_range,
                },
            ),
        ];
        Self {
            goals,
            target_goals: vec![(1, TargetGoalKind::SearchForInteractable)],
        }
    }
}

/// Side effects the creature must apply when the gate flips.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateTransition {
    /// AI re-enabled; the rebuilt goal set is live.
    Activated,
    /// AI disabled; goals and targets were dropped and the rod-wiggle timer
    /// must be forced to rest.
    Deactivated,
}

#[derive(Clone, Debug, PartialEq)]
enum GateState {
    Active(GoalSet),
    Dormant,
}

/// Two-state AI-enablement gate.
///
/// Holds the installed goal set as an owned value: entering Dormant drops it
/// wholesale and entering Active rebuilds it from config, rather than
/// mutating a shared goal container in place.
#[derive(Clone, Debug)]
pub struct GoalGate {
    state: GateState,
}

impl GoalGate {
    /// Initial state at creature creation: Active unless constructed already
    /// fully oxidized.
    pub fn new(stage: Stage, config: &WorldConfig) -> Self {
        let state = if stage.is_terminal() {
            GateState::Dormant
        } else {
            GateState::Active(GoalSet::standard(config))
        };
        Self { state }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, GateState::Active(_))
    }

    /// The live roster, or `None` while dormant.
    pub fn goals(&self) -> Option<&GoalSet> {
        match &self.state {
            GateState::Active(set) => Some(set),
            GateState::Dormant => None,
        }
    }

    /// Edge-triggered re-check against the current stage, run every movement
    /// tick. Returns the transition taken, if any; repeated calls while the
    /// stage is stable are cheap no-ops.
    pub fn observe(&mut self, stage: Stage, config: &WorldConfig) -> Option<GateTransition> {
        match (&self.state, stage.is_terminal()) {
            (GateState::Active(_), true) => {
                self.state = GateState::Dormant;
                Some(GateTransition::Deactivated)
            }
            (GateState::Dormant, false) => {
                self.state = GateState::Active(GoalSet::standard(config));
                Some(GateTransition::Activated)
            }
            _ => None,
        }
    }
}
