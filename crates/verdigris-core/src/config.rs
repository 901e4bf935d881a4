use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Tunables for a creature population and its aging model.
///
/// All fields have serde defaults so partial config files stay forward
/// compatible; `validate` must be called before the config is used to build
/// a world.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Deterministic seed for reproducible runs.
    pub seed: u64,
    /// Width/depth of the square world footprint in world units.
    pub world_size: f64,
    /// Number of creatures placed in the world.
    pub num_creatures: usize,
    /// Half-extent of the cubic contagion census box, per axis.
    pub contagion_radius: f64,
    /// Baseline per-roll advancement probability for an isolated creature.
    pub contagion_base_chance: f32,
    /// Per-creature, per-step probability of receiving an ambient tick.
    /// Models the host engine's probabilistically-thinned random tick.
    pub ambient_tick_chance: f64,
    /// Health restored by one healing ingot.
    pub heal_amount: f32,
    /// Maximum creature health.
    pub max_health: f32,
    /// Durability charged to an axe per successful scrape or unwax.
    pub axe_durability_cost: u32,
    /// Movement speed for the escape-danger goal.
    pub escape_danger_speed: f64,
    /// Movement speed for the wander goal.
    pub wander_speed: f64,
    /// Range of the look-at-nearby-player goal.
    pub look_at_player_range: f32,
    /// Range of the look-at-nearby-peer goal.
    pub look_at_peer_range: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            world_size: 64.0,
            num_creatures: 16,
            contagion_radius: 4.0,
            contagion_base_chance: 0.01,
            ambient_tick_chance: 0.05,
            heal_amount: 5.0,
            max_health: 30.0,
            axe_durability_cost: 1,
            escape_danger_speed: 0.5,
            wander_speed: 0.25,
            look_at_player_range: 6.0,
            look_at_peer_range: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidWorldSize,
    InvalidContagionRadius,
    InvalidContagionBaseChance,
    InvalidAmbientTickChance,
    InvalidHealAmount,
    InvalidMaxHealth,
    InvalidGoalSpeed,
    InvalidGoalRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWorldSize => write!(f, "world_size must be positive and finite"),
            ConfigError::InvalidContagionRadius => {
                write!(f, "contagion_radius must be non-negative and finite")
            }
            ConfigError::InvalidContagionBaseChance => {
                write!(f, "contagion_base_chance must be within [0, 1]")
            }
            ConfigError::InvalidAmbientTickChance => {
                write!(f, "ambient_tick_chance must be within [0, 1]")
            }
            ConfigError::InvalidHealAmount => {
                write!(f, "heal_amount must be non-negative and finite")
            }
            ConfigError::InvalidMaxHealth => write!(f, "max_health must be positive and finite"),
            ConfigError::InvalidGoalSpeed => write!(f, "goal speeds must be positive and finite"),
            ConfigError::InvalidGoalRange => write!(f, "goal ranges must be positive and finite"),
        }
    }
}

impl Error for ConfigError {}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(ConfigError::InvalidWorldSize);
        }
        if !self.contagion_radius.is_finite() || self.contagion_radius < 0.0 {
            return Err(ConfigError::InvalidContagionRadius);
        }
        if !self.contagion_base_chance.is_finite()
            || !(0.0..=1.0).contains(&self.contagion_base_chance)
        {
            return Err(ConfigError::InvalidContagionBaseChance);
        }
        if !self.ambient_tick_chance.is_finite() || !(0.0..=1.0).contains(&self.ambient_tick_chance)
        {
            return Err(ConfigError::InvalidAmbientTickChance);
        }
        if !self.heal_amount.is_finite() || self.heal_amount < 0.0 {
            return Err(ConfigError::InvalidHealAmount);
        }
        if !self.max_health.is_finite() || self.max_health <= 0.0 {
            return Err(ConfigError::InvalidMaxHealth);
        }
        for speed in [self.escape_danger_speed, self.wander_speed] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::InvalidGoalSpeed);
            }
        }
        for range in [self.look_at_player_range, self.look_at_peer_range] {
            if !range.is_finite() || range <= 0.0 {
                return Err(ConfigError::InvalidGoalRange);
            }
        }
        Ok(())
    }
}
