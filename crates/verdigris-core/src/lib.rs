//! Copper-creature oxidation simulation core.
//!
//! Models a creature whose visible condition degrades stochastically under
//! the influence of nearby peers, and whose autonomous behavior, animation
//! timers, and interaction rules all derive from that condition. The host
//! engine drives two cadences: the per-creature movement tick (timers + AI
//! gate) and a coarser, probabilistically-thinned ambient tick (contagion
//! rolls).

pub mod config;
pub mod contagion;
pub mod creature;
pub mod effects;
pub mod goals;
pub mod interaction;
pub mod oxidation;
pub mod persistence;
pub mod rng;
pub mod spatial;
pub mod timers;
pub mod world;
