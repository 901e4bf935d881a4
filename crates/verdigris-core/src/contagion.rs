use crate::oxidation::Stage;
use rand::Rng;

/// Result of tallying nearby peers against the creature's own stage.
///
/// Less-aged neighbors never count; only equally-aged and more-aged peers
/// influence the advancement roll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborCensus {
    pub more_aged: u32,
    pub same_aged: u32,
}

impl NeighborCensus {
    /// Tally a snapshot of peer stages against `own` using plain local
    /// accumulators.
    pub fn tally(own: Stage, peers: impl IntoIterator<Item = Stage>) -> Self {
        let i = own.level();
        let mut census = Self::default();
        for peer in peers {
            let m = peer.level();
            if m < i {
                continue;
            }
            if m > i {
                census.more_aged += 1;
            } else {
                census.same_aged += 1;
            }
        }
        census
    }

    /// Majority-influence weight in (0, 1].
    ///
    /// `(more_aged + 1) / (more_aged + same_aged + 1)`: a creature embedded
    /// in an already-more-aged cluster is pulled toward 1, while a crowd of
    /// equally-aged peers dilutes the weight. No neighbors at all yields
    /// exactly 1.
    pub fn favorability(&self) -> f32 {
        (self.more_aged + 1) as f32 / (self.more_aged + self.same_aged + 1) as f32
    }

    /// Per-roll advancement probability: `favorability² × base_chance`.
    pub fn advancement_chance(&self, base_chance: f32) -> f32 {
        let f = self.favorability();
        f * f * base_chance
    }
}

/// Draw one uniform value and decide whether the stage should advance.
pub fn roll_advancement<R: Rng + ?Sized>(
    census: &NeighborCensus,
    base_chance: f32,
    rng: &mut R,
) -> bool {
    rng.random::<f32>() < census.advancement_chance(base_chance)
}
