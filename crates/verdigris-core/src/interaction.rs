use serde::{Deserialize, Serialize};

/// Axe quality tiers. Any grade scrapes or unwaxes; the diamond grade is
/// additionally reserved as the debug stage-advance tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxeGrade {
    Wood,
    Stone,
    Iron,
    Gold,
    Diamond,
    Netherite,
}

/// Items the interaction protocol distinguishes. Everything else collapses
/// into `Other` and passes through untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Axe(AxeGrade),
    Honeycomb,
    CopperIngot,
    Other,
}

impl Item {
    #[inline]
    pub fn is_axe(self) -> bool {
        matches!(self, Item::Axe(_))
    }

    /// The high-tier axe reserved for debug stage advancement.
    #[inline]
    pub fn is_debug_axe(self) -> bool {
        self == Item::Axe(AxeGrade::Diamond)
    }
}

/// A held stack: consumables track `count`, tools accumulate `damage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub count: u32,
    pub damage: u32,
}

impl ItemStack {
    pub fn new(item: Item, count: u32) -> Self {
        Self {
            item,
            count,
            damage: 0,
        }
    }

    /// Charge durability to a tool.
    pub fn damage_by(&mut self, amount: u32) {
        self.damage += amount;
    }

    /// Consume up to `n` units of a consumable.
    pub fn shrink(&mut self, n: u32) {
        self.count = self.count.saturating_sub(n);
    }
}

/// Which hand performed the interaction; only the main hand is honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

/// Resolution of one tool use. `Pass` carries no side effects and no cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionOutcome {
    Handled,
    Pass,
}

impl InteractionOutcome {
    #[inline]
    pub fn is_handled(self) -> bool {
        self == InteractionOutcome::Handled
    }
}
