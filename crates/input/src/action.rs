use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete actions exposed to the trainer, addressed by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Nop,
    AttackLeft,
    AttackRight,
    Switch,
}

impl Action {
    /// Every action in index order.
    pub const ALL: [Action; 4] = [Action::Nop, Action::AttackLeft, Action::AttackRight, Action::Switch];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Action::Nop => "NOP",
            Action::AttackLeft => "ATK_L",
            Action::AttackRight => "ATK_R",
            Action::Switch => "SWITCH",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Tool held by the avatar. The mission equips the diamond pickaxe in the
/// first hotbar slot and the golden one in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Pickaxe {
    #[default]
    Diamond,
    Golden,
}

impl Pickaxe {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Pickaxe::Diamond => Pickaxe::Golden,
            Pickaxe::Golden => Pickaxe::Diamond,
        }
    }

    /// Command selecting this pickaxe's hotbar slot.
    #[must_use]
    pub fn hotbar_command(self) -> &'static str {
        match self {
            Pickaxe::Diamond => "hotbar.1 1",
            Pickaxe::Golden => "hotbar.2 1",
        }
    }
}
