//! Toy inventory resource.
//!
//! [`ToyInventory`] is the only owner and mutator of the session's toys and
//! counters. Invariants kept by every operation:
//!
//! - `in_hand + stored <= total`
//! - `stored` never decreases
//! - `in_hand` only drops when a store succeeds, by exactly the amount moved
//! - the victory signal fires once per session, on the store that makes
//!   `stored == total`

use bevy_ecs::prelude::Resource;

use crate::components::interactable::Interactable;

/// Counters shown on the HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryCounters {
    pub in_hand: u32,
    pub stored: u32,
}

/// Result of [`ToyInventory::store_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOutcome {
    /// Toys moved from hand to chest.
    pub transferred: u32,
    /// True only on the store that completed the collection.
    pub victory: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct ToyInventory {
    toys: Vec<Interactable>,
    counters: InventoryCounters,
    victory_fired: bool,
}

impl ToyInventory {
    pub fn new(toys: Vec<Interactable>) -> Self {
        Self {
            toys,
            counters: InventoryCounters::default(),
            victory_fired: false,
        }
    }

    pub fn toys(&self) -> &[Interactable] {
        &self.toys
    }

    /// Toys still lying around, in manifest order.
    pub fn uncollected(&self) -> impl Iterator<Item = &Interactable> {
        self.toys.iter().filter(|t| !t.collected)
    }

    pub fn counters(&self) -> InventoryCounters {
        self.counters
    }

    pub fn total(&self) -> u32 {
        self.toys.len() as u32
    }

    pub fn victory_fired(&self) -> bool {
        self.victory_fired
    }

    /// Mark toy `id` collected and put it in hand.
    ///
    /// Returns false (and changes nothing) for unknown or already collected
    /// toys.
    pub fn pick_up(&mut self, id: u32) -> bool {
        let Some(toy) = self.toys.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if toy.collected {
            return false;
        }
        toy.collected = true;
        self.counters.in_hand += 1;
        true
    }

    /// Move everything in hand into the chest.
    pub fn store_all(&mut self) -> StoreOutcome {
        let transferred = self.counters.in_hand;
        if transferred == 0 {
            return StoreOutcome::default();
        }
        self.counters.stored += transferred;
        self.counters.in_hand = 0;

        let victory = !self.victory_fired && self.counters.stored >= self.total();
        if victory {
            self.victory_fired = true;
        }
        StoreOutcome {
            transferred,
            victory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::toymanifest::ToyManifest;

    fn inventory() -> ToyInventory {
        ToyInventory::new(ToyManifest::builtin().spawn_toys())
    }

    #[test]
    fn test_pick_up_marks_collected_and_counts() {
        let mut inv = inventory();
        assert!(inv.pick_up(1));
        assert!(inv.toys()[0].collected);
        assert_eq!(inv.counters().in_hand, 1);
        assert_eq!(inv.uncollected().count(), 7);
    }

    #[test]
    fn test_pick_up_is_idempotent() {
        let mut inv = inventory();
        assert!(inv.pick_up(3));
        assert!(!inv.pick_up(3));
        assert_eq!(inv.counters().in_hand, 1);
    }

    #[test]
    fn test_pick_up_unknown_id() {
        let mut inv = inventory();
        assert!(!inv.pick_up(99));
        assert_eq!(inv.counters(), InventoryCounters::default());
    }

    #[test]
    fn test_store_all_moves_hand_to_chest() {
        let mut inv = inventory();
        inv.pick_up(1);
        inv.pick_up(2);
        let outcome = inv.store_all();
        assert_eq!(outcome.transferred, 2);
        assert!(!outcome.victory);
        assert_eq!(
            inv.counters(),
            InventoryCounters {
                in_hand: 0,
                stored: 2
            }
        );
    }

    #[test]
    fn test_store_with_empty_hand_is_noop() {
        let mut inv = inventory();
        assert_eq!(inv.store_all(), StoreOutcome::default());
        assert_eq!(inv.counters().stored, 0);
    }

    #[test]
    fn test_victory_fires_exactly_once() {
        let mut inv = inventory();
        for id in 1..=7 {
            inv.pick_up(id);
        }
        assert!(!inv.store_all().victory);
        assert_eq!(inv.counters().stored, 7);

        inv.pick_up(8);
        let outcome = inv.store_all();
        assert_eq!(outcome.transferred, 1);
        assert!(outcome.victory);
        assert_eq!(inv.counters().stored, 8);

        let again = inv.store_all();
        assert!(!again.victory);
        assert_eq!(again.transferred, 0);
        assert!(inv.victory_fired());
    }

    #[test]
    fn test_counters_respect_total() {
        let mut inv = inventory();
        for id in 1..=8 {
            inv.pick_up(id);
            inv.pick_up(id);
        }
        let c = inv.counters();
        assert!(c.in_hand + c.stored <= inv.total());
        inv.store_all();
        let c = inv.counters();
        assert_eq!(c.stored, inv.total());
        assert_eq!(c.in_hand, 0);
    }
}
