//! Generational arena backing the paired tree.
//!
//! Per the redesign notes this replaces FreeFileSync's `ObjectMgr` — a
//! process-wide, concurrently-mutated static map from raw pointer to
//! object — with arena-local indices. A pair's stable identity (§3, I4) is
//! an index into this arena plus the generation counter at the slot it
//! occupies; no separate global mutable table is needed, and no identity
//! handle can alias a different, later object at the same slot, because
//! the generation is checked on every lookup.

use std::fmt;

/// A stable handle to an item in an [`Arena`].
///
/// Becomes a dangling ("not found") lookup once its slot is freed or
/// reused — it is never silently revalidated against a different object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId {
    index: u32,
    generation: u32,
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.index, self.generation)
    }
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32 },
}

/// An append-only (with removal) generational arena.
#[derive(Default)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
}

impl<T> Arena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Inserts a value, returning its stable id.
    pub fn insert(&mut self, value: T) -> ArenaId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            let generation = match slot {
                Slot::Vacant { generation } => *generation,
                Slot::Occupied { .. } => unreachable!("free list points at an occupied slot"),
            };
            *slot = Slot::Occupied { generation, value };
            return ArenaId { index, generation };
        }
        let index = u32::try_from(self.slots.len()).expect("arena holds at most u32::MAX items");
        self.slots.push(Slot::Occupied {
            generation: 0,
            value,
        });
        ArenaId { index, generation: 0 }
    }

    /// Looks up `id`, returning `None` if its slot was freed or reused.
    #[must_use]
    pub fn get(&self, id: ArenaId) -> Option<&T> {
        match self.slots.get(id.index as usize)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Mutable counterpart to [`Arena::get`].
    pub fn get_mut(&mut self, id: ArenaId) -> Option<&mut T> {
        match self.slots.get_mut(id.index as usize)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Removes `id`'s value, invalidating the id and any copies of it.
    pub fn remove(&mut self, id: ArenaId) -> Option<T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        let Slot::Occupied { generation, .. } = slot else {
            return None;
        };
        if *generation != id.generation {
            return None;
        }
        let next_generation = generation.wrapping_add(1);
        let Slot::Occupied { value, .. } = std::mem::replace(
            slot,
            Slot::Vacant {
                generation: next_generation,
            },
        ) else {
            unreachable!("checked above");
        };
        self.free.push(id.index);
        Some(value)
    }

    /// Iterates over every occupied slot and its id.
    pub fn iter(&self) -> impl Iterator<Item = (ArenaId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            if let Slot::Occupied { generation, value } = slot {
                Some((
                    ArenaId {
                        index: u32::try_from(index).expect("bounded by insert"),
                        generation: *generation,
                    },
                    value,
                ))
            } else {
                None
            }
        })
    }
}
