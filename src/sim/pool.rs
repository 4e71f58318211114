//! Fixed-capacity entity pools
//!
//! Entities live in `[T; N]` arrays allocated once per level. A slot is
//! either active or free; "destroying" an entity clears its flag. Spawning
//! into a full pool does nothing.

/// An entity stored in a pool slot
pub trait Slot {
    fn is_active(&self) -> bool;
}

/// Index of the first inactive slot, if any
pub fn first_free<T: Slot>(slots: &[T]) -> Option<usize> {
    slots.iter().position(|s| !s.is_active())
}

/// Number of active slots
pub fn active_count<T: Slot>(slots: &[T]) -> usize {
    slots.iter().filter(|s| s.is_active()).count()
}

/// Whether at least one slot is free
pub fn has_free<T: Slot>(slots: &[T]) -> bool {
    first_free(slots).is_some()
}
