// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pool of detached cell slots.

use alloc::vec::Vec;

use crate::{CellSlot, CellTemplate};

/// Detached, reusable cell slots.
///
/// Slots move by value: a slot handed out by [`CellPool::acquire`] belongs to
/// the caller until it is given back with [`CellPool::release`], so a slot can
/// never sit in the pool and in the visible set at the same time.
#[derive(Debug, Clone)]
pub struct CellPool<C> {
    free: Vec<CellSlot<C>>,
    created: usize,
    reused: usize,
}

impl<C> Default for CellPool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CellPool<C> {
    /// Creates an empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            free: Vec::new(),
            created: 0,
            reused: 0,
        }
    }

    /// Takes a detached slot, instantiating a new cell from `template` only
    /// when the pool is empty. The returned slot is unbound.
    pub fn acquire<P>(&mut self, template: &mut P) -> CellSlot<C>
    where
        P: CellTemplate<Cell = C>,
    {
        if let Some(mut slot) = self.free.pop() {
            self.reused += 1;
            slot.reset();
            slot
        } else {
            self.created += 1;
            CellSlot::new(template.instantiate())
        }
    }

    /// Returns a slot to the pool.
    ///
    /// The slot should already be unbound; any leftover indices are cleared.
    pub fn release(&mut self, mut slot: CellSlot<C>) {
        debug_assert!(
            slot.bound_index().is_none(),
            "slots must be unbound before they are pooled"
        );
        slot.reset();
        self.free.push(slot);
    }

    /// Instantiates cells until at least `count` slots are waiting in the pool.
    pub fn reserve<P>(&mut self, template: &mut P, count: usize)
    where
        P: CellTemplate<Cell = C>,
    {
        while self.free.len() < count {
            self.created += 1;
            self.free.push(CellSlot::new(template.instantiate()));
        }
    }

    /// Number of slots waiting in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Returns `true` if no slots are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Total cells instantiated through this pool.
    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }

    /// Total acquisitions served from pooled slots.
    #[must_use]
    pub const fn reused(&self) -> usize {
        self.reused
    }
}
