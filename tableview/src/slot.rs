// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recyclable cell slots.

use kurbo::Point;

use crate::{BindContext, TableCell};

/// A cell instance tracked by the reconciler, separate from the data it shows.
///
/// A slot is *bound* when its bound and pending indices agree on a data index.
/// While the reconciler moves a slot to a new index the pending index runs
/// ahead of the bound one until the cell has been rebound.
#[derive(Debug, Clone)]
pub struct CellSlot<C> {
    cell: C,
    bound: Option<usize>,
    pending: Option<usize>,
    position: Point,
    order: usize,
}

impl<C> CellSlot<C> {
    pub(crate) const fn new(cell: C) -> Self {
        Self {
            cell,
            bound: None,
            pending: None,
            position: Point::ORIGIN,
            order: 0,
        }
    }

    /// The cell held by this slot.
    #[must_use]
    pub const fn cell(&self) -> &C {
        &self.cell
    }

    /// Mutable access to the cell held by this slot.
    pub fn cell_mut(&mut self) -> &mut C {
        &mut self.cell
    }

    /// Index of the data currently rendered by the cell.
    #[must_use]
    pub const fn bound_index(&self) -> Option<usize> {
        self.bound
    }

    /// Index the slot is moving to.
    #[must_use]
    pub const fn pending_index(&self) -> Option<usize> {
        self.pending
    }

    /// Returns `true` if the slot shows a data index and is not mid-transition.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound.is_some() && self.bound == self.pending
    }

    /// Content-local center of the cell.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Rank among the visible slots; lower ranks hold lower indices.
    #[must_use]
    pub const fn draw_order(&self) -> usize {
        self.order
    }

    pub(crate) fn mark_pending(&mut self, index: usize) {
        self.pending = Some(index);
    }

    pub(crate) fn place(&mut self, position: Point, order: usize) {
        self.position = position;
        self.order = order;
    }

    /// Binds the slot to `index`, invoking the cell's binder when the index
    /// changes or `force` is set. Returns `true` if the binder ran.
    pub(crate) fn bind<T>(
        &mut self,
        index: usize,
        data: &T,
        owner: &BindContext,
        force: bool,
    ) -> bool
    where
        C: TableCell<T>,
    {
        self.pending = Some(index);
        let rebind = force || self.bound != Some(index);
        if rebind {
            if self.bound.is_some() {
                self.cell.un_init();
            }
            self.cell.init(index, data, owner);
        }
        self.bound = Some(index);
        rebind
    }

    /// Drops the slot's binding. Returns `true` if the cell had been bound.
    pub(crate) fn unbind<T>(&mut self) -> bool
    where
        C: TableCell<T>,
    {
        self.pending = None;
        let was_bound = self.bound.take().is_some();
        if was_bound {
            self.cell.un_init();
        }
        was_bound
    }

    pub(crate) fn reset(&mut self) {
        self.bound = None;
        self.pending = None;
        self.position = Point::ORIGIN;
        self.order = 0;
    }
}
