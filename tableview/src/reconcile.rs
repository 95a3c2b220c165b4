// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reconciliation of visible slots against the required window.

use alloc::vec::Vec;

use hashbrown::HashSet;
use smallvec::SmallVec;
use tableview_window::{ContentGeometry, Window};

use crate::{BindContext, CellPool, CellSlot, CellTemplate, TableCell};

/// Work performed by one [`Reconciler::reconcile`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// The visible slots already matched the window; nothing was touched.
    pub fast_path: bool,
    /// Slots taken from the pool.
    pub acquired: usize,
    /// Slots given back to the pool.
    pub released: usize,
    /// Content binder invocations.
    pub bound: usize,
    /// Unbind hook invocations.
    pub unbound: usize,
}

/// Maps a set of visible slots onto a [`Window`] of data indices.
///
/// The reconciler owns the visible slots (in draw order) and the pool of
/// detached ones. Each pass:
///
/// 1. returns early if the slots already cover the window,
/// 2. grows or shrinks the visible set to the window size, releasing slots
///    outside the window before any inside it,
/// 3. keeps every slot whose index is still in the window and hands the
///    missing indices to the remaining slots in ascending order,
/// 4. places each slot and reassigns draw order to follow the indices.
#[derive(Debug, Clone)]
pub struct Reconciler<C> {
    slots: Vec<CellSlot<C>>,
    pool: CellPool<C>,
}

impl<C> Default for Reconciler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Reconciler<C> {
    /// Creates a reconciler with no slots.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_pool(CellPool::new())
    }

    /// Creates a reconciler drawing from an existing pool.
    #[must_use]
    pub const fn with_pool(pool: CellPool<C>) -> Self {
        Self {
            slots: Vec::new(),
            pool,
        }
    }

    /// Visible slots in draw order.
    #[must_use]
    pub fn slots(&self) -> &[CellSlot<C>] {
        &self.slots
    }

    /// The pool of detached slots.
    #[must_use]
    pub const fn pool(&self) -> &CellPool<C> {
        &self.pool
    }

    /// Prewarms the pool so that at least `count` detached cells are waiting.
    pub fn reserve<P>(&mut self, template: &mut P, count: usize)
    where
        P: CellTemplate<Cell = C>,
    {
        self.pool.reserve(template, count);
    }

    /// The visible slot bound to `index`, if any.
    #[must_use]
    pub fn slot_for_index(&self, index: usize) -> Option<&CellSlot<C>> {
        self.slots
            .iter()
            .find(|slot| slot.is_bound() && slot.bound_index() == Some(index))
    }

    /// Mutable access to the visible slot bound to `index`, if any.
    pub fn slot_for_index_mut(&mut self, index: usize) -> Option<&mut CellSlot<C>> {
        self.slots
            .iter_mut()
            .find(|slot| slot.is_bound() && slot.bound_index() == Some(index))
    }

    /// Returns `true` if the slots already show exactly `window`.
    ///
    /// Both ends are compared by bound index. Slots are kept sorted with unique
    /// indices, so matching ends and a matching count imply a full match.
    #[must_use]
    pub fn covers(&self, window: Window) -> bool {
        if self.slots.len() != window.count {
            return false;
        }
        match (self.slots.first(), self.slots.last()) {
            (Some(first), Some(last)) => {
                first.is_bound()
                    && last.is_bound()
                    && first.bound_index() == Some(window.start)
                    && last.bound_index() == window.last()
            }
            _ => window.is_empty(),
        }
    }

    /// Reconciles the visible slots against `window` over `data`.
    ///
    /// Binders run only for slots whose index changes, unless `force` rebinds
    /// every visible slot. New cells come from `template` only when the pool
    /// is empty. Slot positions come from `geometry`.
    pub fn reconcile<T, P>(
        &mut self,
        template: &mut P,
        data: &[T],
        window: Window,
        geometry: &ContentGeometry,
        force: bool,
    ) -> ReconcileReport
    where
        P: CellTemplate<Cell = C>,
        C: TableCell<T>,
    {
        debug_assert!(
            window.last().is_none_or(|last| last < data.len()),
            "window {window:?} runs past {} items",
            data.len()
        );
        let mut report = ReconcileReport::default();
        if !force && self.covers(window) {
            report.fast_path = true;
            return report;
        }

        self.resize(template, window, &mut report);
        if window.is_empty() {
            return report;
        }

        let owner = BindContext {
            axis: geometry.axis,
            cell_size: geometry.cell_size,
            total_count: data.len(),
            window,
        };

        // Slots still showing an in-window index keep it.
        let mut claimed: HashSet<usize> = HashSet::with_capacity(self.slots.len());
        let mut keep: SmallVec<[(usize, usize); 16]> = SmallVec::new();
        let mut free: SmallVec<[usize; 16]> = SmallVec::new();
        for (position, slot) in self.slots.iter().enumerate() {
            match slot.bound_index() {
                Some(index)
                    if slot.is_bound() && window.contains(index) && claimed.insert(index) =>
                {
                    keep.push((position, index));
                }
                _ => free.push(position),
            }
        }

        // The rest take the unclaimed indices in ascending order.
        let mut free = free.into_iter();
        let mut moved: SmallVec<[(usize, usize); 16]> = SmallVec::new();
        for index in window.indices().filter(|index| !claimed.contains(index)) {
            let Some(position) = free.next() else {
                break;
            };
            self.slots[position].mark_pending(index);
            moved.push((position, index));
        }

        for (position, index) in keep.into_iter().chain(moved) {
            let Some(item) = data.get(index) else {
                continue;
            };
            let slot = &mut self.slots[position];
            let previous = slot.bound_index();
            if slot.bind(index, item, &owner, force) {
                report.bound += 1;
                if previous.is_some() {
                    report.unbound += 1;
                }
            }
        }

        self.slots.sort_by_key(CellSlot::bound_index);
        for (rank, slot) in self.slots.iter_mut().enumerate() {
            let index = slot.bound_index().unwrap_or(window.start + rank);
            slot.place(geometry.cell_position(index), rank);
        }
        report
    }

    /// Calls the reload hook of the slot bound to `index`.
    ///
    /// Returns `false` if no visible slot shows that index.
    pub fn reload<T>(&mut self, index: usize, item: &T) -> bool
    where
        C: TableCell<T>,
    {
        match self.slot_for_index_mut(index) {
            Some(slot) => {
                slot.cell_mut().reload(item);
                true
            }
            None => false,
        }
    }

    fn resize<T, P>(&mut self, template: &mut P, window: Window, report: &mut ReconcileReport)
    where
        P: CellTemplate<Cell = C>,
        C: TableCell<T>,
    {
        let target = window.count;
        if self.slots.len() < target {
            while self.slots.len() < target {
                self.slots.push(self.pool.acquire(template));
                report.acquired += 1;
            }
            return;
        }

        let mut excess = self.slots.len() - target;
        // Slots showing nothing in the window go first, newest first.
        let mut position = self.slots.len();
        while excess > 0 && position > 0 {
            position -= 1;
            let in_window = self.slots[position]
                .bound_index()
                .is_some_and(|index| window.contains(index));
            if !in_window {
                let slot = self.slots.remove(position);
                self.retire::<T>(slot, report);
                excess -= 1;
            }
        }
        while excess > 0 {
            let Some(slot) = self.slots.pop() else {
                break;
            };
            self.retire::<T>(slot, report);
            excess -= 1;
        }
    }

    fn retire<T>(&mut self, mut slot: CellSlot<C>, report: &mut ReconcileReport)
    where
        C: TableCell<T>,
    {
        if slot.unbind::<T>() {
            report.unbound += 1;
        }
        self.pool.release(slot);
        report.released += 1;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Size};
    use tableview_window::{ContentGeometry, ScrollAxis, Window, compute_window};

    use super::Reconciler;
    use crate::test_support::{
        CellEvent, RecordingCell, RecordingTemplate, count_inits, count_un_inits, take_events,
    };

    const CELL: f64 = 50.0;
    const VIEWPORT: f64 = 220.0;

    fn data(len: u32) -> Vec<u32> {
        (0..len).map(|i| i * 10).collect()
    }

    fn geometry(total: usize) -> ContentGeometry {
        ContentGeometry::layout(ScrollAxis::Vertical, CELL, total, Size::new(300.0, VIEWPORT))
    }

    fn window_at(offset: f64, total: usize) -> Window {
        compute_window(offset, CELL, total, VIEWPORT).unwrap()
    }

    fn bound_indices(reconciler: &Reconciler<RecordingCell>) -> Vec<Option<usize>> {
        reconciler.slots().iter().map(|slot| slot.bound_index()).collect()
    }

    fn assert_covers(reconciler: &Reconciler<RecordingCell>, window: Window) {
        let expected: Vec<_> = window.indices().map(Some).collect();
        assert_eq!(bound_indices(reconciler), expected);
        for (rank, slot) in reconciler.slots().iter().enumerate() {
            assert!(slot.is_bound());
            assert_eq!(slot.draw_order(), rank);
        }
    }

    #[test]
    fn first_pass_binds_every_index_once() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let log = template.log();
        let mut reconciler = Reconciler::new();
        let window = window_at(0.0, items.len());

        let report = reconciler.reconcile(&mut template, &items, window, &geometry(30), false);
        assert_eq!(report.acquired, 6);
        assert_eq!(report.bound, 6);
        assert_eq!(report.unbound, 0);
        assert!(!report.fast_path);
        assert_covers(&reconciler, window);
        assert_eq!(reconciler.slots()[2].cell().shown, Some(20));

        let events = take_events(&log);
        assert_eq!(count_inits(&events), 6);
        assert_eq!(count_un_inits(&events), 0);
    }

    #[test]
    fn unchanged_window_takes_the_fast_path() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let log = template.log();
        let mut reconciler = Reconciler::new();
        let window = window_at(130.0, items.len());
        let geometry = geometry(30);

        reconciler.reconcile(&mut template, &items, window, &geometry, false);
        take_events(&log);

        let report = reconciler.reconcile(&mut template, &items, window, &geometry, false);
        assert!(report.fast_path);
        assert_eq!(report.bound, 0);
        assert!(take_events(&log).is_empty());
    }

    #[test]
    fn scrolling_rebinds_only_the_cells_that_left() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let log = template.log();
        let mut reconciler = Reconciler::new();
        let geometry = geometry(30);

        reconciler.reconcile(&mut template, &items, window_at(0.0, 30), &geometry, false);
        let cell_for_three = reconciler.slot_for_index(3).unwrap().cell().id;
        take_events(&log);

        // [0, 5] → [2, 7]: indices 2..=5 stay put, 0 and 1 are recycled into 6 and 7.
        let window = window_at(130.0, 30);
        let report = reconciler.reconcile(&mut template, &items, window, &geometry, false);
        assert_eq!(report.acquired, 0);
        assert_eq!(report.released, 0);
        assert_eq!(report.bound, 2);
        assert_eq!(report.unbound, 2);
        assert_covers(&reconciler, window);
        assert_eq!(reconciler.slot_for_index(3).unwrap().cell().id, cell_for_three);

        let events = take_events(&log);
        let rebound: Vec<_> = events
            .iter()
            .filter_map(|event| match event {
                CellEvent::Init { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(rebound, [6, 7]);
        assert_eq!(template.instantiated(), 6);
    }

    #[test]
    fn force_rebinds_everything_in_place() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let log = template.log();
        let mut reconciler = Reconciler::new();
        let window = window_at(0.0, 30);
        let geometry = geometry(30);

        reconciler.reconcile(&mut template, &items, window, &geometry, false);
        take_events(&log);

        let report = reconciler.reconcile(&mut template, &items, window, &geometry, true);
        assert!(!report.fast_path);
        assert_eq!(report.bound, 6);
        assert_eq!(report.unbound, 6);
        assert_covers(&reconciler, window);
        let events = take_events(&log);
        assert_eq!(count_inits(&events), 6);
        assert_eq!(count_un_inits(&events), 6);
    }

    #[test]
    fn shrinking_releases_out_of_window_slots_first() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let mut reconciler = Reconciler::new();
        let geometry = geometry(30);

        reconciler.reconcile(&mut template, &items, window_at(0.0, 30), &geometry, false);
        let survivors: Vec<_> = [1, 2, 3]
            .iter()
            .map(|&i| reconciler.slot_for_index(i).unwrap().cell().id)
            .collect();

        // Only [1, 3] stays required: slots for 0, 4, and 5 go back to the pool.
        let report =
            reconciler.reconcile(&mut template, &items, Window::inclusive(1, 3), &geometry, false);
        assert_eq!(report.released, 3);
        assert_eq!(report.unbound, 3);
        assert_eq!(report.bound, 0);
        assert_eq!(reconciler.pool().len(), 3);
        assert_covers(&reconciler, Window::inclusive(1, 3));
        let kept: Vec<_> = reconciler.slots().iter().map(|slot| slot.cell().id).collect();
        assert_eq!(kept, survivors);
    }

    #[test]
    fn small_data_sets_clamp_the_slot_count() {
        let items = data(5);
        let mut template = RecordingTemplate::vertical(CELL);
        let mut reconciler = Reconciler::new();
        let tall = ContentGeometry::layout(ScrollAxis::Vertical, CELL, 5, Size::new(300.0, 350.0));

        // Eight slots would cover the viewport, only five items exist.
        let window = compute_window(0.0, CELL, items.len(), 350.0).unwrap();
        assert_eq!(window, Window::inclusive(0, 4));
        reconciler.reconcile(&mut template, &items, window, &tall, false);
        assert_covers(&reconciler, window);
        assert_eq!(reconciler.slots().len(), 5);
    }

    #[test]
    fn empty_window_drains_into_the_pool() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let log = template.log();
        let mut reconciler = Reconciler::new();

        reconciler.reconcile(&mut template, &items, window_at(0.0, 30), &geometry(30), false);
        take_events(&log);

        let report =
            reconciler.reconcile(&mut template, &[] as &[u32], Window::EMPTY, &geometry(0), true);
        assert_eq!(report.released, 6);
        assert!(reconciler.slots().is_empty());
        assert_eq!(reconciler.pool().len(), 6);
        assert_eq!(count_un_inits(&take_events(&log)), 6);

        // Refilling reuses pooled cells instead of instantiating.
        reconciler.reconcile(&mut template, &items, window_at(0.0, 30), &geometry(30), false);
        assert_eq!(template.instantiated(), 6);
        assert_eq!(reconciler.pool().reused(), 6);
    }

    #[test]
    fn slots_are_placed_by_index() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let mut reconciler = Reconciler::new();
        let geometry = geometry(30);

        reconciler.reconcile(&mut template, &items, window_at(130.0, 30), &geometry, false);
        let first = &reconciler.slots()[0];
        assert_eq!(first.bound_index(), Some(2));
        // Content is 1500 tall with its top edge at +750.
        assert_eq!(first.position(), Point::new(0.0, 750.0 - 125.0));
    }

    #[test]
    fn every_pass_keeps_indices_unique_and_in_window() {
        let items = data(40);
        let mut template = RecordingTemplate::vertical(CELL);
        let mut reconciler = Reconciler::new();
        let geometry = geometry(40);

        let offsets = [0.0, 75.0, 30.0, 900.0, 880.0, 5000.0, 10.0, 420.0, 425.0, 0.0];
        for offset in offsets {
            let window = window_at(offset, items.len());
            reconciler.reconcile(&mut template, &items, window, &geometry, false);
            assert_covers(&reconciler, window);

            let again = reconciler.reconcile(&mut template, &items, window, &geometry, false);
            assert!(again.fast_path);
        }
        assert_eq!(template.instantiated(), 6);
    }

    #[test]
    fn reload_reaches_only_visible_indices() {
        let items = data(30);
        let mut template = RecordingTemplate::vertical(CELL);
        let log = template.log();
        let mut reconciler = Reconciler::new();
        reconciler.reconcile(&mut template, &items, window_at(0.0, 30), &geometry(30), false);
        take_events(&log);

        assert!(reconciler.reload(4, &99));
        let cell = reconciler.slot_for_index(4).unwrap().cell();
        assert_eq!(cell.shown, Some(99));
        let id = cell.id;
        assert!(!reconciler.reload(20, &99));
        assert_eq!(take_events(&log), [CellEvent::Reload { cell: id }]);
    }
}
