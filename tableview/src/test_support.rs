// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording doubles for the scroll host and cells.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Size, Vec2};
use tableview_window::{ScrollAxis, ScrollEdge};

use crate::{BindContext, CellTemplate, ScrollAnimation, ScrollHost, TableCell, TemplateFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellEvent {
    Init { cell: usize, index: usize },
    UnInit { cell: usize },
    Reload { cell: usize },
}

pub(crate) type EventLog = Rc<RefCell<Vec<CellEvent>>>;

pub(crate) fn count_inits(events: &[CellEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, CellEvent::Init { .. }))
        .count()
}

pub(crate) fn count_un_inits(events: &[CellEvent]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, CellEvent::UnInit { .. }))
        .count()
}

#[derive(Debug)]
pub(crate) struct RecordingCell {
    pub(crate) id: usize,
    pub(crate) shown: Option<u32>,
    log: EventLog,
}

impl TableCell<u32> for RecordingCell {
    fn init(&mut self, index: usize, data: &u32, _owner: &BindContext) {
        self.shown = Some(*data);
        self.log.borrow_mut().push(CellEvent::Init {
            cell: self.id,
            index,
        });
    }

    fn un_init(&mut self) {
        self.shown = None;
        self.log.borrow_mut().push(CellEvent::UnInit { cell: self.id });
    }

    fn reload(&mut self, data: &u32) {
        self.shown = Some(*data);
        self.log.borrow_mut().push(CellEvent::Reload { cell: self.id });
    }
}

#[derive(Debug)]
pub(crate) struct RecordingTemplate {
    size: Size,
    flags: TemplateFlags,
    log: EventLog,
    instantiated: usize,
}

impl RecordingTemplate {
    pub(crate) fn vertical(cell_size: f64) -> Self {
        Self::with_size(Size::new(300.0, cell_size))
    }

    pub(crate) fn horizontal(cell_size: f64) -> Self {
        Self::with_size(Size::new(cell_size, 80.0))
    }

    pub(crate) fn with_size(size: Size) -> Self {
        Self {
            size,
            flags: TemplateFlags::BINDABLE,
            log: EventLog::default(),
            instantiated: 0,
        }
    }

    pub(crate) fn with_flags(mut self, flags: TemplateFlags) -> Self {
        self.flags = flags;
        self
    }

    pub(crate) fn instantiated(&self) -> usize {
        self.instantiated
    }

    pub(crate) fn log(&self) -> EventLog {
        Rc::clone(&self.log)
    }
}

impl CellTemplate for RecordingTemplate {
    type Cell = RecordingCell;

    fn size(&self) -> Size {
        self.size
    }

    fn flags(&self) -> TemplateFlags {
        self.flags
    }

    fn instantiate(&mut self) -> RecordingCell {
        self.instantiated += 1;
        RecordingCell {
            id: self.instantiated,
            shown: None,
            log: Rc::clone(&self.log),
        }
    }
}

pub(crate) fn take_events(log: &EventLog) -> Vec<CellEvent> {
    core::mem::take(&mut *log.borrow_mut())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum HostCall {
    Percent {
        axis: ScrollAxis,
        percent: f64,
        animation: ScrollAnimation,
    },
    Edge {
        edge: ScrollEdge,
        animation: ScrollAnimation,
    },
    Stop,
}

#[derive(Debug)]
pub(crate) struct RecordingHost {
    pub(crate) offset: Vec2,
    pub(crate) viewport: Size,
    pub(crate) calls: Vec<HostCall>,
    pub(crate) content_size: Option<Size>,
    pub(crate) content_position: Option<Point>,
}

impl RecordingHost {
    pub(crate) fn new(viewport: Size) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
            calls: Vec::new(),
            content_size: None,
            content_position: None,
        }
    }

    /// Moves the content so that `distance` has been scrolled from the leading edge.
    pub(crate) fn scroll_leading(&mut self, axis: ScrollAxis, distance: f64) {
        self.offset = match axis {
            ScrollAxis::Horizontal => Vec2::new(-distance, 0.0),
            ScrollAxis::Vertical => Vec2::new(0.0, distance),
        };
    }

    pub(crate) fn last_percent(&self) -> Option<f64> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Percent { percent, .. } => Some(*percent),
            _ => None,
        })
    }
}

impl ScrollHost for RecordingHost {
    fn scroll_offset(&self) -> Vec2 {
        self.offset
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_to_percent_horizontal(&mut self, percent: f64, animation: ScrollAnimation) {
        self.calls.push(HostCall::Percent {
            axis: ScrollAxis::Horizontal,
            percent,
            animation,
        });
    }

    fn scroll_to_percent_vertical(&mut self, percent: f64, animation: ScrollAnimation) {
        self.calls.push(HostCall::Percent {
            axis: ScrollAxis::Vertical,
            percent,
            animation,
        });
    }

    fn scroll_to_edge(&mut self, edge: ScrollEdge, animation: ScrollAnimation) {
        self.calls.push(HostCall::Edge { edge, animation });
    }

    fn stop_auto_scroll(&mut self) {
        self.calls.push(HostCall::Stop);
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = Some(size);
    }

    fn set_content_position(&mut self, position: Point) {
        self.content_position = Some(position);
    }
}
