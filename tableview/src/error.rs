// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types reported by the table view.

use tableview_window::WindowError;
use thiserror::Error;

/// A required collaborator is missing or unusable.
///
/// These are fatal at initialization: the table view leaves its state untouched
/// and `init` returns the error.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigurationError {
    /// No scroll host (the content container and its viewport) is attached.
    #[error("no content container: attach a scroll host before init")]
    MissingContainer,
    /// No cell template is attached.
    #[error("no cell template: attach a template before init")]
    MissingTemplate,
    /// The template's cells are not wired to a content binder.
    #[error("cell template does not expose a content binder")]
    TemplateNotBindable,
    /// The template's extent along the scroll axis is unusable.
    #[error("cell template size along the scroll axis must be positive; got {cell_size}")]
    InvalidCellSize {
        /// The rejected extent.
        cell_size: f64,
    },
}

/// Errors returned by [`TableView`](crate::TableView) operations.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TableViewError {
    /// Initialization aborted on a configuration problem.
    #[error("invalid table view configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The visible window could not be computed.
    #[error("cannot compute visible window: {0}")]
    Window(#[from] WindowError),
}
