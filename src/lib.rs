//! An in-memory, line-oriented text editing core.
//!
//! The document model is a non-empty vector of lines with a cursor and an
//! optional selection. Mutations record reversible commands into a
//! two-stack [`UndoEngine`], observers hear about every committed change,
//! and [`EditSession`] layers clipboard traffic and composite editing
//! operations on top. Named [`plugins`] transform or analyze a document
//! through the same public primitives interactive editing uses.

/// Stack-shaped clipboard.
pub mod clipboard;
/// Error types shared across the crate.
pub mod error;
/// Coordinates, buffer, commands, and undo history.
pub mod model;
/// Observer registries used by the model types.
pub mod observers;
/// Built-in document plugins and the plugin registry.
pub mod plugins;
/// Buffer + history + clipboard as one editing session.
pub mod session;

pub use clipboard::ClipboardStack;
pub use error::{EditError, Result};
pub use model::buffer::TextBuffer;
pub use model::command::EditCommand;
pub use model::position::{Position, Range};
pub use model::undo::UndoEngine;
pub use observers::SubscriberId;
pub use plugins::{
    document_stats, CapitalizePlugin, DocumentStats, EditorPlugin, PluginOutcome, PluginRegistry,
    StatsPlugin,
};
pub use session::EditSession;
