//! Document plugins.
//!
//! A plugin receives the session's three pieces (buffer, undo engine,
//! clipboard) and may call any public operation on them; edits it makes are
//! recorded per primitive call, exactly like interactive edits. The
//! registry maps stable names to boxed plugins.

mod capitalize;
mod stats;

pub use capitalize::CapitalizePlugin;
pub use stats::{document_stats, DocumentStats, StatsPlugin};

use crate::clipboard::ClipboardStack;
use crate::error::Result;
use crate::model::buffer::TextBuffer;
use crate::model::undo::UndoEngine;

/// What a plugin run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginOutcome {
    /// Nothing to report beyond the document itself.
    Done,
    /// A human-readable report for the host to display.
    Report(String),
}

/// A named document transformation or analysis.
pub trait EditorPlugin {
    /// Stable name the registry and command line look the plugin up by.
    fn name(&self) -> &str;

    /// One-line description for listings.
    fn description(&self) -> &str;

    /// Runs against the open document.
    fn execute(
        &self,
        buffer: &mut TextBuffer,
        undo: &mut UndoEngine,
        clipboard: &mut ClipboardStack,
    ) -> Result<PluginOutcome>;
}

/// An ordered collection of plugins, looked up by name.
pub struct PluginRegistry {
    plugins: Vec<Box<dyn EditorPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// A registry pre-loaded with the built-in plugins.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StatsPlugin));
        registry.register(Box::new(CapitalizePlugin));
        registry
    }

    pub fn register(&mut self, plugin: Box<dyn EditorPlugin>) {
        tracing::debug!("PluginRegistry::register: {}", plugin.name());
        self.plugins.push(plugin);
    }

    pub fn get(&self, name: &str) -> Option<&dyn EditorPlugin> {
        self.plugins
            .iter()
            .find(|plugin| plugin.name() == name)
            .map(|plugin| plugin.as_ref())
    }

    /// Iterates over the plugins in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn EditorPlugin> {
        self.plugins.iter().map(|plugin| plugin.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
