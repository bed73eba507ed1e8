//! Document statistics: line, word, and letter counts.

use crate::clipboard::ClipboardStack;
use crate::error::Result;
use crate::model::buffer::TextBuffer;
use crate::model::undo::UndoEngine;
use crate::plugins::{EditorPlugin, PluginOutcome};
use serde::Serialize;

/// Counts reported by [`StatsPlugin`] and by the command line `--stats`
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Number of lines, trailing empty ones included.
    pub lines: usize,
    /// Whitespace-separated words.
    pub words: usize,
    /// Characters, counting one per line break.
    pub letters: usize,
}

/// Computes statistics over the whole document.
pub fn document_stats(buffer: &TextBuffer) -> DocumentStats {
    let lines = buffer.line_count();
    let words = buffer
        .all_lines()
        .map(|line| line.split_whitespace().count())
        .sum();
    let letters = buffer
        .all_lines()
        .map(|line| line.chars().count())
        .sum::<usize>()
        + lines
        - 1;
    DocumentStats {
        lines,
        words,
        letters,
    }
}

/// Reports line, word, and letter counts without touching the document.
pub struct StatsPlugin;

impl EditorPlugin for StatsPlugin {
    fn name(&self) -> &str {
        "stats"
    }

    fn description(&self) -> &str {
        "Count lines, words, and letters in the document"
    }

    fn execute(
        &self,
        buffer: &mut TextBuffer,
        _undo: &mut UndoEngine,
        _clipboard: &mut ClipboardStack,
    ) -> Result<PluginOutcome> {
        let stats = document_stats(buffer);
        Ok(PluginOutcome::Report(format!(
            "Line count: {}\nWord count: {}\nLetter count: {}",
            stats.lines, stats.words, stats.letters
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let buffer = TextBuffer::from_text("hello world\n\nfoo");
        let stats = document_stats(&buffer);
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.words, 3);
        // 11 + 0 + 3 characters plus two line breaks.
        assert_eq!(stats.letters, 16);
    }

    #[test]
    fn test_empty_document() {
        let buffer = TextBuffer::empty();
        let stats = document_stats(&buffer);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.words, 0);
        assert_eq!(stats.letters, 0);
    }

    #[test]
    fn test_plugin_reports_without_editing() {
        let mut buffer = TextBuffer::from_text("one two");
        let mut undo = UndoEngine::new();
        let mut clipboard = ClipboardStack::new();

        let outcome = StatsPlugin
            .execute(&mut buffer, &mut undo, &mut clipboard)
            .unwrap();
        assert_eq!(
            outcome,
            PluginOutcome::Report(String::from(
                "Line count: 1\nWord count: 2\nLetter count: 7"
            ))
        );
        assert_eq!(buffer.lines(), ["one two"]);
        assert!(!undo.can_undo());
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let buffer = TextBuffer::from_text("a b");
        let stats = document_stats(&buffer);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["lines"], 1);
        assert_eq!(json["words"], 2);
        assert_eq!(json["letters"], 3);
    }
}
