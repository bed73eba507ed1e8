//! Uppercases the first letter of every word, in place.

use crate::clipboard::ClipboardStack;
use crate::error::Result;
use crate::model::buffer::TextBuffer;
use crate::model::position::Position;
use crate::model::undo::UndoEngine;
use crate::plugins::{EditorPlugin, PluginOutcome};

/// Rewrites each word's first letter through the buffer's public
/// primitives: move, delete the letter, insert its uppercase form.
///
/// Edits are recorded per primitive, so one replaced letter costs two undo
/// steps. A word starts after whitespace; leading non-letters do not end
/// the word start, so `"3d"` capitalizes to `"3D"`. Letters that are
/// already uppercase (or have no uppercase form) are left alone.
pub struct CapitalizePlugin;

impl EditorPlugin for CapitalizePlugin {
    fn name(&self) -> &str {
        "capitalize"
    }

    fn description(&self) -> &str {
        "Uppercase the first letter of every word"
    }

    fn execute(
        &self,
        buffer: &mut TextBuffer,
        undo: &mut UndoEngine,
        _clipboard: &mut ClipboardStack,
    ) -> Result<PluginOutcome> {
        let mut replaced = 0usize;
        for row in 0..buffer.line_count() {
            // Work from a snapshot; edits below shift the live line.
            let chars: Vec<char> = buffer
                .line(row)
                .map(|line| line.chars().collect())
                .unwrap_or_default();
            let mut space_found = true;
            let mut shift = 0usize;
            for (index, &ch) in chars.iter().enumerate() {
                if ch.is_alphabetic() && space_found {
                    space_found = false;
                    let upper: String = ch.to_uppercase().collect();
                    if upper.chars().ne(std::iter::once(ch)) {
                        let column = index + shift;
                        buffer.move_cursor(Position::new(row, column))?;
                        buffer.delete_after(undo);
                        buffer.insert(&upper, undo);
                        // An uppercase form can be longer than its source.
                        shift += upper.chars().count() - 1;
                        replaced += 1;
                    }
                } else if ch.is_whitespace() {
                    space_found = true;
                }
            }
        }
        tracing::debug!("CapitalizePlugin: replaced {} letters", replaced);
        Ok(PluginOutcome::Report(format!(
            "capitalized {replaced} letter(s)"
        )))
    }
}
