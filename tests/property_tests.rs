// Property-based tests using proptest
// Each test drives a buffer and undo engine through a random operation
// sequence and then checks a model invariant

use proptest::prelude::*;
use scribe::{Position, Range, TextBuffer, UndoEngine};

/// Random buffer operations
#[derive(Debug, Clone)]
enum EditOp {
    TypeString(String),
    Enter,
    Backspace,
    DeleteForward,
    Left,
    Right,
    Up,
    Down,
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    DeleteSelection,
}

impl EditOp {
    /// Apply this operation to the buffer
    fn apply(&self, buffer: &mut TextBuffer, undo: &mut UndoEngine) {
        match self {
            Self::TypeString(text) => {
                buffer.insert(text, undo);
            }
            Self::Enter => {
                buffer.insert("\n", undo);
            }
            Self::Backspace => buffer.delete_before(undo),
            Self::DeleteForward => buffer.delete_after(undo),
            Self::Left => buffer.move_left(),
            Self::Right => buffer.move_right(),
            Self::Up => buffer.move_up(),
            Self::Down => buffer.move_down(),
            Self::SelectLeft => buffer.select_left(),
            Self::SelectRight => buffer.select_right(),
            Self::SelectUp => buffer.select_up(),
            Self::SelectDown => buffer.select_down(),
            Self::DeleteSelection => {
                if let Some(selection) = buffer.selection() {
                    buffer.delete_range(selection, undo).unwrap();
                }
            }
        }
    }
}

/// Strategy covering every operation, motions and selections included
fn edit_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        // Typing operations (more common)
        3 => "[a-zA-Z0-9 ]{1,10}".prop_map(EditOp::TypeString),
        1 => Just(EditOp::Enter),
        // Editing operations
        2 => Just(EditOp::Backspace),
        2 => Just(EditOp::DeleteForward),
        1 => Just(EditOp::DeleteSelection),
        // Navigation operations
        1 => Just(EditOp::Left),
        1 => Just(EditOp::Right),
        1 => Just(EditOp::Up),
        1 => Just(EditOp::Down),
        // Selection operations
        1 => Just(EditOp::SelectLeft),
        1 => Just(EditOp::SelectRight),
        1 => Just(EditOp::SelectUp),
        1 => Just(EditOp::SelectDown),
    ]
}

/// Strategy restricted to recorded edits, for the exact cursor property
fn typing_op_strategy() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        3 => "[a-zA-Z0-9 ]{1,10}".prop_map(EditOp::TypeString),
        1 => Just(EditOp::Enter),
        2 => Just(EditOp::Backspace),
        1 => Just(EditOp::DeleteForward),
    ]
}

/// Random initial documents of a few short lines
fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z ]{0,8}", 1..5).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 100,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Property test: undoing everything restores the original line sequence
    #[test]
    fn prop_undo_restores_lines(
        doc in document_strategy(),
        ops in prop::collection::vec(edit_op_strategy(), 1..40),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();
        let original = buffer.lines().to_vec();

        for op in &ops {
            op.apply(&mut buffer, &mut undo);
        }
        while undo.undo(&mut buffer) {}

        prop_assert_eq!(
            buffer.lines(),
            original.as_slice(),
            "buffer diverged after undoing {} operations\nOperations: {:#?}",
            ops.len(),
            ops
        );
        prop_assert!(!undo.can_undo());
    }

    /// Property test: for pure edit sequences, undoing everything also
    /// restores the cursor and leaves no selection
    #[test]
    fn prop_undo_restores_cursor_for_edit_sequences(
        doc in document_strategy(),
        ops in prop::collection::vec(typing_op_strategy(), 1..40),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();
        let original = buffer.lines().to_vec();
        let cursor = buffer.cursor();

        for op in &ops {
            op.apply(&mut buffer, &mut undo);
        }
        while undo.undo(&mut buffer) {}

        prop_assert_eq!(buffer.lines(), original.as_slice());
        prop_assert_eq!(buffer.cursor(), cursor, "cursor not restored\nOperations: {:#?}", ops);
        prop_assert_eq!(buffer.selection(), None);
    }

    /// Property test: redoing after a full unwind reproduces the final lines
    #[test]
    fn prop_redo_replays_to_same_lines(
        doc in document_strategy(),
        ops in prop::collection::vec(edit_op_strategy(), 1..40),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();
        let original = buffer.lines().to_vec();

        for op in &ops {
            op.apply(&mut buffer, &mut undo);
        }
        let edited = buffer.lines().to_vec();

        let mut undone = 0usize;
        while undo.undo(&mut buffer) {
            undone += 1;
        }
        prop_assert_eq!(buffer.lines(), original.as_slice());

        for _ in 0..undone {
            prop_assert!(undo.redo(&mut buffer));
        }
        prop_assert_eq!(
            buffer.lines(),
            edited.as_slice(),
            "redo diverged after {} replayed commands\nOperations: {:#?}",
            undone,
            ops
        );
        prop_assert!(!undo.can_redo());
    }

    /// Property test: undo immediately followed by redo leaves no trace of
    /// either on buffer state
    #[test]
    fn prop_undo_redo_single_edit_is_noop(
        doc in document_strategy(),
        op in typing_op_strategy(),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();
        op.apply(&mut buffer, &mut undo);

        let lines = buffer.lines().to_vec();
        let cursor = buffer.cursor();

        // Boundary deletes record nothing, so there may be nothing to undo.
        if undo.undo(&mut buffer) {
            prop_assert!(undo.redo(&mut buffer));
            prop_assert_eq!(buffer.lines(), lines.as_slice(), "lines changed by {:?}", op);
            prop_assert_eq!(buffer.cursor(), cursor, "cursor changed by {:?}", op);
            prop_assert_eq!(buffer.selection(), None);
        }
    }

    /// Property test: a new edit after an undo discards the redo branch
    #[test]
    fn prop_new_edit_discards_redo(
        doc in document_strategy(),
        ops in prop::collection::vec(edit_op_strategy(), 1..20),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();

        for op in &ops {
            op.apply(&mut buffer, &mut undo);
        }
        buffer.insert("x", &mut undo);

        prop_assert!(undo.undo(&mut buffer));
        prop_assert!(undo.can_redo());

        buffer.insert("y", &mut undo);
        prop_assert!(!undo.can_redo());

        let held = buffer.lines().to_vec();
        prop_assert!(!undo.redo(&mut buffer));
        prop_assert_eq!(buffer.lines(), held.as_slice());
    }

    /// Property test: the cursor and any selection stay inside the document
    /// after every operation
    #[test]
    fn prop_cursor_and_selection_stay_valid(
        doc in document_strategy(),
        ops in prop::collection::vec(edit_op_strategy(), 1..40),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();

        for op in &ops {
            op.apply(&mut buffer, &mut undo);

            let cursor = buffer.cursor();
            prop_assert!(
                cursor.row < buffer.line_count(),
                "cursor row {} outside document after {:?}",
                cursor.row,
                op
            );
            prop_assert!(
                cursor.column <= buffer.line_len(cursor.row),
                "cursor column {} past line end after {:?}",
                cursor.column,
                op
            );

            if let Some(selection) = buffer.selection() {
                prop_assert!(!selection.is_empty(), "empty selection stored after {:?}", op);
                prop_assert!(selection.start() <= selection.end());
                for position in [selection.start(), selection.end()] {
                    prop_assert!(position.row < buffer.line_count());
                    prop_assert!(position.column <= buffer.line_len(position.row));
                }
            }
        }
    }

    /// Property test: deleting a range and reinserting the captured text at
    /// the same position is an identity
    #[test]
    fn prop_delete_insert_round_trip(
        doc in document_strategy(),
        row_seeds in (0usize..100, 0usize..100),
        column_seeds in (0usize..100, 0usize..100),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();
        let original = buffer.lines().to_vec();

        let row_a = row_seeds.0 % buffer.line_count();
        let row_b = row_seeds.1 % buffer.line_count();
        let a = Position::new(row_a, column_seeds.0 % (buffer.line_len(row_a) + 1));
        let b = Position::new(row_b, column_seeds.1 % (buffer.line_len(row_b) + 1));
        let range = Range::new(a, b);

        let removed = buffer.text_in_range(range).unwrap();
        buffer.delete_range(range, &mut undo).unwrap();
        if !range.is_empty() {
            prop_assert_eq!(buffer.cursor(), range.start());
        }

        let end = buffer.insert(&removed, &mut undo);
        prop_assert_eq!(buffer.lines(), original.as_slice());
        if !range.is_empty() {
            prop_assert_eq!(end, range.end());
        }
    }

    /// Property test: range construction normalizes its corners
    #[test]
    fn prop_range_normalizes(
        a_row in 0usize..50, a_col in 0usize..50,
        b_row in 0usize..50, b_col in 0usize..50,
    ) {
        let a = Position::new(a_row, a_col);
        let b = Position::new(b_row, b_col);
        let range = Range::new(a, b);

        prop_assert!(range.start() <= range.end());
        prop_assert_eq!(range.start(), a.min(b));
        prop_assert_eq!(range.end(), a.max(b));
    }

    /// Property test: the save format is always the lines joined by newlines
    #[test]
    fn prop_contents_matches_lines(
        doc in document_strategy(),
        ops in prop::collection::vec(edit_op_strategy(), 1..20),
    ) {
        let mut buffer = TextBuffer::from_text(&doc);
        let mut undo = UndoEngine::new();

        for op in &ops {
            op.apply(&mut buffer, &mut undo);
        }

        prop_assert_eq!(buffer.contents(), buffer.lines().join("\n"));
    }
}
