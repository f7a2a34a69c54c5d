//! Property-based invariant tests for the versioned editors.
//!
//! For arbitrary operation sequences:
//!
//! 1. A change leaves the redo history empty (the unbounded editor skips
//!    identical content entirely).
//! 2. The bounded editor never holds more than `capacity - 1` undo steps.
//! 3. Undo followed by redo restores content and both counters.
//! 4. A failed operation changes nothing.
//! 5. The bounded editor agrees with the unbounded one while under capacity.

use std::num::NonZeroUsize;

use memo_pad_history::{LimitedVersionedEditor, VersionedEditor, VersionedText};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Change(String),
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[a-c]{0,2}".prop_map(Op::Change),
        2 => Just(Op::Undo),
        2 => Just(Op::Redo),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..60)
}

fn apply(editor: &mut dyn VersionedText, op: &Op) -> bool {
    match op {
        Op::Change(text) => {
            editor.change_content(text);
            true
        }
        Op::Undo => editor.undo().is_ok(),
        Op::Redo => editor.redo().is_ok(),
    }
}

fn snapshot_of(editor: &dyn VersionedText) -> (String, usize, usize) {
    (
        editor.content().to_owned(),
        editor.undo_count(),
        editor.redo_count(),
    )
}

fn editors(capacity: usize) -> Vec<Box<dyn VersionedText>> {
    vec![
        Box::new(VersionedEditor::new()),
        Box::new(LimitedVersionedEditor::new(
            NonZeroUsize::new(capacity).unwrap(),
        )),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. A change clears redo
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unbounded_change_clears_redo_unless_identical(ops in ops_strategy()) {
        let mut editor = VersionedEditor::new();
        for op in &ops {
            let before = snapshot_of(&editor);
            apply(&mut editor, op);
            if let Op::Change(text) = op {
                if *text == before.0 {
                    prop_assert_eq!(snapshot_of(&editor), before);
                } else {
                    prop_assert_eq!(editor.redo_count(), 0);
                    prop_assert_eq!(editor.undo_count(), before.1 + 1);
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn bounded_change_always_clears_redo(ops in ops_strategy(), capacity in 1usize..8) {
        let mut editor = LimitedVersionedEditor::new(NonZeroUsize::new(capacity).unwrap());
        for op in &ops {
            apply(&mut editor, op);
            if let Op::Change(_) = op {
                prop_assert_eq!(editor.redo_count(), 0);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Bounded depth
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounded_undo_depth_never_exceeds_capacity(ops in ops_strategy(), capacity in 1usize..8) {
        let mut editor = LimitedVersionedEditor::new(NonZeroUsize::new(capacity).unwrap());
        for op in &ops {
            apply(&mut editor, op);
            prop_assert!(
                editor.undo_count() <= capacity - 1,
                "undo_count {} exceeds depth {}",
                editor.undo_count(),
                capacity - 1
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Undo/redo round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn undo_then_redo_restores_state(ops in ops_strategy(), capacity in 2usize..8) {
        for mut editor in editors(capacity) {
            for op in &ops {
                apply(editor.as_mut(), op);
            }
            let before = snapshot_of(editor.as_ref());
            if editor.undo().is_ok() {
                editor.redo().unwrap();
                prop_assert_eq!(snapshot_of(editor.as_ref()), before);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Failures are atomic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn failed_operations_change_nothing(ops in ops_strategy(), capacity in 1usize..8) {
        for mut editor in editors(capacity) {
            for op in &ops {
                let before = snapshot_of(editor.as_ref());
                if !apply(editor.as_mut(), op) {
                    prop_assert_eq!(snapshot_of(editor.as_ref()), before);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Bounded and unbounded agree under capacity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounded_matches_unbounded_when_large_enough(
        texts in prop::collection::vec("[a-z]{1,4}", 0..20),
        undos in 0usize..25,
    ) {
        // Distinct consecutive content so the equality short-circuit never fires.
        let mut unbounded = VersionedEditor::new();
        let mut bounded = LimitedVersionedEditor::new(NonZeroUsize::new(64).unwrap());
        for (i, text) in texts.iter().enumerate() {
            let text = format!("{i}:{text}");
            unbounded.change_content(&text);
            bounded.change_content(&text);
        }
        for _ in 0..undos {
            prop_assert_eq!(unbounded.undo().is_ok(), bounded.undo().is_ok());
        }
        prop_assert_eq!(snapshot_of(&unbounded), snapshot_of(&bounded));
    }
}
