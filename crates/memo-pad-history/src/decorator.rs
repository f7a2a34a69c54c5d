/// Versioning as a wrapper: adds undo/redo to any value that can save and
/// restore its own state.
use crate::error::EditorError;
use crate::history::History;
use crate::snapshot::{EditorState, Snapshot};
use crate::VersionedText;

/// A value that can capture its state as a memento and restore it later.
pub trait Originator {
    type Memento;

    fn save(&self) -> Self::Memento;
    fn restore(&mut self, memento: Self::Memento);
}

/// Plain text editor without any history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextEditor {
    content: String,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn change_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }
}

impl Originator for TextEditor {
    type Memento = Snapshot;

    fn save(&self) -> Snapshot {
        Snapshot::new(self.content.clone())
    }

    fn restore(&mut self, memento: Snapshot) {
        self.content = memento.into_content();
    }
}

/// Wraps an [`Originator`] and records a memento before every mutation made
/// through [`Versioned::apply`].
pub struct Versioned<T: Originator> {
    inner: T,
    history: History<T::Memento>,
}

impl<T: Originator> std::fmt::Debug for Versioned<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Versioned")
            .field("undo_count", &self.history.undo_count())
            .field("redo_count", &self.history.redo_count())
            .finish()
    }
}

impl<T: Originator> Versioned<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            history: History::default(),
        }
    }

    /// The wrapped value.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    /// Saves the current state, clears redo, then runs `mutate`.
    pub fn apply<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> R {
        self.history.record(self.inner.save());
        mutate(&mut self.inner)
    }

    /// # Errors
    ///
    /// Returns [`EditorError::NoHistory`] if there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        let inner = &mut self.inner;
        self.history.undo(|prev| swap_state(inner, prev))
    }

    /// # Errors
    ///
    /// Returns [`EditorError::NoHistory`] if there is nothing to redo.
    pub fn redo(&mut self) -> Result<(), EditorError> {
        let inner = &mut self.inner;
        self.history.redo(|next| swap_state(inner, next))
    }
}

fn swap_state<T: Originator>(inner: &mut T, memento: T::Memento) -> T::Memento {
    let current = inner.save();
    inner.restore(memento);
    current
}

impl Versioned<TextEditor> {
    /// Rebuilds a wrapped editor from a persisted state.
    pub fn from_state(state: EditorState) -> Self {
        let mut inner = TextEditor::new();
        inner.change_content(state.content);
        Self {
            inner,
            history: History::from_parts(state.undo, state.redo),
        }
    }
}

/// Records every change, including ones that leave the content unchanged.
impl VersionedText for Versioned<TextEditor> {
    fn content(&self) -> &str {
        self.inner.content()
    }

    fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    fn change_content(&mut self, content: &str) {
        self.apply(|editor| editor.change_content(content));
    }

    fn undo(&mut self) -> Result<(), EditorError> {
        Versioned::undo(self)
    }

    fn redo(&mut self) -> Result<(), EditorError> {
        Versioned::redo(self)
    }

    fn to_state(&self) -> EditorState {
        EditorState {
            content: self.inner.content().to_owned(),
            undo: self.history.undo_stack().clone(),
            redo: self.history.redo_stack().to_vec(),
            capacity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_editor_has_no_history() {
        let mut editor = TextEditor::new();
        editor.change_content("a");
        editor.change_content("b");
        assert_eq!(editor.content(), "b");
    }

    #[test]
    fn test_decorated_editor_walkthrough() {
        let mut editor = Versioned::new(TextEditor::new());
        assert!(VersionedText::undo(&mut editor).is_err());

        editor.change_content("Version 1");
        editor.change_content("Version 2");
        assert_eq!((editor.undo_count(), editor.redo_count()), (2, 0));

        editor.undo().expect("undo");
        assert_eq!(VersionedText::content(&editor), "Version 1");

        editor.change_content("Version 3");
        assert_eq!((editor.undo_count(), editor.redo_count()), (2, 0));

        editor.undo().expect("undo");
        editor.undo().expect("undo");
        assert_eq!(VersionedText::content(&editor), "");
        assert_eq!(editor.redo_count(), 2);

        editor.redo().expect("redo");
        editor.redo().expect("redo");
        assert_eq!(VersionedText::content(&editor), "Version 3");
    }

    #[test]
    fn test_decorated_editor_records_equal_content() {
        let mut editor = Versioned::new(TextEditor::new());
        editor.change_content("x");
        editor.change_content("x");
        assert_eq!(editor.undo_count(), 2);
    }

    #[test]
    fn test_into_inner_returns_wrapped_value() {
        let mut editor = Versioned::new(TextEditor::new());
        editor.change_content("kept");
        assert_eq!(editor.into_inner().content(), "kept");
    }

    /// Any originator can be versioned, not only text.
    #[derive(Default)]
    struct Counter {
        value: i64,
    }

    impl Originator for Counter {
        type Memento = i64;

        fn save(&self) -> i64 {
            self.value
        }

        fn restore(&mut self, memento: i64) {
            self.value = memento;
        }
    }

    #[test]
    fn test_apply_returns_closure_result() {
        let mut counter = Versioned::new(Counter::default());
        let doubled = counter.apply(|c| {
            c.value += 21;
            c.value * 2
        });
        assert_eq!(doubled, 42);
        counter.apply(|c| c.value += 1);
        assert_eq!(counter.inner().value, 22);

        counter.undo().expect("undo");
        assert_eq!(counter.inner().value, 21);
        counter.undo().expect("undo");
        assert_eq!(counter.inner().value, 0);
        counter.redo().expect("redo");
        assert_eq!(counter.inner().value, 21);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut editor = Versioned::new(TextEditor::new());
        editor.change_content("a");
        editor.change_content("b");
        editor.undo().expect("undo");

        let mut restored = Versioned::<TextEditor>::from_state(editor.to_state());
        assert_eq!(VersionedText::content(&restored), "a");
        restored.redo().expect("redo");
        assert_eq!(VersionedText::content(&restored), "b");
    }
}
