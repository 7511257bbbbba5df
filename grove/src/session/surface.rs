use crate::format::Selection;

/// Editor widget the session drives.
///
/// The session only pushes state at the editor through this trait: buffer
/// text on language switches, selection and focus on node activation. Edits
/// travel the opposite way, through the session's `text_changed` trigger.
pub trait EditorSurface {
    /// Replace the editor's buffer contents.
    fn set_text(&mut self, text: &str);

    /// Apply an anchor/head span in 1-based line/character coordinates.
    fn set_selection(&mut self, selection: Selection);

    /// Give the editor input focus.
    fn focus(&mut self);
}
