use grove::format::Selection;
use grove::session::EditorSurface;

/// Editor stand-in for the terminal host. Remembers whatever the session
/// pushed at it; the command loop plays the user typing into it.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    text: String,
    selection: Option<Selection>,
    focused: bool,
}

impl TerminalSurface {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn focused(&self) -> bool {
        self.focused
    }
}

impl EditorSurface for TerminalSurface {
    fn set_text(&mut self, text: &str) {
        log::debug!("editor text <- {} bytes", text.len());
        self.text.clear();
        self.text.push_str(text);
        self.selection = None;
    }

    fn set_selection(&mut self, selection: Selection) {
        log::debug!("editor selection <- {selection}");
        self.selection = Some(selection);
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}
