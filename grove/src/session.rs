mod registry;
mod surface;

use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::anyhow;

use crate::error::{Result, SessionError};
use crate::format::{Analysis, Selection};
use crate::locate::locate;
use crate::outline::{render, OutlineRow};
use crate::parser::records;

pub use self::registry::{AnalyzeFn, Language, LanguageRegistry};
pub use self::surface::EditorSurface;

/// Session controller of the playground.
///
/// Owns the language registry, one buffer per visited language, the active
/// language marker and the most recent render, and drives a host editor
/// through [`EditorSurface`]. Both triggers (`switch_language`,
/// `text_changed`) converge on one refresh pipeline that analyzes the
/// active buffer and swaps outline and diagnostics in wholesale.
pub struct Session<S: EditorSurface> {
    registry: LanguageRegistry,
    surface: S,
    buffers: HashMap<String, String>,
    active: String,
    outline: Vec<OutlineRow>,
    diagnostics: String,
    last_failure: Option<SessionError>,
}

impl<S: EditorSurface> Session<S> {
    /// Start on the registry's default language: seed its buffer, push it at
    /// the editor and run the first refresh.
    pub fn new(registry: LanguageRegistry, surface: S) -> Result<Self> {
        let default = registry
            .default_language()
            .ok_or(SessionError::EmptyRegistry)?;
        let active = default.id().to_string();
        let seed = default.default_source().to_string();

        let mut session = Self {
            registry,
            surface,
            buffers: HashMap::new(),
            active,
            outline: Vec::new(),
            diagnostics: String::new(),
            last_failure: None,
        };
        session.buffers.insert(session.active.clone(), seed);
        session.surface.set_text(&session.buffers[&session.active]);
        session.refresh();
        Ok(session)
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn active_language(&self) -> &str {
        &self.active
    }

    pub fn list_languages(&self) -> Vec<&str> {
        self.registry.list_languages()
    }

    /// Buffer of the active language.
    pub fn text(&self) -> &str {
        self.buffers
            .get(&self.active)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Last-known source for `id`, if that language was ever visited.
    pub fn buffer(&self, id: &str) -> Option<&str> {
        self.buffers.get(id).map(String::as_str)
    }

    /// Rows of the most recent render; empty when analysis failed.
    pub fn outline(&self) -> &[OutlineRow] {
        &self.outline
    }

    /// Verbatim diagnostics of the most recent analyze; empty means clean.
    pub fn diagnostics(&self) -> &str {
        &self.diagnostics
    }

    /// Grammar source link of the active language.
    pub fn source_url(&self) -> Option<&str> {
        self.registry
            .get_language(&self.active)
            .map(Language::source_url)
    }

    /// Typed failure behind an empty view, if the last refresh degraded.
    pub fn last_failure(&self) -> Option<&SessionError> {
        self.last_failure.as_ref()
    }

    /// Make `id` the active language, seeding its buffer on first visit, and
    /// refresh. An unknown id falls back to the default language; the switch
    /// still happens, and the mismatch is reported back.
    pub fn switch_language(&mut self, id: &str) -> Result<()> {
        let (id, outcome) = match self.registry.get_language(id) {
            Some(language) => (language.id().to_string(), Ok(())),
            None => {
                let fallback = self
                    .registry
                    .default_language()
                    .ok_or(SessionError::EmptyRegistry)?;
                log::warn!(
                    "language {:?} not found, falling back to {:?}",
                    id,
                    fallback.id()
                );
                (
                    fallback.id().to_string(),
                    Err(SessionError::UnknownLanguage(id.to_string())),
                )
            }
        };

        if let Some(language) = self.registry.get_language(&id) {
            self.buffers
                .entry(id.clone())
                .or_insert_with(|| language.default_source().to_string());
        }
        self.active = id;
        self.surface.set_text(&self.buffers[&self.active]);
        self.refresh();
        outcome
    }

    /// Record an edit of the active buffer and refresh. The text came from
    /// the editor, so nothing is pushed back at the surface.
    pub fn text_changed(&mut self, text: &str) {
        self.buffers.insert(self.active.clone(), text.to_string());
        self.refresh();
    }

    /// Resolve the range behind outline row `index` against the active buffer
    /// and drive the editor's selection and focus. Inert rows and bad indices
    /// activate nothing.
    pub fn activate(&mut self, index: usize) -> Option<Selection> {
        let range = self.outline.get(index)?.range()?;
        let text = self.buffers.get(&self.active)?;
        let selection = locate(text, range.start, range.end);
        self.surface.set_selection(selection);
        self.surface.focus();
        Some(selection)
    }

    fn refresh(&mut self) {
        let analysis = self.analyze_active();
        self.outline = render(records(&analysis.tree));
        self.diagnostics = analysis.diagnostics;
    }

    /// Run the active binding on the active buffer. Errors and panics are
    /// contained here: the view degrades to empty outputs and the typed
    /// failure stays observable until the next successful refresh.
    fn analyze_active(&mut self) -> Analysis {
        let Some(language) = self.registry.get_language(&self.active) else {
            return Analysis::default();
        };
        let text = self
            .buffers
            .get(&self.active)
            .map(String::as_str)
            .unwrap_or_default();

        match catch_unwind(AssertUnwindSafe(|| language.analyze(text))) {
            Ok(Ok(analysis)) => {
                self.last_failure = None;
                analysis
            }
            Ok(Err(source)) => self.analyze_failed(source),
            Err(payload) => {
                let message = panic_message(payload);
                self.analyze_failed(anyhow!("analyze panicked: {message}"))
            }
        }
    }

    fn analyze_failed(&mut self, source: anyhow::Error) -> Analysis {
        let failure = SessionError::AnalyzeFailed {
            language: self.active.clone(),
            source,
        };
        log::error!("{failure}");
        self.last_failure = Some(failure);
        Analysis::default()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
