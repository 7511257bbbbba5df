use std::fmt;

use anyhow::Result;

use crate::format::Analysis;

/// Boxed analyze function of one parser binding.
///
/// Bindings are opaque to the session: source text in, dump and diagnostics
/// out. They are expected to be pure; any error means "no tree available".
pub type AnalyzeFn = Box<dyn Fn(&str) -> Result<Analysis> + Send + Sync>;

/// One selectable language: a parser binding plus its selector metadata.
pub struct Language {
    id: String,
    analyze: AnalyzeFn,
    default_source: String,
    source_url: String,
}

impl Language {
    pub fn new(
        id: impl Into<String>,
        default_source: impl Into<String>,
        source_url: impl Into<String>,
        analyze: impl Fn(&str) -> Result<Analysis> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            analyze: Box::new(analyze),
            default_source: default_source.into(),
            source_url: source_url.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Seed text for the language's buffer before its first edit.
    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// "View grammar source" link target, a function of the id alone.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Run the binding against `source`.
    pub fn analyze(&self, source: &str) -> Result<Analysis> {
        (self.analyze)(source)
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("id", &self.id)
            .field("source_url", &self.source_url)
            .finish_non_exhaustive()
    }
}

/// Ordered language table. The first registration is the default entry;
/// lookups return the first match when ids collide.
#[derive(Debug, Default)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_language(&mut self, language: Language) {
        self.languages.push(language);
    }

    pub fn has_language(&self, id: &str) -> bool {
        self.languages.iter().any(|language| language.id == id)
    }

    pub fn get_language(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|language| language.id == id)
    }

    /// The fallback entry: the first one registered.
    pub fn default_language(&self) -> Option<&Language> {
        self.languages.first()
    }

    pub fn list_languages(&self) -> Vec<&str> {
        self.languages
            .iter()
            .map(|language| language.id.as_str())
            .collect()
    }
}
