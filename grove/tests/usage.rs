use grove::error::SessionError;
use grove::format::{Analysis, Position, Selection};
use grove::locate::locate;
use grove::session::{EditorSurface, Language, LanguageRegistry, Session};

#[derive(Default)]
struct TestSurface {
    text: String,
    selections: Vec<Selection>,
    focus_count: usize,
}

impl EditorSurface for TestSurface {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selections.push(selection);
    }

    fn focus(&mut self) {
        self.focus_count += 1;
    }
}

/// Emits one `Word` node per whitespace-delimited word, under a `Root` node
/// spanning the whole text. Complains about exclamation marks.
fn words_language() -> Language {
    Language::new(
        "words",
        "alpha beta",
        "https://example.invalid/grammars/words",
        |source| {
            let mut tree = format!("Root [0..{}]\n", source.len());
            let mut word_start = None;
            for (offset, ch) in source.char_indices() {
                match (ch.is_whitespace(), word_start) {
                    (false, None) => word_start = Some(offset),
                    (true, Some(start)) => {
                        tree.push_str(&format!(
                            "  Word {} [{}..{}]\n",
                            &source[start..offset],
                            start,
                            offset
                        ));
                        word_start = None;
                    }
                    _ => {}
                }
            }
            if let Some(start) = word_start {
                tree.push_str(&format!(
                    "  Word {} [{}..{}]\n",
                    &source[start..],
                    start,
                    source.len()
                ));
            }
            let diagnostics = if source.contains('!') {
                "exclamations are not words\n".to_string()
            } else {
                String::new()
            };
            Ok(Analysis { tree, diagnostics })
        },
    )
}

fn failing_language() -> Language {
    Language::new("brittle", "anything", "", |_| {
        Err(anyhow::anyhow!("grammar exploded"))
    })
}

fn panicking_language() -> Language {
    Language::new("volatile", "anything", "", |_| panic!("loose thread"))
}

/// Same dump regardless of the source, including an inert note line.
fn fixed_language() -> Language {
    Language::new(
        "fixed",
        "0123456789",
        "https://example.invalid/grammars/fixed",
        |_| {
            Ok(Analysis {
                tree: "Module [0..10]\n  Stmt x=1 [2..8]\n  note: folded\n".to_string(),
                diagnostics: "1 warning\n".to_string(),
            })
        },
    )
}

fn registry() -> LanguageRegistry {
    let mut registry = LanguageRegistry::new();
    registry.add_language(words_language());
    registry.add_language(failing_language());
    registry.add_language(panicking_language());
    registry
}

#[test]
fn seeds_default_language_on_start() {
    let session = Session::new(registry(), TestSurface::default()).unwrap();
    assert_eq!(session.active_language(), "words");
    assert_eq!(session.text(), "alpha beta");
    assert_eq!(session.surface().text, "alpha beta");
    let labels: Vec<_> = session
        .outline()
        .iter()
        .filter_map(|row| row.label())
        .collect();
    assert_eq!(labels, ["Root", "Word", "Word"]);
    assert!(session.diagnostics().is_empty());
    assert!(session.last_failure().is_none());
}

#[test]
fn empty_registry_is_rejected() {
    assert!(matches!(
        Session::new(LanguageRegistry::new(), TestSurface::default()),
        Err(SessionError::EmptyRegistry)
    ));
}

#[test]
fn registry_metadata_is_exposed() {
    let session = Session::new(registry(), TestSurface::default()).unwrap();
    assert_eq!(session.list_languages(), ["words", "brittle", "volatile"]);
    assert_eq!(
        session.source_url(),
        Some("https://example.invalid/grammars/words")
    );
}

#[test]
fn text_change_rerenders_the_outline() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    session.text_changed("solo");
    assert_eq!(session.outline().len(), 2);
    assert_eq!(session.outline()[1].to_string(), "  Word solo [0..4]");

    session.text_changed("solo duet");
    assert_eq!(session.outline().len(), 3);
}

#[test]
fn edits_survive_language_switches() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    session.text_changed("one two three");

    session.switch_language("brittle").unwrap();
    assert_eq!(session.active_language(), "brittle");
    assert_eq!(session.text(), "anything");
    assert_eq!(session.surface().text, "anything");
    session.text_changed("broken but mine");

    session.switch_language("words").unwrap();
    assert_eq!(session.text(), "one two three");
    assert_eq!(session.surface().text, "one two three");
    assert_eq!(session.buffer("brittle"), Some("broken but mine"));
}

#[test]
fn activation_selects_through_the_surface() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    session.text_changed("alpha beta");

    // rows: 0 Root, 1 "alpha", 2 "beta"
    let selection = session.activate(2).unwrap();
    assert_eq!(selection, locate("alpha beta", 6, 10));
    assert_eq!(selection.anchor, Position::new(1, 7));
    assert_eq!(selection.head, Position::new(1, 11));
    assert_eq!(session.surface().selections, vec![selection]);
    assert_eq!(session.surface().focus_count, 1);
}

#[test]
fn fixed_dump_resolves_against_the_current_buffer() {
    let mut registry = LanguageRegistry::new();
    registry.add_language(fixed_language());
    let mut session = Session::new(registry, TestSurface::default()).unwrap();

    assert_eq!(session.outline().len(), 3);
    assert_eq!(session.diagnostics(), "1 warning\n");

    let selection = session.activate(1).unwrap();
    assert_eq!(selection, locate("0123456789", 2, 8));
    assert_eq!(selection.anchor, Position::new(1, 3));
    assert_eq!(selection.head, Position::new(1, 9));

    // inert note row and out-of-range index
    assert!(session.activate(2).is_none());
    assert!(session.activate(17).is_none());

    // same offsets resolve differently against the new buffer
    session.text_changed("ab\ncdefgh");
    let moved = session.activate(1).unwrap();
    assert_eq!(moved.anchor, Position::new(1, 3));
    assert_eq!(moved.head, Position::new(2, 6));
}

#[test]
fn analyze_error_clears_view_and_keeps_the_edit() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    session.switch_language("brittle").unwrap();
    assert!(session.outline().is_empty());
    assert!(session.diagnostics().is_empty());

    session.text_changed("precious edit");
    assert_eq!(session.text(), "precious edit");
    assert!(session.outline().is_empty());
    let failure = session.last_failure().unwrap();
    assert!(failure.to_string().contains("brittle"));
    assert!(failure.to_string().contains("grammar exploded"));

    // a healthy refresh clears the recorded failure
    session.switch_language("words").unwrap();
    assert!(session.last_failure().is_none());
    assert!(!session.outline().is_empty());
}

#[test]
fn analyze_panic_is_contained() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    session.switch_language("volatile").unwrap();
    assert_eq!(session.active_language(), "volatile");
    assert_eq!(session.text(), "anything");
    assert!(session.outline().is_empty());
    assert!(session.diagnostics().is_empty());
    let failure = session.last_failure().unwrap();
    assert!(failure.to_string().contains("loose thread"));
}

#[test]
fn unknown_language_falls_back_to_default() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    let error = session.switch_language("klingon").unwrap_err();
    assert!(matches!(error, SessionError::UnknownLanguage(id) if id == "klingon"));
    assert_eq!(session.active_language(), "words");
    assert!(!session.outline().is_empty());
}

#[test]
fn diagnostics_are_shown_verbatim_next_to_the_tree() {
    let mut session = Session::new(registry(), TestSurface::default()).unwrap();
    session.text_changed("hey!");
    assert_eq!(session.diagnostics(), "exclamations are not words\n");
    // the tree still rendered; diagnostics are not exclusive with it
    assert_eq!(session.outline().len(), 2);
}
