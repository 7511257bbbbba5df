use grove::format::{Analysis, Selection};
use grove::session::{EditorSurface, Language, LanguageRegistry, Session};

struct PrintSurface;

impl EditorSurface for PrintSurface {
    fn set_text(&mut self, _text: &str) {}

    fn set_selection(&mut self, selection: Selection) {
        println!("selection -> {selection}");
    }

    fn focus(&mut self) {
        println!("focus -> editor");
    }
}

fn main() {
    let mut registry = LanguageRegistry::new();
    registry.add_language(Language::new(
        "letters",
        "héllo, wörld",
        "https://example.invalid/grammars/letters",
        |source| {
            let mut tree = format!("Text [0..{}]\n", source.len());
            for (offset, ch) in source.char_indices() {
                if ch.is_alphabetic() {
                    tree.push_str(&format!(
                        "  Letter {} [{}..{}]\n",
                        ch,
                        offset,
                        offset + ch.len_utf8()
                    ));
                }
            }
            Ok(Analysis {
                tree,
                diagnostics: String::new(),
            })
        },
    ));

    let mut session = Session::new(registry, PrintSurface).unwrap();
    for (index, row) in session.outline().iter().enumerate() {
        println!("{index:>2} {row}");
    }

    // select the second letter; é sits on a multi-byte boundary
    session.activate(2);
}
