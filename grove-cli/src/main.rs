mod calc;
mod config;
mod proc;
mod surface;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use grove::session::{EditorSurface, LanguageRegistry, Session};

use crate::surface::TerminalSurface;

/// Interactive syntax tree playground: edit source text line by line and
/// watch the parse tree, pick a node to map it back to the source.
#[derive(Debug, Parser)]
#[command(name = "grove", version, about = "Interactive syntax tree playground")]
struct Args {
    /// JSON table of external parser commands
    #[arg(long)]
    config: Option<PathBuf>,
    /// Language selected at startup
    #[arg(long)]
    language: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut registry = LanguageRegistry::new();
    registry.add_language(calc::language());
    if let Some(path) = &args.config {
        let table = config::load(path)?;
        for entry in table.languages {
            registry.add_language(proc::bind(entry));
        }
    }

    let mut session =
        Session::new(registry, TerminalSurface::default()).context("failed to start session")?;
    if let Some(language) = &args.language {
        if let Err(error) = session.switch_language(language) {
            println!("{error}; using {:?}", session.active_language());
        }
    }

    println!("grove playground; type to append a line, :help for commands");
    show(&session);
    prompt()?;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        if !handle(&mut session, line.trim_end())? {
            break;
        }
        prompt()?;
    }
    Ok(())
}

fn handle(session: &mut Session<TerminalSurface>, line: &str) -> Result<bool> {
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command {
        ":quit" | ":q" => return Ok(false),
        ":help" => help(),
        ":langs" => {
            for id in session.list_languages() {
                let marker = if id == session.active_language() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {id}");
            }
        }
        ":lang" => {
            if let Err(error) = session.switch_language(argument) {
                println!("{error}; using {:?}", session.active_language());
            }
            show(session);
        }
        ":pick" => pick(session, argument),
        ":load" => match std::fs::read_to_string(argument) {
            Ok(text) => edit(session, text),
            Err(error) => println!("cannot read {argument:?}: {error}"),
        },
        ":clear" => edit(session, String::new()),
        ":tree" => show(session),
        ":text" => {
            println!("{}", session.text());
            let surface = session.surface();
            let selection = surface
                .selection()
                .map(|selection| selection.to_string())
                .unwrap_or_else(|| "none".to_string());
            println!(
                "(editor: {} bytes, selection {}, {})",
                surface.text().len(),
                selection,
                if surface.focused() {
                    "focused"
                } else {
                    "unfocused"
                }
            );
        }
        ":link" => match session.source_url() {
            Some(url) if !url.is_empty() => println!("{url}"),
            _ => println!("(no grammar source link)"),
        },
        _ if command.starts_with(':') => {
            println!("unknown command {command:?}; :help lists commands");
        }
        _ => {
            let mut text = session.text().to_string();
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(line);
            edit(session, text);
        }
    }
    Ok(true)
}

/// The command loop plays the editor: write the text into the surface first,
/// then tell the session about the edit.
fn edit(session: &mut Session<TerminalSurface>, text: String) {
    session.surface_mut().set_text(&text);
    session.text_changed(&text);
    show(session);
}

fn pick(session: &mut Session<TerminalSurface>, argument: &str) {
    let Ok(index) = argument.parse::<usize>() else {
        println!("usage: :pick <row>");
        return;
    };
    match session.activate(index) {
        Some(selection) => {
            let label = session
                .outline()
                .get(index)
                .and_then(|row| row.label())
                .unwrap_or("?");
            println!("{label} -> {selection}");
        }
        None => println!("row {index} is not selectable"),
    }
}

fn show(session: &Session<TerminalSurface>) {
    if session.outline().is_empty() {
        println!("(no tree)");
    } else {
        for (index, row) in session.outline().iter().enumerate() {
            println!("{index:>3} {row}");
        }
    }
    if !session.diagnostics().is_empty() {
        println!("--- diagnostics");
        println!("{}", session.diagnostics().trim_end());
    }
    if let Some(failure) = session.last_failure() {
        println!("(analysis failed: {failure})");
    }
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush().context("failed to flush stdout")
}

fn help() {
    println!("  <text>        append a line to the buffer");
    println!("  :lang <id>    switch language");
    println!("  :langs        list languages, * marks the active one");
    println!("  :pick <row>   select the source span behind an outline row");
    println!("  :load <path>  replace the buffer with a file's contents");
    println!("  :clear        empty the buffer");
    println!("  :tree         reprint the outline and diagnostics");
    println!("  :text         print the buffer and the editor state");
    println!("  :link         print the grammar source link");
    println!("  :quit         leave");
}
