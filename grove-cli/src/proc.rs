use std::io::Write;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use grove::format::Analysis;
use grove::session::Language;

use crate::config::LanguageEntry;

/// Wrap an external parser command as a registry entry.
pub fn bind(entry: LanguageEntry) -> Language {
    let LanguageEntry {
        id,
        command,
        default_source,
        source_url,
    } = entry;
    Language::new(id, default_source, source_url, move |source| {
        run(&command, source)
    })
}

/// One analyze round trip: source on stdin, dump on stdout, diagnostics on
/// stderr. A non-zero exit is not a failure by itself; parsers routinely
/// exit non-zero on syntax errors while still producing both streams.
fn run(argv: &[String], source: &str) -> Result<Analysis> {
    let (program, args) = argv.split_first().context("empty parser command")?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn parser {program:?}"))?;

    child
        .stdin
        .take()
        .context("parser stdin unavailable")?
        .write_all(source.as_bytes())
        .with_context(|| format!("failed to write source to parser {program:?}"))?;

    let output = child
        .wait_with_output()
        .with_context(|| format!("failed to collect output of parser {program:?}"))?;
    if !output.status.success() {
        log::warn!("parser {program:?} exited with {}", output.status);
    }

    let tree = String::from_utf8(output.stdout)
        .with_context(|| format!("parser {program:?} emitted a non-UTF-8 dump"))?;
    let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
    Ok(Analysis { tree, diagnostics })
}
