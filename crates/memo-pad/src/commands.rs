// Editor actions shared by the one-shot subcommands and script mode.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use memo_pad_history::{EditorError, EditorSession, VersionedText};

/// A single editor action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Change(String),
    Undo(usize),
    Redo(usize),
    Show,
}

/// Parses one script line.
///
/// Blank lines and lines starting with `#` yield `None`. Syntax:
/// `change <text>`, `undo [n]`, `redo [n]`, `show`.
pub fn parse_line(line: &str) -> Result<Option<Action>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let action = match word {
        "change" => Action::Change(rest.to_string()),
        "undo" => Action::Undo(parse_steps(rest)?),
        "redo" => Action::Redo(parse_steps(rest)?),
        "show" if rest.trim().is_empty() => Action::Show,
        "show" => bail!("show takes no arguments"),
        other => bail!("Unknown command: {other}"),
    };
    Ok(Some(action))
}

fn parse_steps(arg: &str) -> Result<usize> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Ok(1);
    }
    arg.parse()
        .with_context(|| format!("Invalid step count: {arg}"))
}

/// Applies an action to the session.
///
/// Multi-step undo/redo stops at the first step that fails; the steps
/// before it stay applied.
pub fn apply(session: &mut EditorSession, action: &Action) -> Result<(), EditorError> {
    match action {
        Action::Change(text) => session.change_content(text),
        Action::Undo(steps) => {
            for _ in 0..*steps {
                session.undo()?;
            }
        }
        Action::Redo(steps) => {
            for _ in 0..*steps {
                session.redo()?;
            }
        }
        Action::Show => {}
    }
    Ok(())
}

/// Renders the editor content followed by a status line.
pub fn render(editor: &dyn VersionedText) -> String {
    format!(
        "{}\n[undo {} | redo {} | {:?}]",
        editor.content(),
        editor.undo_count(),
        editor.redo_count(),
        editor.state()
    )
}

/// Runs one action per input line, printing the editor after each `show`.
///
/// Editor errors are reported on `output` and do not stop the script.
/// Returns the number of lines that failed.
pub fn run_script(
    session: &mut EditorSession,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<usize> {
    let mut failed = 0;
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read script input")?;
        let line_no = index + 1;

        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                failed += 1;
                writeln!(output, "line {line_no}: {e}")?;
                continue;
            }
        };

        if let Err(e) = apply(session, &action) {
            failed += 1;
            writeln!(output, "line {line_no}: {e}")?;
            continue;
        }
        if action == Action::Show {
            writeln!(output, "{}", render(session.editor()))?;
        }
    }
    tracing::debug!(failed, revision = session.revision(), "Script finished");
    Ok(failed)
}
