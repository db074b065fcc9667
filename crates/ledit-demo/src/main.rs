//! Interactive smoke-test binary for `ledit`, the equivalent of the
//! teacher's `vtio/examples/vtev.rs` raw-mode demo. Lives at
//! `crates/ledit-demo` (a real crate) rather than under the read-only
//! `examples/` retrieval pack.
//!
//! Usage:
//!   `ledit-demo`              interactive line editor with history and
//!                             a toy completion callback
//!   `ledit-demo --keycodes`   terse key-code debug mode: decode raw
//!                             input and print each event, no editing

use std::io::Write as _;
use std::path::PathBuf;

use ledit::LineEditor;
use ledit_key::{DecodeOutcome, KeyDecoder, TerseDisplay};
use ledit_term::{DefaultTerminal, TerminalPort};

fn history_path() -> PathBuf {
    std::env::var_os("LEDIT_DEMO_HISTORY")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("ledit-demo-history"))
}

/// `spec.md` §9's key-code debug mode: decode and print raw key events
/// without touching the edit buffer. Exits on `Ctrl-C` or EOF.
fn run_keycodes() -> std::io::Result<()> {
    let mut term = DefaultTerminal::default();
    if !term.is_tty() {
        eprintln!("--keycodes requires a terminal on stdin");
        return Ok(());
    }
    term.enter_raw().expect("enter raw mode");
    println!("keycode debug mode — press keys, Ctrl-C to exit\r");
    let decoder = KeyDecoder::default();
    loop {
        match decoder.next_key(&mut term) {
            Ok(DecodeOutcome::Key(key)) => {
                println!("{}\r", TerseDisplay(&key));
                if matches!(key, ledit_key::Key::Ctrl('c')) {
                    break;
                }
            }
            Ok(DecodeOutcome::Eof) => break,
            Err(err) => {
                eprintln!("read error: {err}\r");
                break;
            }
        }
    }
    let _ = term.leave_raw();
    Ok(())
}

fn run_editor() {
    let term = DefaultTerminal::default();
    let mut editor = LineEditor::new(term);

    let path = history_path();
    if let Err(e) = editor.history_load(&path) {
        tracing::warn!(?e, "failed to load history");
    }

    editor.set_completion_callback(Box::new(|line: &str| {
        // Toy completion: complete a trailing "(" into shell-ish
        // bracket pairs, the way a shell-adjacent demo would.
        if let Some(stem) = line.strip_suffix('(') {
            vec![format!("{stem}()"), format!("{stem}(...)")]
        } else {
            Vec::new()
        }
    }));

    editor.set_hints_callback(Box::new(|line: &str| {
        if line.is_empty() {
            Some(ledit::Hint {
                text: "type something, Tab to complete \"(\"".to_owned(),
                color: Some(6),
                bold: false,
            })
        } else {
            None
        }
    }));

    loop {
        match editor.read("ledit> ") {
            Ok(line) => {
                if line.is_empty() {
                    continue;
                }
                println!("{line}");
                editor.history_add(&line);
                if line == "exit" || line == "quit" {
                    break;
                }
            }
            Err(ledit::ReadError::Eof) => {
                println!();
                break;
            }
            Err(ledit::ReadError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }

    if let Err(e) = editor.history_save(&path) {
        tracing::warn!(?e, "failed to save history");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let keycodes = args.iter().any(|a| a == "--keycodes");

    if keycodes {
        if let Err(e) = run_keycodes() {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let _ = std::io::stdout().flush();
    run_editor();
}
