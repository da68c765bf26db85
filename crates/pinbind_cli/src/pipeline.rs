//! Shared loading and rendering steps used by the subcommands.

use std::path::Path;
use std::sync::Arc;

use pinbind_bind::BindingSession;
use pinbind_board::BoardCatalog;
use pinbind_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};

use crate::GlobalArgs;

/// Loads a board file, rendering any entry diagnostics if loading fails.
pub fn load_board(
    path: &Path,
    sink: &DiagnosticSink,
    global: &GlobalArgs,
) -> Result<BoardCatalog, Box<dyn std::error::Error>> {
    pinbind_config::load_board(path, sink).map_err(|e| {
        render_diagnostics(&sink.take_all(), global);
        e.into()
    })
}

/// Loads a board and a design and opens a binding session on them.
pub fn load_session(
    board: &Path,
    design: &Path,
    sink: &Arc<DiagnosticSink>,
    global: &GlobalArgs,
) -> Result<BindingSession, Box<dyn std::error::Error>> {
    let catalog = load_board(board, sink, global)?;
    let signals = pinbind_config::load_design(design, sink).map_err(|e| {
        render_diagnostics(&sink.take_all(), global);
        Box::<dyn std::error::Error>::from(e)
    })?;

    if !global.quiet {
        eprintln!(
            "    Loaded board {} ({} resources), {} signal(s)",
            catalog.name(),
            catalog.physical().count(),
            signals.len()
        );
    }
    Ok(BindingSession::new(
        Arc::new(catalog),
        signals,
        Arc::clone(sink),
    ))
}

/// Prints diagnostics to stderr in terminal format.
pub fn render_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
}
