//! `pinbind candidates`: what could serve a signal.

use std::sync::Arc;

use pinbind_diagnostics::DiagnosticSink;

use crate::pipeline::{load_session, render_diagnostics};
use crate::{CandidatesArgs, GlobalArgs};

/// Runs the `pinbind candidates` command.
///
/// Without a signal name, lists every signal display name instead.
pub fn run(args: &CandidatesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = Arc::new(DiagnosticSink::new());
    let session = load_session(&args.board, &args.design, &sink, global)?;

    let lines = match &args.signal {
        Some(signal) => session.candidates(signal),
        None => session.signal_names(),
    };
    render_diagnostics(&sink.diagnostics(), global);
    for line in &lines {
        println!("{line}");
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}
