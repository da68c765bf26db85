//! `pinbind check`: apply bindings and report readiness.
//!
//! The pipeline:
//!
//! 1. Load the board and design files
//! 2. Switch the requested signals to per-bit mapping
//! 3. Apply the saved map, then the `--bind`/`--constant` bindings
//! 4. Finalize and collect the pin assignments
//! 5. Report, optionally saving the resulting map

use std::sync::Arc;

use pinbind_bind::{BindingSession, PinAssignment};
use pinbind_board::IoWidth;
use pinbind_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
use serde::Serialize;
use tracing::info;

use crate::pipeline::{load_session, render_diagnostics};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// The machine-readable result of `pinbind check`.
#[derive(Debug, Serialize)]
struct CheckReport {
    board: String,
    totals: IoWidth,
    assignments: Vec<PinAssignment>,
    unbound: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

/// Runs the `pinbind check` command.
///
/// Returns exit code 0 if every signal is bound and no errors were
/// reported, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = Arc::new(DiagnosticSink::new());
    let mut session = prepare(args, &sink, global)?;

    let totals = session.finalize();
    let report = CheckReport {
        board: session.board().name().to_string(),
        totals,
        assignments: session.assignments(),
        unbound: session.unbound_signals(),
        diagnostics: sink.diagnostics(),
    };

    if let Some(save_path) = &args.save {
        pinbind_config::save_map(save_path, &session.export_map())?;
        if !global.quiet {
            eprintln!("      Saved {}", save_path.display());
        }
    }

    match args.format {
        ReportFormat::Text => print_text(&report, global),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if sink.has_errors() || !report.unbound.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Opens the session and applies every requested mode switch and binding.
fn prepare(
    args: &CheckArgs,
    sink: &Arc<DiagnosticSink>,
    global: &GlobalArgs,
) -> Result<BindingSession, Box<dyn std::error::Error>> {
    let mut session = load_session(&args.board, &args.design, sink, global)?;

    if !global.quiet {
        eprintln!(
            "   Checking {} against {}",
            args.design.display(),
            session.board().name()
        );
    }

    for path in &args.alternate {
        session.set_alternate(path, true);
    }
    if let Some(map_path) = &args.map {
        let map = pinbind_config::load_map(map_path)?;
        let applied = session.apply_map(&map);
        info!(applied, total = map.bindings.len(), "saved map applied");
    }
    apply_bindings(&mut session, &args.bind, &args.constant, sink);
    Ok(session)
}

/// Applies `SIGNAL=RESOURCE` and `SIGNAL=VALUE` command-line bindings.
///
/// Malformed arguments are reported into `sink` like any other bind error.
fn apply_bindings(
    session: &mut BindingSession,
    binds: &[String],
    constants: &[String],
    sink: &DiagnosticSink,
) {
    for arg in binds {
        match arg.split_once('=') {
            Some((signal, resource)) => {
                session.bind(signal.trim(), resource.trim());
            }
            None => sink.emit(malformed(arg, "expected SIGNAL=RESOURCE")),
        }
    }
    for arg in constants {
        let parsed = arg
            .split_once('=')
            .and_then(|(signal, value)| Some((signal.trim(), parse_value(value.trim())?)));
        match parsed {
            Some((signal, value)) => {
                session.bind_constant(signal, value);
            }
            None => sink.emit(malformed(arg, "expected SIGNAL=VALUE with a numeric value")),
        }
    }
}

fn malformed(arg: &str, message: &str) -> Diagnostic {
    Diagnostic::error(DiagnosticCode::UNKNOWN_ENTITY, message)
        .with_subject(arg)
}

/// Parses decimal, `0x` hex or `0b` binary values.
fn parse_value(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = text.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else {
        text.parse().ok()
    }
}

fn print_text(report: &CheckReport, global: &GlobalArgs) {
    render_diagnostics(&report.diagnostics, global);

    for a in &report.assignments {
        let target = match a.constant {
            Some(value) => format!("{} = {value:#x}", a.resource),
            None => a.resource.clone(),
        };
        let sequence = a
            .sequence
            .map_or_else(|| "-".to_string(), |seq| seq.to_string());
        let inverted = if a.inverted { "  (inverted)" } else { "" };
        println!("{:<32} -> {:<18} {sequence}{inverted}", a.signal, target);
    }
    for path in &report.unbound {
        println!("{path:<32} -> (unbound)");
    }

    if !global.quiet {
        let count = |severity: Severity| {
            report
                .diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };
        eprintln!(
            "   Result: {} binding(s), {} unbound, {} error(s), {} warning(s), pins {}",
            report.assignments.len(),
            report.unbound.len(),
            count(Severity::Error),
            count(Severity::Warning),
            report.totals
        );
    }
}
