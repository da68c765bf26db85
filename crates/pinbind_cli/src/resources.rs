//! `pinbind resources`: list what a board offers.

use pinbind_board::BoardResource;
use pinbind_diagnostics::DiagnosticSink;

use crate::pipeline::{load_board, render_diagnostics};
use crate::{GlobalArgs, ReportFormat, ResourcesArgs};

/// Runs the `pinbind resources` command.
///
/// Returns exit code 1 if the board file produced errors.
pub fn run(args: &ResourcesArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let sink = DiagnosticSink::new();
    let catalog = load_board(&args.board, &sink, global)?;
    render_diagnostics(&sink.diagnostics(), global);

    let listed: Vec<&BoardResource> = catalog
        .iter()
        .map(|(_, r)| r)
        .filter(|r| args.all || !r.is_synthetic())
        .collect();

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                eprintln!("   Board {}", catalog.name());
            }
            for resource in &listed {
                println!("{}", format_row(resource));
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
    }

    Ok(if sink.has_errors() { 1 } else { 0 })
}

/// One table row: label, type, direction, bits, then pin locations.
fn format_row(resource: &BoardResource) -> String {
    let direction = resource
        .width
        .direction()
        .map_or_else(|| "-".to_string(), |d| d.to_string());
    let mut row = format!(
        "{:<14} {:<16} {:<5} {:>3}",
        resource.label,
        resource.io_type.name(),
        direction,
        resource.bit_count()
    );
    if !resource.pins.is_empty() {
        row.push_str("  ");
        row.push_str(&resource.pins.join(" "));
    }
    if !resource.electrical.active.is_high() {
        row.push_str("  (active low)");
    }
    row.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinbind_board::{
        ActiveLevel, BoardCatalogBuilder, Electrical, IoType, ResourceSpec,
    };

    #[test]
    fn rows_show_pins_and_active_level() {
        let mut b = BoardCatalogBuilder::new("t");
        b.add(
            ResourceSpec::new("KEY", IoType::Button, ["U7"]).with_electrical(Electrical {
                active: ActiveLevel::Low,
                ..Electrical::default()
            }),
        )
        .unwrap();
        let catalog = b.build();
        let rows: Vec<String> = catalog.iter().map(|(_, r)| format_row(r)).collect();
        assert!(rows[0].starts_with("KEY"));
        assert!(rows[0].contains("Button"));
        assert!(rows[0].contains(" in "));
        assert!(rows[0].ends_with("U7  (active low)"));
        let zero = rows.iter().find(|r| r.starts_with("AllZero")).unwrap();
        assert!(zero.contains(" - "));
        assert!(zero.ends_with('0'));
    }
}
