//! Document loading and validation.

use crate::error::ConfigError;
use crate::types::{BoardFile, DesignFile, ResourceEntry, SignalEntryDef};
use pinbind_bind::{SavedMap, SignalCatalog, SignalEntry, SignalError, SignalKind};
use pinbind_board::{BoardCatalog, BoardCatalogBuilder, CatalogError, IoType, ResourceSpec};
use pinbind_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use std::path::Path;
use tracing::debug;

/// Loads a board file and builds its catalog.
///
/// See [`load_board_from_str`].
pub fn load_board(path: &Path, sink: &DiagnosticSink) -> Result<BoardCatalog, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_board_from_str(&content, sink)
}

/// Parses a board file and builds its catalog.
///
/// Malformed entries are reported to `sink` and skipped. Entries that make
/// the catalog unusable (duplicate labels) are reported too, and fail the
/// whole load once every entry has been checked.
pub fn load_board_from_str(
    content: &str,
    sink: &DiagnosticSink,
) -> Result<BoardCatalog, ConfigError> {
    let file: BoardFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    if file.board.name.trim().is_empty() {
        return Err(ConfigError::MissingField("board.name".to_string()));
    }

    let mut builder = BoardCatalogBuilder::new(file.board.name.clone());
    let mut fatal = Vec::new();
    for (index, entry) in file.resources.iter().enumerate() {
        let Some(io_type) = parse_type(&entry.io_type) else {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::INVALID_TYPE,
                    format!("unknown resource type '{}'", entry.io_type),
                )
                .with_subject(resource_subject(entry, index))
                .with_note("entry skipped"),
            );
            continue;
        };
        let mut spec = ResourceSpec::new(entry.label.clone(), io_type, entry.pins.iter().cloned())
            .with_electrical(entry.electrical());
        if let Some(width) = entry.width {
            spec = spec.with_width(width);
        }
        if let Err(err) = builder.add(spec) {
            report_catalog_error(&err, entry, index, sink);
            if err.is_fatal() {
                fatal.push(err);
            }
        }
    }
    if !fatal.is_empty() {
        return Err(ConfigError::Catalog {
            board: file.board.name,
            errors: fatal,
        });
    }

    let catalog = builder.build();
    debug!(
        board = catalog.name(),
        physical = catalog.physical().count(),
        "board loaded"
    );
    Ok(catalog)
}

/// Loads a design file into a signal catalog.
///
/// See [`load_design_from_str`].
pub fn load_design(path: &Path, sink: &DiagnosticSink) -> Result<SignalCatalog, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_design_from_str(&content, sink)
}

/// Parses a design file into a signal catalog.
///
/// Unknown type names are dropped from their entry with a warning.
/// Malformed or duplicate entries are reported as errors and skipped.
pub fn load_design_from_str(
    content: &str,
    sink: &DiagnosticSink,
) -> Result<SignalCatalog, ConfigError> {
    let file: DesignFile =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    if file.design.top.trim().is_empty() {
        return Err(ConfigError::MissingField("design.top".to_string()));
    }

    let mut catalog = SignalCatalog::new();
    for def in &file.signals {
        let Some(entry) = signal_entry(def, sink) else {
            continue;
        };
        match catalog.add(entry) {
            Ok(_) => {}
            Err(SignalError::DuplicatePath(path)) => sink.emit(
                Diagnostic::error(DiagnosticCode::DUPLICATE_PATH, "duplicate signal path")
                    .with_subject(path)
                    .with_note("entry skipped"),
            ),
            Err(err) => sink.emit(
                Diagnostic::error(DiagnosticCode::MALFORMED_SIGNAL, err.to_string())
                    .with_subject(def.path.as_str())
                    .with_note("entry skipped"),
            ),
        }
    }
    debug!(top = %file.design.top, signals = catalog.len(), "design loaded");
    Ok(catalog)
}

/// Loads a saved map file.
pub fn load_map(path: &Path) -> Result<SavedMap, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_map_from_str(&content)
}

/// Parses and validates a saved map.
pub fn load_map_from_str(content: &str) -> Result<SavedMap, ConfigError> {
    let map: SavedMap =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    if map.board.trim().is_empty() {
        return Err(ConfigError::MissingField("board".to_string()));
    }
    if let Some(bad) = map
        .bindings
        .iter()
        .find(|b| b.resource.is_some() == b.constant.is_some())
    {
        return Err(ConfigError::ValidationError(format!(
            "binding for '{}' needs exactly one of resource and constant",
            bad.signal
        )));
    }
    Ok(map)
}

/// Serializes a saved map to TOML.
pub fn save_map_to_string(map: &SavedMap) -> Result<String, ConfigError> {
    toml::to_string_pretty(map).map_err(|e| ConfigError::SerializeError(e.to_string()))
}

/// Writes a saved map to `path`.
pub fn save_map(path: &Path, map: &SavedMap) -> Result<(), ConfigError> {
    std::fs::write(path, save_map_to_string(map)?)?;
    Ok(())
}

/// Accepts both `dip_switch` and `DipSwitch` spellings.
fn parse_type(name: &str) -> Option<IoType> {
    name.replace('_', "").parse().ok()
}

fn resource_subject(entry: &ResourceEntry, index: usize) -> String {
    if entry.label.trim().is_empty() {
        format!("resources[{index}]")
    } else {
        entry.label.clone()
    }
}

fn report_catalog_error(
    err: &CatalogError,
    entry: &ResourceEntry,
    index: usize,
    sink: &DiagnosticSink,
) {
    let code = match err {
        CatalogError::EmptyLabel { .. } => DiagnosticCode::MALFORMED_RESOURCE,
        CatalogError::DuplicateLabel { .. } => DiagnosticCode::DUPLICATE_LABEL,
        CatalogError::SyntheticDeclared { .. } => DiagnosticCode::INVALID_TYPE,
        CatalogError::InvalidWidth { .. } => DiagnosticCode::INVALID_WIDTH,
        CatalogError::MissingPinLocation { .. } | CatalogError::ExtraPinLocations { .. } => {
            DiagnosticCode::MISSING_PIN_LOCATION
        }
    };
    let subject = resource_subject(entry, index);
    let diag = if err.is_fatal() {
        Diagnostic::error(code, err.to_string())
            .with_subject(subject)
            .with_help("resource labels must be unique and must not be a synthetic type name")
    } else {
        Diagnostic::warning(code, err.to_string())
            .with_subject(subject)
            .with_note("entry skipped")
    };
    sink.emit(diag);
}

/// Turns one design entry into a catalog entry, reporting what it can't use.
fn signal_entry(def: &SignalEntryDef, sink: &DiagnosticSink) -> Option<SignalEntry> {
    let malformed = |message: &str| {
        sink.emit(
            Diagnostic::error(DiagnosticCode::MALFORMED_SIGNAL, message)
                .with_subject(def.path.as_str())
                .with_note("entry skipped"),
        );
    };

    if def.direction.is_some() || def.width.is_some() {
        if def.kind != SignalKind::Port || def.has_labels() {
            malformed("direction and width are only allowed on ports without label lists");
            return None;
        }
        let (Some(direction), Some(width)) = (def.direction, def.width) else {
            malformed("port shorthand needs both direction and width");
            return None;
        };
        return Some(SignalEntry::port(def.path.as_str(), direction, width).with_active(def.active));
    }

    let types: Vec<IoType> = def
        .types
        .iter()
        .filter_map(|name| match parse_type(name) {
            Some(t) if !t.is_synthetic() => Some(t),
            _ => {
                sink.emit(
                    Diagnostic::warning(
                        DiagnosticCode::INVALID_TYPE,
                        format!("unknown component type '{name}'"),
                    )
                    .with_subject(def.path.as_str())
                    .with_note("type ignored"),
                );
                None
            }
        })
        .collect();

    let mut entry = SignalEntry::component(def.path.as_str(), types)
        .with_inputs(def.inputs.iter().cloned())
        .with_outputs(def.outputs.iter().cloned())
        .with_inouts(def.inouts.iter().cloned())
        .with_active(def.active);
    entry.kind = def.kind;
    Some(entry)
}
