//! Name-based access to a resolver, per-bit mapping mode, and the
//! aggregate results a generator consumes.

use crate::assignment::PinAssignment;
use crate::map::{SavedBinding, SavedMap};
use crate::resolver::{BindingResolver, SequenceNumbers};
use crate::signal::{SignalCatalog, SignalKey};
use pinbind_board::{BoardCatalog, IoType, IoWidth, ResourceId};
use pinbind_common::Ident;
use pinbind_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A binding session for one design on one board.
///
/// Signals are addressed by display name: `<Type>:<path>` for a whole
/// signal and `<Type>:<path>#<bit>` for one bit, where `<Type>` is the
/// descriptor's default acceptable type. Resources are addressed by label,
/// or `<label>#<bit>` for one bit of a multi-bit resource.
///
/// Each signal is either mapped as a whole or, in alternate mode, bit by
/// bit. Only names matching the current mode are accepted by
/// [`bind`](Self::bind).
#[derive(Debug)]
pub struct BindingSession {
    resolver: BindingResolver,
    alternate: HashSet<Ident>,
}

impl BindingSession {
    /// Creates a session with no bindings.
    pub fn new(
        board: Arc<BoardCatalog>,
        signals: SignalCatalog,
        sink: Arc<DiagnosticSink>,
    ) -> Self {
        Self {
            resolver: BindingResolver::new(board, Arc::new(signals), sink),
            alternate: HashSet::new(),
        }
    }

    /// The underlying resolver.
    pub fn resolver(&self) -> &BindingResolver {
        &self.resolver
    }

    /// The board catalog.
    pub fn board(&self) -> &BoardCatalog {
        self.resolver.board()
    }

    /// The signal catalog.
    pub fn signals(&self) -> &SignalCatalog {
        self.resolver.signals()
    }

    /// The shared diagnostic sink.
    pub fn sink(&self) -> &DiagnosticSink {
        self.resolver.sink()
    }

    /// Switches to a new design. All bindings and per-bit modes are dropped.
    pub fn rebuild(&mut self, signals: SignalCatalog) {
        self.resolver.rebuild(Arc::new(signals));
        self.alternate.clear();
    }

    // --- naming ---

    /// The display name of a signal unit.
    pub fn signal_name(&self, key: SignalKey) -> Option<String> {
        let signal = self.signals().signal(key)?;
        let path = self.signals().path_str(key.path)?;
        Some(match key.bit {
            Some(bit) => format!("{}:{path}#{bit}", signal.default_type()),
            None => format!("{}:{path}", signal.default_type()),
        })
    }

    /// Parses a signal display name back into a key.
    ///
    /// The type prefix must match the descriptor's current default type, so
    /// names recorded before a design change stop resolving when the
    /// component changed kind.
    pub fn resolve_signal(&self, name: &str) -> Option<SignalKey> {
        let (type_name, rest) = name.split_once(':')?;
        let (path, bit) = match rest.rsplit_once('#') {
            Some((path, bit)) => match bit.parse::<u32>() {
                Ok(bit) => (path, Some(bit)),
                Err(_) => (rest, None),
            },
            None => (rest, None),
        };
        let key = SignalKey {
            path: self.signals().lookup(path)?,
            bit,
        };
        let signal = self.signals().signal(key)?;
        signal
            .default_type()
            .name()
            .eq_ignore_ascii_case(type_name)
            .then_some(key)
    }

    /// The display name of a resource or one of its bits.
    pub fn resource_name(&self, resource: ResourceId, bit: Option<u32>) -> Option<String> {
        let label = &self.board().get(resource)?.label;
        Some(match bit {
            Some(bit) => format!("{label}#{bit}"),
            None => label.clone(),
        })
    }

    /// Parses a resource display name.
    pub fn resolve_resource(&self, name: &str) -> Option<(ResourceId, Option<u32>)> {
        if let Some(id) = self.board().find(name) {
            return Some((id, None));
        }
        let (label, bit) = name.rsplit_once('#')?;
        let bit = bit.parse::<u32>().ok()?;
        let id = self.board().find(label)?;
        let resource = &self.board()[id];
        (!resource.is_synthetic() && bit < resource.bit_count()).then_some((id, Some(bit)))
    }

    fn names(&self, keys: &[SignalKey]) -> Vec<String> {
        keys.iter().filter_map(|&k| self.signal_name(k)).collect()
    }

    /// Display names of every bindable unit in the current modes, in design
    /// order.
    pub fn signal_names(&self) -> Vec<String> {
        let keys: Vec<SignalKey> = self
            .signals()
            .iter()
            .flat_map(|(path, entry)| {
                if self.alternate.contains(&path) {
                    (0..entry.width().total())
                        .map(|bit| SignalKey::bit(path, bit))
                        .collect::<Vec<_>>()
                } else {
                    vec![SignalKey::whole(path)]
                }
            })
            .collect();
        self.names(&keys)
    }

    /// Display names of every resource (or resource bit) that could serve
    /// the named signal.
    ///
    /// Single-bit requests list multi-bit resources bit by bit.
    pub fn candidates(&self, signal: &str) -> Vec<String> {
        let Some(key) = self.resolve_signal(signal) else {
            self.unknown(signal, "unknown signal name");
            return Vec::new();
        };
        let Some(descriptor) = self.signals().signal(key) else {
            return Vec::new();
        };
        let single = descriptor.width.total() == 1;
        let mut names = Vec::new();
        for id in self.resolver.compatible_resources(&descriptor) {
            let resource = &self.board()[id];
            if single && resource.bit_count() > 1 {
                names.extend((0..resource.bit_count()).map(|b| format!("{}#{b}", resource.label)));
            } else {
                names.push(resource.label.clone());
            }
        }
        names
    }

    // --- mutation ---

    fn unknown(&self, subject: &str, message: &str) {
        self.sink().emit(
            Diagnostic::error(DiagnosticCode::UNKNOWN_ENTITY, message).with_subject(subject),
        );
    }

    /// Resolves a signal name for mutation, reporting unknown names and
    /// names that don't match the signal's current mode.
    fn key_for_update(&self, name: &str) -> Option<SignalKey> {
        let Some(key) = self.resolve_signal(name) else {
            self.unknown(name, "unknown signal name");
            return None;
        };
        let alternate = self.alternate.contains(&key.path);
        if key.bit.is_some() != alternate {
            let mode = if alternate { "per bit" } else { "as a whole" };
            self.sink().emit(
                Diagnostic::error(
                    DiagnosticCode::MODE_MISMATCH,
                    format!("signal is mapped {mode}"),
                )
                .with_subject(name)
                .with_help("toggle alternate mapping first"),
            );
            return None;
        }
        Some(key)
    }

    /// Binds a signal unit to a resource (or resource bit) by name.
    ///
    /// Returns the display names of every signal unit whose binding changed.
    pub fn bind(&mut self, signal: &str, resource: &str) -> Vec<String> {
        let Some(key) = self.key_for_update(signal) else {
            return Vec::new();
        };
        let Some((id, bit)) = self.resolve_resource(resource) else {
            self.unknown(resource, "unknown resource name");
            return Vec::new();
        };
        let modified = self.resolver.bind(key, id, bit);
        self.names(&modified)
    }

    /// Binds a signal unit to a constant value.
    pub fn bind_constant(&mut self, signal: &str, value: u64) -> Vec<String> {
        let Some(key) = self.key_for_update(signal) else {
            return Vec::new();
        };
        let modified = self.resolver.bind_constant(key, value);
        self.names(&modified)
    }

    /// Removes the binding of a signal unit.
    pub fn unbind(&mut self, signal: &str) -> Vec<String> {
        let Some(key) = self.resolve_signal(signal) else {
            self.unknown(signal, "unknown signal name");
            return Vec::new();
        };
        let modified = self.resolver.unbind(key);
        self.names(&modified)
    }

    /// Removes every binding of the signal at `path`.
    pub fn unbind_path(&mut self, path: &str) -> Vec<String> {
        let Some(ident) = self.signals().lookup(path) else {
            self.unknown(path, "unknown signal path");
            return Vec::new();
        };
        let modified = self.resolver.unbind_path(ident);
        self.names(&modified)
    }

    // --- alternate mapping ---

    /// Returns `true` if the signal at `path` is mapped bit by bit.
    pub fn is_alternate(&self, path: &str) -> bool {
        self.signals()
            .lookup(path)
            .is_some_and(|id| self.alternate.contains(&id))
    }

    /// Switches the signal at `path` between whole and per-bit mapping.
    ///
    /// Refused (with a warning) while the signal has any binding in its
    /// current mode. Returns `true` if the signal is in the requested mode
    /// afterwards.
    pub fn set_alternate(&mut self, path: &str, alternate: bool) -> bool {
        let Some(ident) = self.signals().lookup(path) else {
            self.unknown(path, "unknown signal path");
            return false;
        };
        if self.alternate.contains(&ident) == alternate {
            return true;
        }
        if !self.resolver.bindings_for(ident).is_empty() {
            self.sink().emit(
                Diagnostic::warning(
                    DiagnosticCode::ALTERNATE_REFUSED,
                    "cannot change mapping mode of a bound signal",
                )
                .with_subject(path)
                .with_help("unbind the signal first"),
            );
            return false;
        }
        if alternate {
            self.alternate.insert(ident);
        } else {
            self.alternate.remove(&ident);
        }
        debug!(path, alternate, "mapping mode changed");
        true
    }

    // --- queries ---

    /// Returns `true` if the signal at `path` is fully bound.
    pub fn is_bound(&self, path: &str) -> bool {
        self.signals()
            .lookup(path)
            .is_some_and(|id| self.resolver.is_bound(id))
    }

    /// Paths of every signal that is not fully bound, in design order.
    pub fn unbound_signals(&self) -> Vec<String> {
        self.signals()
            .iter()
            .filter(|(id, _)| !self.resolver.is_bound(*id))
            .map(|(_, entry)| entry.path.clone())
            .collect()
    }

    /// Returns `true` if every signal is fully bound.
    pub fn is_fully_bound(&self) -> bool {
        self.signals()
            .iter()
            .all(|(id, _)| self.resolver.is_bound(id))
    }

    /// Numbers the physical bindings and returns the port-vector totals.
    pub fn finalize(&mut self) -> IoWidth {
        self.resolver.finalize()
    }

    /// Per-direction port-vector sizes from the last
    /// [`finalize`](Self::finalize), if still valid.
    pub fn pin_totals(&self) -> Option<IoWidth> {
        self.resolver.totals()
    }

    /// Port-vector offsets of a bound signal unit, if finalized.
    pub fn sequence(&self, key: SignalKey) -> Option<SequenceNumbers> {
        self.resolver.sequence(key)
    }

    /// Whether the generator must invert the bound signal unit: the
    /// resource's and the component's active levels differ.
    ///
    /// Synthetic bindings never invert.
    pub fn requires_inversion(&self, key: SignalKey) -> Option<bool> {
        let binding = self.resolver.binding(key)?;
        let resource = self.board().get(binding.resource)?;
        if resource.is_synthetic() {
            return Some(false);
        }
        let entry = self.signals().entry(key.path)?;
        Some(resource.is_active_high() ^ entry.active.is_high())
    }

    /// One record per binding, in signal-path order.
    ///
    /// Sequence numbers are filled in only if the session is finalized.
    pub fn assignments(&self) -> Vec<PinAssignment> {
        self.resolver
            .bindings()
            .into_iter()
            .filter_map(|binding| {
                let key = binding.signal;
                let signal = self.signals().signal(key)?;
                let resource = self.board().get(binding.resource)?;
                let physical = !resource.is_synthetic();
                Some(PinAssignment {
                    signal: self.signal_name(key)?,
                    path: self.signals().path_str(key.path)?.to_string(),
                    bit: key.bit,
                    label: signal.label.clone(),
                    direction: signal.width.direction()?,
                    width: signal.width.total(),
                    resource: self.resource_name(binding.resource, binding.resource_bit)?,
                    resource_type: resource.io_type,
                    sequence: self.resolver.sequence(key),
                    locations: resource.locations(binding.resource_bit).to_vec(),
                    electrical: physical.then(|| resource.electrical.clone()),
                    inverted: self.requires_inversion(key).unwrap_or(false),
                    constant: binding.constant,
                })
            })
            .collect()
    }

    // --- persistence ---

    /// Snapshots the bindings by display name.
    pub fn export_map(&self) -> SavedMap {
        let bindings = self
            .resolver
            .bindings()
            .into_iter()
            .filter_map(|binding| {
                let signal = self.signal_name(binding.signal)?;
                let (resource, constant) = match binding.constant {
                    Some(value) => (None, Some(value)),
                    None => (
                        Some(self.resource_name(binding.resource, binding.resource_bit)?),
                        None,
                    ),
                };
                Some(SavedBinding {
                    signal,
                    resource,
                    constant,
                })
            })
            .collect();
        SavedMap {
            board: self.board().name().to_string(),
            bindings,
        }
    }

    /// Re-applies a saved map. Entries that no longer resolve or no longer
    /// validate are reported as warnings and skipped.
    ///
    /// Per-bit entries switch their signal to alternate mode when it has no
    /// bindings yet. Returns the number of entries applied.
    pub fn apply_map(&mut self, map: &SavedMap) -> usize {
        if map.board != self.board().name() {
            self.sink().emit(
                Diagnostic::warning(
                    DiagnosticCode::BOARD_MISMATCH,
                    format!(
                        "map was made for board '{}', session uses '{}'",
                        map.board,
                        self.board().name()
                    ),
                )
                .with_note("entries are applied by name where they still fit"),
            );
        }

        let mut applied = 0;
        for entry in &map.bindings {
            match self.apply_entry(entry) {
                Ok(()) => applied += 1,
                Err(reason) => self.sink().emit(
                    Diagnostic::warning(DiagnosticCode::STALE_MAP_ENTRY, "map entry skipped")
                        .with_subject(entry.signal.as_str())
                        .with_note(reason),
                ),
            }
        }
        debug!(applied, total = map.bindings.len(), "map applied");
        applied
    }

    fn apply_entry(&mut self, entry: &SavedBinding) -> Result<(), String> {
        let key = self
            .resolve_signal(&entry.signal)
            .ok_or_else(|| "signal no longer exists".to_string())?;
        let (resource, bit) = match (&entry.resource, entry.constant) {
            (Some(name), None) => self
                .resolve_resource(name)
                .ok_or_else(|| format!("resource '{name}' no longer exists"))?,
            (None, Some(_)) => self
                .board()
                .synthetic(IoType::Constant)
                .map(|id| (id, None))
                .ok_or_else(|| "board has no constant resource".to_string())?,
            _ => return Err("entry needs exactly one of resource and constant".to_string()),
        };
        self.resolver
            .check_bind(key, resource, bit, entry.constant)?;

        let wants_alternate = key.bit.is_some();
        if self.alternate.contains(&key.path) != wants_alternate {
            if !self.resolver.bindings_for(key.path).is_empty() {
                return Err("signal is already bound in the other mapping mode".to_string());
            }
            if wants_alternate {
                self.alternate.insert(key.path);
            } else {
                self.alternate.remove(&key.path);
            }
        }

        match entry.constant {
            Some(value) => self.resolver.bind_constant(key, value),
            None => self.resolver.bind(key, resource, bit),
        };
        Ok(())
    }
}
