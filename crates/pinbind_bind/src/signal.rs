//! The signal catalog: what the design needs from the board.

use pinbind_board::{first_of_class, ActiveLevel, Direction, IoType, IoWidth, WidthClass};
use pinbind_common::{Ident, Interner};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a catalog entry is a plain top-level port or an I/O component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// A top-level design port. Its acceptable type is always the wildcard.
    Port,
    /// An I/O component (LED, switch bank, display) with its own type list.
    Component,
}

/// One hierarchical path's I/O requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEntry {
    /// Hierarchical path, e.g. `/main/LED1`.
    pub path: String,
    /// Port or component.
    pub kind: SignalKind,
    /// Acceptable resource types, primary first. Ignored for ports.
    pub types: Vec<IoType>,
    /// Input pin labels in bit order.
    pub inputs: Vec<String>,
    /// Output pin labels in bit order.
    pub outputs: Vec<String>,
    /// Bidirectional pin labels in bit order.
    pub inouts: Vec<String>,
    /// Active level the component expects.
    pub active: ActiveLevel,
}

impl SignalEntry {
    /// A top-level port of `width` bits in `direction`, with labels
    /// `name[0]`, `name[1]`, ... derived from the last path segment.
    pub fn port(path: impl Into<String>, direction: Direction, width: u32) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let labels: Vec<String> = if width == 1 {
            vec![name]
        } else {
            (0..width).map(|i| format!("{name}[{i}]")).collect()
        };
        let mut entry = Self::component(path, Vec::new());
        entry.kind = SignalKind::Port;
        match direction {
            Direction::Input => entry.inputs = labels,
            Direction::Output => entry.outputs = labels,
            Direction::InOut => entry.inouts = labels,
        }
        entry
    }

    /// A component with the given acceptable types and no pins yet.
    pub fn component(path: impl Into<String>, types: Vec<IoType>) -> Self {
        Self {
            path: path.into(),
            kind: SignalKind::Component,
            types,
            inputs: Vec::new(),
            outputs: Vec::new(),
            inouts: Vec::new(),
            active: ActiveLevel::High,
        }
    }

    /// Sets the input labels.
    pub fn with_inputs<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.inputs = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the output labels.
    pub fn with_outputs<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.outputs = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the bidirectional labels.
    pub fn with_inouts<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.inouts = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the active level.
    pub fn with_active(mut self, active: ActiveLevel) -> Self {
        self.active = active;
        self
    }

    /// The width triple implied by the label lists.
    pub fn width(&self) -> IoWidth {
        IoWidth {
            input: self.inputs.len() as u32,
            output: self.outputs.len() as u32,
            inout: self.inouts.len() as u32,
        }
    }

    /// Label of the bit at `index` (inputs, then outputs, then inouts).
    pub fn label(&self, index: u32) -> Option<&str> {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .chain(&self.inouts)
            .nth(index as usize)
            .map(String::as_str)
    }

    /// Acceptable types for a descriptor of `class`, default first.
    fn types_for(&self, class: WidthClass) -> Vec<IoType> {
        if self.kind == SignalKind::Port {
            return vec![IoType::wildcard(class)];
        }
        let default = first_of_class(&self.types, class);
        let mut types = vec![default];
        types.extend(
            self.types
                .iter()
                .copied()
                .filter(|&t| t != default && t.width_class() == Some(class)),
        );
        types
    }
}

/// Identity of a bindable unit: a whole signal or one bit of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalKey {
    /// Interned hierarchical path.
    pub path: Ident,
    /// Bit index for a per-bit decomposition, `None` for the whole signal.
    pub bit: Option<u32>,
}

impl SignalKey {
    /// Key for the whole signal at `path`.
    pub fn whole(path: Ident) -> Self {
        Self { path, bit: None }
    }

    /// Key for bit `bit` of the signal at `path`.
    pub fn bit(path: Ident, bit: u32) -> Self {
        Self {
            path,
            bit: Some(bit),
        }
    }
}

/// A concrete bindable requirement derived from a [`SignalEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signal {
    /// Identity of this unit.
    pub key: SignalKey,
    /// Required width and direction.
    pub width: IoWidth,
    /// Acceptable types, default first; never empty.
    pub types: Vec<IoType>,
    /// Pin label, for per-bit descriptors.
    pub label: Option<String>,
}

impl Signal {
    /// The default acceptable type.
    pub fn default_type(&self) -> IoType {
        self.types[0]
    }
}

/// Errors raised while adding entries to a [`SignalCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The entry has an empty path.
    #[error("signal entry has an empty path")]
    EmptyPath,
    /// Another entry already uses the path.
    #[error("duplicate signal path '{0}'")]
    DuplicatePath(String),
    /// The entry has no pins at all.
    #[error("signal '{0}' has no pins")]
    NoPins(String),
    /// The path contains `#`, which display names reserve for bit indices.
    #[error("signal path '{0}' contains '#'")]
    ReservedCharacter(String),
}

/// Every I/O requirement of the current design, keyed by hierarchical path.
///
/// Rebuilt whenever the design changes; keys from an old catalog are not
/// valid in a new one.
#[derive(Debug, Default)]
pub struct SignalCatalog {
    interner: Interner,
    entries: Vec<(Ident, SignalEntry)>,
    by_path: HashMap<Ident, usize>,
}

impl SignalCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning the interned path.
    pub fn add(&mut self, entry: SignalEntry) -> Result<Ident, SignalError> {
        if entry.path.trim().is_empty() {
            return Err(SignalError::EmptyPath);
        }
        if entry.path.contains('#') {
            return Err(SignalError::ReservedCharacter(entry.path));
        }
        if entry.width().total() == 0 {
            return Err(SignalError::NoPins(entry.path));
        }
        if self.interner.get(&entry.path).is_some() {
            return Err(SignalError::DuplicatePath(entry.path));
        }
        let path = self.interner.get_or_intern(&entry.path);
        self.by_path.insert(path, self.entries.len());
        self.entries.push((path, entry));
        Ok(path)
    }

    /// Looks up an interned path.
    pub fn lookup(&self, path: &str) -> Option<Ident> {
        self.interner.get(path).filter(|id| self.by_path.contains_key(id))
    }

    /// The entry for `path`.
    pub fn entry(&self, path: Ident) -> Option<&SignalEntry> {
        self.by_path.get(&path).map(|&i| &self.entries[i].1)
    }

    /// The path string of an interned path, if it belongs to this catalog.
    pub fn path_str(&self, path: Ident) -> Option<&str> {
        self.interner.try_resolve(path)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Ident, &SignalEntry)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The whole-signal descriptor for `path`.
    pub fn whole_signal(&self, path: Ident) -> Option<Signal> {
        let entry = self.entry(path)?;
        let width = entry.width();
        Some(Signal {
            key: SignalKey::whole(path),
            width,
            types: entry.types_for(WidthClass::of_total(width.total())),
            label: None,
        })
    }

    /// One single-bit descriptor per pin of the signal at `path`.
    pub fn bit_signals(&self, path: Ident) -> Vec<Signal> {
        let Some(entry) = self.entry(path) else {
            return Vec::new();
        };
        let width = entry.width();
        let types = entry.types_for(WidthClass::Single);
        (0..width.total())
            .filter_map(|bit| {
                let direction = width.direction_of_bit(bit)?;
                Some(Signal {
                    key: SignalKey::bit(path, bit),
                    width: IoWidth::new(direction, 1),
                    types: types.clone(),
                    label: entry.label(bit).map(str::to_string),
                })
            })
            .collect()
    }

    /// The descriptor for a key: whole or single bit.
    pub fn signal(&self, key: SignalKey) -> Option<Signal> {
        match key.bit {
            None => self.whole_signal(key.path),
            Some(bit) => self.bit_signals(key.path).into_iter().nth(bit as usize),
        }
    }

    /// `path` or `path#bit`, for messages.
    pub fn describe(&self, key: SignalKey) -> String {
        let path = self.path_str(key.path).unwrap_or("<unknown>");
        match key.bit {
            Some(bit) => format!("{path}#{bit}"),
            None => path.to_string(),
        }
    }
}
