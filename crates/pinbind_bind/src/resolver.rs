//! The allocation engine: matches signals to board resources.
//!
//! The resolver owns the binding set. Every request is validated in full
//! before anything is mutated; a rejected request emits a diagnostic into
//! the shared sink and leaves the binding set untouched. An accepted
//! request evicts whatever it collides with, so the last bind wins.

use crate::signal::{Signal, SignalCatalog, SignalKey};
use pinbind_board::{BoardCatalog, BoardResource, IoType, IoWidth, ResourceId};
use pinbind_common::Ident;
use pinbind_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Per-direction port-vector offsets of a bound signal.
pub type SequenceNumbers = IoWidth;

/// One signal (or signal bit) assigned to one resource (or resource bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// The bound signal unit.
    pub signal: SignalKey,
    /// The serving resource.
    pub resource: ResourceId,
    /// The resource bit, when only one bit of a multi-bit resource is used.
    pub resource_bit: Option<u32>,
    /// The driven value for bindings onto the constant resource.
    pub constant: Option<u64>,
}

impl Binding {
    fn overlaps_signal(&self, key: SignalKey) -> bool {
        self.signal.path == key.path
            && (key.bit.is_none() || self.signal.bit.is_none() || self.signal.bit == key.bit)
    }

    fn overlaps_resource(&self, resource: ResourceId, bit: Option<u32>) -> bool {
        self.resource == resource
            && (bit.is_none() || self.resource_bit.is_none() || self.resource_bit == bit)
    }
}

#[derive(Debug, Clone, Default)]
struct Finalized {
    sequence: HashMap<SignalKey, SequenceNumbers>,
    totals: IoWidth,
}

/// Stores the current binding set for one design on one board.
#[derive(Debug)]
pub struct BindingResolver {
    board: Arc<BoardCatalog>,
    signals: Arc<SignalCatalog>,
    bindings: HashMap<SignalKey, Binding>,
    finalized: Option<Finalized>,
    sink: Arc<DiagnosticSink>,
}

impl BindingResolver {
    /// Creates a resolver with no bindings.
    pub fn new(
        board: Arc<BoardCatalog>,
        signals: Arc<SignalCatalog>,
        sink: Arc<DiagnosticSink>,
    ) -> Self {
        Self {
            board,
            signals,
            bindings: HashMap::new(),
            finalized: None,
            sink,
        }
    }

    /// The board catalog.
    pub fn board(&self) -> &Arc<BoardCatalog> {
        &self.board
    }

    /// The signal catalog.
    pub fn signals(&self) -> &Arc<SignalCatalog> {
        &self.signals
    }

    /// The shared diagnostic sink.
    pub fn sink(&self) -> &Arc<DiagnosticSink> {
        &self.sink
    }

    /// Replaces the signal catalog and drops every binding.
    pub fn rebuild(&mut self, signals: Arc<SignalCatalog>) {
        debug!(
            dropped = self.bindings.len(),
            signals = signals.len(),
            "signal catalog rebuilt"
        );
        self.signals = signals;
        self.bindings.clear();
        self.finalized = None;
    }

    /// The whole-signal descriptor for `path`.
    pub fn whole_signal_for(&self, path: Ident) -> Option<Signal> {
        self.signals.whole_signal(path)
    }

    /// The per-bit descriptors for `path`.
    pub fn bit_signals_for(&self, path: Ident) -> Vec<Signal> {
        self.signals.bit_signals(path)
    }

    /// Returns `true` if the whole signal is bound or every bit is.
    pub fn is_bound(&self, path: Ident) -> bool {
        if self.bindings.contains_key(&SignalKey::whole(path)) {
            return true;
        }
        let total = self
            .signals
            .entry(path)
            .map_or(0, |entry| entry.width().total());
        total > 0 && (0..total).all(|bit| self.bindings.contains_key(&SignalKey::bit(path, bit)))
    }

    /// Resources that could serve `signal`, in catalog order.
    ///
    /// A mixed-direction signal is reported and gets no candidates. The
    /// constant resource is left out: it needs a value and is reached only
    /// through [`bind_constant`](Self::bind_constant).
    pub fn compatible_resources(&self, signal: &Signal) -> Vec<ResourceId> {
        if signal.width.is_mixed() {
            self.sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::MIXED_DIRECTION,
                    format!(
                        "signal has mixed directions {}; no resource can serve it whole",
                        signal.width
                    ),
                )
                .with_subject(self.signals.describe(signal.key))
                .with_help("map the signal bit by bit instead"),
            );
            return Vec::new();
        }
        self.board
            .iter()
            .filter(|(_, resource)| resource.io_type != IoType::Constant)
            .filter(|(_, resource)| accepts(resource, signal))
            .map(|(id, _)| id)
            .collect()
    }

    /// The binding of `key`, if any.
    pub fn binding(&self, key: SignalKey) -> Option<&Binding> {
        self.bindings.get(&key)
    }

    /// All bindings that belong to `path`, whole or per bit.
    pub fn bindings_for(&self, path: Ident) -> Vec<Binding> {
        let mut found: Vec<Binding> = self
            .bindings
            .values()
            .filter(|b| b.signal.path == path)
            .copied()
            .collect();
        found.sort_by_key(|b| b.signal.bit);
        found
    }

    /// All bindings, ordered by signal path then bit (whole first).
    pub fn bindings(&self) -> Vec<Binding> {
        let mut all: Vec<Binding> = self.bindings.values().copied().collect();
        all.sort_by(|a, b| {
            let pa = self.signals.path_str(a.signal.path).unwrap_or_default();
            let pb = self.signals.path_str(b.signal.path).unwrap_or_default();
            pa.cmp(pb).then(a.signal.bit.cmp(&b.signal.bit))
        });
        all
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Binds `key` to `resource` (or to bit `resource_bit` of it).
    ///
    /// Returns every key whose binding changed: the evicted ones and `key`
    /// itself. Returns an empty list if the request was rejected.
    pub fn bind(
        &mut self,
        key: SignalKey,
        resource: ResourceId,
        resource_bit: Option<u32>,
    ) -> Vec<SignalKey> {
        self.bind_inner(key, resource, resource_bit, None)
    }

    /// Binds `key` to the constant resource driving `value`.
    pub fn bind_constant(&mut self, key: SignalKey, value: u64) -> Vec<SignalKey> {
        match self.board.synthetic(IoType::Constant) {
            Some(resource) => self.bind_inner(key, resource, None, Some(value)),
            None => {
                self.reject(
                    DiagnosticCode::UNKNOWN_ENTITY,
                    key,
                    "board catalog has no constant resource".to_string(),
                );
                Vec::new()
            }
        }
    }

    /// Runs every check `bind` would run, without reporting or mutating.
    ///
    /// Returns the message `bind` would report on rejection.
    pub fn check_bind(
        &self,
        key: SignalKey,
        resource: ResourceId,
        resource_bit: Option<u32>,
        constant: Option<u64>,
    ) -> Result<(), String> {
        self.check(key, resource, resource_bit, constant)
            .map_err(|(_, message)| message)
    }

    fn check(
        &self,
        key: SignalKey,
        resource_id: ResourceId,
        resource_bit: Option<u32>,
        constant: Option<u64>,
    ) -> Result<(), (DiagnosticCode, String)> {
        let signal = self.signals.signal(key).ok_or_else(|| {
            (
                DiagnosticCode::UNKNOWN_ENTITY,
                "unknown signal or bit index".to_string(),
            )
        })?;
        let resource = self.board.get(resource_id).ok_or_else(|| {
            (
                DiagnosticCode::UNKNOWN_ENTITY,
                format!("unknown resource #{}", resource_id.as_raw()),
            )
        })?;
        validate(&signal, resource, resource_bit, constant)
    }

    fn bind_inner(
        &mut self,
        key: SignalKey,
        resource_id: ResourceId,
        resource_bit: Option<u32>,
        constant: Option<u64>,
    ) -> Vec<SignalKey> {
        if let Err((code, message)) = self.check(key, resource_id, resource_bit, constant) {
            self.reject(code, key, message);
            return Vec::new();
        }
        let board = Arc::clone(&self.board);
        let resource = &board[resource_id];

        self.finalized = None;
        let synthetic = resource.is_synthetic();
        let mut modified: Vec<SignalKey> = self
            .bindings
            .values()
            .filter(|b| {
                b.overlaps_signal(key)
                    || (!synthetic && b.overlaps_resource(resource_id, resource_bit))
            })
            .map(|b| b.signal)
            .collect();
        self.sort_keys(&mut modified);
        for evicted in &modified {
            self.bindings.remove(evicted);
            if *evicted != key {
                debug!(
                    signal = %self.signals.describe(*evicted),
                    "binding evicted"
                );
            }
        }
        if !modified.contains(&key) {
            modified.push(key);
        }

        self.bindings.insert(
            key,
            Binding {
                signal: key,
                resource: resource_id,
                resource_bit,
                constant,
            },
        );
        debug!(
            signal = %self.signals.describe(key),
            resource = %resource.label,
            bit = ?resource_bit,
            "bound"
        );
        modified
    }

    /// Removes the binding of `key`. Returns `[key]` if one existed.
    pub fn unbind(&mut self, key: SignalKey) -> Vec<SignalKey> {
        if self.bindings.remove(&key).is_none() {
            return Vec::new();
        }
        self.finalized = None;
        debug!(signal = %self.signals.describe(key), "unbound");
        vec![key]
    }

    /// Removes every binding of `path`, whole and per bit.
    pub fn unbind_path(&mut self, path: Ident) -> Vec<SignalKey> {
        let mut removed: Vec<SignalKey> = self
            .bindings
            .keys()
            .filter(|k| k.path == path)
            .copied()
            .collect();
        self.sort_keys(&mut removed);
        for key in &removed {
            self.bindings.remove(key);
        }
        if !removed.is_empty() {
            self.finalized = None;
            debug!(count = removed.len(), "unbound path");
        }
        removed
    }

    /// Assigns port-vector sequence numbers to every binding onto a
    /// physical resource, in signal-path order, and returns the totals.
    pub fn finalize(&mut self) -> IoWidth {
        let mut finalized = Finalized::default();
        for binding in self.bindings() {
            if self.board[binding.resource].is_synthetic() {
                continue;
            }
            let Some(signal) = self.signals.signal(binding.signal) else {
                continue;
            };
            trace!(
                signal = %self.signals.describe(binding.signal),
                seq = %finalized.totals,
                "sequence assigned"
            );
            finalized.sequence.insert(binding.signal, finalized.totals);
            finalized.totals += signal.width;
        }
        let totals = finalized.totals;
        debug!(%totals, "bindings finalized");
        self.finalized = Some(finalized);
        totals
    }

    /// The sequence numbers of `key` from the last [`finalize`](Self::finalize),
    /// or `None` if the binding set changed since or `key` is not numbered.
    pub fn sequence(&self, key: SignalKey) -> Option<SequenceNumbers> {
        self.finalized.as_ref()?.sequence.get(&key).copied()
    }

    /// The per-direction totals from the last `finalize`, if still valid.
    pub fn totals(&self) -> Option<IoWidth> {
        self.finalized.as_ref().map(|f| f.totals)
    }

    fn sort_keys(&self, keys: &mut [SignalKey]) {
        keys.sort_by(|a, b| {
            let pa = self.signals.path_str(a.path).unwrap_or_default();
            let pb = self.signals.path_str(b.path).unwrap_or_default();
            pa.cmp(pb).then(a.bit.cmp(&b.bit))
        });
    }

    fn reject(&self, code: DiagnosticCode, key: SignalKey, message: String) {
        debug!(signal = %self.signals.describe(key), %message, "bind rejected");
        self.sink.emit(
            Diagnostic::error(code, message)
                .with_subject(self.signals.describe(key))
                .with_note("the binding set was left unchanged"),
        );
    }
}

/// Returns `true` if `resource` accepts `signal` under any acceptable type.
fn accepts(resource: &BoardResource, signal: &Signal) -> bool {
    signal
        .types
        .iter()
        .any(|&t| resource.is_compatible(signal.width, t))
}

/// All pre-mutation checks of a bind request.
fn validate(
    signal: &Signal,
    resource: &BoardResource,
    resource_bit: Option<u32>,
    constant: Option<u64>,
) -> Result<(), (DiagnosticCode, String)> {
    let signal_bits = signal.width.total();

    if resource.is_synthetic() {
        if resource_bit.is_some() {
            return Err((
                DiagnosticCode::UNKNOWN_ENTITY,
                format!("synthetic resource '{}' has no bits", resource.label),
            ));
        }
    } else {
        if let Some(bit) = resource_bit.filter(|&b| b >= resource.bit_count()) {
            return Err((
                DiagnosticCode::UNKNOWN_ENTITY,
                format!(
                    "resource '{}' has {} bits, no bit {bit}",
                    resource.label,
                    resource.bit_count()
                ),
            ));
        }
        let resource_bits = resource_bit.map_or(resource.bit_count(), |_| 1);
        if signal_bits != resource_bits {
            return Err((
                DiagnosticCode::BIT_COUNT_MISMATCH,
                format!(
                    "cannot bind {signal_bits} signal bit(s) to {resource_bits} bit(s) of '{}'",
                    resource.label
                ),
            ));
        }
    }

    if !accepts(resource, signal) {
        return Err((
            DiagnosticCode::INCOMPATIBLE_BINDING,
            format!(
                "'{}' ({}) cannot serve a {} signal of type {}",
                resource.label,
                resource.io_type,
                signal.width,
                signal.default_type()
            ),
        ));
    }

    match (resource.io_type, constant) {
        (IoType::Constant, None) => Err((
            DiagnosticCode::INCOMPATIBLE_BINDING,
            "the constant resource needs a value".to_string(),
        )),
        (IoType::Constant, Some(value)) if signal_bits < 64 && value >> signal_bits != 0 => Err((
            DiagnosticCode::CONSTANT_OVERFLOW,
            format!("constant {value:#x} does not fit in {signal_bits} bit(s)"),
        )),
        (IoType::Constant, Some(_)) | (_, None) => Ok(()),
        (_, Some(_)) => Err((
            DiagnosticCode::INCOMPATIBLE_BINDING,
            format!("resource '{}' cannot carry a constant", resource.label),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalEntry;
    use pinbind_board::{ActiveLevel, BoardCatalogBuilder, Direction, ResourceSpec};

    struct Fixture {
        resolver: BindingResolver,
        led: ResourceId,
        button: ResourceId,
        dip: ResourceId,
        bus: ResourceId,
        s_led: Ident,
        s_sw: Ident,
        s_other_led: Ident,
        s_key: Ident,
    }

    fn fixture() -> Fixture {
        let mut b = BoardCatalogBuilder::new("test");
        let led = b.add(ResourceSpec::new("LED0", IoType::Led, ["L1"])).unwrap();
        let button = b.add(ResourceSpec::new("KEY0", IoType::Button, ["K1"])).unwrap();
        let dip = b
            .add(ResourceSpec::new("SW", IoType::DipSwitch, ["S0", "S1", "S2", "S3"]))
            .unwrap();
        let bus = b
            .add(ResourceSpec::new("GPIO", IoType::Bus, ["G0", "G1", "G2", "G3"]))
            .unwrap();
        let board = Arc::new(b.build());

        let mut s = SignalCatalog::new();
        let s_led = s
            .add(SignalEntry::component("/main/LED1", vec![IoType::Led]).with_outputs(["led"]))
            .unwrap();
        let s_sw = s
            .add(SignalEntry::port("/main/sw", Direction::Input, 4))
            .unwrap();
        let s_other_led = s
            .add(
                SignalEntry::component("/main/LED2", vec![IoType::Led, IoType::Pin])
                    .with_outputs(["led"])
                    .with_active(ActiveLevel::Low),
            )
            .unwrap();
        let s_key = s
            .add(SignalEntry::component("/main/KEY", vec![IoType::Button]).with_inputs(["k"]))
            .unwrap();

        Fixture {
            resolver: BindingResolver::new(board, Arc::new(s), Arc::new(DiagnosticSink::new())),
            led,
            button,
            dip,
            bus,
            s_led,
            s_sw,
            s_other_led,
            s_key,
        }
    }

    #[test]
    fn compatible_resources_filters_catalog() {
        let f = fixture();
        let led = f.resolver.whole_signal_for(f.s_led).unwrap();
        assert_eq!(
            f.resolver.compatible_resources(&led),
            vec![f.led, f.resolver.board().synthetic(IoType::Unconnected).unwrap()]
        );
        let sw = f.resolver.whole_signal_for(f.s_sw).unwrap();
        let candidates = f.resolver.compatible_resources(&sw);
        assert!(candidates.contains(&f.dip));
        assert!(candidates.contains(&f.bus));
        assert!(!candidates.contains(&f.button));
        let all_zero = f.resolver.board().synthetic(IoType::AllZero).unwrap();
        let constant = f.resolver.board().synthetic(IoType::Constant).unwrap();
        assert!(candidates.contains(&all_zero));
        assert!(!candidates.contains(&constant));
    }

    #[test]
    fn bind_then_is_bound() {
        let mut f = fixture();
        let key = SignalKey::whole(f.s_led);
        assert_eq!(f.resolver.bind(key, f.led, None), vec![key]);
        assert!(f.resolver.is_bound(f.s_led));
        assert!(!f.resolver.sink().has_errors());
    }

    #[test]
    fn unbind_then_not_bound() {
        let mut f = fixture();
        let key = SignalKey::whole(f.s_led);
        f.resolver.bind(key, f.led, None);
        assert_eq!(f.resolver.unbind(key), vec![key]);
        assert!(!f.resolver.is_bound(f.s_led));
        assert!(f.resolver.unbind(key).is_empty());
    }

    #[test]
    fn same_resource_evicts_previous_signal() {
        let mut f = fixture();
        let first = SignalKey::whole(f.s_led);
        let second = SignalKey::whole(f.s_other_led);
        f.resolver.bind(first, f.led, None);
        let modified = f.resolver.bind(second, f.led, None);
        assert!(modified.contains(&first));
        assert!(modified.contains(&second));
        assert!(!f.resolver.is_bound(f.s_led));
        assert!(f.resolver.is_bound(f.s_other_led));
        assert_eq!(f.resolver.len(), 1);
    }

    #[test]
    fn bit_count_mismatch_is_rejected_without_mutation() {
        let mut f = fixture();
        let key = SignalKey::whole(f.s_led);
        f.resolver.bind(key, f.led, None);
        let modified = f.resolver.bind(SignalKey::whole(f.s_sw), f.led, None);
        assert!(modified.is_empty());
        let diags = f.resolver.sink().diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::BIT_COUNT_MISMATCH);
        assert!(f.resolver.is_bound(f.s_led));
    }

    #[test]
    fn incompatible_direction_is_rejected() {
        let mut f = fixture();
        let modified = f.resolver.bind(SignalKey::whole(f.s_key), f.led, None);
        assert!(modified.is_empty());
        assert_eq!(
            f.resolver.sink().diagnostics()[0].code,
            DiagnosticCode::INCOMPATIBLE_BINDING
        );
        assert!(f.resolver.is_empty());
    }

    #[test]
    fn out_of_range_bits_are_rejected() {
        let mut f = fixture();
        assert!(f
            .resolver
            .bind(SignalKey::bit(f.s_sw, 9), f.button, None)
            .is_empty());
        assert!(f
            .resolver
            .bind(SignalKey::bit(f.s_sw, 0), f.dip, Some(4))
            .is_empty());
        let codes: Vec<_> = f
            .resolver
            .sink()
            .diagnostics()
            .iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(
            codes,
            [DiagnosticCode::UNKNOWN_ENTITY, DiagnosticCode::UNKNOWN_ENTITY]
        );
    }

    #[test]
    fn per_bit_bindings_cover_signal() {
        let mut f = fixture();
        for bit in 0..3 {
            f.resolver
                .bind(SignalKey::bit(f.s_sw, bit), f.dip, Some(bit));
        }
        assert!(!f.resolver.is_bound(f.s_sw));
        f.resolver.bind(SignalKey::bit(f.s_sw, 3), f.button, None);
        assert!(f.resolver.is_bound(f.s_sw));
        assert_eq!(f.resolver.bindings_for(f.s_sw).len(), 4);
    }

    #[test]
    fn different_bits_of_one_resource_coexist() {
        let mut f = fixture();
        f.resolver.bind(SignalKey::bit(f.s_sw, 0), f.dip, Some(0));
        f.resolver.bind(SignalKey::bit(f.s_sw, 1), f.dip, Some(1));
        assert_eq!(f.resolver.len(), 2);
        // same resource bit: evicts
        let modified = f.resolver.bind(SignalKey::bit(f.s_sw, 2), f.dip, Some(1));
        assert_eq!(
            modified,
            vec![SignalKey::bit(f.s_sw, 1), SignalKey::bit(f.s_sw, 2)]
        );
        // whole resource: evicts every bit binding on it
        let modified = f.resolver.bind(SignalKey::whole(f.s_sw), f.dip, None);
        assert_eq!(modified.len(), 3);
        assert_eq!(f.resolver.len(), 1);
    }

    #[test]
    fn whole_bind_evicts_own_bit_bindings_and_vice_versa() {
        let mut f = fixture();
        f.resolver.bind(SignalKey::bit(f.s_sw, 0), f.button, None);
        f.resolver.bind(SignalKey::whole(f.s_sw), f.dip, None);
        assert!(f.resolver.binding(SignalKey::bit(f.s_sw, 0)).is_none());
        f.resolver.bind(SignalKey::bit(f.s_sw, 2), f.bus, Some(2));
        assert!(f.resolver.binding(SignalKey::whole(f.s_sw)).is_none());
        assert_eq!(f.resolver.len(), 1);
    }

    #[test]
    fn synthetic_resources_are_shared() {
        let mut f = fixture();
        let open = f.resolver.board().synthetic(IoType::Unconnected).unwrap();
        f.resolver.bind(SignalKey::whole(f.s_led), open, None);
        f.resolver.bind(SignalKey::whole(f.s_other_led), open, None);
        assert!(f.resolver.is_bound(f.s_led));
        assert!(f.resolver.is_bound(f.s_other_led));
    }

    #[test]
    fn constants_must_fit() {
        let mut f = fixture();
        let key = SignalKey::whole(f.s_sw);
        assert!(f.resolver.bind_constant(key, 0x1f).is_empty());
        assert_eq!(
            f.resolver.sink().diagnostics()[0].code,
            DiagnosticCode::CONSTANT_OVERFLOW
        );
        assert_eq!(f.resolver.bind_constant(key, 0xa), vec![key]);
        assert_eq!(f.resolver.binding(key).unwrap().constant, Some(0xa));
        let constant = f.resolver.board().synthetic(IoType::Constant).unwrap();
        // plain bind onto the constant resource carries no value
        assert!(f.resolver.bind(key, constant, None).is_empty());
        assert_eq!(f.resolver.binding(key).unwrap().constant, Some(0xa));
    }

    #[test]
    fn constant_needs_value_and_input() {
        let mut f = fixture();
        let constant = f.resolver.board().synthetic(IoType::Constant).unwrap();
        assert!(f
            .resolver
            .bind(SignalKey::whole(f.s_sw), constant, None)
            .is_empty());
        assert!(f
            .resolver
            .bind_constant(SignalKey::whole(f.s_led), 1)
            .is_empty());
        assert!(f.resolver.is_empty());
    }

    #[test]
    fn mixed_signal_has_no_candidates() {
        let mut s = SignalCatalog::new();
        let p = s
            .add(
                SignalEntry::component("/main/io", vec![])
                    .with_inputs(["i"])
                    .with_outputs(["o"]),
            )
            .unwrap();
        let f = fixture();
        let resolver = BindingResolver::new(
            Arc::clone(f.resolver.board()),
            Arc::new(s),
            Arc::new(DiagnosticSink::new()),
        );
        let whole = resolver.whole_signal_for(p).unwrap();
        assert!(resolver.compatible_resources(&whole).is_empty());
        assert_eq!(
            resolver.sink().diagnostics()[0].code,
            DiagnosticCode::MIXED_DIRECTION
        );
        let bits = resolver.bit_signals_for(p);
        assert!(!resolver.compatible_resources(&bits[0]).is_empty());
    }

    #[test]
    fn finalize_numbers_physical_bindings_by_path() {
        let mut f = fixture();
        let zero = f.resolver.board().synthetic(IoType::AllZero).unwrap();
        f.resolver.bind(SignalKey::whole(f.s_sw), f.dip, None);
        f.resolver.bind(SignalKey::whole(f.s_led), f.led, None);
        f.resolver.bind(SignalKey::whole(f.s_other_led), f.bus, Some(0));
        f.resolver.bind(SignalKey::whole(f.s_key), zero, None);

        let totals = f.resolver.finalize();
        assert_eq!(
            totals,
            IoWidth {
                input: 4,
                output: 2,
                inout: 0
            }
        );
        // "/main/LED1" < "/main/LED2" < "/main/sw"
        assert_eq!(
            f.resolver.sequence(SignalKey::whole(f.s_led)),
            Some(IoWidth::ZERO)
        );
        assert_eq!(
            f.resolver.sequence(SignalKey::whole(f.s_other_led)),
            Some(IoWidth::output(1))
        );
        assert_eq!(
            f.resolver.sequence(SignalKey::whole(f.s_sw)),
            Some(IoWidth::output(2))
        );
        assert_eq!(f.resolver.sequence(SignalKey::whole(f.s_key)), None);
    }

    #[test]
    fn finalize_is_idempotent_and_invalidated_by_mutation() {
        let mut f = fixture();
        f.resolver.bind(SignalKey::whole(f.s_led), f.led, None);
        let first = f.resolver.finalize();
        assert_eq!(f.resolver.finalize(), first);
        assert_eq!(f.resolver.totals(), Some(first));
        f.resolver.bind(SignalKey::whole(f.s_key), f.button, None);
        assert_eq!(f.resolver.totals(), None);
        assert_eq!(f.resolver.sequence(SignalKey::whole(f.s_led)), None);
    }

    #[test]
    fn rebuild_clears_bindings() {
        let mut f = fixture();
        f.resolver.bind(SignalKey::whole(f.s_led), f.led, None);
        f.resolver.finalize();
        f.resolver.rebuild(Arc::new(SignalCatalog::new()));
        assert!(f.resolver.is_empty());
        assert_eq!(f.resolver.totals(), None);
        assert!(!f.resolver.is_bound(f.s_led));
    }

    #[test]
    fn unbind_path_removes_all_bits() {
        let mut f = fixture();
        f.resolver.bind(SignalKey::bit(f.s_sw, 0), f.dip, Some(0));
        f.resolver.bind(SignalKey::bit(f.s_sw, 1), f.dip, Some(1));
        f.resolver.bind(SignalKey::whole(f.s_led), f.led, None);
        let removed = f.resolver.unbind_path(f.s_sw);
        assert_eq!(
            removed,
            vec![SignalKey::bit(f.s_sw, 0), SignalKey::bit(f.s_sw, 1)]
        );
        assert_eq!(f.resolver.len(), 1);
    }
}
