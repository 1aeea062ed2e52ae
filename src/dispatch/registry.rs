use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::{
    dispatch::{bootstrap, operator::OperatorKind},
    runtime::{
        error::VarError,
        stats,
        type_id::{PrimitiveKind, RuntimeTypeId},
        value_cell::ValueCell,
    },
};

/// Implementation of one operator for one ordered pair of payload types.
pub type DispatchFn = fn(&ValueCell, &ValueCell) -> Result<ValueCell, VarError>;

#[derive(Clone, Copy)]
pub struct DispatchEntry {
    pub lhs: RuntimeTypeId,
    pub rhs: RuntimeTypeId,
    pub func: DispatchFn,
}

impl fmt::Debug for DispatchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DispatchEntry({}, {})", self.lhs.label(), self.rhs.label())
    }
}

/// Type-pair matrix for a single operator: lhs id -> rhs id -> entry.
#[derive(Debug, Default)]
pub struct OperatorMatrix {
    rows: HashMap<RuntimeTypeId, HashMap<RuntimeTypeId, DispatchEntry>>,
    len: usize,
}

impl OperatorMatrix {
    /// Whether any entry has `id` as its left operand type.
    pub fn has_type(&self, id: RuntimeTypeId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn has_pair(&self, lhs: RuntimeTypeId, rhs: RuntimeTypeId) -> bool {
        self.rows
            .get(&lhs)
            .is_some_and(|row| row.contains_key(&rhs))
    }

    /// Binds `func` to `(lhs, rhs)` if the slot is free.
    ///
    /// Returns `false` and leaves the existing binding alone otherwise.
    pub fn set_operation(&mut self, lhs: RuntimeTypeId, rhs: RuntimeTypeId, func: DispatchFn) -> bool {
        match self.rows.entry(lhs).or_default().entry(rhs) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(DispatchEntry { lhs, rhs, func });
                self.len += 1;
                true
            }
        }
    }

    pub fn get_operation(&self, lhs: RuntimeTypeId, rhs: RuntimeTypeId) -> Option<DispatchFn> {
        self.rows
            .get(&lhs)
            .and_then(|row| row.get(&rhs))
            .map(|entry| entry.func)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.rows.values().flat_map(|row| row.values())
    }
}

/// Per-operator dispatch matrices.
///
/// Built once, then only read. [`DispatchRegistry::bootstrap`] populates it
/// for the primitive kinds; [`crate::dispatch::global`] holds the
/// process-wide instance.
#[derive(Debug)]
pub struct DispatchRegistry {
    matrices: [OperatorMatrix; OperatorKind::COUNT],
}

impl Default for DispatchRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchRegistry {
    /// An empty registry; every lookup misses.
    pub fn new() -> Self {
        Self {
            matrices: std::array::from_fn(|_| OperatorMatrix::default()),
        }
    }

    /// Builds the registry for every well-formed (operator, primitive,
    /// primitive) triple.
    pub fn bootstrap() -> Self {
        let mut registry = Self::new();
        bootstrap::register_primitives(&mut registry);
        registry
    }

    pub fn matrix(&self, op: OperatorKind) -> &OperatorMatrix {
        &self.matrices[op.index()]
    }

    pub fn has_type(&self, op: OperatorKind, id: RuntimeTypeId) -> bool {
        self.matrix(op).has_type(id)
    }

    pub fn has_pair(&self, op: OperatorKind, lhs: RuntimeTypeId, rhs: RuntimeTypeId) -> bool {
        self.matrix(op).has_pair(lhs, rhs)
    }

    pub fn set_operation(
        &mut self,
        op: OperatorKind,
        lhs: RuntimeTypeId,
        rhs: RuntimeTypeId,
        func: DispatchFn,
    ) -> bool {
        self.matrices[op.index()].set_operation(lhs, rhs, func)
    }

    pub fn get_operation(
        &self,
        op: OperatorKind,
        lhs: RuntimeTypeId,
        rhs: RuntimeTypeId,
    ) -> Option<DispatchFn> {
        self.matrix(op).get_operation(lhs, rhs)
    }

    /// Total bound slots across all operators.
    pub fn len(&self) -> usize {
        self.matrices.iter().map(OperatorMatrix::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the implementation bound to the operands' runtime types.
    ///
    /// Operands are passed through in order; nothing is coerced or swapped.
    pub fn dispatch(
        &self,
        op: OperatorKind,
        lhs: &ValueCell,
        rhs: &ValueCell,
    ) -> Result<ValueCell, VarError> {
        let lhs_id = lhs.runtime_type_id();
        let rhs_id = rhs.runtime_type_id();
        let Some(func) = self.get_operation(op, lhs_id, rhs_id) else {
            stats::record_dispatch_miss();
            return Err(VarError::UnsupportedOperandTypes {
                op,
                lhs: lhs_id.label(),
                rhs: rhs_id.label(),
            });
        };
        stats::record_dispatch_hit();
        func(lhs, rhs)
    }

    pub fn coverage(&self) -> CoverageReport {
        let candidates = PrimitiveKind::COUNT * PrimitiveKind::COUNT;
        let operators = OperatorKind::ALL
            .into_iter()
            .map(|op| {
                let mut unbound = Vec::new();
                for lhs in PrimitiveKind::ALL {
                    for rhs in PrimitiveKind::ALL {
                        if !self.has_pair(op, lhs.type_id(), rhs.type_id()) {
                            unbound.push((lhs, rhs));
                        }
                    }
                }
                OperatorCoverage {
                    operator: op,
                    symbol: op.symbol(),
                    candidates,
                    bound: self.matrix(op).len(),
                    unbound,
                }
            })
            .collect();

        CoverageReport {
            total_bound: self.len(),
            operators,
        }
    }

    /// Grid of primitive pairs for `op`: `x` where bound, `.` where not.
    /// Rows are left operands, columns right operands.
    pub fn render_matrix(&self, op: OperatorKind) -> String {
        let mut out = format!("{:<6}", op.symbol());
        for rhs in PrimitiveKind::ALL {
            out.push_str(&format!("{:>5}", rhs.label()));
        }
        out.push('\n');
        for lhs in PrimitiveKind::ALL {
            out.push_str(&format!("{:<6}", lhs.label()));
            for rhs in PrimitiveKind::ALL {
                let mark = if self.has_pair(op, lhs.type_id(), rhs.type_id()) {
                    "x"
                } else {
                    "."
                };
                out.push_str(&format!("{:>5}", mark));
            }
            out.push('\n');
        }
        out
    }

    /// SHA-256 over the sorted bound triples, hex encoded.
    ///
    /// Triples use the short primitive labels, not compiler type names, and
    /// are sorted, so the result depends only on which slots are bound.
    pub fn fingerprint(&self) -> String {
        let mut triples: Vec<String> = OperatorKind::ALL
            .into_iter()
            .flat_map(|op| {
                self.matrix(op).entries().map(move |entry| {
                    format!("{} {} {}", op.display_name(), entry.lhs.label(), entry.rhs.label())
                })
            })
            .collect();
        triples.sort();

        let mut hasher = Sha256::new();
        for triple in &triples {
            hasher.update(triple.as_bytes());
            hasher.update(b"\n");
        }
        to_hex(&hasher.finalize())
    }
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub total_bound: usize,
    pub operators: Vec<OperatorCoverage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperatorCoverage {
    pub operator: OperatorKind,
    pub symbol: &'static str,
    /// Ordered primitive pairs considered by the bootstrap.
    pub candidates: usize,
    /// Bound slots, including any non-primitive registrations.
    pub bound: usize,
    /// Primitive pairs left unbound.
    pub unbound: Vec<(PrimitiveKind, PrimitiveKind)>,
}

impl CoverageReport {
    pub fn for_operator(&self, op: OperatorKind) -> Option<&OperatorCoverage> {
        self.operators.iter().find(|entry| entry.operator == op)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<8} {:>6} {:>10}", "op", "bound", "candidates")?;
        for entry in &self.operators {
            writeln!(
                f,
                "{:<8} {:>6} {:>10}",
                entry.operator.display_name(),
                entry.bound,
                entry.candidates
            )?;
        }
        write!(f, "total    {:>6}", self.total_bound)
    }
}
