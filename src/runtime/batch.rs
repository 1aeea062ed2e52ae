use rayon::prelude::*;

use crate::{
    dispatch::{operator::OperatorKind, registry::DispatchRegistry},
    runtime::{error::VarError, generic_value::GenericValue},
};

/// Applies `op` pairwise across two equally long slices in parallel.
///
/// Results keep input order. The first failing pair (by index) aborts the
/// batch and its error is returned.
pub fn apply_elementwise(
    registry: &DispatchRegistry,
    op: OperatorKind,
    lhs: &[GenericValue],
    rhs: &[GenericValue],
) -> Result<Vec<GenericValue>, VarError> {
    if lhs.len() != rhs.len() {
        return Err(VarError::LengthMismatch {
            lhs: lhs.len(),
            rhs: rhs.len(),
        });
    }

    lhs.par_iter()
        .zip(rhs.par_iter())
        .map(|(a, b)| a.apply_in(registry, op, b))
        .collect()
}

/// Left fold of `values` under `op`, starting from `init`.
pub fn fold(
    registry: &DispatchRegistry,
    op: OperatorKind,
    init: GenericValue,
    values: &[GenericValue],
) -> Result<GenericValue, VarError> {
    values
        .iter()
        .try_fold(init, |acc, value| acc.apply_in(registry, op, value))
}
