//! Operator dispatch over runtime type pairs.
//!
//! The registry maps `(operator, lhs type, rhs type)` to a plain function
//! pointer. It is populated once by [`bootstrap::register_primitives`] and
//! treated as immutable afterwards, so concurrent lookups need no locking.
//! The process-wide instance is built on first use behind a run-once
//! barrier; call [`init`] at startup to pay that cost up front.
use std::sync::OnceLock;

use crate::dispatch::registry::DispatchRegistry;

pub mod bootstrap;
pub mod native;
pub mod operator;
pub mod registry;

static REGISTRY: OnceLock<DispatchRegistry> = OnceLock::new();

/// The process-wide registry, bootstrapped on first access.
pub fn global() -> &'static DispatchRegistry {
    REGISTRY.get_or_init(DispatchRegistry::bootstrap)
}

/// Forces the process-wide bootstrap.
pub fn init() {
    global();
}

#[cfg(test)]
mod native_test;
#[cfg(test)]
mod registry_test;
