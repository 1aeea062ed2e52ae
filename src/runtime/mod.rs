//! Type-erased values.
//!
//! # Ownership
//! A [`value_cell::ValueCell`] owns exactly one payload and is the only
//! place the payload's static type is forgotten. Cells never share storage:
//! cloning copies the payload, and wrapping a referenced primitive copies it
//! into a box owned by the cell.
//!
//! [`generic_value::GenericValue`] is the client-facing handle. It owns one
//! cell, has value semantics, and routes every operator through the
//! dispatch registry in [`crate::dispatch`].
//!
//! Generic values are never payloads themselves; attempting to wrap one is
//! rejected with [`error::VarError::RecursiveAbstraction`].

pub mod batch;
pub mod erasable;
pub mod error;
pub mod generic_value;
pub mod scalar;
pub mod stats;
pub mod text_source;
pub mod type_id;
pub mod value_cell;
