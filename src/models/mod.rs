//! Domain models for Gestão 360.
//!
//! # Engine inputs
//!
//! - [`Employee`]: the slice of an employee record the alert rules read.
//! - [`Evaluation`]: only its pending/complete status matters.
//! - [`PdiLog`], [`OneOnOne`]: carried alongside so views can show them.
//!
//! # Engine output
//!
//! - [`Alert`]: a derived notification, rebuilt on every run and never stored.
//!
//! # Backend resources
//!
//! Everything else mirrors a REST resource of the backend. Wire names are
//! Portuguese; Rust field names are English and mapped with `serde(rename)`.
//! Decoding is the validation boundary: a record either decodes into its
//! typed form or fails with a decode error. Optional dates are one
//! exception, see [`dates::lenient`]. The other is list responses, where a
//! malformed row is dropped on its own, see [`records`].

mod agenda;
mod alert;
mod auth;
pub mod dates;
mod employee;
mod evaluation;
mod history;
pub mod id;
mod knowledge;
mod organization;
pub mod records;

pub use agenda::*;
pub use alert::*;
pub use auth::*;
pub use employee::*;
pub use evaluation::*;
pub use history::*;
pub use id::EntityId;
pub use knowledge::*;
pub use organization::*;
