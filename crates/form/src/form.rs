//! Pure core of the registration form: field values, declarative validation
//! rules and the password strength scorer.
//!
//! Everything in this crate is synchronous and free of I/O. The interactive
//! shell (`zapis`) feeds the current [`FormValues`] through a [`Validator`]
//! on every edit and renders the resulting [`ValidationReport`] inline.

mod regions;
mod rules;
mod strength;
mod values;

pub use regions::{REGIONS, is_region};
pub use rules::{Field, Required, ValidationReport, Validator};
pub use strength::{Severity, Strength, StrengthLabel, score};
pub use values::FormValues;
