//! Declarative field validation
//!
//! Rules are pure predicates over a field's string value. The form layer
//! (`state::forms`) decides which rules apply to which field and how the
//! verdicts drive the error indicators.

mod result;
mod rule;

pub use result::ValidationResult;
pub use rule::{Rule, Verdict};
