//! Model-response parsing and field reconciliation.

mod reconciler;
pub mod rules;
pub mod schema;

pub use reconciler::Reconciler;
pub use schema::{LabelSpec, LabelTable, Target};
