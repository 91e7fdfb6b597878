//! Core engine: snapshot loading + heuristic evaluation + report rendering.
//!
//! Data flows strictly one way: reader -> evaluator -> renderer(s). The
//! evaluator is a pure function of its input document and an injected clock.

mod doc;
mod evaluate;
mod reader;
mod render;
mod rules;
mod uncertainty;

pub use doc::{is_truthy, ShapeError, SnapshotDoc};
pub use evaluate::{evaluate, evaluate_value};
pub use reader::{load_snapshot, LoadError};
pub use render::{render_json, render_markdown};
