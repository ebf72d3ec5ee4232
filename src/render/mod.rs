//! Rendering outlines to output formats.

mod json;

pub use json::{runs_from_json, runs_to_json, to_json, JsonFormat};
