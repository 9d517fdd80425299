//! Structural similarity engine for code-like artifacts: estimates how
//! similar two collections of methods, basic blocks, string literals, or
//! text sentences are via Normalized Compression Distance over a
//! Cesare-Xiang-style signature grammar, following the set-partitioning
//! comparison pipeline (identical / similar / new / deleted / skipped).
//!
//! Start at [`engine::ComparisonEngine`] to run a comparison, or
//! [`filter::Filter`] to see the built-in presets (`methods`, `basic_blocks`,
//! `strings`, `text`).

pub mod cli;
pub mod compressor;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod filter;
pub mod method_model;
pub mod report;
pub mod signature;
pub mod similarity;
pub mod text;
pub mod upstream;

pub use element::{Element, ElementData, ElementKind, Side};
pub use engine::ComparisonEngine;
pub use error::{ElsimError, Result};
pub use filter::Filter;
pub use report::{Reporter, Verbosity};
pub use similarity::SimilarityKernel;

/// Crate version, as declared in `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
