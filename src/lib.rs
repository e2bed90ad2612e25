//! # Schablone - CV Template Engine
//!
//! Schablone is a Rust library for declarative CV/document templates
//! rendered to PDF. It provides:
//!
//! - **Field schema model**: positioned, typed fields (text/image/line/rectangle)
//! - **Preset catalog**: built-in, fully specified CV layouts
//! - **Theme compiler**: SVG assets themed by palette and compiled to templates
//! - **Generation engine**: template + input records → binary PDF
//! - **Live preview channel**: editor↔preview message passing with latest-wins palettes
//! - **Template store**: pluggable persistence keyed by name slug
//!
//! ## Quick Start
//!
//! ```
//! use schablone::{catalog, generate, generate::InputRecord};
//!
//! // Load a built-in preset
//! let template = catalog::by_name("Schwarz Beige Modern")
//!     .expect("preset exists");
//!
//! // Fill it and render to PDF
//! let inputs = vec![InputRecord::from([
//!     ("firstName".to_string(), "LUKAS".to_string()),
//! ])];
//! let pdf = generate::render(&template, &inputs)?;
//! assert!(pdf.starts_with(b"%PDF"));
//! # Ok::<(), schablone::error::SchabloneError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`template`] | Field schema, page, and template value types |
//! | [`catalog`] | Built-in preset templates |
//! | [`compiler`] | SVG theme asset → template compilation |
//! | [`generate`] | Rendering adapter and PDF backend |
//! | [`preview`] | Editor↔preview live update channel |
//! | [`store`] | Template persistence boundary |
//! | [`color`] | Palette and hex color helpers |
//! | [`server`] | HTTP API |
//! | [`error`] | Error types |

pub mod catalog;
pub mod color;
pub mod compiler;
pub mod error;
pub mod generate;
pub mod preview;
pub mod sample;
pub mod server;
pub mod store;
pub mod template;

// Re-exports for convenience
pub use color::Palette;
pub use error::SchabloneError;
pub use template::{FieldSchema, Template};
