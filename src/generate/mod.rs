//! # Generation Engine
//!
//! Turns a [`Template`] plus input records into a binary document. The
//! adapter itself only validates and dispatches; the actual drawing lives
//! behind [`RenderBackend`], with [`PdfBackend`] as the built-in
//! implementation.
//!
//! One input record produces one copy of the template's pages, so a batch
//! of N records yields one document with N page sets. Inputs bind to
//! fields by name: a matching input replaces the field's default content,
//! fields without a matching input render their defaults, and input keys
//! that match no field are ignored.

pub mod pdf;

use std::collections::{HashMap, HashSet};

use crate::error::SchabloneError;
use crate::template::Template;

pub use pdf::PdfBackend;

/// Content for one rendered copy, keyed by field name. Image fields
/// interpret their value as a data URI.
pub type InputRecord = HashMap<String, String>;

/// A rendering backend consumed as an opaque collaborator.
///
/// Implementations receive an already validated template and may assume
/// field names are unique per page and all geometry lies on the page.
pub trait RenderBackend: Send + Sync {
    /// Render one document containing one page set per input record.
    /// An empty input slice renders a single copy with default content.
    fn render(&self, template: &Template, inputs: &[InputRecord])
    -> Result<Vec<u8>, SchabloneError>;
}

/// Geometry slack for floating-point page bounds checks.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Check the schema invariants deferred to render time.
///
/// Construction accepts any geometry so the designer can drag fields
/// freely; rendering is where a template has to be well-formed.
pub fn validate(template: &Template) -> Result<(), SchabloneError> {
    let (page_width, page_height) = template.page_size();
    if page_width <= 0.0 || page_height <= 0.0 {
        return Err(SchabloneError::Render(format!(
            "page size {page_width}x{page_height} mm must be positive"
        )));
    }

    for (page_idx, page) in template.pages.iter().enumerate() {
        let mut seen = HashSet::new();
        for field in page {
            let name = field.name();
            if name.is_empty() {
                return Err(SchabloneError::Render(format!(
                    "unnamed {} field on page {page_idx}",
                    field.kind_label()
                )));
            }
            if !seen.insert(name) {
                return Err(SchabloneError::Render(format!(
                    "duplicate field name '{name}' on page {page_idx}"
                )));
            }

            let size = field.size();
            if size.width <= 0.0 || size.height <= 0.0 {
                return Err(SchabloneError::Render(format!(
                    "field '{name}' has non-positive size {}x{} mm",
                    size.width, size.height
                )));
            }

            let pos = field.position();
            let fits = pos.x >= -BOUNDS_EPSILON
                && pos.y >= -BOUNDS_EPSILON
                && pos.x + size.width <= page_width + BOUNDS_EPSILON
                && pos.y + size.height <= page_height + BOUNDS_EPSILON;
            if !fits {
                return Err(SchabloneError::Render(format!(
                    "field '{name}' at ({}, {}) size {}x{} mm exceeds the {page_width}x{page_height} mm page",
                    pos.x, pos.y, size.width, size.height
                )));
            }
        }
    }
    Ok(())
}

/// Validate, then render through the given backend.
pub fn render_with(
    backend: &dyn RenderBackend,
    template: &Template,
    inputs: &[InputRecord],
) -> Result<Vec<u8>, SchabloneError> {
    validate(template)?;
    backend.render(template, inputs)
}

/// Validate and render with the built-in PDF backend.
pub fn render(template: &Template, inputs: &[InputRecord]) -> Result<Vec<u8>, SchabloneError> {
    render_with(&PdfBackend::default(), template, inputs)
}

// ============================================================================
// TESTS
// ============================================================================
