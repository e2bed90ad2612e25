//! # Template Catalog
//!
//! Built-in CV template presets. Each preset is self-contained in its own
//! module with a factory function returning a fresh [`Template`].
//!
//! ## Adding a New Preset
//!
//! 1. Create `src/catalog/mypreset.rs` with a `NAME` constant and a
//!    `template()` factory
//! 2. Add `pub mod mypreset;` below
//! 3. Add a row to [`PRESETS`]
//!
//! Factories are pure: every call returns an independently owned value, so
//! the designer can mutate one copy without affecting later loads. Field
//! names inside a preset are load-bearing — external content fills bind by
//! name, so renaming a field is a breaking change.

pub mod executive_cover;
pub mod schwarz_beige;

use crate::template::Template;

/// All built-in presets, in display order: `(display name, factory)`.
pub const PRESETS: &[(&str, fn() -> Template)] = &[
    (schwarz_beige::NAME, schwarz_beige::template),
    (executive_cover::NAME, executive_cover::template),
];

/// Display names of all presets, in display order.
pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _)| *name).collect()
}

/// Build a fresh template for the named preset (case-insensitive).
pub fn by_name(name: &str) -> Option<Template> {
    PRESETS
        .iter()
        .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
        .map(|(_, factory)| factory())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::FieldSchema;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_schwarz_beige_first_name_geometry() {
        let template = by_name("Schwarz Beige Modern").unwrap();
        let (_, field) = template.field("firstName").unwrap();
        let FieldSchema::Text(text) = field else {
            panic!("firstName must be a text field");
        };
        assert_eq!(text.position.x, 75.0);
        assert_eq!(text.position.y, 15.0);
        assert_eq!(text.font_size, 42.0);
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert!(by_name("schwarz beige modern").is_some());
        assert!(by_name("EXECUTIVE COVER").is_some());
        assert!(by_name("No Such Preset").is_none());
    }

    #[test]
    fn test_factories_return_independent_copies() {
        let mut first = by_name("Schwarz Beige Modern").unwrap();
        first.pages[0].clear();
        let second = by_name("Schwarz Beige Modern").unwrap();
        assert!(!second.pages[0].is_empty());
    }

    #[test]
    fn test_preset_field_names_unique_per_page() {
        for (name, factory) in PRESETS {
            let template = factory();
            for (page_idx, page) in template.pages.iter().enumerate() {
                let mut seen = HashSet::new();
                for field in page {
                    assert!(
                        seen.insert(field.name().to_string()),
                        "duplicate field '{}' on page {} of preset '{}'",
                        field.name(),
                        page_idx,
                        name
                    );
                }
            }
        }
    }

    #[test]
    fn test_preset_geometry_within_page_bounds() {
        for (name, factory) in PRESETS {
            let template = factory();
            let (width, height) = template.page_size();
            for page in &template.pages {
                for field in page {
                    let pos = field.position();
                    let size = field.size();
                    assert!(
                        pos.x >= 0.0
                            && pos.y >= 0.0
                            && pos.x + size.width <= width
                            && pos.y + size.height <= height,
                        "field '{}' of preset '{}' exceeds page bounds",
                        field.name(),
                        name
                    );
                    assert!(
                        size.width > 0.0 && size.height > 0.0,
                        "field '{}' of preset '{}' has non-positive size",
                        field.name(),
                        name
                    );
                }
            }
        }
    }
}
