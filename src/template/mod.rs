//! # Template Model
//!
//! A [`Template`] is a base document plus an ordered list of pages, where
//! each page is an ordered list of [`FieldSchema`] entries. Rendering order
//! is list order: later fields draw on top of earlier ones.
//!
//! Templates are plain values. Consumers treat them as immutable by
//! replacement: an edit produces a new `Template` with one field swapped,
//! never an in-place mutation shared between an editor and a previously
//! rendered snapshot.

pub mod field;
pub mod transfer;

use serde::{Deserialize, Serialize};

pub use field::{
    Alignment, FieldSchema, FontFace, ImageField, LineField, Position, RectangleField, Size,
    TextField,
};

/// A4 page width in millimeters.
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimeters.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// The surface that pages are overlaid onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaseDocument {
    /// An empty page of the given size in millimeters.
    Blank { width: f64, height: f64 },
    /// An embedded background image, stored as a data URI. `width` and
    /// `height` give the page size in millimeters.
    Embedded {
        data: String,
        width: f64,
        height: f64,
    },
}

impl BaseDocument {
    /// A blank A4 page, the default base for new templates.
    pub fn a4() -> Self {
        BaseDocument::Blank {
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
        }
    }

    /// Page size in millimeters.
    pub fn page_size(&self) -> (f64, f64) {
        match self {
            BaseDocument::Blank { width, height } => (*width, *height),
            BaseDocument::Embedded { width, height, .. } => (*width, *height),
        }
    }
}

impl Default for BaseDocument {
    fn default() -> Self {
        Self::a4()
    }
}

/// One page: fields in paint order.
pub type Page = Vec<FieldSchema>;

/// A complete CV template: base document plus field pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub base_document: BaseDocument,
    pub pages: Vec<Page>,
}

impl Template {
    /// New template over the given base, with no pages yet.
    pub fn new(base_document: BaseDocument) -> Self {
        Self {
            base_document,
            pages: Vec::new(),
        }
    }

    /// New template over a blank A4 page, with one empty field page.
    pub fn a4() -> Self {
        Self {
            base_document: BaseDocument::a4(),
            pages: vec![Vec::new()],
        }
    }

    /// Page size in millimeters, taken from the base document.
    pub fn page_size(&self) -> (f64, f64) {
        self.base_document.page_size()
    }

    /// Find a field by name. Returns the page index and the field.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldSchema)> {
        self.pages.iter().enumerate().find_map(|(idx, page)| {
            page.iter()
                .find(|f| f.name() == name)
                .map(|f| (idx, f))
        })
    }

    /// Produce a new template with the field of the same name replaced.
    ///
    /// Returns `None` when no field matches, leaving the caller's value
    /// untouched. This is the only supported edit operation on a shared
    /// template; in-place mutation of a field is reserved for values the
    /// caller exclusively owns.
    pub fn with_field_replaced(&self, schema: FieldSchema) -> Option<Template> {
        let (page_idx, _) = self.field(schema.name())?;
        let mut next = self.clone();
        for slot in &mut next.pages[page_idx] {
            if slot.name() == schema.name() {
                *slot = schema;
                break;
            }
        }
        Some(next)
    }

    /// Produce a new template with only the base document swapped.
    /// Pages are preserved unchanged.
    pub fn with_base_document(&self, base_document: BaseDocument) -> Template {
        Template {
            base_document,
            pages: self.pages.clone(),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::a4()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_field_template() -> Template {
        let mut template = Template::a4();
        template.pages[0].push(FieldSchema::Text(TextField {
            name: "firstName".into(),
            value: "MAX".into(),
            ..Default::default()
        }));
        template.pages[0].push(FieldSchema::Text(TextField {
            name: "lastName".into(),
            value: "MUSTERMANN".into(),
            ..Default::default()
        }));
        template
    }

    #[test]
    fn test_wire_format() {
        let template = Template::a4();
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["baseDocument"]["kind"], "blank");
        assert_eq!(json["baseDocument"]["width"], 210.0);
        assert_eq!(json["baseDocument"]["height"], 297.0);
        assert!(json["pages"].as_array().unwrap()[0]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_replace_field_keeps_others() {
        let template = two_field_template();
        let replaced = template
            .with_field_replaced(FieldSchema::Text(TextField {
                name: "firstName".into(),
                value: "LUKAS".into(),
                ..Default::default()
            }))
            .unwrap();

        // Original untouched, replacement applied, order preserved
        assert_eq!(template.pages[0].len(), 2);
        let FieldSchema::Text(original) = &template.pages[0][0] else {
            panic!("expected text");
        };
        assert_eq!(original.value, "MAX");
        let FieldSchema::Text(updated) = &replaced.pages[0][0] else {
            panic!("expected text");
        };
        assert_eq!(updated.value, "LUKAS");
        assert_eq!(replaced.pages[0][1].name(), "lastName");
    }

    #[test]
    fn test_replace_unknown_field_is_none() {
        let template = two_field_template();
        let result = template.with_field_replaced(FieldSchema::Text(TextField {
            name: "doesNotExist".into(),
            ..Default::default()
        }));
        assert!(result.is_none());
    }

    #[test]
    fn test_with_base_document_preserves_pages() {
        let template = two_field_template();
        let swapped = template.with_base_document(BaseDocument::Embedded {
            data: "data:image/png;base64,AAAA".into(),
            width: 210.0,
            height: 297.0,
        });
        assert_eq!(swapped.pages, template.pages);
        assert_eq!(swapped.page_size(), (210.0, 297.0));
    }

    #[test]
    fn test_field_lookup_across_pages() {
        let mut template = two_field_template();
        template.pages.push(vec![FieldSchema::Line(LineField {
            name: "rule".into(),
            ..Default::default()
        })]);
        let (page, field) = template.field("rule").unwrap();
        assert_eq!(page, 1);
        assert_eq!(field.kind_label(), "line");
        assert!(template.field("missing").is_none());
    }
}
