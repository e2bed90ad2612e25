//! Field schema types for the template layout model.
//!
//! All types derive `Serialize + Deserialize` so the same types work for
//! both Rust API construction and JSON template files.
//!
//! A field is one placeable element on a page: text, an embedded image, a
//! rule line, or a filled rectangle. Geometry is in millimeters with the
//! origin at the top-left of the page; font sizes are in points. Each kind
//! carries only the attributes valid for it — unknown attributes are
//! rejected at parse time, so a `fontSize` on a rectangle is an error, not
//! silently ignored data.

use serde::{Deserialize, Serialize};

/// A point in page coordinates, millimeters from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Width and height in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Horizontal text alignment within the field box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Built-in typeface selection.
///
/// Wire values are the standard PDF base-14 names, so template files stay
/// portable across rendering backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFace {
    #[default]
    #[serde(rename = "Helvetica")]
    Helvetica,
    #[serde(rename = "Helvetica-Bold")]
    HelveticaBold,
    #[serde(rename = "Helvetica-Oblique")]
    HelveticaOblique,
    #[serde(rename = "Times-Roman")]
    TimesRoman,
    #[serde(rename = "Times-Bold")]
    TimesBold,
    #[serde(rename = "Courier")]
    Courier,
}

fn default_text_color() -> String {
    crate::color::DARK_TEXT.to_string()
}

fn default_shape_color() -> String {
    crate::color::DARK_TEXT.to_string()
}

fn default_true() -> bool {
    true
}

/// Text field: a block of styled text bound to an input key.
///
/// `value` is the default content; a render input with the same `name`
/// replaces it for that render only. Long content wraps are not computed
/// here — `\n` in the content starts a new line, spaced by `line_height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextField {
    pub name: String,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub value: String,
    /// Font size in points.
    pub font_size: f64,
    #[serde(default = "default_text_color")]
    pub font_color: String,
    #[serde(default)]
    pub font_name: FontFace,
    /// Extra spacing between characters, in points.
    #[serde(default)]
    pub character_spacing: f64,
    /// Line height multiplier. `None` uses the renderer default.
    #[serde(default)]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub alignment: Alignment,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 50.0,
                height: 10.0,
            },
            value: String::new(),
            font_size: 12.0,
            font_color: default_text_color(),
            font_name: FontFace::default(),
            character_spacing: 0.0,
            line_height: None,
            alignment: Alignment::default(),
        }
    }
}

/// Image field: an embedded raster image scaled into the field box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageField {
    pub name: String,
    pub position: Position,
    pub size: Size,
    /// Default image as a data URI. A render input with the same `name`
    /// replaces it for that render.
    #[serde(default)]
    pub value: Option<String>,
    /// Keep the source aspect ratio when fitting into the box.
    #[serde(default = "default_true")]
    pub preserve_aspect: bool,
}

impl Default for ImageField {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 40.0,
                height: 40.0,
            },
            value: None,
            preserve_aspect: true,
        }
    }
}

/// Line field: a straight horizontal rule.
///
/// `size.width` is the length and `size.height` the stroke thickness,
/// both in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineField {
    pub name: String,
    pub position: Position,
    pub size: Size,
    #[serde(default = "default_shape_color")]
    pub color: String,
}

impl Default for LineField {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 50.0,
                height: 0.5,
            },
            color: default_shape_color(),
        }
    }
}

/// Rectangle field: a filled box, optionally with rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RectangleField {
    pub name: String,
    pub position: Position,
    pub size: Size,
    #[serde(default = "default_shape_color")]
    pub color: String,
    /// Corner radius in millimeters. 0 draws square corners.
    #[serde(default)]
    pub border_radius: f64,
}

impl Default for RectangleField {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 40.0,
                height: 20.0,
            },
            color: default_shape_color(),
            border_radius: 0.0,
        }
    }
}

/// The unified field enum.
///
/// The `#[serde(tag = "kind")]` attribute enables JSON like
/// `{"kind": "text", "name": "firstName", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSchema {
    Text(TextField),
    Image(ImageField),
    Line(LineField),
    Rectangle(RectangleField),
}

impl FieldSchema {
    /// The field's unique name (also its input-binding key).
    pub fn name(&self) -> &str {
        match self {
            FieldSchema::Text(f) => &f.name,
            FieldSchema::Image(f) => &f.name,
            FieldSchema::Line(f) => &f.name,
            FieldSchema::Rectangle(f) => &f.name,
        }
    }

    /// Top-left corner in page millimeters.
    pub fn position(&self) -> Position {
        match self {
            FieldSchema::Text(f) => f.position,
            FieldSchema::Image(f) => f.position,
            FieldSchema::Line(f) => f.position,
            FieldSchema::Rectangle(f) => f.position,
        }
    }

    /// Bounding box size in millimeters.
    pub fn size(&self) -> Size {
        match self {
            FieldSchema::Text(f) => f.size,
            FieldSchema::Image(f) => f.size,
            FieldSchema::Line(f) => f.size,
            FieldSchema::Rectangle(f) => f.size,
        }
    }

    /// Wire-format kind tag, for error messages.
    pub fn kind_label(&self) -> &'static str {
        match self {
            FieldSchema::Text(_) => "text",
            FieldSchema::Image(_) => "image",
            FieldSchema::Line(_) => "line",
            FieldSchema::Rectangle(_) => "rectangle",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_field_wire_format() {
        let json = r#"{
            "kind": "text",
            "name": "firstName",
            "position": {"x": 75.0, "y": 15.0},
            "size": {"width": 120.0, "height": 20.0},
            "value": "MAX",
            "fontSize": 42.0,
            "fontName": "Helvetica-Bold",
            "characterSpacing": 2.0
        }"#;
        let field: FieldSchema = serde_json::from_str(json).unwrap();
        let FieldSchema::Text(text) = &field else {
            panic!("expected text field");
        };
        assert_eq!(text.name, "firstName");
        assert_eq!(text.position, Position { x: 75.0, y: 15.0 });
        assert_eq!(text.font_size, 42.0);
        assert_eq!(text.font_name, FontFace::HelveticaBold);
        assert_eq!(text.character_spacing, 2.0);
        // Omitted attributes take their defaults
        assert_eq!(text.font_color, "#000000");
        assert_eq!(text.alignment, Alignment::Left);
        assert_eq!(text.line_height, None);
    }

    #[test]
    fn test_kind_tag_round_trip() {
        let field = FieldSchema::Rectangle(RectangleField {
            name: "sidebar".into(),
            color: "#8fa3b4".into(),
            ..Default::default()
        });
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["kind"], "rectangle");
        assert_eq!(json["borderRadius"], 0.0);
        let back: FieldSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_rejects_attribute_from_wrong_kind() {
        // fontSize is a text attribute; a rectangle carrying it is malformed
        let json = r#"{
            "kind": "rectangle",
            "name": "box",
            "position": {"x": 0.0, "y": 0.0},
            "size": {"width": 10.0, "height": 10.0},
            "fontSize": 12.0
        }"#;
        assert!(serde_json::from_str::<FieldSchema>(json).is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let json = r#"{"kind": "ellipse", "name": "dot"}"#;
        assert!(serde_json::from_str::<FieldSchema>(json).is_err());
    }

    #[test]
    fn test_font_face_wire_names() {
        assert_eq!(
            serde_json::to_value(FontFace::TimesRoman).unwrap(),
            "Times-Roman"
        );
        assert_eq!(
            serde_json::from_value::<FontFace>("Helvetica-Oblique".into()).unwrap(),
            FontFace::HelveticaOblique
        );
    }

    #[test]
    fn test_accessors_dispatch() {
        let line = FieldSchema::Line(LineField {
            name: "rule".into(),
            position: Position { x: 10.0, y: 140.0 },
            size: Size {
                width: 120.0,
                height: 0.8,
            },
            ..Default::default()
        });
        assert_eq!(line.name(), "rule");
        assert_eq!(line.kind_label(), "line");
        assert_eq!(line.size().height, 0.8);
    }
}
