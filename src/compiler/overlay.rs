//! Field overlay for compiled theme templates.
//!
//! Themed backgrounds carry all shapes and decoration in the rasterized
//! base document, so the overlay is text only: a fixed set of 18 named
//! fields in document coordinates. The names are the binding contract
//! with sample records and saved content fills; the name and job title
//! take their font color from the active palette's primary slot.

use crate::color::Palette;
use crate::template::{Alignment, FieldSchema, FontFace, Position, Size, TextField};

const HEADING_GRAY: &str = "#2a2a2a";
const BODY_GRAY: &str = "#555555";

fn text(name: &str, x: f64, y: f64, width: f64, height: f64, font_size: f64) -> TextField {
    TextField {
        name: name.into(),
        position: Position { x, y },
        size: Size { width, height },
        font_size,
        ..Default::default()
    }
}

fn section_title(name: &str, x: f64, y: f64, width: f64, value: &str) -> FieldSchema {
    FieldSchema::Text(TextField {
        value: value.into(),
        font_color: HEADING_GRAY.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.0,
        ..text(name, x, y, width, 7.0, 12.0)
    })
}

fn section_body(name: &str, x: f64, y: f64, width: f64, height: f64) -> FieldSchema {
    FieldSchema::Text(TextField {
        font_color: BODY_GRAY.into(),
        line_height: Some(1.45),
        ..text(name, x, y, width, height, 9.5)
    })
}

/// The 18 overlay text fields, positioned for the themed A4 layout.
pub fn overlay_fields(palette: &Palette) -> Vec<FieldSchema> {
    vec![
        // Name block
        FieldSchema::Text(TextField {
            value: "MAX".into(),
            font_color: palette.primary.clone(),
            font_name: FontFace::HelveticaBold,
            character_spacing: 1.5,
            ..text("firstName", 20.0, 18.0, 90.0, 14.0, 34.0)
        }),
        FieldSchema::Text(TextField {
            value: "MUSTERMANN".into(),
            font_color: HEADING_GRAY.into(),
            font_name: FontFace::HelveticaBold,
            character_spacing: 1.5,
            ..text("lastName", 20.0, 32.0, 90.0, 14.0, 34.0)
        }),
        FieldSchema::Text(TextField {
            value: "GESCHÄFTSFÜHRER".into(),
            font_color: palette.primary.clone(),
            character_spacing: 2.5,
            ..text("jobTitle", 20.0, 48.0, 90.0, 7.0, 13.0)
        }),
        FieldSchema::Text(TextField {
            value: "Führung mit Weitblick".into(),
            font_color: BODY_GRAY.into(),
            font_name: FontFace::HelveticaOblique,
            ..text("tagline", 20.0, 56.0, 90.0, 6.0, 10.0)
        }),
        // Contact block, right-aligned against the header edge
        FieldSchema::Text(TextField {
            value: "+49 170 1234567".into(),
            alignment: Alignment::Right,
            ..text("phone", 140.0, 20.0, 60.0, 5.0, 9.0)
        }),
        FieldSchema::Text(TextField {
            value: "max@mustermann.de".into(),
            alignment: Alignment::Right,
            ..text("email", 140.0, 26.0, 60.0, 5.0, 9.0)
        }),
        FieldSchema::Text(TextField {
            value: "Musterstraße 12, Berlin".into(),
            alignment: Alignment::Right,
            ..text("address", 140.0, 32.0, 60.0, 5.0, 9.0)
        }),
        FieldSchema::Text(TextField {
            value: "www.mustermann.de".into(),
            alignment: Alignment::Right,
            ..text("website", 140.0, 38.0, 60.0, 5.0, 9.0)
        }),
        // Left column
        section_title("profileTitle", 20.0, 72.0, 80.0, "PROFIL"),
        section_body("profileBody", 20.0, 79.0, 80.0, 30.0),
        section_title("experienceTitle", 20.0, 116.0, 80.0, "BERUFSERFAHRUNG"),
        section_body("experienceBody", 20.0, 123.0, 80.0, 48.0),
        section_title("educationTitle", 20.0, 178.0, 80.0, "AUSBILDUNG"),
        section_body("educationBody", 20.0, 185.0, 80.0, 34.0),
        // Right column
        section_title("skillsTitle", 115.0, 116.0, 80.0, "KOMPETENZEN"),
        section_body("skillsBody", 115.0, 123.0, 80.0, 40.0),
        section_title("languagesTitle", 115.0, 178.0, 80.0, "SPRACHEN"),
        section_body("languagesBody", 115.0, 185.0, 80.0, 30.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overlay_has_eighteen_text_fields() {
        let fields = overlay_fields(&Palette::default());
        assert_eq!(fields.len(), 18);
        assert!(fields
            .iter()
            .all(|f| matches!(f, FieldSchema::Text(_))));
    }

    #[test]
    fn test_primary_binds_name_and_job_title() {
        let palette = Palette {
            primary: "#123456".into(),
            ..Default::default()
        };
        let fields = overlay_fields(&palette);
        let color_of = |name: &str| {
            fields
                .iter()
                .find_map(|f| match f {
                    FieldSchema::Text(t) if t.name == name => Some(t.font_color.clone()),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(color_of("firstName"), "#123456");
        assert_eq!(color_of("jobTitle"), "#123456");
        // Everything else keeps its own color
        assert_eq!(color_of("lastName"), HEADING_GRAY);
    }
}
