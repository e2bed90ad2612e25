//! "Executive Cover" — single-page application cover on A4.
//!
//! Full-width photo on the upper two thirds, dark name bar beneath it with
//! the candidate name and role, a short tagline and contact line at the
//! bottom. Pairs with [`schwarz_beige`](super::schwarz_beige) as the cover
//! sheet of an application folder.

use crate::template::{
    BaseDocument, FieldSchema, FontFace, ImageField, LineField, Position, RectangleField, Size,
    TextField,
};
use crate::template::Template;

/// Display name of this preset.
pub const NAME: &str = "Executive Cover";

const NAVY: &str = "#12222e";
const GOLD: &str = "#c9a227";
const PAPER: &str = "#f5f1ea";

/// Build a fresh copy of the preset.
pub fn template() -> Template {
    let page: Vec<FieldSchema> = vec![
        // Backdrop and photo area
        FieldSchema::Rectangle(RectangleField {
            name: "backdrop".into(),
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 210.0,
                height: 297.0,
            },
            color: PAPER.into(),
            border_radius: 0.0,
        }),
        FieldSchema::Image(ImageField {
            name: "coverPhoto".into(),
            position: Position { x: 0.0, y: 0.0 },
            size: Size {
                width: 210.0,
                height: 190.0,
            },
            value: None,
            preserve_aspect: false,
        }),
        // Name bar
        FieldSchema::Rectangle(RectangleField {
            name: "nameBar".into(),
            position: Position { x: 0.0, y: 190.0 },
            size: Size {
                width: 210.0,
                height: 46.0,
            },
            color: NAVY.into(),
            border_radius: 0.0,
        }),
        FieldSchema::Text(TextField {
            name: "fullName".into(),
            position: Position { x: 20.0, y: 200.0 },
            size: Size {
                width: 170.0,
                height: 16.0,
            },
            value: "MAX MUSTERMANN".into(),
            font_size: 36.0,
            font_color: "#ffffff".into(),
            font_name: FontFace::HelveticaBold,
            character_spacing: 1.0,
            ..Default::default()
        }),
        FieldSchema::Text(TextField {
            name: "jobTitle".into(),
            position: Position { x: 20.0, y: 218.0 },
            size: Size {
                width: 170.0,
                height: 8.0,
            },
            value: "GESCHÄFTSFÜHRER".into(),
            font_size: 14.0,
            font_color: GOLD.into(),
            character_spacing: 4.0,
            ..Default::default()
        }),
        // Footer
        FieldSchema::Line(LineField {
            name: "accentRule".into(),
            position: Position { x: 20.0, y: 246.0 },
            size: Size {
                width: 60.0,
                height: 0.8,
            },
            color: GOLD.into(),
        }),
        FieldSchema::Text(TextField {
            name: "tagline".into(),
            position: Position { x: 20.0, y: 252.0 },
            size: Size {
                width: 170.0,
                height: 8.0,
            },
            value: "Bewerbung als Geschäftsführer".into(),
            font_size: 11.0,
            font_color: "#3c3c3c".into(),
            font_name: FontFace::HelveticaOblique,
            ..Default::default()
        }),
        FieldSchema::Text(TextField {
            name: "website".into(),
            position: Position { x: 20.0, y: 268.0 },
            size: Size {
                width: 170.0,
                height: 6.0,
            },
            value: "www.mustermann.de".into(),
            font_size: 10.0,
            font_color: NAVY.into(),
            ..Default::default()
        }),
    ];

    Template {
        base_document: BaseDocument::a4(),
        pages: vec![page],
    }
}
