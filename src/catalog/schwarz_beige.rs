//! "Schwarz Beige Modern" — two-column CV on A4.
//!
//! Beige sidebar on the left (photo, profile, skills, languages), main
//! column on the right (name block, experience, education), black contact
//! bar across the bottom. Default content is German sample data; every
//! text field binds to an input of the same name at render time.

use crate::template::{
    Alignment, BaseDocument, FieldSchema, FontFace, ImageField, LineField, Position,
    RectangleField, Size, TextField,
};
use crate::template::Template;

/// Display name of this preset.
pub const NAME: &str = "Schwarz Beige Modern";

const SCHWARZ: &str = "#1c1c1c";
const BEIGE: &str = "#ece1d3";
const BRONZE: &str = "#8a7a5f";
const BODY_GRAY: &str = "#3c3c3c";
const WHITE: &str = "#ffffff";

fn text(name: &str, x: f64, y: f64, width: f64, height: f64, font_size: f64) -> TextField {
    TextField {
        name: name.into(),
        position: Position { x, y },
        size: Size { width, height },
        font_size,
        ..Default::default()
    }
}

fn rule(name: &str, x: f64, y: f64, width: f64) -> FieldSchema {
    FieldSchema::Line(LineField {
        name: name.into(),
        position: Position { x, y },
        size: Size {
            width,
            height: 0.6,
        },
        color: SCHWARZ.into(),
    })
}

/// Build a fresh copy of the preset.
pub fn template() -> Template {
    let mut page: Vec<FieldSchema> = Vec::new();

    // Backdrop shapes
    page.push(FieldSchema::Rectangle(RectangleField {
        name: "sidebar".into(),
        position: Position { x: 0.0, y: 0.0 },
        size: Size {
            width: 65.0,
            height: 297.0,
        },
        color: BEIGE.into(),
        border_radius: 0.0,
    }));
    page.push(FieldSchema::Rectangle(RectangleField {
        name: "contactBar".into(),
        position: Position { x: 0.0, y: 271.0 },
        size: Size {
            width: 210.0,
            height: 26.0,
        },
        color: SCHWARZ.into(),
        border_radius: 0.0,
    }));

    // Sidebar: photo placeholder
    page.push(FieldSchema::Image(ImageField {
        name: "photo".into(),
        position: Position { x: 12.5, y: 15.0 },
        size: Size {
            width: 40.0,
            height: 40.0,
        },
        value: None,
        preserve_aspect: true,
    }));

    // Name block
    page.push(FieldSchema::Text(TextField {
        value: "MAX".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.5,
        ..text("firstName", 75.0, 15.0, 120.0, 18.0, 42.0)
    }));
    page.push(FieldSchema::Text(TextField {
        value: "MUSTERMANN".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.5,
        ..text("lastName", 75.0, 33.0, 120.0, 18.0, 42.0)
    }));
    page.push(FieldSchema::Text(TextField {
        value: "GESCHÄFTSFÜHRER".into(),
        font_color: BRONZE.into(),
        character_spacing: 3.0,
        ..text("jobTitle", 75.0, 54.0, 120.0, 8.0, 14.0)
    }));
    page.push(FieldSchema::Text(TextField {
        value: "Führung mit Weitblick und Verantwortung".into(),
        font_color: "#5a5a5a".into(),
        font_name: FontFace::HelveticaOblique,
        ..text("tagline", 75.0, 62.0, 120.0, 6.0, 10.0)
    }));

    // Sidebar sections
    page.push(FieldSchema::Text(TextField {
        value: "PROFIL".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.0,
        ..text("profileTitle", 10.0, 64.0, 48.0, 7.0, 13.0)
    }));
    page.push(rule("profileRule", 10.0, 70.5, 45.0));
    page.push(FieldSchema::Text(TextField {
        value: "Erfahrene Führungskraft mit mehr als\n15 Jahren Verantwortung im\nMittelstand. Schwerpunkte:\nStrategie, Vertrieb, Teamaufbau.".into(),
        font_color: BODY_GRAY.into(),
        line_height: Some(1.4),
        ..text("profileBody", 10.0, 74.0, 48.0, 34.0, 9.0)
    }));

    page.push(FieldSchema::Text(TextField {
        value: "KOMPETENZEN".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.0,
        ..text("skillsTitle", 10.0, 118.0, 48.0, 7.0, 13.0)
    }));
    page.push(rule("skillsRule", 10.0, 124.5, 45.0));
    page.push(FieldSchema::Text(TextField {
        value: "Strategische Planung\nChange Management\nVerhandlungsführung\nControlling & Reporting".into(),
        font_color: BODY_GRAY.into(),
        line_height: Some(1.5),
        ..text("skillsBody", 10.0, 128.0, 48.0, 36.0, 9.0)
    }));

    page.push(FieldSchema::Text(TextField {
        value: "SPRACHEN".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.0,
        ..text("languagesTitle", 10.0, 172.0, 48.0, 7.0, 13.0)
    }));
    page.push(rule("languagesRule", 10.0, 178.5, 45.0));
    page.push(FieldSchema::Text(TextField {
        value: "Deutsch (Muttersprache)\nEnglisch (verhandlungssicher)\nFranzösisch (Grundkenntnisse)".into(),
        font_color: BODY_GRAY.into(),
        line_height: Some(1.5),
        ..text("languagesBody", 10.0, 182.0, 48.0, 28.0, 9.0)
    }));

    // Main column sections
    page.push(FieldSchema::Text(TextField {
        value: "BERUFSERFAHRUNG".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.0,
        ..text("experienceTitle", 75.0, 82.0, 120.0, 7.0, 13.0)
    }));
    page.push(rule("experienceRule", 75.0, 88.5, 120.0));
    page.push(FieldSchema::Text(TextField {
        value: "2018 – heute  Geschäftsführer, Mustermann GmbH, Berlin\nUmsatzwachstum von 40 % in fünf Jahren.\n\n2012 – 2018  Vertriebsleiter, Beispiel AG, Hamburg\nAufbau des internationalen Vertriebs.".into(),
        font_color: BODY_GRAY.into(),
        line_height: Some(1.45),
        ..text("experienceBody", 75.0, 92.0, 120.0, 58.0, 10.0)
    }));

    page.push(FieldSchema::Text(TextField {
        value: "AUSBILDUNG".into(),
        font_color: SCHWARZ.into(),
        font_name: FontFace::HelveticaBold,
        character_spacing: 1.0,
        ..text("educationTitle", 75.0, 158.0, 120.0, 7.0, 13.0)
    }));
    page.push(rule("educationRule", 75.0, 164.5, 120.0));
    page.push(FieldSchema::Text(TextField {
        value: "2008 – 2012  Betriebswirtschaftslehre (M.Sc.)\nUniversität Mannheim\n\n2005 – 2008  Bankkaufmann (IHK)\nDeutsche Beispielbank, Frankfurt".into(),
        font_color: BODY_GRAY.into(),
        line_height: Some(1.45),
        ..text("educationBody", 75.0, 168.0, 120.0, 40.0, 10.0)
    }));

    // Contact bar
    page.push(FieldSchema::Text(TextField {
        value: "+49 170 1234567".into(),
        font_color: WHITE.into(),
        ..text("phone", 10.0, 278.0, 45.0, 6.0, 9.0)
    }));
    page.push(FieldSchema::Text(TextField {
        value: "max@mustermann.de".into(),
        font_color: WHITE.into(),
        ..text("email", 58.0, 278.0, 48.0, 6.0, 9.0)
    }));
    page.push(FieldSchema::Text(TextField {
        value: "Musterstraße 12, 10115 Berlin".into(),
        font_color: WHITE.into(),
        ..text("address", 108.0, 278.0, 52.0, 6.0, 9.0)
    }));
    page.push(FieldSchema::Text(TextField {
        value: "www.mustermann.de".into(),
        font_color: WHITE.into(),
        alignment: Alignment::Right,
        ..text("website", 162.0, 278.0, 40.0, 6.0, 9.0)
    }));

    Template {
        base_document: BaseDocument::a4(),
        pages: vec![page],
    }
}
