//! PDF rendering backend.
//!
//! Maps the field schema's top-left millimeter coordinates onto PDF's
//! bottom-left point space and draws through `printpdf`. Text uses the
//! built-in base-14 faces, so no font files ship with the crate; the
//! trade-off is approximate text metrics (average advance width instead
//! of per-glyph widths) for center/right alignment.

use std::collections::HashMap;

use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, PolygonMode, Rgb, WindingOrder,
};

use crate::color::parse_hex;
use crate::error::SchabloneError;
use crate::generate::{InputRecord, RenderBackend};
use crate::template::{
    Alignment, BaseDocument, FieldSchema, FontFace, ImageField, LineField, RectangleField,
    Template, TextField, transfer,
};

/// Millimeters per point.
const PT_TO_MM: f64 = 25.4 / 72.0;
/// Baseline offset from the field top, as a fraction of the font size.
const ASCENT_RATIO: f64 = 0.75;
/// Average glyph advance as a fraction of the font size. Helvetica and
/// Times average out close to half an em for mixed-case Latin text.
const AVG_ADVANCE_RATIO: f64 = 0.5;
/// Line step multiplier when a text field sets no explicit line height.
const DEFAULT_LINE_HEIGHT: f64 = 1.15;
/// Bezier circle constant for rounded corners.
const KAPPA: f64 = 0.552_284_749_831;
/// Resolution used when embedding raster images.
const EMBED_DPI: f64 = 300.0;

fn mm_to_pt(mm: f64) -> f64 {
    mm / PT_TO_MM
}

/// The built-in rendering backend.
#[derive(Debug, Clone)]
pub struct PdfBackend {
    /// Document title written into the PDF metadata.
    pub title: String,
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self {
            title: "Lebenslauf".into(),
        }
    }
}

impl RenderBackend for PdfBackend {
    fn render(
        &self,
        template: &Template,
        inputs: &[InputRecord],
    ) -> Result<Vec<u8>, SchabloneError> {
        let default_record = [InputRecord::new()];
        let copies = if inputs.is_empty() {
            &default_record[..]
        } else {
            inputs
        };

        let (page_width, page_height) = template.page_size();
        let (doc, first_page, first_layer) = PdfDocument::new(
            &self.title,
            Mm(page_width as f32),
            Mm(page_height as f32),
            "content",
        );
        let fonts = FontSet::load(&doc)?;

        // The constructor already created page one; reuse it for the first
        // drawn page, then append.
        let mut initial = Some((first_page, first_layer));
        for record in copies {
            for fields in &template.pages {
                let (page_idx, layer_idx) = initial.take().unwrap_or_else(|| {
                    doc.add_page(Mm(page_width as f32), Mm(page_height as f32), "content")
                });
                let layer = doc.get_page(page_idx).get_layer(layer_idx);
                draw_base(&layer, &template.base_document, page_height)?;
                for field in fields {
                    draw_field(&layer, &fonts, field, record, page_height)?;
                }
            }
        }
        if template.pages.is_empty() {
            // Nothing consumed the constructor page; still paint the base
            if let Some((page_idx, layer_idx)) = initial {
                let layer = doc.get_page(page_idx).get_layer(layer_idx);
                draw_base(&layer, &template.base_document, page_height)?;
            }
        }

        doc.save_to_bytes()
            .map_err(|e| SchabloneError::Render(format!("document assembly failed: {e}")))
    }
}

/// All base-14 faces the schema can reference, loaded once per document.
struct FontSet {
    helvetica: IndirectFontRef,
    helvetica_bold: IndirectFontRef,
    helvetica_oblique: IndirectFontRef,
    times_roman: IndirectFontRef,
    times_bold: IndirectFontRef,
    courier: IndirectFontRef,
}

impl FontSet {
    fn load(doc: &PdfDocumentReference) -> Result<Self, SchabloneError> {
        let add = |face: BuiltinFont| {
            doc.add_builtin_font(face)
                .map_err(|e| SchabloneError::Render(format!("builtin font unavailable: {e}")))
        };
        Ok(Self {
            helvetica: add(BuiltinFont::Helvetica)?,
            helvetica_bold: add(BuiltinFont::HelveticaBold)?,
            helvetica_oblique: add(BuiltinFont::HelveticaOblique)?,
            times_roman: add(BuiltinFont::TimesRoman)?,
            times_bold: add(BuiltinFont::TimesBold)?,
            courier: add(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Helvetica => &self.helvetica,
            FontFace::HelveticaBold => &self.helvetica_bold,
            FontFace::HelveticaOblique => &self.helvetica_oblique,
            FontFace::TimesRoman => &self.times_roman,
            FontFace::TimesBold => &self.times_bold,
            FontFace::Courier => &self.courier,
        }
    }
}

fn rgb_color(hex: &str, field_name: &str) -> Result<Color, SchabloneError> {
    let [r, g, b] = parse_hex(hex)
        .map_err(|_| SchabloneError::Render(format!("field '{field_name}' has invalid color '{hex}'")))?;
    Ok(Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    )))
}

fn draw_base(
    layer: &PdfLayerReference,
    base: &BaseDocument,
    page_height: f64,
) -> Result<(), SchabloneError> {
    match base {
        BaseDocument::Blank { .. } => Ok(()),
        BaseDocument::Embedded {
            data,
            width,
            height,
        } => {
            let (_, bytes) = transfer::decode_data_uri(data)?;
            place_image(
                layer,
                &bytes,
                "baseDocument",
                0.0,
                0.0,
                *width,
                *height,
                page_height,
                false,
            )
        }
    }
}

fn draw_field(
    layer: &PdfLayerReference,
    fonts: &FontSet,
    field: &FieldSchema,
    record: &HashMap<String, String>,
    page_height: f64,
) -> Result<(), SchabloneError> {
    match field {
        FieldSchema::Text(f) => draw_text(layer, fonts, f, record.get(&f.name), page_height),
        FieldSchema::Image(f) => draw_image(layer, f, record.get(&f.name), page_height),
        FieldSchema::Line(f) => draw_line(layer, f, page_height),
        FieldSchema::Rectangle(f) => draw_rectangle(layer, f, page_height),
    }
}

fn draw_text(
    layer: &PdfLayerReference,
    fonts: &FontSet,
    field: &TextField,
    override_value: Option<&String>,
    page_height: f64,
) -> Result<(), SchabloneError> {
    let content = override_value.map(String::as_str).unwrap_or(&field.value);
    if content.is_empty() {
        return Ok(());
    }

    layer.set_fill_color(rgb_color(&field.font_color, &field.name)?);
    if field.character_spacing != 0.0 {
        layer.set_character_spacing(field.character_spacing as f32);
    }

    let font = fonts.get(field.font_name);
    let line_step = field.font_size * field.line_height.unwrap_or(DEFAULT_LINE_HEIGHT) * PT_TO_MM;
    // First baseline sits one ascent below the field top
    let mut baseline = page_height - field.position.y - field.font_size * ASCENT_RATIO * PT_TO_MM;

    for line in content.split('\n') {
        if !line.is_empty() {
            let x = field.position.x + alignment_offset(field, line);
            layer.use_text(
                line,
                field.font_size as f32,
                Mm(x as f32),
                Mm(baseline as f32),
                font,
            );
        }
        baseline -= line_step;
    }

    if field.character_spacing != 0.0 {
        layer.set_character_spacing(0.0);
    }
    Ok(())
}

/// Horizontal shift of a line inside its field box.
///
/// Width is estimated from the average advance, not measured per glyph,
/// so centered text can drift by a few characters' worth on extreme
/// content. Left alignment never shifts.
fn alignment_offset(field: &TextField, line: &str) -> f64 {
    if field.alignment == Alignment::Left {
        return 0.0;
    }
    let chars = line.chars().count() as f64;
    let advance_pt = chars * (field.font_size * AVG_ADVANCE_RATIO + field.character_spacing);
    let slack = (field.size.width - advance_pt * PT_TO_MM).max(0.0);
    match field.alignment {
        Alignment::Left => 0.0,
        Alignment::Center => slack / 2.0,
        Alignment::Right => slack,
    }
}

fn draw_image(
    layer: &PdfLayerReference,
    field: &ImageField,
    override_value: Option<&String>,
    page_height: f64,
) -> Result<(), SchabloneError> {
    // Placeholder fields with no content are simply skipped
    let Some(uri) = override_value.map(String::as_str).or(field.value.as_deref()) else {
        return Ok(());
    };
    let (_, bytes) = transfer::decode_data_uri(uri)?;
    place_image(
        layer,
        &bytes,
        &field.name,
        field.position.x,
        field.position.y,
        field.size.width,
        field.size.height,
        page_height,
        field.preserve_aspect,
    )
}

#[allow(clippy::too_many_arguments)]
fn place_image(
    layer: &PdfLayerReference,
    bytes: &[u8],
    field_name: &str,
    x: f64,
    y_top: f64,
    box_width: f64,
    box_height: f64,
    page_height: f64,
    preserve_aspect: bool,
) -> Result<(), SchabloneError> {
    let decoded = printpdf::image_crate::load_from_memory(bytes).map_err(|e| {
        SchabloneError::Render(format!("field '{field_name}': image decode failed: {e}"))
    })?;
    // Alpha channels are not representable here; flatten to RGB up front
    let buffer = decoded.to_rgb8();
    let (px_width, px_height) = buffer.dimensions();

    // Natural size at the embedding resolution, before scaling
    let natural_width = px_width as f64 * 25.4 / EMBED_DPI;
    let natural_height = px_height as f64 * 25.4 / EMBED_DPI;
    let mut scale_x = box_width / natural_width;
    let mut scale_y = box_height / natural_height;
    let (mut offset_x, mut offset_y) = (0.0, 0.0);
    if preserve_aspect {
        let scale = scale_x.min(scale_y);
        offset_x = (box_width - natural_width * scale) / 2.0;
        offset_y = (box_height - natural_height * scale) / 2.0;
        scale_x = scale;
        scale_y = scale;
    }

    let translate_y = page_height - y_top - box_height + offset_y;
    let image = Image::from_dynamic_image(&printpdf::image_crate::DynamicImage::ImageRgb8(buffer));
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((x + offset_x) as f32)),
            translate_y: Some(Mm(translate_y as f32)),
            scale_x: Some(scale_x as f32),
            scale_y: Some(scale_y as f32),
            dpi: Some(EMBED_DPI as f32),
            ..Default::default()
        },
    );
    Ok(())
}

fn draw_line(
    layer: &PdfLayerReference,
    field: &LineField,
    page_height: f64,
) -> Result<(), SchabloneError> {
    layer.set_outline_color(rgb_color(&field.color, &field.name)?);
    layer.set_outline_thickness(mm_to_pt(field.size.height) as f32);

    // Stroke along the vertical middle of the field box
    let y = page_height - field.position.y - field.size.height / 2.0;
    let line = Line {
        points: vec![
            (
                Point::new(Mm(field.position.x as f32), Mm(y as f32)),
                false,
            ),
            (
                Point::new(
                    Mm((field.position.x + field.size.width) as f32),
                    Mm(y as f32),
                ),
                false,
            ),
        ],
        is_closed: false,
    };
    layer.add_line(line);
    Ok(())
}

fn draw_rectangle(
    layer: &PdfLayerReference,
    field: &RectangleField,
    page_height: f64,
) -> Result<(), SchabloneError> {
    layer.set_fill_color(rgb_color(&field.color, &field.name)?);

    let left = field.position.x;
    let right = field.position.x + field.size.width;
    let top = page_height - field.position.y;
    let bottom = top - field.size.height;

    let ring = if field.border_radius <= 0.0 {
        square_rect_ring(left, bottom, right, top)
    } else {
        let radius = field
            .border_radius
            .min(field.size.width / 2.0)
            .min(field.size.height / 2.0);
        rounded_rect_ring(left, bottom, right, top, radius)
    };
    layer.add_polygon(Polygon {
        rings: vec![ring],
        mode: PolygonMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    Ok(())
}

/// Square-corner rectangle outline, closed by repeating the start point.
fn square_rect_ring(left: f64, bottom: f64, right: f64, top: f64) -> Vec<(Point, bool)> {
    let pt = |x: f64, y: f64| (Point::new(Mm(x as f32), Mm(y as f32)), false);
    vec![
        pt(left, top),
        pt(right, top),
        pt(right, bottom),
        pt(left, bottom),
        pt(left, top),
    ]
}

/// Clockwise rounded-rectangle outline with bezier corners.
///
/// Entries flagged `true` are bezier control points, matching the
/// convention of the path types.
fn rounded_rect_ring(
    left: f64,
    bottom: f64,
    right: f64,
    top: f64,
    radius: f64,
) -> Vec<(Point, bool)> {
    let k = KAPPA * radius;
    let pt = |x: f64, y: f64, ctrl: bool| (Point::new(Mm(x as f32), Mm(y as f32)), ctrl);
    vec![
        pt(left + radius, top, false),
        pt(right - radius, top, false),
        pt(right - radius + k, top, true),
        pt(right, top - radius + k, true),
        pt(right, top - radius, false),
        pt(right, bottom + radius, false),
        pt(right, bottom + radius - k, true),
        pt(right - radius + k, bottom, true),
        pt(right - radius, bottom, false),
        pt(left + radius, bottom, false),
        pt(left + radius - k, bottom, true),
        pt(left, bottom + radius - k, true),
        pt(left, bottom + radius, false),
        pt(left, top - radius, false),
        pt(left, top - radius + k, true),
        pt(left + radius - k, top, true),
        pt(left + radius, top, false),
    ]
}

// ============================================================================
// TESTS
// ============================================================================
