//! # Theme Compiler
//!
//! Turns a vector theme asset into a ready-to-edit [`Template`]: fetch the
//! markup, substitute the active palette into it, rasterize it into an
//! embedded base document, and attach the standard text overlay.
//!
//! Palette substitution is textual: every case-insensitive occurrence of a
//! *default* palette value in the markup becomes the corresponding current
//! value. The substitution has no awareness of the markup's structure, so
//! a hex string that happens to match a default gets themed too. Assets
//! authored for this pipeline use the default palette values only as theme
//! slots.

pub mod overlay;

use resvg::{tiny_skia, usvg};

use crate::color::{DEFAULT_ACCENT, DEFAULT_CIRCLE, DEFAULT_PRIMARY, Palette};
use crate::error::SchabloneError;
use crate::template::{Template, transfer};

/// Assumed page size when the markup declares no width/height/viewBox,
/// in svg user units (A4 at 72 units per inch).
const FALLBACK_WIDTH: f32 = 595.0;
const FALLBACK_HEIGHT: f32 = 842.0;

/// Raster width of the compiled base document, in pixels. Height follows
/// the markup's aspect ratio.
const RASTER_WIDTH: f64 = 1240.0;

/// Millimeters per svg user unit (1 unit = 1 pt).
const UNIT_TO_MM: f64 = 25.4 / 72.0;

/// Fetch a theme asset and compile it against the given palette.
///
/// The URL is cache-busted on every call so edits to the asset show up
/// immediately; the asset server must tolerate concurrent refetches.
pub async fn compile_theme(
    client: &reqwest::Client,
    asset_url: &str,
    palette: &Palette,
) -> Result<Template, SchabloneError> {
    let markup = fetch_markup(client, asset_url).await?;
    compile_markup(&markup, palette)
}

/// Compile already-fetched markup against the given palette.
pub fn compile_markup(markup: &str, palette: &Palette) -> Result<Template, SchabloneError> {
    let themed = substitute_palette(markup, palette);
    let (png, width_mm, height_mm) = rasterize(&themed)?;
    Ok(Template {
        base_document: transfer::embedded_base("image/png", &png, width_mm, height_mm),
        pages: vec![overlay::overlay_fields(palette)],
    })
}

/// Fetch raw theme markup, cache-busted. Callers that re-compile the same
/// asset against changing palettes keep the markup and call
/// [`compile_markup`] directly.
pub async fn fetch_markup(
    client: &reqwest::Client,
    asset_url: &str,
) -> Result<String, SchabloneError> {
    let url = cache_busted(asset_url);
    let response = client.get(&url).send().await.map_err(|e| {
        SchabloneError::AssetFetch(format!("Failed to fetch {}: {}", asset_url, e))
    })?;
    if !response.status().is_success() {
        return Err(SchabloneError::AssetFetch(format!(
            "Failed to fetch {}: HTTP {}",
            asset_url,
            response.status()
        )));
    }
    response.text().await.map_err(|e| {
        SchabloneError::AssetFetch(format!("Failed to read {}: {}", asset_url, e))
    })
}

/// Append a millisecond timestamp query parameter.
fn cache_busted(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{url}{separator}t={}",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Replace default palette values in the markup with the current ones.
///
/// Matching is case-insensitive and drops the leading `#`, so both
/// `fill="#B76E22"` and embedded style strings get themed. Slots still at
/// their default are left byte-for-byte untouched.
pub fn substitute_palette(markup: &str, palette: &Palette) -> String {
    let slots = [
        (DEFAULT_PRIMARY, palette.primary.as_str()),
        (DEFAULT_ACCENT, palette.accent.as_str()),
        (DEFAULT_CIRCLE, palette.circle.as_str()),
    ];
    let mut out = markup.to_string();
    for (default, current) in slots {
        if current.eq_ignore_ascii_case(default) {
            continue;
        }
        let needle = default.trim_start_matches('#');
        let replacement = current.trim_start_matches('#');
        out = replace_all_ignore_case(&out, needle, replacement);
    }
    out
}

/// Case-insensitive, non-overlapping replace-all.
fn replace_all_ignore_case(haystack: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let mut out = String::with_capacity(haystack.len());
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    let mut i = 0;
    while i < hay.len() {
        if i + pat.len() <= hay.len() && hay[i..i + pat.len()].eq_ignore_ascii_case(pat) {
            out.push_str(replacement);
            i += pat.len();
        } else {
            // Hex needles are ASCII, so byte stepping stays on char bounds
            let step = match haystack[i..].chars().next() {
                Some(c) => c.len_utf8(),
                None => break,
            };
            out.push_str(&haystack[i..i + step]);
            i += step;
        }
    }
    out
}

/// True when the root `<svg>` element declares neither explicit
/// dimensions nor a viewBox. usvg then reports the content bounding box
/// as the document size, which is not a page size; the fallback applies
/// instead.
fn lacks_intrinsic_size(markup: &str) -> bool {
    let Some(start) = markup.find("<svg") else {
        return true;
    };
    let rest = &markup[start..];
    let tag = match rest.find('>') {
        Some(end) => &rest[..end],
        None => rest,
    };
    !((tag.contains("width") && tag.contains("height")) || tag.contains("viewBox"))
}

/// Parse the markup and rasterize it at [`RASTER_WIDTH`].
///
/// Returns the PNG bytes plus the page size in millimeters derived from
/// the markup's intrinsic size, falling back to 595×842 user units when
/// the markup declares none.
fn rasterize(markup: &str) -> Result<(Vec<u8>, f64, f64), SchabloneError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(markup, &options)
        .map_err(|e| SchabloneError::Parse(format!("invalid vector markup: {e}")))?;

    let (page_width, page_height) = if lacks_intrinsic_size(markup) {
        (FALLBACK_WIDTH as f64, FALLBACK_HEIGHT as f64)
    } else {
        (tree.size().width() as f64, tree.size().height() as f64)
    };
    let scale = RASTER_WIDTH / page_width;
    let raster_height = (page_height * scale).round().max(1.0);

    let mut pixmap = tiny_skia::Pixmap::new(RASTER_WIDTH as u32, raster_height as u32)
        .ok_or_else(|| SchabloneError::Parse("vector markup has zero area".into()))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale as f32, scale as f32),
        &mut pixmap.as_mut(),
    );
    let png = pixmap
        .encode_png()
        .map_err(|e| SchabloneError::Render(format!("base document encoding failed: {e}")))?;

    let width_mm = page_width * UNIT_TO_MM;
    let height_mm = page_height * UNIT_TO_MM;
    Ok((png, width_mm, height_mm))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{BaseDocument, FieldSchema};
    use pretty_assertions::assert_eq;

    const THEME_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="595" height="842"><rect width="595" height="120" fill="#B76E22"/><rect y="120" width="200" height="722" fill="#8fa3b4"/><circle cx="500" cy="100" r="60" fill="#F4B4B7"/></svg>"##;

    #[test]
    fn test_substitute_replaces_only_overridden_slots() {
        let palette = Palette {
            primary: "#000000".into(),
            ..Default::default()
        };
        let themed = substitute_palette(THEME_SVG, &palette);
        assert!(themed.contains("#000000"));
        assert!(!themed.to_lowercase().contains("b76e22"));
        // Untouched slots keep their original casing
        assert!(themed.contains("#8fa3b4"));
        assert!(themed.contains("#F4B4B7"));
    }

    #[test]
    fn test_substitute_is_case_insensitive() {
        let palette = Palette {
            accent: "#112233".into(),
            ..Default::default()
        };
        let themed = substitute_palette("#8FA3B4 #8fa3b4 #8Fa3B4", &palette);
        assert_eq!(themed, "#112233 #112233 #112233");
    }

    #[test]
    fn test_substitute_hits_unrelated_matches_too() {
        // Textual substitution cannot tell a theme slot from a lookalike
        let palette = Palette {
            primary: "#ffffff".into(),
            ..Default::default()
        };
        let themed = substitute_palette(r#"<text id="b76e22-label"/>"#, &palette);
        assert_eq!(themed, r#"<text id="ffffff-label"/>"#);
    }

    #[test]
    fn test_default_palette_is_a_no_op() {
        assert_eq!(
            substitute_palette(THEME_SVG, &Palette::default()),
            THEME_SVG
        );
    }

    #[test]
    fn test_replace_all_ignore_case() {
        assert_eq!(
            replace_all_ignore_case("AbcABCabc", "abc", "x"),
            "xxx"
        );
        assert_eq!(replace_all_ignore_case("no match", "zzz", "x"), "no match");
        assert_eq!(replace_all_ignore_case("ü b76e22 ü", "b76e22", "000000"), "ü 000000 ü");
    }

    #[test]
    fn test_compile_markup_builds_full_template() {
        let template = compile_markup(THEME_SVG, &Palette::default()).unwrap();

        let BaseDocument::Embedded {
            data,
            width,
            height,
        } = &template.base_document
        else {
            panic!("expected embedded base document");
        };
        assert!(data.starts_with("data:image/png;base64,"));
        // 595x842 svg units map to A4 millimeters
        assert!((width - 209.9).abs() < 0.2, "width {width}");
        assert!((height - 297.0).abs() < 0.2, "height {height}");

        assert_eq!(template.pages.len(), 1);
        assert_eq!(template.pages[0].len(), 18);
    }

    #[test]
    fn test_compile_markup_binds_primary() {
        let palette = Palette {
            primary: "#0a0a0a".into(),
            ..Default::default()
        };
        let template = compile_markup(THEME_SVG, &palette).unwrap();
        let FieldSchema::Text(first_name) = template.field("firstName").unwrap().1 else {
            panic!("expected text field");
        };
        assert_eq!(first_name.font_color, "#0a0a0a");
    }

    #[test]
    fn test_lacks_intrinsic_size() {
        assert!(lacks_intrinsic_size(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#));
        assert!(lacks_intrinsic_size(r#"<svg xmlns="x"><rect width="10" height="10"/></svg>"#));
        assert!(!lacks_intrinsic_size(r#"<svg width="595" height="842"/>"#));
        assert!(!lacks_intrinsic_size(r#"<svg viewBox="0 0 300 400"/>"#));
    }

    #[test]
    fn test_compile_markup_fallback_size() {
        let template =
            compile_markup(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#, &Palette::default())
                .unwrap();
        let (width, height) = template.page_size();
        assert!((width - 209.9).abs() < 0.2);
        assert!((height - 297.0).abs() < 0.2);

        // Content alone is not an intrinsic size; the fallback still applies
        let template = compile_markup(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="100" height="100"/></svg>"#,
            &Palette::default(),
        )
        .unwrap();
        let (width, height) = template.page_size();
        assert!((width - 209.9).abs() < 0.2, "width {width}");
        assert!((height - 297.0).abs() < 0.2, "height {height}");
    }

    #[test]
    fn test_compile_markup_honors_view_box_size() {
        let template = compile_markup(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 400"/>"#,
            &Palette::default(),
        )
        .unwrap();
        let (width, height) = template.page_size();
        assert!((width - 300.0 * 25.4 / 72.0).abs() < 0.2);
        assert!((height - 400.0 * 25.4 / 72.0).abs() < 0.2);
    }

    #[test]
    fn test_compile_rejects_malformed_markup() {
        let err = compile_markup("this is not even xml <", &Palette::default()).unwrap_err();
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_cache_busted_separator() {
        assert!(cache_busted("http://x.test/theme.svg").contains("/theme.svg?t="));
        assert!(cache_busted("http://x.test/theme.svg?v=2").contains("&t="));
    }

    #[test]
    fn test_compiled_template_renders() {
        let template = compile_markup(THEME_SVG, &Palette::default()).unwrap();
        let bytes = crate::generate::render(&template, &[crate::sample::sample_record()]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
