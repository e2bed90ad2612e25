//! # Pipeline Tests
//!
//! End-to-end checks across module boundaries: catalog → generation,
//! compiler → generation, export → import, store persistence, and the
//! live preview channel. Everything here is deterministic and offline;
//! the theme compiler runs against inline markup instead of a fetched
//! asset.
//!
//! PDF output embeds writer-controlled metadata (timestamps, object ids),
//! so assertions on rendered bytes are structural, not byte-golden.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use schablone::color::{self, Palette};
use schablone::compiler;
use schablone::generate::{self, InputRecord};
use schablone::preview::{EditorHandle, PreviewMessage, TemplateBuilder};
use schablone::store::{self, DirStore, MemoryStore, TemplateStore};
use schablone::template::{FieldSchema, Template, transfer};
use schablone::{catalog, sample};

/// Inline theme markup using all three default palette slots.
const THEME_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="595" height="842">
  <rect width="595" height="120" fill="#B76E22"/>
  <rect y="120" width="200" height="722" fill="#8fa3b4"/>
  <circle cx="500" cy="100" r="60" fill="#F4B4B7"/>
</svg>"##;

fn input(pairs: &[(&str, &str)]) -> InputRecord {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// CATALOG → GENERATION
// ============================================================================

#[test]
fn schwarz_beige_contract_and_render() {
    let template = catalog::by_name("Schwarz Beige Modern").unwrap();

    let (_, field) = template.field("firstName").unwrap();
    let FieldSchema::Text(text) = field else {
        panic!("firstName must be a text field");
    };
    assert_eq!((text.position.x, text.position.y), (75.0, 15.0));
    assert_eq!(text.font_size, 42.0);

    let pdf = generate::render(&template, &[input(&[("firstName", "LUKAS")])]).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn every_preset_renders_with_sample_content() {
    for name in catalog::preset_names() {
        let template = catalog::by_name(name).unwrap();
        let pdf = generate::render(&template, &[sample::sample_record()]).unwrap();
        assert!(pdf.starts_with(b"%PDF"), "preset '{name}' did not render");
    }
}

#[test]
fn batch_render_grows_with_input_count() {
    let template = catalog::by_name("Executive Cover").unwrap();
    let one = generate::render(&template, &[InputRecord::new()]).unwrap();
    let three = generate::render(
        &template,
        &[InputRecord::new(), InputRecord::new(), InputRecord::new()],
    )
    .unwrap();
    assert!(three.len() > one.len());
}

#[test]
fn render_rejects_out_of_bounds_edit() {
    let mut template = catalog::by_name("Schwarz Beige Modern").unwrap();
    // Drag the first field off the right edge of the page
    let Some(FieldSchema::Rectangle(rect)) = template.pages[0].first_mut() else {
        panic!("expected the sidebar rectangle first");
    };
    rect.position.x = 205.0;
    let err = generate::render(&template, &[]).unwrap_err();
    assert!(err.to_string().starts_with("Render error"));
}

// ============================================================================
// EXPORT / IMPORT
// ============================================================================

#[test]
fn export_import_round_trip_preserves_every_field() {
    for name in catalog::preset_names() {
        let template = catalog::by_name(name).unwrap();
        let json = transfer::export_json(&template).unwrap();
        let back = transfer::import_json(&json).unwrap();
        assert_eq!(back, template, "round trip diverged for preset '{name}'");
    }
}

#[test]
fn export_file_name_replaces_spaces() {
    assert_eq!(
        transfer::export_file_name("Schwarz Beige Modern"),
        "Schwarz_Beige_Modern.json"
    );
}

#[test]
fn import_failure_is_parse_error() {
    let err = transfer::import_json("{\"pages\": 3}").unwrap_err();
    assert!(err.to_string().starts_with("Parse error"));
}

// ============================================================================
// THEME COMPILER
// ============================================================================

#[test]
fn compiler_substitutes_only_overridden_slots() {
    let palette = Palette {
        primary: "#000000".into(),
        ..Default::default()
    };
    let themed = compiler::substitute_palette(THEME_SVG, &palette);

    // Every case variant of the primary default is gone
    assert!(!themed.to_lowercase().contains("b76e22"));
    assert!(themed.contains("#000000"));
    // The other two defaults keep their original bytes
    assert!(themed.contains("#8fa3b4"));
    assert!(themed.contains("#F4B4B7"));
}

#[test]
fn compiled_template_carries_palette_into_render() {
    let palette = Palette {
        primary: "#1a2b3c".into(),
        accent: "#334455".into(),
        ..Default::default()
    };
    let template = compiler::compile_markup(THEME_SVG, &palette).unwrap();

    // The overlay binds the name fields to the primary color
    let FieldSchema::Text(first_name) = template.field("firstName").unwrap().1 else {
        panic!("expected text field");
    };
    assert_eq!(first_name.font_color, "#1a2b3c");

    // And the whole compiled template renders against the sample record
    let pdf = generate::render(&template, &[sample::sample_record()]).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn compiler_rejects_malformed_markup_without_partial_output() {
    let err = compiler::compile_markup("<svg", &Palette::default()).unwrap_err();
    assert!(err.to_string().starts_with("Parse error"));
}

// ============================================================================
// COLOR HELPERS
// ============================================================================

#[test]
fn brightness_identity_and_clamping() {
    assert_eq!(color::adjust_brightness("#8fa3b4", 0).unwrap(), "#8fa3b4");
    assert_eq!(color::adjust_brightness("#000000", -50).unwrap(), "#000000");
    assert_eq!(color::adjust_brightness("#ffffff", 50).unwrap(), "#ffffff");
}

#[test]
fn contrast_boundary_is_inclusive() {
    // Luminance exactly 128.0 still selects light text
    assert_eq!(color::contrast_color("#808080").unwrap(), "#ffffff");
    assert_eq!(color::contrast_color("#818181").unwrap(), "#000000");
}

// ============================================================================
// TEMPLATE STORE
// ============================================================================

#[tokio::test]
async fn save_then_list_slugs_and_overwrites() {
    let store = MemoryStore::new();
    let template = catalog::by_name("Executive Cover").unwrap();

    let first = store::persist(&store, "My Template", &template)
        .await
        .unwrap();
    assert_eq!(first.id, "my-template");

    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = store::persist(&store, "My Template", &template)
        .await
        .unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.created_at, first.created_at);
}

#[tokio::test]
async fn dir_store_survives_reopen_and_delete() {
    let dir = tempfile::tempdir().unwrap();
    let template = catalog::by_name("Schwarz Beige Modern").unwrap();

    {
        let store = DirStore::new(dir.path());
        store::persist(&store, "Meine Vorlage", &template)
            .await
            .unwrap();
    }

    // A fresh store over the same directory sees the record
    let store = DirStore::new(dir.path());
    let record = store.get("meine-vorlage").await.unwrap().unwrap();
    assert_eq!(record.name, "Meine Vorlage");
    assert_eq!(record.template, template);

    assert!(store.delete("meine-vorlage").await.unwrap());
    assert!(!store.delete("meine-vorlage").await.unwrap());
    assert!(store.list().await.unwrap().is_empty());
}

// ============================================================================
// LIVE PREVIEW CHANNEL
// ============================================================================

/// Session builder like the designer's: compiles cached markup per palette.
fn markup_builder() -> TemplateBuilder {
    Arc::new(|palette: &Palette| compiler::compile_markup(THEME_SVG, palette))
}

#[tokio::test]
async fn preview_partial_update_keeps_prior_primary() {
    let handle = EditorHandle::spawn(markup_builder());
    handle.ready().await;

    let seq = handle.update_colors(Some("#101010"), None);
    handle.frame_at(seq).await.unwrap();

    // Accent-only update: the earlier primary must survive the merge
    let message: PreviewMessage =
        serde_json::from_str(r##"{"type": "updateColors", "accentColor": "#112233"}"##).unwrap();
    handle.apply_message(&message);

    let palette = handle.palette();
    assert_eq!(palette.primary, "#101010");
    assert_eq!(palette.accent, "#112233");
    handle.shutdown().await;
}

#[tokio::test]
async fn preview_renders_newest_palette() {
    let handle = EditorHandle::spawn(markup_builder());
    handle.ready().await;

    let mut last_seq = 0;
    for hex in ["#111111", "#222222", "#333333"] {
        last_seq = handle.update_colors(Some(hex), None);
    }
    let frame = handle.frame_at(last_seq).await.unwrap();
    assert_eq!(frame.seq, last_seq);
    assert!(frame.pdf.starts_with(b"%PDF"));
    handle.shutdown().await;
}
