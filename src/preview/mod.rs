//! # Live Preview Channel
//!
//! Message passing between an editing surface and an isolated preview
//! renderer. The editor pushes partial color updates; the preview rebuilds
//! its template with the merged palette and renders a fresh frame against
//! a fixed sample record. There is no completion acknowledgement back to
//! the editor: the channel is fire-and-forget and eventually consistent.
//!
//! The palette slot is a single-slot latest-wins reducer: the editor merges
//! each partial update into the current palette and publishes the merged
//! state with a monotonic sequence number. A preview that falls behind
//! skips intermediate palettes and renders the newest one; a stale state
//! (sequence lower than one already rendered) is dropped instead of
//! overwriting a newer frame.
//!
//! Preview lifecycle: `Loading` while the first frame builds, `Ready` once
//! the handshake is announced, then `Rendering`/`Idle` per update. Dropping
//! the [`EditorHandle`] tears the preview task down.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::color::Palette;
use crate::error::SchabloneError;
use crate::generate::{PdfBackend, RenderBackend};
use crate::sample;
use crate::template::Template;

/// Builds the preview template for a palette. Captures whatever the
/// session needs (theme markup, preset choice) so the preview itself
/// never touches the network.
pub type TemplateBuilder =
    Arc<dyn Fn(&Palette) -> Result<Template, SchabloneError> + Send + Sync>;

/// Wire messages exchanged between editor and preview surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PreviewMessage {
    /// Sent once by the preview when it becomes interactive.
    PreviewReady,
    /// Partial palette update. Omitted fields keep their current value.
    UpdateColors {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        primary_color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        accent_color: Option<String>,
        /// Editor-assigned monotonic sequence number.
        #[serde(default)]
        seq: u64,
    },
}

/// Preview-side lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    Loading,
    Ready,
    Rendering,
    Idle,
}

/// One rendered preview frame.
#[derive(Debug, Clone)]
pub struct PreviewFrame {
    /// Sequence number of the palette this frame was rendered from.
    pub seq: u64,
    pub pdf: Arc<Vec<u8>>,
}

/// The merged palette state carried through the channel slot.
#[derive(Debug, Clone)]
struct PaletteState {
    palette: Palette,
    seq: u64,
}

/// Editor-side handle to a running preview.
///
/// Owns the palette sender; dropping the handle closes the channel and
/// ends the preview task, releasing the session's template builder.
pub struct EditorHandle {
    palette_tx: watch::Sender<PaletteState>,
    ready_rx: watch::Receiver<bool>,
    frame_rx: watch::Receiver<Option<PreviewFrame>>,
    state_rx: watch::Receiver<PreviewState>,
    task: JoinHandle<()>,
}

impl EditorHandle {
    /// Spawn a preview over the default PDF backend and palette.
    pub fn spawn(builder: TemplateBuilder) -> Self {
        Self::spawn_with(builder, Arc::new(PdfBackend::default()), Palette::default())
    }

    /// Spawn a preview with an explicit backend and starting palette.
    pub fn spawn_with(
        builder: TemplateBuilder,
        backend: Arc<dyn RenderBackend>,
        initial: Palette,
    ) -> Self {
        let (palette_tx, palette_rx) = watch::channel(PaletteState {
            palette: initial,
            seq: 0,
        });
        let (ready_tx, ready_rx) = watch::channel(false);
        let (frame_tx, frame_rx) = watch::channel(None);
        let (state_tx, state_rx) = watch::channel(PreviewState::Loading);

        let task = tokio::spawn(preview_task(
            palette_rx, builder, backend, ready_tx, frame_tx, state_tx,
        ));

        Self {
            palette_tx,
            ready_rx,
            frame_rx,
            state_rx,
            task,
        }
    }

    /// Wait for the preview's one-time readiness handshake.
    pub async fn ready(&self) {
        let mut rx = self.ready_rx.clone();
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Merge a partial color update and wake the preview.
    /// Returns the sequence number assigned to the update.
    pub fn update_colors(&self, primary: Option<&str>, accent: Option<&str>) -> u64 {
        let mut assigned = 0;
        self.palette_tx.send_modify(|state| {
            state.palette.merge(primary, accent, None);
            state.seq += 1;
            assigned = state.seq;
        });
        assigned
    }

    /// Apply an editor-bound wire message.
    ///
    /// The sender's `seq` is ignored; the editor numbers updates itself so
    /// the sequence stays monotonic per channel.
    pub fn apply_message(&self, message: &PreviewMessage) {
        if let PreviewMessage::UpdateColors {
            primary_color,
            accent_color,
            ..
        } = message
        {
            self.update_colors(primary_color.as_deref(), accent_color.as_deref());
        }
    }

    /// The editor's current merged palette.
    pub fn palette(&self) -> Palette {
        self.palette_tx.borrow().palette.clone()
    }

    /// The most recent rendered frame, if any.
    pub fn latest_frame(&self) -> Option<PreviewFrame> {
        self.frame_rx.borrow().clone()
    }

    /// A receiver over rendered frames, for callers that wait for a frame
    /// outside whatever lock guards the handle itself.
    pub fn frames(&self) -> watch::Receiver<Option<PreviewFrame>> {
        self.frame_rx.clone()
    }

    /// Wait for a frame rendered from sequence `after_seq` or newer.
    pub async fn frame_at(&self, after_seq: u64) -> Option<PreviewFrame> {
        let mut rx = self.frame_rx.clone();
        let result = rx
            .wait_for(|frame| frame.as_ref().is_some_and(|f| f.seq >= after_seq))
            .await;
        match result {
            Ok(frame) => frame.clone(),
            Err(_) => None,
        }
    }

    /// Current preview lifecycle state.
    pub fn state(&self) -> PreviewState {
        *self.state_rx.borrow()
    }

    /// Close the channel and wait for the preview task to finish.
    pub async fn shutdown(self) {
        let EditorHandle {
            palette_tx, task, ..
        } = self;
        drop(palette_tx);
        let _ = task.await;
    }
}

async fn preview_task(
    mut palette_rx: watch::Receiver<PaletteState>,
    builder: TemplateBuilder,
    backend: Arc<dyn RenderBackend>,
    ready_tx: watch::Sender<bool>,
    frame_tx: watch::Sender<Option<PreviewFrame>>,
    state_tx: watch::Sender<PreviewState>,
) {
    // Loading: render the starting palette before announcing readiness
    let initial = palette_rx.borrow_and_update().clone();
    let mut last_seq = initial.seq;
    render_frame(&builder, backend.as_ref(), &initial, &frame_tx);
    let _ = ready_tx.send(true);
    let _ = state_tx.send(PreviewState::Ready);

    loop {
        // Channel closed means the editor was disposed
        if palette_rx.changed().await.is_err() {
            break;
        }
        let state = palette_rx.borrow_and_update().clone();
        if state.seq < last_seq {
            continue;
        }
        last_seq = state.seq;

        let _ = state_tx.send(PreviewState::Rendering);
        render_frame(&builder, backend.as_ref(), &state, &frame_tx);
        let _ = state_tx.send(PreviewState::Idle);
    }
}

fn render_frame(
    builder: &TemplateBuilder,
    backend: &dyn RenderBackend,
    state: &PaletteState,
    frame_tx: &watch::Sender<Option<PreviewFrame>>,
) {
    let rendered = builder(&state.palette).and_then(|template| {
        crate::generate::render_with(backend, &template, &[sample::sample_record()])
    });
    match rendered {
        Ok(bytes) => {
            let _ = frame_tx.send(Some(PreviewFrame {
                seq: state.seq,
                pdf: Arc::new(bytes),
            }));
        }
        // Keep the prior frame; the editor retriggers on the next edit
        Err(e) => tracing::warn!(error = %e, "preview render failed"),
    }
}

// ============================================================================
// TESTS
// ============================================================================
