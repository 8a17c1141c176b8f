//! The interactive crop-gesture state machine.
//!
//! One session exists per open document. The machine is `Idle` until the
//! user arms cropping, then tracks a pointer drag until the region is
//! committed or cancelled. A successful commit hands a ready [`Figure`] back
//! to the caller and resets to `Idle`.

use image::DynamicImage;
use tracing::debug;

use crate::geometry::{Point, Rect, box_from_drag, clamp_point};
use crate::media::MediaStore;
use crate::model::{Document, DocumentId, Figure, FigureId, Stage};
use crate::store::notify::{Notice, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPhase {
    Idle,
    Cropping,
}

/// Source material for a crop commit.
pub enum CropSource<'a> {
    /// An image document shown at `displayed_*` size. `image` is `None`
    /// while the bitmap is still decoding.
    Image {
        document: &'a Document,
        image: Option<&'a DynamicImage>,
        displayed_width: f32,
        displayed_height: f32,
    },
    /// A non-image document: no page rendering exists, so the whole source
    /// document stands in for the region.
    WholeDocument { document: &'a Document },
}

impl<'a> CropSource<'a> {
    fn document(&self) -> &'a Document {
        match self {
            CropSource::Image { document, .. } => document,
            CropSource::WholeDocument { document } => document,
        }
    }
}

/// Result of a crop commit.
#[derive(Debug)]
pub enum CropOutcome {
    Committed(CommittedCrop),
    /// The drag was below the minimum size; the machine reset to idle.
    RejectedTooSmall,
    /// The source image was not ready or the bitmap could not be produced.
    /// The machine stays in `Cropping` so the user's drag is not lost.
    SourceNotReady,
    /// No crop was in progress.
    NotCropping,
}

#[derive(Debug)]
pub struct CommittedCrop {
    pub figure: Figure,
    /// True when the figure's image is the whole source document rather
    /// than a pixel-accurate region (non-image documents).
    pub full_page: bool,
    /// Stage lane inherited from the source document's upload label.
    pub suggested_stage: Option<Stage>,
}

/// Per-document crop gesture state.
#[derive(Debug)]
pub struct CropSession {
    document: DocumentId,
    viewport: Rect,
    min_crop_px: f32,
    phase: CropPhase,
    start: Option<Point>,
    end: Option<Point>,
}

impl CropSession {
    pub fn new(document: DocumentId, viewport: Rect, min_crop_px: f32) -> Self {
        CropSession {
            document,
            viewport,
            min_crop_px,
            phase: CropPhase::Idle,
            start: None,
            end: None,
        }
    }

    pub fn phase(&self) -> CropPhase {
        self.phase
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    /// The current drag rectangle, if a drag is in progress.
    pub fn region(&self) -> Option<Rect> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(box_from_drag(start, end)),
            _ => None,
        }
    }

    /// Arm the crop tool. Only `Idle -> Cropping`; a no-op otherwise.
    pub fn start_cropping(&mut self) {
        if self.phase == CropPhase::Idle {
            self.phase = CropPhase::Cropping;
        }
    }

    /// Begin a drag. Valid only while cropping.
    pub fn pointer_down(&mut self, pos: Point) {
        if self.phase != CropPhase::Cropping {
            return;
        }
        self.start = Some(pos);
        self.end = Some(pos);
    }

    /// Extend the drag. The position is clamped into the viewport so a
    /// pointer dragged past the image edge cannot grow the region.
    pub fn pointer_move(&mut self, pos: Point) {
        if self.phase != CropPhase::Cropping || self.start.is_none() {
            return;
        }
        self.end = Some(clamp_point(pos, &self.viewport));
    }

    /// Commit the drag as a new figure.
    pub fn commit(
        &mut self,
        source: &CropSource<'_>,
        media: &MediaStore,
        notifier: &mut dyn Notifier,
    ) -> CropOutcome {
        if self.phase != CropPhase::Cropping {
            return CropOutcome::NotCropping;
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return CropOutcome::NotCropping;
        };

        // Minimum-crop-size guard against accidental single-click drags.
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        if dx < self.min_crop_px || dy < self.min_crop_px {
            debug!(dx, dy, min = self.min_crop_px, "crop rejected: too small");
            notifier.notify(Notice::error("Crop area too small"));
            self.reset();
            return CropOutcome::RejectedTooSmall;
        }

        let document = source.document();
        let region = box_from_drag(start, end);

        let (image_handle, full_page) = match source {
            CropSource::Image {
                image,
                displayed_width,
                displayed_height,
                ..
            } => {
                let Some(image) = image else {
                    notifier.notify(Notice::error("Image is not ready yet"));
                    return CropOutcome::SourceNotReady;
                };
                let png = match crate::extract::crop::crop_to_png(
                    image,
                    &region,
                    *displayed_width,
                    *displayed_height,
                ) {
                    Ok(png) => png,
                    Err(e) => {
                        notifier.notify(Notice::error(format!("Could not crop image: {e}")));
                        return CropOutcome::SourceNotReady;
                    }
                };
                match media.put(&png) {
                    Ok(key) => (key, false),
                    Err(e) => {
                        notifier.notify(Notice::error(format!("Could not store figure: {e}")));
                        return CropOutcome::SourceNotReady;
                    }
                }
            }
            // Full-page reference stands in for a region until real page
            // rendering exists. Flagged to the caller via `full_page`.
            CropSource::WholeDocument { .. } => (document.media.clone(), true),
        };

        let figure = Figure {
            id: FigureId::generate(),
            title: format!("Figure from {}", document.name),
            description: String::new(),
            image: image_handle,
            page_number: None,
            document_id: Some(document.id.clone()),
        };

        debug!(document = %document.id, figure = %figure.id, full_page, "crop committed");
        notifier.notify(Notice::success(format!("Figure created from {}", document.name)));
        self.reset();

        CropOutcome::Committed(CommittedCrop {
            figure,
            full_page,
            suggested_stage: document.label,
        })
    }

    /// Abandon the drag without creating a figure.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Point the session at a different document, discarding any
    /// in-progress gesture.
    pub fn set_document(&mut self, document: DocumentId, viewport: Rect) {
        self.document = document;
        self.viewport = viewport;
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = CropPhase::Idle;
        self.start = None;
        self.end = None;
    }
}
