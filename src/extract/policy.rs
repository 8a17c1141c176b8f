//! Pluggable figure-extraction policy.
//!
//! Deciding how many figures a document yields, what they show, and which
//! stage the resulting task lands in is document analysis, not engine
//! mechanics. The engine only consumes an [`ExtractionPlan`]; the default
//! [`SyntheticPolicy`] stands in until a real analyzer exists.

use sha2::{Digest, Sha256};

use crate::model::{Document, DocumentKind, Stage};

/// One figure the policy wants created.
#[derive(Debug, Clone)]
pub struct PlannedFigure {
    pub title: String,
    pub description: String,
    /// Opaque image handle (media key or placeholder URI).
    pub image: String,
    pub page_number: Option<u32>,
}

/// What to build from a document: target stage plus the figures.
#[derive(Debug, Clone)]
pub struct ExtractionPlan {
    pub stage: Stage,
    pub figures: Vec<PlannedFigure>,
}

pub trait FigureExtractionPolicy {
    fn plan(&self, document: &Document) -> ExtractionPlan;
}

/// Deterministic stand-in for real document analysis.
///
/// Figure count and target stage are derived from the SHA-256 of the
/// document id, so repeated runs over the same session are stable while
/// different documents still spread across the pipeline. Imagery is a
/// themed placeholder URI keyed by the document's kind.
#[derive(Debug, Clone)]
pub struct SyntheticPolicy {
    pub count_min: usize,
    pub count_max: usize,
}

impl Default for SyntheticPolicy {
    fn default() -> Self {
        SyntheticPolicy {
            count_min: 2,
            count_max: 4,
        }
    }
}

impl SyntheticPolicy {
    fn placeholder_image(kind: DocumentKind, index: usize) -> String {
        format!("placeholder:{}/{}", kind.as_str(), index + 1)
    }
}

impl FigureExtractionPolicy for SyntheticPolicy {
    fn plan(&self, document: &Document) -> ExtractionPlan {
        let digest = Sha256::digest(document.id.as_str().as_bytes());

        let span = self.count_max.saturating_sub(self.count_min) + 1;
        let count = self.count_min + (digest[0] as usize) % span;

        // A document uploaded into a stage lane keeps its lane; otherwise
        // the stage is hash-chosen.
        let stage = document
            .label
            .unwrap_or(Stage::ALL[(digest[1] as usize) % Stage::ALL.len()]);

        let figures = (0..count)
            .map(|i| PlannedFigure {
                title: format!("Figure {} from {}", i + 1, document.name),
                description: String::new(),
                image: Self::placeholder_image(document.kind, i),
                page_number: (document.kind == DocumentKind::Pdf).then_some(i as u32 + 1),
            })
            .collect();

        ExtractionPlan { stage, figures }
    }
}

/// Test policy returning a preassembled plan verbatim.
#[derive(Debug, Clone)]
pub struct FixedPolicy {
    pub plan: ExtractionPlan,
}

impl FigureExtractionPolicy for FixedPolicy {
    fn plan(&self, _document: &Document) -> ExtractionPlan {
        self.plan.clone()
    }
}
