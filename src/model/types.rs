//! Core workflow data types: documents, figures, tasks, and the fixed
//! four-stage pipeline they move through.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::ids::{DocumentId, FigureId, TaskId, now_unix};

/// One of the four fixed pipeline stages a task is assigned to.
///
/// The enumeration is closed: there are no custom stages, and every string
/// boundary (session payloads, CLI arguments) must parse against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Design,
    Analyse,
    Dev,
    Testing,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 4] = [Stage::Design, Stage::Analyse, Stage::Dev, Stage::Testing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Design => "design",
            Stage::Analyse => "analyse",
            Stage::Dev => "dev",
            Stage::Testing => "testing",
        }
    }

    /// Human-readable stage name for report headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Design => "Design",
            Stage::Analyse => "Analyse",
            Stage::Dev => "Dev",
            Stage::Testing => "Testing",
        }
    }
}

impl FromStr for Stage {
    type Err = crate::error::WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "design" => Ok(Stage::Design),
            "analyse" => Ok(Stage::Analyse),
            "dev" => Ok(Stage::Dev),
            "testing" => Ok(Stage::Testing),
            other => Err(crate::error::WorkflowError::validation(format!(
                "unknown stage '{other}' (expected one of: design, analyse, dev, testing)"
            ))),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension-derived category of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Image,
    Pdf,
    Word,
    Excel,
    Powerpoint,
    Other,
}

impl DocumentKind {
    /// Classify a filename by its extension.
    pub fn from_filename(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "svg" => DocumentKind::Image,
            "pdf" => DocumentKind::Pdf,
            "doc" | "docx" => DocumentKind::Word,
            "xls" | "xlsx" | "csv" => DocumentKind::Excel,
            "ppt" | "pptx" => DocumentKind::Powerpoint,
            _ => DocumentKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Image => "image",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "word",
            DocumentKind::Excel => "excel",
            DocumentKind::Powerpoint => "powerpoint",
            DocumentKind::Other => "other",
        }
    }
}

/// An uploaded source file. Immutable after creation except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub kind: DocumentKind,
    /// Opaque handle to the byte content (media store key or external URI).
    pub media: String,
    pub uploaded_at_utc: i64,
    /// Stage lane the document was uploaded into, if any.
    #[serde(default)]
    pub label: Option<Stage>,
}

impl Document {
    pub fn new(name: impl Into<String>, media: impl Into<String>, label: Option<Stage>) -> Self {
        let name = name.into();
        let kind = DocumentKind::from_filename(&name);
        Document {
            id: DocumentId::generate(),
            name,
            kind,
            media: media.into(),
            uploaded_at_utc: now_unix(),
            label,
        }
    }
}

/// An extracted visual artifact, owned by exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub id: FigureId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Opaque handle to the extracted bitmap (media store key or URI).
    pub image: String,
    #[serde(default)]
    pub page_number: Option<u32>,
    /// Weak reference to the source document; lookup only, not ownership.
    #[serde(default)]
    pub document_id: Option<DocumentId>,
}

/// A unit of work holding an ordered list of figures.
///
/// Figure order is meaningful: it is the report presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(alias = "column")]
    pub stage: Stage,
}

impl Task {
    pub fn new(title: impl Into<String>, stage: Stage) -> Self {
        Task {
            id: TaskId::generate(),
            title: title.into(),
            figures: Vec::new(),
            stage,
        }
    }

    /// True when `figures` carries no duplicate figure ids.
    pub fn figure_ids_unique(&self) -> bool {
        let mut seen = std::collections::BTreeSet::new();
        self.figures.iter().all(|f| seen.insert(&f.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_parses_all_lowercase_names() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);
        }
    }

    #[test]
    fn test_stage_rejects_arbitrary_strings() {
        assert!("done".parse::<Stage>().is_err());
        assert!("Design".parse::<Stage>().is_err(), "parsing is case-sensitive");
        assert!("".parse::<Stage>().is_err());
    }

    #[test]
    fn test_document_kind_classification() {
        assert_eq!(DocumentKind::from_filename("photo.PNG"), DocumentKind::Image);
        assert_eq!(DocumentKind::from_filename("spec.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("notes.docx"), DocumentKind::Word);
        assert_eq!(DocumentKind::from_filename("data.xlsx"), DocumentKind::Excel);
        assert_eq!(DocumentKind::from_filename("deck.pptx"), DocumentKind::Powerpoint);
        assert_eq!(DocumentKind::from_filename("archive.zip"), DocumentKind::Other);
        assert_eq!(DocumentKind::from_filename("no_extension"), DocumentKind::Other);
    }

    #[test]
    fn test_task_figure_ids_unique() {
        let mut task = Task::new("t", Stage::Design);
        let fig = Figure {
            id: FigureId::from("fig-1"),
            title: "a".into(),
            description: String::new(),
            image: String::new(),
            page_number: None,
            document_id: None,
        };
        task.figures.push(fig.clone());
        assert!(task.figure_ids_unique());
        task.figures.push(fig);
        assert!(!task.figure_ids_unique());
    }
}
