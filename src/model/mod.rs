pub mod ids;
pub mod project;
pub mod types;

pub use ids::{DocumentId, FigureId, TaskId, fresh_id, now_unix};
pub use project::Project;
pub use types::{Document, DocumentKind, Figure, Stage, Task};
