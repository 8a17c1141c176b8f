pub mod crop;
pub mod policy;
pub mod session;

pub use crop::crop_to_png;
pub use policy::{ExtractionPlan, FigureExtractionPolicy, FixedPolicy, PlannedFigure, SyntheticPolicy};
pub use session::{CommittedCrop, CropOutcome, CropPhase, CropSession, CropSource};
