//! Deterministic scene-prompt to VFX pipeline plan compiler.
//!
//! [`generate_pipeline_plan`] turns a free-text scene description (English,
//! Marathi, or a mix) into a [`PipelinePlan`] by matching cue phrases from a
//! [`VocabularyCatalog`]. No models, no randomness, no I/O.

pub mod catalog;
pub mod cue;
pub mod error_codes;
pub mod export_spec;
pub mod metadata;
pub mod normalize;
pub mod plan;
pub mod render_spec;
pub mod stages;

pub use catalog::VocabularyCatalog;
pub use export_spec::ExportSpec;
pub use metadata::{SceneAnalysis, SceneComplexity, SceneMetadata};
pub use plan::{generate_pipeline_plan, PipelinePlan, PlanGenerator};
pub use render_spec::RenderSpec;
pub use stages::{Stage, StageId, TechnicalItem};
