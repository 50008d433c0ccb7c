//! Pipelines.
//!
//! The two stages of corpus construction, and the light [Pipeline] trait they implement.
//!
//! - [harvest]: fetch documents and build the raw corpus.
//! - [annotate]: stream a corpus and annotate its text.
pub mod annotate;
pub mod harvest;
mod pipeline;

pub use annotate::{AnnotateConfig, AnnotatePipeline, AnnotationStats, Annotator, FailurePolicy};
pub use harvest::{Harvest, HarvestConfig, HarvestPipeline, Harvester};
pub use pipeline::Pipeline;
