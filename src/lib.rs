pub mod analyzers;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod sheet;

pub use analyzers::Model;
pub use error::{PipelineError, Result};
pub use pipeline::Pipeline;
