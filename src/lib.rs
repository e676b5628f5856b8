pub mod bed;
pub mod discover;
pub mod error;
pub mod homer;
pub mod merge;
pub mod peaks;
pub mod pipeline;
pub mod report;
pub mod scratch;
pub mod table;
pub mod utils;

pub use error::AnnotateError;
pub use pipeline::{AnnotateOptions, AnnotateSummary};
