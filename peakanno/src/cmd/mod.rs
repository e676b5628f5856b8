pub mod annotate;
pub mod merge;
pub mod to_bed;
