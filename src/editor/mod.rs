pub mod pipeline;

pub use pipeline::SegmentDetector;
