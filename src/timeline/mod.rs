pub mod composer;
pub mod finalizer;
pub mod interval;
pub mod segments;

pub use composer::SoundComposer;
pub use finalizer::SegmentFinalizer;
pub use interval::Interval;
pub use segments::SegmentList;
