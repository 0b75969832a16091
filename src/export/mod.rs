pub mod chunks;
pub mod edit_list;
pub mod timings;

pub use chunks::{file_stem, write_chunks};
pub use edit_list::write_edit_list;
pub use timings::{build_timings, write_timings_json, SoundTiming};
