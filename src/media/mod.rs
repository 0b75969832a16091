pub mod wav_source;
pub mod window;

pub use wav_source::WavWindowSource;
pub use window::{SampleBuffer, Window, WindowSource};
