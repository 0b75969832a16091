fn main() {
    if let Err(e) = silence_splitter_lib::run() {
        log::error!("This file could not be analyzed: {}", e);
        std::process::exit(1);
    }
}
