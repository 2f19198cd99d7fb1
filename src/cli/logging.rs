use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Initialize logging; `quiet` keeps only errors
pub fn init_logging(debug: bool, quiet: bool) -> LevelFilter {
    let log_level = if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };

    if let Err(e) = SimpleLogger::new().with_level(log_level).init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    log_level
}
