const LOG_CONFIG_FILE: &str = "log4rs.yaml";

/// Logging stays disabled when the configuration cannot be loaded.
#[ctor::ctor]
fn init() {
    if let Err(e) = log4rs::init_file(LOG_CONFIG_FILE, Default::default()) {
        eprintln!(
            "Logging disabled, unable to load '{}': {}",
            LOG_CONFIG_FILE, e
        );
    }
}
