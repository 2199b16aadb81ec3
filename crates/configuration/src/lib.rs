// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{Config, Reporting};

/// Loads the application configuration from the `config.toml` file.
///
/// A missing file is not an error: the defaults apply and the command line
/// can still override everything. A present but malformed file is reported.
pub fn load_config() -> Result<Config, ConfigError> {
    if !std::path::Path::new("config.toml").exists() {
        return Ok(Config::default());
    }

    let builder = config::Config::builder()
        .add_source(config::File::with_name("config.toml"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
