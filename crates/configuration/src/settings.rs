use analytics::PeriodMode;
use serde::Deserialize;

/// The root configuration structure for the application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reporting: Reporting,
}

/// Presentation defaults for rendered reports.
#[derive(Debug, Clone, Deserialize)]
pub struct Reporting {
    /// Symbol appended to money amounts by the renderer. Formatting is
    /// purely a presentation concern; the engine only returns raw amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Window applied when the command line does not select one.
    #[serde(default = "default_period")]
    pub default_period: PeriodMode,
}

impl Default for Reporting {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            default_period: default_period(),
        }
    }
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_period() -> PeriodMode {
    PeriodMode::All
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::default();
        assert_eq!(config.reporting.currency_symbol, "€");
        assert_eq!(config.reporting.default_period, PeriodMode::All);
    }

    #[test]
    fn a_partial_file_keeps_the_remaining_defaults() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[reporting]\ndefault_period = \"month\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.reporting.default_period, PeriodMode::Month);
        assert_eq!(config.reporting.currency_symbol, "€");
    }
}
