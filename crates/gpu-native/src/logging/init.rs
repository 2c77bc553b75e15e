use std::sync::Once;

/// Environment variable read before `RUST_LOG`, so a script runner can be
/// tuned without touching the filters of the host application.
pub const GPU_LOG_VAR: &str = "GPU_LOG";

/// How the bindings' logger is set up.
///
/// Filters use `env_logger` syntax, e.g. `"gpu_lua=debug,gpu_native=trace"`.
/// When `env_filter` is `None` the filter comes from [`GPU_LOG_VAR`], then
/// `RUST_LOG`, then falls back to `warn`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with a timestamp. Off by default; script output is
    /// usually read interactively.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { env_filter: None, write_style: env_logger::WriteStyle::Auto, timestamps: false }
    }
}

impl LoggingConfig {
    /// The filter string in effect, or `None` for the `warn` fallback.
    pub fn resolve_filter(&self, var: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.env_filter.clone().or_else(|| var(GPU_LOG_VAR)).or_else(|| var("RUST_LOG"))
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` as the global logger. Only the first call has any
/// effect, and a logger installed by the embedding host is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.resolve_filter(|name| std::env::var(name).ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| v.to_string())
    }

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig { env_filter: Some("gpu_lua=trace".into()), ..Default::default() };
        let filter = config.resolve_filter(vars(&[("GPU_LOG", "info"), ("RUST_LOG", "debug")]));
        assert_eq!(filter.as_deref(), Some("gpu_lua=trace"));
    }

    #[test]
    fn gpu_log_is_read_before_rust_log() {
        let config = LoggingConfig::default();
        assert_eq!(config.resolve_filter(vars(&[("GPU_LOG", "info"), ("RUST_LOG", "debug")])).as_deref(), Some("info"));
        assert_eq!(config.resolve_filter(vars(&[("RUST_LOG", "debug")])).as_deref(), Some("debug"));
        assert_eq!(config.resolve_filter(vars(&[])), None);
    }
}
