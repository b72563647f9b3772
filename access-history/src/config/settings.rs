use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use access_history_pipeline::projection::{ChartConfig, TimelineConfig};
use access_history_shared::types::TimeWindow;
use tracing::warn;

use crate::HistoryError;

/// Default per-lookup resolver timeout in milliseconds.
const DEFAULT_RESOLVER_TIMEOUT_MS: u64 = 3_000;

/// Default chart width in pixels.
const DEFAULT_CHART_WIDTH: f64 = 1125.0;

/// Default chart height in pixels.
const DEFAULT_CHART_HEIGHT: f64 = 400.0;

/// Default number of ranked actors drawn as bars.
const DEFAULT_MAX_BARS: usize = 10;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable console output.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse "json" or "pretty" (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }

    /// Read `LOG_FORMAT` without logging, for use before the subscriber
    /// exists. Unset or invalid values give `Pretty`; [`Settings::from_env`]
    /// reports the invalid case once logging is up.
    pub fn from_env() -> Self {
        non_empty_var("LOG_FORMAT")
            .and_then(|raw| Self::parse(&raw))
            .unwrap_or(Self::Pretty)
    }
}

/// Everything the binary reads from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub history_path: PathBuf,
    pub directory_path: Option<PathBuf>,
    pub name_service_url: Option<String>,
    pub resolver_timeout: Duration,
    pub chart: ChartConfig,
    pub timeline: TimelineConfig,
    pub window: Option<TimeWindow>,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ACCESS_HISTORY_PATH`: Transaction history JSON file (required)
    /// - `DIRECTORY_PATH`: Account-attributes JSON for the static directory
    /// - `NAME_SERVICE_URL`: Base URL of a live name service
    /// - `RESOLVER_TIMEOUT_MS`: Per-lookup timeout (default: 3000)
    /// - `CHART_WIDTH` / `CHART_HEIGHT`: Chart size in pixels (default: 1125 / 400)
    /// - `MAX_BARS`: Ranked actors drawn as bars (default: 10)
    /// - `WINDOW_START` / `WINDOW_END`: Brush window in epoch seconds, both or neither
    /// - `LOG_FORMAT`: "json" or "pretty" (default: pretty)
    ///
    /// Unparseable numbers, and chart sizes that are not finite and positive,
    /// fall back to their default with a warning.
    pub fn from_env() -> Result<Self, HistoryError> {
        let history_path = env::var("ACCESS_HISTORY_PATH")
            .map(PathBuf::from)
            .map_err(|_| HistoryError::config("ACCESS_HISTORY_PATH must be set"))?;
        let directory_path = non_empty_var("DIRECTORY_PATH").map(PathBuf::from);
        let name_service_url = non_empty_var("NAME_SERVICE_URL");
        let resolver_timeout =
            Duration::from_millis(parse_or("RESOLVER_TIMEOUT_MS", DEFAULT_RESOLVER_TIMEOUT_MS));

        let width = parse_dimension("CHART_WIDTH", DEFAULT_CHART_WIDTH);
        let height = parse_dimension("CHART_HEIGHT", DEFAULT_CHART_HEIGHT);
        let chart = ChartConfig {
            max_bars: parse_or("MAX_BARS", DEFAULT_MAX_BARS),
            ..ChartConfig::with_size(width, height)
        };
        let timeline = TimelineConfig::with_size(width, height);

        Ok(Self {
            history_path,
            directory_path,
            name_service_url,
            resolver_timeout,
            chart,
            timeline,
            window: window_from_env()?,
            log_format: log_format_from_env(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = non_empty_var(name) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(variable = name, value = %raw, default = %default, "Invalid numeric setting, using default");
            default
        }
    }
}

fn parse_dimension(name: &str, default: f64) -> f64 {
    let value = parse_or(name, default);
    if value.is_finite() && value > 0.0 {
        return value;
    }
    warn!(variable = name, value = %value, default = %default, "Chart size must be finite and positive, using default");
    default
}

fn log_format_from_env() -> LogFormat {
    let Some(raw) = non_empty_var("LOG_FORMAT") else {
        return LogFormat::Pretty;
    };
    LogFormat::parse(&raw).unwrap_or_else(|| {
        warn!(value = %raw, "Invalid LOG_FORMAT, defaulting to 'pretty'");
        LogFormat::Pretty
    })
}

fn parse_optional(name: &str) -> Option<u64> {
    let raw = non_empty_var(name)?;
    match raw.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Invalid timestamp setting, ignoring");
            None
        }
    }
}

fn window_from_env() -> Result<Option<TimeWindow>, HistoryError> {
    match (parse_optional("WINDOW_START"), parse_optional("WINDOW_END")) {
        (Some(start), Some(end)) => TimeWindow::new(start, end)
            .map(Some)
            .map_err(|e| HistoryError::config(format!("Invalid brush window: {e}"))),
        (None, None) => Ok(None),
        _ => {
            warn!("Only one of WINDOW_START and WINDOW_END is set, showing the full range");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARIABLES: [&str; 10] = [
        "ACCESS_HISTORY_PATH",
        "DIRECTORY_PATH",
        "NAME_SERVICE_URL",
        "RESOLVER_TIMEOUT_MS",
        "CHART_WIDTH",
        "CHART_HEIGHT",
        "MAX_BARS",
        "WINDOW_START",
        "WINDOW_END",
        "LOG_FORMAT",
    ];

    // Helper function to clear environment variables
    fn clear_env_vars() {
        for name in VARIABLES {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_missing_history_path() {
        clear_env_vars();

        let result = Settings::from_env();
        assert!(matches!(result, Err(HistoryError::ConfigError(_))));
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env_vars();
        env::set_var("ACCESS_HISTORY_PATH", "history.json");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.history_path, PathBuf::from("history.json"));
        assert!(settings.directory_path.is_none());
        assert!(settings.name_service_url.is_none());
        assert_eq!(settings.resolver_timeout, Duration::from_millis(3_000));
        assert_eq!(settings.chart, ChartConfig::default());
        assert_eq!(settings.timeline, TimelineConfig::default());
        assert!(settings.window.is_none());
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear_env_vars();
        env::set_var("ACCESS_HISTORY_PATH", "history.json");
        env::set_var("NAME_SERVICE_URL", "http://names.local/");
        env::set_var("RESOLVER_TIMEOUT_MS", "250");
        env::set_var("CHART_WIDTH", "800");
        env::set_var("MAX_BARS", "5");
        env::set_var("WINDOW_START", "100");
        env::set_var("WINDOW_END", "200");
        env::set_var("LOG_FORMAT", "JSON");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.name_service_url.as_deref(), Some("http://names.local/"));
        assert_eq!(settings.resolver_timeout, Duration::from_millis(250));
        assert_eq!(settings.chart.width, 800.0);
        assert_eq!(settings.chart.height, 400.0);
        assert_eq!(settings.chart.max_bars, 5);
        assert_eq!(settings.timeline.width, 800.0);
        assert_eq!(settings.window, Some(TimeWindow::new(100, 200).unwrap()));
        assert_eq!(settings.log_format, LogFormat::Json);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_invalid_numbers_use_defaults() {
        clear_env_vars();
        env::set_var("ACCESS_HISTORY_PATH", "history.json");
        env::set_var("RESOLVER_TIMEOUT_MS", "soon");
        env::set_var("MAX_BARS", "-3");
        env::set_var("WINDOW_START", "yesterday");
        env::set_var("WINDOW_END", "200");

        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.resolver_timeout, Duration::from_millis(3_000));
        assert_eq!(settings.chart.max_bars, 10);
        assert!(settings.window.is_none());

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_non_positive_or_non_finite_chart_size_uses_defaults() {
        for (width, height) in [("NaN", "-5"), ("inf", "0"), ("-inf", "-0.5")] {
            clear_env_vars();
            env::set_var("ACCESS_HISTORY_PATH", "history.json");
            env::set_var("CHART_WIDTH", width);
            env::set_var("CHART_HEIGHT", height);

            let settings = Settings::from_env().unwrap();
            assert_eq!(settings.chart.width, 1125.0, "width {width}");
            assert_eq!(settings.chart.height, 400.0, "height {height}");
            assert_eq!(settings.timeline.width, 1125.0);
            assert_eq!(settings.timeline.height, 400.0);
        }

        clear_env_vars();
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" Pretty "), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("yaml"), None);
        assert_eq!(LogFormat::parse(""), None);
    }

    #[test]
    #[serial]
    fn test_invalid_log_format_defaults_to_pretty() {
        clear_env_vars();
        env::set_var("ACCESS_HISTORY_PATH", "history.json");
        env::set_var("LOG_FORMAT", "yaml");

        assert_eq!(LogFormat::from_env(), LogFormat::Pretty);
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.log_format, LogFormat::Pretty);

        env::set_var("LOG_FORMAT", "Json");
        assert_eq!(LogFormat::from_env(), LogFormat::Json);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_inverted_window_is_config_error() {
        clear_env_vars();
        env::set_var("ACCESS_HISTORY_PATH", "history.json");
        env::set_var("WINDOW_START", "300");
        env::set_var("WINDOW_END", "200");

        let result = Settings::from_env();
        assert!(matches!(result, Err(HistoryError::ConfigError(_))));

        clear_env_vars();
    }
}
