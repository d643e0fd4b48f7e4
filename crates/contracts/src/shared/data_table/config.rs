use serde::Deserialize;

/// Table configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TableConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Width counted for sticky offsets when a column has a percentage or no width
    pub sticky_fallback_width: f64,
    /// Vertical gap between a popover trigger and its menu, px
    pub popover_gap: f64,
    /// Minimum search length before matches are highlighted
    #[serde(default = "default_highlight_min_len")]
    pub search_highlight_min_len: usize,
}

fn default_highlight_min_len() -> usize {
    1
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
default_page_size = 10
page_size_options = [10, 25, 50, 100]
sticky_fallback_width = 120.0
popover_gap = 4.0
search_highlight_min_len = 1
"#;

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            sticky_fallback_width: 120.0,
            popover_gap: 4.0,
            search_highlight_min_len: 1,
        }
    }
}

/// Load table configuration.
///
/// Uses `source` (TOML) when given, otherwise the embedded default.
/// The default page size is always offered in `page_size_options`.
pub fn load_config(source: Option<&str>) -> anyhow::Result<TableConfig> {
    let mut config: TableConfig = match source {
        Some(src) => {
            log::info!("Loading table config from supplied TOML");
            toml::from_str(src)?
        }
        None => {
            log::debug!("Using default embedded table configuration");
            toml::from_str(DEFAULT_CONFIG)?
        }
    };

    if config.default_page_size == 0 {
        anyhow::bail!("default_page_size must be greater than zero");
    }
    if !(config.sticky_fallback_width.is_finite() && config.sticky_fallback_width >= 0.0) {
        anyhow::bail!("sticky_fallback_width must be a non-negative number");
    }

    config.page_size_options.retain(|&n| n > 0);
    if !config.page_size_options.contains(&config.default_page_size) {
        config.page_size_options.push(config.default_page_size);
    }
    config.page_size_options.sort_unstable();
    config.page_size_options.dedup();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_custom_config_adds_default_page_size() {
        let config = load_config(Some(
            r#"
default_page_size = 20
page_size_options = [50, 10, 0]
sticky_fallback_width = 100.0
popover_gap = 2.0
"#,
        ))
        .unwrap();
        assert_eq!(config.page_size_options, vec![10, 20, 50]);
        assert_eq!(config.search_highlight_min_len, 1);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let res = load_config(Some(
            r#"
default_page_size = 0
page_size_options = [10]
sticky_fallback_width = 120.0
popover_gap = 4.0
"#,
        ));
        assert!(res.is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(load_config(Some("default_page_size = [")).is_err());
    }
}
