//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Every value has a
//! stock default matching the behavior of the published page; a config file
//! only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! The CLI reads `config.toml` from `--config-dir` (default: current
//! directory). In the browser the same sparse TOML can be embedded in the page:
//!
//! ```html
//! <script type="application/toml" id="site-config">
//! [form]
//! endpoint = "https://formspree.io/f/abcdwxyz"
//! </script>
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [form]
//! endpoint = ""                 # Form relay URL (browser falls back to the form's action)
//! sending_label = "Sending..."  # Submit button label while a request is in flight
//! message_timeout_ms = 5000     # Status message lifetime
//!
//! [router]
//! main_sections = ["home", "pinterest", "projects", "contact"]
//! return_section = "projects"   # Scrolled to when leaving a detail panel
//! home_url = "/"
//! home_title = "আমার ওয়েবসাইট"
//!
//! [gallery]
//! reveal_stagger_ms = 100
//! hide_delay_ms = 300
//! lightbox_fade_in_ms = 10
//! lightbox_fade_out_ms = 300
//!
//! [effects]
//! header_threshold = 100.0
//! parallax_rate = -0.5
//! typewriter_start_ms = 1500
//! typewriter_speed_ms = 80
//! ripple_ms = 600
//! load_stagger_ms = 100
//! loader_fade_ms = 500
//! social_stagger_ms = 100
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Contact form relay settings.
    pub form: FormConfig,
    /// Main-page sections and history entries used by the repository router.
    pub router: RouterConfig,
    /// Filter and lightbox timings.
    pub gallery: GalleryConfig,
    /// Cosmetic effect parameters.
    pub effects: EffectsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.form.endpoint.trim();
        if !endpoint.is_empty() {
            let url = reqwest::Url::parse(endpoint).map_err(|e| {
                ConfigError::Validation(format!("form.endpoint is not a valid URL: {e}"))
            })?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ConfigError::Validation(
                    "form.endpoint must be an http or https URL".into(),
                ));
            }
        }
        if self.form.message_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "form.message_timeout_ms must be non-zero".into(),
            ));
        }
        if self.router.main_sections.is_empty() {
            return Err(ConfigError::Validation(
                "router.main_sections must not be empty".into(),
            ));
        }
        if !self
            .router
            .main_sections
            .iter()
            .any(|id| id == &self.router.return_section)
        {
            return Err(ConfigError::Validation(format!(
                "router.return_section '{}' is not one of router.main_sections",
                self.router.return_section
            )));
        }
        if !self.effects.parallax_rate.is_finite() || !self.effects.header_threshold.is_finite() {
            return Err(ConfigError::Validation(
                "effects.parallax_rate and effects.header_threshold must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Contact form relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Absolute URL of the form relay. Empty means "use the form's `action`".
    pub endpoint: String,
    /// Submit button text while a submission is outstanding.
    pub sending_label: String,
    /// How long a status message stays below the form.
    pub message_timeout_ms: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            sending_label: "Sending...".to_string(),
            message_timeout_ms: 5000,
        }
    }
}

impl FormConfig {
    pub fn message_timeout(&self) -> Duration {
        millis(self.message_timeout_ms)
    }
}

/// Router settings: which sections make up the main page and where
/// "back to main" lands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    /// Element ids of the top-level main-page sections.
    pub main_sections: Vec<String>,
    /// Section scrolled into view when returning to the main page.
    pub return_section: String,
    /// URL pushed when returning to the main page.
    pub home_url: String,
    /// Title passed with the main-page history entry.
    pub home_title: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            main_sections: ["home", "pinterest", "projects", "contact"]
                .into_iter()
                .map(String::from)
                .collect(),
            return_section: "projects".to_string(),
            home_url: "/".to_string(),
            home_title: "আমার ওয়েবসাইট".to_string(),
        }
    }
}

/// Filter and lightbox timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Per-item delay when revealing filtered items (item `i` waits `i * stagger`).
    pub reveal_stagger_ms: u32,
    /// Delay between the hide transition and removal from layout.
    pub hide_delay_ms: u32,
    /// Delay before the lightbox fade-in class is added.
    pub lightbox_fade_in_ms: u32,
    /// Delay between the lightbox fade-out and removal from layout.
    pub lightbox_fade_out_ms: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            reveal_stagger_ms: 100,
            hide_delay_ms: 300,
            lightbox_fade_in_ms: 10,
            lightbox_fade_out_ms: 300,
        }
    }
}

/// Cosmetic effect parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Scroll offset (px) past which the header switches to its solid style.
    pub header_threshold: f64,
    /// Hero translation per scrolled pixel.
    pub parallax_rate: f64,
    /// Delay after load before the profile title starts re-typing.
    pub typewriter_start_ms: u32,
    /// Delay between typed characters.
    pub typewriter_speed_ms: u32,
    /// Lifetime of a filter-button ripple.
    pub ripple_ms: u32,
    /// Stagger between elements in the on-load fade-in.
    pub load_stagger_ms: u32,
    /// Delay between fading the loader and removing it.
    pub loader_fade_ms: u32,
    /// Animation-delay stagger between social links.
    pub social_stagger_ms: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            header_threshold: 100.0,
            parallax_rate: -0.5,
            typewriter_start_ms: 1500,
            typewriter_speed_ms: 80,
            ripple_ms: 600,
            load_stagger_ms: 100,
            loader_fade_ms: 500,
            social_stagger_ms: 100,
        }
    }
}

/// Milliseconds from config as a `Duration`.
pub fn millis(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(parse_raw_config(&content)?))
}

/// Parse sparse TOML overrides (file contents or an inline `<script>` block).
pub fn parse_raw_config(content: &str) -> Result<toml::Value, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Resolve config from inline TOML overrides, on top of stock defaults.
pub fn config_from_str(content: &str) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), Some(parse_raw_config(content)?))
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Portfolio Site Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[form]
# Absolute http(s) URL of the form relay. When empty, the browser posts to the
# contact form's own `action` attribute.
endpoint = ""

# Submit button label while a message is being sent.
sending_label = "Sending..."

# How long (ms) a success/error message stays below the form.
message_timeout_ms = 5000

# ---------------------------------------------------------------------------
# Repository detail router
# ---------------------------------------------------------------------------
[router]
# Element ids of the main-page sections hidden while a detail panel is open.
main_sections = ["home", "pinterest", "projects", "contact"]

# Section scrolled into view when returning to the main page.
# Must be one of main_sections.
return_section = "projects"

# URL and title of the history entry pushed when returning to the main page.
home_url = "/"
home_title = "আমার ওয়েবসাইট"

# ---------------------------------------------------------------------------
# Gallery filter and lightbox (all values in ms)
# ---------------------------------------------------------------------------
[gallery]
# Revealed item i becomes visible after i * reveal_stagger_ms.
reveal_stagger_ms = 100

# Hidden items leave the layout after this delay.
hide_delay_ms = 300

# Lightbox fade-in starts after this delay.
lightbox_fade_in_ms = 10

# Lightbox leaves the layout this long after starting to fade out.
lightbox_fade_out_ms = 300

# ---------------------------------------------------------------------------
# Cosmetic effects
# ---------------------------------------------------------------------------
[effects]
# Scroll offset (px) past which the header turns opaque.
header_threshold = 100.0

# Hero translation per scrolled pixel (negative moves it up).
parallax_rate = -0.5

# Profile title typewriter: start delay and per-character delay (ms).
typewriter_start_ms = 1500
typewriter_speed_ms = 80

# Filter-button ripple lifetime (ms).
ripple_ms = 600

# Stagger (ms) for the on-load fade-in of profile and media items.
load_stagger_ms = 100

# Loader fade-out before removal (ms).
loader_fade_ms = 500

# Animation-delay stagger between social links (ms).
social_stagger_ms = 100
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_original_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.gallery.reveal_stagger_ms, 100);
        assert_eq!(config.gallery.hide_delay_ms, 300);
        assert_eq!(config.gallery.lightbox_fade_in_ms, 10);
        assert_eq!(config.gallery.lightbox_fade_out_ms, 300);
        assert_eq!(config.form.message_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn default_router_sections() {
        let config = RouterConfig::default();
        assert_eq!(
            config.main_sections,
            vec!["home", "pinterest", "projects", "contact"]
        );
        assert_eq!(config.return_section, "projects");
        assert_eq!(config.home_url, "/");
    }

    #[test]
    fn parse_sparse_config_keeps_defaults() {
        let toml = r##"
[form]
endpoint = "https://formspree.io/f/xyz"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.form.endpoint, "https://formspree.io/f/xyz");
        assert_eq!(config.form.sending_label, "Sending...");
        assert_eq!(config.gallery.hide_delay_ms, 300);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.router.return_section, "projects");
        assert!(config.form.endpoint.is_empty());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[gallery]
reveal_stagger_ms = 50

[effects]
parallax_rate = -0.25
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.gallery.reveal_stagger_ms, 50);
        assert_eq!(config.effects.parallax_rate, -0.25);
        // Unspecified values should be defaults
        assert_eq!(config.gallery.hide_delay_ms, 300);
        assert_eq!(config.effects.header_threshold, 100.0);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[form\nendpoint = ").unwrap();
        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn config_from_inline_overrides() {
        let config = config_from_str("[form]\nendpoint = \"https://formspree.io/f/abc\"\n").unwrap();
        assert_eq!(config.form.endpoint, "https://formspree.io/f/abc");
        assert_eq!(config.form.message_timeout_ms, 5000);

        let config = config_from_str("").unwrap();
        assert_eq!(config.router, RouterConfig::default());
    }

    #[test]
    fn config_from_inline_validates() {
        let result = config_from_str("[router]\nreturn_section = \"about\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn unknown_key_rejected_via_load_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[gallery]\nreveal_delay_ms = 10\n",
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[lightbox]\nfade = 1\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_replaces_arrays_wholesale() {
        let base = stock_defaults_value();
        let overlay: toml::Value =
            toml::from_str("[router]\nmain_sections = [\"home\", \"projects\"]").unwrap();
        let merged = merge_toml(base, overlay);
        let sections = merged["router"]["main_sections"].as_array().unwrap();
        assert_eq!(sections.len(), 2);
        // Sibling keys in the same table survive
        assert_eq!(merged["router"]["return_section"].as_str(), Some("projects"));
    }

    // =========================================================================
    // Validation tests
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_relative_endpoint() {
        let mut config = SiteConfig::default();
        config.form.endpoint = "/contact".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_non_http_endpoint() {
        let mut config = SiteConfig::default();
        config.form.endpoint = "mailto:me@example.com".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("http"));
    }

    #[test]
    fn validate_accepts_https_endpoint() {
        let mut config = SiteConfig::default();
        config.form.endpoint = "https://formspree.io/f/abcd".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_return_section_must_be_main_section() {
        let mut config = SiteConfig::default();
        config.router.return_section = "about".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("about"));
    }

    #[test]
    fn validate_main_sections_empty() {
        let mut config = SiteConfig::default();
        config.router.main_sections.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_zero_message_timeout() {
        let mut config = SiteConfig::default();
        config.form.message_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("[router]\nmain_sections = []").unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn parse_raw_config_inline_block() {
        let raw = parse_raw_config("[form]\nsending_label = \"Envoi...\"\n").unwrap();
        let config = resolve_config(stock_defaults_value(), Some(raw)).unwrap();
        assert_eq!(config.form.sending_label, "Envoi...");
    }

    // =========================================================================
    // Stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_is_valid_toml() {
        let _: toml::Value = toml::from_str(stock_config_toml()).unwrap();
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let from_stock: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(from_stock.router, defaults.router);
        assert_eq!(from_stock.gallery, defaults.gallery);
        assert_eq!(from_stock.effects, defaults.effects);
        assert_eq!(from_stock.form.sending_label, defaults.form.sending_label);
        assert_eq!(
            from_stock.form.message_timeout_ms,
            defaults.form.message_timeout_ms
        );
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        let table = value.as_table().unwrap();
        for section in ["form", "router", "gallery", "effects"] {
            assert!(table.contains_key(section), "missing section {section}");
        }
    }
}
