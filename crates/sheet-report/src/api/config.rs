use log::LevelFilter;
use serde::Deserialize;

/// Runtime configuration for the inspector.
/// Read from the optional `config` object of the manifest; every field has a default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectorConfig {
    /// Treat `#sheet:0` as a valid link target (default: false).
    /// Old bookmarks relied on index 0 being ignored.
    pub accept_zero_index: bool,
    /// Log level for the console logger (default: info).
    pub log_level: LevelFilter,
    /// DOM id of the info panel element (default: "info").
    pub panel_id: String,
    /// CSS class given to the highlight rectangle (default: "highlight").
    pub highlight_class: String,
    /// Selector for atlas images, in document order (default: "span.sprite > img").
    pub image_selector: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            accept_zero_index: false,
            log_level: LevelFilter::Info,
            panel_id: "info".to_string(),
            highlight_class: "highlight".to_string(),
            image_selector: "span.sprite > img".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_report_page() {
        let config = InspectorConfig::default();
        assert!(!config.accept_zero_index);
        assert_eq!(config.panel_id, "info");
        assert_eq!(config.image_selector, "span.sprite > img");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: InspectorConfig =
            serde_json::from_str(r#"{ "acceptZeroIndex": true, "logLevel": "debug" }"#).unwrap();
        assert!(config.accept_zero_index);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.highlight_class, "highlight");
    }
}
