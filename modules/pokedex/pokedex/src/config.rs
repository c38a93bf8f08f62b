use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::query::LimitCfg;
use crate::domain::service::ServiceConfig;

/// Configuration for the `pokedex` module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokedexConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Image URI given to records created without one. `{id}` is replaced by
    /// the assigned id.
    #[serde(default = "default_image_url_template")]
    pub image_url_template: String,
    /// JSON array of records loaded at startup when the store is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            image_url_template: default_image_url_template(),
            seed_file: None,
        }
    }
}

impl PokedexConfig {
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            limits: LimitCfg {
                default: self.default_page_size.max(1),
                max: self.max_page_size.max(1),
            },
            image_url_template: self.image_url_template.clone(),
        }
    }
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

fn default_image_url_template() -> String {
    "/assets/images/{id}.png".to_owned()
}

/// Cross-origin policy of the REST surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
    #[serde(default)]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
            max_age_seconds: 0,
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_owned()]
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_allowed_headers() -> Vec<String> {
    vec!["content-type".to_owned()]
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: PokedexConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, PokedexConfig::default());
        assert_eq!(cfg.service_config().limits, LimitCfg::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<PokedexConfig>(r#"{"page_size": 5}"#).is_err());
        assert!(serde_json::from_str::<CorsConfig>(r#"{"origins": []}"#).is_err());
    }

    #[test]
    fn zero_page_sizes_are_clamped() {
        let cfg = PokedexConfig {
            default_page_size: 0,
            max_page_size: 0,
            ..PokedexConfig::default()
        };
        assert_eq!(cfg.service_config().limits, LimitCfg { default: 1, max: 1 });
    }
}
