use anyhow::{Result, ensure};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// Build a CORS layer from config.
///
/// # Errors
/// Returns an error if `allow_credentials` is combined with a `"*"` origin,
/// method or header list, which browsers reject.
pub fn build_cors_layer(cors_cfg: &CorsConfig) -> Result<CorsLayer> {
    let has_wildcard_origin = cors_cfg.allowed_origins.iter().any(|o| o == "*");
    let has_wildcard = has_wildcard_origin
        || cors_cfg.allowed_methods.iter().any(|m| m == "*")
        || cors_cfg.allowed_headers.iter().any(|h| h == "*");

    ensure!(
        !(has_wildcard && cors_cfg.allow_credentials),
        "CORS misconfiguration: '*' cannot be combined with allow_credentials=true"
    );

    if has_wildcard_origin {
        warn!("CORS is configured with allowed_origins=['*']; any website may call the API");
    }

    let mut layer = CorsLayer::new();

    if has_wildcard_origin {
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_cfg
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cors_cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<Method> = cors_cfg
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cors_cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = cors_cfg
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    if cors_cfg.allow_credentials {
        layer = layer.allow_credentials(true);
    }

    if cors_cfg.max_age_seconds > 0 {
        layer = layer.max_age(std::time::Duration::from_secs(cors_cfg.max_age_seconds));
    }

    Ok(layer)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        assert!(build_cors_layer(&CorsConfig::default()).is_ok());
    }

    #[test]
    fn wildcard_with_credentials_is_rejected() {
        let cfg = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).is_err());
    }

    #[test]
    fn explicit_origins_allow_credentials() {
        let cfg = CorsConfig {
            allowed_origins: vec!["https://calc.example.com".to_owned()],
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).is_ok());
    }

    #[test]
    fn wildcard_headers_with_credentials_are_rejected() {
        let cfg = CorsConfig {
            allowed_origins: vec!["https://calc.example.com".to_owned()],
            allowed_headers: vec!["*".to_owned()],
            allow_credentials: true,
            ..CorsConfig::default()
        };
        assert!(build_cors_layer(&cfg).is_err());
    }
}
