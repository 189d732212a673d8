use axum::http::{HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins (`["*"]` allows any origin)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Exposed headers
    pub expose_headers: Vec<String>,
    /// Allow credentials
    pub allow_credentials: bool,
    /// Maximum age for preflight cache
    pub max_age: Option<Duration>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            // Load generators and browser dashboards call in from arbitrary hosts
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec![
                "content-type".to_string(),
                "accept".to_string(),
                "x-request-id".to_string(),
            ],
            expose_headers: vec!["x-request-id".to_string()],
            allow_credentials: false,
            max_age: Some(Duration::from_secs(3600)),
        }
    }
}

impl CorsConfig {
    /// Configuration restricted to specific origins
    pub fn with_origins(allowed_origins: Vec<String>) -> Self {
        Self {
            allowed_origins,
            ..Default::default()
        }
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.allowed_origins.contains(&"*".to_string()) && self.allow_credentials {
            return Err("Cannot use wildcard origin '*' with allow_credentials: true".to_string());
        }
        Ok(())
    }
}

/// Create CORS layer with the default configuration
pub fn cors_layer() -> CorsLayer {
    cors_layer_with_config(CorsConfig::default())
}

/// Create CORS layer with custom configuration
pub fn cors_layer_with_config(config: CorsConfig) -> CorsLayer {
    if let Err(e) = config.validate() {
        tracing::error!("Invalid CORS configuration: {}, falling back to defaults", e);
        return cors_layer_with_config(CorsConfig::default());
    }

    let mut cors = CorsLayer::new();

    // Configure origins
    if config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!("Invalid origin '{}' in CORS configuration: {}", origin, e);
                    None
                }
            })
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|method| method.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    // Configure headers
    let headers: Vec<HeaderName> = config
        .allowed_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();
    cors = cors.allow_headers(headers);

    let expose_headers: Vec<HeaderName> = config
        .expose_headers
        .iter()
        .filter_map(|header| header.parse().ok())
        .collect();
    cors = cors.expose_headers(expose_headers);

    if config.allow_credentials {
        cors = cors.allow_credentials(true);
    }

    if let Some(max_age) = config.max_age {
        cors = cors.max_age(max_age);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_with_credentials_rejected() {
        let config = CorsConfig {
            allow_credentials: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(CorsConfig::default().validate().is_ok());
        assert!(CorsConfig::with_origins(vec!["http://localhost:3000".to_string()])
            .validate()
            .is_ok());
    }
}
