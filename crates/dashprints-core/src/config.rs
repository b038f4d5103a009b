//! Configuration module
//!
//! This module provides the configuration structures for the site: server and
//! static asset settings, the artwork upload limits, and the delivery transport
//! credentials. A single [`Config`] is built once at startup and passed by
//! reference into the store, the transports, and the request handler.

use std::env;
use std::path::PathBuf;

use crate::delivery_types::DeliveryBackend;

// Common constants
const SERVER_PORT: u16 = 5000;
const EMAIL_USER: &str = "dashprintsllc@gmail.com";
const MAX_UPLOAD_SIZE_MB: usize = 10;
const ALLOWED_EXTENSIONS: &str = "png,jpg,jpeg";
const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
const SENDGRID_TIMEOUT_SECS: u64 = 10;
const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 587;
const SMTP_TIMEOUT_SECS: u64 = 10;

/// Server and static asset configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub static_dir: PathBuf,
    /// Favicon path relative to `static_dir`
    pub favicon_file: String,
    pub log_format: String,
}

/// Delivery transport configuration
///
/// Credentials are optional on purpose: a deployment without them still serves
/// the site, and each submission reports `TransportNotConfigured`.
#[derive(Clone)]
pub struct DeliveryConfig {
    pub backend: DeliveryBackend,
    /// Business mailbox used as both sender and recipient
    pub email_user: String,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_api_url: String,
    pub sendgrid_timeout_secs: u64,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: Option<String>,
    pub smtp_tls: bool,
    pub smtp_timeout_secs: u64,
}

impl std::fmt::Debug for DeliveryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryConfig")
            .field("backend", &self.backend)
            .field("email_user", &self.email_user)
            .field("sendgrid_api_key", &self.sendgrid_api_key.as_ref().map(|_| "***"))
            .field("sendgrid_api_url", &self.sendgrid_api_url)
            .field("sendgrid_timeout_secs", &self.sendgrid_timeout_secs)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field("smtp_password", &self.smtp_password.as_ref().map(|_| "***"))
            .field("smtp_tls", &self.smtp_tls)
            .field("smtp_timeout_secs", &self.smtp_timeout_secs)
            .finish()
    }
}

/// Full site configuration
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub base: BaseConfig,
    pub delivery: DeliveryConfig,
    pub uploads_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<SiteConfig>);

impl Config {
    fn as_site(&self) -> &SiteConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_site().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    /// Load configuration from `.env` (when present) and the process environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = SiteConfig::from_lookup(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_site().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_site().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_site().base.environment
    }

    pub fn static_dir(&self) -> &std::path::Path {
        &self.as_site().base.static_dir
    }

    pub fn favicon_path(&self) -> PathBuf {
        self.static_dir().join(&self.as_site().base.favicon_file)
    }

    pub fn log_format(&self) -> &str {
        &self.as_site().base.log_format
    }

    pub fn uploads_dir(&self) -> &std::path::Path {
        &self.as_site().uploads_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.as_site().max_upload_size_bytes
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.as_site().allowed_extensions
    }

    pub fn delivery(&self) -> &DeliveryConfig {
        &self.as_site().delivery
    }

    pub fn delivery_backend(&self) -> DeliveryBackend {
        self.as_site().delivery.backend
    }

    pub fn email_user(&self) -> &str {
        &self.as_site().delivery.email_user
    }
}

impl SiteConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: var("PORT")
                .unwrap_or_else(|| SERVER_PORT.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            static_dir: PathBuf::from(var("STATIC_DIR").unwrap_or_else(|| "public".to_string())),
            favicon_file: var("FAVICON_FILE")
                .unwrap_or_else(|| "images/Logo_transparent.png".to_string()),
            log_format: var("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let backend = var("EMAIL_TRANSPORT")
            .map(|s| s.parse::<DeliveryBackend>())
            .transpose()?
            .unwrap_or(DeliveryBackend::SendGrid);

        let email_user = var("EMAIL_USER")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| EMAIL_USER.to_string());

        let delivery = DeliveryConfig {
            backend,
            sendgrid_api_key: var("SENDGRID_API_KEY"),
            sendgrid_api_url: var("SENDGRID_API_URL")
                .unwrap_or_else(|| SENDGRID_API_URL.to_string()),
            sendgrid_timeout_secs: var("SENDGRID_TIMEOUT_SECS")
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .map_err(|_| {
                    anyhow::anyhow!("SENDGRID_TIMEOUT_SECS must be a whole number of seconds")
                })?
                .unwrap_or(SENDGRID_TIMEOUT_SECS),
            smtp_host: var("SMTP_HOST").unwrap_or_else(|| SMTP_HOST.to_string()),
            smtp_port: var("SMTP_PORT")
                .unwrap_or_else(|| SMTP_PORT.to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_PORT must be a valid number"))?,
            smtp_user: var("SMTP_USER").unwrap_or_else(|| email_user.clone()),
            smtp_password: var("SMTP_PASSWORD"),
            smtp_tls: var("SMTP_TLS")
                .unwrap_or_else(|| "true".to_string())
                .trim()
                .to_lowercase()
                .parse()
                .map_err(|_| anyhow::anyhow!("SMTP_TLS must be 'true' or 'false'"))?,
            smtp_timeout_secs: var("SMTP_TIMEOUT_SECS")
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("SMTP_TIMEOUT_SECS must be a whole number of seconds"))?
                .unwrap_or(SMTP_TIMEOUT_SECS),
            email_user,
        };

        let max_upload_size_mb = var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|| MAX_UPLOAD_SIZE_MB.to_string())
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a whole number"))?;
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))?;

        let allowed_extensions = var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|| ALLOWED_EXTENSIONS.to_string())
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = SiteConfig {
            base,
            delivery,
            uploads_dir: PathBuf::from(var("UPLOADS_DIR").unwrap_or_else(|| "uploads".to_string())),
            max_upload_size_bytes,
            allowed_extensions,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.delivery.email_user.contains('@') {
            return Err(anyhow::anyhow!(
                "EMAIL_USER must be an email address, got '{}'",
                self.delivery.email_user
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be at least 1"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.delivery.sendgrid_timeout_secs == 0 || self.delivery.smtp_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "SENDGRID_TIMEOUT_SECS and SMTP_TIMEOUT_SECS must be at least 1 second"
            ));
        }

        if !matches!(self.base.log_format.as_str(), "compact" | "json") {
            return Err(anyhow::anyhow!(
                "LOG_FORMAT must be 'compact' or 'json', got '{}'",
                self.base.log_format
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.server_port(), 5000);
        assert_eq!(config.email_user(), "dashprintsllc@gmail.com");
        assert_eq!(config.delivery_backend(), DeliveryBackend::SendGrid);
        assert_eq!(config.max_upload_size_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.allowed_extensions(), &["png", "jpg", "jpeg"]);
        assert!(config.delivery().sendgrid_api_key.is_none());
        assert_eq!(config.delivery().sendgrid_timeout_secs, 10);
        assert_eq!(config.delivery().smtp_port, 587);
        assert!(config.delivery().smtp_tls);
        assert_eq!(config.uploads_dir(), std::path::Path::new("uploads"));
        assert_eq!(
            config.favicon_path(),
            PathBuf::from("public/images/Logo_transparent.png")
        );
        assert!(!config.is_production());
    }

    #[test]
    fn test_smtp_user_falls_back_to_email_user() {
        let config = config_from(&[
            ("EMAIL_TRANSPORT", "smtp"),
            ("EMAIL_USER", "owner@example.com"),
            ("SMTP_PASSWORD", "app-password"),
        ])
        .unwrap();
        assert_eq!(config.delivery_backend(), DeliveryBackend::Smtp);
        assert_eq!(config.delivery().smtp_user, "owner@example.com");
        assert_eq!(config.delivery().smtp_password.as_deref(), Some("app-password"));
    }

    #[test]
    fn test_blank_credential_is_absent() {
        let config = config_from(&[("SENDGRID_API_KEY", "   ")]).unwrap();
        assert!(config.delivery().sendgrid_api_key.is_none());
    }

    #[test]
    fn test_allowed_extensions_are_normalized() {
        let config = config_from(&[("ALLOWED_EXTENSIONS", " .PNG, Jpg ,,")]).unwrap();
        assert_eq!(config.allowed_extensions(), &["png", "jpg"]);
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("SMTP_PORT", "70000")]).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(config_from(&[("EMAIL_USER", "nobody")]).is_err());
        assert!(config_from(&[("EMAIL_TRANSPORT", "fax")]).is_err());
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "0")]).is_err());
        assert!(config_from(&[("SENDGRID_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_malformed_numbers_and_flags_rejected() {
        assert!(config_from(&[("MAX_UPLOAD_SIZE_MB", "ten")]).is_err());
        assert!(config_from(&[("SENDGRID_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("SMTP_TIMEOUT_SECS", "-1")]).is_err());
        assert!(config_from(&[("SMTP_TLS", "maybe")]).is_err());
        assert!(config_from(&[("PORT", "http")]).is_err());
        assert!(config_from(&[("SMTP_PORT", "70000")]).is_err());
    }

    #[test]
    fn test_upload_size_overflow_rejected() {
        let huge = usize::MAX.to_string();
        let err = config_from(&[("MAX_UPLOAD_SIZE_MB", huge.as_str())]).unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_SIZE_MB"));
    }

    #[test]
    fn test_smtp_tls_accepts_false() {
        let config = config_from(&[("SMTP_TLS", " FALSE ")]).unwrap();
        assert!(!config.delivery().smtp_tls);
    }

    #[test]
    fn test_production_detection() {
        let config = config_from(&[("APP_ENV", "Prod")]).unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = config_from(&[("SENDGRID_API_KEY", "SG.secret")]).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("SG.secret"));
    }
}
