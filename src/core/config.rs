use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub mail: MailConfig,
    pub assets: AssetConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
    /// Upper bound on the re-serialized report request, checked before any fetch
    pub max_report_payload_size: usize,
}

/// Which lettre transport delivers composed reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTransportKind {
    Smtp,
    /// Writes `.eml` files to a directory, for local development
    File { dir: PathBuf },
}

#[derive(Clone)]
pub struct MailConfig {
    pub transport: MailTransportKind,
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub username: String,
    pub password: String,
    /// Display name used in the `From` header
    pub from_name: String,
    pub recipient: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("transport", &self.transport)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_name", &self.from_name)
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// How the resolver fills a slot that the caller did not supply inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStrategy {
    /// Download the asset and embed it as base64
    Embed,
    /// Pass the locator through and let the mail client load it
    Link,
}

impl std::str::FromStr for AssetStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "embed" | "base64" => Ok(Self::Embed),
            "link" | "url" | "direct" => Ok(Self::Link),
            other => Err(format!(
                "ASSET_STRATEGY must be 'embed' or 'link', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Origin serving chart images and CSV downloads, without trailing slash
    pub base_url: String,
    pub strategy: AssetStrategy,
    pub fetch_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            mail: MailConfig::from_env()?,
            assets: AssetConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 50 * 1024 * 1024; // 50MB
    const DEFAULT_MAX_REPORT_PAYLOAD_SIZE: usize = 20 * 1024 * 1024; // 20MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5001".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        let max_report_payload_size = env::var("MAX_REPORT_PAYLOAD_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REPORT_PAYLOAD_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REPORT_PAYLOAD_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
            max_report_payload_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MailConfig {
    const DEFAULT_HOST: &'static str = "smtp.gmail.com";
    const DEFAULT_PORT: u16 = 587;
    const DEFAULT_FROM_NAME: &'static str = "SongScape AI";
    const DEFAULT_FILE_DIR: &'static str = "emails";

    pub fn from_env() -> Result<Self, String> {
        let transport = match env::var("MAIL_TRANSPORT")
            .unwrap_or_else(|_| "smtp".to_string())
            .to_lowercase()
            .as_str()
        {
            "smtp" => MailTransportKind::Smtp,
            "file" => MailTransportKind::File {
                dir: PathBuf::from(
                    env::var("MAIL_FILE_DIR").unwrap_or_else(|_| Self::DEFAULT_FILE_DIR.into()),
                ),
            },
            other => {
                return Err(format!(
                    "MAIL_TRANSPORT must be 'smtp' or 'file', got '{}'",
                    other
                ))
            }
        };

        let username = env::var("MAIL_USER")
            .map_err(|_| "MAIL_USER environment variable is required".to_string())?;

        // The password only matters when talking to a real SMTP relay
        let password = match transport {
            MailTransportKind::Smtp => env::var("MAIL_PASS")
                .map_err(|_| "MAIL_PASS environment variable is required".to_string())?,
            MailTransportKind::File { .. } => env::var("MAIL_PASS").unwrap_or_default(),
        };

        let recipient = env::var("MAIL_TO")
            .map_err(|_| "MAIL_TO environment variable is required".to_string())?;

        let host = env::var("MAIL_HOST").unwrap_or_else(|_| Self::DEFAULT_HOST.to_string());
        let port = env::var("MAIL_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "MAIL_PORT must be a valid port number".to_string())?;
        let tls = env::var("MAIL_TLS")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);
        let from_name =
            env::var("MAIL_FROM_NAME").unwrap_or_else(|_| Self::DEFAULT_FROM_NAME.to_string());

        Ok(Self {
            transport,
            host,
            port,
            tls,
            username,
            password,
            from_name,
            recipient,
        })
    }

    /// `"Name" <address>` form for the `From` header
    pub fn from_header(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.username)
    }
}

impl AssetConfig {
    const DEFAULT_BASE_URL: &'static str = "https://expresserverjs.onrender.com";
    const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("ASSET_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let strategy = env::var("ASSET_STRATEGY")
            .unwrap_or_else(|_| "embed".to_string())
            .parse::<AssetStrategy>()?;

        let fetch_timeout_secs = env::var("ASSET_FETCH_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_FETCH_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ASSET_FETCH_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            strategy,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "SongScape Mailer API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Track analysis report mailer".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_strategy_parse() {
        assert_eq!("embed".parse::<AssetStrategy>(), Ok(AssetStrategy::Embed));
        assert_eq!("BASE64".parse::<AssetStrategy>(), Ok(AssetStrategy::Embed));
        assert_eq!(" link ".parse::<AssetStrategy>(), Ok(AssetStrategy::Link));
        assert!("inline".parse::<AssetStrategy>().is_err());
    }

    #[test]
    fn test_mail_config_debug_redacts_password() {
        let config = MailConfig {
            transport: MailTransportKind::Smtp,
            host: "smtp.example.com".to_string(),
            port: 587,
            tls: true,
            username: "reports@example.com".to_string(),
            password: "hunter2".to_string(),
            from_name: "SongScape AI".to_string(),
            recipient: "label@example.com".to_string(),
        };

        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(
            config.from_header(),
            "\"SongScape AI\" <reports@example.com>"
        );
    }

    #[test]
    fn test_swagger_credentials() {
        let swagger = SwaggerConfig {
            username: Some("admin".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        let swagger = SwaggerConfig {
            password: Some("secret".to_string()),
            ..swagger
        };
        assert_eq!(swagger.credentials(), Some("admin:secret".to_string()));
    }
}
