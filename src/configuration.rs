use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub app_host: String,
    pub app_port: u16,
    pub frontend_url: String,
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub promptly: PromptlySettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSettings {
    pub secret: String,
    pub session_ttl_minutes: i64,
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct PromptlySettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UploadSettings {
    pub directory: String,
    pub max_file_bytes: usize,
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut settings = config::Config::default();

    // Values from a file named `configuration` (.json, .toml, .yaml, .yml),
    // overridable through KODBANK_-prefixed environment variables,
    // e.g. KODBANK_AUTH__SECRET, KODBANK_DATABASE__PASSWORD.
    settings.merge(config::File::with_name("configuration"))?;
    settings.merge(config::Environment::with_prefix("KODBANK").separator("__"))?;

    settings.try_deserialize()
}
