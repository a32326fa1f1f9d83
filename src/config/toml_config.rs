use crate::utils::error::{PageError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub collections: CollectionsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Service-account key file.
    pub credentials_path: Option<String>,
    /// Overrides the project id found in the key file.
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub database: String,
    pub firestore_emulator_host: Option<String>,
    pub storage_emulator_host: Option<String>,
    pub firestore_base_url: Option<String>,
    pub storage_base_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            credentials_path: None,
            project_id: None,
            storage_bucket: None,
            database: "(default)".to_string(),
            firestore_emulator_host: None,
            storage_emulator_host: None,
            firestore_base_url: None,
            storage_base_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    pub entities: String,
    pub use_cases: String,
    /// Field on a use-case document holding the owning entity id.
    pub entity_field: String,
}

impl Default for CollectionsConfig {
    fn default() -> Self {
        Self {
            entities: "entities".to_string(),
            use_cases: "useCases".to_string(),
            entity_field: "entityId".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PageError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PageError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${FIREBASE_STORAGE_BUCKET})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PageError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_socket_addr("server.bind_addr", &self.server.bind_addr)?;

        if let Some(path) = &self.backend.credentials_path {
            validation::validate_path("backend.credentials_path", path)?;
        }
        match (&self.backend.project_id, &self.backend.firestore_emulator_host) {
            (Some(project_id), Some(_)) => {
                validation::validate_non_empty_string("backend.project_id", project_id)?
            }
            (Some(project_id), None) => {
                validation::validate_project_id("backend.project_id", project_id)?
            }
            (None, _) => {}
        }
        if let Some(bucket) = &self.backend.storage_bucket {
            validation::validate_non_empty_string("backend.storage_bucket", bucket)?;
        }
        validation::validate_non_empty_string("backend.database", &self.backend.database)?;
        if let Some(url) = &self.backend.firestore_base_url {
            validation::validate_url("backend.firestore_base_url", url)?;
        }
        if let Some(url) = &self.backend.storage_base_url {
            validation::validate_url("backend.storage_base_url", url)?;
        }

        validation::validate_collection_name("collections.entities", &self.collections.entities)?;
        validation::validate_collection_name(
            "collections.use_cases",
            &self.collections.use_cases,
        )?;
        validation::validate_non_empty_string(
            "collections.entity_field",
            &self.collections.entity_field,
        )?;

        // 模擬器模式必須明確提供 project id 或金鑰檔
        if self.backend.credentials_path.is_none() && self.backend.project_id.is_none() {
            return Err(PageError::MissingConfigError {
                field: "backend.credentials_path or backend.project_id".to_string(),
            });
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config.server.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.backend.database, "(default)");
        assert_eq!(config.collections, CollectionsConfig::default());
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:8080"

[backend]
credentials_path = "/etc/secrets/service-account.json"
storage_bucket = "assets.example.com"

[collections]
entities = "companies"
use_cases = "company_use_cases"
entity_field = "companyId"

[logging]
format = "json"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            config.backend.storage_bucket.as_deref(),
            Some("assets.example.com")
        );
        assert_eq!(config.collections.entities, "companies");
        assert_eq!(config.collections.entity_field, "companyId");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ENTITY_PAGES_TEST_BUCKET", "from-env.appspot.com");

        let toml_content = r#"
[backend]
project_id = "demo-project"
storage_bucket = "${ENTITY_PAGES_TEST_BUCKET}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.backend.storage_bucket.as_deref(),
            Some("from-env.appspot.com")
        );

        std::env::remove_var("ENTITY_PAGES_TEST_BUCKET");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[server]
bind_addr = "not-an-address"

[backend]
project_id = "demo-project"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let no_backend = AppConfig::default();
        assert!(matches!(
            no_backend.validate(),
            Err(PageError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_emulator_relaxes_project_id_pattern() {
        let toml_content = r#"
[backend]
project_id = "test"
firestore_emulator_host = "localhost:8080"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let production = AppConfig::from_toml_str(
            r#"
[backend]
project_id = "test"
"#,
        )
        .unwrap();
        assert!(matches!(
            production.validate(),
            Err(PageError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[backend]
project_id = "file-project"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.backend.project_id.as_deref(), Some("file-project"));
    }
}
