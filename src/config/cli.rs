use crate::config::toml_config::{AppConfig, LogFormat};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "entity-pages")]
#[command(about = "Serves entity pages backed by Firestore and Cloud Storage")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "ENTITY_PAGES_CONFIG")]
    pub config: Option<String>,

    #[arg(long, env = "ENTITY_PAGES_BIND_ADDR")]
    pub bind_addr: Option<String>,

    /// Service-account key file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub credentials: Option<String>,

    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project_id: Option<String>,

    /// Defaults to <project_id>.appspot.com
    #[arg(long, env = "FIREBASE_STORAGE_BUCKET")]
    pub storage_bucket: Option<String>,

    #[arg(long, env = "FIRESTORE_EMULATOR_HOST")]
    pub firestore_emulator_host: Option<String>,

    #[arg(long, env = "FIREBASE_STORAGE_EMULATOR_HOST")]
    pub storage_emulator_host: Option<String>,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// File values first, then flags and environment on top.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(addr) = &self.bind_addr {
            config.server.bind_addr = addr.clone();
        }

        let backend = &mut config.backend;
        override_option(&mut backend.credentials_path, &self.credentials);
        override_option(&mut backend.project_id, &self.project_id);
        override_option(&mut backend.storage_bucket, &self.storage_bucket);
        override_option(
            &mut backend.firestore_emulator_host,
            &self.firestore_emulator_host,
        );
        override_option(&mut backend.storage_emulator_host, &self.storage_emulator_host);

        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
    }
}

fn override_option(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_values() {
        let cli = CliConfig::parse_from([
            "entity-pages",
            "--bind-addr",
            "127.0.0.1:9000",
            "--storage-bucket",
            "cli-bucket",
            "--json-logs",
        ]);

        let mut config = AppConfig::from_toml_str(
            r#"
[server]
bind_addr = "0.0.0.0:3000"

[backend]
project_id = "demo-project"
storage_bucket = "file-bucket"
"#,
        )
        .unwrap();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.backend.storage_bucket.as_deref(), Some("cli-bucket"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }
}
