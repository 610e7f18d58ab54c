use crate::config::LogFormat;
use crate::core::{ConfigProvider, CUBBY_DEFAULT_CAPACITY};
use crate::utils::error::{Result, SortingError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_socket_addr, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:50051";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sorting: SortingConfig,
    #[serde(default)]
    pub cubbies: Vec<CubbyConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub listen: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortingConfig {
    pub default_capacity: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubbyConfig {
    pub id: String,
    pub capacity: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SortingError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SortingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROBOT_LISTEN})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SortingError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(listen) = &self.server.listen {
            validate_socket_addr("server.listen", listen)?;
        }

        if let Some(capacity) = self.sorting.default_capacity {
            validate_positive_number("sorting.default_capacity", capacity, 1)?;
        }

        let mut seen = HashSet::new();
        for cubby in &self.cubbies {
            validate_non_empty_string("cubbies.id", &cubby.id)?;
            validate_positive_number("cubbies.capacity", cubby.capacity, 1)?;
            if !seen.insert(cubby.id.as_str()) {
                return Err(SortingError::InvalidConfigValue {
                    field: "cubbies.id".to_string(),
                    value: cubby.id.clone(),
                    reason: "Duplicate cubby id".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn listen_addr(&self) -> SocketAddr {
        self.server
            .listen
            .as_deref()
            .and_then(|l| l.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 50051)))
    }

    fn default_capacity(&self) -> usize {
        self.sorting
            .default_capacity
            .unwrap_or(CUBBY_DEFAULT_CAPACITY)
    }

    fn seed(&self) -> Option<u64> {
        self.sorting.seed
    }

    fn preset_cubbies(&self) -> Vec<(String, usize)> {
        self.cubbies
            .iter()
            .map(|c| (c.id.clone(), c.capacity))
            .collect()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
listen = "0.0.0.0:6000"

[sorting]
default_capacity = 3
seed = 11

[[cubbies]]
id = "fragile"
capacity = 1

[[cubbies]]
id = "bulk"
capacity = 10

[logging]
verbose = true
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().port(), 6000);
        assert_eq!(config.default_capacity(), 3);
        assert_eq!(config.seed(), Some(11));
        assert_eq!(
            config.preset_cubbies(),
            vec![("fragile".to_string(), 1), ("bulk".to_string(), 10)]
        );
        assert!(config.verbose());
        assert_eq!(config.logging.format, Some(LogFormat::Json));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.listen_addr().to_string(), DEFAULT_LISTEN);
        assert_eq!(config.default_capacity(), CUBBY_DEFAULT_CAPACITY);
        assert_eq!(config.seed(), None);
        assert!(config.preset_cubbies().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SORTING_ROBOT_TEST_LISTEN", "127.0.0.1:7000");

        let toml_content = r#"
[server]
listen = "${SORTING_ROBOT_TEST_LISTEN}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.listen.as_deref(), Some("127.0.0.1:7000"));

        std::env::remove_var("SORTING_ROBOT_TEST_LISTEN");
    }

    #[test]
    fn test_config_validation() {
        let zero_capacity =
            TomlConfig::from_toml_str("[sorting]\ndefault_capacity = 0\n").unwrap();
        assert!(zero_capacity.validate().is_err());

        let bad_listen = TomlConfig::from_toml_str("[server]\nlisten = \"nowhere\"\n").unwrap();
        assert!(bad_listen.validate().is_err());

        let duplicate = TomlConfig::from_toml_str(
            "[[cubbies]]\nid = \"A\"\ncapacity = 1\n[[cubbies]]\nid = \"A\"\ncapacity = 2\n",
        )
        .unwrap();
        assert!(duplicate.validate().is_err());

        assert!(TomlConfig::from_toml_str("[sorting\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[sorting]\ndefault_capacity = 5\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_capacity(), 5);
    }
}
