use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: store backend, JWT signing, bind address, logging.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub store: StoreConfig,
    pub bind_address: String,
    /// Deployment environment name, echoed by the health endpoint.
    #[serde(default = "default_environment")]
    pub environment: String,
    pub jwt: JWTConfig,
    pub logging: LoggingConfig,
}

fn default_environment() -> String {
    "development".to_string()
}

/// Load config from "config.yaml" in the current directory, with
/// TASKOTRON_* environment variables taking precedence (nested keys
/// separated by double underscores, e.g. TASKOTRON_JWT__SECRET).
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("TASKOTRON_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

/// Settings for issuing and verifying session tokens.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct JWTConfig {
    pub iss: String,
    /// Token lifetime in seconds. Sessions last a day.
    #[serde(default = "default_token_exp")]
    pub exp: i64,
    pub secret: String,
}

fn default_token_exp() -> i64 {
    86400
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::{Format, Yaml};
    use figment::Figment;

    const MINIMAL_CONFIG: &str = r#"
version: "1.0.0"
store:
  type: "sqlite"
  uri: "sqlite::memory:"
bind_address: "127.0.0.1:5000"
jwt:
  iss: "taskotron-test"
  secret: "test-secret"
logging:
  level: "debug"
  format: "console"
"#;

    #[test]
    fn test_minimal_config_parses_with_defaults() {
        let config: Config = Figment::new()
            .merge(Yaml::string(MINIMAL_CONFIG))
            .extract()
            .expect("config should parse");
        let Config::ConfigV1(cfg) = config;
        assert_eq!(cfg.environment, "development");
        assert_eq!(cfg.jwt.exp, 86400);
        assert_eq!(cfg.bind_address, "127.0.0.1:5000");
    }
}
