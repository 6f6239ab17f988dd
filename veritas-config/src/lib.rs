//! Loader for Veritas configuration with YAML + environment overlays.
//!
//! Sources are merged in order: an optional YAML file, inline YAML (tests and
//! tooling), then `VERITAS__`-prefixed environment variables using `__` as the
//! nesting separator (`VERITAS__LLM__MODEL=gpt-4o`). After merging, `${VAR}`
//! placeholders in string values are expanded. Every section is optional and
//! falls back to the defaults below.
//!
//! The completion-service credential is resolved once here: `llm.auth_token`
//! if set, otherwise the `OPENAI_API_KEY` environment variable.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub struct VeritasConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Completion-service settings. Fixed for the lifetime of the process.
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_openai_endpoint")]
    pub endpoint: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            auth_token: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            endpoint: default_openai_endpoint(),
        }
    }
}

/// Where the CLI submits statements.
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_client_endpoint")]
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_client_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEncoding {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogEncoding,
    #[serde(default = "default_true")]
    pub emit_stderr: bool,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogEncoding::default(),
            emit_stderr: true,
            dir: None,
            filter: default_filter(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8787".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    2000
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_client_endpoint() -> String {
    "http://127.0.0.1:8787/".into()
}
fn default_true() -> bool {
    true
}
fn default_filter() -> String {
    "info,tower_http=debug".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Unresolved `${VAR}` placeholders and blanks count as "not configured".
fn resolve_credential(configured: Option<String>) -> Option<String> {
    configured
        .filter(|t| !t.trim().is_empty() && !t.contains("${"))
        .or_else(|| std::env::var(OPENAI_API_KEY_ENV).ok())
        .filter(|t| !t.trim().is_empty())
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct VeritasConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: &'static str,
}

impl Default for VeritasConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl VeritasConfigLoader {
    /// Start with defaults; `VERITAS__` env overrides are applied last in [`load`](Self::load).
    ///
    /// ```
    /// use veritas_config::VeritasConfigLoader;
    ///
    /// let config = VeritasConfigLoader::new()
    ///     .with_yaml_str("server:\n  bind_addr: '127.0.0.1:9000'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.server.bind_addr, "127.0.0.1:9000");
    /// assert_eq!(config.llm.model, "gpt-4o-mini");
    /// assert_eq!(config.llm.max_tokens, 2000);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            env_prefix: "VERITAS",
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent, for deployments configured purely by env.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use veritas_config::VeritasConfigLoader;
    ///
    /// temp_env::with_vars(
    ///     [("OPENAI_API_KEY", None::<&str>), ("SECRET_FROM_VAULT", Some("sk-injected"))],
    ///     || {
    ///         let config = VeritasConfigLoader::new()
    ///             .with_yaml_str("llm:\n  auth_token: \"${SECRET_FROM_VAULT}\"")
    ///             .load()
    ///             .expect("valid configuration");
    ///         assert_eq!(config.llm.auth_token.as_deref(), Some("sk-injected"));
    ///     },
    /// );
    /// ```
    pub fn load(self) -> Result<VeritasConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(self.env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let mut typed: VeritasConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;
        typed.llm.auth_token = resolve_credential(typed.llm.auth_token.take());

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("CITY", Some("Winston")), ("STATE", Some("NC"))], || {
            let mut v = json!([
                "hello-$CITY",
                { "loc": "${CITY}-${STATE}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["hello-Winston", { "loc": "Winston-NC" }, 42, true, null])
            );
        });
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${DOES_NOT_EXIST}"));
    }

    #[test]
    fn credential_falls_back_to_openai_env() {
        temp_env::with_var(OPENAI_API_KEY_ENV, Some("sk-env"), || {
            assert_eq!(resolve_credential(None).as_deref(), Some("sk-env"));
            assert_eq!(
                resolve_credential(Some("${UNSET_TOKEN}".into())).as_deref(),
                Some("sk-env")
            );
            assert_eq!(
                resolve_credential(Some("sk-file".into())).as_deref(),
                Some("sk-file")
            );
        });
    }

    #[test]
    fn credential_absent_everywhere_is_none() {
        temp_env::with_var(OPENAI_API_KEY_ENV, None::<&str>, || {
            assert_eq!(resolve_credential(None), None);
            assert_eq!(resolve_credential(Some("  ".into())), None);
        });
    }
}
