use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;
use veritas_config::{LogEncoding, VeritasConfigLoader};

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_file_and_expands_credential() {
    let tmp = TempDir::new().unwrap();
    let file_yaml = r#"
server:
  bind_addr: "127.0.0.1:9001"
llm:
  model: "gpt-4o-mini"
  auth_token: "${OPENAI_API_KEY}"
  temperature: 0.2
  max_tokens: 512
logging:
  format: json
  emit_stderr: false
"#;
    let p = write_yaml(&tmp, "veritas.yaml", file_yaml);

    temp_env::with_var("OPENAI_API_KEY", Some("sk-from-env"), || {
        let config = VeritasConfigLoader::new()
            .with_file(&p)
            .load()
            .expect("load system config");

        assert_eq!(config.server.bind_addr, "127.0.0.1:9001");
        assert_eq!(config.llm.auth_token.as_deref(), Some("sk-from-env"));
        assert_eq!(config.llm.max_tokens, 512);
        assert!((config.llm.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.logging.format, LogEncoding::Json);
        assert!(!config.logging.emit_stderr);
    });
}

#[test]
#[serial]
fn env_overrides_win_over_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(&tmp, "veritas.yaml", "llm:\n  model: gpt-4o-mini\n");

    temp_env::with_vars(
        [
            ("VERITAS__LLM__MODEL", Some("gpt-4o")),
            ("VERITAS__LLM__MAX_TOKENS", Some("1024")),
        ],
        || {
            let config = VeritasConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load with env overrides");

            assert_eq!(config.llm.model, "gpt-4o");
            assert_eq!(config.llm.max_tokens, 1024);
        },
    );
}

#[test]
#[serial]
fn missing_optional_file_uses_defaults_and_no_credential() {
    temp_env::with_var("OPENAI_API_KEY", None::<&str>, || {
        let config = VeritasConfigLoader::new()
            .with_optional_file("/definitely/not/here/veritas.yaml")
            .load()
            .expect("defaults load");

        assert_eq!(config.server.bind_addr, "0.0.0.0:8787");
        assert_eq!(config.llm.endpoint, "https://api.openai.com/v1");
        assert_eq!(config.client.endpoint, "http://127.0.0.1:8787/");
        assert!(config.llm.auth_token.is_none());
    });
}

#[test]
#[serial]
fn missing_required_file_is_an_error() {
    let result = VeritasConfigLoader::new()
        .with_file("/definitely/not/here/veritas.yaml")
        .load();
    assert!(result.is_err());
}
