use std::sync::OnceLock;

use veritas_config::{LogEncoding, LoggingConfig};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let logging = LoggingConfig {
            format: if std::env::var("VERITAS_LOG_FORMAT")
                .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(false)
            {
                LogEncoding::Json
            } else {
                LogEncoding::Text
            },
            emit_stderr: true,
            dir: Some(std::env::temp_dir().join("veritas-tests").display().to_string()),
            filter: "debug".to_string(),
        };

        veritas_common::observability::init_logging("veritas-tests", &logging).unwrap_or_default()
    });
}
