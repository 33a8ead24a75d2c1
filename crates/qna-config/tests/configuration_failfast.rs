use std::ffi::OsString;
use std::fs;

use ortho_config::OrthoConfig;
use qna_config::Config;
use tempfile::TempDir;

fn load_with_file(contents: &str) -> Result<Config, String> {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("qna.toml");
    fs::write(&path, contents).expect("write config");

    let args = vec![
        OsString::from("qna"),
        OsString::from("--config-path"),
        path.into_os_string(),
    ];
    Config::load_from_iter(args).map_err(|error| error.to_string())
}

#[test]
fn malformed_toml_is_rejected() {
    let error = load_with_file(r#"endpoint = "tcp://127.0.0.1:9000"#)
        .expect_err("unterminated string must fail");
    assert!(!error.is_empty());
}

#[test]
fn unparseable_endpoint_is_rejected() {
    let error = load_with_file("endpoint = \"unix:///tmp/qna.sock\"\n")
        .expect_err("unsupported scheme must fail");
    assert!(error.contains("unix"), "expected scheme in error, got {error:?}");
}

#[test]
fn negative_ceiling_is_rejected() {
    load_with_file("max_request_bytes = -1\n").expect_err("negative ceiling must fail");
}
