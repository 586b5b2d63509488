use std::env;
use std::fs;
use std::path::Path;

/// 把 `.env` 中的变量转发为编译期环境变量，供 `option_env!` 读取。
/// 已在外部环境中设置的变量优先。
fn main() {
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    }

    for key in [
        "WMS_API_BASE_URL",
        "WMS_COOKIE_MAX_AGE",
        "WMS_TOAST_DURATION_MS",
        "WMS_PER_PAGE",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
    println!("cargo:rerun-if-changed=build.rs");
}
