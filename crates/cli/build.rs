//! Build script for the jianxin CLI
//!
//! Records where and when the binary was built so `--version` can show it.

use std::env;

fn build_var(name: &str) -> String {
    println!("cargo:rerun-if-env-changed={}", name);
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");

    let commit = build_var("GIT_COMMIT_HASH");
    let short_commit: String = commit.chars().take(12).collect();

    println!("cargo:rustc-env=BUILT_HOST={}", build_var("HOST"));
    println!("cargo:rustc-env=BUILT_GIT_COMMIT_HASH={}", short_commit);
    println!(
        "cargo:rustc-env=BUILT_TIME_UTC={}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
}
