use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("version.rs");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");

    if is_up_to_date(&dest_path, &Path::new(&manifest_dir).join("Cargo.toml")) {
        return;
    }

    let pkg_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let git_hash = git_short_hash().unwrap_or_else(|| "unknown".to_string());

    let contents = format!(
        "pub const BUILD_TIME: &str = {build_time:?};\n\
         pub const GIT_HASH: &str = {git_hash:?};\n\
         pub const LONG_VERSION: &str = \"{pkg_version} ({git_hash} built {build_time})\";\n"
    );
    fs::write(&dest_path, contents).expect("failed to write version.rs");
}

// Generated file is newer than Cargo.toml
fn is_up_to_date(generated: &Path, manifest: &Path) -> bool {
    let modified = |path: &Path| fs::metadata(path).and_then(|m| m.modified()).ok();
    match (modified(generated), modified(manifest)) {
        (Some(generated), Some(manifest)) => generated >= manifest,
        _ => false,
    }
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|hash| hash.trim().to_string())
}
