use std::env;
use std::process::Command;

fn main() {
    let build_date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=TRELLIS_BUILD_DATE={}", build_date);

    // Cargo tells build scripts which compiler it is using
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let rustc_version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=TRELLIS_RUSTC_VERSION={}", rustc_version);

    let target = env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());
    println!("cargo:rustc-env=TRELLIS_TARGET={}", target);

    println!("cargo:rerun-if-changed=build.rs");
}
