// Embed the git short hash in --version when building from a checkout.
fn main() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|stdout| stdout.trim().to_owned())
        .filter(|hash| !hash.is_empty());

    match hash {
        Some(hash) => println!("cargo:rustc-env=VFXD_BUILD_VERSION={version} ({hash})"),
        None => println!("cargo:rustc-env=VFXD_BUILD_VERSION={version}"),
    }
}
