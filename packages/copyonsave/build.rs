//! Build script for copyonsave that generates version information.
//!
//! The version is `git describe --always --tags --dirty=-dirty` when the crate
//! is built from a git checkout, and the package version otherwise (for
//! example when built from a source tarball).

use std::env;
use std::iter;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let version = match git_describe() {
        Ok(version) => version,
        Err(reason) => {
            println!("cargo:warning=using package version: {reason}");
            env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| String::from("unknown"))
        }
    };
    println!("cargo:rustc-env=COPYONSAVE_VERSION={version}");
}

fn run(prog: &str, argv: &[&str]) -> Result<String, String> {
    let invocation = iter::once(prog)
        .chain(argv.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let output = Command::new(prog)
        .args(argv)
        .output()
        .map_err(|e| format!("failed to execute `{invocation}`: {e}"))?;
    if !output.status.success() {
        return Err(format!("`{invocation}` exited with non-zero status"));
    }

    let output = String::from_utf8(output.stdout)
        .map_err(|e| format!("could not parse output of `{invocation}` as UTF-8: {e}"))?;
    Ok(output.trim_end().to_string())
}

fn git_describe() -> Result<String, String> {
    run("git", &["describe", "--always", "--tags", "--dirty=-dirty"])
}
