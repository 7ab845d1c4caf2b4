use std::{fmt, process};

const DEFAULT_VERSION: &str = "???";

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=txt_data");
    println!("cargo:rustc-env=GIT_HASH={}", git_version());
}

/// The short hash of HEAD, or DEFAULT_VERSION (with a build warning) if git can't tell us
fn git_version() -> String {
    match try_git_version() {
        Ok(version) => version,
        Err(why) => {
            warning(format_args!("{}", why));
            warning(format_args!("unable to determine version... using default version '{}'", DEFAULT_VERSION));
            DEFAULT_VERSION.to_string()
        }
    }
}

fn try_git_version() -> Result<String, String> {
    let output = process::Command::new("git")
        .args(&["rev-parse", "--short", "HEAD"])
        .output()
        .map_err(|err| format!("unable to execute git command... {:?}", err))?;

    if !output.status.success() {
        return Err(format!("got non-0 exit code... {}", output.status));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(stderr.trim().to_string());
    }

    let stdout = String::from_utf8(output.stdout)
        .map_err(|err| format!("failed to read stdout (not utf8??)... err={:?}", err))?;

    let version = stdout.trim().to_ascii_lowercase();
    if version.is_empty() {
        Err("no version returned from git??".to_string())
    } else {
        Ok(version)
    }
}

fn warning(args: fmt::Arguments<'_>) {
    println!("cargo:warning={}", args)
}
