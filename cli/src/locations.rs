//! Browser profile locations per operating system.
//!
//! Lookup only produces a path hint for finding the `Web Data` store; it
//! returns `None` for unknown browser/OS pairs or when the relevant base
//! environment variable is missing, and never errors.

use std::env;
use std::path::PathBuf;

/// Browsers with known profile locations.
pub const KNOWN_BROWSERS: [&str; 7] = [
    "chrome", "chromium", "brave", "edge", "vivaldi", "opera", "helium",
];

/// Profile subpaths per browser: (windows under `%LOCALAPPDATA%`,
/// macOS and linux under `$HOME`).
fn profile_subpaths(browser: &str) -> Option<(&'static str, &'static str, &'static str)> {
    let paths = match browser {
        "chrome" => (
            "Google/Chrome/User Data",
            "Library/Application Support/Google/Chrome",
            ".config/google-chrome/Default",
        ),
        "chromium" => (
            "Chromium/User Data",
            "Library/Application Support/Chromium",
            ".config/chromium/Default",
        ),
        "brave" => (
            "BraveSoftware/Brave-Browser/User Data",
            "Library/Application Support/BraveSoftware/Brave-Browser",
            ".config/BraveSoftware/Brave-Browser/Default",
        ),
        "edge" => (
            "Microsoft/Edge/User Data",
            "Library/Application Support/Microsoft Edge",
            ".config/microsoft-edge/Default",
        ),
        "vivaldi" => (
            "Vivaldi/User Data",
            "Library/Application Support/Vivaldi",
            ".config/vivaldi/Default",
        ),
        "opera" => (
            "Opera Software/Opera Stable",
            "Library/Application Support/com.operasoftware.Opera",
            ".config/opera",
        ),
        "helium" => (
            "net.imput.helium/User Data",
            "Library/Application Support/net.imput.helium",
            ".config/net.imput.helium/Default",
        ),
        _ => return None,
    };
    Some(paths)
}

/// Resolve a browser's profile directory on the current OS.
///
/// Browser names are matched case-insensitively.
pub fn profile_dir(browser: &str) -> Option<PathBuf> {
    profile_dir_on(browser, env::consts::OS)
}

fn profile_dir_on(browser: &str, os: &str) -> Option<PathBuf> {
    let (windows, macos, linux) = profile_subpaths(&browser.to_lowercase())?;
    match os {
        "windows" => Some(PathBuf::from(env::var_os("LOCALAPPDATA")?).join(windows)),
        "macos" => Some(PathBuf::from(env::var_os("HOME")?).join(macos)),
        "linux" => Some(PathBuf::from(env::var_os("HOME")?).join(linux)),
        _ => None,
    }
}

/// The default `Web Data` store path for a browser, if its profile
/// directory is known on this OS.
pub fn web_data_path(browser: &str) -> Option<PathBuf> {
    profile_dir(browser).map(|dir| dir.join("Web Data"))
}
