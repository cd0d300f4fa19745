use std::path::{Path, PathBuf};

const APP_DIR: &str = "looptune";

pub fn data_dir() -> PathBuf {
    // ~/.local/share/looptune on every unix, including macOS
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

#[cfg(unix)]
fn mpv_binary_names() -> &'static [&'static str] {
    &["mpv"]
}

#[cfg(windows)]
fn mpv_binary_names() -> &'static [&'static str] {
    &["mpv.exe", "mpv"]
}

#[cfg(unix)]
fn yt_dlp_binary_names() -> &'static [&'static str] {
    &["yt-dlp", "yt-dlp_macos", "yt-dlp_linux"]
}

#[cfg(windows)]
fn yt_dlp_binary_names() -> &'static [&'static str] {
    &["yt-dlp.exe", "yt-dlp"]
}

fn find_beside_exe(names: &[&str]) -> Option<PathBuf> {
    let current_exe = std::env::current_exe().ok()?;
    let dir = current_exe.parent()?;
    for name in names {
        let p = dir.join(name);
        if p.exists() {
            return Some(p);
        }
        let p = dir.join("external").join(name);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn find_on_path(names: &[&str]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).find_map(|dir| find_in_dir(&dir, names))
}

fn find_in_dir(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|p| p.exists())
}

fn env_override(var: &str) -> Option<PathBuf> {
    let p = PathBuf::from(std::env::var_os(var)?);
    p.exists().then_some(p)
}

/// Where to look for an external tool, in priority order.
#[derive(Debug, Clone, Default)]
pub struct ToolLookup {
    /// Path configured explicitly by the user.
    pub configured: Option<PathBuf>,
    /// Skip the beside-the-executable search and go straight to PATH.
    pub use_system_deps: bool,
}

impl ToolLookup {
    fn find(&self, env_var: &str, names: &[&str]) -> Option<PathBuf> {
        if let Some(p) = env_override(env_var) {
            return Some(p);
        }
        if let Some(p) = self.configured.as_ref().filter(|p| p.exists()) {
            return Some(p.clone());
        }
        if !self.use_system_deps {
            if let Some(p) = find_beside_exe(names) {
                return Some(p);
            }
        }
        find_on_path(names)
    }
}

/// Find the yt-dlp binary.
///
/// Searches in order:
/// 1. YT_DLP_PATH environment variable
/// 2. Configured path
/// 3. Beside current executable (unless use_system_deps is set)
/// 4. PATH
pub fn find_yt_dlp_binary(lookup: &ToolLookup) -> Option<PathBuf> {
    lookup.find("YT_DLP_PATH", yt_dlp_binary_names())
}

/// Find the mpv binary. Same order as [`find_yt_dlp_binary`], with MPV_PATH.
pub fn find_mpv_binary(lookup: &ToolLookup) -> Option<PathBuf> {
    lookup.find("MPV_PATH", mpv_binary_names())
}

/// Resolve a tool to a concrete program path, falling back to the bare name
/// so that a spawn failure still names the missing tool.
pub fn resolve_tool(found: Option<PathBuf>, bare_name: &str) -> PathBuf {
    found.unwrap_or_else(|| PathBuf::from(bare_name))
}
