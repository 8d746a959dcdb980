use std::{
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::warn;

use crate::error::AppError;

/// Global git config file in user's home directory
const GLOBAL_GIT_CONFIG_FILE: &str = ".gitconfig";

/// Matches a `[profile "<name>"]` section header anywhere on a line
static PROFILE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[profile "(.*?)"\]"#).expect("valid section pattern"));

/// Home directory stand-in when none can be determined, left unexpanded
const UNRESOLVED_HOME: &str = "~";

/// Gets the path to the global git config file
pub fn get_global_config_path() -> PathBuf {
    global_config_path_in(dirs::home_dir())
}

/// Places the global config file under `home`
///
/// Without a home directory the path stays relative to a literal `~`, which
/// is normally not a file, so the store reports itself as missing.
pub fn global_config_path_in(home: Option<PathBuf>) -> PathBuf {
    match home {
        Some(home_dir) => home_dir.join(GLOBAL_GIT_CONFIG_FILE),
        None => {
            warn!("home directory not found");
            Path::new(UNRESOLVED_HOME).join(GLOBAL_GIT_CONFIG_FILE)
        }
    }
}

/// Resolves the backing config file, preferring an explicitly supplied path
///
/// # Arguments
/// * `explicit` - Path given by the caller, if any
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => get_global_config_path(),
    }
}

/// Checks that the config path points at a regular file
pub fn is_config_file(path: &Path) -> bool {
    path.is_file()
}

/// Collects profile names from `[profile "<name>"]` headers in file order
///
/// Duplicated sections are reported as many times as they appear.
pub fn scan_profile_sections<R: BufRead>(reader: R) -> Result<Vec<String>, AppError> {
    let mut names: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(captures) = PROFILE_SECTION.captures(&line) {
            names.push(captures[1].to_string());
        }
    }
    Ok(names)
}

/// Reads the config file and lists the profile sections it contains
///
/// # Arguments
/// * `path` - Git config file to scan
pub fn load_profile_sections(path: &Path) -> Result<Vec<String>, AppError> {
    let file = fs::File::open(path)?;
    scan_profile_sections(BufReader::new(file))
}
