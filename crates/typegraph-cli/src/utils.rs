use std::path::{Path, PathBuf};

use typegraph_encode::GraphConfig;

use crate::error::CliError;

pub const CONFIG_FILE: &str = "typegraph.toml";

/// Searches upwards from `start_path` for a `typegraph.toml`.
pub fn find_config(start_path: &Path) -> Option<PathBuf> {
    let mut current = start_path.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// The explicit config file if one was given, else the nearest `typegraph.toml`,
/// else the defaults. `store` overrides the configured database path.
pub fn load_config(explicit: Option<&Path>, store: Option<PathBuf>) -> Result<GraphConfig, CliError> {
    let found = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().map_err(|e| CliError::IoError {
                path: PathBuf::from("."),
                operation: "read current directory".to_string(),
                source: e,
            })?;
            find_config(&cwd)
        }
    };

    let mut config = match found {
        Some(path) => {
            log::debug!("using config {}", path.display());
            GraphConfig::load(&path)?
        }
        None => GraphConfig::default(),
    };
    if let Some(store) = store {
        config.store.path = store;
    }
    Ok(config)
}

/// Turns the printable form of a key back into bytes: `\0` stands for the NUL
/// separator and `\\` for a backslash.
pub fn parse_key(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut bytes = text.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'0') => out.push(0),
            Some(other) => out.push(other),
            None => out.push(b'\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn keys_unescape_nul() {
        assert_eq!(parse_key(r"pkgs/a/b\0name"), b"pkgs/a/b\0name".to_vec());
        assert_eq!(parse_key(r"odd\\"), b"odd\\".to_vec());
        assert_eq!(parse_key("builtin/int"), b"builtin/int".to_vec());
    }

    #[test]
    fn config_is_found_in_parent_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_config(&nested), None);

        std::fs::write(dir.path().join(CONFIG_FILE), "[store]\npath = \"g.db\"\n").unwrap();
        assert_eq!(find_config(&nested), Some(dir.path().join(CONFIG_FILE)));

        let config = load_config(Some(&dir.path().join(CONFIG_FILE)), None).unwrap();
        assert_eq!(config.store.path, PathBuf::from("g.db"));
        let config = load_config(Some(&dir.path().join(CONFIG_FILE)), Some("other.db".into())).unwrap();
        assert_eq!(config.store.path, PathBuf::from("other.db"));
    }
}
