//! The key schema.
//!
//! ```text
//! pkgs/<path>\0name                  package name
//! pkgs/<path>\0imports/<imported>    import edge (empty value)
//! pkgs/<path>\0scope                 key of the root scope node
//! pkgs/<path>\0scopes/<id>           framed scope node
//! pkgs/<path>\0objects/<id>          framed declaration
//! types/<id>                         framed composite type
//! builtin/<name>                     built-in declaration or type (never stored)
//! ```
//!
//! Import paths never contain NUL, so the NUL after `<path>` separates the package
//! path from the rest of the key unambiguously.

use std::fmt;

use uuid::Uuid;

const PKGS: &str = "pkgs/";
const TYPES: &str = "types/";
const BUILTIN: &str = "builtin/";

/// A storage key. Keys of minted entities double as their identifiers: a framed
/// value refers to another entity by that entity's full key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Key(Vec<u8>);

impl Key {
    fn package_sub(path: &str, rest: &str) -> Key {
        let mut key = Vec::with_capacity(PKGS.len() + path.len() + 1 + rest.len());
        key.extend_from_slice(PKGS.as_bytes());
        key.extend_from_slice(path.as_bytes());
        key.push(0);
        key.extend_from_slice(rest.as_bytes());
        Key(key)
    }

    pub fn builtin(name: &str) -> Key {
        Key(format!("{BUILTIN}{name}").into_bytes())
    }

    pub fn object(package: &str, id: Uuid) -> Key {
        Self::package_sub(package, &format!("objects/{}", id.hyphenated()))
    }

    pub fn type_(id: Uuid) -> Key {
        Key(format!("{TYPES}{}", id.hyphenated()).into_bytes())
    }

    pub fn scope(package: &str, id: Uuid) -> Key {
        Self::package_sub(package, &format!("scopes/{}", id.hyphenated()))
    }

    pub fn package_name(path: &str) -> Key {
        Self::package_sub(path, "name")
    }

    pub fn package_import(path: &str, imported: &str) -> Key {
        Self::package_sub(path, &format!("imports/{imported}"))
    }

    pub fn package_scope(path: &str) -> Key {
        Self::package_sub(path, "scope")
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Key {
        Key(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_builtin(&self) -> bool {
        self.0.starts_with(BUILTIN.as_bytes())
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Key> for Vec<u8> {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0).replace('\0', "\\0"))
    }
}
