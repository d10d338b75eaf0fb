use crate::common::{ApplicationError, ApplicationResult};
use crate::domains::network::{NetworkDescription, NetworkSource};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "BEACON_NET_DATA_DIR";

/// Reads network descriptions from a directory. Files ending in `.json` are
/// parsed as JSON, everything else as TOML.
pub struct FilesystemNetworkSource {
    base: PathBuf,
}

impl FilesystemNetworkSource {
    /// Base directory precedence: explicit argument, `BEACON_NET_DATA_DIR`,
    /// then the current directory.
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(|| match env::var(DATA_DIR_ENV) {
            Ok(v) => PathBuf::from(v),
            Err(_) => PathBuf::from("."),
        });
        Self { base }
    }
}

impl NetworkSource for FilesystemNetworkSource {
    fn load_description(&self, name: &str) -> ApplicationResult<NetworkDescription> {
        let path = self.base.join(name);
        let content = fs::read_to_string(&path)
            .map_err(|e| ApplicationError::Description(format!("{}: {}", path.display(), e)))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            NetworkDescription::from_json_str(&content).map_err(|e| e.to_string())
        } else {
            NetworkDescription::from_toml_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|e| ApplicationError::Description(format!("{}: {}", path.display(), e)))
    }
}
