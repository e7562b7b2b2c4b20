//! Item Registry
//!
//! Holds every item definition a session can reference. Registries are
//! plain values owned by the session that uses them; nothing here is
//! global or lazily initialized. Definitions come from TOML files in a
//! data directory, or are registered directly by assembly code.

use std::collections::HashMap;
use std::path::Path;

use tracing::{error, info, warn};

use super::item_def::{ItemDefinition, RawItemDefinition};
use crate::error::GameError;

/// Registry for all item definitions
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Load all item definitions from `.toml` files in a directory.
    ///
    /// Each file is a table of `id -> definition`. A duplicate id, within
    /// a file or across files, is a configuration error and aborts the
    /// load; the session being assembled must not start with ambiguous
    /// item content.
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), GameError> {
        if !data_dir.exists() {
            warn!("Item data directory does not exist: {:?}", data_dir);
            return Ok(());
        }

        let entries = std::fs::read_dir(data_dir).map_err(|e| GameError::ReadFile {
            path: data_dir.to_path_buf(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| GameError::ReadFile {
                path: data_dir.to_path_buf(),
                source: e,
            })?;
            let path = entry.path();

            if path.extension().map_or(false, |ext| ext == "toml") {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| GameError::ReadFile {
                        path: path.clone(),
                        source: e,
                    })?;

                // Parse as table of items
                let table: HashMap<String, RawItemDefinition> = toml::from_str(&content)
                    .map_err(|e| GameError::ParseFile {
                        path: path.clone(),
                        source: e,
                    })?;

                for (id, raw) in table {
                    if self.items.contains_key(&id) {
                        error!("Duplicate item ID '{}' in {:?}", id, path);
                        return Err(GameError::DuplicateItem(id));
                    }
                    let item = ItemDefinition::from_raw(&id, &raw);
                    self.items.insert(id, item);
                }
            }
        }

        info!("Loaded {} item definitions", self.items.len());

        Ok(())
    }

    /// Register a definition built in code. Same duplicate rule as the
    /// file loader.
    pub fn register(&mut self, item: ItemDefinition) -> Result<(), GameError> {
        if self.items.contains_key(&item.id) {
            return Err(GameError::DuplicateItem(item.id));
        }
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    /// Get an item definition by ID
    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Get all item IDs
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.items.keys()
    }

    /// Get all items
    pub fn all(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    /// Check if an item exists
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Get the number of loaded items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}
