//! Terrain definitions and the catalog the build engine reads them from

use crate::resolve::VariantSet;
use crate::rules::RuleTable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tileforge_core::TerrainId;

/// Errors that can occur when loading or validating a terrain library
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read terrain library: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse terrain library: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Terrain {0} is defined more than once")]
    DuplicateTerrain(TerrainId),
    #[error("Invalid rule table for terrain {terrain}: {reason}")]
    InvalidRuleTable { terrain: TerrainId, reason: String },
}

/// Everything the engine needs to know about one terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDefinition {
    pub id: TerrainId,
    pub name: String,
    /// Invisible terrain: builds against it are no-ops.
    #[serde(default)]
    pub empty: bool,
    /// Composite terrain marker. Carried for hosts; the engine does not interpret it.
    #[serde(default)]
    pub composite: bool,
    #[serde(default = "RuleTable::standard")]
    pub rules: RuleTable,
    #[serde(default)]
    pub variants: VariantSet,
}

impl TerrainDefinition {
    /// New visible terrain using the standard rule table and no tiles authored
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TerrainId::new(),
            name: name.into(),
            empty: false,
            composite: false,
            rules: RuleTable::standard(),
            variants: VariantSet::default(),
        }
    }

    pub fn with_id(mut self, id: TerrainId) -> Self {
        self.id = id;
        self
    }

    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_variants(mut self, variants: VariantSet) -> Self {
        self.variants = variants;
        self
    }

    pub fn empty(mut self) -> Self {
        self.empty = true;
        self
    }

    /// Check the rule table for entries that can never behave as authored.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for (index, entry) in self.rules.entries.iter().enumerate() {
            if entry.linked_count() == 1 {
                return Err(CatalogError::InvalidRuleTable {
                    terrain: self.id,
                    reason: format!(
                        "entry {} has a single Linked cell; Linked needs at least two cells",
                        index
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Source of terrain definitions for the build engine.
pub trait TerrainCatalog {
    fn definition(&self, terrain: TerrainId) -> Option<&TerrainDefinition>;

    fn contains(&self, terrain: TerrainId) -> bool {
        self.definition(terrain).is_some()
    }

    /// Unknown terrains are not empty; the engine reports them separately.
    fn is_empty(&self, terrain: TerrainId) -> bool {
        self.definition(terrain).is_some_and(|d| d.empty)
    }

    fn rule_table(&self, terrain: TerrainId) -> Option<&RuleTable> {
        self.definition(terrain).map(|d| &d.rules)
    }

    fn variant_groups(&self, terrain: TerrainId) -> Option<&VariantSet> {
        self.definition(terrain).map(|d| &d.variants)
    }
}

impl<T: TerrainCatalog + ?Sized> TerrainCatalog for &T {
    fn definition(&self, terrain: TerrainId) -> Option<&TerrainDefinition> {
        (**self).definition(terrain)
    }
}

/// In-memory terrain catalog
#[derive(Debug, Clone, Default, Serialize)]
pub struct TerrainLibrary {
    terrains: Vec<TerrainDefinition>,
    #[serde(skip)]
    index: HashMap<TerrainId, usize>,
}

impl TerrainLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Rejects duplicate ids and invalid rule tables.
    pub fn insert(&mut self, definition: TerrainDefinition) -> Result<TerrainId, CatalogError> {
        if self.index.contains_key(&definition.id) {
            return Err(CatalogError::DuplicateTerrain(definition.id));
        }
        definition.validate()?;
        let id = definition.id;
        self.index.insert(id, self.terrains.len());
        self.terrains.push(definition);
        Ok(id)
    }

    pub fn remove(&mut self, terrain: TerrainId) -> Option<TerrainDefinition> {
        let position = self.index.remove(&terrain)?;
        let removed = self.terrains.remove(position);
        self.rebuild_index();
        Some(removed)
    }

    pub fn get(&self, terrain: TerrainId) -> Option<&TerrainDefinition> {
        self.index.get(&terrain).map(|&i| &self.terrains[i])
    }

    /// Get a terrain by name
    pub fn find_by_name(&self, name: &str) -> Option<&TerrainDefinition> {
        self.terrains.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerrainDefinition> {
        self.terrains.iter()
    }

    pub fn len(&self) -> usize {
        self.terrains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terrains.is_empty()
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .terrains
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id, i))
            .collect();
    }
}

impl TerrainCatalog for TerrainLibrary {
    fn definition(&self, terrain: TerrainId) -> Option<&TerrainDefinition> {
        self.get(terrain)
    }
}

/// Serialized form of a library: a flat list of definitions.
#[derive(Debug, Deserialize)]
struct LibraryDocument {
    terrains: Vec<TerrainDefinition>,
}

/// Parse a terrain library from a JSON string
pub fn parse_terrain_library(json: &str) -> Result<TerrainLibrary, CatalogError> {
    let document: LibraryDocument = serde_json::from_str(json)?;
    let mut library = TerrainLibrary::new();
    for definition in document.terrains {
        library.insert(definition)?;
    }
    Ok(library)
}

/// Load a terrain library from a JSON file
pub fn load_terrain_library(path: &Path) -> Result<TerrainLibrary, CatalogError> {
    let content = std::fs::read_to_string(path)?;
    parse_terrain_library(&content)
}

/// Save a terrain library to a JSON file
pub fn save_terrain_library(library: &TerrainLibrary, path: &Path) -> Result<(), CatalogError> {
    let content = serde_json::to_string_pretty(library)?;
    std::fs::write(path, content)?;
    Ok(())
}
