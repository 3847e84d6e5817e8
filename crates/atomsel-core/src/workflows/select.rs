use crate::core::models::group::{AtomCollection, AtomGroup};
use crate::core::models::ids::StructureId;
use crate::selection::cache::SelectionCache;
use crate::selection::config::{ConfigError, SelectionConfig};
use crate::selection::error::SelectionError;
use crate::selection::eval::Selection;
use crate::selection::parser::SelectionParser;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{debug, instrument};

/// Parses and applies `text` in one call, with default settings and no
/// caching.
pub fn select<'s, G>(group: &'s G, text: &str) -> Result<AtomGroup<'s>, SelectionError>
where
    G: AtomCollection + ?Sized,
{
    Selection::parse(text)?.apply(group)
}

/// Long-lived selection front end: one parser and a cache, both built from the
/// same configuration and shared by every selection it has compiled.
///
/// Selection text is compiled once; repeating the same text reuses the same
/// [`Selection`] and therefore its cached results.
#[derive(Debug, Default)]
pub struct Selector {
    parser: SelectionParser,
    cache: SelectionCache,
    compiled: HashMap<String, Selection>,
}

impl Selector {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            parser: SelectionParser::new(&config),
            cache: SelectionCache::with_config(config),
            compiled: HashMap::new(),
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        SelectionConfig::load(path).map(Self::new)
    }

    pub fn config(&self) -> &SelectionConfig {
        self.cache.config()
    }

    pub fn cache(&self) -> &SelectionCache {
        &self.cache
    }

    /// Selects atoms of `group` described by `text`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Parse`] for malformed text (nothing is
    /// compiled or cached in that case) and [`SelectionError::Usage`] when the
    /// group cannot support the selection.
    #[instrument(skip_all, name = "select_workflow", fields(text = %text))]
    pub fn select<'s, G>(
        &mut self,
        group: &'s G,
        text: &str,
    ) -> Result<AtomGroup<'s>, SelectionError>
    where
        G: AtomCollection + ?Sized,
    {
        let selection = match self.compiled.entry(text.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let selection = self.parser.parse(text)?;
                debug!(selection = %selection, "Compiled new selection.");
                entry.insert(selection)
            }
        };
        selection.apply_cached(group, &mut self.cache)
    }

    /// Forgets cached results for one structure, e.g. before it is dropped.
    pub fn invalidate(&mut self, structure: StructureId) {
        self.cache.invalidate_structure(structure);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.compiled.clear();
    }
}
