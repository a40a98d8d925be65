use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{
    config::RegistryConfig,
    id::{split, PathGrammar},
    parse_domain, parse_path, NamespacedId, Result,
};

lazy_static::lazy_static! {
    static ref GLOBAL_REGISTRY: IdRegistry = IdRegistry::new();
}

/// Process-wide registry for callers that don't carry their own.
/// Entries are never evicted.
pub fn global() -> &'static IdRegistry {
    &GLOBAL_REGISTRY
}

/// Interning cache for [`NamespacedId`]s.
///
/// Keyed by the full canonical string, so two distinct ids can never share
/// an entry. Clones share the same cache.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    entries: Arc<DashMap<String, NamespacedId>>,
    grammar: PathGrammar,
}

impl IdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry with the configured path grammar and interns every
    /// `preload` entry. Fails on the first malformed entry.
    pub fn with_config(config: &RegistryConfig) -> Result<Self> {
        let registry = Self {
            entries: Arc::new(DashMap::new()),
            grammar: if config.strict_paths {
                PathGrammar::Strict
            } else {
                PathGrammar::Resource
            },
        };
        for raw in &config.preload {
            let (domain, path) = split(raw)?;
            registry.from_parts(domain, path)?;
        }
        tracing::info!(
            "Namespaced id registry ready with {} preloaded ids ({} paths)",
            registry.len(),
            registry.grammar.pattern()
        );
        Ok(registry)
    }

    pub fn grammar(&self) -> PathGrammar {
        self.grammar
    }

    /// Returns the cached id for `domain:path`, validating and caching it on
    /// first use. Lookup-or-insert is atomic per key, so concurrent callers
    /// always get the same allocation.
    pub fn from_parts(&self, domain: &str, path: &str) -> Result<NamespacedId> {
        let key = format!("{domain}:{path}");
        if let Some(hit) = self.entries.get(key.as_str()) {
            return Ok(hit.value().clone());
        }
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let id = NamespacedId::with_grammar(domain, path, self.grammar)?;
                tracing::trace!("Interned namespaced id {}", id);
                entry.insert(id.clone());
                Ok(id)
            }
        }
    }

    /// # Panics
    ///
    /// If `raw` contains more than one `:`.
    pub fn from_string(&self, raw: &str) -> Result<NamespacedId> {
        self.from_parts(parse_domain(raw), parse_path(raw))
    }

    /// Lookup without interning.
    pub fn get(&self, domain: &str, path: &str) -> Option<NamespacedId> {
        self.entries
            .get(format!("{domain}:{path}").as_str())
            .map(|it| it.value().clone())
    }

    pub fn contains(&self, id: &NamespacedId) -> bool {
        self.entries.contains_key(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
