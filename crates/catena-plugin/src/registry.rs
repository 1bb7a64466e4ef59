// SPDX-FileCopyrightText: 2026 Catena Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin registry for descriptor storage, enumeration and lookup.
//!
//! The `PluginRegistry` keeps descriptors in registration order and tracks
//! categories in the order they were first seen, which is the display order
//! every front end uses. Names and aliases share one namespace: registering
//! a descriptor whose name or alias is already taken is rejected.
//!
//! Registration happens once during startup. Afterwards the registry is
//! shared immutably (typically as `Arc<PluginRegistry>`) with the engine and
//! front ends.

use std::collections::HashMap;
use std::sync::Arc;

use catena_core::{CatenaError, PluginDescriptor};
use tracing::debug;

/// Minimum Jaro-Winkler similarity for a fuzzy search hit.
const SEARCH_THRESHOLD: f64 = 0.75;

/// Score given to names that contain the query as a substring.
const SUBSTRING_SCORE: f64 = 0.95;

/// A fuzzy search result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The matching descriptor.
    pub descriptor: Arc<PluginDescriptor>,
    /// The name or alias that matched best.
    pub matched: String,
    /// Similarity in `0.0..=1.0`.
    pub score: f64,
}

/// Registry of available transforms.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    descriptors: Vec<Arc<PluginDescriptor>>,
    categories: Vec<String>,
    names: HashMap<String, usize>,
}

impl PluginRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its category.
    ///
    /// Fails with [`CatenaError::Registration`] if the descriptor has no
    /// category, has a blank name, or if its name or any alias is already
    /// taken by another descriptor.
    pub fn register(
        &mut self,
        descriptor: PluginDescriptor,
    ) -> Result<Arc<PluginDescriptor>, CatenaError> {
        let name = descriptor.name().to_string();
        if name.trim().is_empty() {
            return Err(CatenaError::Registration {
                name,
                message: "plugin name must not be empty".to_string(),
            });
        }

        let category = match descriptor.category() {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            _ => {
                return Err(CatenaError::Registration {
                    name,
                    message: "no category set".to_string(),
                });
            }
        };

        let mut seen: Vec<&str> = Vec::new();
        for candidate in descriptor.all_names() {
            if candidate.trim().is_empty() {
                return Err(CatenaError::Registration {
                    name,
                    message: "aliases must not be empty".to_string(),
                });
            }
            if seen.contains(&candidate) {
                return Err(CatenaError::Registration {
                    name,
                    message: format!("'{candidate}' is listed more than once"),
                });
            }
            if let Some(&existing) = self.names.get(candidate) {
                let owner = self.descriptors[existing].name();
                return Err(CatenaError::Registration {
                    name,
                    message: format!("'{candidate}' is already registered by plugin '{owner}'"),
                });
            }
            seen.push(candidate);
        }

        let position = self.descriptors.len();
        for candidate in descriptor.all_names() {
            self.names.insert(candidate.to_string(), position);
        }
        if !self.categories.contains(&category) {
            self.categories.push(category.clone());
        }

        let descriptor = Arc::new(descriptor);
        self.descriptors.push(Arc::clone(&descriptor));
        debug!(plugin = %name, %category, mode = %descriptor.mode(), "plugin registered");
        Ok(descriptor)
    }

    /// Known categories in first-registration order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }

    /// Names in `category`, in registration order.
    ///
    /// With `include_aliases`, each descriptor's aliases follow its
    /// canonical name as additional entries. Unknown categories yield an
    /// empty list.
    pub fn list_by_category(&self, category: &str, include_aliases: bool) -> Vec<&str> {
        self.descriptors
            .iter()
            .filter(|d| d.category() == Some(category))
            .flat_map(|d| {
                let aliases = if include_aliases { d.aliases() } else { &[] };
                std::iter::once(d.name()).chain(aliases.iter().map(String::as_str))
            })
            .collect()
    }

    /// Resolves a name or alias to its descriptor.
    pub fn lookup(&self, name: &str) -> Result<Arc<PluginDescriptor>, CatenaError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| CatenaError::PluginNotFound {
                name: name.to_string(),
            })
    }

    /// Get a descriptor by name or alias.
    pub fn get(&self, name: &str) -> Option<&Arc<PluginDescriptor>> {
        self.names.get(name).map(|&i| &self.descriptors[i])
    }

    /// Fuzzy search over names and aliases, best matches first.
    ///
    /// Case-insensitive. Exact matches score 1.0, substring matches 0.95 and
    /// everything else its Jaro-Winkler similarity; hits below 0.75 are
    /// dropped. Ties keep registration order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .descriptors
            .iter()
            .filter_map(|d| {
                d.all_names()
                    .map(|n| (n, name_score(&query, &n.to_lowercase())))
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .filter(|(_, score)| *score >= SEARCH_THRESHOLD)
                    .map(|(matched, score)| SearchHit {
                        descriptor: Arc::clone(d),
                        matched: matched.to_string(),
                        score,
                    })
            })
            .collect();

        // Stable sort keeps registration order among equal scores.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        hits
    }

    /// Iterates descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PluginDescriptor>> {
        self.descriptors.iter()
    }

    /// Returns the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no descriptors are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn name_score(query: &str, candidate: &str) -> f64 {
    if candidate == query {
        1.0
    } else if candidate.contains(query) {
        SUBSTRING_SCORE
    } else {
        strsim::jaro_winkler(query, candidate)
    }
}

#[cfg(test)]
mod tests {
    use catena_core::{Transform, TransformError};

    use super::*;

    fn identity(input: &[u8]) -> Result<Vec<u8>, TransformError> {
        Ok(input.to_vec())
    }

    fn plugin(name: &str, category: &str) -> PluginDescriptor {
        PluginDescriptor::new(name, Transform::synchronous(identity)).with_category(category)
    }

    fn populated() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry
            .register(plugin("base64", "codec").with_alias("b64"))
            .unwrap();
        registry.register(plugin("sha256", "hash")).unwrap();
        registry
            .register(plugin("hex", "codec").with_alias("base16"))
            .unwrap();
        registry.register(plugin("gzip", "compression")).unwrap();
        registry
    }

    #[test]
    fn register_and_lookup_roundtrip() {
        let registry = populated();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.lookup("hex").unwrap().name(), "hex");
    }

    #[test]
    fn lookup_resolves_aliases() {
        let registry = populated();
        assert_eq!(registry.lookup("b64").unwrap().name(), "base64");
        assert_eq!(registry.lookup("base16").unwrap().name(), "hex");
    }

    #[test]
    fn lookup_unknown_is_not_found() {
        let registry = populated();
        let err = registry.lookup("rot13").unwrap_err();
        assert!(matches!(err, CatenaError::PluginNotFound { name } if name == "rot13"));
    }

    #[test]
    fn register_requires_category() {
        let mut registry = PluginRegistry::new();
        let err = registry
            .register(PluginDescriptor::new("orphan", Transform::synchronous(identity)))
            .unwrap_err();
        assert!(matches!(err, CatenaError::Registration { ref name, .. } if name == "orphan"));
        assert!(err.to_string().contains("no category"));
        assert!(registry.is_empty());
    }

    #[test]
    fn register_rejects_blank_category_and_name() {
        let mut registry = PluginRegistry::new();
        assert!(registry.register(plugin("x", "  ")).is_err());
        assert!(registry.register(plugin(" ", "codec")).is_err());
    }

    #[test]
    fn register_rejects_name_collision() {
        let mut registry = populated();
        let err = registry.register(plugin("hex", "hash")).unwrap_err();
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn register_rejects_alias_colliding_with_name() {
        let mut registry = populated();
        let err = registry
            .register(plugin("base64url", "codec").with_alias("base64"))
            .unwrap_err();
        assert!(err.to_string().contains("'base64' is already registered"));
        // The rejected descriptor left no trace behind.
        assert!(registry.get("base64url").is_none());
    }

    #[test]
    fn register_rejects_name_colliding_with_alias() {
        let mut registry = populated();
        assert!(registry.register(plugin("b64", "codec")).is_err());
    }

    #[test]
    fn register_rejects_alias_repeating_own_name() {
        let mut registry = PluginRegistry::new();
        let err = registry
            .register(plugin("hex", "codec").with_alias("hex"))
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn categories_follow_first_registration() {
        let registry = populated();
        assert_eq!(registry.categories(), vec!["codec", "hash", "compression"]);
        // Stable across calls.
        assert_eq!(registry.categories(), registry.categories());
    }

    #[test]
    fn list_by_category_keeps_registration_order() {
        let registry = populated();
        assert_eq!(registry.list_by_category("codec", false), vec!["base64", "hex"]);
        assert_eq!(
            registry.list_by_category("codec", true),
            vec!["base64", "b64", "hex", "base16"]
        );
        assert!(registry.list_by_category("cipher", true).is_empty());
    }

    #[test]
    fn search_ranks_exact_then_substring_then_fuzzy() {
        let registry = populated();
        let hits = registry.search("base", 10);
        let names: Vec<&str> = hits.iter().map(|h| h.descriptor.name()).collect();
        assert_eq!(names.first(), Some(&"base64"));
        assert!(names.contains(&"hex"), "alias base16 should match: {names:?}");

        let exact = registry.search("GZIP", 1);
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].descriptor.name(), "gzip");
        assert_eq!(exact[0].score, 1.0);
    }

    #[test]
    fn search_tolerates_typos_and_drops_noise() {
        let registry = populated();
        let hits = registry.search("sha265", 5);
        assert_eq!(hits[0].descriptor.name(), "sha256");
        assert!(registry.search("zzzz", 5).is_empty());
        assert!(registry.search("   ", 5).is_empty());
    }
}
