//! Category prompt configuration.
//!
//! Answer generation happens outside this crate, but the categories a
//! document can be filed under, and the prompt template each category
//! uses, are configuration the retrieval side owns. The table is an
//! explicit value constructed once and passed by reference, not a
//! process-wide singleton.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of the fallback category
pub const GENERAL_CATEGORY: &str = "general";

/// One answer-generation profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Display name
    pub name: String,

    /// Prompt template with `{context}` and `{question}` placeholders
    pub prompt_template: String,

    /// Sampling temperature the answer generator should use
    pub temperature: f32,
}

/// Immutable-by-convention table of category profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    categories: BTreeMap<String, Category>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let mut categories = BTreeMap::new();

        categories.insert(
            GENERAL_CATEGORY.to_string(),
            Category {
                name: "General".to_string(),
                prompt_template: "You answer general questions from the provided context. \
                                  Answer only from the context.\n\nContext:\n{context}\n\n\
                                  Question: {question}\n\nAnswer with the direct response \
                                  and cite the source documents."
                    .to_string(),
                temperature: 0.5,
            },
        );

        categories.insert(
            "dating".to_string(),
            Category {
                name: "Dating".to_string(),
                prompt_template: "You give empathetic, practical relationship advice based \
                                  on the provided context.\n\nContext:\n{context}\n\n\
                                  Question: {question}\n\nGive concrete advice, the \
                                  reasoning behind it, and points to watch out for."
                    .to_string(),
                temperature: 0.7,
            },
        );

        categories.insert(
            "work".to_string(),
            Category {
                name: "Work".to_string(),
                prompt_template: "You are a workplace consultant. Based on the provided \
                                  context, give clear, actionable advice.\n\nContext:\n\
                                  {context}\n\nQuestion: {question}\n\nProvide an analysis, \
                                  concrete steps, and the expected outcome."
                    .to_string(),
                temperature: 0.3,
            },
        );

        categories.insert(
            "travel".to_string(),
            Category {
                name: "Travel".to_string(),
                prompt_template: "You are a travel guide. Based on the provided context, \
                                  share useful travel information.\n\nContext:\n{context}\n\n\
                                  Question: {question}\n\nGive recommendations, practical \
                                  details (location, cost, timing), and tips."
                    .to_string(),
                temperature: 0.6,
            },
        );

        Self { categories }
    }
}

impl CategoryConfig {
    /// Create the default category table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a category.
    pub fn add(&mut self, id: impl Into<String>, category: Category) {
        self.categories.insert(id.into(), category);
    }

    /// Remove a category, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Category> {
        self.categories.remove(id)
    }

    /// Look up a category, falling back to `general` for unknown ids.
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories
            .get(id)
            .or_else(|| self.categories.get(GENERAL_CATEGORY))
    }

    /// Category ids and display names, in stable order.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.categories
            .iter()
            .map(|(id, category)| (id.as_str(), category.name.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories() {
        let config = CategoryConfig::new();
        assert_eq!(config.len(), 4);
        assert!(config.get("travel").is_some());
        assert_eq!(config.get("travel").unwrap().name, "Travel");
    }

    #[test]
    fn test_unknown_category_falls_back_to_general() {
        let config = CategoryConfig::new();
        let category = config.get("nonexistent").unwrap();
        assert_eq!(category.name, "General");
    }

    #[test]
    fn test_add_and_remove() {
        let mut config = CategoryConfig::new();
        config.add(
            "cooking",
            Category {
                name: "Cooking".to_string(),
                prompt_template: "{context} {question}".to_string(),
                temperature: 0.4,
            },
        );
        assert_eq!(config.len(), 5);
        assert_eq!(config.get("cooking").unwrap().name, "Cooking");

        let removed = config.remove("cooking");
        assert!(removed.is_some());
        assert_eq!(config.get("cooking").unwrap().name, "General");
    }

    #[test]
    fn test_list_is_stable() {
        let config = CategoryConfig::new();
        let listing = config.list();
        assert_eq!(listing.len(), 4);
        // BTreeMap ordering keeps the listing deterministic
        assert_eq!(listing[0].0, "dating");
    }

    #[test]
    fn test_templates_have_placeholders() {
        let config = CategoryConfig::new();
        for (id, _) in config.list() {
            let category = config.get(id).unwrap();
            assert!(category.prompt_template.contains("{context}"));
            assert!(category.prompt_template.contains("{question}"));
        }
    }
}
