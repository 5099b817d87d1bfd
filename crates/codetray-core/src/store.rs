use crate::builtins::builtin_snippets;
use crate::error::ValidationError;
use crate::filter::is_visible;
use crate::models::{Category, Snippet};
use crate::storage::Storage;
use tracing::{info, warn};

/// Built-in snippet sets plus the persisted custom list.
#[derive(Debug)]
pub struct SnippetStore {
    html: Vec<Snippet>,
    js: Vec<Snippet>,
    css: Vec<Snippet>,
    custom: Vec<Snippet>,
    storage: Storage,
}

impl SnippetStore {
    /// Build the store, reading previously saved custom snippets.
    pub fn load(storage: Storage) -> Self {
        let custom = storage.load_custom_snippets();
        Self::with_custom(storage, custom)
    }

    pub fn with_custom(storage: Storage, custom: Vec<Snippet>) -> Self {
        Self {
            html: builtin_snippets(Category::Html),
            js: builtin_snippets(Category::Js),
            css: builtin_snippets(Category::Css),
            custom,
            storage,
        }
    }

    pub fn list_builtins(&self, category: Category) -> &[Snippet] {
        match category {
            Category::Html => &self.html,
            Category::Js => &self.js,
            Category::Css => &self.css,
            Category::Custom => &[],
        }
    }

    pub fn list_custom(&self) -> &[Snippet] {
        &self.custom
    }

    /// Every snippet shown under a category tab.
    pub fn list(&self, category: Category) -> &[Snippet] {
        match category {
            Category::Custom => self.list_custom(),
            builtin => self.list_builtins(builtin),
        }
    }

    /// Snippets of a category whose label matches `query`.
    pub fn visible<'a>(
        &'a self,
        category: Category,
        query: &'a str,
    ) -> impl Iterator<Item = &'a Snippet> + 'a {
        self.list(category)
            .iter()
            .filter(move |snippet| is_visible(&snippet.label, query))
    }

    /// Append a custom snippet and persist the full list.
    ///
    /// A write failure is reported as `PersistFailed`, but the snippet stays
    /// in memory for the rest of the session.
    pub fn add_custom(
        &mut self,
        label: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Snippet, ValidationError> {
        let label = label.into();
        let body = body.into();
        if label.trim().is_empty() || body.trim().is_empty() {
            return Err(ValidationError::MissingField);
        }

        let snippet = Snippet::new(label, body);
        self.custom.push(snippet.clone());

        match self.storage.save_custom_snippets(&self.custom) {
            Ok(()) => {
                info!(label = %snippet.label, "Added custom snippet");
                Ok(snippet)
            }
            Err(err) => {
                warn!(label = %snippet.label, error = %err, "Custom snippet kept in memory only");
                Err(ValidationError::PersistFailed(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_in(dir: &std::path::Path) -> SnippetStore {
        SnippetStore::load(Storage::open(dir))
    }

    #[test]
    fn rejects_blank_fields_without_mutating() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        assert!(matches!(
            store.add_custom("", "x"),
            Err(ValidationError::MissingField)
        ));
        assert!(matches!(
            store.add_custom("x", ""),
            Err(ValidationError::MissingField)
        ));
        assert!(matches!(
            store.add_custom("   ", "x"),
            Err(ValidationError::MissingField)
        ));
        assert!(matches!(
            store.add_custom("x", "\n\t "),
            Err(ValidationError::MissingField)
        ));
        assert!(store.list_custom().is_empty());
        assert!(!Storage::open(dir.path()).snippets_path().exists());
    }

    #[test]
    fn added_snippets_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        let first = store.add_custom("Greeting", "hello()").unwrap();
        store.add_custom("Farewell", "  bye()\n").unwrap();
        assert_eq!(first, Snippet::new("Greeting", "hello()"));

        let reloaded = store_in(dir.path());
        assert_eq!(
            reloaded.list_custom(),
            &[
                Snippet::new("Greeting", "hello()"),
                Snippet::new("Farewell", "  bye()\n"),
            ]
        );
    }

    #[test]
    fn persist_failure_keeps_snippet_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the storage directory should be.
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();
        let mut store = store_in(&blocker);

        let result = store.add_custom("Kept", "body");

        assert!(matches!(result, Err(ValidationError::PersistFailed(_))));
        assert_eq!(store.list_custom(), &[Snippet::new("Kept", "body")]);
    }

    #[test]
    fn custom_category_lists_custom_snippets() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        store.add_custom("Mine", "x").unwrap();

        assert!(store.list_builtins(Category::Custom).is_empty());
        assert_eq!(store.list(Category::Custom), store.list_custom());
        assert_eq!(store.list(Category::Css), store.list_builtins(Category::Css));
    }

    #[test]
    fn visible_filters_by_label() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let labels: Vec<_> = store
            .visible(Category::Js, "func")
            .map(|snippet| snippet.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Async Func", "Arrow Func"]);
        assert_eq!(store.visible(Category::Html, "").count(), 11);
    }
}
