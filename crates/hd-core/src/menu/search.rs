//! Fuzzy menu search

use super::model::{MenuEntry, MenuItem};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::trace;

/// One search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuMatch {
    /// Matched menu
    pub item: MenuItem,
    /// Path with matched characters wrapped in highlight markup
    pub highlighted: String,
    /// Match score, higher is better
    pub score: i64,
}

/// Menu entries with an action, keyed by full path
#[derive(Debug, Clone, Default)]
pub struct SearchableMenus {
    items: BTreeMap<String, MenuItem>,
}

impl SearchableMenus {
    /// Flatten the given top-level menus
    pub fn from_roots(roots: &[MenuEntry]) -> Self {
        let mut menus = Self::default();
        for root in roots {
            menus.collect(root);
        }
        menus
    }

    fn collect(&mut self, entry: &MenuEntry) {
        if let Some(action) = &entry.action {
            let path = entry.full_name();
            self.items.insert(
                path.clone(),
                MenuItem {
                    menu_id: entry.id,
                    parent_id: entry.parent.as_ref().map(|(id, _)| *id),
                    path,
                    action: action.clone(),
                },
            );
        }
        for child in &entry.children {
            self.collect(child);
        }
    }

    /// Number of searchable entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there is nothing to search
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by full path
    pub fn get(&self, path: &str) -> Option<&MenuItem> {
        self.items.get(path)
    }

    /// Fuzzy-search the entries; an empty query gives no results
    pub fn search(&self, query: &str, pre: &str, post: &str) -> Vec<MenuMatch> {
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut matches: Vec<MenuMatch> = self
            .items
            .values()
            .filter_map(|item| {
                let (score, indices) = matcher.fuzzy_indices(&item.path, query)?;
                Some(MenuMatch {
                    highlighted: highlight(&item.path, &indices, pre, post),
                    item: item.clone(),
                    score,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.item.path.cmp(&b.item.path)));
        trace!("Menu search '{}' matched {} entries", query, matches.len());
        matches
    }

    /// Top-level app a chosen path belongs to
    pub fn owning_app<'a>(path: &str, apps: &'a [MenuEntry]) -> Option<&'a MenuEntry> {
        apps.iter().find(|app| match path.strip_prefix(app.name.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        })
    }
}

fn highlight(text: &str, indices: &[usize], pre: &str, post: &str) -> String {
    let mut out = String::with_capacity(text.len() + indices.len() * (pre.len() + post.len()));
    for (i, ch) in text.chars().enumerate() {
        if indices.binary_search(&i).is_ok() {
            out.push_str(pre);
            out.push(ch);
            out.push_str(post);
        } else {
            out.push(ch);
        }
    }
    out
}
