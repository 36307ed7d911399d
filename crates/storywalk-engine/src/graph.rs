use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use storywalk_document::{PageDef, StoryDoc};

/// Resolved page kind. Anything other than an explicit `"result"` plays as a
/// question, matching the wire schema's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Question,
    Result,
}

impl PageKind {
    fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("result") => PageKind::Result,
            _ => PageKind::Question,
        }
    }
}

/// A labeled edge from a question page to a target page id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    /// Target page id. `None` when the document omitted it; the validator
    /// reports it and `advance` refuses to follow it.
    pub next: Option<String>,
}

/// A node in the narrative graph, with every default applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub kind: PageKind,
    pub title: String,
    pub text: String,
    pub choices: Vec<Choice>,
}

/// The page graph for one document. Built once, immutable afterwards.
///
/// Pages are kept in document order, duplicate-id occurrences included, so
/// the validator can report on the document as written. The id index is what
/// navigation resolves against; when an id repeats, the last occurrence wins
/// the index slot.
#[derive(Debug, Clone)]
pub struct StoryGraph {
    start_page_id: Option<String>,
    explicit_start: bool,
    pages: Vec<Page>,
    index: HashMap<String, usize>,
    skipped: Vec<usize>,
}

impl StoryGraph {
    /// Build a graph from a raw document.
    ///
    /// Never rejects: defaults are applied exactly once here (kind, empty
    /// title/text, positional choice labels) and integrity problems are left
    /// for the validator. A missing `startPageId` falls back to the first
    /// identified page in document order.
    pub fn from_doc(doc: &StoryDoc) -> Self {
        let mut pages: Vec<Page> = Vec::with_capacity(doc.pages.len());
        let mut index = HashMap::new();
        let mut skipped = Vec::new();

        for (position, def) in doc.pages.iter().enumerate() {
            let Some(id) = def.id.clone() else {
                skipped.push(position);
                continue;
            };
            index.insert(id.clone(), pages.len());
            pages.push(normalize(id, def));
        }

        let explicit_start = doc.start_page_id.is_some();
        let start_page_id = doc
            .start_page_id
            .clone()
            .or_else(|| pages.first().map(|p| p.id.clone()));

        tracing::debug!(
            pages = pages.len(),
            skipped = skipped.len(),
            start = start_page_id.as_deref().unwrap_or("(none)"),
            "story graph built"
        );

        StoryGraph {
            start_page_id,
            explicit_start,
            pages,
            index,
            skipped,
        }
    }

    /// Sole read accessor used by the validator and the navigator; returns
    /// `None` for unknown ids instead of failing.
    pub fn lookup(&self, id: &str) -> Option<&Page> {
        self.index.get(id).map(|&i| &self.pages[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The resolved start page id: explicit `startPageId` when the document
    /// gave one, else the first identified page.
    pub fn start_page_id(&self) -> Option<&str> {
        self.start_page_id.as_deref()
    }

    /// Whether `startPageId` came from the document rather than the
    /// first-page fallback.
    pub fn has_explicit_start(&self) -> bool {
        self.explicit_start
    }

    /// Pages in document order, duplicate occurrences included.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 0-based positions of document entries that lacked a usable id and
    /// were excluded from the id index.
    pub fn skipped_positions(&self) -> &[usize] {
        &self.skipped
    }
}

fn normalize(id: String, def: &PageDef) -> Page {
    let choices = def
        .choices
        .iter()
        .enumerate()
        .map(|(i, c)| Choice {
            label: c
                .label
                .clone()
                .unwrap_or_else(|| format!("Choice {}", i + 1)),
            next: c.next.clone(),
        })
        .collect();

    Page {
        id,
        kind: PageKind::resolve(def.kind.as_deref()),
        title: def.title.clone().unwrap_or_default(),
        text: def.text.clone().unwrap_or_default(),
        choices,
    }
}
