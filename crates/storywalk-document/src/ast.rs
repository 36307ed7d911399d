use serde::{Deserialize, Serialize};

/// A raw narrative document, pages in document order.
///
/// Field values are exactly what the author wrote: nothing is defaulted and
/// nothing is checked beyond basic typing. Skipping, defaulting, and
/// diagnostics happen downstream in the graph build and the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryDoc {
    /// Explicit `startPageId`, when present, non-empty, and a string.
    pub start_page_id: Option<String>,
    pub pages: Vec<PageDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDef {
    /// `None` when the entry had no usable id (absent, empty, or not a string).
    pub id: Option<String>,
    /// Raw `type` value; resolution to question/result is deferred.
    pub kind: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub choices: Vec<ChoiceDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceDef {
    pub label: Option<String>,
    /// `None` when absent, empty, or not a string.
    pub next: Option<String>,
}
