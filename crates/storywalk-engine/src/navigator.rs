//! Navigation state machine: current page, linear history, transitions.
//!
//! All mutable session state lives in one [`Navigator`] value; presenters
//! consume the read-only [`PageView`] and feed choice indices back in.

use storywalk_types::{Result, StorywalkError};

use crate::graph::{Page, PageKind, StoryGraph};

/// Read-only view of the current position, consumed by presenters.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub page: &'a Page,
    pub can_go_back: bool,
    /// The resolved kind is Result: terminal for this visit, no outgoing
    /// transition via `advance`.
    pub is_terminal: bool,
}

/// Outcome of a well-formed `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the selected choice's target.
    Moved,
    /// The current page is terminal; state is unchanged.
    Terminal,
}

/// Owns the traversal state for one session: the current page id and the
/// ids visited strictly before it, most recent last.
///
/// The stack is the only undo mechanism. There is no redo list: taking a
/// new path after [`back`](Navigator::back) overwrites what would have been
/// the future, so no explicit pruning step exists.
#[derive(Debug, Default)]
pub struct Navigator {
    current: Option<String>,
    history: Vec<String>,
}

impl Navigator {
    /// Create an unstarted navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin at the graph's start page, clearing any prior history.
    ///
    /// Fails with `UnresolvableStart` when the graph has no start id or the
    /// id does not resolve; the navigator is then left unstarted and the
    /// caller must not assume a current page exists.
    pub fn start(&mut self, graph: &StoryGraph) -> Result<()> {
        let start = graph
            .start_page_id()
            .filter(|id| graph.lookup(id).is_some());
        let Some(start) = start else {
            self.current = None;
            self.history.clear();
            return Err(StorywalkError::UnresolvableStart {
                start: graph.start_page_id().map(str::to_owned),
            });
        };

        tracing::debug!(start, "session started");
        self.current = Some(start.to_owned());
        self.history.clear();
        Ok(())
    }

    /// Resolve the current page for rendering.
    ///
    /// `UnknownPage` is reachable here after an `advance` that followed a
    /// dangling reference.
    pub fn view<'g>(&self, graph: &'g StoryGraph) -> Result<PageView<'g>> {
        let current = self.current.as_deref().ok_or(StorywalkError::NotStarted)?;
        let page = graph
            .lookup(current)
            .ok_or_else(|| StorywalkError::UnknownPage {
                id: current.to_owned(),
            })?;

        Ok(PageView {
            page,
            can_go_back: !self.history.is_empty(),
            is_terminal: page.kind == PageKind::Result,
        })
    }

    /// Follow the choice at `index` (0-based) on the current page.
    ///
    /// On a result page this is a no-op returning `Terminal`, not an error.
    /// Every input check happens before any mutation, so a failed call
    /// leaves state exactly as it was. The target id is committed without
    /// resolving it; a dangling reference surfaces on the next `view` as
    /// `UnknownPage`.
    pub fn advance(&mut self, graph: &StoryGraph, index: usize) -> Result<AdvanceOutcome> {
        let current = self.current.as_deref().ok_or(StorywalkError::NotStarted)?;
        let page = graph
            .lookup(current)
            .ok_or_else(|| StorywalkError::UnknownPage {
                id: current.to_owned(),
            })?;

        if page.kind == PageKind::Result {
            return Ok(AdvanceOutcome::Terminal);
        }
        if page.choices.is_empty() {
            return Err(StorywalkError::NoChoicesAvailable {
                id: page.id.clone(),
            });
        }
        let choice = page
            .choices
            .get(index)
            .ok_or_else(|| StorywalkError::InvalidSelection {
                id: page.id.clone(),
                index,
                available: page.choices.len(),
            })?;
        let next = choice.next.clone().ok_or_else(|| StorywalkError::MissingNext {
            id: page.id.clone(),
            choice: index + 1,
        })?;

        tracing::debug!(from = current, to = %next, choice = index, "advance");
        let previous = current.to_owned();
        self.history.push(previous);
        self.current = Some(next);
        Ok(AdvanceOutcome::Moved)
    }

    /// Pop the most recent history entry into the current page.
    ///
    /// Returns `false` on an empty stack, leaving state untouched.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                tracing::debug!(to = %previous, "back");
                self.current = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Start over from the graph's start page, discarding all history
    /// unconditionally, regardless of current state.
    pub fn restart(&mut self, graph: &StoryGraph) -> Result<()> {
        tracing::debug!("restart");
        self.start(graph)
    }

    // --- Read accessors ---

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Ids visited strictly before the current page, in visitation order.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Previously-visited ids plus the current one, in visitation order:
    /// the breadcrumb trail.
    pub fn trail(&self) -> impl Iterator<Item = &str> + '_ {
        self.history
            .iter()
            .map(String::as_str)
            .chain(self.current.as_deref())
    }
}
