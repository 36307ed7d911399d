//! Document validation: integrity rules and diagnostics.
//!
//! Provides 6 built-in rules that check structural and referential
//! correctness of a [`StoryGraph`]. Call [`check`] for advisory diagnostics
//! or [`check_strict`] to fail when any `Error`-severity issue is present.
//! Diagnostics never block a session: the navigator still attempts `start`
//! on a flawed document.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use storywalk_types::{Result, StorywalkError};

use crate::graph::{PageKind, StoryGraph};

// ---------------------------------------------------------------------------
// Diagnostic types
// ---------------------------------------------------------------------------

/// A structured, non-fatal defect report.
///
/// The structured fields are the contract; the `Display` rendering is a
/// convenience for presenters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A repeated occurrence of an id already seen earlier in the document.
    /// Emitted once per extra occurrence, not once per group.
    DuplicateId { id: String },
    /// A page entry with no usable id, by 0-based document position.
    MissingId { position: usize },
    /// A result page carrying choices it can never offer.
    ChoicesOnResult { id: String, count: usize },
    /// A question page with no choices: the reader can never leave it.
    DeadEnd { id: String },
    /// A choice with no target, by 1-based position on its page.
    MissingNext { id: String, choice: usize },
    /// A choice whose target id matches no page.
    DanglingNext { from: String, to: String },
    /// An explicit `startPageId` that matches no page.
    DanglingStart { start: String },
}

impl Diagnostic {
    fn error(kind: DiagnosticKind) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind,
        }
    }

    fn warning(kind: DiagnosticKind) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind,
        }
    }

    /// Short rule-style name for log and CLI output.
    pub fn name(&self) -> &'static str {
        match self.kind {
            DiagnosticKind::DuplicateId { .. } => "duplicate_id",
            DiagnosticKind::MissingId { .. } => "missing_id",
            DiagnosticKind::ChoicesOnResult { .. } => "choices_on_result",
            DiagnosticKind::DeadEnd { .. } => "dead_end",
            DiagnosticKind::MissingNext { .. } => "missing_next",
            DiagnosticKind::DanglingNext { .. } => "dangling_next",
            DiagnosticKind::DanglingStart { .. } => "dangling_start",
        }
    }

    /// The offending page id, where one applies.
    pub fn page_id(&self) -> Option<&str> {
        match &self.kind {
            DiagnosticKind::DuplicateId { id }
            | DiagnosticKind::ChoicesOnResult { id, .. }
            | DiagnosticKind::DeadEnd { id }
            | DiagnosticKind::MissingNext { id, .. }
            | DiagnosticKind::DanglingNext { from: id, .. } => Some(id),
            DiagnosticKind::MissingId { .. } | DiagnosticKind::DanglingStart { .. } => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::DuplicateId { id } => write!(f, "duplicate page id '{id}'"),
            DiagnosticKind::MissingId { position } => {
                write!(f, "page at position {position} has no usable id")
            }
            DiagnosticKind::ChoicesOnResult { id, count } => {
                write!(f, "result page '{id}' carries {count} choices")
            }
            DiagnosticKind::DeadEnd { id } => write!(f, "question page '{id}' has no choices"),
            DiagnosticKind::MissingNext { id, choice } => {
                write!(f, "choice #{choice} on page '{id}' has no next target")
            }
            DiagnosticKind::DanglingNext { from, to } => {
                write!(f, "page '{from}' links to missing page '{to}'")
            }
            DiagnosticKind::DanglingStart { start } => {
                write!(f, "startPageId '{start}' does not match any page")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rule trait
// ---------------------------------------------------------------------------

pub trait Rule: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic>;
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

struct DuplicateIdRule;
impl Rule for DuplicateIdRule {
    fn name(&self) -> &str {
        "duplicate_id"
    }
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        graph
            .pages()
            .filter(|p| !seen.insert(p.id.as_str()))
            .map(|p| Diagnostic::error(DiagnosticKind::DuplicateId { id: p.id.clone() }))
            .collect()
    }
}

struct MissingIdRule;
impl Rule for MissingIdRule {
    fn name(&self) -> &str {
        "missing_id"
    }
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic> {
        graph
            .skipped_positions()
            .iter()
            .map(|&position| Diagnostic::error(DiagnosticKind::MissingId { position }))
            .collect()
    }
}

struct ResultChoicesRule;
impl Rule for ResultChoicesRule {
    fn name(&self) -> &str {
        "choices_on_result"
    }
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic> {
        graph
            .pages()
            .filter(|p| p.kind == PageKind::Result && !p.choices.is_empty())
            .map(|p| {
                Diagnostic::warning(DiagnosticKind::ChoicesOnResult {
                    id: p.id.clone(),
                    count: p.choices.len(),
                })
            })
            .collect()
    }
}

struct DeadEndRule;
impl Rule for DeadEndRule {
    fn name(&self) -> &str {
        "dead_end"
    }
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic> {
        graph
            .pages()
            .filter(|p| p.kind == PageKind::Question && p.choices.is_empty())
            .map(|p| Diagnostic::error(DiagnosticKind::DeadEnd { id: p.id.clone() }))
            .collect()
    }
}

struct ChoiceLinkRule;
impl Rule for ChoiceLinkRule {
    fn name(&self) -> &str {
        "choice_link"
    }
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for page in graph.pages().filter(|p| p.kind == PageKind::Question) {
            for (i, choice) in page.choices.iter().enumerate() {
                match &choice.next {
                    None => diags.push(Diagnostic::error(DiagnosticKind::MissingNext {
                        id: page.id.clone(),
                        choice: i + 1,
                    })),
                    Some(next) if !graph.contains(next) => {
                        diags.push(Diagnostic::error(DiagnosticKind::DanglingNext {
                            from: page.id.clone(),
                            to: next.clone(),
                        }))
                    }
                    Some(_) => {}
                }
            }
        }
        diags
    }
}

struct StartLinkRule;
impl Rule for StartLinkRule {
    fn name(&self) -> &str {
        "start_link"
    }
    fn apply(&self, graph: &StoryGraph) -> Vec<Diagnostic> {
        if !graph.has_explicit_start() {
            return vec![];
        }
        match graph.start_page_id() {
            Some(start) if !graph.contains(start) => {
                vec![Diagnostic::error(DiagnosticKind::DanglingStart {
                    start: start.to_owned(),
                })]
            }
            _ => vec![],
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run all built-in rules and return collected diagnostics.
///
/// Identity rules run before link rules; the start rule stays last. Each
/// rule emits in document order, so the result is deterministic.
pub fn check(graph: &StoryGraph) -> Vec<Diagnostic> {
    let rules: Vec<Box<dyn Rule>> = vec![
        Box::new(DuplicateIdRule),
        Box::new(MissingIdRule),
        Box::new(ResultChoicesRule),
        Box::new(DeadEndRule),
        Box::new(ChoiceLinkRule),
        Box::new(StartLinkRule),
    ];

    let mut diagnostics = Vec::new();
    for rule in &rules {
        diagnostics.extend(rule.apply(graph));
    }

    if !diagnostics.is_empty() {
        tracing::warn!(count = diagnostics.len(), "document has integrity defects");
    }
    diagnostics
}

/// Run all rules; return `Err` if any `Error`-severity diagnostic is found.
pub fn check_strict(graph: &StoryGraph) -> Result<Vec<Diagnostic>> {
    let diagnostics = check(graph);
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    if !errors.is_empty() {
        let messages: Vec<_> = errors.iter().map(|d| d.to_string()).collect();
        return Err(StorywalkError::Validation(messages.join("; ")));
    }
    Ok(diagnostics)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
