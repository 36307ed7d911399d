//! Page graph, integrity validator, and navigation state machine.
//!
//! The flow for one session: parse the raw document with
//! `storywalk-document`, build a [`StoryGraph`] once, run [`check`] for
//! advisory diagnostics (they never block), then drive a [`Navigator`]
//! through its view/advance/back/restart loop. Presenters consume the
//! read-only [`PageView`]; all mutable state stays inside the navigator.

pub mod graph;
pub mod navigator;
pub mod validation;

pub use graph::{Choice, Page, PageKind, StoryGraph};
pub use navigator::{AdvanceOutcome, Navigator, PageView};
pub use validation::{check, check_strict, Diagnostic, DiagnosticKind, Rule, Severity};
