use serde_json::{Map, Value};

use storywalk_types::{Result, StorywalkError};

use crate::ast::{ChoiceDef, PageDef, StoryDoc};

/// Parse a JSON story document into a [`StoryDoc`].
///
/// Only two conditions fail: input that is not valid JSON, and a top level
/// that is not an object. Everything else is tolerated: ill-typed or empty
/// optional fields collapse to `None`, a missing or non-array `pages` becomes
/// empty, and non-object array entries are skipped; the validator reports on
/// what survives.
pub fn parse(source: &str) -> Result<StoryDoc> {
    let value: Value = serde_json::from_str(source)?;
    let root = value.as_object().ok_or_else(|| StorywalkError::Document {
        message: "top level is not an object".into(),
    })?;

    let pages = root
        .get("pages")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(page_def)
                .collect()
        })
        .unwrap_or_default();

    Ok(StoryDoc {
        start_page_id: get_str(root, "startPageId"),
        pages,
    })
}

/// Extract a non-empty string field; anything else is `None`.
fn get_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn page_def(obj: &Map<String, Value>) -> PageDef {
    let choices = obj
        .get("choices")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(choice_def)
                .collect()
        })
        .unwrap_or_default();

    PageDef {
        id: get_str(obj, "id"),
        kind: get_str(obj, "type"),
        title: get_str(obj, "title"),
        text: get_str(obj, "text"),
        choices,
    }
}

fn choice_def(obj: &Map<String, Value>) -> ChoiceDef {
    ChoiceDef {
        label: get_str(obj, "label"),
        next: get_str(obj, "next"),
    }
}
