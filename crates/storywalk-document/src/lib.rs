//! Lenient JSON parser for storywalk narrative documents.
//!
//! Parses `{ "startPageId": ..., "pages": [...] }` into a raw typed AST:
//! [`StoryDoc`], [`PageDef`], [`ChoiceDef`]. Optional fields keep their
//! absence visible (`Option`) so the validator can report on the document as
//! written; only malformed JSON or a non-object top level is a load failure.
//!
//! # Example
//! ```
//! let source = r#"{
//!     "startPageId": "intro",
//!     "pages": [
//!         { "id": "intro", "choices": [ { "label": "Go", "next": "end" } ] },
//!         { "id": "end", "type": "result" }
//!     ]
//! }"#;
//! let doc = storywalk_document::parse(source).unwrap();
//! assert_eq!(doc.start_page_id.as_deref(), Some("intro"));
//! assert_eq!(doc.pages.len(), 2);
//! ```

pub mod ast;
mod parser;

pub use ast::*;
pub use parser::parse;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_document() {
        let doc = parse(
            r#"{
                "startPageId": "start",
                "pages": [
                    {
                        "id": "start",
                        "title": "Opening",
                        "text": "Pick a path.",
                        "choices": [
                            { "label": "Left", "next": "left" },
                            { "label": "Right", "next": "right" }
                        ]
                    },
                    { "id": "left", "type": "result", "text": "You went left." },
                    { "id": "right", "type": "result", "text": "You went right." }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.start_page_id.as_deref(), Some("start"));
        assert_eq!(doc.pages.len(), 3);

        let start = &doc.pages[0];
        assert_eq!(start.id.as_deref(), Some("start"));
        assert_eq!(start.title.as_deref(), Some("Opening"));
        assert_eq!(start.choices.len(), 2);
        assert_eq!(start.choices[0].label.as_deref(), Some("Left"));
        assert_eq!(start.choices[0].next.as_deref(), Some("left"));
        assert_eq!(doc.pages[1].kind.as_deref(), Some("result"));
    }

    #[test]
    fn optional_fields_stay_absent() {
        let doc = parse(r#"{ "pages": [ { "id": "only" } ] }"#).unwrap();
        assert!(doc.start_page_id.is_none());
        let page = &doc.pages[0];
        assert!(page.kind.is_none());
        assert!(page.title.is_none());
        assert!(page.text.is_none());
        assert!(page.choices.is_empty());
    }

    #[test]
    fn ill_typed_fields_collapse_to_none() {
        let doc = parse(
            r#"{
                "startPageId": 7,
                "pages": [
                    {
                        "id": 12,
                        "type": ["result"],
                        "title": false,
                        "choices": [ { "label": 1, "next": 2 } ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert!(doc.start_page_id.is_none());
        let page = &doc.pages[0];
        assert!(page.id.is_none());
        assert!(page.kind.is_none());
        assert!(page.title.is_none());
        assert!(page.choices[0].label.is_none());
        assert!(page.choices[0].next.is_none());
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let doc = parse(
            r#"{
                "startPageId": "",
                "pages": [ { "id": "", "choices": [ { "next": "" } ] } ]
            }"#,
        )
        .unwrap();

        assert!(doc.start_page_id.is_none());
        assert!(doc.pages[0].id.is_none());
        assert!(doc.pages[0].choices[0].next.is_none());
    }

    #[test]
    fn non_object_page_entries_are_skipped() {
        let doc = parse(
            r#"{ "pages": [ null, "junk", 3, { "id": "real" }, [] ] }"#,
        )
        .unwrap();
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].id.as_deref(), Some("real"));
    }

    #[test]
    fn non_array_choices_become_empty() {
        let doc = parse(r#"{ "pages": [ { "id": "p", "choices": "nope" } ] }"#).unwrap();
        assert!(doc.pages[0].choices.is_empty());
    }

    #[test]
    fn missing_pages_array_becomes_empty() {
        let doc = parse(r#"{ "startPageId": "start" }"#).unwrap();
        assert!(doc.pages.is_empty());

        let doc = parse(r#"{ "pages": { "not": "an array" } }"#).unwrap();
        assert!(doc.pages.is_empty());
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        let err = parse(r#"[1, 2, 3]"#).unwrap_err();
        assert!(matches!(
            err,
            storywalk_types::StorywalkError::Document { .. }
        ));
        assert!(err.is_load_failure());
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = parse("not json at all").unwrap_err();
        assert!(matches!(err, storywalk_types::StorywalkError::Json(_)));
        assert!(err.is_load_failure());
    }
}
