use serde_json::Value;

use crate::search::SearchDocument;

/// Names of the document fields rendered into the prompt context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFields {
    pub title: String,
    pub content: String,
}

impl Default for ContextFields {
    fn default() -> Self {
        Self { title: "title".to_string(), content: "content".to_string() }
    }
}

fn field_text(doc: &SearchDocument, name: &str) -> String {
    match doc.get(name) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Renders documents as numbered `[i] title\ncontent` blocks separated by a
/// blank line. Returns an empty string when there is nothing to inject.
pub fn build_context(docs: &[SearchDocument], fields: &ContextFields) -> String {
    let blocks: Vec<String> = docs
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let title = field_text(doc, &fields.title);
            let content = field_text(doc, &fields.content);
            format!("[{}] {}\n{}", i + 1, title, content).trim().to_string()
        })
        .collect();

    blocks.join("\n\n").trim().to_string()
}
