use serde::{ Deserialize, Serialize };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Chronological turn history of one session. The first turn is always the
/// fixed system instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Turn>,
}

impl Conversation {
    pub fn new(system: Turn) -> Self {
        Self { messages: vec![system] }
    }

    /// Rebuilds a conversation from stored turns. An empty history is treated
    /// as absent and restarted from `system`.
    pub fn restore(messages: Vec<Turn>, system: Turn) -> Self {
        if messages.is_empty() {
            return Self::new(system);
        }
        Self { messages }
    }

    pub fn push(&mut self, turn: Turn) {
        self.messages.push(turn);
    }

    pub fn messages(&self) -> &[Turn] {
        &self.messages
    }

    /// Request-scoped copy with `context` inserted right after the system
    /// instruction. The conversation itself is left untouched.
    pub fn with_context(&self, context: Turn) -> Vec<Turn> {
        let mut augmented = Vec::with_capacity(self.messages.len() + 1);
        let at = 1.min(self.messages.len());
        augmented.extend_from_slice(&self.messages[..at]);
        augmented.push(context);
        augmented.extend_from_slice(&self.messages[at..]);
        augmented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Turn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn conversation_serializes_as_plain_list() {
        let conv = Conversation::new(Turn::system("sys"));
        let json = serde_json::to_value(&conv).unwrap();
        assert_eq!(json, serde_json::json!([{ "role": "system", "content": "sys" }]));
    }

    #[test]
    fn restore_replaces_empty_history() {
        let conv = Conversation::restore(Vec::new(), Turn::system("sys"));
        assert_eq!(conv.messages(), &[Turn::system("sys")]);

        let stored = vec![Turn::system("sys"), Turn::user("q"), Turn::assistant("a")];
        let conv = Conversation::restore(stored.clone(), Turn::system("other"));
        assert_eq!(conv.messages(), stored.as_slice());
    }

    #[test]
    fn context_goes_after_system_instruction() {
        let mut conv = Conversation::new(Turn::system("sys"));
        conv.push(Turn::user("q"));

        let augmented = conv.with_context(Turn::system("ctx"));
        assert_eq!(
            augmented,
            vec![Turn::system("sys"), Turn::system("ctx"), Turn::user("q")]
        );
        assert_eq!(conv.messages().len(), 2);
    }
}
