use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Insertion-ordered message log for one chat session.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// Context block the assistant receives alongside each message. Every field
/// is skipped when absent so an empty context serializes as `{}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ChatContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_detection: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_current: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<serde_json::Value>,
}

/// Wire body of `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub context: ChatContext,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_context_serializes_as_empty_object() {
        let request = ChatRequest {
            message: "hello".to_string(),
            session_id: "web-session".to_string(),
            context: ChatContext::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "hello", "sessionId": "web-session", "context": {}})
        );
    }

    #[test]
    fn log_keeps_insertion_order_and_clears() {
        let mut log = ChatLog::new();
        log.push(ChatMessage::user("first"));
        log.push(ChatMessage::assistant("second"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].role, ChatRole::User);
        assert_eq!(log.last().map(|m| m.content.as_str()), Some("second"));
        log.clear();
        assert!(log.is_empty());
    }
}
