use tracing::{error, warn};

use crate::api::ApiError;
use crate::session::lifecycle::RequestLifecycle;
use crate::session::request::Request;
use crate::types::chat::{ChatContext, ChatLog, ChatMessage, ChatRequest};

pub const CHAT_FAILURE_REPLY: &str = "Sorry, I encountered an error during chat processing. Please try again.";
pub const CHAT_CONNECTION_REPLY: &str = "Connection error. Please check if the backend is running.";

/// Assistant tab state: the draft, the log and the send lifecycle.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    pub input: String,
    log: ChatLog,
    sending: RequestLifecycle,
    session_id: String,
}

impl ChatPanel {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            input: String::new(),
            log: ChatLog::new(),
            sending: RequestLifecycle::new(),
            session_id: session_id.into(),
        }
    }

    pub fn log(&self) -> &ChatLog {
        &self.log
    }

    pub fn is_sending(&self) -> bool {
        self.sending.is_in_flight()
    }

    pub fn can_send(&self) -> bool {
        !self.is_sending() && !self.input.trim().is_empty()
    }

    /// Appends the draft to the log right away and returns the request that
    /// will fetch the reply. Blank drafts and sends while a reply is pending
    /// are ignored.
    pub fn send(&mut self, context: ChatContext) -> Option<Request> {
        if !self.can_send() {
            return None;
        }
        let message = std::mem::take(&mut self.input);
        self.log.push(ChatMessage::user(message.clone()));
        self.sending.begin();
        Some(Request::Chat(ChatRequest {
            message,
            session_id: self.session_id.clone(),
            context,
        }))
    }

    pub fn apply_reply(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(reply) => {
                self.sending.succeed();
                self.log.push(ChatMessage::assistant(reply));
            }
            Err(err) => {
                let fallback = if err.is_transport() {
                    error!(error = %err, "chat request failed");
                    CHAT_CONNECTION_REPLY
                } else {
                    warn!(error = %err, "assistant reported a failure");
                    CHAT_FAILURE_REPLY
                };
                self.sending.fail(&err);
                self.log.push(ChatMessage::assistant(fallback));
            }
        }
    }

    /// Empties the local log immediately; the returned request asks the
    /// backend to forget the session too.
    pub fn clear(&mut self) -> Request {
        self.log.clear();
        Request::ClearChat { session_id: self.session_id.clone() }
    }

    pub fn apply_cleared(&mut self, result: Result<(), ApiError>) {
        if let Err(err) = result {
            warn!(error = %err, "Failed to clear backend chat history");
        }
    }
}
