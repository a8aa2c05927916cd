//! Payloads exchanged over the real-time channel

use serde::{Deserialize, Serialize};

/// Event name carrying chat messages in both directions
pub const NEW_MESSAGE_EVENT: &str = "new-message";

/// Chat message relayed by the external socket server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub conversation_id: String,
    pub content: String,
    /// `user` or `partner`
    pub sender_type: String,
    pub sender_name: String,
    pub sender_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_format_is_camel_case() {
        let message = NewMessage {
            conversation_id: "conv-1".to_string(),
            content: "Is the venue free in June?".to_string(),
            sender_type: "user".to_string(),
            sender_name: "Claire".to_string(),
            sender_email: "claire@example.com".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "conversationId": "conv-1",
                "content": "Is the venue free in June?",
                "senderType": "user",
                "senderName": "Claire",
                "senderEmail": "claire@example.com"
            })
        );
    }

    #[test]
    fn payload_missing_sender_is_rejected() {
        let payload = json!({ "conversationId": "conv-1", "content": "hi" });
        assert!(serde_json::from_value::<NewMessage>(payload).is_err());
    }
}
