use super::client::{ApiClient, ApiError};
use crate::types::{ChatRequest, ChatResponse, Conversation, ConversationHistory, ConversationListResponse};

impl ApiClient {
    /// Send one chat turn. The backend creates a conversation when the
    /// request carries no id and always echoes the effective id back.
    pub async fn send_chat(
        &self,
        user_id: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ApiError> {
        self.post_json(&format!("/api/{user_id}/chat"), request).await
    }

    pub async fn list_conversations(&self, user_id: &str) -> Result<Vec<Conversation>, ApiError> {
        let response: ConversationListResponse = self
            .get_json(&format!("/api/{user_id}/conversations"), &[])
            .await?;
        Ok(response.conversations)
    }

    pub async fn conversation_history(
        &self,
        user_id: &str,
        conversation_id: i64,
    ) -> Result<ConversationHistory, ApiError> {
        self.get_json(&format!("/api/{user_id}/conversations/{conversation_id}"), &[])
            .await
    }
}
