//! Course chat models.

use learnhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `chat_rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatRoom {
    pub id: DbId,
    pub course_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub room_id: DbId,
    pub sender_id: DbId,
    pub sender_name: String,
    pub content: String,
    #[serde(rename = "timestamp")]
    pub sent_at: Timestamp,
}

/// A message about to be posted.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub sender_id: DbId,
    pub sender_name: String,
    pub content: String,
}
