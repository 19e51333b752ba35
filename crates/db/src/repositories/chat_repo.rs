//! Repository for the `chat_rooms` and `chat_messages` tables.

use learnhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::chat::{ChatMessage, ChatRoom, NewChatMessage};

const ROOM_COLUMNS: &str = "id, course_id, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, room_id, sender_id, sender_name, content, sent_at";

/// Provides room lookup and message history.
pub struct ChatRepo;

impl ChatRepo {
    /// The course's room, inserting it on first use.
    pub async fn get_or_create_room(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<ChatRoom, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_rooms (course_id) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_chat_rooms_course DO NOTHING
             RETURNING {ROOM_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ChatRoom>(&query)
            .bind(course_id)
            .fetch_optional(pool)
            .await?;
        if let Some(room) = inserted {
            tracing::debug!(course_id, room_id = room.id, "Chat room created");
            return Ok(room);
        }

        let query = format!("SELECT {ROOM_COLUMNS} FROM chat_rooms WHERE course_id = $1");
        sqlx::query_as::<_, ChatRoom>(&query)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// The newest `limit` messages of a room, returned oldest first.
    pub async fn recent_messages(
        pool: &PgPool,
        room_id: DbId,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM (
                SELECT {MESSAGE_COLUMNS} FROM chat_messages
                WHERE room_id = $1
                ORDER BY sent_at DESC, id DESC
                LIMIT $2
             ) recent
             ORDER BY sent_at, id"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(room_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn insert_message(
        pool: &PgPool,
        room_id: DbId,
        message: &NewChatMessage,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (room_id, sender_id, sender_name, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(room_id)
            .bind(message.sender_id)
            .bind(&message.sender_name)
            .bind(&message.content)
            .fetch_one(pool)
            .await
    }

    /// Rooms of the courses an instructor teaches, newest course first.
    pub async fn list_for_instructor(
        pool: &PgPool,
        instructor_id: DbId,
    ) -> Result<Vec<ChatRoom>, sqlx::Error> {
        sqlx::query_as::<_, ChatRoom>(
            "SELECT r.id, r.course_id, r.created_at, r.updated_at
             FROM chat_rooms r
             JOIN courses c ON c.id = r.course_id
             WHERE c.instructor_id = $1
             ORDER BY c.created_at DESC, c.id DESC",
        )
        .bind(instructor_id)
        .fetch_all(pool)
        .await
    }

    /// Rooms of the courses a student is enrolled in, newest enrollment first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<ChatRoom>, sqlx::Error> {
        sqlx::query_as::<_, ChatRoom>(
            "SELECT r.id, r.course_id, r.created_at, r.updated_at
             FROM chat_rooms r
             JOIN enrollments e ON e.course_id = r.course_id
             WHERE e.student_id = $1
             ORDER BY e.enrolled_at DESC, e.id DESC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }
}
