//! Course chat: one room per course, open to its instructor and enrolled
//! students.

use learnhub_core::chat::{parse_message_body, MESSAGE_HISTORY_LIMIT};
use learnhub_core::identity::Actor;
use learnhub_core::types::DbId;
use learnhub_db::models::chat::{ChatMessage, ChatRoom, NewChatMessage};
use learnhub_db::models::course::Course;
use learnhub_db::store::{ChatStore, CourseStore, EnrollmentStore};
use serde::Serialize;

use super::access::authorize_participant;
use crate::error::AppResult;

/// A room together with the course it belongs to.
#[derive(Debug, Serialize)]
pub struct ChatRoomView {
    pub room: ChatRoom,
    pub course: Course,
}

/// Open the course's room, creating it on first use.
pub async fn open_room<S>(store: &S, actor: &Actor, course_id: DbId) -> AppResult<ChatRoomView>
where
    S: CourseStore + EnrollmentStore + ChatStore + ?Sized,
{
    let course = authorize_participant(store, actor, course_id).await?;
    let room = store.get_or_create_room(course.id).await?;
    Ok(ChatRoomView { room, course })
}

/// The room's latest messages, oldest first.
pub async fn room_messages<S>(
    store: &S,
    actor: &Actor,
    course_id: DbId,
) -> AppResult<Vec<ChatMessage>>
where
    S: CourseStore + EnrollmentStore + ChatStore + ?Sized,
{
    let course = authorize_participant(store, actor, course_id).await?;
    let room = store.get_or_create_room(course.id).await?;
    Ok(store.recent_messages(room.id, MESSAGE_HISTORY_LIMIT).await?)
}

/// Post a raw `{"message": ".."}` body to the course's room as `sender_name`.
pub async fn post_message<S>(
    store: &S,
    actor: &Actor,
    sender_name: &str,
    course_id: DbId,
    body: &[u8],
) -> AppResult<ChatMessage>
where
    S: CourseStore + EnrollmentStore + ChatStore + ?Sized,
{
    let course = authorize_participant(store, actor, course_id).await?;
    let content = parse_message_body(body)?;
    let room = store.get_or_create_room(course.id).await?;

    // authorize_participant only admits authenticated actors.
    let sender_id = actor.user_id.unwrap_or_default();
    let message = store
        .post_message(
            room.id,
            &NewChatMessage {
                sender_id,
                sender_name: sender_name.to_string(),
                content,
            },
        )
        .await?;

    tracing::info!(
        course_id,
        room_id = room.id,
        message_id = message.id,
        user_id = sender_id,
        "Chat message posted"
    );
    Ok(message)
}

/// Rooms the actor takes part in: rooms of taught courses for an instructor,
/// rooms of enrolled courses for a student. Rooms are listed only once they
/// have been opened.
pub async fn my_chats<S>(store: &S, actor: &Actor) -> AppResult<Vec<ChatRoomView>>
where
    S: CourseStore + ChatStore + ?Sized,
{
    let rooms = match actor.user_id {
        Some(user_id) if actor.is_instructor() => store.list_instructor_rooms(user_id).await?,
        Some(user_id) if actor.is_student() => store.list_student_rooms(user_id).await?,
        _ => Vec::new(),
    };

    let mut chats = Vec::with_capacity(rooms.len());
    for room in rooms {
        if let Some(course) = store.find_course(room.course_id).await? {
            chats.push(ChatRoomView { room, course });
        }
    }
    Ok(chats)
}
