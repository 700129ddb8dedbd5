use crate::types::{MessageRow, NewMessage};
use sqlx::PgPool;

/// Insert a message and return the stored row
pub async fn insert(pool: &PgPool, p: &NewMessage) -> Result<MessageRow, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO messages (room_id, user_id, content, chat_img_url, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, room_id, user_id, content, chat_img_url, created_at
        "#,
    )
    .bind(&p.room_id)
    .bind(&p.user_id)
    .bind(&p.content)
    .bind(&p.chat_img_url)
    .bind(p.created_at)
    .fetch_one(pool)
    .await
}

/// Get all messages for a room, oldest first
pub async fn list_for_room(pool: &PgPool, room_id: &str) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT id, room_id, user_id, content, chat_img_url, created_at
        FROM messages
        WHERE room_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await
}
