use crate::types::{ChatRoomRow, NewChatRoom};
use sqlx::PgPool;

/// Insert a chat room and return the stored row
pub async fn insert(pool: &PgPool, p: &NewChatRoom) -> Result<ChatRoomRow, sqlx::Error> {
    sqlx::query_as::<_, ChatRoomRow>(
        r#"
        INSERT INTO chatrooms (title, image_url, leader_id, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, image_url, leader_id, created_at
        "#,
    )
    .bind(&p.title)
    .bind(&p.image_url)
    .bind(&p.leader_id)
    .bind(p.created_at)
    .fetch_one(pool)
    .await
}

/// Get a single chat room
pub async fn get(pool: &PgPool, id: &str) -> Result<Option<ChatRoomRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatRoomRow>(
        "SELECT id, title, image_url, leader_id, created_at FROM chatrooms WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List chat rooms, newest first
pub async fn list_recent(pool: &PgPool) -> Result<Vec<ChatRoomRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatRoomRow>(
        r#"
        SELECT id, title, image_url, leader_id, created_at
        FROM chatrooms
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Delete a chat room (its messages cascade). Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM chatrooms WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
