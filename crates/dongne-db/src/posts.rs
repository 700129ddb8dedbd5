use crate::types::{NewPost, PostRow};
use sqlx::PgPool;

const POST_COLUMNS: &str = r#"
    id, user_id, title, content, upload_place, latitude, longitude,
    body_size, thumbnail, tags, comments, likes, view, created_at
"#;

/// Insert a post and return the stored row
pub async fn insert(pool: &PgPool, p: &NewPost) -> Result<PostRow, sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO posts (
            user_id, title, content, upload_place, latitude, longitude,
            body_size, thumbnail, tags, comments, likes, view, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 0, 0, 0, $10)
        RETURNING {POST_COLUMNS}
        "#
    );
    sqlx::query_as::<_, PostRow>(&sql)
        .bind(&p.user_id)
        .bind(&p.title)
        .bind(&p.content)
        .bind(&p.upload_place)
        .bind(p.latitude)
        .bind(p.longitude)
        .bind(p.body_size.to_vec())
        .bind(&p.thumbnail)
        .bind(&p.tags)
        .bind(p.created_at)
        .fetch_one(pool)
        .await
}

/// List posts, newest first
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<PostRow>, sqlx::Error> {
    let sql = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC LIMIT $1");
    sqlx::query_as::<_, PostRow>(&sql)
        .bind(limit)
        .fetch_all(pool)
        .await
}

/// Delete a post. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
