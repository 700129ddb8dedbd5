use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// Post row returned from SELECT / RETURNING queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PostRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub upload_place: String,
    #[ts(optional)]
    pub latitude: Option<f64>,
    #[ts(optional)]
    pub longitude: Option<f64>,
    /// `[height, weight]`
    pub body_size: Vec<f64>,
    pub thumbnail: String,
    pub tags: Vec<String>,
    pub comments: i32,
    pub likes: i32,
    pub view: i32,
    pub created_at: DateTime<Utc>,
}

/// Parameters for inserting a post. Counters always start at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub upload_place: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub body_size: [f64; 2],
    pub thumbnail: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Chat room row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChatRoomRow {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub leader_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewChatRoom {
    pub title: String,
    pub image_url: String,
    pub leader_id: String,
    pub created_at: DateTime<Utc>,
}

/// Chat message row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MessageRow {
    pub id: String,
    pub room_id: String,
    pub user_id: String,
    pub content: String,
    #[ts(optional)]
    pub chat_img_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    pub room_id: String,
    pub user_id: String,
    pub content: String,
    pub chat_img_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_row_serializes_snake_case() {
        let row = MessageRow {
            id: "m1".into(),
            room_id: "r1".into(),
            user_id: "u1".into(),
            content: "안녕하세요".into(),
            chat_img_url: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["room_id"], "r1");
        assert!(json["chat_img_url"].is_null());
    }

    #[test]
    fn test_post_row_round_trips_body_size() {
        let json = r#"{
            "id": "p1", "user_id": "u1", "title": "t", "content": "c",
            "upload_place": "서울 서초구 서초동", "latitude": null, "longitude": null,
            "body_size": [172.5, 64.0], "thumbnail": "", "tags": ["ootd"],
            "comments": 0, "likes": 0, "view": 0,
            "created_at": "2025-01-01T00:00:00Z"
        }"#;
        let row: PostRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.body_size, vec![172.5, 64.0]);
        assert_eq!(row.tags, vec!["ootd"]);
    }
}
