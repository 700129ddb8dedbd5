//! In-progress post and its reducer

use chrono::{DateTime, Utc};
use dongne_db::NewPost;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{Error, Result};

/// Position as entered or reported, kept as strings until submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BodySize {
    pub height: String,
    pub weight: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub address: String,
    pub position: Position,
    pub body_size: BodySize,
    pub thumbnail: String,
    pub tags: Vec<String>,
}

/// Scalar text fields settable through [`DraftAction::SetField`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum DraftField {
    Title,
    Content,
    Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum DraftAction {
    SetField {
        field: DraftField,
        value: String,
    },
    SetPosition {
        value: Position,
    },
    /// Only the given halves are replaced
    MergeBodySize {
        #[serde(default)]
        height: Option<String>,
        #[serde(default)]
        weight: Option<String>,
    },
    SetThumbnail {
        value: String,
    },
    Reset,
}

/// Apply one action, producing the next draft
pub fn reduce(draft: &PostDraft, action: DraftAction) -> PostDraft {
    match action {
        DraftAction::SetField { field, value } => {
            let mut next = draft.clone();
            match field {
                DraftField::Title => next.title = value,
                DraftField::Content => next.content = value,
                DraftField::Address => next.address = value,
            }
            next
        }
        DraftAction::SetPosition { value } => PostDraft {
            position: value,
            ..draft.clone()
        },
        DraftAction::MergeBodySize { height, weight } => PostDraft {
            body_size: BodySize {
                height: height.unwrap_or_else(|| draft.body_size.height.clone()),
                weight: weight.unwrap_or_else(|| draft.body_size.weight.clone()),
            },
            ..draft.clone()
        },
        DraftAction::SetThumbnail { value } => PostDraft {
            thumbnail: value,
            ..draft.clone()
        },
        DraftAction::Reset => PostDraft::default(),
    }
}

fn parse_measure(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl PostDraft {
    /// Title, content and address are all filled in
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.content, &self.address]
            .iter()
            .all(|s| !s.trim().is_empty())
    }

    /// Snapshot for insertion. Unparsable measurements become 0.
    pub fn to_new_post(&self, user_id: &str, now: DateTime<Utc>) -> Result<NewPost> {
        if !self.is_complete() {
            return Err(Error::IncompleteDraft);
        }

        let (latitude, longitude) = match (
            parse_coordinate(&self.position.lat),
            parse_coordinate(&self.position.lng),
        ) {
            (Some(lat), Some(lng)) => (Some(lat), Some(lng)),
            _ => (None, None),
        };

        Ok(NewPost {
            user_id: user_id.to_string(),
            title: self.title.clone(),
            content: self.content.clone(),
            upload_place: self.address.clone(),
            latitude,
            longitude,
            body_size: [
                parse_measure(&self.body_size.height),
                parse_measure(&self.body_size.weight),
            ],
            thumbnail: self.thumbnail.clone(),
            tags: self.tags.clone(),
            created_at: now,
        })
    }
}

/// Holds the current draft and applies actions to it
#[derive(Debug, Clone, Default)]
pub struct PostDraftStore {
    state: PostDraft,
}

impl PostDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PostDraft {
        &self.state
    }

    pub fn dispatch(&mut self, action: DraftAction) -> &PostDraft {
        self.state = reduce(&self.state, action);
        &self.state
    }

    pub fn into_inner(self) -> PostDraft {
        self.state
    }
}

impl From<PostDraft> for PostDraftStore {
    fn from(state: PostDraft) -> Self {
        Self { state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(field: DraftField, value: &str) -> DraftAction {
        DraftAction::SetField {
            field,
            value: value.to_string(),
        }
    }

    fn filled() -> PostDraftStore {
        let mut store = PostDraftStore::new();
        store.dispatch(set(DraftField::Title, "오늘의 코디"));
        store.dispatch(set(DraftField::Content, "가을 니트"));
        store.dispatch(set(DraftField::Address, "서울 서초구 서초동"));
        store
    }

    #[test]
    fn test_set_field_touches_only_that_field() {
        let draft = PostDraft::default();
        let next = reduce(&draft, set(DraftField::Address, "서울 서초구 서초동"));
        assert_eq!(next.address, "서울 서초구 서초동");
        assert_eq!(next.title, "");
        assert_eq!(draft, PostDraft::default());
    }

    #[test]
    fn test_body_size_merges() {
        let mut store = PostDraftStore::new();
        store.dispatch(DraftAction::MergeBodySize {
            height: Some("172".into()),
            weight: None,
        });
        let draft = store.dispatch(DraftAction::MergeBodySize {
            height: None,
            weight: Some("64".into()),
        });
        assert_eq!(
            draft.body_size,
            BodySize {
                height: "172".into(),
                weight: "64".into()
            }
        );
    }

    #[test]
    fn test_position_and_thumbnail() {
        let mut store = PostDraftStore::new();
        store.dispatch(DraftAction::SetPosition {
            value: Position {
                lat: "37.4979".into(),
                lng: "127.0276".into(),
            },
        });
        store.dispatch(DraftAction::SetThumbnail {
            value: "http://localhost/media/post-images/thumbnail/1.png".into(),
        });
        assert_eq!(store.state().position.lat, "37.4979");
        assert!(store.state().thumbnail.ends_with("1.png"));
    }

    #[test]
    fn test_reset_always_yields_initial_draft() {
        let histories: Vec<Vec<DraftAction>> = vec![
            vec![],
            vec![set(DraftField::Title, "t")],
            vec![
                set(DraftField::Content, "c"),
                DraftAction::MergeBodySize {
                    height: Some("180".into()),
                    weight: Some("70".into()),
                },
                DraftAction::SetThumbnail { value: "u".into() },
                DraftAction::Reset,
                set(DraftField::Address, "a"),
            ],
        ];
        for history in histories {
            let mut store = PostDraftStore::new();
            for action in history {
                store.dispatch(action);
            }
            assert_eq!(store.dispatch(DraftAction::Reset), &PostDraft::default());
        }
    }

    #[test]
    fn test_action_wire_format() {
        let action: DraftAction = serde_json::from_str(
            r#"{"type":"SET_FIELD","field":"title","value":"제목"}"#,
        )
        .unwrap();
        assert_eq!(action, set(DraftField::Title, "제목"));

        let action: DraftAction =
            serde_json::from_str(r#"{"type":"MERGE_BODY_SIZE","weight":"60"}"#).unwrap();
        assert_eq!(
            action,
            DraftAction::MergeBodySize {
                height: None,
                weight: Some("60".into())
            }
        );

        let action: DraftAction = serde_json::from_str(r#"{"type":"RESET"}"#).unwrap();
        assert_eq!(action, DraftAction::Reset);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        assert!(serde_json::from_str::<DraftAction>(r#"{"type":"SET_TAGS","value":[]}"#).is_err());
        assert!(serde_json::from_str::<DraftAction>(
            r#"{"type":"SET_FIELD","field":"thumbnail","value":"x"}"#
        )
        .is_err());
    }

    #[test]
    fn test_to_new_post_requires_fields() {
        let mut store = filled();
        store.dispatch(set(DraftField::Address, "  "));
        let err = store.state().to_new_post("u1", Utc::now()).unwrap_err();
        assert!(matches!(err, Error::IncompleteDraft));
        assert_eq!(err.user_message(), "모든 항목을 입력해주세요.");
    }

    #[test]
    fn test_to_new_post_converts_measurements() {
        let mut store = filled();
        store.dispatch(DraftAction::MergeBodySize {
            height: Some("172.5".into()),
            weight: Some("abc".into()),
        });
        let post = store.state().to_new_post("u1", Utc::now()).unwrap();
        assert_eq!(post.body_size, [172.5, 0.0]);
        assert_eq!(post.upload_place, "서울 서초구 서초동");
        assert_eq!(post.latitude, None);
        assert_eq!(post.thumbnail, "");
    }

    #[test]
    fn test_to_new_post_keeps_position_pairs_only() {
        let mut store = filled();
        store.dispatch(DraftAction::SetPosition {
            value: Position {
                lat: "37.4979".into(),
                lng: "".into(),
            },
        });
        let post = store.state().to_new_post("u1", Utc::now()).unwrap();
        assert_eq!((post.latitude, post.longitude), (None, None));

        store.dispatch(DraftAction::SetPosition {
            value: Position {
                lat: "37.4979".into(),
                lng: "127.0276".into(),
            },
        });
        let post = store.state().to_new_post("u1", Utc::now()).unwrap();
        assert_eq!(post.latitude, Some(37.4979));
        assert_eq!(post.longitude, Some(127.0276));
    }
}
