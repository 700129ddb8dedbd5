use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::CookieJar;
use dongne_core::address_search::Notice;
use dongne_core::post_draft::{DraftAction, DraftField, Position, PostDraft, PostDraftStore};
use dongne_core::post_feed;
use dongne_db::PostRow;
use serde::Serialize;
use ts_rs::TS;

use super::address::{locate, LocateParams};
use super::ImagePayload;
use crate::auth::{self, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Apply actions to the user's latest cached draft
async fn apply(
    state: &AppState,
    user_id: &str,
    actions: impl IntoIterator<Item = DraftAction>,
) -> PostDraft {
    state
        .update_draft(user_id, |draft| {
            let mut store = PostDraftStore::from(draft);
            for action in actions {
                store.dispatch(action);
            }
            store.into_inner()
        })
        .await
}

/// GET /api/drafts
pub async fn get(State(state): State<AppState>, user: AuthUser) -> Json<PostDraft> {
    Json(state.draft(&user.id).await)
}

/// POST /api/drafts/actions
pub async fn dispatch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(action): Json<DraftAction>,
) -> Json<PostDraft> {
    Json(apply(&state, &user.id, [action]).await)
}

/// POST /api/drafts/thumbnail
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<ImagePayload>,
) -> Result<Json<PostDraft>, AppError> {
    let image = body.decode()?;
    let url = post_feed::upload_thumbnail(state.media.as_ref(), &image).await?;
    Ok(Json(
        apply(&state, &user.id, [DraftAction::SetThumbnail { value: url }]).await,
    ))
}

#[derive(Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LocateDraftResponse {
    draft: PostDraft,
    notice: Option<Notice>,
    message: Option<String>,
}

/// POST /api/drafts/locate
/// Fills position and address from the reported position. On failure the
/// draft is unchanged and the notice says why.
pub async fn locate_current(
    State(state): State<AppState>,
    user: AuthUser,
    Json(params): Json<LocateParams>,
) -> Result<Json<LocateDraftResponse>, AppError> {
    let response = match locate(&state, &params).await? {
        Ok(located) => {
            let actions = [
                DraftAction::SetPosition {
                    value: Position {
                        lat: located.coordinates.latitude.to_string(),
                        lng: located.coordinates.longitude.to_string(),
                    },
                },
                DraftAction::SetField {
                    field: DraftField::Address,
                    value: located.address,
                },
            ];
            LocateDraftResponse {
                draft: apply(&state, &user.id, actions).await,
                notice: None,
                message: None,
            }
        }
        Err(notice) => LocateDraftResponse {
            draft: state.draft(&user.id).await,
            notice: Some(notice),
            message: Some(notice.message().to_string()),
        },
    };
    Ok(Json(response))
}

/// POST /api/drafts/submit
/// Inserts the draft as a post and resets it.
pub async fn submit(
    State(state): State<AppState>,
    cookies: CookieJar,
) -> Result<(StatusCode, Json<PostRow>), AppError> {
    let user = auth::session_user(&cookies);
    let draft = match &user {
        Some(id) => state.draft(id).await,
        None => PostDraft::default(),
    };

    let row = post_feed::submit_post(state.store.as_ref(), &draft, user.as_deref()).await?;

    if let Some(id) = &user {
        apply(&state, id, [DraftAction::Reset]).await;
    }
    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /api/drafts
pub async fn reset(State(state): State<AppState>, user: AuthUser) -> Json<PostDraft> {
    Json(apply(&state, &user.id, [DraftAction::Reset]).await)
}
