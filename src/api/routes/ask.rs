use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::{error::ApiError, state::AppState};
use crate::domain::{Answer, Message};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// `None` when the query was blank.
    pub answer: Option<Answer>,
}

pub async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let answer = state.assistant.answer(&mut session, &request.query).await?;
    Ok(Json(AskResponse { answer }))
}

pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    let session = state.session.lock().await;
    Json(session.messages().to_vec())
}
