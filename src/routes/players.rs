use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use crate::db::StoreError;
use crate::error::ApiError;
use crate::models::{parse_json_body, MessageResponse, NewPlayer, Player, PlayerChanges};
use crate::state::AppState;

// POST /players - Create a player
pub async fn create_player(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let new_player = NewPlayer::from_json(parse_json_body(&body).as_ref())?;
    let username = new_player.username.clone();

    let player = state.players.create(new_player).await.map_err(|err| {
        if matches!(err, StoreError::DuplicateUsername) {
            tracing::warn!("Username {} is already taken", username);
        }
        ApiError::from(err)
    })?;

    tracing::info!("Created player {} ({})", player.id, player.username);
    Ok((StatusCode::CREATED, Json(player)))
}

// GET /players - List all players
pub async fn get_players(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.players.list().await?;
    Ok(Json(players))
}

// GET /players/:id - Get player by ID
pub async fn get_player_by_id(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Player>, ApiError> {
    let player_id = player_id(path)?;

    let player = state
        .players
        .get(player_id)
        .await?
        .ok_or(ApiError::PlayerNotFound)?;

    Ok(Json(player))
}

// PUT /players/:id - Update rank and/or kd_ratio
pub async fn update_player(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Bytes,
) -> Result<Json<Player>, ApiError> {
    let player_id = player_id(path)?;

    // An unknown id is reported before a bad body.
    let existing = state
        .players
        .get(player_id)
        .await?
        .ok_or(ApiError::PlayerNotFound)?;

    let changes = PlayerChanges::from_json(parse_json_body(&body).as_ref())?;
    if changes.is_empty() {
        return Ok(Json(existing));
    }

    let player = state
        .players
        .update(player_id, changes)
        .await?
        .ok_or(ApiError::PlayerNotFound)?;

    tracing::info!("Updated player {}", player.id);
    Ok(Json(player))
}

// DELETE /players/:id - Delete a player
pub async fn delete_player(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let player_id = player_id(path)?;

    if !state.players.delete(player_id).await? {
        return Err(ApiError::PlayerNotFound);
    }

    tracing::info!("Deleted player {}", player_id);
    Ok(Json(MessageResponse {
        message: format!("Player with ID {} deleted.", player_id),
    }))
}

// A non-integer id can never name a player.
fn player_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!("Rejected player id: {}", rejection);
        ApiError::PlayerNotFound
    })
}
