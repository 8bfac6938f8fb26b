use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{repo::GameStore, repo_types::GameIdentifier};
use crate::error::{ApiError, ApiResult};

/// Result of the best-effort play-session insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTracking {
    Recorded(Uuid),
    /// No caller identity; nothing to record.
    Anonymous,
    /// Insert failed; logged and otherwise ignored.
    Failed,
}

impl SessionTracking {
    pub fn is_recorded(&self) -> bool {
        matches!(self, SessionTracking::Recorded(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Registered {
        play_count: i64,
        session: SessionTracking,
    },
    /// A backend failure was hit; the caller still gets a success.
    Degraded,
}

/// Attempts to record a play session. Never fails.
pub async fn track_session(
    games: &dyn GameStore,
    caller: Option<Uuid>,
    game_id: Uuid,
) -> SessionTracking {
    let Some(user_id) = caller else {
        return SessionTracking::Anonymous;
    };
    match games.create_play_session(user_id, game_id).await {
        Ok(session) => {
            debug!(session_id = %session.id, %user_id, %game_id, "play session recorded");
            SessionTracking::Recorded(session.id)
        }
        Err(e) => {
            warn!(error = ?e, %user_id, %game_id, "play session not recorded");
            SessionTracking::Failed
        }
    }
}

/// Counts a play of a published game. The only error is `NotFound`, for a
/// missing or unpublished game; every other failure degrades to success.
pub async fn register_play(
    games: &dyn GameStore,
    ident: &GameIdentifier,
    caller: Option<Uuid>,
) -> ApiResult<PlayOutcome> {
    let game = match games.find_by_identifier(ident).await {
        Ok(Some(game)) if game.is_published => game,
        Ok(_) => return Err(ApiError::not_found("Game not found")),
        Err(e) => {
            warn!(error = ?e, slug = %ident.slug, "game lookup failed; masking");
            return Ok(PlayOutcome::Degraded);
        }
    };

    let play_count = match games.increment_play_count(game.id).await {
        Ok(Some(count)) => count,
        Ok(None) => return Err(ApiError::not_found("Game not found")),
        Err(e) => {
            warn!(error = ?e, game_id = %game.id, "play count increment failed; masking");
            return Ok(PlayOutcome::Degraded);
        }
    };

    let session = track_session(games, caller, game.id).await;
    info!(game_id = %game.id, play_count, tracked = session.is_recorded(), "play registered");
    Ok(PlayOutcome::Registered {
        play_count,
        session,
    })
}
