//! Profile endpoints of the authenticated user

use api_types::user::{ProfileEdit, ProfilePicture, ProfileView};
use axum::{Extension, Json, extract::State};
use axum_extra::extract::WithRejection;
use engine::{Profile, ProfileUpdateCmd, User};

use crate::{ServerError, budgets, server::ServerState};

fn view(profile: Profile) -> ProfileView {
    ProfileView {
        id: profile.user.id,
        name: profile.user.name,
        email: profile.user.email,
        profile_picture: profile.user.profile_picture,
        budgets: profile.budgets.iter().map(budgets::view).collect(),
        transactions: profile.transaction_ids,
    }
}

pub async fn profile(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<ProfileView>, ServerError> {
    let profile = state.engine.profile(user.id).await?;
    Ok(Json(view(profile)))
}

pub async fn edit(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<ProfileEdit>, ServerError>,
) -> Result<Json<ProfileView>, ServerError> {
    let cmd = ProfileUpdateCmd {
        name: payload.name,
        email: payload.email,
        password: payload.password,
    };
    state.engine.update_profile(user.id, cmd).await?;
    let profile = state.engine.profile(user.id).await?;
    Ok(Json(view(profile)))
}

/// Stores the reference to an already uploaded profile picture.
pub async fn update_picture(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<ProfilePicture>, ServerError>,
) -> Result<Json<ProfileView>, ServerError> {
    let Some(picture) = payload.profile_picture else {
        return Err(ServerError::Generic("profile picture is required".to_string()));
    };
    state.engine.set_profile_picture(user.id, &picture).await?;
    let profile = state.engine.profile(user.id).await?;
    Ok(Json(view(profile)))
}
