use axum::{extract::State, routing::get, Json, Router};

use crate::domains::home::activities::{self, HomeData};
use crate::kernel::ServerDeps;
use crate::server::ApiResult;

pub fn router() -> Router<ServerDeps> {
    Router::new().route("/home", get(home))
}

async fn home(State(deps): State<ServerDeps>) -> ApiResult<Json<HomeData>> {
    Ok(Json(activities::get_home(&deps).await?))
}
