use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    articles::{
        dto::{ArticleListItem, CreateArticleRequest},
        repo::Article,
    },
    auth::{jwt::AuthUser, User},
    state::AppState,
};

pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles))
        .route("/articles", post(create_article))
}

#[instrument(skip(state))]
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleListItem>>, (StatusCode, String)> {
    let articles = Article::list_published(&state.db).await.map_err(internal)?;
    Ok(Json(articles.into_iter().map(ArticleListItem::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_article(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateArticleRequest>,
) -> Result<(StatusCode, Json<ArticleListItem>), (StatusCode, String)> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found".to_string()))?;

    // Authoring is restricted to staff accounts
    if !user.is_staff {
        warn!(user_id = %user_id, "non-staff article create rejected");
        return Err((StatusCode::FORBIDDEN, "Staff account required".into()));
    }

    if let Err(e) = payload.validate() {
        warn!(error = %e, "article rejected");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let article = Article::create(&state.db, user_id, payload.into_new_article())
        .await
        .map_err(internal)?;

    info!(user_id = %user_id, article_id = %article.id, "article published");
    Ok((StatusCode::CREATED, Json(article.into())))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
