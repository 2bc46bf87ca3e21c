//! Post handlers.

use actix_web::{HttpResponse, web};

use newsdesk_shared::dto::{
    CreatePostRequest, ListPostsQuery, PostPageResponse, PostResponse, RecentPostsQuery,
    UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Blank fields never reach the service.
fn require_fields(title: &str, content: &str) -> AppResult<()> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Title and content are required".to_string(),
        ));
    }
    Ok(())
}

/// GET /api/posts?page=&page_size=&search=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let ctx = state.request_context();

    let page = state
        .posts
        .get_paginated(&ctx, query.page, query.page_size, query.search.trim())
        .await?;

    Ok(HttpResponse::Ok().json(PostPageResponse::from(page)))
}

/// GET /api/posts/recent?limit=
pub async fn recent_posts(
    state: web::Data<AppState>,
    query: web::Query<RecentPostsQuery>,
) -> AppResult<HttpResponse> {
    let ctx = state.request_context();
    let posts = state.posts.get_recent(&ctx, query.limit).await?;

    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ctx = state.request_context();
    let post = state.posts.get_by_id(&ctx, &path).await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_fields(&req.title, &req.content)?;

    let ctx = state.request_context();
    let post = state.posts.create(&ctx, &req.title, &req.content).await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_fields(&req.title, &req.content)?;

    let ctx = state.request_context();
    let post = state
        .posts
        .update(&ctx, &path, &req.title, &req.content)
        .await?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let ctx = state.request_context();
    state.posts.delete(&ctx, &path).await?;

    Ok(HttpResponse::NoContent().finish())
}
