#![allow(dead_code)]

use link_shortener::domain::entities::Link;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) {
    sqlx::query("INSERT INTO links (code, original_url) VALUES ($1, $2)")
        .bind(code)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn create_clicked_link(pool: &PgPool, code: &str, url: &str, clicks: i64) {
    sqlx::query(
        "INSERT INTO links (code, original_url, clicks, last_clicked) VALUES ($1, $2, $3, NOW())",
    )
    .bind(code)
    .bind(url)
    .bind(clicks)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn fetch_link(pool: &PgPool, code: &str) -> Option<Link> {
    sqlx::query_as::<_, Link>(
        "SELECT id, code, original_url, clicks, last_clicked, created_at FROM links WHERE code = $1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
    .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let link_repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    AppState::new(link_repo)
}
