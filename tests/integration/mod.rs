mod book_list_tests;
mod categories_tests;
mod language_tests;

use axum::Router;
use axum::body::Body;
use http_body_util::BodyExt;
use tower::ServiceExt;

use buchkatalog::config::Config;
use buchkatalog::db::DbPool;
use buchkatalog::db::queries::books::{self, NewBook};
use buchkatalog::state::AppState;
use buchkatalog::taxonomy::{BookType, FictionType};
use buchkatalog::web::i18n;

/// Minimal Config for an in-memory catalog.
pub fn test_config() -> Config {
    let toml_str = r#"
[database]
url = "sqlite::memory:"

[web]
language = "de"
page_size = 2
"#;
    toml::from_str(toml_str).expect("test config should parse")
}

/// Build an AppState with the shipped translations.
pub fn test_app_state(pool: DbPool, config: Config) -> AppState {
    let translations = i18n::load_runtime_translations().expect("translations should load");
    AppState::new(config, pool, translations)
}

/// Build a full Router from an AppState.
pub fn test_router(state: AppState) -> Router {
    buchkatalog::build_router(state)
}

/// Insert a book and return its ID.
pub async fn add_book(
    pool: &DbPool,
    title: &str,
    book_type: BookType,
    fiction_type: Option<FictionType>,
    categories: &[&str],
    genre: Option<&str>,
) -> i64 {
    let book = NewBook {
        title: title.to_string(),
        author: "Testautor".to_string(),
        book_type,
        fiction_type,
        genre: genre.map(String::from),
        categories: categories.iter().map(|s| s.to_string()).collect(),
        year: Some(2020),
    };
    books::insert(pool, &book, "2026-01-01T00:00:00Z")
        .await
        .expect("should insert test book")
}

/// A small mixed collection used by most tests.
pub async fn seed_catalog(pool: &DbPool) {
    add_book(
        pool,
        "Der Schwarm",
        BookType::Ebook,
        Some(FictionType::Fiction),
        &["Kindle eBooks > Literature & Fiction (12345)", "Science Fiction"],
        Some("Thriller"),
    )
    .await;
    add_book(
        pool,
        "Die Vermessung der Welt",
        BookType::Audiobook,
        Some(FictionType::Fiction),
        &["Historische Romane (88)"],
        None,
    )
    .await;
    add_book(
        pool,
        "Eine kurze Geschichte der Menschheit",
        BookType::Audiobook,
        Some(FictionType::NonFiction),
        &["History", "Drama"],
        None,
    )
    .await;
    add_book(pool, "Ohne Angaben", BookType::Ebook, None, &["Ratgeber"], None).await;
}

/// Send a GET request and return the response.
pub async fn get(app: Router, path: &str) -> axum::response::Response {
    let req = axum::http::Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(req).await.unwrap()
}

/// Send a GET request with a `lang` cookie.
pub async fn get_with_lang(app: Router, path: &str, lang: &str) -> axum::response::Response {
    let req = axum::http::Request::builder()
        .uri(path)
        .header("cookie", format!("lang={lang}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(req).await.unwrap()
}

/// Extract response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response should be JSON")
}
