pub mod i18n;
pub mod pagination;
pub mod views;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    let api_router = Router::new()
        .route("/categories", get(views::categories))
        .route("/books", get(views::books_list))
        .route("/books/{id}", get(views::book_detail))
        .route("/tags/{tag}/books", get(views::tag_books));

    Router::new()
        .route("/set-language", get(views::set_language))
        .nest("/api", api_router)
}
