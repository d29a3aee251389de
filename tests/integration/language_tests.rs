use buchkatalog::db;

use super::*;

/// set-language stores the locale cookie and redirects internally only.
#[tokio::test]
async fn set_language_sets_cookie() {
    let pool = db::create_test_pool().await;
    let app = test_router(test_app_state(pool, test_config()));

    let resp = get(app.clone(), "/web/set-language?lang=en&redirect=/web/api/books").await;
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.headers()["location"], "/web/api/books");
    let cookie = resp.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("lang=en"));

    let resp = get(app, "/web/set-language?lang=en&redirect=//example.com").await;
    assert_eq!(resp.headers()["location"], "/web/api/categories");
}

/// The `lang` cookie switches labels; untranslated tags fall back to title case.
#[tokio::test]
async fn english_labels_from_cookie() {
    let pool = db::create_test_pool().await;
    add_book(
        &pool,
        "Kochen für Anfänger",
        BookType::Ebook,
        None,
        &["Ratgeber > Kochen"],
        None,
    )
    .await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get_with_lang(app.clone(), "/web/api/books", "en").await).await;
    assert_eq!(json["locale"], "en");
    let badges = &json["books"][0]["tags"];
    assert_eq!(badges[0]["label"], "Self-Help");
    assert_eq!(badges[1]["label"], "Kochen");
    assert_eq!(json["books"][0]["book_type_label"], "E-book");

    let json = body_json(get(app, "/web/api/books").await).await;
    assert_eq!(json["locale"], "de");
    assert_eq!(json["books"][0]["tags"][0]["label"], "Ratgeber");
}

/// Locales without a file use the German translations.
#[tokio::test]
async fn unknown_locale_falls_back() {
    let pool = db::create_test_pool().await;
    add_book(&pool, "Faust", BookType::Ebook, Some(FictionType::Fiction), &["Drama"], None).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get_with_lang(app.clone(), "/web/api/books/1", "fr").await).await;
    assert_eq!(json["tags"][0]["label"], "Drama");
    assert_eq!(json["book_type_label"], "E-Book");

    // The reported locale is the one whose labels were used.
    let json = body_json(get_with_lang(app, "/web/api/books", "fr").await).await;
    assert_eq!(json["locale"], "de");
}
