use buchkatalog::db;

use super::*;

fn titles(json: &serde_json::Value) -> Vec<String> {
    json["books"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect()
}

/// Without filters the first page holds `page_size` books in title order.
#[tokio::test]
async fn unfiltered_list_is_paginated() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app.clone(), "/web/api/books").await).await;
    assert_eq!(json["pagination"]["total_items"], 4);
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_next"], true);
    assert_eq!(titles(&json), vec!["Der Schwarm", "Die Vermessung der Welt"]);

    let json = body_json(get(app, "/web/api/books?page=1").await).await;
    assert_eq!(
        titles(&json),
        vec!["Eine kurze Geschichte der Menschheit", "Ohne Angaben"]
    );
    assert_eq!(json["pagination"]["has_next"], false);
}

/// Every selected tag must match (AND), by substring of the raw fields.
#[tokio::test]
async fn tag_filter_is_conjunctive() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app.clone(), "/web/api/books?tags=history").await).await;
    assert_eq!(titles(&json), vec!["Eine kurze Geschichte der Menschheit"]);

    let json = body_json(get(app.clone(), "/web/api/books?tags=history,fantasy").await).await;
    assert!(titles(&json).is_empty());

    // "roman" is a substring of "Historische Romane (88)".
    let json = body_json(get(app.clone(), "/web/api/books?tags=roman").await).await;
    assert_eq!(titles(&json), vec!["Die Vermessung der Welt"]);

    // Genre participates in matching.
    let json = body_json(get(app, "/web/api/books?tags=thriller,science").await).await;
    assert_eq!(titles(&json), vec!["Der Schwarm"]);
}

/// Structured filters combine with tag selection.
#[tokio::test]
async fn type_and_fiction_filters() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app.clone(), "/web/api/books?type=audiobook&fiction=Fiction").await).await;
    assert_eq!(titles(&json), vec!["Die Vermessung der Welt"]);

    let json = body_json(get(app.clone(), "/web/api/books?type=ebook&fiction=Non-Fiction").await).await;
    assert_eq!(titles(&json), vec!["Ohne Angaben"]);

    let json = body_json(get(app, "/web/api/books?q=schwarm&year=2020").await).await;
    assert_eq!(titles(&json), vec!["Der Schwarm"]);
}

/// Invalid filter values are rejected with 400.
#[tokio::test]
async fn invalid_filters_rejected() {
    let pool = db::create_test_pool().await;
    let app = test_router(test_app_state(pool, test_config()));

    let resp = get(app.clone(), "/web/api/books?type=paperback").await;
    assert_eq!(resp.status(), 400);
    let json = body_json(resp).await;
    assert!(json["error"].as_str().unwrap().contains("paperback"));

    let resp = get(app, "/web/api/books?year=bald").await;
    assert_eq!(resp.status(), 400);
}

/// Tag navigation lists books carrying the tag, with badges linking back.
#[tokio::test]
async fn tag_navigation() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app, "/web/api/tags/science%20fiction/books").await).await;
    assert_eq!(json["selected"], serde_json::json!(["science fiction"]));
    assert_eq!(titles(&json), vec!["Der Schwarm"]);

    let badges = json["books"][0]["tags"].as_array().unwrap();
    let tags: Vec<&str> = badges.iter().map(|b| b["tag"].as_str().unwrap()).collect();
    assert_eq!(tags, vec!["literature", "science fiction", "thriller"]);
    assert_eq!(badges[1]["href"], "/web/api/tags/science%20fiction/books");
}
