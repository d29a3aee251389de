use buchkatalog::db;

use super::*;

fn section<'a>(json: &'a serde_json::Value, book_type: &str, fiction_type: &str) -> &'a serde_json::Value {
    json["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["book_type"] == book_type && s["fiction_type"] == fiction_type)
        .expect("section should exist")
}

/// An empty catalog still reports all four sections.
#[tokio::test]
async fn empty_catalog_has_all_sections() {
    let pool = db::create_test_pool().await;
    let app = test_router(test_app_state(pool, test_config()));

    let resp = get(app, "/web/api/categories").await;
    assert_eq!(resp.status(), 200);

    let json = body_json(resp).await;
    assert_eq!(json["total_books"], 0);
    assert_eq!(json["sections"].as_array().unwrap().len(), 4);
    assert_eq!(json["index"]["ebook"]["Fiction"], serde_json::json!({}));
    assert_eq!(json["index"]["audiobook"]["Non-Fiction"], serde_json::json!({}));
}

/// Counts are grouped by type and fiction type; noise tags never appear.
#[tokio::test]
async fn index_counts_and_blacklist() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app, "/web/api/categories").await).await;
    assert_eq!(json["total_books"], 4);

    let ebook_fiction = &json["index"]["ebook"]["Fiction"];
    assert_eq!(ebook_fiction["literature"], 1);
    assert_eq!(ebook_fiction["science fiction"], 1);
    assert_eq!(ebook_fiction["thriller"], 1);
    assert!(ebook_fiction.get("kindle ebooks").is_none());
    assert!(ebook_fiction.get("fiction").is_none());

    assert_eq!(json["index"]["audiobook"]["Fiction"]["historische romane"], 1);
    assert_eq!(json["index"]["audiobook"]["Non-Fiction"]["history"], 1);
    assert_eq!(json["index"]["audiobook"]["Non-Fiction"]["drama"], 1);
    // No fiction type recorded: bucketed as Non-Fiction.
    assert_eq!(json["index"]["ebook"]["Non-Fiction"]["ratgeber"], 1);
}

/// Labels come from the German locale with title-case fallback.
#[tokio::test]
async fn facet_labels_are_localized() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app, "/web/api/categories").await).await;
    let ebook_fiction = section(&json, "ebook", "Fiction");
    assert_eq!(ebook_fiction["book_type_label"], "E-Book");
    assert_eq!(ebook_fiction["fiction_type_label"], "Belletristik");

    let tags = ebook_fiction["tags"].as_array().unwrap();
    let label_of = |tag: &str| {
        tags.iter()
            .find(|t| t["tag"] == tag)
            .map(|t| t["label"].as_str().unwrap().to_string())
            .unwrap()
    };
    assert_eq!(label_of("literature"), "Literatur");
    assert_eq!(label_of("science fiction"), "Science-Fiction");

    let audio_fiction = section(&json, "audiobook", "Fiction");
    let historic = &audio_fiction["tags"][0];
    assert_eq!(historic["tag"], "historische romane");
    assert_eq!(historic["label"], "Historische Romane");
}

/// Selected tags are flagged and each facet links to the toggled selection.
#[tokio::test]
async fn toggle_links_reflect_selection() {
    let pool = db::create_test_pool().await;
    seed_catalog(&pool).await;
    let app = test_router(test_app_state(pool, test_config()));

    let json = body_json(get(app, "/web/api/categories?tags=drama").await).await;
    assert_eq!(json["selected"], serde_json::json!(["drama"]));
    assert_eq!(json["clear_all"], "/web/api/books");

    let tags = section(&json, "audiobook", "Non-Fiction")["tags"].as_array().unwrap().clone();
    let drama = tags.iter().find(|t| t["tag"] == "drama").unwrap();
    assert_eq!(drama["selected"], true);
    assert_eq!(drama["toggle"], "/web/api/books");

    let history = tags.iter().find(|t| t["tag"] == "history").unwrap();
    assert_eq!(history["selected"], false);
    assert_eq!(history["toggle"], "/web/api/books?tags=drama%2Chistory");
}
