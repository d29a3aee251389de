use axum::extract::{Path, Query, State};
use axum::response::{Json, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogQuery, build_index};
use crate::db::models::Book;
use crate::db::queries::books;
use crate::error::AppError;
use crate::state::AppState;
use crate::taxonomy::{BookType, CategoryIndex, FictionType, SelectedFilterSet, format_tag};
use crate::web::i18n;
use crate::web::pagination::Pagination;

// ── View models ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TagBadge {
    pub tag: String,
    pub label: String,
    /// Search-by-tag link.
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct BookView {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub book_type: BookType,
    pub book_type_label: String,
    pub fiction_type: Option<FictionType>,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<TagBadge>,
}

#[derive(Debug, Serialize)]
pub struct FacetEntry {
    pub tag: String,
    pub label: String,
    pub count: u64,
    pub selected: bool,
    /// Book list with this tag toggled in the current selection.
    pub toggle: String,
}

#[derive(Debug, Serialize)]
pub struct FacetSection {
    pub book_type: BookType,
    pub book_type_label: String,
    pub fiction_type: FictionType,
    pub fiction_type_label: String,
    pub tags: Vec<FacetEntry>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub locale: String,
    pub selected: SelectedFilterSet,
    pub clear_all: String,
    pub total_books: usize,
    pub sections: Vec<FacetSection>,
    pub index: CategoryIndex,
}

#[derive(Debug, Serialize)]
pub struct BooksResponse {
    pub locale: String,
    pub selected: SelectedFilterSet,
    pub pagination: Pagination,
    pub books: Vec<BookView>,
}

// ── Query parameter structs ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct CategoriesParams {
    #[serde(default)]
    pub tags: String,
}

#[derive(Deserialize)]
pub struct BooksParams {
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "type", default)]
    pub book_type: Option<String>,
    #[serde(default)]
    pub fiction: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: u32,
}

#[derive(Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: u32,
}

#[derive(Deserialize)]
pub struct SetLanguageParams {
    pub lang: String,
    pub redirect: Option<String>,
}

const BOOKS_PATH: &str = "/web/api/books";

impl BooksParams {
    fn into_query(self) -> Result<(CatalogQuery, u32), AppError> {
        let book_type = non_empty(self.book_type)
            .map(|v| {
                BookType::parse(&v)
                    .ok_or_else(|| AppError::BadRequest(format!("unknown book type {v:?}")))
            })
            .transpose()?;
        let fiction_type = non_empty(self.fiction)
            .map(|v| {
                FictionType::parse(&v)
                    .ok_or_else(|| AppError::BadRequest(format!("unknown fiction type {v:?}")))
            })
            .transpose()?;
        let year = non_empty(self.year)
            .map(|v| {
                v.parse::<i64>()
                    .map_err(|_| AppError::BadRequest(format!("invalid year {v:?}")))
            })
            .transpose()?;

        let query = CatalogQuery {
            selected: SelectedFilterSet::from_query(&self.tags),
            book_type,
            fiction_type,
            year,
            search: non_empty(self.q),
        };
        Ok((query, self.page))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Locale from the `lang` cookie, else the configured default. Only locales
/// with a translation file are reported; anything else resolves to German.
pub fn request_locale(state: &AppState, jar: &CookieJar) -> String {
    [
        jar.get("lang").map(|c| c.value().trim()),
        Some(state.config.web.language.as_str()),
    ]
    .into_iter()
    .flatten()
    .find(|l| state.translations.contains_key(*l))
    .unwrap_or(i18n::FALLBACK_LOCALE)
    .to_string()
}

fn tag_label(state: &AppState, locale: &str, tag: &str) -> String {
    format_tag(tag, |key| {
        Some(i18n::translate(&state.translations, locale, key))
    })
}

fn attribute_label(state: &AppState, locale: &str, group: &str, value: &str) -> String {
    let key = format!("labels.{group}.{value}");
    let label = i18n::translate(&state.translations, locale, &key);
    if label == key { value.to_string() } else { label }
}

fn tag_href(tag: &str) -> String {
    format!("/web/api/tags/{}/books", urlencoding::encode(tag))
}

fn books_href(selected: &SelectedFilterSet) -> String {
    if selected.is_empty() {
        BOOKS_PATH.to_string()
    } else {
        format!(
            "{BOOKS_PATH}?tags={}",
            urlencoding::encode(&selected.to_query())
        )
    }
}

fn book_view(state: &AppState, locale: &str, book: &Book) -> BookView {
    let tags = book
        .tags(&state.taxonomy)
        .iter()
        .map(|tag| TagBadge {
            tag: tag.to_string(),
            label: tag_label(state, locale, tag),
            href: tag_href(tag),
        })
        .collect();

    BookView {
        id: book.id,
        title: book.title.clone(),
        author: book.author.clone(),
        book_type: book.book_type,
        book_type_label: attribute_label(state, locale, "book_type", book.book_type.as_str()),
        fiction_type: book.fiction_type,
        year: book.year,
        genre: book.genre.clone(),
        categories: book.categories.clone(),
        tags,
    }
}

fn facet_sections(
    state: &AppState,
    locale: &str,
    index: &CategoryIndex,
    selected: &SelectedFilterSet,
) -> Vec<FacetSection> {
    index
        .sections()
        .map(|(book_type, fiction_type, counts)| {
            let mut tags: Vec<FacetEntry> = counts
                .iter()
                .map(|(tag, count)| FacetEntry {
                    tag: tag.clone(),
                    label: tag_label(state, locale, tag),
                    count: *count,
                    selected: selected.contains(tag),
                    toggle: books_href(&selected.toggled(tag)),
                })
                .collect();
            tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));

            FacetSection {
                book_type,
                book_type_label: attribute_label(state, locale, "book_type", book_type.as_str()),
                fiction_type,
                fiction_type_label: attribute_label(
                    state,
                    locale,
                    "fiction_type",
                    fiction_type.as_str(),
                ),
                tags,
            }
        })
        .collect()
}

async fn list_books(
    state: &AppState,
    locale: String,
    query: CatalogQuery,
    page: u32,
) -> Result<BooksResponse, AppError> {
    let all = books::get_all(&state.db).await?;
    let matching = query.apply(&all);
    let pagination = Pagination::new(page, state.config.web.page_size, matching.len());
    let books = matching[pagination.range()]
        .iter()
        .map(|book| book_view(state, &locale, book))
        .collect();

    Ok(BooksResponse {
        locale,
        selected: query.selected,
        pagination,
        books,
    })
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /web/api/categories — sidebar facets, rebuilt from a fresh snapshot.
pub async fn categories(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CategoriesParams>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let locale = request_locale(&state, &jar);
    let selected = SelectedFilterSet::from_query(&params.tags);

    let all = books::get_all(&state.db).await?;
    let index = build_index(&all, &state.taxonomy);
    let sections = facet_sections(&state, &locale, &index, &selected);

    Ok(Json(CategoriesResponse {
        locale,
        selected,
        clear_all: BOOKS_PATH.to_string(),
        total_books: all.len(),
        sections,
        index,
    }))
}

/// GET /web/api/books — filtered, paginated book list.
pub async fn books_list(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<BooksParams>,
) -> Result<Json<BooksResponse>, AppError> {
    let locale = request_locale(&state, &jar);
    let (query, page) = params.into_query()?;
    Ok(Json(list_books(&state, locale, query, page).await?))
}

/// GET /web/api/books/{id} — book detail with tag badges.
pub async fn book_detail(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Json<BookView>, AppError> {
    let locale = request_locale(&state, &jar);
    let book = books::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("book {id}")))?;
    Ok(Json(book_view(&state, &locale, &book)))
}

/// GET /web/api/tags/{tag}/books — books carrying a single tag.
pub async fn tag_books(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(tag): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Json<BooksResponse>, AppError> {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() {
        return Err(AppError::BadRequest("empty tag".to_string()));
    }
    let locale = request_locale(&state, &jar);
    let query = CatalogQuery::with_tags([tag].into_iter().collect());
    Ok(Json(list_books(&state, locale, query, params.page).await?))
}

/// GET /web/set-language — remember the visitor's locale in a cookie.
pub async fn set_language(
    jar: CookieJar,
    Query(params): Query<SetLanguageParams>,
) -> (CookieJar, Redirect) {
    let cookie = Cookie::build(("lang", params.lang))
        .path("/")
        .max_age(time::Duration::days(365))
        .build();
    let jar = jar.add(cookie);
    let redirect = sanitize_internal_redirect(params.redirect.as_deref());
    (jar, Redirect::to(redirect))
}

fn sanitize_internal_redirect(path: Option<&str>) -> &str {
    path.filter(|value| value.starts_with('/') && !value.starts_with("//") && !value.contains('\\'))
        .unwrap_or("/web/api/categories")
}
