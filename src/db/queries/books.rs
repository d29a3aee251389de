use sqlx::AnyConnection;

use crate::db::DbPool;
use crate::db::models::{Book, BookRow, encode_categories};
use crate::taxonomy::{BookType, FictionType};

const BOOK_COLUMNS: &str =
    "id, title, author, book_type, fiction_type, genre, categories, year, imported_at";

/// Fields for a new `books` row.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub book_type: BookType,
    pub fiction_type: Option<FictionType>,
    pub genre: Option<String>,
    pub categories: Vec<String>,
    pub year: Option<i64>,
}

/// Snapshot of the whole collection, ordered by title.
pub async fn get_all(pool: &DbPool) -> Result<Vec<Book>, sqlx::Error> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY title, id");
    let rows = sqlx::query_as::<_, BookRow>(&sql)
        .fetch_all(pool.inner())
        .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

pub async fn get_by_id(pool: &DbPool, id: i64) -> Result<Option<Book>, sqlx::Error> {
    let sql = pool.sql(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"));
    let row = sqlx::query_as::<_, BookRow>(&sql)
        .bind(id)
        .fetch_optional(pool.inner())
        .await?;
    Ok(row.map(Book::from))
}

pub async fn insert(pool: &DbPool, book: &NewBook, imported_at: &str) -> Result<i64, sqlx::Error> {
    let mut conn = pool.inner().acquire().await?;
    insert_on(pool, &mut conn, book, imported_at).await
}

/// Insert on an open connection, typically a transaction.
pub async fn insert_on(
    pool: &DbPool,
    conn: &mut AnyConnection,
    book: &NewBook,
    imported_at: &str,
) -> Result<i64, sqlx::Error> {
    let sql = pool.sql(
        "INSERT INTO books (title, author, book_type, fiction_type, genre, categories, year, imported_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    );
    let row: (i64,) = sqlx::query_as(&sql)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.book_type.as_str())
        .bind(book.fiction_type.map(|f| f.as_str()))
        .bind(book.genre.as_deref())
        .bind(encode_categories(&book.categories))
        .bind(book.year)
        .bind(imported_at)
        .fetch_one(&mut *conn)
        .await?;
    Ok(row.0)
}

pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
        .fetch_one(pool.inner())
        .await?;
    Ok(row.0)
}

pub async fn delete_all(pool: &DbPool) -> Result<u64, sqlx::Error> {
    let mut conn = pool.inner().acquire().await?;
    delete_all_on(&mut conn).await
}

pub async fn delete_all_on(conn: &mut AnyConnection) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM books")
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
