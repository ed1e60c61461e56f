//! Referential-integrity cascade engine.
//!
//! Foreign keys in the schema carry no `ON DELETE` actions: every delete of
//! a parent entity goes through this module, which applies the cascade rules
//! declared below inside a single transaction. This keeps the whole deletion
//! policy in one visible table instead of scattered across the schema.
//!
//! File attachments owned by deleted rows are snapshotted before the rows
//! go away. Each delete function returns the snapshot so the caller can
//! remove the files from disk after the transaction has committed; a failed
//! transaction therefore never loses a file.

use sqlx::{PgPool, Postgres, Transaction};
use warraq_core::attachments::StoredFile;
use warraq_core::types::DbId;

/// One cascade step: what happens to rows referencing a deleted parent.
#[derive(Debug, Clone, Copy)]
pub enum CascadeAction {
    /// Referencing rows are strictly owned by the parent and die with it.
    Delete {
        table: &'static str,
        fk: &'static str,
    },
    /// Referencing rows outlive the parent with the reference cleared.
    Nullify {
        table: &'static str,
        fk: &'static str,
    },
}

use CascadeAction::{Delete, Nullify};

/// Deleting an author detaches its books and users, and removes slides
/// promoting it.
const AUTHOR_RULES: &[CascadeAction] = &[
    Nullify { table: "books", fk: "author_id" },
    Nullify { table: "users", fk: "author_id" },
    Delete { table: "slides", fk: "author_id" },
];

const PUBLISHER_RULES: &[CascadeAction] = &[
    Nullify { table: "books", fk: "publisher_id" },
    Nullify { table: "users", fk: "publisher_id" },
    Delete { table: "slides", fk: "publisher_id" },
];

const CATEGORY_RULES: &[CascadeAction] = &[
    Nullify { table: "books", fk: "category_id" },
    Delete { table: "user_interests", fk: "category_id" },
];

/// Deleting a book removes everything that only makes sense against an
/// existing book: reviews, read history, cart rows, its coupons, slides
/// promoting it, and ownership grants.
const BOOK_RULES: &[CascadeAction] = &[
    Delete { table: "book_reviews", fk: "book_id" },
    Delete { table: "book_reads", fk: "book_id" },
    Delete { table: "carts", fk: "book_id" },
    Delete { table: "coupons", fk: "book_id" },
    Delete { table: "slides", fk: "book_id" },
    Delete { table: "book_users", fk: "book_id" },
];

const POST_RULES: &[CascadeAction] = &[
    Delete { table: "post_likes", fk: "post_id" },
    Delete { table: "post_comments", fk: "post_id" },
];

/// Deleting a user removes their strictly-owned rows and detaches the rest.
/// The user's own posts are handled separately because their likes and
/// comments cascade one level deeper.
const USER_RULES: &[CascadeAction] = &[
    Delete { table: "user_interests", fk: "user_id" },
    Delete { table: "carts", fk: "user_id" },
    Delete { table: "post_likes", fk: "user_id" },
    Delete { table: "post_comments", fk: "user_id" },
    Delete { table: "book_reads", fk: "user_id" },
    Delete { table: "book_reviews", fk: "user_id" },
    Delete { table: "book_users", fk: "user_id" },
    Delete { table: "notifications", fk: "to_one" },
    Nullify { table: "coupons", fk: "user_id" },
    Nullify { table: "contact_messages", fk: "user_id" },
];

/// Attachment columns of tables that can appear in a `Delete` action, so
/// child files are snapshotted before their rows disappear.
fn table_attachments(table: &str) -> &'static [(&'static str, &'static str)] {
    match table {
        "slides" => &[("image", "slides")],
        "notifications" => &[("image", "notification")],
        _ => &[],
    }
}

/// Collect the non-null values of one file column for rows matching the
/// filter.
async fn snapshot_files(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    subdir: &'static str,
    fk: &str,
    id: DbId,
) -> Result<Vec<StoredFile>, sqlx::Error> {
    let query = format!("SELECT {column} FROM {table} WHERE {fk} = $1 AND {column} IS NOT NULL");
    let names: Vec<(String,)> = sqlx::query_as(&query).bind(id).fetch_all(&mut **tx).await?;
    Ok(names
        .into_iter()
        .map(|(name,)| StoredFile::new(subdir, name))
        .collect())
}

/// Apply one rule set against a parent ID, returning files owned by rows
/// deleted along the way.
async fn apply_rules(
    tx: &mut Transaction<'_, Postgres>,
    rules: &[CascadeAction],
    id: DbId,
) -> Result<Vec<StoredFile>, sqlx::Error> {
    let mut files = Vec::new();
    for rule in rules {
        match *rule {
            Delete { table, fk } => {
                for &(column, subdir) in table_attachments(table) {
                    files.extend(snapshot_files(tx, table, column, subdir, fk, id).await?);
                }
                let query = format!("DELETE FROM {table} WHERE {fk} = $1");
                sqlx::query(&query).bind(id).execute(&mut **tx).await?;
            }
            Nullify { table, fk } => {
                let query = format!("UPDATE {table} SET {fk} = NULL WHERE {fk} = $1");
                sqlx::query(&query).bind(id).execute(&mut **tx).await?;
            }
        }
    }
    Ok(files)
}

/// Snapshot one nullable file column of the parent row itself. Returns
/// `None` when the row does not exist.
async fn snapshot_parent(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    column: &str,
    subdir: &'static str,
    id: DbId,
) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let query = format!("SELECT {column} FROM {table} WHERE id = $1");
    let row: Option<(Option<String>,)> = sqlx::query_as(&query)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row.map(|(name,)| name.map(|n| vec![StoredFile::new(subdir, n)]).unwrap_or_default()))
}

/// Delete an author with its cascade. Returns the files to remove from
/// disk, or `None` when the author does not exist.
pub async fn delete_author(pool: &PgPool, id: DbId) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(mut files) = snapshot_parent(&mut tx, "authors", "image", "author", id).await? else {
        return Ok(None);
    };
    files.extend(apply_rules(&mut tx, AUTHOR_RULES, id).await?);
    sqlx::query("DELETE FROM authors WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a publisher with its cascade.
pub async fn delete_publisher(
    pool: &PgPool,
    id: DbId,
) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(mut files) =
        snapshot_parent(&mut tx, "publishers", "image", "publisher", id).await?
    else {
        return Ok(None);
    };
    files.extend(apply_rules(&mut tx, PUBLISHER_RULES, id).await?);
    sqlx::query("DELETE FROM publishers WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a category with its cascade. Books in the category survive with
/// the reference cleared.
pub async fn delete_category(
    pool: &PgPool,
    id: DbId,
) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(mut files) = snapshot_parent(&mut tx, "categories", "image", "category", id).await?
    else {
        return Ok(None);
    };
    files.extend(apply_rules(&mut tx, CATEGORY_RULES, id).await?);
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a book with its cascade: reviews, reads, cart rows, coupons,
/// slides, and grants all go with it.
pub async fn delete_book(pool: &PgPool, id: DbId) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let row: Option<(String, String)> =
        sqlx::query_as("SELECT pdf, image FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some((pdf, image)) = row else {
        return Ok(None);
    };
    let mut files = vec![
        StoredFile::new("books/pdfs", pdf),
        StoredFile::new("books/images", image),
    ];
    files.extend(apply_rules(&mut tx, BOOK_RULES, id).await?);
    sqlx::query("DELETE FROM books WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a post or quote with its likes and comments.
pub async fn delete_post(pool: &PgPool, id: DbId) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(mut files) = snapshot_parent(&mut tx, "posts", "image", "posts", id).await? else {
        return Ok(None);
    };
    files.extend(apply_rules(&mut tx, POST_RULES, id).await?);
    sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a user account with its full cascade, including the user's own
/// posts and everything hanging off them.
pub async fn delete_user(pool: &PgPool, id: DbId) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(mut files) = snapshot_parent(&mut tx, "users", "image", "profile", id).await? else {
        return Ok(None);
    };

    // The user's own posts cascade one level deeper than the rule table
    // expresses: their likes and comments (from any user) must go first.
    let post_images: Vec<(String,)> = sqlx::query_as(
        "SELECT image FROM posts WHERE user_id = $1 AND image IS NOT NULL",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;
    files.extend(
        post_images
            .into_iter()
            .map(|(name,)| StoredFile::new("posts", name)),
    );
    sqlx::query(
        "DELETE FROM post_likes
         WHERE post_id IN (SELECT id FROM posts WHERE user_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query(
        "DELETE FROM post_comments
         WHERE post_id IN (SELECT id FROM posts WHERE user_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;
    sqlx::query("DELETE FROM posts WHERE user_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    files.extend(apply_rules(&mut tx, USER_RULES, id).await?);
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a slide, returning its image for removal. Slides own no children.
pub async fn delete_slide(pool: &PgPool, id: DbId) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(files) = snapshot_parent(&mut tx, "slides", "image", "slides", id).await? else {
        return Ok(None);
    };
    sqlx::query("DELETE FROM slides WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}

/// Delete a notification, returning its image for removal.
pub async fn delete_notification(
    pool: &PgPool,
    id: DbId,
) -> Result<Option<Vec<StoredFile>>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let Some(files) =
        snapshot_parent(&mut tx, "notifications", "image", "notification", id).await?
    else {
        return Ok(None);
    };
    sqlx::query("DELETE FROM notifications WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(Some(files))
}
