//! Repository pattern implementation for data access layer
//!
//! Repositories wrap the DatabaseManager and expose typed async operations.

use crate::core::error::{BoardError, Result};
use crate::db::manager::DatabaseManager;
use crate::db::models::{Item, ItemStatus, User};
use async_trait::async_trait;
use rusqlite::OptionalExtension;
use std::sync::Arc;

/// Generic repository trait for read/delete operations over integer-keyed rows
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Find an entity by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<T>>;

    /// Find all entities
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Delete an entity by its ID; NotFound if no row matched
    async fn delete(&self, id: i64) -> Result<()>;
}

/// True when the error is a SQLite uniqueness constraint violation
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn read_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        is_active: row.get(3)?,
    })
}

fn read_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    let status: String = row.get(2)?;
    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        status: status.parse::<ItemStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                format!("invalid item status: {}", status).into(),
            )
        })?,
    })
}

/// Repository for User entities (credential store)
pub struct UserRepository {
    db: Arc<DatabaseManager>,
}

impl UserRepository {
    /// Create a new UserRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Persist a new user and return the stored row
    ///
    /// Uniqueness on username is enforced by the unique index; a violation
    /// surfaces as DuplicateUsername rather than a generic database error, so
    /// concurrent registrations resolve with exactly one winner.
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User> {
        let username = username.to_string();
        let password_hash = password_hash.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO users (username, password_hash, is_active) VALUES (?, ?, 1)",
                    [&username, &password_hash],
                )
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        BoardError::DuplicateUsername(username.clone())
                    } else {
                        BoardError::DatabaseError(e)
                    }
                })?;

                let id = conn.last_insert_rowid();
                Ok(User {
                    id,
                    username,
                    password_hash,
                    is_active: true,
                })
            })
            .await
    }

    /// Find a user by username (case-sensitive exact match)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.to_string();
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, username, password_hash, is_active FROM users WHERE username = ?",
                    [&username],
                    read_user,
                )
                .optional()
                .map_err(BoardError::DatabaseError)
            })
            .await
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
                    .map_err(BoardError::DatabaseError)
            })
            .await
    }
}

/// Repository for Item entities
pub struct ItemRepository {
    db: Arc<DatabaseManager>,
}

impl ItemRepository {
    /// Create a new ItemRepository
    pub fn new(db: Arc<DatabaseManager>) -> Self {
        Self { db }
    }

    /// Insert a new item and return the stored row
    pub async fn create(&self, name: &str, status: ItemStatus) -> Result<Item> {
        let name = name.to_string();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO items (name, status) VALUES (?, ?)",
                    [name.as_str(), status.as_str()],
                )
                .map_err(BoardError::DatabaseError)?;

                let id = conn.last_insert_rowid();
                Ok(Item { id, name, status })
            })
            .await
    }

    /// Partially update an item: only supplied fields change
    ///
    /// Read-modify-write runs inside a transaction so a concurrent delete
    /// cannot interleave between the lookup and the update.
    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        status: Option<ItemStatus>,
    ) -> Result<Item> {
        self.db
            .transaction(move |tx| {
                let mut item = tx
                    .query_row(
                        "SELECT id, name, status FROM items WHERE id = ?",
                        [id],
                        read_item,
                    )
                    .optional()
                    .map_err(BoardError::DatabaseError)?
                    .ok_or_else(|| BoardError::NotFound(format!("Item {} not found", id)))?;

                if let Some(name) = name {
                    item.name = name;
                }
                if let Some(status) = status {
                    item.status = status;
                }

                tx.execute(
                    "UPDATE items SET name = ?, status = ? WHERE id = ?",
                    rusqlite::params![&item.name, item.status.as_str(), id],
                )
                .map_err(BoardError::DatabaseError)?;

                Ok(item)
            })
            .await
    }

    /// Count total items
    pub async fn count(&self) -> Result<i64> {
        self.db
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
                    .map_err(BoardError::DatabaseError)
            })
            .await
    }

    /// Insert the demo rows when the items table is empty
    pub async fn seed_defaults(&self) -> Result<()> {
        self.db
            .transaction(|tx| {
                let count: i64 = tx
                    .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
                    .map_err(BoardError::DatabaseError)?;
                if count > 0 {
                    return Ok(());
                }

                let defaults = [
                    ("Módulo CI/CD", ItemStatus::Completed),
                    ("Módulo Docker", ItemStatus::InProgress),
                    ("Módulo Despliegue", ItemStatus::Pending),
                ];
                for (name, status) in defaults {
                    tx.execute(
                        "INSERT INTO items (name, status) VALUES (?, ?)",
                        [name, status.as_str()],
                    )
                    .map_err(BoardError::DatabaseError)?;
                }

                Ok(())
            })
            .await
    }
}

#[async_trait]
impl Repository<Item> for ItemRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.db
            .execute(move |conn| {
                conn.query_row(
                    "SELECT id, name, status FROM items WHERE id = ?",
                    [id],
                    read_item,
                )
                .optional()
                .map_err(BoardError::DatabaseError)
            })
            .await
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn
                    .prepare("SELECT id, name, status FROM items ORDER BY id ASC")
                    .map_err(BoardError::DatabaseError)?;

                let items = stmt
                    .query_map([], read_item)
                    .map_err(BoardError::DatabaseError)?
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(BoardError::DatabaseError)?;

                Ok(items)
            })
            .await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.db
            .execute(move |conn| {
                let affected = conn
                    .execute("DELETE FROM items WHERE id = ?", [id])
                    .map_err(BoardError::DatabaseError)?;
                if affected == 0 {
                    return Err(BoardError::NotFound(format!("Item {} not found", id)));
                }
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_repos() -> (UserRepository, ItemRepository) {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        (UserRepository::new(db.clone()), ItemRepository::new(db))
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let (users, _) = test_repos();

        let created = users.create("alice", "hash-a").await.unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);

        let found = users.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "hash-a");

        assert!(users.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_username_lookup_is_case_sensitive() {
        let (users, _) = test_repos();
        users.create("Alice", "hash").await.unwrap();

        assert!(users.find_by_username("alice").await.unwrap().is_none());
        assert!(users.find_by_username("Alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_username_maps_to_domain_error() {
        let (users, _) = test_repos();
        users.create("alice", "hash-a").await.unwrap();

        let err = users.create("alice", "hash-b").await.unwrap_err();
        assert!(matches!(err, BoardError::DuplicateUsername(_)));

        // The failed attempt must leave no partial state behind
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_registration() {
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        let repo_a = Arc::new(UserRepository::new(db.clone()));
        let repo_b = repo_a.clone();

        let a = tokio::spawn(async move { repo_a.create("carol", "hash-a").await });
        let b = tokio::spawn(async move { repo_b.create("carol", "hash-b").await });

        let results = [a.await.unwrap(), b.await.unwrap()];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(BoardError::DuplicateUsername(_))))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 1);
    }

    #[tokio::test]
    async fn test_item_crud_round_trip() {
        let (_, items) = test_repos();

        let created = items.create("X", ItemStatus::Pending).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "X");
        assert_eq!(created.status, ItemStatus::Pending);

        let updated = items
            .update(created.id, None, Some(ItemStatus::Completed))
            .await
            .unwrap();
        assert_eq!(updated.name, "X");
        assert_eq!(updated.status, ItemStatus::Completed);

        let fetched = items.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "X");
        assert_eq!(fetched.status, ItemStatus::Completed);

        items.delete(created.id).await.unwrap();
        assert!(items.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let (_, items) = test_repos();
        let err = items.update(999, Some("Y".into()), None).await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let (_, items) = test_repos();
        let err = items.delete(999).await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_seed_defaults_only_when_empty() {
        let (_, items) = test_repos();

        items.seed_defaults().await.unwrap();
        assert_eq!(items.count().await.unwrap(), 3);

        // Second call must not duplicate the seed rows
        items.seed_defaults().await.unwrap();
        assert_eq!(items.count().await.unwrap(), 3);

        let all = items.find_all().await.unwrap();
        assert!(all.iter().any(|i| i.status == ItemStatus::InProgress));
    }
}
