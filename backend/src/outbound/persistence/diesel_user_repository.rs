//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username uniqueness is enforced by the table's unique constraint. A
//! violation surfaces as [`UserPersistenceError::DuplicateUserName`] so a
//! registration that loses a race still gets the user-facing message.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, PasswordHash, StoredUser, UserId, UserName};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::thingful_users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_user_name()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<StoredUser, UserPersistenceError> {
    let user_name = UserName::new(row.user_name)
        .map_err(|err| UserPersistenceError::query(format!("invalid user name in database: {err}")))?;
    Ok(StoredUser::from_columns(
        UserId::new(row.id),
        user_name,
        row.full_name,
        row.nick_name,
        PasswordHash::new(row.password_hash),
        row.date_created,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn user_name_exists(&self, user_name: &UserName) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            thingful_users::table.filter(thingful_users::user_name.eq(user_name.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn insert(&self, user: &NewUser) -> Result<StoredUser, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            user_name: user.user_name().as_str(),
            full_name: user.full_name(),
            nick_name: user.nick_name(),
            password_hash: user.password_hash().as_str(),
        };

        let inserted: UserRow = diesel::insert_into(thingful_users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(inserted)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<StoredUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = thingful_users::table
            .find(id.as_i32())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and row conversion. Query behaviour needs a live
    //! PostgreSQL and is exercised through the in-memory adapter's contract.
    use super::*;
    use chrono::Utc;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("constraint detail".to_owned()))
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_user_name() {
        let repo_err = map_diesel_error(database_error(DatabaseErrorKind::UniqueViolation));
        assert_eq!(repo_err, UserPersistenceError::DuplicateUserName);
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let repo_err = map_diesel_error(database_error(DatabaseErrorKind::ClosedConnection));
        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ForeignKeyViolation))]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_map_to_query_error(#[case] error: DieselError) {
        let repo_err = map_diesel_error(error);
        assert!(matches!(repo_err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_keeps_every_column() {
        let created = Utc::now();
        let user = row_to_user(UserRow {
            id: 5,
            user_name: "apple".to_owned(),
            full_name: "Apples Apples".to_owned(),
            nick_name: Some("Appy".to_owned()),
            password_hash: "$2b$12$hash".to_owned(),
            date_created: created,
        })
        .expect("valid row");

        assert_eq!(user.id(), UserId::new(5));
        assert_eq!(user.user_name().as_str(), "apple");
        assert_eq!(user.nick_name(), Some("Appy"));
        assert_eq!(user.password_hash().as_str(), "$2b$12$hash");
        assert_eq!(user.date_created(), created);
    }

    #[rstest]
    fn empty_stored_user_name_is_a_query_error() {
        let result = row_to_user(UserRow {
            id: 5,
            user_name: String::new(),
            full_name: "Apples Apples".to_owned(),
            nick_name: None,
            password_hash: "$2b$12$hash".to_owned(),
            date_created: Utc::now(),
        });
        assert!(matches!(result, Err(UserPersistenceError::Query { .. })));
    }
}
