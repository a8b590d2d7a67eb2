//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::thingful_users;

/// Row struct for reading from the `thingful_users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = thingful_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub user_name: String,
    pub full_name: String,
    pub nick_name: Option<String>,
    pub password_hash: String,
    pub date_created: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = thingful_users)]
pub(crate) struct NewUserRow<'a> {
    pub user_name: &'a str,
    pub full_name: &'a str,
    pub nick_name: Option<&'a str>,
    pub password_hash: &'a str,
}
