//! Diesel table definitions generated from the embedded migrations.
//!
//! Keep in sync with `backend/migrations`.

diesel::table! {
    /// Registered users.
    ///
    /// `user_name` carries a unique constraint; `id` and `date_created` are
    /// assigned by PostgreSQL on insert.
    thingful_users (id) {
        /// Primary key: serial integer.
        id -> Int4,
        /// Login name, unique and case-sensitive.
        user_name -> Text,
        /// Display name.
        full_name -> Text,
        /// Optional nickname.
        nick_name -> Nullable<Text>,
        /// bcrypt hash of the password.
        password_hash -> Text,
        /// Insertion timestamp.
        date_created -> Timestamptz,
    }
}
