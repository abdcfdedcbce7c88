//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Credential store. `username` is the primary key; `email` is unique.
    users (username) {
        username -> Varchar,
        password_hash -> Text,
        email -> Varchar,
        name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course catalogue.
    ///
    /// `seq` is a database-assigned insertion counter used to break ties
    /// between courses created in the same instant.
    courses (id) {
        id -> Uuid,
        seq -> Int8,
        name -> Text,
        description -> Text,
        duration -> Text,
        image_data -> Text,
        image_file_name -> Text,
        brochure_data -> Text,
        brochure_file_name -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
