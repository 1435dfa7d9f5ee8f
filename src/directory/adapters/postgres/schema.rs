//! Diesel schema for directory persistence.

diesel::table! {
    /// Employee records.
    actors (id) {
        /// Internal actor identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Unique, lower-cased email address.
        #[max_length = 255]
        email -> Varchar,
        /// Optional job position.
        position -> Nullable<Text>,
        /// Role (admin, department_head, group_leader or member).
        #[max_length = 50]
        role -> Varchar,
        /// Power level (monitoring or full).
        #[max_length = 50]
        power -> Varchar,
        /// Optional direct department membership.
        department_id -> Nullable<Uuid>,
        /// Lifecycle status (active or deactivated).
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Department records.
    departments (id) {
        /// Internal department identifier.
        id -> Uuid,
        /// Department name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional head; unique across departments.
        head_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
