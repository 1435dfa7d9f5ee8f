//! Diesel schema for workflow persistence.

diesel::table! {
    /// Tasks and milestones.
    work_items (id) {
        /// Internal work item identifier.
        id -> Uuid,
        /// Kind (task or milestone).
        #[max_length = 50]
        kind -> Varchar,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creating actor.
        created_by -> Uuid,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Optional scoping department.
        department_id -> Nullable<Uuid>,
        /// Completion flag.
        is_completed -> Bool,
        /// Set iff `is_completed`.
        completed_at -> Nullable<Timestamptz>,
        /// Approval flag.
        is_approved -> Bool,
        /// Set iff `is_approved`.
        approved_by -> Nullable<Uuid>,
        /// Set iff `is_approved`.
        approved_at -> Nullable<Timestamptz>,
        /// Present only when rejected.
        rejection_note -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
