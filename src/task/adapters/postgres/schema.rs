//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Storage-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional task description.
        #[max_length = 500]
        description -> Nullable<Varchar>,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp with second precision.
        created_at -> Timestamptz,
        /// Last update timestamp with second precision.
        updated_at -> Timestamptz,
    }
}
