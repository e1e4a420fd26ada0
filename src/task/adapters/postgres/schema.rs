//! Diesel schema for task persistence.

diesel::table! {
    /// Reminder task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> Int8,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Calendar due date.
        due_date -> Date,
        /// Priority label.
        #[max_length = 50]
        priority -> Varchar,
        /// Status label.
        #[max_length = 50]
        status -> Varchar,
        /// Recurrence kind; `NULL` for one-shot tasks.
        #[max_length = 20]
        recurring -> Nullable<Varchar>,
        /// Reminder instant.
        reminder -> Timestamptz,
        /// Notification recipient.
        #[max_length = 64]
        recipient -> Varchar,
    }
}
