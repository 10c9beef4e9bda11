/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Catalog-wide unique identifier of a selectable option.
pub type OptionId = i64;

/// Identifier of an option group.
pub type GroupId = i64;
