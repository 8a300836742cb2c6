/// Movie identifiers are UUIDv7, generated by the store on insert, so their
/// natural order follows insertion order.
pub type MovieId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
