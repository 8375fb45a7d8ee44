/// Placement record identifiers are random UUIDs assigned at creation.
pub type RecordId = uuid::Uuid;

/// Opaque user identifier supplied by the authentication layer.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Validity windows are date-only.
pub type Date = chrono::NaiveDate;
