//! Domain-level constants.
//!
//! Column widths mirror the persisted schema. They are the wire contract for
//! existing data, so changing one requires a migration.

// =============================================================================
// User
// =============================================================================

/// Maximum length of a user's first or last name
pub const USER_NAME_MAX_LEN: usize = 32;

/// Maximum length of a user's email address
pub const USER_EMAIL_MAX_LEN: usize = 64;

/// Width of the stored password hash column
pub const PASSWORD_HASH_MAX_LEN: usize = 255;

// =============================================================================
// Child
// =============================================================================

/// Maximum length of a child's picture URL
pub const PIC_URL_MAX_LEN: usize = 3000;

/// Maximum length of a child's first, last or nick name
pub const CHILD_NAME_MAX_LEN: usize = 32;

/// Maximum length of a child's nationality
pub const NATIONALITY_MAX_LEN: usize = 200;

/// Maximum length of a child's school year
pub const SCHOOL_YEAR_MAX_LEN: usize = 50;

/// Days counted as one year when deriving a child's age
pub const DAYS_PER_YEAR: i64 = 365;
pub const SECONDS_PER_DAY: i64 = 86_400;

// =============================================================================
// Guardian / Godparent
// =============================================================================

/// Maximum length of a guardian type ("mother", "uncle", ...)
pub const GUARDIAN_TYPE_MAX_LEN: usize = 50;

/// Maximum length of a guardian's first or last name
pub const GUARDIAN_NAME_MAX_LEN: usize = 32;

/// Maximum length of a godparent's first or last name
pub const GODPARENT_NAME_MAX_LEN: usize = 32;

/// Maximum length of a godparent's email address
pub const GODPARENT_EMAIL_MAX_LEN: usize = 64;

// =============================================================================
// Message
// =============================================================================

/// Maximum length of a message body
pub const TEXT_CONTENT_MAX_LEN: usize = 8000;
