// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Ladle";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "ladle";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".ladle";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "ladle.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "LADLE_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "LADLE_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "LADLE_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "LADLE_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "LADLE_LOG";

/// Environment variable for the public base URL (short links)
pub const ENV_PUBLIC_URL: &str = "LADLE_PUBLIC_URL";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "LADLE_DATA_DIR";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "ladle.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for general API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for recipe create/update (8 MB - images travel inline as base64)
pub const RECIPE_BODY_LIMIT: usize = 8 * 1024 * 1024;

// =============================================================================
// Recipe Bounds
// =============================================================================

/// Minimum cooking time in minutes
pub const MIN_COOKING_TIME: i64 = 1;

/// Maximum cooking time in minutes
pub const MAX_COOKING_TIME: i64 = 10_000;

/// Minimum ingredient amount per recipe
pub const MIN_INGREDIENT_AMOUNT: i64 = 1;

/// Maximum ingredient amount per recipe
pub const MAX_INGREDIENT_AMOUNT: i64 = 10_000;

/// Maximum length for recipe, ingredient, and tag names
pub const NAME_MAX_LEN: usize = 64;

/// Maximum length for measurement units and tag slugs
pub const UNIT_MAX_LEN: usize = 64;

// =============================================================================
// Users
// =============================================================================

/// Maximum email length
pub const EMAIL_MAX_LEN: usize = 254;

/// Maximum username and display-name length
pub const USERNAME_MAX_LEN: usize = 150;

// =============================================================================
// Short Links
// =============================================================================

/// Length of a short-link token in hex characters
pub const SHORT_LINK_LENGTH: usize = 8;

/// Path prefix for short-link redirects
pub const SHORT_LINK_PREFIX: &str = "/s";

// =============================================================================
// Identity Header
// =============================================================================

/// Header carrying the caller's user id, injected by the upstream identity layer
pub const USER_ID_HEADER: &str = "x-user-id";

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds (5 minutes)
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 300;
