/// Default location of the persisted letter replacement table
pub const DEFAULT_LETTER_REPLACEMENTS_PATH: &str = "config/letter_replacements.json";

/// Plain-text list of names used when a nickname can't be fixed
pub const DEFAULT_FALLBACK_NAMES_URL: &str =
    "https://raw.githubusercontent.com/skjorrface/animals.txt/master/animals.txt";

/// Remote service that renders chat logs as HTML
pub const DEFAULT_CHATLOG_API_URL: &str = "https://voxelfox.co.uk/discord/chatlog";

/// Timeout applied to outgoing HTTP requests, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Number of messages exported by `createlog` when no amount is given
pub const DEFAULT_LOG_AMOUNT: i64 = 100;

/// Maximum number of messages Discord returns per history request
pub const MESSAGES_PER_PAGE: u8 = 100;

/// Log directive for the application
pub const LOG_DIRECTIVE: &str = "nickbot_rs=info";
