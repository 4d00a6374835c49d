pub mod comment;
pub mod document;
pub mod post;
pub mod user;

use chrono::Local;

/// Timestamp format shown next to posts and comments, e.g. `14:05 21.03.2024`.
pub const TIMESTAMP_FORMAT: &str = "%H:%M %d.%m.%Y";

/// Fallback name for entities whose author is no longer in the document.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

pub fn timestamp() -> String {
	Local::now().format(TIMESTAMP_FORMAT).to_string()
}
