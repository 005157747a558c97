/// Handler modules for Discord events
mod member;
mod nickname;

// Re-export main handler functions
pub use member::{handle_member_join, handle_member_update};
pub use nickname::{current_name, fix_member_nickname};
