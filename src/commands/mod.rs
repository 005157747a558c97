// Command modules
mod nickname;
mod settings;
mod user_info;

// Re-export all commands
pub use nickname::{addfixableletters, addfixablename, fixunzalgoname};
pub use settings::autonickname;
pub use user_info::{avatar, createlog};
