/// Utility modules for common functionality
pub mod messages;
pub mod permissions;
pub mod validation;
