/// Pure functions for formatting error and success messages (Discord-agnostic)

/// Format a validation error message with emoji
pub fn format_error(message: &str) -> String {
    format!("❌ {}", message)
}

/// Format a success message with emoji
pub fn format_success(message: &str) -> String {
    format!("✅ {}", message)
}

/// Build the reply sent after a manual nickname fix
pub fn build_name_change(old_name: &str, new_name: &str) -> String {
    format!("Changed their name from `{}` to `{}`.", old_name, new_name)
}

/// Build the reply sent when a nickname needed no fixing
pub fn build_name_unchanged(name: &str) -> String {
    format!("Their name `{}` doesn't need fixing.", name)
}

/// Build the reply for the automatic nickname toggle
pub fn build_auto_fix_toggled(enabled: bool) -> String {
    if enabled {
        format_success("Nicknames will now be fixed automatically when members join or rename.")
    } else {
        format_success("Automatic nickname fixing is now disabled.")
    }
}

/// Build a database error message (generic, doesn't expose internals)
pub fn build_database_error() -> String {
    format_error("A database error occurred. Please try again later.")
}
