/// Pure functions for automatic nickname policy (Discord-agnostic)

/// The parts of a guild member the nickname policy looks at
#[derive(Clone, Debug)]
pub struct NameSubject {
    pub id: u64,
    pub display_name: String,
    pub can_manage_nicknames: bool,
}

/// Why an automatic nickname fix was skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    Disabled,
    NameUnchanged,
    CanManageNicknames,
    RenamedByModerator,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Disabled => write!(f, "automatic nickname updates are disabled"),
            SkipReason::NameUnchanged => write!(f, "display name did not change"),
            SkipReason::CanManageNicknames => write!(f, "member can manage nicknames"),
            SkipReason::RenamedByModerator => write!(f, "name was changed by a moderator"),
        }
    }
}

/// Check if a display name changed; an unknown previous name counts as a change
pub fn display_name_changed(old_display_name: Option<&str>, new_display_name: &str) -> bool {
    old_display_name != Some(new_display_name)
}

/// Decide whether a member update should be skipped before consulting the audit log
pub fn member_update_skip_reason(
    auto_fix_enabled: bool,
    old_display_name: Option<&str>,
    subject: &NameSubject,
) -> Option<SkipReason> {
    if !auto_fix_enabled {
        return Some(SkipReason::Disabled);
    }
    if !display_name_changed(old_display_name, &subject.display_name) {
        return Some(SkipReason::NameUnchanged);
    }
    if subject.can_manage_nicknames {
        return Some(SkipReason::CanManageNicknames);
    }
    None
}

/// Check if the latest member-update audit entry is someone else renaming this member
///
/// `latest_update` is `(target_id, actor_id)` of the most recent entry.
pub fn renamed_by_moderator(subject: &NameSubject, latest_update: Option<(u64, u64)>) -> bool {
    matches!(latest_update, Some((target_id, actor_id)) if target_id == subject.id && actor_id != subject.id)
}
