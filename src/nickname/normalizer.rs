use std::future::Future;
use std::sync::Arc;

use super::error::NicknameError;
use super::fallback::pick_random;
use super::marks::strip_marks;
use super::replacements::ReplacementTable;

/// Outcome of fixing a single name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameFix {
    pub original: String,
    pub fixed: String,
}

impl NameFix {
    /// Whether the fixed name differs from the original, i.e. a rename is needed
    pub fn changed(&self) -> bool {
        self.original != self.fixed
    }
}

/// Check if a name contains at least one ASCII letter or digit
pub fn has_recognizable_characters(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Translate a name and strip its marks
///
/// Returns `None` when nothing recognizable is left, in which case the caller
/// needs a fallback name.
pub fn clean_name(input_name: &str, table: &ReplacementTable, marks: &[char]) -> Option<String> {
    let translated = table.translate(input_name);
    let candidate = strip_marks(&translated, marks);
    has_recognizable_characters(&candidate).then_some(candidate)
}

/// Produce a display name free of decorative marks with at least one ASCII letter or digit
///
/// `fallback_names` is only awaited when the cleaned name has nothing
/// recognizable left; its error is returned as-is.
pub async fn normalize<F, Fut>(
    input_name: &str,
    table: &ReplacementTable,
    marks: &[char],
    fallback_names: F,
) -> Result<NameFix, NicknameError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Arc<Vec<String>>, NicknameError>>,
{
    let fixed = match clean_name(input_name, table, marks) {
        Some(name) => name,
        None => {
            let names = fallback_names().await?;
            pick_random(&names)?
        }
    };

    Ok(NameFix {
        original: input_name.to_string(),
        fixed,
    })
}
