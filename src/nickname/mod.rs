/// Nickname normalization: replacement table, decorative marks and fallback names
mod error;
mod fallback;
mod marks;
mod normalizer;
mod replacements;

use std::sync::Arc;

pub use error::NicknameError;
pub use fallback::FallbackNamePool;
pub use marks::DECORATIVE_MARKS;
pub use normalizer::{NameFix, normalize};
pub use replacements::{ReplacementStore, ReplacementTable};

/// Fixes names using the persisted replacement table and the remote fallback list
pub struct NameFixer {
    replacements: ReplacementStore,
    fallback_names: FallbackNamePool,
}

impl NameFixer {
    pub fn new(replacements: ReplacementStore, fallback_names: FallbackNamePool) -> Self {
        Self {
            replacements,
            fallback_names,
        }
    }

    /// Normalize a name, fetching fallback names only when they are needed
    pub async fn fix_name(&self, name: &str) -> Result<NameFix, NicknameError> {
        let table = self.replacements.load().await?;
        normalize(name, &table, DECORATIVE_MARKS, || self.fallback_names.names()).await
    }

    /// Map the characters of `old_phrase` onto `new_phrase` and persist the table
    pub async fn add_replacements(
        &self,
        old_phrase: &str,
        new_phrase: &str,
    ) -> Result<Arc<ReplacementTable>, NicknameError> {
        self.replacements.merge(old_phrase, new_phrase).await
    }
}
