use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::error::NicknameError;

/// Character substitutions applied to a nickname before it is cleaned
///
/// Persisted as a JSON object of single-character keys to replacement strings.
/// Characters without an entry are left as they are, which keeps ASCII letters,
/// digits, punctuation and whitespace mapped to themselves unless overridden.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct ReplacementTable {
    entries: BTreeMap<char, String>,
}

impl ReplacementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the replacement configured for a character
    pub fn get(&self, c: char) -> Option<&str> {
        self.entries.get(&c).map(String::as_str)
    }

    /// Set the replacement for a character, overwriting any previous entry
    pub fn insert(&mut self, from: char, to: impl Into<String>) {
        self.entries.insert(from, to.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map each character of `old_phrase` to the character at the same position in `new_phrase`
    ///
    /// Later positions win when a character repeats. Nothing is changed when the
    /// phrases have a different number of characters.
    pub fn merge_phrases(&mut self, old_phrase: &str, new_phrase: &str) -> Result<(), NicknameError> {
        check_phrase_lengths(old_phrase, new_phrase)?;
        for (from, to) in old_phrase.chars().zip(new_phrase.chars()) {
            self.entries.insert(from, to.to_string());
        }
        Ok(())
    }

    /// Rewrite every character that has an entry, in a single pass
    pub fn translate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.entries.get(&c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        out
    }
}

impl TryFrom<BTreeMap<String, String>> for ReplacementTable {
    type Error = String;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for (key, value) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    entries.insert(c, value);
                }
                _ => return Err(format!("key {:?} is not a single character", key)),
            }
        }
        Ok(Self { entries })
    }
}

impl From<ReplacementTable> for BTreeMap<String, String> {
    fn from(table: ReplacementTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(c, replacement)| (c.to_string(), replacement))
            .collect()
    }
}

/// Fail with a length mismatch unless both phrases have the same number of characters
pub fn check_phrase_lengths(old_phrase: &str, new_phrase: &str) -> Result<(), NicknameError> {
    let expected = old_phrase.chars().count();
    let got = new_phrase.chars().count();
    if expected != got {
        return Err(NicknameError::LengthMismatch { expected, got });
    }
    Ok(())
}

/// File-backed replacement table with a memoized in-memory copy
///
/// The cache is populated at most once at a time and dropped after every
/// successful merge so the next read comes from disk.
pub struct ReplacementStore {
    path: PathBuf,
    cached: Mutex<Option<Arc<ReplacementTable>>>,
}

impl ReplacementStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the replacement table, reading it from disk on first use
    pub async fn load(&self) -> Result<Arc<ReplacementTable>, NicknameError> {
        let mut cached = self.cached.lock().await;
        if let Some(table) = cached.as_ref() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(read_table(&self.path).await?);
        info!(
            "Loaded {} letter replacements from {}",
            table.len(),
            self.path.display()
        );
        *cached = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Merge two equal-length phrases into the table and persist it
    ///
    /// On a failed write the previously cached table stays in place.
    pub async fn merge(
        &self,
        old_phrase: &str,
        new_phrase: &str,
    ) -> Result<Arc<ReplacementTable>, NicknameError> {
        check_phrase_lengths(old_phrase, new_phrase)?;

        let mut cached = self.cached.lock().await;
        let mut merged = match cached.as_ref() {
            Some(table) => (**table).clone(),
            None => read_table(&self.path).await?,
        };
        merged.merge_phrases(old_phrase, new_phrase)?;

        if let Err(e) = write_table(&self.path, &merged).await {
            warn!("Failed to write letter replacements: {}", e);
            return Err(e);
        }

        *cached = None;
        info!(
            "Wrote {} letter replacements to {}",
            merged.len(),
            self.path.display()
        );
        Ok(Arc::new(merged))
    }

    /// Drop the cached table so the next read reloads it
    #[cfg(test)]
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

async fn read_table(path: &Path) -> Result<ReplacementTable, NicknameError> {
    let load_error = |reason: String| NicknameError::ConfigLoad {
        path: path.to_path_buf(),
        reason,
    };
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| load_error(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| load_error(e.to_string()))
}

/// Temporary file next to `path`, unique per process and per write
fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(format!(
        "json.{}.{:08x}.tmp",
        std::process::id(),
        rand::random::<u32>()
    ))
}

/// Write the table next to its destination, then rename it into place
async fn write_table(path: &Path, table: &ReplacementTable) -> Result<(), NicknameError> {
    let write_error = |reason: String| NicknameError::ConfigWrite {
        path: path.to_path_buf(),
        reason,
    };
    let text = serde_json::to_string(table).map_err(|e| write_error(e.to_string()))?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| write_error(e.to_string()))?;
    }
    let tmp = temp_path(path);
    let written = match tokio::fs::write(&tmp, text).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_error(e.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(char, &str)]) -> ReplacementTable {
        let mut table = ReplacementTable::new();
        for (from, to) in pairs {
            table.insert(*from, *to);
        }
        table
    }

    fn store_with(contents: &str) -> (tempfile::TempDir, ReplacementStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letter_replacements.json");
        std::fs::write(&path, contents).unwrap();
        (dir, ReplacementStore::new(path))
    }

    #[test]
    fn test_translate() {
        let t = table(&[('a', "4"), ('b', "8")]);
        assert_eq!(t.translate("abc"), "48c");
        assert_eq!(t.translate(""), "");
    }

    #[test]
    fn test_translate_multi_char_replacement() {
        let t = table(&[('æ', "ae"), ('Ⓐ', "A")]);
        assert_eq!(t.translate("Ⓐlæx"), "Alaex");
    }

    #[test]
    fn test_translate_leaves_unmapped_characters() {
        let t = table(&[('𝓪', "a")]);
        assert_eq!(t.translate("𝓪 é!"), "a é!");
    }

    #[test]
    fn test_merge_phrases() {
        let mut t = ReplacementTable::new();
        t.merge_phrases("𝓪𝓫", "ab").unwrap();
        assert_eq!(t.get('𝓪'), Some("a"));
        assert_eq!(t.get('𝓫'), Some("b"));
    }

    #[test]
    fn test_merge_phrases_last_write_wins() {
        let mut t = ReplacementTable::new();
        t.merge_phrases("aa", "xy").unwrap();
        assert_eq!(t.get('a'), Some("y"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_merge_phrases_length_mismatch() {
        let mut t = table(&[('q', "k")]);
        let before = t.clone();

        let err = t.merge_phrases("ab", "c").unwrap_err();
        assert!(matches!(err, NicknameError::LengthMismatch { expected: 2, got: 1 }));
        assert_eq!(t, before);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        assert!(check_phrase_lengths("é", "e").is_ok());
        assert!(check_phrase_lengths("𝓪𝓫", "a").is_err());
    }

    #[test]
    fn test_deserialize_rejects_multi_char_keys() {
        let result: Result<ReplacementTable, _> = serde_json::from_str(r#"{"ab": "c"}"#);
        assert!(result.is_err());

        let result: Result<ReplacementTable, _> = serde_json::from_str(r#"{"": "c"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_shape() {
        let t = table(&[('ä', "a"), ('ß', "ss")]);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json, serde_json::json!({"ä": "a", "ß": "ss"}));
    }

    #[tokio::test]
    async fn test_load_and_cache() {
        let (_dir, store) = store_with(r#"{"𝓪": "a"}"#);

        let first = store.load().await.unwrap();
        assert_eq!(first.get('𝓪'), Some("a"));

        // Cached copy survives the file changing underneath it
        std::fs::write(store.path(), r#"{"𝓫": "b"}"#).unwrap();
        let second = store.load().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        store.invalidate().await;
        let third = store.load().await.unwrap();
        assert_eq!(third.get('𝓫'), Some("b"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let store = ReplacementStore::new(&path);

        assert!(matches!(
            store.load().await,
            Err(NicknameError::ConfigLoad { .. })
        ));

        std::fs::write(&path, r#"{"ø": "o"}"#).unwrap();
        let table = store.load().await.unwrap();
        assert_eq!(table.get('ø'), Some("o"));
    }

    #[tokio::test]
    async fn test_load_corrupt_file() {
        let (_dir, store) = store_with("{not json");
        assert!(matches!(
            store.load().await,
            Err(NicknameError::ConfigLoad { .. })
        ));
    }

    #[tokio::test]
    async fn test_merge_round_trip() {
        let (_dir, store) = store_with(r#"{"𝓪": "a"}"#);
        store.load().await.unwrap();

        let merged = store.merge("𝓫𝓬", "bc").await.unwrap();
        let reloaded = store.load().await.unwrap();
        assert_eq!(*reloaded, *merged);
        assert_eq!(reloaded.get('𝓪'), Some("a"));
        assert_eq!(reloaded.get('𝓬'), Some("c"));

        let on_disk: ReplacementTable =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk, *merged);
        assert_eq!(std::fs::read_dir(store.path().parent().unwrap()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_merge_length_mismatch_leaves_file() {
        let (_dir, store) = store_with(r#"{"𝓪": "a"}"#);

        let err = store.merge("ab", "c").await.unwrap_err();
        assert!(matches!(err, NicknameError::LengthMismatch { .. }));
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            r#"{"𝓪": "a"}"#
        );
    }

    #[tokio::test]
    async fn test_merge_write_failure_keeps_cache() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("letter_replacements.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("placeholder"), "x").unwrap();
        let store = ReplacementStore::new(&path);
        *store.cached.lock().await = Some(Arc::new(table(&[('𝓪', "a")])));

        let err = store.merge("𝓫", "b").await.unwrap_err();
        assert!(matches!(err, NicknameError::ConfigWrite { .. }));
        // Only the blocking directory is left behind
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

        let cached = store.load().await.unwrap();
        assert_eq!(cached.get('𝓪'), Some("a"));
        assert_eq!(cached.get('𝓫'), None);
    }

    #[test]
    fn test_temp_path_is_unique_sibling() {
        let path = Path::new("config/letter_replacements.json");
        let first = temp_path(path);
        let second = temp_path(path);

        assert_ne!(first, second);
        assert_eq!(first.parent(), path.parent());
        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(&format!("letter_replacements.json.{}.", std::process::id())));
        assert!(name.ends_with(".tmp"));
    }

    #[tokio::test]
    async fn test_concurrent_merges_from_separate_stores() {
        let (dir, first) = store_with("{}");
        let second = ReplacementStore::new(dir.path().join("letter_replacements.json"));

        let (a, b) = tokio::join!(first.merge("𝓪", "a"), second.merge("𝓫", "b"));
        let (a, b) = (a.unwrap(), b.unwrap());

        // Whichever write landed last, the file holds one complete merged table
        let on_disk: ReplacementTable =
            serde_json::from_str(&std::fs::read_to_string(first.path()).unwrap()).unwrap();
        assert!(on_disk == *a || on_disk == *b);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_load_shares_table() {
        let (_dir, store) = store_with(r#"{"𝓪": "a"}"#);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.load().await.unwrap() })
            })
            .collect();

        let mut tables = Vec::new();
        for handle in handles {
            tables.push(handle.await.unwrap());
        }
        assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
