use log::{debug, warn};
use smallvec::{smallvec, SmallVec};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::fmt::Debug;
use std::fs;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

use crate::types::{GlyphId, WordId};
use crate::{MAX_GLYPH_COUNT, MAX_SLOT_LENGTH};

/// A struct representing a word in the vocabulary.
#[derive(Debug, Clone)]
pub struct Word {
    /// The word as it would appear in a grid -- only uppercase letters or other valid glyphs.
    pub normalized_string: String,

    /// The word as it appears in the user's word list.
    pub canonical_string: String,

    /// The glyph ids making up `normalized_string`.
    pub glyphs: SmallVec<[GlyphId; MAX_SLOT_LENGTH]>,
}

impl Word {
    /// The number of cells this word occupies in a grid.
    #[must_use]
    pub fn length(&self) -> usize {
        self.glyphs.len()
    }
}

/// Given a word from a word list file, turn it into the normalized form used by the solver.
#[must_use]
pub fn normalize_word(canonical: &str) -> String {
    canonical
        .nfc() // Normalize Unicode combining forms
        .flat_map(char::to_uppercase)
        .filter(|c| !c.is_whitespace())
        .collect()
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WordListError {
    #[error("Can’t read file: “{0}”")]
    InvalidPath(String),

    #[error("Word list contains invalid word: “{0}”")]
    InvalidWord(String),
}

/// Configuration describing a source of vocabulary entries.
pub enum WordListSourceConfig {
    Memory {
        id: String,
        words: Vec<String>,
    },
    File {
        id: String,
        path: OsString,
    },
    FileContents {
        id: String,
        contents: &'static str,
    },
}

impl WordListSourceConfig {
    /// The unique, persistent id of this source.
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            WordListSourceConfig::Memory { id, .. }
            | WordListSourceConfig::FileContents { id, .. }
            | WordListSourceConfig::File { id, .. } => id.clone(),
        }
    }
}

#[derive(Debug)]
pub struct WordListSourceState {
    pub id: String,
    pub errors: Vec<WordListError>,
}

/// A single word list entry, before it has been assigned any ids.
struct RawWordListEntry {
    pub normalized: String,
    pub canonical: String,
}

fn parse_raw_entry(line: &str, errors: &mut Vec<WordListError>) -> Option<RawWordListEntry> {
    let canonical = line.trim();
    if canonical.is_empty() {
        return None;
    }

    let normalized = normalize_word(canonical);
    if !normalized.chars().all(char::is_alphanumeric) {
        errors.push(WordListError::InvalidWord(canonical.into()));
        return None;
    }

    Some(RawWordListEntry {
        normalized,
        canonical: canonical.to_string(),
    })
}

fn parse_word_list_file_contents(
    file_contents: &str,
    errors: &mut Vec<WordListError>,
) -> Vec<RawWordListEntry> {
    file_contents
        .lines()
        .filter_map(|line| parse_raw_entry(line, errors))
        .collect()
}

fn load_words_from_source(
    source: &WordListSourceConfig,
) -> (Vec<RawWordListEntry>, WordListSourceState) {
    let id = source.id();
    let mut errors = vec![];

    let entries = match source {
        WordListSourceConfig::Memory { words, .. } => words
            .iter()
            .filter_map(|word| parse_raw_entry(word, &mut errors))
            .collect(),

        WordListSourceConfig::File { path, .. } => {
            if let Ok(contents) = fs::read_to_string(path) {
                parse_word_list_file_contents(&contents, &mut errors)
            } else {
                errors.push(WordListError::InvalidPath(path.to_string_lossy().into()));
                vec![]
            }
        }

        WordListSourceConfig::FileContents { contents, .. } => {
            parse_word_list_file_contents(contents, &mut errors)
        }
    };

    for error in &errors {
        warn!("word list source {id:?}: {error}");
    }

    (entries, WordListSourceState { id, errors })
}

/// A struct representing the loaded vocabulary. Every word gets a stable `WordId` based on the
/// order in which it was first seen across all sources, and every character gets a `GlyphId`.
pub struct WordList {
    /// A list of all characters that occur in any (normalized) word. `GlyphId`s used everywhere
    /// else are indices into this list.
    pub glyphs: SmallVec<[char; MAX_GLYPH_COUNT]>,

    /// The inverse of `glyphs`: a map from a character to the `GlyphId` representing it.
    pub glyph_id_by_char: HashMap<char, GlyphId>,

    /// All loaded words, in load order. A `WordId` is an index into this list.
    pub words: Vec<Word>,

    /// A map from a normalized string to the id of the Word representing it.
    pub word_id_by_string: HashMap<String, WordId>,

    /// The maximum word length provided when configuring the WordList, if any.
    pub max_length: Option<usize>,

    /// The state of each word list source, keyed by source id.
    pub source_states: HashMap<String, WordListSourceState>,
}

impl WordList {
    /// Construct a new `WordList` using the given sources (omitting any entries that are longer than
    /// `max_length`). Words that appear more than once are only loaded the first time.
    #[must_use]
    pub fn new(source_configs: Vec<WordListSourceConfig>, max_length: Option<usize>) -> WordList {
        let mut instance = WordList {
            glyphs: smallvec![],
            glyph_id_by_char: HashMap::new(),
            words: vec![],
            word_id_by_string: HashMap::new(),
            max_length,
            source_states: HashMap::new(),
        };

        for source in &source_configs {
            let (raw_entries, source_state) = load_words_from_source(source);

            for raw_entry in raw_entries {
                if let Some(max_length) = max_length {
                    if raw_entry.normalized.chars().count() > max_length {
                        continue;
                    }
                }
                if instance.word_id_by_string.contains_key(&raw_entry.normalized) {
                    continue;
                }
                instance.add_word(&raw_entry);
            }

            instance
                .source_states
                .insert(source_state.id.clone(), source_state);
        }

        debug!(
            "Loaded {} words over {} glyphs from {} source(s)",
            instance.words.len(),
            instance.glyphs.len(),
            source_configs.len()
        );

        instance
    }

    /// Build a `WordList` from a single in-memory list of words.
    #[must_use]
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> WordList {
        WordList::new(
            vec![WordListSourceConfig::Memory {
                id: "0".into(),
                words: words.iter().map(|word| word.as_ref().to_string()).collect(),
            }],
            None,
        )
    }

    /// Build a `WordList` from a single word list file, returning an error if it can't be read or
    /// contains invalid entries.
    pub fn from_file(
        path: impl Into<OsString>,
        max_length: Option<usize>,
    ) -> Result<WordList, WordListError> {
        let word_list = WordList::new(
            vec![WordListSourceConfig::File {
                id: "0".into(),
                path: path.into(),
            }],
            max_length,
        );

        if let Some(error) = word_list
            .source_states
            .get("0")
            .and_then(|state| state.errors.first())
        {
            return Err(error.clone());
        }

        Ok(word_list)
    }

    fn add_word(&mut self, raw_entry: &RawWordListEntry) -> WordId {
        let glyphs: SmallVec<[GlyphId; MAX_SLOT_LENGTH]> = raw_entry
            .normalized
            .chars()
            .map(|c| self.glyph_id_for_char(c))
            .collect();

        let word_id = self.words.len();
        self.words.push(Word {
            normalized_string: raw_entry.normalized.clone(),
            canonical_string: raw_entry.canonical.clone(),
            glyphs,
        });
        self.word_id_by_string
            .insert(raw_entry.normalized.clone(), word_id);

        word_id
    }

    /// What's the unique glyph id for the given char? We do this lazily, instead of mapping a
    /// fixed alphabet up front, because word list entries may also contain digits or non-English
    /// letters.
    pub fn glyph_id_for_char(&mut self, ch: char) -> GlyphId {
        self.glyph_id_by_char.get(&ch).copied().unwrap_or_else(|| {
            self.glyphs.push(ch);
            let id = self.glyphs.len() - 1;
            self.glyph_id_by_char.insert(ch, id);
            id
        })
    }

    /// Borrow an existing word using its id.
    #[must_use]
    pub fn get_word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    /// Look up the id of a word, normalizing it first.
    #[must_use]
    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.word_id_by_string.get(&normalize_word(word)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// For each source, return any errors it emitted while loading.
    #[must_use]
    pub fn get_source_errors(&self) -> HashMap<String, Vec<WordListError>> {
        self.source_states
            .iter()
            .map(|(source_id, source_state)| (source_id.clone(), source_state.errors.clone()))
            .collect()
    }
}

impl Debug for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordList")
            .field("glyphs", &self.glyphs)
            .field("words", &self.words.len())
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub mod tests {
    use crate::word_list::{normalize_word, WordList, WordListError, WordListSourceConfig};
    use std::path;
    use std::path::PathBuf;

    #[must_use]
    pub fn resource_path(name: &str) -> PathBuf {
        let mut path = path::PathBuf::from(file!());
        path.pop();
        path.pop();
        path.push("resources");
        path.push(name);
        path
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("cat"), "CAT");
        assert_eq!(normalize_word(" ice cream "), "ICECREAM");
        assert_eq!(normalize_word("Ångström"), "ÅNGSTRÖM");
    }

    #[test]
    fn test_loads_words_from_file() {
        let word_list =
            WordList::from_file(resource_path("words0.txt"), None).expect("words0.txt loads");

        assert!(!word_list.is_empty());
        assert!(word_list.get_source_errors()["0"].is_empty());

        let word_id = word_list.word_id("seven").expect("vocabulary should include SEVEN");
        let word = word_list.get_word(word_id);
        assert_eq!(word.normalized_string, "SEVEN");
        assert_eq!(word.length(), 5);
        assert_eq!(word.glyphs[1], word.glyphs[3], "both Es share a glyph");
    }

    #[test]
    fn test_respects_max_length() {
        let word_list =
            WordList::from_file(resource_path("words0.txt"), Some(3)).expect("words0.txt loads");

        assert!(word_list.words.iter().all(|word| word.length() <= 3));
        assert!(word_list.word_id("one").is_some());
        assert!(word_list.word_id("seven").is_none());
    }

    #[test]
    fn test_duplicates_keep_first_id() {
        let word_list = WordList::new(
            vec![
                WordListSourceConfig::Memory {
                    id: "0".into(),
                    words: vec!["dog".into(), "cat".into(), "DOG".into()],
                },
                WordListSourceConfig::FileContents {
                    id: "1".into(),
                    contents: "cat\n\nemu\n",
                },
            ],
            None,
        );

        assert_eq!(word_list.len(), 3);
        assert_eq!(word_list.word_id("dog"), Some(0));
        assert_eq!(word_list.word_id("cat"), Some(1));
        assert_eq!(word_list.word_id("emu"), Some(2));
    }

    #[test]
    fn test_unusual_characters() {
        let word_list = WordList::from_words(&["monsutâ", "héllo", "r2d2"]);

        assert_eq!(word_list.len(), 3);
        assert_eq!(
            word_list
                .words
                .iter()
                .map(|word| word.length())
                .collect::<Vec<_>>(),
            vec![7, 5, 4]
        );
    }

    #[test]
    fn test_source_errors() {
        let word_list = WordList::new(
            vec![
                WordListSourceConfig::Memory {
                    id: "0".into(),
                    words: vec!["fine".into(), "not-fine".into()],
                },
                WordListSourceConfig::File {
                    id: "1".into(),
                    path: resource_path("does-not-exist.txt").into(),
                },
            ],
            None,
        );

        let errors = word_list.get_source_errors();
        assert_eq!(
            errors["0"],
            vec![WordListError::InvalidWord("not-fine".into())]
        );
        assert!(matches!(errors["1"][..], [WordListError::InvalidPath(_)]));
        assert_eq!(word_list.len(), 1);

        WordList::from_file(resource_path("does-not-exist.txt"), None)
            .expect_err("missing file should be an error");
    }
}
