//! The domain store: the current set of candidate words for each variable. It is owned by a
//! single solve attempt and handed to the consistency and search code by reference.

use crate::grid_config::GridConfig;
use crate::types::{VariableId, WordId};

/// Candidate words for each variable, indexed by `VariableId`. Each domain keeps its words in
/// vocabulary order, which is the order value ordering falls back to on ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    options: Vec<Vec<WordId>>,
}

impl Domains {
    /// Seed every variable's domain with the full vocabulary.
    #[must_use]
    pub fn initialize(config: &GridConfig) -> Domains {
        let all_words: Vec<WordId> = (0..config.word_list.len()).collect();

        Domains {
            options: vec![all_words; config.variable_count()],
        }
    }

    /// Build a domain store directly from per-variable options.
    #[must_use]
    pub fn from_options(options: Vec<Vec<WordId>>) -> Domains {
        Domains { options }
    }

    #[must_use]
    pub fn get(&self, variable_id: VariableId) -> &[WordId] {
        &self.options[variable_id]
    }

    #[must_use]
    pub fn option_count(&self, variable_id: VariableId) -> usize {
        self.options[variable_id].len()
    }

    /// Is `word_id` still a candidate for the variable? This is a linear scan.
    #[must_use]
    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.options[variable_id].contains(&word_id)
    }

    #[must_use]
    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.options[variable_id].is_empty()
    }

    /// Has any variable run out of candidates?
    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.options.iter().any(Vec::is_empty)
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.options.len()
    }

    /// Keep only the candidates for which `keep` returns true, preserving order, and return the
    /// number of candidates removed.
    pub fn retain<F>(&mut self, variable_id: VariableId, keep: F) -> usize
    where
        F: FnMut(&WordId) -> bool,
    {
        let options = &mut self.options[variable_id];
        let before = options.len();
        options.retain(keep);
        before - options.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::domains::Domains;
    use crate::grid_config::generate_grid_config_from_file;
    use crate::word_list::tests::resource_path;
    use crate::word_list::WordList;

    #[test]
    fn test_initialize_seeds_full_vocabulary() {
        let word_list = WordList::from_file(resource_path("words0.txt"), None).unwrap();
        let word_count = word_list.len();
        let grid_config =
            generate_grid_config_from_file(word_list, resource_path("structure0.txt")).unwrap();

        let domains = Domains::initialize(&grid_config);

        assert_eq!(domains.variable_count(), 4);
        for variable_id in 0..4 {
            assert_eq!(domains.get(variable_id), (0..word_count).collect::<Vec<_>>());
        }
        assert!(!domains.any_empty());
    }

    #[test]
    fn test_retain_preserves_order() {
        let mut domains = Domains::from_options(vec![vec![0, 1, 2, 3, 4], vec![]]);

        assert_eq!(domains.retain(0, |&word_id| word_id % 2 == 0), 2);
        assert_eq!(domains.get(0), &[0, 2, 4]);
        assert!(domains.contains(0, 4));
        assert!(!domains.contains(0, 3));
        assert!(domains.is_empty(1));
        assert!(domains.any_empty());
    }
}
