pub mod arc_consistency;
pub mod backtracking_search;
pub mod domains;
pub mod grid_config;
pub mod types;
pub mod util;
pub mod word_list;

pub use backtracking_search::{find_fill, solve, Assignment, FillFailure, FillOptions};
pub use grid_config::{Direction, GridConfig, StructureError, Variable};
pub use word_list::{WordList, WordListSourceConfig};

pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// The expected maximum number of distinct characters appearing in a vocabulary.
pub const MAX_GLYPH_COUNT: usize = 64;

/// The expected maximum length for a single variable.
pub const MAX_SLOT_LENGTH: usize = 21;
