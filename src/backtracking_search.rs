//! This module implements grid-filling as a chronological backtracking search over the domains
//! left behind by node consistency and AC-3. Variables are chosen with the minimum-remaining-values
//! heuristic (falling back to the degree heuristic on ties), and each variable's candidates are
//! tried in least-constraining-value order.
//!
//! Domains aren't narrowed during the search itself; every tentative choice is just checked
//! against the choices already made.

use log::{debug, info};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::arc_consistency::{
    enforce_node_consistency, establish_arc_consistency, ArcConsistencyFailure,
    ArcConsistencyStatistics,
};
use crate::domains::Domains;
use crate::grid_config::{Choice, GridConfig};
use crate::types::{VariableId, WordId};
use crate::util::{build_glyph_counts, GlyphCounts};
use crate::CHECK_INVARIANTS;

/// How many times should we loop before checking whether we've passed our deadline or been asked
/// to abort?
pub const INTERRUPT_FREQUENCY: usize = 10;

/// A partial or complete mapping from variables to words. Iteration is in `VariableId` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    words: BTreeMap<VariableId, WordId>,
}

impl Assignment {
    #[must_use]
    pub fn new() -> Assignment {
        Assignment::default()
    }

    #[must_use]
    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.words.get(&variable_id).copied()
    }

    /// Assign a word to a variable, returning the word it replaced, if any.
    pub fn insert(&mut self, variable_id: VariableId, word_id: WordId) -> Option<WordId> {
        self.words.insert(variable_id, word_id)
    }

    pub fn remove(&mut self, variable_id: VariableId) -> Option<WordId> {
        self.words.remove(&variable_id)
    }

    #[must_use]
    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.words.contains_key(&variable_id)
    }

    /// Is the given word assigned to any variable?
    #[must_use]
    pub fn uses_word(&self, word_id: WordId) -> bool {
        self.words.values().any(|&assigned| assigned == word_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.words
            .iter()
            .map(|(&variable_id, &word_id)| (variable_id, word_id))
    }

    /// The assignment as a list of choices, e.g. for rendering.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        self.iter()
            .map(|(variable_id, word_id)| Choice {
                variable_id,
                word_id,
            })
            .collect()
    }
}

/// Limits on a fill attempt. The defaults impose no limits, so the search runs until it either
/// finds a fill or exhausts every possibility.
#[derive(Debug, Clone, Default)]
pub struct FillOptions {
    /// Give up once this much time has passed.
    pub timeout: Option<Duration>,

    /// Give up after visiting this many search states.
    pub max_states: Option<usize>,

    /// Give up as soon as this flag is set, e.g. from another thread.
    pub abort: Option<Arc<AtomicBool>>,
}

/// A struct tracking stats about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: usize,
    pub backtracks: usize,
    pub node_consistency_eliminations: usize,
    pub arc_consistency: ArcConsistencyStatistics,
    pub total_time: Duration,
    pub arc_consistency_time: Duration,
    pub search_time: Duration,
}

/// A struct representing the results of a successful fill operation.
#[derive(Debug, Clone)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

/// An enum representing the possible failure modes of a fill operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillFailure {
    /// Every possibility was exhausted; the grid can't be filled from this vocabulary.
    HardFailure,
    Timeout,
    Abort,
    ExceededStateLimit(usize),
}

/// Does every variable in the grid have a word?
#[must_use]
pub fn assignment_complete(config: &GridConfig, assignment: &Assignment) -> bool {
    (0..config.variable_count()).all(|variable_id| assignment.contains(variable_id))
}

/// Is it possible to assign `word_id` to `variable_id` on top of the choices in `assignment`,
/// assuming those choices are consistent with each other? The word needs to have the variable's
/// length, can't already be used elsewhere, and has to agree with every assigned crossing.
#[must_use]
pub fn is_choice_consistent(
    config: &GridConfig,
    assignment: &Assignment,
    variable_id: VariableId,
    word_id: WordId,
) -> bool {
    let word = config.word(word_id);

    if word.length() != config.variable(variable_id).length {
        return false;
    }

    if assignment
        .iter()
        .any(|(other_id, other_word_id)| other_id != variable_id && other_word_id == word_id)
    {
        return false;
    }

    config.crossings[variable_id].iter().all(|crossing| {
        let Some(other_word_id) = assignment.get(crossing.other_variable_id) else {
            return true;
        };
        let glyph = word.glyphs.get(crossing.cell_idx);
        glyph.is_some()
            && glyph
                == config
                    .word(other_word_id)
                    .glyphs
                    .get(crossing.other_cell_idx)
    })
}

/// Check a (possibly partial) assignment from scratch: every word has its variable's length, no
/// word is used twice, and every pair of assigned crossing variables agrees on the shared cell.
///
/// Distinctness covers the whole assignment, not just crossing pairs: two entries that never meet
/// still can't share a word.
#[must_use]
pub fn consistent(config: &GridConfig, assignment: &Assignment) -> bool {
    let mut used_words: HashSet<WordId> = HashSet::with_capacity(assignment.len());

    for (variable_id, word_id) in assignment.iter() {
        if !used_words.insert(word_id) {
            return false;
        }

        let word = config.word(word_id);
        if word.length() != config.variable(variable_id).length {
            return false;
        }

        for crossing in &config.crossings[variable_id] {
            let Some(other_word_id) = assignment.get(crossing.other_variable_id) else {
                continue;
            };
            let glyph = word.glyphs.get(crossing.cell_idx);
            let other_glyph = config
                .word(other_word_id)
                .glyphs
                .get(crossing.other_cell_idx);
            if glyph.is_none() || glyph != other_glyph {
                return false;
            }
        }
    }

    true
}

/// Choose the next variable to fill: the unassigned variable with the fewest remaining options,
/// preferring the one with the most neighbors on a tie, and then the lowest id. Returns `None` if
/// every variable is assigned.
#[must_use]
pub fn select_unassigned_variable(
    config: &GridConfig,
    domains: &Domains,
    assignment: &Assignment,
) -> Option<VariableId> {
    (0..config.variable_count())
        .filter(|&variable_id| !assignment.contains(variable_id))
        .min_by_key(|&variable_id| {
            (
                domains.option_count(variable_id),
                Reverse(config.neighbor_count(variable_id)),
            )
        })
}

/// What we need to know about one unassigned neighbor to score candidates against it.
struct NeighborSummary {
    /// The candidate's cell index for the shared cell.
    cell_idx: usize,

    /// Glyph counts at the shared cell across the neighbor's domain.
    glyph_counts: GlyphCounts,

    option_count: usize,
    options: HashSet<WordId>,
}

/// Return the variable's domain ordered by how many options each candidate would rule out among
/// its unassigned neighbors, fewest first. Against each neighbor, a candidate rules out one option
/// for every word equal to the candidate and one more for every word disagreeing on the shared
/// cell, so an equal word that also disagrees counts twice. Ties keep domain order.
#[must_use]
pub fn order_domain_values(
    config: &GridConfig,
    domains: &Domains,
    variable_id: VariableId,
    assignment: &Assignment,
) -> Vec<WordId> {
    let neighbors: Vec<NeighborSummary> = config.crossings[variable_id]
        .iter()
        .filter(|crossing| !assignment.contains(crossing.other_variable_id))
        .map(|crossing| {
            let options = domains.get(crossing.other_variable_id);
            NeighborSummary {
                cell_idx: crossing.cell_idx,
                glyph_counts: build_glyph_counts(
                    &config.word_list,
                    options,
                    crossing.other_cell_idx,
                ),
                option_count: options.len(),
                options: options.iter().copied().collect(),
            }
        })
        .collect();

    let mut values = domains.get(variable_id).to_vec();

    values.sort_by_cached_key(|&word_id| {
        let word = config.word(word_id);

        neighbors
            .iter()
            .map(|neighbor| {
                let duplicates = usize::from(neighbor.options.contains(&word_id));
                let agreeing = word
                    .glyphs
                    .get(neighbor.cell_idx)
                    .map_or(0, |&glyph| neighbor.glyph_counts[glyph] as usize);
                duplicates + neighbor.option_count - agreeing
            })
            .sum::<usize>()
    });

    values
}

/// One level of the search: a variable, its candidates in the order we're trying them, and the
/// index of the next one to try.
#[derive(Debug)]
struct Frame {
    variable_id: VariableId,
    candidates: Vec<WordId>,
    next_idx: usize,
}

impl Frame {
    fn new(
        config: &GridConfig,
        domains: &Domains,
        assignment: &Assignment,
        variable_id: VariableId,
    ) -> Frame {
        Frame {
            variable_id,
            candidates: order_domain_values(config, domains, variable_id, assignment),
            next_idx: 0,
        }
    }
}

/// Time, state, and abort limits for a single search, derived from `FillOptions`.
struct Budget<'a> {
    deadline: Option<Instant>,
    max_states: Option<usize>,
    abort: Option<&'a AtomicBool>,
}

impl<'a> Budget<'a> {
    fn new(options: &'a FillOptions, start: Instant) -> Budget<'a> {
        Budget {
            deadline: options.timeout.map(|timeout| start + timeout),
            max_states: options.max_states,
            abort: options.abort.as_deref(),
        }
    }

    fn unlimited() -> Budget<'static> {
        Budget {
            deadline: None,
            max_states: None,
            abort: None,
        }
    }

    /// Should we stop before visiting another state?
    fn check(&self, states: usize) -> Result<(), FillFailure> {
        if let Some(max_states) = self.max_states {
            if states >= max_states {
                return Err(FillFailure::ExceededStateLimit(states));
            }
        }

        if states % INTERRUPT_FREQUENCY == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Err(FillFailure::Timeout);
                }
            }
            if let Some(abort) = self.abort {
                if abort.load(Ordering::Relaxed) {
                    return Err(FillFailure::Abort);
                }
            }
        }

        Ok(())
    }
}

/// Extend `assignment` into a complete, consistent assignment by depth-first search, returning
/// `HardFailure` if there isn't one. Candidates are visited in exactly the order a recursive
/// search would visit them, but the pending levels live in an explicit stack.
fn search(
    config: &GridConfig,
    domains: &Domains,
    mut assignment: Assignment,
    budget: &Budget,
    statistics: &mut Statistics,
) -> Result<Assignment, FillFailure> {
    if assignment_complete(config, &assignment) {
        return Ok(assignment);
    }

    let mut stack: Vec<Frame> = Vec::with_capacity(config.variable_count());
    if let Some(variable_id) = select_unassigned_variable(config, domains, &assignment) {
        stack.push(Frame::new(config, domains, &assignment, variable_id));
    }

    loop {
        budget.check(statistics.states)?;
        statistics.states += 1;

        let Some(frame) = stack.last_mut() else {
            return Err(FillFailure::HardFailure);
        };

        // If we've run out of candidates for this variable, the choice made one level up is
        // untenable: undo it and move on to that level's next candidate.
        let Some(&word_id) = frame.candidates.get(frame.next_idx) else {
            stack.pop();
            statistics.backtracks += 1;
            if let Some(parent) = stack.last() {
                assignment.remove(parent.variable_id);
            }
            continue;
        };
        frame.next_idx += 1;
        let variable_id = frame.variable_id;

        if !is_choice_consistent(config, &assignment, variable_id, word_id) {
            continue;
        }

        assignment.insert(variable_id, word_id);

        if CHECK_INVARIANTS && !consistent(config, &assignment) {
            panic!("Inconsistent assignment after an accepted choice?");
        }

        match select_unassigned_variable(config, domains, &assignment) {
            Some(next_variable_id) => {
                stack.push(Frame::new(config, domains, &assignment, next_variable_id));
            }
            None => return Ok(assignment),
        }
    }
}

/// Run the backtracking search over the given domains, starting from `assignment`. This applies
/// no limits; see `find_fill` for a version that accepts `FillOptions`.
pub fn backtrack(
    config: &GridConfig,
    domains: &Domains,
    assignment: Assignment,
) -> Option<Assignment> {
    let mut statistics = Statistics::default();
    search(
        config,
        domains,
        assignment,
        &Budget::unlimited(),
        &mut statistics,
    )
    .ok()
}

/// Search for a valid fill for the given grid: enforce node consistency, prune with AC-3, and
/// then run the backtracking search within the limits in `options`.
pub fn find_fill(config: &GridConfig, options: &FillOptions) -> Result<FillSuccess, FillFailure> {
    let start = Instant::now();
    let budget = Budget::new(options, start);
    let mut statistics = Statistics::default();

    let mut domains = Domains::initialize(config);
    statistics.node_consistency_eliminations = enforce_node_consistency(config, &mut domains);

    // A wiped-out domain means there's no fill, but we still let the search discover that so that
    // every unsatisfiable grid fails the same way.
    match establish_arc_consistency(config, &mut domains, None) {
        Ok(arc_consistency) => statistics.arc_consistency = arc_consistency,
        Err(ArcConsistencyFailure {
            variable_id,
            statistics: arc_consistency,
        }) => {
            info!(
                "Initial arc consistency wiped out {}",
                config.variable(variable_id)
            );
            statistics.arc_consistency = arc_consistency;
        }
    }
    statistics.arc_consistency_time = start.elapsed();

    let search_start = Instant::now();
    let result = search(
        config,
        &domains,
        Assignment::new(),
        &budget,
        &mut statistics,
    );
    statistics.search_time = search_start.elapsed();
    statistics.total_time = start.elapsed();

    debug!("Fill attempt finished: {statistics:?}");

    match result {
        Ok(assignment) => {
            info!(
                "Found a fill after {} states and {} backtracks",
                statistics.states, statistics.backtracks
            );
            Ok(FillSuccess {
                statistics,
                assignment,
            })
        }
        Err(failure) => {
            info!("Fill failed after {} states: {failure:?}", statistics.states);
            Err(failure)
        }
    }
}

/// Fill the grid with no limits, returning `None` if it can't be filled.
#[must_use]
pub fn solve(config: &GridConfig) -> Option<Assignment> {
    find_fill(config, &FillOptions::default())
        .ok()
        .map(|success| success.assignment)
}
