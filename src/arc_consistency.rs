//! This module contains a crossword-specific implementation of node consistency and of the AC-3
//! algorithm for establishing arc consistency. For our purposes:
//!
//! - A variable is node-consistent when every word in its domain has exactly the variable's
//!   length.
//!
//! - A variable x is arc-consistent with a crossing variable y when every word in x's domain has
//!   at least one word in y's domain with the same letter in their shared cell. For example, if
//!   1D doesn't have any options starting with the letter A, 1A can't keep any options starting
//!   with the letter A.
//!
//! Both only ever shrink domains. Arc consistency is pairwise: it doesn't guarantee that a
//! complete fill exists.

use log::{debug, trace};
use std::collections::VecDeque;

use crate::domains::Domains;
use crate::grid_config::GridConfig;
use crate::types::{DirectedArc, VariableId};
use crate::util::build_glyph_counts;
use crate::CHECK_INVARIANTS;

/// Counters describing the work done while establishing consistency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArcConsistencyStatistics {
    /// Number of arcs popped from the worklist.
    pub arcs_processed: usize,

    /// Number of arcs whose revision removed at least one word.
    pub revisions: usize,

    /// Total number of words removed from all domains.
    pub eliminations: usize,
}

/// Result from a failed call to `establish_arc_consistency`, identifying the variable whose
/// domain was wiped out along with the work done up to that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub variable_id: VariableId,
    pub statistics: ArcConsistencyStatistics,
}

/// Result from a call to `establish_arc_consistency`.
pub type ArcConsistencyResult = Result<ArcConsistencyStatistics, ArcConsistencyFailure>;

/// Remove every word whose length differs from its variable's length, returning the number of
/// words removed.
pub fn enforce_node_consistency(config: &GridConfig, domains: &mut Domains) -> usize {
    let mut eliminations = 0;

    for (variable_id, variable) in config.variables().iter().enumerate() {
        eliminations += domains.retain(variable_id, |&word_id| {
            config.word(word_id).length() == variable.length
        });
    }

    debug!("Node consistency removed {eliminations} options");

    if CHECK_INVARIANTS && !is_node_consistent(config, domains) {
        panic!("Domains aren't node-consistent after enforcing node consistency?");
    }

    eliminations
}

/// Remove the words in x's domain that have no counterpart in y's domain at their shared cell,
/// returning how many were removed.
fn revise_arc(config: &GridConfig, domains: &mut Domains, x: VariableId, y: VariableId) -> usize {
    let Some((x_cell, y_cell)) = config.overlap(x, y) else {
        return 0;
    };

    // How many of y's options have each glyph in the shared cell? A word in x is supported iff
    // its own glyph there has a non-zero count.
    let y_glyph_counts = build_glyph_counts(&config.word_list, domains.get(y), y_cell);

    let removed = domains.retain(x, |&word_id| {
        config
            .word(word_id)
            .glyphs
            .get(x_cell)
            .map_or(false, |&glyph| y_glyph_counts[glyph] > 0)
    });

    if removed > 0 {
        trace!(
            "Revised {} against {}: removed {removed}, {} left",
            config.variable(x),
            config.variable(y),
            domains.option_count(x)
        );
    }

    removed
}

/// Make x arc-consistent with y. Only x's domain can shrink. Returns true iff any word was
/// removed; variables that don't cross are left alone.
pub fn revise(config: &GridConfig, domains: &mut Domains, x: VariableId, y: VariableId) -> bool {
    revise_arc(config, domains, x, y) > 0
}

/// Every arc in the grid: `(x, y)` for each variable x and each of its neighbors y.
#[must_use]
pub fn all_arcs(config: &GridConfig) -> Vec<DirectedArc> {
    (0..config.variable_count())
        .flat_map(|x| config.neighbors(x).map(move |y| (x, y)))
        .collect()
}

/// Run AC-3 over a FIFO worklist that starts with `initial_arcs`, or with every arc in the grid
/// if none are given. Whenever x's domain shrinks, arcs `(z, x)` from x's other neighbors are
/// queued again, since x's narrower domain may leave some of z's words without support. Fails as
/// soon as a revision empties a domain.
pub fn establish_arc_consistency(
    config: &GridConfig,
    domains: &mut Domains,
    initial_arcs: Option<Vec<DirectedArc>>,
) -> ArcConsistencyResult {
    let mut statistics = ArcConsistencyStatistics::default();
    let mut queue: VecDeque<DirectedArc> = initial_arcs
        .unwrap_or_else(|| all_arcs(config))
        .into_iter()
        .collect();

    while let Some((x, y)) = queue.pop_front() {
        statistics.arcs_processed += 1;

        let removed = revise_arc(config, domains, x, y);
        if removed == 0 {
            continue;
        }

        statistics.revisions += 1;
        statistics.eliminations += removed;

        if domains.is_empty(x) {
            debug!(
                "Arc consistency wiped out {} after {} arcs",
                config.variable(x),
                statistics.arcs_processed
            );
            return Err(ArcConsistencyFailure {
                variable_id: x,
                statistics,
            });
        }

        queue.extend(config.neighbors(x).filter(|&z| z != y).map(|z| (z, x)));
    }

    debug!("Arc consistency established: {statistics:?}");

    if CHECK_INVARIANTS && !is_arc_consistent(config, domains) {
        panic!("Domains aren't arc-consistent after emptying the AC-3 queue?");
    }

    Ok(statistics)
}

/// Run AC-3; see `establish_arc_consistency`. Returns false if some domain was wiped out.
pub fn ac3(
    config: &GridConfig,
    domains: &mut Domains,
    initial_arcs: Option<Vec<DirectedArc>>,
) -> bool {
    establish_arc_consistency(config, domains, initial_arcs).is_ok()
}

/// Does every word in every domain have its variable's length?
#[must_use]
pub fn is_node_consistent(config: &GridConfig, domains: &Domains) -> bool {
    config
        .variables()
        .iter()
        .enumerate()
        .all(|(variable_id, variable)| {
            domains
                .get(variable_id)
                .iter()
                .all(|&word_id| config.word(word_id).length() == variable.length)
        })
}

/// Does every word in every domain have support in each neighbor's domain?
#[must_use]
pub fn is_arc_consistent(config: &GridConfig, domains: &Domains) -> bool {
    all_arcs(config).into_iter().all(|(x, y)| {
        let Some((x_cell, y_cell)) = config.overlap(x, y) else {
            return true;
        };

        domains.get(x).iter().all(|&x_word| {
            let x_glyph = config.word(x_word).glyphs.get(x_cell);
            x_glyph.is_some()
                && domains
                    .get(y)
                    .iter()
                    .any(|&y_word| config.word(y_word).glyphs.get(y_cell) == x_glyph)
        })
    })
}
