//! This module implements the structural model of a crossword: the variables (slots) in the grid,
//! the cells where they cross, and the vocabulary that their words are drawn from. It is
//! independent of the specific fill algorithm and is immutable once built.

use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{VariableId, WordId};
use crate::word_list::{Word, WordList};

/// Zero-indexed row and column for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// The direction that a variable is facing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Across,
    Down,
}

/// A single slot in the grid. Two variables are the same slot iff all four fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable {
            row,
            col,
            direction,
            length,
        }
    }

    /// Parse a string like "1,2,down,5" into a `Variable`.
    pub fn from_key(key: &str) -> Result<Variable, StructureError> {
        let key_parts: Vec<&str> = key.split(',').map(str::trim).collect();
        if key_parts.len() != 4 {
            return Err(StructureError::InvalidKey(key.into()));
        }

        let row: Result<usize, _> = key_parts[0].parse();
        let col: Result<usize, _> = key_parts[1].parse();
        let direction: Option<Direction> = match key_parts[2] {
            "across" => Some(Direction::Across),
            "down" => Some(Direction::Down),
            _ => None,
        };
        let length: Result<usize, _> = key_parts[3].parse();

        if let (Ok(row), Ok(col), Some(direction), Ok(length)) = (row, col, direction, length) {
            Ok(Variable::new(row, col, direction, length))
        } else {
            Err(StructureError::InvalidKey(key.into()))
        }
    }

    /// Represent this variable as a string like "1,2,down,5".
    #[must_use]
    pub fn to_key(&self) -> String {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        format!("{},{},{},{}", self.row, self.col, direction, self.length)
    }

    /// The coords of the cell at `cell_idx` within this variable.
    #[must_use]
    pub fn cell(&self, cell_idx: usize) -> GridCoord {
        match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        }
    }

    /// Generate the coords for each cell of this variable.
    #[must_use]
    pub fn cell_coords(&self) -> Vec<GridCoord> {
        (0..self.length).map(|cell_idx| self.cell(cell_idx)).collect()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_key())
    }
}

/// Serialize a `Variable` into a string key.
#[cfg(feature = "serde")]
impl Serialize for Variable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_key())
    }
}

/// Deserialize a `Variable` from a string key.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_string = String::deserialize(deserializer)?;
        Variable::from_key(&raw_string).map_err(serde::de::Error::custom)
    }
}

/// Malformed structural input. These are violations of the model's preconditions, not search
/// outcomes; an unsatisfiable grid is never reported through this type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("grid structure has no rows")]
    EmptyStructure,

    #[error("couldn't read structure file “{0}”")]
    InvalidPath(String),

    #[error("invalid variable key: {0:?}")]
    InvalidKey(String),

    #[error("variable {0} has zero length")]
    ZeroLength(Variable),

    #[error("variable {0} appears more than once")]
    DuplicateVariable(Variable),

    #[error("no variable with id {0}")]
    UnknownVariable(VariableId),

    #[error("variables {0} and {1} share more than one cell")]
    MultipleOverlaps(Variable, Variable),

    #[error("more than two variables share cell {0:?}")]
    CrowdedCell(GridCoord),

    #[error("overlap ({index}, {other_index}) is out of bounds for {variable} / {other}")]
    OverlapOutOfBounds {
        variable: Variable,
        other: Variable,
        index: usize,
        other_index: usize,
    },
}

/// A struct representing a crossing between one variable and another, referencing the other
/// variable's id and the location of the shared cell within each of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub other_variable_id: VariableId,
    pub cell_idx: usize,
    pub other_cell_idx: usize,
}

/// A struct recording the word assigned to a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub variable_id: VariableId,
    pub word_id: WordId,
}

/// A struct holding all of the information needed as input to a crossword filling operation.
#[derive(Debug)]
pub struct GridConfig {
    /// The vocabulary used to fill the grid; see `word_list.rs`.
    pub word_list: WordList,

    /// All variables in the grid. A `VariableId` is an index into this list.
    pub variables: Vec<Variable>,

    /// For each variable, its crossings with other variables, in order of cell index.
    pub crossings: Vec<Vec<Crossing>>,

    /// Which cells can hold letters, indexed by row and then column.
    pub structure: Vec<Vec<bool>>,

    /// The width and height of the grid.
    pub width: usize,
    pub height: usize,

    /// The overlap table, containing both `(x, y)` and `(y, x)` for each crossing pair.
    overlaps: HashMap<(VariableId, VariableId), (usize, usize)>,

    /// The inverse of `variables`.
    variable_id_by_key: HashMap<Variable, VariableId>,
}

impl GridConfig {
    /// All variables in the grid, in `VariableId` order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    #[must_use]
    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    #[must_use]
    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variable_id_by_key.get(variable).copied()
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The variables crossing the given one, in order of the cell where they cross.
    pub fn neighbors(&self, variable_id: VariableId) -> impl Iterator<Item = VariableId> + '_ {
        self.crossings[variable_id]
            .iter()
            .map(|crossing| crossing.other_variable_id)
    }

    #[must_use]
    pub fn neighbor_count(&self, variable_id: VariableId) -> usize {
        self.crossings[variable_id].len()
    }

    /// The `(index in x, index in y)` at which x's and y's words must agree, if they cross.
    #[must_use]
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    #[must_use]
    pub fn word(&self, word_id: WordId) -> &Word {
        self.word_list.get_word(word_id)
    }

    /// Project the given choices onto the grid, as a `height` x `width` array of letters.
    #[must_use]
    pub fn letter_grid(&self, choices: &[Choice]) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width]; self.height];

        for &Choice {
            variable_id,
            word_id,
        } in choices
        {
            let variable = &self.variables[variable_id];
            let word = self.word(word_id);

            for (cell_idx, &glyph) in word.glyphs.iter().enumerate().take(variable.length) {
                let (row, col) = variable.cell(cell_idx);
                letters[row][col] = Some(self.word_list.glyphs[glyph]);
            }
        }

        letters
    }

    /// Turn the given choices into a rendered string, with blocks drawn as `█` and unfilled cells
    /// as spaces.
    #[must_use]
    pub fn render_grid(&self, choices: &[Choice]) -> String {
        let letters = self.letter_grid(choices);

        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        if self.structure[row][col] {
                            letters[row][col].unwrap_or(' ')
                        } else {
                            '█'
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reject zero-length and repeated variables.
fn validate_variables(
    variables: &[Variable],
) -> Result<HashMap<Variable, VariableId>, StructureError> {
    let mut variable_id_by_key = HashMap::with_capacity(variables.len());

    for (variable_id, &variable) in variables.iter().enumerate() {
        if variable.length == 0 {
            return Err(StructureError::ZeroLength(variable));
        }
        if variable_id_by_key.insert(variable, variable_id).is_some() {
            return Err(StructureError::DuplicateVariable(variable));
        }
    }

    Ok(variable_id_by_key)
}

/// Given the variables in a grid, derive every crossing from the cells they have in common.
fn generate_overlaps(
    variables: &[Variable],
) -> Result<HashMap<(VariableId, VariableId), (usize, usize)>, StructureError> {
    // Build a map from cell location to variables involved, which we can then use to calculate
    // crossings.
    let mut entries_by_cell: HashMap<GridCoord, Vec<(VariableId, usize)>> = HashMap::new();

    for (variable_id, variable) in variables.iter().enumerate() {
        for (cell_idx, loc) in variable.cell_coords().into_iter().enumerate() {
            entries_by_cell
                .entry(loc)
                .or_default()
                .push((variable_id, cell_idx));
        }
    }

    let mut overlaps = HashMap::new();

    for (&loc, entries) in &entries_by_cell {
        match entries[..] {
            [_] => {}
            [(x, x_cell), (y, y_cell)] => {
                if overlaps.insert((x, y), (x_cell, y_cell)).is_some() {
                    return Err(StructureError::MultipleOverlaps(variables[x], variables[y]));
                }
                overlaps.insert((y, x), (y_cell, x_cell));
            }
            _ => return Err(StructureError::CrowdedCell(loc)),
        }
    }

    Ok(overlaps)
}

/// Build per-variable crossing lists from a symmetric overlap table.
fn generate_crossings(
    variable_count: usize,
    overlaps: &HashMap<(VariableId, VariableId), (usize, usize)>,
) -> Vec<Vec<Crossing>> {
    let mut crossings: Vec<Vec<Crossing>> = vec![vec![]; variable_count];

    for (&(x, y), &(x_cell, y_cell)) in overlaps {
        crossings[x].push(Crossing {
            other_variable_id: y,
            cell_idx: x_cell,
            other_cell_idx: y_cell,
        });
    }

    for variable_crossings in &mut crossings {
        variable_crossings.sort_by_key(|crossing| (crossing.cell_idx, crossing.other_variable_id));
    }

    crossings
}

/// Assemble a `GridConfig`, taking the grid's extent from the structure if there is one, or from
/// the variables otherwise.
fn assemble_grid_config(
    word_list: WordList,
    variables: Vec<Variable>,
    variable_id_by_key: HashMap<Variable, VariableId>,
    overlaps: HashMap<(VariableId, VariableId), (usize, usize)>,
    structure: Option<Vec<Vec<bool>>>,
) -> GridConfig {
    let crossings = generate_crossings(variables.len(), &overlaps);

    let structure = structure.unwrap_or_else(|| {
        let height = variables
            .iter()
            .map(|variable| variable.cell(variable.length - 1).0 + 1)
            .max()
            .unwrap_or(0);
        let width = variables
            .iter()
            .map(|variable| variable.cell(variable.length - 1).1 + 1)
            .max()
            .unwrap_or(0);

        let mut structure = vec![vec![false; width]; height];
        for variable in &variables {
            for (row, col) in variable.cell_coords() {
                structure[row][col] = true;
            }
        }
        structure
    });

    let height = structure.len();
    let width = structure.first().map_or(0, Vec::len);

    debug!(
        "Built {width}x{height} grid with {} variables and {} crossings",
        variables.len(),
        overlaps.len() / 2
    );

    GridConfig {
        word_list,
        variables,
        crossings,
        structure,
        width,
        height,
        overlaps,
        variable_id_by_key,
    }
}

/// Generate a `GridConfig` from a list of variables, deriving the overlap table from the cells
/// they share.
pub fn generate_grid_config(
    word_list: WordList,
    variables: Vec<Variable>,
) -> Result<GridConfig, StructureError> {
    let variable_id_by_key = validate_variables(&variables)?;
    let overlaps = generate_overlaps(&variables)?;

    Ok(assemble_grid_config(
        word_list,
        variables,
        variable_id_by_key,
        overlaps,
        None,
    ))
}

/// Generate a `GridConfig` from a list of variables and an explicit overlap table, given as
/// `(x, y, index in x, index in y)` entries. Each crossing only needs to be listed once.
pub fn generate_grid_config_with_overlaps(
    word_list: WordList,
    variables: Vec<Variable>,
    overlap_entries: &[(VariableId, VariableId, usize, usize)],
) -> Result<GridConfig, StructureError> {
    let variable_id_by_key = validate_variables(&variables)?;
    let mut overlaps = HashMap::new();

    for &(x, y, x_cell, y_cell) in overlap_entries {
        let (Some(&x_var), Some(&y_var)) = (variables.get(x), variables.get(y)) else {
            return Err(StructureError::UnknownVariable(x.max(y)));
        };

        if x_cell >= x_var.length || y_cell >= y_var.length {
            return Err(StructureError::OverlapOutOfBounds {
                variable: x_var,
                other: y_var,
                index: x_cell,
                other_index: y_cell,
            });
        }

        if x == y || overlaps.insert((x, y), (x_cell, y_cell)).is_some() {
            return Err(StructureError::MultipleOverlaps(x_var, y_var));
        }
        if overlaps.insert((y, x), (y_cell, x_cell)).is_some() {
            return Err(StructureError::MultipleOverlaps(x_var, y_var));
        }
    }

    Ok(assemble_grid_config(
        word_list,
        variables,
        variable_id_by_key,
        overlaps,
        None,
    ))
}

/// Parse a structure template, with `_` or `.` representing fillable cells and anything else
/// (including spaces) representing blocks, into a grid of fillable flags. Each line is one row:
/// blank lines before the first row and after the last are ignored, but a blank line in between is
/// a row of blocks. Trailing whitespace is dropped and short rows are padded with blocks.
pub fn parse_structure(template: &str) -> Result<Vec<Vec<bool>>, StructureError> {
    let lines: Vec<&str> = template.lines().map(str::trim_end).collect();

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return Err(StructureError::EmptyStructure);
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);

    let rows: Vec<Vec<bool>> = lines[first..=last]
        .iter()
        .map(|line| line.chars().map(|c| c == '_' || c == '.').collect())
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    Ok(rows
        .into_iter()
        .map(|mut row| {
            row.resize(width, false);
            row
        })
        .collect())
}

/// Find every run of two or more fillable cells, scanning cells in row-major order and listing
/// the across variable before the down variable when both start at the same cell.
#[must_use]
pub fn generate_variables_from_structure(structure: &[Vec<bool>]) -> Vec<Variable> {
    let height = structure.len();
    let width = structure.first().map_or(0, Vec::len);
    let fillable = |row: usize, col: usize| structure[row][col];

    let mut variables = vec![];

    for row in 0..height {
        for col in 0..width {
            if !fillable(row, col) {
                continue;
            }

            if col == 0 || !fillable(row, col - 1) {
                let length = (col..width).take_while(|&c| fillable(row, c)).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
            }

            if row == 0 || !fillable(row - 1, col) {
                let length = (row..height).take_while(|&r| fillable(r, col)).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
            }
        }
    }

    variables
}

/// Generate a `GridConfig` from a structure template string; see `parse_structure`.
pub fn generate_grid_config_from_template_string(
    word_list: WordList,
    template: &str,
) -> Result<GridConfig, StructureError> {
    let structure = parse_structure(template)?;
    let variables = generate_variables_from_structure(&structure);
    let variable_id_by_key = validate_variables(&variables)?;
    let overlaps = generate_overlaps(&variables)?;

    Ok(assemble_grid_config(
        word_list,
        variables,
        variable_id_by_key,
        overlaps,
        Some(structure),
    ))
}

/// Generate a `GridConfig` from a structure file.
pub fn generate_grid_config_from_file(
    word_list: WordList,
    path: impl AsRef<Path>,
) -> Result<GridConfig, StructureError> {
    let path = path.as_ref();
    let template = fs::read_to_string(path)
        .map_err(|_| StructureError::InvalidPath(path.to_string_lossy().into()))?;

    generate_grid_config_from_template_string(word_list, &template)
}

#[cfg(test)]
mod tests {
    use crate::grid_config::{
        generate_grid_config, generate_grid_config_from_file,
        generate_grid_config_from_template_string, generate_grid_config_with_overlaps, Choice,
        Direction, StructureError, Variable,
    };
    use crate::word_list::tests::resource_path;
    use crate::word_list::WordList;
    use std::collections::HashSet;

    #[test]
    fn test_variables_from_structure_file() {
        let grid_config = generate_grid_config_from_file(
            WordList::from_words(&["six"]),
            resource_path("structure0.txt"),
        )
        .expect("structure0.txt is well-formed");

        assert_eq!(grid_config.width, 5);
        assert_eq!(grid_config.height, 5);
        assert_eq!(
            grid_config.variables(),
            &[
                Variable::new(0, 1, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 5),
                Variable::new(1, 4, Direction::Down, 4),
                Variable::new(4, 1, Direction::Across, 4),
            ]
        );

        assert_eq!(grid_config.overlap(0, 1), Some((0, 0)));
        assert_eq!(grid_config.overlap(1, 0), Some((0, 0)));
        assert_eq!(grid_config.overlap(1, 3), Some((4, 0)));
        assert_eq!(grid_config.overlap(3, 2), Some((3, 3)));
        assert_eq!(grid_config.overlap(0, 2), None);

        assert_eq!(grid_config.neighbors(1).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(grid_config.neighbor_count(2), 1);
    }

    #[test]
    fn test_overlaps_are_symmetric() {
        let grid_config = generate_grid_config_from_file(
            WordList::from_words(&["heart"]),
            resource_path("structure1.txt"),
        )
        .unwrap();

        assert_eq!(grid_config.variable_count(), 6);

        for x in 0..grid_config.variable_count() {
            for y in 0..grid_config.variable_count() {
                match grid_config.overlap(x, y) {
                    Some((i, j)) => {
                        assert_eq!(grid_config.overlap(y, x), Some((j, i)));
                        assert_eq!(
                            grid_config.variable(x).cell(i),
                            grid_config.variable(y).cell(j)
                        );
                    }
                    None => assert_eq!(grid_config.overlap(y, x), None),
                }
            }

            let neighbors: HashSet<_> = grid_config.neighbors(x).collect();
            assert!(!neighbors.contains(&x));
        }
    }

    #[test]
    fn test_short_lines_are_padded_with_blocks() {
        let grid_config = generate_grid_config_from_template_string(
            WordList::from_words(&["ab"]),
            "\n__\n_\n\n",
        )
        .unwrap();

        assert_eq!(grid_config.structure, vec![vec![true, true], vec![true, false]]);
        assert_eq!(grid_config.variable_count(), 2);
    }

    #[test]
    fn test_blank_rows_and_leading_spaces_are_blocks() {
        let word_list = || WordList::from_words(&["ab"]);

        // The empty middle row separates the two cells in column 0.
        let grid_config =
            generate_grid_config_from_template_string(word_list(), "_#\n\n__").unwrap();
        assert_eq!(grid_config.height, 3);
        assert_eq!(
            grid_config.structure,
            vec![vec![true, false], vec![false, false], vec![true, true]]
        );
        assert_eq!(
            grid_config.variables(),
            &[Variable::new(2, 0, Direction::Across, 2)]
        );

        // Leading spaces are block cells, so the down entry is in column 2.
        let grid_config =
            generate_grid_config_from_template_string(word_list(), "  _\n___\n  _").unwrap();
        assert_eq!(grid_config.width, 3);
        assert_eq!(
            grid_config.variables(),
            &[
                Variable::new(0, 2, Direction::Down, 3),
                Variable::new(1, 0, Direction::Across, 3),
            ]
        );
    }

    #[test]
    fn test_variable_lookup_by_key() {
        let grid_config = generate_grid_config_from_file(
            WordList::from_words(&["six"]),
            resource_path("structure0.txt"),
        )
        .unwrap();

        for (variable_id, variable) in grid_config.variables().iter().enumerate() {
            let parsed = Variable::from_key(&variable.to_key()).unwrap();
            assert_eq!(grid_config.variable_id(&parsed), Some(variable_id));
        }

        let missing = Variable::from_key("0,0,across,3").unwrap();
        assert_eq!(grid_config.variable_id(&missing), None);
    }

    #[test]
    fn test_variable_equality_and_keys() {
        let variable = Variable::new(3, 4, Direction::Down, 12);

        assert_eq!(variable.to_key(), "3,4,down,12");
        assert_eq!(Variable::from_key("3,4,down,12"), Ok(variable));
        assert_ne!(variable, Variable::new(3, 4, Direction::Across, 12));
        assert!(matches!(
            Variable::from_key("3,4,sideways,12"),
            Err(StructureError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_malformed_variables_are_rejected() {
        let word_list = || WordList::from_words(&["cat"]);

        assert_eq!(
            generate_grid_config(word_list(), vec![Variable::new(0, 0, Direction::Across, 0)])
                .unwrap_err(),
            StructureError::ZeroLength(Variable::new(0, 0, Direction::Across, 0))
        );

        assert!(matches!(
            generate_grid_config(
                word_list(),
                vec![
                    Variable::new(0, 0, Direction::Across, 3),
                    Variable::new(0, 1, Direction::Across, 3),
                ]
            ),
            Err(StructureError::MultipleOverlaps(..))
        ));

        assert!(matches!(
            generate_grid_config(
                word_list(),
                vec![
                    Variable::new(0, 0, Direction::Across, 3),
                    Variable::new(0, 0, Direction::Across, 3),
                ]
            ),
            Err(StructureError::DuplicateVariable(_))
        ));

        assert!(matches!(
            generate_grid_config_with_overlaps(
                word_list(),
                vec![
                    Variable::new(0, 0, Direction::Across, 3),
                    Variable::new(0, 1, Direction::Down, 3),
                ],
                &[(0, 1, 1, 3)],
            ),
            Err(StructureError::OverlapOutOfBounds { .. })
        ));

        assert_eq!(
            generate_grid_config_from_template_string(word_list(), "\n\n").unwrap_err(),
            StructureError::EmptyStructure
        );
    }

    #[test]
    fn test_render_grid() {
        let word_list = WordList::from_words(&["cat", "ate"]);
        let grid_config = generate_grid_config_with_overlaps(
            word_list,
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ],
            &[(0, 1, 1, 0)],
        )
        .unwrap();

        let choices = [
            Choice {
                variable_id: 0,
                word_id: grid_config.word_list.word_id("cat").unwrap(),
            },
            Choice {
                variable_id: 1,
                word_id: grid_config.word_list.word_id("ate").unwrap(),
            },
        ];

        assert_eq!(grid_config.render_grid(&choices), "CAT\n█T█\n█E█");
        assert_eq!(grid_config.render_grid(&choices[..1]), "CAT\n█ █\n█ █");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_variable_serialization() {
        let variable = Variable::new(1, 2, Direction::Across, 5);

        let key = serde_json::to_string(&variable).unwrap();
        assert_eq!(key, "\"1,2,across,5\"");

        let parsed: Variable = serde_json::from_str("\"3,4,down,12\"").unwrap();
        assert_eq!(parsed, Variable::new(3, 4, Direction::Down, 12));
    }
}
