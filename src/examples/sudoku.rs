//! Sudoku and Latin-square frontends.
//!
//! A puzzle is an 81-character row-major digit string with `'0'` for a blank
//! cell. Cells are named `X{row}{col}` with 1-based indices, and the usual
//! row, column and box groups become pairwise inequality edges.

use crate::{
    error::{Error, Result},
    solver::{
        assignment::Assignment,
        store::{all_different, ConstraintStore},
    },
};

pub const WIDTH: usize = 9;
const BOX_WIDTH: usize = 3;

fn cell(row: usize, col: usize) -> String {
    format!("X{}{}", row + 1, col + 1)
}

/// Builds a 9×9 Sudoku store from an 81-digit puzzle string.
pub fn sudoku_store(grid: &str) -> Result<ConstraintStore<String, u8>> {
    let cells: Vec<u8> = grid
        .chars()
        .filter(|c| c.is_ascii_digit())
        .map(|c| c as u8 - b'0')
        .collect();
    if cells.len() != WIDTH * WIDTH {
        return Err(Error::MalformedPuzzle {
            expected: WIDTH * WIDTH,
            found: cells.len(),
        });
    }

    let mut variables = Vec::with_capacity(WIDTH * WIDTH);
    let mut domains = im::HashMap::new();
    for row in 0..WIDTH {
        for col in 0..WIDTH {
            let name = cell(row, col);
            let given = cells[row * WIDTH + col];
            let domain = if given == 0 {
                (1..=9u8).collect()
            } else {
                im::hashset! {given}
            };
            domains.insert(name.clone(), domain);
            variables.push(name);
        }
    }

    let mut edges = Vec::new();
    for row in 0..WIDTH {
        let group: Vec<String> = (0..WIDTH).map(|col| cell(row, col)).collect();
        edges.extend(all_different(&group));
    }
    for col in 0..WIDTH {
        let group: Vec<String> = (0..WIDTH).map(|row| cell(row, col)).collect();
        edges.extend(all_different(&group));
    }
    for box_row in 0..BOX_WIDTH {
        for box_col in 0..BOX_WIDTH {
            let group: Vec<String> = (box_row * BOX_WIDTH..(box_row + 1) * BOX_WIDTH)
                .flat_map(|row| {
                    (box_col * BOX_WIDTH..(box_col + 1) * BOX_WIDTH).map(move |col| cell(row, col))
                })
                .collect();
            edges.extend(all_different(&group));
        }
    }

    ConstraintStore::new(variables, domains, &edges)
}

/// Builds an n×n Latin square store: every row and column all-different,
/// with optional `(row, col, value)` givens fixed to singletons.
pub fn latin_square_store(
    width: usize,
    givens: &[(usize, usize, u8)],
) -> Result<ConstraintStore<String, u8>> {
    let full: im::HashSet<u8> = (1..=width as u8).collect();

    let mut variables = Vec::with_capacity(width * width);
    let mut domains = im::HashMap::new();
    for row in 0..width {
        for col in 0..width {
            let name = cell(row, col);
            domains.insert(name.clone(), full.clone());
            variables.push(name);
        }
    }
    for (row, col, value) in givens {
        domains.insert(cell(*row, *col), im::hashset! {*value});
    }

    let mut edges = Vec::new();
    for row in 0..width {
        let group: Vec<String> = (0..width).map(|col| cell(row, col)).collect();
        edges.extend(all_different(&group));
    }
    for col in 0..width {
        let group: Vec<String> = (0..width).map(|row| cell(row, col)).collect();
        edges.extend(all_different(&group));
    }

    ConstraintStore::new(variables, domains, &edges)
}

/// Counts the cells whose live domain is down to a single value.
pub fn solved_cells(store: &ConstraintStore<String, u8>) -> usize {
    store.domains().values().filter(|d| d.len() == 1).count()
}

/// Renders a complete assignment back to the 81-digit string form.
pub fn render(assignment: &Assignment<String, u8>) -> String {
    let mut out = String::with_capacity(WIDTH * WIDTH);
    for row in 0..WIDTH {
        for col in 0..WIDTH {
            let value = assignment.get(&cell(row, col)).copied().unwrap_or(0);
            out.push((b'0' + value) as char);
        }
    }
    out
}
