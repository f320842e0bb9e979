#![cfg_attr(not(test), no_std)]

/// Largest tile a `u32` cell can hold. Tiles of this value no longer merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Whether two neighbouring cells combine into one tile
#[inline]
pub fn can_merge(a: u32, b: u32) -> bool {
    a != 0 && a < MAX_TILE && a == b
}

/// Moves every non-zero tile of a line towards index 0, keeping their order,
/// and fills the tail with zeros.
///
/// # Arguments
/// * `line` - One row or column, already oriented so the leading edge is at index 0
pub fn shrink_line(line: &mut [u32]) {
    let mut write = 0;
    for read in 0..line.len() {
        let value = line[read];
        if value != 0 {
            line[write] = value;
            write += 1;
        }
    }
    for cell in &mut line[write..] {
        *cell = 0;
    }
}

/// Shrinks a line and merges equal neighbours from the leading edge outward.
///
/// Each merge doubles the left tile, clears the right one and re-shrinks, so a
/// tile produced by a merge is never merged again during the same call.
///
/// Tiles already at `MAX_TILE` are left as they are.
///
/// # Returns
/// The sum of the values created by merges.
pub fn merge_line(line: &mut [u32]) -> u64 {
    shrink_line(line);

    let mut score: u64 = 0;
    let mut i = 0;
    while i + 1 < line.len() {
        let value = line[i];
        if value == 0 {
            break;
        }
        if can_merge(value, line[i + 1]) {
            line[i] = value * 2;
            line[i + 1] = 0;
            score += line[i] as u64;
            shrink_line(&mut line[i + 1..]);
        }
        i += 1;
    }
    score
}

/// Returns true if two neighbouring cells of the line hold the same non-zero value.
pub fn has_adjacent_pair(line: &[u32]) -> bool {
    line.windows(2).any(|w| can_merge(w[0], w[1]))
}

/// Checks every row and every column of a square board for a latent merge.
///
/// # Arguments
/// * `board` - The board data as a flat row-major slice
/// * `size` - Board side length
pub fn board_has_adjacent_pair(board: &[u32], size: usize) -> bool {
    let get_cell = |row: usize, col: usize| -> u32 {
        let idx = row * size + col;
        if idx < board.len() {
            board[idx]
        } else {
            0
        }
    };

    // Rows
    for row in 0..size {
        for col in 1..size {
            let value = get_cell(row, col);
            if can_merge(value, get_cell(row, col - 1)) {
                return true;
            }
        }
    }

    // Columns
    for col in 0..size {
        for row in 1..size {
            let value = get_cell(row, col);
            if can_merge(value, get_cell(row - 1, col)) {
                return true;
            }
        }
    }

    false
}
