//! ASCII rendering of the board for terminal output.

use std::fmt::Write as _;

use labyrinth_core::{CellCoord, Edge, PlayerId, PortalTopology};
use labyrinth_world::{query, World};

/// Draws the board with walls and occupants, or a hint when no board exists.
///
/// Players render as `1` and `2` (lowercase `x` once eliminated, `*` when
/// both share a cell), followed by the minotaur `M`, key `K`, exit `E`,
/// hospital `H` and portals `P` (pair) or `C` (cycle).
pub(crate) fn board(world: &World) -> String {
    let Some(board) = query::board(world) else {
        return "No board. Type 'new N' to create one.".to_owned();
    };
    let size = board.size();
    let mut out = String::new();

    border(&mut out, size);
    for row in 0..size {
        out.push('|');
        for column in 0..size {
            let _ = write!(out, " {} ", glyph(world, CellCoord::new(column, row)));
            let closed = column + 1 == size || board.has_wall(Edge::vertical(column, row));
            out.push(if closed { '|' } else { ' ' });
        }
        out.push('\n');

        if row + 1 == size {
            border(&mut out, size);
        } else {
            out.push('+');
            for column in 0..size {
                let wall = board.has_wall(Edge::horizontal(column, row));
                out.push_str(if wall { "---+" } else { "   +" });
            }
            out.push('\n');
        }
    }

    let _ = out.pop();
    out
}

fn border(out: &mut String, size: u32) {
    out.push('+');
    for _ in 0..size {
        out.push_str("---+");
    }
    out.push('\n');
}

fn glyph(world: &World, cell: CellCoord) -> char {
    let occupants: Vec<_> = PlayerId::ALL
        .into_iter()
        .map(|id| query::player(world, id))
        .filter(|player| player.cell == Some(cell))
        .collect();
    match occupants.as_slice() {
        [_, _] => return '*',
        [player] if !player.alive => return 'x',
        [player] => {
            return match player.id {
                PlayerId::One => '1',
                PlayerId::Two => '2',
            }
        }
        _ => {}
    }

    if query::minotaur_cell(world) == Some(cell) {
        'M'
    } else if query::key_cell(world) == Some(cell) {
        'K'
    } else if query::exit_cell(world) == Some(cell) {
        'E'
    } else if query::hospital_cell(world) == Some(cell) {
        'H'
    } else {
        match query::portal_at(world, cell).map(|portal| portal.topology) {
            Some(PortalTopology::Pair) => 'P',
            Some(PortalTopology::Cycle) => 'C',
            None => '.',
        }
    }
}
