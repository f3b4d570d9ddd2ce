use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::game::{Square, SHIP_LENGTHS, TOTAL_SHIP_SQUARES};

/// One ship: an ordered run of contiguous squares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ship(pub Vec<Square>);

impl Ship {
    pub fn squares(&self) -> &[Square] {
        &self.0
    }

    // A straight run steps by exactly one square along a single axis.
    fn is_straight_run(&self) -> bool {
        let coords: Option<Vec<(u8, u8)>> = self.0.iter().map(Square::coords).collect();
        let Some(coords) = coords else { return false };
        if coords.len() < 2 {
            return coords.len() == 1;
        }
        let dx = coords[1].0 as i16 - coords[0].0 as i16;
        let dy = coords[1].1 as i16 - coords[0].1 as i16;
        if !matches!((dx.abs(), dy.abs()), (1, 0) | (0, 1)) {
            return false;
        }
        coords.windows(2).all(|pair| {
            pair[1].0 as i16 - pair[0].0 as i16 == dx && pair[1].1 as i16 - pair[0].1 as i16 == dy
        })
    }
}

/// Per-game placement document at `placements/{gameId}`: player id to their
/// hidden fleet. Each player's entry is written at most once.
pub type PlacementDoc = HashMap<String, Vec<Ship>>;

/// Server-side legality check for a submitted fleet: the exact ship roster,
/// every square in bounds, straight contiguous runs, no overlaps.
pub fn legal_fleet(ships: &[Ship]) -> bool {
    let mut lengths: Vec<usize> = ships.iter().map(|ship| ship.0.len()).collect();
    lengths.sort_unstable();
    let mut expected = SHIP_LENGTHS.to_vec();
    expected.sort_unstable();
    if lengths != expected {
        return false;
    }
    if !ships.iter().all(Ship::is_straight_run) {
        return false;
    }
    let occupied: HashSet<&Square> = ships.iter().flat_map(Ship::squares).collect();
    if !occupied.iter().all(|square| square.in_bounds()) {
        return false;
    }
    // distinct count equal to the fleet total means no two ships overlap
    occupied.len() == TOTAL_SHIP_SQUARES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(x: u8, y: u8, len: u8, down: bool) -> Ship {
        Ship(
            (0..len)
                .map(|i| if down { Square::at(x, y + i) } else { Square::at(x + i, y) })
                .collect(),
        )
    }

    fn fleet() -> Vec<Ship> {
        vec![
            run(0, 0, 5, false),
            run(0, 2, 4, false),
            run(0, 4, 3, false),
            run(0, 6, 3, false),
            run(0, 8, 2, false),
        ]
    }

    #[test]
    fn standard_fleet_is_legal() {
        assert!(legal_fleet(&fleet()));
    }

    #[test]
    fn vertical_and_reversed_runs_are_legal() {
        let ships = vec![
            run(0, 0, 5, true),
            run(2, 0, 4, true),
            run(4, 0, 3, true),
            Ship(vec![Square::at(6, 2), Square::at(6, 1), Square::at(6, 0)]),
            run(8, 0, 2, true),
        ];
        assert!(legal_fleet(&ships));
    }

    #[test]
    fn wrong_roster_is_rejected() {
        let mut ships = fleet();
        ships.pop();
        assert!(!legal_fleet(&ships));

        let mut ships = fleet();
        ships[4] = run(0, 8, 3, false);
        assert!(!legal_fleet(&ships));
    }

    #[test]
    fn overlap_is_rejected() {
        let mut ships = fleet();
        ships[4] = run(0, 0, 2, true); // crosses the carrier at x0y0
        assert!(!legal_fleet(&ships));
    }

    #[test]
    fn bent_or_gapped_ships_are_rejected() {
        let mut ships = fleet();
        ships[4] = Ship(vec![Square::at(7, 8), Square::at(8, 9)]);
        assert!(!legal_fleet(&ships));

        let mut ships = fleet();
        ships[4] = Ship(vec![Square::at(6, 8), Square::at(8, 8)]);
        assert!(!legal_fleet(&ships));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut ships = fleet();
        ships[4] = run(9, 8, 2, false); // x10y8 is off the board
        assert!(!legal_fleet(&ships));
    }
}
