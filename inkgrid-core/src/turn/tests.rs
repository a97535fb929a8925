use super::*;
use alloc::string::ToString;

fn board_from(raw_rows: &[&[u8]]) -> Board {
    let rows = raw_rows.len();
    let cols = raw_rows[0].len();
    let mut cells = Vec::with_capacity(rows * cols);
    for raw_row in raw_rows {
        assert_eq!(raw_row.len(), cols);
        for &raw in raw_row.iter() {
            cells.push(Cell::from_raw(raw).expect("test board cell must be valid"));
        }
    }
    Board::from_cells(rows, cols, cells)
}

fn raw_rows(board: &Board) -> Vec<Vec<u8>> {
    (0..board.rows())
        .map(|row| {
            (0..board.cols())
                .map(|col| board.get(row, col).raw())
                .collect()
        })
        .collect()
}

fn painter(row: usize, col: usize, dir: Direction, team: u8) -> Painter {
    Painter::new(row, col, dir, team, "p".to_string())
}

fn turn_with(board: Board, painters: Vec<Option<Painter>>) -> Turn {
    let slots = painters.len();
    Turn::from_parts(board, painters, vec![None; slots])
}

fn assert_invariant_violation(mutate: impl FnOnce(&mut Turn), expected: InvariantCode) {
    let board = board_from(&[&[10, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
    let mut turn = turn_with(board, vec![Some(painter(0, 0, Direction::Stop, 1))]);
    turn.validate_invariants()
        .expect("baseline turn must be valid");
    mutate(&mut turn);
    assert_eq!(turn.validate_invariants(), Err(expected));
}

#[test]
fn evolve_moves_painters_and_leaves_source_untouched() {
    let board = board_from(&[&[0, 0, 0], &[10, 0, 0], &[0, 0, 20]]);
    let painters = vec![
        Some(painter(1, 0, Direction::Stop, 1)),
        Some(painter(2, 2, Direction::Stop, 2)),
    ];
    let mut turn = turn_with(board, painters);

    assert!(turn.set_input(0, Direction::Down));
    assert!(turn.set_input(0, Direction::Up));
    assert_eq!(turn.pending_inputs()[0], Some(Direction::Up));

    let source_copy = turn.clone();
    let next = turn.evolve();

    assert_eq!(turn, source_copy, "evolve must not modify its input");

    assert_eq!(
        raw_rows(next.board()),
        vec![vec![10, 0, 0], vec![10, 0, 0], vec![0, 0, 20]]
    );
    let moved = next.painter(0).unwrap();
    assert_eq!((moved.row, moved.col), (0, 0));
    assert_eq!(moved.dir, Direction::Up);
    let still = next.painter(1).unwrap();
    assert_eq!((still.row, still.col), (2, 2));
    assert_eq!(still.dir, Direction::Stop);
    assert_eq!(next.pending_inputs(), &[None, None]);
}

#[test]
fn evolve_is_deterministic() {
    let board = board_from(&[&[0, 0, 0, 0], &[10, 0, 20, 0], &[0, 0, 0, 0]]);
    let mut turn = turn_with(
        board,
        vec![
            Some(painter(1, 0, Direction::Right, 1)),
            Some(painter(1, 2, Direction::Down, 2)),
        ],
    );
    turn.set_input(1, Direction::Right);

    assert_eq!(turn.evolve(), turn.evolve());
}

#[test]
fn evolve_with_no_painters_is_a_noop() {
    let turn = Turn::new(4, 4);
    let next = turn.evolve();
    assert_eq!(next.board(), turn.board());
    assert!(next.painters().is_empty());
    assert!(next.pending_inputs().is_empty());
}

#[test]
fn set_input_without_painter_slot_is_rejected() {
    let mut turn = Turn::new(3, 3);
    assert!(!turn.set_input(0, Direction::Right));

    let board = board_from(&[&[10, 0], &[0, 0]]);
    let mut sparse = turn_with(board, vec![Some(painter(0, 0, Direction::Stop, 1)), None]);
    assert!(!sparse.set_input(1, Direction::Left));
    assert!(!sparse.set_input(7, Direction::Left));
}

#[test]
fn opposite_input_is_ignored_while_moving() {
    let board = board_from(&[&[0, 0, 0, 0], &[10, 0, 0, 0], &[0, 0, 0, 0]]);
    let mut turn = turn_with(board, vec![Some(painter(1, 0, Direction::Right, 1))]);
    turn.set_input(0, Direction::Left);

    let next = turn.evolve();
    let moved = next.painter(0).unwrap();
    assert_eq!((moved.row, moved.col), (1, 1));
    assert_eq!(moved.dir, Direction::Right);
}

#[test]
fn board_edge_forces_stop_without_painting() {
    let board = board_from(&[&[0, 10, 0], &[0, 0, 0], &[0, 0, 0]]);
    let turn = turn_with(board, vec![Some(painter(0, 1, Direction::Up, 1))]);

    let next = turn.evolve();
    let stopped = next.painter(0).unwrap();
    assert_eq!((stopped.row, stopped.col), (0, 1));
    assert_eq!(stopped.dir, Direction::Stop);
    assert_eq!(next.board(), turn.board());
    assert_eq!(stopped.points, 0);
}

#[test]
fn battle_lowest_id_wins_and_loser_reverts() {
    let mut painters: Vec<Option<Painter>> = vec![None; 6];
    painters[2] = Some(painter(3, 2, Direction::Right, 1));
    painters[5] = Some(painter(3, 4, Direction::Left, 2));
    let mut board = Board::new(5, 5);
    board.set(3, 2, Cell::trail(1));
    board.set(3, 4, Cell::trail(2));
    let turn = turn_with(board, painters);

    let next = turn.evolve();

    let winner = next.painter(2).unwrap();
    assert_eq!((winner.row, winner.col), (3, 3));
    assert_eq!(winner.dir, Direction::Right);
    assert_eq!(next.board().cell_at(3, 3), Some(Cell::trail(1)));

    let loser = next.painter(5).unwrap();
    assert_eq!((loser.row, loser.col), (3, 4));
    assert_eq!(loser.dir, Direction::Stop);
    assert_eq!(next.board().cell_at(3, 4), Some(Cell::trail(2)));
}

#[test]
fn mover_cannot_displace_stationary_occupant() {
    let mut board = Board::new(5, 5);
    board.set(2, 1, Cell::trail(1));
    board.set(2, 2, Cell::trail(2));
    let turn = turn_with(
        board,
        vec![
            Some(painter(2, 1, Direction::Right, 1)),
            Some(painter(2, 2, Direction::Stop, 2)),
        ],
    );

    let next = turn.evolve();

    let mover = next.painter(0).unwrap();
    assert_eq!((mover.row, mover.col), (2, 1));
    assert_eq!(mover.dir, Direction::Stop);
    let occupant = next.painter(1).unwrap();
    assert_eq!((occupant.row, occupant.col), (2, 2));
    assert_eq!(next.board(), turn.board());
}

#[test]
fn mover_into_battle_losers_old_cell_reverts_too() {
    let mut board = Board::new(5, 5);
    board.set(1, 1, Cell::trail(1));
    board.set(3, 2, Cell::trail(3));
    board.set(1, 2, Cell::trail(2));
    let turn = turn_with(
        board,
        vec![
            Some(painter(1, 1, Direction::Right, 1)),
            Some(painter(3, 2, Direction::Up, 3)),
            Some(painter(1, 2, Direction::Down, 2)),
        ],
    );

    let next = turn.evolve();

    // id 1 underbids id 2 for (2, 2) and completes its move.
    let winner = next.painter(1).unwrap();
    assert_eq!((winner.row, winner.col), (2, 2));
    assert_eq!(next.board().cell_at(2, 2), Some(Cell::trail(3)));

    // id 2 reverts and now holds (1, 2), so id 0 reverts as well even
    // though it has the lowest id of all three.
    let blocked_loser = next.painter(2).unwrap();
    assert_eq!((blocked_loser.row, blocked_loser.col), (1, 2));
    assert_eq!(blocked_loser.dir, Direction::Stop);

    let chained = next.painter(0).unwrap();
    assert_eq!((chained.row, chained.col), (1, 1));
    assert_eq!(chained.dir, Direction::Stop);
}

#[test]
fn painters_swapping_cells_pass_through() {
    let mut board = Board::new(3, 4);
    board.set(1, 1, Cell::trail(1));
    board.set(1, 2, Cell::trail(2));
    let turn = turn_with(
        board,
        vec![
            Some(painter(1, 1, Direction::Right, 1)),
            Some(painter(1, 2, Direction::Left, 2)),
        ],
    );

    let next = turn.evolve();
    assert_eq!(
        (next.painter(0).unwrap().row, next.painter(0).unwrap().col),
        (1, 2)
    );
    assert_eq!(
        (next.painter(1).unwrap().row, next.painter(1).unwrap().col),
        (1, 1)
    );
    assert_eq!(next.board().cell_at(1, 2), Some(Cell::trail(1)));
    assert_eq!(next.board().cell_at(1, 1), Some(Cell::trail(2)));
}

#[test]
fn reinforcing_own_trail_levels_up_and_scores() {
    let board = board_from(&[&[10, 12, 0], &[0, 0, 0], &[0, 0, 0]]);
    let turn = turn_with(board, vec![Some(painter(0, 0, Direction::Right, 1))]);

    let next = turn.evolve();
    assert_eq!(next.board().cell_at(0, 1).unwrap().raw(), 13);
    assert_eq!(next.painter(0).unwrap().points, 1);
}

#[test]
fn fourth_reinforcement_fixes_the_cell() {
    let board = board_from(&[
        &[0, 0, 0, 0],
        &[10, 13, 0, 0],
        &[0, 0, 0, 0],
        &[0, 0, 0, 0],
    ]);
    let turn = turn_with(board, vec![Some(painter(1, 0, Direction::Right, 1))]);

    let next = turn.evolve();
    let cell = next.board().cell_at(1, 1).unwrap();
    assert!(cell.is_fixed());
    assert_eq!(cell.raw(), 14);
    // Nothing is enclosed on an open board, so only the reinforcement point.
    assert_eq!(next.painter(0).unwrap().points, 1);
}

#[test]
fn closing_a_ring_claims_the_interior() {
    let board = board_from(&[
        &[0, 0, 10, 0, 0],
        &[0, 14, 13, 14, 0],
        &[0, 14, 0, 14, 0],
        &[0, 14, 14, 14, 0],
        &[0, 0, 0, 0, 0],
    ]);
    let turn = turn_with(board, vec![Some(painter(0, 2, Direction::Down, 1))]);

    let next = turn.evolve();

    assert_eq!(next.board().cell_at(1, 2), Some(Cell::fixed(1)));
    assert_eq!(
        next.board().cell_at(2, 2),
        Some(Cell::fixed(1)),
        "interior pocket must be converted"
    );
    // One reinforcement point plus five per enclosed cell.
    assert_eq!(next.painter(0).unwrap().points, 6);
    // The outside stays untouched.
    assert_eq!(next.board().cell_at(0, 0), Some(Cell::EMPTY));
    assert_eq!(next.board().cell_at(4, 2), Some(Cell::EMPTY));
}

#[test]
fn open_ring_leaves_the_interior_untouched() {
    let board = board_from(&[
        &[0, 0, 10, 0, 0],
        &[0, 14, 13, 14, 0],
        &[0, 14, 0, 14, 0],
        &[0, 14, 0, 14, 0],
        &[0, 0, 0, 0, 0],
    ]);
    let turn = turn_with(board, vec![Some(painter(0, 2, Direction::Down, 1))]);

    let next = turn.evolve();

    assert_eq!(next.board().cell_at(1, 2), Some(Cell::fixed(1)));
    assert_eq!(
        next.board().cell_at(2, 2),
        Some(Cell::EMPTY),
        "a leaky ring claims nothing"
    );
    assert_eq!(next.painter(0).unwrap().points, 1);
}

#[test]
fn enclosure_converts_enemy_cells_inside_the_pocket() {
    let board = board_from(&[
        &[0, 0, 10, 0, 0],
        &[0, 14, 13, 14, 0],
        &[0, 14, 24, 14, 0],
        &[0, 14, 14, 14, 0],
        &[0, 0, 0, 0, 0],
    ]);
    let turn = turn_with(board, vec![Some(painter(0, 2, Direction::Down, 1))]);

    let next = turn.evolve();
    assert_eq!(next.board().cell_at(2, 2), Some(Cell::fixed(1)));
    assert_eq!(next.painter(0).unwrap().points, 6);
}

#[test]
fn walls_are_never_repainted() {
    let board = board_from(&[&[10, 24, 0], &[30, 34, 0], &[0, 0, 0]]);
    let turn = turn_with(
        board,
        vec![
            Some(painter(0, 0, Direction::Right, 1)),
            Some(painter(1, 0, Direction::Right, 3)),
        ],
    );

    let next = turn.evolve();

    // Onto another team's wall: the painter is there, the cell is not.
    let intruder = next.painter(0).unwrap();
    assert_eq!((intruder.row, intruder.col), (0, 1));
    assert_eq!(next.board().cell_at(0, 1).unwrap().raw(), 24);
    assert_eq!(intruder.points, 0);

    // Onto its own wall: no level past four, no point.
    let homebody = next.painter(1).unwrap();
    assert_eq!((homebody.row, homebody.col), (1, 1));
    assert_eq!(next.board().cell_at(1, 1).unwrap().raw(), 34);
    assert_eq!(homebody.points, 0);
}

#[test]
fn enemy_trail_is_overwritten_outright() {
    let board = board_from(&[&[10, 23, 0], &[0, 0, 0], &[0, 0, 0]]);
    let turn = turn_with(board, vec![Some(painter(0, 0, Direction::Right, 1))]);

    let next = turn.evolve();
    // The level the other team built up resets under the new owner.
    assert_eq!(next.board().cell_at(0, 1), Some(Cell::trail(1)));
    assert_eq!(next.painter(0).unwrap().points, 0);
}

#[test]
fn dead_painters_are_skipped_entirely() {
    let mut board = Board::new(3, 3);
    board.set(1, 1, Cell::trail(1));
    let mut dead = painter(1, 1, Direction::Right, 1);
    dead.alive = false;
    let mut turn = turn_with(board, vec![Some(dead)]);
    turn.set_input(0, Direction::Down);

    let next = turn.evolve();
    let unchanged = next.painter(0).unwrap();
    assert_eq!((unchanged.row, unchanged.col), (1, 1));
    assert_eq!(unchanged.dir, Direction::Right);
    assert_eq!(next.board(), turn.board());
}

#[test]
fn add_painter_takes_a_free_cell_and_heads_inward() {
    let mut turn = Turn::new(3, 3);
    for row in 0..3 {
        for col in 0..3 {
            if (row, col) != (1, 1) {
                turn.board.set(row, col, Cell::trail(2));
            }
        }
    }
    let mut rng = SeededRng::new(0xBEEF_FACE);

    assert!(turn.add_painter(0, 1, "ada".to_string(), &mut rng));
    let seeded = turn.painter(0).unwrap();
    assert_eq!((seeded.row, seeded.col), (1, 1));
    assert_eq!(seeded.dir, Direction::Right);
    assert_eq!(turn.board.cell_at(1, 1), Some(Cell::trail(1)));
    assert_eq!(turn.pending_inputs().len(), 1);

    // The slot is taken now.
    assert!(!turn.add_painter(0, 2, "bob".to_string(), &mut rng));
}

#[test]
fn add_painter_fails_on_a_full_board() {
    let mut turn = Turn::new(2, 2);
    for row in 0..2 {
        for col in 0..2 {
            turn.board.set(row, col, Cell::fixed(2));
        }
    }
    let mut rng = SeededRng::new(1);
    assert!(!turn.add_painter(0, 1, "ada".to_string(), &mut rng));
    assert!(turn.painter(0).is_none());
}

#[test]
fn seeding_is_deterministic_for_the_same_seed() {
    let build = || {
        let mut turn = Turn::new(10, 10);
        let mut rng = SeededRng::new(0x1234_5678);
        for (id, team) in [(0usize, 1u8), (1, 2), (2, 3)] {
            assert!(turn.add_painter(id, team, "p".to_string(), &mut rng));
        }
        turn
    };
    assert_eq!(build(), build());
}

#[test]
fn remove_painter_frees_trail_but_keeps_fixed_territory() {
    let board = board_from(&[&[10, 0, 0], &[0, 14, 0], &[0, 0, 0]]);
    let mut turn = turn_with(
        board,
        vec![
            Some(painter(0, 0, Direction::Stop, 1)),
            Some(painter(1, 1, Direction::Stop, 1)),
        ],
    );

    assert!(turn.remove_painter(0));
    assert_eq!(turn.board.cell_at(0, 0), Some(Cell::EMPTY));
    assert!(turn.painter(0).is_none());
    assert!(!turn.set_input(0, Direction::Right));

    assert!(turn.remove_painter(1));
    assert_eq!(turn.board.cell_at(1, 1), Some(Cell::fixed(1)));

    // Removing an empty or unknown slot is a no-op.
    assert!(!turn.remove_painter(0));
    assert!(!turn.remove_painter(42));
}

#[test]
fn invariant_checks_report_expected_codes() {
    assert_invariant_violation(
        |turn| turn.pending_inputs.push(None),
        InvariantCode::InputSlotCount,
    );
    assert_invariant_violation(
        |turn| {
            if let Some(painter) = turn.painters[0].as_mut() {
                painter.row = 99;
            }
        },
        InvariantCode::PainterBounds,
    );
    assert_invariant_violation(
        |turn| {
            if let Some(painter) = turn.painters[0].as_mut() {
                painter.team = 7;
            }
        },
        InvariantCode::PainterTeamRange,
    );
}
