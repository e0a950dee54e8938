//! Move generation and validation.
//!
//! `MoveGenerator` answers two questions for the side to move:
//! - is this `(source, destination)` legal, and if so what does it do?
//! - which destinations are legal from this node?
//!
//! It borrows a [`Topology`] and never mutates anything. Goat and tiger
//! rules share one validation path; the only role-specific branches are
//! placement (goats, placement phase) and capture (tigers).
//!
//! ## Captures
//!
//! A tiger on `S` captures the goat on `M` by landing on `D`, where
//! `D` is `S` reflected through `M` in grid coordinates. The jump is only
//! legal if `M` neighbours `S` *and* `D` neighbours `M` in the topology.
//! The second check matters at irregular junctions: from a node without
//! diagonals, grid arithmetic alone would happily produce a diagonal jump
//! that no board line carries.

use smallvec::SmallVec;

use crate::core::{Board, Cell, GameState, LegalMove, Move, NodeId, Phase, Side, Topology};
use crate::error::Rejection;

/// Legal destinations from one node. A node has at most eight neighbours,
/// and every capture consumes one of them, so eight slots always suffice.
pub type LegalMoves = SmallVec<[LegalMove; 8]>;

/// Validates and enumerates moves against a topology.
#[derive(Clone, Copy, Debug)]
pub struct MoveGenerator<'a> {
    topology: &'a Topology,
}

impl<'a> MoveGenerator<'a> {
    /// Create a move generator over `topology`.
    #[must_use]
    pub fn new(topology: &'a Topology) -> Self {
        Self { topology }
    }

    /// The topology moves are checked against.
    #[must_use]
    pub fn topology(&self) -> &'a Topology {
        self.topology
    }

    /// Validate a proposed move for the side to move.
    ///
    /// During goat placement the source index is not consulted; callers
    /// conventionally pass the destination twice.
    ///
    /// Does not look at the terminal tag; the engine rejects moves on a
    /// finished game before asking.
    pub fn validate(
        &self,
        state: &GameState,
        source: usize,
        destination: usize,
    ) -> Result<Move, Rejection> {
        let board = state.board();
        let side = state.active_side();

        let to = node(destination)?;

        if side == Side::Goat && state.phase() == Phase::Placement {
            return if board.is_empty(to) {
                Ok(Move::Place { to })
            } else {
                Err(Rejection::IllegalDestination { to })
            };
        }

        let from = node(source)?;
        if board.get(from) != side.piece() {
            return Err(Rejection::WrongOwner { node: from, side });
        }

        if self.topology.is_neighbor(from, to) {
            return if board.is_empty(to) {
                Ok(Move::Step { from, to })
            } else {
                Err(Rejection::IllegalDestination { to })
            };
        }

        if side == Side::Tiger {
            if let Some(over) = jump_midpoint(from, to) {
                return self.validate_capture(board, from, over, to);
            }
        }

        Err(Rejection::IllegalDestination { to })
    }

    fn validate_capture(
        &self,
        board: &Board,
        from: NodeId,
        over: NodeId,
        to: NodeId,
    ) -> Result<Move, Rejection> {
        if !self.topology.is_neighbor(from, over) || !self.topology.is_neighbor(over, to) {
            return Err(Rejection::CaptureGeometryInvalid { from, to });
        }
        if board.get(over) != Cell::Goat || !board.is_empty(to) {
            return Err(Rejection::IllegalDestination { to });
        }
        Ok(Move::Capture { from, over, to })
    }

    /// Landing node for a tiger on `from` jumping the piece on `over`.
    ///
    /// Reflects `from` through `over` and keeps the result only if it is on
    /// the board and connected to `over`. Occupancy is not checked.
    #[must_use]
    pub fn capture_landing(&self, from: NodeId, over: NodeId) -> Option<NodeId> {
        if !self.topology.is_neighbor(from, over) {
            return None;
        }
        from.reflect_through(over)
            .filter(|&to| self.topology.is_neighbor(over, to))
    }

    /// Legal destinations from `node` for the side to move, ascending.
    ///
    /// Empty if the node is off the board or does not hold a piece of the
    /// side to move, and for goats during placement (placements have no
    /// source; see [`placements`](Self::placements)).
    pub fn legal_moves(&self, state: &GameState, node: usize) -> LegalMoves {
        let mut moves = LegalMoves::new();
        let Some(from) = NodeId::new(node) else {
            return moves;
        };

        let side = state.active_side();
        let board = state.board();
        if board.get(from) != side.piece() {
            return moves;
        }
        if side == Side::Goat && state.phase() == Phase::Placement {
            return moves;
        }

        for mid in self.topology.neighbors(from) {
            match board.get(mid) {
                Cell::Empty => moves.push(LegalMove {
                    destination: mid,
                    is_capture: false,
                }),
                Cell::Goat if side == Side::Tiger => {
                    if let Some(to) = self.capture_landing(from, mid) {
                        if board.is_empty(to) {
                            moves.push(LegalMove {
                                destination: to,
                                is_capture: true,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        moves.sort_unstable_by_key(|m| m.destination);
        moves
    }

    /// Empty nodes a goat may be placed on.
    ///
    /// Empty outside the goat's placement turns.
    pub fn placements<'s>(&self, state: &'s GameState) -> impl Iterator<Item = NodeId> + 's {
        let placing = state.active_side() == Side::Goat && state.phase() == Phase::Placement;
        state
            .board()
            .nodes_with(Cell::Empty)
            .filter(move |_| placing)
    }

    /// Every legal move for the side to move.
    ///
    /// Placements in node order, otherwise grouped by source node and then
    /// by destination.
    pub fn all_moves(&self, state: &GameState) -> Vec<Move> {
        let side = state.active_side();
        if side == Side::Goat && state.phase() == Phase::Placement {
            return self.placements(state).map(|to| Move::Place { to }).collect();
        }

        let mut out = Vec::new();
        for from in state.board().nodes_with(side.piece()) {
            for lm in self.legal_moves(state, from.index()) {
                let mv = if lm.is_capture {
                    // The jumped goat sits on the grid midpoint.
                    match jump_midpoint(from, lm.destination) {
                        Some(over) => Move::Capture {
                            from,
                            over,
                            to: lm.destination,
                        },
                        None => continue,
                    }
                } else {
                    Move::Step {
                        from,
                        to: lm.destination,
                    }
                };
                out.push(mv);
            }
        }
        out
    }

    /// Whether `side` would have any legal move on `board`.
    ///
    /// Goats in the placement phase can move iff the board has an empty
    /// node. Used for the "tigers are trapped" check right after the side
    /// switches.
    #[must_use]
    pub fn has_any_move(&self, board: &Board, side: Side, phase: Phase) -> bool {
        if side == Side::Goat && phase == Phase::Placement {
            return board.count_pieces(Cell::Empty) > 0;
        }

        board.nodes_with(side.piece()).any(|from| {
            self.topology.neighbors(from).any(|mid| match board.get(mid) {
                Cell::Empty => true,
                Cell::Goat if side == Side::Tiger => self
                    .capture_landing(from, mid)
                    .is_some_and(|to| board.is_empty(to)),
                _ => false,
            })
        })
    }
}

fn node(index: usize) -> Result<NodeId, Rejection> {
    NodeId::new(index).ok_or(Rejection::OutOfBounds { index })
}

/// Grid midpoint of a two-step straight jump, if `from -> to` has that shape.
///
/// Both coordinate deltas must be in {-2, 0, 2} and not both zero.
fn jump_midpoint(from: NodeId, to: NodeId) -> Option<NodeId> {
    let dr = to.row() as i32 - from.row() as i32;
    let dc = to.col() as i32 - from.col() as i32;
    let jump = |d: i32| d == 0 || d.abs() == 2;
    if !jump(dr) || !jump(dc) || (dr == 0 && dc == 0) {
        return None;
    }
    NodeId::from_coords(from.row() as i32 + dr / 2, from.col() as i32 + dc / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RulesConfig;

    fn n(i: usize) -> NodeId {
        NodeId::new(i).unwrap()
    }

    /// Build a position from goat nodes; counters are chosen to satisfy the
    /// invariants for the given phase.
    fn position(goats: &[usize], side: Side, phase: Phase) -> GameState {
        let mut board = Board::initial();
        for &g in goats {
            board.set(n(g), Cell::Goat);
        }
        let to_place = match phase {
            Phase::Placement => 20 - goats.len() as u8,
            Phase::Movement => 0,
        };
        let config = match phase {
            Phase::Placement => RulesConfig::default(),
            Phase::Movement => RulesConfig::new()
                .with_goat_count(goats.len() as u8)
                .with_captures_to_win(goats.len().clamp(1, 5) as u8),
        };
        GameState::from_parts(config, board, side, to_place, 0).unwrap()
    }

    fn generator() -> MoveGenerator<'static> {
        MoveGenerator::new(Topology::standard())
    }

    #[test]
    fn test_goat_placement() {
        let state = GameState::default();
        let gen = generator();

        assert_eq!(gen.validate(&state, 12, 12), Ok(Move::Place { to: n(12) }));
        // Source is ignored during placement.
        assert_eq!(gen.validate(&state, 99, 7), Ok(Move::Place { to: n(7) }));
        assert_eq!(
            gen.validate(&state, 0, 0),
            Err(Rejection::IllegalDestination { to: n(0) })
        );
        assert_eq!(
            gen.validate(&state, 3, 25),
            Err(Rejection::OutOfBounds { index: 25 })
        );
    }

    #[test]
    fn test_tiger_step() {
        let state = position(&[12], Side::Tiger, Phase::Placement);
        let gen = generator();

        assert_eq!(gen.validate(&state, 0, 6), Ok(Move::Step { from: n(0), to: n(6) }));
        assert_eq!(gen.validate(&state, 4, 9), Ok(Move::Step { from: n(4), to: n(9) }));
        // Not adjacent, not a jump
        assert_eq!(
            gen.validate(&state, 0, 7),
            Err(Rejection::IllegalDestination { to: n(7) })
        );
    }

    #[test]
    fn test_wrong_owner() {
        let state = position(&[12], Side::Tiger, Phase::Placement);
        let gen = generator();

        assert_eq!(
            gen.validate(&state, 12, 13),
            Err(Rejection::WrongOwner { node: n(12), side: Side::Tiger })
        );
        assert_eq!(
            gen.validate(&state, 1, 2),
            Err(Rejection::WrongOwner { node: n(1), side: Side::Tiger })
        );
        assert_eq!(
            gen.validate(&state, 30, 2),
            Err(Rejection::OutOfBounds { index: 30 })
        );
    }

    #[test]
    fn test_goat_step_movement_phase() {
        let state = position(&[12, 6], Side::Goat, Phase::Movement);
        let gen = generator();

        assert_eq!(gen.validate(&state, 12, 17), Ok(Move::Step { from: n(12), to: n(17) }));
        // Occupied neighbour
        assert_eq!(
            gen.validate(&state, 12, 6),
            Err(Rejection::IllegalDestination { to: n(6) })
        );
        // Goats never jump
        assert_eq!(
            gen.validate(&state, 12, 2),
            Err(Rejection::IllegalDestination { to: n(2) })
        );
        // Tiger piece is not the goat's
        assert_eq!(
            gen.validate(&state, 0, 1),
            Err(Rejection::WrongOwner { node: n(0), side: Side::Goat })
        );
    }

    #[test]
    fn test_orthogonal_capture() {
        let state = position(&[1], Side::Tiger, Phase::Placement);
        assert_eq!(
            generator().validate(&state, 0, 2),
            Ok(Move::Capture { from: n(0), over: n(1), to: n(2) })
        );
    }

    #[test]
    fn test_diagonal_capture() {
        let state = position(&[6], Side::Tiger, Phase::Placement);
        assert_eq!(
            generator().validate(&state, 0, 12),
            Ok(Move::Capture { from: n(0), over: n(6), to: n(12) })
        );
    }

    #[test]
    fn test_capture_needs_goat_and_empty_landing() {
        let gen = generator();

        let state = position(&[], Side::Tiger, Phase::Placement);
        assert_eq!(
            gen.validate(&state, 0, 2),
            Err(Rejection::IllegalDestination { to: n(2) })
        );

        let state = position(&[1, 2], Side::Tiger, Phase::Placement);
        assert_eq!(
            gen.validate(&state, 0, 2),
            Err(Rejection::IllegalDestination { to: n(2) })
        );
    }

    #[test]
    fn test_capture_without_board_line_rejected() {
        // Tiger on 1 (no diagonals) eyeing a diagonal jump over 7 to 13.
        let mut board = Board::empty();
        for t in [1, 4, 20, 24] {
            board.set(n(t), Cell::Tiger);
        }
        board.set(n(7), Cell::Goat);
        let state =
            GameState::from_parts(RulesConfig::default(), board, Side::Tiger, 19, 0).unwrap();

        assert_eq!(
            generator().validate(&state, 1, 13),
            Err(Rejection::CaptureGeometryInvalid { from: n(1), to: n(13) })
        );
    }

    #[test]
    fn test_capture_landing_respects_topology() {
        let gen = generator();
        assert_eq!(gen.capture_landing(n(0), n(1)), Some(n(2)));
        assert_eq!(gen.capture_landing(n(0), n(6)), Some(n(12)));
        // 1 has no diagonal to 7
        assert_eq!(gen.capture_landing(n(1), n(7)), None);
        // Off the board
        assert_eq!(gen.capture_landing(n(1), n(0)), None);
    }

    #[test]
    fn test_legal_moves_initial_tiger() {
        let state = position(&[1], Side::Tiger, Phase::Placement);
        let moves = generator().legal_moves(&state, 0);

        assert_eq!(
            moves.as_slice(),
            &[
                LegalMove { destination: n(2), is_capture: true },
                LegalMove { destination: n(5), is_capture: false },
                LegalMove { destination: n(6), is_capture: false },
            ]
        );
    }

    #[test]
    fn test_legal_moves_empty_cases() {
        let gen = generator();
        let state = GameState::default();

        // Goat to move in placement: no sourced moves
        assert!(gen.legal_moves(&state, 12).is_empty());
        // Tiger node while goats move
        assert!(gen.legal_moves(&state, 0).is_empty());
        // Off the board
        assert!(gen.legal_moves(&state, 40).is_empty());
    }

    #[test]
    fn test_all_moves_placement() {
        let state = GameState::default();
        let moves = generator().all_moves(&state);
        assert_eq!(moves.len(), 21);
        assert!(moves.iter().all(Move::is_placement));
    }

    #[test]
    fn test_all_moves_tiger_initial() {
        let state = position(&[], Side::Tiger, Phase::Placement);
        let moves = generator().all_moves(&state);
        // Each corner has three empty neighbours.
        assert_eq!(moves.len(), 12);
        for mv in &moves {
            let (from, to) = mv.endpoints();
            assert_eq!(generator().validate(&state, from.index(), to.index()), Ok(*mv));
        }
    }

    #[test]
    fn test_has_any_move() {
        let gen = generator();
        let board = Board::initial();
        assert!(gen.has_any_move(&board, Side::Tiger, Phase::Placement));
        assert!(gen.has_any_move(&board, Side::Goat, Phase::Placement));
        assert!(!gen.has_any_move(&board, Side::Goat, Phase::Movement));
    }
}
