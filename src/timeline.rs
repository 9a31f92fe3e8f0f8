use crate::board::Board;
use crate::chess_move::Move;
use crate::game::{GameState, TimingRules};
use log::{debug, trace};

/// The signature listeners are called with: the index of the first
/// generation that changed (counted from the start of the game) and the
/// moves that now stand from that point on.  A broadcast layer can forward
/// just this delta instead of the whole history.
pub type Listener = Box<dyn FnMut(usize, &[Move]) + Send>;

/// The owner of a game's history: an append-only log of `GameState`
/// generations, oldest first, starting with the initial state.
///
/// This is the only mutable thing in the crate, and it exists because moves
/// arrive over a network: a move may describe an instant *earlier* than the
/// newest state, so it cannot simply be appended.  `make_move` finds the
/// latest generation at or before the move's timestamp, replays everything
/// after it with the new move slotted in, silently drops whatever stopped
/// being legal, and splices the rebuilt suffix back on.  Listeners hear
/// about every splice.
///
/// Calls are not synchronized internally; feed a timeline from one place at
/// a time, or put it behind a lock.
///
/// ```
/// use royale::{GameTimeline, Move, Color, Square, TimingRules};
/// use std::str::FromStr;
///
/// let mut game = GameTimeline::new(0, TimingRules::default());
/// let e2 = Square::from_str("e2").unwrap();
/// let e4 = Square::from_str("e4").unwrap();
///
/// game.make_move(Move::new(Color::White, 4001, e2, e4));
/// assert_eq!(game.moves_since(0).len(), 1);
/// ```
pub struct GameTimeline {
    states: Vec<GameState>,
    listeners: Vec<Listener>,
}

impl GameTimeline {
    /// Start a game at `start_time` from the standard position.
    pub fn new(start_time: i64, rules: TimingRules) -> GameTimeline {
        GameTimeline {
            states: vec![GameState::initial(start_time, rules)],
            listeners: vec![],
        }
    }

    /// Start a game at `start_time` from an arbitrary board.
    pub fn new_with_board(board: Board, start_time: i64, rules: TimingRules) -> GameTimeline {
        GameTimeline {
            states: vec![GameState::with_board(board, start_time, rules)],
            listeners: vec![],
        }
    }

    /// Register a listener.  On every accepted move it receives
    /// `(start_index, moves)`: the moves now standing from generation
    /// `start_index` onward.  For a plain append that is one move; after a
    /// resynchronization it is the whole rebuilt suffix.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: FnMut(usize, &[Move]) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// The newest state.
    #[inline]
    pub fn current(&self) -> &GameState {
        self.states.last().expect("a timeline always holds its initial state")
    }

    /// Convenience function for getting the current board.
    #[inline]
    pub fn board(&self) -> &Board {
        self.current().board()
    }

    /// When the game started.
    #[inline]
    pub fn start_time(&self) -> i64 {
        self.states[0].current_time()
    }

    /// How many moves stand in the canonical history.  The number of
    /// generations is always one more than this.
    #[inline]
    pub fn num_moves(&self) -> usize {
        self.states.len() - 1
    }

    /// Has a king been captured?
    pub fn game_over(&self) -> bool {
        self.current().status() != crate::board::BoardStatus::Ongoing
    }

    /// The latest generation whose timestamp is at or before the move's.
    /// `None` means the move predates the game itself.
    fn graft_point(&self, mv: Move) -> Option<usize> {
        self.states
            .iter()
            .rposition(|state| state.current_time() <= mv.get_time())
    }

    /// Would `mv` be accepted right now?  Callers that need feedback ask
    /// this first; `make_move` itself drops bad moves silently.
    pub fn is_legal_move(&self, mv: Move) -> bool {
        if self.game_over() {
            return false;
        }
        match self.graft_point(mv) {
            Some(graft) => self.states[graft].is_legal(mv),
            None => false,
        }
    }

    /// Try to add `mv` to the game.  Illegal and ungraftable moves are
    /// dropped without a trace; an accepted move is grafted in at its
    /// timestamp, and every recorded move after that instant is replayed on
    /// top of it.  A replayed move that is no longer legal (its resource or
    /// its square got used first) is pruned from the history rather than
    /// failing anything.
    pub fn make_move(&mut self, mv: Move) {
        if self.game_over() {
            trace!("dropping {}: game is over", mv);
            return;
        }
        let graft = match self.graft_point(mv) {
            Some(graft) => graft,
            None => {
                debug!("dropping {}: timestamp predates the game", mv);
                return;
            }
        };
        if !self.states[graft].is_legal(mv) {
            trace!("dropping {}: not legal where it grafts", mv);
            return;
        }

        // everything after the graft point happened later than the new
        // move, so the replay order is simply the new move first
        let mut candidates = Vec::with_capacity(self.states.len() - graft);
        candidates.push(mv);
        candidates.extend(
            self.states[graft + 1..]
                .iter()
                .map(|state| state.last_move().expect("later generations record their move")),
        );
        let candidate_count = candidates.len();
        if candidate_count > 1 {
            trace!(
                "grafting {} at generation {}, replaying {} later move(s)",
                mv,
                graft,
                candidate_count - 1
            );
        }

        self.states.truncate(graft + 1);
        let mut accepted = Vec::with_capacity(candidate_count);
        for candidate in candidates {
            let tip = self.states.last().expect("a timeline always holds its initial state");
            if tip.is_legal(candidate) {
                let next = tip.make_move(candidate);
                self.states.push(next);
                accepted.push(candidate);
            }
        }
        if accepted.len() < candidate_count {
            debug!(
                "resync pruned {} move(s) that stopped being legal",
                candidate_count - accepted.len()
            );
        }

        let start_index = graft + 1;
        for listener in self.listeners.iter_mut() {
            listener(start_index, &accepted);
        }
    }

    /// Every canonical move from the `index`th onward (zero-based).  Out of
    /// range simply yields an empty list.
    pub fn moves_since(&self, index: usize) -> Vec<Move> {
        self.states
            .iter()
            .skip(index + 1)
            .map(|state| state.last_move().expect("later generations record their move"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_builder::BoardBuilder;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::square::Square;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::str::FromStr;
    use std::sync::{Arc, Mutex};

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    fn mv(color: Color, time: i64, from: &str, to: &str) -> Move {
        Move::new(color, time, sq(from), sq(to))
    }

    #[test]
    fn appending_in_order() {
        let mut game = GameTimeline::new(0, TimingRules::default());
        game.make_move(mv(Color::White, 4001, "e2", "e4"));
        game.make_move(mv(Color::Black, 4001, "e7", "e5"));

        assert_eq!(game.num_moves(), 2);
        let expected = Board::default()
            .make_move(sq("e2"), sq("e4"))
            .make_move(sq("e7"), sq("e5"));
        assert_eq!(*game.board(), expected);
    }

    #[test]
    fn illegal_moves_change_nothing() {
        let mut game = GameTimeline::new(0, TimingRules::default());
        let before = game.board().clone();

        game.make_move(mv(Color::White, 3999, "e2", "e4")); // too early
        game.make_move(mv(Color::White, 4001, "e2", "e5")); // not chess
        game.make_move(mv(Color::Black, 4001, "e2", "e4")); // not black's pawn
        game.make_move(mv(Color::White, -5, "e2", "e4")); // before the game

        assert_eq!(game.num_moves(), 0);
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn a_move_from_before_the_game_is_rejected() {
        let mut game = GameTimeline::new(10_000, TimingRules::default());
        assert!(!game.is_legal_move(mv(Color::White, 9_999, "e2", "e4")));
        game.make_move(mv(Color::White, 9_999, "e2", "e4"));
        assert_eq!(game.num_moves(), 0);
    }

    #[test]
    fn listeners_hear_appends_and_resyncs() {
        let heard: Arc<Mutex<Vec<(usize, Vec<Move>)>>> = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&heard);

        let mut game = GameTimeline::new(0, TimingRules::default());
        game.add_listener(move |start, moves| {
            sink.lock().unwrap().push((start, moves.to_vec()));
        });

        let white_first = mv(Color::White, 4001, "e2", "e4");
        let black_late = mv(Color::Black, 8002, "e7", "e5");
        let black_early = mv(Color::Black, 4001, "d7", "d5");
        game.make_move(white_first);
        game.make_move(black_late);
        // an out-of-order arrival: grafts between the two existing moves
        game.make_move(black_early);

        let heard = heard.lock().unwrap();
        assert_eq!(heard.len(), 3);
        assert_eq!(heard[0], (1, vec![white_first]));
        assert_eq!(heard[1], (2, vec![black_late]));
        assert_eq!(heard[2], (2, vec![black_early, black_late]));
    }

    #[test]
    fn out_of_order_arrival_matches_in_order_arrival() {
        let sequence = [
            mv(Color::White, 4001, "e2", "e4"),
            mv(Color::Black, 4500, "e7", "e5"),
            mv(Color::White, 8002, "g1", "f3"),
            mv(Color::Black, 8500, "b8", "c6"),
        ];

        let mut in_order = GameTimeline::new(0, TimingRules::default());
        for m in sequence.iter() {
            in_order.make_move(*m);
        }

        let mut scrambled = GameTimeline::new(0, TimingRules::default());
        scrambled.make_move(sequence[1]);
        scrambled.make_move(sequence[0]);
        scrambled.make_move(sequence[3]);
        scrambled.make_move(sequence[2]);

        assert_eq!(*scrambled.board(), *in_order.board());
        assert_eq!(scrambled.moves_since(0), in_order.moves_since(0));
    }

    #[test]
    fn every_permutation_of_independent_moves_converges() {
        // six moves that are each legal from the start and never interact
        let canonical = [
            mv(Color::White, 4001, "a2", "a3"),
            mv(Color::Black, 4002, "h7", "h6"),
            mv(Color::White, 8003, "b2", "b3"),
            mv(Color::Black, 8004, "g7", "g6"),
            mv(Color::White, 12005, "c2", "c3"),
            mv(Color::Black, 12006, "f7", "f6"),
        ];
        let mut reference = GameTimeline::new(0, TimingRules::default());
        for m in canonical.iter() {
            reference.make_move(*m);
        }
        assert_eq!(reference.num_moves(), canonical.len());

        let mut rng = SmallRng::seed_from_u64(0x0ddba11);
        for _ in 0..20 {
            let mut shuffled = canonical;
            shuffled.shuffle(&mut rng);

            let mut game = GameTimeline::new(0, TimingRules::default());
            for m in shuffled.iter() {
                game.make_move(*m);
            }
            assert_eq!(*game.board(), *reference.board());
            assert_eq!(game.moves_since(0), reference.moves_since(0));
        }
    }

    #[test]
    fn replaying_a_history_is_deterministic() {
        let moves = [
            mv(Color::White, 4001, "e2", "e4"),
            mv(Color::Black, 4200, "d7", "d5"),
            mv(Color::White, 8002, "e4", "d5"),
            mv(Color::Black, 8400, "d8", "d5"),
        ];
        let mut first = GameTimeline::new(0, TimingRules::default());
        let mut second = GameTimeline::new(0, TimingRules::default());
        for m in moves.iter() {
            first.make_move(*m);
            second.make_move(*m);
        }
        assert_eq!(first.num_moves(), moves.len());
        for i in 0..moves.len() {
            assert_eq!(first.moves_since(i), second.moves_since(i));
        }
        assert_eq!(*first.board(), *second.board());
    }

    #[test]
    fn an_inserted_move_can_prune_a_later_one() {
        let mut game = GameTimeline::new(0, TimingRules::default());
        game.make_move(mv(Color::White, 4001, "e2", "e4"));
        // legal when it arrives: white has a resource banked at 8100
        game.make_move(mv(Color::White, 8100, "d2", "d4"));
        assert_eq!(game.num_moves(), 2);

        let heard: Arc<Mutex<Vec<(usize, Vec<Move>)>>> = Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&heard);
        game.add_listener(move |start, moves| {
            sink.lock().unwrap().push((start, moves.to_vec()));
        });

        // an earlier white move arrives late and spends the same resource,
        // so the d-pawn move no longer happened
        let inserted = mv(Color::White, 8002, "c2", "c4");
        game.make_move(inserted);

        assert_eq!(game.num_moves(), 2);
        assert_eq!(
            game.moves_since(0),
            vec![mv(Color::White, 4001, "e2", "e4"), inserted]
        );
        assert_eq!(game.board().piece_on(sq("c4")), Some(Piece::Pawn));
        assert_eq!(game.board().piece_on(sq("d4")), None);
        assert_eq!(game.board().piece_on(sq("d2")), Some(Piece::Pawn));

        let heard = heard.lock().unwrap();
        assert_eq!(heard.len(), 1);
        assert_eq!(heard[0], (2, vec![inserted]));
    }

    #[test]
    fn an_intervening_move_closes_the_en_passant_window() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("e8"), Piece::King, Color::Black)
                .piece(sq("e2"), Piece::Pawn, Color::White)
                .piece(sq("d4"), Piece::Pawn, Color::Black)
                .piece(sq("h7"), Piece::Pawn, Color::Black),
        );
        let rules = TimingRules::default();

        // without the intervening move the capture works
        let mut game = GameTimeline::new_with_board(board.clone(), 0, rules);
        game.make_move(mv(Color::White, 4001, "e2", "e4"));
        assert!(game.is_legal_move(mv(Color::Black, 8002, "d4", "e3")));

        // but any other black move first burns the window
        let mut game = GameTimeline::new_with_board(board, 0, rules);
        game.make_move(mv(Color::White, 4001, "e2", "e4"));
        game.make_move(mv(Color::Black, 4002, "h7", "h6"));
        game.make_move(mv(Color::Black, 8003, "d4", "e3"));
        assert_eq!(game.num_moves(), 2);
        assert_eq!(game.board().piece_on(sq("e4")), Some(Piece::Pawn));
    }

    #[test]
    fn the_game_ends_when_a_king_falls() {
        let board = Board::from(
            BoardBuilder::new()
                .piece(sq("d1"), Piece::Queen, Color::White)
                .piece(sq("e1"), Piece::King, Color::White)
                .piece(sq("d8"), Piece::King, Color::Black)
                .piece(sq("h7"), Piece::Pawn, Color::Black),
        );
        let mut game = GameTimeline::new_with_board(board, 0, TimingRules::default());
        game.make_move(mv(Color::White, 4001, "d1", "d8"));

        assert!(game.game_over());
        game.make_move(mv(Color::Black, 8002, "h7", "h6"));
        assert_eq!(game.num_moves(), 1);
    }
}
