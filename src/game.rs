use crate::board::{Board, BoardStatus};
use crate::chess_move::{Move, MoveClass};
use crate::color::{Color, NUM_COLORS};
use crate::square::{Square, NUM_SQUARES};

/// The timing knobs for a game.  These are configuration owned by whatever
/// embeds the core (server, bot harness, replayer), not invariants of the
/// rules; `Default` carries the reference values.
///
/// * `resource_interval`: milliseconds between banked moves ("elixir").
/// * `cooldown`: milliseconds a piece must rest after landing on a square.
/// * `max_bank`: the most moves a player can store up while idle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TimingRules {
    pub resource_interval: i64,
    pub cooldown: i64,
    pub max_bank: i64,
}

impl Default for TimingRules {
    fn default() -> TimingRules {
        TimingRules {
            resource_interval: 4000,
            cooldown: 2000,
            max_bank: 10,
        }
    }
}

/// The state of a game at one instant: a board, each player's resource
/// clock, and when each square last had a piece land on it.
///
/// A `GameState` is immutable once constructed.  `make_move` produces the
/// next state and leaves this one untouched, so states can be chained into
/// a history and replayed from any point.  Unlike a plain `Board`, a
/// `GameState` knows about time: a chess-legal move can still be rejected
/// because the player has no banked resource or the piece is still resting.
///
/// ```
/// use royale::{GameState, Move, Color, Square, TimingRules};
/// use std::str::FromStr;
///
/// let state = GameState::initial(0, TimingRules::default());
/// let e2 = Square::from_str("e2").unwrap();
/// let e4 = Square::from_str("e4").unwrap();
///
/// // one resource interval must pass before the first move
/// assert!(!state.is_legal(Move::new(Color::White, 3999, e2, e4)));
/// assert!(state.is_legal(Move::new(Color::White, 4001, e2, e4)));
/// ```
#[derive(Clone, Debug)]
pub struct GameState {
    current_time: i64,
    epochs: [i64; NUM_COLORS],
    arrivals: [i64; NUM_SQUARES],
    board: Board,
    last_move: Option<Move>,
    rules: TimingRules,
}

impl GameState {
    /// The state of a fresh game at `start_time`, on the standard board.
    /// Every square's cooldown is backdated so the opening move is gated by
    /// resources alone.
    pub fn initial(start_time: i64, rules: TimingRules) -> GameState {
        GameState::with_board(Board::default(), start_time, rules)
    }

    /// The state of a fresh game starting from an arbitrary board.
    pub fn with_board(board: Board, start_time: i64, rules: TimingRules) -> GameState {
        GameState {
            current_time: start_time,
            epochs: [start_time; NUM_COLORS],
            arrivals: [start_time - 2 * rules.cooldown; NUM_SQUARES],
            board,
            last_move: None,
            rules,
        }
    }

    /// The board as of this state.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The timestamp this state was created at: game start, or the time of
    /// the move that produced it.
    #[inline]
    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    /// The resource clock anchor for one player.  The player has banked one
    /// move for each whole `resource_interval` between this and now.
    #[inline]
    pub fn epoch(&self, color: Color) -> i64 {
        self.epochs[color.to_index()]
    }

    /// When a piece last landed on `square`.
    #[inline]
    pub fn last_arrival(&self, square: Square) -> i64 {
        self.arrivals[square.to_index()]
    }

    /// The move that produced this state, if it is not the initial one.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// The timing configuration this game runs under.
    #[inline]
    pub fn rules(&self) -> TimingRules {
        self.rules
    }

    /// Whether the game is over as of this state, and who won.
    #[inline]
    pub fn status(&self) -> BoardStatus {
        self.board.status()
    }

    /// Check whether `mv` may be played against this state.  A finished
    /// game accepts nothing; otherwise four independent gates must all
    /// pass: the mover owns the piece; the mover has a banked resource at
    /// the move's timestamp; the piece's square has finished its cooldown;
    /// and the move is chess-legal on the board.
    pub fn is_legal(&self, mv: Move) -> bool {
        if self.status() != BoardStatus::Ongoing {
            return false;
        }
        if self.board.color_on(mv.get_source()) != Some(mv.get_color()) {
            return false;
        }
        if mv.get_time() - self.epoch(mv.get_color()) < self.rules.resource_interval {
            return false;
        }
        if mv.get_time() - self.last_arrival(mv.get_source()) < self.rules.cooldown {
            return false;
        }
        self.board.classify(mv.get_source(), mv.get_dest()) != MoveClass::Invalid
    }

    /// Play `mv` and return the resulting state.  The move must already have
    /// passed `is_legal`; this only spends the resource and advances the
    /// clocks.
    ///
    /// Both epochs are first clamped so that nobody banks more than
    /// `max_bank` moves by idling, then the mover pays one interval forward.
    pub fn make_move(&self, mv: Move) -> GameState {
        let floor = mv.get_time() - self.rules.max_bank * self.rules.resource_interval;
        let mut epochs = [self.epochs[0].max(floor), self.epochs[1].max(floor)];
        epochs[mv.get_color().to_index()] += self.rules.resource_interval;

        let mut arrivals = self.arrivals;
        arrivals[mv.get_dest().to_index()] = mv.get_time();

        GameState {
            current_time: mv.get_time(),
            epochs,
            arrivals,
            board: self.board.make_move(mv.get_source(), mv.get_dest()),
            last_move: Some(mv),
            rules: self.rules,
        }
    }
}
