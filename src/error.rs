use failure::Fail;

/// Sometimes, bad stuff happens.
#[derive(Clone, Debug, Fail)]
pub enum Error {
    /// The string specified does not contain a valid rank.
    #[fail(display = "The string specified does not contain a valid rank")]
    InvalidRank,

    /// The string specified does not contain a valid file.
    #[fail(display = "The string specified does not contain a valid file")]
    InvalidFile,

    /// The string specified does not contain a valid square.
    #[fail(display = "The string specified does not contain a valid square")]
    InvalidSquare,

    /// An encoded game string was truncated or contained characters outside
    /// the encoding alphabet.
    #[fail(display = "The string specified is not a valid encoded game")]
    InvalidGameString,

    /// An encoded game contained a move the rules reject.  Encoded games are
    /// replayed through the full legality layer, so a corrupt or hand-edited
    /// string is caught here rather than producing a nonsense position.
    #[fail(display = "The encoded game contains an illegal move")]
    IllegalEncodedMove,
}
