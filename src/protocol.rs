//! Line-oriented wire messages: decoding of client requests and encoding of
//! server replies.
//!
//! Every message is a single ASCII line of whitespace separated fields, the
//! first of which is a one-letter tag.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::core::common::{PlacementError, ShotError};
use crate::core::config::{FIELDS_PER_SHIP, INIT_FIELDS, NUM_SHIPS};
use crate::core::placement::ShipSpec;
use crate::core::query::QueryReport;

/// Board size proposed by player 1. Range checks happen in the arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

/// Tag of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Begin,
    Initialize,
    Query,
    Shoot,
    Forfeit,
}

impl Tag {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "B" => Some(Tag::Begin),
            "I" => Some(Tag::Initialize),
            "Q" => Some(Tag::Query),
            "S" => Some(Tag::Shoot),
            "F" => Some(Tag::Forfeit),
            _ => None,
        }
    }
}

/// A well-formed client request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `B w h` from player 1, bare `B` from player 2.
    Begin(Option<Dimensions>),
    /// `I` followed by five (shape, rotation, col, row) groups.
    Initialize([ShipSpec; NUM_SHIPS]),
    Query,
    Shoot { row: i32, col: i32 },
    Forfeit,
}

impl Request {
    pub fn tag(&self) -> Tag {
        match self {
            Request::Begin(_) => Tag::Begin,
            Request::Initialize(_) => Tag::Initialize,
            Request::Query => Tag::Query,
            Request::Shoot { .. } => Tag::Shoot,
            Request::Forfeit => Tag::Forfeit,
        }
    }
}

/// Wire form of a request, as a client sends it.
impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Begin(None) => write!(f, "B"),
            Request::Begin(Some(d)) => write!(f, "B {} {}", d.width, d.height),
            Request::Initialize(fleet) => {
                write!(f, "I")?;
                for ship in fleet {
                    write!(f, " {} {} {} {}", ship.shape, ship.rotation, ship.col, ship.row)?;
                }
                Ok(())
            }
            Request::Query => write!(f, "Q"),
            Request::Shoot { row, col } => write!(f, "S {} {}", row, col),
            Request::Forfeit => write!(f, "F"),
        }
    }
}

/// Why an inbound line could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Empty line or unrecognised tag.
    UnknownTag,
    /// Known tag with the wrong number of fields or a non-integer field.
    Malformed(Tag),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownTag => write!(f, "Unknown message tag"),
            DecodeError::Malformed(tag) => write!(f, "Malformed payload for {:?} message", tag),
        }
    }
}

fn parse_ints<'a, I>(fields: I) -> Option<Vec<i32>>
where
    I: Iterator<Item = &'a str>,
{
    fields.map(|f| f.parse::<i32>().ok()).collect()
}

/// Decode one inbound line.
///
/// `F` is accepted with any payload, since a forfeit is unconditional.
pub fn decode(line: &str) -> Result<Request, DecodeError> {
    let mut fields = line.split_ascii_whitespace();
    let tag = fields
        .next()
        .and_then(Tag::parse)
        .ok_or(DecodeError::UnknownTag)?;
    let malformed = DecodeError::Malformed(tag);

    match tag {
        Tag::Forfeit => Ok(Request::Forfeit),
        Tag::Query => match fields.next() {
            None => Ok(Request::Query),
            Some(_) => Err(malformed),
        },
        Tag::Begin => {
            let values = parse_ints(fields).ok_or(malformed)?;
            match values.as_slice() {
                [] => Ok(Request::Begin(None)),
                [width, height] => Ok(Request::Begin(Some(Dimensions {
                    width: *width,
                    height: *height,
                }))),
                _ => Err(malformed),
            }
        }
        Tag::Shoot => {
            let values = parse_ints(fields).ok_or(malformed)?;
            match values.as_slice() {
                [row, col] => Ok(Request::Shoot {
                    row: *row,
                    col: *col,
                }),
                _ => Err(malformed),
            }
        }
        Tag::Initialize => {
            let values = parse_ints(fields).ok_or(malformed)?;
            if values.len() != INIT_FIELDS {
                return Err(malformed);
            }
            let fleet = core::array::from_fn(|i| {
                let v = &values[i * FIELDS_PER_SHIP..(i + 1) * FIELDS_PER_SHIP];
                ShipSpec::new(v[0], v[1], v[2], v[3])
            });
            Ok(Request::Initialize(fleet))
        }
    }
}

/// Numeric rejection codes sent as `E code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Anything but `B` while negotiating.
    ExpectedBegin,
    /// Anything but `I` during setup.
    ExpectedInitialize,
    /// Unknown tag, or `Q` with a payload, during play.
    InvalidPlayRequest,
    InvalidBeginParameters,
    InvalidInitializeParameters,
    InvalidShotParameters,
    InvalidShape,
    InvalidRotation,
    ShipOutOfBounds,
    ShipOverlap,
    ShotOutOfBounds,
    AlreadyShot,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        match self {
            ErrorCode::ExpectedBegin => 100,
            ErrorCode::ExpectedInitialize => 101,
            ErrorCode::InvalidPlayRequest => 102,
            ErrorCode::InvalidBeginParameters => 200,
            ErrorCode::InvalidInitializeParameters => 201,
            ErrorCode::InvalidShotParameters => 202,
            ErrorCode::InvalidShape => 300,
            ErrorCode::InvalidRotation => 301,
            ErrorCode::ShipOutOfBounds => 302,
            ErrorCode::ShipOverlap => 303,
            ErrorCode::ShotOutOfBounds => 400,
            ErrorCode::AlreadyShot => 401,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.code() == code)
    }

    const ALL: [ErrorCode; 12] = [
        ErrorCode::ExpectedBegin,
        ErrorCode::ExpectedInitialize,
        ErrorCode::InvalidPlayRequest,
        ErrorCode::InvalidBeginParameters,
        ErrorCode::InvalidInitializeParameters,
        ErrorCode::InvalidShotParameters,
        ErrorCode::InvalidShape,
        ErrorCode::InvalidRotation,
        ErrorCode::ShipOutOfBounds,
        ErrorCode::ShipOverlap,
        ErrorCode::ShotOutOfBounds,
        ErrorCode::AlreadyShot,
    ];
}

impl From<PlacementError> for ErrorCode {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::InvalidShape => ErrorCode::InvalidShape,
            PlacementError::InvalidRotation => ErrorCode::InvalidRotation,
            PlacementError::OutOfBounds => ErrorCode::ShipOutOfBounds,
            PlacementError::Overlap => ErrorCode::ShipOverlap,
        }
    }
}

impl From<ShotError> for ErrorCode {
    fn from(err: ShotError) -> Self {
        match err {
            ShotError::OutOfBounds => ErrorCode::ShotOutOfBounds,
            ShotError::AlreadyShot => ErrorCode::AlreadyShot,
        }
    }
}

/// Server to client messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `A`
    Ack,
    /// `E code`
    Error(ErrorCode),
    /// `G n [H r c]* [M r c]*`
    Query(QueryReport),
    /// `R n H` or `R n M`
    ShotResult { ships_remaining: u8, hit: bool },
    /// `H 1` to the winner, `H 0` to the loser.
    Halt { won: bool },
}

impl Reply {
    pub fn is_halt(&self) -> bool {
        matches!(self, Reply::Halt { .. })
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ack => write!(f, "A"),
            Reply::Error(code) => write!(f, "E {}", code.code()),
            Reply::Query(report) => write!(f, "{}", report),
            Reply::ShotResult {
                ships_remaining,
                hit,
            } => write!(f, "R {} {}", ships_remaining, if *hit { 'H' } else { 'M' }),
            Reply::Halt { won } => write!(f, "H {}", u8::from(*won)),
        }
    }
}

/// Encode a reply as a wire line, without the line terminator.
pub fn encode(reply: &Reply) -> String {
    reply.to_string()
}

/// Decode a server reply line, as seen by a client. `None` for anything that
/// does not follow the reply grammar.
pub fn decode_reply(line: &str) -> Option<Reply> {
    let fields: Vec<&str> = line.split_ascii_whitespace().collect();
    match fields.as_slice() {
        ["A"] => Some(Reply::Ack),
        ["E", code] => ErrorCode::from_code(code.parse().ok()?).map(Reply::Error),
        ["R", n, outcome] => {
            let hit = match *outcome {
                "H" => true,
                "M" => false,
                _ => return None,
            };
            Some(Reply::ShotResult {
                ships_remaining: n.parse().ok()?,
                hit,
            })
        }
        ["H", "0"] => Some(Reply::Halt { won: false }),
        ["H", "1"] => Some(Reply::Halt { won: true }),
        ["G", n, rest @ ..] => {
            if rest.len() % 3 != 0 {
                return None;
            }
            let mut report = QueryReport {
                ships_remaining: n.parse().ok()?,
                hits: Vec::new(),
                misses: Vec::new(),
            };
            for entry in rest.chunks(3) {
                let pos = (entry[1].parse().ok()?, entry[2].parse().ok()?);
                match entry[0] {
                    "H" => report.hits.push(pos),
                    "M" => report.misses.push(pos),
                    _ => return None,
                }
            }
            Some(Reply::Query(report))
        }
        _ => None,
    }
}
