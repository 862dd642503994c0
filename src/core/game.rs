//! The match state machine.
//!
//! The [`Arbiter`] consumes one inbound line at a time from whichever player
//! it is currently waiting on and returns the replies that must go out. It
//! performs no I/O; [`crate::MatchNode`] drives it over real connections.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::core::board::Board;
use crate::core::config::{MAX_DIMENSION, MIN_DIMENSION};
use crate::core::placement::place_fleet;
use crate::core::query::QueryReport;
use crate::core::shot::resolve;
use crate::protocol::{decode, DecodeError, Dimensions, ErrorCode, Reply, Request, Tag};

/// One of the two seats in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 0 for player 1, 1 for player 2.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

/// Protocol stage of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Negotiate,
    Setup,
    Play,
    Terminated,
}

/// How a finished match was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Conclusion {
    AllShipsSunk,
    Forfeit,
    Disconnected,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Outcome {
    pub winner: PlayerId,
    pub conclusion: Conclusion,
    /// Shots resolved by both players together.
    pub shots: usize,
}

/// A reply addressed to one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub to: PlayerId,
    pub reply: Reply,
}

impl Outbound {
    fn new(to: PlayerId, reply: Reply) -> Self {
        Outbound { to, reply }
    }
}

/// Both boards of an agreed match and the player whose turn it is.
#[derive(Debug, Clone)]
pub struct Match {
    boards: [Board; 2],
    turn: PlayerId,
    shots: usize,
}

impl Match {
    fn new(dimensions: Dimensions) -> Self {
        let width = dimensions.width as usize;
        let height = dimensions.height as usize;
        Match {
            boards: [Board::new(width, height), Board::new(width, height)],
            turn: PlayerId::One,
            shots: 0,
        }
    }

    /// The board holding `player`'s own ships.
    pub fn board(&self, player: PlayerId) -> &Board {
        &self.boards[player.index()]
    }

    fn board_mut(&mut self, player: PlayerId) -> &mut Board {
        &mut self.boards[player.index()]
    }

    pub fn turn(&self) -> PlayerId {
        self.turn
    }
}

#[derive(Debug, Clone)]
enum State {
    /// Waiting for player 1 to propose dimensions.
    Negotiate,
    /// Waiting for player 2 to accept the dimensions.
    Acknowledge(Match),
    /// Waiting for the given player's fleet.
    Setup(Match, PlayerId),
    Play(Match),
    Terminated(Outcome),
}

/// Referee for a single two-player match.
#[derive(Debug, Clone)]
pub struct Arbiter {
    state: State,
}

impl Default for Arbiter {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_dimension(value: i32) -> bool {
    (MIN_DIMENSION..=MAX_DIMENSION).contains(&value)
}

impl Arbiter {
    pub fn new() -> Self {
        Arbiter {
            state: State::Negotiate,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Negotiate | State::Acknowledge(_) => Phase::Negotiate,
            State::Setup(..) => Phase::Setup,
            State::Play(_) => Phase::Play,
            State::Terminated(_) => Phase::Terminated,
        }
    }

    /// The player whose next line will be processed, or `None` once the match
    /// has ended.
    pub fn awaiting(&self) -> Option<PlayerId> {
        match &self.state {
            State::Negotiate => Some(PlayerId::One),
            State::Acknowledge(_) => Some(PlayerId::Two),
            State::Setup(_, player) => Some(*player),
            State::Play(m) => Some(m.turn),
            State::Terminated(_) => None,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            State::Terminated(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The current match, once dimensions have been agreed and until it ends.
    pub fn current_match(&self) -> Option<&Match> {
        match &self.state {
            State::Acknowledge(m) | State::Setup(m, _) | State::Play(m) => Some(m),
            State::Negotiate | State::Terminated(_) => None,
        }
    }

    /// Process one line from the awaited player.
    pub fn handle(&mut self, line: &str) -> Vec<Outbound> {
        let Some(from) = self.awaiting() else {
            log::warn!("ignoring message after the match ended: {:?}", line);
            return Vec::new();
        };

        let request = decode(line);
        if let Ok(Request::Forfeit) = request {
            return self.end_by_forfeit(from, Conclusion::Forfeit);
        }

        let mut out = Vec::new();
        let state = core::mem::replace(&mut self.state, State::Negotiate);
        self.state = match state {
            State::Negotiate => negotiate(request, &mut out),
            State::Acknowledge(m) => acknowledge(m, request, &mut out),
            State::Setup(m, player) => setup(m, player, request, &mut out),
            State::Play(m) => play(m, request, &mut out),
            terminated @ State::Terminated(_) => terminated,
        };
        out
    }

    /// Treat a failed read or send as a forfeit by `player`.
    pub fn abandon(&mut self, player: PlayerId) -> Vec<Outbound> {
        self.end_by_forfeit(player, Conclusion::Disconnected)
    }

    fn end_by_forfeit(&mut self, player: PlayerId, conclusion: Conclusion) -> Vec<Outbound> {
        let shots = match &self.state {
            State::Terminated(_) => return Vec::new(),
            State::Play(m) | State::Setup(m, _) | State::Acknowledge(m) => m.shots,
            State::Negotiate => 0,
        };
        let winner = player.opponent();
        log::info!("{} forfeits ({:?}), {} wins", player, conclusion, winner);
        self.state = State::Terminated(Outcome {
            winner,
            conclusion,
            shots,
        });
        vec![
            Outbound::new(player, Reply::Halt { won: false }),
            Outbound::new(winner, Reply::Halt { won: true }),
        ]
    }
}

fn reject(out: &mut Vec<Outbound>, to: PlayerId, code: ErrorCode) {
    log::debug!("rejecting message from {} with {}", to, code.code());
    out.push(Outbound::new(to, Reply::Error(code)));
}

fn negotiate(request: Result<Request, DecodeError>, out: &mut Vec<Outbound>) -> State {
    let from = PlayerId::One;
    match request {
        Ok(Request::Begin(Some(dims))) if valid_dimension(dims.width) && valid_dimension(dims.height) => {
            log::info!("board size agreed: {}x{}", dims.width, dims.height);
            out.push(Outbound::new(from, Reply::Ack));
            State::Acknowledge(Match::new(dims))
        }
        Ok(Request::Begin(_)) | Err(DecodeError::Malformed(Tag::Begin)) => {
            reject(out, from, ErrorCode::InvalidBeginParameters);
            State::Negotiate
        }
        _ => {
            reject(out, from, ErrorCode::ExpectedBegin);
            State::Negotiate
        }
    }
}

fn acknowledge(m: Match, request: Result<Request, DecodeError>, out: &mut Vec<Outbound>) -> State {
    let from = PlayerId::Two;
    match request {
        Ok(Request::Begin(None)) => {
            out.push(Outbound::new(from, Reply::Ack));
            State::Setup(m, PlayerId::One)
        }
        Ok(Request::Begin(Some(_))) | Err(DecodeError::Malformed(Tag::Begin)) => {
            reject(out, from, ErrorCode::InvalidBeginParameters);
            State::Acknowledge(m)
        }
        _ => {
            reject(out, from, ErrorCode::ExpectedBegin);
            State::Acknowledge(m)
        }
    }
}

fn setup(
    mut m: Match,
    from: PlayerId,
    request: Result<Request, DecodeError>,
    out: &mut Vec<Outbound>,
) -> State {
    match request {
        Ok(Request::Initialize(fleet)) => match place_fleet(m.board_mut(from), &fleet) {
            Ok(()) => {
                log::info!("{} placed their fleet", from);
                out.push(Outbound::new(from, Reply::Ack));
                match from {
                    PlayerId::One => State::Setup(m, PlayerId::Two),
                    PlayerId::Two => State::Play(m),
                }
            }
            Err(err) => {
                reject(out, from, err.into());
                State::Setup(m, from)
            }
        },
        Err(DecodeError::Malformed(Tag::Initialize)) => {
            reject(out, from, ErrorCode::InvalidInitializeParameters);
            State::Setup(m, from)
        }
        _ => {
            reject(out, from, ErrorCode::ExpectedInitialize);
            State::Setup(m, from)
        }
    }
}

fn play(mut m: Match, request: Result<Request, DecodeError>, out: &mut Vec<Outbound>) -> State {
    let from = m.turn;
    let target = from.opponent();
    match request {
        Ok(Request::Query) => {
            let report = QueryReport::of(m.board(target));
            out.push(Outbound::new(from, Reply::Query(report)));
            State::Play(m)
        }
        Ok(Request::Shoot { row, col }) => match resolve(m.board_mut(target), row, col) {
            Ok(outcome) => {
                m.shots += 1;
                let ships_remaining = outcome.ships_remaining();
                out.push(Outbound::new(
                    from,
                    Reply::ShotResult {
                        ships_remaining,
                        hit: outcome.is_hit(),
                    },
                ));
                if ships_remaining == 0 {
                    log::info!("{} sank the last ship after {} shots", from, m.shots);
                    out.push(Outbound::new(target, Reply::Halt { won: false }));
                    out.push(Outbound::new(from, Reply::Halt { won: true }));
                    return State::Terminated(Outcome {
                        winner: from,
                        conclusion: Conclusion::AllShipsSunk,
                        shots: m.shots,
                    });
                }
                m.turn = target;
                State::Play(m)
            }
            Err(err) => {
                reject(out, from, err.into());
                State::Play(m)
            }
        },
        Err(DecodeError::Malformed(Tag::Shoot)) => {
            reject(out, from, ErrorCode::InvalidShotParameters);
            State::Play(m)
        }
        _ => {
            reject(out, from, ErrorCode::InvalidPlayRequest);
            State::Play(m)
        }
    }
}
