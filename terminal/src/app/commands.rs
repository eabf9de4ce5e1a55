//! Command-line parsing for the interactive prompt.

use crate::core::error::{AppError, Result};
use chess_shared::{CreateChallengeRequest, PlayerColor};

pub const HELP: &str = "\
Wallet
  connect                      connect the wallet (approval prompt)
  disconnect                   forget the wallet session
  status                       show session and current game
Lobby
  games                        list live games
  challenges                   list open challenges
  challenge [addr] [white|black] [blocks]
                               create a challenge
  accept <id>                  accept a challenge
  cancel-challenge <id>        cancel your challenge
Game
  open <game_id>               load a game
  move <san>                   stage a move (e.g. e4, Nf3, O-O)
  cancel                       discard the staged move
  submit                       submit the staged move
  offer-draw                   submit the staged move with a draw offer
  accept-draw                  accept the pending draw offer
  resign                       resign the game
  reload                       reload the game
Other
  help                         show this help
  quit                         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect,
    Disconnect,
    Status,
    Games,
    Challenges,
    Challenge(CreateChallengeRequest),
    Accept(u64),
    CancelChallenge(u64),
    Open(u64),
    Move(String),
    Cancel,
    Submit,
    OfferDraw,
    AcceptDraw,
    Resign,
    Reload,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "connect" => Command::Connect,
        "disconnect" => Command::Disconnect,
        "status" => Command::Status,
        "games" => Command::Games,
        "challenges" => Command::Challenges,
        "challenge" => Command::Challenge(parse_challenge(&args)?),
        "accept" => Command::Accept(parse_id(&args, "accept <challenge_id>")?),
        "cancel-challenge" => Command::CancelChallenge(parse_id(&args, "cancel-challenge <challenge_id>")?),
        "open" => Command::Open(parse_id(&args, "open <game_id>")?),
        "move" => match args.as_slice() {
            [san] => Command::Move(san.to_string()),
            _ => return Err(usage("move <san>")),
        },
        "cancel" => Command::Cancel,
        "submit" => Command::Submit,
        "offer-draw" => Command::OfferDraw,
        "accept-draw" => Command::AcceptDraw,
        "resign" => Command::Resign,
        "reload" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(AppError::Validation(format!(
                "Unknown command '{}', type 'help'",
                other
            )))
        }
    };
    Ok(Some(command))
}

fn usage(text: &str) -> AppError {
    AppError::Validation(format!("Usage: {}", text))
}

fn parse_id(args: &[&str], text: &str) -> Result<u64> {
    match args {
        [id] => id.parse().map_err(|_| usage(text)),
        _ => Err(usage(text)),
    }
}

fn parse_challenge(args: &[&str]) -> Result<CreateChallengeRequest> {
    let mut request = CreateChallengeRequest::default();
    let text = "challenge [opponent] [white|black] [blocks]";

    for arg in args {
        match arg.to_ascii_lowercase().as_str() {
            "white" | "black" if request.play_as.is_none() => {
                request.play_as = Some(if arg.eq_ignore_ascii_case("white") {
                    PlayerColor::White
                } else {
                    PlayerColor::Black
                });
            }
            digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                if request.block_time_limit.is_some() {
                    return Err(usage(text));
                }
                request.block_time_limit = Some(digits.parse().map_err(|_| usage(text))?);
            }
            _ if request.opponent.is_none() => request.opponent = Some(arg.to_string()),
            _ => return Err(usage(text)),
        }
    }
    Ok(request)
}
