//! Terminal command parsing
//!
//! Keywords are case-insensitive. Numeric arguments are parsed as wide
//! integers so range checks happen in one place (the session / engine).

use std::path::PathBuf;

use crate::error::ArgumentError;
use crate::persistence::PlayFrom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Display,
    Start { players: i64, width: i64, height: i64 },
    Place { x: i64, y: i64 },
    Undo,
    Stat,
    Save(PathBuf),
    Load(PathBuf),
}

/// Answer to the prompt that follows LOAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReply {
    PlayFrom(PlayFrom),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ArgumentError> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(ArgumentError::Command)?;
        let args: Vec<&str> = tokens.collect();

        match keyword.to_ascii_uppercase().as_str() {
            "HELP" => no_args(&args, Command::Help),
            "QUIT" => no_args(&args, Command::Quit),
            "UNDO" => no_args(&args, Command::Undo),
            "STAT" => no_args(&args, Command::Stat),
            "DISPLAY" => Ok(Command::Display),
            "START" => parse_start(&args),
            "PLACE" => match args.as_slice() {
                [x, y] => match (x.parse(), y.parse()) {
                    (Ok(x), Ok(y)) => Ok(Command::Place { x, y }),
                    _ => Err(ArgumentError::Coordinates),
                },
                _ => Err(ArgumentError::Coordinates),
            },
            "SAVE" => single_path(&args).map(Command::Save),
            "LOAD" => single_path(&args).map(Command::Load),
            _ => Err(ArgumentError::Command),
        }
    }
}

fn no_args(args: &[&str], command: Command) -> Result<Command, ArgumentError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ArgumentError::Command)
    }
}

fn single_path(args: &[&str]) -> Result<PathBuf, ArgumentError> {
    match args {
        [path] => Ok(PathBuf::from(path)),
        _ => Err(ArgumentError::Command),
    }
}

fn parse_start(args: &[&str]) -> Result<Command, ArgumentError> {
    let [players, width, height] = match args {
        [a, b, c] => [*a, *b, *c],
        _ if args.len() < 3 => return Err(ArgumentError::Missing),
        _ => return Err(ArgumentError::TooMany),
    };
    let number = |s: &str| s.parse::<i64>().map_err(|_| ArgumentError::OutOfRange);
    Ok(Command::Start {
        players: number(players)?,
        width: number(width)?,
        height: number(height)?,
    })
}

/// Parse `PLAYFROM <n>`, `PLAYFROM END` or `QUIT`
pub fn parse_load_reply(line: &str) -> Result<LoadReply, ArgumentError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [quit] if quit.eq_ignore_ascii_case("QUIT") => Ok(LoadReply::Quit),
        [keyword, turn] if keyword.eq_ignore_ascii_case("PLAYFROM") => {
            if turn.eq_ignore_ascii_case("END") {
                return Ok(LoadReply::PlayFrom(PlayFrom::End));
            }
            let n: i64 = turn.parse().map_err(|_| ArgumentError::Command)?;
            if n < 0 {
                return Err(ArgumentError::TurnNumber);
            }
            let n = u32::try_from(n).unwrap_or(u32::MAX);
            Ok(LoadReply::PlayFrom(PlayFrom::Turn(n)))
        }
        _ => Err(ArgumentError::Command),
    }
}
