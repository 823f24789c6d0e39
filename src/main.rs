//! Atoms entry point
//!
//! Reads one command per line from stdin and answers on stdout until QUIT,
//! end of input, or a win.

use std::io::{self, BufRead, Write};

use atoms::command::{self, Command, LoadReply};
use atoms::error::PersistenceError;
use atoms::{Error, GameState, Outcome, Session, Settings, renderer};

/// Whether the loop keeps reading input
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

fn main() {
    env_logger::init();
    log::info!("Atoms starting...");

    let mut session = Session::new(Settings::from_env());
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(err) = run(&mut session, stdin.lock(), stdout.lock()) {
        log::error!("Terminal I/O failed: {err}");
        std::process::exit(1);
    }
}

fn run(session: &mut Session, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        // After LOAD every line answers the PLAYFROM prompt
        let flow = if session.is_loading() {
            load_reply(session, &line, &mut out)?
        } else {
            dispatch(session, &line, &mut out)?
        };
        out.flush()?;
        if flow == Flow::Exit {
            break;
        }
    }
    log::info!("Session ended");
    Ok(())
}

fn dispatch(session: &mut Session, line: &str, out: &mut impl Write) -> io::Result<Flow> {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(err) => {
            report(out, &Error::from(err))?;
            return Ok(Flow::Continue);
        }
    };
    log::debug!("{command:?}");

    match command {
        Command::Help => writeln!(out, "{}", renderer::HELP)?,
        Command::Quit => {
            writeln!(out, "Bye!")?;
            return Ok(Flow::Exit);
        }
        Command::Display => match session.require_game() {
            Ok(game) => draw(out, game)?,
            Err(err) => report(out, &err)?,
        },
        Command::Start {
            players,
            width,
            height,
        } => match session.start(players, width, height) {
            Ok(game) => {
                writeln!(out, "Game Ready")?;
                banner(out, game)?;
            }
            Err(err) => report(out, &err)?,
        },
        Command::Place { x, y } => match session.place(x, y) {
            Ok(Outcome::Won { .. }) => {
                announce_winner(session, out)?;
                return Ok(Flow::Exit);
            }
            Ok(Outcome::Continue { .. }) => after_move(session, out)?,
            Err(err) => report(out, &err)?,
        },
        Command::Undo => match session.undo() {
            Ok(_) => after_move(session, out)?,
            Err(err) => report(out, &err)?,
        },
        Command::Stat => match session.stats() {
            Ok(stats) => write!(out, "{}", renderer::stats(&stats))?,
            Err(err) => report(out, &err)?,
        },
        Command::Save(path) => match session.save(&path) {
            Ok(()) => writeln!(out, "Game Saved\n")?,
            Err(err) => report(out, &err)?,
        },
        Command::Load(path) => match session.open(&path) {
            Ok(_) => writeln!(out, "Game Loaded\n")?,
            Err(err) => report(out, &err)?,
        },
    }
    Ok(Flow::Continue)
}

fn load_reply(session: &mut Session, line: &str, out: &mut impl Write) -> io::Result<Flow> {
    let from = match command::parse_load_reply(line) {
        Ok(LoadReply::PlayFrom(from)) => from,
        Ok(LoadReply::Quit) => {
            session.cancel_load();
            writeln!(out, "Bye!")?;
            return Ok(Flow::Exit);
        }
        Err(err) => {
            report(out, &Error::from(err))?;
            return Ok(Flow::Continue);
        }
    };

    match session.play_from(from) {
        Ok(game) => {
            // The save may end on the deciding placement
            if let Some(message) = renderer::winner(game) {
                writeln!(out, "{message}")?;
                return Ok(Flow::Exit);
            }
            writeln!(out, "Game Ready")?;
            banner(out, game)?;
            Ok(Flow::Continue)
        }
        Err(err) => {
            report(out, &err)?;
            Ok(Flow::Continue)
        }
    }
}

fn after_move(session: &Session, out: &mut impl Write) -> io::Result<()> {
    let Some(game) = session.game() else {
        return Ok(());
    };
    if session.settings().auto_display {
        draw(out, game)?;
    }
    banner(out, game)
}

fn draw(out: &mut impl Write, game: &GameState) -> io::Result<()> {
    write!(out, "\n{}\n", renderer::board(game))
}

fn banner(out: &mut impl Write, game: &GameState) -> io::Result<()> {
    writeln!(out, "{}\n", renderer::turn_banner(game))
}

fn announce_winner(session: &Session, out: &mut impl Write) -> io::Result<()> {
    match session.game().and_then(renderer::winner) {
        Some(message) => writeln!(out, "{message}"),
        None => Ok(()),
    }
}

fn report(out: &mut impl Write, err: &Error) -> io::Result<()> {
    match err {
        Error::CorruptSave(_) | Error::Persistence(PersistenceError::Io(_)) => {
            log::warn!("{err}")
        }
        _ => log::debug!("Rejected: {err}"),
    }
    writeln!(out, "{err}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(session: &mut Session, input: &str) -> String {
        let mut out = Vec::new();
        run(session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_start_place_undo() {
        let mut session = Session::default();
        let out = transcript(&mut session, "START 2 3 3\nPLACE 1 1\n\nUNDO\nPLACE 9 9\nQUIT\nHELP\n");
        assert_eq!(
            out,
            "Game Ready\nRed's Turn\n\nGreen's Turn\n\nRed's Turn\n\nInvalid Coordinates\n\nBye!\n"
        );
    }

    #[test]
    fn test_commands_without_game() {
        let mut session = Session::default();
        let out = transcript(&mut session, "STAT\nUNDO\nJUMP\n");
        assert_eq!(
            out,
            "Game Not In Progress\n\nGame Not In Progress\n\nInvalid Command\n\n"
        );
    }

    #[test]
    fn test_win_ends_session() {
        let mut session = Session::default();
        let out = transcript(
            &mut session,
            "START 2 2 2\nPLACE 0 0\nPLACE 1 1\nPLACE 0 0\nPLACE 1 1\nSTAT\n",
        );
        assert!(out.ends_with("Green Wins!\n"));
        assert!(!out.contains("Player Red"));
    }

    #[test]
    fn test_display_and_auto_display() {
        let settings = Settings {
            auto_display: true,
            ..Settings::default()
        };
        let mut session = Session::new(settings);
        let out = transcript(&mut session, "START 2 2 2\nPLACE 1 0\n");
        assert_eq!(
            out,
            "Game Ready\nRed's Turn\n\n\n+-----+\n|  |R1|\n|  |  |\n+-----+\n\nGreen's Turn\n\n"
        );
    }

    #[test]
    fn test_unplayable_save_leaves_commands_available() {
        let path = std::env::temp_dir().join(format!("atoms-main-bad-{}.sav", std::process::id()));
        std::fs::write(&path, [1, 9, 2]).unwrap();

        let mut session = Session::default();
        let script = format!("LOAD {}\nPLAYFROM END\nSTART 2 3 3\n", path.display());
        let out = transcript(&mut session, &script);
        assert!(out.starts_with("Corrupt Save: "));
        assert!(!out.contains("Game Loaded"));
        assert!(out.contains("Invalid Command\n\nGame Ready\nRed's Turn\n\n"));
        assert!(session.game().is_some());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_prompt() {
        let path = std::env::temp_dir().join(format!("atoms-main-{}.sav", std::process::id()));
        let _ = std::fs::remove_file(&path);
        std::fs::write(&path, [3, 3, 2, 1, 1, 0, 0]).unwrap();

        let mut session = Session::default();
        let script = format!("LOAD {}\nPLACE 0 0\nPLAYFROM -1\nPLAYFROM END\nSTAT\n", path.display());
        let out = transcript(&mut session, &script);
        assert_eq!(
            out,
            "Game Loaded\n\nInvalid Command\n\nInvalid Turn Number\n\nGame Ready\nGreen's Turn\n\n\
             Player Red:\nGrid Count: 1\n\nPlayer Green:\nGrid Count: 0\n\n"
        );

        let _ = std::fs::remove_file(&path);
    }
}
