use std::{error::Error, path::PathBuf, process::ExitCode, time::Duration};

use chesh::{
    game::position::Position,
    playback::{play_back, PlaybackEnd},
    record,
    session::{Session, SessionConfig},
};
use clap::Parser;

/// Parses a delay in seconds, refusing anything but a non-negative number.
fn parse_delay(s: &str) -> Result<Duration, String> {
    let seconds: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    Duration::try_from_secs_f64(seconds).map_err(|_| format!("{s:?} is not a valid delay"))
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// Game log to play back
    log: Option<PathBuf>,
    /// Seconds to wait between two moves of the playback
    #[arg(short, long, value_parser = parse_delay, default_value = "0")]
    delay: Duration,
    /// Appends the resulting history to this file
    #[arg(short, long)]
    save: Option<PathBuf>,
    /// Starting position as a shorthand setup, e.g. "wka1 bqh2 bnc4"
    #[arg(short, long)]
    position: Option<String>,
}

fn run(args: Arguments) -> Result<(), Box<dyn Error>> {
    let tokens = match &args.log {
        Some(path) => record::load(path)?,
        None => vec![],
    };

    let mut config = SessionConfig::new().with_playback_delay(args.delay);
    if let Some(path) = &args.save {
        config = config.with_log_path(path);
    }
    let position = match &args.position {
        Some(shorthand) => shorthand.parse::<Position>()?,
        None => Position::initial(),
    };
    let mut session = Session::from_position(position, config);

    let end = play_back(&mut session, tokens.as_slice());
    println!("{}", session.position());
    match end? {
        PlaybackEnd::Exhausted => (),
        PlaybackEnd::Checkmate(winner) => println!("Checkmate, {winner} wins"),
        PlaybackEnd::Resigned(loser) => println!("{loser} resigns"),
        PlaybackEnd::Tied => println!("Draw by agreement"),
    }

    if args.save.is_some() {
        let path = session.persist_history()?;
        println!("History saved to {}", path.display());
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let args = Arguments::parse();
    env_logger::init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
