use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use callbreak_core::game::notice::DEFAULT_NOTICE_DURATION;
use callbreak_core::model::round::RoundError;
use callbreak_core::{Roster, ScoringSession, Seat};
use thiserror::Error;
use tracing::debug;

use crate::render;
use crate::sink::TracingSink;

const ROSTER_HELP: &str = "\
commands: add [NAME] | rename N NAME | remove N | players | start | quit";
const SCORING_HELP: &str = "\
commands: guess P VALUE | obtain P VALUE | guesses V... | obtained V... | lock | submit | history | standings | status | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add(String),
    Rename(usize, String),
    Remove(usize),
    Players,
    Start,
    Guess(String, String),
    Obtain(String, String),
    Guesses(Vec<String>),
    Obtained(Vec<String>),
    Lock,
    Submit,
    History,
    Standings,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(CommandError::Usage("help"));
    };
    let rest: Vec<&str> = parts.collect();
    let slot = |usage: &'static str| -> Result<usize, CommandError> {
        rest.first()
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .map(|n| n - 1)
            .ok_or(CommandError::Usage(usage))
    };
    let pair = |usage: &'static str| -> Result<(String, String), CommandError> {
        match rest.as_slice() {
            [who @ .., value] if !who.is_empty() => Ok((who.join(" "), (*value).to_string())),
            _ => Err(CommandError::Usage(usage)),
        }
    };

    match head.to_ascii_lowercase().as_str() {
        "add" => Ok(Command::Add(rest.join(" "))),
        "rename" => {
            let index = slot("rename N NAME")?;
            Ok(Command::Rename(index, rest[1..].join(" ")))
        }
        "remove" => slot("remove N").map(Command::Remove),
        "players" => Ok(Command::Players),
        "start" => Ok(Command::Start),
        "guess" => pair("guess P VALUE").map(|(p, v)| Command::Guess(p, v)),
        "obtain" => pair("obtain P VALUE").map(|(p, v)| Command::Obtain(p, v)),
        "guesses" => Ok(Command::Guesses(rest.iter().map(|s| s.to_string()).collect())),
        "obtained" => Ok(Command::Obtained(rest.iter().map(|s| s.to_string()).collect())),
        "lock" => Ok(Command::Lock),
        "submit" => Ok(Command::Submit),
        "history" => Ok(Command::History),
        "standings" | "ranking" => Ok(Command::Standings),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

enum Stage {
    Roster(Roster),
    Scoring(Box<ScoringSession>),
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end. Reads commands from `input`, writes every view
/// and error message to `output`.
pub struct Driver<R, W> {
    input: R,
    output: W,
    stage: Stage,
    notice_duration: Duration,
    autostart: bool,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(input: R, output: W, roster: Roster) -> Self {
        Self {
            input,
            output,
            stage: Stage::Roster(roster),
            notice_duration: DEFAULT_NOTICE_DURATION,
            autostart: false,
        }
    }

    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    /// Tries to start play straight away with the prefilled roster.
    pub fn start_immediately(mut self) -> Self {
        self.autostart = true;
        self
    }

    /// Runs until `quit` or end of input. Returns the scoring session if play
    /// got that far.
    pub fn run(mut self) -> Result<Option<ScoringSession>> {
        writeln!(self.output, "Call Break Score Tracker")?;
        if self.autostart {
            self.start()?;
        } else {
            writeln!(self.output, "{ROSTER_HELP}")?;
        }

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(command = trimmed, "command received");
            match parse_command(trimmed) {
                Ok(command) => {
                    if let Flow::Quit = self.dispatch(command)? {
                        break;
                    }
                }
                Err(err) => writeln!(self.output, "error: {err}")?,
            }
        }
        self.output.flush()?;

        Ok(match self.stage {
            Stage::Scoring(session) => Some(*session),
            Stage::Roster(_) => None,
        })
    }

    fn prompt(&mut self) -> Result<()> {
        match &self.stage {
            Stage::Roster(roster) => write!(self.output, "[players: {}]> ", roster.len())?,
            Stage::Scoring(session) => write!(
                self.output,
                "[round {} {}]> ",
                session.round_number(),
                session.phase_kind().as_str().to_ascii_lowercase()
            )?,
        }
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                let help = match self.stage {
                    Stage::Roster(_) => ROSTER_HELP,
                    Stage::Scoring(_) => SCORING_HELP,
                };
                writeln!(self.output, "{help}")?;
            }
            Command::Start => self.start()?,
            other => match &mut self.stage {
                Stage::Roster(roster) => roster_command(roster, other, &mut self.output)?,
                Stage::Scoring(session) => scoring_command(session, other, &mut self.output)?,
            },
        }
        Ok(Flow::Continue)
    }

    fn start(&mut self) -> Result<()> {
        let Stage::Roster(roster) = &self.stage else {
            writeln!(self.output, "error: the game has already started")?;
            return Ok(());
        };
        match roster.start() {
            Ok(players) => {
                let session = ScoringSession::new(players)
                    .with_notice_duration(self.notice_duration)
                    .with_sink(Box::new(TracingSink));
                let names: Vec<&str> = session.players().iter().map(|p| p.name()).collect();
                writeln!(self.output, "Game started with {}", names.join(", "))?;
                writeln!(self.output, "{SCORING_HELP}")?;
                self.stage = Stage::Scoring(Box::new(session));
            }
            Err(err) => writeln!(self.output, "error: {err}")?,
        }
        Ok(())
    }
}

fn roster_command<W: Write>(roster: &mut Roster, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Add(name) => {
            let index = roster.add(name.trim());
            writeln!(out, "added slot {}", index + 1)?;
        }
        Command::Rename(index, name) => match roster.rename(index, name.trim()) {
            Ok(()) => writeln!(out, "renamed slot {}", index + 1)?,
            Err(err) => writeln!(out, "error: {err}")?,
        },
        Command::Remove(index) => match roster.remove(index) {
            Ok(_) => writeln!(out, "removed slot {}", index + 1)?,
            Err(err) => writeln!(out, "error: {err}")?,
        },
        Command::Players => {
            for line in render::roster_lines(roster) {
                writeln!(out, "{line}")?;
            }
        }
        _ => writeln!(out, "error: start the game first")?,
    }
    Ok(())
}

fn scoring_command<W: Write>(
    session: &mut ScoringSession,
    command: Command,
    out: &mut W,
) -> Result<()> {
    let outcome: Result<(), RoundError> = match command {
        Command::Guess(who, value) => match session.find_seat(&who) {
            Some(seat) => session.set_guess(seat, &value),
            None => return unknown_player(out, &who),
        },
        Command::Obtain(who, value) => match session.find_seat(&who) {
            Some(seat) => session.set_obtained(seat, &value),
            None => return unknown_player(out, &who),
        },
        Command::Guesses(values) | Command::Obtained(values)
            if values.len() != session.players().len() =>
        {
            writeln!(
                out,
                "error: expected {} values, one per player, got {}",
                session.players().len(),
                values.len()
            )?;
            Ok(())
        }
        Command::Guesses(values) => enter_all(session, &values, ScoringSession::set_guess),
        Command::Obtained(values) => enter_all(session, &values, ScoringSession::set_obtained),
        Command::Lock => match session.lock_guesses() {
            Ok(()) => {
                writeln!(out, "guesses locked; enter obtained scores")?;
                Ok(())
            }
            Err(err) => Err(err),
        },
        Command::Submit => match session.submit_round(Instant::now()) {
            Ok(summary) => {
                writeln!(out, "round {} recorded", summary.round_number)?;
                if let Some(leader) = summary.leader {
                    writeln!(out, "Leader: {leader}")?;
                }
                Ok(())
            }
            Err(err) => Err(err),
        },
        Command::History => {
            let lines = render::history_lines(session.players(), session.history());
            if lines.is_empty() {
                writeln!(out, "no rounds played yet")?;
            }
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Command::Standings => {
            for line in render::standings_lines(&session.ranking()) {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Command::Status => {
            for line in render::status_lines(session) {
                writeln!(out, "{line}")?;
            }
            if let Some(notice) = session.notice(Instant::now()) {
                writeln!(out, "Leader: {notice}")?;
            }
            Ok(())
        }
        _ => {
            writeln!(out, "error: the game has already started")?;
            Ok(())
        }
    };

    if let Err(err) = outcome {
        writeln!(out, "error: {err}")?;
    }
    Ok(())
}

/// Fills every seat in order; `values` holds exactly one entry per seat.
fn enter_all(
    session: &mut ScoringSession,
    values: &[String],
    set: fn(&mut ScoringSession, Seat, &str) -> Result<(), RoundError>,
) -> Result<(), RoundError> {
    for (index, value) in values.iter().enumerate() {
        set(session, Seat::new(index), value)?;
    }
    Ok(())
}

fn unknown_player<W: Write>(out: &mut W, who: &str) -> Result<()> {
    writeln!(out, "error: no player called '{who}'")?;
    Ok(())
}
