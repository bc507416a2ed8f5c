use crate::app::render;
use crate::core::session::NominationSession;
use crate::core::{ConfigProvider, MovieSource, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
Commands:
  search <title>      search movies by title
  nominate <n|id>     nominate result number n or an IMDb id
  remove <id>         remove a nomination
  list                show nominations
  share               print a share link
  help                show this help
  quit                leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NominateTarget {
    /// One-based position in the latest search results.
    Result(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Nominate(NominateTarget),
    Remove(String),
    List,
    Share,
    Help,
    Quit,
    Empty,
}

pub fn parse_shell_command(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(ShellCommand::Empty),
        "search" | "s" => Ok(ShellCommand::Search(rest.to_string())),
        "nominate" | "n" if !rest.is_empty() => Ok(ShellCommand::Nominate(
            match rest.parse::<usize>() {
                Ok(position) if position > 0 => NominateTarget::Result(position),
                Ok(_) => return Err("Result numbers start at 1".to_string()),
                Err(_) => NominateTarget::Id(rest.to_string()),
            },
        )),
        "remove" | "rm" if !rest.is_empty() => Ok(ShellCommand::Remove(rest.to_string())),
        "nominate" | "n" | "remove" | "rm" => Err(format!("Usage: {} <argument>", word)),
        "list" | "ls" => Ok(ShellCommand::List),
        "share" => Ok(ShellCommand::Share),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("Unknown command '{}', type 'help'", other)),
    }
}

/// Reads commands line by line until `quit` or end of input. Failed commands
/// are reported and the loop goes on.
pub async fn run_shell<M, S, C, R, W>(
    session: &mut NominationSession<M, S>,
    config: &C,
    input: R,
    out: &mut W,
) -> Result<()>
where
    M: MovieSource,
    S: Storage,
    C: ConfigProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{}", HELP)?;
    let mut lines = input.lines();

    loop {
        write!(out, "shoppies> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_shell_command(&line) {
            Ok(command) => command,
            Err(usage) => {
                writeln!(out, "{}", usage)?;
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }
        if let Err(e) = execute(session, config, command, out).await {
            tracing::debug!("Shell command failed: {}", e);
            if session.status().is_none() {
                writeln!(out, "❌ {}", e.user_friendly_message())?;
            }
        }

        if let Some(status) = session.take_active_status(Utc::now()) {
            writeln!(out, "{}", render::status_line(&status))?;
        }
    }

    writeln!(out)?;
    Ok(())
}

async fn execute<M, S, C, W>(
    session: &mut NominationSession<M, S>,
    config: &C,
    command: ShellCommand,
    out: &mut W,
) -> Result<()>
where
    M: MovieSource,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    match command {
        ShellCommand::Search(term) => {
            session.search(&term).await?;
            writeln!(
                out,
                "{}",
                render::search_results(session.search_term(), session.results(), session.ledger())
            )?;
        }
        ShellCommand::Nominate(NominateTarget::Result(position)) => {
            session.nominate_result(position - 1).await?;
        }
        ShellCommand::Nominate(NominateTarget::Id(id)) => {
            session.nominate_by_id(&id).await?;
        }
        ShellCommand::Remove(id) => {
            session.remove(&id).await?;
        }
        ShellCommand::List => {
            writeln!(out, "{}", render::nominations(session.ledger()))?;
        }
        ShellCommand::Share => {
            let link = session.share_link(config.share_base_url())?;
            writeln!(out, "{}", link)?;
        }
        ShellCommand::Help => writeln!(out, "{}", HELP)?,
        ShellCommand::Quit | ShellCommand::Empty => {}
    }
    Ok(())
}
