use crate::app::{render, shell};
use crate::config::Command;
use crate::core::session::{NominationSession, RestoreSource};
use crate::core::{ConfigProvider, MovieSource, Storage};
use crate::utils::error::Result;
use chrono::Utc;
use std::io::Write;
use tokio::io::BufReader;

/// Runs one CLI command against a fresh session.
///
/// `open` restores from the given link and so replaces the stored list; every
/// other command starts from the stored list. A broken stored list stops the
/// commands that write it back and is only reported for the read-only ones.
pub async fn run_command<M, S, C, W>(
    session: &mut NominationSession<M, S>,
    command: &Command,
    config: &C,
    out: &mut W,
) -> Result<()>
where
    M: MovieSource,
    S: Storage,
    C: ConfigProvider,
    W: Write,
{
    match command {
        Command::Open { link } => {
            let loaded = session.restore(RestoreSource::SharedLink(link.as_str())).await?;
            tracing::info!("📂 Loaded {} shared nominations", loaded);
        }
        Command::Nominate { .. } | Command::Remove { .. } | Command::Shell => {
            session.restore(RestoreSource::Storage).await?;
        }
        Command::Search { .. } | Command::List | Command::Share => {
            if let Err(e) = session.restore(RestoreSource::Storage).await {
                tracing::warn!("Could not restore stored nominations: {}", e);
            }
        }
    }
    write_status(session, out)?;

    match command {
        Command::Search { term } => {
            session.search(&term.join(" ")).await?;
            writeln!(
                out,
                "{}",
                render::search_results(session.search_term(), session.results(), session.ledger())
            )?;
        }
        Command::Nominate { imdb_id } => {
            session.nominate_by_id(imdb_id).await?;
            write_status(session, out)?;
            writeln!(out, "{}", render::nominations(session.ledger()))?;
        }
        Command::Remove { imdb_id } => {
            session.remove(imdb_id).await?;
            write_status(session, out)?;
            writeln!(out, "{}", render::nominations(session.ledger()))?;
        }
        Command::List | Command::Open { .. } => {
            writeln!(out, "{}", render::nominations(session.ledger()))?;
        }
        Command::Share => {
            let link = session.share_link(config.share_base_url())?;
            // The status only repeats the link
            session.take_status();
            writeln!(out, "{}", link)?;
        }
        Command::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run_shell(session, config, stdin, out).await?;
        }
    }

    Ok(())
}

fn write_status<M, S, W>(session: &mut NominationSession<M, S>, out: &mut W) -> Result<()>
where
    M: MovieSource,
    S: Storage,
    W: Write,
{
    if let Some(status) = session.take_active_status(Utc::now()) {
        writeln!(out, "{}", render::status_line(&status))?;
    }
    Ok(())
}
