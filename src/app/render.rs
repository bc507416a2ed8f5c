use crate::core::ledger::NominationLedger;
use crate::core::status::StatusMessage;
use crate::core::Movie;
use crate::domain::model::NOMINATION_LIMIT;

pub const POSTER_FALLBACK: &str = "not available";

pub fn movie_card(movie: &Movie) -> String {
    format!(
        "Title: {}\nYear: {}\nimdb ID: {}\nPoster: {}",
        movie.title,
        movie.year,
        movie.imdb_id,
        movie.poster_or(POSTER_FALLBACK)
    )
}

/// Numbered result list; already nominated movies are marked since they
/// cannot be nominated again.
pub fn search_results(term: &str, results: &[Movie], ledger: &NominationLedger) -> String {
    let header = if term.trim().is_empty() {
        "Results For ...".to_string()
    } else {
        format!("Results For \"{}\"", term.trim())
    };

    let mut lines = vec![header];
    for (index, movie) in results.iter().enumerate() {
        let marker = if ledger.contains(&movie.imdb_id) {
            "  [nominated]"
        } else {
            ""
        };
        lines.push(format!(
            "{:>2}. {} ({}) {}{}",
            index + 1,
            movie.title,
            movie.year,
            movie.imdb_id,
            marker
        ));
    }
    lines.join("\n")
}

pub fn nominations(ledger: &NominationLedger) -> String {
    let mut out = format!("Nominations ({}/{})", ledger.len(), NOMINATION_LIMIT);
    if ledger.is_empty() {
        out.push_str("\n  (none yet)");
        return out;
    }
    for movie in ledger.movies() {
        out.push_str("\n\n");
        out.push_str(&movie_card(movie));
    }
    out
}

pub fn status_line(status: &StatusMessage) -> String {
    if status.is_error() {
        format!("❌ {}", status.text)
    } else {
        format!("✅ {}", status.text)
    }
}
