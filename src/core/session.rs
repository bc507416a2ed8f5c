use crate::core::ledger::{parse_id_list, NominationLedger};
use crate::core::share::{build_share_link, parse_share_link};
use crate::core::status::{
    StatusMessage, DEFAULT_DISPLAY_MS, RESTORE_WARNING_DISPLAY_MS, SHARE_DISPLAY_MS,
};
use crate::core::{MovieSource, Storage};
use crate::domain::model::{Movie, NOMINATION_LIMIT, STORAGE_KEY};
use crate::utils::error::{Result, ShoppiesError};
use chrono::{DateTime, Utc};

/// Where a session's initial nominations come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource<'a> {
    SharedLink(&'a str),
    Storage,
}

/// One user's working state: the nomination list, the latest search and the
/// latest status message. Every successful change to the list is persisted.
pub struct NominationSession<M: MovieSource, S: Storage> {
    source: M,
    storage: S,
    ledger: NominationLedger,
    search_term: String,
    results: Vec<Movie>,
    status: Option<StatusMessage>,
}

impl<M: MovieSource, S: Storage> NominationSession<M, S> {
    pub fn new(source: M, storage: S) -> Self {
        Self {
            source,
            storage,
            ledger: NominationLedger::new(),
            search_term: String::new(),
            results: Vec::new(),
            status: None,
        }
    }

    /// Loads nominations either from a share link or from storage and returns
    /// how many were loaded. On a failed lookup the current list is kept.
    pub async fn restore(&mut self, from: RestoreSource<'_>) -> Result<usize> {
        let ids = match from {
            RestoreSource::SharedLink(link) => match parse_share_link(link) {
                Ok(ids) => ids,
                Err(e) => {
                    self.set_error(format!("Error: {}", e), RESTORE_WARNING_DISPLAY_MS);
                    return Err(e);
                }
            },
            RestoreSource::Storage => match self.storage.get(STORAGE_KEY).await? {
                Some(raw) => parse_id_list(&raw),
                None => Vec::new(),
            },
        };

        if ids.is_empty() {
            tracing::debug!("Nothing to restore");
            return Ok(0);
        }

        self.load_from_ids(ids).await
    }

    async fn load_from_ids(&mut self, ids: Vec<String>) -> Result<usize> {
        let mut unique: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }

        if unique.len() > NOMINATION_LIMIT {
            tracing::warn!(
                "Received {} ids, only the first {} will be loaded",
                unique.len(),
                NOMINATION_LIMIT
            );
            self.set_error(
                format!(
                    "Error: Your share link contains more than {} movies, only {} will be loaded",
                    NOMINATION_LIMIT, NOMINATION_LIMIT
                ),
                RESTORE_WARNING_DISPLAY_MS,
            );
            unique.truncate(NOMINATION_LIMIT);
        }

        let mut movies = Vec::with_capacity(unique.len());
        for id in &unique {
            match self.source.lookup_by_id(id).await {
                Ok(movie) => movies.push(movie),
                Err(e) => {
                    tracing::error!("Lookup of {} failed while restoring: {}", id, e);
                    let err = ShoppiesError::RestoreError {
                        source: Box::new(e),
                    };
                    self.set_error(err.user_friendly_message(), DEFAULT_DISPLAY_MS);
                    return Err(err);
                }
            }
        }

        let previous = self.ledger.clone();
        self.ledger.replace_with(movies);
        self.persist_or_rollback(previous).await?;
        tracing::info!("Restored {} nominations", self.ledger.len());
        Ok(self.ledger.len())
    }

    /// Runs a title search. A blank term clears the results without a request.
    pub async fn search(&mut self, term: &str) -> Result<&[Movie]> {
        self.search_term = term.to_string();
        let term = term.trim();

        if term.is_empty() {
            self.results.clear();
            return Ok(&self.results);
        }

        match self.source.search_by_title(term).await {
            Ok(movies) => {
                tracing::debug!("Search '{}' returned {} movies", term, movies.len());
                self.results = movies;
                Ok(&self.results)
            }
            Err(e) => {
                self.results.clear();
                self.set_error(e.user_friendly_message(), DEFAULT_DISPLAY_MS);
                Err(e)
            }
        }
    }

    pub async fn nominate(&mut self, movie: Movie) -> Result<()> {
        let title = movie.title.clone();
        let previous = self.ledger.clone();
        if let Err(e) = self.ledger.add(movie) {
            return Err(self.reject(e, &title));
        }

        self.persist_or_rollback(previous).await?;
        self.set_info(format!("Nominated {}", title), DEFAULT_DISPLAY_MS);
        Ok(())
    }

    /// Nominates the search result at `index` (zero-based).
    pub async fn nominate_result(&mut self, index: usize) -> Result<()> {
        let movie = match self.results.get(index) {
            Some(movie) => movie.clone(),
            None => {
                let err = ShoppiesError::NoSuchResult { index: index + 1 };
                self.set_error(format!("Error: {}", err), DEFAULT_DISPLAY_MS);
                return Err(err);
            }
        };
        self.nominate(movie).await
    }

    /// Looks the id up and nominates it. Rejections that need no lookup are
    /// reported without a request.
    pub async fn nominate_by_id(&mut self, imdb_id: &str) -> Result<()> {
        if self.ledger.contains(imdb_id) {
            let err = ShoppiesError::AlreadyNominated {
                id: imdb_id.to_string(),
            };
            return Err(self.reject(err, imdb_id));
        }
        if self.ledger.is_full() {
            let err = ShoppiesError::NominationLimitReached {
                limit: NOMINATION_LIMIT,
            };
            return Err(self.reject(err, imdb_id));
        }

        let movie = match self.source.lookup_by_id(imdb_id).await {
            Ok(movie) => movie,
            Err(e) => {
                self.set_error(e.user_friendly_message(), DEFAULT_DISPLAY_MS);
                return Err(e);
            }
        };
        self.nominate(movie).await
    }

    pub async fn remove(&mut self, imdb_id: &str) -> Result<Movie> {
        let previous = self.ledger.clone();
        let removed = match self.ledger.remove(imdb_id) {
            Ok(movie) => movie,
            Err(e) => {
                self.set_error(format!("Error: {}", e), DEFAULT_DISPLAY_MS);
                return Err(e);
            }
        };

        self.persist_or_rollback(previous).await?;
        self.set_info(format!("Removed {}", removed.title), DEFAULT_DISPLAY_MS);
        Ok(removed)
    }

    pub fn share_link(&mut self, base_url: &str) -> Result<String> {
        if self.ledger.is_empty() {
            self.set_error("Nothing to Share", DEFAULT_DISPLAY_MS);
            return Err(ShoppiesError::NothingToShare);
        }

        let link = build_share_link(base_url, &self.ledger.ids())?;
        self.set_info(
            format!("Your share link is generated: {}", link),
            SHARE_DISPLAY_MS,
        );
        Ok(link)
    }

    /// Saves the list. If the write fails the list goes back to `previous`,
    /// so memory never shows a change that storage does not have.
    async fn persist_or_rollback(&mut self, previous: NominationLedger) -> Result<()> {
        let ids = self.ledger.id_string();
        tracing::debug!("Persisting nominations: [{}]", ids);
        if let Err(e) = self.storage.set(STORAGE_KEY, &ids).await {
            tracing::error!("Could not save nominations: {}", e);
            self.ledger = previous;
            self.set_error(format!("Error: Could not save nominations. {}", e), DEFAULT_DISPLAY_MS);
            return Err(e);
        }
        Ok(())
    }

    fn reject(&mut self, err: ShoppiesError, title: &str) -> ShoppiesError {
        let text = match &err {
            ShoppiesError::AlreadyNominated { .. } => {
                format!("Error: {} is already nominated", title)
            }
            other => other.to_string(),
        };
        self.set_error(text, DEFAULT_DISPLAY_MS);
        err
    }

    fn set_error(&mut self, text: impl Into<String>, display_ms: i64) {
        self.status = Some(StatusMessage::error(text, display_ms));
    }

    fn set_info(&mut self, text: impl Into<String>, display_ms: i64) {
        self.status = Some(StatusMessage::info(text, display_ms));
    }

    pub fn ledger(&self) -> &NominationLedger {
        &self.ledger
    }

    pub fn results(&self) -> &[Movie] {
        &self.results
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn is_nominated(&self, imdb_id: &str) -> bool {
        self.ledger.contains(imdb_id)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The latest status, unless it has expired by `now`.
    pub fn active_status(&self, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| !s.is_expired_at(now))
    }

    pub fn take_status(&mut self) -> Option<StatusMessage> {
        self.status.take()
    }

    /// Takes the latest status, dropping it if it has already expired by `now`.
    pub fn take_active_status(&mut self, now: DateTime<Utc>) -> Option<StatusMessage> {
        self.status.take().filter(|s| !s.is_expired_at(now))
    }
}
