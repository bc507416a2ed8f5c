use crate::domain::model::{Movie, NOMINATION_LIMIT};
use crate::utils::error::{Result, ShoppiesError};

/// Ordered, de-duplicated nomination list capped at [`NOMINATION_LIMIT`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NominationLedger {
    movies: Vec<Movie>,
}

impl NominationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `movie`. A duplicate id is reported before a full list.
    pub fn add(&mut self, movie: Movie) -> Result<()> {
        if self.contains(&movie.imdb_id) {
            return Err(ShoppiesError::AlreadyNominated { id: movie.imdb_id });
        }
        if self.is_full() {
            return Err(ShoppiesError::NominationLimitReached {
                limit: NOMINATION_LIMIT,
            });
        }

        tracing::debug!("Nominating {} ({})", movie.title, movie.imdb_id);
        self.movies.push(movie);
        Ok(())
    }

    pub fn remove(&mut self, imdb_id: &str) -> Result<Movie> {
        let position = self
            .movies
            .iter()
            .position(|m| m.imdb_id == imdb_id)
            .ok_or_else(|| ShoppiesError::NotNominated {
                id: imdb_id.to_string(),
            })?;

        Ok(self.movies.remove(position))
    }

    /// Replaces the whole list, keeping the first occurrence of each id and at
    /// most [`NOMINATION_LIMIT`] entries. Returns how many movies were dropped.
    pub fn replace_with(&mut self, movies: Vec<Movie>) -> usize {
        let offered = movies.len();
        let mut next: Vec<Movie> = Vec::with_capacity(NOMINATION_LIMIT);

        for movie in movies {
            if next.len() == NOMINATION_LIMIT {
                break;
            }
            if next.iter().any(|m| m.imdb_id == movie.imdb_id) {
                continue;
            }
            next.push(movie);
        }

        let dropped = offered - next.len();
        if dropped > 0 {
            tracing::warn!("Dropped {} movies while loading nominations", dropped);
        }
        self.movies = next;
        dropped
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.movies.iter().any(|m| m.imdb_id == imdb_id)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.movies.len() >= NOMINATION_LIMIT
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn ids(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.imdb_id.as_str()).collect()
    }

    /// Comma-joined ids in nomination order, the persisted and shared form.
    pub fn id_string(&self) -> String {
        self.ids().join(",")
    }
}

/// Splits a comma-joined id list, trimming entries and skipping empty ones.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(n: usize) -> Movie {
        Movie::new(format!("tt{:07}", n), format!("Movie {}", n), "2001", None)
    }

    #[test]
    fn test_add_preserves_order() {
        let mut ledger = NominationLedger::new();
        ledger.add(movie(3)).unwrap();
        ledger.add(movie(1)).unwrap();
        ledger.add(movie(2)).unwrap();

        assert_eq!(ledger.ids(), vec!["tt0000003", "tt0000001", "tt0000002"]);
        assert_eq!(ledger.id_string(), "tt0000003,tt0000001,tt0000002");
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut ledger = NominationLedger::new();
        ledger.add(movie(1)).unwrap();

        let err = ledger.add(movie(1)).unwrap_err();
        assert!(matches!(err, ShoppiesError::AlreadyNominated { ref id } if id == "tt0000001"));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_rejects_when_full() {
        let mut ledger = NominationLedger::new();
        for n in 1..=NOMINATION_LIMIT {
            ledger.add(movie(n)).unwrap();
        }
        assert!(ledger.is_full());

        let err = ledger.add(movie(99)).unwrap_err();
        assert!(matches!(err, ShoppiesError::NominationLimitReached { limit: 5 }));
        assert_eq!(ledger.len(), NOMINATION_LIMIT);
    }

    #[test]
    fn test_duplicate_reported_before_full() {
        let mut ledger = NominationLedger::new();
        for n in 1..=NOMINATION_LIMIT {
            ledger.add(movie(n)).unwrap();
        }

        let err = ledger.add(movie(2)).unwrap_err();
        assert!(matches!(err, ShoppiesError::AlreadyNominated { .. }));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut ledger = NominationLedger::new();
        for n in 1..=4 {
            ledger.add(movie(n)).unwrap();
        }

        let removed = ledger.remove("tt0000002").unwrap();
        assert_eq!(removed.title, "Movie 2");
        assert_eq!(ledger.id_string(), "tt0000001,tt0000003,tt0000004");

        assert!(matches!(
            ledger.remove("tt0000002"),
            Err(ShoppiesError::NotNominated { .. })
        ));
    }

    #[test]
    fn test_remove_frees_a_slot() {
        let mut ledger = NominationLedger::new();
        for n in 1..=NOMINATION_LIMIT {
            ledger.add(movie(n)).unwrap();
        }
        ledger.remove("tt0000001").unwrap();
        assert!(ledger.add(movie(6)).is_ok());
        assert_eq!(ledger.ids().last(), Some(&"tt0000006"));
    }

    #[test]
    fn test_replace_with_dedups_and_caps() {
        let mut ledger = NominationLedger::new();
        ledger.add(movie(42)).unwrap();

        let incoming = vec![
            movie(1),
            movie(2),
            movie(1),
            movie(3),
            movie(4),
            movie(5),
            movie(6),
        ];
        let dropped = ledger.replace_with(incoming);

        assert_eq!(dropped, 2);
        assert_eq!(
            ledger.id_string(),
            "tt0000001,tt0000002,tt0000003,tt0000004,tt0000005"
        );
        assert!(!ledger.contains("tt0000042"));
    }

    #[test]
    fn test_empty_ledger_id_string() {
        assert_eq!(NominationLedger::new().id_string(), "");
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("tt1, tt2 ,,tt3"), vec!["tt1", "tt2", "tt3"]);
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(" , ").is_empty());
    }
}
