use crate::core::ledger::parse_id_list;
use crate::utils::error::{Result, ShoppiesError};
use url::Url;

pub const SHARE_PATH: &str = "share";
pub const SHARE_QUERY_KEY: &str = "ids";

/// Builds `{base}/share?ids=<a,b,c>`. The base path is treated as a directory,
/// so `https://host/app` and `https://host/app/` both yield `/app/share`.
pub fn build_share_link<S: AsRef<str>>(base_url: &str, ids: &[S]) -> Result<String> {
    if ids.is_empty() {
        return Err(ShoppiesError::NothingToShare);
    }

    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut link = base.join(SHARE_PATH)?;
    link.set_fragment(None);
    link.set_query(None);

    let joined = ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");
    link.query_pairs_mut().append_pair(SHARE_QUERY_KEY, &joined);

    Ok(link.to_string())
}

/// Extracts the ordered id list from a share link.
pub fn parse_share_link(link: &str) -> Result<Vec<String>> {
    let url = Url::parse(link.trim())?;

    let last_segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or_default();
    if last_segment != SHARE_PATH {
        return Err(ShoppiesError::InvalidShareLink {
            reason: format!("expected a /{} path, got '{}'", SHARE_PATH, url.path()),
        });
    }

    let raw = url
        .query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_KEY)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    let ids = parse_id_list(&raw);
    if ids.is_empty() {
        return Err(ShoppiesError::EmptyShareLink);
    }

    tracing::debug!("Share link carries {} ids", ids.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_share_link_encodes_commas() {
        let link = build_share_link("http://localhost:3000", &["tt0372784", "tt0468569"]).unwrap();
        assert_eq!(link, "http://localhost:3000/share?ids=tt0372784%2Ctt0468569");
    }

    #[test]
    fn test_build_share_link_under_sub_path() {
        let with_slash = build_share_link("https://example.com/shoppies/", &["tt1"]).unwrap();
        let without_slash = build_share_link("https://example.com/shoppies", &["tt1"]).unwrap();

        assert_eq!(with_slash, "https://example.com/shoppies/share?ids=tt1");
        assert_eq!(with_slash, without_slash);
    }

    #[test]
    fn test_build_share_link_drops_existing_query() {
        let link = build_share_link("https://example.com/?ref=abc#top", &["tt1"]).unwrap();
        assert_eq!(link, "https://example.com/share?ids=tt1");
    }

    #[test]
    fn test_build_share_link_requires_ids() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            build_share_link("http://localhost:3000", &empty),
            Err(ShoppiesError::NothingToShare)
        ));
    }

    #[test]
    fn test_parse_share_link_round_trips_order() {
        let ids = ["tt3", "tt1", "tt2"];
        let link = build_share_link("https://example.com", &ids).unwrap();
        assert_eq!(parse_share_link(&link).unwrap(), vec!["tt3", "tt1", "tt2"]);
    }

    #[test]
    fn test_parse_share_link_accepts_raw_commas() {
        let ids = parse_share_link("https://example.com/share?ids=tt1,tt2").unwrap();
        assert_eq!(ids, vec!["tt1", "tt2"]);
    }

    #[test]
    fn test_parse_share_link_without_content() {
        assert!(matches!(
            parse_share_link("https://example.com/share?ids="),
            Err(ShoppiesError::EmptyShareLink)
        ));
        assert!(matches!(
            parse_share_link("https://example.com/share"),
            Err(ShoppiesError::EmptyShareLink)
        ));
    }

    #[test]
    fn test_parse_share_link_wrong_path() {
        assert!(matches!(
            parse_share_link("https://example.com/nominations?ids=tt1"),
            Err(ShoppiesError::InvalidShareLink { .. })
        ));
        assert!(parse_share_link("not a url").is_err());
    }
}
