use rusqlite::OptionalExtension;

use crate::domain::{FeedItem, ItemSource, RepoRecord};
use crate::errors::FeedResult;
use crate::storage::sqlite::connection::row_to_item;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::PublicRepoRepository;

const LAST_REFRESH_KEY: &str = "public_repos.last_refresh";

pub struct SqlitePublicRepoRepository {
    storage: SqliteStorage,
}

impl SqlitePublicRepoRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl PublicRepoRepository for SqlitePublicRepoRepository {
    fn list_public_repos(&self) -> FeedResult<Vec<FeedItem>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, description, url, language, stars, timestamp FROM public_repos ORDER BY timestamp DESC, id DESC"
        )?;

        let repos = stmt.query_map([], |row| row_to_item(row, ItemSource::Repo))?;
        let repos = repos.collect::<Result<Vec<_>, _>>()?;
        Ok(repos)
    }

    fn replace_all(&self, repos: &[RepoRecord]) -> FeedResult<()> {
        let mut conn = self.storage.connection()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM public_repos", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO public_repos (name, description, url, language, stars, timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            )?;
            for repo in repos {
                stmt.execute((
                    &repo.name,
                    &repo.description,
                    &repo.url,
                    &repo.language,
                    repo.stars,
                    &repo.timestamp,
                ))?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn last_refreshed(&self) -> FeedResult<Option<i64>> {
        let conn = self.storage.connection()?;
        let value = conn
            .query_row(
                "SELECT value FROM cache_meta WHERE key = ?1",
                [LAST_REFRESH_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn mark_refreshed(&self, at: i64) -> FeedResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO cache_meta (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (LAST_REFRESH_KEY, at),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FeedError;

    fn setup_repo() -> SqlitePublicRepoRepository {
        let storage = SqliteStorage::in_memory().unwrap();
        SqlitePublicRepoRepository::new(storage)
    }

    fn record(name: &str, timestamp: Option<&str>) -> RepoRecord {
        RepoRecord::new(name.to_string(), format!("https://github.com/me/{}", name))
            .with_timestamp(timestamp.map(str::to_string))
    }

    #[test]
    fn test_list_empty() {
        let repo = setup_repo();
        assert!(repo.list_public_repos().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted_most_recent_first() {
        let repo = setup_repo();
        repo.replace_all(&[
            record("old", Some("2024-01-01 09:00:00")),
            record("undated", None),
            record("new", Some("2024-01-03 10:00:00")),
        ])
        .unwrap();

        let names: Vec<_> = repo
            .list_public_repos()
            .unwrap()
            .iter()
            .map(|r| r.label().to_string())
            .collect();
        assert_eq!(names, vec!["new", "old", "undated"]);
    }

    #[test]
    fn test_replace_all_drops_previous_rows() {
        let repo = setup_repo();
        repo.replace_all(&[record("a", None), record("b", None)]).unwrap();
        repo.replace_all(&[record("c", Some("2024-01-01 00:00:00"))]).unwrap();

        let repos = repo.list_public_repos().unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].label(), "c");
        assert_eq!(repos[0].source, ItemSource::Repo);
    }

    #[test]
    fn test_replace_all_is_atomic_on_conflict() {
        let repo = setup_repo();
        repo.replace_all(&[record("keep", None)]).unwrap();

        let result = repo.replace_all(&[record("dup", None), record("dup", None)]);
        assert!(matches!(result, Err(FeedError::ConstraintViolation(_))));

        let repos = repo.list_public_repos().unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].label(), "keep");
    }

    #[test]
    fn test_padded_timestamp_fails_merge_instead_of_missorting() {
        let repo = setup_repo();
        repo.replace_all(&[
            record("mid", Some("2024-06-01 00:00:00")),
            record("padded", Some(" 2025-01-01 00:00:00")),
        ])
        .unwrap();

        let repos = repo.list_public_repos().unwrap();
        let result = crate::services::top_k(&repos, &[], repos.len());
        assert!(matches!(result, Err(FeedError::MalformedTimestamp(_))));
    }

    #[test]
    fn test_refresh_marker_round_trip() {
        let repo = setup_repo();
        assert_eq!(repo.last_refreshed().unwrap(), None);

        repo.mark_refreshed(100).unwrap();
        repo.mark_refreshed(200).unwrap();
        assert_eq!(repo.last_refreshed().unwrap(), Some(200));
    }
}
