use crate::domain::{max_index, FeedItem, Moment};
use crate::errors::FeedResult;

/// Merge two most-recent-first lists into the `k` latest items.
///
/// Repos are compared first, so equal timestamps favour the repo. Once one
/// side runs dry the other fills the remaining slots; when both are empty the
/// result is simply shorter than `k`.
pub fn top_k(repos: &[FeedItem], blogs: &[FeedItem], k: usize) -> FeedResult<Vec<FeedItem>> {
    let sources = [repos, blogs];
    let mut cursors = [0usize; 2];
    let mut merged = Vec::with_capacity(k.min(repos.len() + blogs.len()));

    while merged.len() < k {
        let mut live = Vec::with_capacity(sources.len());
        let mut heads = Vec::with_capacity(sources.len());

        for (source, items) in sources.iter().enumerate() {
            if let Some(item) = items.get(cursors[source]) {
                live.push(source);
                heads.push(Moment::of(item)?);
            }
        }

        let Some(winner) = max_index(&heads).map(|i| live[i]) else {
            break;
        };

        merged.push(sources[winner][cursors[winner]].clone());
        cursors[winner] += 1;
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemSource;
    use crate::errors::FeedError;

    fn repo(name: &str, ts: Option<&str>) -> FeedItem {
        FeedItem::new(ItemSource::Repo)
            .with_field("name", name)
            .with_timestamp(ts)
    }

    fn blog(title: &str, ts: Option<&str>) -> FeedItem {
        FeedItem::new(ItemSource::Blog)
            .with_field("title", title)
            .with_timestamp(ts)
    }

    fn labels(items: &[FeedItem]) -> Vec<&str> {
        items.iter().map(|i| i.label()).collect()
    }

    fn sample() -> (Vec<FeedItem>, Vec<FeedItem>) {
        let repos = vec![
            repo("r1", Some("2024-03-05 08:00:00")),
            repo("r2", Some("2024-02-01 12:00:00")),
            repo("r3", Some("2024-01-01 00:00:00")),
            repo("r4", None),
        ];
        let blogs = vec![
            blog("b1", Some("2024-03-10 09:30:00")),
            blog("b2", Some("2024-02-01 12:00:00")),
            blog("b3", Some("2023-12-24 18:00:00")),
        ];
        (repos, blogs)
    }

    #[test]
    fn test_worked_example() {
        let repos = vec![
            repo("r-0103", Some("2024-01-03 10:00:00")),
            repo("r-0101", Some("2024-01-01 09:00:00")),
        ];
        let blogs = vec![blog("b-0102", Some("2024-01-02 12:00:00"))];

        let merged = top_k(&repos, &blogs, 3).unwrap();
        assert_eq!(labels(&merged), vec!["r-0103", "b-0102", "r-0101"]);
        assert_eq!(merged[1].source, ItemSource::Blog);
    }

    #[test]
    fn test_exact_length_and_no_reuse() {
        let (repos, blogs) = sample();
        let total = repos.len() + blogs.len();

        for k in 0..=total {
            let merged = top_k(&repos, &blogs, k).unwrap();
            assert_eq!(merged.len(), k, "k = {}", k);

            let mut seen = labels(&merged);
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), k, "duplicate item for k = {}", k);

            for item in &merged {
                assert!(repos.contains(item) || blogs.contains(item));
            }
        }
    }

    #[test]
    fn test_output_is_descending() {
        let (repos, blogs) = sample();
        let merged = top_k(&repos, &blogs, repos.len() + blogs.len()).unwrap();

        let moments: Vec<Moment> = merged.iter().map(|i| Moment::of(i).unwrap()).collect();
        assert!(moments.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(
            labels(&merged),
            vec!["b1", "r1", "r2", "b2", "r3", "b3", "r4"]
        );
    }

    #[test]
    fn test_tie_prefers_repo() {
        let repos = vec![repo("r", Some("2024-01-01 00:00:00"))];
        let blogs = vec![blog("b", Some("2024-01-01 00:00:00"))];

        let merged = top_k(&repos, &blogs, 2).unwrap();
        assert_eq!(labels(&merged), vec!["r", "b"]);
    }

    #[test]
    fn test_single_source_passthrough() {
        let (repos, blogs) = sample();

        let only_blogs = top_k(&[], &blogs, 2).unwrap();
        assert_eq!(only_blogs, blogs[..2].to_vec());

        let only_repos = top_k(&repos, &[], 3).unwrap();
        assert_eq!(only_repos, repos[..3].to_vec());
    }

    #[test]
    fn test_undated_item_still_drawn_after_other_side_runs_dry() {
        let blogs = vec![blog("undated", None)];
        let merged = top_k(&[], &blogs, 1).unwrap();
        assert_eq!(labels(&merged), vec!["undated"]);

        let repos = vec![repo("dated", Some("2024-01-01 00:00:00"))];
        let merged = top_k(&repos, &blogs, 2).unwrap();
        assert_eq!(labels(&merged), vec!["dated", "undated"]);
    }

    #[test]
    fn test_stops_early_when_both_exhausted() {
        let (repos, blogs) = sample();
        let merged = top_k(&repos, &blogs, 50).unwrap();

        assert_eq!(merged.len(), repos.len() + blogs.len());
        assert!(top_k(&[], &[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_k() {
        let (repos, blogs) = sample();
        assert!(top_k(&repos, &blogs, 0).unwrap().is_empty());
    }

    #[test]
    fn test_idempotent_and_inputs_untouched() {
        let (repos, blogs) = sample();
        let (repos_before, blogs_before) = (repos.clone(), blogs.clone());

        let first = top_k(&repos, &blogs, 5).unwrap();
        let second = top_k(&repos, &blogs, 5).unwrap();

        assert_eq!(first, second);
        assert_eq!(repos, repos_before);
        assert_eq!(blogs, blogs_before);
    }

    #[test]
    fn test_malformed_timestamp_propagates() {
        let repos = vec![repo("bad", Some("2024-13-99 99:99:99"))];
        let blogs = vec![blog("b", Some("2024-01-01 00:00:00"))];

        let result = top_k(&repos, &blogs, 1);
        assert!(matches!(result, Err(FeedError::MalformedTimestamp(_))));
    }
}
