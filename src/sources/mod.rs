pub mod traits;
pub mod github;

pub use traits::RepoRefresher;
pub use github::GitHubRefresher;
