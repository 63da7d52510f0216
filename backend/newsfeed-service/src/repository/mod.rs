mod postgres_repository;
mod r#trait;

pub use postgres_repository::{PostgresContentRepository, PostgresFollowGraphRepository};
pub use r#trait::{ContentRepository, FollowGraphRepository, RepositoryResult};

#[cfg(test)]
pub use r#trait::{MockContentRepository, MockFollowGraphRepository};
