//! Shared test infrastructure

pub mod mock_repos;
