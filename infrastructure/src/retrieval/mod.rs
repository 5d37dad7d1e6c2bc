//! Context source adapters

pub mod lexical_db;
pub mod local_corpus;
pub mod notion;

pub use lexical_db::{MySqlContextSource, MySqlParams};
pub use local_corpus::LocalCorpusSource;
pub use notion::NotionSource;
