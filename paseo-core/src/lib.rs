pub mod notice;
pub mod repository;

pub use notice::{Notice, NoticeLevel, NoticeList, NoticeSink};
pub use repository::{MetaValue, OrderMetaRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Metadata value has the wrong shape: {0}")]
    MalformedMeta(String),
    #[error("Metadata encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
