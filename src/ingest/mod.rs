pub mod client;
pub mod dto;
pub mod service;

pub use client::MoaClient;
pub use service::ingest_day;

#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[error("http error: {0}")]
    Http(String),
    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}
