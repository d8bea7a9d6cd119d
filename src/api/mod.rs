pub mod client;
pub mod models;
pub mod parser;

pub use client::MovieBoxClient;
pub use models::{SearchRequest, Section, Subject};
