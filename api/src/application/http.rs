pub mod health;
pub mod label_analysis;
pub mod news_digest;
pub mod server;
