pub mod common;
pub mod label_analysis;
pub mod llm;
pub mod news_digest;

#[cfg(test)]
pub(crate) mod testing;
