pub mod llm;
pub mod news;
