pub mod news_api_client;

pub use news_api_client::{ConfiguredNewsFetcher, NewsApiClient};
