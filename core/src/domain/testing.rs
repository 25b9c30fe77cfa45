use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::{
    common::entities::app_errors::CoreError,
    llm::ports::LLMClient,
    news_digest::{entities::NewsArticle, ports::NewsFetcher},
};

/// Scripted model: pops one reply per call and records the prompts it saw.
#[derive(Default)]
pub struct FakeLLMClient {
    replies: Mutex<VecDeque<Result<String, CoreError>>>,
    image_calls: Mutex<Vec<String>>,
    text_calls: Mutex<Vec<(String, String)>>,
    text_max_tokens: Mutex<Vec<u32>>,
}

impl FakeLLMClient {
    pub fn replying<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::scripted(replies.into_iter().map(|r| Ok(r.into())))
    }

    pub fn failing(error: CoreError) -> Self {
        Self::scripted([Err(error)])
    }

    pub fn scripted<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, CoreError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn image_calls(&self) -> Vec<String> {
        self.image_calls.lock().unwrap().clone()
    }

    pub fn text_calls(&self) -> Vec<(String, String)> {
        self.text_calls.lock().unwrap().clone()
    }

    pub fn text_max_tokens(&self) -> Vec<u32> {
        self.text_max_tokens.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.image_calls.lock().unwrap().len() + self.text_calls.lock().unwrap().len()
    }

    fn next_reply(&self) -> Result<String, CoreError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CoreError::ExternalServiceError("script exhausted".into())))
    }
}

impl LLMClient for FakeLLMClient {
    async fn generate_with_image(
        &self,
        system_prompt: String,
        _image_data: Vec<u8>,
    ) -> Result<String, CoreError> {
        self.image_calls.lock().unwrap().push(system_prompt);
        self.next_reply()
    }

    async fn generate_with_text(
        &self,
        system_prompt: String,
        user_prompt: String,
        max_tokens: u32,
    ) -> Result<String, CoreError> {
        self.text_max_tokens.lock().unwrap().push(max_tokens);
        self.text_calls
            .lock()
            .unwrap()
            .push((system_prompt, user_prompt));
        self.next_reply()
    }
}

pub struct FakeNewsFetcher {
    articles: Result<Vec<NewsArticle>, CoreError>,
    topics: Mutex<Vec<String>>,
}

impl FakeNewsFetcher {
    pub fn empty() -> Self {
        Self::with_articles(Vec::new())
    }

    pub fn with_articles(articles: Vec<NewsArticle>) -> Self {
        Self {
            articles: Ok(articles),
            topics: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CoreError) -> Self {
        Self {
            articles: Err(error),
            topics: Mutex::new(Vec::new()),
        }
    }

    pub fn topics(&self) -> Vec<String> {
        self.topics.lock().unwrap().clone()
    }
}

impl NewsFetcher for FakeNewsFetcher {
    async fn fetch_articles(&self, topic: String) -> Result<Vec<NewsArticle>, CoreError> {
        self.topics.lock().unwrap().push(topic);
        self.articles.clone()
    }
}

pub fn article(n: usize) -> NewsArticle {
    NewsArticle {
        title: format!("Headline {n}"),
        description: Some(format!("Description {n}")),
        source: Some("Daily Planet".to_string()),
        url: format!("https://news.example/{n}"),
    }
}
