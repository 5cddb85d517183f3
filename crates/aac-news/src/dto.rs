use super::*;
use aac_core::Unique;

#[derive(Debug, serde::Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub body: String,
    pub category: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, serde::Deserialize)]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    pub icon: Option<String>,
    pub hidden: Option<bool>,
}

#[derive(Debug, serde::Serialize)]
pub struct NewsResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_name: String,
    pub category: String,
    pub icon: Option<String>,
    pub hidden: bool,
    pub posted_at: i64,
}

impl NewsResponse {
    pub fn of(news: &News, author_name: &str) -> Self {
        Self {
            id: news.id().to_string(),
            title: news.title().to_string(),
            body: news.body().to_string(),
            author_name: author_name.to_string(),
            category: news.category().to_string(),
            icon: news.icon().map(str::to_string),
            hidden: news.hidden(),
            posted_at: aac_core::epoch_secs(news.posted()),
        }
    }
}
