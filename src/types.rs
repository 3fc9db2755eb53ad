#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsSource {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
    pub language: String,
    pub country: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsSourceList {
    pub sources: Vec<NewsSource>,
    /// API status string, `"ok"` on success.
    pub status: String,
}
