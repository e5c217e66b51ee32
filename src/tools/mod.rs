pub mod fetch_news;
pub mod fetch_search;
pub mod fetch_url;
pub mod meta;
pub mod utils;

pub use fetch_news::FetchNewsHandler;
pub use fetch_search::FetchSearchHandler;
pub use fetch_url::FetchUrlHandler;
pub use meta::{ToolInputSchema, ToolMeta, ToolsMeta};
pub use fetch_news::meta as fetch_news_meta;
pub use fetch_search::meta as fetch_search_meta;
pub use fetch_url::meta as fetch_url_meta;
