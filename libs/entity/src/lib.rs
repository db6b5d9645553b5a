pub mod news;

pub mod prelude {
    pub use crate::news::{
        parse_timestamp, Category, CreateNewsRequest, FormError, NewsFields,
        NewsForm, NewsId, NewsItem, UpdateNewsRequest,
    };
}
