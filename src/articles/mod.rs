mod catalog;
mod counter;

pub use catalog::{ArticleCard, CategoryArticleListing, DEFAULT_CATEGORY, categories};
pub use counter::ViewCounter;
