pub mod scraper;

pub use self::scraper::user_data;
