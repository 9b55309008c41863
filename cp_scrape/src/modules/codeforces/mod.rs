pub mod client;

pub use self::client::user_data;
