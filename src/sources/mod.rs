pub mod nitter;
pub mod reddit;
pub mod static_source;

pub use nitter::NitterSource;
pub use reddit::RedditSource;
pub use static_source::StaticSource;
