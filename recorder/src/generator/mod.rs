pub mod feed;

pub use feed::{build_survey_feeds, encode_latitude, encode_longitude, FeedConfig};
