//! Value objects - Snowflake IDs and hashtag normalization

mod snowflake;
mod tags;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use tags::{extract_hashtags, normalize_hashtag};
