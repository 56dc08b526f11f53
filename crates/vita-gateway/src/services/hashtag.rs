//! Trending hashtag service
//!
//! When no real usage data is available (fresh deployment, or every backend
//! down) the service degrades to a curated starter list instead of an empty
//! response or an error.

use chrono::Utc;
use tracing::{instrument, warn};
use vita_core::Hashtag;

use crate::dto::TrendingTags;

use super::context::GatewayContext;
use super::error::{GatewayError, GatewayResult};
use super::resolve::resolve_social;

/// Starter tags shown before the community has produced real usage data
const CURATED_TAGS: &[&str] = &[
    "fitness",
    "nutrition",
    "running",
    "sleep",
    "wellness",
    "workout",
    "mindfulness",
    "hydration",
    "steps",
    "recovery",
];

pub struct TrendingService<'a> {
    ctx: &'a GatewayContext,
}

impl<'a> TrendingService<'a> {
    pub fn new(ctx: &'a GatewayContext) -> Self {
        Self { ctx }
    }

    /// Most-used hashtags, highest use count first.
    #[instrument(skip(self))]
    pub async fn trending(&self, limit: Option<i64>) -> GatewayResult<TrendingTags> {
        let limit = limit
            .unwrap_or(self.ctx.social_config().trending_limit)
            .clamp(1, 50);

        let result = resolve_social(self.ctx.social_stores(), "trending_hashtags", move |s| {
            Box::pin(async move { s.trending_hashtags(limit).await })
        })
        .await;

        match result {
            Ok(tags) if !tags.is_empty() => Ok(TrendingTags {
                tags,
                curated: false,
            }),
            Ok(_) => Ok(curated_tags(limit)),
            Err(GatewayError::AllStoresFailed { operation, .. }) => {
                warn!(operation, "trending unavailable, serving curated tags");
                Ok(curated_tags(limit))
            }
            Err(err) => Err(err),
        }
    }
}

fn curated_tags(limit: i64) -> TrendingTags {
    let now = Utc::now();
    TrendingTags {
        tags: CURATED_TAGS
            .iter()
            .take(usize::try_from(limit).unwrap_or(CURATED_TAGS.len()))
            .map(|name| Hashtag {
                name: (*name).to_string(),
                use_count: 0,
                last_used_at: now,
            })
            .collect(),
        curated: true,
    }
}
