//! Client for the Twitter v2 REST API, limited to the two lookups the
//! pipeline needs: resolving handles to user IDs and reading a user's
//! recent original posts.

pub mod client;
pub mod collect;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::{TwitterClient, MAX_RESULTS_CEILING, MAX_RESULTS_FLOOR};
pub use collect::{fetch_all_tweets, resolve_user_ids, ResolvedAccount};
pub use error::TwitterError;
pub use types::{PublicMetrics, Tweet, TwitterUser};
