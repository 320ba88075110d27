//! Batch retrieval across tracked accounts.
//!
//! Requests are strictly sequential with a fixed pause between them. One
//! account failing is logged and skipped; it never aborts the batch.

use std::time::Duration;

use cryptopulse_core::RawRecord;

use crate::client::TwitterClient;

/// A tracked handle with its resolved numeric user ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    pub username: String,
    pub user_id: String,
}

/// Resolve each handle to a user ID, pausing `delay` between lookups.
///
/// Output keeps input order; handles that fail to resolve are omitted.
pub async fn resolve_user_ids(
    client: &TwitterClient,
    usernames: &[&str],
    delay: Duration,
) -> Vec<ResolvedAccount> {
    let mut resolved = Vec::with_capacity(usernames.len());

    for (i, &username) in usernames.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }
        match client.get_user_id(username).await {
            Ok(user) => {
                tracing::debug!(%username, user_id = %user.id, "resolved user id");
                resolved.push(ResolvedAccount {
                    username: username.to_string(),
                    user_id: user.id,
                });
            }
            Err(e) => {
                tracing::warn!(%username, error = %e, "user lookup failed; skipping account");
            }
        }
    }

    tracing::info!(
        requested = usernames.len(),
        resolved = resolved.len(),
        "user id resolution complete"
    );
    resolved
}

/// Fetch recent posts for every account, pausing `delay` between requests.
///
/// Records are grouped by account in input order. Accounts whose fetch fails
/// contribute nothing.
pub async fn fetch_all_tweets(
    client: &TwitterClient,
    accounts: &[ResolvedAccount],
    max_results: u32,
    delay: Duration,
) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut failed = 0_usize;

    for (i, account) in accounts.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }
        match client.fetch_user_tweets(&account.user_id, max_results).await {
            Ok(tweets) => {
                tracing::info!(
                    username = %account.username,
                    count = tweets.len(),
                    "fetched tweets"
                );
                records.extend(
                    tweets
                        .into_iter()
                        .map(|tweet| tweet.into_raw_record(&account.username)),
                );
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(
                    username = %account.username,
                    error = %e,
                    "tweet fetch failed; skipping account"
                );
            }
        }
    }

    tracing::info!(
        accounts = accounts.len(),
        failed,
        records = records.len(),
        "tweet collection complete"
    );
    records
}
