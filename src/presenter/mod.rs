//! Leaderboard Presenter
//!
//! Resolves the name shown for every entry of a leaderboard. Pure: works on
//! identity data the store already joined in.

use crate::domain::{DisplayIdentity, LeaderboardRecord, RecordId};

/// Name to show for a user.
///
/// 1. username, verbatim
/// 2. email with the first half of its local part replaced by `*`
/// 3. creation second embedded in the user id
pub fn resolve_display_name(identity: &DisplayIdentity, user_id: RecordId) -> String {
    if !identity.username.is_empty() {
        identity.username.clone()
    } else if !identity.email.is_empty() {
        mask_email(&identity.email)
    } else {
        user_id.created_at_unix().to_string()
    }
}

/// Masks `n/2` code points, where `n` is the local-part length.
///
/// The kept tail is cut from the whole address, not from the local part, so
/// it runs on through `@` and the domain: `abcd@example.com` becomes
/// `**cd@example.com`. Without an `@` the whole string counts as local part.
pub fn mask_email(email: &str) -> String {
    let local = email.split_once('@').map_or(email, |(local, _)| local);
    let hidden = local.chars().count() / 2;

    let mut masked = "*".repeat(hidden);
    masked.extend(email.chars().skip(hidden));
    masked
}

/// Set `display_name` on every creator and event entry
pub fn present(record: &mut LeaderboardRecord) {
    for creator in &mut record.top_creators {
        creator.identity.display_name = resolve_display_name(&creator.identity, creator.user_id);
    }

    for event in &mut record.top_events {
        event.identity.display_name = resolve_display_name(&event.identity, event.user_id);
    }
}
