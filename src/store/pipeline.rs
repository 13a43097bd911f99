//! Leaderboard Join Pipeline
//!
//! Materializes leaderboard records from stored documents in three stages:
//!
//! 1. `flatten`: one header row per document, one row per entry, each entry
//!    tagged with its position in the stored list
//! 2. `enrich`: fill titles, authors and identities from wager/user lookups
//! 3. `group`: rebuild one record per leaderboard id, entries sorted by tag
//!
//! Lookups are plain maps, so the order in which the backend answers them
//! has no effect on the output.

use std::collections::{HashMap, HashSet};

use crate::domain::{CreatorEntry, DisplayIdentity, EventEntry, LeaderboardRecord, RecordId};

use super::{LeaderboardDocument, StoredCreator, StoredEvent, UserRef, WagerRef};

/// Row produced by `flatten`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatRow {
    /// Emitted for every document, so empty entry lists survive flattening
    Header {
        leaderboard_id: RecordId,
        year: i32,
        month: u32,
    },
    Creator {
        leaderboard_id: RecordId,
        position: usize,
        entry: StoredCreator,
    },
    Event {
        leaderboard_id: RecordId,
        position: usize,
        entry: StoredEvent,
    },
}

/// Row produced by `enrich`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichedRow {
    Header {
        leaderboard_id: RecordId,
        year: i32,
        month: u32,
    },
    Creator {
        leaderboard_id: RecordId,
        position: usize,
        entry: CreatorEntry,
    },
    Event {
        leaderboard_id: RecordId,
        position: usize,
        entry: EventEntry,
    },
}

// =========================================================================
// Stage 1: flatten
// =========================================================================

pub fn flatten(documents: Vec<LeaderboardDocument>) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for document in documents {
        let leaderboard_id = document.id;
        rows.push(FlatRow::Header {
            leaderboard_id,
            year: document.year,
            month: document.month,
        });

        rows.extend(
            document
                .top_events
                .into_iter()
                .enumerate()
                .map(|(position, entry)| FlatRow::Event {
                    leaderboard_id,
                    position,
                    entry,
                }),
        );

        rows.extend(
            document
                .top_creators
                .into_iter()
                .enumerate()
                .map(|(position, entry)| FlatRow::Creator {
                    leaderboard_id,
                    position,
                    entry,
                }),
        );
    }

    rows
}

/// Distinct, non-nil wager ids referenced by event rows
pub fn wager_ids(rows: &[FlatRow]) -> Vec<RecordId> {
    distinct(rows.iter().filter_map(|row| match row {
        FlatRow::Event { entry, .. } => Some(entry.wager_id),
        _ => None,
    }))
}

/// Distinct, non-nil user ids: creators plus the authors of the given wagers
pub fn user_ids(rows: &[FlatRow], wagers: &HashMap<RecordId, WagerRef>) -> Vec<RecordId> {
    distinct(rows.iter().filter_map(|row| match row {
        FlatRow::Creator { entry, .. } => Some(entry.user_id),
        FlatRow::Event { entry, .. } => wagers
            .get(&entry.wager_id)
            .and_then(|wager| wager.author_id),
        FlatRow::Header { .. } => None,
    }))
}

fn distinct(ids: impl Iterator<Item = RecordId>) -> Vec<RecordId> {
    let mut seen = HashSet::new();
    ids.filter(|id| !id.is_nil() && seen.insert(*id)).collect()
}

// =========================================================================
// Stage 2: enrich
// =========================================================================

/// Join rows against the lookups. Unknown references leave fields empty.
pub fn enrich(
    rows: Vec<FlatRow>,
    wagers: &HashMap<RecordId, WagerRef>,
    users: &HashMap<RecordId, UserRef>,
) -> Vec<EnrichedRow> {
    rows.into_iter()
        .map(|row| match row {
            FlatRow::Header {
                leaderboard_id,
                year,
                month,
            } => EnrichedRow::Header {
                leaderboard_id,
                year,
                month,
            },
            FlatRow::Creator {
                leaderboard_id,
                position,
                entry,
            } => {
                let mut creator = CreatorEntry::new(entry.user_id, entry.earnings);
                creator.identity = identity_for(users.get(&entry.user_id));
                EnrichedRow::Creator {
                    leaderboard_id,
                    position,
                    entry: creator,
                }
            }
            FlatRow::Event {
                leaderboard_id,
                position,
                entry,
            } => {
                let mut event = EventEntry::new(entry.wager_id, entry.earnings);
                if let Some(wager) = wagers.get(&entry.wager_id) {
                    event.title = wager.title.clone();
                    if let Some(author_id) = wager.author_id {
                        event.user_id = author_id;
                        event.identity = identity_for(users.get(&author_id));
                    }
                }
                EnrichedRow::Event {
                    leaderboard_id,
                    position,
                    entry: event,
                }
            }
        })
        .collect()
}

fn identity_for(user: Option<&UserRef>) -> DisplayIdentity {
    match user {
        Some(user) => DisplayIdentity::new(&user.username, &user.email, &user.avatar),
        None => DisplayIdentity::default(),
    }
}

// =========================================================================
// Stage 3: group
// =========================================================================

struct Group {
    id: RecordId,
    year: i32,
    month: u32,
    creators: Vec<(usize, CreatorEntry)>,
    events: Vec<(usize, EventEntry)>,
}

/// One record per leaderboard id, in order of first appearance.
///
/// Entries are re-sorted by their position tag, whatever order the rows
/// arrive in.
pub fn group(rows: Vec<EnrichedRow>) -> Vec<LeaderboardRecord> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<RecordId, usize> = HashMap::new();

    let mut slot = |groups: &mut Vec<Group>, id: RecordId| -> usize {
        *index.entry(id).or_insert_with(|| {
            groups.push(Group {
                id,
                year: 0,
                month: 0,
                creators: Vec::new(),
                events: Vec::new(),
            });
            groups.len() - 1
        })
    };

    for row in rows {
        match row {
            EnrichedRow::Header {
                leaderboard_id,
                year,
                month,
            } => {
                let i = slot(&mut groups, leaderboard_id);
                groups[i].year = year;
                groups[i].month = month;
            }
            EnrichedRow::Creator {
                leaderboard_id,
                position,
                entry,
            } => {
                let i = slot(&mut groups, leaderboard_id);
                groups[i].creators.push((position, entry));
            }
            EnrichedRow::Event {
                leaderboard_id,
                position,
                entry,
            } => {
                let i = slot(&mut groups, leaderboard_id);
                groups[i].events.push((position, entry));
            }
        }
    }

    groups
        .into_iter()
        .map(|mut group| {
            group.creators.sort_by_key(|(position, _)| *position);
            group.events.sort_by_key(|(position, _)| *position);
            LeaderboardRecord {
                id: group.id,
                year: group.year,
                month: group.month,
                top_creators: group
                    .creators
                    .into_iter()
                    .map(|(_, entry)| entry)
                    .collect(),
                top_events: group.events.into_iter().map(|(_, entry)| entry).collect(),
            }
        })
        .collect()
}
