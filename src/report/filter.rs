use super::classify::ReviewGroups;
use crate::api::ReviewRecord;

/// Whether a peer record has anything worth rendering
pub fn has_content(record: &ReviewRecord) -> bool {
    let Some(response) = &record.response else {
        return false;
    };

    let has_comment = response
        .comment
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty());

    has_comment
        || !response.choices.is_empty()
        || response.rating.is_some()
        || response.rating_string.is_some()
}

/// Drop empty peer records. Self records always stay.
pub fn filter_peer(groups: ReviewGroups) -> ReviewGroups {
    ReviewGroups {
        peer: groups.peer.retain_records(has_content),
        self_review: groups.self_review,
    }
}
