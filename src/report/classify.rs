use crate::api::{ReviewRecord, ReviewType};
use std::collections::HashMap;

/// Review records grouped by question ID.
///
/// Questions keep the order in which their ID was first pushed; later records
/// for an already-seen question are appended to its group without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionGroups {
    groups: Vec<(String, Vec<ReviewRecord>)>,
    index: HashMap<String, usize>,
}

impl QuestionGroups {
    pub fn push(&mut self, record: ReviewRecord) {
        let question_id = record.question_id();
        match self.index.get(question_id) {
            Some(&slot) => self.groups[slot].1.push(record),
            None => {
                let question_id = question_id.to_string();
                self.index.insert(question_id.clone(), self.groups.len());
                self.groups.push((question_id, vec![record]));
            }
        }
    }

    /// Question IDs in first-seen order
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(id, _)| id.as_str())
    }

    #[cfg(test)]
    pub fn get(&self, question_id: &str) -> Option<&[ReviewRecord]> {
        self.index
            .get(question_id)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReviewRecord])> {
        self.groups
            .iter()
            .map(|(id, records)| (id.as_str(), records.as_slice()))
    }

    pub fn records(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.groups.iter().flat_map(|(_, records)| records.iter())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Keep only records matching `keep`; questions left without records are
    /// removed and the remaining ones keep their relative order.
    pub fn retain_records<F>(self, mut keep: F) -> Self
    where
        F: FnMut(&ReviewRecord) -> bool,
    {
        let mut retained = QuestionGroups::default();
        for (_, records) in self.groups {
            for record in records.into_iter().filter(|r| keep(r)) {
                retained.push(record);
            }
        }
        retained
    }
}

/// Peer and self review records, each grouped by question
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewGroups {
    pub peer: QuestionGroups,
    pub self_review: QuestionGroups,
}

/// Split records into self and peer buckets. Nothing is dropped here.
pub fn classify(records: Vec<ReviewRecord>) -> ReviewGroups {
    let mut groups = ReviewGroups::default();
    for record in records {
        match record.review_type {
            ReviewType::SelfReview => groups.self_review.push(record),
            ReviewType::Peer | ReviewType::Other => groups.peer.push(record),
        }
    }
    groups
}
