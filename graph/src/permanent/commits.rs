use std::collections::HashMap;
use std::hash::Hash;

use crate::error::GraphError;
use crate::permanent::PermanentIndex;

/// Immutable commit metadata store, total over the permanent index range.
///
/// Maps every permanent index to an opaque commit id and a timestamp in
/// epoch milliseconds. The id type is generic since backends differ in how
/// they identify commits (hex strings, integers, opaque tokens). Built once
/// per repository load, next to the [`PermanentGraph`](super::PermanentGraph)
/// it describes.
#[derive(Debug, Clone)]
pub struct PermanentCommitsInfo<CommitId> {
    ids: Vec<CommitId>,
    timestamps: Vec<i64>,
    index_of: HashMap<CommitId, PermanentIndex>,
}

impl<CommitId> PermanentCommitsInfo<CommitId> {
    /// Number of commits; lookups are total over `[0, len)`.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Commit id of a permanent node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the permanent index range.
    pub fn commit_id(&self, node: PermanentIndex) -> &CommitId {
        &self.ids[node as usize]
    }

    /// Timestamp of a permanent node, in epoch milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the permanent index range.
    pub fn timestamp(&self, node: PermanentIndex) -> i64 {
        self.timestamps[node as usize]
    }
}

impl<CommitId: Clone + Hash + Eq> PermanentCommitsInfo<CommitId> {
    /// Build the store from ids and timestamps in permanent-index order.
    ///
    /// Fails if the two columns disagree in length; totality over the index
    /// range is checked here once so the read path never has to.
    pub fn new(ids: Vec<CommitId>, timestamps: Vec<i64>) -> Result<Self, GraphError> {
        if ids.len() != timestamps.len() {
            return Err(GraphError::CommitInfoMismatch {
                ids: ids.len(),
                timestamps: timestamps.len(),
            });
        }

        let index_of = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.clone(), index as PermanentIndex))
            .collect();

        Ok(Self {
            ids,
            timestamps,
            index_of,
        })
    }

    /// Reverse lookup: the permanent index carrying a commit id.
    pub fn permanent_index_of(&self, id: &CommitId) -> Option<PermanentIndex> {
        self.index_of.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_commits() -> PermanentCommitsInfo<String> {
        PermanentCommitsInfo::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![100, 200, 300],
        )
        .unwrap()
    }

    #[test]
    fn test_lookups_are_total_and_stable() {
        let commits = abc_commits();

        for node in 0..commits.len() as PermanentIndex {
            let id = commits.commit_id(node).clone();
            let ts = commits.timestamp(node);
            // repeated calls observe the same values
            assert_eq!(commits.commit_id(node), &id);
            assert_eq!(commits.timestamp(node), ts);
        }
        assert_eq!(commits.commit_id(1), "b");
        assert_eq!(commits.timestamp(2), 300);
    }

    #[test]
    fn test_reverse_lookup() {
        let commits = abc_commits();

        assert_eq!(commits.permanent_index_of(&"c".to_string()), Some(2));
        assert_eq!(commits.permanent_index_of(&"zzz".to_string()), None);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let result = PermanentCommitsInfo::new(vec!["a".to_string()], vec![100, 200]);

        assert!(matches!(
            result,
            Err(GraphError::CommitInfoMismatch { ids: 1, timestamps: 2 })
        ));
    }
}
