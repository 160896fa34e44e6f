//! Best scores, persisted as a flat file of native-endian `i32`s in rank
//! order (rank 0 first), no header.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

const ENTRY_WIDTH: usize = std::mem::size_of::<i32>();

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to write leaderboard {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Exactly `capacity` scores, sorted best first, zero padded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    ranks: Vec<u32>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Leaderboard { ranks: vec![0; capacity] }
    }

    /// Keeps the best `capacity` of `ranks`, which may come in any order.
    pub fn from_ranks(ranks: &[u32], capacity: usize) -> Self {
        let mut board = Leaderboard { ranks: ranks.to_vec() };
        board.sort();
        board.ranks.resize(capacity, 0);
        board
    }

    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    pub fn capacity(&self) -> usize {
        self.ranks.len()
    }

    /// Reads the stored ranks. A missing, short or unreadable file is not an
    /// error: whatever could not be read counts as 0.
    pub fn load(path: &Path, capacity: usize) -> Self {
        match read_prefix(path, capacity * ENTRY_WIDTH) {
            Ok(bytes) => Self::decode(&bytes, capacity),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no leaderboard at {:?}, starting empty", path);
                Self::new(capacity)
            }
            Err(err) => {
                log::warn!("could not read leaderboard {:?}: {}", path, err);
                Self::new(capacity)
            }
        }
    }

    /// Truncates and rewrites the file with all ranks.
    pub fn save(&self, path: &Path) -> Result<(), LeaderboardError> {
        fs::write(path, self.encode()).map_err(|source| LeaderboardError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("leaderboard saved to {:?}: {:?}", path, self.ranks);
        Ok(())
    }

    /// Inserts `score` in a single pass: it takes the first rank it strictly
    /// beats and every rank from there on shifts down by one, the last one
    /// falling off. Returns whether anything changed.
    pub fn merge(&mut self, score: u32) -> bool {
        let mut carried = score;
        let mut changed = false;

        for slot in self.ranks.iter_mut() {
            if *slot >= score {
                continue;
            }
            std::mem::swap(slot, &mut carried);
            changed = true;
        }

        changed
    }

    pub fn decode(bytes: &[u8], capacity: usize) -> Self {
        let mut board = Self::new(capacity);
        for (slot, chunk) in board.ranks.iter_mut().zip(bytes.chunks_exact(ENTRY_WIDTH)) {
            let mut raw = [0u8; ENTRY_WIDTH];
            raw.copy_from_slice(chunk);
            *slot = i32::from_ne_bytes(raw).max(0) as u32;
        }
        // merge() relies on rank order, which a hand-edited file may not keep
        board.sort();
        board
    }

    pub fn encode(&self) -> Vec<u8> {
        self.ranks
            .iter()
            .flat_map(|score| i32::try_from(*score).unwrap_or(i32::MAX).to_ne_bytes())
            .collect()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn sort(&mut self) {
        self.ranks.sort_unstable_by(|a, b| b.cmp(a));
    }
}

fn read_prefix(path: &Path, limit: usize) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(limit);
    File::open(path)?.take(limit as u64).read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn board(ranks: &[u32]) -> Leaderboard {
        Leaderboard::from_ranks(ranks, ranks.len())
    }

    #[test]
    fn higher_score_cascades_the_rest_down() {
        let mut lb = board(&[50, 30, 10]);
        assert!(lb.merge(40));
        assert_eq!(lb.ranks(), &[50, 40, 30]);

        let mut lb = board(&[50, 30, 10]);
        assert!(lb.merge(60));
        assert_eq!(lb.ranks(), &[60, 50, 30]);
    }

    #[test]
    fn low_or_equal_scores_change_nothing() {
        let mut lb = board(&[50, 30, 10]);
        assert!(!lb.merge(5));
        assert!(!lb.merge(10));
        assert_eq!(lb.ranks(), &[50, 30, 10]);

        let mut lb = Leaderboard::new(3);
        assert!(!lb.merge(0));
    }

    #[test]
    fn ties_rank_below_the_existing_score() {
        let mut lb = board(&[40, 30, 30]);
        assert!(!lb.merge(30));

        let mut lb = board(&[40, 30, 10]);
        assert!(lb.merge(35));
        assert_eq!(lb.ranks(), &[40, 35, 30]);
    }

    #[test]
    fn missing_file_is_all_zero() {
        let dir = tempdir().unwrap();
        let lb = Leaderboard::load(&dir.path().join("record.dat"), 3);
        assert_eq!(lb.ranks(), &[0, 0, 0]);
    }

    #[test]
    fn short_file_pads_with_zero() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.dat");
        let mut bytes = 17i32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2]); // torn second entry
        fs::write(&path, bytes).unwrap();

        let lb = Leaderboard::load(&path, 3);
        assert_eq!(lb.ranks(), &[17, 0, 0]);
    }

    #[test]
    fn save_then_load_keeps_rank_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.dat");
        fs::write(&path, vec![0xff; 64]).unwrap();

        let lb = board(&[9, 4, 1]);
        lb.save(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), 3 * ENTRY_WIDTH);
        assert_eq!(Leaderboard::load(&path, 3), lb);
    }

    #[test]
    fn negative_entries_read_as_zero() {
        let bytes: Vec<u8> = [-5i32, 3].iter().flat_map(|v| v.to_ne_bytes()).collect();
        assert_eq!(Leaderboard::decode(&bytes, 2).ranks(), &[3, 0]);
    }

    #[test]
    fn unsorted_file_is_ranked_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("record.dat");
        let bytes: Vec<u8> = [10i32, 50, 30].iter().flat_map(|v| v.to_ne_bytes()).collect();
        fs::write(&path, bytes).unwrap();

        let mut lb = Leaderboard::load(&path, 3);
        assert_eq!(lb.ranks(), &[50, 30, 10]);

        assert!(lb.merge(40));
        assert_eq!(lb.ranks(), &[50, 40, 30]);
    }

    #[test]
    fn from_ranks_orders_best_first() {
        assert_eq!(Leaderboard::from_ranks(&[5, 20, 0, 9], 3).ranks(), &[20, 9, 5]);
        assert_eq!(Leaderboard::from_ranks(&[4], 3).ranks(), &[4, 0, 0]);
    }

    #[test]
    fn unwritable_path_reports_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("record.dat");
        let err = board(&[1, 0, 0]).save(&path).unwrap_err();
        assert!(matches!(err, LeaderboardError::Write { .. }));
    }

    proptest! {
        #[test]
        fn merge_keeps_board_sorted_and_sized(scores in prop::collection::vec(0u32..100, 0..40), cap in 1usize..6) {
            let mut lb = Leaderboard::new(cap);
            for score in scores {
                let before = lb.clone();
                let changed = lb.merge(score);
                prop_assert_eq!(lb.capacity(), cap);
                prop_assert!(lb.ranks().windows(2).all(|w| w[0] >= w[1]));
                prop_assert_eq!(changed, before != lb);
                prop_assert_eq!(changed, before.ranks().iter().any(|r| score > *r));
            }
        }
    }
}
