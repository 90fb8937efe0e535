use std::collections::{HashMap, HashSet};

use crate::models::Photo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Remove { photo: Photo, from: usize },
    Insert { photo: Photo, at: usize },
    Move { photo: Photo, from: usize, to: usize },
}

/// Incremental update between two displayed sequences. Removals use indices of
/// the old sequence, insertions and the target of moves use the new one
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Changeset(pub Vec<Change>);

impl Changeset {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.0.iter()
    }

    pub fn inserted(&self) -> impl Iterator<Item = &Photo> {
        self.0.iter().filter_map(|change| match change {
            Change::Insert { photo, .. } => Some(photo),
            _ => None,
        })
    }

    /// (inserted, removed, moved)
    pub fn counts(&self) -> (usize, usize, usize) {
        self.0.iter().fold((0, 0, 0), |(i, r, m), change| match change {
            Change::Insert { .. } => (i + 1, r, m),
            Change::Remove { .. } => (i, r + 1, m),
            Change::Move { .. } => (i, r, m + 1),
        })
    }
}

/// Keyed diff of two sequences of unique photos.
///
/// Photos present on both sides keep their cell; only the ones falling outside
/// the longest run that is still in relative order are reported as moved.
pub fn diff(old: &[Photo], new: &[Photo]) -> Changeset {
    let old_positions: HashMap<&Photo, usize> =
        old.iter().enumerate().map(|(i, photo)| (photo, i)).collect();
    let new_keys: HashSet<&Photo> = new.iter().collect();

    let mut changes = old
        .iter()
        .enumerate()
        .filter(|(_, photo)| !new_keys.contains(photo))
        .map(|(from, photo)| Change::Remove {
            photo: photo.clone(),
            from,
        })
        .collect::<Vec<_>>();

    // (old index, new index) of every photo that stays, in new order
    let mut kept = vec![];
    for (at, photo) in new.iter().enumerate() {
        match old_positions.get(photo) {
            Some(&from) => kept.push((from, at)),
            None => changes.push(Change::Insert {
                photo: photo.clone(),
                at,
            }),
        }
    }

    let stable = longest_increasing_run(&kept.iter().map(|(from, _)| *from).collect::<Vec<_>>());
    changes.extend(
        kept.iter()
            .enumerate()
            .filter(|(i, _)| !stable.contains(i))
            .map(|(_, &(from, to))| Change::Move {
                photo: new[to].clone(),
                from,
                to,
            }),
    );
    Changeset(changes)
}

/// Positions of one longest strictly increasing subsequence of `values`
fn longest_increasing_run(values: &[usize]) -> HashSet<usize> {
    // tails[k] is the position of the smallest tail of an increasing run of length k + 1
    let mut tails: Vec<usize> = vec![];
    let mut previous: Vec<Option<usize>> = vec![None; values.len()];
    for (i, value) in values.iter().enumerate() {
        let length = tails.partition_point(|&t| values[t] < *value);
        if length > 0 {
            previous[i] = Some(tails[length - 1]);
        }
        if length == tails.len() {
            tails.push(i);
        } else {
            tails[length] = i;
        }
    }
    let mut run = HashSet::new();
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        run.insert(i);
        cursor = previous[i];
    }
    run
}
