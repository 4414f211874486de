//! core::graph
//!
//! Traversal of the immutable commit graph.
//!
//! # Architecture
//!
//! The commit graph is a DAG where:
//! - Nodes are commits in the object store
//! - Edges point from child to parent (`parent1`, and `parent2` for merges)
//! - The single root is the initial commit
//!
//! # Split Points
//!
//! [`CommitGraph::split_point`] computes full ancestor sets through both
//! parent edges. Every commit has a *generation*: `0` for the root and
//! `1 + max(parent generations)` otherwise. The split point of two tips is
//! the common ancestor with the greatest generation; ties are broken by
//! the lexicographically lowest id.
//!
//! [`CommitGraph::first_parent_split_point`] is the simpler first-parent
//! walk, which cannot see ancestors reachable only through a `parent2`
//! edge.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::objects::{Commit, FileState};
use crate::core::store::{ObjectStore, StoreError};
use crate::core::types::ObjectId;

/// Read-only view of the commit graph.
#[derive(Clone, Copy)]
pub struct CommitGraph<'a> {
    store: ObjectStore<'a>,
}

impl<'a> CommitGraph<'a> {
    /// Create a graph view over an object store.
    pub fn new(store: ObjectStore<'a>) -> Self {
        Self { store }
    }

    /// Walk the `parent1` chain from `start` to the root, inclusive.
    ///
    /// Commits are returned child first.
    pub fn history(&self, start: &Commit) -> Result<Vec<Commit>, StoreError> {
        let mut history = vec![start.clone()];
        let mut next = start.parent1().cloned();
        while let Some(id) = next {
            let commit = self.store.get_commit(&id)?;
            next = commit.parent1().cloned();
            history.push(commit);
        }
        Ok(history)
    }

    /// Every stored commit, sorted by id.
    pub fn all(&self) -> Result<Vec<Commit>, StoreError> {
        self.store
            .commit_ids()?
            .iter()
            .map(|id| self.store.get_commit(id))
            .collect()
    }

    /// The snapshot of a commit.
    pub fn state<'c>(&self, commit: &'c Commit) -> &'c FileState {
        commit.state()
    }

    /// Every ancestor of `tip` (including `tip`) through both parent edges.
    pub fn ancestors(&self, tip: &ObjectId) -> Result<HashMap<ObjectId, Commit>, StoreError> {
        let mut found = HashMap::new();
        let mut queue = VecDeque::from([tip.clone()]);
        while let Some(id) = queue.pop_front() {
            if found.contains_key(&id) {
                continue;
            }
            let commit = self.store.get_commit(&id)?;
            queue.extend(commit.parents().cloned());
            found.insert(id, commit);
        }
        Ok(found)
    }

    /// The most recent common ancestor of two commits.
    ///
    /// Returns `None` if the commits share no ancestor.
    pub fn split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> Result<Option<ObjectId>, StoreError> {
        let current_ancestors = self.ancestors(current)?;
        let other_ancestors = self.ancestors(other)?;

        // Generations over the union, so every parent of a common
        // ancestor is available when computing its generation.
        let mut commits = current_ancestors;
        let common: Vec<ObjectId> = other_ancestors
            .keys()
            .filter(|id| commits.contains_key(*id))
            .cloned()
            .collect();
        commits.extend(other_ancestors);
        let generations = generations(&commits);

        Ok(common.into_iter().max_by(|a, b| {
            generations[a]
                .cmp(&generations[b])
                // Lower id wins a tie, so it must compare as greater.
                .then_with(|| b.cmp(a))
        }))
    }

    /// Split point found by walking first parents only.
    ///
    /// Collects the `parent1` chain of `current`, then walks `other`'s
    /// `parent1` chain and returns the first id found in that set.
    pub fn first_parent_split_point(
        &self,
        current: &ObjectId,
        other: &ObjectId,
    ) -> Result<Option<ObjectId>, StoreError> {
        let current_tip = self.store.get_commit(current)?;
        let chain: HashSet<ObjectId> = self
            .history(&current_tip)?
            .into_iter()
            .map(|commit| commit.id().clone())
            .collect();

        let other_tip = self.store.get_commit(other)?;
        Ok(self
            .history(&other_tip)?
            .into_iter()
            .map(|commit| commit.id().clone())
            .find(|id| chain.contains(id)))
    }
}

/// Compute the generation of every commit in a closed ancestor set.
fn generations(commits: &HashMap<ObjectId, Commit>) -> HashMap<ObjectId, u64> {
    let mut generation: HashMap<ObjectId, u64> = HashMap::with_capacity(commits.len());

    for start in commits.keys() {
        if generation.contains_key(start) {
            continue;
        }
        // Iterative post-order: a commit is resolved once all its parents are.
        let mut stack = vec![start.clone()];
        while let Some(id) = stack.last().cloned() {
            if generation.contains_key(&id) {
                stack.pop();
                continue;
            }
            let parents: Vec<&ObjectId> = commits
                .get(&id)
                .map(|commit| commit.parents().filter(|p| commits.contains_key(*p)).collect())
                .unwrap_or_default();
            let pending: Vec<ObjectId> = parents
                .iter()
                .filter(|p| !generation.contains_key(**p))
                .map(|p| (*p).clone())
                .collect();
            if pending.is_empty() {
                let value = parents
                    .iter()
                    .map(|p| generation[*p] + 1)
                    .max()
                    .unwrap_or(0);
                generation.insert(id, value);
                stack.pop();
            } else {
                stack.extend(pending);
            }
        }
    }

    generation
}
