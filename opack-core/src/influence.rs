//! Influence graph — signed voting over a set of candidates.
//!
//! Influencers (behaviours, motives, other agents) cast positive or negative
//! votes on candidates (usually actions). Each vote moves the candidate's
//! score by one:
//!
//! ```text
//!   score(v) = #positive(v) − #negative(v)
//! ```
//!
//! [`InfluenceGraph::compute`] collects the candidates sharing the highest
//! score and picks one uniformly at random with the caller's generator, so a
//! seeded generator gives reproducible decisions.
//!
//! A graph is built fresh for every decision and dropped once its result has
//! been read.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use rand::Rng;
use tracing::debug;

/// Influence relations keyed by influencer. A candidate appears once per
/// vote, so repeated votes show up as repeated entries.
pub type Influences<U, V> = IndexMap<U, Vec<V>>;

/// Bipartite scoring structure between influencers `U` and candidates `V`.
#[derive(Debug, Clone)]
pub struct InfluenceGraph<U, V> {
    positive: Influences<U, V>,
    negative: Influences<U, V>,
    /// Running scores in candidate registration order.
    scores: IndexMap<V, i32>,
    /// Candidates tied at the highest score as of the last `compute`.
    eligibles: Vec<V>,
    /// Index into `eligibles` picked by the last `compute`.
    selected: Option<usize>,
}

impl<U, V> Default for InfluenceGraph<U, V> {
    fn default() -> Self {
        Self {
            positive: IndexMap::new(),
            negative: IndexMap::new(),
            scores: IndexMap::new(),
            eligibles: Vec::new(),
            selected: None,
        }
    }
}

impl<U, V> InfluenceGraph<U, V>
where
    U: Eq + Hash,
    V: Eq + Hash + Clone,
{
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one positive vote from `influencer` on `candidate`.
    pub fn positive_influence(&mut self, influencer: U, candidate: V) {
        self.positive
            .entry(influencer)
            .or_default()
            .push(candidate.clone());
        *self.scores.entry(candidate).or_insert(0) += 1;
    }

    /// Record one negative vote from `influencer` on `candidate`.
    pub fn negative_influence(&mut self, influencer: U, candidate: V) {
        self.negative
            .entry(influencer)
            .or_default()
            .push(candidate.clone());
        *self.scores.entry(candidate).or_insert(0) -= 1;
    }

    /// Register `candidate` with a zero score so it can be selected without
    /// any votes. No-op if it is already known.
    pub fn entry(&mut self, candidate: V) {
        self.scores.entry(candidate).or_insert(0);
    }

    /// Current score of `candidate`, `0` if it was never registered.
    #[must_use]
    pub fn score(&self, candidate: &V) -> i32 {
        self.scores.get(candidate).copied().unwrap_or(0)
    }

    /// `true` if `candidate` was registered or influenced.
    #[must_use]
    pub fn has_candidate(&self, candidate: &V) -> bool {
        self.scores.contains_key(candidate)
    }

    /// Pick one of the highest-scoring candidates.
    ///
    /// Refreshes [`InfluenceGraph::eligibles`] and returns `None` when no
    /// candidate was ever registered.
    pub fn compute<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&V> {
        self.eligibles.clear();
        self.selected = None;

        let Some(max) = self.scores.values().copied().max() else {
            debug!("influence graph has no candidates");
            return None;
        };

        self.eligibles.extend(
            self.scores
                .iter()
                .filter(|&(_, &score)| score == max)
                .map(|(candidate, _)| candidate.clone()),
        );
        let index = rng.gen_range(0..self.eligibles.len());
        self.selected = Some(index);

        debug!(
            candidates = self.scores.len(),
            eligibles = self.eligibles.len(),
            max_score = max,
            "influence graph computed"
        );
        self.eligibles.get(index)
    }

    /// `true` if `candidate` was among the eligibles of the last `compute`.
    #[must_use]
    pub fn is_highest(&self, candidate: &V) -> bool {
        self.eligibles.contains(candidate)
    }
}

impl<U, V> InfluenceGraph<U, V> {
    /// Candidate picked by the last [`InfluenceGraph::compute`], if any.
    #[must_use]
    pub fn result(&self) -> Option<&V> {
        self.selected.and_then(|index| self.eligibles.get(index))
    }

    /// Candidates tied at the highest score, in registration order.
    #[must_use]
    pub fn eligibles(&self) -> &[V] {
        &self.eligibles
    }

    /// Number of candidates tied at the highest score.
    #[must_use]
    pub fn num_eligibles(&self) -> usize {
        self.eligibles.len()
    }

    /// Positive votes, keyed by influencer.
    #[must_use]
    pub fn positive_influences(&self) -> &Influences<U, V> {
        &self.positive
    }

    /// Negative votes, keyed by influencer.
    #[must_use]
    pub fn negative_influences(&self) -> &Influences<U, V> {
        &self.negative
    }

    /// Registered candidates and their scores, in registration order.
    pub fn candidates(&self) -> impl Iterator<Item = (&V, i32)> + '_ {
        self.scores.iter().map(|(candidate, &score)| (candidate, score))
    }

    /// Number of registered candidates.
    #[must_use]
    pub fn num_candidates(&self) -> usize {
        self.scores.len()
    }

    /// `true` if no candidate was registered or influenced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Borrow the graph on behalf of a single influencer.
    pub fn scope(&mut self, influencer: U) -> Scope<'_, U, V> {
        Scope {
            graph: self,
            influencer,
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Handle on an [`InfluenceGraph`] bound to one influencer.
///
/// Behaviour impacts receive a scope instead of the graph so that every vote
/// they cast is attributed to them.
#[derive(Debug)]
pub struct Scope<'g, U, V> {
    graph: &'g mut InfluenceGraph<U, V>,
    influencer: U,
}

impl<U, V> Scope<'_, U, V>
where
    U: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    /// The influencer every vote is attributed to.
    #[must_use]
    pub fn influencer(&self) -> &U {
        &self.influencer
    }

    /// Vote for `candidate`.
    pub fn positive(&mut self, candidate: V) {
        self.graph
            .positive_influence(self.influencer.clone(), candidate);
    }

    /// Vote against `candidate`.
    pub fn negative(&mut self, candidate: V) {
        self.graph
            .negative_influence(self.influencer.clone(), candidate);
    }

    /// Make `candidate` selectable without voting on it.
    pub fn entry(&mut self, candidate: V) {
        self.graph.entry(candidate);
    }

    /// Score of `candidate` so far, including other influencers' votes.
    #[must_use]
    pub fn score(&self, candidate: &V) -> i32 {
        self.graph.score(candidate)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<U: fmt::Display, V: fmt::Display> fmt::Display for InfluenceGraph<U, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "scores:")?;
        for (candidate, score) in &self.scores {
            writeln!(f, "  {candidate}: {score}")?;
        }
        write_influences(f, "positive influences:", &self.positive)?;
        write_influences(f, "negative influences:", &self.negative)?;
        write!(f, "eligibles:")?;
        for candidate in &self.eligibles {
            write!(f, " {candidate}")?;
        }
        Ok(())
    }
}

fn write_influences<U: fmt::Display, V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    influences: &Influences<U, V>,
) -> fmt::Result {
    writeln!(f, "{title}")?;
    for (influencer, candidates) in influences {
        write!(f, "  {influencer} ->")?;
        for candidate in candidates {
            write!(f, " {candidate}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
