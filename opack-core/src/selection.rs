//! Influence-graph based action selection.
//!
//! An agent carries behaviours (lazy, stressed, hungry, …). Each behaviour
//! owns an [`Impact`]: given the choices offered this tick, it votes for or
//! against some of them through a [`Scope`] bound to that behaviour. A
//! [`Selection`] runs every impact of the agent's active behaviours into a
//! fresh [`InfluenceGraph`] and picks the winner.
//!
//! The graph is returned alongside the choice in a [`Decision`] so callers
//! can keep it for inspection.

use std::fmt;
use std::hash::Hash;

use rand::Rng;
use tracing::{debug, trace};

use crate::config::SelectionConfig;
use crate::influence::{InfluenceGraph, Scope};

/// Signature of an impact: the offered choices and a scope to vote with.
pub type ImpactFn<U, V> = dyn Fn(&[V], &mut Scope<'_, U, V>) + Send + Sync;

/// A behaviour and the votes it casts on the offered choices.
pub struct Impact<U, V> {
    behaviour: U,
    func: Box<ImpactFn<U, V>>,
}

impl<U, V> Impact<U, V> {
    /// Wrap `func` as the impact of `behaviour`.
    pub fn new<F>(behaviour: U, func: F) -> Self
    where
        F: Fn(&[V], &mut Scope<'_, U, V>) + Send + Sync + 'static,
    {
        Self {
            behaviour,
            func: Box::new(func),
        }
    }

    /// The behaviour this impact votes for.
    #[must_use]
    pub fn behaviour(&self) -> &U {
        &self.behaviour
    }
}

impl<U: fmt::Debug, V> fmt::Debug for Impact<U, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Impact")
            .field("behaviour", &self.behaviour)
            .finish_non_exhaustive()
    }
}

/// Outcome of one selection.
#[derive(Debug, Clone)]
pub struct Decision<U, V> {
    /// Selected choice, `None` if no choice received a vote or was
    /// registered.
    pub choice: Option<V>,
    /// Graph the decision was computed from.
    pub graph: InfluenceGraph<U, V>,
}

/// Ordered set of behaviour impacts used to pick one choice.
#[derive(Debug)]
pub struct Selection<U, V> {
    impacts: Vec<Impact<U, V>>,
    config: SelectionConfig,
}

impl<U, V> Default for Selection<U, V> {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl<U, V> Selection<U, V> {
    /// Create a selection with no impacts.
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            impacts: Vec::new(),
            config,
        }
    }

    /// Builder form of [`Selection::add_impact`].
    #[must_use]
    pub fn with_impact<F>(mut self, behaviour: U, func: F) -> Self
    where
        F: Fn(&[V], &mut Scope<'_, U, V>) + Send + Sync + 'static,
    {
        self.add_impact(behaviour, func);
        self
    }

    /// Append the impact of `behaviour`. Impacts run in insertion order.
    pub fn add_impact<F>(&mut self, behaviour: U, func: F)
    where
        F: Fn(&[V], &mut Scope<'_, U, V>) + Send + Sync + 'static,
    {
        self.impacts.push(Impact::new(behaviour, func));
    }

    /// Registered impacts.
    #[must_use]
    pub fn impacts(&self) -> &[Impact<U, V>] {
        &self.impacts
    }

    /// Number of registered impacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    /// `true` if no impact is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    /// Settings this selection runs with.
    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }
}

impl<U, V> Selection<U, V>
where
    U: Eq + Hash + Clone + fmt::Debug,
    V: Eq + Hash + Clone,
{
    /// Run every impact against `choices` and pick one.
    pub fn select<R: Rng + ?Sized>(&self, choices: &[V], rng: &mut R) -> Decision<U, V> {
        self.select_active(choices, rng, |_| true)
    }

    /// Like [`Selection::select`], but only impacts whose behaviour passes
    /// `is_active` are run.
    pub fn select_active<R, F>(&self, choices: &[V], rng: &mut R, is_active: F) -> Decision<U, V>
    where
        R: Rng + ?Sized,
        F: Fn(&U) -> bool,
    {
        let mut graph = InfluenceGraph::new();
        if self.config.register_choices {
            for choice in choices {
                graph.entry(choice.clone());
            }
        }

        let mut applied = 0usize;
        for impact in &self.impacts {
            if !is_active(&impact.behaviour) {
                trace!(behaviour = ?impact.behaviour, "behaviour inactive, impact skipped");
                continue;
            }
            let mut scope = graph.scope(impact.behaviour.clone());
            (impact.func)(choices, &mut scope);
            applied += 1;
        }

        let choice = graph.compute(rng).cloned();
        debug!(
            choices = choices.len(),
            impacts = applied,
            eligibles = graph.num_eligibles(),
            selected = choice.is_some(),
            "action selection complete"
        );
        Decision { choice, graph }
    }
}
