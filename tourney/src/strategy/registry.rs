#[cfg(test)]
#[path = "../../tests/unit/strategy/registry_test.rs"]
mod registry_test;

use super::Strategy;
use crate::models::ProblemInstance;
use crate::utils::GenericResult;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// An immutable configuration passed into every strategy construction.
#[derive(Clone)]
pub struct StrategyConfig {
    /// A problem the strategy is going to solve.
    pub problem: Arc<ProblemInstance>,
    /// A run seed, if the campaign is reproducible.
    pub seed: Option<u64>,
}

/// A function which constructs a fresh strategy instance for every run.
pub type StrategyFactory = Arc<dyn Fn(&StrategyConfig) -> GenericResult<Box<dyn Strategy>> + Send + Sync>;

/// Distinguishes demo strategies from real competitors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    /// A baseline strategy which is not a part of the competition.
    Demo,
    /// A competing strategy.
    Competitor,
}

/// Describes a registered strategy.
#[derive(Clone)]
pub struct StrategyEntry {
    name: String,
    authors: Vec<String>,
    kind: StrategyKind,
    factory: StrategyFactory,
}

impl StrategyEntry {
    /// Creates a new instance of `StrategyEntry`.
    pub fn new<F>(name: impl Into<String>, kind: StrategyKind, factory: F) -> Self
    where
        F: Fn(&StrategyConfig) -> GenericResult<Box<dyn Strategy>> + Send + Sync + 'static,
    {
        Self { name: name.into(), authors: vec![], kind, factory: Arc::new(factory) }
    }

    /// Sets strategy authors.
    pub fn with_authors(mut self, authors: &[&str]) -> Self {
        self.authors = authors.iter().map(|author| author.to_string()).collect();
        self
    }

    /// Returns strategy name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns strategy authors.
    pub fn authors(&self) -> &[String] {
        self.authors.as_slice()
    }

    /// Returns strategy kind.
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Constructs a new strategy instance.
    pub fn create(&self, config: &StrategyConfig) -> GenericResult<Box<dyn Strategy>> {
        (self.factory)(config)
    }
}

/// An explicit, ordered collection of strategies known to the process.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    entries: Vec<StrategyEntry>,
    index: FxHashMap<String, usize>,
}

impl StrategyRegistry {
    /// Registers a new strategy. Names must be unique.
    pub fn register(&mut self, entry: StrategyEntry) -> GenericResult<()> {
        if self.index.contains_key(entry.name()) {
            return Err(format!("strategy '{}' is already registered", entry.name()).into());
        }

        self.index.insert(entry.name().to_string(), self.entries.len());
        self.entries.push(entry);

        Ok(())
    }

    /// Registers a new strategy using fluent interface.
    pub fn with(mut self, entry: StrategyEntry) -> GenericResult<Self> {
        self.register(entry)?;
        Ok(self)
    }

    /// Returns strategy by its name.
    pub fn get(&self, name: &str) -> Option<&StrategyEntry> {
        self.index.get(name).and_then(|&idx| self.entries.get(idx))
    }

    /// Returns all strategies in registration order.
    pub fn entries(&self) -> &[StrategyEntry] {
        self.entries.as_slice()
    }

    /// Returns competitor strategies in registration order.
    pub fn competitors(&self) -> Vec<StrategyEntry> {
        self.entries.iter().filter(|entry| entry.kind() == StrategyKind::Competitor).cloned().collect()
    }

    /// Returns strategies participating in a campaign: all of them or competitors only.
    pub fn select(&self, competition_only: bool) -> Vec<StrategyEntry> {
        if competition_only { self.competitors() } else { self.entries.clone() }
    }

    /// Returns amount of registered strategies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
