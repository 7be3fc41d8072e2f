use crate::utils::derive_seed;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A logger type which is called with various information.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Returns a logger which discards every message.
pub fn silent_logger() -> InfoLogger {
    Arc::new(|_: &str| {})
}

/// Specifies a computational quota for executions, e.g. an external interruption.
pub trait Quota {
    /// Returns true when computation should be stopped.
    fn is_reached(&self) -> bool;
}

/// A quota which is reached once the shared flag is raised, e.g. by a signal handler.
#[derive(Clone, Default)]
pub struct InterruptionQuota {
    should_interrupt: Arc<AtomicBool>,
}

impl InterruptionQuota {
    /// Creates a new instance of `InterruptionQuota` bound to the given flag.
    pub fn new(should_interrupt: Arc<AtomicBool>) -> Self {
        Self { should_interrupt }
    }

    /// Raises the interruption flag.
    pub fn interrupt(&self) {
        self.should_interrupt.store(true, Ordering::Relaxed);
    }
}

impl Quota for InterruptionQuota {
    fn is_reached(&self) -> bool {
        self.should_interrupt.load(Ordering::Relaxed)
    }
}

/// Keeps track of environment specific information which influences campaign behavior.
#[derive(Clone)]
pub struct Environment {
    /// An external quota which stops the whole campaign when reached.
    pub quota: Option<Arc<dyn Quota + Send + Sync>>,

    /// A base seed for per run random sources. When absent, every run gets a random seed.
    pub seed: Option<u64>,

    /// An information logger used by the campaign.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates an instance of `Environment`.
    pub fn new(quota: Option<Arc<dyn Quota + Send + Sync>>, seed: Option<u64>, logger: InfoLogger) -> Self {
        Self { quota, seed, logger }
    }

    /// Returns a seed for a run identified by the given salt values, if the environment is seeded.
    pub fn run_seed(&self, salt: &[u64]) -> Option<u64> {
        self.seed.map(|seed| derive_seed(seed, salt))
    }

    /// Returns true if external quota is reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new(None, None, Arc::new(|msg: &str| println!("{msg}")))
    }
}
