use crate::models::Tour;
use crate::strategy::*;
use crate::utils::GenericResult;
use std::thread;
use std::time::Duration;

/// Evaluates given tours one per step and finishes.
pub struct ScriptedStrategy {
    tours: Vec<Tour>,
    next: usize,
    best: Option<Tour>,
}

impl ScriptedStrategy {
    pub fn new(tours: Vec<Tour>) -> Self {
        Self { tours, next: 0, best: None }
    }
}

impl Strategy for ScriptedStrategy {
    fn initialize(&mut self, _: &mut SearchContext) -> GenericResult<()> {
        Ok(())
    }

    fn step(&mut self, ctx: &mut SearchContext) -> GenericResult<StepStatus> {
        let Some(tour) = self.tours.get(self.next).cloned() else {
            return Ok(StepStatus::Finished);
        };

        self.next += 1;
        let before = ctx.best_cost();
        if ctx.evaluate(&tour) < before {
            self.best = Some(tour);
        }

        Ok(StepStatus::Continue)
    }

    fn current_best(&self) -> Option<Tour> {
        self.best.clone()
    }
}

/// Evaluates the identity tour once and then keeps sleeping between steps, observing cancellation.
pub struct SleepyStrategy {
    delay: Duration,
}

impl SleepyStrategy {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Strategy for SleepyStrategy {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        let tour = Tour::identity(ctx.problem().len());
        ctx.evaluate(&tour);

        Ok(())
    }

    fn step(&mut self, _: &mut SearchContext) -> GenericResult<StepStatus> {
        thread::sleep(self.delay);
        Ok(StepStatus::Continue)
    }

    fn current_best(&self) -> Option<Tour> {
        None
    }
}

/// Never returns from its first step.
pub struct StuckStrategy;

impl Strategy for StuckStrategy {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        let tour = Tour::identity(ctx.problem().len());
        ctx.evaluate(&tour);

        Ok(())
    }

    fn step(&mut self, _: &mut SearchContext) -> GenericResult<StepStatus> {
        loop {
            thread::sleep(Duration::from_millis(10));
        }
    }

    fn current_best(&self) -> Option<Tour> {
        None
    }
}

/// Specifies where the failing strategy fails.
#[derive(Clone, Copy)]
pub enum FailurePhase {
    Initialize,
    Step,
    Panic,
}

pub struct FailingStrategy {
    phase: FailurePhase,
}

impl FailingStrategy {
    pub fn new(phase: FailurePhase) -> Self {
        Self { phase }
    }
}

impl Strategy for FailingStrategy {
    fn initialize(&mut self, ctx: &mut SearchContext) -> GenericResult<()> {
        let tour = Tour::identity(ctx.problem().len());
        ctx.evaluate(&tour);

        match self.phase {
            FailurePhase::Initialize => Err("cannot initialize".into()),
            _ => Ok(()),
        }
    }

    fn step(&mut self, _: &mut SearchContext) -> GenericResult<StepStatus> {
        match self.phase {
            FailurePhase::Panic => panic!("strategy is broken"),
            _ => Err("step failed".into()),
        }
    }

    fn current_best(&self) -> Option<Tour> {
        None
    }
}

pub fn create_scripted_entry(name: &str, kind: StrategyKind, tours: Vec<Vec<usize>>) -> StrategyEntry {
    let tours = tours.into_iter().map(Tour::new).collect::<Vec<_>>();
    StrategyEntry::new(name, kind, move |_| Ok(Box::new(ScriptedStrategy::new(tours.clone()))))
}

pub fn create_sleepy_entry(name: &str, delay: Duration) -> StrategyEntry {
    StrategyEntry::new(name, StrategyKind::Competitor, move |_| Ok(Box::new(SleepyStrategy::new(delay))))
}

pub fn create_stuck_entry(name: &str) -> StrategyEntry {
    StrategyEntry::new(name, StrategyKind::Competitor, |_| Ok(Box::new(StuckStrategy)))
}

pub fn create_failing_entry(name: &str, phase: FailurePhase) -> StrategyEntry {
    StrategyEntry::new(name, StrategyKind::Competitor, move |_| Ok(Box::new(FailingStrategy::new(phase))))
}
