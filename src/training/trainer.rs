use super::checkpoint::Checkpoint;
use super::config::Mode;
use super::config::TrainingConfig;
use super::progress::Progress;
use super::progress::Status;
use crate::blueprint::blueprint::Blueprint;
use crate::clustering::abstraction::Abstraction;
use crate::gameplay::config::GameConfig;
use crate::mccfr::delta::Scratch;
use crate::mccfr::regrets::Regrets;
use crate::mccfr::traversal::Traversal;
use crate::save::disk::Disk;
use crate::workers::pool::Pool;
use crate::workers::worker::Job;
use std::ops::Range;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;
use std::time::Instant;

/// what a finished or stopped run reports
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub instance: usize,
    pub epoch: usize,
    pub infosets: usize,
    pub status: Status,
    pub elapsed: Duration,
    pub restarts: usize,
}

/// Drives MCCFR training to a blueprint.
///
/// Sequential mode runs traversals directly against the tracker. Parallel
/// mode dispatches batches of iteration indices to a persistent worker
/// pool and merges the returned deltas under the write lock, so the
/// tracker only changes between cycles. Discounts and checkpoints are
/// applied at those merge boundaries. An interrupt flag or deadline stops
/// the run between cycles; the in-flight cycle is merged and a final
/// checkpoint written before returning.
pub struct Trainer {
    game: GameConfig,
    config: TrainingConfig,
    abstraction: Arc<Abstraction>,
    regrets: Arc<RwLock<Regrets>>,
    epoch: usize,
    instance: usize,
    interrupt: Arc<AtomicBool>,
    deadline: Option<Instant>,
    checkpoint: Option<PathBuf>,
    progress: Option<PathBuf>,
    started: Instant,
    logged: Instant,
    restarts: usize,
}

impl Trainer {
    pub fn new(game: GameConfig, config: TrainingConfig, abstraction: Arc<Abstraction>) -> crate::Result<Self> {
        game.validate()?;
        config.validate()?;
        Ok(Self {
            game,
            config,
            abstraction,
            regrets: Arc::new(RwLock::new(Regrets::default())),
            epoch: 0,
            instance: 0,
            interrupt: Arc::new(AtomicBool::new(false)),
            deadline: None,
            checkpoint: None,
            progress: None,
            started: Instant::now(),
            logged: Instant::now(),
            restarts: 0,
        })
    }
    pub fn with_instance(mut self, instance: usize) -> Self {
        self.instance = instance;
        self
    }
    pub fn with_checkpoint(mut self, path: PathBuf) -> Self {
        self.checkpoint = Some(path);
        self
    }
    pub fn with_progress(mut self, path: PathBuf) -> Self {
        self.progress = Some(path);
        self
    }
    /// stop once this much wall time has passed
    pub fn with_deadline(mut self, budget: Duration) -> Self {
        self.deadline = Some(Instant::now() + budget);
        self
    }
    /// share a stop flag with other trainers or a signal handler
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }
    /// setting the returned flag stops training at the next merge boundary
    pub fn interrupter(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }

    /// continue from saved state trained against this abstraction
    pub fn resume(&mut self, checkpoint: Checkpoint) -> crate::Result<()> {
        if checkpoint.hash() != self.abstraction.hash() {
            return Err(crate::Error::AbstractionMismatch {
                expected: self.abstraction.hash(),
                found: checkpoint.hash(),
            });
        }
        log::info!("{:<32}{}", "resuming    epoch", checkpoint.epoch());
        self.epoch = checkpoint.epoch();
        *self.write() = checkpoint.into_regrets();
        Ok(())
    }
    pub fn resume_from(&mut self, path: &Path) -> crate::Result<()> {
        self.resume(Checkpoint::load_for(path, self.abstraction.hash())?)
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }
    pub fn num_infosets(&self) -> usize {
        self.read().num_infosets()
    }
    pub fn blueprint(&self) -> Blueprint {
        Blueprint::snapshot(&self.read(), self.abstraction.hash(), self.epoch)
    }
    pub fn snapshot(&self) -> Checkpoint {
        Checkpoint::new(self.read().clone(), self.abstraction.hash(), self.epoch)
    }

    pub fn train(&mut self) -> crate::Result<Summary> {
        log::info!("{:<32}{:?}", "training    mode", self.config.mode);
        log::info!("{:<32}{}", "training    iterations", self.config.iterations);
        self.started = Instant::now();
        self.mark(Status::Running)?;
        let result = match self.config.mode {
            Mode::Sequential => self.sequential(),
            Mode::Parallel => self.parallel(),
        };
        if let Err(e) = result {
            log::error!("{:<32}{}", "training    failed", e);
            let _ = self.mark(Status::Failed);
            return Err(e);
        }
        let status = match self.epoch >= self.config.iterations {
            true => Status::Done,
            false => Status::Interrupted,
        };
        self.save()?;
        self.mark(status)?;
        let summary = self.summary(status);
        log::info!("{:<32}{:?} at epoch {}", "training    stopped", status, summary.epoch);
        Ok(summary)
    }

    fn sequential(&mut self) -> crate::Result<()> {
        let game = self.game.clone();
        let abstraction = self.abstraction.clone();
        let traversal = Traversal::new(&game, &abstraction);
        while self.epoch < self.config.iterations && !self.stopped() {
            traversal.iterate(&mut *self.write(), self.config.seed, self.epoch);
            self.advance(self.epoch + 1)?;
        }
        Ok(())
    }

    fn parallel(&mut self) -> crate::Result<()> {
        let mut pool = Pool::new(self.config.workers, self.regrets.clone(), self.job())?;
        while self.epoch < self.config.iterations && !self.stopped() {
            let batches = self.batches(pool.len());
            let end = batches.last().map(|r| r.end).unwrap_or(self.epoch);
            let deltas = pool.cycle(batches);
            self.restarts = pool.restarts();
            let deltas = deltas?;
            let mut regrets = self.write();
            deltas.into_iter().for_each(|delta| regrets.merge(delta));
            drop(regrets);
            self.advance(end)?;
        }
        Ok(())
    }

    /// contiguous iteration ranges for the next cycle, one per worker
    fn batches(&self, workers: usize) -> Vec<Range<usize>> {
        (0..workers)
            .map(|w| self.epoch + w * self.config.batch_size)
            .map(|start| start..(start + self.config.batch_size).min(self.config.iterations))
            .filter(|range| !range.is_empty())
            .collect()
    }

    fn job(&self) -> Job {
        let game = self.game.clone();
        let abstraction = self.abstraction.clone();
        let seed = self.config.seed;
        Arc::new(move |regrets: &Regrets, iterations: Range<usize>| {
            let traversal = Traversal::new(&game, &abstraction);
            let mut scratch = Scratch::from(regrets);
            for iteration in iterations {
                traversal.iterate(&mut scratch, seed, iteration);
            }
            scratch.into_delta()
        })
    }

    /// bookkeeping at a merge boundary
    fn advance(&mut self, to: usize) -> crate::Result<()> {
        let from = std::mem::replace(&mut self.epoch, to);
        for factor in self.config.discount.between(from, to) {
            log::debug!("{:<32}{:.4}", "discounting regrets", factor);
            self.write().discount(factor);
        }
        if to / self.config.checkpoint_every > from / self.config.checkpoint_every {
            self.save()?;
        }
        if self.logged.elapsed() >= crate::TRAINING_LOG_INTERVAL {
            self.logged = Instant::now();
            let regrets = self.read();
            log::info!(
                "{:<32}{:<12}{:<12}{:.2}",
                "training    progress",
                self.epoch,
                regrets.num_infosets(),
                regrets.magnitude() / regrets.num_infosets().max(1) as f32,
            );
            drop(regrets);
            self.mark(Status::Running)?;
        }
        Ok(())
    }

    fn stopped(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn save(&self) -> crate::Result<()> {
        match self.checkpoint {
            Some(ref path) => self.snapshot().save(path),
            None => Ok(()),
        }
    }

    fn mark(&self, status: Status) -> crate::Result<()> {
        match self.progress {
            Some(ref path) => Progress {
                instance: self.instance,
                epoch: self.epoch,
                elapsed_secs: self.started.elapsed().as_secs_f64(),
                status,
            }
            .write(path),
            None => Ok(()),
        }
    }

    fn summary(&self, status: Status) -> Summary {
        Summary {
            instance: self.instance,
            epoch: self.epoch,
            infosets: self.num_infosets(),
            status,
            elapsed: self.started.elapsed(),
            restarts: self.restarts,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Regrets> {
        self.regrets.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Regrets> {
        self.regrets.write().unwrap_or_else(PoisonError::into_inner)
    }
}
