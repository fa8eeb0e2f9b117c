use super::task::Outcome;
use super::task::Task;
use super::worker::Job;
use super::worker::Worker;
use crate::mccfr::delta::Delta;
use crate::mccfr::regrets::Regrets;
use std::ops::Range;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;

/// Persistent pool of training threads.
///
/// Work proceeds in cycles: at most one batch per worker is dispatched,
/// and the cycle ends once every batch has come back. Workers never see
/// each other's increments within a cycle. A batch whose worker crashed
/// is rerun once on a fresh replacement; since a batch's randomness is a
/// function of its iteration indices, the rerun produces the delta the
/// crashed worker would have. A batch that crashes on every attempt is
/// dropped: its iterations count as done and contribute nothing.
pub struct Pool {
    workers: Vec<Worker>,
    job: Job,
    regrets: Arc<RwLock<Regrets>>,
    sender: Sender<Outcome>,
    outcomes: Receiver<Outcome>,
    restarts: usize,
    dropped: usize,
}

impl Pool {
    /// attempts per batch before it is dropped
    const ATTEMPTS: usize = 2;

    pub fn new(n: usize, regrets: Arc<RwLock<Regrets>>, job: Job) -> crate::Result<Self> {
        if n == 0 {
            return Err(crate::Error::Configuration("pool needs at least one worker".into()));
        }
        let (sender, outcomes) = std::sync::mpsc::channel();
        let workers = (0..n)
            .map(|id| Worker::spawn(id, job.clone(), regrets.clone(), sender.clone()))
            .collect::<crate::Result<Vec<Worker>>>()?;
        log::info!("{:<32}{}", "started     workers", n);
        Ok(Self {
            workers,
            job,
            regrets,
            sender,
            outcomes,
            restarts: 0,
            dropped: 0,
        })
    }
    pub fn len(&self) -> usize {
        self.workers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
    /// workers replaced after a crash, over the pool's lifetime
    pub fn restarts(&self) -> usize {
        self.restarts
    }
    /// batches abandoned after exhausting their attempts
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// run one cycle, returning deltas of the surviving batches in batch order
    pub fn cycle(&mut self, batches: Vec<Range<usize>>) -> crate::Result<Vec<Delta>> {
        assert!(batches.len() <= self.len(), "more batches than workers");
        let mut deltas = batches.iter().map(|_| None).collect::<Vec<Option<Delta>>>();
        let mut attempts = vec![1; batches.len()];
        for (batch, iterations) in batches.iter().enumerate() {
            self.workers[batch].send(Task::Batch {
                batch,
                iterations: iterations.clone(),
            })?;
        }
        let mut pending = batches.len();
        while pending > 0 {
            match self.outcomes.recv().map_err(|_| crate::Error::WorkerFailure {
                worker: usize::MAX,
                reason: "outcome channel closed".into(),
            })? {
                Outcome::Done { batch, delta, .. } => {
                    deltas[batch] = Some(delta);
                    pending -= 1;
                }
                Outcome::Failed { worker, batch, reason } => {
                    log::warn!("{:<32}{} ({})", "worker      failed", worker, reason);
                    self.restart(worker)?;
                    if attempts[batch] >= Self::ATTEMPTS {
                        log::error!("{:<32}{:?}", "dropped     batch", batches[batch]);
                        self.dropped += 1;
                        pending -= 1;
                        continue;
                    }
                    attempts[batch] += 1;
                    self.workers[worker].send(Task::Batch {
                        batch,
                        iterations: batches[batch].clone(),
                    })?;
                }
            }
        }
        Ok(deltas.into_iter().flatten().collect())
    }

    fn restart(&mut self, worker: usize) -> crate::Result<()> {
        let fresh = Worker::spawn(worker, self.job.clone(), self.regrets.clone(), self.sender.clone())?;
        let dead = std::mem::replace(&mut self.workers[worker], fresh);
        dead.join();
        self.restarts += 1;
        log::info!("{:<32}{}", "restarted   worker", worker);
        Ok(())
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        for worker in self.workers.drain(..) {
            worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::street::Street;
    use crate::gameplay::action::Action;
    use crate::mccfr::history::History;
    use crate::mccfr::info::Info;
    use crate::mccfr::memory::Ledger;
    use crate::mccfr::memory::Memory;
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    fn counting() -> Job {
        Arc::new(|_: &Regrets, iterations: Range<usize>| {
            let mut delta = Delta::default();
            let ref info = Info::new(0, Street::Pref, 0, History::default());
            for _ in iterations {
                delta.update_regret(info, &Action::Call, 1.);
            }
            delta
        })
    }

    #[test]
    fn zero_workers_rejected() {
        let regrets = Arc::new(RwLock::new(Regrets::default()));
        assert!(Pool::new(0, regrets, counting()).is_err());
    }

    #[test]
    fn deltas_come_back_in_batch_order() {
        let regrets = Arc::new(RwLock::new(Regrets::default()));
        let mut pool = Pool::new(3, regrets, counting()).unwrap();
        let deltas = pool.cycle(vec![0..1, 1..3, 3..6]).unwrap();
        assert_eq!(deltas.len(), 3);
        let mut total = Regrets::default();
        deltas.into_iter().for_each(|d| total.merge(d));
        let ref info = Info::new(0, Street::Pref, 0, History::default());
        assert_eq!(total.regret(info, &Action::Call), 6.);
    }

    #[test]
    fn crashed_worker_is_replaced() {
        let crashed = Arc::new(AtomicBool::new(false));
        let flag = crashed.clone();
        let inner = counting();
        let job: Job = Arc::new(move |regrets: &Regrets, iterations: Range<usize>| {
            if !flag.swap(true, Ordering::SeqCst) {
                panic!("injected fault");
            }
            inner(regrets, iterations)
        });
        let regrets = Arc::new(RwLock::new(Regrets::default()));
        let mut pool = Pool::new(2, regrets, job).unwrap();
        let deltas = pool.cycle(vec![0..4, 4..8]).unwrap();
        assert_eq!(deltas.len(), 2);
        assert_eq!(pool.restarts(), 1);
        assert_eq!(pool.cycle(vec![8..9]).unwrap().len(), 1);
    }

    #[test]
    fn crashing_batch_is_dropped() {
        let inner = counting();
        let job: Job = Arc::new(move |regrets: &Regrets, iterations: Range<usize>| {
            if iterations.start == 0 {
                panic!("bad batch");
            }
            inner(regrets, iterations)
        });
        let regrets = Arc::new(RwLock::new(Regrets::default()));
        let mut pool = Pool::new(2, regrets, job).unwrap();
        let deltas = pool.cycle(vec![0..4, 4..8]).unwrap();
        assert_eq!(deltas.len(), 1);
        assert_eq!(pool.dropped(), 1);
        assert_eq!(pool.restarts(), 2);
        let mut total = Regrets::default();
        deltas.into_iter().for_each(|d| total.merge(d));
        let ref info = Info::new(0, Street::Pref, 0, History::default());
        assert_eq!(total.regret(info, &Action::Call), 4.);
        assert_eq!(pool.cycle(vec![8..10, 10..13]).unwrap().len(), 2);
    }
}
