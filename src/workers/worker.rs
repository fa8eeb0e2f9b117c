use super::task::Outcome;
use super::task::Task;
use crate::mccfr::delta::Delta;
use crate::mccfr::regrets::Regrets;
use std::ops::Range;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

/// what a worker does with a batch: read the shared tracker,
/// return the increments its iterations produced
pub type Job = Arc<dyn Fn(&Regrets, Range<usize>) -> Delta + Send + Sync>;

/// A long-lived training thread.
///
/// Holds only a read handle to the shared tracker. Each batch runs under
/// a read lock and produces a private Delta, so the canonical tracker is
/// only ever mutated by the pool's merge step. A panicking batch is
/// reported as Failed and the thread exits; the pool replaces it.
pub struct Worker {
    id: usize,
    tasks: Sender<Task>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub fn spawn(
        id: usize,
        job: Job,
        regrets: Arc<RwLock<Regrets>>,
        outcomes: Sender<Outcome>,
    ) -> crate::Result<Self> {
        let (tasks, inbox) = std::sync::mpsc::channel();
        let handle = std::thread::Builder::new()
            .name(format!("worker-{}", id))
            .spawn(move || Self::run(id, job, regrets, inbox, outcomes))?;
        log::debug!("{:<32}{}", "spawned     worker", id);
        Ok(Self {
            id,
            tasks,
            handle: Some(handle),
        })
    }
    pub fn id(&self) -> usize {
        self.id
    }
    pub fn send(&self, task: Task) -> crate::Result<()> {
        self.tasks.send(task).map_err(|_| crate::Error::WorkerFailure {
            worker: self.id,
            reason: "task channel closed".into(),
        })
    }
    /// ask the thread to stop and wait for it
    pub fn join(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.tasks.send(Task::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run(
        id: usize,
        job: Job,
        regrets: Arc<RwLock<Regrets>>,
        inbox: Receiver<Task>,
        outcomes: Sender<Outcome>,
    ) {
        while let Ok(task) = inbox.recv() {
            match task {
                Task::Shutdown => break,
                Task::Batch { batch, iterations } => {
                    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
                        let guard = regrets.read().unwrap_or_else(PoisonError::into_inner);
                        job(&*guard, iterations)
                    }));
                    match result {
                        Ok(delta) => {
                            if outcomes.send(Outcome::Done { worker: id, batch, delta }).is_err() {
                                break;
                            }
                        }
                        Err(panic) => {
                            let reason = panic
                                .downcast_ref::<&str>()
                                .map(|s| s.to_string())
                                .or_else(|| panic.downcast_ref::<String>().cloned())
                                .unwrap_or_else(|| "panic".to_string());
                            let _ = outcomes.send(Outcome::Failed { worker: id, batch, reason });
                            break;
                        }
                    }
                }
            }
        }
        log::debug!("{:<32}{}", "stopped     worker", id);
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.stop();
    }
}
