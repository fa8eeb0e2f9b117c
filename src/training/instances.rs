use super::checkpoint::Checkpoint;
use super::config::TrainingConfig;
use super::trainer::Summary;
use super::trainer::Trainer;
use crate::clustering::abstraction::Abstraction;
use crate::gameplay::config::GameConfig;
use crate::save::disk::Disk;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

/// Several isolated training runs side by side.
///
/// Each instance gets its own seed derived from the base seed and its id,
/// its own directory for a checkpoint and a progress marker, and shares
/// nothing with its siblings but the abstraction and a stop flag. An
/// instance whose checkpoint already exists resumes from it.
pub struct Instances {
    game: GameConfig,
    config: TrainingConfig,
    abstraction: Arc<Abstraction>,
    count: usize,
    root: PathBuf,
    interrupt: Arc<AtomicBool>,
}

impl Instances {
    pub fn new(
        game: GameConfig,
        config: TrainingConfig,
        abstraction: Arc<Abstraction>,
        count: usize,
        root: PathBuf,
    ) -> crate::Result<Self> {
        if count == 0 {
            return Err(crate::Error::Configuration("at least one instance".into()));
        }
        game.validate()?;
        config.validate()?;
        Ok(Self {
            game,
            config,
            abstraction,
            count,
            root,
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }
    /// stops every instance at its next merge boundary
    pub fn interrupter(&self) -> Arc<AtomicBool> {
        self.interrupt.clone()
    }
    pub fn directory(&self, instance: usize) -> PathBuf {
        self.root.join(format!("instance-{:02}", instance))
    }
    pub fn checkpoint(&self, instance: usize) -> PathBuf {
        self.directory(instance).join("checkpoint.bin")
    }
    pub fn progress(&self, instance: usize) -> PathBuf {
        self.directory(instance).join("progress.json")
    }
    /// distinct, stable per instance
    pub fn seed(&self, instance: usize) -> u64 {
        crate::seed((self.config.seed, instance))
    }

    /// run every instance to completion or interruption
    pub fn run(&self) -> crate::Result<Vec<Summary>> {
        log::info!("{:<32}{}", "launching   instances", self.count);
        std::thread::scope(|scope| {
            let handles = (0..self.count)
                .map(|id| (id, scope.spawn(move || self.instance(id))))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|(id, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        Err(crate::Error::WorkerFailure {
                            worker: id,
                            reason: "instance panicked".into(),
                        })
                    })
                })
                .collect()
        })
    }

    /// sum every instance's checkpoint into one
    pub fn merge(&self) -> crate::Result<Checkpoint> {
        (0..self.count)
            .map(|id| Checkpoint::load_for(&self.checkpoint(id), self.abstraction.hash()))
            .try_fold(None, |acc: Option<Checkpoint>, next| {
                let next = next?;
                match acc {
                    None => Ok(Some(next)),
                    Some(acc) => acc.merge(next).map(Some),
                }
            })?
            .ok_or_else(|| crate::Error::Configuration("no instances".into()))
    }

    fn instance(&self, id: usize) -> crate::Result<Summary> {
        let config = TrainingConfig {
            seed: self.seed(id),
            ..self.config.clone()
        };
        let mut trainer = Trainer::new(self.game.clone(), config, self.abstraction.clone())?
            .with_instance(id)
            .with_interrupt(self.interrupt.clone())
            .with_checkpoint(self.checkpoint(id))
            .with_progress(self.progress(id));
        if Checkpoint::done(&self.checkpoint(id)) {
            trainer.resume_from(&self.checkpoint(id))?;
        }
        trainer.train()
    }
}
