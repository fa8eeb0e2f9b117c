use crate::blueprint::blueprint::Blueprint;
use crate::mccfr::info::Info;
use crate::mccfr::regrets::Regrets;
use crate::mccfr::row::Row;
use crate::save::disk::Disk;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// Everything needed to resume training: every regret row, the iteration
/// counter, and the hash of the abstraction the rows are keyed against.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    hash: u64,
    epoch: usize,
    regrets: Regrets,
}

impl Checkpoint {
    pub fn new(regrets: Regrets, hash: u64, epoch: usize) -> Self {
        Self {
            hash,
            epoch,
            regrets,
        }
    }
    pub fn hash(&self) -> u64 {
        self.hash
    }
    pub fn epoch(&self) -> usize {
        self.epoch
    }
    pub fn regrets(&self) -> &Regrets {
        &self.regrets
    }
    pub fn into_regrets(self) -> Regrets {
        self.regrets
    }
    pub fn blueprint(&self) -> Blueprint {
        Blueprint::snapshot(&self.regrets, self.hash, self.epoch)
    }
    /// load, failing fast if trained against another abstraction
    pub fn load_for(path: &Path, hash: u64) -> crate::Result<Self> {
        let checkpoint = Self::load(path)?;
        match checkpoint.hash == hash {
            true => Ok(checkpoint),
            false => Err(crate::Error::AbstractionMismatch {
                expected: hash,
                found: checkpoint.hash,
            }),
        }
    }
    /// sum two independently trained runs over the same abstraction
    pub fn merge(mut self, other: Self) -> crate::Result<Self> {
        if self.hash != other.hash {
            return Err(crate::Error::AbstractionMismatch {
                expected: self.hash,
                found: other.hash,
            });
        }
        self.regrets
            .merge(other.regrets.iter().map(|(info, row)| (*info, row.clone())));
        self.epoch += other.epoch;
        Ok(self)
    }
}

impl Disk for Checkpoint {
    fn name() -> &'static str {
        "checkpoint"
    }
    fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        writer.write_u64::<BE>(self.hash)?;
        writer.write_u64::<BE>(self.epoch as u64)?;
        writer.write_u64::<BE>(self.regrets.num_infosets() as u64)?;
        let mut rows = self.regrets.iter().collect::<Vec<(&Info, &Row)>>();
        rows.sort_by_key(|(info, _)| **info);
        for (info, row) in rows {
            info.write(writer)?;
            row.write(writer)?;
        }
        Ok(())
    }
    fn read<R: Read>(reader: &mut R) -> crate::Result<Self> {
        let hash = reader.read_u64::<BE>()?;
        let epoch = reader.read_u64::<BE>()? as usize;
        let n = reader.read_u64::<BE>()? as usize;
        let mut regrets = Regrets::default();
        for _ in 0..n {
            let info = Info::read(reader)?;
            let row = Row::read(reader)?;
            regrets.restore(info, row);
        }
        Ok(Self {
            hash,
            epoch,
            regrets,
        })
    }
}
