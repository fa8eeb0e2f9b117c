use crate::save::atomic::atomic;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Running,
    Interrupted,
    Done,
    Failed,
}

/// progress marker an external supervisor can poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub instance: usize,
    pub epoch: usize,
    pub elapsed_secs: f64,
    pub status: Status,
}

impl Progress {
    /// replace the marker atomically; readers see the old or the new file
    pub fn write(&self, path: &Path) -> crate::Result<()> {
        atomic(path, |writer| {
            serde_json::to_writer_pretty(&mut *writer, self)?;
            Ok(())
        })
    }
    pub fn read(path: &Path) -> crate::Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape() {
        let progress = Progress {
            instance: 2,
            epoch: 640,
            elapsed_secs: 1.5,
            status: Status::Running,
        };
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["instance"], 2);
        assert_eq!(json["epoch"], 640);
        assert_eq!(json["elapsed_secs"], 1.5);
        assert_eq!(json["status"], "running");
    }

    #[test]
    fn overwrite_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("progress.json");
        for epoch in [1, 2] {
            let progress = Progress {
                instance: 0,
                epoch,
                elapsed_secs: 0.,
                status: Status::Done,
            };
            progress.write(path).unwrap();
            assert_eq!(Progress::read(path).unwrap(), progress);
        }
        let names = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(names, 1);
    }
}
