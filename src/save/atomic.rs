use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// sibling temp file that is renamed over the target once complete
pub fn staging(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// write through a temp file and rename into place.
/// readers see either the previous file or the complete new one.
/// on any failure the previous file is left untouched.
pub fn atomic<F>(path: &Path, body: F) -> crate::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> crate::Result<()>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let ref temp = staging(path);
    let result = File::create(temp)
        .map(BufWriter::new)
        .map_err(crate::Error::from)
        .and_then(|mut writer| {
            body(&mut writer)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        })
        .and_then(|_| std::fs::rename(temp, path).map_err(crate::Error::from));
    if result.is_err() {
        let _ = std::fs::remove_file(temp);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("artifact.bin");
        atomic(path, |w| Ok(w.write_all(b"first")?)).unwrap();
        atomic(path, |w| Ok(w.write_all(b"second")?)).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
        assert!(!staging(path).exists());
    }

    #[test]
    fn failure_preserves_previous() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("artifact.bin");
        atomic(path, |w| Ok(w.write_all(b"good")?)).unwrap();
        let failed = atomic(path, |w| {
            w.write_all(b"partial")?;
            Err(crate::Error::Serialization("boom".into()))
        });
        assert!(failed.is_err());
        assert_eq!(std::fs::read(path).unwrap(), b"good");
        assert!(!staging(path).exists());
    }
}
