use super::atomic::atomic;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// for types that can be written to and loaded from disk.
///
/// files are big-endian: a shared magic signature, the entity name,
/// the entity body, and a 0xFFFF footer. writes go through a temp file
/// so the previous artifact survives any failure.
pub trait Disk: Sized {
    /// name of the entity, embedded in the file and checked on load
    fn name() -> &'static str;
    /// write the body
    fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()>;
    /// read the body
    fn read<R: Read>(reader: &mut R) -> crate::Result<Self>;

    /// signature + 4 null bytes for flags
    fn header() -> &'static [u8] {
        b"BPSOLVE\n\xFF\r\n\0\0\0\0"
    }
    /// signals end of binary file
    fn footer() -> u16 {
        0xFFFF
    }
    /// write to disk atomically
    fn save(&self, path: &Path) -> crate::Result<()> {
        log::info!("{:<32}{}", format!("saving      {}", Self::name()), path.display());
        atomic(path, |writer| {
            writer.write_all(Self::header())?;
            writer.write_u16::<BE>(Self::name().len() as u16)?;
            writer.write_all(Self::name().as_bytes())?;
            self.write(writer)?;
            writer.write_u16::<BE>(Self::footer())?;
            Ok(())
        })
    }
    /// read from disk, rejecting foreign or truncated files
    fn load(path: &Path) -> crate::Result<Self> {
        log::info!("{:<32}{}", format!("loading     {}", Self::name()), path.display());
        let ref mut reader = BufReader::new(File::open(path)?);
        let parse = |reader: &mut BufReader<File>| -> crate::Result<Self> {
            let ref mut magic = vec![0u8; Self::header().len()];
            reader.read_exact(magic)?;
            if magic.as_slice() != Self::header() {
                return Err(crate::Error::Serialization(format!(
                    "{} is not a solver artifact",
                    path.display()
                )));
            }
            let ref mut name = vec![0u8; reader.read_u16::<BE>()? as usize];
            reader.read_exact(name)?;
            if name.as_slice() != Self::name().as_bytes() {
                return Err(crate::Error::Serialization(format!(
                    "expected {} artifact, found {}",
                    Self::name(),
                    String::from_utf8_lossy(name)
                )));
            }
            let entity = Self::read(reader)?;
            match reader.read_u16::<BE>()? {
                n if n == Self::footer() => Ok(entity),
                n => Err(crate::Error::Serialization(format!("bad footer {:#06x}", n))),
            }
        };
        parse(reader).map_err(|e| match e {
            crate::Error::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                crate::Error::Serialization(format!("{} is truncated", path.display()))
            }
            e => e,
        })
    }
    /// check if file exists on disk
    fn done(path: &Path) -> bool {
        std::fs::metadata(path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair(u32, f32);

    impl Disk for Pair {
        fn name() -> &'static str {
            "pair"
        }
        fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
            writer.write_u32::<BE>(self.0)?;
            writer.write_f32::<BE>(self.1)?;
            Ok(())
        }
        fn read<R: Read>(reader: &mut R) -> crate::Result<Self> {
            Ok(Self(reader.read_u32::<BE>()?, reader.read_f32::<BE>()?))
        }
    }

    #[test]
    fn persistence() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("pair.bin");
        let pair = Pair(7, 0.25);
        pair.save(path).unwrap();
        assert!(Pair::done(path));
        assert_eq!(Pair::load(path).unwrap(), pair);
    }

    #[test]
    fn truncated_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("pair.bin");
        Pair(7, 0.25).save(path).unwrap();
        let bytes = std::fs::read(path).unwrap();
        std::fs::write(path, &bytes[..bytes.len() - 4]).unwrap();
        assert!(matches!(Pair::load(path), Err(crate::Error::Serialization(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("pair.bin");
        std::fs::write(path, b"definitely not an artifact").unwrap();
        assert!(matches!(Pair::load(path), Err(crate::Error::Serialization(_))));
    }
}
