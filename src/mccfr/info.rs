use super::history::History;
use crate::cards::street::Street;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;

/// information set key: who acts, on which street, holding which
/// bucket, after which abstract betting history. equal keys always
/// offer the same legal actions.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Info {
    player: u8,
    street: Street,
    bucket: u16,
    history: History,
}

impl Info {
    pub fn new(player: usize, street: Street, bucket: usize, history: History) -> Self {
        Self {
            player: player as u8,
            street,
            bucket: bucket as u16,
            history,
        }
    }
    pub fn player(&self) -> usize {
        self.player as usize
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn bucket(&self) -> usize {
        self.bucket as usize
    }
    pub fn history(&self) -> History {
        self.history
    }

    pub fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        let history = u128::from(self.history);
        writer.write_u8(self.player)?;
        writer.write_u8(u8::from(self.street))?;
        writer.write_u16::<BE>(self.bucket)?;
        writer.write_u128::<BE>(history)?;
        Ok(())
    }
    pub fn read<R: Read>(reader: &mut R) -> crate::Result<Self> {
        let player = reader.read_u8()?;
        let street = match reader.read_u8()? {
            n @ 0..=3 => Street::from(n),
            n => return Err(crate::Error::Serialization(format!("invalid street {}", n))),
        };
        let bucket = reader.read_u16::<BE>()?;
        let history = History::from(reader.read_u128::<BE>()?);
        Ok(Self {
            player,
            street,
            bucket,
            history,
        })
    }
}

impl std::fmt::Display for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "P{} {} #{:<4} {}", self.player, self.street, self.bucket, self.history)
    }
}
