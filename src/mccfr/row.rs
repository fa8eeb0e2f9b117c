use crate::Probability;
use crate::Utility;
use crate::gameplay::action::Action;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::io::Read;
use std::io::Write;

/// one action's accumulators
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Entry {
    pub regret: Utility,
    pub weight: Probability,
}

/// accumulators for every action seen at one information set.
/// entries are created on first touch and never removed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row(Vec<(Action, Entry)>);

impl Row {
    pub fn get(&self, action: &Action) -> Option<&Entry> {
        self.0.iter().find(|(a, _)| a == action).map(|(_, e)| e)
    }
    pub fn entry(&mut self, action: Action) -> &mut Entry {
        match self.0.iter().position(|(a, _)| *a == action) {
            Some(i) => &mut self.0[i].1,
            None => {
                self.0.push((action, Entry::default()));
                &mut self.0.last_mut().expect("just pushed").1
            }
        }
    }
    pub fn actions(&self) -> Vec<Action> {
        self.0.iter().map(|(a, _)| *a).collect()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(Action, Entry)> {
        self.0.iter()
    }
    /// componentwise sum
    pub fn absorb(&mut self, other: &Row) {
        for (action, entry) in other.iter() {
            let mine = self.entry(*action);
            mine.regret += entry.regret;
            mine.weight += entry.weight;
        }
    }
    pub fn scale(&mut self, factor: f32) {
        for (_, entry) in self.0.iter_mut() {
            entry.regret *= factor;
            entry.weight *= factor;
        }
    }
    pub fn magnitude(&self) -> Utility {
        self.0.iter().map(|(_, e)| e.regret.abs()).sum()
    }

    /// count, then (action code, regret, weight) per entry
    pub fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        writer.write_u8(self.0.len() as u8)?;
        for (action, entry) in self.0.iter() {
            writer.write_u8(u8::from(*action))?;
            writer.write_f32::<BE>(entry.regret)?;
            writer.write_f32::<BE>(entry.weight)?;
        }
        Ok(())
    }
    pub fn read<R: Read>(reader: &mut R) -> crate::Result<Self> {
        let n = reader.read_u8()? as usize;
        let mut entries = Vec::with_capacity(n);
        for _ in 0..n {
            let action = match reader.read_u8()? {
                code @ 1..=14 => Action::from(code),
                code => return Err(crate::Error::Serialization(format!("invalid action {}", code))),
            };
            let regret = reader.read_f32::<BE>()?;
            let weight = reader.read_f32::<BE>()?;
            entries.push((action, Entry { regret, weight }));
        }
        Ok(Self(entries))
    }
}

impl From<Vec<(Action, Entry)>> for Row {
    fn from(entries: Vec<(Action, Entry)>) -> Self {
        Self(entries)
    }
}
