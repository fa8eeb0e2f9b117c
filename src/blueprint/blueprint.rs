use crate::Probability;
use crate::gameplay::action::Action;
use crate::mccfr::info::Info;
use crate::mccfr::memory::Memory;
use crate::mccfr::policy::Policy;
use crate::mccfr::regrets::Regrets;
use crate::save::disk::Disk;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::collections::BTreeMap;
use std::io::Read;
use std::io::Write;

/// Immutable average strategy, the product of training.
///
/// Every stored policy is a distribution over the actions its
/// information set offers. The snapshot is tagged with the hash of the
/// abstraction it was trained against and the epoch it was taken at;
/// loading it never needs the abstraction itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    hash: u64,
    epoch: usize,
    policies: BTreeMap<Info, Policy>,
}

impl Blueprint {
    /// average strategy of every information set the tracker has touched
    pub fn snapshot(regrets: &Regrets, hash: u64, epoch: usize) -> Self {
        let policies = regrets
            .iter()
            .map(|(info, row)| (*info, regrets.average(info, &row.actions())))
            .collect::<BTreeMap<Info, Policy>>();
        log::info!("{:<32}{}", "snapshot    infosets", policies.len());
        Self {
            hash,
            epoch,
            policies,
        }
    }
    pub fn hash(&self) -> u64 {
        self.hash
    }
    pub fn epoch(&self) -> usize {
        self.epoch
    }
    pub fn num_infosets(&self) -> usize {
        self.policies.len()
    }
    pub fn policy(&self, info: &Info) -> Option<&Policy> {
        self.policies.get(info)
    }
    /// probability of an action, zero when unknown
    pub fn get(&self, info: &Info, action: &Action) -> Probability {
        self.policy(info).map(|p| p.get(action)).unwrap_or(0.)
    }
    /// stored policy, or uniform over the given actions if never trained
    pub fn policy_or_uniform(&self, info: &Info, actions: &[Action]) -> Policy {
        self.policy(info)
            .filter(|p| p.actions() == actions)
            .cloned()
            .unwrap_or_else(|| Policy::uniform(actions))
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Info, &Policy)> {
        self.policies.iter()
    }
    /// reject use against a different abstraction
    pub fn check(&self, hash: u64) -> crate::Result<()> {
        match self.hash == hash {
            true => Ok(()),
            false => Err(crate::Error::AbstractionMismatch {
                expected: hash,
                found: self.hash,
            }),
        }
    }
}

impl Disk for Blueprint {
    fn name() -> &'static str {
        "blueprint"
    }
    fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        writer.write_u64::<BE>(self.hash)?;
        writer.write_u64::<BE>(self.epoch as u64)?;
        writer.write_u64::<BE>(self.policies.len() as u64)?;
        for (info, policy) in self.policies.iter() {
            info.write(writer)?;
            writer.write_u8(policy.len() as u8)?;
            for (action, p) in policy.iter() {
                writer.write_u8(u8::from(*action))?;
                writer.write_f32::<BE>(*p)?;
            }
        }
        Ok(())
    }
    fn read<R: Read>(reader: &mut R) -> crate::Result<Self> {
        let hash = reader.read_u64::<BE>()?;
        let epoch = reader.read_u64::<BE>()? as usize;
        let n = reader.read_u64::<BE>()? as usize;
        let mut policies = BTreeMap::new();
        for _ in 0..n {
            let info = Info::read(reader)?;
            let mut pairs = Vec::new();
            for _ in 0..reader.read_u8()? {
                let action = match reader.read_u8()? {
                    code @ 1..=14 => Action::from(code),
                    code => {
                        return Err(crate::Error::Serialization(format!("invalid action {}", code)));
                    }
                };
                pairs.push((action, reader.read_f32::<BE>()?));
            }
            let policy = Policy::from(pairs);
            if !policy.is_distribution() {
                return Err(crate::Error::Serialization(format!("{} is not a distribution", info)));
            }
            policies.insert(info, policy);
        }
        Ok(Self {
            hash,
            epoch,
            policies,
        })
    }
}
