use super::config::BucketConfig;
use super::features::Features;
use super::kmeans::KMeans;
use crate::cards::board::Board;
use crate::cards::hole::Hole;
use crate::cards::observation::Observation;
use crate::cards::street::Street;
use crate::save::disk::Disk;
use crate::save::fnv::Fnv;
use byteorder::BE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use std::hash::Hash;
use std::hash::Hasher;
use std::io::Read;
use std::io::Write;

/// a fitted hand abstraction: one set of centroids per street.
///
/// lookup computes the same equity features used in fitting and returns
/// the nearest centroid, so for a given model identical cards always map
/// to the identical bucket. the content hash identifies the model and is
/// stamped on every checkpoint and blueprint trained against it.
#[derive(Debug, Clone, PartialEq)]
pub struct Abstraction {
    config: BucketConfig,
    layers: Vec<KMeans>,
    hash: u64,
}

impl Abstraction {
    pub fn build(config: &BucketConfig) -> crate::Result<Self> {
        config.validate()?;
        let layers = Street::all()
            .iter()
            .map(|street| Self::layer(config, *street))
            .collect::<crate::Result<Vec<KMeans>>>()?;
        let hash = Self::digest(config, &layers);
        log::info!("{:<32}{:#018x}", "abstraction hash", hash);
        Ok(Self {
            config: config.clone(),
            layers,
            hash,
        })
    }

    /// nearest centroid id for what this player sees, in [0, k(street))
    pub fn bucket(&self, obs: &Observation) -> usize {
        let ref features = self.features(obs);
        self.layers[obs.street() as usize].nearest(features)
    }
    pub fn get_bucket(&self, hole: Hole, board: Board, street: Street) -> crate::Result<usize> {
        if board.street() != street {
            return Err(crate::Error::Configuration(format!(
                "{} board on {}",
                board.street(),
                street
            )));
        }
        let ref obs = Observation::try_from((hole, board))
            .map_err(|e| crate::Error::Configuration(e.to_string()))?;
        Ok(self.bucket(obs))
    }
    pub fn features(&self, obs: &Observation) -> Features {
        Features::compute(obs, self.config.seed, self.config.rollouts, self.config.opponents)
    }
    /// fitted bucket count, possibly below the configured one
    pub fn k(&self, street: Street) -> usize {
        self.layers[street as usize].k()
    }
    pub fn hash(&self) -> u64 {
        self.hash
    }
    pub fn config(&self) -> &BucketConfig {
        &self.config
    }

    fn layer(config: &BucketConfig, street: Street) -> crate::Result<KMeans> {
        log::info!("{:<32}{:<32}", "clustering  kmeans", street);
        let ref mut rng = SmallRng::seed_from_u64(crate::seed((config.seed, street)));
        let observations = (0..config.samples)
            .map(|_| Observation::random(street, rng))
            .collect::<Vec<Observation>>();
        let points = observations
            .par_iter()
            .map(|o| Features::compute(o, config.seed, config.rollouts, config.opponents))
            .collect::<Vec<Features>>();
        KMeans::fit(&points, config.k(street), config.iterations, rng)
    }
    /// FNV-1a over everything that determines a bucket id
    fn digest(config: &BucketConfig, layers: &[KMeans]) -> u64 {
        let ref mut hasher = Fnv::default();
        config.seed.hash(hasher);
        config.rollouts.hash(hasher);
        config.opponents.hash(hasher);
        for layer in layers {
            layer.k().hash(hasher);
            for centroid in layer.centroids() {
                centroid.bits().hash(hasher);
            }
        }
        hasher.finish()
    }
}

impl Disk for Abstraction {
    fn name() -> &'static str {
        "abstraction"
    }
    fn write<W: Write>(&self, writer: &mut W) -> crate::Result<()> {
        for k in self.config.k {
            writer.write_u32::<BE>(k as u32)?;
        }
        writer.write_u32::<BE>(self.config.samples as u32)?;
        writer.write_u64::<BE>(self.config.seed)?;
        writer.write_u32::<BE>(self.config.iterations as u32)?;
        writer.write_u32::<BE>(self.config.rollouts as u32)?;
        writer.write_u32::<BE>(self.config.opponents as u32)?;
        for layer in self.layers.iter() {
            writer.write_u32::<BE>(layer.k() as u32)?;
            for centroid in layer.centroids() {
                for x in centroid.values() {
                    writer.write_f32::<BE>(*x)?;
                }
            }
        }
        writer.write_u64::<BE>(self.hash)?;
        Ok(())
    }
    fn read<R: Read>(reader: &mut R) -> crate::Result<Self> {
        let mut k = [0usize; 4];
        for slot in k.iter_mut() {
            *slot = reader.read_u32::<BE>()? as usize;
        }
        let config = BucketConfig {
            k,
            samples: reader.read_u32::<BE>()? as usize,
            seed: reader.read_u64::<BE>()?,
            iterations: reader.read_u32::<BE>()? as usize,
            rollouts: reader.read_u32::<BE>()? as usize,
            opponents: reader.read_u32::<BE>()? as usize,
        };
        let mut layers = Vec::with_capacity(Street::all().len());
        for _ in Street::all() {
            let n = reader.read_u32::<BE>()? as usize;
            let mut centroids = Vec::with_capacity(n);
            for _ in 0..n {
                let mut values = [0.; Features::DIMENSIONS];
                for x in values.iter_mut() {
                    *x = reader.read_f32::<BE>()?;
                }
                centroids.push(Features::from(values));
            }
            layers.push(KMeans::from(centroids));
        }
        let expected = reader.read_u64::<BE>()?;
        let found = Self::digest(&config, &layers);
        if expected != found {
            return Err(crate::Error::AbstractionMismatch { expected, found });
        }
        Ok(Self {
            config,
            layers,
            hash: found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> BucketConfig {
        BucketConfig {
            k: [8, 4, 4, 4],
            samples: 50,
            seed: 42,
            iterations: 4,
            rollouts: 4,
            opponents: 2,
        }
    }

    #[test]
    fn buckets_in_range() {
        let abstraction = Abstraction::build(&tiny()).unwrap();
        let ref mut rng = SmallRng::seed_from_u64(0);
        for street in Street::all() {
            for _ in 0..16 {
                let obs = Observation::random(*street, rng);
                assert!(abstraction.bucket(&obs) < abstraction.k(*street));
                assert!(abstraction.k(*street) <= tiny().k(*street));
            }
        }
    }

    #[test]
    fn same_seed_same_model() {
        let a = Abstraction::build(&tiny()).unwrap();
        let b = Abstraction::build(&tiny()).unwrap();
        assert_eq!(a.hash(), b.hash());
    }

    #[test]
    fn street_must_match_board() {
        let abstraction = Abstraction::build(&tiny()).unwrap();
        let hole = Hole::try_from("AsKs").unwrap();
        let board = Board::try_from("2c7d9h").unwrap();
        assert!(abstraction.get_bucket(hole, board, Street::Turn).is_err());
        assert!(abstraction.get_bucket(hole, board, Street::Flop).is_ok());
    }

    #[test]
    fn persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("abstraction.bin");
        let abstraction = Abstraction::build(&tiny()).unwrap();
        abstraction.save(path).unwrap();
        let loaded = Abstraction::load(path).unwrap();
        assert_eq!(loaded, abstraction);
    }

    #[test]
    fn corrupted_centroid_is_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let ref path = dir.path().join("abstraction.bin");
        Abstraction::build(&tiny()).unwrap().save(path).unwrap();
        let mut bytes = std::fs::read(path).unwrap();
        // last centroid float sits just before the hash and footer
        let i = bytes.len() - 2 - 8 - 1;
        bytes[i] ^= 0x01;
        std::fs::write(path, bytes).unwrap();
        assert!(matches!(
            Abstraction::load(path),
            Err(crate::Error::AbstractionMismatch { .. })
        ));
    }
}
