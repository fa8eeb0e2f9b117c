use super::features::Features;
use crate::Energy;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator;
use std::collections::HashSet;

/// fitted centroids for one street
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    centroids: Vec<Features>,
}

impl From<Vec<Features>> for KMeans {
    fn from(centroids: Vec<Features>) -> Self {
        Self { centroids }
    }
}

impl KMeans {
    /// k-means++ seeding followed by Lloyd iterations.
    /// k is capped at the number of distinct points.
    pub fn fit<R: Rng>(points: &[Features], k: usize, iterations: usize, rng: &mut R) -> crate::Result<Self> {
        let distinct = points.iter().map(Features::bits).collect::<HashSet<_>>().len();
        if distinct == 0 {
            return Err(crate::Error::Configuration("no points to cluster".into()));
        }
        if k > distinct {
            log::warn!("{:<32}{} -> {}", "capping kmeans clusters", k, distinct);
        }
        let k = k.min(distinct);
        let mut kmeans = Self::init(points, k, rng)?;
        for i in 0..iterations {
            let (next, loss) = kmeans.step(points);
            log::debug!("{:<32}{:<8}{:.6}", "kmeans iteration rms", i, (loss / points.len() as Energy).sqrt());
            kmeans = next;
        }
        Ok(kmeans)
    }
    pub fn k(&self) -> usize {
        self.centroids.len()
    }
    pub fn centroids(&self) -> &[Features] {
        &self.centroids
    }
    /// index of the nearest centroid. ties go to the lowest index
    pub fn nearest(&self, x: &Features) -> usize {
        self.neighborhood(x).0
    }

    /// 1. choose 1st centroid uniformly from the dataset
    /// 2. choose nth centroid with probability proportional to squared
    ///    distance to its nearest already-chosen centroid
    fn init<R: Rng>(points: &[Features], k: usize, rng: &mut R) -> crate::Result<Self> {
        let mut potentials = vec![1.; points.len()];
        let mut centroids = Vec::with_capacity(k);
        while centroids.len() < k {
            let i = WeightedIndex::new(potentials.iter())
                .map_err(|e| crate::Error::Configuration(format!("kmeans++ weights: {}", e)))?
                .sample(rng);
            let ref x = points[i];
            centroids.push(*x);
            potentials = points
                .par_iter()
                .map(|p| x.distance(p))
                .collect::<Vec<Energy>>()
                .into_iter()
                .zip(potentials.iter())
                .map(|(d0, d1)| Energy::min(d0, *d1))
                .collect::<Vec<Energy>>();
        }
        Ok(Self::from(centroids))
    }
    /// assign every point to its nearest centroid, move centroids to the
    /// mean of their points. empty clusters keep their previous position.
    fn step(&self, points: &[Features]) -> (Self, Energy) {
        let assignments = points
            .par_iter()
            .map(|p| self.neighborhood(p))
            .collect::<Vec<(usize, Energy)>>();
        let loss = assignments.iter().map(|(_, d)| d).sum::<Energy>();
        let centroids = (0..self.k())
            .map(|c| {
                Features::mean(
                    points
                        .iter()
                        .zip(assignments.iter())
                        .filter(|(_, (a, _))| *a == c)
                        .map(|(p, _)| p),
                )
                .unwrap_or(self.centroids[c])
            })
            .collect::<Vec<Features>>();
        (Self::from(centroids), loss)
    }
    fn neighborhood(&self, x: &Features) -> (usize, Energy) {
        self.centroids
            .iter()
            .map(|c| c.distance(x))
            .enumerate()
            .fold((0, Energy::INFINITY), |(i, best), (j, d)| {
                if d < best { (j, d) } else { (i, best) }
            })
    }
}
