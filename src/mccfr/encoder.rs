use super::info::Info;
use super::spot::Spot;
use crate::N;
use crate::cards::street::Street;
use crate::clustering::abstraction::Abstraction;
use crate::gameplay::deal::Deal;

/// maps spots of one sampled hand to information sets.
/// a bucket depends only on (player, street) within a deal,
/// so each is computed once and cached.
pub struct Encoder<'a> {
    abstraction: &'a Abstraction,
    deal: Deal,
    cache: [[Option<usize>; 4]; N],
}

impl<'a> Encoder<'a> {
    pub fn new(abstraction: &'a Abstraction, deal: Deal) -> Self {
        Self {
            abstraction,
            deal,
            cache: [[None; 4]; N],
        }
    }
    pub fn deal(&self) -> &Deal {
        &self.deal
    }
    pub fn bucket(&mut self, player: usize, street: Street) -> usize {
        let abstraction = self.abstraction;
        let deal = self.deal;
        *self.cache[player][street as usize]
            .get_or_insert_with(|| abstraction.bucket(&deal.observation(player, street)))
    }
    /// information set of whoever acts at this spot
    pub fn info(&mut self, spot: &Spot, player: usize) -> Info {
        let street = spot.game().street();
        let bucket = self.bucket(player, street);
        Info::new(player, street, bucket, spot.history())
    }
}
