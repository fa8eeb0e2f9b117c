use super::action::Action;
use super::config::GameConfig;
use super::deal::Deal;
use super::odds::Odds;
use super::seat::Seat;
use super::seat::State;
use super::settlement::Settlement;
use super::showdown::Showdown;
use super::turn::Turn;
use crate::Chips;
use crate::N;
use crate::Utility;
use crate::cards::street::Street;

type Position = usize;

/// Game represents the public betting state in between actions.
///
/// It holds no cards: private and public cards live in a Deal, so one
/// Game value can be shared across every hand an iteration samples.
/// Seat 0 posts the small blind and acts first preflop; seat 1 acts
/// first on later streets. Its immutable methods are pure functions of
/// the rules; this is the node type for both MCCFR and subgame trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Game {
    seats: [Seat; N],
    pot: Chips,
    street: Street,
    actor: Position,
    acted: u8,
    raises: u8,
    last: Chips,
    grid: u16,
    cap: u8,
    bblind: Chips,
}

impl Game {
    /// the first decision, after blinds are posted
    pub fn root(config: &GameConfig) -> Self {
        let mut game = Self {
            seats: [Seat::from(config.stack); N],
            pot: 0,
            street: Street::Pref,
            actor: 0,
            acted: 0,
            raises: 0,
            last: config.b_blind,
            grid: config.grid(),
            cap: config.max_raises as u8,
            bblind: config.b_blind,
        };
        game.post(0, config.s_blind);
        game.post(1, config.b_blind);
        game
    }
    pub fn apply(&self, action: Action) -> Self {
        debug_assert!(self.is_allowed(&action), "{} illegal at {}", action, self);
        let mut child = *self;
        child.act(action);
        child
    }
    /// deal the next street. cards come from the Deal
    pub fn reveal(&self) -> Self {
        assert!(self.turn() == Turn::Chance, "no cards to reveal");
        let mut child = *self;
        child.street = self.street.next();
        child.acted = 0;
        child.raises = 0;
        child.last = self.bblind;
        child.seats.iter_mut().for_each(Seat::reset_stake);
        child.actor = (1..=N)
            .map(|i| i % N)
            .find(|i| child.seats[*i].state() == State::Betting)
            .unwrap_or(1);
        child
    }

    pub fn pot(&self) -> Chips {
        self.pot
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn seat(&self, position: Position) -> &Seat {
        &self.seats[position]
    }
    pub fn actor(&self) -> &Seat {
        &self.seats[self.actor]
    }
    pub fn raises(&self) -> usize {
        self.raises as usize
    }
    pub fn turn(&self) -> Turn {
        if self.is_everyone_folding() {
            Turn::Terminal
        } else if self.is_everyone_alright() {
            match self.street {
                Street::Rive => Turn::Terminal,
                _ => Turn::Chance,
            }
        } else {
            Turn::Choice(self.actor)
        }
    }
    /// abstract actions available to the actor, never empty at a decision
    pub fn legal(&self) -> Vec<Action> {
        let mut options = Vec::new();
        if !matches!(self.turn(), Turn::Choice(_)) {
            return options;
        }
        if self.may_fold() {
            options.push(Action::Fold);
        }
        if self.may_check() {
            options.push(Action::Check);
        }
        if self.may_call() {
            options.push(Action::Call);
        }
        if self.may_raise() {
            options.extend(
                Odds::GRID
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| self.grid & (1 << i) != 0)
                    .map(|(_, odds)| *odds)
                    .filter(|odds| self.is_sized(*odds))
                    .map(Action::Bet),
            );
            options.push(Action::Shove);
        }
        assert!(!options.is_empty());
        options
    }
    pub fn is_allowed(&self, action: &Action) -> bool {
        self.legal().contains(action)
    }

    /// chips committed by an action
    pub fn to_bet(&self, action: &Action) -> Chips {
        match action {
            Action::Fold | Action::Check => 0,
            Action::Call => self.to_call().min(self.to_shove()),
            Action::Shove => self.to_shove(),
            Action::Bet(odds) => self.to_call().saturating_add(odds.of(self.pot + self.to_call())),
        }
    }
    pub fn to_call(&self) -> Chips {
        self.effective_stake() - self.actor().stake()
    }
    pub fn to_shove(&self) -> Chips {
        self.actor().stack()
    }
    /// smallest legal raise increment over a call
    pub fn to_raise(&self) -> Chips {
        self.last.max(self.bblind)
    }

    /// net chips won or lost by each seat at a terminal node
    pub fn settlements(&self, deal: &Deal) -> Vec<Settlement> {
        assert!(self.turn() == Turn::Terminal, "non terminal game state: {}", self);
        let showdown = self.street == Street::Rive && !self.is_everyone_folding();
        let ledger = self
            .seats
            .iter()
            .enumerate()
            .map(|(i, seat)| {
                Settlement::from((
                    seat.spent(),
                    seat.state(),
                    showdown.then(|| deal.strength(i)),
                ))
            })
            .collect::<Vec<_>>();
        Showdown::from(ledger).settle()
    }
    /// terminal payoff from one seat's perspective
    pub fn payoff(&self, deal: &Deal, position: Position) -> Utility {
        self.settlements(deal)[position].pnl() as Utility
    }

    fn act(&mut self, action: Action) {
        match action {
            Action::Fold => self.seats[self.actor].fold(),
            Action::Check => {}
            Action::Call => self.bet(self.to_bet(&action)),
            Action::Bet(_) | Action::Shove => {
                let bet = self.to_bet(&action);
                let raise = bet - self.to_call();
                self.last = self.last.max(raise);
                self.raises += 1;
                self.bet(bet);
            }
        }
        self.acted += 1;
        self.actor = (self.actor + 1) % N;
    }
    fn post(&mut self, position: Position, blind: Chips) {
        let blind = blind.min(self.seats[position].stack());
        self.pot += blind;
        self.seats[position].bet(blind);
    }
    fn bet(&mut self, bet: Chips) {
        self.pot += bet;
        self.seats[self.actor].bet(bet);
    }

    /// the street's betting is closed
    fn is_everyone_alright(&self) -> bool {
        self.is_everyone_matched() && (self.is_everyone_touched() || self.n_betting() <= 1)
    }
    /// every seat still able to bet has acted this street
    fn is_everyone_touched(&self) -> bool {
        self.acted as usize >= self.n_betting()
    }
    /// every seat still able to bet is in for the largest stake
    fn is_everyone_matched(&self) -> bool {
        let stake = self.effective_stake();
        self.seats
            .iter()
            .filter(|s| s.state() == State::Betting)
            .all(|s| s.stake() == stake)
    }
    /// exactly one seat has not folded
    fn is_everyone_folding(&self) -> bool {
        self.seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .count()
            == 1
    }
    fn n_betting(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() == State::Betting)
            .count()
    }

    fn may_fold(&self) -> bool {
        self.to_call() > 0
    }
    fn may_check(&self) -> bool {
        self.to_call() == 0
    }
    fn may_call(&self) -> bool {
        self.to_call() > 0
    }
    /// room under the cap, chips beyond a call, and someone to raise against
    fn may_raise(&self) -> bool {
        self.raises < self.cap
            && self.to_shove() > self.to_call()
            && self
                .seats
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != self.actor)
                .any(|(_, s)| s.state() == State::Betting)
    }
    fn is_sized(&self, odds: Odds) -> bool {
        let bet = self.to_bet(&Action::Bet(odds));
        bet - self.to_call() >= self.to_raise() && bet < self.to_shove()
    }
    fn effective_stake(&self) -> Chips {
        self.seats
            .iter()
            .map(|s| s.stake())
            .max()
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for seat in self.seats.iter() {
            write!(f, "{}", seat)?;
        }
        write!(f, " @ {:>6} {}", self.pot, self.street)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn root() -> Game {
        Game::root(&GameConfig::default())
    }

    #[test]
    fn blinds_posted() {
        let game = root();
        assert_eq!(game.pot(), 3);
        assert_eq!(game.street(), Street::Pref);
        assert_eq!(game.turn(), Turn::Choice(0));
        assert_eq!(game.to_call(), 1);
    }

    #[test]
    fn fold_and_check_are_exclusive() {
        let game = root();
        let legal = game.legal();
        assert!(legal.contains(&Action::Fold));
        assert!(!legal.contains(&Action::Check));
        let game = game.apply(Action::Call);
        let legal = game.legal();
        assert!(legal.contains(&Action::Check));
        assert!(!legal.contains(&Action::Fold));
    }

    #[test]
    fn limp_check_deals_flop() {
        let game = root().apply(Action::Call);
        assert_eq!(game.turn(), Turn::Choice(1));
        let game = game.apply(Action::Check);
        assert_eq!(game.turn(), Turn::Chance);
        let game = game.reveal();
        assert_eq!(game.street(), Street::Flop);
        assert_eq!(game.turn(), Turn::Choice(1));
        assert_eq!(game.pot(), 4);
    }

    #[test]
    fn fold_ends_hand() {
        let ref mut rng = SmallRng::seed_from_u64(0);
        let deal = Deal::random(rng);
        let game = root().apply(Action::Fold);
        assert_eq!(game.turn(), Turn::Terminal);
        assert_eq!(game.payoff(&deal, 0), -1.);
        assert_eq!(game.payoff(&deal, 1), 1.);
    }

    #[test]
    fn pot_sized_raise() {
        let game = root();
        // call 1 into a pot of 4, then raise 4
        assert_eq!(game.to_bet(&Action::Bet(Odds(1, 1))), 5);
        let game = game.apply(Action::Bet(Odds(1, 1)));
        assert_eq!(game.pot(), 8);
        assert_eq!(game.to_call(), 4);
    }

    #[test]
    fn raise_cap_removes_aggression() {
        let mut game = root();
        for _ in 0..GameConfig::default().max_raises {
            game = game.apply(Action::Bet(Odds(1, 2)));
        }
        assert!(game.legal().iter().all(|a| !a.is_aggro()));
    }

    #[test]
    fn all_in_runs_out_board() {
        let game = root().apply(Action::Shove).apply(Action::Call);
        assert_eq!(game.turn(), Turn::Chance);
        let game = game.reveal().reveal();
        assert_eq!(game.turn(), Turn::Chance);
        let game = game.reveal();
        assert_eq!(game.street(), Street::Rive);
        assert_eq!(game.turn(), Turn::Terminal);
    }

    #[test]
    fn zero_sum_settlement() {
        let ref mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..32 {
            let deal = Deal::random(rng);
            let game = root().apply(Action::Shove).apply(Action::Call);
            let game = game.reveal().reveal().reveal();
            let total = (0..N).map(|p| game.payoff(&deal, p)).sum::<Utility>();
            assert_eq!(total, 0.);
        }
    }

    #[test]
    fn legal_sets_never_empty() {
        let ref mut rng = SmallRng::seed_from_u64(9);
        use rand::prelude::IndexedRandom;
        for _ in 0..256 {
            let mut game = root();
            loop {
                match game.turn() {
                    Turn::Terminal => break,
                    Turn::Chance => game = game.reveal(),
                    Turn::Choice(_) => {
                        let legal = game.legal();
                        assert!(!legal.is_empty());
                        assert!(legal.contains(&Action::Fold) != legal.contains(&Action::Check));
                        game = game.apply(*legal.choose(rng).unwrap());
                    }
                }
            }
        }
    }
}
