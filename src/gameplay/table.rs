use super::game::Game;
use super::seat::State;
use super::turn::Turn;
use crate::Chips;
use crate::N;
use crate::cards::board::Board;
use crate::cards::street::Street;

/// the table as reported by the recognition layer: public cards and
/// chips as they stand at the current decision. the action sequence that
/// led here travels separately and is checked against this snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub street: Street,
    pub pot: Chips,
    pub board: Board,
    pub stacks: [Chips; N],
    pub committed: [Chips; N],
    pub folded: [bool; N],
    pub actor: usize,
}

impl Table {
    /// describe a replayed game, for collaborators and tests
    pub fn observe(game: &Game, board: Board) -> Self {
        Self {
            street: game.street(),
            pot: game.pot(),
            board,
            stacks: std::array::from_fn(|i| game.seat(i).stack()),
            committed: std::array::from_fn(|i| game.seat(i).stake()),
            folded: std::array::from_fn(|i| game.seat(i).state() == State::Folding),
            actor: match game.turn() {
                Turn::Choice(p) => p,
                _ => 0,
            },
        }
    }

    /// reject a replayed game that disagrees with what the table shows
    pub fn check(&self, game: &Game) -> crate::Result<()> {
        let fail = |what: &str| Err(crate::Error::Build(format!("table {} disagrees with history", what)));
        if self.board.street() != self.street {
            return fail("board");
        }
        if game.street() != self.street {
            return fail("street");
        }
        if game.pot() != self.pot {
            return fail("pot");
        }
        if game.turn() != Turn::Choice(self.actor) {
            return fail("actor");
        }
        for i in 0..N {
            let seat = game.seat(i);
            if seat.stack() != self.stacks[i] || seat.stake() != self.committed[i] {
                return fail("chips");
            }
            if (seat.state() == State::Folding) != self.folded[i] {
                return fail("folds");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::action::Action;
    use crate::gameplay::config::GameConfig;

    #[test]
    fn observed_table_checks() {
        let game = Game::root(&GameConfig::default()).apply(Action::Call);
        let table = Table::observe(&game, Board::empty());
        assert!(table.check(&game).is_ok());
    }

    #[test]
    fn mismatched_pot_fails() {
        let game = Game::root(&GameConfig::default());
        let mut table = Table::observe(&game, Board::empty());
        table.pot += 1;
        assert!(matches!(table.check(&game), Err(crate::Error::Build(_))));
    }
}
