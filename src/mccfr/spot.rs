use super::history::History;
use crate::gameplay::action::Action;
use crate::gameplay::config::GameConfig;
use crate::gameplay::game::Game;
use crate::gameplay::table::Table;
use crate::gameplay::turn::Turn;

/// a public betting state together with the abstract path that reached it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spot {
    game: Game,
    history: History,
}

impl Spot {
    pub fn root(config: &GameConfig) -> Self {
        Self {
            game: Game::root(config),
            history: History::default(),
        }
    }
    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn history(&self) -> History {
        self.history
    }
    pub fn turn(&self) -> Turn {
        self.game.turn()
    }
    pub fn legal(&self) -> Vec<Action> {
        self.game.legal()
    }
    pub fn apply(&self, action: Action) -> Self {
        Self {
            game: self.game.apply(action),
            history: self.history.push(action),
        }
    }
    pub fn reveal(&self) -> Self {
        Self {
            game: self.game.reveal(),
            history: self.history.deal(),
        }
    }

    /// replay an action history and confirm the result matches the table
    pub fn replay(config: &GameConfig, table: &Table, history: &[Action]) -> crate::Result<Self> {
        let spot = Self::follow(config, history)?;
        table.check(&spot.game)?;
        Ok(spot)
    }

    /// replay an action history from the root, dealing streets as the
    /// rules require
    pub fn follow(config: &GameConfig, history: &[Action]) -> crate::Result<Self> {
        let mut spot = Self::root(config);
        for action in history.iter() {
            spot = spot.settle();
            if !spot.game.is_allowed(action) {
                return Err(crate::Error::Build(format!(
                    "{} is not legal after {}",
                    action, spot.history
                )));
            }
            spot = spot.apply(*action);
        }
        Ok(spot.settle())
    }

    /// deal streets until someone must act or the hand ends
    fn settle(self) -> Self {
        let mut spot = self;
        while spot.turn() == Turn::Chance {
            spot = spot.reveal();
        }
        spot
    }
}
