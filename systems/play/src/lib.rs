#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns player intents into rule-engine command sequences.

use labyrinth_core::{
    CellCoord, Command, Direction, Event, GameMode, KnifeReach, SkipReason,
};

/// Action requested by the player whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayIntent {
    /// Step one cell in the direction.
    Step(Direction),
    /// Fire a straight-line shot in the direction.
    Shoot(Direction),
    /// Stab whatever shares the actor's cell.
    KnifeOwnCell,
    /// Stab the neighbouring cell in the direction.
    KnifeAdjacent(Direction),
    /// Pass the turn.
    Skip,
}

/// Minimal view of the acting player required to translate intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActorView {
    /// Cell occupied by the actor, `None` while unplaced.
    pub cell: Option<CellCoord>,
    /// Shots the actor has left.
    pub shots_left: u32,
}

impl ActorView {
    /// Creates a new actor view.
    #[must_use]
    pub const fn new(cell: Option<CellCoord>, shots_left: u32) -> Self {
        Self { cell, shots_left }
    }
}

/// Play system that emits commands only while the world is in play mode.
#[derive(Debug)]
pub struct Play {
    mode: GameMode,
    scratch: Vec<Command>,
}

impl Default for Play {
    fn default() -> Self {
        Self::new()
    }
}

impl Play {
    /// Creates a play system that waits for the world to enter play mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: GameMode::BuildMaze,
            scratch: Vec::new(),
        }
    }

    /// Reports whether the system currently translates intents.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode == GameMode::Play
    }

    /// Consumes world events and the player's intent to emit rule commands.
    ///
    /// The `neighbor` closure should mirror the board's `neighbor` query: it
    /// returns the adjacent cell when no wall or border blocks the step.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        intent: Option<PlayIntent>,
        actor: ActorView,
        mut neighbor: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord, Direction) -> Option<CellCoord>,
    {
        for event in events {
            if let Event::GameModeChanged { mode } = event {
                self.mode = *mode;
            }
        }

        if !self.is_active() {
            return;
        }
        let (Some(intent), Some(cell)) = (intent, actor.cell) else {
            return;
        };

        self.scratch.clear();
        match intent {
            PlayIntent::Skip => self.scratch.push(Command::SkipTurn {
                reason: SkipReason::Voluntary,
            }),
            PlayIntent::Step(direction) => self.scratch.push(Command::Move { direction }),
            PlayIntent::Shoot(direction) => {
                self.scratch.push(Command::Shoot { direction });
                if actor.shots_left > 0 {
                    self.scratch.push(Command::EndTurn);
                }
            }
            PlayIntent::KnifeOwnCell => {
                self.scratch.push(Command::Knife {
                    target: cell,
                    reach: KnifeReach::OwnCell,
                });
                self.scratch.push(Command::EndTurn);
            }
            PlayIntent::KnifeAdjacent(direction) => match neighbor(cell, direction) {
                Some(target) => {
                    self.scratch.push(Command::Knife {
                        target,
                        reach: KnifeReach::Adjacent,
                    });
                    self.scratch.push(Command::EndTurn);
                }
                None => self.scratch.push(Command::SkipTurn {
                    reason: SkipReason::KnifeBlocked,
                }),
            },
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
