//! Parsing of the line-oriented text commands read from stdin.

use labyrinth_core::{CellCoord, Direction, Edge, GameMode, PlacementTool};
use labyrinth_system_play::PlayIntent;
use thiserror::Error;

/// Help text printed by the `help` command.
pub(crate) const HELP: &str = "\
editor:  new N | clear | walls | place | wall v|h X Y | tool NAME | at X Y | erase X Y
play:    play | w a s d (or up down left right) | shoot DIR | knife [DIR] | skip
session: show | export | help | quit
tools:   KEY EXIT HOSPITAL MINOTAUR PLAYER_1 PLAYER_2 PORTAL_PAIR PORTAL_CYCLE3";

/// One parsed line of user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    NewBoard(u32),
    Clear,
    Mode(GameMode),
    Wall(Edge),
    Tool(PlacementTool),
    Place(CellCoord),
    Erase(CellCoord),
    Act(PlayIntent),
    Show,
    Export,
    Help,
    Quit,
}

/// Reasons a line could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum InputError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown direction '{0}'")]
    Direction(String),
    #[error("unknown tool '{0}'")]
    Tool(String),
}

/// Parses a line, returning `None` for blank lines and comments.
pub(crate) fn parse(line: &str) -> Result<Option<Input>, InputError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    if head.starts_with('#') {
        return Ok(None);
    }
    let args: Vec<&str> = words.collect();
    let command = head.to_ascii_lowercase();

    let input = match (command.as_str(), args.as_slice()) {
        ("new", [size]) => Input::NewBoard(number(size, "new N")?),
        ("new", _) => return Err(InputError::Usage("new N")),
        ("clear", []) => Input::Clear,
        ("walls", []) => Input::Mode(GameMode::BuildMaze),
        ("place", []) => Input::Mode(GameMode::PlaceEntities),
        ("play", []) => Input::Mode(GameMode::Play),
        ("wall", [orientation, column, row]) => {
            const USAGE: &str = "wall v|h X Y";
            let column = number(column, USAGE)?;
            let row = number(row, USAGE)?;
            match orientation.to_ascii_lowercase().as_str() {
                "v" | "vertical" => Input::Wall(Edge::vertical(column, row)),
                "h" | "horizontal" => Input::Wall(Edge::horizontal(column, row)),
                _ => return Err(InputError::Usage(USAGE)),
            }
        }
        ("wall", _) => return Err(InputError::Usage("wall v|h X Y")),
        ("tool", [name]) => Input::Tool(tool(name)?),
        ("tool", _) => return Err(InputError::Usage("tool NAME")),
        ("at", [column, row]) => Input::Place(cell(column, row, "at X Y")?),
        ("at", _) => return Err(InputError::Usage("at X Y")),
        ("erase", [column, row]) => Input::Erase(cell(column, row, "erase X Y")?),
        ("erase", _) => return Err(InputError::Usage("erase X Y")),
        ("shoot", [heading]) => Input::Act(PlayIntent::Shoot(direction(heading)?)),
        ("shoot", _) => return Err(InputError::Usage("shoot DIR")),
        ("knife", []) => Input::Act(PlayIntent::KnifeOwnCell),
        ("knife", [heading]) => Input::Act(PlayIntent::KnifeAdjacent(direction(heading)?)),
        ("skip", []) => Input::Act(PlayIntent::Skip),
        ("show", []) => Input::Show,
        ("export", []) => Input::Export,
        ("help" | "?", _) => Input::Help,
        ("quit" | "exit" | "q", []) => Input::Quit,
        (word, []) => match direction(word) {
            Ok(heading) => Input::Act(PlayIntent::Step(heading)),
            Err(_) => return Err(InputError::Unknown(head.to_owned())),
        },
        _ => return Err(InputError::Unknown(head.to_owned())),
    };

    Ok(Some(input))
}

fn number(word: &str, usage: &'static str) -> Result<u32, InputError> {
    word.parse().map_err(|_| InputError::Usage(usage))
}

fn cell(column: &str, row: &str, usage: &'static str) -> Result<CellCoord, InputError> {
    Ok(CellCoord::new(number(column, usage)?, number(row, usage)?))
}

fn direction(word: &str) -> Result<Direction, InputError> {
    match word.to_ascii_lowercase().as_str() {
        "w" | "up" => Ok(Direction::Up),
        "s" | "down" => Ok(Direction::Down),
        "a" | "left" => Ok(Direction::Left),
        "d" | "right" => Ok(Direction::Right),
        _ => Err(InputError::Direction(word.to_owned())),
    }
}

fn tool(name: &str) -> Result<PlacementTool, InputError> {
    let alias = match name.to_ascii_lowercase().as_str() {
        "p1" => Some(PlacementTool::PlayerOne),
        "p2" => Some(PlacementTool::PlayerTwo),
        "pair" => Some(PlacementTool::PortalPair),
        "cycle" => Some(PlacementTool::PortalCycle),
        _ => None,
    };
    alias
        .or_else(|| {
            PlacementTool::ALL
                .into_iter()
                .find(|tool| tool.to_string().eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| InputError::Tool(name.to_owned()))
}
