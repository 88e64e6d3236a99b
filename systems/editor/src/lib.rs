#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editor system translating maze-building input into placement commands.

use labyrinth_core::{CellCoord, Command, Edge, Event, GameMode, PlacementTool};

/// Input snapshot distilled from adapter-provided editor input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorInput {
    /// Edge currently targeted by the pointer while building walls.
    pub hovered_edge: Option<Edge>,
    /// Indicates whether the player asked to flip the hovered wall.
    pub toggle_wall: bool,
    /// Cell currently targeted while placing entities.
    pub cursor_cell: Option<CellCoord>,
    /// Indicates whether the player confirmed a placement with the active tool.
    pub confirm_action: bool,
    /// Indicates whether the player asked to erase the targeted cell.
    pub erase_action: bool,
    /// Tool explicitly selected by the player.
    pub select_tool: Option<PlacementTool>,
}

/// Editor system that tracks the active mode and placement tool.
#[derive(Clone, Debug)]
pub struct Editor {
    mode: GameMode,
    tool: PlacementTool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates an editor in wall-building mode with the first tool selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: GameMode::BuildMaze,
            tool: PlacementTool::Key,
        }
    }

    /// Tool that the next confirmed placement will use.
    #[must_use]
    pub const fn tool(&self) -> PlacementTool {
        self.tool
    }

    /// Mode last announced by the world.
    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// Consumes world events and adapter input to emit editor commands.
    ///
    /// A successful placement with the active tool advances it to the next
    /// tool before the new input is considered.
    pub fn handle(&mut self, events: &[Event], input: EditorInput, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::GameModeChanged { mode } => self.mode = *mode,
                Event::EntityPlaced { tool, .. } => self.advance_after(*tool),
                Event::PortalPlaced { portal, .. } => self.advance_after(portal.topology.tool()),
                _ => {}
            }
        }

        if let Some(tool) = input.select_tool {
            self.tool = tool;
        }

        match self.mode {
            GameMode::BuildMaze => {
                if input.toggle_wall {
                    if let Some(edge) = input.hovered_edge {
                        out.push(Command::ToggleWall { edge });
                    }
                }
            }
            GameMode::PlaceEntities => {
                let Some(cell) = input.cursor_cell else {
                    return;
                };
                if input.erase_action {
                    out.push(Command::Erase { cell });
                } else if input.confirm_action {
                    out.push(Command::Place {
                        tool: self.tool,
                        cell,
                    });
                }
            }
            GameMode::Play => {}
        }
    }

    fn advance_after(&mut self, placed: PlacementTool) {
        if placed == self.tool {
            self.tool = self.tool.next();
        }
    }
}
