//! Interactive session that routes parsed input through the editor and play systems.

use labyrinth_core::{Command, Event, GameMode};
use labyrinth_system_editor::{Editor, EditorInput};
use labyrinth_system_play::{ActorView, Play, PlayIntent};
use labyrinth_world::{apply, query, Config, World};
use tracing::debug;

use crate::{
    config::Settings,
    input::{Input, HELP},
    layout_transfer::LayoutSnapshot,
    render,
};

/// Owns the world and the pure systems for one terminal session.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    editor: Editor,
    play: Play,
    /// Layout as it stood when the current match started.
    match_layout: Option<LayoutSnapshot>,
}

impl Session {
    /// Creates a session and configures the initial board.
    pub(crate) fn new(settings: Settings) -> (Self, Vec<Event>) {
        let mut session = Self {
            world: World::with_config(Config::new(settings.starting_shots)),
            editor: Editor::new(),
            play: Play::new(),
            match_layout: None,
        };
        let events = session.submit([Command::ConfigureBoard {
            size: settings.board_size,
        }]);
        (session, events)
    }

    /// Applies a batch of commands and lets both systems observe the results.
    pub(crate) fn submit(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            let first = events.len();
            apply(&mut self.world, command, &mut events);
            let started = events[first..].contains(&Event::GameModeChanged {
                mode: GameMode::Play,
            });
            if started {
                self.match_layout = LayoutSnapshot::capture(&self.world);
            }
        }

        let mut follow_up = Vec::new();
        self.editor
            .handle(&events, EditorInput::default(), &mut follow_up);
        self.play.handle(
            &events,
            None,
            ActorView::new(None, 0),
            |_, _| None,
            &mut follow_up,
        );
        debug_assert!(follow_up.is_empty());

        events
    }

    /// Executes one line of input, returning the status lines to print.
    pub(crate) fn execute(&mut self, input: Input) -> Vec<String> {
        debug!(?input, "executing input");
        let commands = match input {
            Input::NewBoard(size) => vec![Command::ConfigureBoard { size }],
            Input::Clear => vec![Command::ClearEntities],
            Input::Mode(mode) => vec![Command::SetGameMode { mode }],
            Input::Wall(edge) => self.edit(EditorInput {
                hovered_edge: Some(edge),
                toggle_wall: true,
                ..EditorInput::default()
            }),
            Input::Tool(tool) => {
                let _ = self.edit(EditorInput {
                    select_tool: Some(tool),
                    ..EditorInput::default()
                });
                return vec![format!("Tool: {}", self.editor.tool())];
            }
            Input::Place(cell) => self.edit(EditorInput {
                cursor_cell: Some(cell),
                confirm_action: true,
                ..EditorInput::default()
            }),
            Input::Erase(cell) => self.edit(EditorInput {
                cursor_cell: Some(cell),
                erase_action: true,
                ..EditorInput::default()
            }),
            Input::Act(intent) => self.act(intent),
            Input::Show => return self.show(),
            Input::Export => return vec![self.export()],
            Input::Help => return vec![HELP.to_owned()],
            Input::Quit => return Vec::new(),
        };

        if commands.is_empty() {
            return vec![format!(
                "Nothing to do in {} mode",
                query::game_mode(&self.world)
            )];
        }

        let tool = self.editor.tool();
        let mut lines: Vec<String> = self
            .submit(commands)
            .iter()
            .map(ToString::to_string)
            .collect();
        if self.editor.tool() != tool {
            lines.push(format!("Next tool: {}", self.editor.tool()));
        }
        lines
    }

    /// Read access to the world for rendering and export.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    fn edit(&mut self, input: EditorInput) -> Vec<Command> {
        let mut commands = Vec::new();
        self.editor.handle(&[], input, &mut commands);
        commands
    }

    fn act(&mut self, intent: PlayIntent) -> Vec<Command> {
        let current = query::player(&self.world, query::current_player(&self.world));
        let actor = ActorView::new(current.cell, current.shots_left);
        let board = query::board(&self.world);
        let mut commands = Vec::new();
        self.play.handle(
            &[],
            Some(intent),
            actor,
            |cell, direction| board.and_then(|board| board.neighbor(cell, direction)),
            &mut commands,
        );
        commands
    }

    fn show(&self) -> Vec<String> {
        let world = &self.world;
        let mode = query::game_mode(world);
        let mut lines = vec![render::board(world), format!("Mode: {mode}")];
        match mode {
            GameMode::BuildMaze => {}
            GameMode::PlaceEntities => lines.push(format!("Tool: {}", self.editor.tool())),
            GameMode::Play => {
                if let Some(message) = query::game_over_message(world) {
                    lines.push(message);
                } else {
                    let player = query::player(world, query::current_player(world));
                    lines.push(format!(
                        "Turn: {} (shots {}){}",
                        player.id,
                        player.shots_left,
                        if player.has_key { " carrying KEY" } else { "" }
                    ));
                }
            }
        }
        lines
    }

    fn export(&self) -> String {
        let snapshot = match query::game_mode(&self.world) {
            GameMode::Play => self.match_layout.clone(),
            GameMode::BuildMaze | GameMode::PlaceEntities => LayoutSnapshot::capture(&self.world),
        };
        let Some(snapshot) = snapshot else {
            return "No board to export".to_owned();
        };
        match snapshot.encode() {
            Ok(encoded) => encoded,
            Err(error) => format!("Export failed: {error}"),
        }
    }
}
