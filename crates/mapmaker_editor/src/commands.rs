//! Editing commands applied to a session one at a time
//!
//! The input layer translates pointer, wheel and keyboard events into
//! [`EditCommand`]s; the session applies each one and reports what changed.

use crate::{EditorSession, EraseOutcome, PaintOutcome};
use bevy::log::trace;
use mapmaker_core::{ItemId, MapError, Vec2};
use std::time::Duration;
use uuid::Uuid;

/// A single editing action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    /// Primary button held at a pointer position
    Paint(Vec2),
    /// Secondary button held at a pointer position
    Erase(Vec2),
    /// Primary button released
    EndStroke,
    BeginDrag(Vec2),
    DragTo(Vec2),
    EndDrag,
    BeginPan(Vec2),
    DragPan(Vec2),
    EndPan,
    /// Mouse wheel; `vertical` when the modifier key is held
    Scroll { wheel: f32, vertical: bool },
    Select(ItemId),
    SelectNext,
    SelectPrevious,
    /// Frame time elapsed
    Tick(Duration),
}

impl EditCommand {
    /// Short human-readable name
    pub fn description(&self) -> &'static str {
        match self {
            EditCommand::Paint(_) => "Paint",
            EditCommand::Erase(_) => "Erase",
            EditCommand::EndStroke => "End stroke",
            EditCommand::BeginDrag(_) => "Begin drag",
            EditCommand::DragTo(_) => "Drag",
            EditCommand::EndDrag => "End drag",
            EditCommand::BeginPan(_) => "Begin pan",
            EditCommand::DragPan(_) => "Pan",
            EditCommand::EndPan => "End pan",
            EditCommand::Scroll { .. } => "Scroll",
            EditCommand::Select(_) | EditCommand::SelectNext | EditCommand::SelectPrevious => {
                "Select"
            }
            EditCommand::Tick(_) => "Tick",
        }
    }
}

/// What applying a command did
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Painted(PaintOutcome),
    Erased(EraseOutcome),
    DragStarted(Option<Uuid>),
    /// Number of objects dropped
    Released(usize),
    /// Whether the origin moved
    Panned(bool),
    Selected(ItemId),
    /// Command applied with nothing further to report
    Done,
}

impl EditorSession {
    /// Apply one command
    pub fn apply(&mut self, command: EditCommand) -> Result<CommandOutcome, MapError> {
        trace!("Applying command: {}", command.description());
        let outcome = match command {
            EditCommand::Paint(pointer) => CommandOutcome::Painted(self.paint_at(pointer)?),
            EditCommand::Erase(pointer) => CommandOutcome::Erased(self.erase_at(pointer)?),
            EditCommand::EndStroke => {
                self.end_stroke();
                CommandOutcome::Done
            }
            EditCommand::BeginDrag(pointer) => CommandOutcome::DragStarted(self.begin_drag(pointer)?),
            EditCommand::DragTo(pointer) => {
                self.drag_to(pointer);
                CommandOutcome::Done
            }
            EditCommand::EndDrag => CommandOutcome::Released(self.end_drag()),
            EditCommand::BeginPan(pointer) => {
                self.begin_pan(pointer);
                CommandOutcome::Done
            }
            EditCommand::DragPan(pointer) => CommandOutcome::Panned(self.drag_pan(pointer)),
            EditCommand::EndPan => {
                self.end_pan();
                CommandOutcome::Done
            }
            EditCommand::Scroll { wheel, vertical } => {
                self.scroll(wheel, vertical);
                CommandOutcome::Panned(wheel != 0.0)
            }
            EditCommand::Select(item_id) => {
                self.select(item_id)?;
                CommandOutcome::Selected(item_id)
            }
            EditCommand::SelectNext => CommandOutcome::Selected(self.select_next()),
            EditCommand::SelectPrevious => CommandOutcome::Selected(self.select_previous()),
            EditCommand::Tick(delta) => {
                self.tick(delta);
                CommandOutcome::Done
            }
        };
        Ok(outcome)
    }

    /// Apply commands in order, stopping at the first error
    pub fn apply_all<I>(&mut self, commands: I) -> Result<Vec<CommandOutcome>, MapError>
    where
        I: IntoIterator<Item = EditCommand>,
    {
        commands.into_iter().map(|c| self.apply(c)).collect()
    }
}
