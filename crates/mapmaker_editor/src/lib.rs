//! Editing session for mapmaker
//!
//! Ties the sparse grid, the autotile resolver, free objects and the camera
//! origin together behind one [`EditorSession`]. The session is a Bevy
//! `Resource`, so an app can insert it and drive it from input systems:
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use mapmaker_core::ItemCatalog;
//! use mapmaker_editor::{EditCommand, EditorSession, EditorSettings};
//!
//! fn setup(mut commands: Commands) {
//!     let settings = EditorSettings::load();
//!     let session = EditorSession::new(settings, ItemCatalog::standard())
//!         .expect("stock catalog");
//!     commands.insert_resource(session);
//! }
//!
//! fn paint(mut session: ResMut<EditorSession>, time: Res<Time>) {
//!     session.apply(EditCommand::Tick(time.delta())).ok();
//! }
//! ```

mod commands;
mod cooldown;
mod session;
mod settings;

pub use commands::{CommandOutcome, EditCommand};
pub use cooldown::PlacementCooldown;
pub use session::{EditorSession, EraseOutcome, PaintOutcome, DEFAULT_SELECTION};
pub use settings::{EditorSettings, SettingsError};
