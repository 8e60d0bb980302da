#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod element;
pub mod error;
pub mod geometry;
pub mod input;
pub mod operations;
pub mod selection;
pub mod slot_set;
pub mod state;

pub use command::{Command, UndoHistory};
pub use config::EditorConfig;
pub use dispatcher::EventDispatcher;
pub use element::{EditorElement, Element};
pub use error::{EditorError, EditorResult};
pub use geometry::Polygon;
pub use input::{EventKind, ModifierFlags, PointerEvent};
pub use operations::{Operation, OperationType};
pub use selection::PickSet;
pub use slot_set::SlotSet;
pub use state::{EditState, EditorContext};
