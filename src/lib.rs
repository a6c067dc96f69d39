//! This crate provides the engine of a calendar task board.
//!
//! Tasks are grouped by day in a [`TaskStore`]. They can be created, edited, deleted, reordered within a day,
//! or moved to another day, either directly or through a drag-and-drop gesture (see the [`drag`] module). \
//! The displayed days are computed by the [`range`] module, for a month or a week view.
//!
//! A [`Board`] puts everything together: it owns the store, persists it after each mutation
//! (see the [`storage`] module), and lays public holidays over the displayed days (see the [`client`] module).

pub mod traits;
pub mod config;

mod day;
pub use day::DayId;
mod task;
pub use task::{Label, Task, TaskId};
pub mod store;
pub use store::TaskStore;
pub mod engine;
pub mod labels;
pub mod search;
pub use search::SearchFilter;
pub mod range;
pub use range::ViewMode;
pub mod holiday;
pub use holiday::Holiday;
pub mod cell;
pub use cell::DayCell;
pub mod drag;
pub mod board;
pub use board::Board;

pub mod client;
pub mod storage;
pub mod mock_behaviour;
pub mod utils;
