//! The drag-and-drop gesture, as an explicit state machine
//!
//! A single pointer can only drag one task card at a time. A drag starts on a card, may hover over day cells,
//! and ends either with a drop (which moves or reorders tasks) or with a cancellation (which changes nothing).

use std::fmt::{Display, Formatter};

use crate::day::DayId;
use crate::store::TaskStore;
use crate::task::TaskId;


/// The committed state of the gesture
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    Idle,
    Dragging { task: TaskId, source: DayId },
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle
    }
}

/// What the user interface reports about the gesture
#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// A task card starts being dragged from its day cell
    Start { task: TaskId, source: DayId },
    /// The dragged card hovers over a day cell
    Over(DayId),
    /// The dragged card leaves the cell it was hovering
    Leave,
    /// The card is dropped onto a day cell
    Drop(DayId),
    /// The card is dropped onto another task card
    DropOnTask { day: DayId, target: TaskId },
    /// The card is dropped somewhere that is not a valid target
    DropOutside,
    /// The gesture is aborted, or ends without any drop
    Cancel,
}

/// What handling an event resulted in
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
    /// The event made no sense in the current state
    Ignored,
    Started,
    Hovering(Option<DayId>),
    /// The task has been moved to the end of another day
    Moved { task: TaskId, source: DayId, target: DayId },
    /// The tasks of a day have been reordered
    Reordered(DayId),
    /// The gesture ended without changing any task
    Cancelled,
}

impl DragOutcome {
    /// Whether the task store has been modified
    pub fn is_mutation(&self) -> bool {
        match self {
            DragOutcome::Moved{..} | DragOutcome::Reordered(_) => true,
            _ => false,
        }
    }
}

impl Display for DragOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DragOutcome::Ignored => write!(f, "ignored"),
            DragOutcome::Started => write!(f, "drag started"),
            DragOutcome::Hovering(Some(day)) => write!(f, "hovering {}", day),
            DragOutcome::Hovering(None) => write!(f, "hovering nothing"),
            DragOutcome::Moved{task, source, target} => write!(f, "moved {} from {} to {}", task, source, target),
            DragOutcome::Reordered(day) => write!(f, "reordered {}", day),
            DragOutcome::Cancelled => write!(f, "drag cancelled"),
        }
    }
}


/// A drag-and-drop session.
///
/// `drag_over` only tracks which cell should be highlighted. It is not part of the committed state,
/// and is cleared whenever the gesture ends.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragSession {
    state: DragState,
    drag_over: Option<DayId>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState        { &self.state }
    pub fn drag_over(&self) -> Option<&DayId> { self.drag_over.as_ref() }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    /// Apply an event to this session, and the drop it may result in to `store`
    pub fn handle(&mut self, event: DragEvent, store: &mut TaskStore) -> DragOutcome {
        let dragging = match &self.state {
            DragState::Idle => None,
            DragState::Dragging{ task, source } => Some((task.clone(), *source)),
        };

        match (event, dragging) {
            (DragEvent::Start{ task, source }, None) => {
                if store.get_task(&source, &task).is_none() {
                    log::warn!("Not dragging task {}: it is not on {}", task, source);
                    return DragOutcome::Ignored;
                }
                log::debug!("Start dragging task {} from {}", task, source);
                self.state = DragState::Dragging{ task, source };
                self.drag_over = None;
                DragOutcome::Started
            },
            (DragEvent::Start{ task, .. }, Some((current, _))) => {
                log::warn!("Not dragging task {}: task {} is already being dragged", task, current);
                DragOutcome::Ignored
            },

            (DragEvent::Over(day), Some(_)) => {
                self.drag_over = Some(day);
                DragOutcome::Hovering(Some(day))
            },
            (DragEvent::Leave, Some(_)) => {
                self.drag_over = None;
                DragOutcome::Hovering(None)
            },

            (DragEvent::Drop(target), Some((task, source))) => {
                self.finish();
                if source == target {
                    return DragOutcome::Cancelled;
                }
                match store.move_task(&task, &source, &target) {
                    true => DragOutcome::Moved{ task, source, target },
                    false => DragOutcome::Cancelled,
                }
            },
            (DragEvent::DropOnTask{ day, target }, Some((task, source))) => {
                self.finish();
                if day == source {
                    match store.move_within_day(&day, &task, &target) {
                        true => DragOutcome::Reordered(day),
                        false => DragOutcome::Cancelled,
                    }
                } else {
                    match store.move_task(&task, &source, &day) {
                        true => DragOutcome::Moved{ task, source, target: day },
                        false => DragOutcome::Cancelled,
                    }
                }
            },
            (DragEvent::DropOutside, Some(_)) | (DragEvent::Cancel, Some(_)) => {
                self.finish();
                DragOutcome::Cancelled
            },

            (_, None) => {
                // Stray events (e.g. the end of a gesture that has already been dropped)
                self.drag_over = None;
                DragOutcome::Ignored
            },
        }
    }

    fn finish(&mut self) {
        self.state = DragState::Idle;
        self.drag_over = None;
    }
}
