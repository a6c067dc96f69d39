//! The task store: every task, grouped by day
//!
//! Within a day, tasks are kept in display order, and their `position` always matches their index in the list.
//! Days that have no task are not stored.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Formatter;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::day::DayId;
use crate::task::{Label, Task, TaskId};


#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    #[serde(deserialize_with = "deserialize_days")]
    days: BTreeMap<DayId, Vec<Task>>,
}

/// Same as the default map deserialization, except that a day that is listed twice is an error, rather than silently overwritten
fn deserialize_days<'de, D>(deserializer: D) -> Result<BTreeMap<DayId, Vec<Task>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DaysVisitor;

    impl<'de> Visitor<'de> for DaysVisitor {
        type Value = BTreeMap<DayId, Vec<Task>>;

        fn expecting(&self, f: &mut Formatter) -> std::fmt::Result {
            write!(f, "a map of days to task lists")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut days = BTreeMap::new();
            while let Some((day, tasks)) = access.next_entry::<DayId, Vec<Task>>()? {
                if days.insert(day, tasks).is_some() {
                    return Err(serde::de::Error::custom(format!("day {} is listed more than once", day)));
                }
            }
            Ok(days)
        }
    }

    deserializer.deserialize_map(DaysVisitor)
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The total number of tasks, across every day
    pub fn task_count(&self) -> usize {
        self.days.values().map(|tasks| tasks.len()).sum()
    }

    /// Iterates over the days that have tasks, in chronological order
    pub fn days(&self) -> impl Iterator<Item = (&DayId, &[Task])> {
        self.days.iter().map(|(day, tasks)| (day, tasks.as_slice()))
    }

    pub fn contains_day(&self, day: &DayId) -> bool {
        self.days.contains_key(day)
    }

    /// The tasks of a day, in display order
    pub fn tasks_on(&self, day: &DayId) -> &[Task] {
        match self.days.get(day) {
            Some(tasks) => tasks,
            None => &[],
        }
    }

    pub fn task_ids_on(&self, day: &DayId) -> Vec<TaskId> {
        self.tasks_on(day).iter().map(|t| t.id().clone()).collect()
    }

    pub fn get_task(&self, day: &DayId, id: &TaskId) -> Option<&Task> {
        self.tasks_on(day).iter().find(|t| t.id() == id)
    }

    /// Looks for a task on every day
    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.days.values().flatten().find(|t| t.id() == id)
    }

    /// Create a task at the end of a day.
    ///
    /// The text is trimmed. Returns `None` (and creates nothing) in case it is empty
    pub fn add_task(&mut self, text: &str, day: DayId, labels: Vec<Label>) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            log::debug!("Not creating a task with an empty text");
            return None;
        }

        let tasks = self.days.entry(day).or_default();
        let task = Task::new(text.to_string(), day, tasks.len(), labels);
        let id = task.id().clone();
        log::debug!("Adding task {} on {} at position {}", id, day, task.position());
        tasks.push(task);
        Some(id)
    }

    /// Insert an existing task at the end of its day. Its position is updated accordingly
    pub fn push_task(&mut self, mut task: Task) {
        let tasks = self.days.entry(task.date()).or_default();
        task.set_position(tasks.len());
        tasks.push(task);
    }

    /// Change the text of a task.
    ///
    /// The new text is trimmed. Empty texts, unchanged texts and unknown tasks are ignored.
    /// Returns whether the task has been modified
    pub fn edit_task(&mut self, day: &DayId, id: &TaskId, new_text: &str) -> bool {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return false;
        }
        let task = match self.days.get_mut(day).and_then(|tasks| tasks.iter_mut().find(|t| t.id() == id)) {
            None => {
                log::warn!("Unable to edit task {} on {}: no such task", id, day);
                return false;
            },
            Some(task) => task,
        };
        if task.text() == new_text {
            return false;
        }
        task.set_text(new_text.to_string());
        true
    }

    /// Remove a task. The remaining tasks of its day are renumbered.
    ///
    /// Returns the removed task, or `None` in case it was not found
    pub fn delete_task(&mut self, day: &DayId, id: &TaskId) -> Option<Task> {
        let removed = self.take_task(day, id);
        if removed.is_none() {
            log::warn!("Unable to delete task {} on {}: no such task", id, day);
        }
        removed
    }

    /// Replace the order of the tasks of a day.
    ///
    /// `new_order` must be a permutation of the current IDs of this day. Otherwise, nothing is changed.
    /// Returns whether the day has been reordered
    pub fn reorder_day(&mut self, day: &DayId, new_order: &[TaskId]) -> bool {
        let tasks = match self.days.get_mut(day) {
            None => {
                log::debug!("Not reordering {}: this day has no task", day);
                return false;
            },
            Some(tasks) => tasks,
        };

        if is_permutation_of(new_order, tasks) == false {
            log::warn!("Not reordering {}: the new order does not match its current tasks", day);
            return false;
        }

        let mut remaining: Vec<Option<Task>> = tasks.drain(..).map(Some).collect();
        for id in new_order {
            // Cannot fail: we've just checked `new_order` is a permutation of these tasks
            if let Some(slot) = remaining.iter_mut().find(|slot| slot.as_ref().map(|t| t.id() == id).unwrap_or(false)) {
                if let Some(task) = slot.take() {
                    tasks.push(task);
                }
            }
        }
        renumber(tasks);
        true
    }

    /// Move a task of a day at the index currently held by another task of the same day.
    ///
    /// This is what dropping a task card onto another card does.
    /// Returns whether the day has been reordered
    pub fn move_within_day(&mut self, day: &DayId, dragged: &TaskId, target: &TaskId) -> bool {
        if dragged == target {
            return false;
        }
        let tasks = match self.days.get_mut(day) {
            None => return false,
            Some(tasks) => tasks,
        };
        let dragged_index = tasks.iter().position(|t| t.id() == dragged);
        let target_index = tasks.iter().position(|t| t.id() == target);
        match (dragged_index, target_index) {
            (Some(from), Some(to)) => {
                let task = tasks.remove(from);
                tasks.insert(to, task);
                renumber(tasks);
                true
            },
            _ => {
                log::debug!("Not reordering {}: unknown task {} or {}", day, dragged, target);
                false
            }
        }
    }

    /// Move a task to the end of another day.
    ///
    /// Both days are renumbered. The source day is removed in case it has no task left.
    /// This is a no-op in case both days are the same, or the task is not in `source`.
    /// Returns whether the task has been moved
    pub fn move_task(&mut self, id: &TaskId, source: &DayId, target: &DayId) -> bool {
        if source == target {
            return false;
        }
        let mut task = match self.take_task(source, id) {
            None => {
                log::warn!("Unable to move task {} from {}: no such task", id, source);
                return false;
            },
            Some(task) => task,
        };

        log::debug!("Moving task {} from {} to {}", id, source, target);
        task.set_date(*target);
        self.push_task(task);
        true
    }

    /// Whether every invariant of this store holds: no empty day, every task is dated with its day,
    /// IDs are unique within a day and positions are contiguous and match the list order
    pub fn is_well_formed(&self) -> bool {
        self.days.iter().all(|(day, tasks)| {
            let ids: HashSet<&TaskId> = tasks.iter().map(|t| t.id()).collect();
               tasks.is_empty() == false
            && ids.len() == tasks.len()
            && tasks.iter().enumerate().all(|(index, t)| t.position() == index && t.date() == *day)
        })
    }

    /// Repair a store that has been built from untrusted data (e.g. read from a storage).
    ///
    /// Tasks are sorted by their positions, renumbered and re-dated with the day they are stored under.
    /// Empty days are removed. Returns whether anything had to be fixed
    pub fn normalize(&mut self) -> bool {
        if self.is_well_formed() {
            return false;
        }
        log::warn!("Stored tasks do not hold a consistent ordering. Fixing them.");

        self.days.retain(|_, tasks| tasks.is_empty() == false);
        for (day, tasks) in self.days.iter_mut() {
            // Stable sort: ties keep their stored order
            tasks.sort_by_key(|t| t.position());
            let mut seen = HashSet::new();
            tasks.retain(|t| seen.insert(t.id().clone()));
            for task in tasks.iter_mut() {
                task.set_date(*day);
            }
            renumber(tasks);
        }
        true
    }

    fn take_task(&mut self, day: &DayId, id: &TaskId) -> Option<Task> {
        let tasks = self.days.get_mut(day)?;
        let index = tasks.iter().position(|t| t.id() == id)?;
        let task = tasks.remove(index);
        if tasks.is_empty() {
            self.days.remove(day);
        } else {
            renumber(tasks);
        }
        Some(task)
    }
}

/// Make positions match the list order
fn renumber(tasks: &mut [Task]) {
    for (index, task) in tasks.iter_mut().enumerate() {
        task.set_position(index);
    }
}

fn is_permutation_of(ids: &[TaskId], tasks: &[Task]) -> bool {
    if ids.len() != tasks.len() {
        return false;
    }
    let wanted: HashSet<&TaskId> = ids.iter().collect();
    let current: HashSet<&TaskId> = tasks.iter().map(|t| t.id()).collect();
    wanted.len() == ids.len() && wanted == current
}
