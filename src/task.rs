//! Task cards

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::day::DayId;


/// An opaque, unique task identifier
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId {
    content: String,
}
impl TaskId {
    /// Generate a random TaskId.
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(TaskId{ content })
    }
}


/// A colored tag displayed on top of a task card
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Any CSS color (usually an hex code such as `#61BD4F`)
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Label {
    pub fn new<S: ToString>(color: S) -> Self {
        Self { color: color.to_string(), name: None }
    }

    /// Interprets the color of this label.
    /// Returns `None` (and logs) in case this is not a valid CSS color
    pub fn css_color(&self) -> Option<csscolorparser::Color> {
        match csscolorparser::parse(&self.color) {
            Ok(color) => Some(color),
            Err(err) => {
                log::debug!("Label has an invalid color {:?}: {}", self.color, err);
                None
            }
        }
    }
}


/// A task card, that belongs to a given day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    /// The description of the task
    text: String,
    /// The day this task is scheduled on
    date: DayId,
    /// The rank of this task among the tasks of its day
    position: usize,
    #[serde(default)]
    labels: Vec<Label>,
}

impl Task {
    /// Create a brand new Task.
    /// This will pick a new (random) task ID.
    pub fn new(text: String, date: DayId, position: usize, labels: Vec<Label>) -> Self {
        Self::new_with_id(TaskId::random(), text, date, position, labels)
    }

    /// Create a Task instance with a known ID
    pub fn new_with_id(id: TaskId, text: String, date: DayId, position: usize, labels: Vec<Label>) -> Self {
        Self { id, text, date, position, labels }
    }

    pub fn id(&self) -> &TaskId       { &self.id       }
    pub fn text(&self) -> &str        { &self.text     }
    pub fn date(&self) -> DayId       { self.date      }
    pub fn position(&self) -> usize   { self.position  }
    pub fn labels(&self) -> &[Label]  { &self.labels   }

    pub fn set_text(&mut self, new_text: String) {
        self.text = new_text;
    }

    pub(crate) fn set_date(&mut self, new_date: DayId) {
        self.date = new_date;
    }

    pub(crate) fn set_position(&mut self, new_position: usize) {
        self.position = new_position;
    }
}
