use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::tasks::error::TaskError;
use crate::validation::validate_not_blank;

/// A to-do item
///
/// `id` and `created_at` are assigned by the database and never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "2%")]
    pub notes: Option<String>,
    #[schema(example = false)]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Request body for POST /tasks
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(
        length(max = 255, message = "Title must not exceed 255 characters"),
        custom = "validate_not_blank"
    )]
    #[schema(example = "Buy milk")]
    pub title: String,
    #[serde(default)]
    #[schema(example = false)]
    pub is_completed: bool,
    #[serde(default)]
    #[schema(example = "2%")]
    pub notes: Option<String>,
}

/// A field in a partial update request
///
/// Distinguishes a key that was left out (`Absent`, leave the stored value
/// alone) from an explicit `null` (`Null`) and a concrete value (`Value`).
/// Fields of this type must carry `#[serde(default)]` so a missing key
/// deserializes to `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// The new value to store, or `None` when the field should be left untouched
    ///
    /// `Some(None)` means "store NULL".
    pub fn as_change(&self) -> Option<Option<&T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(v) => Some(Some(v)),
        }
    }

    /// Apply this patch to a stored optional value
    pub fn apply_to(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Absent => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

/// Request body for PATCH /tasks/{id}
///
/// `title`, `id` and `created_at` cannot be changed through a patch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct TaskPatch {
    #[serde(default)]
    #[schema(value_type = Option<bool>, example = true)]
    pub is_completed: Patch<bool>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Get oat milk instead")]
    pub notes: Patch<String>,
}

impl TaskPatch {
    /// Reject patches that would null a non-nullable column
    pub fn check(&self) -> Result<(), TaskError> {
        if matches!(self.is_completed, Patch::Null) {
            return Err(TaskError::ValidationError(
                "is_completed cannot be null".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.is_completed.is_absent() && self.notes.is_absent()
    }

    /// Apply this patch to a task snapshot, leaving server-assigned fields alone
    pub fn apply(self, mut task: Task) -> Task {
        if let Patch::Value(done) = self.is_completed {
            task.is_completed = done;
        }
        task.notes = self.notes.apply_to(task.notes);
        task
    }
}

/// Request body for PATCH /tasks/{id}/notes
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct NotesUpdate {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Call before 5pm")]
    pub notes: Patch<String>,
}

impl From<NotesUpdate> for TaskPatch {
    fn from(update: NotesUpdate) -> Self {
        TaskPatch {
            is_completed: Patch::Absent,
            notes: update.notes,
        }
    }
}
