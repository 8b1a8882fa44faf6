//! Wire shape of the tasks blob.
//!
//! Columns are written as one JSON object mapping column name to its task
//! list, with keys in display order. Reading also accepts a list of
//! `{name, tasks}` records.

use std::fmt;

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use taskflow_models::{Task, TaskColumn};

/// Borrowed columns, serialized as an ordered object.
pub(crate) struct ColumnsRef<'a>(pub &'a [TaskColumn]);

impl Serialize for ColumnsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for column in self.0 {
            map.serialize_entry(&column.name, &column.tasks)?;
        }
        map.end()
    }
}

/// Columns read back in document order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Columns(pub Vec<TaskColumn>);

impl<'de> Deserialize<'de> for Columns {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ColumnsVisitor)
    }
}

struct ColumnsVisitor;

impl<'de> Visitor<'de> for ColumnsVisitor {
    type Value = Columns;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of column name to task list, or a list of columns")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Columns, A::Error> {
        let mut columns: Vec<TaskColumn> = Vec::new();
        while let Some((name, tasks)) = map.next_entry::<String, Vec<Task>>()? {
            // Repeated keys extend the first occurrence
            match columns.iter_mut().find(|c| c.name == name) {
                Some(column) => column.tasks.extend(tasks),
                None => columns.push(TaskColumn { name, tasks }),
            }
        }
        Ok(Columns(columns))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Columns, A::Error> {
        let mut columns = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(column) = seq.next_element::<TaskColumn>()? {
            columns.push(column);
        }
        Ok(Columns(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use taskflow_models::TaskDraft;

    fn columns() -> Vec<TaskColumn> {
        let due = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let mut backlog = TaskColumn::new("Backlog");
        backlog
            .tasks
            .push(TaskDraft::new("Triage").into_task("Backlog", Utc::now(), due).unwrap());
        vec![TaskColumn::new("Zeta"), backlog, TaskColumn::new("Alpha")]
    }

    #[test]
    fn test_written_as_object_in_display_order() {
        let json = serde_json::to_string(&ColumnsRef(&columns())).unwrap();

        assert!(json.starts_with("{\"Zeta\":[]"));
        let zeta = json.find("\"Zeta\"").unwrap();
        let backlog = json.find("\"Backlog\"").unwrap();
        let alpha = json.find("\"Alpha\"").unwrap();
        assert!(zeta < backlog && backlog < alpha);
    }

    #[test]
    fn test_object_form_keeps_key_order() {
        let original = columns();
        let json = serde_json::to_string(&ColumnsRef(&original)).unwrap();

        let Columns(read) = serde_json::from_str(&json).unwrap();
        assert_eq!(read, original);
    }

    #[test]
    fn test_list_form_is_accepted() {
        let original = columns();
        let json = serde_json::to_string(&original).unwrap();

        let Columns(read) = serde_json::from_str(&json).unwrap();
        assert_eq!(read, original);
    }
}
