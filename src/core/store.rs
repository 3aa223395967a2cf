use chrono::NaiveDate;
use uuid::Uuid;

use super::task::{Memo, NewTask, Task};
use crate::error::PlannerError;

/// The session's task collection, always ordered by start time.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and insert a new task, keeping start-time order. Tasks that
    /// start at the same instant stay in insertion order.
    pub fn create_task(&mut self, new: NewTask) -> Result<Task, PlannerError> {
        let task = new.build().inspect_err(|e| {
            log::warn!("Rejected new task: {}", e);
        })?;
        log::debug!(
            "Created task {} '{}' at {}",
            task.id,
            task.title,
            task.start_time
        );
        self.tasks.push(task.clone());
        // Vec::sort_by_key is stable
        self.tasks.sort_by_key(|t| t.start_time);
        Ok(task)
    }

    pub fn toggle_complete(&mut self, task_id: Uuid) -> Result<bool, PlannerError> {
        let task = self.get_mut(task_id)?;
        task.is_completed = !task.is_completed;
        log::debug!("Task {} completed={}", task_id, task.is_completed);
        Ok(task.is_completed)
    }

    pub fn add_memo(&mut self, task_id: Uuid, content: &str) -> Result<Memo, PlannerError> {
        let content = content.trim();
        if content.is_empty() {
            log::warn!("Rejected empty memo for task {}", task_id);
            return Err(PlannerError::EmptyMemo);
        }
        let task = self.get_mut(task_id)?;
        let memo = Memo::new(content);
        task.memos.push(memo.clone());
        log::debug!("Added memo {} to task {}", memo.id, task_id);
        Ok(memo)
    }

    /// Drop a memo. Unknown task or memo ids are ignored.
    pub fn remove_memo(&mut self, task_id: Uuid, memo_id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
            let before = task.memos.len();
            task.memos.retain(|m| m.id != memo_id);
            if task.memos.len() != before {
                log::debug!("Removed memo {} from task {}", memo_id, task_id);
            }
        }
    }

    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count_on(&self, date: NaiveDate) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.is_completed && t.starts_on(date))
            .count()
    }

    fn get_mut(&mut self, task_id: Uuid) -> Result<&mut Task, PlannerError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(PlannerError::TaskNotFound(task_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn titles(store: &TaskStore) -> Vec<&str> {
        store.list_all().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn keeps_start_order() {
        let mut store = TaskStore::new();
        let d = date(2024, 1, 1);
        store.create_task(NewTask::new("exercise", d, "18:00")).unwrap();
        store.create_task(NewTask::new("read", d, "07:30")).unwrap();
        store.create_task(NewTask::new("work", d, "09:30")).unwrap();
        store.create_task(NewTask::new("yesterday", date(2023, 12, 31), "22:00")).unwrap();
        assert_eq!(titles(&store), ["yesterday", "read", "work", "exercise"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut store = TaskStore::new();
        let d = date(2024, 1, 1);
        store.create_task(NewTask::new("a", d, "09:00")).unwrap();
        store.create_task(NewTask::new("b", d, "09:00")).unwrap();
        store.create_task(NewTask::new("early", d, "08:00")).unwrap();
        store.create_task(NewTask::new("c", d, "09:00")).unwrap();
        assert_eq!(titles(&store), ["early", "a", "b", "c"]);
    }

    #[test]
    fn failed_create_leaves_store_untouched() {
        let mut store = TaskStore::new();
        let d = date(2024, 1, 1);
        store.create_task(NewTask::new("a", d, "09:00")).unwrap();
        assert!(store.create_task(NewTask::new("", d, "10:00")).is_err());
        assert!(store.create_task(NewTask::new("b", d, "10:61")).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_twice_restores_task() {
        let mut store = TaskStore::new();
        let task = store
            .create_task(NewTask::new("a", date(2024, 1, 1), "09:00").until("10:00"))
            .unwrap();
        assert_eq!(store.toggle_complete(task.id), Ok(true));
        assert_eq!(store.completed_count_on(date(2024, 1, 1)), 1);
        assert_eq!(store.toggle_complete(task.id), Ok(false));
        assert_eq!(store.get(task.id), Some(&task));
    }

    #[test]
    fn missing_task_is_not_found() {
        let mut store = TaskStore::new();
        store.create_task(NewTask::new("a", date(2024, 1, 1), "09:00")).unwrap();
        let snapshot = store.list_all().to_vec();
        let ghost = Uuid::new_v4();
        assert_eq!(store.toggle_complete(ghost), Err(PlannerError::TaskNotFound(ghost)));
        assert_eq!(store.add_memo(ghost, "idea"), Err(PlannerError::TaskNotFound(ghost)));
        assert_eq!(store.list_all(), snapshot.as_slice());
    }

    #[test]
    fn memos_append_in_order() {
        let mut store = TaskStore::new();
        let task = store.create_task(NewTask::new("a", date(2024, 1, 1), "09:00")).unwrap();
        let first = store.add_memo(task.id, "  chapter three  ").unwrap();
        let second = store.add_memo(task.id, "call back").unwrap();
        assert_eq!(first.content, "chapter three");
        let memos = &store.get(task.id).unwrap().memos;
        assert_eq!(memos.iter().map(|m| m.id).collect::<Vec<_>>(), [first.id, second.id]);
        assert_eq!(store.add_memo(task.id, " \t"), Err(PlannerError::EmptyMemo));
        assert_eq!(store.get(task.id).unwrap().memos.len(), 2);
    }

    #[test]
    fn remove_memo_is_idempotent() {
        let mut store = TaskStore::new();
        let task = store.create_task(NewTask::new("a", date(2024, 1, 1), "09:00")).unwrap();
        let keep = store.add_memo(task.id, "keep").unwrap();
        let drop = store.add_memo(task.id, "drop").unwrap();

        store.remove_memo(task.id, drop.id);
        let after_first = store.list_all().to_vec();
        store.remove_memo(task.id, drop.id);
        assert_eq!(store.list_all(), after_first.as_slice());
        assert_eq!(store.get(task.id).unwrap().memos, vec![keep]);

        store.remove_memo(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(store.list_all(), after_first.as_slice());
    }

    proptest! {
        #[test]
        fn list_stays_sorted_and_stable(
            clocks in prop::collection::vec((0u32..24, 0u32..4), 1..40)
        ) {
            let mut store = TaskStore::new();
            let d = date(2024, 1, 1);
            for (i, (hour, quarter)) in clocks.iter().enumerate() {
                let start = format!("{:02}:{:02}", hour, quarter * 15);
                store.create_task(NewTask::new(format!("{i}"), d, start)).unwrap();

                let tasks = store.list_all();
                for pair in tasks.windows(2) {
                    prop_assert!(pair[0].start_time <= pair[1].start_time);
                    if pair[0].start_time == pair[1].start_time {
                        let a: usize = pair[0].title.parse().unwrap();
                        let b: usize = pair[1].title.parse().unwrap();
                        prop_assert!(a < b);
                    }
                }
            }
        }
    }
}
