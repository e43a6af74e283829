//! Todo use-case service.
//!
//! # Responsibility
//! - Provide todo CRUD, completion toggles and manual ordering.
//! - Group todos by day for the dated todo list.
//!
//! # Invariants
//! - Lists are sorted by `order` (unset sorts as 0); equal keys keep stored order.
//! - `reorder` assigns `order = index` to listed ids, then appends the rest
//!   in their stored relative order.
//! - Deleting an unknown todo succeeds.

use crate::clock::Clock;
use crate::model::{Todo, TodoId};
use crate::repo::{RecordRepository, RepoError, RepoResult};
use crate::store::CollectionStore;
use chrono::NaiveDate;
use log::info;
use std::collections::HashMap;

const SUB_TASK_COLLECTION: &str = "subtasks";

pub struct TodoService<S, C> {
    todos: RecordRepository<S, Todo>,
    clock: C,
}

impl<S, C> TodoService<S, C>
where
    S: CollectionStore<Todo>,
    C: Clock,
{
    pub fn new(todos: RecordRepository<S, Todo>, clock: C) -> Self {
        Self { todos, clock }
    }

    pub fn list_todos(&self) -> RepoResult<Vec<Todo>> {
        let mut todos = self.todos.list()?;
        todos.sort_by_key(Todo::sort_key);
        Ok(todos)
    }

    pub fn list_for_date(&self, date: NaiveDate) -> RepoResult<Vec<Todo>> {
        Ok(self
            .list_todos()?
            .into_iter()
            .filter(|todo| todo.date == date)
            .collect())
    }

    /// Distinct days that have todos, newest first.
    pub fn dates_desc(&self) -> RepoResult<Vec<NaiveDate>> {
        let mut dates: Vec<NaiveDate> = self.todos.list()?.into_iter().map(|todo| todo.date).collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        Ok(dates)
    }

    /// Stores a new todo. Without an explicit `order` it goes last.
    pub fn create_todo(&self, todo: Todo) -> RepoResult<Todo> {
        let todo = self.todos.create_with(todo, |existing, todo| {
            if todo.order.is_none() {
                let next = existing
                    .iter()
                    .map(|other| other.sort_key() + 1)
                    .max()
                    .unwrap_or(0);
                todo.order = Some(next);
            }
            Ok::<(), RepoError>(())
        })?;
        info!(
            "event=todo_create module=service status=ok todo_id={} date={}",
            todo.id, todo.date
        );
        Ok(todo)
    }

    pub fn update_todo(&self, id: &str, todo: Todo) -> RepoResult<Todo> {
        let todo = self.todos.replace(id, todo)?;
        info!("event=todo_update module=service status=ok todo_id={}", todo.id);
        Ok(todo)
    }

    pub fn delete_todo(&self, id: &str) -> RepoResult<()> {
        let removed = self.todos.delete(id)?;
        info!("event=todo_delete module=service status=ok todo_id={id} removed={removed}");
        Ok(())
    }

    pub fn toggle_completed(&self, id: &str) -> RepoResult<Todo> {
        self.mutate(id, |todo| {
            todo.completed = !todo.completed;
            Ok(())
        })
    }

    pub fn toggle_subtask(&self, todo_id: &str, sub_task_id: &str) -> RepoResult<Todo> {
        self.mutate(todo_id, |todo| {
            let sub_task = todo
                .sub_tasks
                .iter_mut()
                .find(|sub_task| sub_task.id == sub_task_id)
                .ok_or_else(|| RepoError::NotFound {
                    collection: SUB_TASK_COLLECTION,
                    id: sub_task_id.to_string(),
                })?;
            sub_task.completed = !sub_task.completed;
            Ok(())
        })
    }

    /// Applies a manual ordering. Unknown ids are ignored.
    pub fn reorder(&self, ordered_ids: &[TodoId]) -> RepoResult<Vec<Todo>> {
        let todos = self.todos.modify(|todos| {
            let mut remaining: Vec<Option<Todo>> = todos.drain(..).map(Some).collect();
            let index_by_id: HashMap<String, usize> = remaining
                .iter()
                .enumerate()
                .filter_map(|(index, todo)| todo.as_ref().map(|todo| (todo.id.clone(), index)))
                .collect();

            let mut reordered = Vec::with_capacity(remaining.len());
            for id in ordered_ids {
                let Some(todo) = index_by_id.get(id).and_then(|&index| remaining[index].take())
                else {
                    continue;
                };
                reordered.push(todo);
            }
            reordered.extend(remaining.into_iter().flatten());

            for (index, todo) in reordered.iter_mut().enumerate() {
                todo.order = u32::try_from(index).ok();
            }
            *todos = reordered;
            Ok(todos.clone())
        })?;
        info!(
            "event=todo_reorder module=service status=ok listed={} total={}",
            ordered_ids.len(),
            todos.len()
        );
        Ok(todos)
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Todo) -> RepoResult<()>,
    ) -> RepoResult<Todo> {
        let todo = self.todos.modify(|todos| {
            let todo = todos
                .iter_mut()
                .find(|todo| todo.id == id)
                .ok_or_else(|| RepoError::not_found::<Todo>(id))?;
            apply(todo)?;
            Ok(todo.clone())
        })?;
        info!("event=todo_update module=service status=ok todo_id={}", todo.id);
        Ok(todo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::SubTask;
    use crate::progress::dates::parse_day;
    use crate::store::MemoryStore;

    fn service() -> TodoService<MemoryStore<Todo>, FixedClock> {
        TodoService::new(
            RecordRepository::new(MemoryStore::default()),
            FixedClock::on(parse_day("2026-10-19").unwrap()),
        )
    }

    fn texts(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|todo| todo.text.as_str()).collect()
    }

    #[test]
    fn create_appends_order_and_list_sorts_by_it() {
        let service = service();
        let a = service.add_today("a").unwrap();
        let b = service.add_today("b").unwrap();
        assert_eq!((a.order, b.order), (Some(0), Some(1)));

        let mut first = Todo::new(a.date, "first", a.created_at);
        first.order = Some(0);
        service.create_todo(first).unwrap();
        assert_eq!(texts(&service.list_todos().unwrap()), vec!["a", "first", "b"]);
    }

    #[test]
    fn reorder_places_listed_ids_first_and_ignores_unknown() {
        let service = service();
        let a = service.add_today("a").unwrap();
        let b = service.add_today("b").unwrap();
        let c = service.add_today("c").unwrap();

        let todos = service
            .reorder(&[c.id.clone(), "ghost".to_string(), a.id.clone()])
            .unwrap();
        assert_eq!(texts(&todos), vec!["c", "a", "b"]);
        let orders: Vec<_> = todos.iter().map(|todo| todo.order).collect();
        assert_eq!(orders, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(service.list_todos().unwrap()[2].id, b.id);
    }

    #[test]
    fn toggles_flip_todo_and_subtask() {
        let service = service();
        let mut todo = Todo::new(parse_day("2026-10-19").unwrap(), "pack", chrono::Utc::now());
        let sub_task = SubTask::new("socks");
        todo.sub_tasks.push(sub_task.clone());
        let todo = service.create_todo(todo).unwrap();

        assert!(service.toggle_completed(&todo.id).unwrap().completed);
        let toggled = service.toggle_subtask(&todo.id, &sub_task.id).unwrap();
        assert!(toggled.sub_tasks[0].completed);
        assert!(service.toggle_subtask(&todo.id, "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn dates_are_distinct_newest_first_and_delete_is_idempotent() {
        let service = service();
        let now = chrono::Utc::now();
        for day in ["2026-10-17", "2026-10-19", "2026-10-17"] {
            service
                .create_todo(Todo::new(parse_day(day).unwrap(), day, now))
                .unwrap();
        }
        assert_eq!(
            service.dates_desc().unwrap(),
            vec![parse_day("2026-10-19").unwrap(), parse_day("2026-10-17").unwrap()]
        );
        assert_eq!(service.list_for_date(parse_day("2026-10-17").unwrap()).unwrap().len(), 2);

        service.delete_todo("missing").unwrap();
    }
}
