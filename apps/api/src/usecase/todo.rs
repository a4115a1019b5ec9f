//! # Todo ユースケース
//!
//! Todo の CRUD とサブタスクの完了操作に関するビジネスロジックを実装する。

use chrono::Utc;
use todoflow_domain::{
   subtask::{SubTask, SubTaskId},
   todo::{Title, Todo, TodoId},
};
use todoflow_infra::repository::{SubTaskRepository, TodoRepository};

use crate::error::ApiError;

/// Todo ユースケース実装
///
/// T: TodoRepository, S: SubTaskRepository
pub struct TodoUseCaseImpl<T, S> {
   todo_repo:    T,
   subtask_repo: S,
}

impl<T, S> TodoUseCaseImpl<T, S>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   pub fn new(todo_repo: T, subtask_repo: S) -> Self {
      Self {
         todo_repo,
         subtask_repo,
      }
   }

   /// Todo を作成する
   ///
   /// タイトルは必須、説明は空白のみの場合 None として扱う。
   pub async fn create_todo(
      &self,
      title: &str,
      description: Option<String>,
   ) -> Result<Todo, ApiError> {
      let title = Title::new(title)?;
      let description = description
         .map(|d| d.trim().to_string())
         .filter(|d| !d.is_empty());

      let todo = Todo::new(TodoId::new(), title, description, Utc::now());
      self.todo_repo.insert(&todo).await?;

      tracing::info!(todo_id = %todo.id(), "Todo を作成しました");
      Ok(todo)
   }

   /// すべての Todo を作成順で取得する
   pub async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
      Ok(self.todo_repo.find_all().await?)
   }

   /// Todo をサブタスク付きで取得する
   pub async fn get_todo_with_subtasks(
      &self,
      id: &TodoId,
   ) -> Result<(Todo, Vec<SubTask>), ApiError> {
      let todo = self
         .todo_repo
         .find_by_id(id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("Todo が見つかりません: {id}")))?;

      let subtasks = self.subtask_repo.find_by_todo(id).await?;
      Ok((todo, subtasks))
   }

   /// Todo の完了状態を設定する（冪等）
   ///
   /// 更新後のエンティティを返す。
   pub async fn set_completed(&self, id: &TodoId, completed: bool) -> Result<Todo, ApiError> {
      let updated = self.todo_repo.set_completed(id, completed).await?;
      if !updated {
         return Err(ApiError::NotFound(format!("Todo が見つかりません: {id}")));
      }

      self
         .todo_repo
         .find_by_id(id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("Todo が見つかりません: {id}")))
   }

   /// Todo を削除する
   ///
   /// サブタスクも連鎖削除される。
   pub async fn delete_todo(&self, id: &TodoId) -> Result<(), ApiError> {
      let deleted = self.todo_repo.delete(id).await?;
      if !deleted {
         return Err(ApiError::NotFound(format!("Todo が見つかりません: {id}")));
      }

      tracing::info!(todo_id = %id, "Todo を削除しました");
      Ok(())
   }

   /// サブタスクの完了状態を設定する（冪等）
   pub async fn set_subtask_done(&self, id: &SubTaskId, done: bool) -> Result<(), ApiError> {
      let updated = self.subtask_repo.set_done(id, done).await?;
      if !updated {
         return Err(ApiError::NotFound(format!(
            "サブタスクが見つかりません: {id}"
         )));
      }

      Ok(())
   }
}
