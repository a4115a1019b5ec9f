//! # SubTaskRepository
//!
//! サブタスクの永続化を担当するリポジトリ。
//! サブタスクは生成操作で一括挿入され、親 Todo の削除と共に消える。

use async_trait::async_trait;
use sqlx::SqlitePool;
use todoflow_domain::{
   subtask::{SubTask, SubTaskId},
   todo::TodoId,
};
use uuid::Uuid;

use crate::error::InfraError;

/// サブタスクリポジトリトレイト
#[async_trait]
pub trait SubTaskRepository: Send + Sync {
   /// サブタスクを一括保存する
   async fn insert_all(&self, subtasks: &[SubTask]) -> Result<(), InfraError>;

   /// 親 Todo に紐づくサブタスクを挿入順で取得する
   async fn find_by_todo(&self, todo_id: &TodoId) -> Result<Vec<SubTask>, InfraError>;

   /// 完了状態を設定する（冪等）
   ///
   /// 対象行が存在しない場合は `Ok(false)` を返す。
   async fn set_done(&self, id: &SubTaskId, done: bool) -> Result<bool, InfraError>;
}

/// DB 行とサブタスクエンティティの中間表現
#[derive(sqlx::FromRow)]
struct SubTaskRow {
   id:      String,
   todo_id: String,
   text:    String,
   done:    bool,
}

impl SubTaskRow {
   fn into_subtask(self) -> Result<SubTask, InfraError> {
      let id = Uuid::parse_str(&self.id).map_err(|e| InfraError::unexpected(e.to_string()))?;
      let todo_id =
         Uuid::parse_str(&self.todo_id).map_err(|e| InfraError::unexpected(e.to_string()))?;

      Ok(SubTask::from_db(
         SubTaskId::from_uuid(id),
         TodoId::from_uuid(todo_id),
         self.text,
         self.done,
      ))
   }
}

/// SQLite 実装の SubTaskRepository
#[derive(Debug, Clone)]
pub struct SqliteSubTaskRepository {
   pool: SqlitePool,
}

impl SqliteSubTaskRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: SqlitePool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl SubTaskRepository for SqliteSubTaskRepository {
   async fn insert_all(&self, subtasks: &[SubTask]) -> Result<(), InfraError> {
      // 生成されるサブタスクは最大 5 件のため、逐次 INSERT で十分
      for subtask in subtasks {
         sqlx::query("INSERT INTO subtasks (id, todo_id, text, done) VALUES (?, ?, ?, ?)")
            .bind(subtask.id().to_string())
            .bind(subtask.todo_id().to_string())
            .bind(subtask.text())
            .bind(subtask.done())
            .execute(&self.pool)
            .await?;
      }

      Ok(())
   }

   async fn find_by_todo(&self, todo_id: &TodoId) -> Result<Vec<SubTask>, InfraError> {
      let rows = sqlx::query_as::<_, SubTaskRow>(
         r#"
            SELECT id, todo_id, text, done
            FROM subtasks
            WHERE todo_id = ?
            ORDER BY id ASC
            "#,
      )
      .bind(todo_id.to_string())
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(SubTaskRow::into_subtask).collect()
   }

   async fn set_done(&self, id: &SubTaskId, done: bool) -> Result<bool, InfraError> {
      let result = sqlx::query("UPDATE subtasks SET done = ? WHERE id = ?")
         .bind(done)
         .bind(id.to_string())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
