//! # サブタスク生成ユースケース
//!
//! Todo をサブタスクに分解し、結果を永続化する。
//!
//! ## フォールバック戦略
//!
//! プライマリ生成器（起動時に選択済み）が失敗した場合、決定的な
//! フォールバック生成に切り替える。この操作が生成サービスの障害で
//! 失敗することはなく、常に 3〜5 件のサブタスクが保存される。

use std::sync::Arc;

use todoflow_domain::{
   subtask::{SubTask, SubTaskId},
   todo::TodoId,
};
use todoflow_infra::{
   generation::{FallbackSubtaskGenerator, SubtaskGenerator, clamp_max_subtasks},
   repository::{SubTaskRepository, TodoRepository},
};

use crate::error::ApiError;

/// サブタスク生成ユースケース実装
///
/// T: TodoRepository, S: SubTaskRepository
///
/// 生成器はトレイトオブジェクトで保持する。どの実装を使うかは
/// 起動時（クレデンシャルの有無）に一度だけ決定されるため。
pub struct SubtaskUseCaseImpl<T, S> {
   todo_repo:    T,
   subtask_repo: S,
   generator:    Arc<dyn SubtaskGenerator>,
   fallback:     FallbackSubtaskGenerator,
}

impl<T, S> SubtaskUseCaseImpl<T, S>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   pub fn new(todo_repo: T, subtask_repo: S, generator: Arc<dyn SubtaskGenerator>) -> Self {
      Self {
         todo_repo,
         subtask_repo,
         generator,
         fallback: FallbackSubtaskGenerator::new(),
      }
   }

   /// Todo からサブタスクを生成して保存する
   ///
   /// `requested` は希望する最大件数（3〜5 に丸められる）。
   /// 生成済みのサブタスクに追記する形で保存される。
   pub async fn generate_subtasks(
      &self,
      id: &TodoId,
      requested: Option<usize>,
   ) -> Result<Vec<SubTask>, ApiError> {
      let todo = self
         .todo_repo
         .find_by_id(id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("Todo が見つかりません: {id}")))?;

      let max = clamp_max_subtasks(requested);
      let source = todo.source_text();

      let items = match self.generator.generate(&source, max).await {
         Ok(items) => items,
         Err(e) => {
            tracing::warn!(todo_id = %id, error = %e, "生成サービスに失敗、フォールバック生成に切り替えます");
            self.fallback.generate_list(&source, max)
         }
      };

      // 生成器が不正な項目（空・長すぎる）を返した場合は除外し、
      // 最小件数を割ったらフォールバック生成で作り直す
      let mut subtasks = to_subtasks(todo.id(), &items);
      if subtasks.len() < todoflow_infra::generation::MIN_SUBTASKS {
         let items = self.fallback.generate_list(&source, max);
         subtasks = to_subtasks(todo.id(), &items);
      }

      self.subtask_repo.insert_all(&subtasks).await?;

      tracing::info!(todo_id = %id, count = subtasks.len(), "サブタスクを生成しました");
      Ok(subtasks)
   }
}

/// 生成された文字列をサブタスクエンティティに変換する
///
/// バリデーションに通らない項目は除外する。
fn to_subtasks(todo_id: &TodoId, items: &[String]) -> Vec<SubTask> {
   items
      .iter()
      .filter_map(|text| SubTask::new(SubTaskId::new(), todo_id.clone(), text.as_str()).ok())
      .collect()
}
