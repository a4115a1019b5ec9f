//! # サブタスク API ハンドラ
//!
//! サブタスクの生成と完了操作のエンドポイントを実装する。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use todoflow_domain::{
   subtask::{SubTask, SubTaskId},
   todo::TodoId,
};
use todoflow_infra::repository::{SubTaskRepository, TodoRepository};
use todoflow_shared::ApiResponse;
use uuid::Uuid;

use crate::{error::ApiError, handler::todo::TodoState, usecase::SubtaskUseCaseImpl};

/// サブタスク生成ハンドラーの State
pub struct SubtaskState<T, S> {
   pub usecase: SubtaskUseCaseImpl<T, S>,
}

/// サブタスク DTO
#[derive(Debug, Serialize)]
pub struct SubTaskDto {
   pub id:      String,
   pub todo_id: String,
   pub text:    String,
   pub done:    bool,
}

impl SubTaskDto {
   pub(crate) fn from_subtask(subtask: &SubTask) -> Self {
      Self {
         id:      subtask.id().to_string(),
         todo_id: subtask.todo_id().to_string(),
         text:    subtask.text().to_string(),
         done:    subtask.done(),
      }
   }
}

/// サブタスク生成リクエスト
///
/// ボディは省略可能。`max_subtasks` は 3〜5 に丸められる。
#[derive(Debug, Default, Deserialize)]
pub struct GenerateSubtasksRequest {
   #[serde(default)]
   pub max_subtasks: Option<usize>,
}

/// 完了状態の設定リクエスト
#[derive(Debug, Deserialize)]
pub struct SetDoneRequest {
   pub done: bool,
}

/// Todo からサブタスクを生成する
///
/// ## エンドポイント
/// POST /api/todos/{id}/subtasks
pub async fn generate_subtasks<T, S>(
   State(state): State<Arc<SubtaskState<T, S>>>,
   Path(id): Path<Uuid>,
   payload: Option<Json<GenerateSubtasksRequest>>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let id = TodoId::from_uuid(id);
   let requested = payload.and_then(|Json(p)| p.max_subtasks);

   let subtasks = state.usecase.generate_subtasks(&id, requested).await?;

   let response = ApiResponse::new(
      subtasks
         .iter()
         .map(SubTaskDto::from_subtask)
         .collect::<Vec<_>>(),
   );
   Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// サブタスクの完了状態を設定する
///
/// ## エンドポイント
/// PUT /api/subtasks/{id}/completion
pub async fn set_subtask_done<T, S>(
   State(state): State<Arc<TodoState<T, S>>>,
   Path(id): Path<Uuid>,
   Json(payload): Json<SetDoneRequest>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let id = SubTaskId::from_uuid(id);
   state.usecase.set_subtask_done(&id, payload.done).await?;

   Ok(StatusCode::NO_CONTENT.into_response())
}
