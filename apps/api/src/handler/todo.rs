//! # Todo API ハンドラ
//!
//! Todo の CRUD エンドポイントを実装する。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use todoflow_domain::todo::{Todo, TodoId};
use todoflow_infra::repository::{SubTaskRepository, TodoRepository};
use todoflow_shared::ApiResponse;
use uuid::Uuid;

use crate::{
   error::ApiError,
   handler::subtask::SubTaskDto,
   usecase::TodoUseCaseImpl,
};

/// Todo ハンドラーの State
pub struct TodoState<T, S> {
   pub usecase: TodoUseCaseImpl<T, S>,
}

/// Todo DTO
#[derive(Debug, Serialize)]
pub struct TodoDto {
   pub id:              String,
   pub title:           String,
   pub description:     Option<String>,
   pub completed:       bool,
   pub created_at:      String,
   pub translated_text: Option<String>,
   pub translated_lang: Option<String>,
}

impl TodoDto {
   pub(crate) fn from_todo(todo: &Todo) -> Self {
      Self {
         id:              todo.id().to_string(),
         title:           todo.title().as_str().to_string(),
         description:     todo.description().map(String::from),
         completed:       todo.completed(),
         created_at:      todo.created_at().to_rfc3339(),
         translated_text: todo.translated_text().map(String::from),
         translated_lang: todo.translated_lang().map(|l| l.as_str().to_string()),
      }
   }
}

/// Todo 詳細 DTO（サブタスク付き）
#[derive(Debug, Serialize)]
pub struct TodoDetailDto {
   #[serde(flatten)]
   pub todo:     TodoDto,
   pub subtasks: Vec<SubTaskDto>,
}

/// Todo 作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
   pub title:       String,
   #[serde(default)]
   pub description: Option<String>,
}

/// 完了状態の設定リクエスト
#[derive(Debug, Deserialize)]
pub struct SetCompletionRequest {
   pub completed: bool,
}

/// Todo 一覧を取得する
///
/// ## エンドポイント
/// GET /api/todos
pub async fn list_todos<T, S>(
   State(state): State<Arc<TodoState<T, S>>>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let todos = state.usecase.list_todos().await?;

   let response = ApiResponse::new(todos.iter().map(TodoDto::from_todo).collect::<Vec<_>>());
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// Todo を作成する
///
/// ## エンドポイント
/// POST /api/todos
pub async fn create_todo<T, S>(
   State(state): State<Arc<TodoState<T, S>>>,
   Json(payload): Json<CreateTodoRequest>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let todo = state
      .usecase
      .create_todo(&payload.title, payload.description)
      .await?;

   let response = ApiResponse::new(TodoDto::from_todo(&todo));
   Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Todo をサブタスク付きで取得する
///
/// ## エンドポイント
/// GET /api/todos/{id}
pub async fn get_todo<T, S>(
   State(state): State<Arc<TodoState<T, S>>>,
   Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let id = TodoId::from_uuid(id);
   let (todo, subtasks) = state.usecase.get_todo_with_subtasks(&id).await?;

   let response = ApiResponse::new(TodoDetailDto {
      todo:     TodoDto::from_todo(&todo),
      subtasks: subtasks.iter().map(SubTaskDto::from_subtask).collect(),
   });
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// Todo の完了状態を設定する
///
/// ## エンドポイント
/// PUT /api/todos/{id}/completion
pub async fn set_todo_completion<T, S>(
   State(state): State<Arc<TodoState<T, S>>>,
   Path(id): Path<Uuid>,
   Json(payload): Json<SetCompletionRequest>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let id = TodoId::from_uuid(id);
   let todo = state.usecase.set_completed(&id, payload.completed).await?;

   let response = ApiResponse::new(TodoDto::from_todo(&todo));
   Ok((StatusCode::OK, Json(response)).into_response())
}

/// Todo を削除する
///
/// ## エンドポイント
/// DELETE /api/todos/{id}
pub async fn delete_todo<T, S>(
   State(state): State<Arc<TodoState<T, S>>>,
   Path(id): Path<Uuid>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   S: SubTaskRepository,
{
   let id = TodoId::from_uuid(id);
   state.usecase.delete_todo(&id).await?;

   Ok(StatusCode::NO_CONTENT.into_response())
}
