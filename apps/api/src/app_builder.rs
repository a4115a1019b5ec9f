//! # アプリケーション構築
//!
//! State の注入とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! リポジトリ・クライアントは型パラメータで受け取るため、
//! テストではモック実装で同じルーターを組み立てられる。

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post, put},
};
use todoflow_infra::{
   repository::{SubTaskRepository, TodoRepository},
   translation::TranslationClient,
};
use tower_http::trace::TraceLayer;

use crate::handler::{
   SubtaskState,
   TodoState,
   TranslationState,
   create_todo,
   delete_todo,
   generate_subtasks,
   get_todo,
   health_check,
   list_todos,
   set_subtask_done,
   set_todo_completion,
   translate_todo,
};

/// State を受け取りルーターを構築する
pub fn build_router<T, S, C>(
   todo_state: Arc<TodoState<T, S>>,
   translation_state: Arc<TranslationState<T, C>>,
   subtask_state: Arc<SubtaskState<T, S>>,
) -> Router
where
   T: TodoRepository + 'static,
   S: SubTaskRepository + 'static,
   C: TranslationClient + 'static,
{
   Router::new()
      .route("/health", get(health_check))
      // Todo CRUD API
      .route(
         "/api/todos",
         get(list_todos::<T, S>).post(create_todo::<T, S>),
      )
      .route(
         "/api/todos/{id}",
         get(get_todo::<T, S>).delete(delete_todo::<T, S>),
      )
      .route(
         "/api/todos/{id}/completion",
         put(set_todo_completion::<T, S>),
      )
      .route(
         "/api/subtasks/{id}/completion",
         put(set_subtask_done::<T, S>),
      )
      .with_state(todo_state)
      // 翻訳 API
      .route("/api/todos/{id}/translate", post(translate_todo::<T, C>))
      .with_state(translation_state)
      // サブタスク生成 API
      .route("/api/todos/{id}/subtasks", post(generate_subtasks::<T, S>))
      .with_state(subtask_state)
      .layer(TraceLayer::new_for_http())
}
