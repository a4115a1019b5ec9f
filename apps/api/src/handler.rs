//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲

pub mod health;
pub mod subtask;
pub mod todo;
pub mod translation;

pub use health::health_check;
pub use subtask::{SubtaskState, generate_subtasks, set_subtask_done};
pub use todo::{
   TodoState,
   create_todo,
   delete_todo,
   get_todo,
   list_todos,
   set_todo_completion,
};
pub use translation::{TranslationState, translate_todo};
