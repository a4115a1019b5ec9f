//! # リポジトリ実装
//!
//! ドメインエンティティの永続化を担当するリポジトリを提供する。
//!
//! 各リポジトリはトレイトとして定義され、SQLite 実装とテスト用の
//! インメモリ実装（[`crate::mock`]）を差し替え可能にする。

pub mod subtask_repository;
pub mod todo_repository;

pub use subtask_repository::{SqliteSubTaskRepository, SubTaskRepository};
pub use todo_repository::{SqliteTodoRepository, TodoRepository};
