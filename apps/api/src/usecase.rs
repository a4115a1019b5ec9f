//! # ユースケース層
//!
//! API サーバーのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//! - **型パラメータによる注入**: リポジトリ・クライアントはトレイト境界付きの
//!   型パラメータで注入し、テストではモックに差し替える
//!
//! ## モジュール構成
//!
//! - `todo`: Todo の CRUD とサブタスクの完了操作
//! - `translation`: 翻訳操作（カタログ解決 + 翻訳 + 永続化）
//! - `subtask`: サブタスク生成（プライマリ / フォールバック切り替え）

pub mod subtask;
pub mod todo;
pub mod translation;

pub use subtask::SubtaskUseCaseImpl;
pub use todo::TodoUseCaseImpl;
pub use translation::{TranslatedText, TranslationUseCaseImpl};
