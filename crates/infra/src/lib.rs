//! # TodoFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトと外部サービスクライアントトレイトの
//! 具体的な実装を提供する。外部システムの詳細をカプセル化し、ドメイン層を
//! インフラの変更から保護する。
//!
//! ## 責務
//!
//! - **データベース接続**: SQLite への接続プール管理
//! - **リポジトリ実装**: Todo / サブタスクの永続化
//! - **外部 API クライアント**: 翻訳サービス、テキスト生成サービスとの通信
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//!          ↘      ↓
//!            shared
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`db`] - SQLite データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`translation`] - 翻訳サービスクライアント
//! - [`generation`] - サブタスク生成（AI / フォールバック）

pub mod db;
pub mod error;
pub mod generation;
pub mod repository;
pub mod translation;

// テスト用モック（test-utils feature で他クレートからも利用可能）
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
