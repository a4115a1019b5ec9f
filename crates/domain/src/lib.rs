//! # TodoFlow ドメイン層
//!
//! TodoFlow のビジネスルールを表現するドメイン層。
//!
//! ## 設計方針
//!
//! - **外部依存なし**: インフラ層（DB、外部 API）に依存しない純粋なロジック
//! - **Newtype パターン**: ID や検証済み文字列をラップし、型安全性を確保
//! - **生成時バリデーション**: 不正な値を持つエンティティは作成できない
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo エンティティと値オブジェクト
//! - [`subtask`] - サブタスクエンティティ
//! - [`language`] - 翻訳対象言語の解決ロジック
//! - [`error`] - ドメイン層エラー定義

pub mod error;
pub mod language;
pub mod subtask;
pub mod todo;

pub use error::DomainError;
