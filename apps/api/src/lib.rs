//! # TodoFlow API サーバー
//!
//! Todo 管理の公開 API を提供する axum ベースの Web サーバー。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────┐     ┌───────────────┐     ┌────────────────────┐
//! │  Client  │────▶│  TodoFlow API │────▶│  SQLite            │
//! └──────────┘     │  (port 3000)  │     ├────────────────────┤
//!                  └───────────────┘     │  翻訳サービス       │
//!                                        ├────────────────────┤
//!                                        │  生成サービス       │
//!                                        └────────────────────┘
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - State の注入とルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
