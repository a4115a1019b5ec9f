//! # API エラー定義
//!
//! API サーバー固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` | 400 Bad Request |
//! | `UnknownLanguage` | 400 Bad Request |
//! | `NotFound` | 404 Not Found |
//! | `TranslationService` | 502 Bad Gateway |
//! | `Internal` | 500 Internal Server Error |
//!
//! 生成サービスのエラーはユースケース層でフォールバック生成に
//! 切り替えて回復するため、原則としてここには到達しない。
//!
//! ## エラーの階層
//!
//! ```text
//! ドメイン層エラー (DomainError) ─┐
//!                                 ├─ 変換 → ApiError
//! インフラ層エラー (InfraError) ──┘
//!                                       ↓ IntoResponse
//!                            HTTP レスポンス (StatusCode + RFC 9457 JSON)
//! ```

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use thiserror::Error;
use todoflow_domain::DomainError;
use todoflow_infra::{InfraError, error::InfraErrorKind};
use todoflow_shared::ErrorResponse;

/// API サーバーで発生するエラー
///
/// ハンドラから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// 入力値の検証失敗
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 翻訳対象言語がカタログに一致しない
   #[error("サポートされていない言語です: {0}")]
   UnknownLanguage(String),

   /// 翻訳サービスとの通信失敗
   #[error("翻訳サービスエラー: {0}")]
   TranslationService(String),

   /// 内部エラー
   ///
   /// 詳細はサーバーサイドのログにのみ出力し、クライアントには返さない。
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl From<DomainError> for ApiError {
   fn from(e: DomainError) -> Self {
      match e {
         DomainError::Validation(msg) => ApiError::Validation(msg),
         DomainError::NotFound { .. } => ApiError::NotFound(e.to_string()),
         DomainError::UnknownLanguage(lang) => ApiError::UnknownLanguage(lang),
      }
   }
}

impl From<InfraError> for ApiError {
   fn from(e: InfraError) -> Self {
      match e.kind() {
         InfraErrorKind::TranslationService(msg) => ApiError::TranslationService(msg.clone()),
         _ => ApiError::Internal(e.to_string()),
      }
   }
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let body = match &self {
         ApiError::Validation(msg) => ErrorResponse::bad_request(msg.clone()),
         ApiError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
         ApiError::UnknownLanguage(lang) => ErrorResponse::new(
            "unknown-language",
            "Bad Request",
            400,
            format!("サポートされていない言語です: {lang}"),
         ),
         ApiError::TranslationService(msg) => {
            tracing::warn!("翻訳サービスエラー: {}", msg);
            ErrorResponse::bad_gateway("翻訳サービスが利用できません")
         }
         ApiError::Internal(msg) => {
            tracing::error!("内部エラー: {}", msg);
            ErrorResponse::internal_error("内部エラーが発生しました")
         }
      };

      let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (status, Json(body)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   fn status_of(error: ApiError) -> StatusCode {
      error.into_response().status()
   }

   #[test]
   fn test_validationは400になる() {
      assert_eq!(
         status_of(ApiError::Validation("タイトルは必須です".to_string())),
         StatusCode::BAD_REQUEST
      );
   }

   #[test]
   fn test_unknown_languageは400になる() {
      assert_eq!(
         status_of(ApiError::UnknownLanguage("klingon".to_string())),
         StatusCode::BAD_REQUEST
      );
   }

   #[test]
   fn test_not_foundは404になる() {
      assert_eq!(
         status_of(ApiError::NotFound("Todo が見つかりません".to_string())),
         StatusCode::NOT_FOUND
      );
   }

   #[test]
   fn test_translation_serviceは502になる() {
      assert_eq!(
         status_of(ApiError::TranslationService("timeout".to_string())),
         StatusCode::BAD_GATEWAY
      );
   }

   #[test]
   fn test_infra_errorの翻訳サービスエラーは502に変換される() {
      let api_error: ApiError = InfraError::translation_service("接続失敗").into();
      assert!(matches!(api_error, ApiError::TranslationService(_)));
   }

   #[test]
   fn test_infra_errorのデータベースエラーは500に変換される() {
      let api_error: ApiError = InfraError::from(sqlx::Error::RowNotFound).into();
      assert_eq!(status_of(api_error), StatusCode::INTERNAL_SERVER_ERROR);
   }

   #[test]
   fn test_domain_errorのnot_foundは404に変換される() {
      let api_error: ApiError = DomainError::NotFound {
         entity_type: "Todo",
         id:          "dummy".to_string(),
      }
      .into();
      assert_eq!(status_of(api_error), StatusCode::NOT_FOUND);
   }
}
