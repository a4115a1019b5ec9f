//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 全レイヤーで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - よく使うエラー種別は便利コンストラクタで提供し、URI のハードコードを排除

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://todoflow.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// すべてのエンドポイントで統一されたエラーレスポンス形式。
/// `type` フィールドは URI で問題の種類を識別する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   ///
   /// サービス固有のエラー種別を作成する場合に使用する。
   /// `error_type_suffix` はベース URI に付加される（例: `"unknown-language"`）。
   pub fn new(
      error_type_suffix: &str,
      title: impl Into<String>,
      status: u16,
      detail: impl Into<String>,
   ) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
         title: title.into(),
         status,
         detail: detail.into(),
      }
   }

   /// 400 Bad Request
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new("bad-request", "Bad Request", 400, detail)
   }

   /// 404 Not Found
   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new("not-found", "Not Found", 404, detail)
   }

   /// 500 Internal Server Error
   pub fn internal_error(detail: impl Into<String>) -> Self {
      Self::new("internal-error", "Internal Server Error", 500, detail)
   }

   /// 502 Bad Gateway（外部サービス障害）
   pub fn bad_gateway(detail: impl Into<String>) -> Self {
      Self::new("bad-gateway", "Bad Gateway", 502, detail)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_error_typeがベースuriを含む() {
      let response = ErrorResponse::new("unknown-language", "Bad Request", 400, "klingon");

      assert_eq!(
         response.error_type,
         "https://todoflow.example.com/errors/unknown-language"
      );
      assert_eq!(response.status, 400);
   }

   #[test]
   fn test_serializeでtypeフィールドにリネームされる() {
      let response = ErrorResponse::bad_request("タイトルは必須です");
      let json = serde_json::to_value(&response).unwrap();

      assert_eq!(
         json.get("type").and_then(|v| v.as_str()),
         Some("https://todoflow.example.com/errors/bad-request")
      );
      assert_eq!(json.get("status").and_then(|v| v.as_u64()), Some(400));
   }

   #[test]
   fn test_便利コンストラクタが正しいステータスを設定する() {
      assert_eq!(ErrorResponse::bad_request("x").status, 400);
      assert_eq!(ErrorResponse::not_found("x").status, 404);
      assert_eq!(ErrorResponse::internal_error("x").status, 500);
      assert_eq!(ErrorResponse::bad_gateway("x").status, 502);
   }
}
