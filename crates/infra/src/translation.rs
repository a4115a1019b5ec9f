//! # 翻訳サービスクライアント
//!
//! LibreTranslate 互換 API を呼び出す翻訳クライアント。
//!
//! ## 外部インターフェース
//!
//! - `GET {base}/languages` - 言語カタログ（`[{ code, name }]`）の取得
//! - `POST {base}/translate` - テキスト翻訳
//!
//! ## 設計方針
//!
//! - **単一試行**: リトライ・バックオフは行わない
//! - **タイムアウト必須**: 外部呼び出しの無制限ブロックを防ぐ（10 秒）
//! - **キャッシュなし**: カタログは呼び出しごとに取得する

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use todoflow_domain::language::{Language, LanguageCatalog, LanguageCode};

use crate::error::InfraError;

/// HTTP タイムアウト（外部翻訳サービス向け）
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 翻訳サービスクライアントトレイト
///
/// ユースケース層から利用する抽象化。テストではスタブに差し替える。
#[async_trait]
pub trait TranslationClient: Send + Sync {
   /// 言語カタログを取得する
   ///
   /// # エラー
   ///
   /// ネットワーク障害・HTTP エラー時は
   /// `InfraErrorKind::TranslationService` を返す。
   async fn languages(&self) -> Result<LanguageCatalog, InfraError>;

   /// テキストを指定言語に翻訳する
   ///
   /// 翻訳元言語はサービス側の自動判定に任せる。
   async fn translate(&self, text: &str, target: &LanguageCode) -> Result<String, InfraError>;
}

/// `GET /languages` のレスポンス要素
#[derive(Debug, Deserialize)]
struct LanguageDto {
   code: String,
   name: String,
}

/// `POST /translate` のリクエストボディ
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
   q:      &'a str,
   source: &'a str,
   target: &'a str,
   format: &'a str,
}

/// `POST /translate` のレスポンスボディ
#[derive(Debug, Deserialize)]
struct TranslateResponse {
   #[serde(rename = "translatedText")]
   translated_text: String,
}

/// LibreTranslate 互換 API のクライアント実装
#[derive(Clone)]
pub struct LibreTranslateClient {
   base_url: String,
   client:   reqwest::Client,
}

impl LibreTranslateClient {
   /// 新しいクライアントを作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: 翻訳サービスのベース URL（例: `https://libretranslate.com`）
   pub fn new(base_url: &str) -> Result<Self, InfraError> {
      let client = reqwest::Client::builder()
         .timeout(REQUEST_TIMEOUT)
         .build()
         .map_err(|e| InfraError::unexpected(format!("HTTP クライアント構築失敗: {e}")))?;

      Ok(Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         client,
      })
   }
}

#[async_trait]
impl TranslationClient for LibreTranslateClient {
   async fn languages(&self) -> Result<LanguageCatalog, InfraError> {
      let url = format!("{}/languages", self.base_url);

      let response = self
         .client
         .get(&url)
         .send()
         .await
         .map_err(|e| InfraError::translation_service(format!("カタログ取得失敗: {e}")))?;

      match response.status() {
         status if status.is_success() => {
            let body = response
               .json::<Vec<LanguageDto>>()
               .await
               .map_err(|e| InfraError::translation_service(format!("カタログ解釈失敗: {e}")))?;

            let languages = body
               .into_iter()
               .map(|dto| Language {
                  code: dto.code,
                  name: dto.name,
               })
               .collect();

            Ok(LanguageCatalog::new(languages))
         }
         status => Err(InfraError::translation_service(format!(
            "カタログ取得で予期しないステータス: {status}"
         ))),
      }
   }

   async fn translate(&self, text: &str, target: &LanguageCode) -> Result<String, InfraError> {
      let url = format!("{}/translate", self.base_url);
      let request = TranslateRequest {
         q:      text,
         source: "auto",
         target: target.as_str(),
         format: "text",
      };

      let response = self
         .client
         .post(&url)
         .json(&request)
         .send()
         .await
         .map_err(|e| InfraError::translation_service(format!("翻訳リクエスト失敗: {e}")))?;

      match response.status() {
         status if status.is_success() => {
            let body = response
               .json::<TranslateResponse>()
               .await
               .map_err(|e| InfraError::translation_service(format!("翻訳結果の解釈失敗: {e}")))?;
            Ok(body.translated_text)
         }
         status => {
            let body = response.text().await.unwrap_or_default();
            Err(InfraError::translation_service(format!(
               "翻訳で予期しないステータス {status}: {body}"
            )))
         }
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_base_urlの末尾スラッシュは除去される() {
      let client = LibreTranslateClient::new("https://libretranslate.com/").unwrap();
      assert_eq!(client.base_url, "https://libretranslate.com");
   }

   #[test]
   fn test_translate_requestのserialize形状() {
      let request = TranslateRequest {
         q:      "Buy milk",
         source: "auto",
         target: "fr",
         format: "text",
      };
      let json = serde_json::to_value(&request).unwrap();

      assert_eq!(
         json,
         serde_json::json!({
            "q": "Buy milk",
            "source": "auto",
            "target": "fr",
            "format": "text"
         })
      );
   }

   #[test]
   fn test_translate_responseのdeserialize() {
      let body = r#"{"translatedText": "Acheter du lait"}"#;
      let response: TranslateResponse = serde_json::from_str(body).unwrap();
      assert_eq!(response.translated_text, "Acheter du lait");
   }

   #[test]
   fn test_language_dtoのdeserialize() {
      let body = r#"[{"code": "en", "name": "English"}, {"code": "fr", "name": "French"}]"#;
      let dtos: Vec<LanguageDto> = serde_json::from_str(body).unwrap();

      assert_eq!(dtos.len(), 2);
      assert_eq!(dtos[1].code, "fr");
      assert_eq!(dtos[1].name, "French");
   }
}
