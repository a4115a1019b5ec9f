//! # アプリケーション設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。設定は起動時に一度だけ
//! 構築され、以降は変更されない。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | No | `3000` | ポート番号 |
//! | `DATABASE_URL` | No | `sqlite://todoflow.db?mode=rwc` | SQLite 接続 URL |
//! | `LIBRETRANSLATE_URL` | No | `https://libretranslate.com` | 翻訳サービスのベース URL |
//! | `OPENAI_API_KEY` | No | - | 生成サービスのクレデンシャル（未設定ならフォールバック生成） |
//! | `OPENAI_MODEL` | No | `gpt-4o-mini` | 生成サービスのモデル名 |
//! | `LOG_FORMAT` | No | `pretty` | ログ出力形式（`json` / `pretty`） |
//! | `RUST_LOG` | No | `info,todoflow=debug` | ログレベル |

use std::env;

/// API サーバーの設定
///
/// 起動時に一度だけ構築される不変の設定。
#[derive(Debug, Clone)]
pub struct ApiConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// SQLite 接続 URL
   pub database_url: String,
   /// 翻訳サービス設定
   pub translation: TranslationConfig,
   /// サブタスク生成設定
   pub generation: GenerationConfig,
}

/// 翻訳サービスの設定
#[derive(Debug, Clone)]
pub struct TranslationConfig {
   /// LibreTranslate 互換 API のベース URL
   pub base_url: String,
}

/// サブタスク生成の設定
///
/// `api_key` が未設定の場合、起動時にフォールバック生成器が選択される。
#[derive(Debug, Clone)]
pub struct GenerationConfig {
   /// API クレデンシャル（未設定可）
   pub api_key: Option<String>,
   /// 使用するモデル名
   pub model:   String,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   ///
   /// すべての変数にデフォルト値があるため、環境変数なしでも起動できる。
   ///
   /// # エラー
   ///
   /// `API_PORT` が数値として解釈できない場合はエラーを返す。
   pub fn from_env() -> anyhow::Result<Self> {
      let port = env::var("API_PORT").unwrap_or_else(|_| "3000".to_string());
      let port = port
         .parse()
         .map_err(|_| anyhow::anyhow!("API_PORT は有効なポート番号である必要があります: {port}"))?;

      Ok(Self {
         host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
         port,
         database_url: env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://todoflow.db?mode=rwc".to_string()),
         translation: TranslationConfig {
            base_url: env::var("LIBRETRANSLATE_URL")
               .unwrap_or_else(|_| "https://libretranslate.com".to_string()),
         },
         generation: GenerationConfig {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            model:   env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
         },
      })
   }
}
