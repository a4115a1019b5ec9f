//! # TodoFlow API サーバーエントリーポイント
//!
//! インフラ（DB・外部サービスクライアント）を初期化し、
//! ルーターを構築してサーバーを起動する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `DATABASE_URL` | No | SQLite 接続 URL |
//! | `LIBRETRANSLATE_URL` | No | 翻訳サービスのベース URL |
//! | `OPENAI_API_KEY` | No | 生成サービスのクレデンシャル |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p todoflow-api
//!
//! # 本番環境
//! LOG_FORMAT=json OPENAI_API_KEY=sk-... cargo run -p todoflow-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use todoflow_api::{
   app_builder::build_router,
   config::ApiConfig,
   handler::{SubtaskState, TodoState, TranslationState},
   usecase::{SubtaskUseCaseImpl, TodoUseCaseImpl, TranslationUseCaseImpl},
};
use todoflow_infra::{
   db,
   generation::{FallbackSubtaskGenerator, OpenAiSubtaskGenerator, SubtaskGenerator},
   repository::{SqliteSubTaskRepository, SqliteTodoRepository},
   translation::LibreTranslateClient,
};
use todoflow_shared::observability::{LogFormat, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   init_tracing(LogFormat::from_env());

   // 設定読み込み
   let config = ApiConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "TodoFlow API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成し、スキーマを保証する
   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   db::init_schema(&pool)
      .await
      .context("スキーマ初期化に失敗しました")?;
   tracing::info!("データベースに接続しました: {}", config.database_url);

   // Todo 関連の依存コンポーネント
   let todo_usecase = TodoUseCaseImpl::new(
      SqliteTodoRepository::new(pool.clone()),
      SqliteSubTaskRepository::new(pool.clone()),
   );
   let todo_state = Arc::new(TodoState {
      usecase: todo_usecase,
   });

   // 翻訳関連の依存コンポーネント
   let translation_client = LibreTranslateClient::new(&config.translation.base_url)
      .context("翻訳クライアントの構築に失敗しました")?;
   let translation_usecase =
      TranslationUseCaseImpl::new(SqliteTodoRepository::new(pool.clone()), translation_client);
   let translation_state = Arc::new(TranslationState {
      usecase: translation_usecase,
   });

   // サブタスク生成の依存コンポーネント
   // クレデンシャルの有無で生成器を起動時に一度だけ選択する
   let generator: Arc<dyn SubtaskGenerator> = match &config.generation.api_key {
      Some(api_key) => {
         tracing::info!(
            model = %config.generation.model,
            "サブタスク生成にチャット補完 API を使用します"
         );
         Arc::new(
            OpenAiSubtaskGenerator::new(api_key, &config.generation.model)
               .context("生成クライアントの構築に失敗しました")?,
         )
      }
      None => {
         tracing::info!("クレデンシャル未設定のためフォールバック生成を使用します");
         Arc::new(FallbackSubtaskGenerator::new())
      }
   };
   let subtask_usecase = SubtaskUseCaseImpl::new(
      SqliteTodoRepository::new(pool.clone()),
      SqliteSubTaskRepository::new(pool),
      generator,
   );
   let subtask_state = Arc::new(SubtaskState {
      usecase: subtask_usecase,
   });

   // ルーター構築
   let app = build_router(todo_state, translation_state, subtask_state);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("TodoFlow API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
