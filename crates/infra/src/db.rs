//! # SQLite データベース接続管理
//!
//! データベース接続プールの作成とスキーマ初期化を行う。
//!
//! ## 設計方針
//!
//! - **接続プール**: 毎回接続を張り直すオーバーヘッドを避け、接続を再利用
//! - **sqlx 採用**: 非同期サポート、型安全なクエリ
//! - **SQLite 専用**: ローカルファイルに永続化する単一テーブル構成
//! - **マイグレーションなし**: 起動時に `CREATE TABLE IF NOT EXISTS` で
//!   スキーマを保証する（マイグレーション管理はスコープ外）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todoflow_infra::db;
//!
//! async fn example() -> Result<(), sqlx::Error> {
//!     let pool = db::create_pool("sqlite://todoflow.db?mode=rwc").await?;
//!     db::init_schema(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// SQLite 接続プールを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したプールを
/// アプリケーション全体で共有する。
///
/// # 引数
///
/// * `database_url` - SQLite 接続 URL
///   - 形式: `sqlite://path/to/file.db` または `sqlite::memory:`
///   - ファイルが存在しない場合は作成される
///
/// # 設定値
///
/// - `max_connections(5)`: 最大接続数。SQLite は単一ライターのため控えめに
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
/// - `foreign_keys(true)`: 親 Todo 削除時にサブタスクを連鎖削除する
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
}

/// スキーマを初期化する
///
/// 起動時に一度呼び出す。適用済みの場合は何もしない
/// （`CREATE TABLE IF NOT EXISTS`）。
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id              TEXT PRIMARY KEY,
            title           TEXT NOT NULL,
            description     TEXT,
            completed       INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL,
            translated_text TEXT,
            translated_lang TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subtasks (
            id      TEXT PRIMARY KEY,
            todo_id TEXT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
            text    TEXT NOT NULL,
            done    INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// テスト用のインメモリ SQLite プールを作成する
///
/// インメモリ DB は接続ごとに独立するため、単一接続のプールを使用し、
/// アイドルタイムアウトで DB が破棄されないようにする。
#[cfg(any(test, feature = "test-utils"))]
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("インメモリ接続 URL のパースに失敗しました")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("インメモリ DB への接続に失敗しました");

    init_schema(&pool)
        .await
        .expect("スキーマ初期化に失敗しました");

    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_インメモリdbでスキーマを初期化できる() {
        let pool = create_test_pool().await;

        // 2 回呼んでも冪等
        init_schema(&pool).await.unwrap();

        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('todos', 'subtasks')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count.0, 2, "todos と subtasks テーブルが存在すること");
    }
}
