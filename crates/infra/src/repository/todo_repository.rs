//! # TodoRepository
//!
//! Todo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **即時永続化**: すべての操作は単一クエリで即座にコミットされる
//! - **作成順の一覧**: `created_at`（同時刻の場合は時系列 UUID）でソート
//! - **存在チェックは戻り値で**: 更新・削除は対象行の有無を bool で返し、
//!   NotFound への変換はユースケース層の責務とする

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use todoflow_domain::{
   language::LanguageCode,
   todo::{Title, Todo, TodoId},
};
use uuid::Uuid;

use crate::error::InfraError;

/// Todo リポジトリトレイト
///
/// Todo の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
   /// Todo を保存する
   async fn insert(&self, todo: &Todo) -> Result<(), InfraError>;

   /// すべての Todo を作成順で取得する
   async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

   /// ID で Todo を検索する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(todo))`: Todo が見つかった場合
   /// - `Ok(None)`: Todo が見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError>;

   /// 完了状態を設定する
   ///
   /// 同じ値を複数回設定しても結果は変わらない（冪等）。
   /// 対象行が存在しない場合は `Ok(false)` を返す。
   async fn set_completed(&self, id: &TodoId, completed: bool) -> Result<bool, InfraError>;

   /// 翻訳結果を保存する
   ///
   /// 既存の翻訳結果は上書きされる。
   /// 対象行が存在しない場合は `Ok(false)` を返す。
   async fn set_translation(
      &self,
      id: &TodoId,
      translated_text: &str,
      translated_lang: &LanguageCode,
   ) -> Result<bool, InfraError>;

   /// Todo を削除する
   ///
   /// サブタスクも連鎖削除される（外部キー制約）。
   /// 対象行が存在しない場合は `Ok(false)` を返す。
   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError>;
}

/// DB 行と Todo エンティティの中間表現
#[derive(sqlx::FromRow)]
struct TodoRow {
   id:              String,
   title:           String,
   description:     Option<String>,
   completed:       bool,
   created_at:      DateTime<Utc>,
   translated_text: Option<String>,
   translated_lang: Option<String>,
}

impl TodoRow {
   /// DB 行からドメインエンティティを復元する
   fn into_todo(self) -> Result<Todo, InfraError> {
      let id = Uuid::parse_str(&self.id).map_err(|e| InfraError::unexpected(e.to_string()))?;
      let title = Title::new(self.title).map_err(|e| InfraError::unexpected(e.to_string()))?;
      let translated_lang = self
         .translated_lang
         .map(LanguageCode::new)
         .transpose()
         .map_err(|e| InfraError::unexpected(e.to_string()))?;

      Ok(Todo::from_db(
         TodoId::from_uuid(id),
         title,
         self.description,
         self.completed,
         self.created_at,
         self.translated_text,
         translated_lang,
      ))
   }
}

/// SQLite 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
   pool: SqlitePool,
}

impl SqliteTodoRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: SqlitePool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
   async fn insert(&self, todo: &Todo) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO todos (id, title, description, completed, created_at, translated_text, translated_lang)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
      )
      .bind(todo.id().to_string())
      .bind(todo.title().as_str())
      .bind(todo.description())
      .bind(todo.completed())
      .bind(todo.created_at())
      .bind(todo.translated_text())
      .bind(todo.translated_lang().map(|l| l.as_str().to_string()))
      .execute(&self.pool)
      .await?;

      Ok(())
   }

   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      let rows = sqlx::query_as::<_, TodoRow>(
         r#"
            SELECT id, title, description, completed, created_at, translated_text, translated_lang
            FROM todos
            ORDER BY created_at ASC, id ASC
            "#,
      )
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(TodoRow::into_todo).collect()
   }

   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
      let row = sqlx::query_as::<_, TodoRow>(
         r#"
            SELECT id, title, description, completed, created_at, translated_text, translated_lang
            FROM todos
            WHERE id = ?
            "#,
      )
      .bind(id.to_string())
      .fetch_optional(&self.pool)
      .await?;

      row.map(TodoRow::into_todo).transpose()
   }

   async fn set_completed(&self, id: &TodoId, completed: bool) -> Result<bool, InfraError> {
      let result = sqlx::query("UPDATE todos SET completed = ? WHERE id = ?")
         .bind(completed)
         .bind(id.to_string())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }

   async fn set_translation(
      &self,
      id: &TodoId,
      translated_text: &str,
      translated_lang: &LanguageCode,
   ) -> Result<bool, InfraError> {
      let result =
         sqlx::query("UPDATE todos SET translated_text = ?, translated_lang = ? WHERE id = ?")
            .bind(translated_text)
            .bind(translated_lang.as_str())
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

      Ok(result.rows_affected() > 0)
   }

   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM todos WHERE id = ?")
         .bind(id.to_string())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use todoflow_domain::todo::Title;

   use super::*;
   use crate::db;

   fn new_todo(title: &str) -> Todo {
      Todo::new(TodoId::new(), Title::new(title).unwrap(), None, Utc::now())
   }

   #[tokio::test]
   async fn test_insertしたtodoをidで取得できる() {
      let pool = db::create_test_pool().await;
      let repo = SqliteTodoRepository::new(pool);

      let todo = new_todo("牛乳を買う");
      repo.insert(&todo).await.unwrap();

      let found = repo.find_by_id(todo.id()).await.unwrap().unwrap();
      assert_eq!(found.title().as_str(), "牛乳を買う");
      assert!(!found.completed());
   }

   #[tokio::test]
   async fn test_find_allは作成順で返す() {
      let pool = db::create_test_pool().await;
      let repo = SqliteTodoRepository::new(pool);

      let first = new_todo("最初");
      let second = new_todo("次");
      let third = new_todo("最後");
      repo.insert(&first).await.unwrap();
      repo.insert(&second).await.unwrap();
      repo.insert(&third).await.unwrap();

      let all = repo.find_all().await.unwrap();
      let titles: Vec<&str> = all.iter().map(|t| t.title().as_str()).collect();
      assert_eq!(titles, vec!["最初", "次", "最後"]);
   }

   #[tokio::test]
   async fn test_set_completedは冪等() {
      let pool = db::create_test_pool().await;
      let repo = SqliteTodoRepository::new(pool);

      let todo = new_todo("掃除");
      repo.insert(&todo).await.unwrap();

      assert!(repo.set_completed(todo.id(), true).await.unwrap());
      assert!(repo.set_completed(todo.id(), true).await.unwrap());

      let found = repo.find_by_id(todo.id()).await.unwrap().unwrap();
      assert!(found.completed());
   }

   #[tokio::test]
   async fn test_存在しないidへのset_completedはfalse() {
      let pool = db::create_test_pool().await;
      let repo = SqliteTodoRepository::new(pool);

      let updated = repo.set_completed(&TodoId::new(), true).await.unwrap();
      assert!(!updated);
   }

   #[tokio::test]
   async fn test_set_translationで翻訳結果が保存される() {
      let pool = db::create_test_pool().await;
      let repo = SqliteTodoRepository::new(pool);

      let todo = new_todo("牛乳を買う");
      repo.insert(&todo).await.unwrap();

      let lang = LanguageCode::new("fr").unwrap();
      assert!(
         repo
            .set_translation(todo.id(), "Acheter du lait", &lang)
            .await
            .unwrap()
      );

      let found = repo.find_by_id(todo.id()).await.unwrap().unwrap();
      assert_eq!(found.translated_text(), Some("Acheter du lait"));
      assert_eq!(found.translated_lang().unwrap().as_str(), "fr");
   }

   #[tokio::test]
   async fn test_deleteした後は取得できない() {
      let pool = db::create_test_pool().await;
      let repo = SqliteTodoRepository::new(pool);

      let todo = new_todo("削除対象");
      repo.insert(&todo).await.unwrap();

      assert!(repo.delete(todo.id()).await.unwrap());
      assert!(repo.find_by_id(todo.id()).await.unwrap().is_none());

      // 2 回目の削除は false
      assert!(!repo.delete(todo.id()).await.unwrap());
   }
}
