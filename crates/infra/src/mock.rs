//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモックリポジトリと
//! 外部サービスのスタブ。`test-utils` feature を有効にすることで、
//! 他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todoflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todoflow_domain::{
   language::{Language, LanguageCatalog, LanguageCode},
   subtask::{SubTask, SubTaskId},
   todo::{Todo, TodoId},
};

use crate::{
   error::InfraError,
   generation::SubtaskGenerator,
   repository::{SubTaskRepository, TodoRepository},
   translation::TranslationClient,
};

// ===== MockTodoRepository =====

/// インメモリ実装の TodoRepository
///
/// 挿入順を保持するため、一覧は常に作成順で返る。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
   todos: Arc<Mutex<Vec<Todo>>>,
}

impl MockTodoRepository {
   pub fn new() -> Self {
      Self {
         todos: Arc::new(Mutex::new(Vec::new())),
      }
   }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
   async fn insert(&self, todo: &Todo) -> Result<(), InfraError> {
      self.todos.lock().unwrap().push(todo.clone());
      Ok(())
   }

   async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
      Ok(self.todos.lock().unwrap().clone())
   }

   async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, InfraError> {
      Ok(self
         .todos
         .lock()
         .unwrap()
         .iter()
         .find(|t| t.id() == id)
         .cloned())
   }

   async fn set_completed(&self, id: &TodoId, completed: bool) -> Result<bool, InfraError> {
      let mut todos = self.todos.lock().unwrap();
      match todos.iter_mut().find(|t| t.id() == id) {
         Some(todo) => {
            todo.set_completed(completed);
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn set_translation(
      &self,
      id: &TodoId,
      translated_text: &str,
      translated_lang: &LanguageCode,
   ) -> Result<bool, InfraError> {
      let mut todos = self.todos.lock().unwrap();
      match todos.iter_mut().find(|t| t.id() == id) {
         Some(todo) => {
            todo.set_translation(translated_text, translated_lang.clone());
            Ok(true)
         }
         None => Ok(false),
      }
   }

   async fn delete(&self, id: &TodoId) -> Result<bool, InfraError> {
      let mut todos = self.todos.lock().unwrap();
      let before = todos.len();
      todos.retain(|t| t.id() != id);
      Ok(todos.len() < before)
   }
}

// ===== MockSubTaskRepository =====

/// インメモリ実装の SubTaskRepository
#[derive(Clone, Default)]
pub struct MockSubTaskRepository {
   subtasks: Arc<Mutex<Vec<SubTask>>>,
}

impl MockSubTaskRepository {
   pub fn new() -> Self {
      Self {
         subtasks: Arc::new(Mutex::new(Vec::new())),
      }
   }
}

#[async_trait]
impl SubTaskRepository for MockSubTaskRepository {
   async fn insert_all(&self, subtasks: &[SubTask]) -> Result<(), InfraError> {
      self.subtasks.lock().unwrap().extend_from_slice(subtasks);
      Ok(())
   }

   async fn find_by_todo(&self, todo_id: &TodoId) -> Result<Vec<SubTask>, InfraError> {
      Ok(self
         .subtasks
         .lock()
         .unwrap()
         .iter()
         .filter(|s| s.todo_id() == todo_id)
         .cloned()
         .collect())
   }

   async fn set_done(&self, id: &SubTaskId, done: bool) -> Result<bool, InfraError> {
      let mut subtasks = self.subtasks.lock().unwrap();
      match subtasks.iter_mut().find(|s| s.id() == id) {
         Some(subtask) => {
            subtask.set_done(done);
            Ok(true)
         }
         None => Ok(false),
      }
   }
}

// ===== StubTranslationClient =====

/// 固定レスポンスを返す翻訳クライアントのスタブ
///
/// `failing` を true にするとすべての呼び出しが
/// `TranslationService` エラーになる。
#[derive(Clone)]
pub struct StubTranslationClient {
   catalog:     Vec<Language>,
   translation: String,
   failing:     bool,
}

impl StubTranslationClient {
   /// 英語・フランス語を含むカタログと固定の翻訳結果を持つスタブを作成する
   pub fn new(translation: impl Into<String>) -> Self {
      Self {
         catalog:     vec![
            Language {
               code: "en".to_string(),
               name: "English".to_string(),
            },
            Language {
               code: "fr".to_string(),
               name: "French".to_string(),
            },
         ],
         translation: translation.into(),
         failing:     false,
      }
   }

   /// すべての呼び出しが失敗するスタブを作成する
   pub fn failing() -> Self {
      Self {
         catalog:     Vec::new(),
         translation: String::new(),
         failing:     true,
      }
   }
}

#[async_trait]
impl TranslationClient for StubTranslationClient {
   async fn languages(&self) -> Result<LanguageCatalog, InfraError> {
      if self.failing {
         return Err(InfraError::translation_service("stub: 接続失敗"));
      }
      Ok(LanguageCatalog::new(self.catalog.clone()))
   }

   async fn translate(&self, _text: &str, _target: &LanguageCode) -> Result<String, InfraError> {
      if self.failing {
         return Err(InfraError::translation_service("stub: 接続失敗"));
      }
      Ok(self.translation.clone())
   }
}

// ===== サブタスク生成器のスタブ =====

/// 固定のサブタスク一覧を返す生成器スタブ
#[derive(Clone)]
pub struct FixedSubtaskGenerator {
   items: Vec<String>,
}

impl FixedSubtaskGenerator {
   pub fn new(items: Vec<&str>) -> Self {
      Self {
         items: items.into_iter().map(String::from).collect(),
      }
   }
}

#[async_trait]
impl SubtaskGenerator for FixedSubtaskGenerator {
   async fn generate(
      &self,
      _source_text: &str,
      _max_subtasks: usize,
   ) -> Result<Vec<String>, InfraError> {
      Ok(self.items.clone())
   }
}

/// 常に失敗する生成器スタブ（フォールバック経路のテスト用）
#[derive(Clone, Copy, Default)]
pub struct FailingSubtaskGenerator;

#[async_trait]
impl SubtaskGenerator for FailingSubtaskGenerator {
   async fn generate(
      &self,
      _source_text: &str,
      _max_subtasks: usize,
   ) -> Result<Vec<String>, InfraError> {
      Err(InfraError::generation_service("stub: 生成サービス到達不可"))
   }
}
