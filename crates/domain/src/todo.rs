//! # Todo
//!
//! Todo エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: TodoId は UUID をラップし、型安全性を確保
//! - **不変性**: `id` と `created_at` は作成後に変更不可、その他の変更はメソッド経由
//! - **バリデーション**: [`Title`] の生成時に検証ロジックを実行し、
//!   空タイトルの Todo が存在しないことを型レベルで保証する
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use todoflow_domain::todo::{Title, Todo, TodoId};
//!
//! let todo = Todo::new(
//!     TodoId::new(),
//!     Title::new("牛乳を買う")?,
//!     Some("帰り道にスーパーへ寄る".to_string()),
//!     chrono::Utc::now(),
//! );
//!
//! assert!(!todo.completed());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, language::LanguageCode};

/// タイトルの最大文字数
const TITLE_MAX_CHARS: usize = 300;

/// Todo ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
/// Newtype パターンで型安全性を確保。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct TodoId(Uuid);

impl TodoId {
    /// 新しい Todo ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID から Todo ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

/// Todo タイトル（値オブジェクト）
///
/// 生成時にバリデーションを実行し、空タイトルの作成を防ぐ。
///
/// # 不変条件
///
/// - 前後の空白を除去した後、空文字列ではない
/// - 300 文字以内
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    /// タイトルを作成する
    ///
    /// 前後の空白は除去される。
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "タイトルは必須です".to_string(),
            ));
        }

        if value.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "タイトルは{TITLE_MAX_CHARS}文字以内である必要があります"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Todo エンティティ
///
/// ユーザーが管理する単一のタスク。
/// 翻訳結果（`translated_text` / `translated_lang`）は翻訳操作の実行時に
/// 書き込まれ、レコードに永続化される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:              TodoId,
    title:           Title,
    description:     Option<String>,
    completed:       bool,
    created_at:      DateTime<Utc>,
    translated_text: Option<String>,
    translated_lang: Option<LanguageCode>,
}

impl Todo {
    /// 新規 Todo を作成する
    ///
    /// `completed` は false、翻訳結果は未設定で初期化される。
    pub fn new(
        id: TodoId,
        title: Title,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed: false,
            created_at,
            translated_text: None,
            translated_lang: None,
        }
    }

    /// DB から読み出した値でエンティティを復元する
    ///
    /// バリデーションは実行しない。DB に保存されている値は
    /// 作成時に検証済みであることを前提とする。
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: TodoId,
        title: Title,
        description: Option<String>,
        completed: bool,
        created_at: DateTime<Utc>,
        translated_text: Option<String>,
        translated_lang: Option<LanguageCode>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            created_at,
            translated_text,
            translated_lang,
        }
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn translated_text(&self) -> Option<&str> {
        self.translated_text.as_deref()
    }

    pub fn translated_lang(&self) -> Option<&LanguageCode> {
        self.translated_lang.as_ref()
    }

    /// 完了状態を設定する
    ///
    /// 同じ値を複数回設定しても結果は変わらない（冪等）。
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// 翻訳結果をエンティティに反映する
    ///
    /// 既存の翻訳結果は上書きされる。
    pub fn set_translation(&mut self, text: impl Into<String>, lang: LanguageCode) {
        self.translated_text = Some(text.into());
        self.translated_lang = Some(lang);
    }

    /// 翻訳・サブタスク生成の入力となるテキストを組み立てる
    ///
    /// タイトルと説明を結合する。説明がない場合はタイトルのみ。
    pub fn source_text(&self) -> String {
        match &self.description {
            Some(desc) if !desc.is_empty() => format!("{}\n\n{}", self.title, desc),
            _ => self.title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn sample_todo() -> Todo {
        Todo::new(
            TodoId::new(),
            Title::new("牛乳を買う").unwrap(),
            None,
            Utc::now(),
        )
    }

    // ===== Title のテスト =====

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_空タイトルでバリデーションエラーになる(#[case] input: &str) {
        let result = Title::new(input);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_前後の空白が除去される() {
        let title = Title::new("  牛乳を買う  ").unwrap();
        assert_eq!(title.as_str(), "牛乳を買う");
    }

    #[test]
    fn test_300文字を超えるタイトルでバリデーションエラーになる() {
        let long = "あ".repeat(301);
        assert!(matches!(
            Title::new(long),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_300文字ちょうどのタイトルは有効() {
        let max = "a".repeat(300);
        assert!(Title::new(max).is_ok());
    }

    // ===== Todo のテスト =====

    #[test]
    fn test_新規作成時は未完了で翻訳結果なし() {
        let todo = sample_todo();

        assert!(!todo.completed());
        assert!(todo.translated_text().is_none());
        assert!(todo.translated_lang().is_none());
    }

    #[test]
    fn test_set_completedは冪等() {
        let mut todo = sample_todo();

        todo.set_completed(true);
        assert!(todo.completed());

        // 同じ値を再設定しても true のまま
        todo.set_completed(true);
        assert!(todo.completed());

        todo.set_completed(false);
        assert!(!todo.completed());
    }

    #[test]
    fn test_set_translationで翻訳結果が上書きされる() {
        use crate::language::LanguageCode;

        let mut todo = sample_todo();
        todo.set_translation("Buy milk", LanguageCode::new("en").unwrap());
        todo.set_translation("Acheter du lait", LanguageCode::new("fr").unwrap());

        assert_eq!(todo.translated_text(), Some("Acheter du lait"));
        assert_eq!(todo.translated_lang().unwrap().as_str(), "fr");
    }

    #[test]
    fn test_source_textは説明がある場合に結合する() {
        let todo = Todo::new(
            TodoId::new(),
            Title::new("牛乳を買う").unwrap(),
            Some("低脂肪のもの".to_string()),
            Utc::now(),
        );

        assert_eq!(todo.source_text(), "牛乳を買う\n\n低脂肪のもの");
    }

    #[test]
    fn test_source_textは説明がない場合にタイトルのみ() {
        let todo = sample_todo();
        assert_eq!(todo.source_text(), "牛乳を買う");
    }

    #[test]
    fn test_todo_idは生成順にソート可能() {
        let first = TodoId::new();
        let second = TodoId::new();

        // UUID v7 はタイムスタンプ順
        assert!(first.as_uuid() <= second.as_uuid());
    }
}
