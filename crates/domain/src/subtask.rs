//! # サブタスク
//!
//! Todo を分解した個々のサブタスクを管理する。
//! サブタスクは AI 生成またはフォールバックヒューリスティックで作成され、
//! 親 Todo に紐づけて永続化される。

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DomainError, todo::TodoId};

/// サブタスクテキストの最大文字数
const TEXT_MAX_CHARS: usize = 500;

/// サブタスク ID（一意識別子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct SubTaskId(Uuid);

impl SubTaskId {
    /// 新しいサブタスク ID を生成する
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// 既存の UUID からサブタスク ID を作成する
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// 内部の UUID 参照を取得する
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubTaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// サブタスクエンティティ
///
/// 親 Todo が削除されると、そのサブタスクも一緒に削除される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTask {
    id:      SubTaskId,
    todo_id: TodoId,
    text:    String,
    done:    bool,
}

impl SubTask {
    /// 新規サブタスクを作成する
    ///
    /// # エラー
    ///
    /// テキストが空、または 500 文字を超える場合は
    /// `DomainError::Validation` を返す。
    pub fn new(
        id: SubTaskId,
        todo_id: TodoId,
        text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let text = text.into().trim().to_string();

        if text.is_empty() {
            return Err(DomainError::Validation(
                "サブタスクのテキストは必須です".to_string(),
            ));
        }

        if text.chars().count() > TEXT_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "サブタスクのテキストは{TEXT_MAX_CHARS}文字以内である必要があります"
            )));
        }

        Ok(Self {
            id,
            todo_id,
            text,
            done: false,
        })
    }

    /// DB から読み出した値でエンティティを復元する
    pub fn from_db(id: SubTaskId, todo_id: TodoId, text: String, done: bool) -> Self {
        Self {
            id,
            todo_id,
            text,
            done,
        }
    }

    pub fn id(&self) -> &SubTaskId {
        &self.id
    }

    pub fn todo_id(&self) -> &TodoId {
        &self.todo_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// 完了状態を設定する（冪等）
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_空テキストでバリデーションエラーになる() {
        let result = SubTask::new(SubTaskId::new(), TodoId::new(), "  ");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_500文字を超えるテキストでバリデーションエラーになる() {
        let long = "x".repeat(501);
        let result = SubTask::new(SubTaskId::new(), TodoId::new(), long);
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_新規作成時は未完了() {
        let subtask = SubTask::new(SubTaskId::new(), TodoId::new(), "材料を調べる").unwrap();

        assert_eq!(subtask.text(), "材料を調べる");
        assert!(!subtask.done());
    }

    #[test]
    fn test_set_doneで完了状態を切り替えられる() {
        let mut subtask = SubTask::new(SubTaskId::new(), TodoId::new(), "実装する").unwrap();

        subtask.set_done(true);
        assert!(subtask.done());

        subtask.set_done(true);
        assert!(subtask.done());
    }
}
