//! # 翻訳ユースケース
//!
//! Todo のタイトル・説明を指定言語に翻訳し、結果を永続化する。
//!
//! ## 処理の流れ
//!
//! 1. Todo を取得（存在しなければ NotFound）
//! 2. 翻訳サービスから言語カタログを取得
//! 3. ユーザー入力（言語名またはコード）をカタログと突き合わせて解決
//! 4. 翻訳を実行し、結果を Todo に保存
//!
//! カタログ取得・翻訳の失敗は 502 として呼び出し元に返る。
//! Todo 自体には影響しない（非致命的）。

use todoflow_domain::{language::LanguageCode, todo::TodoId};
use todoflow_infra::{repository::TodoRepository, translation::TranslationClient};

use crate::error::ApiError;

/// 翻訳結果
pub struct TranslatedText {
   /// 翻訳後のテキスト
   pub text: String,
   /// 解決された言語コード
   pub lang: LanguageCode,
}

/// 翻訳ユースケース実装
///
/// T: TodoRepository, C: TranslationClient
pub struct TranslationUseCaseImpl<T, C> {
   todo_repo: T,
   client:    C,
}

impl<T, C> TranslationUseCaseImpl<T, C>
where
   T: TodoRepository,
   C: TranslationClient,
{
   pub fn new(todo_repo: T, client: C) -> Self {
      Self { todo_repo, client }
   }

   /// Todo を指定言語に翻訳し、結果を永続化する
   ///
   /// `target` は言語名（`"French"`）またはコード（`"fr"`）。
   /// 大文字小文字は区別しない。
   pub async fn translate_todo(
      &self,
      id: &TodoId,
      target: &str,
   ) -> Result<TranslatedText, ApiError> {
      let todo = self
         .todo_repo
         .find_by_id(id)
         .await?
         .ok_or_else(|| ApiError::NotFound(format!("Todo が見つかりません: {id}")))?;

      let catalog = self.client.languages().await?;
      let lang = catalog.resolve(target)?;

      let text = self.client.translate(&todo.source_text(), &lang).await?;
      self.todo_repo.set_translation(id, &text, &lang).await?;

      tracing::info!(todo_id = %id, lang = %lang, "Todo を翻訳しました");
      Ok(TranslatedText { text, lang })
   }
}
