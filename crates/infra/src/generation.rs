//! # サブタスク生成
//!
//! Todo をサブタスクに分解する生成器を提供する。
//!
//! ## 2 つの実装
//!
//! | 実装 | 経路 | 失敗 |
//! |------|------|------|
//! | [`OpenAiSubtaskGenerator`] | チャット補完 API を呼び出し、JSON 配列を要求 | あり（`GenerationService`） |
//! | [`FallbackSubtaskGenerator`] | 決定的な文字列ヒューリスティック | なし |
//!
//! どちらを使うかは起動時に一度だけ決定する（クレデンシャルの有無）。
//! プライマリが実行時に失敗した場合のフォールバック切り替えは
//! ユースケース層の責務。
//!
//! ## 保証
//!
//! フォールバック生成は入力によらず常に 3〜5 件の空でない文字列を返す。

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::InfraError;

/// 生成されるサブタスクの最小件数
pub const MIN_SUBTASKS: usize = 3;

/// 生成されるサブタスクの最大件数
pub const MAX_SUBTASKS: usize = 5;

/// HTTP タイムアウト（生成サービス向け）
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// チャット補完 API のエンドポイント
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// システムプロンプト
///
/// 応答を JSON の文字列配列のみに制限する。
const SYSTEM_PROMPT: &str = "You are an assistant that converts a single to-do item into a \
                             concise ordered list of clear subtasks. Output only a JSON array of \
                             subtasks (strings).";

/// 要求された件数を 3〜5 件の範囲に丸める
pub fn clamp_max_subtasks(requested: Option<usize>) -> usize {
   requested
      .unwrap_or(MAX_SUBTASKS)
      .clamp(MIN_SUBTASKS, MAX_SUBTASKS)
}

/// サブタスク生成器トレイト
///
/// ユースケース層から利用する抽象化。テストではスタブに差し替える。
#[async_trait]
pub trait SubtaskGenerator: Send + Sync {
   /// Todo のテキストからサブタスクを生成する
   ///
   /// # 引数
   ///
   /// - `source_text`: タイトルと説明を結合したテキスト
   /// - `max_subtasks`: 最大件数（3〜5 に丸め済みであること）
   async fn generate(
      &self,
      source_text: &str,
      max_subtasks: usize,
   ) -> Result<Vec<String>, InfraError>;
}

// =============================================================================
// OpenAiSubtaskGenerator（プライマリ経路）
// =============================================================================

/// チャット補完 API のレスポンス
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
   choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
   message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
   content: String,
}

/// チャット補完 API を使用するサブタスク生成器
#[derive(Clone)]
pub struct OpenAiSubtaskGenerator {
   endpoint: String,
   api_key:  String,
   model:    String,
   client:   reqwest::Client,
}

impl OpenAiSubtaskGenerator {
   /// 新しい生成器を作成する
   ///
   /// # 引数
   ///
   /// - `api_key`: API クレデンシャル（呼び出し側で存在を確認済みであること）
   /// - `model`: 使用するモデル名（例: `gpt-4o-mini`）
   pub fn new(api_key: &str, model: &str) -> Result<Self, InfraError> {
      let client = reqwest::Client::builder()
         .timeout(REQUEST_TIMEOUT)
         .build()
         .map_err(|e| InfraError::unexpected(format!("HTTP クライアント構築失敗: {e}")))?;

      Ok(Self {
         endpoint: CHAT_COMPLETIONS_URL.to_string(),
         api_key: api_key.to_string(),
         model: model.to_string(),
         client,
      })
   }
}

#[async_trait]
impl SubtaskGenerator for OpenAiSubtaskGenerator {
   async fn generate(
      &self,
      source_text: &str,
      max_subtasks: usize,
   ) -> Result<Vec<String>, InfraError> {
      let user_prompt = format!(
         "To-do item: {source_text}\n\nReturn up to {max_subtasks} subtasks as a JSON array. \
          Keep items short (under 80 chars each)."
      );
      let body = serde_json::json!({
         "model": self.model,
         "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": user_prompt },
         ],
         "max_tokens": 300,
         "temperature": 0.6,
         "n": 1,
      });

      let response = self
         .client
         .post(&self.endpoint)
         .bearer_auth(&self.api_key)
         .json(&body)
         .send()
         .await
         .map_err(|e| InfraError::generation_service(format!("生成リクエスト失敗: {e}")))?;

      let status = response.status();
      if !status.is_success() {
         let body = response.text().await.unwrap_or_default();
         return Err(InfraError::generation_service(format!(
            "生成で予期しないステータス {status}: {body}"
         )));
      }

      let completion = response
         .json::<ChatCompletionResponse>()
         .await
         .map_err(|e| InfraError::generation_service(format!("生成結果の解釈失敗: {e}")))?;

      let content = completion
         .choices
         .first()
         .map(|c| c.message.content.trim())
         .ok_or_else(|| InfraError::generation_service("応答に choices がありません"))?;

      parse_subtasks(content, max_subtasks)
         .ok_or_else(|| InfraError::generation_service("応答を文字列配列として解釈できません"))
   }
}

/// アシスタント応答をサブタスク一覧に解釈する
///
/// JSON 配列としてパースできればそれを使用し、できなければ
/// 行ごとの salvage を試みる。最小件数に満たない場合は `None`
/// （呼び出し側でフォールバックに切り替える）。
fn parse_subtasks(content: &str, max_subtasks: usize) -> Option<Vec<String>> {
   let mut items: Vec<String> = Vec::new();

   if let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(content) {
      items = values
         .into_iter()
         .filter_map(|v| match v {
            serde_json::Value::String(s) => Some(s.trim().to_string()),
            _ => None,
         })
         .filter(|s| !s.is_empty())
         .collect();
   }

   if items.is_empty() {
      // JSON でない場合は箇条書きの行を拾う
      items = content
         .lines()
         .map(|line| line.trim_matches(['-', '*', ' ', '.', '\t']).to_string())
         .filter(|line| !line.is_empty())
         .collect();
   }

   items.truncate(max_subtasks);

   if items.len() >= MIN_SUBTASKS {
      Some(items)
   } else {
      None
   }
}

// =============================================================================
// FallbackSubtaskGenerator（フォールバック経路）
// =============================================================================

/// 入力から分解できない場合に使用する汎用ステップ
const GENERIC_STEPS: [&str; 5] = [
   "要件を調査・整理する",
   "タスクを分解して見積もる",
   "主要な作業を実施する",
   "結果を確認して手直しする",
   "完了を報告・記録する",
];

/// 先頭項目の最大文字数（超過分は切り詰める）
const LEAD_ITEM_MAX_CHARS: usize = 80;

/// 決定的なヒューリスティックによるサブタスク生成器
///
/// ネットワークを使用せず、どんな入力に対しても必ず
/// 3〜5 件の空でない文字列を返す。
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSubtaskGenerator;

impl FallbackSubtaskGenerator {
   /// 新しいフォールバック生成器を作成する
   pub fn new() -> Self {
      Self
   }

   /// サブタスク一覧を生成する（失敗しない）
   ///
   /// 1. 改行があれば行単位で分割
   /// 2. なければ区切り文字（`:` `-` `—` `;` `,`）で分割
   /// 3. 分割できなければ入力自体を先頭項目にする
   /// 4. 最小件数に満たない分は汎用ステップで補う
   pub fn generate_list(&self, source_text: &str, max_subtasks: usize) -> Vec<String> {
      let max = max_subtasks.clamp(MIN_SUBTASKS, MAX_SUBTASKS);
      let text = source_text.trim();

      let mut items: Vec<String> = if text.contains('\n') {
         text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect()
      } else {
         Vec::new()
      };

      if items.len() < 2 {
         for sep in [':', '-', '—', ';', ','] {
            let parts: Vec<String> = text
               .split(sep)
               .map(str::trim)
               .filter(|part| !part.is_empty())
               .map(String::from)
               .collect();
            if parts.len() > 1 {
               items = parts;
               break;
            }
         }
      }

      if items.is_empty() && !text.is_empty() {
         let lead: String = text.chars().take(LEAD_ITEM_MAX_CHARS).collect();
         items.push(format!("まず着手: {lead}"));
      }

      // 長すぎる断片は捨てる（切り詰めるより汎用ステップで補う方が読みやすい）
      items.retain(|item| item.chars().count() < 300);
      items.truncate(max);

      for step in GENERIC_STEPS {
         if items.len() >= MIN_SUBTASKS {
            break;
         }
         if !items.iter().any(|item| item == step) {
            items.push(step.to_string());
         }
      }

      items
   }
}

#[async_trait]
impl SubtaskGenerator for FallbackSubtaskGenerator {
   async fn generate(
      &self,
      source_text: &str,
      max_subtasks: usize,
   ) -> Result<Vec<String>, InfraError> {
      Ok(self.generate_list(source_text, max_subtasks))
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   // ===== clamp_max_subtasks のテスト =====

   #[rstest]
   #[case(None, 5)]
   #[case(Some(0), 3)]
   #[case(Some(3), 3)]
   #[case(Some(4), 4)]
   #[case(Some(100), 5)]
   fn test_件数は3から5に丸められる(#[case] requested: Option<usize>, #[case] expected: usize) {
      assert_eq!(clamp_max_subtasks(requested), expected);
   }

   // ===== parse_subtasks のテスト =====

   #[test]
   fn test_json配列をパースできる() {
      let content = r#"["荷造りする", "住所変更を届け出る", "掃除する"]"#;
      let items = parse_subtasks(content, 5).unwrap();

      assert_eq!(items, vec!["荷造りする", "住所変更を届け出る", "掃除する"]);
   }

   #[test]
   fn test_json配列は最大件数で切り詰められる() {
      let content = r#"["a", "b", "c", "d", "e", "f", "g"]"#;
      let items = parse_subtasks(content, 5).unwrap();
      assert_eq!(items.len(), 5);
   }

   #[test]
   fn test_箇条書きテキストをsalvageできる() {
      let content = "- 荷造りする\n- 住所変更を届け出る\n- 掃除する";
      let items = parse_subtasks(content, 5).unwrap();

      assert_eq!(items, vec!["荷造りする", "住所変更を届け出る", "掃除する"]);
   }

   #[test]
   fn test_3件未満の応答はnone() {
      assert!(parse_subtasks(r#"["一つだけ"]"#, 5).is_none());
      assert!(parse_subtasks("", 5).is_none());
      assert!(parse_subtasks("{\"not\": \"an array\"}", 5).is_none());
   }

   #[test]
   fn test_文字列以外の要素は無視される() {
      let content = r#"["有効", 42, "これも有効", null, "三つ目"]"#;
      let items = parse_subtasks(content, 5).unwrap();
      assert_eq!(items, vec!["有効", "これも有効", "三つ目"]);
   }

   // ===== FallbackSubtaskGenerator のテスト =====

   #[rstest]
   #[case("")]
   #[case("牛乳を買う")]
   #[case("引っ越し: 荷造り, 住所変更")]
   #[case("a\nb\nc\nd\ne\nf\ng\nh")]
   #[case("長い説明だけの一文で区切り文字が一つもない場合でも生成は成功する")]
   fn test_常に3から5件の空でない文字列を返す(#[case] input: &str) {
      let generator = FallbackSubtaskGenerator::new();

      for max in MIN_SUBTASKS..=MAX_SUBTASKS {
         let items = generator.generate_list(input, max);

         assert!(
            (MIN_SUBTASKS..=max).contains(&items.len()),
            "入力 {input:?} で件数 {} が範囲外",
            items.len()
         );
         assert!(items.iter().all(|item| !item.is_empty()));
      }
   }

   #[test]
   fn test_改行で分割される() {
      let generator = FallbackSubtaskGenerator::new();
      let items = generator.generate_list("荷造りする\n住所変更する\n掃除する", 5);

      assert_eq!(items, vec!["荷造りする", "住所変更する", "掃除する"]);
   }

   #[test]
   fn test_区切り文字で分割される() {
      let generator = FallbackSubtaskGenerator::new();
      let items = generator.generate_list("引っ越し: 荷造り, 住所変更", 5);

      // 最初に一致した区切り文字（:）で分割される
      assert_eq!(items[0], "引っ越し");
      assert!(items.len() >= MIN_SUBTASKS);
   }

   #[test]
   fn test_分割できない入力は先頭項目と汎用ステップになる() {
      let generator = FallbackSubtaskGenerator::new();
      let items = generator.generate_list("牛乳を買う", 5);

      assert_eq!(items[0], "まず着手: 牛乳を買う");
      assert_eq!(items.len(), MIN_SUBTASKS);
   }

   #[test]
   fn test_空入力でも汎用ステップが返る() {
      let generator = FallbackSubtaskGenerator::new();
      let items = generator.generate_list("", 5);

      assert_eq!(items.len(), MIN_SUBTASKS);
      assert!(items.iter().all(|item| GENERIC_STEPS.contains(&item.as_str())));
   }

   #[test]
   fn test_生成は決定的() {
      let generator = FallbackSubtaskGenerator::new();
      let first = generator.generate_list("部屋の片付け: 分別, 廃棄", 5);
      let second = generator.generate_list("部屋の片付け: 分別, 廃棄", 5);

      assert_eq!(first, second);
   }

   #[tokio::test]
   async fn test_トレイト経由でも必ず成功する() {
      let generator = FallbackSubtaskGenerator::new();
      let items = generator.generate("なにか", 5).await.unwrap();

      assert!((MIN_SUBTASKS..=MAX_SUBTASKS).contains(&items.len()));
   }
}
