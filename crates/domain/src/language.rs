//! # 翻訳対象言語
//!
//! 翻訳サービスの言語カタログと、ユーザー入力からの言語解決ロジックを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | 用途 |
//! |---|------|
//! | [`LanguageCode`] | ISO 言語コード（`en`, `fr` など） |
//! | [`Language`] | カタログの 1 エントリ（コード + 表示名） |
//! | [`LanguageCatalog`] | 翻訳サービスが返す言語一覧 |
//!
//! ## 設計方針
//!
//! カタログの取得はインフラ層（HTTP クライアント）の責務、
//! ユーザー入力との突き合わせは純粋ロジックとしてここに置く。
//! これによりネットワークなしで解決ロジックをテストできる。

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// 言語コード（値オブジェクト）
///
/// 翻訳サービスに渡す ISO 639 形式のコード。
/// 生成時に小文字へ正規化する。
///
/// # 不変条件
///
/// - 前後の空白を除去した後、空文字列ではない
/// - 10 文字以内（`zh-Hant` のような地域付きコードを許容）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// 言語コードを作成する
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "言語コードは必須です".to_string(),
            ));
        }

        if value.chars().count() > 10 {
            return Err(DomainError::Validation(
                "言語コードは10文字以内である必要があります".to_string(),
            ));
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

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 言語カタログの 1 エントリ
///
/// 翻訳サービスの `GET /languages` が返す `{ code, name }` に対応する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// 言語カタログ
///
/// ユーザー入力（言語名またはコード）から [`LanguageCode`] を解決する。
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog(Vec<Language>);

impl LanguageCatalog {
    /// カタログを作成する
    pub fn new(languages: Vec<Language>) -> Self {
        Self(languages)
    }

    /// カタログが空かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// エントリ一覧を取得する
    pub fn languages(&self) -> &[Language] {
        &self.0
    }

    /// ユーザー入力から言語コードを解決する
    ///
    /// コードまたは表示名との大文字小文字を無視した一致で解決する。
    /// `"french"` と `"fr"` は（両方がフランス語にマップされる限り）
    /// 同じコードに解決される。
    ///
    /// # エラー
    ///
    /// - 入力が空の場合は `DomainError::Validation`
    /// - カタログに一致がない場合は `DomainError::UnknownLanguage`
    pub fn resolve(&self, input: &str) -> Result<LanguageCode, DomainError> {
        let needle = input.trim().to_lowercase();

        if needle.is_empty() {
            return Err(DomainError::Validation(
                "翻訳対象の言語は必須です".to_string(),
            ));
        }

        self.0
            .iter()
            .find(|lang| {
                lang.code.to_lowercase() == needle || lang.name.to_lowercase() == needle
            })
            .map(|lang| LanguageCode::new(&lang.code))
            .transpose()?
            .ok_or_else(|| DomainError::UnknownLanguage(input.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn sample_catalog() -> LanguageCatalog {
        LanguageCatalog::new(vec![
            Language {
                code: "en".to_string(),
                name: "English".to_string(),
            },
            Language {
                code: "fr".to_string(),
                name: "French".to_string(),
            },
            Language {
                code: "ja".to_string(),
                name: "Japanese".to_string(),
            },
        ])
    }

    // ===== LanguageCode のテスト =====

    #[test]
    fn test_言語コードは小文字に正規化される() {
        let code = LanguageCode::new(" FR ").unwrap();
        assert_eq!(code.as_str(), "fr");
    }

    #[test]
    fn test_空の言語コードでバリデーションエラーになる() {
        assert!(matches!(
            LanguageCode::new("  "),
            Err(DomainError::Validation(_))
        ));
    }

    // ===== LanguageCatalog::resolve のテスト =====

    #[rstest]
    #[case("fr")]
    #[case("FR")]
    #[case("french")]
    #[case("French")]
    #[case("  french  ")]
    fn test_コードと名前のどちらでも同じコードに解決される(#[case] input: &str) {
        let catalog = sample_catalog();
        let code = catalog.resolve(input).unwrap();
        assert_eq!(code.as_str(), "fr");
    }

    #[test]
    fn test_カタログに一致しない場合はunknown_language() {
        let catalog = sample_catalog();
        let result = catalog.resolve("klingon");

        assert!(matches!(result, Err(DomainError::UnknownLanguage(input)) if input == "klingon"));
    }

    #[test]
    fn test_空入力はバリデーションエラー() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.resolve("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_空カタログでは常にunknown_language() {
        let catalog = LanguageCatalog::default();
        assert!(matches!(
            catalog.resolve("fr"),
            Err(DomainError::UnknownLanguage(_))
        ));
    }
}
