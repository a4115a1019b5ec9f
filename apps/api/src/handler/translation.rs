//! # 翻訳 API ハンドラ
//!
//! Todo の翻訳エンドポイントを実装する。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use todoflow_domain::todo::TodoId;
use todoflow_infra::{repository::TodoRepository, translation::TranslationClient};
use todoflow_shared::ApiResponse;
use uuid::Uuid;

use crate::{error::ApiError, usecase::TranslationUseCaseImpl};

/// 翻訳ハンドラーの State
pub struct TranslationState<T, C> {
   pub usecase: TranslationUseCaseImpl<T, C>,
}

/// 翻訳リクエスト
///
/// `target` は言語名（`"French"`）またはコード（`"fr"`）。
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
   pub target: String,
}

/// 翻訳結果 DTO
#[derive(Debug, Serialize)]
pub struct TranslationDto {
   pub translated_text: String,
   pub translated_lang: String,
}

/// Todo を指定言語に翻訳する
///
/// ## エンドポイント
/// POST /api/todos/{id}/translate
pub async fn translate_todo<T, C>(
   State(state): State<Arc<TranslationState<T, C>>>,
   Path(id): Path<Uuid>,
   Json(payload): Json<TranslateRequest>,
) -> Result<Response, ApiError>
where
   T: TodoRepository,
   C: TranslationClient,
{
   let id = TodoId::from_uuid(id);
   let translated = state.usecase.translate_todo(&id, &payload.target).await?;

   let response = ApiResponse::new(TranslationDto {
      translated_text: translated.text,
      translated_lang: translated.lang.into_string(),
   });
   Ok((StatusCode::OK, Json(response)).into_response())
}
