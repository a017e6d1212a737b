// noc-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層とハンドラー層で共通して使用するエラー処理パターンを提供します。

use crate::error::AppError;
use sea_orm::{DbErr, SqlErr};
use tracing::warn;
use validator::ValidationErrors;

// =============================================================================
// バリデーションエラー処理の統一
// =============================================================================

/// validatorのValidationErrorsをAppErrorに変換する統一処理
///
/// # Arguments
/// * `validation_errors` - validator crate からのバリデーションエラー
/// * `context` - エラーが発生したコンテキスト（ログ用）
pub fn convert_validation_errors(validation_errors: ValidationErrors, context: &str) -> AppError {
    warn!(
        context = %context,
        error_count = validation_errors.field_errors().len(),
        "Validation failed"
    );

    let mut errors: Vec<String> = validation_errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| "Invalid value".to_string(), |cow| cow.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    // HashMap 由来の順序を安定させる
    errors.sort();

    AppError::ValidationErrors(errors)
}

/// 単一のバリデーションエラーメッセージを生成
pub fn validation_error(field: &str, message: &str) -> AppError {
    AppError::ValidationError(format!("{}: {}", field, message))
}

// =============================================================================
// ログ付きエラー変換パターン
// =============================================================================

/// リソース未発見エラーをログ付きで生成
///
/// クライアントには `"Incident not found"` の形式で返す。
pub fn not_found_error(resource: &str, identifier: impl std::fmt::Display, context: &str) -> AppError {
    warn!(
        context = %context,
        resource = %resource,
        identifier = %identifier,
        "Resource not found"
    );
    AppError::NotFound(format!("{} not found", resource))
}

/// 競合エラーをログ付きで生成
pub fn conflict_error(message: &str, context: &str) -> AppError {
    warn!(
        context = %context,
        message = %message,
        "Resource conflict occurred"
    );
    AppError::Conflict(message.to_string())
}

/// 外部キー制約違反かどうか（参照中の行の削除など）
pub fn is_foreign_key_violation(error: &DbErr) -> bool {
    matches!(
        error.sql_err(),
        Some(SqlErr::ForeignKeyConstraintViolation(_))
    )
}

// =============================================================================
// パフォーマンス監視用ヘルパー
// =============================================================================

/// 操作の実行時間を測定してログ出力するマクロ
#[macro_export]
macro_rules! log_operation_time {
    ($operation:expr, $context:expr) => {{
        let start = std::time::Instant::now();
        let result = $operation;
        let duration = start.elapsed();

        match &result {
            Ok(_) => tracing::debug!(
                context = %$context,
                duration_ms = duration.as_millis(),
                "Operation completed successfully"
            ),
            Err(e) => tracing::warn!(
                context = %$context,
                duration_ms = duration.as_millis(),
                error = %e,
                "Operation failed"
            ),
        }

        result
    }};
}

// =============================================================================
// テスト
// =============================================================================
