/*
 * Responsibility
 * - field 単位のエラーを順番どおりに集める (Validator)
 * - 1 件でもあれば操作全体を失敗扱いにする (ValidationErrorMessage)
 * - 書き込みの前に全ルールを評価しきる
 */
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Ordered report of violated rules. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed on {} field(s)", .errors.len())]
pub struct ValidationErrorMessage {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorMessage {
    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                path: path.into(),
                message: message.into(),
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.path.as_str())
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    report: ValidationErrorMessage,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(
        &mut self,
        ok: bool,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        if !ok {
            self.report.errors.push(FieldError {
                path: path.into(),
                message: message.into(),
            });
        }
        self
    }

    /// Whitespace-only values count as missing.
    pub fn require_non_empty(
        &mut self,
        path: impl Into<String>,
        value: Option<&str>,
        message: impl Into<String>,
    ) -> &mut Self {
        let ok = value.is_some_and(|v| !v.trim().is_empty());
        self.check(ok, path, message)
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.report.errors
    }

    pub fn finish(self) -> Result<(), ValidationErrorMessage> {
        if self.report.is_empty() {
            Ok(())
        } else {
            Err(self.report)
        }
    }
}
