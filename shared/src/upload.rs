//! 上传表单状态
//!
//! 只持有待提交的文件和备注，负责校验、生成草稿和重置。

use crate::error::ValidationError;
use crate::image::UploadDraft;

#[derive(Debug, Clone)]
pub struct UploadForm<F> {
    file: Option<F>,
    note: String,
}

impl<F> Default for UploadForm<F> {
    fn default() -> Self {
        Self {
            file: None,
            note: String::new(),
        }
    }
}

impl<F> UploadForm<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: Option<F>) {
        self.file = file;
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.note.is_empty()
    }

    /// 提交表单
    ///
    /// 校验失败时保留输入，便于用户修正；校验通过后交出草稿并立即重置，
    /// 无论后续上传成功与否。
    pub fn submit(&mut self, entity_id: &str) -> Result<UploadDraft<F>, ValidationError> {
        validate(self.file.as_ref(), &self.note)?;

        let note = std::mem::take(&mut self.note);
        let file = self.file.take().ok_or(ValidationError::MissingFile)?;
        Ok(UploadDraft::new(file, note, entity_id))
    }
}

/// 上传前的本地校验：文件必须存在，备注不能为空白
pub fn validate<F>(file: Option<&F>, note: &str) -> Result<(), ValidationError> {
    if file.is_none() {
        return Err(ValidationError::MissingFile);
    }
    if note.trim().is_empty() {
        return Err(ValidationError::MissingNote);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_builds_draft_and_resets() {
        let mut form = UploadForm::new();
        form.select_file(Some(vec![1u8, 2, 3]));
        form.set_note("greenhouse 2");

        let draft = form.submit("site-1").unwrap();
        assert_eq!(draft.file, vec![1, 2, 3]);
        assert_eq!(draft.note, "greenhouse 2");
        assert_eq!(draft.entity_id, "site-1");
        assert!(form.is_empty());
    }

    #[test]
    fn test_missing_file_keeps_input() {
        let mut form: UploadForm<Vec<u8>> = UploadForm::new();
        form.set_note("note");
        assert_eq!(form.submit("e"), Err(ValidationError::MissingFile));
        assert_eq!(form.note(), "note");
    }

    #[test]
    fn test_blank_note_rejected() {
        let mut form = UploadForm::new();
        form.select_file(Some(vec![0u8]));
        form.set_note("   ");
        assert_eq!(form.submit("e"), Err(ValidationError::MissingNote));
        assert!(form.has_file());
    }

    #[test]
    fn test_missing_file_reported_before_note() {
        let mut form: UploadForm<Vec<u8>> = UploadForm::new();
        assert_eq!(form.submit("e"), Err(ValidationError::MissingFile));
    }
}
