//! Reading CV and resume files into plain text

use crate::error::JobkitError;
use crate::types::{ResumeDocument, SourceFormat};
use std::panic;
use std::path::Path;
use tracing::{debug, warn};

/// Extensions read as UTF-8 text
const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "text"];

/// Returns true if the extension or the leading bytes indicate a PDF
pub fn is_pdf(path: &Path, head: &[u8]) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    by_extension || head.starts_with(b"%PDF-")
}

/// Fail early if `path` does not name an existing file
pub fn ensure_exists(path: &Path) -> Result<(), JobkitError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(JobkitError::FileNotFound(path.to_path_buf()))
    }
}

/// Run a PDF extractor, turning both its errors and its panics into `PdfExtract`
fn guarded_extract<F>(path: &Path, extract: F) -> Result<String, JobkitError>
where
    F: FnOnce() -> Result<String, String> + panic::UnwindSafe,
{
    let message = match panic::catch_unwind(extract) {
        Ok(Ok(text)) => return Ok(text),
        Ok(Err(message)) => message,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown cause".to_string());
            warn!(path = %path.display(), "PDF parser panicked: {}", detail);
            format!("the PDF parser crashed on this file ({})", detail)
        }
    };
    Err(JobkitError::PdfExtract {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a CV or resume from a PDF or plain-text file
pub fn read_resume(path: &Path) -> Result<ResumeDocument, JobkitError> {
    ensure_exists(path)?;

    let bytes = std::fs::read(path).map_err(|source| JobkitError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    if is_pdf(path, &bytes) {
        let text = guarded_extract(path, || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })?;
        debug!(path = %path.display(), chars = text.len(), "Extracted PDF text");
        return Ok(ResumeDocument {
            path: path.to_path_buf(),
            format: SourceFormat::Pdf,
            text: text.trim().to_string(),
        });
    }

    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| TEXT_EXTENSIONS.iter().any(|t| e.eq_ignore_ascii_case(t)))
        .unwrap_or(false);
    if !is_text {
        return Err(JobkitError::UnsupportedFile(path.to_path_buf()));
    }

    let text = String::from_utf8_lossy(&bytes).trim().to_string();
    debug!(path = %path.display(), chars = text.len(), "Read text resume");
    Ok(ResumeDocument {
        path: path.to_path_buf(),
        format: SourceFormat::PlainText,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("cv.pdf"), b""));
        assert!(is_pdf(Path::new("CV.PDF"), b""));
        assert!(is_pdf(Path::new("cv"), b"%PDF-1.7\n"));
        assert!(!is_pdf(Path::new("cv.txt"), b"Experience"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_resume(Path::new("/definitely/not/here/cv.pdf")).unwrap_err();
        assert!(matches!(err, JobkitError::FileNotFound(ref p) if p == &PathBuf::from("/definitely/not/here/cv.pdf")));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_read_text_resume() {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        writeln!(file, "  # Jane Doe\n\nExperience: SRE at Acme  ").unwrap();

        let doc = read_resume(file.path()).unwrap();
        assert_eq!(doc.format, SourceFormat::PlainText);
        assert_eq!(doc.text, "# Jane Doe\n\nExperience: SRE at Acme");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let err = read_resume(file.path()).unwrap_err();
        assert!(matches!(err, JobkitError::UnsupportedFile(_)));
    }

    #[test]
    fn test_extractor_panic_becomes_extract_error() {
        let err = guarded_extract(Path::new("broken.pdf"), || panic!("bad xref table")).unwrap_err();
        match err {
            JobkitError::PdfExtract { ref path, ref message } => {
                assert_eq!(path, &PathBuf::from("broken.pdf"));
                assert!(message.contains("bad xref table"));
            }
            ref other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_extractor_error_keeps_message() {
        let err = guarded_extract(Path::new("cv.pdf"), || Err("encrypted".to_string())).unwrap_err();
        assert!(err.to_string().ends_with(": encrypted"));
        assert_eq!(
            guarded_extract(Path::new("cv.pdf"), || Ok("text".to_string())).unwrap(),
            "text"
        );
    }

    #[test]
    fn test_garbage_pdf_is_extract_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not really a pdf").unwrap();

        let err = read_resume(file.path()).unwrap_err();
        assert!(matches!(err, JobkitError::PdfExtract { .. }));
    }
}
