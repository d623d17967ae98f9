//! # studykit-pdf: PDF Reading
//!
//! Turns an uploaded PDF into a stored study document: extract the text page
//! by page, run one analysis call over it, and persist the full text together
//! with the analysis as document metadata.

use pdf::file::FileOptions;
use serde::{Deserialize, Serialize};
use serde_json::json;
use studykit::{
    constants::ANALYSIS_CONTEXT_CHARS,
    memory::{self, MemoryError},
    prompts::{
        analysis::{ANALYSIS_SYSTEM_PROMPT, ANALYSIS_USER_PROMPT},
        excerpt,
    },
    providers::ai::{AiProvider, GenerationOptions},
    structured::generate_structured,
    PromptError,
};
use thiserror::Error;
use tracing::{info, instrument, warn};
use turso::Database;

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Failed to parse PDF content: {0}")]
    Parse(String),
    #[error("The PDF contained no extractable text")]
    EmptyDocument,
    #[error("LLM processing failed: {0}")]
    Llm(#[from] PromptError),
    #[error("Storage error: {0}")]
    Memory(#[from] MemoryError),
    #[error("Failed to serialize document metadata: {0}")]
    Json(#[from] serde_json::Error),
}

// --- Data Structures ---

/// The model's read of a freshly extracted document. All fields default to
/// empty so a degraded analysis still produces a storable document.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DocumentAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

/// A stored document, as returned to the uploader.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProcessedDocument {
    pub document_id: i64,
    pub filename: String,
    pub text_length: usize,
    pub analysis: DocumentAnalysis,
    pub degraded: bool,
}

struct ExtractedPdf {
    text: String,
    page_count: u32,
}

// --- Core Pipeline Logic ---

/// Extracts the text of every page synchronously, one newline between pages.
fn extract_pdf(pdf_data: &[u8]) -> Result<ExtractedPdf, ReaderError> {
    let file = FileOptions::cached()
        .load(pdf_data)
        .map_err(|e| ReaderError::Parse(e.to_string()))?;
    let resolver = file.resolver();
    let page_count = file.num_pages();
    let mut pages = Vec::with_capacity(page_count as usize);

    for page_num in 0..page_count {
        let page = file
            .get_page(page_num)
            .map_err(|e| ReaderError::Parse(e.to_string()))?;
        let mut page_text = String::new();
        if let Some(content) = &page.contents {
            let operations = content
                .operations(&resolver)
                .map_err(|e| ReaderError::Parse(e.to_string()))?;
            for op in operations.iter() {
                if let pdf::content::Op::TextDraw { text } = op {
                    page_text.push_str(&text.to_string_lossy());
                }
            }
        }
        pages.push(page_text);
    }

    Ok(ExtractedPdf {
        text: pages.join("\n"),
        page_count,
    })
}

/// Extracts the full text of a PDF. Encrypted or corrupt files surface as
/// [`ReaderError::Parse`].
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, ReaderError> {
    Ok(extract_pdf(pdf_data)?.text)
}

/// Runs the upload pipeline: extract, analyze, store.
///
/// The stored content is the full untruncated text; only the analysis call
/// sees a bounded excerpt. An unusable analysis reply degrades to empty
/// analysis fields, it does not block the upload.
#[instrument(skip(db, ai_provider, pdf_data))]
pub async fn process_pdf(
    db: &Database,
    ai_provider: &dyn AiProvider,
    pdf_data: &[u8],
    filename: &str,
) -> Result<ProcessedDocument, ReaderError> {
    info!(filename, bytes = pdf_data.len(), "Processing uploaded PDF");

    let extracted = extract_pdf(pdf_data)?;
    if extracted.text.trim().is_empty() {
        warn!(filename, "PDF text extraction came back empty");
        return Err(ReaderError::EmptyDocument);
    }
    let word_count = extracted.text.split_whitespace().count();

    let user_prompt = ANALYSIS_USER_PROMPT
        .replace("{filename}", filename)
        .replace(
            "{content}",
            excerpt(&extracted.text, ANALYSIS_CONTEXT_CHARS),
        );
    let options = GenerationOptions {
        temperature: 0.5,
        max_tokens: 2000,
    };
    let generated = generate_structured::<DocumentAnalysis>(
        ai_provider,
        ANALYSIS_SYSTEM_PROMPT,
        &user_prompt,
        &options,
    )
    .await?;

    let degraded = generated.degraded;
    let analysis = match generated.value {
        Some(analysis) => analysis,
        None => {
            warn!(filename, "Document analysis produced no usable JSON");
            DocumentAnalysis::default()
        }
    };

    let metadata = json!({
        "page_count": extracted.page_count,
        "word_count": word_count,
        "topics": analysis.topics,
        "key_concepts": analysis.key_concepts,
        "summary": analysis.summary,
    });
    let document_id =
        memory::insert_document(db, filename, &extracted.text, Some(&metadata)).await?;

    info!(
        document_id,
        pages = extracted.page_count,
        chars = extracted.text.len(),
        "Document stored"
    );
    Ok(ProcessedDocument {
        document_id,
        filename: filename.to_string(),
        text_length: extracted.text.len(),
        analysis,
        degraded,
    })
}
