//! Reference document parsing and text extraction.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;
use zodiac_core::{AppError, AppResult};

/// Body of a Word document inside the .docx archive.
const DOCX_BODY: &str = "word/document.xml";

/// Content type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Markdown,
    Html,
    Docx,
    PlainText,
}

impl ContentType {
    /// Detect content type from file extension; anything unknown is plain text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("md") | Some("markdown") => Self::Markdown,
            Some("html") | Some("htm") => Self::Html,
            Some("docx") => Self::Docx,
            _ => Self::PlainText,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Docx => "docx",
            Self::PlainText => "text",
        }
    }
}

/// Read a document and extract clean text.
pub fn parse_file(path: &Path) -> AppResult<String> {
    let content_type = ContentType::from_path(path);
    if content_type == ContentType::Docx {
        return extract_docx(path);
    }

    let bytes = fs::read(path)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {:?}: {}", path, e)))?;

    if bytes.contains(&0) {
        return Err(AppError::Knowledge(format!(
            "{:?} looks like a binary file; supported formats are text, Markdown, HTML and .docx",
            path
        )));
    }

    let raw = String::from_utf8(bytes)
        .map_err(|e| AppError::Knowledge(format!("{:?} is not valid UTF-8: {}", path, e)))?;

    parse_text(&raw, content_type)
}

/// Extract clean text from raw content of a known type. For `Docx` the
/// raw content is the archive's `word/document.xml`.
pub fn parse_text(raw: &str, content_type: ContentType) -> AppResult<String> {
    match content_type {
        ContentType::Markdown => Ok(clean_markdown(raw)),
        ContentType::Html => Ok(clean_html(raw)),
        ContentType::Docx => docx_xml_to_text(raw),
        ContentType::PlainText => Ok(raw.trim().to_string()),
    }
}

/// Read the body of a .docx archive as paragraphs of plain text.
fn extract_docx(path: &Path) -> AppResult<String> {
    let file = File::open(path)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {:?}: {}", path, e)))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| AppError::Knowledge(format!("{:?} is not a valid .docx archive: {}", path, e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| AppError::Knowledge(format!("{:?} has no {}: {}", path, DOCX_BODY, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Knowledge(format!("Failed to read {} in {:?}: {}", DOCX_BODY, path, e)))?;

    tracing::debug!("Extracting text from {:?} ({} bytes of XML)", path, xml.len());
    docx_xml_to_text(&xml)
}

/// Collect `w:t` runs per `w:p` paragraph; tabs and breaks become whitespace.
fn docx_xml_to_text(xml: &str) -> AppResult<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| AppError::Knowledge(format!("Invalid text in .docx: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Knowledge(format!(
                    "XML parse error in .docx at {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }
    paragraphs.push(current);

    Ok(paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Strip heading markers, rules and fences; keep paragraph breaks.
fn clean_markdown(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start_matches('#').trim();

        if trimmed.starts_with("---") || trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            continue;
        }

        // Collapse runs of blank lines into one paragraph break
        if trimmed.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(trimmed);
    }

    lines.join("\n").trim().to_string()
}

/// Strip tags, scripts and styles; block-level closers become paragraph breaks.
fn clean_html(text: &str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut result = String::with_capacity(text.len());
    let mut in_tag = false;
    let mut skip_until: Option<&str> = None;

    for (i, ch) in text.char_indices() {
        if let Some(closer) = skip_until {
            if lower[i..].starts_with(closer) {
                skip_until = None;
                in_tag = true;
            }
            continue;
        }

        if ch == '<' {
            in_tag = true;
            let rest = &lower[i..];
            if rest.starts_with("<script") {
                skip_until = Some("</script");
            } else if rest.starts_with("<style") {
                skip_until = Some("</style");
            } else if rest.starts_with("</p")
                || rest.starts_with("</h")
                || rest.starts_with("</li")
                || rest.starts_with("<br")
            {
                result.push('\n');
            }
        } else if ch == '>' {
            in_tag = false;
        } else if !in_tag {
            result.push(ch);
        }
    }

    result
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
