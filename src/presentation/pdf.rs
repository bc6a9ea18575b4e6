//! Downloadable itinerary document.
//!
//! Emits a plain PDF 1.4 file using the two standard Helvetica faces, so no
//! fonts are embedded. Text is encoded as WinAnsi; characters outside that
//! set are replaced.

use std::io::Write;

use chrono::NaiveDateTime;

use crate::error::{AppError, AppResult};

pub const DEFAULT_DESTINATION: &str = "Your Destination";

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 50;
const TITLE_SIZE: u32 = 16;
const TITLE_LEADING: u32 = 24;
const BODY_SIZE: u32 = 11;
const BODY_LEADING: u32 = 14;
/// Characters per body line; Helvetica 11pt averages about 5.5pt per glyph
const WRAP_COLUMNS: usize = 90;

/// Everything printed in the exported document
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDocument {
    pub destination: String,
    pub weather_warning: Option<String>,
    pub days: Vec<String>,
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Title(String),
    Bold(String),
    Body(String),
    Blank,
}

impl Line {
    fn leading(&self) -> u32 {
        match self {
            Line::Title(_) => TITLE_LEADING,
            _ => BODY_LEADING,
        }
    }
}

impl ItineraryDocument {
    /// Render the document to PDF bytes
    pub fn render(&self) -> AppResult<Vec<u8>> {
        let pages = paginate(self.lines());
        write_pdf(&pages).map_err(|e| AppError::Export(format!("Failed to write PDF: {}", e)))
    }

    fn lines(&self) -> Vec<Line> {
        let mut lines = vec![
            Line::Title(format!("WanderWise Itinerary: {}", self.destination)),
            Line::Body(format!(
                "Generated on {}",
                self.generated_at.format("%B %d, %Y at %H:%M")
            )),
            Line::Blank,
        ];

        if let Some(warning) = self.weather_warning.as_deref().filter(|w| !w.trim().is_empty()) {
            lines.extend(wrap(warning.trim(), WRAP_COLUMNS).into_iter().map(Line::Bold));
            lines.push(Line::Blank);
        }

        for day in &self.days {
            let mut day_lines = day.lines();
            if let Some(header) = day_lines.next() {
                lines.extend(wrap(header.trim(), WRAP_COLUMNS).into_iter().map(Line::Bold));
            }
            for line in day_lines {
                if line.trim().is_empty() {
                    continue;
                }
                lines.extend(wrap(line.trim_end(), WRAP_COLUMNS).into_iter().map(Line::Body));
            }
            lines.push(Line::Blank);
        }

        lines
    }
}

/// `WanderWise_Itinerary_{destination}.pdf`, reduced to header-safe characters
pub fn attachment_filename(destination: &str) -> String {
    let name: String = destination
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            ' ' => Some('_'),
            _ => None,
        })
        .collect();
    let name = if name.is_empty() { "Trip".to_string() } else { name };
    format!("WanderWise_Itinerary_{}.pdf", name)
}

/// Greedy word wrap; words longer than `width` are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn paginate(lines: Vec<Line>) -> Vec<Vec<(u32, Line)>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = top;

    for line in lines {
        let leading = line.leading();
        if y < MARGIN + leading {
            pages.push(std::mem::take(&mut page));
            y = top;
        }
        y -= leading;
        if line != Line::Blank {
            page.push((y, line));
        }
    }

    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

fn content_stream(page: &[(u32, Line)]) -> Vec<u8> {
    let mut stream = Vec::new();
    for (y, line) in page {
        let (font, size, text) = match line {
            Line::Title(text) => ("F2", TITLE_SIZE, text),
            Line::Bold(text) => ("F2", BODY_SIZE, text),
            Line::Body(text) => ("F1", BODY_SIZE, text),
            Line::Blank => continue,
        };
        stream.extend_from_slice(format!("BT /{} {} Tf {} {} Td (", font, size, MARGIN, y).as_bytes());
        stream.extend_from_slice(&encode_text(text));
        stream.extend_from_slice(b") Tj ET\n");
    }
    stream
}

/// Encode for a PDF literal string in WinAnsiEncoding
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push(b'\\');
                out.push(c as u8);
            }
            '\t' => out.push(b' '),
            ' '..='~' => out.push(c as u8),
            '≤' => out.extend_from_slice(b"<="),
            '≥' => out.extend_from_slice(b">="),
            _ => {
                let byte = win_ansi_byte(c).unwrap_or(b'?');
                if byte.is_ascii() {
                    out.push(byte);
                } else {
                    out.extend_from_slice(format!("\\{:03o}", byte).as_bytes());
                }
            }
        }
    }
    out
}

fn win_ansi_byte(c: char) -> Option<u8> {
    match c {
        '€' => Some(0x80),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '\u{a0}'..='\u{ff}' => Some(c as u32 as u8),
        _ => None,
    }
}

fn write_pdf(pages: &[Vec<(u32, Line)>]) -> std::io::Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    let mut offsets: Vec<usize> = Vec::new();

    out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()).into_bytes(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_vec(),
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    ];

    for (i, page) in pages.iter().enumerate() {
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                6 + 2 * i
            )
            .into_bytes(),
        );

        let stream = content_stream(page);
        let mut body = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
        body.extend_from_slice(&stream);
        body.extend_from_slice(b"\nendstream");
        objects.push(body);
    }

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n", i + 1)?;
        out.write_all(body)?;
        out.write_all(b"\nendobj\n")?;
    }

    let xref_offset = out.len();
    write!(out, "xref\n0 {}\n", objects.len() + 1)?;
    out.write_all(b"0000000000 65535 f \n")?;
    for offset in &offsets {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    )?;

    Ok(out)
}
