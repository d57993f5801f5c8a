use crate::config::Config;
use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

pub const PDF_SUFFIX: &str = ".pdf";

/// Appends `.pdf` unless the name already ends with it (any case).
pub fn ensure_pdf_suffix(name: &str) -> String {
    if has_pdf_suffix(name) {
        name.to_string()
    } else {
        format!("{name}{PDF_SUFFIX}")
    }
}

fn has_pdf_suffix(name: &str) -> bool {
    name.len() >= PDF_SUFFIX.len()
        && name
            .get(name.len() - PDF_SUFFIX.len()..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_SUFFIX))
}

fn reserved_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[\\/:*?"<>|]+"#).expect("static regex"))
}

/// Turns a user-supplied name into a single path component inside the
/// output directory. Falls back to `fallback` when nothing usable is left.
pub fn sanitize_filename(cfg: &Config, name: &str, fallback: &str) -> String {
    if !cfg.naming.sanitize_filenames {
        return ensure_pdf_suffix(name);
    }

    let mut s = if cfg.naming.normalize_unicode {
        name.nfc().collect::<String>()
    } else {
        name.to_string()
    };

    s = s.chars().filter(|c| !c.is_control()).collect();
    s = reserved_chars().replace_all(&s, "_").into_owned();

    // Judge the stem before trimming dots so ".pdf" alone counts as empty.
    let s = s.trim();
    let stem = strip_pdf_suffix(s).trim_matches(|c: char| c == '.' || c.is_whitespace() || c == '_');
    if stem.is_empty() {
        return ensure_pdf_suffix(fallback);
    }
    ensure_pdf_suffix(s.trim_matches(|c: char| c == '.' || c.is_whitespace()))
}

fn strip_pdf_suffix(name: &str) -> &str {
    if has_pdf_suffix(name) {
        name.get(..name.len() - PDF_SUFFIX.len()).unwrap_or(name)
    } else {
        name
    }
}
