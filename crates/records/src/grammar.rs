//! Full-document patterns for each record grammar.
//!
//! Documents are matched after [`normalize`](crate::codec::normalize), so the
//! only line break is `\n` and there is none at the end.

use std::sync::OnceLock;

use regex::Regex;

use stockroom_core::{FormatError, FormatResult, RecordKind};

/// Item names: no commas or line breaks, and no leading `>` (reserved for
/// vehicle markers).
const NAME: &str = r"[^,\n>][^,\n]*";
const DECIMAL: &str = r"[0-9]+(?:\.[0-9]+)?";
const SIGNED_DECIMAL: &str = r"-?[0-9]+(?:\.[0-9]+)?";
const COUNT: &str = r"[0-9]+";
/// Any marker word; unknown kinds are reported by the decoder.
const MARKER: &str = r">[A-Za-z]+";

fn lines_of(record: &str) -> String {
    format!(r"\A(?:{record})(?:\n(?:{record}))*\z")
}

fn catalog_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let record = format!("{NAME},{DECIMAL},{DECIMAL},{COUNT},{COUNT}(?:,{SIGNED_DECIMAL})?");
        Regex::new(&lines_of(&record)).expect("catalog regex must compile")
    })
}

fn sales_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&lines_of(&format!("{NAME},{COUNT}"))).expect("sales regex must compile")
    })
}

fn manifest_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"\A{MARKER}(?:\n(?:{MARKER}|{NAME},{COUNT}))*\z");
        Regex::new(&pattern).expect("manifest regex must compile")
    })
}

pub fn matches(kind: RecordKind, document: &str) -> bool {
    let re = match kind {
        RecordKind::Catalog => catalog_re(),
        RecordKind::Sales => sales_re(),
        RecordKind::Manifest => manifest_re(),
    };
    re.is_match(document)
}

/// `PatternMismatch` unless `document` matches the `kind` grammar.
pub fn validate(kind: RecordKind, document: &str) -> FormatResult<()> {
    if matches(kind, document) {
        Ok(())
    } else {
        Err(FormatError::PatternMismatch(kind))
    }
}
