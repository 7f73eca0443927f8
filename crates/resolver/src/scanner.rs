//! Directive scanning. The grammar lives here and nowhere else: a line is
//! a reference directive when, after optional indentation, it starts with
//! the case-insensitive keyword `USE`, whitespace, and a syntactically
//! valid component id. Everything else is passthrough text.

use chunkstream_store::ComponentId;
use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)([ \t]*)USE\s+((?:MRN|TRN|PRN|CRN|DRN|SRN|IRR|MRR|IRN)[0-9]{5}(?:_[A-Za-z0-9_]+)?)\b",
    )
    .expect("directive regex")
});

/// One reference directive found in a component body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOccurrence {
    /// Zero-based index of the directive line in the scanned text.
    pub line_index: usize,
    /// The directive line's original indentation, verbatim.
    pub indent: String,
    /// Normalized target id.
    pub target: ComponentId,
}

/// Find every reference directive in `text`, in document order.
///
/// A directive-looking line whose id does not parse is not reported; the
/// materializer passes such lines through verbatim. Scanning never fails.
#[must_use]
pub fn scan(text: &str) -> Vec<ReferenceOccurrence> {
    text.lines()
        .enumerate()
        .filter_map(|(line_index, line)| {
            let caps = DIRECTIVE_RE.captures(line)?;
            let target = ComponentId::parse(&caps[2]).ok()?;
            Some(ReferenceOccurrence {
                line_index,
                indent: caps[1].to_string(),
                target,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(raw: &str) -> ComponentId {
        ComponentId::parse(raw).unwrap()
    }

    #[test]
    fn finds_directives_in_document_order() {
        let text = "intro\nUSE MRN10001\nmiddle\nuse trn20002_init\n";
        let occs = scan(text);

        assert_eq!(occs.len(), 2);
        assert_eq!(occs[0].line_index, 1);
        assert_eq!(occs[0].target, id("MRN10001"));
        assert_eq!(occs[1].line_index, 3);
        assert_eq!(occs[1].target, id("TRN20002"));
    }

    #[test]
    fn preserves_indentation() {
        let occs = scan("    USE DRN30003\n\tUSE SRN40004");
        assert_eq!(occs[0].indent, "    ");
        assert_eq!(occs[1].indent, "\t");
    }

    #[test]
    fn bad_identifier_is_not_a_directive() {
        // Wrong type code, wrong digit count, or bare keyword: all plain text.
        assert!(scan("USE XYZ00001").is_empty());
        assert!(scan("USE IRN123").is_empty());
        assert!(scan("USE").is_empty());
        assert!(scan("USEFUL IRN00001").is_empty());
    }

    #[test]
    fn keyword_must_lead_the_line() {
        assert!(scan("please USE MRN10001").is_empty());
    }

    #[test]
    fn trailing_text_after_id_is_tolerated() {
        let occs = scan("USE MRN10001  computes totals");
        assert_eq!(occs.len(), 1);
        assert_eq!(occs[0].target, id("MRN10001"));
    }
}
