//! Admonition label detection for paragraphs

use once_cell::sync::Lazy;
use regex::Regex;

/// A leading label: bare, `_Label:_`, `_Label_:` or `*Label:*`.
static LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?P<plain>note|tip|important|caution|warning):|_(?P<em_in>note|tip|important|caution|warning):_|_(?P<em_out>note|tip|important|caution|warning)_:|\*(?P<strong_in>note|tip|important|caution|warning):\*)(?:\s+|$)",
    )
    .expect("admonition label pattern is valid")
});

const LABEL_GROUPS: &[&str] = &["plain", "em_in", "em_out", "strong_in"];

/// AsciiDoc admonition labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admonition {
    Note,
    Tip,
    Important,
    Caution,
    Warning,
}

impl Admonition {
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "note" => Some(Admonition::Note),
            "tip" => Some(Admonition::Tip),
            "important" => Some(Admonition::Important),
            "caution" => Some(Admonition::Caution),
            "warning" => Some(Admonition::Warning),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Admonition::Note => "NOTE",
            Admonition::Tip => "TIP",
            Admonition::Important => "IMPORTANT",
            Admonition::Caution => "CAUTION",
            Admonition::Warning => "WARNING",
        }
    }
}

/// Split a rendered paragraph into its admonition label and remaining text
pub fn detect(text: &str) -> Option<(Admonition, &str)> {
    let captures = LABEL_RE.captures(text)?;
    let label = LABEL_GROUPS
        .iter()
        .find_map(|group| captures.name(group))?;
    let admonition = Admonition::from_label(label.as_str())?;
    let rest = &text[captures.get(0)?.end()..];
    Some((admonition, rest))
}

/// Rewrite a paragraph that opens with an admonition label as `LABEL: rest`
pub fn promote(text: &str) -> Option<String> {
    let (admonition, rest) = detect(text)?;
    if rest.is_empty() {
        Some(format!("{}:", admonition.as_str()))
    } else {
        Some(format!("{}: {}", admonition.as_str(), rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_label() {
        assert_eq!(
            promote("Note: Remember the milk!").as_deref(),
            Some("NOTE: Remember the milk!")
        );
    }

    #[test]
    fn test_wrapped_labels() {
        for text in [
            "_Note:_ Remember the milk!",
            "*Note:* Remember the milk!",
            "_Note_: Remember the milk!",
        ] {
            assert_eq!(
                promote(text).as_deref(),
                Some("NOTE: Remember the milk!"),
                "{text}"
            );
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(promote("warning: hot").as_deref(), Some("WARNING: hot"));
        assert_eq!(promote("TIP: use it").as_deref(), Some("TIP: use it"));
        assert_eq!(
            detect("Important: x").map(|(a, _)| a),
            Some(Admonition::Important)
        );
        assert_eq!(
            detect("CAUTION: x").map(|(a, _)| a),
            Some(Admonition::Caution)
        );
    }

    #[test]
    fn test_label_alone() {
        assert_eq!(promote("Note:").as_deref(), Some("NOTE:"));
    }

    #[test]
    fn test_not_a_label() {
        assert_eq!(promote("Notebook: x"), None);
        assert_eq!(promote("Note x"), None);
        assert_eq!(promote("Note:x"), None);
        assert_eq!(promote("A Note: x"), None);
        assert_eq!(promote("Hint: x"), None);
    }

    #[test]
    fn test_mismatched_markers_do_not_match() {
        assert_eq!(promote("_Note:* x"), None);
        assert_eq!(promote("**Note:** x"), None);
        assert_eq!(promote("*Note: x"), None);
        assert_eq!(promote("*Note*: x"), None);
    }
}
