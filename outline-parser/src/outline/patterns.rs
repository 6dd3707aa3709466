//! Heading pattern tables and the first-match classifier
//!
//!     A pattern table is data, not code: an ordered list of `(pattern, role, level)` rules.
//!     Classification walks the table in declaration order and stops at the first rule whose
//!     pattern occurs anywhere in the line. Order is therefore part of the contract. A
//!     specific rule (`I\.\s+INTRODUCTION`) must be declared before a general fallback that
//!     would also match (`[IVX]+\.\s+[A-Z]`).
//!
//!     Patterns are searched, not anchored, and are case sensitive unless the pattern opts in
//!     with an inline `(?i)` flag.

use regex::Regex;

/// Level assigned to roles that only ever feed the metadata map
pub const METADATA_LEVEL: i32 = -1;

/// One classification rule
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub pattern: Regex,
    pub role: String,
    pub level: i32,
}

impl PatternEntry {
    pub fn new(pattern: &str, role: impl Into<String>, level: i32) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            role: role.into(),
            level,
        })
    }

    pub fn is_metadata_only(&self) -> bool {
        self.level == METADATA_LEVEL
    }
}

/// Ordered heading vocabulary of one genre
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
}

impl PatternTable {
    pub fn new(entries: Vec<PatternEntry>) -> Self {
        Self { entries }
    }

    /// Compile a table from `(pattern, role, level)` rules, keeping their order.
    pub fn from_rules(rules: &[(&str, &str, i32)]) -> Result<Self, regex::Error> {
        let entries = rules
            .iter()
            .map(|(pattern, role, level)| PatternEntry::new(pattern, *role, *level))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Level and role of the first rule matching `line`, or `None`.
    pub fn classify(&self, line: &str) -> Option<(i32, &str)> {
        self.entries
            .iter()
            .find(|entry| entry.pattern.is_match(line))
            .map(|entry| (entry.level, entry.role.as_str()))
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Roles in declaration order (may repeat)
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.role.as_str())
    }
}

/// A heading line starts with `#` once trimmed
pub fn is_heading(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Number of leading `#` characters
pub fn heading_depth(line: &str) -> usize {
    line.trim_start().chars().take_while(|c| *c == '#').count()
}

/// Heading text with surrounding `#` markers and whitespace removed
pub fn strip_heading_markers(line: &str) -> &str {
    line.trim_matches(|c| c == '#' || c == ' ').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PatternTable {
        PatternTable::from_rules(&[
            (r"第.*章", "chapter", 1),
            (r"\b\d+\.\d+\b", "section", 2),
            (r"\b\d+\.\d+\.\d+\b", "clause", 3),
            (r"作者介绍", "author_introduction", METADATA_LEVEL),
        ])
        .unwrap()
    }

    #[test]
    fn first_declared_rule_wins() {
        // "1.1.1" also contains "1.1", and the section rule is declared first
        assert_eq!(table().classify("### 1.1.1 细节"), Some((2, "section")));
    }

    #[test]
    fn search_is_unanchored() {
        assert_eq!(table().classify("# 附录 第三章 补充"), Some((1, "chapter")));
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(table().classify("# Acknowledgements"), None);
    }

    #[test]
    fn case_sensitivity_is_per_pattern() {
        let table =
            PatternTable::from_rules(&[("Abstract", "strict", 1), ("(?i)summary", "loose", 1)])
                .unwrap();
        assert_eq!(table.classify("# ABSTRACT"), None);
        assert_eq!(table.classify("# SUMMARY"), Some((1, "loose")));
    }

    #[test]
    fn metadata_only_entries() {
        let table = table();
        assert!(table.entries()[3].is_metadata_only());
        assert!(!table.entries()[0].is_metadata_only());
    }

    #[test]
    fn invalid_pattern_is_reported() {
        assert!(PatternTable::from_rules(&[("(unclosed", "broken", 1)]).is_err());
    }

    #[test]
    fn heading_helpers() {
        assert!(is_heading("  ## Method"));
        assert!(!is_heading("Method #1"));
        assert_eq!(heading_depth("### 1.1.1 x"), 3);
        assert_eq!(heading_depth("plain"), 0);
        assert_eq!(strip_heading_markers("## Related Work ##"), "Related Work");
        assert_eq!(strip_heading_markers("#\tTabbed"), "Tabbed");
    }
}
