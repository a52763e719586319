use std::collections::HashMap;

use crate::error::{Result, SiteError};

/// Printed page number → site path, generated with the site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageTable(HashMap<String, String>);

impl PageTable {
    pub fn new(pages: HashMap<String, String>) -> Self {
        PageTable(pages)
    }

    /// Link target for a typed page number, relative to a chapter page.
    pub fn resolve(&self, page_num: &str) -> Result<String> {
        self.0
            .get(page_num)
            .map(|path| format!("../{}", path))
            .ok_or_else(|| SiteError::not_found(page_num))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Alert text shown when a typed page number has no entry.
pub fn not_found_message(page_num: &str) -> String {
    format!("Did not find page {} on this site!", page_num)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PageTable {
        PageTable::new(
            [
                ("12".to_string(), "part1/12_intro.html".to_string()),
                ("iv".to_string(), "front/iv_preface.html".to_string()),
            ]
            .into_iter()
            .collect(),
        )
    }

    #[test]
    fn test_resolve_known_page() {
        assert_eq!(table().resolve("12").unwrap(), "../part1/12_intro.html");
        assert_eq!(table().resolve("iv").unwrap(), "../front/iv_preface.html");
    }

    #[test]
    fn test_resolve_unknown_page_is_not_found() {
        let err = table().resolve("999").unwrap_err();
        assert_eq!(err, SiteError::not_found("999"));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(table().resolve(" 12").is_err());
        assert!(table().resolve("12 ").is_err());
        assert!(table().resolve("IV").is_err());
        // The typed text is reported back as entered.
        assert_eq!(table().resolve("12 ").unwrap_err(), SiteError::not_found("12 "));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(not_found_message("7a"), "Did not find page 7a on this site!");
    }
}
