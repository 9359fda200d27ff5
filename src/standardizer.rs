use crate::errors::AppError;
use crate::policy::NameAliasTable;
use regex::{Regex, RegexBuilder};

/// Maps free-text salesperson labels from the feed to canonical names.
///
/// Every alias is tested as a case-insensitive substring of the label, in
/// table order. Each match overwrites the previous assignment, so the last
/// matching alias wins. Labels matching no alias pass through unchanged.
#[derive(Debug, Clone)]
pub struct NameStandardizer {
    matchers: Vec<(Regex, String)>,
}

impl NameStandardizer {
    /// Compiles one literal, case-insensitive matcher per alias.
    pub fn new(table: &NameAliasTable) -> Result<Self, AppError> {
        let matchers = table
            .iter()
            .map(|(alias, canonical)| {
                RegexBuilder::new(&regex::escape(alias))
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, canonical.to_string()))
                    .map_err(|e| {
                        AppError::InternalError(format!("Invalid alias '{}': {}", alias, e))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { matchers })
    }

    pub fn standardize(&self, raw_label: &str) -> String {
        self.matchers
            .iter()
            .rev()
            .find(|(re, _)| re.is_match(raw_label))
            .map(|(_, canonical)| canonical.clone())
            .unwrap_or_else(|| raw_label.to_string())
    }
}
