//! Keyword-driven detection of defining lines.

use regex::Regex;

use crate::error::GraphError;

/// A definition recognised on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Definition<'a> {
    /// The keyword whose pattern matched.
    pub keyword: &'a str,
    /// The bare name of the new symbol.
    pub name: &'a str,
}

#[derive(Debug, Clone)]
struct KeywordPattern {
    keyword: String,
    pattern: Regex,
}

/// Recognises lines that introduce a symbol.
///
/// A keyword defines a symbol when it is followed by at least one space or
/// tab, then a run of word characters, then a non-word character or the end
/// of the line. Keywords are tried in their configured order and the first
/// one that matches wins.
#[derive(Debug, Clone)]
pub struct DefinitionMatcher {
    keywords: Vec<KeywordPattern>,
}

impl DefinitionMatcher {
    /// Compiles a matcher for the given keywords, preserving their order.
    ///
    /// # Errors
    /// Returns `GraphError::InvalidKeyword` for blank keywords or keywords
    /// whose pattern fails to compile.
    pub fn new<I, S>(keywords: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(|keyword| compile(keyword.into()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keywords })
    }

    /// Returns the configured keywords in order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|entry| entry.keyword.as_str())
    }

    /// Returns the definition introduced by `line`, if any.
    ///
    /// When a keyword occurs several times on the line, its last occurrence
    /// that fits the pattern names the symbol.
    #[must_use]
    pub fn match_line<'a>(&'a self, line: &'a str) -> Option<Definition<'a>> {
        self.keywords
            .iter()
            .filter(|entry| line.contains(entry.keyword.as_str()))
            .find_map(|entry| {
                let name = entry.pattern.captures(line)?.get(1)?.as_str();
                Some(Definition {
                    keyword: entry.keyword.as_str(),
                    name,
                })
            })
    }
}

fn compile(keyword: String) -> Result<KeywordPattern, GraphError> {
    if keyword.trim().is_empty() {
        return Err(GraphError::invalid_keyword(keyword, "keyword is blank"));
    }
    let source = format!(r"^.*{}[ \t]+(\w+)(?:\W|$)", regex::escape(&keyword));
    let pattern = Regex::new(&source)
        .map_err(|error| GraphError::invalid_keyword(keyword.as_str(), error.to_string()))?;
    Ok(KeywordPattern { keyword, pattern })
}
