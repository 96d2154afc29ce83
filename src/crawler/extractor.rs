//! Declarative extraction rules
//!
//! A stage describes what it reads from a page as a table of
//! `(selector, setter)` rules instead of inline parsing code. The table is
//! applied to a parsed document and writes into the stage's accumulator.

use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiles a CSS selector, mapping failures to a configuration error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

/// An element matched by a rule's selector
pub struct MatchedNode<'a> {
    element: ElementRef<'a>,
}

impl<'a> MatchedNode<'a> {
    /// Visible text of the element and its descendants, trimmed
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }
}

/// How many matches a rule consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Only the first element satisfying the selector
    First,
    /// Every matching element, in document order
    Each,
}

type Setter<T> = Box<dyn Fn(&mut T, &MatchedNode<'_>) + Send + Sync>;

/// One `selector → setter` entry
pub struct ExtractionRule<T> {
    source: String,
    selector: Selector,
    cardinality: Cardinality,
    setter: Setter<T>,
}

impl<T> ExtractionRule<T> {
    /// A rule fed with the first match only
    pub fn first<F>(selector: &str, setter: F) -> Result<Self, ConfigError>
    where
        F: Fn(&mut T, &MatchedNode<'_>) + Send + Sync + 'static,
    {
        Self::new(selector, Cardinality::First, setter)
    }

    /// A rule fed with every match
    pub fn each<F>(selector: &str, setter: F) -> Result<Self, ConfigError>
    where
        F: Fn(&mut T, &MatchedNode<'_>) + Send + Sync + 'static,
    {
        Self::new(selector, Cardinality::Each, setter)
    }

    fn new<F>(selector: &str, cardinality: Cardinality, setter: F) -> Result<Self, ConfigError>
    where
        F: Fn(&mut T, &MatchedNode<'_>) + Send + Sync + 'static,
    {
        Ok(Self {
            source: selector.to_string(),
            selector: compile_selector(selector)?,
            cardinality,
            setter: Box::new(setter),
        })
    }

    /// The selector text this rule was built from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Applies the rule, returning how many elements were passed to the setter
    fn apply(&self, document: &Html, target: &mut T) -> usize {
        let mut matches = document.select(&self.selector);
        match self.cardinality {
            Cardinality::First => match matches.next() {
                Some(element) => {
                    (self.setter)(target, &MatchedNode { element });
                    1
                }
                None => 0,
            },
            Cardinality::Each => matches
                .map(|element| (self.setter)(target, &MatchedNode { element }))
                .count(),
        }
    }
}

/// Ordered table of extraction rules for one stage
pub struct RuleSet<T> {
    rules: Vec<ExtractionRule<T>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule; rules run in insertion order
    pub fn with(mut self, rule: ExtractionRule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[ExtractionRule<T>] {
        &self.rules
    }

    /// Runs every rule against `document`
    ///
    /// A rule that matches nothing leaves `target` untouched. Returns the
    /// total number of matched elements.
    pub fn apply(&self, document: &Html, target: &mut T) -> usize {
        self.rules
            .iter()
            .map(|rule| {
                let matched = rule.apply(document, target);
                if matched == 0 {
                    tracing::trace!("Selector '{}' matched nothing", rule.source);
                }
                matched
            })
            .sum()
    }

    /// Parses `body` as HTML and runs every rule against it
    pub fn apply_html(&self, body: &str, target: &mut T) -> usize {
        let document = Html::parse_document(body);
        self.apply(&document, target)
    }
}
