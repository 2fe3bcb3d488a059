//! Pipeline configuration.
//!
//! Everything a pipeline run depends on is passed in explicitly: the
//! [`Context`] describes where the query is being evaluated, the
//! [`Options`] describe what the caller asked for. There are no ambient
//! globals.

/// Where the query is evaluated: the current record (relative namespaces
/// resolve against it) and the host's start-page name.
#[derive(Debug, Clone)]
pub struct Context {
    /// The record the query appears on.
    pub current: crate::RecordId,
    /// Name of a namespace's index record (conventionally `start`).
    pub start_name: String,
}

impl Context {
    pub fn new(current: impl Into<crate::RecordId>, start_name: impl Into<String>) -> Self {
        Context {
            current: current.into(),
            start_name: start_name.into(),
        }
    }
}

/// How abstracts are going to be presented downstream. The engine only
/// cares whether the (expensive) abstract column must be fetched at all;
/// the renderer interprets the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnippetKind {
    #[default]
    None,
    Tooltip,
    Inline,
    Plain,
    Quoted,
}

/// Snippet settings carried through to the renderer.
#[derive(Debug, Clone, Default)]
pub struct Snippet {
    pub kind: SnippetKind,
    pub count: usize,
    pub extent: String,
}

impl Snippet {
    /// Whether any requested column needs the abstract text.
    pub fn wants_abstract(&self) -> bool {
        self.kind != SnippetKind::None
    }
}

/// Caller options for one pipeline run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Delegate selection to the host's full-text search instead of the
    /// identifier-pattern lookup.
    pub fulltext: bool,
    /// Treat the whole query as a regex over the full record path
    /// (namespace tokens are not parsed out in this mode).
    pub full_regex: bool,
    /// Drop records whose name is the start-page name.
    pub hide_start: bool,
    /// Maximum namespace depth to keep; 0 means unlimited.
    pub max_depth: usize,
    /// Cap on leaf rows, applied strictly after sorting; 0 means unlimited.
    pub limit: usize,
    /// Emit group headings.
    pub group: bool,
    /// Case-sensitive string collation.
    pub case_sort: bool,
    /// Natural (numeric-aware) string collation.
    pub nat_sort: bool,
    /// Spell date headings out in words where a wordy format exists.
    pub spell_date: bool,
    /// Display template: either a `{...}` placeholder string or a bare
    /// column name to copy.
    pub display: String,
    /// General display date format for `{..date..}` placeholders.
    pub date_format: String,
    /// Ordered sort specification: `(column key, direction expression)`.
    /// An empty direction picks the column's default.
    pub sort: Vec<(String, String)>,
    /// Ordered metadata filters: `(column key, expression)`. A `^`/`!`
    /// prefix on the key inverts the match.
    pub filter: Vec<(String, String)>,
    /// Snippet settings; decides whether abstracts are fetched.
    pub snippet: Snippet,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            fulltext: false,
            full_regex: false,
            hide_start: false,
            max_depth: 0,
            limit: 0,
            group: false,
            case_sort: false,
            nat_sort: false,
            spell_date: false,
            display: "name".to_string(),
            date_format: "%e %b %Y".to_string(),
            sort: Vec::new(),
            filter: Vec::new(),
            snippet: Snippet::default(),
        }
    }
}

impl Options {
    /// Appends a sort key. `dir` is `asc`/`a`, `desc`/`d`, or empty for the
    /// column's default direction.
    pub fn sort_by(mut self, key: impl Into<String>, dir: impl Into<String>) -> Self {
        self.sort.push((key.into(), dir.into()));
        self
    }

    /// Appends a metadata filter.
    pub fn filter_by(mut self, key: impl Into<String>, expr: impl Into<String>) -> Self {
        self.filter.push((key.into(), expr.into()));
        self
    }

    /// Enables group headings.
    pub fn grouped(mut self) -> Self {
        self.group = true;
        self
    }

    /// Caps the number of leaf rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
