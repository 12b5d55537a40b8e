//! Edge loop mapping: selection tokens to a dense `position -> edge` table.
//!
//! Hosts report a selected loop as a list of tokens, either contiguous
//! ranges (`e[12:19]`) or single edges (`e[4]`), optionally prefixed with an
//! object path. Tokens are concatenated in selection order; position `k` of
//! the resulting loop is the `k`-th edge across all tokens.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::collaborator::EdgeId;
use super::error::GridFillError;

/// Longest edge loop the tool accepts.
pub const MAX_LOOP_LEN: usize = 1 << 20;

static BRACKETED_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\s*(\d+)\s*(?::\s*(\d+)\s*)?\]").expect("valid bracketed index pattern")
});

static BARE_INDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*(?::\s*(\d+)\s*)?$").expect("valid bare index pattern")
});

/// An inclusive run of consecutive edge ids parsed from one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRange {
    pub first: u32,
    pub last: u32,
}

impl EdgeRange {
    /// Number of edges in the range; never zero.
    #[must_use]
    pub fn count(&self) -> usize {
        usize::try_from(self.last - self.first).map_or(usize::MAX, |span| span.saturating_add(1))
    }

    pub fn ids(self) -> impl Iterator<Item = EdgeId> {
        (self.first..=self.last).map(EdgeId)
    }
}

impl fmt::Display for EdgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "[{}]", self.first)
        } else {
            write!(f, "[{}:{}]", self.first, self.last)
        }
    }
}

/// Parses one selection token into the edge range it names.
///
/// The last bracketed group wins (`pCube1.e[4:7]` reads `4:7`); a token
/// without brackets must be a bare index or range.
pub fn parse_token(token: &str) -> Result<EdgeRange, GridFillError> {
    let captures = BRACKETED_INDEX
        .captures_iter(token)
        .last()
        .or_else(|| BARE_INDEX.captures(token))
        .ok_or_else(|| GridFillError::selection(token, "no edge index found"))?;

    let first = parse_index(token, &captures[1])?;
    let last = match captures.get(2) {
        Some(m) => parse_index(token, m.as_str())?,
        None => first,
    };

    if last < first {
        return Err(GridFillError::selection(
            token,
            format!("range end {last} precedes start {first}"),
        ));
    }

    Ok(EdgeRange { first, last })
}

fn parse_index(token: &str, digits: &str) -> Result<u32, GridFillError> {
    digits
        .parse::<u32>()
        .map_err(|err| GridFillError::selection(token, format!("edge index out of range: {err}")))
}

/// The boundary loop being filled: position `k` maps to the host edge at
/// that place in the cycle. Positions wrap modulo [`EdgeLoop::len`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeLoop {
    edges: Vec<EdgeId>,
}

impl EdgeLoop {
    /// Builds a loop from edges already in loop order.
    pub fn from_edges(edges: Vec<EdgeId>) -> Result<Self, GridFillError> {
        if edges.is_empty() {
            return Err(GridFillError::selection("", "edge loop is empty"));
        }
        Ok(Self { edges })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edge at a loop position in `[0, len)`.
    ///
    /// # Panics
    /// Panics when `position` is out of range; callers wrap positions first.
    #[must_use]
    pub fn edge_at(&self, position: usize) -> EdgeId {
        self.edges[position]
    }

    #[must_use]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Compresses the loop back into canonical selection tokens, merging
    /// consecutive ids into ranges.
    #[must_use]
    pub fn to_tokens(&self) -> Vec<String> {
        let mut ranges: Vec<EdgeRange> = Vec::new();
        for edge in &self.edges {
            match ranges.last_mut() {
                Some(range) if range.last.checked_add(1) == Some(edge.index()) => {
                    range.last = edge.index();
                }
                _ => ranges.push(EdgeRange {
                    first: edge.index(),
                    last: edge.index(),
                }),
            }
        }
        ranges.iter().map(ToString::to_string).collect()
    }
}

/// Maps selection tokens to an [`EdgeLoop`].
///
/// Adjacency is not checked: the caller is expected to have isolated a real
/// closed loop before handing over the selection. The total length is checked
/// against [`MAX_LOOP_LEN`] before any range is expanded.
pub fn map_loop<S: AsRef<str>>(tokens: &[S]) -> Result<EdgeLoop, GridFillError> {
    if tokens.is_empty() {
        return Err(GridFillError::selection(
            "",
            "nothing selected; please select an edge loop",
        ));
    }

    let ranges = tokens
        .iter()
        .map(|token| parse_token(token.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let loop_len = ranges
        .iter()
        .try_fold(0_usize, |total, range| total.checked_add(range.count()))
        .filter(|&total| total <= MAX_LOOP_LEN)
        .ok_or_else(|| GridFillError::LoopTooLong {
            loop_len: ranges
                .iter()
                .fold(0_usize, |total, range| total.saturating_add(range.count())),
            max: MAX_LOOP_LEN,
        })?;

    let mut edges = Vec::with_capacity(loop_len);
    for range in ranges {
        edges.extend(range.ids());
    }

    log::debug!(
        "mapped {} selection tokens to a loop of {} edges",
        tokens.len(),
        edges.len()
    );
    EdgeLoop::from_edges(edges)
}
