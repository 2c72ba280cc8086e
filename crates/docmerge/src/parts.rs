//! Named template parts of a multi-part document.
//!
//! A document stored in a word-processing container keeps its body, headers,
//! and footers as independent markup fragments. The merge engine processes
//! whichever parts are present; absence of a part is not an error.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The fixed set of part names a document may carry: one body, up to three
/// headers, and up to three footers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartName {
    #[serde(rename = "body")]
    Body,
    #[serde(rename = "header-1")]
    Header1,
    #[serde(rename = "header-2")]
    Header2,
    #[serde(rename = "header-3")]
    Header3,
    #[serde(rename = "footer-1")]
    Footer1,
    #[serde(rename = "footer-2")]
    Footer2,
    #[serde(rename = "footer-3")]
    Footer3,
}

impl PartName {
    /// All known part names, in processing order.
    pub const ALL: [PartName; 7] = [
        PartName::Body,
        PartName::Header1,
        PartName::Header2,
        PartName::Header3,
        PartName::Footer1,
        PartName::Footer2,
        PartName::Footer3,
    ];

    /// The canonical string form of this part name.
    pub fn as_str(self) -> &'static str {
        match self {
            PartName::Body => "body",
            PartName::Header1 => "header-1",
            PartName::Header2 => "header-2",
            PartName::Header3 => "header-3",
            PartName::Footer1 => "footer-1",
            PartName::Footer2 => "footer-2",
            PartName::Footer3 => "footer-3",
        }
    }

    /// Parse a part name from its canonical string form.
    pub fn parse(s: &str) -> Option<PartName> {
        PartName::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl Display for PartName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A set of template parts keyed by name, holding raw markup.
///
/// `BTreeMap` keeps parts in a stable processing order (body first, then
/// headers, then footers, per the `PartName` ordering).
pub type PartSet = BTreeMap<PartName, String>;
