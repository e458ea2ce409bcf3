//! Maps an element tree onto the peak list object graph.
//!
//! Every `from_element` returns `Ok(None)` when handed an element with the
//! wrong tag. A present attribute that cannot be coerced is an error and
//! aborts the whole parse.

use std::io::BufRead;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::models::{Peak1D, PeakList, PeakList1D, PeakList1DHeader, PeakPickDetails};
use crate::utils::{attr_datetime, attr_f64, attr_i64, attr_string};
use crate::xml::{self, Element};

pub const PEAK_LIST_TAG: &str = "PeakList";
pub const PEAK_LIST_1D_TAG: &str = "PeakList1D";
pub const HEADER_TAG: &str = "PeakList1DHeader";
pub const PICK_DETAILS_TAG: &str = "PeakPickDetails";
pub const PEAK_TAG: &str = "Peak1D";

static PICK_DETAILS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*F1=(.+)ppm,\s*F2=(.+)ppm,\s*MI=(.+)cm,\s*MAXI=(.+)cm,\s*PC=(.+)\s*$")
        .expect("pick details pattern is valid")
});

/// Finds the first `PeakList` element in the tree (the root itself included)
/// and maps it. An absent root or a tree without a `PeakList` gives `Ok(None)`.
pub fn parse(root: Option<&Element>) -> Result<Option<PeakList>> {
    match root.and_then(|root| root.find_first(PEAK_LIST_TAG)) {
        Some(node) => PeakList::from_element(node),
        None => Ok(None),
    }
}

/// Parses a `PeakList.xml` document held in a string
pub fn parse_str(xml_data: &str) -> Result<Option<PeakList>> {
    let root = xml::parse_str(xml_data)?;
    parse(Some(&root))
}

pub fn parse_reader<R: BufRead>(source: R) -> Result<Option<PeakList>> {
    let root = xml::parse_reader(source)?;
    parse(Some(&root))
}

/// Reads and parses a `PeakList.xml` file
pub fn parse_file(path: impl AsRef<Path>) -> Result<Option<PeakList>> {
    let root = xml::parse_file(path.as_ref())?;
    debug!("Loaded XML tree from {}", path.as_ref().display());
    parse(Some(&root))
}

impl PeakList {
    pub fn from_element(e: &Element) -> Result<Option<Self>> {
        if e.name != PEAK_LIST_TAG {
            return Ok(None);
        }

        let modified = attr_datetime(e, "modified")?;

        let mut children = Vec::new();
        for (index, node) in e.children_named(PEAK_LIST_1D_TAG).enumerate() {
            match PeakList1D::from_element(node)? {
                Some(list) => children.push(list),
                None => warn!("Skipping {PEAK_LIST_1D_TAG} #{index}: no <{HEADER_TAG}> element"),
            }
        }

        Ok(Some(PeakList { modified, children }))
    }
}

impl PeakList1D {
    /// A list without a header element is treated as structurally invalid
    pub fn from_element(e: &Element) -> Result<Option<Self>> {
        if e.name != PEAK_LIST_1D_TAG {
            return Ok(None);
        }

        let header = match e.first_child(HEADER_TAG) {
            Some(node) => PeakList1DHeader::from_element(node)?,
            None => None,
        };
        let Some(header) = header else {
            return Ok(None);
        };

        let peaks = e
            .children_named(PEAK_TAG)
            .filter_map(|node| Peak1D::from_element(node).transpose())
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Parsed {PEAK_LIST_1D_TAG} {:?} with {} peaks",
            header.name.as_deref().unwrap_or(""),
            peaks.len()
        );

        Ok(Some(PeakList1D { header, peaks }))
    }
}

impl PeakList1DHeader {
    pub fn from_element(e: &Element) -> Result<Option<Self>> {
        if e.name != HEADER_TAG {
            return Ok(None);
        }

        let creator = attr_string(e, "creator");
        let date = attr_datetime(e, "date")?;
        let exp_no = attr_i64(e, "expNo")?;
        let name = attr_string(e, "name");
        let owner = attr_string(e, "owner");
        let proc_no = attr_i64(e, "procNo")?;
        let source = attr_string(e, "source");

        let details = e
            .first_child(PICK_DETAILS_TAG)
            .and_then(PeakPickDetails::from_element);

        Ok(Some(PeakList1DHeader {
            creator,
            date,
            exp_no,
            name,
            owner,
            proc_no,
            source,
            details,
        }))
    }
}

impl PeakPickDetails {
    /// Never fails: text that does not follow the template yields `None`
    pub fn from_element(e: &Element) -> Option<Self> {
        if e.name != PICK_DETAILS_TAG {
            return None;
        }

        let content = e.text_content();
        let details = Self::parse_content(&content);
        if details.is_none() {
            warn!("Ignoring unrecognised <{PICK_DETAILS_TAG}> content {:?}", content.trim());
        }
        details
    }

    /// Matches `F1=<v>ppm, F2=<v>ppm, MI=<v>cm, MAXI=<v>cm, PC=<v>` as a whole
    pub fn parse_content(content: &str) -> Option<Self> {
        let caps = PICK_DETAILS_PATTERN.captures(content.trim())?;
        let field = |i: usize| caps.get(i)?.as_str().trim().parse::<f64>().ok();

        Some(PeakPickDetails {
            f1: field(1)?,
            f2: field(2)?,
            mi: field(3)?,
            maxi: field(4)?,
            pc: field(5)?,
        })
    }
}

impl Peak1D {
    pub fn from_element(e: &Element) -> Result<Option<Self>> {
        if e.name != PEAK_TAG {
            return Ok(None);
        }

        Ok(Some(Peak1D {
            f1: attr_f64(e, "F1")?,
            intensity: attr_f64(e, "intensity")?,
            peak_type: attr_i64(e, "type")?,
        }))
    }
}
