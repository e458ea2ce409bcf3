//! Rebuilds the `PeakList.xml` element tree from the object graph.
//!
//! Attributes whose value is absent are omitted, as is the
//! `PeakPickDetails` element when a header carries no details. Element and
//! attribute order match what [`crate::parser`] reads.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::Result;
use crate::models::{Peak1D, PeakList, PeakList1D, PeakList1DHeader, PeakPickDetails};
use crate::parser::{HEADER_TAG, PEAK_LIST_1D_TAG, PEAK_LIST_TAG, PEAK_TAG, PICK_DETAILS_TAG};
use crate::utils::{format_datetime, set_attr_optional};
use crate::xml::{Element, WriteOptions};

/// Builds the element tree for a peak list
pub fn to_element(peak_list: &PeakList) -> Element {
    peak_list.to_element()
}

/// Serializes a peak list to an XML string
pub fn to_string(peak_list: &PeakList, options: &WriteOptions) -> Result<String> {
    peak_list.to_element().to_xml_string(options)
}

pub fn write<W: Write>(peak_list: &PeakList, out: W, options: &WriteOptions) -> Result<()> {
    peak_list.to_element().write_to(out, options)
}

/// Writes a peak list to a file, replacing any existing content
pub fn write_file(peak_list: &PeakList, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    write(peak_list, &mut out, options)?;
    out.flush()?;
    debug!(
        "Wrote {} lists and {} peaks to {}",
        peak_list.children.len(),
        peak_list.peak_count(),
        path.as_ref().display()
    );
    Ok(())
}

impl PeakList {
    pub fn to_element(&self) -> Element {
        let mut e = Element::new(PEAK_LIST_TAG);
        set_attr_optional(&mut e, "modified", self.modified.as_ref().map(format_datetime));
        for child in &self.children {
            e.push_child(child.to_element());
        }
        e
    }
}

impl PeakList1D {
    pub fn to_element(&self) -> Element {
        let mut e = Element::new(PEAK_LIST_1D_TAG);
        e.push_child(self.header.to_element());
        for peak in &self.peaks {
            e.push_child(peak.to_element());
        }
        e
    }
}

impl PeakList1DHeader {
    pub fn to_element(&self) -> Element {
        let mut e = Element::new(HEADER_TAG);
        set_attr_optional(&mut e, "creator", self.creator.as_deref());
        set_attr_optional(&mut e, "date", self.date.as_ref().map(format_datetime));
        set_attr_optional(&mut e, "expNo", self.exp_no);
        set_attr_optional(&mut e, "name", self.name.as_deref());
        set_attr_optional(&mut e, "owner", self.owner.as_deref());
        set_attr_optional(&mut e, "procNo", self.proc_no);
        set_attr_optional(&mut e, "source", self.source.as_deref());
        if let Some(details) = &self.details {
            e.push_child(details.to_element());
        }
        e
    }
}

impl PeakPickDetails {
    pub fn to_element(&self) -> Element {
        let mut e = Element::new(PICK_DETAILS_TAG);
        e.text = self.to_content();
        e
    }

    /// Renders the `F1=<v>ppm, F2=<v>ppm, MI=<v>cm, MAXI=<v>cm, PC=<v>` template
    pub fn to_content(&self) -> String {
        format!(
            "F1={}ppm, F2={}ppm, MI={}cm, MAXI={}cm, PC={}",
            self.f1, self.f2, self.mi, self.maxi, self.pc
        )
    }
}

impl Peak1D {
    pub fn to_element(&self) -> Element {
        let mut e = Element::new(PEAK_TAG);
        set_attr_optional(&mut e, "F1", self.f1);
        set_attr_optional(&mut e, "intensity", self.intensity);
        set_attr_optional(&mut e, "type", self.peak_type);
        e
    }
}
