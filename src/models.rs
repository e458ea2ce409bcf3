use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A whole `PeakList.xml` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList {
    pub modified: Option<NaiveDateTime>,
    pub children: Vec<PeakList1D>,
}

/// One 1-D peak list: its header followed by the picked peaks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList1D {
    pub header: PeakList1DHeader,
    pub peaks: Vec<Peak1D>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakList1DHeader {
    pub creator: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub exp_no: Option<i64>,
    pub name: Option<String>,
    pub owner: Option<String>,
    pub proc_no: Option<i64>,
    pub source: Option<String>,
    pub details: Option<PeakPickDetails>,
}

/// Parameters the acquisition software used to pick peaks.
///
/// `f1`/`f2` bound the region in ppm, `mi`/`maxi` are the minimum and maximum
/// intensity in cm and `pc` is the peak count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PeakPickDetails {
    pub f1: f64,
    pub f2: f64,
    pub mi: f64,
    pub maxi: f64,
    pub pc: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Peak1D {
    pub f1: Option<f64>,
    pub intensity: Option<f64>,
    pub peak_type: Option<i64>,
}

impl PeakList {
    pub fn new(modified: Option<NaiveDateTime>) -> Self {
        Self {
            modified,
            children: Vec::new(),
        }
    }

    /// Total number of peaks across all lists
    pub fn peak_count(&self) -> usize {
        self.children.iter().map(|list| list.peaks.len()).sum()
    }
}

impl PeakList1D {
    pub fn new(header: PeakList1DHeader) -> Self {
        Self {
            header,
            peaks: Vec::new(),
        }
    }
}
