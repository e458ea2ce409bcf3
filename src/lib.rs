//! Reader and writer for the `PeakList.xml` files written by Bruker NMR software.
//!
//! A document is mapped onto a small object graph:
//!
//! ```text
//! PeakList
//! └── PeakList1D*
//!     ├── PeakList1DHeader
//!     │   └── PeakPickDetails?
//!     └── Peak1D*
//! ```
//!
//! ```rust,no_run
//! use bruker_peaklist::{parse_file, write_file, WriteOptions};
//!
//! if let Some(peak_list) = parse_file("PeakList.xml")? {
//!     println!("{} peaks", peak_list.peak_count());
//!     write_file(&peak_list, "copy.xml", &WriteOptions::default())?;
//! }
//! # Ok::<(), bruker_peaklist::PeakListError>(())
//! ```

pub mod error;
pub mod models;
pub mod parser;
pub mod utils;
pub mod writer;
pub mod xml;

pub use error::{PeakListError, Result};
pub use models::{Peak1D, PeakList, PeakList1D, PeakList1DHeader, PeakPickDetails};
pub use parser::{parse, parse_file, parse_reader, parse_str};
pub use writer::{to_element, to_string, write, write_file};
pub use xml::{Element, WriteOptions};
