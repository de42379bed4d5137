//! Reader and writer for the INI-style section/property files exchanged with
//! hydrodynamic model engines (model definitions, roughness, sediment,
//! morphology and boundary-condition files).
//!
//! ```
//! use hydroini_core::parser::parse_ini_str;
//! use std::path::Path;
//!
//! let document = parse_ini_str(
//!     "[General]\nfileVersion = 3.00\nfileType = roughness\n",
//!     Path::new("roughness.ini"),
//! )
//! .unwrap();
//! assert_eq!(document.sections()[0].property_value("fileType"), Some("roughness"));
//! ```

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod parser;
pub mod writer;

pub use config::{IniProfile, ReaderOptions, WriterOptions};
pub use domain::{IniDocument, IniError, IniProperty, IniResult, IniSection};
pub use parser::{IniReader, parse_ini_str, read_ini_file};
pub use writer::{IniWriter, write_ini_file};
