//! h5pad - a terminal viewer for HDF5 / netCDF-4 files.
//!
//! The library holds the viewer core: containers addressed by slash paths,
//! datasets read into a byte buffer and split into 2-D pages, type-directed
//! decoding of cells (including object references), and navigation with
//! back/forward history. The binary drives it through a ratatui interface.
//!
//! # Example
//!
//! ```
//! use h5pad::config::ViewerConfig;
//! use h5pad::container::MemoryContainer;
//! use h5pad::data::ElementType;
//! use h5pad::session::Session;
//!
//! let values: Vec<u8> = (0..24i32).flat_map(|v| v.to_ne_bytes()).collect();
//! let container = MemoryContainer::builder("demo.h5")
//!     .dataset("grid/cube", &[2, 3, 4], ElementType::int(4), values)
//!     .build();
//!
//! let mut session = Session::new(Box::new(container), ViewerConfig::default())?;
//! session.navigate("/grid/cube")?;
//!
//! let view = session.location().object.dataset.as_ref().unwrap();
//! assert_eq!(view.page_count(), 2);
//! assert_eq!(view.page_label(1), "[1,:,:]");
//!
//! let page = view.render_page(1, session.container());
//! assert_eq!(page.rows[0][0].text, "12");
//! # Ok::<(), h5pad::error::PadError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod container;
pub mod data;
pub mod data_viewer;
pub mod error;
pub mod explorer;
pub mod navigation;
pub mod session;
pub mod ui;

pub use error::{DecodeError, PadError, Result};
