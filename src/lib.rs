//! Load integer coordinates from a text file and draw them with
//! [Matplotlib][].
//!
//! Usage
//! -----
//!
//! The input holds one `x,y` pair per line.  [`Dataset::load`] reads
//! it in a single pass and [`chart::render`] draws the points joined in
//! file order, either in a window or into an image file.
//!
//! ```no_run
//! use coordplot::{chart::{self, ChartOptions}, Dataset};
//! let data = Dataset::load("in/9-1")?;
//! chart::render(&data, &ChartOptions::default())?;
//! # Ok::<(), coordplot::Error>(())
//! ```
//!
//! The [`plot`] module holds the small set of Matplotlib bindings the
//! chart is built on; it requires a Python installation providing the
//! `matplotlib` and `numpy` packages.
//!
//! [Matplotlib]: https://matplotlib.org/

pub mod chart;
pub mod dataset;
pub mod error;
pub mod plot;

pub use dataset::{Dataset, Point};
pub use error::{Error, PointError, Result};
