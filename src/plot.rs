//! Bindings to the parts of [Matplotlib][] needed to draw a dataset.
//!
//! The interface stays close to Matplotlib's explicit one: get a
//! [`Figure`] and its [`Axes`], plot on the axes, then either save the
//! figure or [`show`] it.
//!
//! [Matplotlib]: https://matplotlib.org/

use std::path::Path;
use lazy_static::lazy_static;
use numpy::{Element, PyArray1};
use pyo3::{
    prelude::*,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::PyDict,
};
use tracing::debug;
use crate::error::{Error, Result};

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    static ref FIGURE: PyResult<Py<PyModule>> = {
        pyimport!("matplotlib.figure")
    };
    static ref PYPLOT: PyResult<Py<PyModule>> = {
        pyimport!("matplotlib.pyplot")
    };
    static ref NUMPY: PyResult<Py<PyModule>> = {
        pyimport!("numpy")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Whether Matplotlib (and numpy) can be imported.
pub fn available() -> bool {
    pymod!(FIGURE).is_ok() && pymod!(PYPLOT).is_ok() && pymod!(NUMPY).is_ok()
}

/// Sequences that can be handed to Matplotlib as a numpy.ndarray.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny>;
}

impl<E: Element> Data for [E] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny> {
        PyArray1::from_slice_bound(py, self).into_any()
    }
}

impl<E: Element, const N: usize> Data for [E; N] {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny> {
        self[..].to_numpy(py)
    }
}

impl<E: Element> Data for Vec<E> {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyAny> {
        self[..].to_numpy(py)
    }
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

impl Figure {
    /// Return a new `Figure` that is not managed by pyplot.  It can
    /// be saved but not shown, and needs no GUI backend.
    pub fn new() -> Result<Figure> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| -> Result<Figure> {
            let fig = figure.bind(py).getattr("Figure")?.call0()?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Add a single set of axes covering the figure.
    pub fn subplots(&self) -> Result<Axes> {
        Python::with_gil(|py| -> Result<Axes> {
            let ax = self.fig.bind(py).call_method0("subplots")?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None }
    }
}

pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
}

impl Savefig {
    /// Resolution of the saved image.  Non-positive values select
    /// Matplotlib's default.
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Save the figure to `path`, the format being deduced from its
    /// extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), dpi = ?self.dpi, "saving figure");
        Python::with_gil(|py| -> Result<()> {
            let kwargs = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?;
            }
            self.fig.bind(py)
                .call_method("savefig", (path,), Some(&kwargs))
                .map_err(|e| {
                    if e.is_instance_of::<PyFileNotFoundError>(py) {
                        Error::OutputNotFound
                    } else if e.is_instance_of::<PyPermissionError>(py) {
                        Error::OutputPermission
                    } else {
                        Error::Python(e)
                    }
                })?;
            Ok(())
        })
    }
}

/// Return a new figure managed by pyplot, so that [`show`] displays it.
pub fn figure() -> Result<Figure> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| -> Result<Figure> {
        let fig = pyplot.bind(py).call_method0("figure")?;
        Ok(Figure { fig: fig.unbind() })
    })
}

/// Return a pyplot-managed figure together with its only axes.
pub fn subplots() -> Result<(Figure, Axes)> {
    let fig = figure()?;
    let ax = fig.subplots()?;
    Ok((fig, ax))
}

/// Display all open figures.  Blocks until their windows are closed
/// (with an interactive backend).
pub fn show() -> Result<()> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| -> Result<()> {
        pyplot.bind(py).call_method0("show")?;
        Ok(())
    })
}

impl Axes {
    fn call1(&mut self, name: &str, arg: impl IntoPy<PyObject>)
             -> Result<&mut Self> {
        Python::with_gil(|py| -> PyResult<()> {
            self.ax.bind(py).call_method1(name, (arg,))?;
            Ok(())
        })?;
        Ok(self)
    }

    /// Plot `y` versus `x` as lines and/or markers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use coordplot::plot;
    /// let (fig, mut ax) = plot::subplots()?;
    /// ax.xy(&[1, 2, 3, 4], &[1, 4, 2, 3]).marker(".").plot()?;
    /// fig.save().to_file("target/XY_plot.pdf")?;
    /// # Ok::<(), coordplot::Error>(())
    /// ```
    // We mutably borrow `self` to reflect that the final `.plot()`
    // will mutate the underlying Python object.
    #[must_use]
    pub fn xy<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> XY<'a, D>
    where D: Data + ?Sized {
        XY { axes: self, x, y, options: PlotOptions::new() }
    }

    pub fn set_title(&mut self, v: &str) -> Result<&mut Self> {
        self.call1("set_title", v)
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self> {
        self.call1("set_xlabel", label)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self> {
        self.call1("set_ylabel", label)
    }

    pub fn grid(&mut self) -> Result<&mut Self> {
        self.call1("grid", true)
    }

    pub fn xlabel(&self) -> Result<String> {
        self.get_string("get_xlabel")
    }

    pub fn ylabel(&self) -> Result<String> {
        self.get_string("get_ylabel")
    }

    fn get_string(&self, name: &str) -> Result<String> {
        Python::with_gil(|py| -> Result<String> {
            Ok(self.ax.bind(py).call_method0(name)?.extract()?)
        })
    }

    /// Number of lines drawn on these axes.
    pub fn line_count(&self) -> Result<usize> {
        Python::with_gil(|py| -> Result<usize> {
            Ok(self.ax.bind(py).getattr("lines")?.len()?)
        })
    }
}

#[derive(Clone, Debug)]
struct PlotOptions<'a> {
    fmt: &'a str,
    marker: Option<&'a str>,
    label: &'a str,
    linewidth: Option<f64>,
}

impl<'a> PlotOptions<'a> {
    fn new() -> PlotOptions<'static> {
        PlotOptions { fmt: "", marker: None, label: "", linewidth: None }
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(m) = self.marker {
            kwargs.set_item("marker", m)?
        }
        if !self.label.is_empty() {
            kwargs.set_item("label", self.label)?
        }
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?
        }
        Ok(kwargs)
    }
}

/// A pending line plot; nothing is drawn until [`XY::plot`].
pub struct XY<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    x: &'a D,
    y: &'a D,
    options: PlotOptions<'a>,
}

impl<'a, D> XY<'a, D>
where D: Data + ?Sized {
    /// Matplotlib format string such as `"r."` or `"b-"`.
    #[must_use]
    pub fn fmt(mut self, fmt: &'a str) -> Self {
        self.options.fmt = fmt;
        self
    }

    #[must_use]
    pub fn marker(mut self, marker: &'a str) -> Self {
        self.options.marker = Some(marker);
        self
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.options.label = label;
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Draw the points joined in sequence order.
    pub fn plot(self) -> Result<()> {
        pymod!(NUMPY)?;
        Python::with_gil(|py| -> Result<()> {
            let xn = self.x.to_numpy(py);
            let yn = self.y.to_numpy(py);
            let kwargs = self.options.kwargs(py)?;
            self.axes.ax.bind(py)
                .call_method("plot", (xn, yn, self.options.fmt),
                             Some(&kwargs))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Matplotlib is an external collaborator; without it there is
    // nothing to exercise.
    macro_rules! require_matplotlib { () => {
        if !available() {
            eprintln!("matplotlib not importable, skipping");
            return Ok(());
        }
    }}

    #[test]
    fn a_basic_pdf() -> Result<()> {
        require_matplotlib!();
        let fig = Figure::new()?;
        let mut ax = fig.subplots()?;
        ax.xy(&[1., 2., 3., 4.], &[1., 4., 2., 3.]).plot()?;
        assert_eq!(ax.line_count()?, 1);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a_basic.pdf");
        fig.save().to_file(&path)?;
        assert!(path.metadata().unwrap().len() > 0);
        Ok(())
    }

    #[test]
    fn integer_data_with_labels() -> Result<()> {
        require_matplotlib!();
        let fig = Figure::new()?;
        let mut ax = fig.subplots()?;
        let x: Vec<i64> = vec![-3, 0, 7];
        let y: Vec<i64> = vec![5, -1, 2];
        ax.xy(&x, &y).marker(",").linewidth(0.5).label("pts").plot()?;
        ax.set_xlabel("X")?.set_ylabel("Y")?.set_title("t")?.grid()?;
        assert_eq!(ax.xlabel()?, "X");
        assert_eq!(ax.ylabel()?, "Y");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.svg");
        fig.save().dpi(50.).to_file(&path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn save_into_missing_directory() -> Result<()> {
        require_matplotlib!();
        let fig = Figure::new()?;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.png");
        match fig.save().to_file(&path) {
            Err(Error::OutputNotFound) => Ok(()),
            r => panic!("unexpected result {:?}", r),
        }
    }

    #[test]
    fn dpi_ignores_non_positive() {
        let mut s = Savefig { fig: Python::with_gil(|py| py.None()),
                              dpi: None };
        assert_eq!(s.dpi(100.).dpi, Some(100.));
        assert_eq!(s.dpi(0.).dpi, None);
        assert_eq!(s.dpi(-1.).dpi, None);
    }
}
