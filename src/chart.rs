//! Draw a [`Dataset`] as a line chart.

use std::path::PathBuf;
use tracing::info;
use crate::{
    dataset::Dataset,
    error::Result,
    plot::{self, Figure},
};

/// Where the finished chart goes.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Output {
    /// Open a window and wait until it is closed.
    #[default]
    Show,
    /// Write an image file; its extension selects the format.
    File(PathBuf),
}

/// How to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub xlabel: String,
    pub ylabel: String,
    /// Matplotlib marker placed on every point.
    pub marker: String,
    pub title: Option<String>,
    pub grid: bool,
    pub output: Output,
    /// Resolution when saving to a file.
    pub dpi: Option<f64>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            xlabel: "X".to_string(),
            ylabel: "Y".to_string(),
            marker: ",".to_string(),
            title: None,
            grid: false,
            output: Output::Show,
            dpi: None,
        }
    }
}

/// Plot the points of `data` joined in order, label the axes and
/// deliver the chart to `opts.output`.
pub fn render(data: &Dataset, opts: &ChartOptions) -> Result<()> {
    let fig = match opts.output {
        Output::Show => plot::figure()?,
        // A figure outside of pyplot needs no display.
        Output::File(_) => Figure::new()?,
    };
    draw(&fig, data, opts)?;
    match &opts.output {
        Output::Show => {
            info!(points = data.len(), "showing chart");
            plot::show()
        }
        Output::File(path) => {
            info!(points = data.len(), path = %path.display(),
                  "saving chart");
            let mut save = fig.save();
            if let Some(dpi) = opts.dpi {
                save.dpi(dpi);
            }
            save.to_file(path)
        }
    }
}

fn draw(fig: &Figure, data: &Dataset, opts: &ChartOptions)
        -> Result<plot::Axes> {
    let mut ax = fig.subplots()?;
    let (xs, ys) = (data.xs(), data.ys());
    ax.xy(&xs, &ys).marker(&opts.marker).plot()?;
    ax.set_xlabel(&opts.xlabel)?.set_ylabel(&opts.ylabel)?;
    if let Some(title) = &opts.title {
        ax.set_title(title)?;
    }
    if opts.grid {
        ax.grid()?;
    }
    Ok(ax)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dataset::Point, error::Error};

    macro_rules! require_matplotlib { () => {
        if !plot::available() {
            eprintln!("matplotlib not importable, skipping");
            return Ok(());
        }
    }}

    #[test]
    fn defaults() {
        let o = ChartOptions::default();
        assert_eq!((o.xlabel.as_str(), o.ylabel.as_str()), ("X", "Y"));
        assert_eq!(o.marker, ",");
        assert_eq!(o.output, Output::Show);
        assert!(o.title.is_none() && o.dpi.is_none() && !o.grid);
    }

    #[test]
    fn draw_labels_axes() -> Result<()> {
        require_matplotlib!();
        let data: Dataset = [Point::new(1, 2), Point::new(3, 4)]
            .into_iter().collect();
        let fig = Figure::new()?;
        let ax = draw(&fig, &data, &ChartOptions::default())?;
        assert_eq!(ax.xlabel()?, "X");
        assert_eq!(ax.ylabel()?, "Y");
        assert_eq!(ax.line_count()?, 1);
        Ok(())
    }

    #[test]
    fn render_to_file() -> Result<()> {
        require_matplotlib!();
        let data = Dataset::parse("7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n")?;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let opts = ChartOptions {
            title: Some("day 9".to_string()),
            grid: true,
            dpi: Some(72.),
            output: Output::File(path.clone()),
            ..ChartOptions::default()
        };
        render(&data, &opts)?;
        assert!(path.metadata().unwrap().len() > 0);
        Ok(())
    }

    #[test]
    fn render_empty_dataset() -> Result<()> {
        require_matplotlib!();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        let opts = ChartOptions { output: Output::File(path.clone()),
                                  ..ChartOptions::default() };
        render(&Dataset::new(), &opts)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn render_into_missing_directory() -> Result<()> {
        require_matplotlib!();
        let dir = tempfile::tempdir().unwrap();
        let opts = ChartOptions {
            output: Output::File(dir.path().join("missing").join("c.png")),
            ..ChartOptions::default()
        };
        let data = Dataset::parse("0,0\n1,1\n")?;
        assert!(matches!(render(&data, &opts), Err(Error::OutputNotFound)));
        Ok(())
    }
}
