use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use coordplot::{
    chart::{self, ChartOptions, Output},
    Dataset,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "coordplot")]
#[command(about = "Plot the x,y integer pairs of a file as a line chart",
          long_about = None)]
struct Args {
    /// File with one `x,y` pair per line
    #[arg(default_value = "../in/9-1")]
    input: PathBuf,

    /// Save the chart to this file instead of showing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Resolution of the saved image
    #[arg(long)]
    dpi: Option<f64>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,

    /// Matplotlib marker drawn on each point
    #[arg(long, default_value = ",", allow_hyphen_values = true)]
    marker: String,

    #[arg(long, default_value = "X")]
    xlabel: String,

    #[arg(long, default_value = "Y")]
    ylabel: String,

    /// Draw a background grid
    #[arg(long)]
    grid: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            xlabel: self.xlabel.clone(),
            ylabel: self.ylabel.clone(),
            marker: self.marker.clone(),
            title: self.title.clone(),
            grid: self.grid,
            output: match &self.output {
                Some(path) => Output::File(path.clone()),
                None => Output::Show,
            },
            dpi: self.dpi,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = &args.log {
        let log_file = std::fs::File::create(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    let data = Dataset::load(&args.input)?;
    if let Some((lo, hi)) = data.bounds() {
        tracing::debug!(%lo, %hi, "bounding box");
    }
    chart::render(&data, &args.chart_options())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arguments() {
        let args = Args::try_parse_from(["coordplot"]).unwrap();
        assert_eq!(args.input, PathBuf::from("../in/9-1"));
        assert_eq!(args.chart_options(), ChartOptions::default());
    }

    #[test]
    fn output_selects_file() {
        let args = Args::try_parse_from(
            ["coordplot", "pts.txt", "-o", "out.png", "--dpi", "150",
             "--title", "tiles", "--grid", "--marker", "o"]).unwrap();
        let o = args.chart_options();
        assert_eq!(args.input, PathBuf::from("pts.txt"));
        assert_eq!(o.output, Output::File(PathBuf::from("out.png")));
        assert_eq!(o.dpi, Some(150.));
        assert_eq!(o.title.as_deref(), Some("tiles"));
        assert!(o.grid);
        assert_eq!(o.marker, "o");
    }
}
