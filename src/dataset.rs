//! Integer coordinates read from a text file.
//!
//! The input holds one `x,y` pair per line, optionally surrounded by
//! whitespace.  Blank lines are ignored.  Any other malformed line makes
//! the whole load fail: a [`Dataset`] is either complete or not returned.

use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    slice,
    str::FromStr,
};
use tracing::{debug, info};
use crate::error::{Error, PointError, Result};

/// An `(x, y)` integer coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

fn parse_coord(token: &str) -> std::result::Result<i64, PointError> {
    let token = token.trim();
    token.parse().map_err(|source| PointError::InvalidInteger {
        token: token.to_string(),
        source,
    })
}

impl FromStr for Point {
    type Err = PointError;

    fn from_str(s: &str) -> std::result::Result<Self, PointError> {
        let fields: Vec<&str> = s.trim().split(',').collect();
        match fields[..] {
            [x, y] => Ok(Point::new(parse_coord(x)?, parse_coord(y)?)),
            _ => Err(PointError::FieldCount(fields.len())),
        }
    }
}

/// Points in the order they were read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    points: Vec<Point>,
}

impl Dataset {
    /// Return an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, p: Point) {
        self.points.push(p)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// The x-coordinates, in point order.
    pub fn xs(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// The y-coordinates, in point order.
    pub fn ys(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Smallest and largest coordinates on each axis, as the lower-left
    /// and upper-right corners of the bounding box.  `None` if empty.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points[1..].iter().fold((first, first), |(lo, hi), p| {
            (Point::new(lo.x.min(p.x), lo.y.min(p.y)),
             Point::new(hi.x.max(p.x), hi.y.max(p.y)))
        }))
    }

    /// Read a dataset from `reader`, one `x,y` pair per line.
    ///
    /// `origin` only serves to report I/O errors.
    pub fn from_reader<R: BufRead>(reader: R, origin: &Path) -> Result<Self> {
        let mut data = Dataset::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::file_access(origin, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let p = line.parse().map_err(|source| Error::Format {
                line: i + 1,
                text: line.clone(),
                source,
            })?;
            data.push(p);
        }
        Ok(data)
    }

    /// Parse a dataset held in memory.
    ///
    /// # Example
    ///
    /// ```
    /// use coordplot::{Dataset, Point};
    /// let d = Dataset::parse("1,2\n3,4\n")?;
    /// assert_eq!(d.points(), &[Point::new(1, 2), Point::new(3, 4)]);
    /// # Ok::<(), coordplot::Error>(())
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes(), Path::new("<memory>"))
    }

    /// Load the file at `path`.  The file is closed before returning,
    /// whether loading succeeded or not.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening coordinates file");
        let file = File::open(path).map_err(|e| Error::file_access(path, e))?;
        let data = Self::from_reader(BufReader::new(file), path)?;
        info!(path = %path.display(), points = data.len(),
              "loaded coordinates");
        Ok(data)
    }
}

impl FromIterator<Point> for Dataset {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Dataset { points: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Point;
    type IntoIter = slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
