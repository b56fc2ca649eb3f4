//! String-rendered tabular results.
//!
//! Query results reach the console as a header row plus ordered rows of
//! string cells. Domain row types implement [`Tabular`] to describe how they
//! render; [`ResultTable`] collects them.

/// A row type that renders as a fixed set of columns.
pub trait Tabular {
    /// Column names, in cell order.
    const HEADERS: &'static [&'static str];

    /// Cell values, one per header.
    fn cells(&self) -> Vec<String>;
}

/// Header names plus rows of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Build a table from typed rows.
    #[must_use]
    pub fn from_rows<T: Tabular>(rows: &[T]) -> Self {
        Self {
            headers: T::HEADERS.iter().map(|h| (*h).to_owned()).collect(),
            rows: rows.iter().map(Tabular::cells).collect(),
        }
    }

    /// Column names.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, without the header.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as tab-separated lines.
    ///
    /// The header line is emitted only when `with_header` is set and there is
    /// at least one row.
    #[must_use]
    pub fn render(&self, with_header: bool) -> String {
        let mut out = String::new();
        if with_header && !self.rows.is_empty() {
            push_line(&mut out, &self.headers);
        }
        for row in &self.rows {
            push_line(&mut out, row);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String]) {
    for cell in cells {
        out.push_str(cell);
        out.push('\t');
    }
    out.push('\n');
}
