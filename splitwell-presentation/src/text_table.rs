use std::{borrow::Cow, fmt::Write, iter};

const COLUMN_GAP: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// A header and the alignment of every cell below it.
#[derive(Clone, Copy, Debug)]
pub struct Column<'a> {
    header: &'a str,
    alignment: Alignment,
}

impl<'a> Column<'a> {
    pub const fn left(header: &'a str) -> Self {
        Self {
            header,
            alignment: Alignment::Left,
        }
    }

    pub const fn right(header: &'a str) -> Self {
        Self {
            header,
            alignment: Alignment::Right,
        }
    }
}

pub struct TextTableBuilder<'a, Row> {
    columns: &'a [Column<'a>],
    rows: Vec<Row>,
}

impl<'a, Row> TextTableBuilder<'a, Row>
where
    Row: AsRef<[Cow<'a, str>]>,
{
    pub fn new(columns: &'a [Column<'a>]) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Renders a header line, a dashed rule and one line per row. Cells past
    /// the last column are dropped and missing cells render blank. Trailing
    /// padding is trimmed from every line.
    pub fn build(self) -> String {
        if self.columns.is_empty() {
            return String::new();
        }

        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .map(|column| text_width(column.header))
            .collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(text_width(cell));
            }
        }

        let mut out = String::with_capacity(64 * (self.rows.len() + 2));
        self.write_line(&mut out, &widths, self.columns.iter().map(|c| c.header));
        let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
        let _ = writeln!(&mut out, "{}", "-".repeat(rule_width));
        for row in &self.rows {
            self.write_line(&mut out, &widths, row.as_ref().iter().map(|cell| &**cell));
        }
        out
    }

    fn write_line<'c>(
        &self,
        out: &mut String,
        widths: &[usize],
        cells: impl Iterator<Item = &'c str>,
    ) {
        let mut line = String::new();
        let cells = cells.chain(iter::repeat(""));
        for (i, ((column, &width), cell)) in self.columns.iter().zip(widths).zip(cells).enumerate()
        {
            if i > 0 {
                line.push_str(&" ".repeat(COLUMN_GAP));
            }
            let padding = " ".repeat(width.saturating_sub(text_width(cell)));
            match column.alignment {
                Alignment::Left => {
                    line.push_str(cell);
                    line.push_str(&padding);
                }
                Alignment::Right => {
                    line.push_str(&padding);
                    line.push_str(cell);
                }
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// Monospace width; non-ASCII characters count double.
fn text_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBER_BALANCE: &[Column<'static>] =
        &[Column::left("Member"), Column::right("Balance")];

    #[test]
    fn aligns_columns() {
        let table = TextTableBuilder::new(MEMBER_BALANCE)
            .row([Cow::Borrowed("Alice"), Cow::Borrowed("+6.00")])
            .row([Cow::Borrowed("Bartholomew"), Cow::Borrowed("-12.50")])
            .build();

        assert_eq!(
            table,
            "Member       Balance\n\
             --------------------\n\
             Alice          +6.00\n\
             Bartholomew   -12.50\n"
        );
    }

    #[test]
    fn short_rows_pad_and_long_rows_truncate() {
        let table = TextTableBuilder::new(MEMBER_BALANCE)
            .row(vec![Cow::Borrowed("Bob")])
            .row(vec![
                Cow::Borrowed("Carol"),
                Cow::Borrowed("1.00"),
                Cow::Borrowed("dropped"),
            ])
            .build();

        assert_eq!(
            table,
            "Member  Balance\n\
             ---------------\n\
             Bob\n\
             Carol      1.00\n"
        );
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(text_width("abc"), 3);
        assert_eq!(text_width("日本"), 4);
    }

    #[test]
    fn no_columns_renders_nothing() {
        let table = TextTableBuilder::<[Cow<'_, str>; 1]>::new(&[])
            .row([Cow::Borrowed("ignored")])
            .build();
        assert!(table.is_empty());
    }
}
