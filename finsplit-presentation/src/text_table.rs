use std::borrow::Cow;

#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| display_width(h))
            .collect();

        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate() {
                if i < col_widths.len() {
                    col_widths[i] = col_widths[i].max(display_width(cell));
                }
            }
        }

        let mut table = String::with_capacity(1024);
        push_separator(&mut table, &col_widths);
        self.push_line(&mut table, &col_widths, self.headers);
        push_separator(&mut table, &col_widths);
        for row in &self.rows {
            self.push_line(&mut table, &col_widths, row.as_ref());
        }
        push_separator(&mut table, &col_widths);
        table.pop();
        table
    }

    fn push_line(&self, table: &mut String, col_widths: &[usize], cells: &[Cow<'a, str>]) {
        for (i, width) in col_widths.iter().enumerate() {
            let cell = cells.get(i).map(Cow::as_ref).unwrap_or("");
            let alignment = self.alignments.get(i).copied().unwrap_or_default();
            table.push_str("| ");
            push_padded(table, cell, *width, alignment);
            table.push(' ');
        }
        table.push_str("|\n");
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn push_separator(table: &mut String, col_widths: &[usize]) {
    for width in col_widths {
        table.push('+');
        for _ in 0..width + 2 {
            table.push('-');
        }
    }
    table.push_str("+\n");
}

fn push_padded(table: &mut String, text: &str, width: usize, alignment: Alignment) {
    let gap = width.saturating_sub(display_width(text));
    let (before, after) = match alignment {
        Alignment::Left => (0, gap),
        Alignment::Center => (gap / 2, gap - gap / 2),
        Alignment::Right => (gap, 0),
    };
    for _ in 0..before {
        table.push(' ');
    }
    table.push_str(text);
    for _ in 0..after {
        table.push(' ');
    }
}
