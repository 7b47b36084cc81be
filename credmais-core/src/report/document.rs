use crate::text::truncate_chars;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 40.0;

const TITLE_SIZE: f32 = 14.0;
const HEADER_SIZE: f32 = 10.0;
const BODY_SIZE: f32 = 9.0;
const TOTAL_SIZE: f32 = 11.0;
const ROW_HEIGHT: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    /// `x` is the right edge of the text
    Right,
}

/// Drawing capability the report documents render onto.
///
/// Coordinates are PDF points with the origin at the bottom-left of the page.
pub trait DocumentCanvas {
    fn begin_page(&mut self);

    fn draw_text(&mut self, x: f32, y: f32, size: f32, align: TextAlign, text: &str);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    fn end_page(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub title: &'static str,
    pub x: f32,
    pub max_chars: usize,
}

/// Tabular document: a title, a header row repeated on every page, body rows truncated
/// to their column widths and a single right-aligned total at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    title: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    total: Option<String>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            total: None,
        }
    }

    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn set_total(&mut self, text: impl Into<String>) {
        self.total = Some(text.into());
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Draws the document and returns the number of pages used.
    pub fn render(&self, canvas: &mut dyn DocumentCanvas) -> usize {
        let top = PAGE_HEIGHT - MARGIN;
        let mut pages = 1;
        canvas.begin_page();
        canvas.draw_text(MARGIN, top, TITLE_SIZE, TextAlign::Left, &self.title);
        let mut y = self.draw_header(canvas, top - 2.0 * ROW_HEIGHT);

        for row in &self.rows {
            if y < MARGIN {
                canvas.end_page();
                canvas.begin_page();
                pages += 1;
                y = self.draw_header(canvas, top);
            }
            for (column, cell) in self.columns.iter().zip(row) {
                let text = truncate_chars(cell, column.max_chars);
                canvas.draw_text(column.x, y, BODY_SIZE, TextAlign::Left, &text);
            }
            y -= ROW_HEIGHT;
        }

        if let Some(total) = &self.total {
            if y - ROW_HEIGHT < MARGIN {
                canvas.end_page();
                canvas.begin_page();
                pages += 1;
                y = top;
            }
            canvas.draw_line(MARGIN, y + ROW_HEIGHT / 2.0, PAGE_WIDTH - MARGIN, y + ROW_HEIGHT / 2.0);
            canvas.draw_text(PAGE_WIDTH - MARGIN, y - 4.0, TOTAL_SIZE, TextAlign::Right, total);
        }
        canvas.end_page();
        pages
    }

    /// Draws the column titles with a rule underneath; returns the y of the first body row.
    fn draw_header(&self, canvas: &mut dyn DocumentCanvas, y: f32) -> f32 {
        for column in &self.columns {
            canvas.draw_text(column.x, y, HEADER_SIZE, TextAlign::Left, column.title);
        }
        canvas.draw_line(MARGIN, y - 4.0, PAGE_WIDTH - MARGIN, y - 4.0);
        y - ROW_HEIGHT - 4.0
    }
}

/// Canvas that records every call; used to inspect layouts and by hosts that post-process them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingCanvas {
    pub ops: Vec<CanvasOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    BeginPage,
    Text { x: f32, y: f32, size: f32, align: TextAlign, text: String },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    EndPage,
}

impl RecordingCanvas {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            CanvasOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn page_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == CanvasOp::BeginPage).count()
    }
}

impl DocumentCanvas for RecordingCanvas {
    fn begin_page(&mut self) {
        self.ops.push(CanvasOp::BeginPage);
    }

    fn draw_text(&mut self, x: f32, y: f32, size: f32, align: TextAlign, text: &str) {
        self.ops.push(CanvasOp::Text {
            x,
            y,
            size,
            align,
            text: text.to_string(),
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(CanvasOp::Line { x1, y1, x2, y2 });
    }

    fn end_page(&mut self) {
        self.ops.push(CanvasOp::EndPage);
    }
}
