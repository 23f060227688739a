//! Human-readable views of a finished schedule.
//!
//! Everything here only reads a [`Schedule`]; a failed export leaves the
//! schedule untouched.

use rust_xlsxwriter::{Color, ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook as XlsxWorkbook};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::config::RunConfig;
use crate::data::{Catalog, DayIndex};
use crate::error::ExportError;
use crate::schedule::{Assignment, Schedule};

pub const FREE: &str = "Free";

/// Plain-text timetable, one block per weekday.
pub fn render_console(schedule: &Schedule<'_>) -> String {
    let config = schedule.config();
    let mut out = String::from("--- Generated timetable ---\n");

    for (day, label) in config.weekdays.iter().enumerate() {
        let _ = writeln!(out, "\n--- {} ---", label.to_uppercase());
        for slot in 0..config.slots_per_day {
            let slot_label = RunConfig::slot_label(slot);
            let mut occupants = schedule.assignments_at(day, slot).peekable();
            if occupants.peek().is_none() {
                let _ = writeln!(out, "  {slot_label}: {FREE}");
            }
            for a in occupants {
                let _ = writeln!(
                    out,
                    "  {slot_label}: Room '{}' | Teacher '{}' | Class '{}' ({})",
                    a.room.name, a.teacher.name, a.subject.name, a.session.group
                );
            }
        }
    }

    let unplaced = schedule.unplaced_sessions();
    if !unplaced.is_empty() {
        out.push_str("\nSessions that could not be scheduled:\n");
        for session in unplaced {
            let _ = writeln!(out, "- {} [{}]", session, session.id);
        }
    }
    out
}

/// What a sheet lists; decides its label columns and merged cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetKind {
    #[default]
    Room,
    Teachers,
}

impl SheetKind {
    /// Leading columns that label a row rather than hold a weekday.
    pub fn label_columns(self) -> usize {
        match self {
            SheetKind::Room => 1,
            SheetKind::Teachers => 2,
        }
    }
}

/// A rectangular table with a header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub title: String,
    #[serde(default)]
    pub kind: SheetKind,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Tab-separated header and rows. Cells holding tabs, quotes or line
    /// breaks are quoted.
    pub fn write_tsv<W: io::Write>(&self, out: W) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new().delimiter(b'\t').from_writer(out);
        self.write_records(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_records<W: io::Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), ExportError> {
        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        Ok(())
    }

    /// Inclusive row ranges where consecutive rows share their first cell.
    /// Single rows are left out.
    fn first_column_runs(&self) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut first = 0;
        for chunk in self.rows.chunk_by(|a, b| a.first() == b.first()) {
            if chunk.len() > 1 {
                runs.push((first, first + chunk.len() - 1));
            }
            first += chunk.len();
        }
        runs
    }
}

/// Tabular export: one sheet per room, then one consolidated teacher sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn from_schedule(catalog: &Catalog, schedule: &Schedule<'_>) -> Self {
        let config = schedule.config();
        let mut sheets: Vec<Sheet> = catalog
            .rooms
            .iter()
            .map(|room| Sheet {
                title: format!("Room {}", room.name),
                kind: SheetKind::Room,
                header: header("Slot", None, config),
                rows: (0..config.slots_per_day)
                    .map(|slot| {
                        let mut row = vec![RunConfig::slot_label(slot)];
                        row.extend(day_cells(config, |day| {
                            schedule
                                .room_assignment_at(day, slot, &room.name)
                                .map(|a| cell(a, "Teacher", &a.teacher.name))
                        }));
                        row
                    })
                    .collect(),
            })
            .collect();

        let mut rows = Vec::new();
        for teacher in &catalog.teachers {
            for slot in 0..config.slots_per_day {
                let mut row = vec![teacher.name.clone(), RunConfig::slot_label(slot)];
                row.extend(day_cells(config, |day| {
                    schedule
                        .teacher_assignment_at(day, slot, &teacher.name)
                        .map(|a| cell(a, "Room", &a.room.name))
                }));
                rows.push(row);
            }
        }
        sheets.push(Sheet {
            title: "Teachers".to_string(),
            kind: SheetKind::Teachers,
            header: header("Teacher", Some("Slot"), config),
            rows,
        });

        Self { sheets }
    }

    pub fn sheet(&self, title: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.title == title)
    }

    /// Writes the workbook in the format named by the file extension
    /// (`xlsx`, `json` or `tsv`).
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx") => self.write_xlsx(path),
            Some("json") => self.write_json(path),
            Some("tsv") => self.write_tsv(File::create(path)?),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Every sheet in one stream, each introduced by a record holding only
    /// its title.
    pub fn write_tsv<W: io::Write>(&self, out: W) -> Result<(), ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .from_writer(out);
        for sheet in &self.sheets {
            writer.write_record([&sheet.title])?;
            sheet.write_records(&mut writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Spreadsheet export: one worksheet per sheet, teacher names merged
    /// across their block of slot rows.
    pub fn write_xlsx(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let header_format = label_format().set_background_color(Color::RGB(0xD9D9D9));
        let name_format = label_format().set_background_color(Color::RGB(0xFFE4B5));
        let label = label_format();
        let busy = cell_format().set_background_color(Color::RGB(0xE0FFFF));
        let free = cell_format().set_background_color(Color::RGB(0xF0FFF0));

        let mut book = XlsxWorkbook::new();
        for sheet in &self.sheets {
            let too_large = || ExportError::TooLarge(sheet.title.clone());
            let labels = sheet.kind.label_columns();

            let ws = book.add_worksheet();
            ws.set_name(xlsx_sheet_name(&sheet.title))?;

            for (col, title) in sheet.header.iter().enumerate() {
                let col = ColNum::try_from(col).map_err(|_| too_large())?;
                ws.write_string_with_format(0, col, title, &header_format)?;
                let width = if usize::from(col) < labels { 14 } else { 25 };
                ws.set_column_width(col, width)?;
            }

            for (i, row) in sheet.rows.iter().enumerate() {
                let r = RowNum::try_from(i + 1).map_err(|_| too_large())?;
                ws.set_row_height(r, 50)?;
                for (c, value) in row.iter().enumerate() {
                    let format = match c {
                        c if c < labels => &label,
                        _ if value == FREE => &free,
                        _ => &busy,
                    };
                    let c = ColNum::try_from(c).map_err(|_| too_large())?;
                    ws.write_string_with_format(r, c, value, format)?;
                }
            }

            if sheet.kind == SheetKind::Teachers {
                for (first, last) in sheet.first_column_runs() {
                    let name = sheet.rows[first].first().map_or("", String::as_str);
                    let first = RowNum::try_from(first + 1).map_err(|_| too_large())?;
                    let last = RowNum::try_from(last + 1).map_err(|_| too_large())?;
                    ws.merge_range(first, 0, last, 0, name, &name_format)?;
                }
            }
        }
        book.save(path.as_ref())?;
        Ok(())
    }
}

fn label_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_size(12)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
}

fn cell_format() -> Format {
    Format::new()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
}

/// Worksheet names are at most 31 characters and may not contain `[]:*?/\`.
fn xlsx_sheet_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .take(31)
        .collect();
    name.trim_matches('\'').to_string()
}

fn header(first: &str, second: Option<&str>, config: &RunConfig) -> Vec<String> {
    std::iter::once(first)
        .chain(second)
        .chain(config.weekdays.iter().map(String::as_str))
        .map(str::to_string)
        .collect()
}

fn day_cells(config: &RunConfig, occupant: impl Fn(DayIndex) -> Option<String>) -> Vec<String> {
    (0..config.weekdays.len())
        .map(|day| occupant(day).unwrap_or_else(|| FREE.to_string()))
        .collect()
}

fn cell(a: &Assignment<'_>, counterpart: &str, name: &str) -> String {
    format!("{}\nGroup: {}\n{}: {}", a.subject.name, a.session.group, counterpart, name)
}
