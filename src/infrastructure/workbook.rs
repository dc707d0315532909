//! Workbook export
//!
//! Renders the catalog, the history and the staging draft into a four-sheet
//! xlsx file:
//! - Log: quick-entry row, command captions and the history grid
//! - Routines: exercises per routine plus the rep-range lookup table
//! - Progress: live formulas for the dashboard, cached with current values
//! - Instructions: usage notes
//!
//! Formula cells carry their computed value so that viewers which do not
//! recalculate still show the dashboard.

use crate::domain::compliance::{classify_entry, classify_staging, Compliance};
use crate::domain::metrics::{DashboardMetrics, LATEST_ENTRIES};
use crate::domain::{ExerciseCatalog, LogEntry, SessionLogStore, StagingEntry};
use crate::error::Result;
use crate::infrastructure::layout::*;
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{
    Color, ConditionalFormatFormula, DataValidation, ExcelDateTime, Format, FormatAlign,
    FormatBorder, Formula, Workbook, Worksheet,
};
use std::path::Path;

const BLUE_DARK: u32 = 0x1F3864;
const BLUE_MID: u32 = 0x2E75B6;
const BLUE_LIGHT: u32 = 0xDDEBF7;
const GREEN: u32 = 0x27AE60;
const GREEN_LIGHT: u32 = 0xD5F5E3;
const ORANGE: u32 = 0xE67E22;
const ORANGE_LIGHT: u32 = 0xFDEBD0;
const RED: u32 = 0xC0392B;
const PURPLE: u32 = 0x8E44AD;
const GREY: u32 = 0x95A5A6;
const INPUT_YELLOW: u32 = 0xFFF9C4;
const ROW_ALT: u32 = 0xF2F2F2;

const DATE_FORMAT: &str = "dd/mm/yyyy";
const DECIMAL_FORMAT: &str = "0.0";

/// Days between 0001-01-01 and the spreadsheet epoch (1899-12-30)
const EXCEL_EPOCH_CE_DAYS: i32 = 693_594;

/// Everything the export reads. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct WorkbookSource<'a> {
    pub catalog: &'a ExerciseCatalog,
    pub store: &'a SessionLogStore,
    pub staging: &'a StagingEntry,
    pub metrics: &'a DashboardMetrics,
}

/// Cell styles for the whole workbook
struct Formats {
    title: Format,
    subtitle: Format,
    section: Format,
    header: Format,
    label: Format,
    input: Format,
    input_date: Format,
    input_number: Format,
    text: [Format; 2],
    date: [Format; 2],
    number: [Format; 2],
    decimal: [Format; 2],
    percent: Format,
    commands: [Format; 4],
    above: Format,
    below: Format,
}

impl Formats {
    fn new() -> Self {
        let bordered = Format::new().set_border(FormatBorder::Thin);
        let banner = |color: u32| {
            Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(color))
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
        };
        let striped = |format: Format| {
            [
                format.clone().set_background_color(Color::White),
                format.set_background_color(Color::RGB(ROW_ALT)),
            ]
        };
        let input = bordered
            .clone()
            .set_background_color(Color::RGB(INPUT_YELLOW));

        Formats {
            title: banner(BLUE_DARK).set_font_size(16),
            subtitle: Format::new()
                .set_italic()
                .set_font_size(9)
                .set_background_color(Color::RGB(BLUE_LIGHT))
                .set_align(FormatAlign::Center),
            section: banner(BLUE_MID).set_font_size(12),
            header: banner(BLUE_MID).set_border(FormatBorder::Thin),
            label: bordered
                .clone()
                .set_bold()
                .set_background_color(Color::RGB(ORANGE_LIGHT)),
            input_date: input.clone().set_num_format(DATE_FORMAT),
            input_number: input.clone().set_align(FormatAlign::Center),
            input,
            text: striped(bordered.clone()),
            date: striped(
                bordered
                    .clone()
                    .set_num_format(DATE_FORMAT)
                    .set_align(FormatAlign::Center),
            ),
            number: striped(bordered.clone().set_align(FormatAlign::Center)),
            decimal: striped(
                bordered
                    .clone()
                    .set_num_format(DECIMAL_FORMAT)
                    .set_align(FormatAlign::Center),
            ),
            percent: bordered.set_num_format("0.0%").set_align(FormatAlign::Center),
            commands: [
                banner(GREEN),
                banner(ORANGE),
                banner(RED),
                banner(PURPLE),
            ],
            above: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(GREEN))
                .set_background_color(Color::RGB(GREEN_LIGHT)),
            below: Format::new()
                .set_bold()
                .set_font_color(Color::RGB(ORANGE))
                .set_background_color(Color::RGB(ORANGE_LIGHT)),
        }
    }
}

/// Build the workbook in memory
pub fn build_workbook(source: &WorkbookSource<'_>) -> Result<Workbook> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    workbook.push_worksheet(log_sheet(source, &formats)?);

    let lookup_rows = lookup_row_count(source.catalog);
    workbook.push_worksheet(routines_sheet(source.catalog, &formats)?);
    define_lookup_names(&mut workbook, source.catalog.routines().len(), lookup_rows)?;

    workbook.push_worksheet(progress_sheet(source.metrics, source.catalog, &formats)?);
    workbook.push_worksheet(instructions_sheet(&formats)?);

    Ok(workbook)
}

/// Build the workbook and write it to `path`
pub fn save_workbook(source: &WorkbookSource<'_>, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(source)?;
    workbook.save(path)?;
    log::info!(
        "Exported workbook with {} entries to {}",
        source.store.len(),
        path.display()
    );
    Ok(())
}

/// Formula classifying the entry on `row` (1-based) against the lookup table
pub fn status_formula(row: u32) -> String {
    let exercise = format!("${}{}", column_letter(COL_EXERCISE), row);
    let reps = format!("${}{}", column_letter(COL_REPS), row);
    let position = format!("MATCH({},{},0)", exercise, NAME_REP_EXERCISES);

    format!(
        "=IF(OR({ex}=\"\",{reps}=\"\"),\"-\",IFERROR(IF({reps}>INDEX({max},{pos}),\"ABOVE\",IF({reps}<INDEX({min},{pos}),\"BELOW\",\"IN RANGE\")),\"-\"))",
        ex = exercise,
        reps = reps,
        pos = position,
        min = NAME_REP_MIN,
        max = NAME_REP_MAX,
    )
}

/// Formula pulling column `col` of the history entry `offset` rows from the end
pub fn latest_formula(col: u16, offset: usize) -> String {
    let count = format!("COUNTA({})", history_range(COL_DATE));
    let value = format!("INDEX({},{}-{})", history_range(col), count, offset);
    format!(
        "=IF({count}>{offset},IF({value}=\"\",\"\",{value}),\"\")",
        count = count,
        offset = offset,
        value = value,
    )
}

fn excel_date(date: NaiveDate) -> Result<ExcelDateTime> {
    Ok(ExcelDateTime::from_ymd(
        date.year() as u16,
        date.month() as u8,
        date.day() as u8,
    )?)
}

/// Serial day number used as the cached value of date formulas
fn date_serial(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EXCEL_EPOCH_CE_DAYS
}

fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
    format: &Format,
) -> Result<()> {
    match value {
        Some(text) => sheet.write_string_with_format(row, col, text, format)?,
        None => sheet.write_blank(row, col, format)?,
    };
    Ok(())
}

fn write_number(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    format: &Format,
) -> Result<()> {
    match value {
        Some(number) => sheet.write_number_with_format(row, col, number, format)?,
        None => sheet.write_blank(row, col, format)?,
    };
    Ok(())
}

fn write_formula(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    formula: String,
    cached: String,
    format: &Format,
) -> Result<()> {
    sheet.write_formula_with_format(row, col, Formula::new(formula).set_result(cached), format)?;
    Ok(())
}

fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn log_sheet(source: &WorkbookSource<'_>, formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(LOG_SHEET)?.set_tab_color(Color::RGB(BLUE_MID));

    let widths = [14.0, 30.0, 30.0, 8.0, 8.0, 12.0, 10.0, 30.0, 12.0];
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    let last_col = STATUS_COLUMN;
    sheet.merge_range(0, 0, 0, last_col, "HOME WORKOUT LOG", &formats.title)?;
    sheet.set_row_height(0, 28)?;
    sheet.merge_range(
        1,
        0,
        1,
        last_col,
        "Fill in the quick-entry row, then record it with the RecordEntry macro or `gymlog add`.",
        &formats.subtitle,
    )?;

    // Quick entry
    sheet.merge_range(
        STAGING_LABEL_ROW - 2,
        0,
        STAGING_LABEL_ROW - 2,
        last_col,
        "QUICK ENTRY",
        &formats.section,
    )?;
    for (col, label) in ENTRY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(
            STAGING_LABEL_ROW - 1,
            col as u16,
            format!("{}:", label),
            &formats.label,
        )?;
    }
    write_staging_row(&mut sheet, source, formats)?;

    let routine_list = DataValidation::new()
        .allow_list_formula(Formula::new(format!("={}", NAME_ROUTINE_LABELS)));
    sheet.add_data_validation(
        STAGING_ROW - 1,
        COL_ROUTINE,
        STAGING_ROW - 1,
        COL_ROUTINE,
        &routine_list,
    )?;

    // Command captions, one per macro
    let captions = [
        (COL_ROUTINE, "RECORD ENTRY (RecordEntry)"),
        (COL_SET, "CLEAR (ClearFields)"),
        (COL_WEIGHT, "UNDO LAST (UndoLast)"),
        (COL_NOTES, "EXERCISES (ShowRoutineExercises)"),
    ];
    for ((col, caption), format) in captions.iter().zip(formats.commands.iter()) {
        sheet.merge_range(COMMAND_ROW - 1, *col, COMMAND_ROW - 1, *col + 1, caption, format)?;
    }

    // History
    sheet.merge_range(
        HISTORY_TITLE_ROW - 1,
        0,
        HISTORY_TITLE_ROW - 1,
        last_col,
        "HISTORY",
        &formats.title,
    )?;
    for (col, header) in ENTRY_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(HISTORY_HEADER_ROW - 1, col as u16, *header, &formats.header)?;
    }

    let entries = source.store.entries();
    for row in FIRST_ENTRY_ROW..=LAST_ENTRY_ROW {
        let index = (row - FIRST_ENTRY_ROW) as usize;
        let stripe = (row % 2) as usize;
        let status = match entries.get(index) {
            Some(entry) => {
                write_entry_row(&mut sheet, row - 1, entry, formats, stripe)?;
                classify_entry(entry, source.catalog)
            }
            None => {
                for col in 0..ENTRY_COLUMNS {
                    let format = if col == COL_DATE {
                        &formats.date[stripe]
                    } else {
                        &formats.text[stripe]
                    };
                    sheet.write_blank(row - 1, col, format)?;
                }
                Compliance::Unknown
            }
        };
        write_formula(
            &mut sheet,
            row - 1,
            STATUS_COLUMN,
            status_formula(row),
            status.to_string(),
            &formats.number[stripe],
        )?;
    }

    add_compliance_highlight(&mut sheet, STAGING_ROW, STAGING_ROW, formats)?;
    add_compliance_highlight(&mut sheet, FIRST_ENTRY_ROW, LAST_ENTRY_ROW, formats)?;

    sheet.set_freeze_panes(FIRST_ENTRY_ROW - 1, 0)?;
    sheet.autofilter(
        HISTORY_HEADER_ROW - 1,
        0,
        LAST_ENTRY_ROW - 1,
        STATUS_COLUMN,
    )?;

    Ok(sheet)
}

fn write_staging_row(
    sheet: &mut Worksheet,
    source: &WorkbookSource<'_>,
    formats: &Formats,
) -> Result<()> {
    let staging = source.staging;
    let row = STAGING_ROW - 1;

    sheet.write_datetime_with_format(row, COL_DATE, &excel_date(staging.date)?, &formats.input_date)?;
    write_text(sheet, row, COL_ROUTINE, staging.routine.as_deref(), &formats.input)?;
    write_text(sheet, row, COL_EXERCISE, staging.exercise.as_deref(), &formats.input)?;
    write_number(sheet, row, COL_SET, staging.set_number.map(f64::from), &formats.input_number)?;
    write_number(sheet, row, COL_REPS, staging.reps.map(f64::from), &formats.input_number)?;
    write_number(sheet, row, COL_WEIGHT, staging.weight_kg, &formats.input_number)?;
    write_number(sheet, row, COL_REST, staging.rest_seconds.map(f64::from), &formats.input_number)?;
    write_text(sheet, row, COL_NOTES, staging.notes.as_deref(), &formats.input)?;

    write_formula(
        sheet,
        row,
        STATUS_COLUMN,
        status_formula(STAGING_ROW),
        classify_staging(staging, source.catalog).to_string(),
        &formats.input_number,
    )
}

fn write_entry_row(
    sheet: &mut Worksheet,
    row: u32,
    entry: &LogEntry,
    formats: &Formats,
    stripe: usize,
) -> Result<()> {
    let text = &formats.text[stripe];
    let number = &formats.number[stripe];

    sheet.write_datetime_with_format(row, COL_DATE, &excel_date(entry.date)?, &formats.date[stripe])?;
    write_text(sheet, row, COL_ROUTINE, entry.routine.as_deref(), text)?;
    write_text(sheet, row, COL_EXERCISE, Some(&entry.exercise), text)?;
    write_number(sheet, row, COL_SET, Some(f64::from(entry.set_number)), number)?;
    write_number(sheet, row, COL_REPS, entry.reps.map(f64::from), number)?;
    write_number(sheet, row, COL_WEIGHT, entry.weight_kg, number)?;
    write_number(sheet, row, COL_REST, entry.rest_seconds.map(f64::from), number)?;
    write_text(sheet, row, COL_NOTES, entry.notes.as_deref(), text)
}

/// Colour the reps cells of rows `first..=last` by their status
fn add_compliance_highlight(
    sheet: &mut Worksheet,
    first: u32,
    last: u32,
    formats: &Formats,
) -> Result<()> {
    let status = column_letter(STATUS_COLUMN);
    let rules = [
        (Compliance::Above, &formats.above),
        (Compliance::Below, &formats.below),
    ];

    for (compliance, format) in rules {
        let rule = ConditionalFormatFormula::new()
            .set_rule(format!("=${}{}=\"{}\"", status, first, compliance).as_str())
            .set_format(format.clone());
        sheet.add_conditional_format(first - 1, COL_REPS, last - 1, COL_REPS, &rule)?;
    }
    Ok(())
}

/// Rows in the rep-range lookup table; never zero so the names stay valid
fn lookup_row_count(catalog: &ExerciseCatalog) -> u32 {
    catalog.effective_rep_ranges().len().max(1) as u32
}

fn define_lookup_names(workbook: &mut Workbook, labels: usize, lookup_rows: u32) -> Result<()> {
    let last_label = LOOKUP_FIRST_ROW + labels.max(1) as u32 - 1;
    let last_lookup = LOOKUP_FIRST_ROW + lookup_rows - 1;

    let names = [
        (NAME_ROUTINE_LABELS, LOOKUP_LABEL_COL, last_label),
        (NAME_REP_EXERCISES, LOOKUP_EXERCISE_COL, last_lookup),
        (NAME_REP_MIN, LOOKUP_EXERCISE_COL + 1, last_lookup),
        (NAME_REP_MAX, LOOKUP_EXERCISE_COL + 2, last_lookup),
    ];
    for (name, col, last) in names {
        let letter = column_letter(col);
        workbook.define_name(
            name,
            &format!(
                "={}!${}${}:${}${}",
                ROUTINES_SHEET, letter, LOOKUP_FIRST_ROW, letter, last
            ),
        )?;
    }
    Ok(())
}

const LOOKUP_EXERCISE_COL: u16 = 4;
const LOOKUP_LABEL_COL: u16 = 8;

fn routines_sheet(catalog: &ExerciseCatalog, formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(ROUTINES_SHEET)?.set_tab_color(Color::RGB(GREEN));

    let widths = [6.0, 35.0, 14.0, 3.0, 35.0, 8.0, 8.0, 3.0, 35.0];
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    sheet.merge_range(0, 0, 0, LOOKUP_LABEL_COL, "WEEKLY ROUTINES", &formats.title)?;
    sheet.merge_range(
        1,
        0,
        1,
        LOOKUP_LABEL_COL,
        "Target reps come from the rep-range table, which also drives the Status column of the Log.",
        &formats.subtitle,
    )?;

    // One block per routine in columns A:C
    let mut row = 3;
    for routine in catalog.routines() {
        sheet.merge_range(row, 0, row, 2, &routine.label, &formats.section)?;
        row += 1;
        for (col, header) in ["#", "Exercise", "Target reps"].iter().enumerate() {
            sheet.write_string_with_format(row, col as u16, *header, &formats.header)?;
        }
        row += 1;
        for (idx, exercise) in routine.exercises.iter().enumerate() {
            let stripe = idx % 2;
            let target = catalog.rep_range(exercise).map(|range| range.to_string());
            sheet.write_number_with_format(row, 0, (idx + 1) as f64, &formats.number[stripe])?;
            sheet.write_string_with_format(row, 1, exercise, &formats.text[stripe])?;
            write_text(&mut sheet, row, 2, target.as_deref(), &formats.number[stripe])?;
            row += 1;
        }
        row += 1;
    }

    // Rep-range lookup table in E:G
    let header_row = LOOKUP_FIRST_ROW - 2;
    for (offset, header) in ["Exercise", "Min", "Max"].iter().enumerate() {
        sheet.write_string_with_format(
            header_row,
            LOOKUP_EXERCISE_COL + offset as u16,
            *header,
            &formats.header,
        )?;
    }
    for (idx, (exercise, range)) in catalog.effective_rep_ranges().iter().enumerate() {
        let row = LOOKUP_FIRST_ROW - 1 + idx as u32;
        let stripe = idx % 2;
        sheet.write_string_with_format(row, LOOKUP_EXERCISE_COL, exercise, &formats.text[stripe])?;
        sheet.write_number_with_format(
            row,
            LOOKUP_EXERCISE_COL + 1,
            f64::from(range.min),
            &formats.number[stripe],
        )?;
        sheet.write_number_with_format(
            row,
            LOOKUP_EXERCISE_COL + 2,
            f64::from(range.max),
            &formats.number[stripe],
        )?;
    }

    // Routine labels for the quick-entry drop-down
    sheet.write_string_with_format(header_row, LOOKUP_LABEL_COL, "Routine labels", &formats.header)?;
    for (idx, label) in catalog.labels().enumerate() {
        sheet.write_string_with_format(
            LOOKUP_FIRST_ROW - 1 + idx as u32,
            LOOKUP_LABEL_COL,
            label,
            &formats.text[idx % 2],
        )?;
    }

    Ok(sheet)
}

fn progress_sheet(
    metrics: &DashboardMetrics,
    catalog: &ExerciseCatalog,
    formats: &Formats,
) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet.set_name(PROGRESS_SHEET)?.set_tab_color(Color::RGB(ORANGE));

    let widths = [32.0, 30.0, 30.0, 10.0, 10.0, 12.0, 12.0];
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    sheet.merge_range(0, 0, 0, 6, "PROGRESS", &formats.title)?;

    let dates = history_range(COL_DATE);
    let exercises = history_range(COL_EXERCISE);
    let reps = history_range(COL_REPS);
    let weights = history_range(COL_WEIGHT);
    let statuses = history_range(STATUS_COLUMN);
    let routines = history_range(COL_ROUTINE);

    // Summary
    let summary = &metrics.summary;
    let mut row: u32 = 2;
    sheet.merge_range(row, 0, row, 6, "SUMMARY", &formats.section)?;
    row += 1;

    let stats = [
        (
            "Total sessions recorded",
            format!("=COUNTA({})", dates),
            summary.total_sessions.to_string(),
            &formats.number[0],
        ),
        (
            "Last workout",
            format!("=IF(COUNTA({d})=0,\"\",MAX({d}))", d = dates),
            summary
                .last_trained
                .map(|date| date_serial(date).to_string())
                .unwrap_or_default(),
            &formats.date[0],
        ),
        (
            "Heaviest weight (kg)",
            format!("=IF(COUNT({w})=0,\"\",MAX({w}))", w = weights),
            optional_number(summary.max_weight_kg),
            &formats.decimal[0],
        ),
        (
            "Average reps",
            format!("=IFERROR(AVERAGE({}),\"\")", reps),
            optional_number(summary.avg_reps),
            &formats.decimal[0],
        ),
    ];
    for (label, formula, cached, format) in stats {
        sheet.write_string_with_format(row, 0, label, &formats.label)?;
        write_formula(&mut sheet, row, 1, formula, cached, format)?;
        row += 1;
    }

    sheet.write_string_with_format(row, 0, "Most frequent exercise", &formats.label)?;
    let counts = format!(
        "IF({e}<>\"\",COUNTIF({e},{e}))",
        e = exercises
    );
    let most_frequent = Formula::new(format!(
        "=IFERROR(INDEX({e},MATCH(MAX({c}),{c},0)),\"\")",
        e = exercises,
        c = counts
    ))
    .set_result(summary.most_frequent_exercise.clone().unwrap_or_default());
    sheet.write_array_formula_with_format(row, 1, row, 1, most_frequent, &formats.text[0])?;
    row += 2;

    // Per routine
    sheet.merge_range(row, 0, row, 6, "BY ROUTINE", &formats.section)?;
    row += 1;
    for (col, header) in ["Routine", "Sets", "Total reps", "Avg reps", "Avg weight (kg)"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(row, col as u16, *header, &formats.header)?;
    }
    row += 1;
    for (idx, breakdown) in metrics.routines.iter().enumerate() {
        let stripe = idx % 2;
        let label_cell = format!("$A{}", row + 1);
        sheet.write_string_with_format(row, 0, &breakdown.label, &formats.text[stripe])?;
        write_formula(
            &mut sheet,
            row,
            1,
            format!("=COUNTIF({},{})", routines, label_cell),
            breakdown.sets_count.to_string(),
            &formats.number[stripe],
        )?;
        write_formula(
            &mut sheet,
            row,
            2,
            format!("=SUMIF({},{},{})", routines, label_cell, reps),
            breakdown.total_reps.to_string(),
            &formats.number[stripe],
        )?;
        write_formula(
            &mut sheet,
            row,
            3,
            format!("=IFERROR(AVERAGEIF({},{},{}),\"\")", routines, label_cell, reps),
            optional_number(breakdown.avg_reps),
            &formats.decimal[stripe],
        )?;
        write_formula(
            &mut sheet,
            row,
            4,
            format!("=IFERROR(AVERAGEIF({},{},{}),\"\")", routines, label_cell, weights),
            optional_number(breakdown.avg_weight_kg),
            &formats.decimal[stripe],
        )?;
        row += 1;
    }
    row += 1;

    // Recent activity
    let insights = &metrics.insights;
    sheet.merge_range(row, 0, row, 6, "RECENT ACTIVITY", &formats.section)?;
    row += 1;
    let week_start = "(TODAY()-WEEKDAY(TODAY(),2)+1)";
    let week_end = "(TODAY()-WEEKDAY(TODAY(),2)+7)";
    let activity = [
        (
            "Days since last workout",
            format!("=IF(COUNTA({d})=0,\"\",TODAY()-MAX({d}))", d = dates),
            insights
                .days_since_last_session
                .map(|days| days.to_string())
                .unwrap_or_default(),
        ),
        (
            "Sets this week",
            format!(
                "=COUNTIFS({d},\">=\"&{s},{d},\"<=\"&{e})",
                d = dates,
                s = week_start,
                e = week_end
            ),
            insights.sessions_this_week.to_string(),
        ),
        (
            "Sets this month",
            format!(
                "=COUNTIFS({d},\">=\"&DATE(YEAR(TODAY()),MONTH(TODAY()),1),{d},\"<=\"&EOMONTH(TODAY(),0))",
                d = dates
            ),
            insights.sessions_this_month.to_string(),
        ),
    ];
    for (label, formula, cached) in activity {
        sheet.write_string_with_format(row, 0, label, &formats.label)?;
        write_formula(&mut sheet, row, 1, formula, cached, &formats.number[0])?;
        row += 1;
    }
    row += 1;

    // Compliance
    let compliance = &metrics.compliance;
    sheet.merge_range(row, 0, row, 6, "REP RANGE COMPLIANCE", &formats.section)?;
    row += 1;
    let first_count_row = row + 1;
    let counts = [
        ("Sets above range", Compliance::Above, compliance.above),
        ("Sets below range", Compliance::Below, compliance.below),
        ("Sets in range", Compliance::InRange, compliance.in_range),
    ];
    for (label, status, count) in counts {
        sheet.write_string_with_format(row, 0, label, &formats.label)?;
        write_formula(
            &mut sheet,
            row,
            1,
            format!("=COUNTIF({},\"{}\")", statuses, status),
            count.to_string(),
            &formats.number[0],
        )?;
        row += 1;
    }
    sheet.write_string_with_format(row, 0, "In range", &formats.label)?;
    write_formula(
        &mut sheet,
        row,
        1,
        format!(
            "=1-(B{a}+B{b})/MAX(B{a}+B{b}+B{c},1)",
            a = first_count_row,
            b = first_count_row + 1,
            c = first_count_row + 2
        ),
        compliance.in_range_ratio.to_string(),
        &formats.percent,
    )?;
    row += 2;

    // Latest entries, newest first
    sheet.merge_range(row, 0, row, 6, "LATEST ENTRIES", &formats.section)?;
    row += 1;
    let columns = [
        (COL_DATE, "Date"),
        (COL_ROUTINE, "Routine"),
        (COL_EXERCISE, "Exercise"),
        (COL_SET, "Set"),
        (COL_REPS, "Reps"),
        (COL_WEIGHT, "Weight (kg)"),
        (STATUS_COLUMN, "Status"),
    ];
    for (col, (_, header)) in columns.iter().enumerate() {
        sheet.write_string_with_format(row, col as u16, *header, &formats.header)?;
    }
    row += 1;

    for offset in 0..LATEST_ENTRIES {
        let stripe = offset % 2;
        let entry = metrics.latest.get(offset);
        let status = entry.map(|entry| classify_entry(entry, catalog));
        for (col, (source_col, _)) in columns.iter().enumerate() {
            let cached = entry
                .zip(status)
                .map(|(entry, status)| latest_cached(entry, *source_col, status))
                .unwrap_or_default();
            let format = match *source_col {
                COL_DATE => &formats.date[stripe],
                COL_ROUTINE | COL_EXERCISE => &formats.text[stripe],
                _ => &formats.number[stripe],
            };
            write_formula(
                &mut sheet,
                row,
                col as u16,
                latest_formula(*source_col, offset),
                cached,
                format,
            )?;
        }
        row += 1;
    }

    Ok(sheet)
}

fn latest_cached(entry: &LogEntry, col: u16, status: Compliance) -> String {
    match col {
        COL_DATE => date_serial(entry.date).to_string(),
        COL_ROUTINE => entry.routine.clone().unwrap_or_default(),
        COL_EXERCISE => entry.exercise.clone(),
        COL_SET => entry.set_number.to_string(),
        COL_REPS => entry.reps.map(|r| r.to_string()).unwrap_or_default(),
        COL_WEIGHT => optional_number(entry.weight_kg),
        _ => status.to_string(),
    }
}

fn instructions_sheet(formats: &Formats) -> Result<Worksheet> {
    let mut sheet = Worksheet::new();
    sheet
        .set_name(INSTRUCTIONS_SHEET)?
        .set_tab_color(Color::RGB(GREY));
    sheet.set_column_width(0, 5)?;
    sheet.set_column_width(1, 90)?;

    sheet.merge_range(0, 0, 0, 1, "HOW TO USE THIS WORKBOOK", &formats.title)?;

    let sections: [(&str, &[&str]); 4] = [
        (
            "LOG SHEET",
            &[
                "Fill in the QUICK ENTRY row: date, routine (drop-down), exercise, set, reps, weight, rest and notes.",
                "Run RecordEntry to copy the row into the history. Reps and weight are cleared and the set number goes up by one.",
                "Run ClearFields to blank the quick-entry row; the date resets to today.",
                "Run UndoLast to delete the most recent history row after confirming.",
                "Run ShowRoutineExercises to list the exercises of the selected routine.",
                "The Status column compares reps with the exercise's target range: ABOVE means increase weight, BELOW means consider decreasing it.",
            ],
        ),
        (
            "ROUTINES SHEET",
            &[
                "Five routines, one per training day, with the target reps of each exercise.",
                "The rep-range table next to them drives the Status column. Exercises without an explicit range use 8-15.",
            ],
        ),
        (
            "PROGRESS SHEET",
            &[
                "Totals, averages and per-routine volume computed from the history.",
                "Recent activity counts sets logged this week (Monday to Sunday) and this month.",
                "The last ten entries are listed newest first.",
            ],
        ),
        (
            "MACROS",
            &[
                "Import the exported .bas module in the VBA editor (Alt+F11, File > Import File) and save as .xlsm.",
                "The same commands are available from the terminal: gymlog set, add, clear, undo, routine.",
            ],
        ),
    ];

    let mut row = 2;
    for (title, lines) in sections {
        sheet.merge_range(row, 0, row, 1, title, &formats.section)?;
        row += 1;
        for line in lines {
            sheet.write_string_with_format(row, 0, "•", &formats.text[0])?;
            sheet.write_string_with_format(row, 1, *line, &formats.text[0])?;
            row += 1;
        }
        row += 1;
    }

    Ok(sheet)
}
