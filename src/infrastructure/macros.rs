//! VBA macro module for the exported workbook
//!
//! The module is rendered from a template whose sheet names, rows and
//! columns are filled in from [`crate::infrastructure::layout`], so it always
//! agrees with the workbook it ships with.

use crate::error::Result;
use crate::infrastructure::layout::*;
use std::fs;
use std::path::Path;

const MODULE_TEMPLATE: &str = r#"Attribute VB_Name = "GymlogMacros"
Option Explicit

' Quick-entry row is {STAGING_ROW}; history rows are {FIRST_ROW} to {LAST_ROW} ({CAPACITY} entries).

' Copy the quick-entry row into the next free history row.
Sub RecordEntry()
    Dim ws As Worksheet
    Set ws = ThisWorkbook.Sheets("{LOG_SHEET}")

    If Trim(ws.Cells({STAGING_ROW}, {COL_EXERCISE}).Value) = "" Then
        MsgBox "Enter at least the exercise name.", vbExclamation, "Missing exercise"
        Exit Sub
    End If

    Dim nextRow As Long
    nextRow = {FIRST_ROW}
    Do While ws.Cells(nextRow, {COL_DATE}).Value <> ""
        nextRow = nextRow + 1
        If nextRow > {LAST_ROW} Then
            MsgBox "Log full: the history holds at most {CAPACITY} entries.", _
                   vbExclamation, "Log full"
            Exit Sub
        End If
    Loop

    Dim setNumber As Long
    setNumber = 1
    If IsNumeric(ws.Cells({STAGING_ROW}, {COL_SET}).Value) Then
        If ws.Cells({STAGING_ROW}, {COL_SET}).Value >= 1 Then
            setNumber = CLng(ws.Cells({STAGING_ROW}, {COL_SET}).Value)
        End If
    End If

    Dim col As Integer
    For col = 1 To {ENTRY_COLUMNS}
        ws.Cells(nextRow, col).Value = ws.Cells({STAGING_ROW}, col).Value
    Next col
    ws.Cells(nextRow, {COL_SET}).Value = setNumber
    ws.Cells(nextRow, {COL_DATE}).NumberFormat = "DD/MM/YYYY"

    ws.Cells({STAGING_ROW}, {COL_SET}).Value = setNumber + 1
    ws.Cells({STAGING_ROW}, {COL_REPS}).Value = ""
    ws.Cells({STAGING_ROW}, {COL_WEIGHT}).Value = ""
    ws.Cells({STAGING_ROW}, {COL_REST}).Value = ""
    ws.Cells({STAGING_ROW}, {COL_NOTES}).Value = ""

    MsgBox "Entry recorded in row " & nextRow & " (next set: " & (setNumber + 1) & ").", _
           vbInformation, "Recorded"
End Sub

' Blank the quick-entry row and reset its date to today.
Sub ClearFields()
    Dim ws As Worksheet
    Set ws = ThisWorkbook.Sheets("{LOG_SHEET}")

    Dim col As Integer
    For col = 1 To {ENTRY_COLUMNS}
        ws.Cells({STAGING_ROW}, col).Value = ""
    Next col
    ws.Cells({STAGING_ROW}, {COL_DATE}).Value = Date
    ws.Cells({STAGING_ROW}, {COL_DATE}).NumberFormat = "DD/MM/YYYY"
End Sub

' Delete the most recent history row after confirmation.
Sub UndoLast()
    Dim ws As Worksheet
    Set ws = ThisWorkbook.Sheets("{LOG_SHEET}")

    Dim lastRow As Long
    lastRow = {FIRST_ROW} - 1
    Do While lastRow < {LAST_ROW} And ws.Cells(lastRow + 1, {COL_DATE}).Value <> ""
        lastRow = lastRow + 1
    Loop

    If lastRow < {FIRST_ROW} Then
        MsgBox "No entries to undo.", vbExclamation, "Empty log"
        Exit Sub
    End If

    Dim answer As VbMsgBoxResult
    answer = MsgBox("Delete the last entry?" & vbCrLf & _
                    "Date: " & ws.Cells(lastRow, {COL_DATE}).Text & vbCrLf & _
                    "Exercise: " & ws.Cells(lastRow, {COL_EXERCISE}).Value, _
                    vbYesNo + vbQuestion, "Confirm undo")
    If answer <> vbYes Then Exit Sub

    Dim col As Integer
    For col = 1 To {ENTRY_COLUMNS}
        ws.Cells(lastRow, col).Value = ""
    Next col
End Sub

' List the exercises of the routine selected in the quick-entry row.
Sub ShowRoutineExercises()
    Dim ws As Worksheet, wsRoutines As Worksheet
    Set ws = ThisWorkbook.Sheets("{LOG_SHEET}")
    Set wsRoutines = ThisWorkbook.Sheets("{ROUTINES_SHEET}")

    Dim selected As String
    selected = Trim(ws.Cells({STAGING_ROW}, {COL_ROUTINE}).Value)
    If selected = "" Then
        MsgBox "Pick a routine in the quick-entry row first.", vbExclamation, "No routine"
        Exit Sub
    End If

    Dim r As Long
    Dim found As Boolean
    found = False
    For r = 1 To {ROUTINE_SCAN_ROWS}
        If InStr(1, wsRoutines.Cells(r, 1).Value, selected, vbTextCompare) > 0 Then
            found = True
            Exit For
        End If
    Next r

    If Not found Then
        MsgBox "Routine not found: " & selected, vbExclamation, "Not found"
        Exit Sub
    End If

    Dim message As String
    message = wsRoutines.Cells(r, 1).Value & ":" & vbCrLf & vbCrLf

    Dim i As Long
    i = 0
    Do While wsRoutines.Cells(r + 2 + i, 2).Value <> "" And i < {MAX_LISTED}
        message = message & (i + 1) & ". " & wsRoutines.Cells(r + 2 + i, 2).Value & vbCrLf
        i = i + 1
    Loop

    MsgBox message, vbInformation, "Routine exercises"
End Sub
"#;

/// Rows of the Routines sheet searched for a routine title
const ROUTINE_SCAN_ROWS: u32 = 200;

/// VBA module source for the workbook's four commands
#[derive(Debug)]
pub struct MacroModule {
    content: String,
}

impl MacroModule {
    /// Module bound to the standard workbook layout
    pub fn standard() -> Self {
        MacroModule {
            content: MODULE_TEMPLATE.to_string(),
        }
    }

    /// Substitute layout constants. Columns are 1-based in VBA.
    pub fn render(&self) -> String {
        let vba_col = |col: u16| (col + 1).to_string();

        let substitutions = [
            ("{LOG_SHEET}", LOG_SHEET.to_string()),
            ("{ROUTINES_SHEET}", ROUTINES_SHEET.to_string()),
            ("{STAGING_ROW}", STAGING_ROW.to_string()),
            ("{FIRST_ROW}", FIRST_ENTRY_ROW.to_string()),
            ("{LAST_ROW}", LAST_ENTRY_ROW.to_string()),
            ("{CAPACITY}", CAPACITY.to_string()),
            ("{ENTRY_COLUMNS}", ENTRY_COLUMNS.to_string()),
            ("{COL_DATE}", vba_col(COL_DATE)),
            ("{COL_ROUTINE}", vba_col(COL_ROUTINE)),
            ("{COL_EXERCISE}", vba_col(COL_EXERCISE)),
            ("{COL_SET}", vba_col(COL_SET)),
            ("{COL_REPS}", vba_col(COL_REPS)),
            ("{COL_WEIGHT}", vba_col(COL_WEIGHT)),
            ("{COL_REST}", vba_col(COL_REST)),
            ("{COL_NOTES}", vba_col(COL_NOTES)),
            ("{MAX_LISTED}", MAX_LISTED.to_string()),
            ("{ROUTINE_SCAN_ROWS}", ROUTINE_SCAN_ROWS.to_string()),
        ];

        let mut result = self.content.clone();
        for (placeholder, value) in substitutions {
            result = result.replace(placeholder, &value);
        }
        // VBA editors expect CRLF line endings on import
        result.replace("\r\n", "\n").replace('\n', "\r\n")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        log::info!("Exported macro module to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_fills_every_placeholder() {
        let module = MacroModule::standard().render();
        assert!(!module.contains('{'));
        assert!(!module.contains('}'));
    }

    #[test]
    fn test_render_defines_four_procedures() {
        let module = MacroModule::standard().render();
        for name in ["RecordEntry", "ClearFields", "UndoLast", "ShowRoutineExercises"] {
            assert!(
                module.contains(&format!("Sub {}()", name)),
                "missing procedure {}",
                name
            );
        }
    }

    #[test]
    fn test_render_uses_layout_rows() {
        let module = MacroModule::standard().render();
        assert!(module.contains("nextRow = 12"));
        assert!(module.contains("If nextRow > 200 Then"));
        assert!(module.contains("ws.Cells(6, 3).Value"));
        assert!(module.contains("at most 189 entries"));
        assert!(module.contains("Sheets(\"Log\")"));
        assert!(module.contains("i < 20"));
    }

    #[test]
    fn test_render_uses_crlf() {
        let module = MacroModule::standard().render();
        assert!(module.contains("Option Explicit\r\n"));
        assert!(!module.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_save_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("macros.bas");

        MacroModule::standard().save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Attribute VB_Name = \"GymlogMacros\""));
    }
}
