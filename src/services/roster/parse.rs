//! 花名册文件解析
//!
//! 表头不区分大小写，并忽略空格、下划线和连字符，
//! 因此 `studentId`、`student_id`、`Student ID` 都指向同一列。

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::collections::HashMap;
use std::io::Cursor;

use crate::models::ErrorCode;
use crate::models::roster::entities::RosterImportRow;

/// 导入解析错误
#[derive(Debug, Clone, PartialEq)]
pub enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
}

impl ImportParseError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("Missing required column: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "The file contains no data".to_string(),
        }
    }
}

/// 模板与导入使用的列名
pub const TEMPLATE_HEADERS: [&str; 4] = ["studentId", "firstName", "lastName", "middleInitial"];

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// 各字段所在的列下标
struct ColumnLayout {
    student_id: usize,
    first_name: usize,
    last_name: usize,
    middle_initial: Option<usize>,
}

impl ColumnLayout {
    fn from_headers<'a, I>(headers: I) -> Result<Self, ImportParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let header_map: HashMap<String, usize> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h), i))
            .collect();

        let required = |name: &str| {
            header_map
                .get(&normalize_header(name))
                .copied()
                .ok_or_else(|| ImportParseError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            student_id: required(TEMPLATE_HEADERS[0])?,
            first_name: required(TEMPLATE_HEADERS[1])?,
            last_name: required(TEMPLATE_HEADERS[2])?,
            middle_initial: header_map.get(&normalize_header(TEMPLATE_HEADERS[3])).copied(),
        })
    }

    /// 按列取值并去除首尾空白；整行为空时返回 None
    fn build_row<F>(&self, line: usize, cell: F) -> Option<RosterImportRow>
    where
        F: Fn(usize) -> String,
    {
        let row = RosterImportRow {
            student_id: cell(self.student_id),
            first_name: cell(self.first_name),
            last_name: cell(self.last_name),
            middle_initial: self.middle_initial.map(&cell).filter(|s| !s.is_empty()),
            line: Some(line),
        };

        let blank = row.student_id.is_empty()
            && row.first_name.is_empty()
            && row.last_name.is_empty()
            && row.middle_initial.is_none();
        (!blank).then_some(row)
    }
}

pub fn parse_csv(data: &[u8]) -> Result<Vec<RosterImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    // 检查表头
    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to read header row: {e}")))?
        .clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportParseError::EmptyFile);
    }
    let layout = ColumnLayout::from_headers(headers.iter())?;

    let mut rows = Vec::new();
    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("Failed to parse line {}: {e}", row_num + 2))
        })?;

        // 空行不产生记录，行号取 csv 记录的真实位置
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_num + 2);
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        if let Some(row) = layout.build_row(line, cell) {
            rows.push(row);
        }
    }

    Ok(rows)
}

/// 解析 xlsx / xls 工作簿的第一个工作表
pub fn parse_workbook(data: &[u8]) -> Result<Vec<RosterImportRow>, ImportParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to open workbook: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("Workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("Failed to read worksheet: {e}")))?;

    // 工作表可能不从第一行开始
    let header_line = range.start().map(|(r, _)| r as usize + 1).unwrap_or(1);
    let mut rows_iter = range.rows();

    // 读取表头
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let headers: Vec<String> = header_row.iter().map(cell_text).collect();
    let layout = ColumnLayout::from_headers(headers.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (offset, row) in rows_iter.enumerate() {
        let cell = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();
        if let Some(row) = layout.build_row(header_line + 1 + offset, cell) {
            rows.push(row);
        }
    }

    Ok(rows)
}

// 数字学号在表格里常被存成浮点数，整数值去掉小数部分
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_normalize_header_variants() {
        for header in ["studentId", "student_id", "Student ID", "STUDENT-ID", "\u{feff}studentid"] {
            assert_eq!(normalize_header(header), "studentid");
        }
    }

    #[test]
    fn test_parse_csv_trims_and_skips_blank_rows() {
        let data = b"Student ID,First Name,Last Name,Middle Initial\n S1 , Jo ,Lee,\n,,,\nS2,Ann,Cruz,M\n";
        let rows = parse_csv(data).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RosterImportRow::new("S1", "Jo", "Lee").at_line(2));
        assert_eq!(rows[1].middle_initial.as_deref(), Some("M"));
        // 空行被跳过后仍保留源文件行号
        assert_eq!(rows[1].line, Some(4));
    }

    #[test]
    fn test_parse_csv_keeps_partially_blank_rows() {
        let rows = parse_csv(b"studentId,firstName,lastName\nS1,,Lee\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_name, "");
    }

    #[test]
    fn test_parse_csv_missing_column() {
        let err = parse_csv(b"studentId,firstName\nS1,Jo\n").unwrap_err();
        assert_eq!(err, ImportParseError::MissingColumn("lastName".to_string()));
        assert_eq!(err.error_code(), ErrorCode::ImportFileMissingColumn);
    }

    #[test]
    fn test_parse_csv_empty() {
        assert_eq!(parse_csv(b"").unwrap_err(), ImportParseError::EmptyFile);
    }

    #[test]
    fn test_parse_workbook() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["student_id", "first_name", "last_name"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_number(1, 0, 20240001.0).unwrap();
        sheet.write_string(1, 1, " Jo ").unwrap();
        sheet.write_string(1, 2, "Lee").unwrap();
        sheet.write_string(3, 0, "S2").unwrap();
        sheet.write_string(3, 1, "Ann").unwrap();
        sheet.write_string(3, 2, "Cruz").unwrap();
        let buffer = workbook.save_to_buffer().unwrap();

        let rows = parse_workbook(&buffer).unwrap();
        assert_eq!(
            rows,
            vec![
                RosterImportRow::new("20240001", "Jo", "Lee").at_line(2),
                RosterImportRow::new("S2", "Ann", "Cruz").at_line(4),
            ]
        );
    }

    #[test]
    fn test_parse_workbook_rejects_garbage() {
        assert!(matches!(
            parse_workbook(b"not a workbook"),
            Err(ImportParseError::ParseFailed(_))
        ));
    }
}
