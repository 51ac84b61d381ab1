//! 学期成绩导出

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashMap;
use tracing::error;

use super::{GradeService, load_term_report};
use crate::config::AppConfig;
use crate::errors::{GradebookError, Result};
use crate::models::grades::requests::GradeExportParams;
use crate::models::grades::responses::TermGradeReport;
use crate::models::students::entities::Student;
use crate::models::terms::entities::Term;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::parse_term;

/// 成绩表中的一行
struct GradeSheetRow<'a> {
    student: &'a Student,
    percentage: Option<f64>,
}

fn headers(term: Term) -> [String; 5] {
    [
        "Student ID".to_string(),
        "Last Name".to_string(),
        "First Name".to_string(),
        "Middle Initial".to_string(),
        format!("{term} %"),
    ]
}

/// 按花名册顺序排列成绩
fn sheet_rows<'a>(students: &'a [Student], report: &TermGradeReport) -> Vec<GradeSheetRow<'a>> {
    let by_id: HashMap<&str, Option<f64>> = report
        .rows
        .iter()
        .map(|r| (r.student_id.as_str(), r.percentage))
        .collect();

    students
        .iter()
        .map(|student| GradeSheetRow {
            student,
            percentage: by_id.get(student.student_id.as_str()).copied().flatten(),
        })
        .collect()
}

// 两位小数，无成绩时留空
fn format_percentage(percentage: Option<f64>) -> String {
    percentage.map(|p| format!("{p:.2}")).unwrap_or_default()
}

/// 导出学期成绩表
pub async fn export_term_grades(
    service: &GradeService,
    course_id: i64,
    term: &str,
    params: GradeExportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let term = match parse_term(term) {
        Ok(term) => term,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request);

    let (students, report) = match load_term_report(&storage, course_id, term).await {
        Ok(result) => result,
        Err(resp) => return Ok(resp),
    };

    let max_rows = AppConfig::get().export.max_rows;
    if students.len() as u64 > max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExportFailed,
            format!("Export supports at most {max_rows} rows"),
        )));
    }

    let rows = sheet_rows(&students, &report);
    let file_stem = format!("course_{}_{}_grades", course_id, term.as_str().to_lowercase());

    let rendered = match params.format.as_str() {
        "xlsx" => render_xlsx(term, &rows).map(|data| {
            (
                data,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                format!("{file_stem}.xlsx"),
            )
        }),
        _ => render_csv(term, &rows)
            .map(|data| (data, "text/csv; charset=utf-8", format!("{file_stem}.csv"))),
    };

    match rendered {
        Ok((data, content_type, file_name)) => Ok(HttpResponse::Ok()
            .content_type(content_type)
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            ))
            .body(data)),
        Err(e) => {
            error!("成绩导出失败: {}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::ExportFailed, e.message())))
        }
    }
}

fn render_csv(term: Term, rows: &[GradeSheetRow<'_>]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(headers(term))
        .map_err(|e| GradebookError::export(format!("CSV write failed: {e}")))?;

    for row in rows {
        wtr.write_record([
            row.student.student_id.as_str(),
            row.student.last_name.as_str(),
            row.student.first_name.as_str(),
            row.student.middle_initial.as_deref().unwrap_or(""),
            format_percentage(row.percentage).as_str(),
        ])
        .map_err(|e| GradebookError::export(format!("CSV write failed: {e}")))?;
    }

    wtr.into_inner()
        .map_err(|e| GradebookError::export(format!("CSV generation failed: {e}")))
}

fn render_xlsx(term: Term, rows: &[GradeSheetRow<'_>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_bold();
    let percent_format = Format::new().set_num_format("0.00");

    for (col, header) in headers(term).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        worksheet.write_string(r, 0, &row.student.student_id)?;
        worksheet.write_string(r, 1, &row.student.last_name)?;
        worksheet.write_string(r, 2, &row.student.first_name)?;
        worksheet.write_string(r, 3, row.student.middle_initial.as_deref().unwrap_or(""))?;
        if let Some(percentage) = row.percentage {
            worksheet.write_number_with_format(r, 4, percentage, &percent_format)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
