//! 花名册导入模板

use actix_web::{HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use super::parse::TEMPLATE_HEADERS;

const EXAMPLE_ROW: [&str; 4] = ["2024-00001", "Juan", "Dela Cruz", "S"];

/// 下载导入模板
pub async fn download_template(format: &str) -> ActixResult<HttpResponse> {
    match format {
        "xlsx" => generate_template_xlsx(),
        _ => generate_template_csv(),
    }
}

fn generate_template_csv() -> ActixResult<HttpResponse> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for record in [TEMPLATE_HEADERS, EXAMPLE_ROW] {
        wtr.write_record(record).map_err(|e| {
            error!("CSV 写入失败: {}", e);
            actix_web::error::ErrorInternalServerError(format!("CSV write failed: {e}"))
        })?;
    }

    let data = wtr.into_inner().map_err(|e| {
        error!("CSV 生成失败: {}", e);
        actix_web::error::ErrorInternalServerError(format!("CSV generation failed: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"roster_import_template.csv\"",
        ))
        .body(data))
}

fn generate_template_xlsx() -> ActixResult<HttpResponse> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // 表头格式
    let header_format = Format::new().set_bold();

    for (col, header) in TEMPLATE_HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| {
                error!("XLSX 写入失败: {}", e);
                actix_web::error::ErrorInternalServerError(format!("XLSX write failed: {e}"))
            })?;
    }

    // 学号按文本写入，避免前导零丢失
    for (col, value) in EXAMPLE_ROW.iter().enumerate() {
        worksheet.write_string(1, col as u16, *value).ok();
    }

    let buffer = workbook.save_to_buffer().map_err(|e| {
        error!("XLSX 生成失败: {}", e);
        actix_web::error::ErrorInternalServerError(format!("XLSX generation failed: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"roster_import_template.xlsx\"",
        ))
        .body(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::roster::parse::{parse_csv, parse_workbook};
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_csv_template_parses_back() {
        let resp = download_template("csv").await.unwrap();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let rows = parse_csv(&body).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student_id, "2024-00001");
    }

    #[actix_web::test]
    async fn test_xlsx_template_parses_back() {
        let resp = download_template("xlsx").await.unwrap();
        let body = to_bytes(resp.into_body()).await.unwrap();
        let rows = parse_workbook(&body).unwrap();
        assert_eq!(rows[0].last_name, "Dela Cruz");
        assert_eq!(rows[0].middle_initial.as_deref(), Some("S"));
    }
}
