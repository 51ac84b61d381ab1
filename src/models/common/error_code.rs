use serde::Serialize;

// 业务错误码，0 表示成功
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 学生 2xxx
    StudentNotFound = 2000,
    StudentAlreadyExists = 2001,
    StudentIdInvalid = 2002,
    StudentNameInvalid = 2003,
    StudentCreationFailed = 2004,

    // 课程 3xxx
    CourseNotFound = 3000,
    CourseAlreadyExists = 3001,
    CourseCreationFailed = 3002,

    // 学期配置 4xxx
    TermInvalid = 4000,
    TermNotConfigured = 4001,
    TermWeightInvalid = 4002,
    AssessmentInvalid = 4003,
    AssessmentNotFound = 4004,
    TermSaveFailed = 4005,

    // 导入导出 5xxx
    FileUploadFailed = 5000,
    FileTypeNotAllowed = 5001,
    FileSizeExceeded = 5002,
    ImportFileMissingColumn = 5003,
    ImportFileParseFailed = 5004,
    ImportFileDataInvalid = 5005,
    ExportFailed = 5006,
}
