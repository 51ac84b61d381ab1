//! 预导入模块，方便使用

pub use super::assessment_scores::{
    ActiveModel as AssessmentScoreActiveModel, Entity as AssessmentScores,
    Model as AssessmentScoreModel,
};
pub use super::assessments::{
    ActiveModel as AssessmentActiveModel, Entity as Assessments, Model as AssessmentModel,
};
pub use super::audit_logs::{
    ActiveModel as AuditLogActiveModel, Entity as AuditLogs, Model as AuditLogModel,
};
pub use super::course_enrollments::{
    ActiveModel as CourseEnrollmentActiveModel, Entity as CourseEnrollments,
    Model as CourseEnrollmentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::term_weight_configs::{
    ActiveModel as TermWeightConfigActiveModel, Entity as TermWeightConfigs,
    Model as TermWeightConfigModel,
};
