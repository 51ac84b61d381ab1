//! 评估项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assessments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub term: String,
    pub category: String,
    pub title: String,
    pub max_score: f64,
    pub enabled: bool,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::assessment_scores::Entity")]
    AssessmentScores,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::assessment_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssessmentScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 学期或类别无法识别的记录返回 None
    pub fn into_assessment(self) -> Option<crate::models::terms::entities::Assessment> {
        use crate::models::terms::entities::{Assessment, AssessmentCategory, Term};

        Some(Assessment {
            id: self.id,
            term: self.term.parse::<Term>().ok()?,
            category: self.category.parse::<AssessmentCategory>().ok()?,
            title: self.title,
            max_score: self.max_score,
            enabled: self.enabled,
            order: self.sort_order,
        })
    }
}
