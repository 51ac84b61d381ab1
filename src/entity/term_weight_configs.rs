//! 学期权重配置实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "term_weight_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub term: String,
    pub pt_weight: i32,
    pub quiz_weight: i32,
    pub exam_weight: i32,
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
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，学期无法识别时返回 None
    pub fn into_weight_config(self) -> Option<crate::models::terms::entities::TermWeightConfig> {
        use crate::models::terms::entities::{Term, TermWeightConfig};

        let term = self.term.parse::<Term>().ok()?;
        Some(TermWeightConfig::new(
            term,
            self.pt_weight,
            self.quiz_weight,
            self.exam_weight,
        ))
    }
}
