//! 评估成绩存储操作

use super::SeaOrmStorage;
use crate::entity::assessment_scores::{ActiveModel, Column, Entity as AssessmentScores};
use crate::entity::assessments::{Column as AssessmentColumn, Entity as Assessments};
use crate::errors::{GradebookError, Result};
use crate::models::{scores::entities::AssessmentScore, terms::entities::Term};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

impl SeaOrmStorage {
    /// 列出某课程某学期全部评估项的成绩
    pub async fn list_scores_impl(&self, course_id: i64, term: Term) -> Result<Vec<AssessmentScore>> {
        let assessment_ids: Vec<i64> = Assessments::find()
            .select_only()
            .column(AssessmentColumn::Id)
            .filter(AssessmentColumn::CourseId.eq(course_id))
            .filter(AssessmentColumn::Term.eq(term.as_str()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评估项失败: {e}")))?;

        if assessment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let scores = AssessmentScores::find()
            .filter(Column::AssessmentId.is_in(assessment_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(scores.into_iter().map(|m| m.into_score()).collect())
    }

    /// 写入或清除单个成绩
    pub async fn upsert_score_impl(
        &self,
        assessment_id: i64,
        student_id: &str,
        score: Option<f64>,
    ) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let existing = AssessmentScores::find()
            .filter(Column::AssessmentId.eq(assessment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?;

        let mut model = match existing {
            Some(model) => ActiveModel::from(model),
            // 没有记录时清除操作无事可做
            None if score.is_none() => return Ok(()),
            None => ActiveModel {
                assessment_id: Set(assessment_id),
                student_id: Set(student_id.to_string()),
                ..Default::default()
            },
        };
        model.score = Set(score);
        model.updated_at = Set(now);

        model
            .save(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("保存成绩失败: {e}")))?;

        Ok(())
    }
}
