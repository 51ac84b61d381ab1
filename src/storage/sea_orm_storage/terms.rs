//! 学期配置存储操作
//!
//! 权重与评估项一起保存。一次保存内的所有学期共享一个事务，
//! 任一步失败时事务回滚，已有配置保持不变。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assessment_scores::{
    Column as ScoreColumn, Entity as AssessmentScores,
};
use crate::entity::assessments::{
    ActiveModel as AssessmentActiveModel, Column as AssessmentColumn, Entity as Assessments,
};
use crate::entity::term_weight_configs::{
    ActiveModel as WeightActiveModel, Column as WeightColumn, Entity as TermWeightConfigs,
};
use crate::errors::{GradebookError, Result};
use crate::models::terms::{
    entities::{AssessmentData, AssessmentDraft, Term, TermSetup},
    requests::TermSetupInput,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取单个学期配置，未配置权重时返回 None
    pub async fn get_term_setup_impl(&self, course_id: i64, term: Term) -> Result<Option<TermSetup>> {
        let config = TermWeightConfigs::find()
            .filter(WeightColumn::CourseId.eq(course_id))
            .filter(WeightColumn::Term.eq(term.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学期权重失败: {e}")))?;

        let Some(config) = config.and_then(|m| m.into_weight_config()) else {
            return Ok(None);
        };

        let assessments = Assessments::find()
            .filter(AssessmentColumn::CourseId.eq(course_id))
            .filter(AssessmentColumn::Term.eq(term.as_str()))
            .order_by_asc(AssessmentColumn::SortOrder)
            .order_by_asc(AssessmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询评估项失败: {e}")))?;

        Ok(Some(TermSetup {
            course_id,
            config,
            assessments: assessments
                .into_iter()
                .filter_map(|m| m.into_assessment())
                .collect(),
        }))
    }

    /// 列出课程全部已配置的学期
    pub async fn list_term_setups_impl(&self, course_id: i64) -> Result<Vec<TermSetup>> {
        let mut setups = Vec::new();
        for term in Term::all() {
            if let Some(setup) = self.get_term_setup_impl(course_id, *term).await? {
                setups.push(setup);
            }
        }
        Ok(setups)
    }

    /// 在同一事务中保存多个学期配置
    ///
    /// 调用方需事先完成校验。批次中未出现的已有评估项会连同其成绩一起删除；
    /// 引用不属于该课程学期的评估项 ID 会导致整个批次回滚。
    pub async fn save_term_setups_impl(
        &self,
        course_id: i64,
        setups: Vec<TermSetupInput>,
    ) -> Result<Vec<TermSetup>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for setup in &setups {
            save_weights(&txn, course_id, setup, now).await?;
            save_assessments(&txn, course_id, setup.term, &setup.assessments, now).await?;
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交学期配置失败: {e}")))?;

        let mut saved = Vec::with_capacity(setups.len());
        for setup in &setups {
            if let Some(term_setup) = self.get_term_setup_impl(course_id, setup.term).await? {
                saved.push(term_setup);
            }
        }
        Ok(saved)
    }
}

async fn save_weights(
    txn: &DatabaseTransaction,
    course_id: i64,
    setup: &TermSetupInput,
    now: i64,
) -> Result<()> {
    let existing = TermWeightConfigs::find()
        .filter(WeightColumn::CourseId.eq(course_id))
        .filter(WeightColumn::Term.eq(setup.term.as_str()))
        .one(txn)
        .await
        .map_err(|e| GradebookError::database_operation(format!("查询学期权重失败: {e}")))?;

    let mut model = match existing {
        Some(model) => WeightActiveModel::from(model),
        None => WeightActiveModel {
            course_id: Set(course_id),
            term: Set(setup.term.as_str().to_string()),
            ..Default::default()
        },
    };
    model.pt_weight = Set(setup.pt_weight);
    model.quiz_weight = Set(setup.quiz_weight);
    model.exam_weight = Set(setup.exam_weight);
    model.updated_at = Set(now);

    model
        .save(txn)
        .await
        .map_err(|e| GradebookError::database_operation(format!("保存学期权重失败: {e}")))?;

    Ok(())
}

async fn save_assessments(
    txn: &DatabaseTransaction,
    course_id: i64,
    term: Term,
    drafts: &[AssessmentDraft],
    now: i64,
) -> Result<()> {
    let mut existing: HashMap<i64, _> = Assessments::find()
        .filter(AssessmentColumn::CourseId.eq(course_id))
        .filter(AssessmentColumn::Term.eq(term.as_str()))
        .all(txn)
        .await
        .map_err(|e| GradebookError::database_operation(format!("查询评估项失败: {e}")))?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    for draft in drafts {
        let model = match draft {
            AssessmentDraft::New(_) => AssessmentActiveModel {
                course_id: Set(course_id),
                term: Set(term.as_str().to_string()),
                created_at: Set(now),
                ..Default::default()
            },
            AssessmentDraft::Existing { id, .. } => {
                let current = existing.remove(id).ok_or_else(|| {
                    GradebookError::not_found(format!(
                        "Assessment {id} does not belong to {term} of this course"
                    ))
                })?;
                let new_max = draft.data().max_score;
                if new_max < current.max_score {
                    ensure_scores_within(txn, &current.title, *id, new_max).await?;
                }
                AssessmentActiveModel::from(current)
            }
        };

        apply_data(model, draft.data(), now)
            .save(txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("保存评估项失败: {e}")))?;
    }

    // 剩下的就是本次未提交的旧评估项
    let stale: Vec<i64> = existing.into_keys().collect();
    if !stale.is_empty() {
        AssessmentScores::delete_many()
            .filter(ScoreColumn::AssessmentId.is_in(stale.clone()))
            .exec(txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除评估成绩失败: {e}")))?;

        Assessments::delete_many()
            .filter(AssessmentColumn::Id.is_in(stale))
            .exec(txn)
            .await
            .map_err(|e| GradebookError::database_operation(format!("删除评估项失败: {e}")))?;
    }

    Ok(())
}

/// 降低满分前确认已录入的成绩都不超过新满分
async fn ensure_scores_within(
    txn: &DatabaseTransaction,
    title: &str,
    assessment_id: i64,
    max_score: f64,
) -> Result<()> {
    let over = AssessmentScores::find()
        .filter(ScoreColumn::AssessmentId.eq(assessment_id))
        .filter(ScoreColumn::Score.gt(max_score))
        .count(txn)
        .await
        .map_err(|e| GradebookError::database_operation(format!("查询评估成绩失败: {e}")))?;

    if over > 0 {
        return Err(GradebookError::validation(format!(
            "Cannot lower max score of '{title}' to {max_score}: {over} recorded score(s) exceed it"
        )));
    }
    Ok(())
}

fn apply_data(mut model: AssessmentActiveModel, data: &AssessmentData, now: i64) -> AssessmentActiveModel {
    model.category = Set(data.category.as_str().to_string());
    model.title = Set(data.title.trim().to_string());
    model.max_score = Set(data.max_score);
    model.enabled = Set(data.enabled);
    model.sort_order = Set(data.order);
    model.updated_at = Set(now);
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::terms::entities::AssessmentCategory;

    async fn storage_with_course() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let course = storage
            .create_course_impl(CreateCourseRequest {
                code: "HIST".to_string(),
                name: "History".to_string(),
                description: None,
            })
            .await
            .unwrap();
        (storage, course.id)
    }

    fn data(title: &str, category: AssessmentCategory, order: i32) -> AssessmentData {
        AssessmentData {
            title: title.to_string(),
            category,
            max_score: 50.0,
            enabled: true,
            order,
        }
    }

    fn input(term: Term, weights: (i32, i32, i32), assessments: Vec<AssessmentDraft>) -> TermSetupInput {
        TermSetupInput {
            term,
            pt_weight: weights.0,
            quiz_weight: weights.1,
            exam_weight: weights.2,
            assessments,
        }
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let (storage, course_id) = storage_with_course().await;

        let saved = storage
            .save_term_setups_impl(
                course_id,
                vec![input(
                    Term::Prelim,
                    (40, 30, 30),
                    vec![
                        AssessmentDraft::New(data("Exam", AssessmentCategory::Exam, 2)),
                        AssessmentDraft::New(data("PT 1", AssessmentCategory::Pt, 1)),
                    ],
                )],
            )
            .await
            .unwrap();

        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].config.pt_weight, 40);
        let titles: Vec<&str> = saved[0].assessments.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["PT 1", "Exam"]);

        assert!(storage.get_term_setup_impl(course_id, Term::Midterm).await.unwrap().is_none());
        assert_eq!(storage.list_term_setups_impl(course_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resave_updates_and_removes() {
        let (storage, course_id) = storage_with_course().await;
        let first = storage
            .save_term_setups_impl(
                course_id,
                vec![input(
                    Term::Midterm,
                    (40, 30, 30),
                    vec![
                        AssessmentDraft::New(data("Quiz 1", AssessmentCategory::Quiz, 0)),
                        AssessmentDraft::New(data("Quiz 2", AssessmentCategory::Quiz, 1)),
                    ],
                )],
            )
            .await
            .unwrap();
        let quiz_one = first[0].assessments[0].id;

        let second = storage
            .save_term_setups_impl(
                course_id,
                vec![input(
                    Term::Midterm,
                    (20, 30, 50),
                    vec![AssessmentDraft::Existing {
                        id: quiz_one,
                        data: data("Quiz 1 (revised)", AssessmentCategory::Quiz, 0),
                    }],
                )],
            )
            .await
            .unwrap();

        assert_eq!(second[0].config.exam_weight, 50);
        assert_eq!(second[0].assessments.len(), 1);
        assert_eq!(second[0].assessments[0].id, quiz_one);
        assert_eq!(second[0].assessments[0].title, "Quiz 1 (revised)");
    }

    #[tokio::test]
    async fn test_foreign_assessment_rolls_back_whole_batch() {
        let (storage, course_id) = storage_with_course().await;
        storage
            .save_term_setups_impl(course_id, vec![input(Term::Prelim, (40, 30, 30), vec![])])
            .await
            .unwrap();

        let result = storage
            .save_term_setups_impl(
                course_id,
                vec![
                    input(Term::Prelim, (10, 10, 80), vec![]),
                    input(
                        Term::Finals,
                        (40, 30, 30),
                        vec![AssessmentDraft::Existing {
                            id: 9999,
                            data: data("Ghost", AssessmentCategory::Pt, 0),
                        }],
                    ),
                ],
            )
            .await;

        assert!(matches!(result, Err(GradebookError::NotFound(_))));
        let prelim = storage
            .get_term_setup_impl(course_id, Term::Prelim)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prelim.config.pt_weight, 40);
        assert!(storage.get_term_setup_impl(course_id, Term::Finals).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lowering_max_below_recorded_score_rolls_back() {
        let (storage, course_id) = storage_with_course().await;
        storage
            .create_student_impl(CreateStudentRequest {
                student_id: "S1".to_string(),
                first_name: "Jo".to_string(),
                last_name: "Lee".to_string(),
                middle_initial: None,
                rfid: Some("04A1B2".to_string()),
            })
            .await
            .unwrap();

        let first = storage
            .save_term_setups_impl(
                course_id,
                vec![input(
                    Term::Prelim,
                    (40, 30, 30),
                    vec![AssessmentDraft::New(AssessmentData {
                        max_score: 100.0,
                        ..data("PT 1", AssessmentCategory::Pt, 0)
                    })],
                )],
            )
            .await
            .unwrap();
        let pt_one = first[0].assessments[0].id;
        storage.upsert_score_impl(pt_one, "S1", Some(90.0)).await.unwrap();

        let result = storage
            .save_term_setups_impl(
                course_id,
                vec![
                    input(Term::Midterm, (20, 30, 50), vec![]),
                    input(
                        Term::Prelim,
                        (10, 10, 80),
                        vec![AssessmentDraft::Existing {
                            id: pt_one,
                            data: data("PT 1", AssessmentCategory::Pt, 0),
                        }],
                    ),
                ],
            )
            .await;

        assert!(matches!(result, Err(GradebookError::Validation(_))));
        let prelim = storage
            .get_term_setup_impl(course_id, Term::Prelim)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prelim.config.pt_weight, 40);
        assert_eq!(prelim.assessments[0].max_score, 100.0);
        assert!(storage.get_term_setup_impl(course_id, Term::Midterm).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lowering_max_above_recorded_scores_is_allowed() {
        let (storage, course_id) = storage_with_course().await;
        storage
            .create_student_impl(CreateStudentRequest {
                student_id: "S1".to_string(),
                first_name: "Jo".to_string(),
                last_name: "Lee".to_string(),
                middle_initial: None,
                rfid: None,
            })
            .await
            .unwrap();

        let first = storage
            .save_term_setups_impl(
                course_id,
                vec![input(
                    Term::Prelim,
                    (40, 30, 30),
                    vec![AssessmentDraft::New(AssessmentData {
                        max_score: 100.0,
                        ..data("PT 1", AssessmentCategory::Pt, 0)
                    })],
                )],
            )
            .await
            .unwrap();
        let pt_one = first[0].assessments[0].id;
        storage.upsert_score_impl(pt_one, "S1", Some(45.0)).await.unwrap();

        let saved = storage
            .save_term_setups_impl(
                course_id,
                vec![input(
                    Term::Prelim,
                    (40, 30, 30),
                    vec![AssessmentDraft::Existing {
                        id: pt_one,
                        data: data("PT 1", AssessmentCategory::Pt, 0),
                    }],
                )],
            )
            .await
            .unwrap();
        assert_eq!(saved[0].assessments[0].max_score, 50.0);
    }
}
