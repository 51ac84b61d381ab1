//! 学期加权成绩计算
//!
//! PT 与 Quiz 的类别平均以该类别全部启用的评估项数量为除数，
//! 未录入的成绩按 0 计入平均。考试是必需类别：没有考试成绩就没有学期成绩。

use std::collections::BTreeMap;

use crate::grading::scores::ScoreBook;
use crate::models::scores::entities::AssessmentScore;
use crate::models::terms::entities::{Assessment, AssessmentCategory, TermWeightConfig};

/// 单个评估项的百分比；满分不为正或未录入时为空
fn assessment_percentage(assessment: &Assessment, book: &ScoreBook, student_id: &str) -> Option<f64> {
    if assessment.max_score <= 0.0 {
        return None;
    }
    book.get(student_id, assessment.id)
        .map(|score| score / assessment.max_score * 100.0)
}

/// 类别平均百分比，类别为空时为 0
fn category_average(assessments: &[&Assessment], book: &ScoreBook, student_id: &str) -> f64 {
    if assessments.is_empty() {
        return 0.0;
    }
    let sum: f64 = assessments
        .iter()
        .filter_map(|a| assessment_percentage(a, book, student_id))
        .sum();
    sum / assessments.len() as f64
}

/// 按类别划分后的本学期启用评估项
struct TermAssessments<'a> {
    pt: Vec<&'a Assessment>,
    quiz: Vec<&'a Assessment>,
    exam: Option<&'a Assessment>,
}

impl<'a> TermAssessments<'a> {
    fn partition(config: &TermWeightConfig, assessments: &'a [Assessment]) -> Self {
        let mut pt = Vec::new();
        let mut quiz = Vec::new();
        let mut exams = Vec::new();

        for assessment in assessments
            .iter()
            .filter(|a| a.enabled && a.term == config.term)
        {
            match assessment.category {
                AssessmentCategory::Pt => pt.push(assessment),
                AssessmentCategory::Quiz => quiz.push(assessment),
                AssessmentCategory::Exam => exams.push(assessment),
            }
        }

        // 保存时限制了每学期最多一个启用的考试，这里仍取排序最靠前的一个
        let exam = exams.into_iter().min_by_key(|a| (a.order, a.id));

        Self { pt, quiz, exam }
    }

    fn percentage_for(&self, config: &TermWeightConfig, book: &ScoreBook, student_id: &str) -> Option<f64> {
        let exam_pct = assessment_percentage(self.exam?, book, student_id)?;
        let pt_avg = category_average(&self.pt, book, student_id);
        let quiz_avg = category_average(&self.quiz, book, student_id);

        let weighted =
            |pct: f64, category| pct / 100.0 * f64::from(config.weight_of(category));

        Some(
            weighted(pt_avg, AssessmentCategory::Pt)
                + weighted(quiz_avg, AssessmentCategory::Quiz)
                + weighted(exam_pct, AssessmentCategory::Exam),
        )
    }
}

/// 计算单个学生的学期加权百分比
///
/// 结果不做截断，依赖录入时的成绩范围校验。没有考试成绩时返回 `None`。
pub fn compute_term_percentage(
    config: &TermWeightConfig,
    assessments: &[Assessment],
    scores: &[AssessmentScore],
    student_id: &str,
) -> Option<f64> {
    let book = ScoreBook::from_scores(scores);
    TermAssessments::partition(config, assessments).percentage_for(config, &book, student_id)
}

/// 批量计算多个学生的学期加权百分比
pub fn compute_term_percentages<'s, I>(
    config: &TermWeightConfig,
    assessments: &[Assessment],
    scores: &[AssessmentScore],
    student_ids: I,
) -> BTreeMap<String, Option<f64>>
where
    I: IntoIterator<Item = &'s str>,
{
    let book = ScoreBook::from_scores(scores);
    let partitioned = TermAssessments::partition(config, assessments);

    student_ids
        .into_iter()
        .map(|id| (id.to_string(), partitioned.percentage_for(config, &book, id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::terms::entities::Term;

    const EPS: f64 = 1e-9;

    fn assessment(id: i64, category: AssessmentCategory, max_score: f64) -> Assessment {
        Assessment {
            id,
            term: Term::Prelim,
            category,
            title: format!("{category} {id}"),
            max_score,
            enabled: true,
            order: id as i32,
        }
    }

    fn score(student_id: &str, assessment_id: i64, value: f64) -> AssessmentScore {
        AssessmentScore::new(student_id, assessment_id, Some(value))
    }

    fn config() -> TermWeightConfig {
        TermWeightConfig::new(Term::Prelim, 30, 30, 40)
    }

    #[test]
    fn test_worked_example_is_44() {
        let assessments = [
            assessment(1, AssessmentCategory::Pt, 100.0),
            assessment(2, AssessmentCategory::Exam, 100.0),
        ];
        let scores = [score("S1", 1, 80.0), score("S1", 2, 50.0)];

        let pct = compute_term_percentage(&config(), &assessments, &scores, "S1").unwrap();
        assert!((pct - 44.0).abs() < EPS);
    }

    #[test]
    fn test_missing_exam_score_yields_none() {
        let assessments = [
            assessment(1, AssessmentCategory::Pt, 100.0),
            assessment(2, AssessmentCategory::Quiz, 100.0),
            assessment(3, AssessmentCategory::Exam, 100.0),
        ];
        let scores = [score("S1", 1, 100.0), score("S1", 2, 100.0)];
        assert_eq!(
            compute_term_percentage(&config(), &assessments, &scores, "S1"),
            None
        );

        let cleared = [
            score("S1", 1, 100.0),
            AssessmentScore::new("S1", 3, None),
        ];
        assert_eq!(
            compute_term_percentage(&config(), &assessments, &cleared, "S1"),
            None
        );
    }

    #[test]
    fn test_no_exam_configured_yields_none() {
        let assessments = [assessment(1, AssessmentCategory::Pt, 100.0)];
        let scores = [score("S1", 1, 90.0)];
        assert_eq!(
            compute_term_percentage(&config(), &assessments, &scores, "S1"),
            None
        );
    }

    #[test]
    fn test_missing_category_score_counts_as_zero() {
        let assessments = [
            assessment(1, AssessmentCategory::Quiz, 10.0),
            assessment(2, AssessmentCategory::Quiz, 10.0),
            assessment(3, AssessmentCategory::Exam, 100.0),
        ];
        // 只录入了一个小测：平均为 (100 + 0) / 2 = 50
        let scores = [score("S1", 1, 10.0), score("S1", 3, 100.0)];
        let pct = compute_term_percentage(&config(), &assessments, &scores, "S1").unwrap();
        assert!((pct - (0.3 * 50.0 + 0.4 * 100.0)).abs() < EPS);
    }

    #[test]
    fn test_disabled_and_other_term_assessments_ignored() {
        let mut disabled = assessment(2, AssessmentCategory::Pt, 100.0);
        disabled.enabled = false;
        let mut other_term = assessment(4, AssessmentCategory::Pt, 100.0);
        other_term.term = Term::Midterm;

        let assessments = [
            assessment(1, AssessmentCategory::Pt, 100.0),
            disabled,
            assessment(3, AssessmentCategory::Exam, 100.0),
            other_term,
        ];
        let scores = [score("S1", 1, 60.0), score("S1", 3, 70.0)];
        let pct = compute_term_percentage(&config(), &assessments, &scores, "S1").unwrap();
        assert!((pct - (0.3 * 60.0 + 0.4 * 70.0)).abs() < EPS);
    }

    #[test]
    fn test_zero_max_score_contributes_nothing_but_counts() {
        let assessments = [
            assessment(1, AssessmentCategory::Pt, 100.0),
            assessment(2, AssessmentCategory::Pt, 0.0),
            assessment(3, AssessmentCategory::Exam, 100.0),
        ];
        let scores = [
            score("S1", 1, 100.0),
            score("S1", 2, 5.0),
            score("S1", 3, 100.0),
        ];
        let pct = compute_term_percentage(&config(), &assessments, &scores, "S1").unwrap();
        assert!((pct - (0.3 * 50.0 + 0.4 * 100.0)).abs() < EPS);
    }

    #[test]
    fn test_monotonic_in_each_score() {
        let assessments = [
            assessment(1, AssessmentCategory::Pt, 50.0),
            assessment(2, AssessmentCategory::Pt, 50.0),
            assessment(3, AssessmentCategory::Quiz, 20.0),
            assessment(4, AssessmentCategory::Exam, 100.0),
        ];
        let base = [
            score("S1", 1, 20.0),
            score("S1", 2, 30.0),
            score("S1", 3, 10.0),
            score("S1", 4, 60.0),
        ];
        let base_pct = compute_term_percentage(&config(), &assessments, &base, "S1").unwrap();

        for bumped_idx in 0..base.len() {
            let mut bumped = base.clone();
            let max = assessments[bumped_idx].max_score;
            let current = bumped[bumped_idx].score.unwrap();
            bumped[bumped_idx].score = Some((current + 5.0).min(max));

            let pct = compute_term_percentage(&config(), &assessments, &bumped, "S1").unwrap();
            assert!(pct >= base_pct, "raising assessment {bumped_idx} lowered the grade");
        }
    }

    #[test]
    fn test_batch_computation_per_student() {
        let assessments = [
            assessment(1, AssessmentCategory::Pt, 100.0),
            assessment(2, AssessmentCategory::Exam, 100.0),
        ];
        let scores = [
            score("S1", 1, 80.0),
            score("S1", 2, 50.0),
            score("S2", 1, 100.0),
        ];
        let results =
            compute_term_percentages(&config(), &assessments, &scores, ["S1", "S2", "S3"]);

        assert_eq!(results.len(), 3);
        assert!((results["S1"].unwrap() - 44.0).abs() < EPS);
        assert_eq!(results["S2"], None);
        assert_eq!(results["S3"], None);
    }
}
