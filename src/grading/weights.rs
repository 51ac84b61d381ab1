//! 学期权重配置校验
//!
//! 保存时整批校验，任一学期不合法则整批拒绝，不做部分提交。

use std::collections::HashSet;
use std::fmt;

use crate::errors::GradebookError;
use crate::models::terms::entities::{AssessmentCategory, Term, TermWeightConfig};
use crate::models::terms::requests::TermSetupInput;

/// 权重总和必须等于该值
pub const REQUIRED_WEIGHT_SUM: i64 = 100;

/// 单项权重的取值范围
pub const WEIGHT_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

#[derive(Debug, Clone, PartialEq)]
pub enum TermConfigError {
    /// 三项权重之和不为 100
    WeightSum { term: Term, sum: i64 },
    /// 单项权重超出 0..=100
    WeightOutOfRange {
        term: Term,
        category: AssessmentCategory,
        weight: i32,
    },
    /// 同一批次中重复出现的学期
    DuplicateTerm(Term),
    /// 评估项字段不合法
    InvalidAssessment { term: Term, reason: String },
    /// 同一学期启用了多个考试
    MultipleExams(Term),
}

impl fmt::Display for TermConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermConfigError::WeightSum { term, sum } => write!(
                f,
                "Weights for {term} must sum to {REQUIRED_WEIGHT_SUM} (got {sum})"
            ),
            TermConfigError::WeightOutOfRange {
                term,
                category,
                weight,
            } => write!(
                f,
                "{category} weight for {term} must be between 0 and 100 (got {weight})"
            ),
            TermConfigError::DuplicateTerm(term) => {
                write!(f, "Term {term} appears more than once")
            }
            TermConfigError::InvalidAssessment { term, reason } => {
                write!(f, "Invalid assessment in {term}: {reason}")
            }
            TermConfigError::MultipleExams(term) => {
                write!(f, "Term {term} can have at most one enabled exam")
            }
        }
    }
}

impl std::error::Error for TermConfigError {}

impl From<TermConfigError> for GradebookError {
    fn from(err: TermConfigError) -> Self {
        GradebookError::Validation(err.to_string())
    }
}

/// 校验单个学期的权重
pub fn validate(config: &TermWeightConfig) -> Result<(), TermConfigError> {
    for &category in AssessmentCategory::all() {
        let weight = config.weight_of(category);
        if !WEIGHT_RANGE.contains(&weight) {
            return Err(TermConfigError::WeightOutOfRange {
                term: config.term,
                category,
                weight,
            });
        }
    }

    let sum = config.weight_sum();
    if sum != REQUIRED_WEIGHT_SUM {
        return Err(TermConfigError::WeightSum {
            term: config.term,
            sum,
        });
    }
    Ok(())
}

/// 校验一批学期权重，遇到第一个错误即返回
pub fn validate_all<'a, I>(configs: I) -> Result<(), TermConfigError>
where
    I: IntoIterator<Item = &'a TermWeightConfig>,
{
    let mut seen = HashSet::new();
    for config in configs {
        if !seen.insert(config.term) {
            return Err(TermConfigError::DuplicateTerm(config.term));
        }
        validate(config)?;
    }
    Ok(())
}

/// 校验完整的学期配置输入（权重 + 评估项）
pub fn validate_setups(setups: &[TermSetupInput]) -> Result<(), TermConfigError> {
    let configs: Vec<TermWeightConfig> = setups.iter().map(|s| s.weight_config()).collect();
    validate_all(&configs)?;

    for setup in setups {
        let mut enabled_exams = 0;
        for draft in &setup.assessments {
            let data = draft.data();
            if data.title.trim().is_empty() {
                return Err(TermConfigError::InvalidAssessment {
                    term: setup.term,
                    reason: "title is required".to_string(),
                });
            }
            if !data.max_score.is_finite() || data.max_score <= 0.0 {
                return Err(TermConfigError::InvalidAssessment {
                    term: setup.term,
                    reason: format!("'{}' must have a positive max score", data.title),
                });
            }
            if data.enabled && data.category == AssessmentCategory::Exam {
                enabled_exams += 1;
            }
        }
        if enabled_exams > 1 {
            return Err(TermConfigError::MultipleExams(setup.term));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::terms::entities::{AssessmentData, AssessmentDraft};

    fn setup(term: Term, weights: (i32, i32, i32), drafts: Vec<AssessmentDraft>) -> TermSetupInput {
        TermSetupInput {
            term,
            pt_weight: weights.0,
            quiz_weight: weights.1,
            exam_weight: weights.2,
            assessments: drafts,
        }
    }

    fn draft(title: &str, category: AssessmentCategory, max_score: f64) -> AssessmentDraft {
        AssessmentDraft::New(AssessmentData {
            title: title.to_string(),
            category,
            max_score,
            enabled: true,
            order: 0,
        })
    }

    #[test]
    fn test_weights_summing_to_100_pass() {
        assert!(validate(&TermWeightConfig::new(Term::Prelim, 30, 30, 40)).is_ok());
        assert!(validate(&TermWeightConfig::new(Term::Finals, 0, 0, 100)).is_ok());
    }

    #[test]
    fn test_weights_not_summing_to_100_rejected() {
        let err = validate(&TermWeightConfig::new(Term::Midterm, 40, 30, 20)).unwrap_err();
        assert_eq!(
            err,
            TermConfigError::WeightSum {
                term: Term::Midterm,
                sum: 90
            }
        );
        assert!(err.to_string().contains("got 90"));
    }

    #[test]
    fn test_negative_weight_rejected_even_when_sum_is_100() {
        let err = validate(&TermWeightConfig::new(Term::Prelim, -50, 50, 100)).unwrap_err();
        assert_eq!(
            err,
            TermConfigError::WeightOutOfRange {
                term: Term::Prelim,
                category: AssessmentCategory::Pt,
                weight: -50,
            }
        );
    }

    #[test]
    fn test_huge_weights_rejected_without_overflow() {
        let config = TermWeightConfig::new(Term::Prelim, i32::MAX, i32::MAX, 102);
        assert_eq!(config.weight_sum(), 2 * i64::from(i32::MAX) + 102);
        assert!(matches!(
            validate(&config),
            Err(TermConfigError::WeightOutOfRange {
                category: AssessmentCategory::Pt,
                ..
            })
        ));
    }

    #[test]
    fn test_one_bad_term_rejects_whole_batch() {
        let configs = [
            TermWeightConfig::new(Term::Prelim, 30, 30, 40),
            TermWeightConfig::new(Term::Midterm, 50, 30, 30),
            TermWeightConfig::new(Term::Finals, 20, 20, 60),
        ];
        assert_eq!(
            validate_all(&configs),
            Err(TermConfigError::WeightSum {
                term: Term::Midterm,
                sum: 110
            })
        );
    }

    #[test]
    fn test_duplicate_term_rejected() {
        let configs = [
            TermWeightConfig::new(Term::Prelim, 30, 30, 40),
            TermWeightConfig::new(Term::Prelim, 30, 30, 40),
        ];
        assert_eq!(
            validate_all(&configs),
            Err(TermConfigError::DuplicateTerm(Term::Prelim))
        );
    }

    #[test]
    fn test_empty_batch_is_valid() {
        assert!(validate_all(&Vec::<TermWeightConfig>::new()).is_ok());
    }

    #[test]
    fn test_non_positive_max_score_rejected() {
        let setups = [setup(
            Term::Prelim,
            (30, 30, 40),
            vec![draft("PT 1", AssessmentCategory::Pt, 0.0)],
        )];
        assert!(matches!(
            validate_setups(&setups),
            Err(TermConfigError::InvalidAssessment { .. })
        ));
    }

    #[test]
    fn test_two_enabled_exams_rejected() {
        let setups = [setup(
            Term::Finals,
            (30, 30, 40),
            vec![
                draft("Final A", AssessmentCategory::Exam, 100.0),
                draft("Final B", AssessmentCategory::Exam, 100.0),
            ],
        )];
        assert_eq!(
            validate_setups(&setups),
            Err(TermConfigError::MultipleExams(Term::Finals))
        );
    }

    #[test]
    fn test_valid_setup_passes() {
        let setups = [setup(
            Term::Prelim,
            (30, 30, 40),
            vec![
                draft("PT 1", AssessmentCategory::Pt, 50.0),
                draft("Quiz 1", AssessmentCategory::Quiz, 20.0),
                draft("Prelim Exam", AssessmentCategory::Exam, 100.0),
            ],
        )];
        assert!(validate_setups(&setups).is_ok());
    }
}
