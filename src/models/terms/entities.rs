use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/term.ts")]
pub enum Term {
    Prelim,
    Midterm,
    Finals,
}

impl Term {
    pub const PRELIM: &'static str = "PRELIM";
    pub const MIDTERM: &'static str = "MIDTERM";
    pub const FINALS: &'static str = "FINALS";

    pub fn all() -> &'static [Term] {
        &[Term::Prelim, Term::Midterm, Term::Finals]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Prelim => Self::PRELIM,
            Term::Midterm => Self::MIDTERM,
            Term::Finals => Self::FINALS,
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            Term::PRELIM => Ok(Term::Prelim),
            Term::MIDTERM => Ok(Term::Midterm),
            Term::FINALS => Ok(Term::Finals),
            _ => Err(format!("Invalid term: {s}. Supported: PRELIM, MIDTERM, FINALS")),
        }
    }
}

// 评估类别：定期测验 / 小测 / 考试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/term.ts")]
pub enum AssessmentCategory {
    Pt,
    Quiz,
    Exam,
}

impl AssessmentCategory {
    pub fn all() -> &'static [AssessmentCategory] {
        &[AssessmentCategory::Pt, AssessmentCategory::Quiz, AssessmentCategory::Exam]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentCategory::Pt => "PT",
            AssessmentCategory::Quiz => "QUIZ",
            AssessmentCategory::Exam => "EXAM",
        }
    }
}

impl std::fmt::Display for AssessmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AssessmentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PT" => Ok(AssessmentCategory::Pt),
            "QUIZ" => Ok(AssessmentCategory::Quiz),
            "EXAM" => Ok(AssessmentCategory::Exam),
            _ => Err(format!("Invalid assessment category: {s}")),
        }
    }
}

/// 学期权重配置，三项权重之和必须为 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/term.ts")]
pub struct TermWeightConfig {
    pub term: Term,
    pub pt_weight: i32,
    pub quiz_weight: i32,
    pub exam_weight: i32,
}

impl TermWeightConfig {
    pub fn new(term: Term, pt_weight: i32, quiz_weight: i32, exam_weight: i32) -> Self {
        Self {
            term,
            pt_weight,
            quiz_weight,
            exam_weight,
        }
    }

    // i64 累加，任意 i32 输入都不会溢出
    pub fn weight_sum(&self) -> i64 {
        i64::from(self.pt_weight) + i64::from(self.quiz_weight) + i64::from(self.exam_weight)
    }

    pub fn weight_of(&self, category: AssessmentCategory) -> i32 {
        match category {
            AssessmentCategory::Pt => self.pt_weight,
            AssessmentCategory::Quiz => self.quiz_weight,
            AssessmentCategory::Exam => self.exam_weight,
        }
    }
}

// 评估项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/term.ts")]
pub struct Assessment {
    pub id: i64,
    pub term: Term,
    pub category: AssessmentCategory,
    pub title: String,
    pub max_score: f64,
    pub enabled: bool,
    pub order: i32,
}

/// 评估项的可编辑字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentData {
    pub title: String,
    pub category: AssessmentCategory,
    pub max_score: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub order: i32,
}

fn default_enabled() -> bool {
    true
}

/// 保存学期配置时提交的评估项：新建或更新已有记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentDraft {
    New(AssessmentData),
    Existing {
        id: i64,
        #[serde(flatten)]
        data: AssessmentData,
    },
}

impl AssessmentDraft {
    pub fn data(&self) -> &AssessmentData {
        match self {
            AssessmentDraft::New(data) => data,
            AssessmentDraft::Existing { data, .. } => data,
        }
    }

    pub fn existing_id(&self) -> Option<i64> {
        match self {
            AssessmentDraft::New(_) => None,
            AssessmentDraft::Existing { id, .. } => Some(*id),
        }
    }
}

/// 某课程某学期的完整配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/term.ts")]
pub struct TermSetup {
    pub course_id: i64,
    pub config: TermWeightConfig,
    pub assessments: Vec<Assessment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_parse_is_case_insensitive() {
        assert_eq!("midterm".parse::<Term>(), Ok(Term::Midterm));
        assert_eq!("FINALS".parse::<Term>(), Ok(Term::Finals));
        assert!("summer".parse::<Term>().is_err());
    }

    #[test]
    fn test_term_wire_format() {
        let json = serde_json::to_string(&Term::Prelim).expect("serialize");
        assert_eq!(json, r#""PRELIM""#);
    }

    #[test]
    fn test_draft_tagged_variants() {
        let new: AssessmentDraft = serde_json::from_str(
            r#"{"kind":"new","title":"Quiz 1","category":"QUIZ","max_score":20}"#,
        )
        .expect("new draft");
        assert_eq!(new.existing_id(), None);
        assert!(new.data().enabled);

        let existing: AssessmentDraft = serde_json::from_str(
            r#"{"kind":"existing","id":7,"title":"Exam","category":"EXAM","max_score":100,"enabled":false,"order":2}"#,
        )
        .expect("existing draft");
        assert_eq!(existing.existing_id(), Some(7));
        assert_eq!(existing.data().category, AssessmentCategory::Exam);
        assert!(!existing.data().enabled);
        assert_eq!(existing.data().order, 2);
    }
}
