//! 导入与成绩的统一汇总

use std::collections::BTreeMap;

use crate::models::grades::entities::StudentTermGrade;
use crate::models::grades::responses::TermGradeReport;
use crate::models::roster::entities::{ImportOutcome, ImportStatus};
use crate::models::roster::responses::{ImportErrorEntry, ImportSummary};
use crate::models::terms::entities::Term;

/// 汇总逐行结果，`imported + skipped + errors.len() == total`
pub fn summarize(outcomes: Vec<ImportOutcome>) -> ImportSummary {
    let mut imported = 0;
    let mut skipped = 0;
    let mut errors = Vec::new();

    for outcome in &outcomes {
        match outcome.status {
            ImportStatus::Imported => imported += 1,
            ImportStatus::Skipped => skipped += 1,
            ImportStatus::Error => errors.push(ImportErrorEntry {
                student_id: outcome.student_id.clone(),
                message: outcome.message.clone(),
            }),
        }
    }

    ImportSummary {
        imported,
        skipped,
        errors,
        total: outcomes.len(),
        detailed_feedback: outcomes,
    }
}

/// 汇总学期成绩，平均值只统计已有成绩的学生
pub fn summarize_grades(term: Term, results: BTreeMap<String, Option<f64>>) -> TermGradeReport {
    let graded: Vec<f64> = results.values().filter_map(|p| *p).collect();
    let average = if graded.is_empty() {
        None
    } else {
        Some(graded.iter().sum::<f64>() / graded.len() as f64)
    };

    let total = results.len();
    let rows = results
        .into_iter()
        .map(|(student_id, percentage)| StudentTermGrade {
            student_id,
            percentage,
        })
        .collect();

    TermGradeReport {
        term,
        graded: graded.len(),
        ungraded: total - graded.len(),
        total,
        average,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_counts() {
        let outcomes = vec![
            ImportOutcome::imported(1, "S1", "Successfully added to course"),
            ImportOutcome::skipped(2, "S1", "Already enrolled in this course"),
            ImportOutcome::error(3, "", "Missing required fields: studentId"),
            ImportOutcome::skipped(4, "S9", "Student not found in database"),
        ];

        let summary = summarize(outcomes.clone());

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].message, "Missing required fields: studentId");
        assert_eq!(summary.total, 4);
        assert_eq!(
            summary.imported + summary.skipped + summary.errors.len(),
            summary.total
        );
        assert_eq!(summary.detailed_feedback, outcomes);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(Vec::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.imported, 0);
        assert!(summary.errors.is_empty());
        assert!(summary.detailed_feedback.is_empty());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = summarize(vec![ImportOutcome::imported(1, "S1", "ok")]);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("detailedFeedback").is_some());
        assert_eq!(json["detailedFeedback"][0]["studentId"], "S1");
        assert_eq!(json["detailedFeedback"][0]["status"], "imported");
    }

    #[test]
    fn test_summarize_grades() {
        let mut results = BTreeMap::new();
        results.insert("S1".to_string(), Some(80.0));
        results.insert("S2".to_string(), None);
        results.insert("S3".to_string(), Some(60.0));

        let report = summarize_grades(Term::Midterm, results);

        assert_eq!(report.term, Term::Midterm);
        assert_eq!(report.graded, 2);
        assert_eq!(report.ungraded, 1);
        assert_eq!(report.total, 3);
        assert_eq!(report.average, Some(70.0));
        assert_eq!(report.rows[1].student_id, "S2");
        assert_eq!(report.rows[1].percentage, None);
    }

    #[test]
    fn test_summarize_grades_nobody_graded() {
        let mut results = BTreeMap::new();
        results.insert("S1".to_string(), None);
        let report = summarize_grades(Term::Finals, results);
        assert_eq!(report.average, None);
        assert_eq!(report.ungraded, 1);
    }
}
