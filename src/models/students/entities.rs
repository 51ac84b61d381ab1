use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfid: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// 是否已登记 RFID（加入课程的前置条件）
    pub fn has_rfid(&self) -> bool {
        self.rfid.as_deref().is_some_and(|tag| !tag.trim().is_empty())
    }

    /// 姓, 名 中间名缩写.
    pub fn display_name(&self) -> String {
        match self.middle_initial.as_deref().filter(|m| !m.is_empty()) {
            Some(mi) => format!("{}, {} {}.", self.last_name, self.first_name, mi),
            None => format!("{}, {}", self.last_name, self.first_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(rfid: Option<&str>, middle: Option<&str>) -> Student {
        Student {
            id: 1,
            student_id: "S1".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
            middle_initial: middle.map(str::to_string),
            rfid: rfid.map(str::to_string),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn test_blank_rfid_is_not_registered() {
        assert!(student(Some("04A1B2"), None).has_rfid());
        assert!(!student(Some("   "), None).has_rfid());
        assert!(!student(None, None).has_rfid());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(student(None, Some("M")).display_name(), "Lee, Jo M.");
        assert_eq!(student(None, None).display_name(), "Lee, Jo");
    }
}
