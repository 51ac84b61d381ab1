use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::Result;
use crate::grading::RosterGateway;
use crate::models::students::entities::Student;
use crate::storage::Storage;

/// 以存储层为后端的花名册网关，写入绑定到单个课程
pub struct StorageRosterGateway {
    storage: Arc<dyn Storage>,
    course_id: i64,
}

impl StorageRosterGateway {
    pub fn new(storage: Arc<dyn Storage>, course_id: i64) -> Self {
        Self { storage, course_id }
    }
}

#[async_trait]
impl RosterGateway for StorageRosterGateway {
    async fn find_student(&self, student_id: &str) -> Result<Option<Student>> {
        self.storage.get_student_by_student_id(student_id).await
    }

    async fn enroll_student(&self, student: &Student) -> Result<()> {
        self.storage
            .enroll_student(self.course_id, &student.student_id)
            .await
    }
}
