use once_cell::sync::Lazy;
use regex::Regex;

static STUDENT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("Invalid student id regex"));

static RFID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9:-]+$").expect("Invalid rfid regex"));

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid course code regex"));

pub fn validate_student_id(student_id: &str) -> Result<(), &'static str> {
    // 学号长度校验：1 <= x <= 32
    if student_id.is_empty() || student_id.len() > 32 {
        return Err("Student ID length must be between 1 and 32 characters");
    }
    if !STUDENT_ID_RE.is_match(student_id) {
        return Err("Student ID must contain only letters, numbers or hyphens");
    }
    Ok(())
}

pub fn validate_person_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be blank");
    }
    if trimmed.chars().count() > 100 {
        return Err("Name must be at most 100 characters");
    }
    Ok(())
}

pub fn validate_middle_initial(middle_initial: &str) -> Result<(), &'static str> {
    // 允许 "M" 或 "M." 这类写法
    let letters = middle_initial.trim().trim_end_matches('.');
    if letters.is_empty() || letters.chars().count() > 3 {
        return Err("Middle initial must be 1 to 3 characters");
    }
    if !letters.chars().all(char::is_alphabetic) {
        return Err("Middle initial must contain only letters");
    }
    Ok(())
}

pub fn validate_rfid(rfid: &str) -> Result<(), &'static str> {
    if rfid.len() < 4 || rfid.len() > 64 {
        return Err("RFID length must be between 4 and 64 characters");
    }
    if !RFID_RE.is_match(rfid) {
        return Err("RFID must contain only letters, numbers, colons or hyphens");
    }
    Ok(())
}

pub fn validate_course_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 || code.len() > 20 {
        return Err("Course code length must be between 2 and 20 characters");
    }
    if !COURSE_CODE_RE.is_match(code) {
        return Err("Course code must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_id() {
        assert!(validate_student_id("2024-00123").is_ok());
        assert!(validate_student_id("S1").is_ok());
        assert!(validate_student_id("").is_err());
        assert!(validate_student_id("S 1").is_err());
        assert!(validate_student_id(&"9".repeat(33)).is_err());
    }

    #[test]
    fn test_person_name() {
        assert!(validate_person_name("Mary Ann").is_ok());
        assert!(validate_person_name("   ").is_err());
        assert!(validate_person_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_middle_initial() {
        assert!(validate_middle_initial("M").is_ok());
        assert!(validate_middle_initial("M.").is_ok());
        assert!(validate_middle_initial(".").is_err());
        assert!(validate_middle_initial("M1").is_err());
    }

    #[test]
    fn test_rfid() {
        assert!(validate_rfid("04:A2:1B:9C").is_ok());
        assert!(validate_rfid("abc").is_err());
        assert!(validate_rfid("04 A2 1B").is_err());
    }

    #[test]
    fn test_course_code() {
        assert!(validate_course_code("MATH-101").is_ok());
        assert!(validate_course_code("M").is_err());
        assert!(validate_course_code("MATH 101").is_err());
    }
}
