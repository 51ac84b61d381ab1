pub mod audit;

pub mod courses;

pub mod grades;

pub mod roster;

pub mod scores;

pub mod students;

pub mod terms;

pub use audit::configure_audit_routes;
pub use courses::configure_courses_routes;
pub use grades::configure_grades_routes;
pub use roster::configure_roster_routes;
pub use scores::configure_scores_routes;
pub use students::configure_students_routes;
pub use terms::configure_terms_routes;
