use std::cmp::Ordering;

use crate::models::Application;

/// Processing order for allocation: grade descending, then earlier submission,
/// then lower application id. Ungraded applications go last.
pub fn compare_applications(left: &Application, right: &Application) -> Ordering {
    let by_grade = match (left.grade, right.grade) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };

    by_grade
        .then_with(|| left.submitted_at.cmp(&right.submitted_at))
        .then_with(|| left.application_id.cmp(&right.application_id))
}

/// Sort applications into allocation order
pub fn rank(mut applications: Vec<Application>) -> Vec<Application> {
    applications.sort_by(compare_applications);
    applications
}
