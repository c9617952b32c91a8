//! Linear-scan filtering, search and pagination over in-memory listings.

use crate::contract::model::{
    Examination, ExaminationQuery, Page, Role, StaffPatientAssignment, User, UserQuery,
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn search_term(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

pub fn user_matches(user: &User, query: &UserQuery) -> bool {
    if let Some(role) = query.role {
        if user.role != role {
            return false;
        }
    }
    match search_term(query.search.as_deref()) {
        Some(term) => contains_ci(&user.name, &term) || contains_ci(&user.email, &term),
        None => true,
    }
}

/// Keep users matching `query`, preserving relative order.
pub fn filter_users(users: Vec<User>, query: &UserQuery) -> Vec<User> {
    users.into_iter().filter(|u| user_matches(u, query)).collect()
}

pub fn examination_matches(exam: &Examination, query: &ExaminationQuery) -> bool {
    let Some(term) = search_term(query.search.as_deref()) else {
        return true;
    };
    exam.pasien
        .as_ref()
        .is_some_and(|p| contains_ci(&p.name, &term))
        || contains_ci(&exam.lama_sakit, &term)
        || contains_ci(&exam.alamat, &term)
}

pub fn filter_examinations(exams: Vec<Examination>, query: &ExaminationQuery) -> Vec<Examination> {
    exams
        .into_iter()
        .filter(|e| examination_matches(e, query))
        .collect()
}

/// Patients that no assignment in `assignments` links to a staff member yet.
pub fn unassigned_patients(patients: &[User], assignments: &[StaffPatientAssignment]) -> Vec<User> {
    patients
        .iter()
        .filter(|p| p.role == Role::Patient)
        .filter(|p| !assignments.iter().any(|a| a.patient_id == p.id))
        .cloned()
        .collect()
}

/// Slice one 1-based page out of `items`. Page 0 is treated as page 1; a page
/// past the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let page_items = if start >= total_items {
        Vec::new()
    } else {
        let end = (start + per_page).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: page_items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
