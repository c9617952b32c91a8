use crate::contract::model::{ExaminationPatch, NewExamination, NewUser, UserPatch};
use crate::domain::error::DomainError;

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() || !email.contains('@') || !email.contains('.') {
        return Err(DomainError::validation(
            "email",
            format!("invalid email address '{}'", email),
        ));
    }
    Ok(())
}

fn validate_skor(skor: f64) -> Result<(), DomainError> {
    if !skor.is_finite() || skor < 0.0 {
        return Err(DomainError::validation("skor", "must be a non-negative number"));
    }
    Ok(())
}

pub fn validate_new_user(new_user: &NewUser) -> Result<(), DomainError> {
    require_text("name", &new_user.name)?;
    validate_email(&new_user.email)
}

pub fn validate_user_patch(patch: &UserPatch) -> Result<(), DomainError> {
    if let Some(ref name) = patch.name {
        require_text("name", name)?;
    }
    if let Some(ref email) = patch.email {
        validate_email(email)?;
    }
    Ok(())
}

pub fn validate_new_examination(exam: &NewExamination) -> Result<(), DomainError> {
    validate_skor(exam.skor)?;
    require_text("jenis_kelamin", &exam.jenis_kelamin)?;
    require_text("alamat", &exam.alamat)?;
    require_text("lama_sakit", &exam.lama_sakit)
}

pub fn validate_examination_patch(patch: &ExaminationPatch) -> Result<(), DomainError> {
    if let Some(skor) = patch.skor {
        validate_skor(skor)?;
    }
    for (field, value) in [
        ("jenis_kelamin", &patch.jenis_kelamin),
        ("alamat", &patch.alamat),
        ("lama_sakit", &patch.lama_sakit),
    ] {
        if let Some(v) = value {
            require_text(field, v)?;
        }
    }
    Ok(())
}
