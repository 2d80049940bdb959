//! Field rules for update requests.
//!
//! `validator` cannot see through `Patch<T>`, so update DTOs call these
//! through `#[validate(custom(function = "..."))]`. `Unset` and `Null`
//! always pass; a supplied value obeys the same rule as on create.

use validator::ValidationError;

use crate::models::Patch;

pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 255;
pub const CODE_MAX_LENGTH: usize = 50;
pub const COST_CENTER_MAX_LENGTH: usize = 100;

pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_string().into());
    error
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn patch_name(value: &Patch<String>) -> Result<(), ValidationError> {
    match value.value() {
        // Empty text keeps the stored name.
        Some(name) if name.is_empty() => Ok(()),
        Some(name) if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&char_len(name)) => {
            Err(validation_error(
                "name_length",
                "Name must be between 2 and 255 characters",
            ))
        }
        _ => Ok(()),
    }
}

pub fn patch_code(value: &Patch<String>) -> Result<(), ValidationError> {
    match value.value() {
        Some(code) if char_len(code) > CODE_MAX_LENGTH => Err(validation_error(
            "code_length",
            "Code must be at most 50 characters",
        )),
        _ => Ok(()),
    }
}

pub fn patch_cost_center(value: &Patch<String>) -> Result<(), ValidationError> {
    match value.value() {
        Some(cost_center) if char_len(cost_center) > COST_CENTER_MAX_LENGTH => Err(
            validation_error("cost_center_length", "Cost center must be at most 100 characters"),
        ),
        _ => Ok(()),
    }
}

pub fn patch_hierarchy_level(value: &Patch<i32>) -> Result<(), ValidationError> {
    match value.value() {
        Some(level) if *level < 1 => Err(validation_error(
            "hierarchy_level_range",
            "Hierarchy level must be at least 1",
        )),
        _ => Ok(()),
    }
}

pub fn patch_salary(value: &Patch<f64>) -> Result<(), ValidationError> {
    match value.value() {
        Some(salary) if !salary.is_finite() || *salary < 0.0 => Err(validation_error(
            "salary_range",
            "Salary must be a non-negative number",
        )),
        _ => Ok(()),
    }
}
