//! Derived feature computation: bucketed categories and address length.
//!
//! Bin assignment is total over the declared ranges. Boundary values belong
//! to the lower-adjacent bin: every bin is `(a, b]` except the first, which
//! is closed on both ends. Values outside the declared ranges abort the run
//! rather than being clamped.

use crate::error::PipelineError;
use crate::table::{display_or_none, AgeGroup, CleanedRecord, DerivedRecord, SalaryCategory};

/// Salary bin edges: low [0, 50000], medium (50000, 70000], high (70000, 100000].
const SALARY_LOW_MAX: f64 = 50_000.0;
const SALARY_MEDIUM_MAX: f64 = 70_000.0;
const SALARY_MAX: f64 = 100_000.0;

/// Age bin edges: the last bin is open-ended.
const AGE_YOUNG_MAX: f64 = 25.0;
const AGE_EARLY_CAREER_MAX: f64 = 35.0;
const AGE_MID_CAREER_MAX: f64 = 45.0;
const AGE_SENIOR_MAX: f64 = 55.0;

/// Bin a salary into its category.
///
/// # Errors
///
/// Fails when `salary` is not a finite value in [0, 100000].
pub fn salary_category(salary: f64, row: usize) -> Result<SalaryCategory, PipelineError> {
    if !salary.is_finite() || !(0.0..=SALARY_MAX).contains(&salary) {
        return Err(PipelineError::Range {
            column: "salary",
            row,
            value: salary,
        });
    }

    Ok(if salary <= SALARY_LOW_MAX {
        SalaryCategory::Low
    } else if salary <= SALARY_MEDIUM_MAX {
        SalaryCategory::Medium
    } else {
        SalaryCategory::High
    })
}

/// Bin an age into its group.
///
/// # Errors
///
/// Fails when `age` is negative or not finite.
pub fn age_group(age: f64, row: usize) -> Result<AgeGroup, PipelineError> {
    if !age.is_finite() || age < 0.0 {
        return Err(PipelineError::Range {
            column: "age",
            row,
            value: age,
        });
    }

    Ok(if age <= AGE_YOUNG_MAX {
        AgeGroup::Young
    } else if age <= AGE_EARLY_CAREER_MAX {
        AgeGroup::EarlyCareer
    } else if age <= AGE_MID_CAREER_MAX {
        AgeGroup::MidCareer
    } else if age <= AGE_SENIOR_MAX {
        AgeGroup::Senior
    } else {
        AgeGroup::Experienced
    })
}

/// Character count of the address cell, rendered with the `None` sentinel.
/// A missing address therefore yields length 4, preserving the observable
/// behavior of the original deployment.
pub fn address_length(address: Option<&str>) -> usize {
    display_or_none(address).chars().count()
}

/// Compute the derived columns for every record, producing the transformed
/// table.
pub fn derive_features(records: &[CleanedRecord]) -> Result<Vec<DerivedRecord>, PipelineError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Ok(DerivedRecord {
                id: record.id,
                name: record.name.clone(),
                age: record.age,
                salary: record.salary,
                hire_date: record.hire_date.clone(),
                department: record.department.clone(),
                bonus: record.bonus,
                address: record.address.clone(),
                phone: record.phone.clone(),
                email: record.email.clone(),
                address_length: address_length(record.address.as_deref()),
                salary_category: salary_category(record.salary, index)?,
                age_group: age_group(record.age, index)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_boundaries_fall_into_the_lower_bin() {
        assert_eq!(salary_category(0.0, 0).unwrap(), SalaryCategory::Low);
        assert_eq!(salary_category(50_000.0, 0).unwrap(), SalaryCategory::Low);
        assert_eq!(
            salary_category(50_000.01, 0).unwrap(),
            SalaryCategory::Medium
        );
        assert_eq!(
            salary_category(70_000.0, 0).unwrap(),
            SalaryCategory::Medium
        );
        assert_eq!(salary_category(70_000.01, 0).unwrap(), SalaryCategory::High);
        assert_eq!(salary_category(100_000.0, 0).unwrap(), SalaryCategory::High);
    }

    #[test]
    fn out_of_range_salary_fails_instead_of_clamping() {
        assert_eq!(salary_category(-1.0, 3).unwrap_err().stage(), "derive");
        assert_eq!(salary_category(100_000.01, 3).unwrap_err().stage(), "derive");
        assert_eq!(salary_category(f64::NAN, 3).unwrap_err().stage(), "derive");
    }

    #[test]
    fn age_boundaries_fall_into_the_lower_bin() {
        assert_eq!(age_group(25.0, 0).unwrap(), AgeGroup::Young);
        assert_eq!(age_group(35.0, 0).unwrap(), AgeGroup::EarlyCareer);
        assert_eq!(age_group(45.0, 0).unwrap(), AgeGroup::MidCareer);
        assert_eq!(age_group(55.0, 0).unwrap(), AgeGroup::Senior);
        assert_eq!(age_group(55.5, 0).unwrap(), AgeGroup::Experienced);
    }

    #[test]
    fn the_top_age_bin_is_open_ended() {
        assert_eq!(age_group(120.0, 0).unwrap(), AgeGroup::Experienced);
    }

    #[test]
    fn negative_age_is_out_of_range() {
        assert_eq!(age_group(-0.5, 2).unwrap_err().stage(), "derive");
    }

    #[test]
    fn address_length_counts_characters() {
        assert_eq!(address_length(Some("Street 40")), 9);
        assert_eq!(address_length(Some("")), 0);
    }

    #[test]
    fn missing_address_yields_the_none_literal_length() {
        assert_eq!(address_length(None), 4);
    }

    #[test]
    fn derive_features_populates_all_three_columns() {
        let record = CleanedRecord {
            id: Some(1),
            name: Some("Alice".to_string()),
            age: 35.0,
            salary: 65_000.0,
            hire_date: None,
            department: "Sales".to_string(),
            bonus: None,
            address: Some("Street 40".to_string()),
            phone: None,
            email: None,
        };
        let derived = derive_features(&[record]).expect("in-range record should derive");

        assert_eq!(derived[0].address_length, 9);
        assert_eq!(derived[0].salary_category, SalaryCategory::Medium);
        // 35 is an upper bin edge and belongs to the lower-adjacent bin.
        assert_eq!(derived[0].age_group, AgeGroup::EarlyCareer);
    }
}
