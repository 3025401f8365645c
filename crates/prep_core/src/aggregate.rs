//! Grouped summary statistics over the department column.

use std::collections::BTreeMap;

use crate::table::{CleanedRecord, DepartmentStat};

/// Compute the arithmetic mean of salary and age per department, over the
/// cleaned table (post-imputation values, so the `Unknown` sentinel group
/// participates). Output is sorted lexicographically by department.
pub fn department_stats(records: &[CleanedRecord]) -> Vec<DepartmentStat> {
    let mut groups: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry(record.department.as_str())
            .or_insert((0.0, 0.0, 0));
        entry.0 += record.salary;
        entry.1 += record.age;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(department, (salary_sum, age_sum, count))| DepartmentStat {
            department: department.to_string(),
            average_salary: salary_sum / count as f64,
            average_age: age_sum / count as f64,
        })
        .collect()
}
