//! Residency classification.

use crate::models::Residency;

/// Classifies an employee for contribution purposes.
///
/// Citizens are recognised by an exact nationality match against
/// `citizen_nationality`; otherwise the PR flag decides between
/// permanent resident and foreigner.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::determine_residency;
/// use payroll_engine::models::Residency;
///
/// assert_eq!(determine_residency("Singaporean", false, "Singaporean"), Residency::Citizen);
/// assert_eq!(determine_residency("Malaysian", true, "Singaporean"), Residency::PermanentResident);
/// assert_eq!(determine_residency("Malaysian", false, "Singaporean"), Residency::Foreigner);
/// ```
pub fn determine_residency(nationality: &str, is_pr: bool, citizen_nationality: &str) -> Residency {
    if nationality == citizen_nationality {
        Residency::Citizen
    } else if is_pr {
        Residency::PermanentResident
    } else {
        Residency::Foreigner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_ignores_pr_flag() {
        assert_eq!(
            determine_residency("Singaporean", true, "Singaporean"),
            Residency::Citizen
        );
    }

    #[test]
    fn test_nationality_match_is_exact() {
        assert_eq!(
            determine_residency("singaporean", false, "Singaporean"),
            Residency::Foreigner
        );
    }

    #[test]
    fn test_pr_flag_makes_permanent_resident() {
        assert_eq!(
            determine_residency("Indian", true, "Singaporean"),
            Residency::PermanentResident
        );
    }
}
