//! Deterministic risk scoring over extracted page features.
//!
//! Each rule has a fixed weight and a fixed warning message; rules are
//! evaluated in a fixed order so the explanations list is deterministic.
//! A missing feature set (page could not be fetched) short-circuits to a
//! distinct "Unable to analyze" assessment instead of a numeric score.

use crate::models::{RiskAssessment, RiskLevel, SecurityFeatureSet};

/// Warning appended when no contact information was found.
pub const WARN_NO_CONTACT_INFO: &str = "No contact information found (+1)";
/// Warning appended when no social media links were found.
pub const WARN_NO_SOCIAL_MEDIA: &str = "No social media links found (+1)";
/// Warning appended when no footer element was found.
pub const WARN_NO_FOOTER: &str = "No footer found (+1)";
/// Warning appended when no privacy policy or terms link was found.
pub const WARN_NO_PRIVACY_POLICY: &str = "No privacy policy link found (+1)";
/// Warning appended when forms collect sensitive data.
pub const WARN_SENSITIVE_FORMS: &str = "Forms asking for sensitive data (+2)";
/// Warning appended when the site is served over plain HTTP.
pub const WARN_NO_HTTPS: &str = "HTTP used instead of HTTPS (+1)";

/// Explanation used when the page could not be fetched at all.
pub const EXPLANATION_SCRAPE_FAILED: &str = "Failed to scrape the webpage";

/// Calculates a risk assessment from the extracted feature set.
///
/// `None` means the page could not be fetched; the result is then the
/// fixed "Unable to analyze" assessment rather than a numeric score.
/// Otherwise each absent trust signal adds 1 point, sensitive forms add
/// 2, and the accumulated score maps onto low/medium/high thresholds.
pub fn calculate_score(features: Option<&SecurityFeatureSet>) -> RiskAssessment {
    let Some(features) = features else {
        return RiskAssessment {
            score: 0,
            risk_level: RiskLevel::Unknown,
            explanations: vec![EXPLANATION_SCRAPE_FAILED.to_string()],
        };
    };

    let mut score = 0;
    let mut explanations = Vec::new();

    if !features.has_contact_info {
        score += 1;
        explanations.push(WARN_NO_CONTACT_INFO.to_string());
    }

    if !features.has_social_media_link {
        score += 1;
        explanations.push(WARN_NO_SOCIAL_MEDIA.to_string());
    }

    if !features.has_footer {
        score += 1;
        explanations.push(WARN_NO_FOOTER.to_string());
    }

    if !features.has_privacy_policy {
        score += 1;
        explanations.push(WARN_NO_PRIVACY_POLICY.to_string());
    }

    if features.has_sensitive_forms {
        score += 2;
        explanations.push(WARN_SENSITIVE_FORMS.to_string());
    }

    if !features.uses_https {
        score += 1;
        explanations.push(WARN_NO_HTTPS.to_string());
    }

    RiskAssessment {
        score,
        risk_level: RiskLevel::from_score(score),
        explanations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A page with every trust signal present and nothing suspicious.
    fn all_clear() -> SecurityFeatureSet {
        SecurityFeatureSet {
            uses_https: true,
            has_footer: true,
            has_contact_info: true,
            has_sensitive_forms: false,
            has_social_media_link: true,
            has_privacy_policy: true,
        }
    }

    #[test]
    fn test_all_clear_scores_zero() {
        let assessment = calculate_score(Some(&all_clear()));
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert!(assessment.explanations.is_empty());
    }

    #[test]
    fn test_absent_feature_set_is_unable_to_analyze() {
        let assessment = calculate_score(None);
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Unknown);
        assert_eq!(
            assessment.explanations,
            vec![EXPLANATION_SCRAPE_FAILED.to_string()]
        );
    }

    #[test]
    fn test_each_missing_signal_adds_one() {
        for (toggle, warning) in [
            (
                Box::new(|f: &mut SecurityFeatureSet| f.has_contact_info = false)
                    as Box<dyn Fn(&mut SecurityFeatureSet)>,
                WARN_NO_CONTACT_INFO,
            ),
            (
                Box::new(|f: &mut SecurityFeatureSet| f.has_social_media_link = false),
                WARN_NO_SOCIAL_MEDIA,
            ),
            (
                Box::new(|f: &mut SecurityFeatureSet| f.has_footer = false),
                WARN_NO_FOOTER,
            ),
            (
                Box::new(|f: &mut SecurityFeatureSet| f.has_privacy_policy = false),
                WARN_NO_PRIVACY_POLICY,
            ),
            (
                Box::new(|f: &mut SecurityFeatureSet| f.uses_https = false),
                WARN_NO_HTTPS,
            ),
        ] {
            let mut features = all_clear();
            toggle(&mut features);

            let assessment = calculate_score(Some(&features));
            assert_eq!(assessment.score, 1, "expected +1 for {}", warning);
            assert_eq!(assessment.explanations, vec![warning.to_string()]);
        }
    }

    #[test]
    fn test_sensitive_forms_add_two() {
        let mut features = all_clear();
        features.has_sensitive_forms = true;

        let assessment = calculate_score(Some(&features));
        assert_eq!(assessment.score, 2);
        assert_eq!(assessment.explanations, vec![WARN_SENSITIVE_FORMS.to_string()]);
    }

    #[test]
    fn test_worst_case_is_high_risk() {
        let features = SecurityFeatureSet {
            uses_https: false,
            has_footer: false,
            has_contact_info: false,
            has_sensitive_forms: true,
            has_social_media_link: false,
            has_privacy_policy: false,
        };

        let assessment = calculate_score(Some(&features));
        assert_eq!(assessment.score, 7);
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_explanations_preserve_rule_order() {
        let features = SecurityFeatureSet {
            uses_https: false,
            has_footer: false,
            has_contact_info: false,
            has_sensitive_forms: true,
            has_social_media_link: false,
            has_privacy_policy: false,
        };

        let assessment = calculate_score(Some(&features));
        assert_eq!(
            assessment.explanations,
            vec![
                WARN_NO_CONTACT_INFO.to_string(),
                WARN_NO_SOCIAL_MEDIA.to_string(),
                WARN_NO_FOOTER.to_string(),
                WARN_NO_PRIVACY_POLICY.to_string(),
                WARN_SENSITIVE_FORMS.to_string(),
                WARN_NO_HTTPS.to_string(),
            ]
        );
    }

    #[test]
    fn test_medium_risk_band() {
        // Missing contact info, social links, and footer: score 3.
        let features = SecurityFeatureSet {
            uses_https: true,
            has_footer: false,
            has_contact_info: false,
            has_sensitive_forms: false,
            has_social_media_link: false,
            has_privacy_policy: true,
        };

        let assessment = calculate_score(Some(&features));
        assert_eq!(assessment.score, 3);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }
}
