//! Cause identification: an ordered pipeline of independent extractors whose
//! results are combined into one cause list.

use super::similarity::similarity;
use crate::knowledge::KnowledgeBase;
use crate::lexicon::{KEYWORD_CAUSES, SYSTEM_COMPONENTS};
use regex::Regex;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::collections::HashMap;
use tracing::debug;

/// Textual marker identifying causes produced by the historical scan; the
/// response generator keys off it to pull stored solutions.
pub const HISTORICAL_MARKER: &str = "历史事件";

/// Cause injected when no extractor recognized anything.
pub const FALLBACK_CAUSE: &str = "需要进一步调查：告警信息中未发现已知错误模式";

/// Run every extractor over the alert text and return the union of causes.
/// The list is never empty: a fallback entry is injected when nothing
/// matched. Total over any input; no extractor can fail.
pub fn identify_causes(
    code_patterns: &[Regex],
    error_codes: &HashMap<String, String>,
    knowledge_base: &KnowledgeBase,
    similarity_threshold: f64,
    max_historical_matches: usize,
    alert_text: &str,
) -> Vec<String> {
    let mut causes = Vec::new();

    for code in extract_error_codes(code_patterns, alert_text) {
        if let Some(meaning) = error_codes.get(&code) {
            debug!(code = %code, meaning = %meaning, "recognized error code");
            causes.push(format!("错误码 {}: {}", code, meaning));
        }
    }

    causes.extend(keyword_causes(alert_text));

    let components = components_in(alert_text);
    if !components.is_empty() {
        causes.push(format!("涉及系统组件: {}", components.join(", ")));
    }

    causes.extend(historical_causes(
        knowledge_base,
        similarity_threshold,
        max_historical_matches,
        alert_text,
    ));

    if causes.is_empty() {
        causes.push(FALLBACK_CAUSE.to_string());
    }

    causes
}

/// Extract candidate error codes using every configured pattern and
/// deduplicate the matches. Post-dedup order is ascending by code.
pub fn extract_error_codes(patterns: &[Regex], alert_text: &str) -> Vec<String> {
    let mut codes = BTreeSet::new();

    for pattern in patterns {
        for captures in pattern.captures_iter(alert_text) {
            if let Some(code) = captures.get(1) {
                codes.insert(code.as_str().to_string());
            }
        }
    }

    codes.into_iter().collect()
}

/// Collect cause descriptions for every keyword found in the alert text,
/// in table order. All matches contribute.
pub fn keyword_causes(alert_text: &str) -> Vec<String> {
    let alert_lower = alert_text.to_lowercase();

    KEYWORD_CAUSES
        .iter()
        .filter(|(keyword, _)| alert_lower.contains(&keyword.to_lowercase()))
        .map(|(keyword, description)| format!("关键词分析 - {}: {}", keyword, description))
        .collect()
}

/// Known components mentioned in the alert text, in table order.
pub fn components_in(alert_text: &str) -> Vec<&'static str> {
    let alert_lower = alert_text.to_lowercase();

    SYSTEM_COMPONENTS
        .iter()
        .filter(|component| alert_lower.contains(&component.to_lowercase()))
        .copied()
        .collect()
}

/// Score the alert against every stored incident and report the best
/// matches above the threshold, highest first.
pub fn historical_causes(
    knowledge_base: &KnowledgeBase,
    similarity_threshold: f64,
    max_historical_matches: usize,
    alert_text: &str,
) -> Vec<String> {
    let mut matches: Vec<(f64, &String, &str)> = knowledge_base
        .iter()
        .filter_map(|(id, incident)| {
            let score = similarity(alert_text, &incident.description);
            if score > similarity_threshold {
                Some((score, id, incident.cause.as_str()))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    matches
        .into_iter()
        .take(max_historical_matches)
        .map(|(score, id, cause)| {
            let cause = if cause.is_empty() { "未知原因" } else { cause };
            debug!(incident = %id, score, "historical incident matched");
            format!(
                "{}相似性分析 ({:.2}): 事件 {} - {}",
                HISTORICAL_MARKER, score, id, cause
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::Incident;
    use crate::lexicon::{default_error_codes, ERROR_CODE_PATTERNS};

    fn patterns() -> Vec<Regex> {
        ERROR_CODE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).unwrap())
            .collect()
    }

    #[test]
    fn extracts_labeled_and_bare_codes() {
        let codes = extract_error_codes(&patterns(), "错误码: 10015, error code 10006 and 99999");
        assert_eq!(codes, vec!["10006", "10015", "99999"]);
    }

    #[test]
    fn deduplicates_codes_across_patterns() {
        // "code: 10015" is matched by three patterns but reported once.
        let codes = extract_error_codes(&patterns(), "code: 10015");
        assert_eq!(codes, vec!["10015"]);
    }

    #[test]
    fn no_codes_in_plain_text() {
        assert!(extract_error_codes(&patterns(), "服务响应缓慢").is_empty());
    }

    #[test]
    fn keyword_scan_collects_all_matches() {
        let causes = keyword_causes("MySQL数据库连接超时, CPU占用高");
        assert!(causes.iter().any(|c| c.contains("超时")));
        assert!(causes.iter().any(|c| c.contains("数据库")));
        assert!(causes.iter().any(|c| c.contains("CPU")));
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let causes = keyword_causes("TIMEOUT while calling upstream");
        assert!(causes.iter().any(|c| c.contains("timeout")));
    }

    #[test]
    fn component_scan_uses_table_names() {
        let components = components_in("Redis和MySQL均不可用");
        assert_eq!(components, vec!["mysql", "redis"]);
    }

    #[test]
    fn mapped_code_produces_meaning_cause() {
        let causes = identify_causes(
            &patterns(),
            &default_error_codes(),
            &KnowledgeBase::new(),
            0.6,
            3,
            "错误码: 10015, aladdin连接超时",
        );
        assert!(causes.contains(&"错误码 10015: aladdin服务请求超时".to_string()));
    }

    #[test]
    fn fallback_when_nothing_matches() {
        let causes = identify_causes(
            &patterns(),
            &HashMap::new(),
            &KnowledgeBase::new(),
            0.6,
            3,
            "一切正常",
        );
        assert_eq!(causes, vec![FALLBACK_CAUSE.to_string()]);
    }

    #[test]
    fn empty_input_yields_fallback_only() {
        let causes = identify_causes(
            &patterns(),
            &default_error_codes(),
            &KnowledgeBase::with_defaults(),
            0.6,
            3,
            "",
        );
        assert_eq!(causes, vec![FALLBACK_CAUSE.to_string()]);
    }

    #[test]
    fn historical_scan_reports_near_duplicates() {
        let mut kb = KnowledgeBase::new();
        kb.insert(
            "EVT-7",
            Incident {
                description: "payment gateway timeout during checkout".to_string(),
                cause: "网关连接池耗尽".to_string(),
                ..Default::default()
            },
        );

        let causes = historical_causes(&kb, 0.5, 3, "payment gateway timeout during checkout");
        assert_eq!(causes.len(), 1);
        assert!(causes[0].starts_with(HISTORICAL_MARKER));
        assert!(causes[0].contains("EVT-7"));
        assert!(causes[0].contains("网关连接池耗尽"));
        assert!(causes[0].contains("(1.00)"));
    }

    #[test]
    fn historical_scan_respects_threshold() {
        let kb = KnowledgeBase::with_defaults();
        assert!(historical_causes(&kb, 0.99, 3, "完全无关的内容").is_empty());
    }

    #[test]
    fn raising_max_matches_is_monotonic() {
        let mut kb = KnowledgeBase::new();
        for i in 0..5 {
            kb.insert(
                format!("EVT-{}", i),
                Incident {
                    description: "disk full on broker".to_string(),
                    cause: format!("cause {}", i),
                    ..Default::default()
                },
            );
        }

        let few = historical_causes(&kb, 0.5, 2, "disk full on broker");
        let more = historical_causes(&kb, 0.5, 4, "disk full on broker");
        assert_eq!(few.len(), 2);
        assert_eq!(more.len(), 4);
        for cause in &few {
            assert!(more.contains(cause));
        }
    }

    #[test]
    fn missing_cause_field_degrades_to_unknown() {
        let mut kb = KnowledgeBase::new();
        kb.insert(
            "EVT-8",
            Incident {
                description: "cache node evicted".to_string(),
                ..Default::default()
            },
        );

        let causes = historical_causes(&kb, 0.5, 3, "cache node evicted");
        assert!(causes[0].contains("未知原因"));
    }
}
