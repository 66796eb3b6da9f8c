//! Keyword Extractor: turns a raw job description into a ranked, zoned keyword inventory.
//!
//! Algorithm:
//! 1. Title zone: text after an explicit "Job Title:" marker, else the first non-empty line
//! 2. Body zones: required / responsibilities / nice-to-have markers open a zone that runs
//!    until the next marker; closing headers ("About us", "Benefits") fall back to general
//! 3. Frequency: raw surface-token counts over the whole description
//! 4. Rank: zone weight + saturating frequency + technology bonus, ties by first occurrence
//! 5. Dedupe by stem, truncate, label each survivor with its highest-precedence zone

use std::collections::{BTreeMap, HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::ats::models::{ExtractedKeywords, KeywordPriority};
use crate::ats::policy::{
    zone_rank_weight, DEFAULT_KEYWORD_COUNT, DYNAMIC_COUNT_BASE_WORDS,
    DYNAMIC_COUNT_WORDS_PER_KEYWORD, MAX_DYNAMIC_KEYWORD_COUNT, RANK_FREQUENCY_CAP,
    RANK_FREQUENCY_STEP, RANK_TECHNOLOGY_BONUS, RANK_ZONE_FACTOR,
};
use crate::ats::tokenizer::{stem, tokenize};
use crate::ats::vocabulary::{
    is_action_verb, is_stopword, is_technology, CLOSING_MARKERS, NICE_TO_HAVE_MARKERS,
    REQUIRED_MARKERS, RESPONSIBILITY_MARKERS, SHORT_TECH_TOKENS, TITLE_MARKERS,
};

// ────────────────────────────────────────────────────────────────────────────
// Marker patterns
// ────────────────────────────────────────────────────────────────────────────

fn alternation(markers: &[&str]) -> String {
    let mut sorted: Vec<&str> = markers.to_vec();
    // Longest first so "bonus points" is preferred over "bonus" at the same offset.
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    sorted
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|")
}

fn marker_regex(markers: &[&str]) -> Regex {
    Regex::new(&format!(r"\b(?:{})\b", alternation(markers))).expect("valid zone marker pattern")
}

static TITLE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?m)^[ \t]*(?:{})[ \t]*[:\-][ \t]*(.+)$",
        alternation(TITLE_MARKERS)
    ))
    .expect("valid title marker pattern")
});

/// Zone markers paired with the zone they open. Closing headers open `General`.
static ZONE_MARKERS: Lazy<Vec<(Regex, KeywordPriority)>> = Lazy::new(|| {
    vec![
        (marker_regex(NICE_TO_HAVE_MARKERS), KeywordPriority::NiceToHave),
        (marker_regex(REQUIRED_MARKERS), KeywordPriority::Required),
        (marker_regex(RESPONSIBILITY_MARKERS), KeywordPriority::Responsibilities),
        (marker_regex(CLOSING_MARKERS), KeywordPriority::General),
    ]
});

// ────────────────────────────────────────────────────────────────────────────
// Public entry points
// ────────────────────────────────────────────────────────────────────────────

/// Default keyword budget for a description of `words` words.
///
/// 20 up to 150 words, one more per further 40 words, capped at 35.
pub fn dynamic_keyword_count(words: usize) -> usize {
    let extra = words.saturating_sub(DYNAMIC_COUNT_BASE_WORDS) / DYNAMIC_COUNT_WORDS_PER_KEYWORD;
    (DEFAULT_KEYWORD_COUNT + extra).min(MAX_DYNAMIC_KEYWORD_COUNT)
}

/// Extracts a ranked keyword inventory from a job description.
///
/// `max_count = None` sizes the list from the description's length.
/// Empty or whitespace-only input yields an empty inventory.
pub fn extract_keywords(job_description: &str, max_count: Option<usize>) -> ExtractedKeywords {
    if job_description.trim().is_empty() {
        return ExtractedKeywords::default();
    }

    let lowered = job_description.to_lowercase().replace('\u{2019}', "'");
    let (title_text, body) = split_title(&lowered);
    let segments = split_zones(&body);

    // Raw surface-token stream of the whole description.
    let document_tokens = tokenize(&lowered);
    let limit = max_count.unwrap_or_else(|| dynamic_keyword_count(document_tokens.len()));

    let mut frequency: HashMap<String, u32> = HashMap::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut technologies = Vec::new();
    let mut action_verbs = Vec::new();
    for (position, token) in document_tokens.iter().enumerate() {
        if is_technology(token) && !technologies.contains(token) {
            technologies.push(token.clone());
        }
        if is_action_verb(token) && !action_verbs.contains(token) {
            action_verbs.push(token.clone());
        }
        if is_candidate(token) {
            *frequency.entry(token.clone()).or_insert(0) += 1;
            first_seen.entry(token.clone()).or_insert(position);
        }
    }

    // Best zone per token, plus zone membership for the subset lists.
    let mut best_zone: HashMap<String, KeywordPriority> = HashMap::new();
    let mut zone_members: HashMap<KeywordPriority, HashSet<String>> = HashMap::new();
    let title_tokens: Vec<String> = tokenize(&title_text)
        .into_iter()
        .filter(|t| is_candidate(t))
        .collect();
    let zoned = std::iter::once((KeywordPriority::Title, title_tokens))
        .chain(segments.into_iter().map(|(zone, text)| {
            let tokens: Vec<String> =
                tokenize(&text).into_iter().filter(|t| is_candidate(t)).collect();
            (zone, tokens)
        }));
    for (zone, tokens) in zoned {
        for token in tokens {
            best_zone
                .entry(token.clone())
                .and_modify(|z| *z = (*z).min(zone))
                .or_insert(zone);
            zone_members.entry(zone).or_default().insert(token);
        }
    }

    // Title tokens always count at least once even if tokenization of the
    // title slice differs from the whole-document stream at its edges.
    for token in best_zone.keys() {
        frequency.entry(token.clone()).or_insert(1);
    }

    let mut candidates: Vec<(String, f64, usize)> = frequency
        .iter()
        .map(|(token, freq)| {
            let zone = best_zone.get(token).copied().unwrap_or(KeywordPriority::General);
            let score = rank_score(token, zone, *freq);
            let position = first_seen.get(token).copied().unwrap_or(usize::MAX);
            (token.clone(), score, position)
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.2.cmp(&b.2))
            .then(a.0.cmp(&b.0))
    });

    let mut seen_stems = HashSet::new();
    let all: Vec<String> = candidates
        .into_iter()
        .filter(|(token, _, _)| seen_stems.insert(stem(token)))
        .map(|(token, _, _)| token)
        .take(limit)
        .collect();

    let in_zone = |zone: KeywordPriority| -> Vec<String> {
        zone_members
            .get(&zone)
            .map(|members| all.iter().filter(|k| members.contains(*k)).cloned().collect())
            .unwrap_or_default()
    };

    let keyword_priority: BTreeMap<String, KeywordPriority> = all
        .iter()
        .map(|k| {
            let zone = best_zone.get(k).copied().unwrap_or(KeywordPriority::General);
            (k.clone(), zone)
        })
        .collect();
    let keyword_frequency: BTreeMap<String, u32> = all
        .iter()
        .map(|k| (k.clone(), frequency.get(k).copied().unwrap_or(1).max(1)))
        .collect();

    let extracted = ExtractedKeywords {
        from_title: in_zone(KeywordPriority::Title),
        from_required: in_zone(KeywordPriority::Required),
        from_nice_to_have: in_zone(KeywordPriority::NiceToHave),
        all,
        technologies,
        action_verbs,
        keyword_priority,
        keyword_frequency,
    };

    debug!(
        keywords = extracted.all.len(),
        title = extracted.from_title.len(),
        required = extracted.from_required.len(),
        technologies = extracted.technologies.len(),
        "extracted job description keywords"
    );

    extracted
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Whether a normalized token may become a keyword.
fn is_candidate(token: &str) -> bool {
    if is_stopword(token) || token.chars().all(|c| c.is_numeric()) {
        return false;
    }
    token.chars().count() >= 3 || SHORT_TECH_TOKENS.contains(&token)
}

fn rank_score(token: &str, zone: KeywordPriority, frequency: u32) -> f64 {
    let tech_bonus = if is_technology(token) {
        RANK_TECHNOLOGY_BONUS
    } else {
        0.0
    };
    zone_rank_weight(zone) * RANK_ZONE_FACTOR
        + frequency.min(RANK_FREQUENCY_CAP) as f64 * RANK_FREQUENCY_STEP
        + tech_bonus
}

/// Splits lower-cased text into (title text, remaining body).
fn split_title(lowered: &str) -> (String, String) {
    if let Some(caps) = TITLE_LINE.captures(lowered) {
        if let (Some(line), Some(title)) = (caps.get(0), caps.get(1)) {
            let body = format!("{}\n{}", &lowered[..line.start()], &lowered[line.end()..]);
            return trim_title_at_marker(title.as_str(), body);
        }
    }

    let mut offset = 0;
    for line in lowered.split('\n') {
        let end = offset + line.len();
        if !line.trim().is_empty() {
            let body = lowered.get(end..).unwrap_or("").to_string();
            return trim_title_at_marker(line, body);
        }
        offset = end + 1;
    }
    (String::new(), String::new())
}

/// A title line that already opens a zone ("Backend Engineer - Requirements: ...")
/// keeps only the text before the marker; the rest joins the body.
fn trim_title_at_marker(title: &str, body: String) -> (String, String) {
    let first_marker = ZONE_MARKERS
        .iter()
        .filter_map(|(re, _)| re.find(title).map(|m| m.start()))
        .min();
    match first_marker {
        Some(start) => (
            title[..start].trim().to_string(),
            format!("{}\n{}", &title[start..], body),
        ),
        None => (title.trim().to_string(), body),
    }
}

/// Splits the body into zone segments in document order. Text before the
/// first marker is general.
fn split_zones(body: &str) -> Vec<(KeywordPriority, String)> {
    let mut markers: Vec<(usize, usize, KeywordPriority)> = ZONE_MARKERS
        .iter()
        .flat_map(|(re, zone)| re.find_iter(body).map(move |m| (m.start(), m.end(), *zone)))
        .collect();
    markers.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    // Drop overlapping markers and markers directly continuing a header
    // ("preferred qualifications" is one nice-to-have header).
    let mut kept: Vec<(usize, usize, KeywordPriority)> = Vec::new();
    for marker in markers {
        match kept.last() {
            Some(last) if marker.0 <= last.1 + 1 => {}
            _ => kept.push(marker),
        }
    }

    let mut segments = Vec::with_capacity(kept.len() + 1);
    let first_start = kept.first().map(|m| m.0).unwrap_or(body.len());
    segments.push((KeywordPriority::General, body[..first_start].to_string()));
    for (i, (_, end, zone)) in kept.iter().enumerate() {
        let next_start = kept.get(i + 1).map(|m| m.0).unwrap_or(body.len());
        segments.push((*zone, body[*end..next_start].to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::matcher::match_keywords;

    const BACKEND_JD: &str = "Senior Backend Engineer\n\
        We are building a payments platform.\n\
        Responsibilities: design and build distributed services in Rust.\n\
        Requirements:\n\
        - 5+ years of Rust and PostgreSQL\n\
        - Kubernetes in production, Kubernetes operators\n\
        Nice to have: Kafka, Terraform\n\
        About us: Series B fintech.";

    #[test]
    fn test_empty_input_yields_empty_inventory() {
        assert_eq!(extract_keywords("", None), ExtractedKeywords::default());
        assert_eq!(extract_keywords("   \n\t ", Some(10)), ExtractedKeywords::default());
    }

    #[test]
    fn test_title_zone_from_first_line() {
        let kw = extract_keywords(BACKEND_JD, None);
        assert_eq!(kw.from_title, vec!["senior", "backend", "engineer"]);
        assert_eq!(kw.priority_of("backend"), KeywordPriority::Title);
        assert_eq!(kw.priority_of("senior"), KeywordPriority::Title);
    }

    #[test]
    fn test_explicit_job_title_marker() {
        let jd = "Acme Corp is hiring!\nJob Title: Data Scientist\nRequired: Python, SQL";
        let kw = extract_keywords(jd, None);
        assert_eq!(kw.priority_of("data"), KeywordPriority::Title);
        assert_eq!(kw.priority_of("scientist"), KeywordPriority::Title);
        assert!(!kw.from_title.contains(&"acme".to_string()));
        assert_eq!(kw.priority_of("python"), KeywordPriority::Required);
    }

    #[test]
    fn test_zones_assign_priorities() {
        let kw = extract_keywords(BACKEND_JD, None);
        assert_eq!(kw.priority_of("rust"), KeywordPriority::Required);
        assert_eq!(kw.priority_of("kubernetes"), KeywordPriority::Required);
        assert_eq!(kw.priority_of("kafka"), KeywordPriority::NiceToHave);
        assert_eq!(kw.priority_of("distributed"), KeywordPriority::Responsibilities);
        assert_eq!(kw.priority_of("payments"), KeywordPriority::General);
        // closing header returns to general
        assert_eq!(kw.priority_of("fintech"), KeywordPriority::General);
        assert!(kw.from_required.contains(&"postgresql".to_string()));
        assert!(kw.from_nice_to_have.contains(&"terraform".to_string()));
    }

    #[test]
    fn test_title_precedence_over_required() {
        let jd = "Rust Engineer\nRequirements: Rust, Rust, Rust, Tokio";
        let kw = extract_keywords(jd, None);
        assert_eq!(kw.priority_of("rust"), KeywordPriority::Title);
        assert!(kw.from_required.contains(&"rust".to_string()));
        assert_eq!(kw.frequency_of("rust"), 4);
    }

    #[test]
    fn test_frequency_counts_raw_surface_tokens() {
        let kw = extract_keywords(BACKEND_JD, None);
        assert_eq!(kw.keyword_frequency.get("kubernetes"), Some(&2));
        assert_eq!(kw.keyword_frequency.get("rust"), Some(&2));
    }

    #[test]
    fn test_ranking_title_then_required_first() {
        let kw = extract_keywords(BACKEND_JD, None);
        let pos = |k: &str| kw.all.iter().position(|x| x == k).unwrap();
        assert!(pos("backend") < pos("rust"));
        assert!(pos("rust") < pos("kafka"));
        assert!(pos("kafka") < pos("payments"));
    }

    #[test]
    fn test_stopwords_and_numbers_are_never_keywords() {
        let kw = extract_keywords(BACKEND_JD, None);
        for word in ["the", "and", "years", "requirements", "5"] {
            assert!(!kw.all.contains(&word.to_string()), "'{word}' leaked into keywords");
        }
    }

    #[test]
    fn test_special_characters_normalized() {
        let jd = "C++ Developer\nRequired: C++, Node.js, CI/CD pipelines, C#";
        let kw = extract_keywords(jd, None);
        for token in ["cplusplus", "nodejs", "cicd", "csharp"] {
            assert!(kw.all.contains(&token.to_string()), "missing {token}");
            assert!(kw.technologies.contains(&token.to_string()));
        }
    }

    #[test]
    fn test_short_tech_tokens_allowed() {
        let kw = extract_keywords("Go Engineer\nRequired: Go, JS, AI tooling", None);
        assert!(kw.all.contains(&"go".to_string()));
        assert!(kw.all.contains(&"js".to_string()));
        assert!(kw.all.contains(&"ai".to_string()));
    }

    #[test]
    fn test_max_count_truncates() {
        let kw = extract_keywords(BACKEND_JD, Some(3));
        assert_eq!(kw.all.len(), 3);
        assert!(kw.keyword_priority.len() == 3 && kw.keyword_frequency.len() == 3);
        for k in kw.from_title.iter().chain(&kw.from_required).chain(&kw.from_nice_to_have) {
            assert!(kw.all.contains(k), "zone keyword {k} not in all");
        }
        // vocabulary scans cover the whole description
        assert!(kw.technologies.contains(&"kafka".to_string()));
    }

    #[test]
    fn test_every_keyword_has_priority_and_frequency() {
        let kw = extract_keywords(BACKEND_JD, None);
        for k in &kw.all {
            assert!(kw.keyword_priority.contains_key(k));
            assert!(kw.keyword_frequency.get(k).copied().unwrap_or(0) >= 1);
        }
    }

    #[test]
    fn test_stem_dedup_keeps_higher_ranked_form() {
        // "testing" and "tested" share the stem "test"
        let jd = "Platform Engineer\nRequired: testing pipelines\nEverything must be well tested";
        let kw = extract_keywords(jd, None);
        assert!(kw.all.contains(&"testing".to_string()));
        assert!(!kw.all.contains(&"tested".to_string()));
    }

    #[test]
    fn test_preferred_qualifications_is_one_nice_to_have_header() {
        let jd = "Engineer\nPreferred Qualifications: Kafka\nRequired: Rust";
        let kw = extract_keywords(jd, None);
        assert_eq!(kw.priority_of("kafka"), KeywordPriority::NiceToHave);
        assert_eq!(kw.priority_of("rust"), KeywordPriority::Required);
    }

    #[test]
    fn test_action_verbs_detected() {
        let kw = extract_keywords(BACKEND_JD, None);
        assert!(kw.action_verbs.contains(&"design".to_string()));
        assert!(kw.action_verbs.contains(&"build".to_string()));
    }

    #[test]
    fn test_dynamic_keyword_count_monotonic_and_capped() {
        assert_eq!(dynamic_keyword_count(0), 20);
        assert_eq!(dynamic_keyword_count(150), 20);
        assert_eq!(dynamic_keyword_count(190), 21);
        assert_eq!(dynamic_keyword_count(100_000), 35);
        let mut last = 0;
        for words in (0..2_000).step_by(37) {
            let count = dynamic_keyword_count(words);
            assert!(count >= last);
            last = count;
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let first = extract_keywords(BACKEND_JD, None);
        for _ in 0..10 {
            assert_eq!(extract_keywords(BACKEND_JD, None), first);
        }
    }

    #[test]
    fn test_huge_noisy_description_extracts_and_matches() {
        let chunk = "Requirements: C++ and .NET services\u{0} on Kubernetes, \
            İSTANBUL office \u{7}rust\u{0}postgres ";
        let jd = format!("Senior Platform Engineer\n{}", chunk.repeat(6_000));
        assert!(jd.split_whitespace().count() > 50_000);

        let kw = extract_keywords(&jd, None);
        assert!(!kw.all.is_empty());
        assert!(kw.all.len() <= dynamic_keyword_count(jd.split_whitespace().count()));
        for tech in ["cplusplus", "dotnet", "kubernetes"] {
            assert!(kw.technologies.contains(&tech.to_string()), "missing {tech}");
        }

        let result = match_keywords(&kw.all, &jd);
        assert_eq!(result.matched.len() + result.missing.len(), kw.all.len());
        for tech in ["cplusplus", "dotnet"] {
            if kw.all.contains(&tech.to_string()) {
                assert!(result.matched.contains(&tech.to_string()), "{tech} unmatched");
            }
        }
    }
}
