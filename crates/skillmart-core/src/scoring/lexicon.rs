//! Keyword lists and corpus tokenization for the readiness scorer.
//!
//! Matching is on whole words and whole phrases of the lower-cased corpus, so
//! "ui" matches "ui/ux design" but not "build".

use skillmart_types::profile::ProfileSubmission;

/// Generic professional vocabulary. Each distinct hit is worth 2 points.
pub const PROFESSIONAL_VOCABULARY: &[&str] = &[
    "professional",
    "experience",
    "expertise",
    "expert",
    "quality",
    "deliver",
    "results",
    "strategy",
    "strategic",
    "solution",
    "solutions",
    "project",
    "projects",
    "certified",
    "specialist",
    "proven",
    "collaborate",
    "collaboration",
    "communication",
    "deadline",
    "deadlines",
    "efficient",
    "reliable",
    "detail",
    "process",
    "workflow",
    "consultation",
    "industry",
    "standards",
];

/// Domain-specialty clusters. Only the best-matching cluster counts.
pub const SPECIALTY_CLUSTERS: &[(&str, &[&str])] = &[
    (
        "web development",
        &[
            "react", "javascript", "typescript", "frontend", "backend", "full stack", "api",
            "html", "css", "node", "rust", "database", "responsive",
        ],
    ),
    (
        "design",
        &[
            "figma", "ui", "ux", "branding", "logo", "illustration", "typography", "adobe",
            "wireframe", "prototype", "visual identity",
        ],
    ),
    (
        "marketing",
        &[
            "seo", "social media", "campaign", "content marketing", "conversion", "ads",
            "email marketing", "funnel", "brand awareness", "ppc",
        ],
    ),
    (
        "writing",
        &[
            "copywriting", "copywriter", "blog", "editing", "proofreading", "ghostwriting",
            "technical writing", "articles", "storytelling",
        ],
    ),
    (
        "data",
        &[
            "python", "machine learning", "data analysis", "sql", "visualization",
            "statistics", "dashboards", "analytics", "data science",
        ],
    ),
    (
        "video",
        &[
            "video editing", "animation", "motion graphics", "premiere", "after effects",
            "color grading", "youtube", "storyboard",
        ],
    ),
];

/// Phrases that signal a unique selling proposition.
pub const USP_PHRASES: &[&str] = &[
    "what sets me apart",
    "sets me apart",
    "stand out",
    "unlike",
    "unique",
    "guarantee",
    "guaranteed",
    "specialize",
    "specialized",
    "exclusive",
    "signature",
    "one stop",
];

/// Words that address the client directly.
pub const CLIENT_FOCUS: &[&str] = &[
    "you",
    "your",
    "client",
    "clients",
    "customer",
    "customers",
    "business",
    "businesses",
    "needs",
    "goals",
    "audience",
];

/// Lower-cased, tokenized view over a submission's free text.
#[derive(Debug, Clone)]
pub struct Corpus {
    text: String,
    padded: String,
    words: Vec<String>,
}

impl Corpus {
    pub fn from_submission(submission: &ProfileSubmission) -> Self {
        let text = submission
            .free_text()
            .iter()
            .map(|field| field.trim())
            .filter(|field| !field.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .to_lowercase();
        Self::from_text(text)
    }

    fn from_text(text: String) -> Self {
        let words = tokenize(&text);
        let padded = format!(" {} ", words.join(" "));
        Self {
            text,
            padded,
            words,
        }
    }

    /// Length in characters of the joined free text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Whole-word / whole-phrase containment.
    pub fn contains_term(&self, term: &str) -> bool {
        let needle = format!(" {} ", tokenize(term).join(" "));
        !needle.trim().is_empty() && self.padded.contains(&needle)
    }

    /// Number of distinct terms from `terms` present in the corpus.
    pub fn distinct_matches(&self, terms: &[&str]) -> usize {
        terms.iter().filter(|term| self.contains_term(term)).count()
    }

    /// Total occurrences of single-word terms (used for density).
    pub fn occurrences(&self, words: &[&str]) -> usize {
        self.words
            .iter()
            .filter(|word| words.contains(&word.as_str()))
            .count()
    }

    /// The specialty cluster with the most distinct matches, if any matched.
    /// Ties go to the cluster listed first.
    pub fn best_cluster(&self) -> Option<(&'static str, usize)> {
        let mut best: Option<(&'static str, usize)> = None;
        for &(name, terms) in SPECIALTY_CLUSTERS {
            let hits = self.distinct_matches(terms);
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((name, hits));
            }
        }
        best
    }

    /// Average words per sentence, `None` when there is no text.
    pub fn average_sentence_words(&self) -> Option<usize> {
        let counts: Vec<usize> = self
            .text
            .split(['.', '!', '?', '\n'])
            .map(|sentence| tokenize(sentence).len())
            .filter(|count| *count > 0)
            .collect();
        if counts.is_empty() {
            return None;
        }
        Some(counts.iter().sum::<usize>() / counts.len())
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
