//! Fixed vocabularies. Initialized once per process and never mutated.
//!
//! All entries are stored in their normalized form (see `tokenizer::normalize_text`),
//! so `C++` appears as `cplusplus` and `CI/CD` as `cicd`.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Compound spellings rewritten to a fixed token before punctuation is stripped.
/// Longer spellings come first so `asp.net` wins over `.net`.
pub const COMPOUND_TERMS: &[(&str, &str)] = &[
    ("asp.net", "aspnet"),
    ("node.js", "nodejs"),
    ("react.js", "reactjs"),
    ("vue.js", "vuejs"),
    ("next.js", "nextjs"),
    ("express.js", "expressjs"),
    ("ci/cd", "cicd"),
    ("c++", "cplusplus"),
    ("c#", "csharp"),
    ("f#", "fsharp"),
    (".net", "dotnet"),
];

/// Two-character tokens that still qualify as keywords.
pub const SHORT_TECH_TOKENS: &[&str] = &[
    "go", "js", "ts", "py", "ai", "ml", "ui", "ux", "qa", "db", "s3", "bi", "ci", "cd",
];

const STOPWORD_LIST: &[&str] = &[
    // function words
    "the", "and", "for", "with", "you", "your", "yours", "our", "ours", "we", "us", "will",
    "are", "is", "be", "been", "being", "was", "were", "to", "of", "in", "on", "an", "or",
    "as", "at", "by", "this", "that", "these", "those", "from", "have", "has", "had", "it",
    "its", "their", "they", "them", "who", "whom", "what", "which", "when", "where", "why",
    "how", "about", "into", "onto", "across", "all", "any", "can", "could", "must", "should",
    "would", "may", "might", "also", "etc", "well", "more", "most", "other", "others", "such",
    "than", "then", "through", "via", "per", "not", "but", "if", "so", "do", "does", "did",
    "done", "each", "every", "both", "either", "neither", "own", "out", "up", "down", "over",
    "under", "within", "without", "while", "during", "before", "after", "between", "among",
    "some", "many", "much", "very", "just", "only", "same", "there", "here", "him", "her",
    "his", "she", "he", "me", "my", "i", "am", "no", "nor", "too", "yet", "via", "like",
    // job-ad filler
    "job", "title", "role", "roles", "position", "positions", "candidate", "candidates",
    "company", "companies", "opportunity", "opportunities", "experience", "experienced",
    "years", "year", "yrs", "plus", "strong", "excellent", "good", "great", "ability",
    "abilities", "able", "skills", "skill", "knowledge", "including", "include", "includes",
    "new", "join", "joining", "looking", "seeking", "responsibilities", "responsibility",
    "requirements", "requirement", "required", "qualifications", "qualification",
    "preferred", "nice", "bonus", "desired", "ideal", "ideally", "work", "working", "works",
    "team", "teams", "environment", "help", "helping", "understanding", "familiarity",
    "proficiency", "proficient", "solid", "minimum", "least", "equivalent", "related",
    "relevant", "field", "based", "benefits", "salary", "apply", "applicants", "range",
    "offer", "offers", "ensure", "make", "makes", "get", "using", "use", "used", "want",
    "need", "needs", "day", "days", "time", "full", "part", "remote", "hybrid", "onsite",
    "office", "location", "world", "people", "others", "way", "ways", "one", "two", "three",
];

pub static STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOPWORD_LIST.iter().copied().collect());

/// Canonical term → accepted variants. Table order is lookup order.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("kubernetes", &["k8s", "kube", "eks", "gke", "aks"]),
    ("javascript", &["js", "ecmascript", "es6"]),
    ("typescript", &["ts"]),
    ("python", &["py", "python3"]),
    ("golang", &["go"]),
    ("nodejs", &["node"]),
    ("reactjs", &["react"]),
    ("vuejs", &["vue"]),
    ("postgresql", &["postgres", "psql"]),
    ("mongodb", &["mongo"]),
    ("aws", &["amazon web services", "ec2", "s3", "lambda"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("azure", &["microsoft azure"]),
    ("cicd", &["continuous integration", "continuous delivery", "continuous deployment"]),
    ("ml", &["machine learning"]),
    ("ai", &["artificial intelligence"]),
    ("nlp", &["natural language processing"]),
    ("llm", &["large language model", "large language models"]),
    ("cplusplus", &["cpp"]),
    ("csharp", &["dotnet"]),
    ("docker", &["containerization", "containers"]),
    ("terraform", &["infrastructure as code", "iac"]),
    ("devops", &["site reliability", "sre", "platform engineering"]),
    ("agile", &["scrum", "kanban"]),
    ("testing", &["tdd", "unit tests", "test automation"]),
    ("api", &["apis", "restful", "graphql", "grpc"]),
    ("microservices", &["microservice", "distributed systems", "service oriented"]),
    ("leadership", &["led", "managed", "mentored", "headed"]),
    ("ux", &["user experience"]),
    ("ui", &["user interface"]),
    ("sql", &["mysql", "postgresql", "tsql", "plsql"]),
    ("analytics", &["analysis", "data analysis", "bi"]),
];

const TECHNOLOGY_LIST: &[&str] = &[
    // languages
    "python", "java", "javascript", "typescript", "go", "golang", "rust", "ruby", "php",
    "swift", "kotlin", "scala", "cplusplus", "csharp", "fsharp", "elixir", "haskell", "perl",
    "sql", "nosql", "html", "css", "bash", "powershell", "js", "ts", "py",
    // frameworks and runtimes
    "react", "reactjs", "angular", "vue", "vuejs", "nodejs", "nextjs", "expressjs", "django",
    "flask", "fastapi", "spring", "rails", "dotnet", "aspnet", "graphql", "grpc", "rest",
    "pandas", "numpy", "pytorch", "tensorflow", "keras", "spark", "hadoop", "airflow",
    "jest", "cypress", "selenium", "webpack", "tailwind", "redux",
    // cloud and infra
    "aws", "azure", "gcp", "docker", "kubernetes", "k8s", "terraform", "ansible", "helm",
    "istio", "jenkins", "cicd", "git", "github", "gitlab", "linux", "serverless", "lambda",
    "s3", "ec2", "prometheus", "grafana", "datadog", "nginx",
    // data stores and messaging
    "postgresql", "postgres", "mysql", "mongodb", "redis", "kafka", "rabbitmq",
    "elasticsearch", "snowflake", "dynamodb", "cassandra", "bigquery", "tableau",
    // disciplines
    "ml", "ai", "nlp", "llm", "api", "apis", "microservices", "devops", "sre", "agile",
    "scrum", "jira", "figma", "etl",
];

pub static TECHNOLOGIES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TECHNOLOGY_LIST.iter().copied().collect());

const ACTION_VERB_LIST: &[&str] = &[
    "led", "lead", "managed", "manage", "developed", "develop", "designed", "design", "built",
    "build", "implemented", "implement", "created", "create", "architected", "architect",
    "delivered", "deliver", "launched", "launch", "improved", "improve", "optimized",
    "optimize", "reduced", "reduce", "increased", "increase", "mentored", "mentor",
    "collaborated", "collaborate", "drove", "drive", "owned", "own", "scaled", "scale",
    "automated", "automate", "deployed", "deploy", "migrated", "migrate", "maintained",
    "maintain", "analyzed", "analyze", "coordinated", "coordinate", "established",
    "establish", "spearheaded", "streamlined", "streamline", "shipped", "ship", "partner",
    "partnered", "define", "defined", "evaluate", "evaluated", "research", "researched",
];

pub static ACTION_VERBS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ACTION_VERB_LIST.iter().copied().collect());

// ────────────────────────────────────────────────────────────────────────────
// Zone markers (matched case-insensitively on word boundaries)
// ────────────────────────────────────────────────────────────────────────────

pub const TITLE_MARKERS: &[&str] = &["job title", "position title", "role title"];

pub const REQUIRED_MARKERS: &[&str] = &[
    "minimum qualifications",
    "basic qualifications",
    "qualifications",
    "requirements",
    "required",
    "must have",
    "must-have",
    "what you need",
    "what you'll need",
    "what we're looking for",
    "you have",
];

pub const NICE_TO_HAVE_MARKERS: &[&str] = &[
    "nice to have",
    "nice-to-have",
    "preferred",
    "bonus points",
    "bonus",
    "a plus",
    "pluses",
    "desired",
];

pub const RESPONSIBILITY_MARKERS: &[&str] = &[
    "responsibilities",
    "what you'll do",
    "what you will do",
    "duties",
    "in this role",
    "the role",
];

/// Headers that close whatever zone is open.
pub const CLOSING_MARKERS: &[&str] = &[
    "about us",
    "about the company",
    "about the team",
    "benefits",
    "what we offer",
    "perks",
    "compensation",
    "equal opportunity",
];

// ────────────────────────────────────────────────────────────────────────────
// Role signals, degrees, fields of study
// ────────────────────────────────────────────────────────────────────────────

/// Phrases describing a people-management role. Matched on whole words; a
/// span claimed by a longer phrase is not counted again by a shorter one.
pub const MANAGEMENT_SIGNALS: &[&str] = &[
    "manager",
    "people management",
    "people manager",
    "manage a team",
    "managing a team",
    "manage the team",
    "lead a team",
    "leading a team",
    "build the team",
    "build and grow",
    "grow the team",
    "direct reports",
    "headcount",
    "performance reviews",
    "career growth",
    "career development",
    "director",
    "head of",
    "team of",
];

pub const IC_SIGNALS: &[&str] = &[
    "hands on",
    "individual contributor",
    "write code",
    "writing code",
    "coding",
    "implement",
    "develop",
    "build",
    "debug",
    "code review",
    "code reviews",
    "programming",
    "engineer",
    "developer",
    "scientist",
    "analyst",
    "production code",
    "ship",
];

/// Degree spellings (normalized) and their level: associate 1, bachelor 2, master 3, phd 4.
pub const DEGREE_LEVELS: &[(&str, u8)] = &[
    ("phd", 4),
    ("ph d", 4),
    ("doctorate", 4),
    ("doctoral", 4),
    ("master", 3),
    ("masters", 3),
    ("msc", 3),
    ("ms", 3),
    ("ma", 3),
    ("mba", 3),
    ("meng", 3),
    ("bachelor", 2),
    ("bachelors", 2),
    ("bsc", 2),
    ("bs", 2),
    ("ba", 2),
    ("beng", 2),
    ("btech", 2),
    ("undergraduate", 2),
    ("associate", 1),
    ("associates", 1),
];

/// Spellings that are also ordinary words or abbreviations ("Boston, MA",
/// "MS Teams", "Scrum Master"). In a job description they count only next to
/// a degree context word or another degree spelling.
pub const AMBIGUOUS_DEGREE_SPELLINGS: &[&str] =
    &["master", "ms", "ma", "bs", "ba", "associate", "associates"];

pub const DEGREE_CONTEXT_WORDS: &[&str] =
    &["degree", "degrees", "diploma", "in", "of", "required", "preferred"];

/// Fields of study treated as computing-adjacent for the education field bonus.
pub const STUDY_FIELDS: &[&str] = &[
    "computer science",
    "software engineering",
    "computer engineering",
    "information technology",
    "information systems",
    "electrical engineering",
    "data science",
    "mathematics",
    "statistics",
    "physics",
    "business administration",
    "engineering",
];

/// Variants accepted for `term`: its own variants when canonical, otherwise the
/// canonical term plus its sibling variants. Order follows the table.
pub fn synonyms_for(term: &str) -> Vec<&'static str> {
    let mut out = Vec::new();
    for (canonical, variants) in SYNONYMS {
        if *canonical == term {
            out.extend(variants.iter().copied());
        } else if variants.contains(&term) {
            out.push(*canonical);
            out.extend(variants.iter().copied().filter(|v| *v != term));
        }
    }
    let mut seen = HashSet::new();
    out.retain(|v| *v != term && seen.insert(*v));
    out
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

pub fn is_technology(token: &str) -> bool {
    TECHNOLOGIES.contains(token)
}

pub fn is_action_verb(token: &str) -> bool {
    ACTION_VERBS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_canonical_direction() {
        let variants = synonyms_for("kubernetes");
        assert_eq!(variants[0], "k8s");
        assert!(variants.contains(&"kube"));
    }

    #[test]
    fn test_synonyms_variant_direction_includes_canonical_first() {
        let variants = synonyms_for("k8s");
        assert_eq!(variants[0], "kubernetes");
        assert!(variants.contains(&"kube"));
        assert!(!variants.contains(&"k8s"), "term must not be its own synonym");
    }

    #[test]
    fn test_synonyms_unknown_term_is_empty() {
        assert!(synonyms_for("cobol").is_empty());
    }

    #[test]
    fn test_synonyms_have_no_duplicates() {
        // "postgresql" is both canonical and a variant of "sql"
        let variants = synonyms_for("postgresql");
        let unique: HashSet<_> = variants.iter().collect();
        assert_eq!(unique.len(), variants.len());
        assert!(variants.contains(&"postgres"));
        assert!(variants.contains(&"sql"));
    }

    #[test]
    fn test_vocabularies_are_normalized() {
        for term in TECHNOLOGY_LIST.iter().chain(ACTION_VERB_LIST).chain(STOPWORD_LIST) {
            assert!(
                term.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
                "vocabulary entry '{term}' is not a normalized token"
            );
        }
    }

    #[test]
    fn test_classifiers() {
        assert!(is_stopword("the"));
        assert!(is_stopword("responsibilities"));
        assert!(!is_stopword("kubernetes"));
        assert!(is_technology("cplusplus"));
        assert!(is_action_verb("architected"));
        assert!(!is_action_verb("python"));
    }
}
