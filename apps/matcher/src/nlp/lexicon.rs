//! Fixed word lists shared by the extractors and scorers.
//!
//! `TECH_TERMS` is the gazetteer: known technical/domain terms used to recognise skill-like
//! tokens. `DOMAIN_STOPWORDS` are JD/resume filler words that never count as a skill on their
//! own. `ENGLISH_STOPWORDS` back the analyzer's per-token stop flag.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::text::contains_word;

pub const TECH_TERMS: &[&str] = &[
    "python", "java", "javascript", "c++", "c#", "c", "r", "ruby", "php", "swift", "kotlin",
    "golang", "scala", "typescript", "perl", "rust", "dart",
    "react", "react.js", "angular", "vue", "vue.js", "next.js", "ember.js", "svelte", "jquery",
    "backbone.js",
    "spring", "spring boot", "django", "flask", ".net", ".net core", "asp.net", "laravel",
    "ruby on rails", "express.js", "fastapi", "node.js",
    "html", "html5", "css", "css3", "sass", "scss", "less", "tailwind css", "bootstrap",
    "material ui", "vuetify",
    "sql", "mysql", "postgresql", "mssql", "mongodb", "redis", "elasticsearch", "cassandra",
    "oracle", "sqlite", "dynamodb", "firebase", "realm",
    "aws", "azure", "gcp", "google cloud platform", "docker", "kubernetes", "k8s", "terraform",
    "ansible", "jenkins", "git", "svn", "cicd", "ci/cd",
    "machine learning", "ml", "deep learning", "dl", "nlp", "natural language processing",
    "computer vision", "cv",
    "data science", "data analysis", "data engineering", "big data", "spark", "apache spark",
    "hadoop", "kafka", "apache kafka", "airflow", "apache airflow",
    "project management", "agile", "scrum", "kanban", "product management", "business analysis",
    "technical writing", "program management",
    "devops", "sre", "site reliability", "api design", "rest", "restful", "soap", "graphql",
    "microservices", "serverless", "api", "apis",
    "cybersecurity", "network security", "penetration testing", "infosec",
    "information security", "siem", "soc",
    "ui/ux", "ui design", "ux design", "figma", "adobe xd", "sketch", "invision", "user research",
    "wireframing", "prototyping",
    "power bi", "tableau", "qlik", "qlik sense", "data visualization", "linux", "unix",
    "windows server", "macos", "bash", "powershell",
    "jira", "confluence", "trello", "asana", "salesforce", "sap", "oracle fusion", "netsuite",
    "dynamics 365",
    "object-oriented programming", "oop", "functional programming", "data structures",
    "algorithms", "system design",
    "cloud computing", "virtualization", "vmware", "hyper-v", "iot", "blockchain", "rpa",
    "artificial intelligence", "ai",
    "qa", "quality assurance",
];

pub static TECH_TERM_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TECH_TERMS.iter().copied().collect());

pub static DOMAIN_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "experience", "skills", "responsibilities", "requirements", "education", "qualifications",
        "summary", "objective", "profile", "ability", "knowledge", "strong", "excellent", "good",
        "proficient", "demonstrated", "proven", "solid", "deep", "hands-on", "understanding",
        "work", "team", "project", "projects", "role", "company", "client", "clients", "customer",
        "stakeholder", "technology", "technologies", "solution", "solutions", "development",
        "design", "management", "leadership", "strategy", "planning", "analysis", "testing",
        "support", "communication", "problem-solving", "years", "year", "months", "month", "yrs",
        "yr", "including", "such as", "etc", "various", "multiple", "related", "ensure", "provide",
        "required", "essential", "mandator", "preferred", "desired", "plus", "bonus", "background",
        "familiarity", "degree", "certification", "qualification",
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "should", "can", "could", "may", "might", "must",
        "and", "but", "or", "if", "as", "at", "by", "for", "from", "in", "into", "of", "on",
        "onto", "out", "over", "to", "under", "up", "with", "within", "without",
        "activities", "tasks", "duties", "key", "daily", "based", "etc.", "e.g.",
        "responsible for", "looking for", "others", "other", "equivalent", "relevant",
        "appropriate", "applicable", "effective", "efficient", "successful", "timely", "manner",
        "environment", "industry", "field", "area", "domain", "sector", "market", "business",
        "level", "grade", "standard", "quality", "performance", "goals", "objectives", "targets",
        "results", "outcomes", "candidate", "individual", "person", "professional", "expert",
        "specialist", "consultant", "engineer", "developer", "manager", "lead", "senior",
        "junior", "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov",
        "dec", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        "operations", "process", "procedures", "methodologies", "framework", "platform",
        "system", "tool", "function", "aspect", "component", "element", "factor", "item", "part",
        "section", "segment", "type", "kind", "sort", "form", "nature", "variety", "range",
        "scope", "extent", "description", "detail", "information", "overview", "report",
        "statement", "specification", "benefit", "advantage", "opportunity", "challenge",
        "issue", "problem", "concern", "job", "position", "career", "opening", "assignment",
        "engagement", "our", "us", "we", "you", "your", "they", "their", "them", "he", "she",
        "him", "her", "it", "its", "title",
    ]
    .into_iter()
    .collect()
});

/// General English function words; drives the analyzer's `is_stop` flag.
pub static ENGLISH_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "across", "after", "again", "against", "all", "almost", "also",
        "am", "among", "an", "and", "any", "are", "around", "as", "at", "be", "because", "been",
        "before", "being", "below", "between", "both", "but", "by", "can", "could", "did", "do",
        "does", "doing", "down", "during", "each", "either", "else", "enough", "etc", "even",
        "ever", "every", "few", "for", "from", "further", "get", "had", "has", "have", "having",
        "he", "her", "here", "hers", "him", "his", "how", "however", "i", "if", "in", "into",
        "is", "it", "its", "itself", "just", "least", "less", "made", "make", "many", "may",
        "me", "might", "more", "most", "much", "must", "my", "neither", "no", "nor", "not",
        "now", "of", "off", "often", "on", "once", "one", "only", "or", "other", "others", "our",
        "ours", "out", "over", "own", "per", "please", "rather", "same", "several", "she",
        "should", "since", "so", "some", "such", "than", "that", "the", "their", "them", "then",
        "there", "these", "they", "this", "those", "though", "through", "thus", "to", "too",
        "under", "until", "up", "upon", "us", "used", "using", "various", "very", "via", "was",
        "we", "well", "were", "what", "when", "where", "whether", "which", "while", "who",
        "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
        "your", "yours",
    ]
    .into_iter()
    .collect()
});

/// Terms that look name-shaped but never are: products, institutions, places, dates,
/// degree terms, and document-structure words.
pub static NON_NAME_TERMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "visual studio", "microsoft office", "adobe photoshop", "java", "python", "sql", "oracle",
        "sap", "salesforce", "amazon web services", "google cloud", "microsoft azure", "jira",
        "confluence", "autocad", "revit", "solidworks", "github", "gitlab", "bitbucket",
        "jenkins", "docker", "kubernetes",
        "cv", "resume", "curriculum vitae", "experience", "summary", "objective", "profile",
        "highlights", "references", "education", "skills", "contact", "address", "phone",
        "email", "mobile", "telephone", "website", "linkedin", "portfolio", "certification",
        "declaration", "confidential", "personal details", "personal data", "date of birth",
        "nationality", "gender", "marital status", "appendix", "annexure", "hobbies",
        "interests",
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december",
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
        "page", "date", "company", "inc", "ltd", "llc", "gmbh", "pvt", "limited", "corporation",
        "group", "solutions", "technologies", "systems",
        "university", "institute", "college", "school", "department", "faculty", "center",
        "centre", "academy",
        "delhi", "mumbai", "bangalore", "bengaluru", "hyderabad", "chennai", "pune", "kolkata",
        "ahmedabad", "gurgaon", "noida",
        "london", "new york", "san francisco", "paris", "berlin", "singapore", "toronto",
        "dubai", "sydney", "melbourne",
        "bachelor", "master", "phd", "doctorate", "degree", "diploma", "associate", "graduate",
        "postgraduate",
        "report", "details", "application", "submission", "position", "opening", "career",
        "opportunity", "services",
    ]
    .into_iter()
    .collect()
});

pub fn is_tech_term(term: &str) -> bool {
    TECH_TERM_SET.contains(term)
}

/// Whether any gazetteer term occurs as a whole word inside `phrase` (lowercase).
pub fn mentions_tech_term(phrase: &str) -> bool {
    TECH_TERMS.iter().any(|term| contains_word(phrase, term))
}

pub fn is_domain_stopword(term: &str) -> bool {
    DOMAIN_STOPWORDS.contains(term)
}
