//! Immutable English vocabulary shared by the text pipeline: stopword sets,
//! the curated skill vocabulary and a rule-based noun lemmatizer.
//!
//! Built once at startup and handed to each component behind an `Arc`.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

/// Stopwords removed by the normalizer.
const NORMALIZER_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan",
    "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Stopwords excluded by the TF-IDF analyzer.
const TFIDF_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below",
    "beside", "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call",
    "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail",
    "do", "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Known skill phrases, 1-3 tokens each, matched case-insensitively.
const SKILL_VOCABULARY: &[&str] = &[
    "machine learning", "deep learning", "neural networks", "artificial intelligence",
    "python", "r", "java", "c++", "c#", "javascript", "typescript", "ruby", "perl",
    "php", "html", "css", "sql", "nosql", "mongodb", "postgresql", "mysql", "oracle",
    "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "jenkins", "ci/cd",
    "git", "github", "gitlab", "bitbucket", "jira", "confluence", "agile", "scrum",
    "kanban", "waterfall", "devops", "sre", "data science", "data analysis",
    "data engineering", "data visualization", "tableau", "power bi", "excel",
    "pandas", "numpy", "scipy", "scikit-learn", "tensorflow", "pytorch", "keras",
    "nlp", "computer vision", "opencv", "reinforcement learning", "a/b testing",
    "etl", "spark", "hadoop", "hive", "pig", "kafka", "airflow", "luigi",
    "react", "angular", "vue", "node.js", "express", "django", "flask", "spring",
    "hibernate", "asp.net", "rest", "graphql", "soap", "microservices", "serverless",
    "blockchain", "solidity", "smart contracts", "web3", "ethereum", "golang", "rust",
    "swift", "objective-c", "kotlin", "android", "ios", "react native", "flutter",
    "linux", "unix", "windows", "macos", "bash", "powershell", "shell scripting",
    "networking", "tcp/ip", "http", "https", "dns", "load balancing", "nginx", "apache",
    "security", "encryption", "authentication", "authorization", "oauth", "jwt",
    "penetration testing", "vulnerability assessment", "firewall", "vpn",
    "project management", "product management", "leadership", "team management",
    "communication", "presentation", "negotiation", "critical thinking",
    "problem solving", "decision making", "time management", "budgeting",
    "forecasting", "strategic planning", "risk management", "quality assurance",
    "testing", "selenium", "cypress", "jest", "mocha", "pytest", "junit",
    "continuous integration", "continuous deployment", "continuous delivery",
    "data warehousing", "data modeling", "data mining", "business intelligence",
    "machine learning operations", "mlops", "aiops", "devsecops", "cloud computing",
    "saas", "paas", "iaas", "faas", "iot", "embedded systems", "fpga", "vhdl",
    "verilog", "pcb design", "digital signal processing", "control systems",
    "robotics", "automation", "plc", "scada", "hmi", "crm", "salesforce",
    "dynamics", "erp", "sap", "peoplesoft", "workday", "service now",
    "itil", "itsm", "technical writing", "user experience", "user interface",
    "wireframing", "prototyping", "figma", "sketch", "adobe xd", "photoshop",
    "illustrator", "indesign", "after effects", "premiere pro", "final cut",
    "avid", "maya", "blender", "autocad", "revit", "solidworks", "catia",
    "marketing", "digital marketing", "seo", "sem", "ppc", "social media",
    "content creation", "copywriting", "email marketing", "affiliate marketing",
    "analytics", "google analytics", "ab testing", "conversion optimization",
    "customer experience", "customer journey", "user research", "usability testing",
    "accessibility", "wcag", "section 508", "ada compliance", "localization",
    "internationalization", "technical support", "helpdesk", "service desk",
    "incident management", "problem management", "change management",
    "release management", "configuration management", "asset management",
    "procurement", "vendor management", "contract negotiation", "legal",
    "regulatory compliance", "gdpr", "ccpa", "hipaa", "sox", "pci dss",
    "iso 27001", "nist", "cis", "cybersecurity", "intrusion detection",
    "intrusion prevention", "siem", "soar", "dlp", "endpoint protection",
    "mobile device management", "identity management", "privileged access",
    "active directory", "ldap", "kerberos", "biometric authentication",
    "cryptography", "pki", "digital signatures", "distributed ledger",
    "defi", "nft", "cryptocurrency", "bitcoin", "solana", "cardano", "polkadot",
    "avalanche", "consensys",
];

/// Irregular plurals mapped to their lemma. Every value is its own lemma.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("analyses", "analysis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("diagnoses", "diagnosis"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("caches", "cache"),
    ("niches", "niche"),
    ("headaches", "headache"),
    ("avalanches", "avalanche"),
    ("apis", "api"),
    ("kpis", "kpi"),
    ("guis", "gui"),
];

/// Words that end like plurals but are already base forms.
const INVARIANT_WORDS: &[&str] = &[
    "news", "series", "species", "means", "physics", "mathematics", "economics", "statistics",
    "ethics", "politics", "logistics", "electronics", "graphics", "analytics", "robotics",
    "metrics", "kubernetes", "jenkins", "pandas", "always", "perhaps", "towards", "afterwards",
    "various", "previous", "numerous", "status", "campus", "bonus", "corpus", "canvas", "atlas",
    "alias", "bias", "gas", "yes", "sales", "business", "process", "access", "success",
    "address", "express", "progress", "compass", "glass", "class", "dynamics", "devops",
    "mlops", "aiops", "devsecops", "macos", "ios", "kerberos", "redis", "postgres", "aws",
];

/// Process-wide, read-only vocabulary for the text pipeline.
#[derive(Debug, Clone)]
pub struct Lexicon {
    normalizer_stop_words: HashSet<String>,
    tfidf_stop_words: HashSet<String>,
    skills: Vec<String>,
    lemmatizer: Lemmatizer,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::english()
    }
}

impl Lexicon {
    /// The built-in English lexicon.
    pub fn english() -> Self {
        Self::with_custom_skills(Vec::new())
    }

    /// English lexicon with extra skill phrases appended to the vocabulary.
    pub fn with_custom_skills(additional_skills: Vec<String>) -> Self {
        let mut skills: Vec<String> = Vec::with_capacity(SKILL_VOCABULARY.len());
        let mut seen = HashSet::new();
        for skill in SKILL_VOCABULARY
            .iter()
            .map(|s| s.to_string())
            .chain(additional_skills.into_iter().map(|s| s.trim().to_lowercase()))
        {
            if !skill.is_empty() && seen.insert(skill.clone()) {
                skills.push(skill);
            }
        }

        let protected: HashSet<String> = skills
            .iter()
            .flat_map(|s| s.split_whitespace())
            .map(|t| t.to_string())
            .chain(INVARIANT_WORDS.iter().map(|s| s.to_string()))
            .collect();

        Self {
            normalizer_stop_words: NORMALIZER_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            tfidf_stop_words: TFIDF_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            skills,
            lemmatizer: Lemmatizer::new(protected),
        }
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.normalizer_stop_words.contains(token)
    }

    pub fn is_tfidf_stop_word(&self, token: &str) -> bool {
        self.tfidf_stop_words.contains(token)
    }

    /// Skill phrases in vocabulary order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn lemmatize(&self, token: &str) -> String {
        self.lemmatizer.lemmatize(token)
    }
}

/// Noun lemmatizer: irregular table first, then regular plural suffix rules.
///
/// Invariant: `lemmatize(lemmatize(w)) == lemmatize(w)`.
#[derive(Debug, Clone)]
struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    protected: HashSet<String>,
}

impl Lemmatizer {
    fn new(protected: HashSet<String>) -> Self {
        Self {
            irregular: IRREGULAR_LEMMAS.iter().copied().collect(),
            protected,
        }
    }

    fn lemmatize(&self, token: &str) -> String {
        if let Some(lemma) = self.irregular.get(token) {
            return lemma.to_string();
        }
        let stem = self.strip_plural(token);
        // a stripped stem may itself be an irregular plural ("mens" -> "men")
        match self.irregular.get(&*stem) {
            Some(lemma) => lemma.to_string(),
            None => stem.to_string(),
        }
    }

    fn strip_plural<'a>(&self, token: &'a str) -> Cow<'a, str> {
        if self.protected.contains(token) || token.chars().count() <= 3 {
            return Cow::Borrowed(token);
        }
        if token.ends_with("ss") || token.ends_with("us") || token.ends_with("is") {
            return Cow::Borrowed(token);
        }

        if let Some(stem) = token.strip_suffix("ies") {
            if stem.chars().count() >= 2 {
                return Cow::Owned(format!("{stem}y"));
            }
        }
        for suffix in ["sses", "ches", "shes", "xes"] {
            if token.ends_with(suffix) {
                return Cow::Borrowed(&token[..token.len() - 2]);
            }
        }
        Cow::Borrowed(token.strip_suffix('s').unwrap_or(token))
    }
}
