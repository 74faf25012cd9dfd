use crate::models::{Category, FlashcardAdvice, PracticeAdvice, ResourceBundle};

// Keyword tables for subject classification. Math is checked first, then
// Programming; anything else is Theory.
const MATH_KEYWORDS: &[&str] = &[
    "calculus",
    "algebra",
    "geometry",
    "trigonometry",
    "probability",
    "statistics",
    "maths",
    "mathematics",
    "differential",
    "integral",
];

const PROGRAMMING_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "coding",
    "programming",
    "data structures",
    "algorithms",
    "machine learning",
    "software",
    "html",
    "css",
    "react",
    "node",
];

/// Key-concept lookup: the first rule whose topic keyword appears in the
/// topic name wins, then the first level override whose keyword appears in
/// the academic level. Kept as data so new subjects are a table row, not a
/// new branch.
struct ConceptRule {
    topic_keywords: &'static [&'static str],
    level_overrides: &'static [(&'static [&'static str], &'static [&'static str])],
    default_terms: &'static [&'static str],
}

const CONCEPT_RULES: &[ConceptRule] = &[
    ConceptRule {
        topic_keywords: &["calculus"],
        level_overrides: &[
            (
                &["class 11", "class 12"],
                &["limits", "derivatives", "applications of derivatives"],
            ),
            (
                &["engineering", "university"],
                &[
                    "differential calculus",
                    "integral calculus",
                    "multivariable calculus",
                ],
            ),
        ],
        default_terms: &["derivatives", "integrals", "limits"],
    },
    ConceptRule {
        topic_keywords: &["algebra"],
        level_overrides: &[(
            &["class 9", "class 10"],
            &["linear equations", "quadratic equations", "polynomials"],
        )],
        default_terms: &["equations", "variables", "functions"],
    },
    ConceptRule {
        topic_keywords: &["shakespeare"],
        level_overrides: &[
            (
                &["class 9", "icse", "cbse"],
                &["Macbeth themes", "character analysis", "plot summary"],
            ),
            (
                &["ma", "literature"],
                &[
                    "critical analysis",
                    "literary devices",
                    "contextual interpretation",
                ],
            ),
        ],
        default_terms: &["themes", "characters", "literary techniques"],
    },
    ConceptRule {
        topic_keywords: &["physics"],
        level_overrides: &[(
            &["class 11", "class 12"],
            &["mechanics", "thermodynamics", "electromagnetism"],
        )],
        default_terms: &["forces", "energy", "motion"],
    },
    ConceptRule {
        topic_keywords: &["chemistry"],
        level_overrides: &[],
        default_terms: &["molecules", "reactions", "bonds"],
    },
    ConceptRule {
        topic_keywords: &["biology"],
        level_overrides: &[],
        default_terms: &["cells", "genetics", "evolution"],
    },
    ConceptRule {
        topic_keywords: &["programming", "coding"],
        level_overrides: &[(
            &["1st year", "beginner"],
            &["syntax", "variables", "loops"],
        )],
        default_terms: &["algorithms", "data structures", "debugging"],
    },
    ConceptRule {
        topic_keywords: &["history"],
        level_overrides: &[],
        default_terms: &["timeline", "causes", "effects"],
    },
    ConceptRule {
        topic_keywords: &["english", "literature"],
        level_overrides: &[],
        default_terms: &["themes", "analysis", "structure"],
    },
];

// Book lookup, same shape as the concept rules
struct BookRule {
    topic_keywords: &'static [&'static str],
    level_overrides: &'static [(&'static [&'static str], &'static str)],
    default_book: &'static str,
}

const BOOK_RULES: &[BookRule] = &[
    BookRule {
        topic_keywords: &["calculus"],
        level_overrides: &[
            (
                &["engineering", "university"],
                "Thomas' Calculus or Stewart's Calculus",
            ),
            (&["class 12", "cbse"], "RD Sharma Class 12 Mathematics"),
        ],
        default_book: "Introduction to Calculus",
    },
    BookRule {
        topic_keywords: &["algebra"],
        level_overrides: &[(&["class 10", "cbse"], "RD Sharma Class 10 Mathematics")],
        default_book: "Elementary Algebra",
    },
    BookRule {
        topic_keywords: &["physics"],
        level_overrides: &[
            (&["class 12", "cbse"], "HC Verma Concepts of Physics"),
            (&["engineering"], "Resnick, Halliday & Walker Physics"),
        ],
        default_book: "Fundamentals of Physics",
    },
    BookRule {
        topic_keywords: &["python"],
        level_overrides: &[],
        default_book: "Automate the Boring Stuff with Python or Python Crash Course",
    },
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Classify a topic into a coarse subject category by keyword containment.
/// Pure and deterministic; no match falls through to Theory.
pub fn classify(topic_name: &str) -> Category {
    let lower = topic_name.to_lowercase();
    if contains_any(&lower, MATH_KEYWORDS) {
        Category::Math
    } else if contains_any(&lower, PROGRAMMING_KEYWORDS) {
        Category::Programming
    } else {
        Category::Theory
    }
}

/// Key terms to focus on, varied by topic keyword and academic level.
pub fn key_concepts(topic_name: &str, academic_level: &str) -> Vec<String> {
    let lower_topic = topic_name.to_lowercase();
    let lower_level = academic_level.to_lowercase();

    for rule in CONCEPT_RULES {
        if !contains_any(&lower_topic, rule.topic_keywords) {
            continue;
        }
        for (level_keywords, terms) in rule.level_overrides {
            if contains_any(&lower_level, level_keywords) {
                return terms.iter().map(|t| t.to_string()).collect();
            }
        }
        return rule.default_terms.iter().map(|t| t.to_string()).collect();
    }

    // Generic fallback built from the topic itself
    vec![lower_topic, "concepts".to_string(), "applications".to_string()]
}

/// A level-appropriate textbook pick for the topic.
pub fn book_suggestion(topic_name: &str, academic_level: &str) -> String {
    let lower_topic = topic_name.to_lowercase();
    let lower_level = academic_level.to_lowercase();

    for rule in BOOK_RULES {
        if !contains_any(&lower_topic, rule.topic_keywords) {
            continue;
        }
        for (level_keywords, book) in rule.level_overrides {
            if contains_any(&lower_level, level_keywords) {
                return book.to_string();
            }
        }
        return rule.default_book.to_string();
    }

    format!("Introduction to {topic_name} or Fundamentals of {topic_name}")
}

/// Build the full suggestion bundle for a topic at an academic level.
/// Static template substitution, pure in its inputs.
pub fn suggest(topic_name: &str, academic_level: &str) -> ResourceBundle {
    let category = classify(topic_name);
    let concepts = key_concepts(topic_name, academic_level);
    let book = book_suggestion(topic_name, academic_level);

    let (how_to_learn, practice, book_advice) = match category {
        Category::Math => (
            vec![
                "Focus on understanding formulas and practicing derivations. Watch videos that solve problems step-by-step.".to_string(),
                format!("Search for \"{topic_name} {academic_level} solved examples\" on YouTube"),
                "Don't just memorize - understand the logic behind each step".to_string(),
            ],
            PracticeAdvice {
                amount: "20-30 problems per day".to_string(),
                sources: vec![
                    format!("Search for \"{topic_name} problem set with solutions\""),
                    format!("Look for \"{topic_name} {academic_level} practice worksheet PDF\""),
                    "Practice is key - solve problems daily to build muscle memory".to_string(),
                ],
            },
            format!(
                "For {academic_level}, common books are \"{book}\". Search for \"engineering mathematics 1 book pdf\" or similar."
            ),
        ),
        Category::Programming => (
            vec![
                "You must code along with the tutorial. Don't just watch.".to_string(),
                format!("Search for \"{topic_name} projects for beginners\" or \"{topic_name} crash course\""),
                "Set up a development environment and practice coding immediately".to_string(),
            ],
            PracticeAdvice {
                amount: "Build 2-3 small projects".to_string(),
                sources: vec![
                    "Solve problems on platforms like HackerRank or LeetCode for this topic".to_string(),
                    format!("Search for \"{topic_name} coding challenges\" or \"{topic_name} mini projects\""),
                    "GitHub has tons of beginner-friendly project ideas".to_string(),
                ],
            },
            "Look for practical books like \"Automate the Boring Stuff with Python\" or \"Head First Java\" depending on your language.".to_string(),
        ),
        Category::Theory => (
            vec![
                "Focus on concepts, definitions, and case studies. Watch documentary-style videos or overview lectures.".to_string(),
                format!("Search for \"{topic_name} {academic_level} concepts explained\" on YouTube"),
                "Create mind maps to connect related concepts".to_string(),
            ],
            PracticeAdvice {
                amount: "Focus on long and short answer questions".to_string(),
                sources: vec![
                    format!("Search for \"{topic_name} important questions\" or \"{topic_name} notes\""),
                    format!("Look for \"{academic_level} {topic_name} question bank PDF\""),
                    "Practice explaining concepts in your own words".to_string(),
                ],
            },
            format!(
                "Look for textbooks by your university's prescribed author. Search for \"{topic_name} textbook pdf\" or \"{academic_level} {topic_name} notes\"."
            ),
        ),
    };

    ResourceBundle {
        category,
        how_to_learn,
        practice,
        book_suggestions: vec![
            book_advice,
            format!("Search for \"{topic_name} {academic_level} textbook PDF\" on Google Scholar"),
            format!("Check your library for books specifically recommended for {academic_level} students"),
        ],
        key_concepts: concepts,
        flashcards: FlashcardAdvice {
            count: "5-7 flashcards".to_string(),
            tool: "Use Anki or Quizlet to create digital flashcards for key terms and definitions"
                .to_string(),
        },
    }
}
