//! Text processing: normalization, sectioning, skills and TF-IDF scoring

pub mod document;
pub mod keywords;
pub mod lexicon;
pub mod similarity;
pub mod skills;
pub mod text_processor;
pub mod tfidf;

pub use document::{ResumeSections, SectionSegmenter, SectionType};
pub use keywords::KeywordExtractor;
pub use lexicon::Lexicon;
pub use similarity::SimilarityScorer;
pub use skills::{SkillExtractor, SkillSet};
pub use text_processor::TextProcessor;
