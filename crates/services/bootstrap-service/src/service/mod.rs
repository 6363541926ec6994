//! Service layer - Business logic.

mod seeder;

pub use seeder::{LanguageImport, SeedOptions, SeedReport, Seeder, SkippedLanguage, Tally};
