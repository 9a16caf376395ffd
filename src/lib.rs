/*!
 * # locqa - localization quality assurance
 *
 * A Rust library for checking translated string files and scoring their quality.
 *
 * ## Features
 *
 * - Read and write CSV/TSV tables, XLIFF 1.2 documents and YAML locale files
 * - Detect placeholder, markup, number, glossary, length, whitespace and
 *   punctuation problems in translations
 * - Score a file from 0 to 100 by blending coverage and weighted issues
 * - Fill missing translations through a chain of engines with retries,
 *   fallback and caching
 * - Compare engine candidates for a single string
 * - Text, JSON and CSV reports
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `formats`: Translation units and file formats
 * - `quality`: Issue model, checks, checker and the overall score
 * - `engines`: Translation engines and their orchestration
 * - `report`: QA report rendering
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod engines;
pub mod errors;
pub mod file_utils;
pub mod formats;
pub mod language_utils;
pub mod quality;
pub mod report;

// Re-export main types for easier usage
pub use app_config::Config;
pub use engines::{EngineOrchestrator, EngineRequest, TranslationEngine};
pub use errors::{AppError, EngineError, FormatError};
pub use formats::{FileFormat, TranslationFile, TranslationUnit};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part1_or_part3};
pub use quality::{QualityChecker, QualityResults, calculate_overall_score};
pub use report::{QaReport, ReportFormat};
