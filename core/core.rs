pub mod comments;
pub mod config;
pub mod error;
pub mod gather;
pub mod generate;
pub mod ignore_rules;
pub mod output_formats;

pub use comments::CommentMap;
pub use config::{Config, OutputPaths};
pub use error::{AppError, Result};
pub use gather::{Entry, collect, collect_tree};
pub use generate::{GenerateOptions, GenerationReport, generate_tree, root_label};
pub use ignore_rules::{IgnoreMatcher, IgnoreRuleSet};
pub use output_formats::{render_mermaid, render_text};
