use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectConfigOpts {
    #[arg(
        long,
        help = "Specify path of the TOML config file (default: <BASE_DIR>/.gentree.toml).",
        value_name = "CONFIG_FILE",
        conflicts_with = "no_config",
        help_heading = "Project Setup"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config",
        help_heading = "Project Setup"
    )]
    pub no_config: bool,
}

/// Presence of `--json-file` / `--mermaid-file` (not just their value) keeps
/// those files out of the output directory.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputLocationOpts {
    #[arg(
        short = 'o',
        long = "output-dir",
        alias = "outputDir",
        value_name = "DIR",
        help = "Directory in which to save output files (default: \"./trees\").",
        help_heading = "Output Control"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        short = 'j',
        long = "json-file",
        alias = "jsonFile",
        value_name = "FILE",
        help = "Path to comments JSON metadata file (default: \"<DIR>/comments.json\").",
        help_heading = "Output Control"
    )]
    pub json_file: Option<PathBuf>,

    #[arg(
        short = 'm',
        long = "mermaid-file",
        alias = "mermaidFile",
        value_name = "FILE",
        help = "Filename for the Mermaid flowchart (default: \"<DIR>/tree.mmd\").",
        help_heading = "Output Control"
    )]
    pub mermaid_file: Option<PathBuf>,

    #[arg(
        long,
        help = "Also print the annotated text tree to standard output.",
        help_heading = "Output Control"
    )]
    pub stdout: bool,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render an annotated directory tree and Mermaid flowchart.",
    long_about = "gen-tree walks a project directory (respecting .gitignore), writes an annotated \ntext tree and a Mermaid flowchart, and keeps per-path comments in a JSON file \nthat survives across runs.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  gen-tree\n  gen-tree ./my-project -o docs/tree\n  gen-tree -j notes/comments.json -m diagram.mmd --stdout"
)]
pub struct Cli {
    #[arg(
        value_name = "BASE_DIR",
        help = "Directory to scan (default: current directory)."
    )]
    pub base_dir: Option<PathBuf>,

    #[clap(flatten)]
    pub output: OutputLocationOpts,

    #[clap(flatten)]
    pub project_config: ProjectConfigOpts,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv, -vvv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}
