use crate::comments::{self, CommentMap};
use crate::config::{Config, OutputPaths, TREE_TEXT_FILENAME};
use crate::error::{AppError, Result};
use crate::gather::collect_tree;
use crate::ignore_rules::IgnoreRuleSet;
use crate::output_formats::{render_mermaid, render_text, write_file};
use log;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub comments_file: PathBuf,
    pub mermaid_file: PathBuf,
    pub default_comments: CommentMap,
    pub extra_ignore_patterns: Vec<String>,
    pub use_gitignore: bool,
}

impl GenerateOptions {
    pub fn new(root: &Path, paths: OutputPaths) -> Self {
        Self {
            root: root.to_path_buf(),
            output_dir: paths.output_dir,
            comments_file: paths.comments_file,
            mermaid_file: paths.mermaid_file,
            default_comments: CommentMap::new(),
            extra_ignore_patterns: Vec::new(),
            use_gitignore: true,
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.default_comments = config.comments.clone();
        self.extra_ignore_patterns = config.ignore.patterns.clone();
        self.use_gitignore = config.ignore.use_gitignore;
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub tree_file: PathBuf,
    pub comments_file: PathBuf,
    pub mermaid_file: PathBuf,
    pub entry_count: usize,
    pub comment_count: usize,
    pub tree_text: String,
}

/// `<last path component>/`, falling back to the full path for roots like `/`.
pub fn root_label(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().trim_end_matches('/').to_string());
    format!("{}/", name)
}

pub fn generate_tree(options: &GenerateOptions) -> Result<GenerationReport> {
    let root = &options.root;
    if !root.is_dir() {
        return Err(AppError::InvalidArgument(format!(
            "Base directory '{}' is not a directory",
            root.display()
        )));
    }
    log::info!("Starting tree generation for: {}", root.display());

    if !options.output_dir.exists() {
        fs::create_dir_all(&options.output_dir).map_err(|e| AppError::DirCreation {
            path: options.output_dir.clone(),
            source: e,
        })?;
        log::debug!("Created output directory {}", options.output_dir.display());
    }

    let comments = comments::load(&options.comments_file, &options.default_comments)?;

    let mut rules = IgnoreRuleSet::baseline();
    if options.use_gitignore {
        rules = rules.with_project_ignore_file(root)?;
    }
    // root is canonical, so compare against the canonical output dir too
    let output_dir = options
        .output_dir
        .canonicalize()
        .unwrap_or_else(|_| options.output_dir.clone());
    let matcher = rules
        .with_patterns("config", options.extra_ignore_patterns.clone())
        .with_output_dir(root, &output_dir)
        .compile(root)?;

    let entries = collect_tree(root, &matcher, &comments)?;
    let label = root_label(root);

    let tree_file = options.output_dir.join(TREE_TEXT_FILENAME);
    let tree_text = render_text(&label, &entries);
    write_file(&tree_file, &tree_text)?;
    log::info!("Tree saved to {}", tree_file.display());

    let comment_count = comments::save(&options.comments_file, &comments)?;
    log::info!("Comments JSON saved to {}", options.comments_file.display());

    write_file(&options.mermaid_file, &render_mermaid(&label, &entries))?;
    log::info!("Mermaid saved to {}", options.mermaid_file.display());

    Ok(GenerationReport {
        tree_file,
        comments_file: options.comments_file.clone(),
        mermaid_file: options.mermaid_file.clone(),
        entry_count: entries.len(),
        comment_count,
        tree_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COMMENTS_FILENAME;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// `folderA/nested.js`, `file1.txt`, and an ignored `.ignoreMe`.
    fn sample_project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("folderA")).unwrap();
        fs::write(dir.path().join("folderA/nested.js"), "console.log(1);").unwrap();
        fs::write(dir.path().join("file1.txt"), "hello").unwrap();
        fs::write(dir.path().join(".gitignore"), ".ignoreMe\n").unwrap();
        fs::write(dir.path().join(".ignoreMe"), "secret").unwrap();
        dir
    }

    fn options_for(root: &Path, output_dir: &str) -> GenerateOptions {
        let paths = Config::default().resolve_output_paths(
            root,
            Some(&PathBuf::from(output_dir)),
            None,
            None,
        );
        GenerateOptions::new(root, paths)
    }

    #[test]
    fn writes_all_three_artifacts() {
        let dir = sample_project();
        let options = options_for(dir.path(), "outTrees");

        let report = generate_tree(&options).unwrap();

        let out = dir.path().join("outTrees");
        assert_eq!(report.tree_file, out.join("tree.txt"));
        assert!(out.join("tree.txt").is_file());
        assert!(out.join("comments.json").is_file());
        assert!(out.join("tree.mmd").is_file());
        assert_eq!(report.entry_count, 3);
    }

    #[test]
    fn sample_project_renders_expected_outputs() {
        let dir = sample_project();
        let options = options_for(dir.path(), "outTrees");
        let label = root_label(dir.path());

        generate_tree(&options).unwrap();

        let out = dir.path().join("outTrees");
        let text = fs::read_to_string(out.join("tree.txt")).unwrap();
        assert_eq!(
            text,
            format!(
                "{}\n├── folderA/\n│   └── nested.js\n└── file1.txt\n",
                label
            )
        );

        let mermaid = fs::read_to_string(out.join("tree.mmd")).unwrap();
        assert!(mermaid.starts_with("flowchart LR\n"));
        assert!(mermaid.contains("folderA --> folderA_nested_js(\"nested.js\")"));
        for artifact in [&text, &mermaid] {
            assert!(!artifact.contains(".ignoreMe"));
            assert!(!artifact.contains("outTrees"));
            assert!(!artifact.contains(".gitignore"));
        }
        assert_eq!(fs::read_to_string(out.join("comments.json")).unwrap(), "{}");
    }

    #[test]
    fn existing_comments_annotate_tree_lines() {
        let dir = sample_project();
        let options = options_for(dir.path(), "outTrees");
        fs::create_dir_all(&options.output_dir).unwrap();
        fs::write(
            options.output_dir.join(COMMENTS_FILENAME),
            r#"{"folderA/": "Feature code", "file1.txt": "", "gone.rs": "Deleted file"}"#,
        )
        .unwrap();

        let report = generate_tree(&options).unwrap();

        assert!(report.tree_text.contains("├── folderA/       # Feature code\n"));
        assert!(report.tree_text.contains("└── file1.txt\n"));
        assert_eq!(report.comment_count, 2);
        assert_eq!(
            fs::read_to_string(&report.comments_file).unwrap(),
            "{\n  \"folderA/\": \"Feature code\",\n  \"gone.rs\": \"Deleted file\"\n}"
        );
    }

    #[test]
    fn second_run_keeps_comments_byte_identical() {
        let dir = sample_project();
        let mut options = options_for(dir.path(), "outTrees");
        options
            .default_comments
            .insert("file1.txt".to_string(), "Greeting".to_string());

        generate_tree(&options).unwrap();
        let first = fs::read_to_string(&options.comments_file).unwrap();
        generate_tree(&options).unwrap();
        let second = fs::read_to_string(&options.comments_file).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn default_output_dir_is_hidden_from_the_tree() {
        let dir = sample_project();
        let paths = Config::default().resolve_output_paths(dir.path(), None, None, None);
        let options = GenerateOptions::new(dir.path(), paths);

        generate_tree(&options).unwrap();
        let report = generate_tree(&options).unwrap();

        assert!(dir.path().join("trees/tree.txt").is_file());
        assert!(!report.tree_text.contains("trees/"));
    }

    #[test]
    fn config_patterns_and_gitignore_toggle_apply() {
        let dir = sample_project();
        fs::write(dir.path().join("debug.log"), "").unwrap();
        let config: Config = toml::from_str(
            "[ignore]\nuse_gitignore = false\npatterns = [\"*.log\"]\n",
        )
        .unwrap();
        let options = options_for(dir.path(), "outTrees").with_config(&config);

        let report = generate_tree(&options).unwrap();

        assert!(report.tree_text.contains(".ignoreMe"));
        assert!(!report.tree_text.contains("debug.log"));
    }

    #[test]
    fn explicit_files_outside_output_dir() {
        let dir = sample_project();
        let mut options = options_for(dir.path(), "outTrees");
        let elsewhere = TempDir::new().unwrap();
        options.comments_file = elsewhere.path().join("notes/comments.json");
        options.mermaid_file = elsewhere.path().join("diagram.mmd");

        let report = generate_tree(&options).unwrap();

        assert!(report.comments_file.is_file());
        assert!(report.mermaid_file.is_file());
        assert!(!options.output_dir.join("comments.json").exists());
    }

    #[test]
    fn missing_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let options = options_for(&dir.path().join("nope"), "out");

        let err = generate_tree(&options).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn root_label_uses_last_component() {
        assert_eq!(root_label(Path::new("/work/my-project")), "my-project/");
        assert_eq!(root_label(Path::new("/")), "/");
    }
}
