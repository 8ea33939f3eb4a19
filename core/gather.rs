use crate::comments::CommentMap;
use crate::error::{AppError, Result};
use crate::ignore_rules::IgnoreMatcher;
use icu_collator::{Collator, CollatorOptions};
use log;
use std::cmp::Ordering;
use std::fs;
use std::path::{Component, Path, PathBuf};

const BRANCH_CONTINUES: &str = "│   ";
const BRANCH_BLANK: &str = "    ";
const CONNECTOR_MIDDLE: &str = "├── ";
const CONNECTOR_LAST: &str = "└── ";

thread_local! {
    static NAME_COLLATOR: Option<Collator> = root_collator();
}

/// One rendered line's worth of metadata for a file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub display_text: String,
    pub comment: String,
    pub is_dir: bool,
    pub relative_path: String,
}

#[derive(Debug)]
struct Child {
    name: String,
    path: PathBuf,
    relative_path: String,
    is_dir: bool,
}

/// Collects the whole tree below `root`.
pub fn collect_tree(
    root: &Path,
    matcher: &IgnoreMatcher,
    comments: &CommentMap,
) -> Result<Vec<Entry>> {
    log::info!("Walking project directory: {}", root.display());
    let entries = collect(root, matcher, comments, &[], root)?;
    log::info!("Directory walk complete. Collected {} entries.", entries.len());
    Ok(entries)
}

/// Lists `directory` depth-first in pre-order.
///
/// `ancestor_flags` holds, for every ancestor level, whether that ancestor
/// still had siblings after it; it drives the `│` continuation bars.
/// Symlinks are classified by their own type and never followed.
pub fn collect(
    directory: &Path,
    matcher: &IgnoreMatcher,
    comments: &CommentMap,
    ancestor_flags: &[bool],
    root: &Path,
) -> Result<Vec<Entry>> {
    let read_dir = fs::read_dir(directory).map_err(|e| AppError::DirRead {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let mut children = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.map_err(|e| AppError::DirRead {
            path: directory.to_path_buf(),
            source: e,
        })?;
        let path = dir_entry.path();
        let is_dir = dir_entry
            .file_type()
            .map_err(|e| AppError::FileRead {
                path: path.clone(),
                source: e,
            })?
            .is_dir();
        let relative_path = relative_posix_path(&path, root);
        if matcher.ignores(&comment_key(&relative_path, is_dir)) {
            log::trace!("Ignoring path: {}", relative_path);
            continue;
        }
        children.push(Child {
            name: dir_entry.file_name().to_string_lossy().into_owned(),
            path,
            relative_path,
            is_dir,
        });
    }

    children.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| compare_names(&a.name, &b.name))
    });

    let prefix: String = ancestor_flags
        .iter()
        .map(|has_more| {
            if *has_more {
                BRANCH_CONTINUES
            } else {
                BRANCH_BLANK
            }
        })
        .collect();

    let total = children.len();
    let mut entries = Vec::with_capacity(total);
    for (idx, child) in children.into_iter().enumerate() {
        let is_last = idx + 1 == total;
        let connector = if is_last { CONNECTOR_LAST } else { CONNECTOR_MIDDLE };
        let comment = comments
            .get(&comment_key(&child.relative_path, child.is_dir))
            .cloned()
            .unwrap_or_default();
        let name = if child.is_dir {
            format!("{}/", child.name)
        } else {
            child.name
        };

        entries.push(Entry {
            display_text: format!("{}{}{}", prefix, connector, name),
            comment,
            is_dir: child.is_dir,
            relative_path: child.relative_path,
        });

        if child.is_dir {
            let mut child_flags = ancestor_flags.to_vec();
            child_flags.push(!is_last);
            entries.extend(collect(&child.path, matcher, comments, &child_flags, root)?);
        }
    }
    Ok(entries)
}

/// Name order within one kind: root-locale collation at tertiary strength,
/// with code point order breaking the remaining ties.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}

fn root_collator() -> Option<Collator> {
    Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|e| log::warn!("Root collator unavailable, sorting names by code point: {}", e))
        .ok()
}

fn comment_key(relative_path: &str, is_dir: bool) -> String {
    if is_dir {
        format!("{}/", relative_path)
    } else {
        relative_path.to_string()
    }
}

fn relative_posix_path(path: &Path, root: &Path) -> String {
    let relative = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    segments.join("/")
}
