//! Folder structure validation.
//!
//! [`FolderStructureChecker`] walks a file path segment by segment against
//! the configured rule tree:
//! - every segment must match a child rule of the same kind (file/folder),
//! - matched nodes may require sibling or child entries to exist,
//! - the whole path may be limited in length.

mod existence;
mod long_path;
pub mod resolver;
pub mod violation;

use std::path::{Path, PathBuf};

use crate::config::{FolderStructureConfig, LongPathsInfo, Rule, RuleRegistry, Structure};
use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::path_utils::{normalize, relative_to};
use crate::pattern::CompiledPattern;
use crate::reference::{
    FOLDER_NAME_REFERENCES, ReferenceContext, RegexCache, RegexParameters, expand, name_parameters,
    name_to_regex, substitute_name_references,
};

pub use violation::{NodeType, StructureViolation};

use existence::{ExistenceRoots, ExistenceTarget, check_existence};
use long_path::check_long_path;
use resolver::{resolve_children, resolve_rule, sort_for_display, unroll_folder_recursion};

/// File names never validated, relative to any folder.
const SKIPPED_FILE_NAMES: [&str; 1] = [crate::cache::CACHE_FILE_NAME];

/// Validator for folder structure rules.
pub struct FolderStructureChecker<F: FileSystem> {
    fs: F,
    project_root: PathBuf,
    /// Structure root relative to the project root, `/`-separated.
    structure_root_display: String,
    structure_root: PathBuf,
    registry: RuleRegistry,
    root: Rule,
    ignore: CompiledPattern,
    long_paths: Option<LongPathsInfo>,
    regex_parameters: RegexParameters,
    regexes: RegexCache,
}

impl<F: FileSystem> FolderStructureChecker<F> {
    /// Build a checker. Recursion limits are unrolled up front.
    ///
    /// # Errors
    /// Returns a configuration error for an invalid ignore pattern, unknown
    /// rule references or an oversized `folderRecursionLimit`.
    pub fn new(config: &FolderStructureConfig, fs: F) -> Result<Self> {
        let project_root = if config.project_root.is_absolute() {
            normalize(&config.project_root)
        } else {
            normalize(&fs.current_dir()?.join(&config.project_root))
        };
        let structure_root = normalize(&project_root.join(&config.structure_root));
        let structure_root_display = relative_to(&structure_root, &project_root);

        let registry = unroll_folder_recursion(&config.rules)?;
        let root_name = structure_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let root = match &config.structure {
            Structure::Children(children) => Rule::folder(&root_name, children.clone()),
            Structure::Root(rule) => Rule {
                name: Some(root_name),
                ..resolve_rule(rule, &registry)?
            },
        };

        Ok(Self {
            fs,
            project_root,
            structure_root_display,
            structure_root,
            registry,
            root,
            ignore: CompiledPattern::new(&config.ignore_patterns)?,
            long_paths: config.long_paths_info.info(),
            regex_parameters: config.regex_parameters.clone(),
            regexes: RegexCache::new(),
        })
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    #[must_use]
    pub fn structure_root(&self) -> &Path {
        &self.structure_root
    }

    /// True when `file` is below the structure root and is not the cache file.
    #[must_use]
    pub fn applies_to(&self, file: &Path) -> bool {
        let absolute = self.absolute(file);
        let skipped = absolute
            .file_name()
            .is_some_and(|name| SKIPPED_FILE_NAMES.iter().any(|skip| name == *skip));
        absolute.starts_with(&self.structure_root) && absolute != self.structure_root && !skipped
    }

    /// Validate one file path (absolute, or relative to the project root).
    ///
    /// # Errors
    /// Returns a configuration error (bad regex, unknown reference, ...).
    /// Validation failures are returned as `Ok(Some(violation))`.
    pub fn validate(&self, file: &Path) -> Result<Option<StructureViolation>> {
        let absolute = self.absolute(file);
        let pathname = relative_to(&absolute, &self.structure_root);

        if self.ignore.is_match(&pathname) {
            tracing::debug!(path = %pathname, "ignored by ignorePatterns");
            return Ok(None);
        }

        if let Some(info) = &self.long_paths
            && let Some(violation) = check_long_path(info, &self.project_root, &absolute)
        {
            return Ok(Some(violation));
        }

        if let Some(required) = &self.root.enforce_existence {
            let root_name = self.root.name.as_deref().unwrap_or_default();
            let target = ExistenceTarget {
                node_name: root_name,
                node_path: "",
                node_type: NodeType::Folder,
                location: self.location(""),
            };
            if let Some(violation) =
                check_existence(&self.fs, &self.existence_roots(), target, required.as_slice())?
            {
                return Ok(Some(violation));
            }
        }

        self.validate_path(&pathname)
    }

    fn validate_path(&self, pathname: &str) -> Result<Option<StructureViolation>> {
        let mut folder = self.root.clone();
        let mut consumed = String::new();
        let mut remaining = pathname;

        loop {
            let children = resolve_children(&folder, &self.registry)?;
            if children.is_empty() {
                return Ok(None);
            }

            let (node_name, rest) = match remaining.split_once('/') {
                Some((name, rest)) => (name, Some(rest)),
                None => (remaining, None),
            };
            let node_type = if rest.is_some() {
                NodeType::Folder
            } else {
                NodeType::File
            };
            let folder_name = folder.name.as_deref().unwrap_or_default();
            let node_path = format!("{consumed}{node_name}");

            let Some(matched) = self.find_child(&children, node_name, node_type, folder_name)?
            else {
                return self
                    .mismatch(&children, node_name, node_type, folder_name, &node_path)
                    .map(Some);
            };

            if let Some(required) = &matched.enforce_existence {
                let target = ExistenceTarget {
                    node_name,
                    node_path: &node_path,
                    node_type,
                    location: self.location(&node_path),
                };
                if let Some(violation) =
                    check_existence(&self.fs, &self.existence_roots(), target, required.as_slice())?
                {
                    return Ok(Some(violation));
                }
            }

            let Some(rest) = rest else {
                return Ok(None);
            };
            let mut next = matched.clone();
            next.name = Some(node_name.to_string());
            folder = next;
            consumed = format!("{node_path}/");
            remaining = rest;
        }
    }

    fn find_child<'r>(
        &self,
        children: &'r [Rule],
        node_name: &str,
        node_type: NodeType,
        folder_name: &str,
    ) -> Result<Option<&'r Rule>> {
        let parameters = name_parameters(&self.regex_parameters, &FOLDER_NAME_REFERENCES, folder_name);
        for child in children {
            let Some(name) = &child.name else { continue };
            if child.is_folder() != (node_type == NodeType::Folder) {
                continue;
            }
            let regex = expand(
                &name_to_regex(name),
                &parameters,
                "name",
                &ReferenceContext::none(),
            )?;
            if self.regexes.is_match(&regex, node_name)? {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    fn mismatch(
        &self,
        children: &[Rule],
        node_name: &str,
        node_type: NodeType,
        folder_name: &str,
        node_path: &str,
    ) -> Result<StructureViolation> {
        let wants_folder = node_type == NodeType::Folder;
        let mut allowed_names: Vec<String> = Vec::new();
        for rule in sort_for_display(children) {
            if rule.is_folder() != wants_folder {
                continue;
            }
            let name = rule.name.as_deref().unwrap_or_default();
            let display = substitute_name_references(name, &FOLDER_NAME_REFERENCES, folder_name);
            if !allowed_names.contains(&display) {
                allowed_names.push(display);
            }
        }

        let location = self.location(node_path);
        tracing::debug!(%location, ?allowed_names, "no matching rule");
        if allowed_names.is_empty() {
            return Ok(StructureViolation::NodeType {
                node_type,
                node_name: node_name.to_string(),
                parent_name: folder_name.to_string(),
                location,
            });
        }
        Ok(StructureViolation::Name {
            node_type,
            node_name: node_name.to_string(),
            allowed_names,
            location,
        })
    }

    fn existence_roots(&self) -> ExistenceRoots<'_> {
        ExistenceRoots {
            project_root: &self.project_root,
            structure_root: &self.structure_root,
        }
    }

    /// Project-relative location of a node given relative to the structure root.
    fn location(&self, node_path: &str) -> String {
        match (self.structure_root_display.as_str(), node_path) {
            ("", path) | (path, "") => path.to_string(),
            (root, path) => format!("{root}/{path}"),
        }
    }

    fn absolute(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            normalize(file)
        } else {
            normalize(&self.project_root.join(file))
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
