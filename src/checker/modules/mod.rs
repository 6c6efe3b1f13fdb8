//! Import boundaries between independent modules.
//!
//! Every source file belongs to at most one module, the first whose
//! `pattern` matches. An import from that file is resolved to a path below
//! `baseUrl` and must match one of the module's `allowImportsFrom` patterns.
//! Installed packages are governed by `allowExternalImports` instead.

mod resolve;
pub mod violation;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::{IndependentModulesConfig, ModuleDescriptor};
use crate::error::Result;
use crate::filesystem::FileSystem;
use crate::path_utils::{normalize, relative_to, to_slash};
use crate::pattern::{CompiledPattern, PatternItem};
use crate::reference::{
    expand_reusable_patterns, extract_reusable_references, resolve_dirname_references,
    resolve_family_references, resolve_path_references,
};

pub use resolve::{ALIAS_MARKER, FILE_EXTENSIONS, alias_variants, to_base_relative};
pub use violation::ImportViolation;

use resolve::ImportResolver;

struct ModuleRules {
    pattern: CompiledPattern,
    descriptor: ModuleDescriptor,
    /// `allowImportsFrom` with reusable references spliced in.
    allowed: Vec<PatternItem>,
}

/// Validator for `independentModules` rules.
pub struct IndependentModulesChecker<F: FileSystem> {
    fs: F,
    project_root: PathBuf,
    base_root: PathBuf,
    aliases: IndexMap<String, Vec<String>>,
    extensions: Vec<String>,
    modules: Vec<ModuleRules>,
    debug_mode: bool,
}

impl<F: FileSystem> IndependentModulesChecker<F> {
    /// Build a checker. Reusable import patterns are expanded once here.
    ///
    /// # Errors
    /// Returns a configuration error for malformed module patterns or bad
    /// reusable pattern references.
    pub fn new(config: &IndependentModulesConfig, fs: F) -> Result<Self> {
        let project_root = if config.project_root.is_absolute() {
            normalize(&config.project_root)
        } else {
            normalize(&fs.current_dir()?.join(&config.project_root))
        };
        let aliases = config.path_aliases.clone().unwrap_or_default();
        let base_root = normalize(&project_root.join(&aliases.base_url));

        let reusable = expand_reusable_patterns(&config.reusable_import_patterns)?;
        let modules = config
            .modules
            .iter()
            .map(|descriptor| {
                Ok(ModuleRules {
                    pattern: CompiledPattern::new(&descriptor.pattern)?,
                    allowed: extract_reusable_references(
                        &descriptor.allow_imports_from,
                        Some(&reusable),
                    )?,
                    descriptor: descriptor.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fs,
            project_root,
            base_root,
            aliases: aliases.paths,
            extensions: config.extensions.clone(),
            modules,
            debug_mode: config.debug_mode,
        })
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// The module owning `file`, if any.
    #[must_use]
    pub fn module_for(&self, file: &Path) -> Option<&ModuleDescriptor> {
        let filename = relative_to(&self.absolute(file), &self.base_root);
        self.find_module(&filename).map(|rules| &rules.descriptor)
    }

    fn find_module(&self, filename: &str) -> Option<&ModuleRules> {
        self.modules.iter().find(|rules| rules.pattern.is_match(filename))
    }

    /// Check one import specifier written in `file`.
    ///
    /// Each alias expansion of `import` is tried; the import is valid when
    /// any of them is. Otherwise the first expansion's violation is returned.
    ///
    /// # Errors
    /// Returns a configuration error for a malformed allow-pattern.
    pub fn check(&self, file: &Path, import: &str) -> Result<Option<ImportViolation>> {
        let absolute = self.absolute(file);
        let filename = relative_to(&absolute, &self.base_root);
        let Some(module) = self.find_module(&filename) else {
            tracing::debug!(file = %filename, "file belongs to no module");
            return Ok(None);
        };

        let importer_dir = absolute.parent().unwrap_or(self.base_root.as_path());
        let resolver = self.resolver();
        let mut first_violation = None;
        for variant in alias_variants(import, &self.aliases) {
            let target =
                resolver.with_extension(&to_base_relative(&variant, importer_dir, &self.base_root));
            tracing::debug!(import, %target, module = %module.descriptor.name, "resolved import");
            match self.check_target(&resolver, module, &filename, &target)? {
                None => return Ok(None),
                Some(violation) => {
                    first_violation.get_or_insert(violation);
                }
            }
        }
        Ok(first_violation)
    }

    fn check_target(
        &self,
        resolver: &ImportResolver<'_, F>,
        module: &ModuleRules,
        filename: &str,
        target: &str,
    ) -> Result<Option<ImportViolation>> {
        let descriptor = &module.descriptor;

        if !resolver.exists(target) {
            if !resolver.is_external(target) {
                return Ok(Some(ImportViolation::ModuleNotFound));
            }
            if descriptor.allow_external_imports != Some(false)
                || any_match(module.allowed.iter().cloned(), target)?
            {
                return Ok(None);
            }
            return Ok(Some(ImportViolation::ExternalImport {
                module: descriptor.name.clone(),
                error_message: descriptor.error_message.clone(),
                debug: self.debug_text(module, filename, target),
            }));
        }

        let resolved = module
            .allowed
            .iter()
            .map(|item| resolve_item(item, filename, target));
        if any_match(resolved, target)? {
            return Ok(None);
        }
        Ok(Some(ImportViolation::ImportNotAllowed {
            module: descriptor.name.clone(),
            error_message: descriptor.error_message.clone(),
            debug: self.debug_text(module, filename, target),
        }))
    }

    fn debug_text(&self, module: &ModuleRules, filename: &str, target: &str) -> Option<String> {
        if !self.debug_mode {
            return None;
        }
        let patterns: String = module
            .allowed
            .iter()
            .map(|item| {
                let resolved = resolve_item(item, filename, target);
                let json = serde_json::to_string(&resolved).unwrap_or_default();
                format!("{json}\n")
            })
            .collect();
        Some(format!(
            "\n\nFile path   = \"{filename}\"\nImport path = \"{target}\"\n{{family}}    = \"{}\"\n{{dirname}}   = \"{}\"\n\nallowImportsFrom:\n{patterns}\n",
            resolve_family_references("{family}", filename, target),
            resolve_dirname_references("{dirname}", filename),
        ))
    }

    fn resolver(&self) -> ImportResolver<'_, F> {
        ImportResolver {
            fs: &self.fs,
            project_root: &self.project_root,
            base_root: &self.base_root,
            extensions: &self.extensions,
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

fn any_match(items: impl IntoIterator<Item = PatternItem>, target: &str) -> Result<bool> {
    for item in items {
        if item.is_match(target)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// `item` with `./`, `../`, `{dirname}` and `{family}` resolved for the
/// concrete importing file and target.
fn resolve_item(item: &PatternItem, filename: &str, target: &str) -> PatternItem {
    let resolve = |glob: &String| {
        let rebased = rebase(glob, filename);
        resolve_path_references(&rebased, filename, target)
    };
    match item {
        PatternItem::Glob(glob) => PatternItem::Glob(resolve(glob)),
        PatternItem::All(globs) => PatternItem::All(globs.iter().map(resolve).collect()),
    }
}

/// Rebase a `./` or `../` glob onto the importing file's folder.
fn rebase(glob: &str, filename: &str) -> String {
    if !(glob.starts_with("./") || glob.starts_with("../")) {
        return glob.to_string();
    }
    let folder = Path::new(filename).parent().unwrap_or_else(|| Path::new(""));
    to_slash(&normalize(&folder.join(glob)))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
