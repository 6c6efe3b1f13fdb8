mod composition;
mod loader;
mod model;
mod modules;

pub use composition::{
    AllowOnlySpecifiedSelectors, CustomErrors, ExpressionSelector, FileCompositionConfig,
    FilesRule, PositionIndex, RootSelectorsLimit, Scope, ScopePermission,
    ScopedSelectorPermissions, Selector, SelectorKind, SelectorRule, Sorting,
};
pub use loader::{ConfigFormat, ConfigLoader, FileConfigLoader, LoadableConfig};
pub use model::{
    DEFAULT_MAX_PATH_LENGTH, FolderStructureConfig, LongPathMode, LongPathsInfo, LongPathsSetting,
    OneOrMany, Rule, RuleRegistry, Structure,
};
pub use modules::{DEFAULT_TSCONFIG_PATH, IndependentModulesConfig, ModuleDescriptor, PathAliases};
