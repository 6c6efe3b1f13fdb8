mod common;

use common::TestFixture;
use predicates::prelude::*;
use serde_json::json;

fn module_a_fixture() -> TestFixture {
    let fixture = TestFixture::new();
    fixture.create_json(
        "modules.json",
        &json!({
            "modules": [{
                "name": "Module A",
                "pattern": "moduleA/**",
                "allowImportsFrom": ["./utils/**"],
                "allowExternalImports": false
            }]
        }),
    );
    fixture.touch_all(&[
        "moduleA/index.ts",
        "moduleA/utils/helper.ts",
        "moduleB/api.ts",
        "node_modules/lodash/index.js",
    ]);
    fixture
}

fn aliased_fixture() -> TestFixture {
    let fixture = TestFixture::new();
    fixture.create_json(
        "tsconfig.json",
        &json!({
            "compilerOptions": {
                "baseUrl": ".",
                "paths": { "@shared/*": ["src/shared/*"] }
            }
        }),
    );
    fixture.create_json(
        "modules.json",
        &json!({
            "debugMode": false,
            "reusableImportPatterns": { "shared": ["src/shared/**"] },
            "modules": [{
                "name": "Features",
                "pattern": "src/features/**",
                "allowImportsFrom": ["{shared}", "{family}/**"],
                "errorMessage": "Features may only import shared code."
            }]
        }),
    );
    fixture.touch_all(&[
        "src/features/cart/store.ts",
        "src/features/cart/model.ts",
        "src/features/auth/login.ts",
        "src/shared/button.tsx",
    ]);
    fixture
}

#[test]
fn relative_import_inside_allowed_folder_passes() {
    let fixture = module_a_fixture();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "imports", "--config", "modules.json"])
        .args(["--file", "moduleA/index.ts", "./utils/helper"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 1 checked, 0 problems"));
}

#[test]
fn external_import_is_rejected_when_disallowed() {
    let fixture = module_a_fixture();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "imports", "--config", "modules.json"])
        .args(["--file", "moduleA/index.ts", "lodash", "./utils/helper"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[error]: moduleA/index.ts"))
        .stdout(predicate::str::contains(
            "External imports are not allowed in the module 'Module A'.",
        ))
        .stdout(predicate::str::contains("Summary: 2 checked, 1 problems"));
}

#[test]
fn import_outside_allowed_patterns_is_rejected() {
    let fixture = module_a_fixture();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "imports", "--config", "modules.json"])
        .args(["--file", "moduleA/index.ts", "../moduleB/api"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "This import is not allowed in the module 'Module A'.",
        ));
}

#[test]
fn files_outside_every_module_are_unconstrained() {
    let fixture = module_a_fixture();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["imports", "--config", "modules.json"])
        .args(["--file", "moduleB/api.ts", "lodash", "../moduleA/index"])
        .assert()
        .success();
}

#[test]
fn tsconfig_alias_and_reusable_pattern_resolve() {
    let fixture = aliased_fixture();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["imports", "--config", "modules.json"])
        .args(["--file", "src/features/cart/store.ts"])
        .args(["@shared/button", "./model", "../auth/login"])
        .assert()
        .success();
}

#[test]
fn custom_error_message_replaces_default_text() {
    let fixture = aliased_fixture();
    fixture.touch_all(&["src/app/main.ts"]);

    layout_guard!()
        .current_dir(fixture.path())
        .args(["--color", "never", "imports", "--config", "modules.json"])
        .args(["--file", "src/features/cart/store.ts", "../../app/main"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Features may only import shared code."))
        .stdout(predicate::str::contains("This import is not allowed").not());
}

#[test]
fn unresolvable_import_reports_module_not_found() {
    let fixture = aliased_fixture();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["--format", "json", "imports", "--config", "modules.json"])
        .args(["--file", "src/features/cart/store.ts", "@shared/missing"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"messageId\": \"error\""))
        .stdout(predicate::str::contains("Cannot find module."));
}

#[test]
fn unknown_reusable_pattern_is_a_config_error() {
    let fixture = module_a_fixture();
    fixture.create_json(
        "modules.json",
        &json!({
            "modules": [{
                "name": "Module A",
                "pattern": "moduleA/**",
                "allowImportsFrom": ["{nope}"]
            }]
        }),
    );

    layout_guard!()
        .current_dir(fixture.path())
        .args(["imports", "--config", "modules.json"])
        .args(["--file", "moduleA/index.ts", "./utils/helper"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "The 'nope' key does not exist in the reusableImportPatterns object",
        ));
}
