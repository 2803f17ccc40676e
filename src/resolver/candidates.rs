//! Candidate paths for each artifact kind.
//!
//! Every list comes out in probe priority order. Layouts are tried from most
//! to least specific (`<platform>/lib/<engine>`, `<platform>/engines/<engine>`,
//! `<platform>/<engine>`), and engine spellings from the platform-specific one
//! down to the common or global variant. An empty engine or component name
//! produces no candidates.

use crate::component::Component;
use crate::taxonomy::{
    COMMON_SUFFIX, EXT_SUFFIX, Engine, GLOBAL_SUFFIX, PlatformKind, SharedNesting,
    TESTING_LIBRARY_DIR, TestKind, join_segments,
};

const LAYOUTS: [&str; 3] = ["lib", "engines", ""];
const TEMPLATE_TREE: &str = "addon/templates/components";
const SCRIPT_TREE: &str = "addon/components";
const STYLE_TREES: [&str; 2] = ["addon/styles/components", "app/styles/components"];
const EXTENDED_TEST_ROOT: &str = "extended/tests";

pub fn template_candidates(platform: &PlatformKind, component: &Component) -> Vec<String> {
    artifact_candidates(platform, component, TEMPLATE_TREE, "hbs")
}

pub fn script_candidates(platform: &PlatformKind, component: &Component) -> Vec<String> {
    artifact_candidates(platform, component, SCRIPT_TREE, "js")
}

/// Test files, unit before integration before acceptance, and within each
/// kind the testing library root before `extended/tests`.
pub fn test_candidates(platform: &PlatformKind, component: &Component) -> Vec<String> {
    if !is_informative(component) {
        return Vec::new();
    }

    let qualifier = if *platform == PlatformKind::Core {
        "core"
    } else {
        "ext"
    };
    let file_names = [
        format!("{}-test.js", component.name),
        format!("{}-{qualifier}-test.js", component.name),
    ];
    let testing_root = format!("core/lib/{TESTING_LIBRARY_DIR}/tests");
    let engine_dir = component.engine.directory("");

    let mut candidates = Vec::new();
    for kind in TestKind::ALL {
        for root in [testing_root.as_str(), EXTENDED_TEST_ROOT] {
            let dir = join_segments([
                root,
                kind.as_str(),
                "components",
                engine_dir.as_str(),
                component.path_remainder.as_str(),
            ]);
            for file_name in &file_names {
                candidates.push(format!("{dir}/{file_name}"));
            }
        }
    }
    candidates
}

/// Directories whose children are scanned for the component's style sheets.
pub fn style_directories(platform: &PlatformKind, component: &Component) -> Vec<String> {
    if !is_informative(component) {
        return Vec::new();
    }

    let mut engine_dirs = vec![
        component.engine.platform_directory(platform),
        component.engine.directory(""),
        component.engine.directory(GLOBAL_SUFFIX),
    ];
    engine_dirs.extend(shared_siblings(&component.engine));

    let mut dirs = Vec::new();
    for engine_dir in dedup(engine_dirs) {
        for layout in LAYOUTS {
            let prefix = join_segments([platform.as_str(), layout, engine_dir.as_str()]);
            for tree in STYLE_TREES {
                dirs.push(join_segments([
                    prefix.as_str(),
                    tree,
                    component.path_remainder.as_str(),
                ]));
            }
        }
    }
    dedup(dirs)
}

/// File name suffix a style sheet must end with. Prefixed names such as
/// `product-card.scss` also match `card`.
pub fn style_suffix(component: &Component) -> String {
    format!("{}.scss", component.name)
}

fn artifact_candidates(
    platform: &PlatformKind,
    component: &Component,
    tree: &str,
    ext: &str,
) -> Vec<String> {
    if !is_informative(component) {
        return Vec::new();
    }

    let file_name = format!("{}.{ext}", component.name);
    let engine_dirs = dedup(vec![
        component.engine.platform_directory(platform),
        component.engine.directory(""),
        component.engine.directory(COMMON_SUFFIX),
    ]);

    let mut candidates = Vec::new();
    for engine_dir in &engine_dirs {
        for layout in LAYOUTS {
            candidates.push(join_segments([
                platform.as_str(),
                layout,
                engine_dir.as_str(),
                tree,
                component.path_remainder.as_str(),
                file_name.as_str(),
            ]));
        }
    }
    candidates
}

// `shared` engines keep their styles in sibling `shared` and `shared-ext`
// directories regardless of platform.
fn shared_siblings(engine: &Engine) -> Vec<String> {
    match engine.shared() {
        Some(SharedNesting::Directory(segment)) if engine.is_shared() => vec![
            format!("shared/{segment}"),
            format!("shared{EXT_SUFFIX}/{segment}"),
        ],
        _ => Vec::new(),
    }
}

fn is_informative(component: &Component) -> bool {
    !component.name.is_empty() && !component.engine.is_empty()
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}
