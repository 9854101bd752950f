//! A miniature copy of the library's source layout for tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

pub(crate) fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}

/// Writes `<root>/src/...` and returns the `src` directory.
pub(crate) fn write_library(root: &Path) -> PathBuf {
    create_test_file(
        root,
        "src/Three.js",
        r#"/**
 * Library entry point
 */
import './polyfills.js';
export { WebGLRenderTarget } from './renderers/WebGLRenderTarget.js';
export { WebGLRenderer } from './renderers/WebGLRenderer.js';
export * from './geometries/Geometries.js';
export * from './materials/Materials.js';
export { Math as _Math } from './math/Math.js';

// Buffer attributes are re-exported as a whole
export * from './core/BufferAttribute.js';
export { Scene } from './scenes/Scene.js';
export * from './extras/curves/Curves.js';
export * from './constants.js';
export * from './Three.Legacy.js';
"#,
    );
    create_test_file(
        root,
        "src/geometries/Geometries.js",
        r#"export { WireframeGeometry } from './WireframeGeometry.js';
export { SphereGeometry, SphereBufferGeometry } from './SphereGeometry.js';
export { BoxGeometry, BoxBufferGeometry } from './BoxGeometry.js';
"#,
    );
    create_test_file(
        root,
        "src/materials/Materials.js",
        r#"// materials
export { MeshNormalMaterial } from './MeshNormalMaterial.js';
export { MeshBasicMaterial } from './MeshBasicMaterial.js';
"#,
    );
    create_test_file(
        root,
        "src/extras/curves/Curves.js",
        r#"export { QuadraticBezierCurve3 } from './QuadraticBezierCurve3.js';
export { CatmullRomCurve3 } from './CatmullRomCurve3.js';
"#,
    );
    create_test_file(
        root,
        "src/constants.js",
        r#"export var REVISION = '88';
/** texture formats */
export var RGBFormat = 1022;
export var RGBAFormat = 1023;
export var LinearFilter = 1006;
"#,
    );
    create_test_file(
        root,
        "src/core/BufferAttribute.js",
        "export function Float32BufferAttribute() {}\nexport function Uint8ClampedBufferAttribute() {}\n",
    );
    create_test_file(root, "src/polyfills.js", "if ( Number.EPSILON === undefined ) {}\n");
    create_test_file(root, "src/Three.Legacy.js", "export function Face4() {}\n");
    root.join("src")
}
