//! Defaults shared by the detectors, the scanner and the entry generator.

/// Package name the target library is imported/required under
pub const DEFAULT_MODULE_NAME: &str = "three";

/// Global binding the library installs itself under in script builds
pub const DEFAULT_GLOBAL_NAME: &str = "THREE";

/// File extensions for JavaScript/TypeScript files that should be scanned
pub const JS_TS_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
];
