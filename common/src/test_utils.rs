use std::path::PathBuf;
use std::sync::OnceLock;

/// `<workspace>/test_output`, created on first use.
///
/// The workspace is the parent of this crate's manifest directory.
pub fn test_output_dir() -> PathBuf {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let workspace = manifest_dir.parent().map(PathBuf::from).unwrap_or(manifest_dir);
        let dir = workspace.join("test_output");
        std::fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", dir.display(), e));
        dir
    })
    .clone()
}

/// Path of a file inside the shared test output directory.
pub fn test_output_path(name: &str) -> PathBuf {
    test_output_dir().join(name)
}
