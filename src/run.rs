//! Scanning of whole directory trees.

use log::debug;
use std::path::Path;

use crate::extract::{CallSite, Extractor};
use crate::options::Options;
use crate::walk::{source_files, SourceFile};

/// Find all call sites under `root`, in enumeration order and then textual order.
pub fn find_call_sites(root: &Path, options: &Options) -> Result<Vec<CallSite>, regex::Error> {
    let extractor = Extractor::new(options)?;
    Ok(scan_files(&extractor, source_files(root, options)))
}

/// Find all call sites under every path in `options.paths`, in the order the paths were given.
pub fn run(options: &Options) -> Result<Vec<CallSite>, regex::Error> {
    let extractor = Extractor::new(options)?;
    let mut sites = Vec::new();
    for path in &options.paths {
        debug!("Scanning root {}", path);
        sites.extend(scan_files(
            &extractor,
            source_files(Path::new(path), options),
        ));
    }
    debug!("Done, {} call sites", sites.len());
    Ok(sites)
}

fn scan_files(extractor: &Extractor, files: impl Iterator<Item = SourceFile>) -> Vec<CallSite> {
    files
        .flat_map(|file| extractor.scan(&file.path, &file.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Variant;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.ts"), "console.log('x')").unwrap();
        let res = find_call_sites(dir.path(), &Options::default()).unwrap();
        assert!(res.is_empty());
    }

    #[test]
    fn test_order() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("b/z.tsx"), "toast.info(1)\ntoast.error(2)").unwrap();
        fs::write(root.join("a.ts"), "\n\ntoast.success(\"saved\")").unwrap();
        fs::write(root.join("c.js"), "toast('c')").unwrap();
        fs::write(root.join("d.css"), "toast('d')").unwrap();

        let res = find_call_sites(root, &Options::default()).unwrap();
        let summary = res
            .iter()
            .map(|s| {
                (
                    s.file.file_name().unwrap().to_string_lossy().to_string(),
                    s.line,
                    s.variant,
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("a.ts".to_string(), 3, Variant::Success),
                ("z.tsx".to_string(), 1, Variant::Info),
                ("z.tsx".to_string(), 2, Variant::Error),
                ("c.js".to_string(), 1, Variant::Default),
            ]
        );
    }

    #[test]
    fn test_dependency_cache_is_skipped() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("node_modules/react-hot-toast")).unwrap();
        fs::write(
            root.join("node_modules/react-hot-toast/index.js"),
            "toast.success('vendored')",
        )
        .unwrap();
        fs::write(root.join("app.tsx"), "toast.success('mine')").unwrap();

        let res = find_call_sites(root, &Options::default()).unwrap();
        assert_eq!(res.len(), 1);
        assert!(res[0].file.ends_with("app.tsx"));
        assert!(res
            .iter()
            .all(|s| !s.file.to_string_lossy().contains("node_modules")));
    }

    #[test]
    fn test_multiple_roots() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("x")).unwrap();
        fs::create_dir_all(root.join("y")).unwrap();
        fs::write(root.join("x/a.ts"), "notify('x')").unwrap();
        fs::write(root.join("y/a.ts"), "notify.warning('y')").unwrap();

        let options = Options {
            identifier: "notify".to_string(),
            paths: vec![
                root.join("y").to_string_lossy().to_string(),
                root.join("x").to_string_lossy().to_string(),
            ],
            ..Options::default()
        };
        let res = run(&options).unwrap();
        assert_eq!(
            res.iter().map(|s| s.args_summary.as_str()).collect::<Vec<_>>(),
            vec!["'y'", "'x'"]
        );
    }
}
