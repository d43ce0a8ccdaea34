//! Comparison run: read files, run the pipeline, write results.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use bomdiff_models::{AggregatedTable, MultiTargetComparison};
use bomdiff_utils::{
    compare_many, load_bom, sheet_names, write_csv, AppConfig, BomDiffError, BomDiffResult, BomFormat,
    BomParser,
};

/// Files taking part in one comparison run.
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub master: PathBuf,
    pub targets: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

pub struct ComparisonRunner {
    parser: BomParser,
    max_targets: usize,
    pretty_json: bool,
}

impl ComparisonRunner {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            parser: BomParser::from_config(&config.extraction),
            max_targets: config.comparison.max_targets,
            pretty_json: config.output.pretty_json,
        }
    }

    /// Validate, compare and write outputs.
    pub fn run(&self, request: &ComparisonRequest) -> BomDiffResult<MultiTargetComparison> {
        self.validate(request)?;

        let master = self.load(&request.master)?;

        let mut targets: Vec<(String, AggregatedTable)> = Vec::with_capacity(request.targets.len());
        for (id, path) in target_ids(&request.targets).into_iter().zip(&request.targets) {
            targets.push((id, self.load(path)?));
        }

        let result = compare_many(&master, targets.iter().map(|(id, table)| (id, table)));
        self.write_json(&result, request.output.as_deref())?;

        if let Some(dir) = &request.export_dir {
            export_csv(&result, dir)?;
        }

        Ok(result)
    }

    fn validate(&self, request: &ComparisonRequest) -> BomDiffResult<()> {
        if request.targets.is_empty() || request.targets.len() > self.max_targets {
            return Err(BomDiffError::validation(
                "targets",
                format!("Please provide between 1 and {} target files", self.max_targets),
            ));
        }

        for path in std::iter::once(&request.master).chain(&request.targets) {
            if BomFormat::from_extension(path).is_none() {
                return Err(BomDiffError::validation(
                    "file_type",
                    format!("'{}' has an unsupported file type", path.display()),
                ));
            }
        }

        Ok(())
    }

    fn load(&self, path: &Path) -> BomDiffResult<AggregatedTable> {
        let format = BomFormat::from_extension(path).ok_or_else(|| {
            BomDiffError::validation("file_type", format!("'{}' has an unsupported file type", path.display()))
        })?;
        let data = fs::read(path).map_err(|e| BomDiffError::io(path.display().to_string(), e.to_string()))?;

        tracing::info!(file = %path.display(), %format, bytes = data.len(), "Loading BOM");
        Ok(load_bom(&self.parser, &data, format))
    }

    fn write_json(&self, result: &MultiTargetComparison, output: Option<&Path>) -> BomDiffResult<()> {
        let json = if self.pretty_json {
            serde_json::to_string_pretty(result)?
        } else {
            serde_json::to_string(result)?
        };

        match output {
            Some(path) => fs::write(path, json)
                .map_err(|e| BomDiffError::io(path.display().to_string(), e.to_string())),
            None => {
                println!("{}", json);
                Ok(())
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One id per target: the file name, suffixed with `#<position>` (1-based)
/// when several targets share that name.
fn target_ids(paths: &[PathBuf]) -> Vec<String> {
    let names: Vec<String> = paths.iter().map(|path| file_name(path)).collect();
    let mut taken = HashSet::new();

    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let shared = names.iter().filter(|other| *other == name).count() > 1;
            let mut id = if shared {
                format!("{}#{}", name, idx + 1)
            } else {
                name.clone()
            };
            while !taken.insert(id.clone()) {
                id = format!("{}#{}", id, idx + 1);
            }
            id
        })
        .collect()
}

fn export_csv(result: &MultiTargetComparison, dir: &Path) -> BomDiffResult<()> {
    fs::create_dir_all(dir).map_err(|e| BomDiffError::io(dir.display().to_string(), e.to_string()))?;

    let names = sheet_names(result.targets.iter().map(|t| t.target_file_id.as_str()));
    for (name, target) in names.iter().zip(&result.targets) {
        let path = dir.join(format!("{}.csv", name));
        let file = fs::File::create(&path)
            .map_err(|e| BomDiffError::io(path.display().to_string(), e.to_string()))?;
        write_csv(&target.comparison, file)?;
        tracing::info!(file = %path.display(), "Wrote flat export");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_run_writes_json_and_exports() {
        let dir = tempfile::tempdir().unwrap();
        let master = write(dir.path(), "master.csv", "MPN,Qty,RefDes,Desc\nR1,2,R1,Resistor\nC1,1,C1,Cap\n");
        let target = write(dir.path(), "target.txt", "MPN Qty RefDes Desc\nR1 3 R1 Resistor\nD1 1 D1 Diode\n");
        let output = dir.path().join("result.json");
        let export_dir = dir.path().join("export");

        let mut config = AppConfig::default();
        config.extraction.promote_header_row = true;
        let runner = ComparisonRunner::new(&config);
        let result = runner
            .run(&ComparisonRequest {
                master,
                targets: vec![target],
                output: Some(output.clone()),
                export_dir: Some(export_dir.clone()),
            })
            .unwrap();

        let comparison = result.get("target.txt").unwrap();
        assert_eq!(comparison.summary.quantity_mismatch_count, 1);
        assert_eq!(comparison.summary.missing_parts_count, 1);
        assert_eq!(comparison.summary.extra_parts_count, 1);

        let written: MultiTargetComparison =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written, result);

        let csv = fs::read_to_string(export_dir.join("target_target.txt.csv")).unwrap();
        assert!(csv.starts_with("mpn,status,"));
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_targets_sharing_a_file_name_stay_distinct() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        let master = write(dir.path(), "master.csv", "MPN,Qty\nR1,2\n");
        let first = write(&dir.path().join("a"), "bom.csv", "MPN,Qty\nR1,2\n");
        let second = write(&dir.path().join("b"), "bom.csv", "MPN,Qty\nR1,5\n");
        let export_dir = dir.path().join("export");

        let runner = ComparisonRunner::new(&AppConfig::default());
        let result = runner
            .run(&ComparisonRequest {
                master,
                targets: vec![first, second],
                output: Some(dir.path().join("result.json")),
                export_dir: Some(export_dir.clone()),
            })
            .unwrap();

        let ids: Vec<&str> = result.targets.iter().map(|t| t.target_file_id.as_str()).collect();
        assert_eq!(ids, vec!["bom.csv#1", "bom.csv#2"]);
        assert_eq!(result.get("bom.csv#1").unwrap().summary.quantity_mismatch_count, 0);
        assert_eq!(result.get("bom.csv#2").unwrap().summary.quantity_mismatch_count, 1);

        assert!(export_dir.join("target_bom.csv#1.csv").exists());
        assert!(export_dir.join("target_bom.csv#2.csv").exists());
        assert_eq!(fs::read_dir(&export_dir).unwrap().count(), 2);
    }

    #[test]
    fn test_target_ids() {
        let paths: Vec<PathBuf> = ["x/bom.csv", "main.pdf", "y/bom.csv", "bom.csv#3"]
            .iter()
            .map(PathBuf::from)
            .collect();

        assert_eq!(target_ids(&paths), vec!["bom.csv#1", "main.pdf", "bom.csv#3", "bom.csv#3#4"]);
    }

    #[test]
    fn test_target_count_is_validated() {
        let runner = ComparisonRunner::new(&AppConfig::default());
        let request = ComparisonRequest {
            master: PathBuf::from("master.xlsx"),
            targets: (0..6).map(|i| PathBuf::from(format!("t{}.csv", i))).collect(),
            output: None,
            export_dir: None,
        };

        let err = runner.run(&request).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let runner = ComparisonRunner::new(&AppConfig::default());
        let request = ComparisonRequest {
            master: PathBuf::from("master.xlsx"),
            targets: vec![PathBuf::from("target.xml")],
            output: None,
            export_dir: None,
        };

        assert!(matches!(runner.run(&request), Err(BomDiffError::Validation { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ComparisonRunner::new(&AppConfig::default());
        let request = ComparisonRequest {
            master: dir.path().join("absent.csv"),
            targets: vec![dir.path().join("absent.pdf")],
            output: None,
            export_dir: None,
        };

        assert!(matches!(runner.run(&request), Err(BomDiffError::Io { .. })));
    }
}
