//! OBJTool command line
//!
//! Resolves one operation, one or two input files and an output file from the
//! arguments, then loads, runs the operation and saves.

use anyhow::{bail, Context as _, Result};
use clap::{ArgGroup, Parser};
use objtool_algorithms::Operation;
use objtool_core::MeshStats;
use objtool_io::{read_mesh, write_mesh};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "objtool",
    version,
    about = "Compare and merge OBJ files sharing the same topology",
    long_about = "Compare and merge OBJ files sharing the same topology.\n\n\
                  Both files of the diff, colordiff, merge and addmaterials operations must\n\
                  have the same number of vertices and faces: vertex N of one file is vertex\n\
                  N of the other, possibly moved.",
    after_help = "EXAMPLES:\n  \
                  objtool -d morphed.obj base.obj diff.obj\n  \
                  objtool -c morphed.obj changed base.obj colored.obj\n  \
                  objtool -m edited.obj eyes base.obj merged.obj\n  \
                  objtool -a textured.obj base.obj out.obj\n  \
                  objtool -s base.obj clean.obj"
)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["simplify", "diff", "colordiff", "merge", "addmaterials"])
))]
pub struct Cli {
    /// Input OBJ file
    pub input: PathBuf,

    /// Output OBJ file
    pub output: PathBuf,

    /// Only keep geometry data
    #[arg(short = 's', long)]
    pub simplify: bool,

    /// Create an OBJ file with only the faces that differ in FILE
    #[arg(short = 'd', long, value_name = "FILE")]
    pub diff: Option<PathBuf>,

    /// Give MATERIAL to the faces that differ in FILE
    #[arg(short = 'c', long, num_args = 2, value_names = ["FILE", "MATERIAL"])]
    pub colordiff: Option<Vec<String>>,

    /// Merge the faces with MATERIAL from FILE into the input
    #[arg(short = 'm', long, num_args = 2, value_names = ["FILE", "MATERIAL"])]
    pub merge: Option<Vec<String>>,

    /// Copy the materials of FILE to the input
    #[arg(short = 'a', long, value_name = "FILE")]
    pub addmaterials: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not build the vertex to face index (slower, same result)
    #[arg(long)]
    pub no_cache: bool,
}

/// The operation requested on the command line and its second input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub second_input: Option<PathBuf>,
}

impl Cli {
    pub fn invocation(&self) -> Result<Invocation> {
        let (operation, second_input) = if let Some(file) = &self.diff {
            (Operation::Diff, Some(file.clone()))
        } else if let Some(values) = &self.colordiff {
            let (file, material) = file_and_material(values)?;
            (Operation::ColorDiff { material }, Some(file))
        } else if let Some(values) = &self.merge {
            let (file, material) = file_and_material(values)?;
            (Operation::Merge { material }, Some(file))
        } else if let Some(file) = &self.addmaterials {
            (Operation::AddMaterials, Some(file.clone()))
        } else if self.simplify {
            (Operation::Simplify, None)
        } else {
            bail!("No command");
        };

        Ok(Invocation {
            operation,
            second_input,
        })
    }
}

fn file_and_material(values: &[String]) -> Result<(PathBuf, String)> {
    match values {
        [file, material] => Ok((PathBuf::from(file), material.clone())),
        _ => bail!("Expected a file and a material, got {:?}", values),
    }
}

fn load(path: &Path) -> Result<objtool_core::Mesh> {
    let mesh = read_mesh(path).with_context(|| format!("Failed to load {}", path.display()))?;
    info!("Loaded {}: {}", path.display(), mesh.stats());
    Ok(mesh)
}

/// Load the inputs, run the operation and save the result
pub fn run(cli: &Cli) -> Result<MeshStats> {
    let invocation = cli.invocation()?;

    let base = load(&cli.input)?;
    let other = invocation
        .second_input
        .as_deref()
        .map(load)
        .transpose()?;

    let operation = &invocation.operation;
    let result = operation
        .apply(base, other.as_ref(), !cli.no_cache)
        .with_context(|| format!("Operation '{}' failed", operation.name()))?;

    write_mesh(&result, &cli.output)
        .with_context(|| format!("Failed to save {}", cli.output.display()))?;
    info!("Saved {}", cli.output.display());

    Ok(result.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use objtool_core::Error;
    use std::fs;
    use tempfile::tempdir;

    const BASE_OBJ: &str = "o Genesis\n\
                            v 0.0 0.0 0.0\n\
                            v 1.0 0.0 0.0\n\
                            v 1.0 1.0 0.0\n\
                            v 0.0 1.0 0.0\n\
                            usemtl skin\n\
                            f 1 2 3\n\
                            usemtl eyes\n\
                            f 1 3 4\n";

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("objtool").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_each_operation() {
        let cli = parse(&["-s", "in.obj", "out.obj"]).unwrap();
        assert_eq!(cli.invocation().unwrap().operation, Operation::Simplify);
        assert_eq!(cli.input, PathBuf::from("in.obj"));
        assert_eq!(cli.output, PathBuf::from("out.obj"));

        let cli = parse(&["-d", "other.obj", "in.obj", "out.obj"]).unwrap();
        let invocation = cli.invocation().unwrap();
        assert_eq!(invocation.operation, Operation::Diff);
        assert_eq!(invocation.second_input, Some(PathBuf::from("other.obj")));

        let cli = parse(&["in.obj", "out.obj", "--colordiff", "other.obj", "red"]).unwrap();
        assert_eq!(
            cli.invocation().unwrap().operation,
            Operation::ColorDiff {
                material: "red".to_string()
            }
        );

        let cli = parse(&["-m", "other.obj", "eyes", "in.obj", "out.obj"]).unwrap();
        assert_eq!(
            cli.invocation().unwrap().operation,
            Operation::Merge {
                material: "eyes".to_string()
            }
        );

        let cli = parse(&["-a", "other.obj", "in.obj", "out.obj"]).unwrap();
        assert_eq!(cli.invocation().unwrap().operation, Operation::AddMaterials);
    }

    #[test]
    fn test_parse_rejects_bad_usage() {
        // no operation
        assert!(parse(&["in.obj", "out.obj"]).is_err());
        // two operations
        assert!(parse(&["-s", "-d", "other.obj", "in.obj", "out.obj"]).is_err());
        // missing material
        assert!(parse(&["in.obj", "out.obj", "-m", "other.obj"]).is_err());
        // missing output
        assert!(parse(&["-s", "in.obj"]).is_err());
    }

    #[test]
    fn test_run_merge() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("base.obj");
        let other = dir.path().join("edited.obj");
        let output = dir.path().join("merged.obj");
        fs::write(&input, BASE_OBJ).unwrap();
        fs::write(&other, BASE_OBJ.replace("v 0.0 1.0 0.0", "v 0.0 1.5 0.0")).unwrap();

        let cli = parse(&[
            "-m",
            other.to_str().unwrap(),
            "eyes",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();

        let stats = run(&cli).unwrap();
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.faces, 2);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\nv 0.0 1.5 0.0\n"));
    }

    #[test]
    fn test_run_reports_missing_material() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("base.obj");
        let output = dir.path().join("merged.obj");
        fs::write(&input, BASE_OBJ).unwrap();

        let cli = parse(&[
            "-m",
            input.to_str().unwrap(),
            "hair",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();

        let error = run(&cli).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::MaterialNotFound { .. })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_reports_count_mismatch() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("base.obj");
        let other = dir.path().join("other.obj");
        let output = dir.path().join("diff.obj");
        fs::write(&input, BASE_OBJ).unwrap();
        fs::write(&other, format!("v 9 9 9\n{}", BASE_OBJ)).unwrap();

        let cli = parse(&[
            "-d",
            other.to_str().unwrap(),
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();

        let error = run(&cli).unwrap_err();
        assert!(format!("{:#}", error).contains("4 != 5"));
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.obj");
        let output = dir.path().join("out.obj");

        let cli = parse(&["-s", input.to_str().unwrap(), output.to_str().unwrap()]).unwrap();

        let error = run(&cli).unwrap_err();
        assert!(error.to_string().starts_with("Failed to load"));
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::FileOpen { .. })
        ));
    }
}
