#![deny(unsafe_code)]
//! CLI binary for the organic vector art generators.
//!
//! Subcommands:
//! - `render <generator>`: compose one scene, write SVG
//! - `batch`: render generators across a list of seeds
//! - `seeds <count>`: print a reproducible seed list
//! - `noise <x> <y>`: sample the fractal field once
//! - `list`: print available generators

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use organic_core::FieldParams;
use organic_scene::batch::batch_file_name;
use organic_scene::{
    random_seedlist, render_batch, resolve_seed, write_svg, Generator, GeneratorKind, Recipe,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_SIZE: usize = 1200;

#[derive(Parser)]
#[command(name = "organic", about = "Organic vector art generator CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose one scene and write it as SVG.
    Render {
        /// Generator name (e.g. "flowfield"). Optional with --recipe.
        generator: Option<String>,

        /// Canvas width [default: 1200, or the recipe's].
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Canvas height [default: 1200, or the recipe's].
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Seed for deterministic output. Falls back to the recipe.
        #[arg(long, env = "GEN_SEED")]
        seed: Option<u64>,

        /// Generator parameters as a JSON object, merged over the recipe's.
        #[arg(long)]
        params: Option<String>,

        /// Recipe file supplying generator, size, params and seed.
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Output file path [default: <generator>_<seed>.svg].
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the effective recipe to this file.
        #[arg(long)]
        save_recipe: Option<PathBuf>,
    },
    /// Render every generator for every seed into one directory.
    Batch {
        /// Comma-separated generator names. Falls back to the recipe.
        #[arg(long, value_delimiter = ',')]
        generators: Vec<String>,

        /// Comma-separated seeds. Falls back to the recipe's seedlist.
        #[arg(long, value_delimiter = ',')]
        seeds: Vec<u64>,

        /// Canvas width [default: 1200, or the recipe's].
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Canvas height [default: 1200, or the recipe's].
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Generator parameters as a JSON object, merged over the recipe's.
        #[arg(long)]
        params: Option<String>,

        /// Recipe file supplying defaults for every option above.
        #[arg(long)]
        recipe: Option<PathBuf>,

        /// Output directory.
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
    },
    /// Print a reproducible list of random seeds.
    Seeds {
        /// How many seeds to generate.
        count: usize,

        /// Smallest seed (inclusive).
        #[arg(long, default_value_t = 0)]
        min: u64,

        /// Largest seed (inclusive).
        #[arg(long, default_value_t = 9999)]
        max: u64,

        /// Seed of the list itself.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Store the list as the `seedlist` of this recipe file.
        #[arg(long)]
        into: Option<PathBuf>,
    },
    /// Sample the fractal noise field at one point.
    Noise {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Field seed.
        #[arg(long, env = "GEN_SEED", default_value_t = 0)]
        seed: u64,

        #[arg(long, default_value_t = 5)]
        octaves: u32,

        #[arg(long, default_value_t = 2.0)]
        lacunarity: f64,

        #[arg(long, default_value_t = 0.5)]
        gain: f64,
    },
    /// List available generators.
    List,
}

fn parse_params(raw: &str) -> Result<Value, CliError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(value)
}

/// Overlays the keys of `overrides` onto `base`.
fn merge_params(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => base.extend(overrides),
        (base, overrides) => *base = overrides,
    }
}

fn read_recipe(path: &Path) -> Result<Recipe, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::file(path, e))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::bad_recipe(path, e))
}

fn write_recipe(recipe: &Recipe, path: &Path) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(recipe)?;
    std::fs::write(path, text + "\n").map_err(|e| CliError::file(path, e))
}

/// Recipe params with `--params` merged on top.
fn effective_params(recipe: Option<&Recipe>, params: Option<&str>) -> Result<Value, CliError> {
    let mut merged = recipe.map_or_else(|| json!({}), |r| r.params.clone());
    if let Some(raw) = params {
        merge_params(&mut merged, parse_params(raw)?);
    }
    Ok(merged)
}

fn report_warnings(json_mode: bool, warnings: &[String]) {
    if !json_mode {
        for w in warnings {
            eprintln!("warning: {w}");
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let names = GeneratorKind::list_generators();
            if cli.json {
                let generators = names
                    .iter()
                    .map(|name| -> Result<Value, CliError> {
                        let generator = GeneratorKind::from_name(name, &json!({}))?;
                        Ok(json!({"name": name, "params": generator.param_schema()}))
                    })
                    .collect::<Result<Vec<_>, CliError>>()?;
                let info = json!({ "generators": generators });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Generators:");
                for name in names {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            generator,
            width,
            height,
            seed,
            params,
            recipe,
            output,
            save_recipe,
        } => {
            let recipe = recipe.as_deref().map(read_recipe).transpose()?;
            let name = generator
                .or_else(|| recipe.as_ref().map(|r| r.generator.clone()))
                .ok_or_else(|| CliError::missing("generator", "pass a name or --recipe"))?;
            let seed = resolve_seed(seed, recipe.as_ref()).ok_or_else(|| {
                CliError::missing(
                    "seed",
                    "pass --seed, set GEN_SEED, or use a recipe with seed or seedlist",
                )
            })?;
            let effective = Recipe {
                width: width
                    .or(recipe.as_ref().map(|r| r.width))
                    .unwrap_or(DEFAULT_SIZE),
                height: height
                    .or(recipe.as_ref().map(|r| r.height))
                    .unwrap_or(DEFAULT_SIZE),
                params: effective_params(recipe.as_ref(), params.as_deref())?,
                seed: Some(seed),
                seedlist: Vec::new(),
                generator: name,
            };
            effective.validate()?;

            let generator = GeneratorKind::from_name(&effective.generator, &effective.params)?;
            let scene = generator.compose(effective.width, effective.height, seed)?;
            let output =
                output.unwrap_or_else(|| PathBuf::from(batch_file_name(generator.name(), seed)));
            write_svg(&scene, &output)?;
            if let Some(path) = &save_recipe {
                write_recipe(&effective, path)?;
            }

            let warnings = generator.quality_warnings();
            report_warnings(cli.json, &warnings);
            if cli.json {
                let info = json!({
                    "generator": effective.generator,
                    "width": effective.width,
                    "height": effective.height,
                    "seed": seed,
                    "strokes": scene.stroke_count(),
                    "fills": scene.fill_count(),
                    "output": output.display().to_string(),
                    "params": generator.params(),
                    "warnings": warnings,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, seed {seed}) -> {}",
                    effective.generator,
                    effective.width,
                    effective.height,
                    output.display()
                );
            }
        }
        Command::Batch {
            generators,
            seeds,
            width,
            height,
            params,
            recipe,
            out_dir,
        } => {
            let recipe = recipe.as_deref().map(read_recipe).transpose()?;
            let names = if generators.is_empty() {
                recipe.iter().map(|r| r.generator.clone()).collect()
            } else {
                generators
            };
            if names.is_empty() {
                return Err(CliError::missing("generators", "pass --generators or --recipe"));
            }
            let seeds = if seeds.is_empty() {
                recipe.as_ref().map_or_else(Vec::new, |r| {
                    if r.seedlist.is_empty() {
                        r.seed.into_iter().collect()
                    } else {
                        r.seedlist.clone()
                    }
                })
            } else {
                seeds
            };
            if seeds.is_empty() {
                return Err(CliError::missing("seeds", "pass --seeds or a recipe with seedlist"));
            }
            let width = width
                .or(recipe.as_ref().map(|r| r.width))
                .unwrap_or(DEFAULT_SIZE);
            let height = height
                .or(recipe.as_ref().map(|r| r.height))
                .unwrap_or(DEFAULT_SIZE);
            let params = effective_params(recipe.as_ref(), params.as_deref())?;

            let gens = names
                .iter()
                .map(|name| GeneratorKind::from_name(name, &params))
                .collect::<Result<Vec<_>, _>>()?;
            let warnings: Vec<String> = gens
                .iter()
                .flat_map(|g| {
                    g.quality_warnings()
                        .into_iter()
                        .map(move |w| format!("{}: {w}", g.name()))
                })
                .collect();
            report_warnings(cli.json, &warnings);

            let paths = render_batch(&gens, &seeds, width, height, &out_dir)?;

            if cli.json {
                let info = json!({
                    "generators": names,
                    "seeds": seeds,
                    "width": width,
                    "height": height,
                    "outputs": paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                    "warnings": warnings,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for path in &paths {
                    eprintln!("rendered {width}x{height} -> {}", path.display());
                }
            }
        }
        Command::Seeds {
            count,
            min,
            max,
            seed,
            into,
        } => {
            let seedlist =
                random_seedlist(count, min, max, seed).map_err(|e| CliError::Input(e.to_string()))?;
            if let Some(path) = &into {
                let mut recipe = read_recipe(path)?;
                recipe.seedlist = seedlist.clone();
                write_recipe(&recipe, path)?;
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "seedlist": seedlist }))?);
            } else {
                let line: Vec<String> = seedlist.iter().map(u64::to_string).collect();
                println!("{}", line.join(" "));
                if let Some(path) = &into {
                    eprintln!("stored {count} seeds -> {}", path.display());
                }
            }
        }
        Command::Noise {
            x,
            y,
            seed,
            octaves,
            lacunarity,
            gain,
        } => {
            let field = FieldParams {
                octaves,
                lacunarity,
                gain,
            };
            let value = organic_core::noise(x, y, seed, octaves, lacunarity, gain)?;
            let warnings = field.quality_warnings();
            report_warnings(cli.json, &warnings);
            if cli.json {
                let info = json!({
                    "x": x,
                    "y": y,
                    "seed": seed,
                    "octaves": octaves,
                    "lacunarity": lacunarity,
                    "gain": gain,
                    "value": value,
                    "warnings": warnings,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{value}");
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_params_requires_object() {
        assert!(parse_params(r#"{"n_lines": 10}"#).is_ok());
        assert_eq!(parse_params("[1, 2]").unwrap_err().exit_code(), 12);
        assert_eq!(parse_params("{oops").unwrap_err().exit_code(), 12);
    }

    #[test]
    fn merge_params_overrides_keys() {
        let mut base = json!({"n_lines": 10, "gain": 0.5});
        merge_params(&mut base, json!({"n_lines": 20, "bg": "#000000"}));
        assert_eq!(base, json!({"n_lines": 20, "gain": 0.5, "bg": "#000000"}));
    }

    #[test]
    fn effective_params_layers_flag_over_recipe() {
        let mut recipe = Recipe::new("flowfield", 100, 100, 1);
        recipe.params = json!({"n_lines": 10, "steps": 50});
        let merged = effective_params(Some(&recipe), Some(r#"{"steps": 70}"#)).unwrap();
        assert_eq!(merged, json!({"n_lines": 10, "steps": 70}));
        assert_eq!(effective_params(None, None).unwrap(), json!({}));
    }

    #[test]
    fn recipe_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipe.json");
        let mut recipe = Recipe::new("blobs", 300, 200, 5);
        recipe.seedlist = vec![1, 2, 3];
        write_recipe(&recipe, &path).unwrap();
        assert_eq!(read_recipe(&path).unwrap(), recipe);
    }

    #[test]
    fn missing_recipe_is_io_error_and_bad_recipe_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(read_recipe(&missing).unwrap_err().exit_code(), 11);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, r#"{"generator": "blobs"}"#).unwrap();
        assert_eq!(read_recipe(&bad).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn render_command_writes_svg_and_recipe() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("piece.svg");
        let saved = dir.path().join("piece.json");
        let cli = Cli::parse_from([
            "organic",
            "render",
            "flowfield",
            "-W",
            "120",
            "-H",
            "90",
            "--seed",
            "7",
            "--params",
            r#"{"n_lines": 20}"#,
            "-o",
            out.to_str().unwrap(),
            "--save-recipe",
            saved.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let svg = std::fs::read_to_string(&out).unwrap();
        assert!(svg.starts_with("<svg"));
        let recipe = read_recipe(&saved).unwrap();
        assert_eq!(recipe.generator, "flowfield");
        assert_eq!((recipe.width, recipe.height), (120, 90));
        assert_eq!(recipe.seed, Some(7));
        assert_eq!(recipe.params["n_lines"], 20);
    }

    #[test]
    fn render_from_recipe_uses_seedlist() {
        let dir = tempfile::tempdir().unwrap();
        let recipe_path = dir.path().join("recipe.json");
        let mut recipe = Recipe::new("blobs", 200, 200, 0);
        recipe.seed = None;
        recipe.seedlist = vec![31, 32];
        recipe.params = json!({"n_blobs": 3});
        write_recipe(&recipe, &recipe_path).unwrap();
        let out = dir.path().join("from_recipe.svg");

        let cli = Cli::parse_from([
            "organic",
            "render",
            "--recipe",
            recipe_path.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ]);
        // GEN_SEED in the test environment would take precedence.
        if std::env::var_os("GEN_SEED").is_none() {
            run(cli).unwrap();
            assert_eq!(std::fs::read_to_string(&out).unwrap().matches("<path").count(), 3);
        }
    }

    #[test]
    fn unknown_generator_exits_with_engine_code() {
        let cli = Cli::parse_from(["organic", "render", "grid", "--seed", "1"]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn seeds_into_recipe_stores_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recipe.json");
        write_recipe(&Recipe::new("flowfield", 100, 100, 1), &path).unwrap();

        let cli = Cli::parse_from([
            "organic",
            "seeds",
            "4",
            "--max",
            "10",
            "--into",
            path.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let stored = read_recipe(&path).unwrap().seedlist;
        assert_eq!(stored, random_seedlist(4, 0, 10, 42).unwrap());
    }

    #[test]
    fn seeds_with_inverted_range_is_input_error() {
        let cli = Cli::parse_from(["organic", "seeds", "3", "--min", "9", "--max", "1"]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 12);
    }

    #[test]
    fn noise_with_zero_octaves_is_engine_error() {
        let cli = Cli::parse_from(["organic", "noise", "0.5", "-1.5", "--octaves", "0"]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn batch_writes_every_pair() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "organic",
            "batch",
            "--generators",
            "flowfield,blobs",
            "--seeds",
            "1,2",
            "-W",
            "100",
            "-H",
            "100",
            "--params",
            r#"{"n_lines": 10, "n_blobs": 2}"#,
            "--out-dir",
            dir.path().to_str().unwrap(),
        ]);
        run(cli).unwrap();
        for name in ["flowfield_1.svg", "flowfield_2.svg", "blobs_1.svg", "blobs_2.svg"] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }
    }

    #[test]
    fn batch_without_seeds_is_input_error() {
        let cli = Cli::parse_from(["organic", "batch", "--generators", "blobs"]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 12);
    }
}
