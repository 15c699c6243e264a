//! Renders many (generator, seed) pairs into one directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use organic_core::EngineError;
use rayon::prelude::*;

use crate::generator::Generator;
use crate::svg::write_svg;

/// File name for one rendered piece: `<generator>_<seed>.svg`.
pub fn batch_file_name(generator: &str, seed: u64) -> String {
    format!("{generator}_{seed}.svg")
}

/// Composes and writes every generator for every seed, in parallel.
///
/// `out_dir` is created if missing. Returned paths are ordered generator
/// by generator, seeds in input order within each. A repeated
/// (generator name, seed) pair is rendered once, at its first position, so
/// no two jobs write the same file. The first failure aborts the batch;
/// files already written are left in place.
pub fn render_batch<G: Generator>(
    generators: &[G],
    seeds: &[u64],
    width: usize,
    height: usize,
    out_dir: &Path,
) -> Result<Vec<PathBuf>, EngineError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| EngineError::Io(format!("{}: {e}", out_dir.display())))?;

    let mut seen = HashSet::new();
    let jobs: Vec<(&G, u64)> = generators
        .iter()
        .flat_map(|g| seeds.iter().map(move |&s| (g, s)))
        .filter(|(g, s)| seen.insert((g.name(), *s)))
        .collect();

    jobs.into_par_iter()
        .map(|(generator, seed)| -> Result<PathBuf, EngineError> {
            let scene = generator.compose(width, height, seed)?;
            let path = out_dir.join(batch_file_name(generator.name(), seed));
            write_svg(&scene, &path)?;
            Ok(path)
        })
        .collect()
}
