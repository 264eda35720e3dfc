use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{config::PairingMode, error::EvalError};

/// A reference image and the candidate image it is compared with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePair {
    /// Position of the pair in the run.
    pub index: usize,
    /// File name of the reference image, used when reporting the pair.
    pub name: String,
    /// Path to the reference image.
    pub reference: PathBuf,
    /// Path to the candidate image.
    pub candidate: PathBuf,
}

/// List the file names in `dir` whose extension is one of `extensions`.
///
/// Extensions are compared case-insensitively and the names are sorted
/// lexicographically. Sub-directories and names that are not valid UTF-8 are ignored.
pub fn list_images(dir: &Path, extensions: &[String]) -> Result<Vec<String>, EvalError> {
    let read_error = |source| EvalError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() || !has_extension(&path, extensions) {
            continue;
        }

        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => names.push(name.to_string()),
            None => log::debug!("Ignoring non UTF-8 file name {}", path.display()),
        }
    }

    names.sort();
    Ok(names)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn file_stem(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Associate the sorted reference and candidate listings into pairs.
///
/// # Arguments
///
/// * `reference_dir` - Directory of the reference images.
/// * `references` - Sorted reference file names.
/// * `candidate_dir` - Directory of the candidate images.
/// * `candidates` - Sorted candidate file names. Their count bounds the number of pairs.
/// * `mode` - The pairing policy.
///
/// # Errors
///
/// * [`EvalError::NoImagesFound`] when there is no candidate image.
/// * [`EvalError::PairCountMismatch`] when positional pairing runs out of references.
/// * [`EvalError::NoPairs`] when no candidate could be associated.
pub fn pair_files(
    reference_dir: &Path,
    references: &[String],
    candidate_dir: &Path,
    candidates: &[String],
    mode: &PairingMode,
) -> Result<Vec<FilePair>, EvalError> {
    let names = match mode {
        PairingMode::Positional => pair_positional(references, candidates, candidate_dir)?,
        PairingMode::Stem => pair_by_stem(references, candidates, candidate_dir)?,
        PairingMode::Mapping(table) => pair_by_table(table),
    };

    if names.is_empty() {
        return Err(EvalError::NoPairs);
    }

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(index, (reference, candidate))| FilePair {
            index,
            reference: reference_dir.join(&reference),
            candidate: candidate_dir.join(candidate),
            name: reference,
        })
        .collect())
}

fn pair_positional(
    references: &[String],
    candidates: &[String],
    candidate_dir: &Path,
) -> Result<Vec<(String, String)>, EvalError> {
    if candidates.is_empty() {
        return Err(EvalError::NoImagesFound(candidate_dir.to_path_buf()));
    }

    let references = &references[..references.len().min(candidates.len())];
    if references.len() != candidates.len() {
        return Err(EvalError::PairCountMismatch {
            references: references.len(),
            candidates: candidates.len(),
        });
    }

    Ok(references
        .iter()
        .cloned()
        .zip(candidates.iter().cloned())
        .collect())
}

fn pair_by_stem(
    references: &[String],
    candidates: &[String],
    candidate_dir: &Path,
) -> Result<Vec<(String, String)>, EvalError> {
    if candidates.is_empty() {
        return Err(EvalError::NoImagesFound(candidate_dir.to_path_buf()));
    }

    let mut by_stem: BTreeMap<&str, &String> = BTreeMap::new();
    for reference in references {
        if let Some(kept) = by_stem.get(file_stem(reference)) {
            log::warn!("Reference {reference} shares its stem with {kept}, keeping {kept}");
            continue;
        }
        by_stem.insert(file_stem(reference), reference);
    }

    let mut pairs = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        match by_stem.get(file_stem(candidate)) {
            Some(&reference) => pairs.push((reference.clone(), candidate.clone())),
            None => log::warn!("No reference image for candidate {candidate}. Skipping."),
        }
    }

    Ok(pairs)
}

// entries are ordered by candidate name, existence is checked when loading
fn pair_by_table(table: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut pairs = table
        .iter()
        .map(|(reference, candidate)| (reference.clone(), candidate.clone()))
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    pairs
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::Path};

    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn list_images_filters_and_sorts() -> Result<(), EvalError> {
        let tmp_dir = tempfile::tempdir()?;
        for name in ["c.png", "a.PNG", "b.jpg", "notes.txt", "d.jpeg"] {
            std::fs::write(tmp_dir.path().join(name), b"")?;
        }
        std::fs::create_dir(tmp_dir.path().join("sub.png"))?;

        let pngs = list_images(tmp_dir.path(), &names(&["png"]))?;
        assert_eq!(pngs, vec!["a.PNG", "c.png"]);

        let all = list_images(tmp_dir.path(), &names(&["png", "jpg", "jpeg"]))?;
        assert_eq!(all, vec!["a.PNG", "b.jpg", "c.png", "d.jpeg"]);

        Ok(())
    }

    #[test]
    fn list_images_missing_dir() {
        let res = list_images(Path::new("/definitely/not/here"), &names(&["png"]));
        assert!(matches!(res, Err(EvalError::DirectoryRead { .. })));
    }

    #[test]
    fn positional_truncates_references() -> Result<(), EvalError> {
        let references = names(&["r1.jpg", "r2.jpg", "r3.jpg", "r4.jpg", "r5.jpg"]);
        let candidates = names(&["00000.png", "00001.png", "00002.png"]);

        let pairs = pair_files(
            Path::new("gt"),
            &references,
            Path::new("renders"),
            &candidates,
            &PairingMode::Positional,
        )?;

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].index, 0);
        assert_eq!(pairs[2].name, "r3.jpg");
        assert_eq!(pairs[2].reference, Path::new("gt").join("r3.jpg"));
        assert_eq!(pairs[2].candidate, Path::new("renders").join("00002.png"));

        Ok(())
    }

    #[test]
    fn positional_not_enough_references() {
        let res = pair_files(
            Path::new("gt"),
            &names(&["r1.jpg"]),
            Path::new("renders"),
            &names(&["00000.png", "00001.png"]),
            &PairingMode::Positional,
        );
        assert!(matches!(
            res,
            Err(EvalError::PairCountMismatch {
                references: 1,
                candidates: 2
            })
        ));
    }

    #[test]
    fn no_candidates() {
        for mode in [PairingMode::Positional, PairingMode::Stem] {
            let res = pair_files(
                Path::new("gt"),
                &names(&["r1.jpg"]),
                Path::new("renders"),
                &[],
                &mode,
            );
            assert!(matches!(res, Err(EvalError::NoImagesFound(_))));
        }
    }

    #[test]
    fn stem_matches_across_extensions() -> Result<(), EvalError> {
        let references = names(&["a.jpg", "b.png", "c.jpeg", "z.png"]);
        let candidates = names(&["a.png", "c.png", "x.png"]);

        let pairs = pair_files(
            Path::new("gt"),
            &references,
            Path::new("renders"),
            &candidates,
            &PairingMode::Stem,
        )?;

        let pairs = pairs
            .iter()
            .map(|p| (p.index, p.name.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![(0, "a.jpg"), (1, "c.jpeg")]);

        Ok(())
    }

    #[test]
    fn stem_without_any_match() {
        let res = pair_files(
            Path::new("gt"),
            &names(&["a.png"]),
            Path::new("renders"),
            &names(&["b.png"]),
            &PairingMode::Stem,
        );
        assert!(matches!(res, Err(EvalError::NoPairs)));
    }

    #[test]
    fn mapping_ordered_by_candidate() -> Result<(), EvalError> {
        let table = BTreeMap::from([
            ("IMG_9.jpg".to_string(), "00000.png".to_string()),
            ("IMG_1.jpg".to_string(), "00001.png".to_string()),
        ]);

        let pairs = pair_files(
            Path::new("gt"),
            &[],
            Path::new("renders"),
            &[],
            &PairingMode::Mapping(table),
        )?;

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].name, "IMG_9.jpg");
        assert_eq!(pairs[1].candidate, Path::new("renders").join("00001.png"));

        Ok(())
    }
}
