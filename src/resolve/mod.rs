pub mod natural;

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::sheet::DiscMetadata;
use crate::{AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, PRIORITY_COVER_STEMS, SHEET_EXTENSION};
use natural::natural_cmp;

/// Which companion file a resolution step is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Sheet,
    Audio,
    Cover,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sheet => "sheet",
            Self::Audio => "audio",
            Self::Cover => "cover",
        })
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("No input directory given, so a sheet path is required")]
    MissingRoot,
    #[error("No {kind} file found (searched: {})", join_paths(.searched))]
    NotFound { kind: FileKind, searched: Vec<PathBuf> },
    #[error("Unable to pick a {kind} file in {}: {}", .dir.display(), join_paths(.candidates))]
    Ambiguous {
        kind: FileKind,
        dir: PathBuf,
        candidates: Vec<PathBuf>,
    },
    #[error("Invalid {kind} file {} (tried: {})", .arg.display(), join_paths(.tried))]
    InvalidArgument {
        kind: FileKind,
        arg: PathBuf,
        tried: Vec<PathBuf>,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Directories searched for companion files.
#[derive(Debug, Clone)]
pub struct SearchDirs {
    /// The `--input` directory, if any.
    pub root: Option<PathBuf>,
    /// Directory relative arguments fall back to.
    pub cwd: PathBuf,
}

impl SearchDirs {
    pub fn new(root: Option<PathBuf>, cwd: PathBuf) -> Self {
        Self { root, cwd }
    }

    /// Use the process working directory as `cwd`.
    pub fn from_env(root: Option<PathBuf>) -> std::io::Result<Self> {
        Ok(Self::new(root, std::env::current_dir()?))
    }

    /// Root then the sheet directory, without repeating the root when the
    /// sheet sits directly in it.
    fn root_then<'a>(&'a self, sheet_dir: &'a Path) -> Vec<&'a Path> {
        match self.root.as_deref() {
            Some(root) if root == sheet_dir => vec![root],
            Some(root) => vec![root, sheet_dir],
            None => vec![sheet_dir],
        }
    }
}

/// Locate the sheet.
///
/// Without an explicit path the root directory must contain exactly one
/// `.cue` file. An explicit path is taken relative to the root when there is
/// one, otherwise relative to the working directory.
pub fn resolve_sheet(dirs: &SearchDirs, explicit: Option<&Path>) -> Result<PathBuf> {
    let Some(arg) = explicit else {
        let root = dirs.root.as_deref().ok_or(ResolveError::MissingRoot)?;
        let mut sheets = list_files(root)?;
        sheets.retain(|p| has_extension(p, &[SHEET_EXTENSION]));
        return match sheets.len() {
            0 => Err(ResolveError::NotFound {
                kind: FileKind::Sheet,
                searched: vec![root.to_path_buf()],
            }),
            1 => found(FileKind::Sheet, &sheets[0]),
            _ => Err(ResolveError::Ambiguous {
                kind: FileKind::Sheet,
                dir: root.to_path_buf(),
                candidates: sheets,
            }),
        };
    };

    let base = dirs.root.as_deref().unwrap_or(&dirs.cwd);
    let candidate = base.join(arg);
    if candidate.is_file() {
        found(FileKind::Sheet, &candidate)
    } else {
        Err(ResolveError::InvalidArgument {
            kind: FileKind::Sheet,
            arg: arg.to_path_buf(),
            tried: vec![candidate],
        })
    }
}

/// Locate the audio file.
///
/// Order: explicit argument against root, working directory and sheet
/// directory; then the sheet's `FILE` against root and sheet directory; then a
/// scan of root and of the sheet directory for a single audio file.
pub fn resolve_audio(
    dirs: &SearchDirs,
    sheet: &Path,
    disc: &DiscMetadata,
    explicit: Option<&Path>,
) -> Result<PathBuf> {
    let sheet_dir = sheet.parent().unwrap_or(&dirs.cwd);

    if let Some(arg) = explicit {
        let bases = [dirs.root.as_deref(), Some(dirs.cwd.as_path()), Some(sheet_dir)];
        return first_existing(FileKind::Audio, arg, bases.into_iter().flatten());
    }

    let mut searched = Vec::new();

    if let Some(declared) = disc.audio_file() {
        for base in dirs.root_then(sheet_dir) {
            let candidate = base.join(declared);
            if candidate.is_file() {
                return found(FileKind::Audio, &candidate);
            }
            searched.push(candidate);
        }
        log::debug!("Declared audio file {:?} not found, scanning", declared);
    }

    for dir in dirs.root_then(sheet_dir) {
        let mut audio = list_files(dir)?;
        audio.retain(|p| has_extension(p, AUDIO_EXTENSIONS));
        match audio.len() {
            0 => searched.push(dir.to_path_buf()),
            1 => return found(FileKind::Audio, &audio[0]),
            _ => {
                return Err(ResolveError::Ambiguous {
                    kind: FileKind::Audio,
                    dir: dir.to_path_buf(),
                    candidates: audio,
                });
            }
        }
    }

    Err(ResolveError::NotFound {
        kind: FileKind::Audio,
        searched,
    })
}

/// Locate the cover image. `Ok(None)` means no cover.
///
/// An empty explicit argument disables the cover without touching the disk.
/// Otherwise conventional names (`cover.jpg`, `folder.png`, ...) win outright;
/// failing that, the first image in natural order of its stem is used. The
/// sheet directory is only scanned if the root turned up no images at all.
pub fn resolve_cover(
    dirs: &SearchDirs,
    sheet: &Path,
    explicit: Option<&Path>,
) -> Result<Option<PathBuf>> {
    let sheet_dir = sheet.parent().unwrap_or(&dirs.cwd);

    if let Some(arg) = explicit {
        if arg.as_os_str().is_empty() {
            log::debug!("Cover disabled");
            return Ok(None);
        }
        let bases = [dirs.root.as_deref(), Some(dirs.cwd.as_path()), Some(sheet_dir)];
        return first_existing(FileKind::Cover, arg, bases.into_iter().flatten()).map(Some);
    }

    let mut images = Vec::new();
    for dir in dirs.root_then(sheet_dir) {
        if !images.is_empty() {
            break;
        }
        for path in list_files(dir)? {
            if is_priority_cover(&path) {
                return found(FileKind::Cover, &path).map(Some);
            }
            if has_extension(&path, IMAGE_EXTENSIONS) {
                images.push(path);
            }
        }
    }

    if images.len() > 1 {
        log::debug!("Choosing cover among {} images", images.len());
        images.sort_by(|a, b| natural_cmp(&stem(a), &stem(b)));
    }
    match images.first() {
        Some(path) => found(FileKind::Cover, path).map(Some),
        None => Ok(None),
    }
}

fn first_existing<'a>(
    kind: FileKind,
    arg: &Path,
    bases: impl Iterator<Item = &'a Path>,
) -> Result<PathBuf> {
    let mut tried = Vec::new();
    for base in bases {
        let candidate = base.join(arg);
        if candidate.is_file() {
            return found(kind, &candidate);
        }
        tried.push(candidate);
    }
    Err(ResolveError::InvalidArgument {
        kind,
        arg: arg.to_path_buf(),
        tried,
    })
}

fn found(kind: FileKind, path: &Path) -> Result<PathBuf> {
    let path = std::fs::canonicalize(path)?;
    log::info!("Using {} file {}", kind, path.display());
    Ok(path)
}

/// Regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(std::io::Error::from(e).into()),
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    log::debug!("{}: {} files", dir.display(), files.len());
    Ok(files)
}

fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    extension_lower(path).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

fn is_priority_cover(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    PRIORITY_COVER_STEMS
        .iter()
        .any(|stem| IMAGE_EXTENSIONS.iter().any(|ext| name == format!("{stem}.{ext}")))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"x").unwrap();
        path
    }

    fn canon(path: &Path) -> PathBuf {
        fs::canonicalize(path).unwrap()
    }

    fn disc_with_file(name: &str) -> DiscMetadata {
        sheet::parse(&format!("FILE \"{name}\" WAVE\nTRACK 01 AUDIO\nTITLE t\n")).unwrap()
    }

    fn disc_without_file() -> DiscMetadata {
        sheet::parse("TRACK 01 AUDIO\nTITLE t\n").unwrap()
    }

    // === Sheet ===

    #[test]
    fn sheet_scan_finds_single_cue() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "album.flac");
        let cue = touch(root.path(), "Album.CUE");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(resolve_sheet(&dirs, None).unwrap(), canon(&cue));
    }

    #[test]
    fn sheet_scan_is_not_recursive() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "nested/album.cue");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert!(matches!(
            resolve_sheet(&dirs, None),
            Err(ResolveError::NotFound { kind: FileKind::Sheet, .. })
        ));
    }

    #[test]
    fn sheet_scan_rejects_multiple() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "a.cue");
        touch(root.path(), "b.cue");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        match resolve_sheet(&dirs, None) {
            Err(ResolveError::Ambiguous { kind, candidates, .. }) => {
                assert_eq!(kind, FileKind::Sheet);
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn sheet_without_root_or_argument_is_rejected() {
        let cwd = TempDir::new().unwrap();
        let dirs = SearchDirs::new(None, cwd.path().to_path_buf());
        assert!(matches!(resolve_sheet(&dirs, None), Err(ResolveError::MissingRoot)));
    }

    #[test]
    fn explicit_sheet_is_relative_to_root() {
        let root = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let cue = touch(root.path(), "cd1/disc.cue");
        touch(cwd.path(), "cd1/disc.cue");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), cwd.path().to_path_buf());
        assert_eq!(
            resolve_sheet(&dirs, Some(Path::new("cd1/disc.cue"))).unwrap(),
            canon(&cue)
        );
    }

    #[test]
    fn explicit_sheet_is_relative_to_cwd_without_root() {
        let cwd = TempDir::new().unwrap();
        let cue = touch(cwd.path(), "disc.cue");
        let dirs = SearchDirs::new(None, cwd.path().to_path_buf());
        assert_eq!(resolve_sheet(&dirs, Some(Path::new("disc.cue"))).unwrap(), canon(&cue));
    }

    #[test]
    fn explicit_sheet_must_exist_under_root() {
        let root = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        touch(cwd.path(), "disc.cue");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), cwd.path().to_path_buf());
        assert!(matches!(
            resolve_sheet(&dirs, Some(Path::new("disc.cue"))),
            Err(ResolveError::InvalidArgument { kind: FileKind::Sheet, .. })
        ));
    }

    // === Audio ===

    #[test]
    fn explicit_audio_prefers_root_over_cwd_and_sheet_dir() {
        let root = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let cue = touch(root.path(), "sub/disc.cue");
        let in_root = touch(root.path(), "a.wav");
        touch(cwd.path(), "a.wav");
        touch(root.path(), "sub/a.wav");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), cwd.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_without_file(), Some(Path::new("a.wav"))).unwrap();
        assert_eq!(got, canon(&in_root));
    }

    #[test]
    fn explicit_audio_falls_back_to_cwd_then_sheet_dir() {
        let root = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let cue = touch(root.path(), "sub/disc.cue");
        let in_sheet_dir = touch(root.path(), "sub/b.ape");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), cwd.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_without_file(), Some(Path::new("b.ape"))).unwrap();
        assert_eq!(got, canon(&in_sheet_dir));

        let in_cwd = touch(cwd.path(), "b.ape");
        let got = resolve_audio(&dirs, &cue, &disc_without_file(), Some(Path::new("b.ape"))).unwrap();
        assert_eq!(got, canon(&in_cwd));
    }

    #[test]
    fn explicit_audio_missing_everywhere_is_invalid() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        touch(root.path(), "other.flac");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        match resolve_audio(&dirs, &cue, &disc_without_file(), Some(Path::new("gone.flac"))) {
            Err(ResolveError::InvalidArgument { kind, tried, .. }) => {
                assert_eq!(kind, FileKind::Audio);
                assert_eq!(tried.len(), 3);
            }
            other => panic!("expected invalid argument, got {:?}", other),
        }
    }

    #[test]
    fn declared_file_beats_directory_scan() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        let declared = touch(root.path(), "Album Image.flac");
        touch(root.path(), "other.flac");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_with_file("Album Image.flac"), None).unwrap();
        assert_eq!(got, canon(&declared));
    }

    #[test]
    fn declared_file_found_next_to_sheet() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "CD1/disc.cue");
        let declared = touch(root.path(), "CD1/disc.wav");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_with_file("disc.wav"), None).unwrap();
        assert_eq!(got, canon(&declared));
    }

    #[test]
    fn scan_uses_single_audio_file_when_declared_name_is_wrong() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        let actual = touch(root.path(), "renamed.TTA");
        touch(root.path(), "notes.txt");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_with_file("disc.wav"), None).unwrap();
        assert_eq!(got, canon(&actual));
    }

    #[test]
    fn scan_with_two_audio_files_is_ambiguous() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        touch(root.path(), "a.flac");
        touch(root.path(), "b.flac");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        match resolve_audio(&dirs, &cue, &disc_with_file("missing.flac"), None) {
            Err(ResolveError::Ambiguous { kind, candidates, .. }) => {
                assert_eq!(kind, FileKind::Audio);
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn scan_falls_through_to_sheet_dir() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "CD1/disc.cue");
        let audio = touch(root.path(), "CD1/track.flac");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_without_file(), None).unwrap();
        assert_eq!(got, canon(&audio));
    }

    #[test]
    fn no_audio_anywhere_is_not_found() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        match resolve_audio(&dirs, &cue, &disc_with_file("disc.flac"), None) {
            Err(ResolveError::NotFound { kind, searched }) => {
                assert_eq!(kind, FileKind::Audio);
                // Sheet sits in the root: one declared-name check, one scan.
                assert_eq!(searched, vec![root.path().join("disc.flac"), root.path().to_path_buf()]);
            }
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[test]
    fn sheet_dir_is_searched_once_when_it_is_the_root() {
        let root = TempDir::new().unwrap();
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(dirs.root_then(root.path()), vec![root.path()]);
        let sub = root.path().join("CD1");
        assert_eq!(dirs.root_then(&sub), vec![root.path(), sub.as_path()]);
    }

    #[test]
    fn audio_without_root_uses_sheet_dir() {
        let cwd = TempDir::new().unwrap();
        let cue = touch(cwd.path(), "rip/disc.cue");
        let declared = touch(cwd.path(), "rip/disc.wav");
        touch(cwd.path(), "rip/extra.flac");
        let dirs = SearchDirs::new(None, cwd.path().to_path_buf());
        let got = resolve_audio(&dirs, &cue, &disc_with_file("disc.wav"), None).unwrap();
        assert_eq!(got, canon(&declared));

        fs::remove_file(&declared).unwrap();
        let got = resolve_audio(&dirs, &cue, &disc_with_file("disc.wav"), None).unwrap();
        assert_eq!(got, canon(&cwd.path().join("rip/extra.flac")));
    }

    #[test]
    fn ambiguous_sheet_dir_scan_after_empty_root() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "CD1/disc.cue");
        touch(root.path(), "CD1/a.flac");
        touch(root.path(), "CD1/b.wav");
        touch(root.path(), "readme.txt");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        match resolve_audio(&dirs, &cue, &disc_without_file(), None) {
            Err(ResolveError::Ambiguous { kind, dir, candidates }) => {
                assert_eq!(kind, FileKind::Audio);
                assert_eq!(dir, root.path().join("CD1"));
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    // === Cover ===

    #[test]
    fn empty_cover_argument_disables_search() {
        let cwd = TempDir::new().unwrap();
        let missing = cwd.path().join("does-not-exist");
        let dirs = SearchDirs::new(Some(missing.clone()), missing.clone());
        let sheet = missing.join("disc.cue");
        assert_eq!(resolve_cover(&dirs, &sheet, Some(Path::new(""))).unwrap(), None);
    }

    #[test]
    fn priority_name_wins_over_other_images() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        touch(root.path(), "random.png");
        touch(root.path(), "aaa.jpg");
        let folder = touch(root.path(), "Folder.JPG");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(resolve_cover(&dirs, &cue, None).unwrap(), Some(canon(&folder)));
    }

    #[test]
    fn natural_order_picks_lowest_number() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        touch(root.path(), "10.jpg");
        let first = touch(root.path(), "1.jpg");
        touch(root.path(), "2.tiff");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(resolve_cover(&dirs, &cue, None).unwrap(), Some(canon(&first)));
    }

    #[test]
    fn root_images_stop_sheet_dir_scan() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "CD1/disc.cue");
        let scan = touch(root.path(), "scan.png");
        touch(root.path(), "CD1/cover.jpg");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(resolve_cover(&dirs, &cue, None).unwrap(), Some(canon(&scan)));
    }

    #[test]
    fn cover_found_next_to_sheet() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "CD1/disc.cue");
        let cover = touch(root.path(), "CD1/cover.png");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(resolve_cover(&dirs, &cue, None).unwrap(), Some(canon(&cover)));
    }

    #[test]
    fn cover_without_root_uses_sheet_dir() {
        let cwd = TempDir::new().unwrap();
        let cue = touch(cwd.path(), "rip/disc.cue");
        touch(cwd.path(), "rip/back.jpg");
        let front = touch(cwd.path(), "rip/front.png");
        touch(cwd.path(), "cover.jpg");
        let dirs = SearchDirs::new(None, cwd.path().to_path_buf());
        assert_eq!(
            resolve_cover(&dirs, &cue, None).unwrap(),
            Some(canon(&cwd.path().join("rip/back.jpg")))
        );
        assert_eq!(
            resolve_cover(&dirs, &cue, Some(Path::new("front.png"))).unwrap(),
            Some(canon(&front))
        );
    }

    #[test]
    fn no_images_means_no_cover() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        touch(root.path(), "booklet.pdf");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert_eq!(resolve_cover(&dirs, &cue, None).unwrap(), None);
    }

    #[test]
    fn explicit_cover_must_exist() {
        let root = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        touch(root.path(), "cover.jpg");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), root.path().to_path_buf());
        assert!(matches!(
            resolve_cover(&dirs, &cue, Some(Path::new("front.jpg"))),
            Err(ResolveError::InvalidArgument { kind: FileKind::Cover, .. })
        ));
    }

    #[test]
    fn explicit_cover_found_in_cwd() {
        let root = TempDir::new().unwrap();
        let cwd = TempDir::new().unwrap();
        let cue = touch(root.path(), "disc.cue");
        let front = touch(cwd.path(), "front.png");
        let dirs = SearchDirs::new(Some(root.path().to_path_buf()), cwd.path().to_path_buf());
        assert_eq!(
            resolve_cover(&dirs, &cue, Some(Path::new("front.png"))).unwrap(),
            Some(canon(&front))
        );
    }

    #[test]
    fn priority_names_are_exact() {
        assert!(is_priority_cover(Path::new("/x/COVER.tif")));
        assert!(is_priority_cover(Path::new("/x/folder.tiff")));
        assert!(!is_priority_cover(Path::new("/x/cover1.jpg")));
        assert!(!is_priority_cover(Path::new("/x/cover.jpeg")));
        assert!(!is_priority_cover(Path::new("/x/back cover.jpg")));
    }
}
