use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use rand::Rng;

use crate::fill::{write_sized_with_progress, FillMode, BLOCK_SIZE};
use crate::host::Host;
use crate::size::{parse_size, size_to_string};
use crate::{Error, Result, Status};

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub path: PathBuf,
    /// Size expression, see [`parse_size`](crate::parse_size).
    pub size: String,
    pub interactive: bool,
    pub overwrite: bool,
    /// Empty for random data.
    pub patterns: Vec<String>,
}

impl CreateRequest {
    /// Interactive request for a file of random bytes, existing files are
    /// not overwritten without asking.
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, size: S) -> Self {
        Self {
            path: path.into(),
            size: size.into(),
            interactive: true,
            overwrite: false,
            patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done { bytes: u64 },
    Cancelled,
}

impl Outcome {
    pub fn status(&self) -> Status {
        match self {
            Outcome::Done { .. } => Status::Ok,
            Outcome::Cancelled => Status::Cancelled,
        }
    }
}

pub fn create<R: Rng + ?Sized>(
    request: &CreateRequest,
    host: &mut dyn Host,
    rng: &mut R,
) -> Result<Outcome> {
    create_with_progress(request, host, rng, |_, _| ())
}

/// Creates the requested file, `progress` receives the number of bytes
/// written so far and the total after every block.
pub fn create_with_progress<R, F>(
    request: &CreateRequest,
    host: &mut dyn Host,
    rng: &mut R,
    mut progress: F,
) -> Result<Outcome>
where
    R: Rng + ?Sized,
    F: FnMut(u64, u64),
{
    let path = request.path.as_path();
    let size = parse_size(&request.size)?;
    let mode = FillMode::from_patterns(request.patterns.iter().map(String::as_str))?;

    if host.exists(path) {
        if !request.overwrite {
            if !request.interactive {
                return Err(Error::FileExists(request.path.clone()));
            }

            let prompt = format!("{} already exists, overwrite?", path.display());
            if !host.confirm(&prompt, false) {
                info!("not overwriting {}", path.display());
                return Ok(Outcome::Cancelled);
            }
        }

        warn!("removing existing {}", path.display());
        fs::remove_file(path).map_err(|source| Error::Unlink {
            path: request.path.clone(),
            source,
        })?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| Error::Open {
            path: request.path.clone(),
            source,
        })?;

    let mut out = BufWriter::with_capacity(BLOCK_SIZE * 16, file);
    let bytes = write_sized_with_progress(&mut out, size, &mode, rng, |x| progress(x, size))?;
    out.flush().map_err(Error::Write)?;

    info!(
        "created {} ({}, {} bytes)",
        path.display(),
        size_to_string(bytes),
        bytes
    );
    Ok(Outcome::Done { bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use std::path::Path;
    use tempfile::TempDir;

    /// Real filesystem, scripted answers.
    #[derive(Default)]
    struct ScriptedHost {
        answers: VecDeque<bool>,
        prompts: Vec<String>,
    }

    impl ScriptedHost {
        fn answering(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                prompts: Vec::new(),
            }
        }
    }

    impl Host for ScriptedHost {
        fn exists(&self, path: &Path) -> bool {
            path.exists()
        }

        fn confirm(&mut self, prompt: &str, default: bool) -> bool {
            self.prompts.push(prompt.to_owned());
            self.answers.pop_front().unwrap_or(default)
        }
    }

    fn run(request: &CreateRequest, host: &mut ScriptedHost) -> Result<Outcome> {
        create(request, host, &mut StdRng::seed_from_u64(0))
    }

    fn request(dir: &TempDir, size: &str) -> CreateRequest {
        CreateRequest::new(dir.path().join("out.bin"), size)
    }

    #[test]
    fn test_create_sizes() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        for size in ["0", "1", "4095", "4096", "10000", "3.5K", "1M"].iter() {
            for patterns in [vec![], vec!["AB"], vec!["A", "B", "C"]].iter() {
                let mut r = request(&dir, size);
                r.interactive = false;
                r.overwrite = true;
                r.patterns = patterns.iter().map(|x| x.to_string()).collect();

                let expected = parse_size(size).unwrap();
                let outcome = run(&r, &mut ScriptedHost::default()).unwrap();
                assert_eq!(outcome, Outcome::Done { bytes: expected });
                assert_eq!(fs::metadata(&r.path).unwrap().len(), expected);
            }
        }
    }

    #[test]
    fn test_create_pattern_content() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let mut r = request(&dir, "5");
        r.patterns = vec!["AB".to_owned()];
        run(&r, &mut ScriptedHost::default()).unwrap();
        assert_eq!(fs::read(&r.path).unwrap(), b"ABABA");
    }

    #[test]
    fn test_create_twice() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let mut r = request(&dir, "10000");
        r.overwrite = true;

        let mut host = ScriptedHost::default();
        create(&r, &mut host, &mut StdRng::seed_from_u64(1)).unwrap();
        let first = fs::read(&r.path).unwrap();
        create(&r, &mut host, &mut StdRng::seed_from_u64(2)).unwrap();
        let second = fs::read(&r.path).unwrap();

        assert_eq!(first.len(), 10000);
        assert_eq!(second.len(), 10000);
        assert_ne!(first, second);
        // overwrite permission means no questions
        assert!(host.prompts.is_empty());
    }

    #[test]
    fn test_create_exists_non_interactive() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let mut r = request(&dir, "10");
        r.interactive = false;
        fs::write(&r.path, b"keep").unwrap();

        let e = run(&r, &mut ScriptedHost::default()).unwrap_err();
        assert!(matches!(e, Error::FileExists(_)));
        assert_eq!(e.status(), Status::Conflict);
        assert_eq!(fs::read(&r.path).unwrap(), b"keep");
    }

    #[test]
    fn test_create_exists_declined() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let r = request(&dir, "10");
        fs::write(&r.path, b"keep").unwrap();

        let mut host = ScriptedHost::answering(&[false]);
        assert_eq!(run(&r, &mut host).unwrap(), Outcome::Cancelled);
        assert_eq!(Outcome::Cancelled.status().code(), 200);
        assert_eq!(host.prompts.len(), 1);
        assert!(host.prompts[0].ends_with("already exists, overwrite?"));
        assert_eq!(fs::read(&r.path).unwrap(), b"keep");
    }

    #[test]
    fn test_create_exists_confirmed() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let mut r = request(&dir, "3");
        r.patterns = vec!["x".to_owned()];
        fs::write(&r.path, b"replace me").unwrap();

        let mut host = ScriptedHost::answering(&[true]);
        assert_eq!(run(&r, &mut host).unwrap(), Outcome::Done { bytes: 3 });
        assert_eq!(fs::read(&r.path).unwrap(), b"xxx");
    }

    #[test]
    fn test_create_new_file_no_prompt() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let r = request(&dir, "1K");
        let mut host = ScriptedHost::default();
        assert_eq!(run(&r, &mut host).unwrap(), Outcome::Done { bytes: 1024 });
        assert!(host.prompts.is_empty());
    }

    #[test]
    fn test_create_invalid_size() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        for (size, status) in [("abc", Status::ClientError), ("5X", Status::ClientError)].iter() {
            let r = request(&dir, size);
            let e = run(&r, &mut ScriptedHost::default()).unwrap_err();
            assert_eq!(e.status(), *status);
            assert!(!r.path.exists());
        }

        let mut r = request(&dir, "10");
        r.patterns = vec!["a".to_owned(), String::new()];
        assert!(matches!(
            run(&r, &mut ScriptedHost::default()),
            Err(Error::EmptyPattern)
        ));
        assert!(!r.path.exists());
    }

    #[test]
    fn test_create_open_failure() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let r = CreateRequest::new(dir.path().join("missing").join("out.bin"), "10");
        let e = run(&r, &mut ScriptedHost::default()).unwrap_err();
        assert!(matches!(e, Error::Open { .. }));
        assert_eq!(e.status().code(), 500);
    }

    #[test]
    fn test_create_unlink_failure() {
        crate::tests_init();

        // a directory passes the existence check but can't be unlinked
        let dir = tempfile::tempdir().unwrap();
        let mut r = CreateRequest::new(dir.path(), "10");
        r.overwrite = true;
        let e = run(&r, &mut ScriptedHost::default()).unwrap_err();
        assert!(matches!(e, Error::Unlink { .. }));
        assert_eq!(e.status(), Status::ClientError);
    }

    #[test]
    fn test_create_progress() {
        crate::tests_init();

        let dir = tempfile::tempdir().unwrap();
        let mut r = request(&dir, "10000");
        r.patterns = vec!["0123456789abcdef".to_owned()];

        let mut calls = Vec::new();
        create_with_progress(
            &r,
            &mut ScriptedHost::default(),
            &mut StdRng::seed_from_u64(0),
            |written, total| calls.push((written, total)),
        )
        .unwrap();
        assert_eq!(calls, vec![(4096, 10000), (8192, 10000), (10000, 10000)]);
    }
}
