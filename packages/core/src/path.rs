//! Logical path type with validated, slash-separated components.

use std::fmt;
use std::path::PathBuf;

/// Reasons a string is rejected as a logical path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPath {
    #[error("invalid argument: empty path")]
    Empty,

    #[error("invalid argument: path must be relative")]
    Absolute,

    #[error("invalid argument: empty component at position {position}")]
    EmptyComponent { position: usize },

    #[error("invalid argument: '{component}' component at position {position}")]
    DotComponent { component: String, position: usize },
}

/// A validated logical path.
///
/// Logical paths name remote resources relative to the origin. They are
/// non-empty, slash-separated, relative, and contain no empty, `.` or `..`
/// components. `/files/a.txt`, `files//a.txt`, `files/` and `../a.txt` are
/// all rejected.
///
/// The only way to get a `Path` is through [`Path::parse`]:
///
/// ```compile_fail
/// let escape = remotefs_core::Path {
///     components: vec!["..".to_string(), "secret".to_string()],
/// };
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Path {
    components: Vec<String>,
}

impl Path {
    /// Parse and validate a logical path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use remotefs_core::Path;
    ///
    /// let path = Path::parse("files/subdir/file3.txt").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.base_name(), "file3.txt");
    ///
    /// assert!(Path::parse("/files/file1.txt").is_err());
    /// assert!(Path::parse("files/../secret").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidPath> {
        if s.is_empty() {
            return Err(InvalidPath::Empty);
        }
        if s.starts_with('/') {
            return Err(InvalidPath::Absolute);
        }

        let mut components = Vec::new();
        for (position, component) in s.split('/').enumerate() {
            match component {
                "" => return Err(InvalidPath::EmptyComponent { position }),
                "." | ".." => {
                    return Err(InvalidPath::DotComponent {
                        component: component.to_string(),
                        position,
                    })
                }
                _ => components.push(component.to_string()),
            }
        }

        Ok(Path { components })
    }

    /// Check a string against the logical path rules without allocating a `Path`.
    pub fn is_valid(s: &str) -> bool {
        !s.is_empty()
            && !s.starts_with('/')
            && s.split('/').all(|c| !matches!(c, "" | "." | ".."))
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Always false for a parsed path; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// The final component, e.g. `file3.txt` for `files/subdir/file3.txt`.
    pub fn base_name(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or("")
    }

    /// Everything but the final component, if any.
    pub fn parent(&self) -> Option<Path> {
        if self.components.len() < 2 {
            return None;
        }
        Some(Path {
            components: self.components[..self.components.len() - 1].to_vec(),
        })
    }

    /// Map this path onto a host directory tree rooted at `root`.
    ///
    /// Each component becomes one host path segment, so separators never leak
    /// out of a component.
    pub fn to_host_path(&self, root: &std::path::Path) -> PathBuf {
        let mut host = root.to_path_buf();
        host.extend(self.components.iter());
        host
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}

impl std::str::FromStr for Path {
    type Err = InvalidPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl std::ops::Index<usize> for Path {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}
